//! file: core/src/codegen/emitter.rs
//! description: orders `ObjectCode` records and writes the final fragment.
//!
//! Records are sorted by constructor level (deepest first), then by level,
//! then by name. Declarations are written in that order. A record whose
//! constructor level was raised by a later reference has its assignments
//! parked under its own level and released once the walk over the sorted
//! records drops below the constructor level that was current when they
//! were parked; whatever is still parked at the end is written last.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use log::debug;

use crate::codegen::node::ObjectCode;

fn emission_order(a: &ObjectCode, b: &ObjectCode) -> Ordering {
    b.constructor_level
        .cmp(&a.constructor_level)
        .then(a.level.cmp(&b.level))
        .then_with(|| a.reference_name.cmp(&b.reference_name))
}

/// Sort `nodes` and concatenate their declaration and assignment text.
pub fn emit(mut nodes: Vec<ObjectCode>, use_base_classes: bool) -> String {
    nodes.sort_by(emission_order);

    let mut out = String::new();
    let mut current_level = usize::MAX;
    let mut backlog: BTreeMap<usize, Vec<&ObjectCode>> = BTreeMap::new();
    let mut assignment_just_added = false;
    let mut deferred = 0usize;

    for node in nodes.iter() {
        if current_level > node.constructor_level {
            if let Some(parked) = backlog.remove(&current_level) {
                for p in parked {
                    out.push('\n');
                    out.push_str(&p.assignment_code);
                    assignment_just_added = true;
                }
            }
            current_level = node.constructor_level;
        }

        if (!out.is_empty() && !node.assignment_code.is_empty()) || assignment_just_added {
            out.push('\n');
        }

        out.push_str(&node.construct_code(use_base_classes));
        assignment_just_added = false;

        if !node.assignment_code.is_empty() {
            if node.constructor_level == node.level {
                out.push_str(&node.assignment_code);
                assignment_just_added = true;
            } else {
                deferred += 1;
                backlog.entry(node.level).or_default().push(node);
            }
        }
    }

    for parked in backlog.values() {
        for p in parked {
            out.push('\n');
            out.push_str(&p.assignment_code);
        }
    }

    debug!("emitted {} declarations, {} deferred assignment blocks", nodes.len(), deferred);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::introspect::Shape;

    fn node(name: &str, level: usize, constructor_level: usize, code: &str) -> ObjectCode {
        let mut n = ObjectCode::new(level, name.to_string(), Shape::Record, "T".to_string(), None);
        n.constructor_level = constructor_level;
        n.assignment_code = code.to_string();
        n
    }

    #[test]
    fn sort_is_deepest_constructor_first_then_shallowest_then_name() {
        let mut nodes = vec![
            node("c", 1, 1, ""),
            node("b", 0, 2, ""),
            node("a", 1, 1, ""),
            node("d", 2, 2, ""),
        ];
        nodes.sort_by(emission_order);
        let names: Vec<_> = nodes.iter().map(|n| n.reference_name.as_str()).collect();
        assert_eq!(names, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn undeferred_body_follows_its_declaration() {
        let out = emit(vec![node("t", 0, 0, "t.x = 1;\n")], true);
        assert_eq!(out, "T t = new T();\nt.x = 1;\n");
    }

    #[test]
    fn deferred_body_is_flushed_when_level_drops() {
        let nodes = vec![
            node("a", 0, 2, "a.next = b;\n"),
            node("b", 1, 1, "b.prev = a;\n"),
        ];
        let out = emit(nodes, true);
        assert_eq!(
            out,
            "T a = new T();\n\nT b = new T();\nb.prev = a;\n\na.next = b;\n"
        );
    }

    #[test]
    fn only_previous_level_is_flushed_on_a_jump() {
        // x parks under level 1 while current level is 3; y parks under 0.
        // Dropping from 3 to 0 only releases level 3, so both wait for the end.
        let nodes = vec![
            node("x", 1, 3, "x.v = 1;\n"),
            node("y", 0, 3, "y.v = 2;\n"),
            node("z", 0, 0, ""),
        ];
        let out = emit(nodes, true);
        assert_eq!(
            out,
            "T y = new T();\n\nT x = new T();\nT z = new T();\n\ny.v = 2;\n\nx.v = 1;\n"
        );
    }
}
