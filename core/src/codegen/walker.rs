//! file: core/src/codegen/walker.rs
//! description: depth-first traversal that turns an object graph into
//! `ObjectCode` records.
//!
//! Every composite gets exactly one `ObjectCode`, keyed by its `ObjectId`.
//! The record is registered before its members are visited, so a member that
//! leads back to an object still being walked resolves to that object's name
//! instead of recursing again. Such repeat visits only raise the target's
//! constructor level.

use std::collections::HashMap;

use log::{debug, trace};

use crate::codegen::generics::{Narrowing, UNIVERSAL_TYPE};
use crate::codegen::literal::LiteralRenderer;
use crate::codegen::naming::{declared_name, simple_name, UniqueNameGenerator};
use crate::codegen::node::ObjectCode;
use crate::error::AccessError;
use crate::model::introspect::{Introspector, MemberDescriptor, Shape};
use crate::model::value::{ObjectId, Value};
use crate::path::{MemberPath, Segment};
use crate::settings::Settings;

const NULL_LITERAL: &str = "null";

pub struct GraphWalker<'a> {
    types: &'a dyn Introspector,
    literals: &'a dyn LiteralRenderer,
    settings: &'a Settings,
    names: UniqueNameGenerator,
    nodes: Vec<ObjectCode>,
    index: HashMap<ObjectId, usize>,
    path: MemberPath,
}

impl<'a> GraphWalker<'a> {
    pub fn new(
        types: &'a dyn Introspector,
        literals: &'a dyn LiteralRenderer,
        settings: &'a Settings,
        root_name: &str,
    ) -> Self {
        GraphWalker {
            types,
            literals,
            settings,
            names: UniqueNameGenerator::new(),
            nodes: Vec::new(),
            index: HashMap::new(),
            path: MemberPath::new(root_name),
        }
    }

    /// Visit `value` found at depth `level` and return the expression that
    /// refers to it: a literal, `null`, or the name of its declaration.
    pub fn visit(
        &mut self,
        value: &Value,
        level: usize,
        variable_type: Option<String>,
        variable_name: Option<&str>,
    ) -> Result<String, AccessError> {
        if value.is_null() || level > self.settings.max_level {
            return Ok(NULL_LITERAL.to_string());
        }
        let id = match value {
            Value::Scalar(s) => return Ok(self.literals.render(s)),
            Value::Ref(id) => *id,
            Value::Null => return Ok(NULL_LITERAL.to_string()),
        };

        if let Some(&existing) = self.index.get(&id) {
            let node = &mut self.nodes[existing];
            let before = node.constructor_level;
            node.referenced_at(level);
            debug!(
                "{} referenced again at level {} (constructor level {} -> {})",
                node.reference_name, level, before, node.constructor_level
            );
            return Ok(node.reference_name.clone());
        }

        let type_name = self.types.type_name(id);
        let reference_name = match variable_name {
            Some(name) => self.names.create_unique_name(name),
            None => self.names.gen_reference_name(&type_name),
        };
        let shape = self.types.shape(id);
        let mut node = ObjectCode::new(
            level,
            reference_name.clone(),
            shape,
            simple_name(&type_name),
            variable_type,
        );
        if node.runtime_type.is_empty() {
            node.base_type = self
                .types
                .supertypes(&type_name)
                .first()
                .map(|s| simple_name(s))
                .unwrap_or_else(|| "Object".to_string());
        }
        debug!("declaring {} ({}) at level {}", reference_name, type_name, level);

        let slot = self.nodes.len();
        self.nodes.push(node);
        self.index.insert(id, slot);

        match shape {
            Shape::Array => {
                let (code, length) = self.array_code(id, level, &reference_name)?;
                let node = &mut self.nodes[slot];
                node.length = length;
                node.assignment_code = code;
            }
            Shape::Collection => {
                let (code, element_type) = self.collection_code(id, level, &reference_name)?;
                let node = &mut self.nodes[slot];
                node.key_type = element_type;
                node.assignment_code = code;
            }
            Shape::Map => {
                let (code, key_type, value_type) = self.map_code(id, level, &reference_name)?;
                let node = &mut self.nodes[slot];
                node.key_type = key_type;
                node.value_type = value_type;
                node.assignment_code = code;
            }
            Shape::Record => {
                let code = self.record_code(id, level, &reference_name)?;
                self.nodes[slot].assignment_code = code;
            }
        }

        Ok(reference_name)
    }

    /// Hand over the collected records once traversal is finished.
    pub fn into_nodes(self) -> Vec<ObjectCode> {
        self.nodes
    }

    fn value_type_name(&self, value: &Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::Scalar(s) => Some(s.type_name()),
            Value::Ref(id) => {
                let type_name = self.types.type_name(*id);
                if simple_name(&type_name).is_empty() {
                    // anonymous: stand in with the type it extends
                    Some(
                        self.types
                            .supertypes(&type_name)
                            .into_iter()
                            .next()
                            .unwrap_or_else(|| UNIVERSAL_TYPE.to_string()),
                    )
                } else {
                    Some(type_name)
                }
            }
        }
    }

    fn narrow(&self, narrowing: Narrowing, value: &Value) -> Narrowing {
        match self.value_type_name(value) {
            Some(t) => narrowing.narrow(&t, self.types),
            None => narrowing,
        }
    }

    fn visit_child(&mut self, segment: Segment, value: &Value, level: usize) -> Result<String, AccessError> {
        self.path.push(segment);
        let code = self.visit(value, level + 1, None, None)?;
        self.path.pop();
        Ok(code)
    }

    fn array_code(&mut self, id: ObjectId, level: usize, reference_name: &str) -> Result<(String, usize), AccessError> {
        let elements = self.types.elements(id);
        let mut code = String::new();
        for (i, element) in elements.iter().enumerate() {
            let element_code = self.visit_child(Segment::Index(i), element, level)?;
            code.push_str(&format!("{}[{}] = {};\n", reference_name, i, element_code));
        }
        Ok((code, elements.len()))
    }

    fn collection_code(
        &mut self,
        id: ObjectId,
        level: usize,
        reference_name: &str,
    ) -> Result<(String, Option<String>), AccessError> {
        let use_generics = self.settings.use_generics;
        let mut element_type = Narrowing::Empty;
        let mut code = String::new();
        for (i, element) in self.types.elements(id).iter().enumerate() {
            if use_generics {
                element_type = self.narrow(element_type, element);
            }
            let element_code = self.visit_child(Segment::Index(i), element, level)?;
            code.push_str(&format!("{}.add({});\n", reference_name, element_code));
        }
        Ok((code, element_type.resolve(self.settings.use_known_generics)))
    }

    fn map_code(
        &mut self,
        id: ObjectId,
        level: usize,
        reference_name: &str,
    ) -> Result<(String, Option<String>, Option<String>), AccessError> {
        let use_generics = self.settings.use_generics;
        let mut key_type = Narrowing::Empty;
        let mut value_type = Narrowing::Empty;
        let mut code = String::new();
        for (key, value) in self.types.entries(id).iter() {
            if use_generics {
                key_type = self.narrow(key_type, key);
                value_type = self.narrow(value_type, value);
            }
            let key_label = match key {
                Value::Scalar(s) => self.literals.render(s),
                Value::Ref(key_id) => key_id.to_string(),
                Value::Null => NULL_LITERAL.to_string(),
            };
            let key_code = self.visit_child(Segment::Key(key_label.clone()), key, level)?;
            let value_code = self.visit_child(Segment::Key(key_label), value, level)?;
            code.push_str(&format!("{}.put({}, {});\n", reference_name, key_code, value_code));
        }
        let known_only = self.settings.use_known_generics;
        Ok((code, key_type.resolve(known_only), value_type.resolve(known_only)))
    }

    fn record_code(&mut self, id: ObjectId, level: usize, reference_name: &str) -> Result<String, AccessError> {
        let mut code = String::new();
        for member in self.types.members(id) {
            if let Some(statement) = self.member_statement(id, &member, level, reference_name)? {
                code.push_str(&statement);
            }
        }
        Ok(code)
    }

    /// Assignment for one record member, or `None` when the member is skipped.
    fn member_statement(
        &mut self,
        id: ObjectId,
        member: &MemberDescriptor,
        level: usize,
        reference_name: &str,
    ) -> Result<Option<String>, AccessError> {
        if member.constant {
            trace!("{}.{}: constant member skipped", reference_name, member.name);
            return Ok(None);
        }

        let mut hint_name = member.name.clone();
        let mut mutator = self.types.find_mutator(id, &hint_name, &member.declared_type);
        if mutator.is_none() && self.settings.support_underscores && hint_name.starts_with('_') {
            hint_name = hint_name[1..].to_string();
            mutator = self.types.find_mutator(id, &hint_name, &member.declared_type);
        }

        if mutator.is_none() && member.restricted {
            trace!("{}.{}: no mutator and not assignable", reference_name, member.name);
            return Ok(None);
        }

        self.path.push(Segment::Field(member.name.clone()));
        let value = self
            .types
            .member_value(id, member)
            .map_err(|e| e.at(self.path.clone()))?;

        if value.is_null() && self.settings.skip_nulls {
            trace!("{}.{}: null skipped", reference_name, member.name);
            self.path.pop();
            return Ok(None);
        }
        if self.settings.skip_defaults && member.primitive {
            if let Value::Scalar(s) = &value {
                if s.is_primitive_default() {
                    trace!("{}.{}: default skipped", reference_name, member.name);
                    self.path.pop();
                    return Ok(None);
                }
            }
        }

        let statement = match mutator {
            Some(m) => {
                let hint_type = m.parameter_type.as_deref().map(declared_name);
                let value_code = self.visit(&value, level + 1, hint_type, Some(hint_name.as_str()))?;
                format!("{}.{}({});\n", reference_name, m.name, value_code)
            }
            None => {
                let hint_type = Some(declared_name(&member.declared_type));
                let value_code = self.visit(&value, level + 1, hint_type, Some(hint_name.as_str()))?;
                format!("{}.{} = {};\n", reference_name, member.name, value_code)
            }
        };
        self.path.pop();
        Ok(Some(statement))
    }
}
