use crate::codegen::naming::simple_name;
use crate::model::introspect::Introspector;

/// Name used for the type parameter when nothing narrower is known.
pub const UNIVERSAL_TYPE: &str = "Object";

fn lineage(type_name: &str, types: &dyn Introspector) -> Vec<String> {
    let mut chain = vec![type_name.to_string()];
    chain.extend(types.supertypes(type_name));
    chain
}

/// Running result of narrowing a set of element types to their nearest
/// common supertype.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Narrowing {
    /// No non-null element seen yet.
    #[default]
    Empty,
    Known(String),
    /// Elements seen so far share only the universal root.
    Unrelated,
}

impl Narrowing {
    /// Fold one more element type into the running result.
    pub fn narrow(self, type_name: &str, types: &dyn Introspector) -> Narrowing {
        match self {
            Narrowing::Empty => Narrowing::Known(type_name.to_string()),
            Narrowing::Known(current) if simple_name(&current) == simple_name(type_name) => {
                Narrowing::Known(current)
            }
            Narrowing::Known(current) => {
                let theirs: Vec<String> = lineage(type_name, types).iter().map(|t| simple_name(t)).collect();
                match lineage(&current, types)
                    .into_iter()
                    .find(|t| theirs.contains(&simple_name(t)))
                {
                    Some(common) => Narrowing::Known(common),
                    None => Narrowing::Unrelated,
                }
            }
            Narrowing::Unrelated => Narrowing::Unrelated,
        }
    }

    /// Type parameter to emit, if any. With `known_only`, unrelated elements
    /// produce none; otherwise they fall back to the universal type.
    pub fn resolve(self, known_only: bool) -> Option<String> {
        match self {
            Narrowing::Empty => None,
            Narrowing::Known(t) => Some(simple_name(&t)).filter(|name| !name.is_empty()),
            Narrowing::Unrelated if known_only => None,
            Narrowing::Unrelated => Some(UNIVERSAL_TYPE.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::graph::ObjectGraph;

    fn zoo() -> ObjectGraph {
        let mut g = ObjectGraph::new();
        g.declare_type("Dog", &["Animal"]);
        g.declare_type("Cat", &["Animal"]);
        g.declare_type("Puppy", &["Dog"]);
        g
    }

    #[test]
    fn identical_types_stay_put() {
        let g = zoo();
        let n = Narrowing::Empty.narrow("com.zoo.Dog", &g).narrow("Dog", &g);
        assert_eq!(n.resolve(true).as_deref(), Some("Dog"));
    }

    #[test]
    fn siblings_narrow_to_parent() {
        let g = zoo();
        let n = Narrowing::Empty.narrow("Puppy", &g).narrow("Cat", &g);
        assert_eq!(n.resolve(true).as_deref(), Some("Animal"));
    }

    #[test]
    fn subtype_after_supertype_keeps_supertype() {
        let g = zoo();
        let n = Narrowing::Empty.narrow("Dog", &g).narrow("Puppy", &g);
        assert_eq!(n, Narrowing::Known("Dog".to_string()));
    }

    #[test]
    fn unrelated_types_depend_on_known_only() {
        let g = zoo();
        let n = Narrowing::Empty.narrow("String", &g).narrow("Dog", &g);
        assert_eq!(n, Narrowing::Unrelated);
        assert_eq!(n.clone().resolve(true), None);
        assert_eq!(n.resolve(false).as_deref(), Some("Object"));
    }

    #[test]
    fn unrelated_is_sticky() {
        let g = zoo();
        let n = Narrowing::Empty
            .narrow("String", &g)
            .narrow("Integer", &g)
            .narrow("String", &g);
        assert_eq!(n, Narrowing::Unrelated);
    }

    #[test]
    fn anonymous_known_type_yields_no_parameter() {
        assert_eq!(Narrowing::Known("com.acme.Main$1".to_string()).resolve(true), None);
    }

    #[test]
    fn numbers_meet_at_number() {
        let g = zoo();
        let n = Narrowing::Empty.narrow("Integer", &g).narrow("Long", &g);
        assert_eq!(n.resolve(true).as_deref(), Some("Number"));
    }
}
