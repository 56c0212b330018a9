//! file: core/src/codegen/node.rs
//! description: per-identity declaration record produced by the walker.

use crate::model::introspect::Shape;

/// One distinct composite reachable from the root.
///
/// `level` is fixed when the object is first discovered. `constructor_level`
/// starts equal to it and only ever grows as deeper owners reference the same
/// object again; the emitter uses it to pull the declaration earlier.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectCode {
    pub level: usize,
    pub constructor_level: usize,
    pub reference_name: String,
    /// Declared type at the first reference, if the owner supplied one.
    pub variable_type: Option<String>,
    /// Simple runtime type name; empty for anonymous types.
    pub runtime_type: String,
    /// First supertype, used when the runtime type has no name.
    pub base_type: String,
    pub shape: Shape,
    pub length: usize,
    /// Key type for maps, element type for collections.
    pub key_type: Option<String>,
    /// Value type for maps.
    pub value_type: Option<String>,
    pub assignment_code: String,
}

impl ObjectCode {
    pub fn new(
        level: usize,
        reference_name: String,
        shape: Shape,
        runtime_type: String,
        variable_type: Option<String>,
    ) -> Self {
        ObjectCode {
            level,
            constructor_level: level,
            reference_name,
            variable_type,
            runtime_type,
            base_type: String::new(),
            shape,
            length: 0,
            key_type: None,
            value_type: None,
            assignment_code: String::new(),
        }
    }

    /// Record another reference from depth `level`.
    pub fn referenced_at(&mut self, level: usize) {
        if self.constructor_level < level {
            self.constructor_level = level;
        }
    }

    /// `Type<G> name = new Ctor<>();` followed by a newline.
    pub fn construct_code(&self, use_base_classes: bool) -> String {
        let simple_name = &self.runtime_type;
        let mut class_name = match &self.variable_type {
            None => simple_name.clone(),
            Some(declared) if use_base_classes => declared.clone(),
            Some(_) => simple_name.clone(),
        };
        if class_name.is_empty() {
            if let Some(declared) = &self.variable_type {
                class_name = declared.clone();
            }
        }
        if class_name.is_empty() {
            class_name = self.base_type.clone();
        }

        let constructor_call = if self.shape == Shape::Array {
            simple_name.replacen("[]", &format!("[{}]", self.length), 1)
        } else if simple_name.is_empty() {
            format!("{}{}() {{/* anonymous class */}}", self.base_type, self.ctor_generics())
        } else {
            format!("{}{}()", simple_name, self.ctor_generics())
        };

        format!(
            "{}{} {} = new {};\n",
            class_name,
            self.var_generics(),
            self.reference_name,
            constructor_call
        )
    }

    fn var_generics(&self) -> String {
        match (&self.key_type, &self.value_type) {
            (Some(k), Some(v)) => format!("<{}, {}>", k, v),
            (Some(k), None) => format!("<{}>", k),
            _ => String::new(),
        }
    }

    fn ctor_generics(&self) -> &'static str {
        if self.key_type.is_some() || self.value_type.is_some() {
            "<>"
        } else {
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(shape: Shape, runtime: &str, declared: Option<&str>) -> ObjectCode {
        ObjectCode::new(0, "x".to_string(), shape, runtime.to_string(), declared.map(String::from))
    }

    #[test]
    fn declared_type_wins_only_with_base_classes() {
        let n = node(Shape::Record, "ArrayList", Some("List"));
        assert_eq!(n.construct_code(true), "List x = new ArrayList();\n");
        assert_eq!(n.construct_code(false), "ArrayList x = new ArrayList();\n");
    }

    #[test]
    fn arrays_declare_length_once() {
        let mut n = node(Shape::Array, "int[][]", None);
        n.length = 3;
        assert_eq!(n.construct_code(true), "int[][] x = new int[3][];\n");
    }

    #[test]
    fn generics_go_on_variable_and_diamond_on_constructor() {
        let mut n = node(Shape::Map, "HashMap", Some("Map"));
        n.key_type = Some("String".to_string());
        n.value_type = Some("Integer".to_string());
        assert_eq!(n.construct_code(true), "Map<String, Integer> x = new HashMap<>();\n");
    }

    #[test]
    fn value_type_alone_only_adds_diamond() {
        let mut n = node(Shape::Map, "HashMap", None);
        n.value_type = Some("Integer".to_string());
        assert_eq!(n.construct_code(true), "HashMap x = new HashMap<>();\n");
    }

    #[test]
    fn anonymous_type_uses_base() {
        let mut n = node(Shape::Record, "", None);
        n.base_type = "Runnable".to_string();
        assert_eq!(n.construct_code(true), "Runnable x = new Runnable() {/* anonymous class */};\n");
    }

    #[test]
    fn constructor_level_only_grows() {
        let mut n = node(Shape::Record, "A", None);
        n.referenced_at(3);
        n.referenced_at(1);
        assert_eq!(n.constructor_level, 3);
        assert_eq!(n.level, 0);
    }
}
