//! Identifier allocation and type-name helpers.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

lazy_static! {
    static ref RESERVED: HashSet<&'static str> = [
        "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class",
        "const", "continue", "default", "do", "double", "else", "enum", "extends", "false",
        "final", "finally", "float", "for", "goto", "if", "implements", "import", "instanceof",
        "int", "interface", "long", "native", "new", "null", "package", "private", "protected",
        "public", "return", "short", "static", "strictfp", "super", "switch", "synchronized",
        "this", "throw", "throws", "transient", "true", "try", "var", "void", "volatile", "while",
    ]
    .into_iter()
    .collect();
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name)
}

/// Strip the package from a qualified type name. Nested types keep their
/// outer type (`Outer$Inner` -> `Outer.Inner`); anonymous types such as
/// `Outer$1` have no simple name and yield an empty string.
pub fn simple_name(type_name: &str) -> String {
    let (base, generics) = match type_name.find('<') {
        Some(pos) => type_name.split_at(pos),
        None => (type_name, ""),
    };
    let unqualified = base.rsplit('.').next().unwrap_or(base);
    if let Some(last) = unqualified.rsplit('$').next() {
        if unqualified.contains('$') && !last.is_empty() && last.chars().all(|c| c.is_ascii_digit()) {
            return String::new();
        }
    }
    format!("{}{}", unqualified.replace('$', "."), generics)
}

/// `simple_name` without type arguments, as used on the left of a
/// declaration: `java.util.List<java.lang.String>` -> `List`.
pub fn declared_name(type_name: &str) -> String {
    simple_name(type_name.split('<').next().unwrap_or(type_name))
}

pub fn first_upper(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn first_lower(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Base identifier for an object of `type_name`: `ArrayList<String>` ->
/// `arrayList`, `int[]` -> `intArray`, `Outer.Inner` -> `inner`.
pub fn reference_base(type_name: &str) -> String {
    let simple = simple_name(type_name);
    let without_generics = simple.split('<').next().unwrap_or("").to_string();
    let dims = without_generics.matches("[]").count();
    let element = without_generics.replace("[]", "");
    let element = element.rsplit('.').next().unwrap_or("").to_string();
    let mut base = first_lower(&element);
    for _ in 0..dims {
        base.push_str("Array");
    }
    if base.is_empty() {
        "object".to_string()
    } else {
        base
    }
}

fn sanitize(name: &str) -> String {
    let mut out: String = name
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '_' || c == '$' { c } else { '_' })
        .collect();
    if out.is_empty() {
        out.push_str("object");
    }
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// Hands out identifiers that never repeat within one run.
#[derive(Debug, Default, Clone)]
pub struct UniqueNameGenerator {
    issued: HashSet<String>,
    next_suffix: HashMap<String, usize>,
}

impl UniqueNameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// `name` itself if still free, else `name1`, `name2`, ...
    pub fn create_unique_name(&mut self, name: &str) -> String {
        let base = sanitize(name);
        if !is_reserved(&base) && self.issued.insert(base.clone()) {
            return base;
        }
        let mut n = self.next_suffix.get(&base).copied().unwrap_or(1);
        loop {
            let candidate = format!("{}{}", base, n);
            n += 1;
            if self.issued.insert(candidate.clone()) {
                self.next_suffix.insert(base, n);
                return candidate;
            }
        }
    }

    /// Unique identifier derived from a runtime type name.
    pub fn gen_reference_name(&mut self, type_name: &str) -> String {
        let base = reference_base(type_name);
        self.create_unique_name(&base)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_name_strips_package_and_detects_anonymous() {
        assert_eq!(simple_name("java.util.ArrayList"), "ArrayList");
        assert_eq!(simple_name("com.acme.Outer$Inner"), "Outer.Inner");
        assert_eq!(simple_name("com.acme.Outer$1"), "");
        assert_eq!(simple_name("java.util.List<java.lang.String>"), "List<java.lang.String>");
        assert_eq!(simple_name("Plain"), "Plain");
    }

    #[test]
    fn reference_base_handles_arrays_and_generics() {
        assert_eq!(reference_base("java.util.ArrayList"), "arrayList");
        assert_eq!(reference_base("int[]"), "intArray");
        assert_eq!(reference_base("String[][]"), "stringArrayArray");
        assert_eq!(reference_base("Map<String, Integer>"), "map");
        assert_eq!(reference_base("Outer$Inner"), "inner");
        assert_eq!(reference_base("Outer$1"), "object");
    }

    #[test]
    fn collisions_get_increasing_suffixes() {
        let mut names = UniqueNameGenerator::new();
        assert_eq!(names.create_unique_name("person"), "person");
        assert_eq!(names.create_unique_name("person"), "person1");
        assert_eq!(names.create_unique_name("person"), "person2");
        assert_eq!(names.create_unique_name("person1x"), "person1x");
    }

    #[test]
    fn explicitly_requested_suffix_is_skipped() {
        let mut names = UniqueNameGenerator::new();
        assert_eq!(names.create_unique_name("a1"), "a1");
        assert_eq!(names.create_unique_name("a"), "a");
        assert_eq!(names.create_unique_name("a"), "a2");
    }

    #[test]
    fn reserved_words_are_never_issued_bare() {
        let mut names = UniqueNameGenerator::new();
        assert_eq!(names.gen_reference_name("Class"), "class1");
        assert_eq!(names.create_unique_name("new"), "new1");
        assert_eq!(names.create_unique_name("class"), "class2");
    }

    #[test]
    fn requested_names_are_sanitised() {
        let mut names = UniqueNameGenerator::new();
        assert_eq!(names.create_unique_name("first-name"), "first_name");
        assert_eq!(names.create_unique_name("2nd"), "_2nd");
    }
}
