//! file: core/src/model/graph.rs
//! description: in-memory object arena implementing `Introspector`.
//!
//! `ObjectGraph` owns every composite by `ObjectId`. Objects are allocated
//! first and filled in afterwards, which is what makes it possible to build
//! aliasing and cyclic structures:
//!
//! ```ignore
//! let mut g = ObjectGraph::new();
//! let a = g.record("A");
//! g.field(a, MemberDescriptor::new("me", "A"), a);
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

use log::warn;

use crate::codegen::naming::{first_upper, simple_name};
use crate::error::AccessError;
use crate::model::introspect::{Introspector, MemberDescriptor, Mutator, Shape};
use crate::model::value::{ObjectId, Value};

const NUMBER_TYPES: [&str; 8] = [
    "Byte",
    "Short",
    "Integer",
    "Long",
    "Float",
    "Double",
    "BigDecimal",
    "BigInteger",
];

/// Lookup key for the type table: generics and package dropped, `$` kept so
/// nested and anonymous types stay distinct.
fn type_key(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    base.rsplit('.').next().unwrap_or(base).to_string()
}

#[derive(Debug, Clone)]
struct Field {
    descriptor: MemberDescriptor,
    value: Value,
    readable: bool,
}

#[derive(Debug, Clone)]
enum Body {
    Array(Vec<Value>),
    Collection(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Record(Vec<Field>),
}

#[derive(Debug, Clone)]
struct ObjectEntry {
    type_name: String,
    body: Body,
}

#[derive(Debug, Clone, Default)]
struct TypeEntry {
    supertypes: Vec<String>,
    /// member name -> mutator
    mutators: HashMap<String, Mutator>,
}

#[derive(Debug, Clone)]
pub struct ObjectGraph {
    objects: Vec<ObjectEntry>,
    types: HashMap<String, TypeEntry>,
}

impl Default for ObjectGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectGraph {
    /// Create an empty graph whose type table already knows the numeric
    /// wrapper types share `Number`.
    pub fn new() -> Self {
        let mut graph = ObjectGraph {
            objects: Vec::new(),
            types: HashMap::new(),
        };
        for name in NUMBER_TYPES {
            graph.declare_type(name, &["Number"]);
        }
        graph
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn alloc(&mut self, type_name: &str, body: Body) -> ObjectId {
        let id = ObjectId(self.objects.len());
        self.objects.push(ObjectEntry {
            type_name: type_name.to_string(),
            body,
        });
        id
    }

    pub fn record(&mut self, type_name: &str) -> ObjectId {
        self.alloc(type_name, Body::Record(Vec::new()))
    }

    pub fn collection(&mut self, type_name: &str) -> ObjectId {
        self.alloc(type_name, Body::Collection(Vec::new()))
    }

    pub fn map(&mut self, type_name: &str) -> ObjectId {
        self.alloc(type_name, Body::Map(Vec::new()))
    }

    /// Allocate an array; `type_name` carries the brackets, e.g. `int[]`.
    pub fn array(&mut self, type_name: &str) -> ObjectId {
        self.alloc(type_name, Body::Array(Vec::new()))
    }

    /// Append a member to a record.
    pub fn field(&mut self, id: ObjectId, member: MemberDescriptor, value: impl Into<Value>) -> &mut Self {
        match self.objects.get_mut(id.0).map(|o| &mut o.body) {
            Some(Body::Record(fields)) => fields.push(Field {
                descriptor: member,
                value: value.into(),
                readable: true,
            }),
            _ => warn!("field '{}' ignored: {} is not a record", member.name, id),
        }
        self
    }

    /// Append an element to an array or collection.
    pub fn push(&mut self, id: ObjectId, value: impl Into<Value>) -> &mut Self {
        match self.objects.get_mut(id.0).map(|o| &mut o.body) {
            Some(Body::Array(items)) | Some(Body::Collection(items)) => items.push(value.into()),
            _ => warn!("element ignored: {} is not an array or collection", id),
        }
        self
    }

    /// Add an entry to a map.
    pub fn put(&mut self, id: ObjectId, key: impl Into<Value>, value: impl Into<Value>) -> &mut Self {
        match self.objects.get_mut(id.0).map(|o| &mut o.body) {
            Some(Body::Map(entries)) => entries.push((key.into(), value.into())),
            _ => warn!("entry ignored: {} is not a map", id),
        }
        self
    }

    /// Make reads of `member_name` on `id` fail with an access error.
    pub fn deny_access(&mut self, id: ObjectId, member_name: &str) -> &mut Self {
        if let Some(Body::Record(fields)) = self.objects.get_mut(id.0).map(|o| &mut o.body) {
            for f in fields.iter_mut().filter(|f| f.descriptor.name == member_name) {
                f.readable = false;
            }
        }
        self
    }

    /// Record the direct supertypes of `type_name`.
    pub fn declare_type(&mut self, type_name: &str, supertypes: &[&str]) -> &mut Self {
        let entry = self.types.entry(type_key(type_name)).or_default();
        for s in supertypes {
            let s = type_key(s);
            if !entry.supertypes.contains(&s) {
                entry.supertypes.push(s);
            }
        }
        self
    }

    /// Register `set<Member>(parameter_type)` on `type_name`.
    pub fn setter(&mut self, type_name: &str, member_name: &str, parameter_type: &str) -> &mut Self {
        let mutator = Mutator::new(
            format!("set{}", first_upper(member_name)),
            Some(simple_name(parameter_type)),
        );
        self.types
            .entry(type_key(type_name))
            .or_default()
            .mutators
            .insert(member_name.to_string(), mutator);
        self
    }

    fn entry(&self, id: ObjectId) -> Option<&ObjectEntry> {
        self.objects.get(id.0)
    }

    /// The type itself followed by all of its ancestors, nearest first.
    fn lineage(&self, type_name: &str) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        let mut order = Vec::new();
        let mut queue: VecDeque<String> = VecDeque::new();
        queue.push_back(type_key(type_name));
        while let Some(t) = queue.pop_front() {
            if !seen.insert(t.clone()) {
                continue;
            }
            if let Some(entry) = self.types.get(&t) {
                queue.extend(entry.supertypes.iter().cloned());
            }
            order.push(t);
        }
        order
    }
}

impl Introspector for ObjectGraph {
    fn type_name(&self, id: ObjectId) -> String {
        self.entry(id)
            .map(|o| o.type_name.clone())
            .unwrap_or_else(|| "Object".to_string())
    }

    fn shape(&self, id: ObjectId) -> Shape {
        match self.entry(id).map(|o| &o.body) {
            Some(Body::Array(_)) => Shape::Array,
            Some(Body::Collection(_)) => Shape::Collection,
            Some(Body::Map(_)) => Shape::Map,
            _ => Shape::Record,
        }
    }

    fn elements(&self, id: ObjectId) -> Vec<Value> {
        match self.entry(id).map(|o| &o.body) {
            Some(Body::Array(items)) | Some(Body::Collection(items)) => items.clone(),
            _ => Vec::new(),
        }
    }

    fn entries(&self, id: ObjectId) -> Vec<(Value, Value)> {
        match self.entry(id).map(|o| &o.body) {
            Some(Body::Map(entries)) => entries.clone(),
            _ => Vec::new(),
        }
    }

    fn members(&self, id: ObjectId) -> Vec<MemberDescriptor> {
        match self.entry(id).map(|o| &o.body) {
            Some(Body::Record(fields)) => fields.iter().map(|f| f.descriptor.clone()).collect(),
            _ => Vec::new(),
        }
    }

    fn member_value(&self, id: ObjectId, member: &MemberDescriptor) -> Result<Value, AccessError> {
        let field = match self.entry(id).map(|o| &o.body) {
            Some(Body::Record(fields)) => fields.iter().find(|f| f.descriptor.name == member.name),
            _ => None,
        };
        match field {
            Some(f) if f.readable => Ok(f.value.clone()),
            Some(_) => Err(AccessError::new(format!(
                "{}.{} is not readable",
                self.type_name(id),
                member.name
            ))),
            None => Err(AccessError::new(format!(
                "{} has no member {}",
                self.type_name(id),
                member.name
            ))),
        }
    }

    fn find_mutator(&self, id: ObjectId, member_name: &str, declared_type: &str) -> Option<Mutator> {
        let wanted = simple_name(declared_type);
        self.lineage(&self.type_name(id))
            .iter()
            .filter_map(|t| self.types.get(t))
            .filter_map(|t| t.mutators.get(member_name))
            .find(|m| m.parameter_type.as_deref() == Some(wanted.as_str()))
            .cloned()
    }

    fn supertypes(&self, type_name: &str) -> Vec<String> {
        self.lineage(type_name).into_iter().skip(1).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setter_is_found_through_supertype() {
        let mut g = ObjectGraph::new();
        g.declare_type("Dog", &["Animal"]);
        g.setter("Animal", "name", "String");
        let dog = g.record("com.zoo.Dog");
        let m = g.find_mutator(dog, "name", "String").expect("inherited setter");
        assert_eq!(m.name, "setName");
        assert!(g.find_mutator(dog, "name", "Integer").is_none());
    }

    #[test]
    fn anonymous_types_keep_their_own_entry() {
        let mut g = ObjectGraph::new();
        g.declare_type("com.acme.Main$1", &["java.lang.Runnable"]);
        g.declare_type("com.acme.Main$2", &["Comparator"]);
        assert_eq!(g.supertypes("com.acme.Main$1"), vec!["Runnable".to_string()]);
        assert_eq!(g.supertypes("Main$2"), vec!["Comparator".to_string()]);
    }

    #[test]
    fn numeric_wrappers_share_number() {
        let g = ObjectGraph::new();
        assert_eq!(g.supertypes("Integer"), vec!["Number".to_string()]);
        assert!(g.supertypes("String").is_empty());
    }

    #[test]
    fn denied_member_reports_access_error() {
        let mut g = ObjectGraph::new();
        let a = g.record("A");
        g.field(a, MemberDescriptor::new("secret", "String"), "x");
        g.deny_access(a, "secret");
        let member = g.members(a).remove(0);
        assert!(g.member_value(a, &member).is_err());
    }
}
