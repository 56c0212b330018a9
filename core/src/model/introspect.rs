//! file: core/src/model/introspect.rs
//! description: the member-discovery capability the walker depends on.
//!
//! The walker never looks inside a composite on its own. Everything it knows
//! about a composite (its type, its shape, its members and their values)
//! comes through `Introspector`, so the same traversal works for an
//! in-memory `ObjectGraph`, a loaded document, or any other source.

use crate::error::AccessError;
use crate::model::value::{ObjectId, Value};

/// How a composite is rebuilt: by index, by append, by put, or member by member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Array,
    Collection,
    Map,
    Record,
}

/// Static description of one member of a record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    pub name: String,
    /// Type the member is declared with (may be a supertype of its value).
    pub declared_type: String,
    /// Declared with a primitive type, so its zero value is a default.
    pub primitive: bool,
    /// Not directly assignable from outside its owner.
    pub restricted: bool,
    /// Static or final; never reassigned.
    pub constant: bool,
}

impl MemberDescriptor {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        MemberDescriptor {
            name: name.into(),
            declared_type: declared_type.into(),
            primitive: false,
            restricted: false,
            constant: false,
        }
    }

    pub fn primitive(mut self) -> Self {
        self.primitive = true;
        self
    }

    pub fn restricted(mut self) -> Self {
        self.restricted = true;
        self
    }

    pub fn constant(mut self) -> Self {
        self.constant = true;
        self
    }
}

/// A setter-style accessor able to assign one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mutator {
    /// Method name, e.g. `setName`.
    pub name: String,
    /// Type of its single parameter, when it has exactly one.
    pub parameter_type: Option<String>,
}

impl Mutator {
    pub fn new(name: impl Into<String>, parameter_type: Option<String>) -> Self {
        Mutator {
            name: name.into(),
            parameter_type,
        }
    }
}

pub trait Introspector {
    /// Runtime type name of a composite, possibly package-qualified.
    fn type_name(&self, id: ObjectId) -> String;

    fn shape(&self, id: ObjectId) -> Shape;

    /// Elements of an array or ordered collection, in order.
    fn elements(&self, id: ObjectId) -> Vec<Value>;

    /// Entries of a key-value map, in iteration order.
    fn entries(&self, id: ObjectId) -> Vec<(Value, Value)>;

    /// Members of a record, in declaration order (inherited members included).
    fn members(&self, id: ObjectId) -> Vec<MemberDescriptor>;

    /// Current value of `member` on the record `id`.
    fn member_value(&self, id: ObjectId, member: &MemberDescriptor) -> Result<Value, AccessError>;

    /// Mutator for the member named `member_name` taking `declared_type`, if any.
    fn find_mutator(&self, id: ObjectId, member_name: &str, declared_type: &str) -> Option<Mutator>;

    /// Supertypes of `type_name`, nearest first. The universal root type is
    /// implied and not listed.
    fn supertypes(&self, _type_name: &str) -> Vec<String> {
        Vec::new()
    }
}
