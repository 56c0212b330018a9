//! file: core/src/model/document.rs
//! description: JSON description of an object graph.
//!
//! A document names every composite under `objects` and links them with
//! `{"$ref": "<name>"}`, so shared and cyclic structure survives the trip
//! through a tree-shaped format:
//!
//! ```json
//! {
//!   "root": {"$ref": "a"},
//!   "objects": {
//!     "a": {"kind": "record", "type": "A", "fields": [
//!       {"name": "next", "type": "B", "value": {"$ref": "b"}}]},
//!     "b": {"kind": "record", "type": "B", "fields": [
//!       {"name": "prev", "type": "A", "value": {"$ref": "a"}}]}
//!   }
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::InputError;
use crate::model::graph::ObjectGraph;
use crate::model::introspect::MemberDescriptor;
use crate::model::value::{ObjectId, Scalar, Value};

/// Scalars JSON cannot express directly, written as `{"<tag>": <payload>}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaggedScalar {
    Byte(i8),
    Short(i16),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    /// `Type.CONSTANT`
    Enum(String),
    /// RFC 3339 timestamp.
    Date(String),
    Decimal(String),
    Bigint(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum DocValue {
    #[default]
    Null,
    Ref {
        #[serde(rename = "$ref")]
        target: String,
    },
    Tagged(TaggedScalar),
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DocField {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: String,
    #[serde(default)]
    pub value: DocValue,
    #[serde(default)]
    pub primitive: bool,
    /// Not assignable directly; only through a setter.
    #[serde(default, rename = "private")]
    pub restricted: bool,
    #[serde(default)]
    pub constant: bool,
    /// The owner type has `set<Name>(<type>)`, with any leading `_` of the
    /// member name dropped.
    #[serde(default)]
    pub setter: bool,
    #[serde(default = "readable_default")]
    pub readable: bool,
}

fn readable_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DocObject {
    Record {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        fields: Vec<DocField>,
    },
    List {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        elements: Vec<DocValue>,
    },
    Map {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        entries: Vec<(DocValue, DocValue)>,
    },
    Array {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default)]
        elements: Vec<DocValue>,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct DocType {
    #[serde(default)]
    pub supertypes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GraphDocument {
    pub root: DocValue,
    #[serde(default)]
    pub objects: BTreeMap<String, DocObject>,
    #[serde(default)]
    pub types: BTreeMap<String, DocType>,
}

impl GraphDocument {
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        serde_json::from_str(text).map_err(|e| InputError::document(format!("invalid graph document: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| InputError::document(format!("cannot read {:?}: {}", path, e)))?;
        Self::from_json(&text)
    }

    /// Build the arena and resolve the root. Objects get ids in name order.
    pub fn into_graph(self) -> Result<(ObjectGraph, Value), InputError> {
        let mut graph = ObjectGraph::new();
        for (name, decl) in &self.types {
            let supers: Vec<&str> = decl.supertypes.iter().map(String::as_str).collect();
            graph.declare_type(name, &supers);
        }

        let mut ids: HashMap<String, ObjectId> = HashMap::new();
        for (name, object) in &self.objects {
            let id = match object {
                DocObject::Record { type_name, .. } => graph.record(type_name),
                DocObject::List { type_name, .. } => graph.collection(type_name),
                DocObject::Map { type_name, .. } => graph.map(type_name),
                DocObject::Array { type_name, .. } => graph.array(type_name),
            };
            ids.insert(name.clone(), id);
        }

        for (name, object) in &self.objects {
            let Some(&id) = ids.get(name) else {
                continue;
            };
            match object {
                DocObject::Record { type_name, fields } => {
                    for f in fields {
                        let value = resolve(&f.value, &ids)?;
                        let mut member = MemberDescriptor::new(f.name.clone(), f.declared_type.clone());
                        member.primitive = f.primitive;
                        member.restricted = f.restricted;
                        member.constant = f.constant;
                        if f.setter {
                            // `_id` pairs with `setId`
                            graph.setter(type_name, f.name.trim_start_matches('_'), &f.declared_type);
                        }
                        graph.field(id, member, value);
                        if !f.readable {
                            graph.deny_access(id, &f.name);
                        }
                    }
                }
                DocObject::List { elements, .. } | DocObject::Array { elements, .. } => {
                    for e in elements {
                        let value = resolve(e, &ids)?;
                        graph.push(id, value);
                    }
                }
                DocObject::Map { entries, .. } => {
                    for (k, v) in entries {
                        let key = resolve(k, &ids)?;
                        let value = resolve(v, &ids)?;
                        graph.put(id, key, value);
                    }
                }
            }
        }

        let root = resolve(&self.root, &ids)?;
        Ok((graph, root))
    }
}

fn resolve(value: &DocValue, ids: &HashMap<String, ObjectId>) -> Result<Value, InputError> {
    Ok(match value {
        DocValue::Null => Value::Null,
        DocValue::Ref { target } => match ids.get(target) {
            Some(id) => Value::Ref(*id),
            None => return Err(InputError::document(format!("dangling reference '{}'", target))),
        },
        DocValue::Bool(b) => Value::bool(*b),
        DocValue::Int(i) => match i32::try_from(*i) {
            Ok(small) => Value::int(small),
            Err(_) => Value::long(*i),
        },
        DocValue::Float(f) => Value::double(*f),
        DocValue::Str(s) => Value::str(s.clone()),
        DocValue::Tagged(tagged) => Value::Scalar(tagged_scalar(tagged)?),
    })
}

fn tagged_scalar(tagged: &TaggedScalar) -> Result<Scalar, InputError> {
    Ok(match tagged {
        TaggedScalar::Byte(v) => Scalar::Byte(*v),
        TaggedScalar::Short(v) => Scalar::Short(*v),
        TaggedScalar::Long(v) => Scalar::Long(*v),
        TaggedScalar::Float(v) => Scalar::Float(*v),
        TaggedScalar::Double(v) => Scalar::Double(*v),
        TaggedScalar::Char(c) => Scalar::Char(*c),
        TaggedScalar::Enum(text) => match text.rsplit_once('.') {
            Some((type_name, constant)) if !type_name.is_empty() && !constant.is_empty() => Scalar::Enum {
                type_name: type_name.to_string(),
                constant: constant.to_string(),
            },
            _ => return Err(InputError::document(format!("enum '{}' must be Type.CONSTANT", text))),
        },
        TaggedScalar::Date(text) => {
            let parsed = DateTime::parse_from_rfc3339(text)
                .map_err(|e| InputError::document(format!("bad date '{}': {}", text, e)))?;
            Scalar::Date(parsed.with_timezone(&Utc))
        }
        TaggedScalar::Decimal(text) => Scalar::Decimal(
            Decimal::from_str(text).map_err(|e| InputError::document(format!("bad decimal '{}': {}", text, e)))?,
        ),
        TaggedScalar::Bigint(text) => Scalar::BigInteger(
            text.parse::<i128>()
                .map_err(|e| InputError::document(format!("bad integer '{}': {}", text, e)))?,
        ),
    })
}
