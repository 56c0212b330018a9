//! file: core/src/notation.rs
//! description: data-notation output (`format = json`).
//!
//! Unlike the declaration output this path renders by value: an object
//! reachable through two owners is written twice. Only a reference back to
//! an object that is still being written (a cycle) is replaced by
//! `{"$ref": "<path of that object>"}`.

use serde_json::{Map, Number, Value as Json};

use crate::error::AccessError;
use crate::model::introspect::{Introspector, Shape};
use crate::model::value::{ObjectId, Scalar, Value};
use crate::path::{MemberPath, Segment};
use crate::settings::Settings;

pub fn render_notation(root: &Value, types: &dyn Introspector, settings: &Settings) -> Result<String, AccessError> {
    let mut writer = NotationWriter {
        types,
        settings,
        ancestors: Vec::new(),
        path: MemberPath::new("$"),
    };
    let json = writer.to_json(root, 0)?;
    if settings.pretty_format {
        Ok(format!("{:#}", json))
    } else {
        Ok(json.to_string())
    }
}

pub fn scalar_to_json(scalar: &Scalar) -> Json {
    match scalar {
        Scalar::Bool(b) => Json::Bool(*b),
        Scalar::Byte(v) => Json::from(*v),
        Scalar::Short(v) => Json::from(*v),
        Scalar::Int(v) => Json::from(*v),
        Scalar::Long(v) => Json::from(*v),
        Scalar::Float(v) => float_to_json(f64::from(*v)),
        Scalar::Double(v) => float_to_json(*v),
        Scalar::Char(c) => Json::String(c.to_string()),
        Scalar::Str(s) => Json::String(s.clone()),
        Scalar::Enum { constant, .. } => Json::String(constant.clone()),
        Scalar::Date(d) => Json::String(d.to_rfc3339()),
        Scalar::Decimal(d) => Json::String(d.to_string()),
        Scalar::BigInteger(i) => Json::String(i.to_string()),
    }
}

fn float_to_json(v: f64) -> Json {
    Number::from_f64(v).map(Json::Number).unwrap_or(Json::Null)
}

struct NotationWriter<'a> {
    types: &'a dyn Introspector,
    settings: &'a Settings,
    /// Objects currently being written, with the path they were written at.
    ancestors: Vec<(ObjectId, String)>,
    path: MemberPath,
}

impl NotationWriter<'_> {
    fn to_json(&mut self, value: &Value, level: usize) -> Result<Json, AccessError> {
        if level > self.settings.max_level {
            return Ok(Json::Null);
        }
        let id = match value {
            Value::Null => return Ok(Json::Null),
            Value::Scalar(s) => return Ok(scalar_to_json(s)),
            Value::Ref(id) => *id,
        };
        if let Some((_, at)) = self.ancestors.iter().find(|(a, _)| *a == id) {
            let mut back = Map::new();
            back.insert("$ref".to_string(), Json::String(at.clone()));
            return Ok(Json::Object(back));
        }

        self.ancestors.push((id, self.path.to_string()));
        let json = match self.types.shape(id) {
            Shape::Array | Shape::Collection => {
                let mut items = Vec::new();
                for (i, element) in self.types.elements(id).iter().enumerate() {
                    items.push(self.child(Segment::Index(i), element, level)?);
                }
                Json::Array(items)
            }
            Shape::Map => self.map_json(id, level)?,
            Shape::Record => self.record_json(id, level)?,
        };
        self.ancestors.pop();
        Ok(json)
    }

    fn child(&mut self, segment: Segment, value: &Value, level: usize) -> Result<Json, AccessError> {
        self.path.push(segment);
        let json = self.to_json(value, level + 1)?;
        self.path.pop();
        Ok(json)
    }

    fn map_json(&mut self, id: ObjectId, level: usize) -> Result<Json, AccessError> {
        let entries = self.types.entries(id);
        let text_keys = entries
            .iter()
            .all(|(k, _)| matches!(k, Value::Scalar(Scalar::Str(_))));
        if text_keys {
            let mut object = Map::new();
            for (key, value) in entries.iter() {
                if let Value::Scalar(Scalar::Str(k)) = key {
                    let json = self.child(Segment::Key(k.clone()), value, level)?;
                    object.insert(k.clone(), json);
                }
            }
            Ok(Json::Object(object))
        } else {
            let mut pairs = Vec::new();
            for (i, (key, value)) in entries.iter().enumerate() {
                let k = self.child(Segment::Index(i), key, level)?;
                let v = self.child(Segment::Index(i), value, level)?;
                pairs.push(Json::Array(vec![k, v]));
            }
            Ok(Json::Array(pairs))
        }
    }

    fn record_json(&mut self, id: ObjectId, level: usize) -> Result<Json, AccessError> {
        let mut object = Map::new();
        for member in self.types.members(id) {
            if member.constant {
                continue;
            }
            self.path.push(Segment::Field(member.name.clone()));
            let value = self
                .types
                .member_value(id, &member)
                .map_err(|e| e.at(self.path.clone()))?;
            self.path.pop();

            if value.is_null() && self.settings.skip_nulls {
                continue;
            }
            if self.settings.skip_defaults && member.primitive {
                if let Value::Scalar(s) = &value {
                    if s.is_primitive_default() {
                        continue;
                    }
                }
            }
            let key = match member.name.strip_prefix('_') {
                Some(stripped) if self.settings.support_underscores => stripped.to_string(),
                _ => member.name.clone(),
            };
            let json = self.child(Segment::Field(key.clone()), &value, level)?;
            object.insert(key, json);
        }
        Ok(Json::Object(object))
    }
}
