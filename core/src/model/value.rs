use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Opaque identity of a composite value. Two composites are the same object
/// exactly when their ids are equal, regardless of their contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Leaf values. These are rendered inline and never become declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Char(char),
    Str(String),
    Enum { type_name: String, constant: String },
    Date(DateTime<Utc>),
    Decimal(Decimal),
    BigInteger(i128),
}

impl Scalar {
    /// Runtime type name of the boxed form of this scalar.
    pub fn type_name(&self) -> String {
        match self {
            Scalar::Bool(_) => "Boolean".to_string(),
            Scalar::Byte(_) => "Byte".to_string(),
            Scalar::Short(_) => "Short".to_string(),
            Scalar::Int(_) => "Integer".to_string(),
            Scalar::Long(_) => "Long".to_string(),
            Scalar::Float(_) => "Float".to_string(),
            Scalar::Double(_) => "Double".to_string(),
            Scalar::Char(_) => "Character".to_string(),
            Scalar::Str(_) => "String".to_string(),
            Scalar::Enum { type_name, .. } => crate::codegen::naming::simple_name(type_name),
            Scalar::Date(_) => "Date".to_string(),
            Scalar::Decimal(_) => "BigDecimal".to_string(),
            Scalar::BigInteger(_) => "BigInteger".to_string(),
        }
    }

    /// True for `false` and for positive zero of `int`, `long`, `float` and
    /// `double`. Byte, short and char zeros and `-0.0` are kept.
    pub fn is_primitive_default(&self) -> bool {
        match self {
            Scalar::Bool(b) => !*b,
            Scalar::Int(v) => *v == 0,
            Scalar::Long(v) => *v == 0,
            Scalar::Float(v) => v.to_bits() == 0,
            Scalar::Double(v) => v.to_bits() == 0,
            _ => false,
        }
    }
}

/// A value as seen by the walker: absent, a leaf, or a handle to a composite.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Scalar(Scalar),
    Ref(ObjectId),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    pub fn int(v: i32) -> Self {
        Value::Scalar(Scalar::Int(v))
    }

    pub fn long(v: i64) -> Self {
        Value::Scalar(Scalar::Long(v))
    }

    pub fn double(v: f64) -> Self {
        Value::Scalar(Scalar::Double(v))
    }

    pub fn bool(v: bool) -> Self {
        Value::Scalar(Scalar::Bool(v))
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        Value::Ref(id)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::long(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::double(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::bool(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
