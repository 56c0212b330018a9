use std::fmt;

use crate::path::MemberPath;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

/// Common surface of every diagnostic the crate reports.
pub trait SnapcodeErrorExt {
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    /// Position in the object graph the diagnostic refers to, if any.
    fn path(&self) -> Option<MemberPath>;
}

impl fmt::Debug for dyn SnapcodeErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = match self.path() {
            Some(path) => path.to_string(),
            None => "path:none".to_string(),
        };

        write!(
            f,
            "SNAPCODE | {} | {} | {} | {}",
            self.level(),
            self.issuer(),
            path_str,
            self.message()
        )
    }
}

impl fmt::Display for dyn SnapcodeErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Raised when a member's current value cannot be read from its owner.
///
/// The walker treats this as fatal: generation aborts and no fragment is
/// returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessError {
    message: String,
    path: Option<MemberPath>,
}

impl AccessError {
    pub fn new(message: impl Into<String>) -> Self {
        AccessError {
            message: message.into(),
            path: None,
        }
    }

    /// Attach the graph position of the failing member.
    pub fn at(mut self, path: MemberPath) -> Self {
        self.path = Some(path);
        self
    }
}

impl fmt::Display for AccessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path_str = match &self.path {
            Some(path) => path.to_string(),
            None => "path:none".to_string(),
        };
        write!(
            f,
            "SNAPCODE | {} | snapcode.walker | {} | Cannot access field: {}",
            Level::Error,
            path_str,
            self.message
        )
    }
}

impl std::error::Error for AccessError {}

impl SnapcodeErrorExt for AccessError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        format!("Cannot access field: {}", self.message)
    }

    fn issuer(&self) -> String {
        "snapcode.walker".to_string()
    }

    fn path(&self) -> Option<MemberPath> {
        self.path.clone()
    }
}

impl From<AccessError> for Box<dyn SnapcodeErrorExt> {
    fn from(err: AccessError) -> Self {
        Box::new(err)
    }
}

/// A graph document or settings file could not be turned into usable input,
/// or the result could not be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputError {
    issuer: &'static str,
    message: String,
}

impl InputError {
    pub fn document(message: impl Into<String>) -> Self {
        InputError {
            issuer: "snapcode.document",
            message: message.into(),
        }
    }

    pub fn settings(message: impl Into<String>) -> Self {
        InputError {
            issuer: "snapcode.settings",
            message: message.into(),
        }
    }

    pub fn output(message: impl Into<String>) -> Self {
        InputError {
            issuer: "snapcode.output",
            message: message.into(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SNAPCODE | {} | {} | path:none | {}",
            Level::Error,
            self.issuer,
            self.message
        )
    }
}

impl std::error::Error for InputError {}

impl SnapcodeErrorExt for InputError {
    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        self.issuer.to_string()
    }

    fn path(&self) -> Option<MemberPath> {
        None
    }
}

impl From<InputError> for Box<dyn SnapcodeErrorExt> {
    fn from(err: InputError) -> Self {
        Box::new(err)
    }
}
