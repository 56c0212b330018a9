//! file: core/src/settings.rs
//! description: generation toggles and the per-call request.
//!
//! `Settings` deserializes from the camelCase keys used by saved settings
//! files; every key is optional and falls back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codegen::naming::declared_name;
use crate::error::InputError;

/// Which kind of text `generate` produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Declarations followed by member assignments.
    #[default]
    #[serde(alias = "java")]
    Native,
    /// Pretty or compact data notation.
    Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub format: OutputFormat,
    /// Omit member assignments whose value is absent.
    pub skip_nulls: bool,
    /// Omit primitive member assignments equal to the zero value.
    pub skip_defaults: bool,
    /// Retry mutator lookup with a leading `_` stripped from the member name.
    pub support_underscores: bool,
    /// Declare with the member's declared type instead of the runtime type.
    pub use_base_classes: bool,
    /// Infer container type parameters.
    pub use_generics: bool,
    /// Emit no type parameter when elements share no common supertype.
    pub use_known_generics: bool,
    /// Values deeper than this render as `null`.
    pub max_level: usize,
    /// Only consulted by the data-notation output.
    pub pretty_format: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Native,
            skip_nulls: true,
            skip_defaults: true,
            support_underscores: true,
            use_base_classes: true,
            use_generics: true,
            use_known_generics: true,
            max_level: 10,
            pretty_format: true,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse settings JSON; missing keys keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, InputError> {
        serde_json::from_str(text).map_err(|e| InputError::settings(format!("invalid settings: {}", e)))
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            InputError::settings(format!("cannot read settings {:?}: {}", path, e))
        })?;
        Self::from_json(&text)
    }

    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_skip_nulls(mut self, skip: bool) -> Self {
        self.skip_nulls = skip;
        self
    }

    pub fn with_skip_defaults(mut self, skip: bool) -> Self {
        self.skip_defaults = skip;
        self
    }

    pub fn with_support_underscores(mut self, support: bool) -> Self {
        self.support_underscores = support;
        self
    }

    pub fn with_base_classes(mut self, use_base: bool) -> Self {
        self.use_base_classes = use_base;
        self
    }

    pub fn with_generics(mut self, use_generics: bool) -> Self {
        self.use_generics = use_generics;
        self
    }

    pub fn with_known_generics(mut self, known_only: bool) -> Self {
        self.use_known_generics = known_only;
        self
    }

    pub fn with_max_level(mut self, max_level: usize) -> Self {
        self.max_level = max_level;
        self
    }

    pub fn with_pretty_format(mut self, pretty: bool) -> Self {
        self.pretty_format = pretty;
        self
    }
}

/// Parameters of one `generate` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenCodeRequest {
    /// Preferred identifier for the root declaration.
    pub variable_name: Option<String>,
    /// Declared type for the root; reduced to its simple name without type
    /// arguments.
    pub variable_type: Option<String>,
    pub settings: Settings,
}

impl GenCodeRequest {
    pub fn new(settings: Settings) -> Self {
        GenCodeRequest {
            variable_name: None,
            variable_type: None,
            settings,
        }
    }

    pub fn with_variable_name(mut self, name: impl Into<String>) -> Self {
        self.variable_name = Some(name.into());
        self
    }

    pub fn with_variable_type(mut self, type_name: impl Into<String>) -> Self {
        self.variable_type = Some(type_name.into());
        self
    }

    pub(crate) fn root_type_hint(&self) -> Option<String> {
        self.variable_type.as_deref().map(declared_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_table() {
        let s = Settings::default();
        assert_eq!(s.format, OutputFormat::Native);
        assert!(s.skip_nulls && s.skip_defaults && s.support_underscores);
        assert!(s.use_base_classes && s.use_generics && s.use_known_generics);
        assert_eq!(s.max_level, 10);
        assert!(s.pretty_format);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{"skipNulls": false, "maxLevel": 3, "format": "java"}"#)
            .expect("valid settings");
        assert!(!s.skip_nulls);
        assert_eq!(s.max_level, 3);
        assert_eq!(s.format, OutputFormat::Native);
        assert!(s.skip_defaults);
    }

    #[test]
    fn json_format_is_recognised() {
        let s = Settings::from_json(r#"{"format": "json", "prettyFormat": false}"#).expect("valid");
        assert_eq!(s.format, OutputFormat::Json);
        assert!(!s.pretty_format);
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = Settings::from_json("{maxLevel: }").unwrap_err();
        assert!(err.to_string().contains("snapcode.settings"));
    }

    #[test]
    fn request_type_hint_is_simple_name() {
        let req = GenCodeRequest::default().with_variable_type("java.util.List");
        assert_eq!(req.root_type_hint().as_deref(), Some("List"));

        let generic = GenCodeRequest::default().with_variable_type("java.util.Map<java.lang.String, Integer>");
        assert_eq!(generic.root_type_hint().as_deref(), Some("Map"));
    }
}
