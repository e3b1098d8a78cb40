//! Generator configuration.
//!
//! [`GeneratorConfig`] deserializes from kebab-case keys so it can be read
//! straight out of `[package.metadata.static_string_util]`. Every key is
//! optional and falls back to the defaults below.

use std::fmt;

use heck::ToSnakeCase;
use serde::Deserialize;

use crate::error::ConfigError;

/// Attribute name that marks declarations by default.
pub const DEFAULT_MARKER: &str = "static_string_util";

/// Name of the generated aggregator type by default.
pub const DEFAULT_TYPE_NAME: &str = "StringUtil";

/// Path of the crate providing `CreateString` by default.
pub const DEFAULT_RUNTIME_CRATE: &str = "static_string_util";

/// Name of the trait every generated function implements.
pub const TRAIT_NAME: &str = "CreateString";

/// Name of the generated function.
pub const FUNCTION_NAME: &str = "create_string";

/// Identity of the marker attribute.
///
/// Matching compares the last segment of an attribute path, so both
/// `#[static_string_util]` and `#[static_string_util::static_string_util]`
/// carry the default marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(transparent)]
pub struct Marker(String);

impl Marker {
    /// Creates a marker from an attribute name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Attribute name without brackets.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#[{}]", self.0)
    }
}

/// How a field value is turned into text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldRendering {
    /// `Display` formatting (`{}`).
    #[default]
    Display,
    /// `Debug` formatting (`{:?}`); needed for `Option` and other non-`Display` fields.
    Debug,
}

impl FieldRendering {
    /// Format placeholder used in generated `format!` calls.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Display => "{}",
            Self::Debug => "{:?}",
        }
    }
}

/// Settings shared by every pass.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Attribute that marks declarations.
    pub marker: Marker,
    /// Identifier of the generated aggregator type.
    pub type_name: String,
    /// Text conversion applied to field values.
    pub field_rendering: FieldRendering,
    /// Path through which generated code reaches `CreateString`.
    pub runtime_crate: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            marker: Marker::default(),
            type_name: DEFAULT_TYPE_NAME.to_owned(),
            field_rendering: FieldRendering::default(),
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_owned(),
        }
    }
}

impl GeneratorConfig {
    /// Checks that the configured names can appear in generated code.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the marker or type name is not a Rust
    /// identifier, or the runtime crate is not a path.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if syn::parse_str::<syn::Ident>(self.marker.name()).is_err() {
            return Err(ConfigError::InvalidMarker(self.marker.name().to_owned()));
        }
        if syn::parse_str::<syn::Ident>(&self.type_name).is_err() {
            return Err(ConfigError::InvalidTypeName(self.type_name.clone()));
        }
        if syn::parse_str::<syn::Path>(&self.runtime_crate).is_err() {
            return Err(ConfigError::InvalidRuntimeCrate(self.runtime_crate.clone()));
        }
        Ok(())
    }

    /// File name of the generated unit, e.g. `string_util.rs`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.type_name.to_snake_case())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration defaults, parsing and validation.

    use super::*;
    use anyhow::Result;
    use rstest::rstest;

    #[rstest]
    fn empty_table_yields_defaults() -> Result<()> {
        let config: GeneratorConfig = serde_json::from_str("{}")?;
        assert_eq!(config, GeneratorConfig::default());
        assert_eq!(config.marker.to_string(), "#[static_string_util]");
        Ok(())
    }

    #[rstest]
    fn reads_kebab_case_keys() -> Result<()> {
        let config: GeneratorConfig = serde_json::from_str(
            r#"{"marker":"to_text","type-name":"TextUtil","field-rendering":"debug","runtime-crate":"ssu"}"#,
        )?;
        assert_eq!(config.marker.name(), "to_text");
        assert_eq!(config.type_name, "TextUtil");
        assert_eq!(config.field_rendering, FieldRendering::Debug);
        assert_eq!(config.runtime_crate, "ssu");
        Ok(())
    }

    #[rstest]
    fn rejects_unknown_keys() {
        let parsed = serde_json::from_str::<GeneratorConfig>(r#"{"typename":"X"}"#);
        assert!(parsed.is_err());
    }

    #[rstest]
    #[case::default_name("StringUtil", "string_util.rs")]
    #[case::acronym("HTTPText", "http_text.rs")]
    #[case::single_word("Strings", "strings.rs")]
    fn derives_file_name(#[case] type_name: &str, #[case] expected: &str) {
        let config = GeneratorConfig {
            type_name: type_name.to_owned(),
            ..GeneratorConfig::default()
        };
        assert_eq!(config.file_name(), expected);
    }

    #[rstest]
    #[case::type_name_with_space(GeneratorConfig { type_name: "String Util".to_owned(), ..GeneratorConfig::default() })]
    #[case::keyword_type_name(GeneratorConfig { type_name: "struct".to_owned(), ..GeneratorConfig::default() })]
    #[case::bad_runtime(GeneratorConfig { runtime_crate: "a::".to_owned(), ..GeneratorConfig::default() })]
    #[case::bad_marker(GeneratorConfig { marker: Marker::new("static-string"), ..GeneratorConfig::default() })]
    fn validate_rejects_unusable_names(#[case] config: GeneratorConfig) {
        assert!(config.validate().is_err());
    }

    #[rstest]
    fn validate_accepts_defaults() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }
}
