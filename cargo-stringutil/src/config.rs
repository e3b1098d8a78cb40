//! Layering of generator settings.
//!
//! Command-line flags win over `[package.metadata.static_string_util]`,
//! which wins over the library defaults. The metadata table has already been
//! merged onto the defaults by deserialization, so only the CLI layer is
//! applied here.

use static_string_util::{GeneratorConfig, Marker};

use crate::cli::GeneratorArgs;

/// Applies command-line overrides to the package's configuration.
#[must_use]
pub fn resolve(base: GeneratorConfig, overrides: &GeneratorArgs) -> GeneratorConfig {
    GeneratorConfig {
        marker: overrides
            .marker
            .as_ref()
            .map_or(base.marker, Marker::new),
        type_name: overrides.type_name.clone().unwrap_or(base.type_name),
        field_rendering: overrides
            .field_rendering
            .map_or(base.field_rendering, Into::into),
        runtime_crate: overrides.runtime_crate.clone().unwrap_or(base.runtime_crate),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration layering.

    use super::*;
    use crate::cli::RenderingArg;
    use rstest::{fixture, rstest};
    use static_string_util::FieldRendering;

    #[fixture]
    fn from_manifest() -> GeneratorConfig {
        GeneratorConfig {
            type_name: "TextUtil".to_owned(),
            field_rendering: FieldRendering::Debug,
            ..GeneratorConfig::default()
        }
    }

    #[rstest]
    fn without_flags_manifest_values_stand(from_manifest: GeneratorConfig) {
        let resolved = resolve(from_manifest.clone(), &GeneratorArgs::default());
        assert_eq!(resolved, from_manifest);
    }

    #[rstest]
    fn flags_override_manifest(from_manifest: GeneratorConfig) {
        let overrides = GeneratorArgs {
            marker: Some("to_text".to_owned()),
            field_rendering: Some(RenderingArg::Display),
            ..GeneratorArgs::default()
        };
        let resolved = resolve(from_manifest, &overrides);
        assert_eq!(resolved.marker.name(), "to_text");
        assert_eq!(resolved.field_rendering, FieldRendering::Display);
        assert_eq!(resolved.type_name, "TextUtil");
        assert_eq!(resolved.runtime_crate, "static_string_util");
    }
}
