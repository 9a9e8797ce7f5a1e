//! Layered configuration loading
//!
//! `defaults/split-text.default.toml` is embedded into the binary so that docs and
//! runtime behavior stay in sync. Callers layer their own files and single-key
//! overrides on top via [`Loader`] before deserializing into [`SplitTextOptions`].

use crate::error::Result;
use crate::splitting::{Delimiter, SplitTextOptions};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/split-text.default.toml");

/// Options as they appear in a configuration file
#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    pub delimiter: String,
    /// Custom regex; takes precedence over `delimiter` when non-empty
    pub pattern: Option<String>,
    pub tag: String,
    pub custom_class: String,
    pub generate_index_id: bool,
    pub generate_value_class: bool,
    pub strip_html_tags: bool,
    pub aria: bool,
    pub debug: bool,
}

impl From<OptionsConfig> for SplitTextOptions {
    fn from(config: OptionsConfig) -> Self {
        let delimiter = match config.pattern.as_deref() {
            Some(pattern) if !pattern.is_empty() => Delimiter::custom(pattern),
            _ => Delimiter::from_name(&config.delimiter),
        };
        let custom_class = Some(config.custom_class).filter(|class| !class.trim().is_empty());

        SplitTextOptions {
            delimiter,
            tag: config.tag,
            custom_class,
            generate_index_id: config.generate_index_id,
            generate_value_class: config.generate_value_class,
            strip_html_tags: config.strip_html_tags,
            aria: config.aria,
            debug: config.debug,
        }
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer configuration text, e.g. from stdin or a test fixture.
    pub fn with_toml_str(mut self, toml: &str) -> Self {
        self.builder = self.builder.add_source(File::from_str(toml, FileFormat::Toml));
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> std::result::Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the raw file representation.
    pub fn build_config(self) -> Result<OptionsConfig> {
        Ok(self.builder.build()?.try_deserialize()?)
    }

    /// Finalize the builder into ready-to-use options.
    pub fn build(self) -> Result<SplitTextOptions> {
        Ok(self.build_config()?.into())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<SplitTextOptions> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_option_defaults() {
        let options = load_defaults().expect("defaults to deserialize");
        assert_eq!(options, SplitTextOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let options = Loader::new()
            .set_override("delimiter", "sentence")
            .expect("override to apply")
            .set_override("aria", false)
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(options.delimiter, Delimiter::Sentence);
        assert!(!options.aria);
        assert_eq!(options.tag, "span");
    }

    #[test]
    fn later_layers_win() {
        let options = Loader::new()
            .with_toml_str("tag = \"em\"\ncustom_class = \"unit\"")
            .with_toml_str("tag = \"strong\"")
            .build()
            .expect("config to build");
        assert_eq!(options.tag, "strong");
        assert_eq!(options.custom_class(), Some("unit"));
    }

    #[test]
    fn pattern_takes_precedence() {
        let options = Loader::new()
            .with_toml_str("delimiter = \"sentence\"\npattern = \"[aeiou]\"")
            .build()
            .expect("config to build");
        assert_eq!(options.delimiter, Delimiter::custom("[aeiou]"));
    }

    #[test]
    fn invalid_values_degrade() {
        let options = Loader::new()
            .with_toml_str("delimiter = \"paragraph\"")
            .build()
            .expect("config to build");
        assert_eq!(options.delimiter, Delimiter::Word);

        let options = Loader::new()
            .with_toml_str("pattern = \"(broken\"")
            .build()
            .expect("config to build");
        assert_eq!(options.delimiter, Delimiter::Word);
    }

    #[test]
    fn missing_required_file_fails() {
        let result = Loader::new()
            .with_file("/definitely/not/here/split-text.toml")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let options = Loader::new()
            .with_optional_file("/definitely/not/here/split-text.toml")
            .build()
            .expect("config to build");
        assert_eq!(options, SplitTextOptions::default());
    }
}
