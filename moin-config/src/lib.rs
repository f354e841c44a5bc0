//! Shared configuration loader for the moin migration tools.
//!
//! `defaults/moin.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`MoinConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use moin_babel::{GrammarConfig, InterwikiMap, MacroRegistry};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/moin.default.toml");

/// Top-level configuration consumed by moin applications.
#[derive(Debug, Clone, Deserialize)]
pub struct MoinConfig {
    pub convert: ConvertConfig,
    pub macros: MacrosConfig,
    pub migrate: MigrateConfig,
    pub interwiki: Vec<InterwikiEntry>,
}

/// Settings of the wiki being migrated.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub bang_meta: bool,
    pub interwiki_name: String,
    pub extra_url_schemes: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MacrosConfig {
    pub extra: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MigrateConfig {
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterwikiEntry {
    pub tag: String,
    pub url: String,
}

impl MoinConfig {
    /// Standard macros plus the configured site macros
    pub fn macro_registry(&self) -> MacroRegistry {
        let mut registry = MacroRegistry::default();
        registry.extend(self.macros.extra.iter().cloned());
        registry
    }

    pub fn grammar_config(&self) -> GrammarConfig {
        GrammarConfig {
            bang_meta: self.convert.bang_meta,
            macro_names: self.macro_registry().names(),
            extra_url_schemes: self.convert.extra_url_schemes.clone(),
        }
    }

    /// Configured interwiki tags, with the local interwiki name applied
    pub fn interwiki_map(&self) -> InterwikiMap {
        let mut map = InterwikiMap::new().with_local_name(self.convert.interwiki_name.clone());
        for entry in &self.interwiki {
            map.insert(entry.tag.clone(), entry.url.clone());
        }
        map
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

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<MoinConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<MoinConfig, ConfigError> {
    Loader::new().build()
}
