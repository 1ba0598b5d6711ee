//! Configuration for conversion.
//!
//! Loaded from a TOML file; every section is optional.
//!
//! Example `decl-convert.toml`:
//! ```toml
//! [render]
//! indent_width = 4
//! method_case = "lower-first"
//!
//! [render.cpp]
//! guard = "ifndef"
//!
//! [types.aliases]
//! nint = "int64"
//! ```

use crate::error::ConfigError;
use crate::types::TypeMapper;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// How declared method names are spelled in the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MethodCase {
    /// `Func1` -> `func1`.
    #[default]
    LowerFirst,
    Preserve,
}

/// C++ file framing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GuardStyle {
    #[default]
    PragmaOnce,
    /// `#ifndef NS_CLASS_HPP` / `#define` / `#endif`.
    Ifndef,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BraceStyle {
    #[default]
    NextLine,
    SameLine,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CppOptions {
    pub guard: GuardStyle,
    /// Extension of headers included for imports.
    pub include_extension: String,
    /// Add `<cstdint>` / `<string>` when the declaration needs them.
    pub standard_includes: bool,
}

impl Default for CppOptions {
    fn default() -> Self {
        Self {
            guard: GuardStyle::PragmaOnce,
            include_extension: "hpp".to_string(),
            standard_includes: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaOptions {
    pub brace_style: BraceStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonOptions {
    /// Decorate concrete classes with `@dataclass`.
    pub dataclass: bool,
}

/// Options shared by every target, plus per-target sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub indent_width: usize,
    pub method_case: MethodCase,
    pub cpp: CppOptions,
    pub java: JavaOptions,
    pub python: PythonOptions,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            method_case: MethodCase::LowerFirst,
            cpp: CppOptions::default(),
            java: JavaOptions::default(),
            python: PythonOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypesConfig {
    /// Extra source type names mapped to canonical IR primitives.
    pub aliases: BTreeMap<String, String>,
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderOptions,
    pub types: TypesConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        // Surface bad aliases at load time rather than at first use.
        config.type_mapper()?;
        Ok(config)
    }

    /// A type mapper that knows the configured aliases.
    pub fn type_mapper(&self) -> Result<TypeMapper, ConfigError> {
        TypeMapper::new().with_aliases(&self.types.aliases)
    }
}
