//! Errors reported by mapping, transforming, and rendering.

use std::path::PathBuf;

/// Error that can occur when converting a declaration.
///
/// Conversion fails fast: the first invalid construct in member
/// declaration order is reported and no partial output is produced.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConvertError {
    #[error("unsupported type: {name}")]
    UnsupportedType { name: String },

    #[error("malformed member `{member}`: {reason}")]
    MalformedMember { member: String, reason: String },

    #[error("duplicate member: {name}")]
    DuplicateMember { name: String },

    #[error("unsupported target language: {target}")]
    UnsupportedTarget { target: String },
}

impl ConvertError {
    pub fn unsupported_type(name: impl Into<String>) -> Self {
        ConvertError::UnsupportedType { name: name.into() }
    }

    pub fn malformed(member: impl Into<String>, reason: impl Into<String>) -> Self {
        ConvertError::MalformedMember {
            member: member.into(),
            reason: reason.into(),
        }
    }

    pub fn duplicate(name: impl Into<String>) -> Self {
        ConvertError::DuplicateMember { name: name.into() }
    }
}

/// Error loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("type alias `{alias}` targets unknown primitive `{target}`")]
    InvalidAlias { alias: String, target: String },
}
