//! Error types for registration, lookup and configuration

use std::path::PathBuf;

use thiserror::Error;

use crate::template::{IntegrityWarning, Store};

/// Errors that reject a single registration.
///
/// The builder stays usable after any of these: entries accepted before the
/// failing call are untouched.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RegistrationError {
    /// Identifier is empty or contains characters outside `[A-Za-z0-9_]`
    #[error("invalid template identifier: {id:?}")]
    InvalidIdentifier { id: String },

    /// A required field is empty or a style value is out of range
    #[error("incomplete template {id}: {reason}")]
    IncompleteEntry { id: String, reason: String },

    /// A template with this identifier is already registered
    #[error("duplicate template definition: {id}")]
    DuplicateTemplate { id: String },

    /// The prompt or thumbnail store already holds content for this identifier
    #[error("duplicate {store} for template {id}")]
    DuplicateAsset { id: String, store: Store },

    /// Thumbnail is not a well-formed inline image
    #[error("invalid thumbnail for template {id}: {source}")]
    InvalidThumbnail {
        id: String,
        #[source]
        source: ImageError,
    },

    /// Thumbnail exceeds the configured size bound
    #[error("thumbnail for template {id} is {size} bytes, limit is {limit}")]
    ThumbnailTooLarge { id: String, size: usize, limit: usize },
}

/// Errors returned by registry lookups
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("template not found: {id}")]
    NotFound { id: String },
}

/// Errors produced while parsing or decoding an inline image
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("not a data URL")]
    NotDataUrl,

    #[error("missing ',' separating header from payload")]
    MissingPayload,

    #[error("media type {0:?} is not an image")]
    NotAnImage(String),

    #[error("empty image payload")]
    EmptyPayload,

    #[error("invalid base64 payload: {0}")]
    Base64(String),

    #[error("invalid percent escape at byte {0}")]
    PercentEscape(usize),

    #[error("data URL is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },
}

/// Errors that can occur when loading registry configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Errors that fail a whole build step: a rejected registration, or
/// integrity warnings when the builder is strict
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("registry is inconsistent: {}", format_warnings(.0))]
    Inconsistent(Vec<IntegrityWarning>),
}

fn format_warnings(warnings: &[IntegrityWarning]) -> String {
    warnings
        .iter()
        .map(|w| w.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_error_messages() {
        let err = RegistrationError::DuplicateTemplate {
            id: "samurai_travel".to_string(),
        };
        assert_eq!(err.to_string(), "duplicate template definition: samurai_travel");

        let err = RegistrationError::DuplicateAsset {
            id: "ghost".to_string(),
            store: Store::Thumbnail,
        };
        assert_eq!(err.to_string(), "duplicate thumbnail for template ghost");
    }

    #[test]
    fn test_invalid_identifier_quotes_input() {
        let err = RegistrationError::InvalidIdentifier {
            id: "../etc".to_string(),
        };
        assert_eq!(err.to_string(), r#"invalid template identifier: "../etc""#);
    }
}
