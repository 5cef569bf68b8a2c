//! Error types for table lookup, construction and loading.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::input::translation::TranslationError;

/// Lookup failures. The table never substitutes a placeholder string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Locale '{locale}' not found")]
    LocaleNotFound { locale: String },

    #[error("Message key '{key}' not found in locale '{locale}'")]
    MessageKeyNotFound { locale: String, key: String },
}

/// Invariant violations detected while building a table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Locale code cannot be empty")]
    EmptyLocale,

    #[error("Duplicate message key '{key}' in locale '{locale}'")]
    DuplicateKey { locale: String, key: String },

    #[error("Message '{key}' in locale '{locale}' is empty")]
    EmptyMessage { locale: String, key: String },

    #[error("Locale '{locale}' is missing keys defined by other locales: {}", .missing.join(", "))]
    KeyParity { locale: String, missing: Vec<String> },

    #[error("Locale '{locale}' is missing required key '{key}'")]
    MissingRequiredKey { locale: String, key: String },
}

/// Failures while assembling a table from settings and translation files.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Invalid translation file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Fallback locale '{0}' is not defined by any translation source")]
    UnknownFallbackLocale(String),

    #[error("Workspace root {0:?} is not a directory")]
    WorkspaceNotFound(PathBuf),
}
