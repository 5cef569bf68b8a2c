use std::collections::HashSet;

use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

use crate::types::MessageKey;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "requiredKeys[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Numbered list of validation errors, one per line.
fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Contents of `.spectra-locale.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LocaleSettings {
    pub translation_files: TranslationFilesConfig,

    /// Applied to translation file discovery, relative to the workspace root.
    pub exclude_patterns: Vec<String>,

    /// Joins nested object keys in translation files.
    pub key_separator: String,

    /// Start from the built-in `fr`/`en` strings before applying files.
    pub include_builtin: bool,

    /// Keys every locale must define.
    pub required_keys: Vec<String>,

    /// Locale consumers fall back to. Must exist in the loaded table.
    pub fallback_locale: Option<String>,

    pub export: ExportConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationFilesConfig {
    pub file_pattern: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportConfig {
    /// Property of `window` the script export assigns to.
    pub global_name: String,
}

/// Returns true for a plain JavaScript identifier (ASCII only).
fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl LocaleSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Duplicate required key
    /// - Invalid export global name
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.key_separator.is_empty() {
            errors.push(ValidationError::new(
                "keySeparator",
                "The separator cannot be empty. Please specify a separator, for example: \".\" (dot)",
            ));
        }

        if self.translation_files.file_pattern.is_empty() {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                "The pattern cannot be empty. Example: \"**/{locales,lang}/**/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.translation_files.file_pattern) {
            errors.push(ValidationError::new(
                "translationFiles.filePattern",
                format!("Invalid glob pattern '{}': {e}", self.translation_files.file_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        let mut seen = HashSet::new();
        for (index, key) in self.required_keys.iter().enumerate() {
            if key.is_empty() {
                errors.push(ValidationError::new(
                    format!("requiredKeys[{index}]"),
                    "The key cannot be empty",
                ));
            } else if !seen.insert(key.as_str()) {
                errors.push(ValidationError::new(
                    format!("requiredKeys[{index}]"),
                    format!("Duplicate key '{key}'"),
                ));
            }
        }

        if let Some(locale) = &self.fallback_locale
            && locale.is_empty()
        {
            errors.push(ValidationError::new(
                "fallbackLocale",
                "The locale cannot be empty. Please specify a locale (e.g., \"en\"), or remove this field",
            ));
        }

        if !is_js_identifier(&self.export.global_name) {
            errors.push(ValidationError::new(
                "export.globalName",
                format!(
                    "'{}' is not a valid JavaScript identifier. Example: \"SPECTRA_LANG\"",
                    self.export.global_name
                ),
            ));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for TranslationFilesConfig {
    fn default() -> Self {
        Self { file_pattern: "**/{locales,lang}/**/*.json".to_string() }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { global_name: "SPECTRA_LANG".to_string() }
    }
}

impl Default for LocaleSettings {
    fn default() -> Self {
        Self {
            translation_files: TranslationFilesConfig::default(),
            exclude_patterns: vec!["node_modules/**".to_string(), "target/**".to_string()],
            key_separator: ".".to_string(),
            include_builtin: true,
            required_keys: MessageKey::all_strings(),
            fallback_locale: None,
            export: ExportConfig::default(),
        }
    }
}
