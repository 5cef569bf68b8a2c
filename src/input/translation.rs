//! Translation file input definitions

use std::collections::BTreeMap;
use std::path::{
    Path,
    PathBuf,
};

use globset::{
    Glob,
    GlobSet,
    GlobSetBuilder,
};
use ignore::WalkBuilder;
use serde_json::Value;
use thiserror::Error;

use crate::types::is_locale_code;

/// Errors while reading a single translation file.
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Failed to read translation file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse translation file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Translation file {0:?} must contain a JSON object at the top level")]
    NotAnObject(PathBuf),

    #[error("Translation file {path:?} defines key '{key}' more than once")]
    DuplicateKey { path: PathBuf, key: String },

    #[error("Translation file {path:?}: value of '{key}' must be a string, found {found}")]
    NonStringValue { path: PathBuf, key: String, found: &'static str },
}

/// Why a JSON document could not be flattened into messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("key '{0}' is defined more than once")]
    DuplicateKey(String),

    #[error("value of '{key}' must be a string, found {found}")]
    NonStringValue { key: String, found: &'static str },
}

impl FlattenError {
    /// Attach the file the document was read from.
    fn in_file(self, path: &Path) -> TranslationError {
        let path = path.to_path_buf();
        match self {
            Self::DuplicateKey(key) => TranslationError::DuplicateKey { path, key },
            Self::NonStringValue { key, found } => {
                TranslationError::NonStringValue { path, key, found }
            }
        }
    }
}

/// Messages read from one translation file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationFile {
    pub locale: String,
    pub path: PathBuf,
    /// Flattened message map (e.g., "cart.title" -> "Your cart").
    pub messages: BTreeMap<String, String>,
}

/// Detect the locale a translation file belongs to.
///
/// Looks at the file stem first, then at parent directories from the
/// innermost outwards, and returns the first part that looks like a locale
/// code. Pass a path relative to the workspace root so directories above the
/// workspace are not considered.
///
/// # Examples
/// - `locales/fr.json` → `fr`
/// - `locales/en-US/cart.json` → `en-US`
/// - `lang/checkout.json` → `None`
#[must_use]
pub fn detect_locale_from_path(file_path: &Path) -> Option<String> {
    let stem = file_path.file_stem().map(|s| s.to_string_lossy());
    let parents = file_path
        .parent()
        .into_iter()
        .flat_map(Path::ancestors)
        .filter_map(Path::file_name)
        .map(|name| name.to_string_lossy());

    stem.into_iter().chain(parents).find(|part| is_locale_code(part)).map(|part| part.into_owned())
}

/// Flatten a nested JSON object into a separator-joined key map.
///
/// Leaves must be strings. A key produced twice (e.g. `{"a": {"b": ..}}` and
/// `{"a.b": ..}`) is rejected.
///
/// # Errors
/// [`FlattenError`] for a duplicated key or a non-string leaf.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use spectra_locale::input::translation::flatten_json;
///
/// let json = json!({
///     "cart": {
///         "title": "Your cart",
///         "empty": "Your cart is empty."
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None).unwrap();
/// assert_eq!(flattened.get("cart.title"), Some(&"Your cart".to_string()));
/// assert_eq!(flattened.get("cart.empty"), Some(&"Your cart is empty.".to_string()));
/// ```
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> Result<BTreeMap<String, String>, FlattenError> {
    let mut result = BTreeMap::new();
    flatten_json_value(json, separator, prefix, &mut result)?;
    Ok(result)
}

/// Recursive worker for [`flatten_json`].
fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut BTreeMap<String, String>,
) -> Result<(), FlattenError> {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result)?;
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result)?;
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                if result.contains_key(key) {
                    return Err(FlattenError::DuplicateKey(key.to_string()));
                }
                result.insert(key.to_string(), s.clone());
            }
        }
        Value::Null | Value::Bool(_) | Value::Number(_) => {
            return Err(FlattenError::NonStringValue {
                key: prefix.unwrap_or_default().to_string(),
                found: json_type_name(json),
            });
        }
    }
    Ok(())
}

/// JSON type name used in error messages.
const fn json_type_name(json: &Value) -> &'static str {
    match json {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse translation text for a known locale.
///
/// # Errors
/// Returns error if the text is not a JSON object of strings, or if a key is
/// defined twice.
pub fn parse_translation(
    text: &str,
    locale: impl Into<String>,
    path: &Path,
    separator: &str,
) -> Result<TranslationFile, TranslationError> {
    let json: Value = serde_json::from_str(text)
        .map_err(|source| TranslationError::Parse { path: path.to_path_buf(), source })?;

    if !json.is_object() {
        return Err(TranslationError::NotAnObject(path.to_path_buf()));
    }

    Ok(TranslationFile {
        locale: locale.into(),
        path: path.to_path_buf(),
        messages: flatten_json(&json, separator, None).map_err(|e| e.in_file(path))?,
    })
}

/// Load a translation file under `root`, detecting its locale from the path
/// relative to `root`.
///
/// Returns `Ok(None)` if no locale can be detected from the path.
///
/// # Errors
/// Returns error if file read or JSON parse fails.
pub fn load_translation_file(
    root: &Path,
    file_path: &Path,
    separator: &str,
) -> Result<Option<TranslationFile>, TranslationError> {
    let relative_path = file_path.strip_prefix(root).unwrap_or(file_path);
    let Some(locale) = detect_locale_from_path(relative_path) else {
        tracing::warn!(
            path = %file_path.display(),
            "Skipping translation file without a locale in its path"
        );
        return Ok(None);
    };

    let content = std::fs::read_to_string(file_path)
        .map_err(|source| TranslationError::Io { path: file_path.to_path_buf(), source })?;

    tracing::debug!(path = %file_path.display(), %locale, "Loading translation file");
    parse_translation(&content, locale, file_path, separator).map(Some)
}

/// Build a glob set from patterns.
///
/// # Errors
/// Returns the first invalid pattern together with its error.
pub fn build_glob_set(patterns: &[String]) -> Result<GlobSet, (String, globset::Error)> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| (pattern.clone(), e))?;
        builder.add(glob);
    }
    builder.build().map_err(|e| (patterns.join(", "), e))
}

/// Find translation files under `root`, sorted by path.
///
/// Walks the tree with gitignore rules applied, keeping files whose path
/// relative to `root` matches `include` and not `exclude`.
#[must_use]
pub fn find_translation_files(root: &Path, include: &GlobSet, exclude: &GlobSet) -> Vec<PathBuf> {
    let mut found_files = Vec::new();

    for result in WalkBuilder::new(root)
        .hidden(false)
        .git_ignore(true)
        .git_global(false)
        .git_exclude(true)
        .follow_links(false)
        .build()
    {
        let entry = match result {
            Ok(entry) => entry,
            Err(err) => {
                tracing::debug!(?err, "Failed to read directory entry");
                continue;
            }
        };

        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let path = entry.path();
        let Ok(relative_path) = path.strip_prefix(root) else {
            continue;
        };
        if !include.is_match(relative_path) || exclude.is_match(relative_path) {
            continue;
        }

        found_files.push(path.to_path_buf());
    }

    found_files.sort();
    found_files
}
