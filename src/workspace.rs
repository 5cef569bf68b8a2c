//! Assemble a [`LocaleTable`] from settings and workspace translation files.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use crate::builtin::builtin_builder;
use crate::config::{
    LocaleSettings,
    load_settings,
};
use crate::error::{
    LoadError,
    TableError,
};
use crate::input::translation::{
    TranslationFile,
    build_glob_set,
    find_translation_files,
    load_translation_file,
};
use crate::table::{
    LocaleTable,
    LocaleTableBuilder,
};

/// Load settings from `workspace_root` and build the table they describe.
///
/// # Errors
/// Any settings, translation file, or table invariant failure.
pub fn load_workspace(workspace_root: &Path) -> Result<(LocaleSettings, LocaleTable), LoadError> {
    if !workspace_root.is_dir() {
        return Err(LoadError::WorkspaceNotFound(workspace_root.to_path_buf()));
    }

    let settings = load_settings(workspace_root)?;
    let table = load_table(&settings, Some(workspace_root))?;
    Ok((settings, table))
}

/// Build the table described by `settings`.
///
/// The built-in strings (if enabled) are the base; translation files found
/// under `workspace_root` replace or extend them. A key defined by two files
/// of the same locale is rejected.
///
/// # Errors
/// - Invalid translation file patterns
/// - Unreadable or malformed translation files
/// - Table invariant violations
/// - `fallbackLocale` not present in the resulting table
pub fn load_table(
    settings: &LocaleSettings,
    workspace_root: Option<&Path>,
) -> Result<LocaleTable, LoadError> {
    let mut builder =
        if settings.include_builtin { builtin_builder() } else { LocaleTableBuilder::new() };

    if let Some(root) = workspace_root {
        let files = read_translation_files(settings, root)?;
        overlay_files(&mut builder, &files)?;
    }

    let table = builder.require_keys(settings.required_keys.iter().cloned()).build()?;

    if let Some(fallback) = &settings.fallback_locale
        && !table.contains_locale(fallback)
    {
        return Err(LoadError::UnknownFallbackLocale(fallback.clone()));
    }

    tracing::debug!(locales = ?table.locales(), "Locale table ready");
    Ok(table)
}

/// Discover and parse the translation files of a workspace.
fn read_translation_files(
    settings: &LocaleSettings,
    root: &Path,
) -> Result<Vec<TranslationFile>, LoadError> {
    let include = build_glob_set(std::slice::from_ref(&settings.translation_files.file_pattern))
        .map_err(|(pattern, source)| LoadError::InvalidPattern { pattern, source })?;
    let exclude = build_glob_set(&settings.exclude_patterns)
        .map_err(|(pattern, source)| LoadError::InvalidPattern { pattern, source })?;

    let paths = find_translation_files(root, &include, &exclude);
    tracing::debug!(root = %root.display(), count = paths.len(), "Found translation files");

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        if let Some(file) = load_translation_file(root, &path, &settings.key_separator)? {
            files.push(file);
        }
    }
    Ok(files)
}

/// Apply translation files on top of `builder`.
fn overlay_files(
    builder: &mut LocaleTableBuilder,
    files: &[TranslationFile],
) -> Result<(), TableError> {
    let mut defined_by: HashMap<(&str, &str), &PathBuf> = HashMap::new();

    for file in files {
        for (key, value) in &file.messages {
            let previous = defined_by.insert((file.locale.as_str(), key.as_str()), &file.path);
            if let Some(first) = previous {
                tracing::warn!(
                    locale = %file.locale,
                    key = key.as_str(),
                    first = %first.display(),
                    second = %file.path.display(),
                    "Message defined by two translation files"
                );
                return Err(TableError::DuplicateKey {
                    locale: file.locale.clone(),
                    key: key.clone(),
                });
            }

            if builder.overlay(file.locale.as_str(), key.as_str(), value.as_str())?.is_some() {
                tracing::debug!(
                    locale = %file.locale,
                    key = key.as_str(),
                    "Translation file overrides built-in message"
                );
            }
        }
    }

    Ok(())
}
