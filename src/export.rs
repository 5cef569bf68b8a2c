//! Render a [`LocaleTable`] for the storefront page.

use crate::table::LocaleTable;

/// Pretty JSON object: `{ "<locale>": { "<key>": "<text>" } }`.
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_json(table: &LocaleTable) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(table)
}

/// Browser script assigning the table to `window.<global_name>`.
///
/// `global_name` is validated by the settings, see
/// [`crate::config::LocaleSettings::validate`].
///
/// # Errors
/// Returns error if serialization fails.
pub fn to_script(table: &LocaleTable, global_name: &str) -> Result<String, serde_json::Error> {
    let json = to_json(table)?;
    Ok(format!("window.{global_name} = {json};\n"))
}
