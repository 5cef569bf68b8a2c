//! Locale-bound view of a shared [`LocaleTable`].
//!
//! The table only signals missing entries. `Localizer` is where a rendering
//! component opts into a fallback locale for requests the table cannot serve.
//! Key parity means a locale either serves every key or is absent, so the
//! fallback is resolved once, when binding.

use std::sync::Arc;

use crate::error::LookupError;
use crate::table::LocaleTable;
use crate::types::MessageKey;

/// Resolves messages for one locale of a shared table.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
///
/// use spectra_locale::{LocaleTable, Localizer, MessageKey};
///
/// let table = Arc::new(LocaleTable::builtin());
/// let localizer = Localizer::with_fallback(Arc::clone(&table), "de", "en").unwrap();
///
/// assert_eq!(localizer.locale(), "en");
/// assert!(localizer.is_fallback());
/// assert_eq!(localizer.message(MessageKey::Remove), Ok("Remove"));
/// ```
#[derive(Debug, Clone)]
pub struct Localizer {
    table: Arc<LocaleTable>,
    /// Locale lookups are served from.
    locale: String,
    /// Locale the caller asked for.
    requested: String,
}

impl Localizer {
    /// Bind to `locale`, which must exist in `table`.
    ///
    /// # Errors
    /// [`LookupError::LocaleNotFound`] if `locale` is not configured.
    pub fn new(table: Arc<LocaleTable>, locale: &str) -> Result<Self, LookupError> {
        table.messages(locale)?;
        Ok(Self { table, locale: locale.to_string(), requested: locale.to_string() })
    }

    /// Bind to `locale`, or to `fallback` if the table has no `locale`.
    ///
    /// # Errors
    /// [`LookupError::LocaleNotFound`] if neither locale is configured.
    pub fn with_fallback(
        table: Arc<LocaleTable>,
        locale: &str,
        fallback: &str,
    ) -> Result<Self, LookupError> {
        if table.contains_locale(locale) {
            return Ok(Self { table, locale: locale.to_string(), requested: locale.to_string() });
        }

        table.messages(fallback)?;
        tracing::debug!(locale, fallback, "Unknown locale, using fallback");
        Ok(Self { table, locale: fallback.to_string(), requested: locale.to_string() })
    }

    /// Look up `key` in the bound locale.
    ///
    /// # Errors
    /// [`LookupError::MessageKeyNotFound`] if the table has no `key`.
    pub fn text(&self, key: &str) -> Result<&str, LookupError> {
        self.table.get(&self.locale, key)
    }

    /// Typed variant of [`Self::text`].
    pub fn message(&self, key: MessageKey) -> Result<&str, LookupError> {
        self.text(key.as_str())
    }

    /// The locale lookups are served from.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    #[must_use]
    pub fn requested_locale(&self) -> &str {
        &self.requested
    }

    /// True if the requested locale was unknown and the fallback is in use.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        self.locale != self.requested
    }

    #[must_use]
    pub fn table(&self) -> &LocaleTable {
        &self.table
    }
}
