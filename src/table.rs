//! Immutable locale table.
//!
//! # Invariants
//!
//! Checked once by [`LocaleTableBuilder::build`]; a built table never changes.
//!
//! 1. Locale codes are unique and non-empty.
//! 2. Message keys are unique within a locale.
//! 3. Every locale defines exactly the same set of keys.
//! 4. Every display string is non-empty.
//! 5. Every required key is present.
//!
//! Lookups never fall back to another locale. Fallback is a policy of the
//! consumer, see [`crate::localizer::Localizer`].

use std::collections::{
    BTreeMap,
    BTreeSet,
};

use serde::Serialize;

use crate::error::{
    LookupError,
    TableError,
};
use crate::types::MessageKey;

/// Message key to display string, for a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MessageMap {
    /// Key to display string.
    messages: BTreeMap<String, String>,
}

impl MessageMap {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    /// `(key, display string)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.messages.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Read-only mapping from locale code to [`MessageMap`].
///
/// # Example
///
/// ```
/// use spectra_locale::{LocaleTable, LookupError, MessageKey};
///
/// let table = LocaleTable::builtin();
///
/// assert_eq!(table.get("fr", "add_to_cart"), Ok("Ajouter au panier"));
/// assert_eq!(table.message("en", MessageKey::Checkout), Ok("Pay with Stripe"));
/// assert!(matches!(table.get("de", "total"), Err(LookupError::LocaleNotFound { .. })));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LocaleTable {
    /// Locale code to its messages.
    locales: BTreeMap<String, MessageMap>,
}

impl LocaleTable {
    #[must_use]
    pub fn builder() -> LocaleTableBuilder {
        LocaleTableBuilder::new()
    }

    /// Returns the string registered for `key` under `locale`.
    ///
    /// # Errors
    /// - [`LookupError::LocaleNotFound`] if `locale` is not configured
    /// - [`LookupError::MessageKeyNotFound`] if `locale` has no `key`
    pub fn get(&self, locale: &str, key: &str) -> Result<&str, LookupError> {
        self.messages(locale)?.get(key).ok_or_else(|| LookupError::MessageKeyNotFound {
            locale: locale.to_string(),
            key: key.to_string(),
        })
    }

    /// Typed variant of [`Self::get`].
    pub fn message(&self, locale: &str, key: MessageKey) -> Result<&str, LookupError> {
        self.get(locale, key.as_str())
    }

    /// The message map of one locale.
    pub fn messages(&self, locale: &str) -> Result<&MessageMap, LookupError> {
        self.locales
            .get(locale)
            .ok_or_else(|| LookupError::LocaleNotFound { locale: locale.to_string() })
    }

    /// All configured locale codes.
    #[must_use]
    pub fn locales(&self) -> BTreeSet<&str> {
        self.locales.keys().map(String::as_str).collect()
    }

    /// All message keys defined for `locale`.
    pub fn keys(&self, locale: &str) -> Result<BTreeSet<&str>, LookupError> {
        Ok(self.messages(locale)?.keys().collect())
    }

    #[must_use]
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// `(locale, messages)` pairs in locale order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MessageMap)> {
        self.locales.iter().map(|(code, map)| (code.as_str(), map))
    }

    /// Number of locales.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locales.len()
    }

    /// Freezes literal data without running the builder checks.
    ///
    /// Only for data whose invariants are covered by tests.
    pub(crate) fn from_static(data: &[(&str, &[(MessageKey, &str)])]) -> Self {
        let locales = data
            .iter()
            .map(|(locale, messages)| {
                let messages = messages
                    .iter()
                    .map(|(key, value)| (key.as_str().to_string(), (*value).to_string()))
                    .collect();
                ((*locale).to_string(), MessageMap { messages })
            })
            .collect();

        Self { locales }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locales.is_empty()
    }

    /// A builder holding this table's messages, for overlaying more.
    #[must_use]
    pub fn to_builder(&self) -> LocaleTableBuilder {
        let locales = self
            .locales
            .iter()
            .map(|(locale, messages)| (locale.clone(), messages.messages.clone()))
            .collect();

        LocaleTableBuilder { locales, required_keys: Vec::new() }
    }
}

/// Collects messages and checks the table invariants on [`Self::build`].
#[derive(Debug, Clone, Default)]
pub struct LocaleTableBuilder {
    /// Messages collected so far, by locale code.
    locales: BTreeMap<String, BTreeMap<String, String>>,
    /// Keys checked by [`Self::build`] in every locale.
    required_keys: Vec<String>,
}

impl LocaleTableBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message, rejecting a key already present for the locale.
    ///
    /// # Errors
    /// - [`TableError::EmptyLocale`] for an empty locale code
    /// - [`TableError::DuplicateKey`] if the key was already inserted
    pub fn insert(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<&mut Self, TableError> {
        let locale = locale.into();
        if locale.is_empty() {
            return Err(TableError::EmptyLocale);
        }
        let key = key.into();

        if self.locales.get(&locale).is_some_and(|messages| messages.contains_key(&key)) {
            return Err(TableError::DuplicateKey { locale, key });
        }
        self.locales.entry(locale).or_default().insert(key, value.into());

        Ok(self)
    }

    /// Adds or replaces a message. Returns the replaced display string.
    ///
    /// # Errors
    /// [`TableError::EmptyLocale`] for an empty locale code.
    pub fn overlay(
        &mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Option<String>, TableError> {
        let locale = locale.into();
        if locale.is_empty() {
            return Err(TableError::EmptyLocale);
        }

        Ok(self.locales.entry(locale).or_default().insert(key.into(), value.into()))
    }

    /// Keys every locale must define, in addition to the parity check.
    pub fn require_keys<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_keys.extend(keys.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn contains_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Checks every invariant and freezes the table.
    ///
    /// # Errors
    /// The first violated invariant, checked per locale in code order:
    /// empty messages, required keys, then key parity.
    pub fn build(&self) -> Result<LocaleTable, TableError> {
        let all_keys: BTreeSet<&str> = self
            .locales
            .values()
            .flat_map(|messages| messages.keys().map(String::as_str))
            .collect();

        for (locale, messages) in &self.locales {
            if let Some((key, _)) = messages.iter().find(|(_, value)| value.is_empty()) {
                return Err(TableError::EmptyMessage { locale: locale.clone(), key: key.clone() });
            }

            if let Some(key) = self.required_keys.iter().find(|key| !messages.contains_key(*key)) {
                return Err(TableError::MissingRequiredKey {
                    locale: locale.clone(),
                    key: key.clone(),
                });
            }

            let missing: Vec<String> = all_keys
                .iter()
                .filter(|key| !messages.contains_key(**key))
                .map(|key| (*key).to_string())
                .collect();
            if !missing.is_empty() {
                return Err(TableError::KeyParity { locale: locale.clone(), missing });
            }
        }

        let locales = self
            .locales
            .iter()
            .map(|(locale, messages)| (locale.clone(), MessageMap { messages: messages.clone() }))
            .collect();

        tracing::debug!(locales = self.locales.len(), keys = all_keys.len(), "Built locale table");

        Ok(LocaleTable { locales })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;

    #[fixture]
    fn two_locales() -> LocaleTableBuilder {
        let mut builder = LocaleTableBuilder::new();
        builder.insert("fr", "total", "Total").unwrap();
        builder.insert("fr", "remove", "Retirer").unwrap();
        builder.insert("en", "total", "Total").unwrap();
        builder.insert("en", "remove", "Remove").unwrap();
        builder
    }

    #[rstest]
    fn build_valid_table(two_locales: LocaleTableBuilder) {
        let table = two_locales.build().unwrap();

        assert_that!(table.len(), eq(2));
        assert_eq!(table.get("fr", "remove"), Ok("Retirer"));
        assert_eq!(table.get("en", "remove"), Ok("Remove"));
        assert_eq!(table.locales(), BTreeSet::from(["en", "fr"]));
        assert_eq!(table.keys("fr").unwrap(), BTreeSet::from(["remove", "total"]));
    }

    #[rstest]
    fn get_unknown_locale(two_locales: LocaleTableBuilder) {
        let table = two_locales.build().unwrap();

        assert_eq!(
            table.get("de", "total"),
            Err(LookupError::LocaleNotFound { locale: "de".to_string() })
        );
        assert_eq!(
            table.keys("de"),
            Err(LookupError::LocaleNotFound { locale: "de".to_string() })
        );
    }

    #[rstest]
    fn get_unknown_key(two_locales: LocaleTableBuilder) {
        let table = two_locales.build().unwrap();

        assert_eq!(
            table.get("fr", "checkout"),
            Err(LookupError::MessageKeyNotFound {
                locale: "fr".to_string(),
                key: "checkout".to_string()
            })
        );
    }

    #[rstest]
    fn insert_duplicate_key(mut two_locales: LocaleTableBuilder) {
        let result = two_locales.insert("en", "total", "Sum");

        assert_eq!(
            result.err(),
            Some(TableError::DuplicateKey { locale: "en".to_string(), key: "total".to_string() })
        );
    }

    #[rstest]
    fn insert_empty_locale() {
        let mut builder = LocaleTableBuilder::new();

        assert_eq!(builder.insert("", "total", "Total").err(), Some(TableError::EmptyLocale));
        assert_eq!(builder.overlay("", "total", "Total"), Err(TableError::EmptyLocale));
    }

    #[rstest]
    fn overlay_replaces_value(mut two_locales: LocaleTableBuilder) {
        let previous = two_locales.overlay("en", "remove", "Delete").unwrap();
        let table = two_locales.build().unwrap();

        assert_that!(previous, some(eq("Remove")));
        assert_eq!(table.get("en", "remove"), Ok("Delete"));
    }

    #[rstest]
    fn build_rejects_key_parity_violation(mut two_locales: LocaleTableBuilder) {
        two_locales.insert("fr", "checkout", "Payer avec Stripe").unwrap();

        let result = two_locales.build();

        assert_eq!(
            result,
            Err(TableError::KeyParity {
                locale: "en".to_string(),
                missing: vec!["checkout".to_string()]
            })
        );
    }

    #[rstest]
    fn build_rejects_empty_message(mut two_locales: LocaleTableBuilder) {
        two_locales.overlay("fr", "total", "").unwrap();

        let result = two_locales.build();

        assert_eq!(
            result,
            Err(TableError::EmptyMessage { locale: "fr".to_string(), key: "total".to_string() })
        );
    }

    #[rstest]
    fn build_rejects_missing_required_key(mut two_locales: LocaleTableBuilder) {
        two_locales.require_keys(["total", "checkout"]);

        let result = two_locales.build();

        assert_eq!(
            result,
            Err(TableError::MissingRequiredKey {
                locale: "en".to_string(),
                key: "checkout".to_string()
            })
        );
    }

    #[rstest]
    fn to_builder_keeps_messages(two_locales: LocaleTableBuilder) {
        let table = two_locales.build().unwrap();

        let mut builder = table.to_builder();
        let previous = builder.overlay("fr", "remove", "Supprimer").unwrap();

        assert_that!(previous, some(eq("Retirer")));
        assert_eq!(table.to_builder().build(), Ok(table));
    }

    #[rstest]
    fn empty_builder_builds_empty_table() {
        let table = LocaleTableBuilder::new().build().unwrap();

        assert!(table.is_empty());
        assert!(table.locales().is_empty());
    }

    #[rstest]
    fn serializes_as_nested_object(two_locales: LocaleTableBuilder) {
        let table = two_locales.build().unwrap();

        let json = serde_json::to_value(&table).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "en": { "remove": "Remove", "total": "Total" },
                "fr": { "remove": "Retirer", "total": "Total" }
            })
        );
    }
}
