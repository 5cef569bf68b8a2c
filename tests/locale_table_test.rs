//! Public contract of the storefront locale table.

#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;

use googletest::prelude::*;
use rstest::*;
use spectra_locale::config::{
    CONFIG_FILE_NAME,
    LocaleSettings,
};
use spectra_locale::export;
use spectra_locale::{
    LoadError,
    LocaleTable,
    Localizer,
    LookupError,
    MessageKey,
    load_table,
    load_workspace,
};
use tempfile::TempDir;

#[fixture]
fn table() -> LocaleTable {
    LocaleTable::builtin()
}

#[rstest]
fn every_locale_defines_every_key(table: LocaleTable) {
    let all_keys: BTreeSet<&str> =
        table.locales().into_iter().flat_map(|locale| table.keys(locale).unwrap()).collect();

    for locale in table.locales() {
        assert_eq!(table.keys(locale).unwrap(), all_keys, "locale {locale}");
    }
}

#[rstest]
fn every_message_is_non_empty(table: LocaleTable) {
    for locale in table.locales() {
        for key in table.keys(locale).unwrap() {
            assert!(!table.get(locale, key).unwrap().is_empty(), "{locale}/{key}");
        }
    }
}

#[rstest]
#[case("fr", "add_to_cart", "Ajouter au panier")]
#[case("en", "checkout", "Pay with Stripe")]
#[case("en", "cart_title", "Your Spectra Film Loops Cart")]
fn known_messages(
    table: LocaleTable,
    #[case] locale: &str,
    #[case] key: &str,
    #[case] expected: &str,
) {
    assert_eq!(table.get(locale, key), Ok(expected));
}

#[rstest]
fn unconfigured_locale(table: LocaleTable) {
    assert_eq!(
        table.get("de", "total"),
        Err(LookupError::LocaleNotFound { locale: "de".to_string() })
    );
}

#[rstest]
fn unknown_message_key(table: LocaleTable) {
    assert_eq!(
        table.get("fr", "nonexistent_key"),
        Err(LookupError::MessageKeyNotFound {
            locale: "fr".to_string(),
            key: "nonexistent_key".to_string()
        })
    );
}

#[rstest]
fn locales_are_fr_and_en(table: LocaleTable) {
    assert_eq!(table.locales(), BTreeSet::from(["fr", "en"]));
}

#[rstest]
fn lookups_are_idempotent(table: LocaleTable) {
    let first = table.get("en", "success_msg").unwrap();
    let second = table.get("en", "success_msg").unwrap();

    assert_that!(first, eq(second));
    assert!(std::ptr::eq(first, second));
}

#[rstest]
fn typed_keys_match_string_keys(table: LocaleTable) {
    for key in MessageKey::ALL {
        assert_eq!(table.message("fr", key), table.get("fr", key.as_str()));
    }
}

#[rstest]
fn concurrent_readers_see_the_same_strings(table: LocaleTable) {
    let expected = table.get("fr", "header_sub").unwrap().to_string();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| table.get("fr", "header_sub").unwrap().to_string()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[rstest]
fn workspace_override_flows_into_export() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("static/lang")).unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), r#"{"export": {"globalName": "SHOP_LANG"}}"#)
        .unwrap();
    fs::write(dir.path().join("static/lang/en.json"), r#"{"total": "Order total"}"#).unwrap();

    let (settings, table) = load_workspace(dir.path()).unwrap();
    let script = export::to_script(&table, &settings.export.global_name).unwrap();

    assert_that!(script, starts_with("window.SHOP_LANG = "));
    assert_that!(script, contains_substring("\"total\": \"Order total\""));
    assert_that!(script, contains_substring("\"total\": \"Total\""));
}

#[rstest]
fn localizer_shares_loaded_table() {
    let settings =
        LocaleSettings { fallback_locale: Some("en".to_string()), ..LocaleSettings::default() };
    let table = Arc::new(load_table(&settings, None).unwrap());

    let fallback = settings.fallback_locale.as_deref().unwrap();

    let localizer = Localizer::with_fallback(Arc::clone(&table), "es", fallback).unwrap();

    assert_that!(localizer.locale(), eq("en"));
    assert_eq!(localizer.message(MessageKey::EmptyCart), Ok("Your cart is empty."));
}

#[rstest]
fn misconfigured_fallback_fails_fast() {
    let settings =
        LocaleSettings { fallback_locale: Some("es".to_string()), ..LocaleSettings::default() };

    let result = load_table(&settings, None);

    assert!(matches!(result, Err(LoadError::UnknownFallbackLocale(_))));
}
