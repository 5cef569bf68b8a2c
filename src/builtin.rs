//! Storefront strings shipped with the crate.

use crate::table::{
    LocaleTable,
    LocaleTableBuilder,
};
use crate::types::MessageKey::{
    self,
    AddToCart,
    CancelMsg,
    CartTitle,
    Checkout,
    EmptyCart,
    GoToCart,
    HeaderSub,
    Remove,
    SuccessMsg,
    Total,
};

/// French storefront strings.
const FR: &[(MessageKey, &str)] = &[
    (AddToCart, "Ajouter au panier"),
    (GoToCart, "Voir le panier"),
    (EmptyCart, "Votre panier est vide."),
    (CartTitle, "Votre panier Spectra Film Loops"),
    (Total, "Total"),
    (Checkout, "Payer avec Stripe"),
    (Remove, "Retirer"),
    (
        HeaderSub,
        "Boucles audio professionnelles pour films, danse, horreur et installations. WAV haute qualité.",
    ),
    (SuccessMsg, "Paiement réussi – vos liens de téléchargement vous ont été envoyés."),
    (CancelMsg, "Paiement annulé – aucune boucle n'a été débitée."),
];

/// English storefront strings.
const EN: &[(MessageKey, &str)] = &[
    (AddToCart, "Add to cart"),
    (GoToCart, "View cart"),
    (EmptyCart, "Your cart is empty."),
    (CartTitle, "Your Spectra Film Loops Cart"),
    (Total, "Total"),
    (Checkout, "Pay with Stripe"),
    (Remove, "Remove"),
    (
        HeaderSub,
        "Professional audio loops for film, horror, dance and installations. High-quality WAV.",
    ),
    (SuccessMsg, "Payment successful – your download links have been sent."),
    (CancelMsg, "Payment cancelled – no loop was charged."),
];

/// Built-in locales by code.
const BUILTIN: &[(&str, &[(MessageKey, &str)])] = &[("fr", FR), ("en", EN)];

impl LocaleTable {
    /// The `fr`/`en` storefront table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_static(BUILTIN)
    }
}

/// A builder seeded with the built-in strings, for overlaying file translations.
#[must_use]
pub fn builtin_builder() -> LocaleTableBuilder {
    LocaleTable::builtin().to_builder()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeSet;

    use rstest::rstest;

    use super::*;
    use crate::error::LookupError;

    #[rstest]
    fn builtin_satisfies_table_invariants() {
        let checked = builtin_builder().require_keys(MessageKey::all_strings()).build();

        assert_eq!(checked, Ok(LocaleTable::builtin()));
    }

    #[rstest]
    fn builtin_locales() {
        let table = LocaleTable::builtin();

        assert_eq!(table.locales(), BTreeSet::from(["en", "fr"]));
    }

    #[rstest]
    fn builtin_defines_every_message_key() {
        let table = LocaleTable::builtin();
        let expected: BTreeSet<&str> = MessageKey::ALL.iter().map(|key| key.as_str()).collect();

        for locale in table.locales() {
            assert_eq!(table.keys(locale).unwrap(), expected, "locale {locale}");
        }
    }

    #[rstest]
    #[case("fr", "add_to_cart", "Ajouter au panier")]
    #[case("fr", "checkout", "Payer avec Stripe")]
    #[case("en", "checkout", "Pay with Stripe")]
    #[case("en", "cart_title", "Your Spectra Film Loops Cart")]
    #[case("en", "total", "Total")]
    #[case("fr", "cancel_msg", "Paiement annulé – aucune boucle n'a été débitée.")]
    fn builtin_lookup(#[case] locale: &str, #[case] key: &str, #[case] expected: &str) {
        let table = LocaleTable::builtin();

        assert_eq!(table.get(locale, key), Ok(expected));
    }

    #[rstest]
    fn builtin_values_are_non_empty() {
        let table = LocaleTable::builtin();

        for (_, messages) in table.iter() {
            for (key, value) in messages.iter() {
                assert!(!value.is_empty(), "key {key}");
            }
        }
    }

    #[rstest]
    fn builtin_unknown_locale_and_key() {
        let table = LocaleTable::builtin();

        assert!(matches!(table.get("de", "total"), Err(LookupError::LocaleNotFound { .. })));
        assert!(matches!(
            table.get("fr", "nonexistent_key"),
            Err(LookupError::MessageKeyNotFound { .. })
        ));
    }
}
