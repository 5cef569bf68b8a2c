//! Core types used throughout the project.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use thiserror::Error;

/// Message keys every storefront locale must define.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKey {
    /// Product card button.
    AddToCart,
    /// Link from the product list to the cart.
    GoToCart,
    /// Shown when the cart has no items.
    EmptyCart,
    /// Cart drawer heading.
    CartTitle,
    /// Label in front of the cart total.
    Total,
    /// Checkout button.
    Checkout,
    /// Remove-from-cart button.
    Remove,
    /// Tagline under the page header.
    HeaderSub,
    /// Payment success banner.
    SuccessMsg,
    /// Payment cancelled banner.
    CancelMsg,
}

impl MessageKey {
    /// Every key, in display order.
    pub const ALL: [Self; 10] = [
        Self::AddToCart,
        Self::GoToCart,
        Self::EmptyCart,
        Self::CartTitle,
        Self::Total,
        Self::Checkout,
        Self::Remove,
        Self::HeaderSub,
        Self::SuccessMsg,
        Self::CancelMsg,
    ];

    /// The key as it appears in translation data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AddToCart => "add_to_cart",
            Self::GoToCart => "go_to_cart",
            Self::EmptyCart => "empty_cart",
            Self::CartTitle => "cart_title",
            Self::Total => "total",
            Self::Checkout => "checkout",
            Self::Remove => "remove",
            Self::HeaderSub => "header_sub",
            Self::SuccessMsg => "success_msg",
            Self::CancelMsg => "cancel_msg",
        }
    }

    /// All keys as owned strings, for settings defaults.
    #[must_use]
    pub fn all_strings() -> Vec<String> {
        Self::ALL.iter().map(|key| key.as_str().to_string()).collect()
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown message key '{0}'")]
pub struct UnknownMessageKey(pub String);

impl FromStr for MessageKey {
    type Err = UnknownMessageKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownMessageKey(s.to_string()))
    }
}

/// ISO 639-1 language subtags.
static LANGUAGE_SUBTAGS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    "aa ab ae af ak am an ar as av ay az ba be bg bh bi bm bn bo br bs ca ce ch co cr cs cu \
     cv cy da de dv dz ee el en eo es et eu fa ff fi fj fo fr fy ga gd gl gn gu gv ha he hi \
     ho hr ht hu hy hz ia id ie ig ii ik io is it iu ja jv ka kg ki kj kk kl km kn ko kr ks \
     ku kv kw ky la lb lg li ln lo lt lu lv mg mh mi mk ml mn mr ms mt my na nb nd ne ng nl \
     nn no nr nv ny oc oj om or os pa pi pl ps pt qu rm rn ro ru rw sa sc sd se sg si sk sl \
     sm sn so sq sr ss st su sv sw ta te tg th ti tk tl tn to tr ts tt tw ty ug uk ur uz ve \
     vi vo wa wo xh yi yo za zh zu"
        .split_whitespace()
        .collect()
});

/// Returns true if `code` looks like a locale code.
///
/// The first subtag must be a known ISO 639-1 language; further subtags
/// (region, script) are 2-8 ASCII alphanumerics joined with `-` or `_`
/// (`fr`, `en-US`, `pt_BR`, `sr-Cyrl-BA`).
#[must_use]
pub fn is_locale_code(code: &str) -> bool {
    let mut parts = code.split(['-', '_']);

    let Some(language) = parts.next() else {
        return false;
    };
    if !LANGUAGE_SUBTAGS.contains(language) {
        return false;
    }

    parts.all(|part| {
        (2..=8).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_alphanumeric())
    })
}
