//! spectra-locale
//!
//! Validated French/English message table for the Spectra Film Loops
//! storefront, with JSON translation file overrides and a browser script
//! export.

pub mod builtin;
pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod localizer;
pub mod table;
pub mod types;
pub mod workspace;

pub use error::{
    LoadError,
    LookupError,
    TableError,
};
pub use localizer::Localizer;
pub use table::{
    LocaleTable,
    LocaleTableBuilder,
    MessageMap,
};
pub use types::MessageKey;
pub use workspace::{
    load_table,
    load_workspace,
};
