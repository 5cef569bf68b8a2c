//! Workspace settings: `.spectra-locale.json`.

mod loader;
mod types;

pub use loader::{
    CONFIG_FILE_NAME,
    load_settings,
};
pub use types::{
    ConfigError,
    ExportConfig,
    LocaleSettings,
    TranslationFilesConfig,
    ValidationError,
};
