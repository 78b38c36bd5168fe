//! Localized-content resolver.
//!
//! Bundled translation tables per supported [`Language`], a nested key-path
//! lookup ([`LanguageTable`]) and the process-wide active selection
//! ([`LanguageContext`]) persisted through a [`PreferenceStore`].
//!
//! Lookups never fail: a missing key yields the literal fallback supplied by
//! the call site, or an empty string.
//!
//! [`PreferenceStore`]: crate::db::PreferenceStore

mod catalog;
mod context;
mod language;
mod table;

pub use catalog::*;
pub use context::*;
pub use language::*;
pub use table::*;

use thiserror::Error;

/// Localization errors.
#[derive(Error, Debug)]
pub enum I18nError {
    #[error("Invalid translation table: {0}")]
    InvalidTable(#[from] serde_json::Error),

    #[error("Translation table root must be an object")]
    NotAnObject,

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),

    #[error("Preference storage error: {0}")]
    Preference(#[from] crate::db::DbError),
}

pub type I18nResult<T> = Result<T, I18nError>;
