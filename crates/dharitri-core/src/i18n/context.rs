//! Active-language selection.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{split_key, Catalog, I18nResult, Language, LanguageTable, BASELINE_LANGUAGE};
use crate::db::PreferenceStore;

/// Preference key the active language is persisted under.
pub const LANGUAGE_PREFERENCE_KEY: &str = "language";

/// Lifecycle of a [`LanguageContext`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Stored preference not read yet
    Uninitialized,
    /// Resolving against this language
    Ready(Language),
}

/// Holds the active language and resolves display strings against it.
///
/// Starts [`ContextState::Uninitialized`]; [`initialize`](Self::initialize)
/// reads the stored preference once and moves to `Ready`. Before that,
/// lookups use the baseline language.
pub struct LanguageContext<S> {
    store: S,
    catalog: Arc<Catalog>,
    state: ContextState,
}

impl<S: PreferenceStore> LanguageContext<S> {
    /// Context over the bundled catalog.
    pub fn new(store: S) -> Self {
        Self::with_catalog(store, Catalog::bundled())
    }

    /// Context over a caller-supplied catalog.
    pub fn with_catalog(store: S, catalog: Arc<Catalog>) -> Self {
        Self {
            store,
            catalog,
            state: ContextState::Uninitialized,
        }
    }

    /// Read the stored preference and become ready.
    ///
    /// An unknown code or an unreadable store falls back to the baseline
    /// language. Calling again once ready changes nothing.
    pub fn initialize(&mut self) -> Language {
        if let ContextState::Ready(language) = self.state {
            return language;
        }

        let language = match self.store.get_preference(LANGUAGE_PREFERENCE_KEY) {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or_else(|| {
                warn!(code = %code, "ignoring unknown stored language code");
                BASELINE_LANGUAGE
            }),
            Ok(None) => BASELINE_LANGUAGE,
            Err(e) => {
                warn!(error = %e, "could not read language preference");
                BASELINE_LANGUAGE
            }
        };

        debug!(%language, "language context ready");
        self.state = ContextState::Ready(language);
        language
    }

    pub fn state(&self) -> ContextState {
        self.state
    }

    /// The language lookups currently resolve against.
    pub fn language(&self) -> Language {
        match self.state {
            ContextState::Ready(language) => language,
            ContextState::Uninitialized => BASELINE_LANGUAGE,
        }
    }

    /// Switch language and persist the choice.
    ///
    /// The in-memory selection changes first, so it holds even if the store
    /// write fails; the write error is still returned.
    pub fn set_language(&mut self, language: Language) -> I18nResult<()> {
        debug!(from = %self.language(), to = %language, "switching language");
        self.state = ContextState::Ready(language);
        self.store
            .set_preference(LANGUAGE_PREFERENCE_KEY, language.code())?;
        Ok(())
    }

    /// Switch language by code.
    pub fn set_language_code(&mut self, code: &str) -> I18nResult<()> {
        let language = code.parse::<Language>()?;
        self.set_language(language)
    }

    /// Table of the active language.
    pub fn table(&self) -> &LanguageTable {
        self.catalog.table(self.language())
    }

    /// Resolve `path` in the active language.
    ///
    /// A missing path returns `fallback`, or an empty string without one.
    /// Other languages are never consulted.
    pub fn resolve<P: AsRef<str>>(&self, path: &[P], fallback: Option<&str>) -> String {
        let table = self.table();
        if !table.contains(path) {
            debug!(
                language = %self.language(),
                path = %path.iter().map(|segment| segment.as_ref()).collect::<Vec<&str>>().join("."),
                "missing translation"
            );
        }
        table.resolve(path, fallback)
    }

    /// Resolve a dotted key such as `"footer.quickLinks.title"`.
    pub fn resolve_key(&self, key: &str, fallback: Option<&str>) -> String {
        self.resolve(split_key(key).as_slice(), fallback)
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
