//! Bundled translation catalog.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::error;

use super::{Language, LanguageTable};

/// Translation tables for every supported language.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tables: HashMap<Language, LanguageTable>,
    empty: LanguageTable,
}

static BUNDLED: OnceLock<Arc<Catalog>> = OnceLock::new();

fn bundled_source(language: Language) -> &'static str {
    match language {
        Language::En => include_str!("../../translations/en.json"),
        Language::Hi => include_str!("../../translations/hi.json"),
        Language::Mr => include_str!("../../translations/mr.json"),
        Language::Gu => include_str!("../../translations/gu.json"),
        Language::Or => include_str!("../../translations/or.json"),
        Language::Bn => include_str!("../../translations/bn.json"),
    }
}

impl Catalog {
    /// Catalog with no tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// The tables shipped with the crate, parsed once per process.
    ///
    /// A table that fails to parse is replaced by an empty one so lookups in
    /// that language fall through to their literal defaults.
    pub fn bundled() -> Arc<Catalog> {
        BUNDLED
            .get_or_init(|| {
                let mut catalog = Catalog::new();
                for language in Language::ALL {
                    let table = LanguageTable::from_json(bundled_source(language))
                        .unwrap_or_else(|e| {
                            error!(%language, error = %e, "bundled translation table is invalid");
                            LanguageTable::empty()
                        });
                    catalog.insert(language, table);
                }
                Arc::new(catalog)
            })
            .clone()
    }

    /// Add or replace the table for a language.
    pub fn insert(&mut self, language: Language, table: LanguageTable) {
        self.tables.insert(language, table);
    }

    /// Table for a language; empty if none was loaded.
    pub fn table(&self, language: Language) -> &LanguageTable {
        self.tables.get(&language).unwrap_or(&self.empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_parse() {
        for language in Language::ALL {
            let source = bundled_source(language);
            assert!(
                LanguageTable::from_json(source).is_ok(),
                "{} table should parse",
                language
            );
        }
    }

    #[test]
    fn test_bundled_catalog_has_every_language() {
        let catalog = Catalog::bundled();
        for language in Language::ALL {
            assert!(!catalog.table(language).is_empty());
            assert!(catalog.table(language).contains(&["common", "nav", "home"]));
        }
    }

    #[test]
    fn test_bundled_is_shared() {
        assert!(Arc::ptr_eq(&Catalog::bundled(), &Catalog::bundled()));
    }

    #[test]
    fn test_missing_language_is_empty() {
        let catalog = Catalog::new();
        assert!(catalog.table(Language::Hi).is_empty());
    }
}
