//! Language context integration tests against the bundled tables and a
//! file-backed preference database.

use dharitri_core::db::{Database, PreferenceStore};
use dharitri_core::i18n::{ContextState, LanguageContext, LANGUAGE_PREFERENCE_KEY};
use dharitri_core::Language;

#[test]
fn test_selection_persists_across_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dharitri.db");

    {
        let mut context = LanguageContext::new(Database::open(&path).unwrap());
        assert_eq!(context.initialize(), Language::En);
        context.set_language(Language::Mr).unwrap();
    }

    let mut context = LanguageContext::new(Database::open(&path).unwrap());
    assert_eq!(context.state(), ContextState::Uninitialized);
    assert_eq!(context.initialize(), Language::Mr);
    assert_eq!(
        context.resolve(&["common", "nav", "news"], Some("News")),
        "बातम्या"
    );
}

#[test]
fn test_corrupt_stored_code_starts_in_baseline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dharitri.db");

    Database::open(&path)
        .unwrap()
        .set_preference(LANGUAGE_PREFERENCE_KEY, "klingon")
        .unwrap();

    let mut context = LanguageContext::new(Database::open(&path).unwrap());
    assert_eq!(context.initialize(), Language::En);
    assert_eq!(
        context.resolve(&["home", "hero", "title"], None),
        "Complete Cow Healthcare Solution"
    );
}

#[test]
fn test_missing_key_returns_literal_unchanged() {
    // The bundled Odia table has no home.hero.title
    let mut context = LanguageContext::new(Database::open_in_memory().unwrap());
    context.initialize();
    context.set_language(Language::Or).unwrap();

    assert_eq!(
        context.resolve(&["home", "hero", "title"], Some("Complete Cow Healthcare Solution")),
        "Complete Cow Healthcare Solution"
    );
    assert_eq!(context.resolve(&["home", "hero", "title"], None), "");
    assert_eq!(
        context.resolve_key("common.nav.home", Some("Home")),
        "ମୂଳପୃଷ୍ଠା"
    );
}

#[test]
fn test_switch_is_visible_immediately() {
    let mut context = LanguageContext::new(Database::open_in_memory().unwrap());
    context.initialize();
    assert_eq!(context.resolve_key("footer.rights", None), "All rights reserved.");

    context.set_language_code("hi").unwrap();
    assert_eq!(context.resolve_key("footer.rights", None), "सर्वाधिकार सुरक्षित।");
    assert_eq!(
        context.store().get_preference(LANGUAGE_PREFERENCE_KEY).unwrap(),
        Some("hi".to_string())
    );
}
