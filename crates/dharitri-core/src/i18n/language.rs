//! Supported languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::I18nError;

/// A language the site ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Hi,
    Mr,
    Gu,
    Or,
    Bn,
}

/// Language used when no valid preference is stored.
pub const BASELINE_LANGUAGE: Language = Language::En;

impl Language {
    /// All supported languages, in selector order.
    pub const ALL: [Language; 6] = [
        Language::En,
        Language::Hi,
        Language::Mr,
        Language::Gu,
        Language::Or,
        Language::Bn,
    ];

    /// Two-letter code, also the persisted preference value.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Mr => "mr",
            Language::Gu => "gu",
            Language::Or => "or",
            Language::Bn => "bn",
        }
    }

    /// Name in the language itself, for the language selector.
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिंदी",
            Language::Mr => "मराठी",
            Language::Gu => "ગુજરાતી",
            Language::Or => "ଓଡ଼ିଆ",
            Language::Bn => "বাংলা",
        }
    }

    /// Look up a language by code. Case and surrounding whitespace are ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }
}

impl FromStr for Language {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s).ok_or_else(|| I18nError::UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
    }

    #[test]
    fn test_from_code_is_lenient_about_case() {
        assert_eq!(Language::from_code(" HI "), Some(Language::Hi));
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(Language::from_code("pa"), None);
        assert!(matches!(
            "fr".parse::<Language>(),
            Err(I18nError::UnknownLanguage(code)) if code == "fr"
        ));
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Language::Or).unwrap(), "\"or\"");
        let lang: Language = serde_json::from_str("\"bn\"").unwrap();
        assert_eq!(lang, Language::Bn);
    }
}
