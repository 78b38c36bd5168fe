//! Nested translation tables.

use serde_json::{Map, Value};

use super::{I18nError, I18nResult};

/// Translation strings for one language, keyed by nested path.
///
/// ```json
/// { "home": { "hero": { "title": "Complete Cow Healthcare Solution" } } }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageTable {
    root: Map<String, Value>,
}

impl LanguageTable {
    /// Table with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a table from JSON. The root must be an object.
    pub fn from_json(json: &str) -> I18nResult<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(root) => Ok(Self { root }),
            _ => Err(I18nError::NotAnObject),
        }
    }

    /// Walk `path` and return the string at its end.
    ///
    /// Misses on a missing segment, a non-string leaf, an empty string or an
    /// empty path.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Option<&str> {
        let (last, parents) = path.split_last()?;

        let mut node = &self.root;
        for segment in parents {
            node = node.get(segment.as_ref())?.as_object()?;
        }

        node.get(last.as_ref())?
            .as_str()
            .filter(|text| !text.is_empty())
    }

    /// Look up `path`, falling back to `fallback` or an empty string.
    pub fn resolve<S: AsRef<str>>(&self, path: &[S], fallback: Option<&str>) -> String {
        self.lookup(path)
            .or(fallback)
            .unwrap_or_default()
            .to_string()
    }

    /// Whether `path` resolves to a translation.
    pub fn contains<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.lookup(path).is_some()
    }

    /// Number of translated strings in the table.
    pub fn len(&self) -> usize {
        fn count(map: &Map<String, Value>) -> usize {
            map.values()
                .map(|value| match value {
                    Value::String(_) => 1,
                    Value::Object(child) => count(child),
                    _ => 0,
                })
                .sum()
        }
        count(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Split a dotted key such as `"home.hero.title"` into path segments.
pub fn split_key(key: &str) -> Vec<&str> {
    key.split('.').filter(|segment| !segment.is_empty()).collect()
}
