//! Preference persistence.

use std::collections::HashMap;
use std::sync::Mutex;

use rusqlite::{params, OptionalExtension};

use super::{Database, DbError, DbResult};

/// Key-value storage for user preferences that survive restarts.
pub trait PreferenceStore {
    /// Read a stored value.
    fn get_preference(&self, key: &str) -> DbResult<Option<String>>;

    /// Insert or replace a value.
    fn set_preference(&self, key: &str, value: &str) -> DbResult<()>;
}

impl<T: PreferenceStore + ?Sized> PreferenceStore for &T {
    fn get_preference(&self, key: &str) -> DbResult<Option<String>> {
        (**self).get_preference(key)
    }

    fn set_preference(&self, key: &str, value: &str) -> DbResult<()> {
        (**self).set_preference(key, value)
    }
}

impl PreferenceStore for Database {
    fn get_preference(&self, key: &str) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT value FROM preferences WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()
            .map_err(Into::into)
    }

    fn set_preference(&self, key: &str, value: &str) -> DbResult<()> {
        self.conn.execute(
            r#"
            INSERT INTO preferences (key, value, updated_at)
            VALUES (?1, ?2, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;
        Ok(())
    }
}

/// Volatile preference store for hosts without local storage.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_preference(&self, key: &str) -> DbResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| DbError::Poisoned(e.to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set_preference(&self, key: &str, value: &str) -> DbResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| DbError::Poisoned(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
