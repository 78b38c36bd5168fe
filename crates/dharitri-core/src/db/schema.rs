//! SQLite schema definition.

/// Local database schema.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Preferences (key-value, one row per setting)
-- ============================================================================

CREATE TABLE IF NOT EXISTS preferences (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
