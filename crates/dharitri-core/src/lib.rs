//! Dharitri Core Library
//!
//! Cattle-health calendar, alerts and localized content for the Dharitri
//! farmer dashboard.
//!
//! # Data flow
//!
//! ```text
//! Hosted store ──fetch──▶ Vec<CattleRecord>
//!                              │
//!               ┌──────────────┼──────────────┐
//!               ▼              ▼              ▼
//!        compute_events   compute_alerts   HerdStats
//!               │              │              │
//!               ▼              ▼              ▼
//!           Calendar     NotificationFeed   Summary cards
//!
//! Stored preference ──▶ LanguageContext ──resolve(path, literal)──▶ display text
//! ```
//!
//! Fetching rows is the host's job. Everything here is a pure transform of
//! already-fetched records; a new fetch means re-running the transforms and
//! replacing the previous output.
//!
//! # Modules
//!
//! - [`models`]: Domain types (CattleRecord, DerivedEvent, Alert)
//! - [`calendar`]: Derived-event engine (events, alerts, diagnostics)
//! - [`notifications`]: Read/unread feed over alerts
//! - [`stats`]: Herd statistics
//! - [`i18n`]: Language tables and the active-language context
//! - [`db`]: SQLite preference storage
//! - [`config`]: Engine thresholds

pub mod calendar;
pub mod config;
pub mod db;
pub mod i18n;
pub mod models;
pub mod notifications;
pub mod stats;

// Re-export commonly used types
pub use calendar::{compute_alerts, compute_events, Derivation, Diagnostic, EventEngine};
pub use config::EngineConfig;
pub use db::{Database, MemoryPreferences, PreferenceStore};
pub use i18n::{Catalog, Language, LanguageContext, LanguageTable};
pub use models::{Alert, AlertKind, CattleRecord, DerivedEvent, EventKind, HealthStatus};
pub use notifications::NotificationFeed;
pub use stats::HerdStats;

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use models::FieldValue;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum DharitriError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<db::DbError> for DharitriError {
    fn from(e: db::DbError) -> Self {
        DharitriError::DatabaseError(e.to_string())
    }
}

impl From<serde_json::Error> for DharitriError {
    fn from(e: serde_json::Error) -> Self {
        DharitriError::SerializationError(e.to_string())
    }
}

impl From<config::ConfigError> for DharitriError {
    fn from(e: config::ConfigError) -> Self {
        DharitriError::InvalidInput(e.to_string())
    }
}

impl From<i18n::I18nError> for DharitriError {
    fn from(e: i18n::I18nError) -> Self {
        match e {
            i18n::I18nError::Preference(db) => db.into(),
            other => DharitriError::InvalidInput(other.to_string()),
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for DharitriError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DharitriError::DatabaseError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create the preference database at the given path.
#[uniffi::export]
pub fn open_database(path: String) -> Result<Arc<DharitriCore>, DharitriError> {
    let db = Database::open(&path)?;
    Ok(DharitriCore::with_database(db))
}

/// Create an in-memory database (for testing).
#[uniffi::export]
pub fn open_database_in_memory() -> Result<Arc<DharitriCore>, DharitriError> {
    let db = Database::open_in_memory()?;
    Ok(DharitriCore::with_database(db))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe core handle for FFI.
#[derive(uniffi::Object)]
pub struct DharitriCore {
    language: Mutex<LanguageContext<Database>>,
    engine: Mutex<EventEngine>,
}

impl DharitriCore {
    fn with_database(db: Database) -> Arc<Self> {
        let mut language = LanguageContext::new(db);
        language.initialize();
        Arc::new(Self {
            language: Mutex::new(language),
            engine: Mutex::new(EventEngine::default()),
        })
    }
}

#[uniffi::export]
impl DharitriCore {
    // =========================================================================
    // Engine Configuration
    // =========================================================================

    /// Replace engine thresholds from a (possibly partial) JSON document.
    pub fn configure(&self, config_json: String) -> Result<(), DharitriError> {
        let config = EngineConfig::from_json(&config_json)?;
        self.engine.lock()?.set_config(config);
        Ok(())
    }

    // =========================================================================
    // Calendar and Alerts
    // =========================================================================

    /// Calendar events for the given records, sorted by date.
    pub fn compute_events(
        &self,
        records: Vec<FfiCattleRecord>,
    ) -> Result<FfiEventDerivation, DharitriError> {
        let records: Vec<CattleRecord> = records.into_iter().map(Into::into).collect();
        let engine = self.engine.lock()?;
        Ok(engine.compute_events(&records).into())
    }

    /// Calendar events for store rows given as a JSON array.
    ///
    /// Rows that cannot be read as a cattle record are skipped and reported
    /// ahead of the field-level diagnostics. Only a document that is not an
    /// array fails the call.
    pub fn compute_events_json(
        &self,
        rows_json: String,
    ) -> Result<FfiEventDerivation, DharitriError> {
        let rows = calendar::records_from_json(&rows_json)?;
        let engine = self.engine.lock()?;
        let mut derivation = engine.compute_events(&rows.items);

        let mut diagnostics = rows.diagnostics;
        diagnostics.append(&mut derivation.diagnostics);
        derivation.diagnostics = diagnostics;
        Ok(derivation.into())
    }

    /// Alerts as of `today` (ISO date), or as of the current UTC date.
    pub fn compute_alerts(
        &self,
        records: Vec<FfiCattleRecord>,
        today: Option<String>,
    ) -> Result<FfiAlertDerivation, DharitriError> {
        let today = evaluation_date(today)?;
        let records: Vec<CattleRecord> = records.into_iter().map(Into::into).collect();
        let engine = self.engine.lock()?;
        Ok(engine.compute_alerts(&records, today).into())
    }

    /// Herd summary for the dashboard cards.
    pub fn herd_stats(&self, records: Vec<FfiCattleRecord>) -> FfiHerdStats {
        let records: Vec<CattleRecord> = records.into_iter().map(Into::into).collect();
        HerdStats::from_records(&records).into()
    }

    // =========================================================================
    // Localization
    // =========================================================================

    /// Active language code.
    pub fn current_language(&self) -> Result<String, DharitriError> {
        Ok(self.language.lock()?.language().code().to_string())
    }

    /// Switch and persist the active language.
    pub fn set_language(&self, code: String) -> Result<(), DharitriError> {
        self.language.lock()?.set_language_code(&code)?;
        Ok(())
    }

    /// Languages offered in the selector.
    pub fn supported_languages(&self) -> Vec<FfiLanguage> {
        Language::ALL
            .into_iter()
            .map(|lang| FfiLanguage {
                code: lang.code().to_string(),
                name: lang.native_name().to_string(),
            })
            .collect()
    }

    /// Resolve a key path in the active language.
    pub fn translate(
        &self,
        path: Vec<String>,
        fallback: Option<String>,
    ) -> Result<String, DharitriError> {
        let context = self.language.lock()?;
        Ok(context.resolve(path.as_slice(), fallback.as_deref()))
    }
}

/// Parse the caller's evaluation date, defaulting to today (UTC).
fn evaluation_date(today: Option<String>) -> Result<NaiveDate, DharitriError> {
    match models::parse_iso_date(today.as_deref()) {
        FieldValue::Valid(date) => Ok(date),
        FieldValue::Absent => Ok(chrono::Utc::now().date_naive()),
        FieldValue::Malformed(raw) => Err(DharitriError::InvalidInput(format!(
            "not an ISO date: {}",
            raw
        ))),
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe cattle record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCattleRecord {
    pub id: String,
    pub name: String,
    pub breed: Option<String>,
    pub health_status: String,
    pub milk_production: Option<String>,
    pub last_checkup: Option<String>,
    pub next_vaccination: Option<String>,
}

impl From<FfiCattleRecord> for CattleRecord {
    fn from(record: FfiCattleRecord) -> Self {
        CattleRecord {
            id: record.id,
            name: record.name,
            breed: record.breed,
            health_status: HealthStatus::parse(&record.health_status),
            milk_production: record.milk_production,
            last_checkup: record.last_checkup,
            next_vaccination: record.next_vaccination,
        }
    }
}

/// FFI-safe calendar event.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDerivedEvent {
    pub id: String,
    pub kind: String,
    pub category: String,
    pub date: String,
    pub cattle_id: String,
    pub cattle_name: String,
    pub label: String,
    pub description: String,
}

impl From<DerivedEvent> for FfiDerivedEvent {
    fn from(event: DerivedEvent) -> Self {
        Self {
            kind: event.kind.as_str().to_string(),
            category: event.category().as_str().to_string(),
            date: event.date.to_string(),
            id: event.id,
            cattle_id: event.cattle_id,
            cattle_name: event.cattle_name,
            label: event.label,
            description: event.description,
        }
    }
}

/// FFI-safe alert.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAlert {
    pub id: String,
    pub kind: String,
    pub severity: u8,
    pub cattle_id: String,
    pub cattle_name: String,
    pub days_until: Option<i64>,
    pub raised_on: String,
    pub title: String,
    pub message: String,
}

impl From<Alert> for FfiAlert {
    fn from(alert: Alert) -> Self {
        Self {
            kind: alert.kind.as_str().to_string(),
            severity: alert.severity(),
            raised_on: alert.raised_on.to_string(),
            id: alert.id,
            cattle_id: alert.cattle_id,
            cattle_name: alert.cattle_name,
            days_until: alert.days_until,
            title: alert.title,
            message: alert.message,
        }
    }
}

/// FFI-safe record diagnostic.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiagnostic {
    pub cattle_id: String,
    /// Store column, or "row" when the whole row was unreadable.
    pub field: String,
    pub kind: String,
    /// Offending raw value or parse error text.
    pub value: String,
}

impl From<Diagnostic> for FfiDiagnostic {
    fn from(diagnostic: Diagnostic) -> Self {
        Self {
            field: diagnostic.field.column().to_string(),
            kind: diagnostic.kind.as_str().to_string(),
            value: diagnostic.kind.value().to_string(),
            cattle_id: diagnostic.cattle_id,
        }
    }
}

/// Calendar events plus the diagnostics raised while deriving them.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiEventDerivation {
    pub events: Vec<FfiDerivedEvent>,
    pub diagnostics: Vec<FfiDiagnostic>,
}

impl From<Derivation<DerivedEvent>> for FfiEventDerivation {
    fn from(derivation: Derivation<DerivedEvent>) -> Self {
        Self {
            events: derivation.items.into_iter().map(Into::into).collect(),
            diagnostics: derivation.diagnostics.into_iter().map(Into::into).collect(),
        }
    }
}

/// Alerts plus the diagnostics raised while deriving them.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAlertDerivation {
    pub alerts: Vec<FfiAlert>,
    pub diagnostics: Vec<FfiDiagnostic>,
}

impl From<Derivation<Alert>> for FfiAlertDerivation {
    fn from(derivation: Derivation<Alert>) -> Self {
        Self {
            alerts: derivation.items.into_iter().map(Into::into).collect(),
            diagnostics: derivation.diagnostics.into_iter().map(Into::into).collect(),
        }
    }
}

/// FFI-safe herd statistics.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiHerdStats {
    pub total: u32,
    pub healthy: u32,
    pub needs_attention: u32,
    pub average_milk_production: Option<f64>,
}

impl From<HerdStats> for FfiHerdStats {
    fn from(stats: HerdStats) -> Self {
        Self {
            total: saturating_u32(stats.total),
            healthy: saturating_u32(stats.healthy),
            needs_attention: saturating_u32(stats.needs_attention),
            average_milk_production: stats.average_milk_production,
        }
    }
}

/// Counts beyond `u32::MAX` are pinned to it rather than wrapped.
fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// FFI-safe language descriptor.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiLanguage {
    pub code: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ffi_record(id: &str) -> FfiCattleRecord {
        FfiCattleRecord {
            id: id.to_string(),
            name: format!("Cow {}", id),
            breed: None,
            health_status: "Sick".to_string(),
            milk_production: Some("10".to_string()),
            last_checkup: Some("2023-12-15".to_string()),
            next_vaccination: Some("2024-01-15".to_string()),
        }
    }

    #[test]
    fn test_core_events_and_alerts() {
        let core = open_database_in_memory().unwrap();

        let derived = core.compute_events(vec![ffi_record("c1")]).unwrap();
        assert!(derived.diagnostics.is_empty());
        let events = derived.events;
        assert_eq!(events.len(), 3);
        assert_eq!(events[0].kind, "past_checkup");
        assert_eq!(events[0].category, "checkup");
        assert_eq!(events[1].date, "2024-01-15");

        let alerts = core
            .compute_alerts(vec![ffi_record("c1")], Some("2024-01-10".into()))
            .unwrap()
            .alerts;
        let kinds: Vec<_> = alerts.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec!["vaccination_upcoming", "health_concern", "low_production"]);
        assert_eq!(alerts[0].days_until, Some(5));
        assert_eq!(alerts[0].raised_on, "2024-01-10");
    }

    #[test]
    fn test_core_rejects_bad_evaluation_date() {
        let core = open_database_in_memory().unwrap();
        let result = core.compute_alerts(vec![], Some("10/01/2024".into()));
        assert!(matches!(result, Err(DharitriError::InvalidInput(_))));
    }

    #[test]
    fn test_core_events_from_store_json() {
        let core = open_database_in_memory().unwrap();
        let rows = r#"[
            {"id": 1, "name": "Ganga", "health_status": "Healthy", "milk_production": "18",
             "last_checkup": null, "next_vaccination": "2024-02-01"},
            {"id": 2, "name": "Yamuna", "health_status": "Sick", "milk_production": null,
             "last_checkup": null, "next_vaccination": null}
        ]"#;
        let derived = core.compute_events_json(rows.to_string()).unwrap();
        assert_eq!(derived.events.len(), 1);
        assert_eq!(derived.events[0].id, "vac-1");
        assert!(derived.diagnostics.is_empty());
    }

    #[test]
    fn test_core_skips_unreadable_store_row() {
        let core = open_database_in_memory().unwrap();
        let rows = r#"[
            {"id": 7, "name": null, "health_status": "Sick", "milk_production": "4",
             "last_checkup": "2024-01-02", "next_vaccination": null},
            {"id": 8, "name": "Kaveri", "health_status": null, "milk_production": 12,
             "last_checkup": "31/01/2024", "next_vaccination": "2024-02-01"}
        ]"#;
        let derived = core.compute_events_json(rows.to_string()).unwrap();

        assert_eq!(derived.events.len(), 1);
        assert_eq!(derived.events[0].id, "vac-8");
        assert_eq!(derived.events[0].cattle_name, "Kaveri");

        assert_eq!(derived.diagnostics.len(), 2);
        assert_eq!(derived.diagnostics[0].cattle_id, "7");
        assert_eq!(derived.diagnostics[0].field, "row");
        assert_eq!(derived.diagnostics[0].kind, "malformed_row");
        assert_eq!(derived.diagnostics[1].cattle_id, "8");
        assert_eq!(derived.diagnostics[1].field, "last_checkup");
        assert_eq!(derived.diagnostics[1].kind, "malformed_date");
        assert_eq!(derived.diagnostics[1].value, "31/01/2024");
    }

    #[test]
    fn test_core_non_array_store_document_fails() {
        let core = open_database_in_memory().unwrap();
        let result = core.compute_events_json(r#"{"id": 1}"#.into());
        assert!(matches!(result, Err(DharitriError::SerializationError(_))));
    }

    #[test]
    fn test_core_reports_alert_diagnostics() {
        let core = open_database_in_memory().unwrap();
        let mut record = ffi_record("c9");
        record.milk_production = Some("N/A".into());
        record.next_vaccination = Some("soon".into());

        let derived = core
            .compute_alerts(vec![record], Some("2024-01-10".into()))
            .unwrap();
        let kinds: Vec<_> = derived.alerts.iter().map(|a| a.kind.as_str()).collect();
        assert_eq!(kinds, vec!["health_concern"]);

        let mut reported: Vec<_> = derived
            .diagnostics
            .iter()
            .map(|d| (d.field.as_str(), d.kind.as_str(), d.value.as_str()))
            .collect();
        reported.sort();
        assert_eq!(
            reported,
            vec![
                ("milk_production", "malformed_number", "N/A"),
                ("next_vaccination", "malformed_date", "soon"),
            ]
        );
    }

    #[test]
    fn test_core_configure() {
        let core = open_database_in_memory().unwrap();
        core.configure(r#"{"low_production_threshold": 5}"#.into())
            .unwrap();

        let alerts = core
            .compute_alerts(vec![ffi_record("c1")], Some("2024-03-01".into()))
            .unwrap()
            .alerts;
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].kind, "health_concern");

        assert!(core.configure(r#"{"vaccination_window_days": -3}"#.into()).is_err());
    }

    #[test]
    fn test_core_language() {
        let core = open_database_in_memory().unwrap();
        assert_eq!(core.current_language().unwrap(), "en");
        assert_eq!(core.supported_languages().len(), 6);

        core.set_language("hi".into()).unwrap();
        assert_eq!(core.current_language().unwrap(), "hi");
        assert_eq!(
            core.translate(vec!["common".into(), "nav".into(), "home".into()], Some("Home".into()))
                .unwrap(),
            "होम"
        );

        assert!(matches!(
            core.set_language("pa".into()),
            Err(DharitriError::InvalidInput(_))
        ));
        assert_eq!(core.current_language().unwrap(), "hi");
    }

    #[test]
    fn test_core_herd_stats() {
        let core = open_database_in_memory().unwrap();
        let stats = core.herd_stats(vec![ffi_record("c1"), ffi_record("c2")]);
        assert_eq!(stats.total, 2);
        assert_eq!(stats.needs_attention, 2);
        assert_eq!(stats.average_milk_production, Some(10.0));
    }

    #[test]
    fn test_herd_counts_saturate_at_u32_max() {
        assert_eq!(saturating_u32(42), 42);
        assert_eq!(saturating_u32(u32::MAX as usize), u32::MAX);
        assert_eq!(saturating_u32(usize::MAX), u32::MAX);

        let stats = HerdStats {
            total: usize::MAX,
            healthy: 3,
            needs_attention: usize::MAX,
            average_milk_production: None,
        };
        let ffi: FfiHerdStats = stats.into();
        assert_eq!(ffi.total, u32::MAX);
        assert_eq!(ffi.healthy, 3);
        assert_eq!(ffi.needs_attention, u32::MAX);
    }
}
