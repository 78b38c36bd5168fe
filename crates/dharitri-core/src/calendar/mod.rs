//! Derived-event engine.
//!
//! Turns a farmer's cattle records into calendar events and notification
//! alerts. Everything here is a pure function of the records, the engine
//! configuration and the evaluation date; nothing is persisted and repeated
//! calls with the same input return the same output.
//!
//! Bad field values never fail a batch. They are skipped, logged through
//! `tracing` and returned as [`Diagnostic`]s next to the derived items.

mod alerts;
mod dates;
mod events;

pub use dates::*;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::config::EngineConfig;
use crate::models::{Alert, CattleRecord, DerivedEvent, RecordField};

/// Why a field was skipped during derivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Date text could not be parsed
    MalformedDate { value: String },
    /// Production figure could not be parsed
    MalformedNumber { value: String },
    /// Date arithmetic left the representable range
    DateOutOfRange { value: String },
    /// Row could not be read as a cattle record at all
    MalformedRow { value: String },
}

impl DiagnosticKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticKind::MalformedDate { .. } => "malformed_date",
            DiagnosticKind::MalformedNumber { .. } => "malformed_number",
            DiagnosticKind::DateOutOfRange { .. } => "date_out_of_range",
            DiagnosticKind::MalformedRow { .. } => "malformed_row",
        }
    }

    /// The offending raw text, or the reader's error for a bad row.
    pub fn value(&self) -> &str {
        match self {
            DiagnosticKind::MalformedDate { value }
            | DiagnosticKind::MalformedNumber { value }
            | DiagnosticKind::DateOutOfRange { value }
            | DiagnosticKind::MalformedRow { value } => value.as_str(),
        }
    }
}

/// A recovered problem with one field of one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub cattle_id: String,
    pub field: RecordField,
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

/// Derived items plus the diagnostics collected while deriving them.
#[derive(Debug, Clone, PartialEq)]
pub struct Derivation<T> {
    pub items: Vec<T>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Default for Derivation<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            diagnostics: Vec::new(),
        }
    }
}

impl<T> Derivation<T> {
    /// Record a skipped field.
    fn report(&mut self, record: &CattleRecord, field: RecordField, kind: DiagnosticKind) {
        self.report_id(record.id.clone(), field, kind);
    }

    fn report_id(&mut self, cattle_id: String, field: RecordField, kind: DiagnosticKind) {
        warn!(cattle_id = %cattle_id, field = %field, ?kind, "skipping unusable field");
        self.diagnostics.push(Diagnostic {
            cattle_id,
            field,
            kind,
        });
    }

    /// Whether every field was usable.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Drop the diagnostics (they have already been logged).
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// Derived-event engine holding the thresholds it evaluates against.
#[derive(Debug, Clone, Default)]
pub struct EventEngine {
    config: EngineConfig,
}

impl EventEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Current configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
    }
}

/// Read store rows from a JSON array, one row at a time.
///
/// A row that cannot be read as a [`CattleRecord`] is skipped with a
/// [`DiagnosticKind::MalformedRow`] diagnostic; only a document that is not a
/// JSON array fails.
pub fn records_from_json(json: &str) -> serde_json::Result<Derivation<CattleRecord>> {
    let rows: Vec<Value> = serde_json::from_str(json)?;
    let mut out = Derivation::default();

    for (index, row) in rows.into_iter().enumerate() {
        let cattle_id = row_id(&row).unwrap_or_else(|| format!("#{}", index));
        match serde_json::from_value::<CattleRecord>(row) {
            Ok(record) => out.items.push(record),
            Err(e) => out.report_id(
                cattle_id,
                RecordField::Row,
                DiagnosticKind::MalformedRow {
                    value: e.to_string(),
                },
            ),
        }
    }

    Ok(out)
}

fn row_id(row: &Value) -> Option<String> {
    match row.get("id")? {
        Value::String(id) => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Calendar events for `records` with the default configuration.
///
/// Diagnostics are reported through `tracing` only; use
/// [`EventEngine::compute_events`] to receive them.
pub fn compute_events(records: &[CattleRecord]) -> Vec<DerivedEvent> {
    EventEngine::default().compute_events(records).into_items()
}

/// Alerts for `records` as of `today` with the default thresholds
/// (7-day vaccination window, 15 L/day production floor).
pub fn compute_alerts(records: &[CattleRecord], today: chrono::NaiveDate) -> Vec<Alert> {
    EventEngine::default().compute_alerts(records, today).into_items()
}
