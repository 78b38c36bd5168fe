//! Cattle record models.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::fields::{
    lenient_optional_string, lenient_string, parse_iso_date, parse_number, FieldValue,
};

/// Health status of an animal as recorded by the farmer or vet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthStatus {
    #[default]
    Healthy,
    UnderMedication,
    Sick,
    /// Any other stored value, kept verbatim (empty when the store sent null)
    Unrecognized(String),
}

impl HealthStatus {
    /// Display label, matching the values stored in the `cows` table.
    pub fn as_str(&self) -> &str {
        match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::UnderMedication => "Under Medication",
            HealthStatus::Sick => "Sick",
            HealthStatus::Unrecognized(raw) => raw.as_str(),
        }
    }

    /// Parse a stored status. Matching is exact apart from surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "Healthy" => HealthStatus::Healthy,
            "Under Medication" | "UnderMedication" => HealthStatus::UnderMedication,
            "Sick" => HealthStatus::Sick,
            other => HealthStatus::Unrecognized(other.to_string()),
        }
    }
}

impl From<String> for HealthStatus {
    fn from(raw: String) -> Self {
        HealthStatus::parse(&raw)
    }
}

impl From<HealthStatus> for String {
    fn from(status: HealthStatus) -> Self {
        match status {
            HealthStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

/// Accept a status as text, number or null; null becomes an empty
/// [`HealthStatus::Unrecognized`].
fn lenient_health_status<'de, D>(deserializer: D) -> Result<HealthStatus, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_optional_string(deserializer).map(|raw| {
        raw.map(HealthStatus::from)
            .unwrap_or_else(|| HealthStatus::Unrecognized(String::new()))
    })
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cattle record as fetched from the hosted data store.
///
/// Date and production fields are kept in their raw textual form; they are
/// parsed on demand so one bad value never rejects the whole row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CattleRecord {
    /// Store identifier (numeric ids are carried as text)
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    /// Animal name
    pub name: String,
    /// Breed
    #[serde(default)]
    pub breed: Option<String>,
    /// Current health status
    #[serde(default, deserialize_with = "lenient_health_status")]
    pub health_status: HealthStatus,
    /// Milk production in litres per day, as entered
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub milk_production: Option<String>,
    /// Date of the last health checkup (ISO-8601)
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub last_checkup: Option<String>,
    /// Date of the next scheduled vaccination (ISO-8601)
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub next_vaccination: Option<String>,
}

impl CattleRecord {
    /// Create a record with no dates and no production figure.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            breed: None,
            health_status: HealthStatus::default(),
            milk_production: None,
            last_checkup: None,
            next_vaccination: None,
        }
    }

    /// Parsed last checkup date.
    pub fn last_checkup_date(&self) -> FieldValue<NaiveDate> {
        parse_iso_date(self.last_checkup.as_deref())
    }

    /// Parsed next vaccination date.
    pub fn next_vaccination_date(&self) -> FieldValue<NaiveDate> {
        parse_iso_date(self.next_vaccination.as_deref())
    }

    /// Parsed milk production in litres per day.
    pub fn milk_production_litres(&self) -> FieldValue<f64> {
        parse_number(self.milk_production.as_deref())
    }

    /// Whether the record carries any date the calendar can use.
    pub fn has_dates(&self) -> bool {
        self.last_checkup_date().valid().is_some() || self.next_vaccination_date().valid().is_some()
    }
}

/// Column a parsed value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    /// The row as a whole (it could not be read as a record)
    Row,
    LastCheckup,
    NextVaccination,
    MilkProduction,
}

impl RecordField {
    /// Column name in the `cows` table.
    pub fn column(&self) -> &'static str {
        match self {
            RecordField::Row => "row",
            RecordField::LastCheckup => "last_checkup",
            RecordField::NextVaccination => "next_vaccination",
            RecordField::MilkProduction => "milk_production",
        }
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}
