//! Alert models for the notification panel.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of a threshold-triggered alert.
///
/// Declaration order is display order: most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Vaccination falls inside the look-ahead window
    VaccinationUpcoming,
    /// Animal is marked sick
    HealthConcern,
    /// Milk production is under the threshold
    LowProduction,
}

impl AlertKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::VaccinationUpcoming => "vaccination_upcoming",
            AlertKind::HealthConcern => "health_concern",
            AlertKind::LowProduction => "low_production",
        }
    }

    /// Higher is more severe.
    pub fn severity(&self) -> u8 {
        match self {
            AlertKind::VaccinationUpcoming => 3,
            AlertKind::HealthConcern => 2,
            AlertKind::LowProduction => 1,
        }
    }

    /// Deterministic alert id for a cattle record.
    pub fn alert_id(&self, cattle_id: &str) -> String {
        match self {
            AlertKind::VaccinationUpcoming => format!("vac-{}", cattle_id),
            AlertKind::HealthConcern => format!("health-{}", cattle_id),
            AlertKind::LowProduction => format!("prod-{}", cattle_id),
        }
    }
}

/// An alert computed fresh on every evaluation. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    /// Stable id, see [`AlertKind::alert_id`]
    pub id: String,
    pub kind: AlertKind,
    pub cattle_id: String,
    pub cattle_name: String,
    /// Days until the vaccination; only set for [`AlertKind::VaccinationUpcoming`]
    pub days_until: Option<i64>,
    /// Evaluation date the alert was raised on
    pub raised_on: NaiveDate,
    pub title: String,
    pub message: String,
}

impl Alert {
    /// Vaccination due within the window.
    pub fn vaccination_upcoming(
        cattle_id: &str,
        cattle_name: &str,
        days_until: i64,
        raised_on: NaiveDate,
    ) -> Self {
        Self::build(
            AlertKind::VaccinationUpcoming,
            cattle_id,
            cattle_name,
            Some(days_until),
            raised_on,
            "Upcoming Vaccination",
            format!("{} is due for vaccination in {} days", cattle_name, days_until),
        )
    }

    /// Animal marked sick.
    pub fn health_concern(cattle_id: &str, cattle_name: &str, raised_on: NaiveDate) -> Self {
        Self::build(
            AlertKind::HealthConcern,
            cattle_id,
            cattle_name,
            None,
            raised_on,
            "Health Alert",
            format!("{} is marked as sick and needs attention", cattle_name),
        )
    }

    /// Production below threshold.
    pub fn low_production(
        cattle_id: &str,
        cattle_name: &str,
        litres_per_day: f64,
        raised_on: NaiveDate,
    ) -> Self {
        Self::build(
            AlertKind::LowProduction,
            cattle_id,
            cattle_name,
            None,
            raised_on,
            "Low Production Alert",
            format!(
                "{}'s milk production is below average ({}L/day)",
                cattle_name, litres_per_day
            ),
        )
    }

    fn build(
        kind: AlertKind,
        cattle_id: &str,
        cattle_name: &str,
        days_until: Option<i64>,
        raised_on: NaiveDate,
        title: &str,
        message: String,
    ) -> Self {
        Self {
            id: kind.alert_id(cattle_id),
            kind,
            cattle_id: cattle_id.to_string(),
            cattle_name: cattle_name.to_string(),
            days_until,
            raised_on,
            title: title.to_string(),
            message,
        }
    }

    pub fn severity(&self) -> u8 {
        self.kind.severity()
    }
}
