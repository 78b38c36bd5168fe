//! Calendar event models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Kind of a derived calendar event.
///
/// Declaration order is the tie-break order for events sharing a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// The last recorded health checkup
    PastCheckup,
    /// Checkup projected from the last one
    ProjectedNextCheckup,
    /// Scheduled vaccination
    VaccinationDue,
}

/// Display grouping used by the calendar legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Vaccination,
    Checkup,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PastCheckup => "past_checkup",
            EventKind::ProjectedNextCheckup => "projected_next_checkup",
            EventKind::VaccinationDue => "vaccination_due",
        }
    }

    pub fn category(&self) -> EventCategory {
        match self {
            EventKind::VaccinationDue => EventCategory::Vaccination,
            EventKind::PastCheckup | EventKind::ProjectedNextCheckup => EventCategory::Checkup,
        }
    }

    /// Deterministic event id for a cattle record.
    pub fn event_id(&self, cattle_id: &str) -> String {
        match self {
            EventKind::VaccinationDue => format!("vac-{}", cattle_id),
            EventKind::PastCheckup => format!("check-{}-last", cattle_id),
            EventKind::ProjectedNextCheckup => format!("check-{}-next", cattle_id),
        }
    }
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Vaccination => "vaccination",
            EventCategory::Checkup => "checkup",
        }
    }
}

/// An all-day calendar event derived from a cattle record's dates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DerivedEvent {
    /// Stable id, see [`EventKind::event_id`]
    pub id: String,
    pub kind: EventKind,
    /// Anchor date
    pub date: NaiveDate,
    /// Back-reference to the source record
    pub cattle_id: String,
    pub cattle_name: String,
    /// Short title shown in the calendar cell
    pub label: String,
    /// Longer text shown in the event detail view
    pub description: String,
}

impl DerivedEvent {
    /// Build an event with the standard label and description for its kind.
    pub fn new(kind: EventKind, date: NaiveDate, cattle_id: &str, cattle_name: &str) -> Self {
        let (label, description) = match kind {
            EventKind::VaccinationDue => (
                format!("Vaccination: {}", cattle_name),
                format!("Scheduled vaccination for {}", cattle_name),
            ),
            EventKind::PastCheckup => (
                format!("Last Checkup: {}", cattle_name),
                format!("Last health checkup for {}", cattle_name),
            ),
            EventKind::ProjectedNextCheckup => (
                format!("Next Checkup Due: {}", cattle_name),
                format!("Scheduled health checkup for {}", cattle_name),
            ),
        };

        Self {
            id: kind.event_id(cattle_id),
            kind,
            date,
            cattle_id: cattle_id.to_string(),
            cattle_name: cattle_name.to_string(),
            label,
            description,
        }
    }

    pub fn category(&self) -> EventCategory {
        self.kind.category()
    }

    /// Whether the event falls on or after `today`.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.date >= today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_ids_are_distinct_per_kind() {
        assert_eq!(EventKind::VaccinationDue.event_id("7"), "vac-7");
        assert_eq!(EventKind::PastCheckup.event_id("7"), "check-7-last");
        assert_eq!(EventKind::ProjectedNextCheckup.event_id("7"), "check-7-next");
    }

    #[test]
    fn test_new_event_text() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let event = DerivedEvent::new(EventKind::VaccinationDue, date, "c1", "Nandini");

        assert_eq!(event.label, "Vaccination: Nandini");
        assert_eq!(event.description, "Scheduled vaccination for Nandini");
        assert_eq!(event.category(), EventCategory::Vaccination);
        assert!(event.is_upcoming(date));
        assert!(!event.is_upcoming(date.succ_opt().unwrap()));
    }
}
