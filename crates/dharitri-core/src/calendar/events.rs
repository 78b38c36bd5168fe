//! Calendar event derivation.

use tracing::debug;

use super::{add_months, Derivation, DiagnosticKind, EventEngine};
use crate::models::{CattleRecord, DerivedEvent, EventKind, FieldValue, RecordField};

impl EventEngine {
    /// Derive calendar events for every record.
    ///
    /// Per record: a vaccination event at `next_vaccination`, and a past
    /// checkup at `last_checkup` together with a projected checkup
    /// `checkup_interval_months` later. Output is sorted by date, then kind,
    /// then cattle id.
    pub fn compute_events(&self, records: &[CattleRecord]) -> Derivation<DerivedEvent> {
        let mut out = Derivation::default();

        for record in records {
            self.derive_record_events(record, &mut out);
        }

        out.items.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.kind.cmp(&b.kind))
                .then_with(|| a.cattle_id.cmp(&b.cattle_id))
        });

        debug!(
            records = records.len(),
            events = out.items.len(),
            skipped = out.diagnostics.len(),
            "derived calendar events"
        );
        out
    }

    fn derive_record_events(&self, record: &CattleRecord, out: &mut Derivation<DerivedEvent>) {
        match record.next_vaccination_date() {
            FieldValue::Valid(date) => out.items.push(DerivedEvent::new(
                EventKind::VaccinationDue,
                date,
                &record.id,
                &record.name,
            )),
            FieldValue::Malformed(value) => out.report(
                record,
                RecordField::NextVaccination,
                DiagnosticKind::MalformedDate { value },
            ),
            FieldValue::Absent => {}
        }

        match record.last_checkup_date() {
            FieldValue::Valid(date) => {
                out.items.push(DerivedEvent::new(
                    EventKind::PastCheckup,
                    date,
                    &record.id,
                    &record.name,
                ));

                match add_months(date, self.config.checkup_interval_months) {
                    Some(next) => out.items.push(DerivedEvent::new(
                        EventKind::ProjectedNextCheckup,
                        next,
                        &record.id,
                        &record.name,
                    )),
                    None => out.report(
                        record,
                        RecordField::LastCheckup,
                        DiagnosticKind::DateOutOfRange {
                            value: date.to_string(),
                        },
                    ),
                }
            }
            FieldValue::Malformed(value) => out.report(
                record,
                RecordField::LastCheckup,
                DiagnosticKind::MalformedDate { value },
            ),
            FieldValue::Absent => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: &str, last_checkup: Option<&str>, next_vaccination: Option<&str>) -> CattleRecord {
        let mut record = CattleRecord::new(id, format!("Cow {}", id));
        record.last_checkup = last_checkup.map(Into::into);
        record.next_vaccination = next_vaccination.map(Into::into);
        record
    }

    #[test]
    fn test_record_without_dates_has_no_events() {
        let engine = EventEngine::default();
        let result = engine.compute_events(&[record("c1", None, None)]);
        assert!(result.items.is_empty());
        assert!(result.is_clean());
    }

    #[test]
    fn test_events_sorted_by_date() {
        let engine = EventEngine::default();
        let result = engine.compute_events(&[record("c1", Some("2023-12-15"), Some("2024-01-15"))]);

        let summary: Vec<_> = result.items.iter().map(|e| (e.kind, e.date)).collect();
        assert_eq!(
            summary,
            vec![
                (EventKind::PastCheckup, date(2023, 12, 15)),
                (EventKind::VaccinationDue, date(2024, 1, 15)),
                (EventKind::ProjectedNextCheckup, date(2024, 3, 15)),
            ]
        );
    }

    #[test]
    fn test_same_day_ties_break_on_kind_then_id() {
        let engine = EventEngine::default();
        let records = [
            record("b", None, Some("2024-05-01")),
            record("a", Some("2024-05-01"), None),
            record("c", None, Some("2024-05-01")),
        ];
        let ids: Vec<_> = engine
            .compute_events(&records)
            .items
            .into_iter()
            .filter(|e| e.date == date(2024, 5, 1))
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec!["check-a-last", "vac-b", "vac-c"]);
    }

    #[test]
    fn test_malformed_vaccination_keeps_checkups() {
        let engine = EventEngine::default();
        let result = engine.compute_events(&[record("c1", Some("2024-01-31"), Some("soon"))]);

        assert_eq!(result.items.len(), 2);
        assert_eq!(result.items[1].date, date(2024, 4, 30));
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].field, RecordField::NextVaccination);
        assert_eq!(
            result.diagnostics[0].kind,
            DiagnosticKind::MalformedDate {
                value: "soon".into()
            }
        );
    }

    #[test]
    fn test_custom_checkup_interval() {
        let engine = EventEngine::new(EngineConfig {
            checkup_interval_months: 6,
            ..EngineConfig::default()
        });
        let result = engine.compute_events(&[record("c1", Some("2024-08-31"), None)]);
        let projected = result
            .items
            .iter()
            .find(|e| e.kind == EventKind::ProjectedNextCheckup)
            .unwrap();
        assert_eq!(projected.date, date(2025, 2, 28));
        assert_eq!(projected.id, "check-c1-next");
    }
}
