//! Notification alert derivation.

use chrono::NaiveDate;
use tracing::debug;

use super::{days_until, Derivation, DiagnosticKind, EventEngine};
use crate::models::{Alert, CattleRecord, FieldValue, HealthStatus, RecordField};

impl EventEngine {
    /// Derive alerts for every record as of `today`.
    ///
    /// - vaccination upcoming when `0 <= days_until <= vaccination_window_days`
    ///   (past-due vaccinations raise nothing)
    /// - health concern when the status is exactly `Sick`
    /// - low production when the parsed figure is below the threshold;
    ///   unparseable figures never count as low
    ///
    /// Output is sorted by severity, then cattle name, then cattle id.
    pub fn compute_alerts(&self, records: &[CattleRecord], today: NaiveDate) -> Derivation<Alert> {
        let mut out = Derivation::default();

        for record in records {
            self.vaccination_alert(record, today, &mut out);

            if record.health_status == HealthStatus::Sick {
                out.items
                    .push(Alert::health_concern(&record.id, &record.name, today));
            }

            self.production_alert(record, today, &mut out);
        }

        out.items.sort_by(|a, b| {
            a.kind
                .cmp(&b.kind)
                .then_with(|| a.cattle_name.cmp(&b.cattle_name))
                .then_with(|| a.cattle_id.cmp(&b.cattle_id))
        });

        debug!(
            records = records.len(),
            alerts = out.items.len(),
            skipped = out.diagnostics.len(),
            %today,
            "derived alerts"
        );
        out
    }

    fn vaccination_alert(&self, record: &CattleRecord, today: NaiveDate, out: &mut Derivation<Alert>) {
        match record.next_vaccination_date() {
            FieldValue::Valid(date) => {
                let days = days_until(date, today);
                if (0..=self.config.vaccination_window_days).contains(&days) {
                    out.items.push(Alert::vaccination_upcoming(
                        &record.id,
                        &record.name,
                        days,
                        today,
                    ));
                }
            }
            FieldValue::Malformed(value) => out.report(
                record,
                RecordField::NextVaccination,
                DiagnosticKind::MalformedDate { value },
            ),
            FieldValue::Absent => {}
        }
    }

    fn production_alert(&self, record: &CattleRecord, today: NaiveDate, out: &mut Derivation<Alert>) {
        match record.milk_production_litres() {
            FieldValue::Valid(litres) => {
                if litres < self.config.low_production_threshold {
                    out.items
                        .push(Alert::low_production(&record.id, &record.name, litres, today));
                }
            }
            FieldValue::Malformed(value) => out.report(
                record,
                RecordField::MilkProduction,
                DiagnosticKind::MalformedNumber { value },
            ),
            FieldValue::Absent => {}
        }
    }
}
