//! Calendar arithmetic.

use chrono::{Months, NaiveDate};

/// Add whole calendar months, clamping the day to the target month's length
/// (`2024-01-31` + 3 months = `2024-04-30`). `None` on overflow.
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Whole days from `today` until `target`; negative when `target` has passed.
pub fn days_until(target: NaiveDate, today: NaiveDate) -> i64 {
    target.signed_duration_since(today).num_days()
}
