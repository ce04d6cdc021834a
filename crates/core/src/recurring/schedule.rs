//! Schedule advancement for recurring entries.
//!
//! Monthly, quarterly and annual advancement is calendar-aware, not a
//! fixed day count: chrono's month arithmetic clamps to the last day of
//! shorter months (Jan 31 + 1 month = Feb 28/29).

use chrono::{Days, Months, NaiveDate};

use super::types::{Frequency, RecurringStatus};

/// Advances a run date by one period of the given frequency.
#[must_use]
pub fn advance_next_run(date: NaiveDate, frequency: Frequency) -> NaiveDate {
    match frequency {
        Frequency::Daily => date + Days::new(1),
        Frequency::Weekly => date + Days::new(7),
        Frequency::Monthly => date + Months::new(1),
        Frequency::Quarterly => date + Months::new(3),
        Frequency::Annually => date + Months::new(12),
    }
}

/// Returns true if an ACTIVE template is due to fire today.
///
/// A template is due when its next run date has arrived and its end date
/// (if any) has not passed. Expired templates are fenced here rather than
/// auto-paused; status remains untouched by firing.
#[must_use]
pub fn is_due(
    status: RecurringStatus,
    next_run_date: NaiveDate,
    end_date: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    if status != RecurringStatus::Active {
        return false;
    }
    if next_run_date > today {
        return false;
    }
    match end_date {
        Some(end) => end >= today,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(Frequency::Daily, date(2026, 2, 28), date(2026, 3, 1))]
    #[case(Frequency::Weekly, date(2026, 2, 25), date(2026, 3, 4))]
    #[case(Frequency::Monthly, date(2026, 1, 15), date(2026, 2, 15))]
    #[case(Frequency::Quarterly, date(2026, 1, 1), date(2026, 4, 1))]
    #[case(Frequency::Annually, date(2026, 6, 30), date(2027, 6, 30))]
    fn test_advance(#[case] frequency: Frequency, #[case] from: NaiveDate, #[case] to: NaiveDate) {
        assert_eq!(advance_next_run(from, frequency), to);
    }

    #[test]
    fn test_monthly_clamps_to_month_end() {
        assert_eq!(
            advance_next_run(date(2026, 1, 31), Frequency::Monthly),
            date(2026, 2, 28)
        );
        // Leap year keeps the 29th.
        assert_eq!(
            advance_next_run(date(2028, 1, 31), Frequency::Monthly),
            date(2028, 2, 29)
        );
    }

    #[test]
    fn test_quarterly_clamps() {
        assert_eq!(
            advance_next_run(date(2026, 11, 30), Frequency::Quarterly),
            date(2027, 2, 28)
        );
    }

    #[test]
    fn test_annual_leap_day_clamps() {
        assert_eq!(
            advance_next_run(date(2028, 2, 29), Frequency::Annually),
            date(2029, 2, 28)
        );
    }

    #[test]
    fn test_due_when_date_arrived() {
        let today = date(2026, 3, 1);
        assert!(is_due(RecurringStatus::Active, today, None, today));
        assert!(is_due(
            RecurringStatus::Active,
            date(2026, 2, 1),
            None,
            today
        ));
        assert!(!is_due(
            RecurringStatus::Active,
            date(2026, 3, 2),
            None,
            today
        ));
    }

    #[test]
    fn test_paused_never_due() {
        let today = date(2026, 3, 1);
        assert!(!is_due(RecurringStatus::Paused, today, None, today));
    }

    #[test]
    fn test_end_date_fences_firing() {
        let today = date(2026, 3, 1);
        assert!(is_due(
            RecurringStatus::Active,
            today,
            Some(date(2026, 3, 1)),
            today
        ));
        assert!(!is_due(
            RecurringStatus::Active,
            today,
            Some(date(2026, 2, 28)),
            today
        ));
    }
}
