use chrono::{DateTime, Datelike, Utc};
use pkg_constants::circulation::SECONDS_PER_DAY;
use pkg_types::borrow::BorrowRecord;
use serde::Serialize;

use crate::status::{BorrowStatus, parse_instant, project};

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_books: usize,
    pub total_members: usize,
    pub active_borrows: usize,
    pub overdue_borrows: usize,
}

impl DashboardStats {
    pub fn compute(
        total_books: usize,
        total_members: usize,
        records: &[BorrowRecord],
        now: DateTime<Utc>,
    ) -> Self {
        let summary = CirculationSummary::from_records(records, now);
        Self {
            total_books,
            total_members,
            active_borrows: summary.active,
            overdue_borrows: summary.overdue,
        }
    }
}

/// Aggregate view over a set of borrow records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CirculationSummary {
    pub total: usize,
    pub active: usize,
    pub overdue: usize,
    pub returned: usize,
    /// Fraction of records that have been returned, `0.0` for no records.
    pub return_rate: f64,
    /// Mean days between borrow and return, over returned records whose
    /// dates both parse. `None` when there are no such records.
    pub avg_borrow_duration_days: Option<f64>,
    /// Records borrowed in the calendar month of `now`.
    pub borrowed_this_month: usize,
}

impl CirculationSummary {
    pub fn from_records(records: &[BorrowRecord], now: DateTime<Utc>) -> Self {
        let mut summary = CirculationSummary {
            total: records.len(),
            ..Default::default()
        };

        let mut duration_sum = 0.0;
        let mut duration_count = 0usize;

        for record in records {
            match project(record, now) {
                BorrowStatus::Active => summary.active += 1,
                BorrowStatus::Overdue => summary.overdue += 1,
                BorrowStatus::Returned => {
                    summary.returned += 1;
                    if let Some(days) = borrow_duration_days(record) {
                        duration_sum += days;
                        duration_count += 1;
                    }
                }
            }
        }

        if summary.total > 0 {
            summary.return_rate = summary.returned as f64 / summary.total as f64;
        }
        if duration_count > 0 {
            summary.avg_borrow_duration_days = Some(duration_sum / duration_count as f64);
        }
        summary.borrowed_this_month = borrowed_in_month(records, now);
        summary
    }
}

fn borrow_duration_days(record: &BorrowRecord) -> Option<f64> {
    let start = record.borrow_date.as_deref().and_then(parse_instant)?;
    let end = record.return_date.as_deref().and_then(parse_instant)?;
    Some((end - start).num_seconds() as f64 / SECONDS_PER_DAY)
}

/// Count records whose borrow date falls in the same month and year as `now`.
pub fn borrowed_in_month(records: &[BorrowRecord], now: DateTime<Utc>) -> usize {
    records
        .iter()
        .filter_map(|r| r.borrow_date.as_deref().and_then(parse_instant))
        .filter(|d| d.year() == now.year() && d.month() == now.month())
        .count()
}

/// Active borrows in one member's history. Overdue loans are counted
/// separately by the projector and are not included here.
pub fn member_active_borrows(history: &[BorrowRecord], now: DateTime<Utc>) -> usize {
    history
        .iter()
        .filter(|r| project(r, now) == BorrowStatus::Active)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(id: i64, borrowed: &str, due: &str, returned: Option<&str>) -> BorrowRecord {
        BorrowRecord {
            id,
            book: None,
            member: None,
            borrow_date: Some(borrowed.to_string()),
            due_date: Some(due.to_string()),
            return_date: returned.map(str::to_string),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 0, 0).unwrap()
    }

    fn sample() -> Vec<BorrowRecord> {
        vec![
            // returned after 4 days
            record(1, "2024-05-01", "2024-05-15", Some("2024-05-05")),
            // returned after 10 days
            record(2, "2024-05-10", "2024-05-24", Some("2024-05-20")),
            // overdue
            record(3, "2024-05-20", "2024-06-03", None),
            // active, borrowed this month
            record(4, "2024-06-05", "2024-06-19", None),
        ]
    }

    #[test]
    fn test_summary_counts_via_projector() {
        let summary = CirculationSummary::from_records(&sample(), now());
        assert_eq!(summary.total, 4);
        assert_eq!(summary.active, 1);
        assert_eq!(summary.overdue, 1);
        assert_eq!(summary.returned, 2);
        assert!((summary.return_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(summary.avg_borrow_duration_days, Some(7.0));
        assert_eq!(summary.borrowed_this_month, 1);
    }

    #[test]
    fn test_empty_summary() {
        let summary = CirculationSummary::from_records(&[], now());
        assert_eq!(summary.total, 0);
        assert_eq!(summary.return_rate, 0.0);
        assert_eq!(summary.avg_borrow_duration_days, None);
    }

    #[test]
    fn test_unparseable_dates_skip_duration() {
        let records = vec![record(1, "sometime", "2024-05-15", Some("2024-05-05"))];
        let summary = CirculationSummary::from_records(&records, now());
        assert_eq!(summary.returned, 1);
        assert_eq!(summary.avg_borrow_duration_days, None);
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = DashboardStats::compute(12, 5, &sample(), now());
        assert_eq!(
            stats,
            DashboardStats {
                total_books: 12,
                total_members: 5,
                active_borrows: 1,
                overdue_borrows: 1,
            }
        );
    }

    #[test]
    fn test_member_active_borrows_excludes_overdue_and_returned() {
        assert_eq!(member_active_borrows(&sample(), now()), 1);
    }
}
