use std::collections::HashMap;

use chrono::{DateTime, Utc};
use pkg_types::borrow::BorrowRecord;
use serde::Serialize;

use crate::status::{BorrowStatus, parse_instant, project};

/// One line of the overdue report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueEntry {
    pub record_id: i64,
    pub title: String,
    pub borrower: String,
    pub due_date: String,
    /// Whole days past the due date.
    pub days_overdue: i64,
}

/// Overdue records at `now`, most overdue first.
pub fn overdue_report(records: &[BorrowRecord], now: DateTime<Utc>) -> Vec<OverdueEntry> {
    let mut entries: Vec<OverdueEntry> = records
        .iter()
        .filter(|r| project(r, now) == BorrowStatus::Overdue)
        .filter_map(|r| {
            let raw_due = r.due_date.as_deref()?;
            let due = parse_instant(raw_due)?;
            Some(OverdueEntry {
                record_id: r.id,
                title: r.book_title().to_string(),
                borrower: r.borrower_name().to_string(),
                due_date: raw_due.to_string(),
                days_overdue: (now - due).num_days(),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.days_overdue
            .cmp(&a.days_overdue)
            .then(a.record_id.cmp(&b.record_id))
    });
    entries
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub name: String,
    pub count: usize,
}

/// Borrow counts per genre, highest first (ties by name), at most `limit`.
/// Records whose book has no genre are skipped.
pub fn popular_genres(records: &[BorrowRecord], limit: usize) -> Vec<GenreCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        let genre = record.genre_name();
        if genre.is_empty() {
            continue;
        }
        *counts.entry(genre).or_insert(0) += 1;
    }

    let mut genres: Vec<GenreCount> = counts
        .into_iter()
        .map(|(name, count)| GenreCount {
            name: name.to_string(),
            count,
        })
        .collect();
    genres.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    genres.truncate(limit);
    genres
}
