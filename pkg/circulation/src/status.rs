use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use pkg_types::borrow::BorrowRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BorrowStatus {
    Active,
    Returned,
    Overdue,
}

impl BorrowStatus {
    /// Only books still out can be returned.
    pub fn is_returnable(&self) -> bool {
        matches!(self, BorrowStatus::Active | BorrowStatus::Overdue)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BorrowStatus::Active => "ACTIVE",
            BorrowStatus::Returned => "RETURNED",
            BorrowStatus::Overdue => "OVERDUE",
        }
    }
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BorrowStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ACTIVE" => Ok(BorrowStatus::Active),
            "RETURNED" => Ok(BorrowStatus::Returned),
            "OVERDUE" => Ok(BorrowStatus::Overdue),
            other => Err(format!(
                "unknown borrow status '{}' (expected active, returned or overdue)",
                other
            )),
        }
    }
}

/// Parse a backend date into an instant.
///
/// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS[.fff]` (taken as UTC)
/// and a bare `YYYY-MM-DD` (UTC midnight). Returns `None` for anything else.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Derive the lifecycle state of a borrow record at `now`.
///
/// Total over all inputs:
/// 1. a return date makes the record `Returned`, whatever the due date;
/// 2. otherwise a due date strictly before `now` makes it `Overdue`;
/// 3. otherwise it is `Active`. A missing or unparseable due date lands here.
pub fn project(record: &BorrowRecord, now: DateTime<Utc>) -> BorrowStatus {
    if record.is_returned() {
        return BorrowStatus::Returned;
    }
    match record.due_date.as_deref().and_then(parse_instant) {
        Some(due) if due < now => BorrowStatus::Overdue,
        _ => BorrowStatus::Active,
    }
}

/// Pair every record with its status at `now`, preserving order.
pub fn classify(records: &[BorrowRecord], now: DateTime<Utc>) -> Vec<(&BorrowRecord, BorrowStatus)> {
    records.iter().map(|r| (r, project(r, now))).collect()
}
