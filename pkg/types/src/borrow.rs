use serde::{Deserialize, Serialize};

use crate::book::Book;

/// Member as embedded in a borrow record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
}

/// A borrow transaction as returned by `/borrow-records`.
///
/// Dates are kept as the strings the backend sent. Any of them may be
/// missing; status is derived from them on demand and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowRecord {
    pub id: i64,
    #[serde(default)]
    pub book: Option<Book>,
    #[serde(default)]
    pub member: Option<MemberRef>,
    #[serde(default)]
    pub borrow_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
    #[serde(default)]
    pub return_date: Option<String>,
}

impl BorrowRecord {
    pub fn borrower_name(&self) -> &str {
        self.member.as_ref().map(|m| m.name.as_str()).unwrap_or("")
    }

    pub fn book_title(&self) -> &str {
        self.book.as_ref().map(|b| b.title.as_str()).unwrap_or("")
    }

    pub fn genre_name(&self) -> &str {
        self.book.as_ref().map(|b| b.genre_name()).unwrap_or("")
    }

    /// True when the backend has stamped a (non-blank) return date.
    pub fn is_returned(&self) -> bool {
        self.return_date
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

// --- Borrow / return payloads ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowRequest {
    pub book_id: i64,
    pub member_id: i64,
    /// `YYYY-MM-DD`
    pub due_date: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReturnRequest {
    pub borrow_record_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_status_field_is_ignored() {
        let record: BorrowRecord = serde_json::from_str(
            r#"{"id":7,"due_date":"2024-01-01","return_date":null,"status":"ACTIVE",
                "member":{"id":2,"name":"Ada"}}"#,
        )
        .unwrap();
        assert_eq!(record.borrower_name(), "Ada");
        assert!(!record.is_returned());
        assert_eq!(record.book_title(), "");
    }

    #[test]
    fn blank_return_date_is_not_a_return() {
        let mut record: BorrowRecord = serde_json::from_str(r#"{"id":1}"#).unwrap();
        record.return_date = Some("  ".to_string());
        assert!(!record.is_returned());
        record.return_date = Some("2024-05-20".to_string());
        assert!(record.is_returned());
    }
}
