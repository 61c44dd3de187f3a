//! Borrow lifecycle derivation.
//!
//! A borrow record's status is never stored: it is recomputed from
//! `(due_date, return_date, now)` every time records are listed, counted or
//! reported on. Everything in this crate goes through [`project`].

mod report;
mod stats;
mod status;

pub use report::{GenreCount, OverdueEntry, overdue_report, popular_genres};
pub use stats::{CirculationSummary, DashboardStats, borrowed_in_month, member_active_borrows};
pub use status::{BorrowStatus, classify, parse_instant, project};
