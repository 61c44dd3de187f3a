use chrono::{Duration, Utc};
use clap::Subcommand;
use pkg_circulation::{BorrowStatus, project};
use pkg_constants::circulation::DEFAULT_LOAN_DAYS;
use pkg_session::nav::Route;
use pkg_types::borrow::{BorrowRecord, BorrowRequest};
use pkg_types::validate::validate_borrow;
use serde::Serialize;

use crate::context::Ctx;
use crate::output::{OutputFormat, clip, or_dash, print_empty, print_json};

#[derive(Subcommand)]
pub enum BorrowAction {
    /// List borrow records with their current status
    List {
        /// Only records in this state (active, overdue, returned)
        #[arg(long)]
        status: Option<BorrowStatus>,
        /// Only records that can still be returned
        #[arg(long, conflicts_with = "status")]
        returnable: bool,
    },
    /// Lend a book to a member
    Create {
        #[arg(long)]
        book: i64,
        #[arg(long)]
        member: i64,
        /// Due date (YYYY-MM-DD); defaults to 14 days from today
        #[arg(long)]
        due: Option<String>,
    },
    /// Mark a borrow record as returned
    Return { id: i64 },
}

/// A record with its status at display time.
#[derive(Debug, Serialize)]
pub struct BorrowRow<'a> {
    #[serde(flatten)]
    pub record: &'a BorrowRecord,
    pub status: BorrowStatus,
}

pub fn print_records(rows: &[BorrowRow]) {
    println!(
        "{:<6} {:<28} {:<20} {:<12} {:<12} {:<12} {}",
        "ID", "BOOK", "BORROWER", "BORROWED", "DUE", "RETURNED", "STATUS"
    );
    for row in rows {
        let r = row.record;
        println!(
            "{:<6} {:<28} {:<20} {:<12} {:<12} {:<12} {}",
            r.id,
            clip(or_dash(Some(r.book_title())), 28),
            clip(or_dash(Some(r.borrower_name())), 20),
            short_date(r.borrow_date.as_deref()),
            short_date(r.due_date.as_deref()),
            short_date(r.return_date.as_deref()),
            row.status
        );
    }
}

fn short_date(raw: Option<&str>) -> &str {
    or_dash(raw.map(|d| d.get(..10).unwrap_or(d)))
}

pub fn default_due_date() -> String {
    (Utc::now() + Duration::days(DEFAULT_LOAN_DAYS))
        .format("%Y-%m-%d")
        .to_string()
}

pub async fn run(ctx: &Ctx, action: &BorrowAction) -> anyhow::Result<()> {
    let client = ctx.client_for(Route::BorrowReturn)?;

    match action {
        BorrowAction::List { status, returnable } => {
            let records = client.list_borrow_records().await?;
            let now = Utc::now();
            let rows: Vec<BorrowRow> = records
                .iter()
                .map(|record| BorrowRow {
                    record,
                    status: project(record, now),
                })
                .filter(|row| match status {
                    Some(wanted) => row.status == *wanted,
                    None => !*returnable || row.status.is_returnable(),
                })
                .collect();

            match ctx.output {
                OutputFormat::Json => print_json(&rows)?,
                OutputFormat::Table if rows.is_empty() => print_empty("borrow records"),
                OutputFormat::Table => print_records(&rows),
            }
        }
        BorrowAction::Create { book, member, due } => {
            let req = BorrowRequest {
                book_id: *book,
                member_id: *member,
                due_date: due.clone().unwrap_or_else(default_due_date),
            };
            validate_borrow(&req)?;
            let record = client.borrow_book(&req).await?;
            let row = BorrowRow {
                status: project(&record, Utc::now()),
                record: &record,
            };
            match ctx.output {
                OutputFormat::Json => print_json(&row)?,
                OutputFormat::Table => {
                    println!("Book borrowed (record {}), due {}", record.id, req.due_date);
                }
            }
        }
        BorrowAction::Return { id } => {
            let record = client.return_book(*id).await?;
            let row = BorrowRow {
                status: project(&record, Utc::now()),
                record: &record,
            };
            match ctx.output {
                OutputFormat::Json => print_json(&row)?,
                OutputFormat::Table => println!(
                    "Book returned (record {}) on {}",
                    record.id,
                    short_date(record.return_date.as_deref())
                ),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkg_types::validate::parse_due_date;

    #[test]
    fn default_due_date_is_two_weeks_out() {
        let due = parse_due_date(&default_due_date()).unwrap();
        let today = Utc::now().date_naive();
        assert_eq!((due - today).num_days(), DEFAULT_LOAN_DAYS);
    }

    #[test]
    fn short_date_trims_timestamps() {
        assert_eq!(short_date(Some("2024-06-01T10:00:00Z")), "2024-06-01");
        assert_eq!(short_date(Some("2024-06-01")), "2024-06-01");
        assert_eq!(short_date(None), "-");
    }
}
