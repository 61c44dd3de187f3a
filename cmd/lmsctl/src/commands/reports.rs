use chrono::Utc;
use pkg_circulation::{CirculationSummary, overdue_report, popular_genres};
use pkg_constants::circulation::POPULAR_GENRE_LIMIT;
use pkg_session::nav::Route;
use serde::Serialize;
use tracing::info;

use crate::context::Ctx;
use crate::output::{OutputFormat, clip, print_json};

pub async fn dashboard(ctx: &Ctx) -> anyhow::Result<()> {
    let client = ctx.client_for(Route::Dashboard)?;
    info!("Querying dashboard stats from {}", ctx.server);
    let stats = client.dashboard(Utc::now()).await?;

    match ctx.output {
        OutputFormat::Json => print_json(&stats)?,
        OutputFormat::Table => {
            println!("Total Books:       {}", stats.total_books);
            println!("Total Members:     {}", stats.total_members);
            println!("Active Borrows:    {}", stats.active_borrows);
            println!("Overdue Borrows:   {}", stats.overdue_borrows);
        }
    }
    Ok(())
}

pub async fn reports(ctx: &Ctx) -> anyhow::Result<()> {
    let client = ctx.client_for(Route::Reports)?;
    let records = client.list_borrow_records().await?;
    let now = Utc::now();

    let summary = CirculationSummary::from_records(&records, now);
    let overdue = overdue_report(&records, now);
    let genres = popular_genres(&records, POPULAR_GENRE_LIMIT);

    match ctx.output {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct Report<'a> {
                summary: &'a CirculationSummary,
                overdue: &'a [pkg_circulation::OverdueEntry],
                popular_genres: &'a [pkg_circulation::GenreCount],
            }
            print_json(&Report {
                summary: &summary,
                overdue: &overdue,
                popular_genres: &genres,
            })?;
        }
        OutputFormat::Table => {
            println!("Overdue Books");
            if overdue.is_empty() {
                println!("  (none)");
            }
            for entry in &overdue {
                println!(
                    "  {:<28} {:<20} due {}  [{} days overdue]",
                    clip(&entry.title, 28),
                    clip(&entry.borrower, 20),
                    entry.due_date,
                    entry.days_overdue
                );
            }

            println!();
            println!("Popular Genres");
            if genres.is_empty() {
                println!("  (none)");
            }
            for genre in &genres {
                println!("  {:<20} {} borrows", genre.name, genre.count);
            }

            println!();
            println!("Monthly Stats");
            println!("  Borrowed this month:   {}", summary.borrowed_this_month);
            match summary.avg_borrow_duration_days {
                Some(days) => println!("  Avg borrow duration:   {:.1} days", days),
                None => println!("  Avg borrow duration:   -"),
            }
            println!("  Return rate:           {:.1}%", summary.return_rate * 100.0);
            println!(
                "  Active / overdue:      {} / {}",
                summary.active, summary.overdue
            );
        }
    }
    Ok(())
}
