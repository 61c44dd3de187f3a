use chrono::Utc;
use clap::Subcommand;
use futures_util::future::try_join_all;
use pkg_circulation::{member_active_borrows, project};
use pkg_client::ApiError;
use pkg_session::nav::Route;
use pkg_types::member::{Member, MemberInput, MemberPatch};
use pkg_types::search;
use pkg_types::validate::validate_member_name;
use serde::Serialize;

use crate::commands::borrow::{BorrowRow, print_records};
use crate::context::Ctx;
use crate::output::{OutputFormat, clip, or_dash, print_empty, print_json};

#[derive(Subcommand)]
pub enum MembersAction {
    /// List members with their active borrow counts
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Register a member
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
    },
    /// Change a member's contact details
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Remove a member
    Delete { id: i64 },
    /// Show a member's borrowing history
    History { id: i64 },
}

#[derive(Serialize)]
struct MemberRow<'a> {
    #[serde(flatten)]
    member: &'a Member,
    active_borrows: usize,
}

pub async fn run(ctx: &Ctx, action: &MembersAction) -> anyhow::Result<()> {
    let client = ctx.client_for(Route::Members)?;

    match action {
        MembersAction::List { search } => {
            let members = client.list_members().await?;
            let shown = search::filter(&members, search.as_deref());

            let histories = try_join_all(shown.iter().map(|m| client.borrowing_history(m.id))).await?;
            let now = Utc::now();
            let rows: Vec<MemberRow> = shown
                .iter()
                .zip(histories.iter())
                .map(|(member, history)| MemberRow {
                    member,
                    active_borrows: member_active_borrows(history, now),
                })
                .collect();

            match ctx.output {
                OutputFormat::Json => print_json(&rows)?,
                OutputFormat::Table if rows.is_empty() => print_empty("members"),
                OutputFormat::Table => {
                    println!(
                        "{:<6} {:<24} {:<28} {:<16} {:<12} {}",
                        "ID", "NAME", "EMAIL", "PHONE", "JOINED", "ACTIVE"
                    );
                    for row in &rows {
                        let joined = row
                            .member
                            .join_date
                            .as_deref()
                            .map(|d| d.get(..10).unwrap_or(d));
                        println!(
                            "{:<6} {:<24} {:<28} {:<16} {:<12} {}",
                            row.member.id,
                            clip(&row.member.name, 24),
                            clip(or_dash(Some(row.member.email.as_str())), 28),
                            or_dash(Some(row.member.phone.as_str())),
                            or_dash(joined),
                            row.active_borrows
                        );
                    }
                }
            }
        }
        MembersAction::Add { name, email, phone } => {
            validate_member_name(name)?;
            let input = MemberInput::new(
                name.trim().to_string(),
                email.trim().to_string(),
                phone.trim().to_string(),
                Utc::now(),
            );
            let member = client.create_member(&input).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&member)?,
                OutputFormat::Table => println!("Member added: {} (id {})", member.name, member.id),
            }
        }
        MembersAction::Update {
            id,
            name,
            email,
            phone,
        } => {
            if let Some(name) = name {
                validate_member_name(name)?;
            }
            let patch = MemberPatch {
                name: name.clone(),
                email: email.clone(),
                phone: phone.clone(),
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update; pass at least one field");
            }
            let member = client.update_member(*id, &patch).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&member)?,
                OutputFormat::Table => println!("Member {} updated", id),
            }
        }
        MembersAction::Delete { id } => match client.delete_member(*id).await {
            Ok(()) => {
                if ctx.output == OutputFormat::Table {
                    println!("Member {} deleted", id);
                }
            }
            Err(e @ ApiError::Validation { .. }) => {
                return Err(anyhow::Error::new(e).context(format!(
                    "unable to delete member {}; they may have related borrow records",
                    id
                )));
            }
            Err(e) => return Err(e.into()),
        },
        MembersAction::History { id } => {
            let history = client.borrowing_history(*id).await?;
            let now = Utc::now();
            let rows: Vec<BorrowRow> = history
                .iter()
                .map(|record| BorrowRow {
                    record,
                    status: project(record, now),
                })
                .collect();
            match ctx.output {
                OutputFormat::Json => print_json(&rows)?,
                OutputFormat::Table if rows.is_empty() => print_empty("borrow records"),
                OutputFormat::Table => print_records(&rows),
            }
        }
    }
    Ok(())
}
