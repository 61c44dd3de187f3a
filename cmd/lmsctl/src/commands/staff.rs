use clap::Subcommand;
use pkg_session::nav::Route;
use pkg_types::role::Role;
use pkg_types::search;
use pkg_types::staff::{StaffInput, StaffPatch};
use pkg_types::validate::validate_staff;

use crate::context::Ctx;
use crate::output::{OutputFormat, print_empty, print_json};

#[derive(Subcommand)]
pub enum StaffAction {
    /// List staff accounts
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Create a staff account
    Add {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// admin or librarian
        #[arg(long)]
        role: String,
        #[arg(long, env = "LMS_STAFF_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Change a staff account
    Update {
        id: i64,
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete a staff account
    Delete { id: i64 },
}

fn parse_role(raw: &str) -> anyhow::Result<Role> {
    match Role::parse(raw) {
        Role::Unknown => anyhow::bail!("unknown role '{}'; expected admin or librarian", raw),
        role => Ok(role),
    }
}

pub async fn run(ctx: &Ctx, action: &StaffAction) -> anyhow::Result<()> {
    let client = ctx.client_for(Route::Staff)?;

    match action {
        StaffAction::List { search } => {
            let staff = client.list_staff().await?;
            let shown = search::filter(&staff, search.as_deref());
            match ctx.output {
                OutputFormat::Json => print_json(&shown)?,
                OutputFormat::Table if shown.is_empty() => print_empty("staff"),
                OutputFormat::Table => {
                    println!("{:<6} {:<20} {:<32} {}", "ID", "USERNAME", "EMAIL", "ROLE");
                    for s in shown {
                        println!("{:<6} {:<20} {:<32} {}", s.id, s.username, s.email, s.role);
                    }
                }
            }
        }
        StaffAction::Add {
            username,
            email,
            role,
            password,
            confirm_password,
        } => {
            let input = StaffInput {
                username: username.trim().to_string(),
                email: email.trim().to_string(),
                password: password.clone(),
                role: Role::parse(role),
            };
            validate_staff(&input, confirm_password)?;
            let created = client.create_staff(&input).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&created)?,
                OutputFormat::Table => println!(
                    "Staff added: {} ({}, id {})",
                    created.username, created.role, created.id
                ),
            }
        }
        StaffAction::Update {
            id,
            username,
            email,
            role,
        } => {
            let patch = StaffPatch {
                username: username.clone(),
                email: email.clone(),
                role: role.as_deref().map(parse_role).transpose()?,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update; pass at least one field");
            }
            let updated = client.update_staff(*id, &patch).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&updated)?,
                OutputFormat::Table => println!("Staff {} updated", id),
            }
        }
        StaffAction::Delete { id } => {
            client.delete_staff(*id).await?;
            if ctx.output == OutputFormat::Table {
                println!("Staff {} deleted", id);
            }
        }
    }
    Ok(())
}
