use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pkg_client::ApiError;
use pkg_session::SessionError;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod context;
mod output;

use commands::books::BooksAction;
use commands::borrow::BorrowAction;
use commands::genres::GenresAction;
use commands::members::MembersAction;
use commands::staff::StaffAction;
use context::Ctx;
use output::OutputFormat;

#[derive(Parser)]
#[command(name = "lmsctl", about = "CLI for library management", version)]
struct Cli {
    /// Library API endpoint (overrides the config file)
    #[arg(long, env = "LMS_SERVER")]
    server: Option<String>,

    /// Path to YAML config file [default: ~/.lms/config.yaml]
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Where the session token is kept [default: ~/.lms/credentials.json]
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Table, global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LMS_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the current session
    Whoami {
        /// Also fetch the profile from the server
        #[arg(long)]
        remote: bool,
    },
    /// List the screens available to the current role
    Nav,
    /// Library overview
    Dashboard,
    /// Overdue books, popular genres and monthly stats
    Reports,
    /// Manage books
    Books {
        #[command(subcommand)]
        action: BooksAction,
    },
    /// Manage genres
    Genres {
        #[command(subcommand)]
        action: GenresAction,
    },
    /// Manage members
    Members {
        #[command(subcommand)]
        action: MembersAction,
    },
    /// Manage staff accounts
    Staff {
        #[command(subcommand)]
        action: StaffAction,
    },
    /// Borrow and return books
    Borrow {
        #[command(subcommand)]
        action: BorrowAction,
    },
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.unwrap_or_else(config::default_config_path);
    let settings = config::load_settings(&config_path, cli.server, cli.credentials)?;
    let ctx = Ctx::new(settings, cli.output);

    match &cli.command {
        Commands::Login { email, password } => commands::auth::login(&ctx, email, password).await,
        Commands::Logout => commands::auth::logout(&ctx),
        Commands::Whoami { remote } => commands::auth::whoami(&ctx, *remote).await,
        Commands::Nav => commands::auth::show_nav(&ctx),
        Commands::Dashboard => commands::reports::dashboard(&ctx).await,
        Commands::Reports => commands::reports::reports(&ctx).await,
        Commands::Books { action } => commands::books::run(&ctx, action).await,
        Commands::Genres { action } => commands::genres::run(&ctx, action).await,
        Commands::Members { action } => commands::members::run(&ctx, action).await,
        Commands::Staff { action } => commands::staff::run(&ctx, action).await,
        Commands::Borrow { action } => commands::borrow::run(&ctx, action).await,
    }
}

fn is_auth_failure(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(cause.downcast_ref::<ApiError>(), Some(ApiError::Authentication))
            || matches!(
                cause.downcast_ref::<SessionError>(),
                Some(SessionError::Api(ApiError::Authentication))
            )
    })
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let signing_in = matches!(cli.command, Commands::Login { .. });

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        if is_auth_failure(&e) && !signing_in {
            eprintln!("Your session may have expired; run `lmsctl login` again.");
        }
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_borrow_status_filter() {
        let cli = Cli::parse_from(["lmsctl", "borrow", "list", "--status", "overdue"]);
        match cli.command {
            Commands::Borrow {
                action: BorrowAction::List { status, returnable },
            } => {
                assert_eq!(status, Some(pkg_circulation::BorrowStatus::Overdue));
                assert!(!returnable);
            }
            _ => panic!("expected borrow list"),
        }
    }

    #[test]
    fn auth_failures_are_recognised_through_context() {
        let err = anyhow::Error::new(ApiError::Authentication).context("listing books");
        assert!(is_auth_failure(&err));
        let err = anyhow::Error::new(SessionError::Api(ApiError::Authentication));
        assert!(is_auth_failure(&err));
        assert!(!is_auth_failure(&anyhow::anyhow!("disk full")));
    }
}
