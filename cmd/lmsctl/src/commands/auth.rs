use pkg_session::nav::{self, landing_route};
use serde::Serialize;
use tracing::info;

use crate::context::Ctx;
use crate::output::{OutputFormat, print_json};

pub async fn login(ctx: &Ctx, email: &str, password: &str) -> anyhow::Result<()> {
    let client = ctx.anonymous_client()?;
    let session = ctx.resolver.sign_in(&client, email, password).await?;
    let landing = landing_route(session.role);

    match ctx.output {
        OutputFormat::Json => print_json(&session)?,
        OutputFormat::Table => {
            let name = session
                .user
                .as_ref()
                .map(|u| u.username.as_str())
                .filter(|n| !n.is_empty())
                .unwrap_or(email);
            println!("Signed in as {} ({})", name, session.role);
            println!("Start at:  {} ({})", landing.label(), landing.path());
        }
    }
    Ok(())
}

pub fn logout(ctx: &Ctx) -> anyhow::Result<()> {
    ctx.resolver.sign_out();
    if ctx.output == OutputFormat::Table {
        println!("Signed out");
    }
    Ok(())
}

pub async fn whoami(ctx: &Ctx, remote: bool) -> anyhow::Result<()> {
    let session = ctx.session();
    if !session.authenticated {
        match ctx.output {
            OutputFormat::Json => print_json(&session)?,
            OutputFormat::Table => println!("Not signed in"),
        }
        return Ok(());
    }

    let profile = if remote {
        info!("Fetching profile from {}", ctx.server);
        let client = ctx.client_for(landing_route(session.role))?;
        Some(client.me().await?)
    } else {
        None
    };

    match ctx.output {
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct WhoAmI<'a> {
                server: &'a str,
                #[serde(flatten)]
                session: &'a pkg_session::Session,
                profile: Option<&'a pkg_types::auth::AuthUser>,
            }
            print_json(&WhoAmI {
                server: &ctx.server,
                session: &session,
                profile: profile.as_ref(),
            })?;
        }
        OutputFormat::Table => {
            println!("Server:    {}", ctx.server);
            println!("Role:      {}", session.role);
            if let Some(user) = &profile {
                println!("User:      {} (id {})", user.username, user.id);
                println!("Email:     {}", user.email);
            }
        }
    }
    Ok(())
}

pub fn show_nav(ctx: &Ctx) -> anyhow::Result<()> {
    let session = ctx.session();
    let entries = nav::visible_entries(&session);

    match ctx.output {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Table => {
            if !session.authenticated {
                println!("Not signed in; only {} is available", nav::SIGN_IN_PATH);
                return Ok(());
            }
            println!("{:<16} {}", "SCREEN", "PATH");
            for entry in entries {
                println!("{:<16} {}", entry.label, entry.path);
            }
        }
    }
    Ok(())
}
