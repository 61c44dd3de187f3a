use clap::Subcommand;
use pkg_session::nav::Route;
use pkg_types::search;
use pkg_types::validate::validate_genre_name;

use crate::context::Ctx;
use crate::output::{OutputFormat, print_empty, print_json};

#[derive(Subcommand)]
pub enum GenresAction {
    /// List genres
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Create a genre
    Add { name: String },
    /// Rename a genre
    Rename { id: i64, name: String },
    /// Delete a genre
    Delete { id: i64 },
}

pub async fn run(ctx: &Ctx, action: &GenresAction) -> anyhow::Result<()> {
    let client = ctx.client_for(Route::Genres)?;

    match action {
        GenresAction::List { search } => {
            let genres = client.list_genres().await?;
            let shown = search::filter(&genres, search.as_deref());
            match ctx.output {
                OutputFormat::Json => print_json(&shown)?,
                OutputFormat::Table if shown.is_empty() => print_empty("genres"),
                OutputFormat::Table => {
                    println!("{:<6} {}", "ID", "NAME");
                    for genre in shown {
                        println!("{:<6} {}", genre.id, genre.name);
                    }
                }
            }
        }
        GenresAction::Add { name } => {
            validate_genre_name(name)?;
            let genre = client.create_genre(name).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&genre)?,
                OutputFormat::Table => println!("Genre added: {} (id {})", genre.name, genre.id),
            }
        }
        GenresAction::Rename { id, name } => {
            validate_genre_name(name)?;
            let genre = client.rename_genre(*id, name).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&genre)?,
                OutputFormat::Table => println!("Genre {} renamed to {}", id, genre.name),
            }
        }
        GenresAction::Delete { id } => {
            client.delete_genre(*id).await?;
            if ctx.output == OutputFormat::Table {
                println!("Genre {} deleted", id);
            }
        }
    }
    Ok(())
}
