use clap::Subcommand;
use pkg_session::nav::Route;
use pkg_types::book::{Book, BookInput, BookPatch};
use pkg_types::search;
use pkg_types::validate::validate_book;

use crate::context::Ctx;
use crate::output::{OutputFormat, clip, print_empty, print_json};

#[derive(Subcommand)]
pub enum BooksAction {
    /// List books, optionally filtered by title, author or genre
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Show one book
    Show { id: i64 },
    /// Add a book to the catalogue
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        year: i32,
        #[arg(long, default_value_t = 1)]
        copies: i64,
        /// Genre id (see `lmsctl genres list`)
        #[arg(long)]
        genre: i64,
    },
    /// Change fields of a book
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        copies: Option<i64>,
        #[arg(long)]
        genre: Option<i64>,
    },
    /// Remove a book
    Delete { id: i64 },
}

fn print_books(books: &[&Book]) {
    println!(
        "{:<6} {:<32} {:<24} {:<16} {:<6} {}",
        "ID", "TITLE", "AUTHOR", "GENRE", "YEAR", "AVAILABLE"
    );
    for book in books {
        println!(
            "{:<6} {:<32} {:<24} {:<16} {:<6} {}",
            book.id,
            clip(&book.title, 32),
            clip(&book.author, 24),
            clip(book.genre_name(), 16),
            book.published_year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "-".to_string()),
            book.available_copies
        );
    }
}

pub async fn run(ctx: &Ctx, action: &BooksAction) -> anyhow::Result<()> {
    let client = ctx.client_for(Route::Books)?;

    match action {
        BooksAction::List { search } => {
            let books = client.list_books().await?;
            let shown = search::filter(&books, search.as_deref());
            match ctx.output {
                OutputFormat::Json => print_json(&shown)?,
                OutputFormat::Table if shown.is_empty() => print_empty("books"),
                OutputFormat::Table => print_books(&shown),
            }
        }
        BooksAction::Show { id } => {
            let book = client.get_book(*id).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&book)?,
                OutputFormat::Table => print_books(&[&book]),
            }
        }
        BooksAction::Add {
            title,
            author,
            year,
            copies,
            genre,
        } => {
            let input = BookInput {
                title: title.trim().to_string(),
                author: author.trim().to_string(),
                published_year: *year,
                available_copies: *copies,
                genre_id: *genre,
            };
            validate_book(&input)?;
            let book = client.create_book(&input).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&book)?,
                OutputFormat::Table => println!("Book added: {} (id {})", book.title, book.id),
            }
        }
        BooksAction::Update {
            id,
            title,
            author,
            year,
            copies,
            genre,
        } => {
            let patch = BookPatch {
                title: title.clone(),
                author: author.clone(),
                published_year: *year,
                available_copies: *copies,
                genre_id: *genre,
            };
            if patch.is_empty() {
                anyhow::bail!("nothing to update; pass at least one field");
            }
            if patch.available_copies.is_some_and(|c| c < 0) {
                anyhow::bail!("available copies must not be negative");
            }
            let book = client.update_book(*id, &patch).await?;
            match ctx.output {
                OutputFormat::Json => print_json(&book)?,
                OutputFormat::Table => println!("Book {} updated", id),
            }
        }
        BooksAction::Delete { id } => {
            client.delete_book(*id).await?;
            if ctx.output == OutputFormat::Table {
                println!("Book {} deleted", id);
            }
        }
    }
    Ok(())
}
