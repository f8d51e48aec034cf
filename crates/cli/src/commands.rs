// FILE: crates/cli/src/commands.rs

use anyhow::{Context, Result};
use bookcaster_config::{Config, ConfigManager};
use bookcaster_feed::{BaseUrlGenerator, FeedBuilder};
use bookcaster_library::{BookKind, LibraryScanner, ScannerConfig};
use bookcaster_server::human_filesize;
use console::style;

fn scanner(config: &Config) -> LibraryScanner {
    LibraryScanner::with_config(ScannerConfig::from(&config.library))
}

/// List all authors in the library
pub fn list_authors(config: &Config) -> Result<()> {
    let authors = scanner(config)
        .list_authors()
        .with_context(|| format!("Failed to read library at {}", config.library.root.display()))?;

    if authors.is_empty() {
        println!("No authors found in {}", config.library.root.display());
        return Ok(());
    }

    println!("\n{} Authors", style(authors.len()).bold().cyan());
    println!("{}", "=".repeat(80));
    for author in authors {
        println!("{}", author.name);
    }

    Ok(())
}

/// List the books of an author
pub fn list_books(config: &Config, author: &str) -> Result<()> {
    let books = scanner(config)
        .list_books(author)
        .with_context(|| format!("Failed to list books of {}", author))?;

    println!("\n{} Books by {}", style(books.len()).bold().cyan(), style(author).bold());
    println!("{}", "=".repeat(80));
    for book in books {
        match book.kind {
            BookKind::Directory => println!("{}", book.name),
            BookKind::File => println!("{} {}", book.name, style("(single file)").dim()),
        }
    }

    Ok(())
}

/// List the tracks of a book with their sizes
pub fn list_files(config: &Config, author: &str, book: &str) -> Result<()> {
    let tracks = scanner(config)
        .list_files(author, book)
        .with_context(|| format!("Failed to list files of {}/{}", author, book))?;

    println!("\n{} Files in {} - {}", style(tracks.len()).bold().cyan(), author, book);
    println!("{}", "=".repeat(80));
    for track in tracks {
        println!("{:<66} {:>13}", track.relative_path, human_filesize(track.size));
    }

    Ok(())
}

/// Builds the RSS document of a book
pub fn render_feed(config: &Config, author: &str, book: &str, base_url: &str) -> Result<String> {
    let tracks = scanner(config)
        .resolve_tracks(author, book)
        .with_context(|| format!("Failed to resolve tracks of {}/{}", author, book))?;
    let urls = BaseUrlGenerator::new(base_url).context("Invalid base URL")?;

    let feed = FeedBuilder::from(&config.feed)
        .build_feed(author, book, &tracks, &urls)
        .context("Failed to build feed")?;

    feed.to_xml().context("Failed to write feed")
}

/// Writes a default config file unless one exists
pub fn init_config(manager: &ConfigManager) -> Result<()> {
    let created = manager
        .initialize()
        .context("Failed to write default configuration")?;

    if created {
        println!(
            "{} Wrote default configuration to {}",
            style("✓").green().bold(),
            manager.config_path().display()
        );
    } else {
        println!(
            "Configuration already exists at {}",
            manager.config_path().display()
        );
    }

    Ok(())
}
