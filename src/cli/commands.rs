use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use crate::config::{Config, resolve_root};
use crate::filing::classify::read_first_line;
use crate::filing::{Classification, FilingRequest, classify, file_entry};
use crate::indexer::{build_listings, render_readme, write_readme};
use crate::models::EntryMetadata;
use crate::utils::split_extension;

#[derive(Parser)]
#[command(name = "talk-index")]
#[command(version = "0.1.0")]
#[command(about = "File conference talk materials and regenerate their index", long_about = None)]
pub struct Cli {
    /// Materials repository root (must contain a _tools directory)
    #[arg(long, global = true, env = "TALK_INDEX_ROOT")]
    pub root: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Regenerate the README index (default)
    Index {
        /// Print the README to stdout instead of writing it
        #[arg(long)]
        stdout: bool,
    },
    /// File a new submission, then regenerate the index
    Add {
        /// File or folder to file
        path: PathBuf,
        /// Category key or name: [p]resentation, [k]eynote, [l]ightning/lunch, p[o]ster
        #[arg(short, long)]
        category: String,
        /// Title, when it cannot be inferred from the upload
        #[arg(long)]
        title: Option<String>,
        /// Author, when it cannot be inferred from the upload
        #[arg(long)]
        author: Option<String>,
        /// Replacement for the generated filename (<title>__<author>__<tag>.<ext>)
        #[arg(long)]
        filename: Option<String>,
    },
    /// Show statistics about the materials tree
    Stats,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let root = resolve_root(cli.root.as_deref())?;
    let config = Config::load(&root)?;

    match cli.command.unwrap_or(Commands::Index { stdout: false }) {
        Commands::Index { stdout: true } => {
            let (document, _) = render_readme(&root, &config)?;
            print!("{}", document);
        }
        Commands::Index { stdout: false } => {
            regenerate(&root, &config)?;
        }
        Commands::Add { path, category, title, author, filename } => {
            add_entry(&root, &config, &path, &category, title, author, filename)?;
            regenerate(&root, &config)?;
        }
        Commands::Stats => {
            show_stats(&root, &config);
        }
    }

    Ok(())
}

fn regenerate(root: &Path, config: &Config) -> Result<()> {
    let summary = write_readme(root, config)?;
    println!(
        "Wrote {} ({} entries, {} skipped)",
        summary.readme_path.display(),
        summary.listed,
        summary.skipped
    );
    Ok(())
}

/// Settle title and author from flags, falling back to upload naming conventions
fn resolve_metadata(
    path: &Path,
    config: &Config,
    title: Option<String>,
    author: Option<String>,
) -> Result<EntryMetadata> {
    let inferred = match (&title, &author) {
        (Some(_), Some(_)) => None,
        _ => {
            let filename = path
                .file_name()
                .with_context(|| format!("Invalid path: {}", path.display()))?
                .to_string_lossy()
                .into_owned();
            let header = if split_extension(&filename).1 == ".md" && path.is_file() {
                read_first_line(path)?
            } else {
                None
            };
            match classify(&filename, header.as_deref(), &config.event) {
                Classification::Resolved(metadata) => Some(metadata),
                Classification::Ambiguous => None,
            }
        }
    };

    let title = title.or_else(|| inferred.as_ref().map(|m| m.title.clone()));
    let author = author.or_else(|| inferred.as_ref().map(|m| m.author.clone()));
    match (title, author) {
        (Some(title), Some(author)) if !title.trim().is_empty() && !author.trim().is_empty() => {
            Ok(EntryMetadata { title, author })
        }
        _ => bail!(
            "Could not infer title and author from {}; pass --title and --author",
            path.display()
        ),
    }
}

fn add_entry(
    root: &Path,
    config: &Config,
    path: &Path,
    category: &str,
    title: Option<String>,
    author: Option<String>,
    filename: Option<String>,
) -> Result<()> {
    let Some(category) = config.find_category(category) else {
        let known: Vec<_> =
            config.categories.iter().map(|c| format!("{} ({})", c.key, c.label)).collect();
        bail!("Unknown category '{}'; expected one of: {}", category, known.join(", "));
    };

    let metadata = resolve_metadata(path, config, title, author)?;
    let request = FilingRequest { source: path, category, metadata, filename_override: filename };
    let filed = file_entry(root, &request, &config.event)?;

    println!("Title: {}", filed.metadata.title);
    println!("Author: {}", filed.metadata.author);
    println!("Filed as {}", filed.path.display());

    Ok(())
}

fn show_stats(root: &Path, config: &Config) {
    let listings = build_listings(root, config);

    println!("Conference Materials Statistics");
    println!("================================");
    println!("Event: {}", config.event.display_name());
    println!("Root: {}", root.display());
    println!();

    for listing in &listings {
        if listing.present {
            println!(
                "{}: {} entries ({} skipped)",
                listing.category.label,
                listing.listed_count(),
                listing.skipped_count()
            );
        } else {
            println!("{}: no directory yet", listing.category.label);
        }
    }

    let total: usize = listings.iter().map(|l| l.listed_count()).sum();
    println!("Total entries: {}", total);

    let skipped: Vec<_> = listings
        .iter()
        .flat_map(|l| l.skipped().map(move |(name, reason)| (l.category.path.join(name), reason)))
        .collect();
    if !skipped.is_empty() {
        println!();
        println!("Skipped entries:");
        for (path, reason) in skipped {
            println!("  {}: {}", path.display(), reason);
        }
    }
}
