//! Stockbook - single-user inventory register

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stockbook::{
    cli::{Cli, Command},
    config::AppConfig,
    editor::RecordDraft,
    export::Exporter,
    filter,
    models::InventoryRecord,
    store::Store,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("stockbook={}", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut store = Store::open(config.store_path());
    if let Some(warning) = store.load_warning() {
        eprintln!("warning: {}", warning);
    }

    match cli.command {
        Command::Add {
            name,
            quantity,
            location,
            user,
            description,
            images,
            capture,
        } => {
            let mut draft = RecordDraft::new();
            draft.name = name.unwrap_or_default();
            draft.location = location.unwrap_or_default();
            draft.responsible = user.unwrap_or_default();
            draft.description = description;
            fill_quantity(&mut draft, quantity)?;
            attach(&mut draft, &images, capture).await?;

            let record = draft.submit(&mut store)?;
            report_save(&store);
            println!("Registered item {}", record.id);
        }
        Command::Edit {
            id,
            name,
            quantity,
            location,
            user,
            description,
            clear_images,
            images,
            capture,
        } => {
            let seed = store
                .get(&id)
                .cloned()
                .with_context(|| format!("no item with id {}", id))?;

            let mut draft = RecordDraft::edit(seed);
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(location) = location {
                draft.location = location;
            }
            if let Some(user) = user {
                draft.responsible = user;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if clear_images {
                draft.clear_images();
            }
            fill_quantity(&mut draft, quantity)?;
            attach(&mut draft, &images, capture).await?;

            let record = draft.submit(&mut store)?;
            report_save(&store);
            println!("Updated item {}", record.id);
        }
        Command::Delete { id, yes } => match store.get(&id).cloned() {
            Some(record) => {
                if yes || confirm_delete(&record)? {
                    store.remove(&record.id);
                    report_save(&store);
                    println!("Deleted item {}", record.id);
                } else {
                    println!("Cancelled");
                }
            }
            // Deleting an unknown id is a no-op, not an error.
            None => println!("No item with id {}; nothing to delete", id),
        },
        Command::List { search } => {
            let query = search.unwrap_or_default();
            let matches = filter::filter(store.records(), &query);
            print_table(store.records(), &matches, &query);
        }
        Command::Export { output } => {
            let output =
                output.unwrap_or_else(|| PathBuf::from(&config.export.archive_name));
            let exporter = Exporter::new();
            println!("Exporting...");
            let written = exporter
                .export(store.records(), &output)
                .await
                .context("export failed")?;
            println!("Export written to {}", written.display());
        }
    }

    Ok(())
}

/// Apply quantity entry, enforcing the digits-only pre-filter
fn fill_quantity(draft: &mut RecordDraft, quantity: Option<String>) -> anyhow::Result<()> {
    if let Some(quantity) = quantity {
        if !draft.set_quantity(&quantity) {
            anyhow::bail!("quantity accepts digits only");
        }
    }
    Ok(())
}

async fn attach(
    draft: &mut RecordDraft,
    images: &[PathBuf],
    capture: Option<PathBuf>,
) -> anyhow::Result<()> {
    if !images.is_empty() {
        let attached = draft.attach_images(images).await?;
        tracing::debug!("Attached {} image(s)", attached);
    }
    if let Some(path) = capture {
        draft.capture_image(&path).await?;
    }
    Ok(())
}

fn report_save(store: &Store) {
    if let Some(warning) = store.save_warning() {
        eprintln!("warning: {}", warning);
    }
}

fn confirm_delete(record: &InventoryRecord) -> anyhow::Result<bool> {
    print!("Delete \"{}\"? [y/N] ", record.name);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    let answer = answer.trim().to_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn print_table(all: &[InventoryRecord], matches: &[&InventoryRecord], query: &str) {
    if matches.is_empty() {
        if all.is_empty() {
            println!("No items registered");
        } else {
            println!("No items match \"{}\"", query.trim());
        }
        return;
    }

    println!(
        "{:<36}  {:<20} {:>8}  {:<24} {:<16} {:<14} {:<16} {:<10}",
        "ID", "Name", "Quantity", "Description", "Location", "User", "Date/Time", "Images"
    );
    for record in matches {
        println!(
            "{:<36}  {:<20} {:>8}  {:<24} {:<16} {:<14} {:<16} {:<10}",
            record.id,
            truncate(&record.name, 20),
            record.quantity,
            truncate(&record.description, 24),
            truncate(&record.location, 16),
            truncate(&record.responsible, 14),
            record.formatted_date(),
            images_summary(record.images.len()),
        );
    }
}

/// Image column: up to three shown individually in the original table, the
/// rest collapsed into a count
fn images_summary(count: usize) -> String {
    match count {
        0 => "-".to_string(),
        n if n <= 3 => format!("{} img", n),
        n => format!("3 img +{}", n - 3),
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
