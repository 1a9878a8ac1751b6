//! Command-line surface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stockbook", version, about = "Single-user inventory register")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new item
    Add {
        #[arg(long)]
        name: Option<String>,
        /// Quantity (digits only)
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Responsible user
        #[arg(long)]
        user: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        /// Attach an image file (repeatable)
        #[arg(long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,
        /// Capture a single image
        #[arg(long, value_name = "PATH")]
        capture: Option<PathBuf>,
    },
    /// Edit an existing item; unspecified fields keep their current value
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        /// Quantity (digits only)
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        location: Option<String>,
        /// Responsible user
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Drop the item's current images before attaching new ones
        #[arg(long)]
        clear_images: bool,
        /// Attach an image file (repeatable)
        #[arg(long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,
        /// Capture a single image
        #[arg(long, value_name = "PATH")]
        capture: Option<PathBuf>,
    },
    /// Delete an item (asks for confirmation)
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// List items, optionally filtered by a search query
    List {
        #[arg(long)]
        search: Option<String>,
    },
    /// Export the whole collection as a spreadsheet plus images archive
    Export {
        /// Archive output path (defaults to the configured archive name)
        #[arg(long)]
        output: Option<PathBuf>,
    },
}
