pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "headline")]
#[command(about = "Top headlines, search and favorites from the terminal", long_about = None)]
pub struct Cli {
    /// Path to the config file (default: ~/.config/headline/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Skip the artificial delay before fetches
    #[arg(long, global = true)]
    pub no_delay: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the home feed
    Home {
        /// Number of extra pages to load
        #[arg(short, long, default_value_t = 0)]
        more: usize,
    },
    /// Search articles by free text or category label
    Search {
        /// Search term, e.g. "eleições" or "Tecnologia"
        term: String,

        /// Number of extra pages to load
        #[arg(short, long, default_value_t = 0)]
        more: usize,
    },
    /// List categories and their labels
    Categories,
    /// Manage favorite articles
    Favorites {
        #[command(subcommand)]
        action: FavoritesAction,
    },
}

#[derive(Subcommand)]
pub enum FavoritesAction {
    /// List favorites
    List,
    /// Add an article from the cached home feed
    Add {
        /// URL of the article
        url: String,
    },
    /// Remove a favorite
    Remove {
        /// URL of the article
        url: String,
    },
}
