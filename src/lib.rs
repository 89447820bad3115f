//! # Headline
//!
//! A terminal news reader for a top-headlines API, with an offline cache
//! and local favorites.
//!
//! ## Architecture
//!
//! ```text
//! CLI → NewsStore → NewsFetcher → API
//!           ↓
//!      CacheStore / FavoritesStore → KeyValueStore
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Home feed plus two more pages
//! headline home --more 2
//!
//! # Search by text or by category label
//! headline search "Tecnologia"
//!
//! # Bookmark an article from the home feed
//! headline favorites add https://example.com/article
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the
/// key-value store, fetcher, cache and news state.
pub mod app;

/// Command-line interface using clap.
///
/// - `home [--more N]` - Show the home feed
/// - `search <term> [--more N]` - Search by text or category label
/// - `categories` - List browsable categories
/// - `favorites list|add|remove` - Manage favorites
pub mod cli;

/// Configuration loaded from `~/.config/headline/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): A news article ready for display
/// - [`Category`](domain::Category): Topic filters with localized labels
/// - [`FeedState`](domain::FeedState): Observable state of one feed
pub mod domain;

/// News API access.
///
/// - [`NewsFetcher`](fetcher::NewsFetcher): Async trait for article fetching
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Feed state machine: initial load, refresh, search and pagination.
pub mod news;

/// Key-value persistence, the home feed cache and favorites.
///
/// - [`KeyValueStore`](store::KeyValueStore): Trait over string storage
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
pub mod store;
