use std::sync::Arc;

use tracing::{debug, warn};

use crate::app::Result;
use crate::domain::Article;
use crate::store::KeyValueStore;

pub const FAVORITES_KEY: &str = "favorites";

/// Bookmarked articles, keyed by url, newest first.
///
/// Every operation degrades to a safe default when storage fails.
#[derive(Clone)]
pub struct FavoritesStore {
    store: Arc<dyn KeyValueStore + Send + Sync>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn KeyValueStore + Send + Sync>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Article> {
        self.try_list().unwrap_or_else(|e| {
            warn!(error = %e, "failed to load favorites");
            Vec::new()
        })
    }

    /// Add `article` unless one with the same url is already saved.
    pub fn add(&self, article: &Article) {
        if let Err(e) = self.try_add(article) {
            warn!(url = %article.url, error = %e, "failed to add favorite");
        }
    }

    pub fn remove(&self, url: &str) {
        if let Err(e) = self.try_remove(url) {
            warn!(url, error = %e, "failed to remove favorite");
        }
    }

    pub fn has(&self, url: &str) -> bool {
        match self.try_list() {
            Ok(favorites) => favorites.iter().any(|f| f.url == url),
            Err(e) => {
                warn!(url, error = %e, "failed to check favorite");
                false
            }
        }
    }

    fn try_list(&self) -> Result<Vec<Article>> {
        match self.store.get_item(FAVORITES_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn try_add(&self, article: &Article) -> Result<()> {
        let mut favorites = self.try_list()?;
        if favorites.iter().any(|f| f.url == article.url) {
            debug!(url = %article.url, "already a favorite");
            return Ok(());
        }
        favorites.insert(0, article.clone());
        self.save(&favorites)
    }

    fn try_remove(&self, url: &str) -> Result<()> {
        let mut favorites = self.try_list()?;
        favorites.retain(|f| f.url != url);
        self.save(&favorites)
    }

    fn save(&self, favorites: &[Article]) -> Result<()> {
        self.store
            .set_item(FAVORITES_KEY, &serde_json::to_string(favorites)?)
    }
}
