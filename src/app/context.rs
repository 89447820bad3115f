use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{NewsError, Result};
use crate::config::Config;
use crate::fetcher::{HttpFetcher, NewsFetcher, TcpProbe};
use crate::news::{LatencyPolicy, NewsStore};
use crate::store::{CacheStore, FavoritesStore, KeyValueStore, MemoryStore, SqliteStore};

pub struct AppContext {
    pub news: Arc<NewsStore>,
    pub cache: CacheStore,
    pub favorites: FavoritesStore,
}

impl AppContext {
    pub fn new(config: &Config) -> Result<Self> {
        let db_path = match &config.storage.db_path {
            Some(p) => p.clone(),
            None => Self::default_db_path()?,
        };
        let store: Arc<dyn KeyValueStore + Send + Sync> = Arc::new(SqliteStore::new(&db_path)?);
        let fetcher = Self::http_fetcher(config)?;

        Ok(Self::with_parts(store, fetcher, config, config.latency))
    }

    /// Context backed by a throwaway in-memory store.
    pub fn in_memory(config: &Config) -> Result<Self> {
        let store: Arc<dyn KeyValueStore + Send + Sync> = Arc::new(MemoryStore::new());
        let fetcher = Self::http_fetcher(config)?;

        Ok(Self::with_parts(store, fetcher, config, config.latency))
    }

    pub fn with_parts(
        store: Arc<dyn KeyValueStore + Send + Sync>,
        fetcher: Arc<dyn NewsFetcher + Send + Sync>,
        config: &Config,
        latency: LatencyPolicy,
    ) -> Self {
        let cache = CacheStore::new(store.clone(), &config.cache);
        let favorites = FavoritesStore::new(store);
        let news = Arc::new(NewsStore::new(fetcher, cache.clone(), latency));

        Self {
            news,
            cache,
            favorites,
        }
    }

    fn http_fetcher(config: &Config) -> Result<Arc<dyn NewsFetcher + Send + Sync>> {
        let mut fetcher = HttpFetcher::new(&config.api)?;
        if config.api.check_connectivity {
            if let Some(probe) = TcpProbe::for_url(fetcher.endpoint(), config.api.probe_timeout()) {
                fetcher = fetcher.with_reachability(Arc::new(probe));
            }
        }
        Ok(Arc::new(fetcher))
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| NewsError::Config("Could not find data directory".into()))?;
        let headline_dir = data_dir.join("headline");
        std::fs::create_dir_all(&headline_dir)?;
        Ok(headline_dir.join("headline.db"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fixtures::article;

    #[test]
    fn test_context_shares_one_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.storage.db_path = Some(dir.path().join("headline.db"));

        let ctx = AppContext::new(&config).unwrap();
        ctx.favorites
            .add(&article("https://a/1", "2024-01-01T00:00:00Z"));

        let reopened = AppContext::new(&config).unwrap();
        assert!(reopened.favorites.has("https://a/1"));
    }

    #[test]
    fn test_rejects_invalid_endpoint() {
        let mut config = Config::default();
        config.api.endpoint = "not a url".into();
        assert!(matches!(
            AppContext::in_memory(&config),
            Err(NewsError::InvalidUrl(_))
        ));
    }
}
