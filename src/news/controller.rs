use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::app::NewsError;
use crate::domain::{Article, FeedKind, FeedState};
use crate::fetcher::{ArticleQuery, NewsFetcher};
use crate::news::latency::{FetchMode, LatencyPolicy};
use crate::news::query::SearchQuery;
use crate::news::reducer::{FeedEvent, Merge};
use crate::store::{CacheStore, HOME_NEWS_CACHE_KEY};

/// What happened to a dispatched intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The outcome was applied to the feed.
    Applied,
    /// A newer fetch for the same feed started first; this outcome was dropped.
    Superseded,
    /// A guard refused the intent; nothing was fetched.
    Skipped,
}

#[derive(Debug, Default)]
struct Slot {
    state: FeedState,
    /// Bumped by every initial, refresh and search fetch. Completions carrying
    /// an older generation are discarded.
    generation: u64,
}

/// The state container for both feeds.
///
/// Create one per process and share it by `Arc`. The home and search feeds
/// are locked independently, so fetches on one never wait on the other.
pub struct NewsStore {
    fetcher: Arc<dyn NewsFetcher + Send + Sync>,
    cache: CacheStore,
    latency: LatencyPolicy,
    query: SearchQuery,
    home: RwLock<Slot>,
    search: RwLock<Slot>,
}

impl NewsStore {
    pub fn new(
        fetcher: Arc<dyn NewsFetcher + Send + Sync>,
        cache: CacheStore,
        latency: LatencyPolicy,
    ) -> Self {
        Self {
            fetcher,
            cache,
            latency,
            query: SearchQuery::new(),
            home: RwLock::new(Slot::default()),
            search: RwLock::new(Slot::default()),
        }
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub async fn snapshot(&self, kind: FeedKind) -> FeedState {
        self.slot(kind).read().await.state.clone()
    }

    /// Clear the one-shot error message of one feed after it was shown.
    pub async fn clear_error_message(&self, kind: FeedKind) {
        self.slot(kind)
            .write()
            .await
            .state
            .apply(FeedEvent::ErrorMessageCleared);
    }

    pub async fn clear_error_messages(&self) {
        self.clear_error_message(FeedKind::Home).await;
        self.clear_error_message(FeedKind::Search).await;
    }

    /// Load or refresh the home feed.
    ///
    /// On failure the cached home feed is served instead, with the error
    /// still reported. Only without a usable cache does the feed fail.
    pub async fn fetch_home(&self, mode: FetchMode) -> Dispatch {
        let generation = self.begin(FeedKind::Home, FeedEvent::FetchStarted).await;
        self.latency.wait(mode).await;

        let event = match self.fetcher.fetch_articles(&ArticleQuery::headlines()).await {
            Ok(raw) => {
                info!(count = raw.len(), ?mode, "home feed fetched");
                FeedEvent::FetchSucceeded {
                    articles: Article::from_raw_batch(raw, Utc::now()),
                    merge: match mode {
                        FetchMode::Initial => Merge::Replace,
                        FetchMode::Refresh => Merge::Prepend,
                    },
                    error: None,
                }
            }
            Err(err) => self.home_fallback(err),
        };

        let degraded = matches!(&event, FeedEvent::FetchSucceeded { error: Some(_), .. });
        let succeeded = matches!(&event, FeedEvent::FetchSucceeded { .. });

        match self.complete(FeedKind::Home, generation, event).await {
            Some(state) => {
                if succeeded && !degraded {
                    self.cache.set(HOME_NEWS_CACHE_KEY, &state.articles);
                }
                Dispatch::Applied
            }
            None => Dispatch::Superseded,
        }
    }

    /// Run a search for `term`, replacing whatever the search feed showed.
    ///
    /// The term becomes the shared search query. The feed is emptied before
    /// the request goes out.
    pub async fn search(&self, term: &str) -> Dispatch {
        self.query.set(term);
        let generation = self.begin(FeedKind::Search, FeedEvent::SearchStarted).await;
        self.latency.wait(FetchMode::Initial).await;

        let event = match self.fetcher.fetch_articles(&ArticleQuery::for_term(term)).await {
            Ok(raw) => {
                info!(count = raw.len(), term, "search fetched");
                FeedEvent::FetchSucceeded {
                    articles: Article::from_raw_batch(raw, Utc::now()),
                    merge: Merge::Replace,
                    error: None,
                }
            }
            Err(err) => {
                warn!(term, error = %err, "search failed");
                FeedEvent::FetchFailed {
                    message: err.to_string(),
                }
            }
        };

        match self.complete(FeedKind::Search, generation, event).await {
            Some(_) => Dispatch::Applied,
            None => Dispatch::Superseded,
        }
    }

    /// Fetch the page after the oldest loaded article.
    ///
    /// Skipped without touching the network unless more articles may exist
    /// and the feed is idle. An empty feed fails locally with
    /// [`NewsError::NoPriorArticles`].
    pub async fn load_more(&self, kind: FeedKind) -> Dispatch {
        let (generation, cursor) = {
            let mut slot = self.slot(kind).write().await;
            if !slot.state.can_load_more() {
                debug!(feed = %kind, "load more skipped");
                return Dispatch::Skipped;
            }

            slot.state.apply(FeedEvent::LoadMoreStarted);
            match slot.state.cursor().map(str::to_string) {
                Some(cursor) => (slot.generation, cursor),
                None => {
                    slot.state.apply(FeedEvent::LoadMoreFailed {
                        message: NewsError::NoPriorArticles.to_string(),
                    });
                    return Dispatch::Applied;
                }
            }
        };

        let request = match kind {
            FeedKind::Home => ArticleQuery::headlines(),
            FeedKind::Search => ArticleQuery::for_term(&self.query.get()),
        }
        .until(cursor);

        let event = match self.fetcher.fetch_articles(&request).await {
            Ok(mut raw) => {
                // The `to` bound is inclusive, so the first result repeats the cursor article.
                if !raw.is_empty() {
                    raw.remove(0);
                }
                debug!(feed = %kind, count = raw.len(), "next page fetched");
                FeedEvent::LoadMoreSucceeded {
                    articles: Article::from_raw_batch(raw, Utc::now()),
                }
            }
            Err(err) => {
                warn!(feed = %kind, error = %err, "load more failed");
                FeedEvent::LoadMoreFailed {
                    message: err.to_string(),
                }
            }
        };

        let succeeded = matches!(&event, FeedEvent::LoadMoreSucceeded { .. });
        match self.complete(kind, generation, event).await {
            Some(state) => {
                if kind == FeedKind::Home && succeeded {
                    self.cache.set(HOME_NEWS_CACHE_KEY, &state.articles);
                }
                Dispatch::Applied
            }
            None => Dispatch::Superseded,
        }
    }

    fn home_fallback(&self, err: NewsError) -> FeedEvent {
        match self.cache.get::<Vec<Article>>(HOME_NEWS_CACHE_KEY) {
            Some(mut cached) if !cached.is_empty() => {
                warn!(error = %err, cached = cached.len(), "home fetch failed, serving cache");
                let now = Utc::now();
                for article in &mut cached {
                    article.refresh_display(now);
                }
                FeedEvent::FetchSucceeded {
                    articles: cached,
                    merge: Merge::Replace,
                    error: Some(err.to_string()),
                }
            }
            _ => {
                warn!(error = %err, "home fetch failed with no cache to fall back on");
                FeedEvent::FetchFailed {
                    message: err.to_string(),
                }
            }
        }
    }

    fn slot(&self, kind: FeedKind) -> &RwLock<Slot> {
        match kind {
            FeedKind::Home => &self.home,
            FeedKind::Search => &self.search,
        }
    }

    /// Start a new generation for `kind` and apply the start transition.
    async fn begin(&self, kind: FeedKind, event: FeedEvent) -> u64 {
        let mut slot = self.slot(kind).write().await;
        slot.generation += 1;
        slot.state.apply(event);
        debug!(feed = %kind, generation = slot.generation, "fetch started");
        slot.generation
    }

    /// Apply a completion unless a newer fetch has started since.
    async fn complete(&self, kind: FeedKind, generation: u64, event: FeedEvent) -> Option<FeedState> {
        let mut slot = self.slot(kind).write().await;
        if slot.generation != generation {
            debug!(
                feed = %kind,
                stale = generation,
                current = slot.generation,
                "discarding superseded result"
            );
            return None;
        }
        slot.state.apply(event);
        Some(slot.state.clone())
    }
}
