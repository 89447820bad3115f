use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Article;

/// The two independent article collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedKind {
    Home,
    Search,
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedKind::Home => f.write_str("home"),
            FeedKind::Search => f.write_str("search"),
        }
    }
}

/// Snapshot of one feed as the UI sees it.
///
/// At most one of `loading`, `is_refreshing` and `loading_more` is set.
/// `error` persists until the next fetch starts; `error_message` is a one-shot
/// signal the UI clears after surfacing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedState {
    pub articles: Vec<Article>,
    pub loading: bool,
    pub is_refreshing: bool,
    pub loading_more: bool,
    pub has_more: bool,
    pub error: Option<String>,
    pub error_message: Option<String>,
}

impl Default for FeedState {
    fn default() -> Self {
        Self {
            articles: Vec::new(),
            loading: false,
            is_refreshing: false,
            loading_more: false,
            has_more: true,
            error: None,
            error_message: None,
        }
    }
}

impl FeedState {
    pub fn is_busy(&self) -> bool {
        self.loading || self.is_refreshing || self.loading_more
    }

    /// Whether a "load more" request may start right now.
    pub fn can_load_more(&self) -> bool {
        !self.loading_more && self.has_more && !self.loading && !self.is_refreshing
    }

    /// The pagination cursor: the timestamp of the oldest loaded article.
    pub fn cursor(&self) -> Option<&str> {
        self.articles
            .last()
            .map(|a| a.original_published_at.as_str())
    }
}
