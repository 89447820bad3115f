use std::collections::HashSet;

use crate::domain::{Article, FeedState};

/// How a successful initial or refresh fetch combines with what is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Merge {
    /// The batch becomes the whole list.
    Replace,
    /// The batch goes in front; older copies of the same urls are dropped.
    Prepend,
}

/// Every transition a feed can go through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    FetchStarted,
    /// A new search term: the feed is emptied before the fetch begins.
    SearchStarted,
    FetchSucceeded {
        articles: Vec<Article>,
        merge: Merge,
        /// Set when `articles` came from the cache after a failed fetch.
        error: Option<String>,
    },
    FetchFailed {
        message: String,
    },
    LoadMoreStarted,
    LoadMoreSucceeded {
        articles: Vec<Article>,
    },
    LoadMoreFailed {
        message: String,
    },
    ErrorMessageCleared,
}

impl FeedState {
    pub fn apply(&mut self, event: FeedEvent) {
        match event {
            FeedEvent::FetchStarted => {
                let populated = !self.articles.is_empty();
                self.loading = !populated;
                self.is_refreshing = populated;
                self.loading_more = false;
                self.error = None;
                self.error_message = None;
            }
            FeedEvent::SearchStarted => {
                self.articles.clear();
                self.loading = true;
                self.is_refreshing = false;
                self.loading_more = false;
                self.has_more = true;
                self.error = None;
                self.error_message = None;
            }
            FeedEvent::FetchSucceeded {
                articles,
                merge,
                error,
            } => {
                self.has_more = !articles.is_empty();
                self.articles = match merge {
                    Merge::Replace => dedup_by_url(articles),
                    Merge::Prepend => merge_prepend(articles, std::mem::take(&mut self.articles)),
                };
                self.loading = false;
                self.is_refreshing = false;
                self.error_message = error.clone();
                self.error = error;
            }
            FeedEvent::FetchFailed { message } => {
                self.articles.clear();
                self.loading = false;
                self.is_refreshing = false;
                self.has_more = false;
                self.error = Some(message.clone());
                self.error_message = Some(message);
            }
            FeedEvent::LoadMoreStarted => {
                self.loading_more = true;
            }
            FeedEvent::LoadMoreSucceeded { articles } => {
                let appended = append_new(&mut self.articles, articles);
                self.loading_more = false;
                self.has_more = appended > 0;
            }
            FeedEvent::LoadMoreFailed { message } => {
                self.loading_more = false;
                self.error = Some(message.clone());
                self.error_message = Some(message);
            }
            FeedEvent::ErrorMessageCleared => {
                self.error_message = None;
            }
        }
    }
}

/// Keep the first occurrence of every url, preserving order.
pub fn dedup_by_url(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|a| seen.insert(a.url.clone()))
        .collect()
}

/// `fresh ++ old`, where old articles whose url appears in `fresh` are dropped.
pub fn merge_prepend(fresh: Vec<Article>, old: Vec<Article>) -> Vec<Article> {
    let mut merged = dedup_by_url(fresh);
    let fresh_urls: HashSet<String> = merged.iter().map(|a| a.url.clone()).collect();
    merged.extend(old.into_iter().filter(|a| !fresh_urls.contains(&a.url)));
    dedup_by_url(merged)
}

/// Append articles whose url isn't already present. Returns how many were added.
fn append_new(articles: &mut Vec<Article>, more: Vec<Article>) -> usize {
    let mut seen: HashSet<String> = articles.iter().map(|a| a.url.clone()).collect();
    let before = articles.len();
    articles.extend(more.into_iter().filter(|a| seen.insert(a.url.clone())));
    articles.len() - before
}
