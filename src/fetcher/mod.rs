pub mod http_fetcher;
pub mod reachability;

use async_trait::async_trait;

use crate::app::Result;
use crate::domain::{Category, RawArticle};

pub use http_fetcher::HttpFetcher;
pub use reachability::{Reachability, TcpProbe};

/// Parameters of one request to the news API.
///
/// `query` and `category` are mutually exclusive; a category wins.
/// `to` is an exclusive-in-intent upper bound used only for pagination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleQuery {
    pub query: Option<String>,
    pub category: Option<Category>,
    pub to: Option<String>,
}

impl ArticleQuery {
    /// Top headlines with no filter, as shown on the home feed.
    pub fn headlines() -> Self {
        Self::default()
    }

    /// Route a search term: category labels become a category filter,
    /// anything else is sanitized free text.
    pub fn for_term(term: &str) -> Self {
        match Category::from_label(term) {
            Some(category) => Self::for_category(category),
            None => {
                let query = sanitize_query(term);
                Self {
                    query: (!query.is_empty()).then_some(query),
                    ..Self::default()
                }
            }
        }
    }

    pub fn for_category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }

    pub fn until(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }
}

/// Make free text safe for the `q` parameter: `&` becomes "e", `+` becomes a
/// space, `#` is dropped, and surrounding whitespace is trimmed.
pub fn sanitize_query(term: &str) -> String {
    term.replace('&', "e")
        .replace('+', " ")
        .replace('#', "")
        .trim()
        .to_string()
}

#[async_trait]
pub trait NewsFetcher {
    /// Fetch one page of articles. Every failure is normalized into the
    /// fetch variants of [`NewsError`](crate::app::NewsError).
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<RawArticle>>;
}
