use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use crate::app::{NewsError, Result};
use crate::config::ApiConfig;
use crate::domain::RawArticle;
use crate::fetcher::{ArticleQuery, NewsFetcher, Reachability};

const DEFAULT_HTTP_ERROR: &str = "Failed to fetch news";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArticlesResponse {
    articles: Vec<RawArticle>,
    #[serde(default)]
    total_articles: u64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    errors: Vec<String>,
}

pub struct HttpFetcher {
    client: Client,
    endpoint: Url,
    api_key: String,
    country: String,
    timeout: Duration,
    reachability: Option<Arc<dyn Reachability + Send + Sync>>,
}

impl HttpFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("headline/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NewsError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            country: config.country.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            reachability: None,
        })
    }

    /// Check reachability before each request and fail fast when offline.
    pub fn with_reachability(mut self, probe: Arc<dyn Reachability + Send + Sync>) -> Self {
        self.reachability = Some(probe);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn request_url(&self, query: &ArticleQuery) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("country", &self.country);
            match (&query.category, &query.query) {
                (Some(category), _) => {
                    pairs.append_pair("category", category.as_str());
                }
                (None, Some(q)) => {
                    pairs.append_pair("q", q);
                }
                (None, None) => {}
            }
            if let Some(to) = &query.to {
                pairs.append_pair("to", to);
            }
            pairs.append_pair("apikey", &self.api_key);
        }
        url
    }

    async fn send(&self, url: Url) -> Result<Vec<RawArticle>> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(NewsError::Http {
                status: status.as_u16(),
                message: server_message(&body),
            });
        }

        let payload: ArticlesResponse = serde_json::from_slice(&body).map_err(|e| {
            tracing::warn!(error = %e, "unexpected response body from news API");
            NewsError::UnknownConnectionFailure
        })?;

        tracing::debug!(
            returned = payload.articles.len(),
            total = payload.total_articles,
            "news API responded"
        );
        Ok(payload.articles)
    }
}

/// Extract the `errors` list of a documented failure body, or fall back to a
/// generic message.
fn server_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorResponse>(body)
        .ok()
        .map(|e| e.errors)
        .filter(|errors| !errors.is_empty())
        .map(|errors| errors.join("; "))
        .unwrap_or_else(|| DEFAULT_HTTP_ERROR.to_string())
}

#[async_trait]
impl NewsFetcher for HttpFetcher {
    async fn fetch_articles(&self, query: &ArticleQuery) -> Result<Vec<RawArticle>> {
        if let Some(probe) = &self.reachability {
            if !probe.is_reachable().await {
                return Err(NewsError::Offline);
            }
        }

        let url = self.request_url(query);
        tracing::debug!(
            endpoint = %self.endpoint,
            category = ?query.category,
            to = ?query.to,
            "fetching articles"
        );

        match tokio::time::timeout(self.timeout, self.send(url)).await {
            Ok(result) => result,
            Err(_) => Err(NewsError::Timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use tokio_test::assert_err;
    use wiremock::matchers::{method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> ApiConfig {
        ApiConfig {
            endpoint: format!("{}/api/v4/top-headlines", server.uri()),
            api_key: "secret".into(),
            ..ApiConfig::default()
        }
    }

    fn body(urls: &[&str]) -> serde_json::Value {
        let articles: Vec<_> = urls
            .iter()
            .map(|url| {
                serde_json::json!({
                    "title": "Manchete",
                    "description": "Resumo",
                    "content": "Texto",
                    "url": url,
                    "image": null,
                    "publishedAt": "2024-01-01T00:00:00Z",
                    "source": { "name": "G1", "url": "https://g1.example" }
                })
            })
            .collect();
        serde_json::json!({ "totalArticles": articles.len(), "articles": articles })
    }

    struct Unreachable;

    #[async_trait]
    impl Reachability for Unreachable {
        async fn is_reachable(&self) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_fetch_headlines() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v4/top-headlines"))
            .and(query_param("country", "br"))
            .and(query_param("apikey", "secret"))
            .and(query_param_is_missing("q"))
            .and(query_param_is_missing("category"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(&[
                "https://a/1",
                "https://a/2",
            ])))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config(&server)).unwrap();
        let articles = fetcher
            .fetch_articles(&ArticleQuery::headlines())
            .await
            .unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].url, "https://a/1");
    }

    #[tokio::test]
    async fn test_category_and_cursor_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("category", "technology"))
            .and(query_param("to", "2024-01-01T00:00:00Z"))
            .and(query_param_is_missing("q"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(&["https://t/1"])))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config(&server)).unwrap();
        let query = ArticleQuery::for_category(Category::Technology).until("2024-01-01T00:00:00Z");
        let articles = fetcher.fetch_articles(&query).await.unwrap();
        assert_eq!(articles.len(), 1);
    }

    #[tokio::test]
    async fn test_free_text_is_sanitized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "Tom e Jerry"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(&[])))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config(&server)).unwrap();
        let articles = fetcher
            .fetch_articles(&ArticleQuery::for_term(" Tom & Jerry#"))
            .await
            .unwrap();
        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_carries_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "errors": ["You did not provide an API key."]
            })))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config(&server)).unwrap();
        match fetcher.fetch_articles(&ArticleQuery::headlines()).await {
            Err(NewsError::Http { status, message }) => {
                assert_eq!(status, 403);
                assert_eq!(message, "You did not provide an API key.");
            }
            other => panic!("expected http error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_http_error_without_body_uses_default_message() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config(&server)).unwrap();
        let err = fetcher
            .fetch_articles(&ArticleQuery::headlines())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), DEFAULT_HTTP_ERROR);
    }

    #[tokio::test]
    async fn test_client_side_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(body(&["https://a/1"]))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config(&server))
            .unwrap()
            .with_timeout(Duration::from_millis(50));
        let result = fetcher.fetch_articles(&ArticleQuery::headlines()).await;
        assert!(matches!(result, Err(NewsError::Timeout)));
    }

    #[tokio::test]
    async fn test_offline_fails_fast() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body(&[])))
            .expect(0)
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config(&server))
            .unwrap()
            .with_reachability(Arc::new(Unreachable));
        let result = fetcher.fetch_articles(&ArticleQuery::headlines()).await;
        assert!(matches!(result, Err(NewsError::Offline)));
    }

    #[tokio::test]
    async fn test_malformed_body_is_connection_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(&config(&server)).unwrap();
        let result = fetcher.fetch_articles(&ArticleQuery::headlines()).await;
        assert_err!(&result);
        assert!(matches!(result, Err(NewsError::UnknownConnectionFailure)));
    }
}
