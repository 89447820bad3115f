use chrono::{DateTime, Utc};
use html_escape::decode_html_entities;
use serde::{Deserialize, Serialize};

use crate::domain::time_ago::format_iso_time_ago;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// An article exactly as the news API returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    pub published_at: String,
    #[serde(default)]
    pub source: Source,
}

/// An article as held in feed state, the cache and favorites.
///
/// `url` is the identity: two articles with the same url are the same
/// article. `published_at` is the display string; the untouched ISO
/// timestamp lives in `original_published_at` and doubles as the
/// pagination cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: String,
    pub content: String,
    pub url: String,
    pub image: Option<String>,
    pub published_at: String,
    pub original_published_at: String,
    pub source: Source,
}

impl Article {
    pub fn from_raw(raw: RawArticle, now: DateTime<Utc>) -> Self {
        Self {
            title: decode_html_entities(&raw.title).to_string(),
            description: raw
                .description
                .map(|d| decode_html_entities(&d).to_string())
                .unwrap_or_default(),
            content: raw
                .content
                .map(|c| decode_html_entities(&c).to_string())
                .unwrap_or_default(),
            url: raw.url,
            image: raw.image.filter(|i| !i.is_empty()),
            published_at: format_iso_time_ago(&raw.published_at, now),
            original_published_at: raw.published_at,
            source: raw.source,
        }
    }

    pub fn from_raw_batch(raw: Vec<RawArticle>, now: DateTime<Utc>) -> Vec<Self> {
        raw.into_iter().map(|r| Self::from_raw(r, now)).collect()
    }

    /// Re-derive the display date, e.g. for articles restored from cache.
    pub fn refresh_display(&mut self, now: DateTime<Utc>) {
        self.published_at = format_iso_time_ago(&self.original_published_at, now);
    }

    pub fn published(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.original_published_at)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn raw(url: &str, published_at: &str) -> RawArticle {
        RawArticle {
            title: format!("Title {}", url),
            description: Some("desc".into()),
            content: None,
            url: url.into(),
            image: None,
            published_at: published_at.into(),
            source: Source {
                name: "Folha".into(),
                url: "https://folha.example".into(),
            },
        }
    }

    #[test]
    fn test_from_raw_keeps_original_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 3, 0, 0).unwrap();
        let article = Article::from_raw(raw("https://a/1", "2024-01-01T00:00:00Z"), now);
        assert_eq!(article.original_published_at, "2024-01-01T00:00:00Z");
        assert_eq!(article.published_at, "Há 3 horas");
        assert_eq!(article.content, "");
    }

    #[test]
    fn test_from_raw_decodes_entities() {
        let mut r = raw("https://a/1", "2024-01-01T00:00:00Z");
        r.title = "Tom &amp; Jerry".into();
        let article = Article::from_raw(r, Utc::now());
        assert_eq!(article.title, "Tom & Jerry");
    }

    #[test]
    fn test_empty_image_becomes_none() {
        let mut r = raw("https://a/1", "2024-01-01T00:00:00Z");
        r.image = Some(String::new());
        assert_eq!(Article::from_raw(r, Utc::now()).image, None);
    }

    #[test]
    fn test_deserializes_api_shape() {
        let json = r#"{
            "title": "Manchete",
            "description": null,
            "content": "Texto... [1234 chars]",
            "url": "https://news.example/a",
            "image": "https://img.example/a.jpg",
            "publishedAt": "2024-01-01T00:00:00Z",
            "source": { "name": "G1", "url": "https://g1.example" }
        }"#;
        let raw: RawArticle = serde_json::from_str(json).unwrap();
        assert_eq!(raw.description, None);
        assert_eq!(raw.source.name, "G1");
    }

    #[test]
    fn test_refresh_display_uses_original() {
        let then = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut article = Article::from_raw(raw("https://a/1", "2024-01-01T00:00:00Z"), then);
        article.refresh_display(then + chrono::Duration::days(2));
        assert_eq!(article.published_at, "Há 2 dias");
        assert_eq!(article.published(), Some(then));
    }
}
