use std::sync::Arc;

use tokio::sync::watch;

/// The process-wide search term.
///
/// Cloning shares the same value. Surfaces interested in changes can
/// [`subscribe`](Self::subscribe).
#[derive(Debug, Clone)]
pub struct SearchQuery {
    tx: Arc<watch::Sender<String>>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(String::new());
        Self { tx: Arc::new(tx) }
    }

    pub fn get(&self) -> String {
        self.tx.borrow().clone()
    }

    pub fn set(&self, term: &str) {
        self.tx.send_replace(term.to_string());
    }

    /// Reset to the empty string, e.g. when the search screen loses focus.
    pub fn clear(&self) {
        self.set("");
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_clear() {
        let query = SearchQuery::new();
        assert_eq!(query.get(), "");
        query.set("Esportes");
        assert_eq!(query.get(), "Esportes");
        query.clear();
        assert_eq!(query.get(), "");
    }

    #[test]
    fn test_clones_share_value() {
        let query = SearchQuery::new();
        let other = query.clone();
        other.set("eleições");
        assert_eq!(query.get(), "eleições");
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let query = SearchQuery::new();
        let mut rx = query.subscribe();
        query.set("copa");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "copa");
    }
}
