pub mod cache;
pub mod favorites;
pub mod memory;
pub mod sqlite;

use crate::app::Result;

pub use cache::{CacheEntry, CacheStore, HOME_NEWS_CACHE_KEY};
pub use favorites::{FavoritesStore, FAVORITES_KEY};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// String key-value persistence shared by the cache and favorites.
///
/// Values are opaque strings; callers encode and decode JSON themselves.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
}
