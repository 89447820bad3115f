//! The feed state machine.
//!
//! ```text
//! intent → NewsStore → (latency) → NewsFetcher → FeedEvent → FeedState
//!                                       ↘ failure → CacheStore fallback (home)
//! ```
//!
//! [`NewsStore`] owns the home and search feeds. Every change to a feed goes
//! through [`FeedState::apply`](crate::domain::FeedState::apply) with a
//! [`FeedEvent`], so the transitions can be tested without any I/O.

mod controller;
mod latency;
mod query;
mod reducer;


pub use controller::{Dispatch, NewsStore};
pub use latency::{FetchMode, LatencyPolicy};
pub use query::SearchQuery;
pub use reducer::{dedup_by_url, merge_prepend, FeedEvent, Merge};
