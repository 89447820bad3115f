pub mod article;
pub mod category;
pub mod feed;
pub mod time_ago;

pub use article::{Article, RawArticle, Source};
pub use category::Category;
pub use feed::{FeedKind, FeedState};
pub use time_ago::{format_iso_time_ago, format_time_ago};
