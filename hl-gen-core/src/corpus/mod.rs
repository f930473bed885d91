//! Corpus sources feeding the chain.
//!
//! - `Archive`: every title seen so far, persisted as JSON
//! - `FeedClient`: fresh titles from an RSS feed
//! - `PageScraper`: one headline per request from a random article page

/// JSON archive of seen titles (`{"title": ""}`).
pub mod archive;

/// RSS feed retrieval and title extraction.
pub mod feed;

/// Article page headline scraping.
pub mod page;

pub use archive::{Archive, DEFAULT_ARCHIVE_PATH};
pub use feed::{DEFAULT_FEED_URL, FeedClient, parse_titles};
pub use page::{DEFAULT_RANDOM_PAGE_URL, PageScraper, parse_page_title};
