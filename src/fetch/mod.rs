//! Content fetch layer
//!
//! ```text
//! ┌──────────────────┐     ┌─────────────┐
//! │  CachingFetcher  │────▶│  PageCache  │
//! │                  │     │  (SQLite)   │
//! └──────────────────┘     └─────────────┘
//!          │
//!          ▼
//! ┌──────────────────┐
//! │   HttpFetcher    │
//! │    (reqwest)     │
//! └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`fetcher`]: `PageFetcher` trait consumed by the strategy
//! - [`http`]: HTTP implementation
//! - [`cache`]: SQLite page cache with TTL
//! - [`caching`]: fetcher that consults the cache before the network
//! - [`error`]: error types for fetch and cache operations

pub mod cache;
pub mod caching;
pub mod error;
pub mod fetcher;
pub mod http;

pub use cache::PageCache;
pub use caching::CachingFetcher;
pub use error::{CacheError, FetchError};
pub use fetcher::{FetchedPage, PageFetcher};
pub use http::HttpFetcher;
