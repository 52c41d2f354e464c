//! Fetcher trait for retrieving page content

#[cfg(test)]
use mockall::automock;

use crate::fetch::error::FetchError;

/// Content returned by a [`PageFetcher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub content: String,
    /// True when the content was served from a local cache
    pub cached: bool,
}

impl FetchedPage {
    pub fn new(content: impl Into<String>, cached: bool) -> Self {
        Self {
            content: content.into(),
            cached,
        }
    }
}

/// Trait for fetching the content behind a URL
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the page content for `url`
    ///
    /// # Returns
    /// * `Ok(FetchedPage)` - Page body and whether it came from a cache
    /// * `Err(FetchError)` - If the fetch fails
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

#[async_trait::async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Box<T> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        (**self).fetch(url).await
    }
}
