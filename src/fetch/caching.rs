//! Fetcher that serves pages from the local cache when possible

use tracing::{debug, warn};

use crate::fetch::cache::PageCache;
use crate::fetch::error::FetchError;
use crate::fetch::fetcher::{FetchedPage, PageFetcher};

/// Wraps another fetcher with a [`PageCache`]
///
/// Cache failures are logged and fall through to the inner fetcher; they never
/// fail the fetch on their own.
pub struct CachingFetcher<F: PageFetcher> {
    inner: F,
    cache: PageCache,
}

impl<F: PageFetcher> CachingFetcher<F> {
    pub fn new(inner: F, cache: PageCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &PageCache {
        &self.cache
    }
}

#[async_trait::async_trait]
impl<F: PageFetcher> PageFetcher for CachingFetcher<F> {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        match self.cache.get_fresh(url) {
            Ok(Some(content)) => {
                debug!("Cache hit for {}", url);
                return Ok(FetchedPage::new(content, true));
            }
            Ok(None) => debug!("Cache miss for {}", url),
            Err(e) => warn!("Failed to read cache for {}: {}", url, e),
        }

        let page = self.inner.fetch(url).await?;

        let _ = self
            .cache
            .store(url, &page.content)
            .inspect_err(|e| warn!("Failed to cache {}: {}", url, e));

        Ok(page)
    }
}
