//! YAML strategy entry points

use regex::Regex;
use tracing::debug;
use url::Url;

use crate::fetch::fetcher::PageFetcher;
use crate::parser::parse_yaml;
use crate::strategy::error::StrategyError;
use crate::strategy::extract::{Extractor, extract};
use crate::strategy::types::MatchData;
use crate::version::Version;

/// Dispatch priority. Zero means the strategy is only used when requested
/// explicitly, never picked automatically for a URL.
pub const PRIORITY: u8 = 0;

/// Whether `url` is an http(s) URL this strategy can fetch
pub fn match_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
}

/// Extracts versions from YAML documents
pub struct YamlStrategy<F: PageFetcher> {
    fetcher: F,
}

impl<F: PageFetcher> YamlStrategy<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Find versions in the YAML document at `url`
    ///
    /// `provided_content` bypasses the fetcher. Blank URLs and blank content
    /// return an empty result without parsing or invoking the extractor.
    pub async fn find_versions(
        &self,
        url: &str,
        regex: Option<&Regex>,
        provided_content: Option<&str>,
        extractor: Option<&Extractor>,
    ) -> Result<MatchData, StrategyError> {
        let extractor = extractor.ok_or(StrategyError::MissingBlock)?;

        let mut match_data = MatchData::new(url, regex);
        if url.trim().is_empty() {
            return Ok(match_data);
        }

        let content = match provided_content {
            Some(content) => content.to_string(),
            None => {
                let page = self.fetcher.fetch(url).await?;
                debug!("Fetched {} (from local cache: {})", url, page.cached);
                page.content
            }
        };
        match_data.cached = true;

        if content.trim().is_empty() {
            debug!("Blank content for {}", url);
            return Ok(match_data);
        }

        let value = parse_yaml(&content)?;
        for version in extract(&value, regex, extractor)? {
            let parsed = Version::new(&version);
            match_data.matches.entry(version).or_insert(parsed);
        }
        debug!("Found {} version(s) at {}", match_data.matches.len(), url);

        Ok(match_data)
    }
}
