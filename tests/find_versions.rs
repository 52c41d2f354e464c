//! YAML strategy end-to-end tests
//!
//! Drive `YamlStrategy::find_versions` through its public surface with a
//! mock fetcher and hand-written extractors.

mod helper;

use futures::future::join_all;
use regex::Regex;
use serde_yaml::Value;

use helper::MockFetcher;
use yaml_livecheck::fetch::FetchError;
use yaml_livecheck::parser::YamlValueExt;
use yaml_livecheck::strategy::{
    Extractor, KeyPath, RawExtraction, StrategyError, YamlStrategy, match_url,
};
use yaml_livecheck::version::Version;

const URL: &str = "https://brew.sh/test.yml";

const VERSIONS_YAML: &str = r#"
versions:
- version: 1.1.2
- version: 1.1.2b
- version: 1.1.2a
- version: 1.1.1
- version: 1.1.0
- version: 1.1.0-rc3
- version: 1.1.0-rc2
- version: 1.1.0-rc1
- version: 1.0.x-last
- version: 1.0.3
- version: 1.0.3-rc3
- version: 1.0.3-rc2
- version: 1.0.3-rc1
- version: 1.0.2
- version: 1.0.2-rc1
- version: 1.0.1
- version: 1.0.1-rc1
- version: 1.0.0
- version: 1.0.0-rc1
- other: version is omitted from this object for testing
"#;

fn version_regex() -> Regex {
    Regex::new(r"(?i)^v?(\d+(?:\.\d+)+)$").unwrap()
}

/// Keep entries whose `version` matches the pattern, returning the capture
fn matching_versions() -> Extractor {
    Extractor::with_regex(|yaml, regex| {
        let versions = yaml
            .get_key("versions")
            .map(|items| {
                items
                    .iter_seq()
                    .filter_map(|item| item.get_key("version"))
                    .filter_map(|version| version.match_scalar(regex))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();
        Ok(versions.into())
    })
}

#[tokio::test]
async fn find_versions_extracts_matching_versions_from_fetched_document() {
    let fetcher = MockFetcher::new().with_page(URL, VERSIONS_YAML);
    let strategy = YamlStrategy::new(fetcher);
    let regex = version_regex();

    let result = strategy
        .find_versions(URL, Some(&regex), None, Some(&matching_versions()))
        .await
        .unwrap();

    assert_eq!(
        result.versions(),
        vec!["1.1.2", "1.1.1", "1.1.0", "1.0.3", "1.0.2", "1.0.1", "1.0.0"]
    );
    assert_eq!(result.regex.as_ref().map(Regex::as_str), Some(regex.as_str()));
    assert_eq!(result.url, URL);
    assert!(result.cached);
    assert_eq!(result.latest(), Some(&Version::new("1.1.2")));
    assert_eq!(strategy.fetcher().calls(), 1);
}

#[tokio::test]
async fn find_versions_extracts_matching_versions_from_provided_content() {
    let strategy = YamlStrategy::new(MockFetcher::new());
    let regex = version_regex();

    let result = strategy
        .find_versions(
            URL,
            Some(&regex),
            Some(VERSIONS_YAML),
            Some(&matching_versions()),
        )
        .await
        .unwrap();

    assert_eq!(
        result.versions(),
        vec!["1.1.2", "1.1.1", "1.1.0", "1.0.3", "1.0.2", "1.0.1", "1.0.0"]
    );
    assert!(result.cached);
    assert_eq!(strategy.fetcher().calls(), 0);
}

#[tokio::test]
async fn find_versions_with_key_path_matches_hand_written_extractor() {
    let strategy = YamlStrategy::new(MockFetcher::new());
    let regex = version_regex();
    let extractor = KeyPath::parse("versions.*.version")
        .unwrap()
        .regex_extractor();

    let result = strategy
        .find_versions(URL, Some(&regex), Some(VERSIONS_YAML), Some(&extractor))
        .await
        .unwrap();

    assert_eq!(
        result.versions(),
        vec!["1.1.2", "1.1.1", "1.1.0", "1.0.3", "1.0.2", "1.0.1", "1.0.0"]
    );
}

#[tokio::test]
async fn find_versions_returns_single_version_from_mapping() {
    let strategy = YamlStrategy::new(MockFetcher::new());
    let extractor =
        Extractor::single(|yaml: &Value| RawExtraction::try_from(yaml.get_key("version")));

    let result = strategy
        .find_versions(URL, None, Some("version: 1.2.3"), Some(&extractor))
        .await
        .unwrap();

    assert_eq!(result.versions(), vec!["1.2.3"]);
    assert!(result.regex.is_none());
}

#[tokio::test]
async fn find_versions_rejects_integer_return_value() {
    let strategy = YamlStrategy::new(MockFetcher::new());
    let extractor = Extractor::single(|yaml| RawExtraction::try_from(yaml.get_key("build")));

    let result = strategy
        .find_versions(URL, None, Some("build: 42"), Some(&extractor))
        .await;

    assert!(matches!(result, Err(StrategyError::InvalidReturnType)));
}

#[tokio::test]
async fn find_versions_requires_regex_for_pattern_aware_extractor() {
    let strategy = YamlStrategy::new(MockFetcher::new());

    let err = strategy
        .find_versions(URL, None, Some(VERSIONS_YAML), Some(&matching_versions()))
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Two arguments found in `strategy` block but no regex provided."
    );
}

#[tokio::test]
async fn find_versions_skips_fetch_for_blank_url() {
    let strategy = YamlStrategy::new(MockFetcher::new());

    let result = strategy
        .find_versions("", None, None, Some(&matching_versions()))
        .await
        .unwrap();

    assert!(result.matches.is_empty());
    assert!(result.regex.is_none());
    assert_eq!(result.url, "");
    assert!(!result.cached);
    assert_eq!(strategy.fetcher().calls(), 0);
}

#[tokio::test]
async fn find_versions_skips_extractor_for_blank_fetched_document() {
    let fetcher = MockFetcher::new().with_page(URL, "# releases moved\n---\n");
    let strategy = YamlStrategy::new(fetcher);
    let regex = version_regex();
    let extractor = Extractor::with_regex(|_, _| Ok("9.9.9".into()));

    let result = strategy
        .find_versions(URL, Some(&regex), None, Some(&extractor))
        .await
        .unwrap();

    assert!(result.matches.is_empty());
    assert!(result.cached);
    assert_eq!(strategy.fetcher().calls(), 1);
}

#[tokio::test]
async fn find_versions_propagates_fetch_failure() {
    let strategy = YamlStrategy::new(MockFetcher::new());

    let result = strategy
        .find_versions(URL, None, None, Some(&matching_versions()))
        .await;

    assert!(matches!(
        result,
        Err(StrategyError::Fetch(FetchError::NotFound(_)))
    ));
}

#[tokio::test]
async fn find_versions_runs_independently_for_concurrent_urls() {
    let first = "https://example.com/a.yml";
    let second = "https://example.com/b.yml";
    let fetcher = MockFetcher::new()
        .with_page(first, "version: 1.0.0")
        .with_page(second, "version: 2.0.0");
    let strategy = YamlStrategy::new(fetcher);
    let extractor = KeyPath::parse("version").unwrap().extractor();

    let results = join_all(
        [first, second]
            .iter()
            .map(|url| strategy.find_versions(url, None, None, Some(&extractor))),
    )
    .await;

    let versions: Vec<_> = results
        .into_iter()
        .map(|r| r.unwrap().versions().join(","))
        .collect();
    assert_eq!(versions, vec!["1.0.0", "2.0.0"]);
    assert_eq!(strategy.fetcher().calls(), 2);
}

#[test]
fn match_url_accepts_only_http_schemes() {
    assert!(match_url("https://brew.sh/blog/"));
    assert!(!match_url("ftp://brew.sh/"));
}
