//! Result types for the YAML strategy

use indexmap::IndexMap;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::version::Version;

/// Outcome of one `find_versions` call
#[derive(Debug, Clone, Serialize)]
pub struct MatchData {
    /// Extracted version strings mapped to comparable versions, in discovery order
    pub matches: IndexMap<String, Version>,
    /// Matching pattern supplied by the caller, echoed unchanged
    #[serde(
        serialize_with = "serialize_regex",
        skip_serializing_if = "Option::is_none"
    )]
    pub regex: Option<Regex>,
    pub url: String,
    /// Whether content was resolved, either supplied by the caller or fetched
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub cached: bool,
}

impl MatchData {
    pub fn new(url: &str, regex: Option<&Regex>) -> Self {
        Self {
            matches: IndexMap::new(),
            regex: regex.cloned(),
            url: url.to_string(),
            cached: false,
        }
    }

    /// Version strings in discovery order
    pub fn versions(&self) -> Vec<&str> {
        self.matches.keys().map(String::as_str).collect()
    }

    /// Highest version found, if any
    pub fn latest(&self) -> Option<&Version> {
        self.matches.values().max()
    }
}

fn serialize_regex<S: Serializer>(regex: &Option<Regex>, serializer: S) -> Result<S::Ok, S::Error> {
    match regex {
        Some(regex) => serializer.serialize_str(regex.as_str()),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn match_data_serializes_without_optional_fields() {
        let data = MatchData::new("https://example.com/releases.yml", None);

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "matches": {},
                "url": "https://example.com/releases.yml"
            })
        );
    }

    #[test]
    fn match_data_serializes_regex_and_cached_flag() {
        let regex = Regex::new(r"^v?(\d+(?:\.\d+)+)$").unwrap();
        let mut data = MatchData::new("https://example.com/releases.yml", Some(&regex));
        data.cached = true;
        data.matches.insert("1.2.0".to_string(), Version::new("1.2.0"));
        data.matches.insert("1.10.0".to_string(), Version::new("1.10.0"));

        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            json!({
                "matches": { "1.2.0": "1.2.0", "1.10.0": "1.10.0" },
                "regex": r"^v?(\d+(?:\.\d+)+)$",
                "url": "https://example.com/releases.yml",
                "cached": true
            })
        );
    }

    #[test]
    fn latest_returns_highest_version_regardless_of_order() {
        let mut data = MatchData::new("https://example.com", None);
        for v in ["1.2.0", "1.10.0", "1.9.3"] {
            data.matches.insert(v.to_string(), Version::new(v));
        }

        assert_eq!(data.latest(), Some(&Version::new("1.10.0")));
        assert_eq!(data.versions(), vec!["1.2.0", "1.10.0", "1.9.3"]);
    }
}
