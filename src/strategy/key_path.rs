//! Declarative extraction by key path
//!
//! A key path such as `releases.*.version` walks the parsed document: plain
//! segments look up mapping keys (or sequence indices when numeric) and `*`
//! fans out over every item of a sequence or every value of a mapping.

use std::str::FromStr;

use serde_yaml::Value;

use crate::parser::YamlValueExt;
use crate::strategy::error::StrategyError;
use crate::strategy::extract::{Extractor, RawExtraction};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Key(String),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    pub fn parse(path: &str) -> Result<Self, StrategyError> {
        let path = path.trim();
        if path.is_empty() {
            return Err(StrategyError::InvalidKeyPath("path is empty".to_string()));
        }

        let segments = path
            .split('.')
            .map(|segment| match segment.trim() {
                "" => Err(StrategyError::InvalidKeyPath(format!(
                    "empty segment in `{}`",
                    path
                ))),
                "*" => Ok(Segment::Wildcard),
                key => Ok(Segment::Key(key.to_string())),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Every node the path reaches, in document order
    pub fn select<'a>(&self, value: &'a Value) -> Vec<&'a Value> {
        let mut current = vec![value];

        for segment in &self.segments {
            current = current
                .into_iter()
                .flat_map(|node| -> Vec<&'a Value> {
                    match (segment, node) {
                        (Segment::Wildcard, Value::Sequence(items)) => items.iter().collect(),
                        (Segment::Wildcard, Value::Mapping(map)) => map.values().collect(),
                        (Segment::Key(key), Value::Mapping(_)) => {
                            node.get_key(key).into_iter().collect()
                        }
                        (Segment::Key(key), Value::Sequence(items)) => key
                            .parse::<usize>()
                            .ok()
                            .and_then(|i| items.get(i))
                            .into_iter()
                            .collect(),
                        _ => Vec::new(),
                    }
                })
                .collect();
        }

        current
    }

    /// Extractor returning every scalar the path reaches
    pub fn extractor(self) -> Extractor {
        Extractor::single(move |yaml| {
            let versions = self
                .select(yaml)
                .into_iter()
                .filter_map(YamlValueExt::as_scalar_string)
                .collect::<Vec<_>>();
            Ok(RawExtraction::Many(versions))
        })
    }

    /// Extractor returning the pattern capture of every matching scalar
    pub fn regex_extractor(self) -> Extractor {
        Extractor::with_regex(move |yaml, regex| {
            let versions = self
                .select(yaml)
                .into_iter()
                .filter_map(|node| node.match_scalar(regex))
                .collect::<Vec<_>>();
            Ok(RawExtraction::Many(versions))
        })
    }
}

impl FromStr for KeyPath {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyPath::parse(s)
    }
}
