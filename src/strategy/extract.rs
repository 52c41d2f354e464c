//! Extraction routines and normalization of their results
//!
//! An [`Extractor`] wraps caller logic that turns a parsed YAML document into
//! version strings. Two shapes exist: one that only sees the document and one
//! that also receives the matching pattern. The pattern-aware shape needs a
//! pattern at call time; invoking it without one is an [`StrategyError::Arity`].

use std::fmt;

use indexmap::IndexSet;
use regex::Regex;
use serde_yaml::Value;
use tracing::debug;

use crate::parser::{YamlValueExt, parse_yaml};
use crate::strategy::error::StrategyError;

type SingleFn = dyn Fn(&Value) -> Result<RawExtraction, StrategyError> + Send + Sync;
type PatternAwareFn = dyn Fn(&Value, &Regex) -> Result<RawExtraction, StrategyError> + Send + Sync;

/// Value returned by an extraction routine
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RawExtraction {
    /// The routine found nothing
    #[default]
    Empty,
    Single(String),
    Many(Vec<String>),
}

impl RawExtraction {
    /// Flatten into a version list
    ///
    /// Blank entries and exact duplicates are dropped; first-seen order wins.
    pub fn into_versions(self) -> Vec<String> {
        let candidates = match self {
            RawExtraction::Empty => Vec::new(),
            RawExtraction::Single(version) => vec![version],
            RawExtraction::Many(versions) => versions,
        };

        candidates
            .into_iter()
            .filter(|v| !v.trim().is_empty())
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }
}

impl From<()> for RawExtraction {
    fn from(_: ()) -> Self {
        RawExtraction::Empty
    }
}

impl From<String> for RawExtraction {
    fn from(value: String) -> Self {
        RawExtraction::Single(value)
    }
}

impl From<&str> for RawExtraction {
    fn from(value: &str) -> Self {
        RawExtraction::Single(value.to_string())
    }
}

impl From<Option<String>> for RawExtraction {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawExtraction::Empty, RawExtraction::Single)
    }
}

impl From<Vec<String>> for RawExtraction {
    fn from(value: Vec<String>) -> Self {
        RawExtraction::Many(value)
    }
}

impl From<Vec<&str>> for RawExtraction {
    fn from(value: Vec<&str>) -> Self {
        RawExtraction::Many(value.into_iter().map(str::to_string).collect())
    }
}

impl TryFrom<Value> for RawExtraction {
    type Error = StrategyError;

    /// Accepts null, a string, or a sequence of strings (nulls inside the
    /// sequence are skipped). Anything else is an invalid return type.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(RawExtraction::Empty),
            Value::String(s) => Ok(RawExtraction::Single(s)),
            Value::Sequence(items) => {
                let mut versions = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(s) => versions.push(s),
                        Value::Null => {}
                        _ => return Err(StrategyError::InvalidReturnType),
                    }
                }
                Ok(RawExtraction::Many(versions))
            }
            Value::Tagged(tagged) => RawExtraction::try_from(tagged.value),
            Value::Bool(_) | Value::Number(_) | Value::Mapping(_) => {
                Err(StrategyError::InvalidReturnType)
            }
        }
    }
}

impl TryFrom<&Value> for RawExtraction {
    type Error = StrategyError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        RawExtraction::try_from(value.clone())
    }
}

impl TryFrom<Option<&Value>> for RawExtraction {
    type Error = StrategyError;

    fn try_from(value: Option<&Value>) -> Result<Self, Self::Error> {
        value.map_or(Ok(RawExtraction::Empty), RawExtraction::try_from)
    }
}

/// Caller-supplied extraction routine
pub enum Extractor {
    /// Receives the parsed document only
    Single(Box<SingleFn>),
    /// Receives the parsed document and the matching pattern
    PatternAware(Box<PatternAwareFn>),
}

impl Extractor {
    pub fn single<F>(f: F) -> Self
    where
        F: Fn(&Value) -> Result<RawExtraction, StrategyError> + Send + Sync + 'static,
    {
        Extractor::Single(Box::new(f))
    }

    pub fn with_regex<F>(f: F) -> Self
    where
        F: Fn(&Value, &Regex) -> Result<RawExtraction, StrategyError> + Send + Sync + 'static,
    {
        Extractor::PatternAware(Box::new(f))
    }

    /// Number of arguments the routine takes
    pub fn arity(&self) -> usize {
        match self {
            Extractor::Single(_) => 1,
            Extractor::PatternAware(_) => 2,
        }
    }
}

impl fmt::Debug for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Extractor")
            .field("arity", &self.arity())
            .finish()
    }
}

/// Run `extractor` against a parsed document and normalize its result
///
/// A blank document yields an empty list without invoking the routine.
/// Otherwise the routine is invoked exactly once and its errors propagate unchanged.
pub fn extract(
    value: &Value,
    regex: Option<&Regex>,
    extractor: &Extractor,
) -> Result<Vec<String>, StrategyError> {
    if value.is_blank() {
        debug!("Blank document, skipping extraction");
        return Ok(Vec::new());
    }

    let raw = match (extractor, regex) {
        (Extractor::PatternAware(_), None) => return Err(StrategyError::Arity),
        (Extractor::PatternAware(f), Some(regex)) => f(value, regex)?,
        (Extractor::Single(f), _) => f(value)?,
    };

    let versions = raw.into_versions();
    debug!("Extracted {} version(s)", versions.len());
    Ok(versions)
}

/// Parse `content` and run `extractor` on it
///
/// Blank content yields an empty list without parsing or invoking the routine.
pub fn versions_from_content(
    content: &str,
    regex: Option<&Regex>,
    extractor: &Extractor,
) -> Result<Vec<String>, StrategyError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value = parse_yaml(content)?;
    extract(&value, regex, extractor)
}
