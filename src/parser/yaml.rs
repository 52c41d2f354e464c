//! YAML content parser

use serde_yaml::Value;
use tracing::debug;

/// Error returned when content is not valid YAML
///
/// Every failure reported by the underlying parser collapses into this single
/// kind so callers only have one shape to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Content could not be parsed as YAML.")]
pub struct ParseError;

/// Parse YAML text into a generic value tree
///
/// Mappings keep their insertion order. Empty input parses to `Value::Null`;
/// callers that treat blank content specially should check before calling.
pub fn parse_yaml(content: &str) -> Result<Value, ParseError> {
    serde_yaml::from_str(content).map_err(|e| {
        debug!("YAML parse failed: {}", e);
        ParseError
    })
}
