//! Accessors over the generic YAML value tree

use regex::Regex;
use serde_yaml::Value;

/// Convenience accessors used by extraction routines
pub trait YamlValueExt {
    /// Look up a string key in a mapping
    fn get_key(&self, key: &str) -> Option<&Value>;

    /// Iterate the items of a sequence (empty for anything else)
    fn iter_seq(&self) -> Box<dyn Iterator<Item = &Value> + '_>;

    /// String form of a scalar leaf
    ///
    /// Strings are returned as-is, numbers and booleans are formatted.
    /// Null, mappings and sequences have no scalar form.
    fn as_scalar_string(&self) -> Option<String>;

    /// Match the scalar form against `regex`
    ///
    /// Returns the first capture group, or the whole match when the pattern
    /// has no groups.
    fn match_scalar(&self, regex: &Regex) -> Option<String>;

    /// Null, an empty mapping or sequence, or a whitespace-only string
    fn is_blank(&self) -> bool;
}

impl YamlValueExt for Value {
    fn get_key(&self, key: &str) -> Option<&Value> {
        self.as_mapping()?.get(key)
    }

    fn iter_seq(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Value::Sequence(items) => Box::new(items.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }

    fn as_scalar_string(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Tagged(tagged) => tagged.value.as_scalar_string(),
            Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
        }
    }

    fn match_scalar(&self, regex: &Regex) -> Option<String> {
        let text = self.as_scalar_string()?;
        let captures = regex.captures(&text)?;
        captures
            .get(1)
            .or_else(|| captures.get(0))
            .map(|m| m.as_str().to_string())
    }

    fn is_blank(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Sequence(items) => items.is_empty(),
            Value::Mapping(map) => map.is_empty(),
            Value::Tagged(tagged) => tagged.value.is_blank(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }
}
