//! Comparable version value
//!
//! A [`Version`] can be built from any string. When both sides parse as
//! semver (after `v` stripping and zero-padding) they compare by semver
//! precedence, so build metadata is ignored. Otherwise the text is split into
//! numeric and alphabetic runs compared pairwise, so `1.10.0` sorts above
//! `1.9.0` and `2024.01.05` equals `2024.1.5`. Runs such as `alpha`, `beta`,
//! `pre` and `rc` mark pre-releases and sort below the release they precede.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::version::semver::{parse_version, strip_v_prefix};

const PRERELEASE_KEYWORDS: &[&str] = &["alpha", "a", "beta", "b", "pre", "preview", "rc", "dev"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Numeric(String),
    Alpha(String),
}

impl Token {
    fn is_prerelease(&self) -> bool {
        matches!(self, Token::Alpha(s) if PRERELEASE_KEYWORDS.contains(&s.as_str()))
    }

    fn is_zero(&self) -> bool {
        matches!(self, Token::Numeric(n) if n.is_empty())
    }
}

/// Numeric runs are stored without leading zeros so they compare by length then text
fn compare_numeric(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_tokens(a: Option<&Token>, b: Option<&Token>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (Some(t), None) => compare_to_missing(t),
        (None, Some(t)) => compare_to_missing(t).reverse(),
        (Some(Token::Numeric(x)), Some(Token::Numeric(y))) => compare_numeric(x, y),
        (Some(Token::Alpha(x)), Some(Token::Alpha(y))) => x.cmp(y),
        (Some(Token::Numeric(_)), Some(Token::Alpha(_))) => Ordering::Greater,
        (Some(Token::Alpha(_)), Some(Token::Numeric(_))) => Ordering::Less,
    }
}

/// Compare a token against the end of the other version
fn compare_to_missing(token: &Token) -> Ordering {
    if token.is_zero() {
        Ordering::Equal
    } else if token.is_prerelease() {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn tokenize(version: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = strip_v_prefix(version.trim()).chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_ascii_digit() {
            let mut run = String::new();
            while let Some(&d) = chars.peek().filter(|d| d.is_ascii_digit()) {
                run.push(d);
                chars.next();
            }
            tokens.push(Token::Numeric(run.trim_start_matches('0').to_string()));
        } else if c.is_alphabetic() {
            let mut run = String::new();
            while let Some(&a) = chars.peek().filter(|a| a.is_alphabetic()) {
                run.extend(a.to_lowercase());
                chars.next();
            }
            tokens.push(Token::Alpha(run));
        } else {
            chars.next();
        }
    }

    tokens
}

/// Version string paired with its comparable form
#[derive(Debug, Clone)]
pub struct Version {
    raw: String,
    semver: Option<semver::Version>,
    tokens: Vec<Token>,
}

impl Version {
    pub fn new(version: &str) -> Self {
        Self {
            raw: version.to_string(),
            semver: parse_version(version),
            tokens: tokenize(version),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        if let (Some(a), Some(b)) = (&self.semver, &other.semver) {
            return a.cmp_precedence(b);
        }

        let len = self.tokens.len().max(other.tokens.len());
        (0..len)
            .map(|i| compare_tokens(self.tokens.get(i), other.tokens.get(i)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        Version::new(value)
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}
