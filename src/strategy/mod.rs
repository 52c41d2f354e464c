//! YAML livecheck strategy
//!
//! ```text
//! URL ──▶ match_url (advisory)
//!
//! URL / content ──▶ YamlStrategy::find_versions
//!                        │
//!                        ├─▶ PageFetcher (when no content is provided)
//!                        ├─▶ parse_yaml
//!                        ├─▶ extract (+ Extractor)
//!                        ▼
//!                    MatchData
//! ```
//!
//! # Modules
//!
//! - [`yaml`]: URL matcher and the `find_versions` orchestrator
//! - [`extract`]: extraction routines and result normalization
//! - [`key_path`]: declarative extractor built from a `a.*.b` path
//! - [`types`]: `MatchData` result structure
//! - [`error`]: strategy error taxonomy

pub mod error;
pub mod extract;
pub mod key_path;
pub mod types;
pub mod yaml;

pub use error::StrategyError;
pub use extract::{Extractor, RawExtraction, extract, versions_from_content};
pub use key_path::KeyPath;
pub use types::MatchData;
pub use yaml::{PRIORITY, YamlStrategy, match_url};
