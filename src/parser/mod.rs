//! Parser layer
//! - yaml.rs: YAML text to generic value, uniform parse error
//! - value.rs: accessors over the generic value tree

pub mod value;
pub mod yaml;

pub use value::YamlValueExt;
pub use yaml::{ParseError, parse_yaml};
