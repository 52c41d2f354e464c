pub mod config;
pub mod fetch;
pub mod parser;
pub mod strategy;
pub mod version;
