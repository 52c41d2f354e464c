//! Shared test utilities

#![allow(dead_code)]

pub mod fetcher;

pub use fetcher::MockFetcher;
