//! Concrete fetcher implementations

pub mod github;
