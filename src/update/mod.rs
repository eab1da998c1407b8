//! Update detection layer
//!
//! This module provides the core functionality for fetching release
//! metadata, comparing the installed version against the latest release,
//! and slicing the repository changelog down to the entries a user
//! upgrading across that gap would care about.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Fetcher   │────▶│   Checker   │────▶│  CheckState │
//! │  (network)  │     │ (coordinate)│     │ (published) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Release   │     │  Changelog  │
//! │ (wire shape)│     │(parse+slice)│
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`changelog`]: Markdown changelog parsing and version-range slicing
//! - [`checker`]: Check coordination and observable result state
//! - [`compare`]: Dotted-integer version comparison
//! - [`error`]: Error types for fetch operations
//! - [`fetcher`]: Traits for fetching release metadata and changelogs
//! - [`fetchers`]: Concrete fetcher implementations (GitHub)
//! - [`release`]: Release wire types and derived [`release::UpdateInfo`]

pub mod changelog;
pub mod checker;
pub mod compare;
pub mod error;
pub mod fetcher;
pub mod fetchers;
pub mod release;
