//! release-check: update detection for GitHub-hosted applications
//!
//! Given the installed version of an application, this crate asks the
//! GitHub Releases API for the latest published release, decides whether
//! an update is available, and fetches the repository changelog to show
//! what changed between the installed and latest versions.
//!
//! The entry point is [`UpdateChecker`], which publishes its results
//! through an observable [`CheckState`].

pub mod config;
pub mod update;

pub use config::CheckConfig;
pub use update::changelog::ChangelogEntry;
pub use update::checker::{CheckState, UpdateChecker};
pub use update::release::UpdateInfo;
