//! Release wire types and the derived update summary

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::update::compare::is_newer;

/// One downloadable file attached to a release
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
    /// Size in bytes
    pub size: u64,
}

/// Response from the GitHub Releases API
///
/// All fields are required; a response missing any of them fails to
/// decode. Extra fields are ignored.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Release {
    pub tag_name: String,
    pub name: String,
    /// Release notes body, markdown
    pub body: String,
    pub html_url: String,
    /// ISO-8601 publication timestamp, as sent by the API
    pub published_at: String,
    pub assets: Vec<ReleaseAsset>,
}

/// Outcome of comparing the installed version against the latest release.
///
/// Derived once per completed check and replaced wholesale, never
/// mutated in place.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInfo {
    pub current_version: String,
    /// Tag with leading non-digit characters (at minimum a `v`) stripped
    pub latest_version: String,
    pub release_notes: String,
    pub release_url: String,
    /// Download URL of the first `.dmg` asset, if any
    pub installer_url: Option<String>,
    /// Download URL of the first `.zip` asset, if any
    pub archive_url: Option<String>,
    /// None when the API timestamp fails to parse
    pub published_at: Option<DateTime<Utc>>,
    pub update_available: bool,
}

impl UpdateInfo {
    /// Derive the update summary for `current_version` from a release.
    pub fn from_release(release: &Release, current_version: &str) -> Self {
        let latest_version = release
            .tag_name
            .trim_start_matches(|c: char| !c.is_ascii_digit())
            .to_string();

        let asset_url = |suffix: &str| {
            release
                .assets
                .iter()
                .find(|a| a.name.ends_with(suffix))
                .map(|a| a.browser_download_url.clone())
        };

        Self {
            current_version: current_version.to_string(),
            update_available: is_newer(&latest_version, current_version),
            release_notes: release.body.clone(),
            release_url: release.html_url.clone(),
            installer_url: asset_url(".dmg"),
            archive_url: asset_url(".zip"),
            published_at: DateTime::parse_from_rfc3339(&release.published_at)
                .ok()
                .map(|t| t.with_timezone(&Utc)),
            latest_version,
        }
    }
}
