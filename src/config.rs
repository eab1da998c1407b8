use serde::Deserialize;

// =============================================================================
// Endpoint constants
// =============================================================================

/// Default base URL for the GitHub API
pub const GITHUB_API_BASE_URL: &str = "https://api.github.com";

/// Default base URL for raw repository content
pub const RAW_CONTENT_BASE_URL: &str = "https://raw.githubusercontent.com";

/// Branch the changelog document is fetched from
pub const DEFAULT_CHANGELOG_BRANCH: &str = "main";

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Configuration for an update check against one repository
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckConfig {
    /// Repository owner (GitHub user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Application name, used in the User-Agent header
    pub app_name: String,
    /// Branch the changelog is read from
    pub changelog_branch: String,
    /// Base URL for the release metadata API
    pub api_base_url: String,
    /// Base URL for raw changelog content
    pub raw_base_url: String,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            owner: String::new(),
            repo: String::new(),
            app_name: env!("CARGO_PKG_NAME").to_string(),
            changelog_branch: DEFAULT_CHANGELOG_BRANCH.to_string(),
            api_base_url: GITHUB_API_BASE_URL.to_string(),
            raw_base_url: RAW_CONTENT_BASE_URL.to_string(),
        }
    }
}

impl CheckConfig {
    /// Config for `owner/repo` with all other fields defaulted
    pub fn new(owner: &str, repo: &str) -> Self {
        Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            ..Default::default()
        }
    }
}
