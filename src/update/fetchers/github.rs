//! GitHub-backed fetcher implementations
//!
//! Release metadata comes from the Releases API, the changelog from raw
//! repository content (`CHANGELOG.md` on the configured branch).

use std::time::Duration;

use tracing::warn;

use crate::config::{CheckConfig, FETCH_TIMEOUT_MS};
use crate::update::error::FetchError;
use crate::update::fetcher::{ChangelogFetcher, ReleaseFetcher};
use crate::update::release::Release;

fn build_client(app_name: &str, current_version: &str) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(format!("{app_name}/{current_version}"))
        .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
        .build()
        .expect("Failed to create HTTP client")
}

/// Fetches the latest release from the GitHub Releases API
pub struct GitHubReleaseFetcher {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
}

impl GitHubReleaseFetcher {
    pub fn new(config: &CheckConfig, current_version: &str) -> Self {
        Self {
            client: build_client(&config.app_name, current_version),
            base_url: config.api_base_url.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ReleaseFetcher for GitHubReleaseFetcher {
    async fn fetch_latest(&self) -> Result<Release, FetchError> {
        let url = format!(
            "{}/repos/{}/{}/releases/latest",
            self.base_url, self.owner, self.repo
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(FetchError::Status(status));
        }

        response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            FetchError::Decode(e.to_string())
        })
    }
}

/// Fetches CHANGELOG.md from raw repository content
pub struct GitHubChangelogFetcher {
    client: reqwest::Client,
    base_url: String,
    owner: String,
    repo: String,
    branch: String,
}

impl GitHubChangelogFetcher {
    pub fn new(config: &CheckConfig, current_version: &str) -> Self {
        Self {
            client: build_client(&config.app_name, current_version),
            base_url: config.raw_base_url.clone(),
            owner: config.owner.clone(),
            repo: config.repo.clone(),
            branch: config.changelog_branch.clone(),
        }
    }
}

#[async_trait::async_trait]
impl ChangelogFetcher for GitHubChangelogFetcher {
    async fn fetch_document(&self) -> Result<String, FetchError> {
        let url = format!(
            "{}/{}/{}/{}/CHANGELOG.md",
            self.base_url, self.owner, self.repo, self.branch
        );

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Changelog request returned status {}: {}", status, url);
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;

        // A changelog that is not valid UTF-8 degrades to an empty
        // document; its absence must never block the update check.
        Ok(String::from_utf8(body.to_vec()).unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    fn config(server: &Server) -> CheckConfig {
        CheckConfig {
            owner: "skanehira".to_string(),
            repo: "myapp".to_string(),
            api_base_url: server.url(),
            raw_base_url: server.url(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn fetch_latest_decodes_release_metadata() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/skanehira/myapp/releases/latest")
            .match_header("accept", "application/vnd.github.v3+json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                // Three hashes: the notes body contains `"##`, which would
                // close a one-hash raw string early.
                r###"{
                    "tag_name": "v1.2.0",
                    "name": "Release 1.2.0",
                    "body": "## Fixed\n- things",
                    "html_url": "https://github.com/skanehira/myapp/releases/tag/v1.2.0",
                    "published_at": "2025-02-01T12:00:00Z",
                    "assets": [
                        {"name": "myapp.dmg", "browser_download_url": "https://dl/myapp.dmg", "size": 2048}
                    ]
                }"###,
            )
            .create_async()
            .await;

        let fetcher = GitHubReleaseFetcher::new(&config(&server), "1.0.0");
        let release = fetcher.fetch_latest().await.unwrap();

        mock.assert_async().await;
        assert_eq!(release.tag_name, "v1.2.0");
        assert_eq!(release.assets.len(), 1);
        assert_eq!(release.assets[0].size, 2048);
    }

    #[tokio::test]
    async fn fetch_latest_ignores_unknown_fields() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/skanehira/myapp/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "tag_name": "v1.2.0",
                    "name": "Release 1.2.0",
                    "body": "notes",
                    "html_url": "https://example.com",
                    "published_at": "2025-02-01T12:00:00Z",
                    "assets": [],
                    "prerelease": false,
                    "draft": false
                }"#,
            )
            .create_async()
            .await;

        let fetcher = GitHubReleaseFetcher::new(&config(&server), "1.0.0");
        let release = fetcher.fetch_latest().await.unwrap();

        mock.assert_async().await;
        assert_eq!(release.tag_name, "v1.2.0");
    }

    #[tokio::test]
    async fn fetch_latest_fails_with_status_error_on_non_2xx() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/skanehira/myapp/releases/latest")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let fetcher = GitHubReleaseFetcher::new(&config(&server), "1.0.0");
        let result = fetcher.fetch_latest().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(FetchError::Status(reqwest::StatusCode::NOT_FOUND))
        ));
    }

    #[tokio::test]
    async fn fetch_latest_fails_with_decode_error_on_missing_fields() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/repos/skanehira/myapp/releases/latest")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"tag_name": "v1.2.0"}"#)
            .create_async()
            .await;

        let fetcher = GitHubReleaseFetcher::new(&config(&server), "1.0.0");
        let result = fetcher.fetch_latest().await;

        mock.assert_async().await;
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }

    #[tokio::test]
    async fn fetch_document_returns_raw_text() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/skanehira/myapp/main/CHANGELOG.md")
            .with_status(200)
            .with_body("## 1.2.0\n- stuff\n")
            .create_async()
            .await;

        let fetcher = GitHubChangelogFetcher::new(&config(&server), "1.0.0");
        let text = fetcher.fetch_document().await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "## 1.2.0\n- stuff\n");
    }

    #[tokio::test]
    async fn fetch_document_uses_configured_branch() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/skanehira/myapp/master/CHANGELOG.md")
            .with_status(200)
            .with_body("## 1.0.0\nfirst")
            .create_async()
            .await;

        let mut config = config(&server);
        config.changelog_branch = "master".to_string();

        let fetcher = GitHubChangelogFetcher::new(&config, "1.0.0");
        let text = fetcher.fetch_document().await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "## 1.0.0\nfirst");
    }

    #[tokio::test]
    async fn fetch_document_treats_invalid_utf8_as_empty() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/skanehira/myapp/main/CHANGELOG.md")
            .with_status(200)
            .with_body(vec![0xff, 0xfe, 0xfd])
            .create_async()
            .await;

        let fetcher = GitHubChangelogFetcher::new(&config(&server), "1.0.0");
        let text = fetcher.fetch_document().await.unwrap();

        mock.assert_async().await;
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn fetch_document_fails_with_status_error_on_non_2xx() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/skanehira/myapp/main/CHANGELOG.md")
            .with_status(404)
            .create_async()
            .await;

        let fetcher = GitHubChangelogFetcher::new(&config(&server), "1.0.0");
        let result = fetcher.fetch_document().await;

        mock.assert_async().await;
        assert!(matches!(
            result,
            Err(FetchError::Status(reqwest::StatusCode::NOT_FOUND))
        ));
    }
}
