//! Traits for fetching release metadata and changelog documents

#[cfg(test)]
use mockall::automock;

use crate::update::error::FetchError;
use crate::update::release::Release;

/// Trait for fetching the latest release of the watched repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseFetcher: Send + Sync {
    /// Fetches the latest published release.
    ///
    /// # Returns
    /// * `Ok(Release)` - Decoded release metadata
    /// * `Err(FetchError)` - Transport failure, non-2xx status, or a
    ///   response body that does not match the expected shape
    async fn fetch_latest(&self) -> Result<Release, FetchError>;
}

/// Trait for fetching the raw changelog document
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ChangelogFetcher: Send + Sync {
    /// Fetches the changelog as raw text.
    ///
    /// A body that is not valid UTF-8 yields an empty document rather
    /// than an error; only transport failures and non-2xx statuses fail.
    async fn fetch_document(&self) -> Result<String, FetchError>;
}
