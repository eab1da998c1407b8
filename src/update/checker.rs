//! Check coordination and observable result state
//!
//! [`UpdateChecker`] runs the check pipeline: fetch the latest release,
//! derive [`UpdateInfo`], and, when an update is available, fetch and
//! slice the changelog as a best-effort follow-up. Results are published
//! through a [`tokio::sync::watch`] channel so hosts can read a
//! consistent snapshot at any time or subscribe to changes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::CheckConfig;
use crate::update::changelog::{ChangelogEntry, ChangelogParser, entries_between};
use crate::update::fetcher::{ChangelogFetcher, ReleaseFetcher};
use crate::update::fetchers::github::{GitHubChangelogFetcher, GitHubReleaseFetcher};
use crate::update::release::UpdateInfo;

/// Published result state of the checker
///
/// Every field is replaced as a whole; readers never observe a partial
/// update. A failed check leaves `update_info` and `changelog` from the
/// previous successful check untouched.
#[derive(Debug, Clone, Default)]
pub struct CheckState {
    /// Outcome of the last completed check, if any
    pub update_info: Option<UpdateInfo>,
    /// True while a check is in flight
    pub is_checking: bool,
    /// When the last check completed, success or failure
    pub last_check_time: Option<DateTime<Utc>>,
    /// Description of the last failure; cleared when a new check starts
    pub last_error: Option<String>,
    /// Changelog entries in the `(current, latest]` upgrade window
    pub changelog: Vec<ChangelogEntry>,
}

/// Coordinates update checks for one repository
#[derive(Clone)]
pub struct UpdateChecker {
    releases: Arc<dyn ReleaseFetcher>,
    changelog: Arc<dyn ChangelogFetcher>,
    parser: ChangelogParser,
    current_version: String,
    state: watch::Sender<CheckState>,
    in_flight: Arc<AtomicBool>,
}

impl UpdateChecker {
    pub fn new(
        releases: Arc<dyn ReleaseFetcher>,
        changelog: Arc<dyn ChangelogFetcher>,
        current_version: &str,
    ) -> Self {
        let (state, _) = watch::channel(CheckState::default());
        Self {
            releases,
            changelog,
            parser: ChangelogParser::new(),
            current_version: current_version.to_string(),
            state,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Checker wired to the GitHub fetchers for `config`
    pub fn from_config(config: &CheckConfig, current_version: &str) -> Self {
        Self::new(
            Arc::new(GitHubReleaseFetcher::new(config, current_version)),
            Arc::new(GitHubChangelogFetcher::new(config, current_version)),
            current_version,
        )
    }

    /// Snapshot of the current published state
    pub fn state(&self) -> CheckState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every state change
    pub fn subscribe(&self) -> watch::Receiver<CheckState> {
        self.state.subscribe()
    }

    /// Start a check without blocking the caller.
    ///
    /// A call while a check is already in flight is a no-op; requests
    /// are coalesced, not queued.
    pub fn start_check(&self) {
        if !self.begin_check() {
            debug!("update check already in flight, ignoring request");
            return;
        }
        let this = self.clone();
        tokio::spawn(async move {
            this.perform_check().await;
        });
    }

    /// Run a full check inline, waiting for the changelog follow-up too.
    ///
    /// One-shot callers (the CLI) use this; interactive hosts use
    /// [`start_check`](Self::start_check) and observe the state.
    pub async fn check_to_completion(&self) {
        if !self.begin_check() {
            debug!("update check already in flight, ignoring request");
            return;
        }
        if let Some(follow_up) = self.perform_check().await {
            let _ = follow_up.await;
        }
    }

    /// Claim the in-flight slot and publish the checking state.
    /// Returns false when another check already holds it.
    fn begin_check(&self) -> bool {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return false;
        }
        self.state.send_modify(|s| {
            s.is_checking = true;
            s.last_error = None;
        });
        true
    }

    /// Fetch the release and publish the outcome. Returns the handle of
    /// the changelog follow-up task when one was spawned.
    async fn perform_check(&self) -> Option<JoinHandle<()>> {
        let result = self.releases.fetch_latest().await;
        let completed_at = Utc::now();

        let follow_up = match result {
            Ok(release) => {
                let info = UpdateInfo::from_release(&release, &self.current_version);
                let latest = info.latest_version.clone();
                let available = info.update_available;

                if available {
                    info!(
                        "update available: {} -> {}",
                        self.current_version, latest
                    );
                }

                self.state.send_modify(|s| {
                    s.update_info = Some(info);
                    s.is_checking = false;
                    s.last_check_time = Some(completed_at);
                });

                available.then(|| {
                    let this = self.clone();
                    tokio::spawn(async move {
                        this.refresh_changelog(&latest).await;
                    })
                })
            }
            Err(e) => {
                warn!("update check failed: {}", e);
                self.state.send_modify(|s| {
                    s.is_checking = false;
                    s.last_check_time = Some(completed_at);
                    s.last_error = Some(e.to_string());
                });
                None
            }
        };

        self.in_flight.store(false, Ordering::SeqCst);
        follow_up
    }

    /// Best-effort changelog refresh; failure is logged and the
    /// previously published entries are left in place.
    async fn refresh_changelog(&self, latest: &str) {
        let text = match self.changelog.fetch_document().await {
            Ok(text) => text,
            Err(e) => {
                warn!("changelog fetch failed: {}", e);
                return;
            }
        };

        let entries = self.parser.parse(&text);
        let window = entries_between(&self.current_version, latest, &entries);
        debug!(
            "changelog: {} entries parsed, {} in upgrade window",
            entries.len(),
            window.len()
        );

        self.state.send_modify(|s| s.changelog = window);
    }
}
