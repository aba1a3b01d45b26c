//! The credits pipeline engine.
//!
//! [`CreditsEngine`] sequences a full run:
//!
//! 1. Walk the paginated contributors list until an empty page or an error.
//! 2. For each contributor, fetch the user profile and resolve a display
//!    name, throttled by a fixed inter-request delay.
//! 3. Format each contributor as one markdown line and write it out.
//!
//! Every network failure past the credential check degrades the result
//! instead of aborting: a list error keeps the pages fetched so far, a
//! profile error blanks that one name, a write error falls back to the
//! login-only line. The run always produces best-effort output.

use std::io::Write;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::github::{ContributorRecord, GitHubClient};
use crate::models::{EnrichedContributor, FetchOutcome, RunSummary};
use crate::normalize::normalize_name;

/// The sequential credits pipeline.
///
/// All requests are issued one at a time. The enrichment loop sleeps a
/// fixed delay after every profile request to stay under the API rate
/// limit, so parallel fan-out is excluded by design.
pub struct CreditsEngine {
    config: AppConfig,
    client: GitHubClient,
}

impl CreditsEngine {
    /// Create a new engine from a validated config and a ready client.
    pub fn new(config: AppConfig, client: GitHubClient) -> Self {
        info!(repo = %config.github.repo, "initializing credits engine");
        Self { config, client }
    }

    /// Return a reference to the configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Walk the contributors list page by page.
    ///
    /// Returns the concatenated records in API order plus the terminal
    /// state of the walk. An error response terminates pagination but the
    /// records accumulated before it are kept; partial results are valid
    /// output, not a fatal condition.
    pub async fn collect_contributors(&self) -> (Vec<ContributorRecord>, FetchOutcome) {
        let repo = &self.config.github.repo;
        let mut contributors = Vec::new();
        let mut page = 1u32;

        loop {
            match self.client.contributors_page(repo, page).await {
                Ok(records) if records.is_empty() => {
                    debug!(page, "empty page, pagination complete");
                    return (contributors, FetchOutcome::Complete);
                }
                Ok(mut records) => {
                    debug!(page, count = records.len(), "accumulated contributors page");
                    contributors.append(&mut records);
                    page += 1;
                }
                Err(err) => {
                    warn!(page, error = %err, "contributor fetch failed, keeping partial results");
                    return (contributors, FetchOutcome::Aborted);
                }
            }
        }
    }

    /// Resolve the display name for one login.
    ///
    /// Never fails: every error path degrades to an empty name with a log
    /// line. Sleeps the configured delay after the request, success or not.
    pub async fn resolve_display_name(&self, login: &str) -> String {
        let result = self.client.user_profile(login).await;
        tokio::time::sleep(self.config.fetch.profile_delay()).await;

        match result {
            Ok(profile) => shape_display_name(profile.name.as_deref()),
            Err(err) => {
                warn!(login, error = %err, "failed to fetch profile");
                String::new()
            }
        }
    }

    /// Run the full pipeline, writing one line per contributor to `out`.
    pub async fn run<W: Write>(&self, out: &mut W) -> RunSummary {
        let (records, outcome) = self.collect_contributors().await;
        info!(
            count = records.len(),
            outcome = %outcome,
            "contributor listing fetched"
        );

        let mut summary = RunSummary {
            contributors_seen: records.len(),
            ..RunSummary::default()
        };

        let html_url = self.config.github.html_url.trim_end_matches('/');
        for record in records {
            let login = match record.login {
                Some(login) => login,
                None => {
                    warn!("skipping contributor record with missing login");
                    summary.records_skipped += 1;
                    continue;
                }
            };

            let display_name = self.resolve_display_name(&login).await;
            if !display_name.is_empty() {
                summary.names_resolved += 1;
            }

            let contributor = EnrichedContributor {
                login,
                display_name,
            };

            let line = contributor.format_line(html_url);
            if let Err(err) = writeln!(out, "{}", line) {
                warn!(
                    login = %contributor.login,
                    error = %err,
                    "failed to write credits line, falling back to login-only form"
                );
                let fallback = contributor.fallback_line(html_url);
                if let Err(err) = writeln!(out, "{}", fallback) {
                    warn!(login = %contributor.login, error = %err, "fallback write failed, line dropped");
                    continue;
                }
            }
            summary.lines_written += 1;
        }

        info!(
            contributors = summary.contributors_seen,
            lines = summary.lines_written,
            named = summary.names_resolved,
            skipped = summary.records_skipped,
            "credits run finished"
        );
        summary
    }
}

/// Shape a raw profile name into the display-name form.
///
/// A missing, blank, or literal `"none"` name (the API's habit for cleared
/// profiles, in any case) yields the empty string. Anything else is
/// normalized to ASCII and given a single trailing separator space so the
/// formatter can concatenate it directly against the login markup.
fn shape_display_name(raw: Option<&str>) -> String {
    let trimmed = match raw {
        Some(name) => name.trim(),
        None => return String::new(),
    };
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("none") {
        return String::new();
    }
    format!("{} ", normalize_name(trimmed))
}
