//! GitHub REST API client.
//!
//! Thin asynchronous wrapper over the two endpoints the credits pipeline
//! consumes: the paginated contributors list and the per-user profile.
//! Every fetch returns an explicit [`GitHubError`] so the engine can decide
//! at each call site whether a failure aborts pagination or just degrades
//! one contributor.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;
use tracing::{debug, info, instrument};

use crate::errors::GitHubError;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One record from `GET /repos/{owner}/{repo}/contributors`.
///
/// `login` can be absent on the wire (e.g. anonymous contributors); such
/// records are invalid for the credits listing and are skipped upstream.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributorRecord {
    pub login: Option<String>,
}

/// A user profile from `GET /users/{login}`.
///
/// Only the published display name is consumed; it is frequently null.
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Asynchronous GitHub REST API client.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
    per_page: u32,
}

impl GitHubClient {
    /// Create a new client.
    ///
    /// `api_url` is the API base (e.g. `https://api.github.com`); a trailing
    /// slash is tolerated. The token is sent as `Authorization: token <pat>`
    /// on every request.
    pub fn new(
        api_url: impl Into<String>,
        user_agent: &str,
        per_page: u32,
        token: impl Into<String>,
    ) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("gitcredits")),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .expect("failed to build reqwest client");
        info!(api_url = %api_url, "created GitHubClient");
        Self {
            http,
            api_url,
            token: token.into(),
            per_page,
        }
    }

    /// Fetch one page of the contributors list for `repo` (`owner/repo`).
    ///
    /// Pages are 1-based. An empty vector means the listing is exhausted.
    #[instrument(skip(self))]
    pub async fn contributors_page(
        &self,
        repo: &str,
        page: u32,
    ) -> Result<Vec<ContributorRecord>, GitHubError> {
        let url = format!("{}/repos/{}/contributors", self.api_url, repo);
        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .query(&[
                ("per_page", self.per_page.to_string()),
                ("page", page.to_string()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GitHubError::ParseError(e.to_string()))?;

        // The API signals errors as a JSON object with a `message` field
        // even under a 200 in some proxy setups, so the shape is checked
        // before deserializing.
        match payload {
            serde_json::Value::Array(items) => {
                let records: Vec<ContributorRecord> = items
                    .into_iter()
                    .map(serde_json::from_value)
                    .collect::<Result<_, _>>()
                    .map_err(|e| GitHubError::ParseError(e.to_string()))?;
                debug!(count = records.len(), page, "fetched contributors page");
                Ok(records)
            }
            other => {
                let message = other
                    .get("message")
                    .and_then(|m| m.as_str())
                    .unwrap_or("unknown error")
                    .to_string();
                Err(GitHubError::UnexpectedPayload(message))
            }
        }
    }

    /// Fetch the profile for a single user.
    #[instrument(skip(self))]
    pub async fn user_profile(&self, login: &str) -> Result<UserProfile, GitHubError> {
        let url = format!("{}/users/{}", self.api_url, login);
        let resp = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("token {}", self.token))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GitHubError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GitHubError::ParseError(e.to_string()))?;

        if !payload.is_object() {
            return Err(GitHubError::UnexpectedPayload(format!(
                "profile for '{}' is not an object",
                login
            )));
        }

        let profile: UserProfile = serde_json::from_value(payload)
            .map_err(|e| GitHubError::ParseError(e.to_string()))?;
        debug!(login, has_name = profile.name.is_some(), "fetched user profile");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contributor_record_tolerates_missing_login() {
        let record: ContributorRecord = serde_json::from_str(r#"{"contributions": 12}"#).unwrap();
        assert!(record.login.is_none());

        let record: ContributorRecord =
            serde_json::from_str(r#"{"login": "octocat", "id": 1}"#).unwrap();
        assert_eq!(record.login.as_deref(), Some("octocat"));
    }

    #[test]
    fn test_user_profile_tolerates_null_name() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"login": "octocat", "name": null}"#).unwrap();
        assert!(profile.name.is_none());

        let profile: UserProfile =
            serde_json::from_str(r#"{"login": "octocat", "name": "The Octocat"}"#).unwrap();
        assert_eq!(profile.name.as_deref(), Some("The Octocat"));
    }
}
