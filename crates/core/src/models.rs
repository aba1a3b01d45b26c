//! Domain model types for the credits pipeline.

use serde::Serialize;

// ---------------------------------------------------------------------------
// Enriched contributor
// ---------------------------------------------------------------------------

/// A contributor with its resolved display name, ready for formatting.
///
/// `display_name` is either empty or an ASCII name carrying exactly one
/// trailing separator space. The space lives in the value on purpose: it
/// lets [`format_line`](Self::format_line) concatenate name and login markup
/// directly, with no conditional spacing. Do not trim it away.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedContributor {
    pub login: String,
    pub display_name: String,
}

impl EnrichedContributor {
    /// Render the markdown credits line for this contributor.
    pub fn format_line(&self, html_url: &str) -> String {
        format!(
            "* {}[@{}]({}/{})",
            self.display_name, self.login, html_url, self.login
        )
    }

    /// Render the login-only fallback line, used when writing the full line
    /// to the output stream fails.
    pub fn fallback_line(&self, html_url: &str) -> String {
        format!("* [@{}]({}/{})", self.login, html_url, self.login)
    }
}

// ---------------------------------------------------------------------------
// Pagination outcome
// ---------------------------------------------------------------------------

/// Terminal state of a contributor pagination walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// An empty page was reached; the listing is complete.
    Complete,
    /// A transport, status, or payload error stopped the walk early. The
    /// pages accumulated before the error are still valid output.
    Aborted,
}

impl std::fmt::Display for FetchOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Aborted => write!(f, "aborted"),
        }
    }
}

// ---------------------------------------------------------------------------
// Run summary
// ---------------------------------------------------------------------------

/// Statistics from a single credits run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Contributor records returned by the list endpoint.
    pub contributors_seen: usize,
    /// Lines actually written to the output stream.
    pub lines_written: usize,
    /// Contributors whose profile yielded a non-empty display name.
    pub names_resolved: usize,
    /// Records dropped for a missing login.
    pub records_skipped: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_line_with_name() {
        let contributor = EnrichedContributor {
            login: "jdoe".into(),
            display_name: "Jane Doe ".into(),
        };
        assert_eq!(
            contributor.format_line("https://github.com"),
            "* Jane Doe [@jdoe](https://github.com/jdoe)"
        );
    }

    #[test]
    fn test_format_line_without_name() {
        let contributor = EnrichedContributor {
            login: "bot42".into(),
            display_name: String::new(),
        };
        assert_eq!(
            contributor.format_line("https://github.com"),
            "* [@bot42](https://github.com/bot42)"
        );
    }

    #[test]
    fn test_fallback_line_ignores_name() {
        let contributor = EnrichedContributor {
            login: "jdoe".into(),
            display_name: "Jane Doe ".into(),
        };
        assert_eq!(
            contributor.fallback_line("https://github.com"),
            "* [@jdoe](https://github.com/jdoe)"
        );
    }

    #[test]
    fn test_fetch_outcome_display() {
        assert_eq!(FetchOutcome::Complete.to_string(), "complete");
        assert_eq!(FetchOutcome::Aborted.to_string(), "aborted");
    }
}
