//! The result type every signal source returns.
//!
//! Sources never return `Err`: transport and parse problems are folded into
//! [`SourceOutcome::Failed`] so the cascade can always move on.

use crate::error::ScraperError;

/// What one source concluded about one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceOutcome {
    /// A definite in-stock / out-of-stock answer and the rule that produced it.
    Decisive {
        in_stock: bool,
        badge: String,
        title: Option<String>,
    },
    /// The source ran but found no conclusive evidence.
    Indeterminate {
        badge: Option<String>,
        title: Option<String>,
    },
    /// The source could not run or its request failed.
    Failed(SourceFailure),
}

impl SourceOutcome {
    #[must_use]
    pub fn decisive(in_stock: bool, badge: impl Into<String>, title: Option<String>) -> Self {
        Self::Decisive {
            in_stock,
            badge: badge.into(),
            title,
        }
    }

    #[must_use]
    pub fn indeterminate(badge: Option<&str>, title: Option<String>) -> Self {
        Self::Indeterminate {
            badge: badge.map(str::to_string),
            title,
        }
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Decisive { title, .. } | Self::Indeterminate { title, .. } => title.as_deref(),
            Self::Failed(_) => None,
        }
    }

    /// Diagnostic badge for this outcome, if any.
    #[must_use]
    pub fn badge(&self) -> Option<String> {
        match self {
            Self::Decisive { badge, .. } => Some(badge.clone()),
            Self::Indeterminate { badge, .. } => badge.clone(),
            Self::Failed(failure) => failure.badge(),
        }
    }

    /// `false` only for sources that did not apply to the listing at all.
    #[must_use]
    pub fn was_attempted(&self) -> bool {
        !matches!(self, Self::Failed(SourceFailure::NotApplicable))
    }
}

/// Why a source produced no signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFailure {
    /// Preconditions unmet (no item id, no SKU); the source did nothing.
    NotApplicable,
    /// The access token could not be obtained.
    Credentials,
    /// Non-2xx HTTP response.
    HttpStatus(u16),
    /// Timeout, DNS, connection or TLS failure.
    Transport,
    /// Body could not be decoded or deserialized.
    Parse,
    /// A page fetch returned JSON or a script instead of HTML.
    NonHtml,
}

impl SourceFailure {
    #[must_use]
    pub fn badge(self) -> Option<String> {
        match self {
            Self::NotApplicable => None,
            Self::Credentials => Some("AUTH".to_string()),
            Self::HttpStatus(status) => Some(format!("HTTP{status}")),
            Self::Transport => Some("HTTPERR".to_string()),
            Self::Parse => Some("PARSE".to_string()),
            Self::NonHtml => Some("NONHTML".to_string()),
        }
    }
}

impl From<&ScraperError> for SourceFailure {
    fn from(err: &ScraperError) -> Self {
        match err {
            ScraperError::Http(e) if e.is_decode() => Self::Parse,
            ScraperError::Http(e) => e
                .status()
                .map_or(Self::Transport, |status| Self::HttpStatus(status.as_u16())),
            ScraperError::Deserialize { .. } => Self::Parse,
            ScraperError::NotFound { .. } => Self::HttpStatus(404),
            ScraperError::UnexpectedStatus { status, .. } => Self::HttpStatus(*status),
            ScraperError::Credentials(_) => Self::Credentials,
            ScraperError::InvalidUrl { .. } => Self::Transport,
        }
    }
}

impl From<ScraperError> for SourceOutcome {
    fn from(err: ScraperError) -> Self {
        Self::Failed(SourceFailure::from(&err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_badges() {
        assert_eq!(SourceFailure::HttpStatus(404).badge().as_deref(), Some("HTTP404"));
        assert_eq!(SourceFailure::Transport.badge().as_deref(), Some("HTTPERR"));
        assert_eq!(SourceFailure::Parse.badge().as_deref(), Some("PARSE"));
        assert_eq!(SourceFailure::NonHtml.badge().as_deref(), Some("NONHTML"));
        assert_eq!(SourceFailure::Credentials.badge().as_deref(), Some("AUTH"));
        assert_eq!(SourceFailure::NotApplicable.badge(), None);
    }

    #[test]
    fn scraper_errors_map_to_failures() {
        let not_found = ScraperError::NotFound {
            url: "https://api.example.com/items/MLM1".to_string(),
        };
        assert_eq!(SourceFailure::from(&not_found), SourceFailure::HttpStatus(404));

        let forbidden = ScraperError::UnexpectedStatus {
            status: 403,
            url: "https://api.example.com/items/MLM1".to_string(),
        };
        assert_eq!(SourceFailure::from(&forbidden), SourceFailure::HttpStatus(403));

        let bad_json = ScraperError::Deserialize {
            context: "item".to_string(),
            source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
        };
        assert_eq!(SourceFailure::from(&bad_json), SourceFailure::Parse);

        let creds = ScraperError::Credentials("expired".to_string());
        assert_eq!(SourceOutcome::from(creds), SourceOutcome::Failed(SourceFailure::Credentials));
    }

    #[test]
    fn not_applicable_is_not_an_attempt() {
        assert!(!SourceOutcome::Failed(SourceFailure::NotApplicable).was_attempted());
        assert!(SourceOutcome::Failed(SourceFailure::Transport).was_attempted());
        assert!(SourceOutcome::indeterminate(None, None).was_attempted());
    }

    #[test]
    fn decisive_outcome_exposes_badge_and_title() {
        let outcome = SourceOutcome::decisive(true, "jsonld:instock", Some("Cafetera".to_string()));
        assert_eq!(outcome.badge().as_deref(), Some("jsonld:instock"));
        assert_eq!(outcome.title(), Some("Cafetera"));
    }
}
