//! Base URL validation.
//!
//! A candidate is accepted when it parses as an absolute URL with a host.
//! No reachability check and no scheme allow-list.

use thiserror::Error;
use url::Url;

/// Reasons a base URL update is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BaseUrlError {
    /// No candidate given, or the candidate is empty.
    #[error("Base URL is required")]
    MissingInput,

    /// The candidate is not an absolute URL with a host.
    #[error("Invalid URL format")]
    InvalidUrl { reason: String },
}

/// Validate a base URL candidate, returning it unchanged on success.
pub fn parse_base_url(candidate: Option<&str>) -> Result<&str, BaseUrlError> {
    let candidate = match candidate {
        Some(c) if !c.is_empty() => c,
        _ => return Err(BaseUrlError::MissingInput),
    };

    let url = Url::parse(candidate).map_err(|e| BaseUrlError::InvalidUrl {
        reason: e.to_string(),
    })?;

    if !url.has_host() {
        return Err(BaseUrlError::InvalidUrl {
            reason: format!("'{}' has no host", candidate),
        });
    }

    Ok(candidate)
}
