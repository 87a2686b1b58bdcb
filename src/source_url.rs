//! Normalisation of user-supplied stylesheet URLs before a run.

use crate::error::PipelineError;
use url::Url;

/// Turns user input into the absolute URL handed to `generate`.
///
/// Input without a scheme is taken to be `http://`. The result must parse as
/// an `http` or `https` URL with a host.
pub fn normalize_source_url(input: &str) -> Result<String, PipelineError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid(input, "URL is empty"));
    }

    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let parsed = Url::parse(&candidate).map_err(|e| invalid(input, &e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(input, "only http and https URLs are supported"));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid(input, "URL has no host"));
    }
    Ok(candidate)
}

fn invalid(url: &str, reason: &str) -> PipelineError {
    PipelineError::InvalidUrl {
        url: url.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_is_added_when_missing() {
        assert_eq!(
            normalize_source_url("fonts.example.com/css?family=Roboto").unwrap(),
            "http://fonts.example.com/css?family=Roboto"
        );
        assert_eq!(
            normalize_source_url(" https://fonts.example.com/css ").unwrap(),
            "https://fonts.example.com/css"
        );
    }

    #[test]
    fn non_http_and_garbage_are_rejected() {
        assert!(normalize_source_url("").is_err());
        assert!(normalize_source_url("ftp://fonts.example.com/a.css").is_err());
        assert!(normalize_source_url("http://").is_err());
        assert!(matches!(
            normalize_source_url("http://exa mple.com"),
            Err(PipelineError::InvalidUrl { .. })
        ));
    }
}
