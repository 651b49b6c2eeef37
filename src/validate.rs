use url::Url;

use crate::error::PipelineError;

pub const MISSING_INPUT: &str = "Please provide both the API key and URL to get started.";
pub const INVALID_URL: &str = "Please enter a valid URL (YouTube or website).";

/// One submission's inputs, owned by a single pipeline run and dropped after it
#[derive(Debug, Clone)]
pub struct Request {
    pub api_key: String,
    pub url: Url,
}

/// Check both fields and parse the URL. Pure, synchronous, no network.
pub fn validate(api_key: &str, url: &str) -> Result<Request, PipelineError> {
    if api_key.trim().is_empty() || url.trim().is_empty() {
        return Err(PipelineError::Validation(MISSING_INPUT.to_string()));
    }

    let parsed = Url::parse(url.trim()).map_err(|_| PipelineError::Validation(INVALID_URL.to_string()))?;

    // Absolute URL with a host; "mailto:" and friends parse but have no host
    if !parsed.has_host() {
        return Err(PipelineError::Validation(INVALID_URL.to_string()));
    }

    Ok(Request {
        api_key: api_key.trim().to_string(),
        url: parsed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_api_key() {
        let err = validate("", "https://example.com").unwrap_err();
        assert_eq!(err.to_string(), MISSING_INPUT);
    }

    #[test]
    fn test_whitespace_api_key() {
        let err = validate("   ", "https://example.com").unwrap_err();
        assert_eq!(err.to_string(), MISSING_INPUT);
    }

    #[test]
    fn test_empty_url() {
        let err = validate("abc", "").unwrap_err();
        assert_eq!(err.to_string(), MISSING_INPUT);
    }

    #[test]
    fn test_malformed_url() {
        let err = validate("abc", "not-a-url").unwrap_err();
        assert_eq!(err.to_string(), INVALID_URL);
        assert!(err.is_validation());
    }

    #[test]
    fn test_hostless_url() {
        let err = validate("abc", "mailto:someone@example.com").unwrap_err();
        assert_eq!(err.to_string(), INVALID_URL);
    }

    #[test]
    fn test_valid_url() {
        let req = validate("abc", "https://youtu.be/dQw4w9WgXcQ").unwrap();
        assert_eq!(req.api_key, "abc");
        assert_eq!(req.url.as_str(), "https://youtu.be/dQw4w9WgXcQ");
    }

    #[test]
    fn test_inputs_trimmed() {
        let req = validate("  abc  ", "  https://example.com/post  ").unwrap();
        assert_eq!(req.api_key, "abc");
        assert_eq!(req.url.host_str(), Some("example.com"));
    }
}
