use crate::SummaryResult;
use crate::error::PipelineError;

/// Render the terminal outcome of one request as a single user-visible
/// string. Validation messages are shown verbatim; every downstream failure
/// is prefixed with "Exception: ".
pub fn present(result: &Result<SummaryResult, PipelineError>) -> String {
    match result {
        Ok(summary) => summary.text.clone(),
        Err(e) if e.is_validation() => e.to_string(),
        Err(e) => format!("Exception: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::{INVALID_URL, MISSING_INPUT};

    #[test]
    fn test_present_success() {
        let result = Ok(SummaryResult {
            text: "A concise summary.".to_string(),
        });
        assert_eq!(present(&result), "A concise summary.");
    }

    #[test]
    fn test_present_missing_input() {
        let result = Err(PipelineError::Validation(MISSING_INPUT.to_string()));
        assert_eq!(present(&result), "Please provide both the API key and URL to get started.");
    }

    #[test]
    fn test_present_invalid_url() {
        let result = Err(PipelineError::Validation(INVALID_URL.to_string()));
        assert_eq!(present(&result), "Please enter a valid URL (YouTube or website).");
    }

    #[test]
    fn test_present_content_error_prefixed() {
        let result = Err(PipelineError::ContentUnavailable(
            "Could not retrieve a YouTube transcript: no hi captions".to_string(),
        ));
        let rendered = present(&result);
        assert!(rendered.starts_with("Exception: "));
        assert!(rendered.contains("Could not retrieve a YouTube transcript"));
    }

    #[test]
    fn test_present_summarization_error_prefixed() {
        let result = Err(PipelineError::Summarization("Groq API returned 401".to_string()));
        assert_eq!(present(&result), "Exception: Groq API returned 401");
    }
}
