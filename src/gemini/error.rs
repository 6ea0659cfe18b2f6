// Gemini API error taxonomy
//
// Every failure of the backend boundary lands in one of these variants so
// callers can distinguish transport problems, API rejections, and the
// successful-call-but-empty-payload case.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    /// Network-level failure: connect, timeout, TLS.
    #[error("failed to reach the Gemini API: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status (auth, quota,
    /// model-not-found, server errors). Carries the backend message.
    #[error("Gemini API request failed (status {status}): {message}")]
    Api { status: u16, message: String },

    /// The call succeeded but the response body did not parse.
    #[error("failed to parse Gemini API response: {0}")]
    Parse(String),

    /// The call succeeded but carried no usable text.
    #[error("empty response")]
    EmptyResponse,
}

impl GeminiError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Server errors and transport failures are transient; auth (401/403)
    /// and quota (429) rejections are not, and neither is a response we
    /// could not interpret.
    pub fn is_retryable(&self) -> bool {
        match self {
            GeminiError::Transport(_) => true,
            GeminiError::Api { status, .. } => *status >= 500,
            GeminiError::Parse(_) | GeminiError::EmptyResponse => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_errors_are_retryable() {
        let err = GeminiError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert!(err.is_retryable());
    }

    #[test]
    fn test_auth_and_quota_errors_are_not_retryable() {
        for status in [401, 403, 429] {
            let err = GeminiError::Api {
                status,
                message: String::new(),
            };
            assert!(!err.is_retryable(), "status {} should not retry", status);
        }
    }

    #[test]
    fn test_empty_response_is_not_retryable() {
        assert!(!GeminiError::EmptyResponse.is_retryable());
    }
}
