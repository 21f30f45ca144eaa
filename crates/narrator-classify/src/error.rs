use http::StatusCode;

/// Trait for errors that can be surfaced as HTTP responses
///
/// Implemented by [`crate::ClassifiedError`] so a server-side caller can
/// answer with a stable status and message no matter what the upstream
/// service actually returned.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `rate_limit_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to end users
    fn client_message(&self) -> String;
}
