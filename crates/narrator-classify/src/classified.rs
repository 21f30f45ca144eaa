use std::fmt;

use http::StatusCode;
use serde::Serialize;

use crate::error::HttpError;

/// Failure taxonomy shared by every consumer of upstream errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::EnumIter, strum::IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// Upstream quota, credits or token allowance exhausted
    Quota,
    /// Upstream rejected the credentials
    AuthFailure,
    /// Caller-side pre-flight check failed (e.g. empty input)
    Validation,
    /// Required upstream credential is not configured
    Configuration,
    /// Anything else, including transport failures and unreadable bodies
    NetworkOrUnknown,
}

impl ErrorKind {
    /// Fixed message shown to the end user for this kind
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::Quota => "The speech service quota has been used up. Please wait or upgrade your plan and try again.",
            Self::AuthFailure => "The speech service rejected the configured API key. Please check the credentials.",
            Self::Validation => "Please provide some text to narrate (within the allowed length) and try again.",
            Self::Configuration => "The speech service is not configured. Please set an API key.",
            Self::NetworkOrUnknown => "Audio generation failed. The default clip is still available.",
        }
    }

    /// Status a server-side caller should answer with, independent of upstream
    pub const fn recommended_status(self) -> StatusCode {
        match self {
            Self::Quota => StatusCode::TOO_MANY_REQUESTS,
            Self::AuthFailure => StatusCode::UNAUTHORIZED,
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Configuration | Self::NetworkOrUnknown => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Normalized, user-safe representation of an upstream or local failure
///
/// `Display` renders the fixed user message. The vendor detail is only
/// reachable through [`ClassifiedError::raw_detail`] and `Debug`, both meant
/// for logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedError {
    kind: ErrorKind,
    raw_detail: String,
}

impl ClassifiedError {
    pub(crate) fn new(kind: ErrorKind, raw_detail: impl Into<String>) -> Self {
        Self {
            kind,
            raw_detail: raw_detail.into(),
        }
    }

    /// Caller-side pre-flight failure, raised before any network call
    pub fn validation(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, detail)
    }

    /// Missing upstream credential, raised before any network call
    pub fn configuration(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, detail)
    }

    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub const fn user_message(&self) -> &'static str {
        self.kind.user_message()
    }

    pub const fn recommended_status(&self) -> StatusCode {
        self.kind.recommended_status()
    }

    /// Original vendor message or body, for diagnostic logging only
    pub fn raw_detail(&self) -> &str {
        &self.raw_detail
    }
}

impl fmt::Display for ClassifiedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.user_message())
    }
}

impl std::error::Error for ClassifiedError {}

impl HttpError for ClassifiedError {
    fn status_code(&self) -> StatusCode {
        self.recommended_status()
    }

    fn error_type(&self) -> &str {
        match self.kind {
            ErrorKind::Quota => "rate_limit_error",
            ErrorKind::AuthFailure => "authentication_error",
            ErrorKind::Validation => "invalid_request_error",
            ErrorKind::Configuration => "configuration_error",
            ErrorKind::NetworkOrUnknown => "api_error",
        }
    }

    fn client_message(&self) -> String {
        self.user_message().to_owned()
    }
}
