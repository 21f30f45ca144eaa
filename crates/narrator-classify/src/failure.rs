use serde_json::Value;

use crate::{ClassifiedError, rules};

/// JSON pointers checked for a vendor status/error code, in order
const CODE_POINTERS: &[&str] = &["/detail/status", "/errorType", "/error/type", "/error/code"];

/// JSON pointers checked for a vendor message, in order
const MESSAGE_POINTERS: &[&str] = &["/detail/message", "/error/message", "/message", "/error", "/detail"];

/// Best-effort parsed body of a failed upstream response
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    /// Body parsed as JSON, with whatever shape the vendor chose
    Json(Value),
    /// Body that is not JSON (HTML error pages, plain text, truncated output)
    Text(String),
}

impl UpstreamBody {
    /// Parse a raw response body, keeping it as text when it is not JSON
    pub fn parse(raw: &str) -> Self {
        serde_json::from_str(raw).map_or_else(|_| Self::Text(raw.to_owned()), Self::Json)
    }

    /// Lowercased serialized form the keyword rules are matched against
    pub(crate) fn haystack(&self) -> String {
        match self {
            Self::Json(value) => value.to_string().to_lowercase(),
            Self::Text(text) => text.to_lowercase(),
        }
    }

    /// Vendor message suitable for logs
    ///
    /// Picks the nested `detail.status` / `detail.message` pair or the flat
    /// `errorType` / `error` fields when present, otherwise the whole body.
    pub fn vendor_message(&self) -> String {
        match self {
            Self::Text(text) => text.trim().to_owned(),
            Self::Json(value) => {
                let code = first_string(value, CODE_POINTERS);
                let message = first_string(value, MESSAGE_POINTERS);

                match (code, message) {
                    (Some(code), Some(message)) if code != message => format!("{code}: {message}"),
                    (Some(found), _) | (None, Some(found)) => found.to_owned(),
                    (None, None) => value.to_string(),
                }
            }
        }
    }
}

fn first_string<'a>(value: &'a Value, pointers: &[&str]) -> Option<&'a str> {
    pointers
        .iter()
        .find_map(|pointer| value.pointer(pointer).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
}

/// Raw description of a failure as first observed at the upstream boundary
///
/// Neither field is required to be present or well formed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawFailure {
    /// HTTP status, absent when no response was received
    pub status: Option<u16>,
    /// Response body, absent when empty or unreadable
    pub body: Option<UpstreamBody>,
    /// Client-side error text when no response was received
    ///
    /// Kept for logs only and never matched by the rules, since it echoes
    /// the request URL.
    pub transport_detail: Option<String>,
}

impl RawFailure {
    pub const fn new(status: Option<u16>, body: Option<UpstreamBody>) -> Self {
        Self {
            status,
            body,
            transport_detail: None,
        }
    }

    /// Failure built from a non-success HTTP response and its body text
    pub fn from_http(status: u16, body: &str) -> Self {
        let body = (!body.trim().is_empty()).then(|| UpstreamBody::parse(body));
        Self::new(Some(status), body)
    }

    /// Failure where no response was received (connect error, timeout, reset)
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            transport_detail: Some(message.into()),
            ..Self::default()
        }
    }

    /// Classify this failure; never fails
    pub fn classify(&self) -> ClassifiedError {
        rules::classify(self)
    }

    /// Original detail preserved for logs
    pub(crate) fn detail(&self) -> String {
        match (&self.body, self.status, &self.transport_detail) {
            (Some(body), _, _) => body.vendor_message(),
            (None, Some(status), _) => format!("upstream returned status {status} with no body"),
            (None, None, Some(detail)) => detail.clone(),
            (None, None, None) => "no response from upstream".to_owned(),
        }
    }
}
