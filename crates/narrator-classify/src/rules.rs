use crate::{ClassifiedError, ErrorKind, RawFailure, UpstreamBody};

/// One upstream classification rule
///
/// A rule matches when the status is one of `statuses` or the lowercased
/// body contains one of `keywords`.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub kind: ErrorKind,
    pub statuses: &'static [u16],
    pub keywords: &'static [&'static str],
}

impl Rule {
    fn matches(&self, status: Option<u16>, haystack: &str) -> bool {
        status.is_some_and(|s| self.statuses.contains(&s)) || self.keywords.iter().any(|k| haystack.contains(k))
    }
}

/// Ordered rules for upstream failures, first match wins
///
/// Quota comes before auth: some vendors send 401-adjacent bodies that
/// mention token or credit exhaustion, and the user has to wait or upgrade
/// rather than fix credentials. `Validation` and `Configuration` never come
/// from upstream, callers raise them through the [`ClassifiedError`]
/// constructors before any request is sent. Everything unmatched is
/// `NetworkOrUnknown`.
pub const UPSTREAM_RULES: [Rule; 2] = [
    Rule {
        kind: ErrorKind::Quota,
        statuses: &[429],
        keywords: &["quota_exceeded", "quota", "credit", "token"],
    },
    Rule {
        kind: ErrorKind::AuthFailure,
        statuses: &[401],
        keywords: &["401", "authentication", "unauthorized"],
    },
];

/// Classify a raw upstream failure
pub fn classify(failure: &RawFailure) -> ClassifiedError {
    let haystack = failure.body.as_ref().map(UpstreamBody::haystack).unwrap_or_default();

    let kind = UPSTREAM_RULES
        .iter()
        .find(|rule| rule.matches(failure.status, &haystack))
        .map_or(ErrorKind::NetworkOrUnknown, |rule| rule.kind);

    let error = ClassifiedError::new(kind, failure.detail());

    tracing::warn!(
        kind = %kind,
        status = ?failure.status,
        detail = error.raw_detail(),
        "upstream failure classified"
    );

    error
}
