use std::time::Duration;

use narrator_classify::ClassifiedError;
use reqwest::{
    Client,
    header::{CONNECTION, HeaderMap, HeaderValue},
};

/// HTTP client for upstream speech requests
pub fn http_client(timeout: Duration) -> Result<Client, ClassifiedError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));

    Client::builder()
        .timeout(timeout)
        .pool_idle_timeout(Some(Duration::from_secs(5)))
        .tcp_nodelay(true)
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .default_headers(headers)
        .build()
        .map_err(|e| ClassifiedError::configuration(format!("failed to build HTTP client: {e}")))
}
