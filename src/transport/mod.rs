//! Transport seam: send a rendered body, get a response back.
//!
//! The session never talks to the network directly. It hands a
//! [`MultipartBody`] plus [`RequestOptions`] to a [`Transport`] and waits for
//! the result; that await is the only suspension point of a send cycle.

mod error;
mod http;

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;

use crate::config::Config;
use crate::payload::MultipartBody;

pub use error::TransportError;
pub use http::HttpTransport;

/// Sends rendered bodies somewhere.
pub trait Transport {
    fn send(
        &self,
        body: MultipartBody,
        options: &RequestOptions,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>>;
}

/// Per-request settings. Listeners may rewrite them during `send-options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub url: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

impl RequestOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            url: config.upload.url.clone(),
            method: config.transport.method.to_ascii_uppercase(),
            headers: config
                .transport
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone()))
                .collect(),
            timeout: Duration::from_secs(config.transport.timeout_seconds as u64),
        }
    }
}

/// A successful response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Bytes,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Body as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_config() {
        let mut config = Config::default();
        config.upload.url = "http://localhost/upload".to_string();
        config.transport.method = "put".to_string();
        config.transport.timeout_seconds = 7;
        config
            .transport
            .headers
            .insert("X-Token".to_string(), "abc".to_string());

        let options = RequestOptions::from_config(&config);
        assert_eq!(options.url, "http://localhost/upload");
        assert_eq!(options.method, "PUT");
        assert_eq!(options.timeout, Duration::from_secs(7));
        assert_eq!(options.headers, vec![("X-Token".to_string(), "abc".to_string())]);
    }

    #[test]
    fn response_text_is_lossy() {
        let response = TransportResponse::new(200, &b"ok\xff"[..]);
        assert_eq!(response.text(), "ok\u{fffd}");
    }
}
