//! `reqwest`-backed transport.

use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{self, Form};
use reqwest::{Body, Client, Method};
use tokio::time::timeout;

use crate::config::TransportConfig;
use crate::payload::{MultipartBody, Part};
use crate::transport::error::TransportError;
use crate::transport::{RequestOptions, Transport, TransportResponse};

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(std::time::Duration::from_secs(
                config.connect_timeout_seconds as u64,
            ))
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("Failed to build client: {}", e)))?;

        Ok(Self { client })
    }

    async fn do_send(
        &self,
        body: MultipartBody,
        options: &RequestOptions,
    ) -> Result<TransportResponse, TransportError> {
        let method = Method::from_bytes(options.method.as_bytes())
            .map_err(|e| TransportError::InvalidRequest(format!("Bad method: {}", e)))?;

        let mut builder = self
            .client
            .request(method, &options.url)
            .multipart(build_form(body)?);

        for (name, value) in &options.headers {
            // The multipart form owns the content type and its boundary.
            if name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
                tracing::warn!(value = %value, "ignoring content-type override on upload request");
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::InvalidRequest(e.to_string())
            } else {
                TransportError::Connection {
                    url: options.url.clone(),
                    source: e,
                }
            }
        })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| TransportError::Response(e.to_string()))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok(TransportResponse::new(status.as_u16(), bytes))
    }
}

/// Turn rendered parts into a reqwest form, keeping their order.
///
/// Field names go out unencoded so bracketed keys like `files[upload]`
/// reach the server as written.
fn build_form(body: MultipartBody) -> Result<Form, TransportError> {
    let mut form = Form::new().percent_encode_noop();
    for part in body {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File {
                name,
                filename,
                mime_type,
                data,
            } => {
                let len = data.len() as u64;
                let file_part = multipart::Part::stream_with_length(Body::from(data), len)
                    .file_name(filename)
                    .mime_str(&mime_type)
                    .map_err(|e| {
                        TransportError::InvalidRequest(format!(
                            "Bad MIME type '{}': {}",
                            mime_type, e
                        ))
                    })?;
                form.part(name, file_part)
            }
        };
    }
    Ok(form)
}

impl Transport for HttpTransport {
    async fn send(
        &self,
        body: MultipartBody,
        options: &RequestOptions,
    ) -> Result<TransportResponse, TransportError> {
        tracing::debug!(
            url = %options.url,
            method = %options.method,
            parts = body.len(),
            bytes = body.content_len(),
            "sending upload request"
        );

        match timeout(options.timeout, self.do_send(body, options)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout {
                duration: options.timeout.as_secs(),
            }),
        }
    }
}
