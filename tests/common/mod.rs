//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use std::collections::VecDeque;
use std::path::PathBuf;

use dnd_uploads::config::{Config, UploadMode};
use dnd_uploads::payload::{MultipartBody, Part};
use dnd_uploads::session::PendingFile;
use dnd_uploads::transport::{RequestOptions, Transport, TransportError, TransportResponse};
use parking_lot::Mutex;
use tempfile::TempDir;

/// A request seen by [`RecordingTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub body: MultipartBody,
    pub options: RequestOptions,
}

impl RecordedRequest {
    pub fn part_names(&self) -> Vec<String> {
        self.body.parts().iter().map(|p| p.name().to_string()).collect()
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.body.parts().iter().find_map(|part| match part {
            Part::Text { name: n, value } if n == name => Some(value.clone()),
            _ => None,
        })
    }
}

/// In-memory transport that records every request and replays scripted
/// results. Without a script it answers `200 ok`.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<RecordedRequest>>,
    results: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, result: Result<TransportResponse, TransportError>) {
        self.results.lock().push_back(result);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Transport for RecordingTransport {
    async fn send(
        &self,
        body: MultipartBody,
        options: &RequestOptions,
    ) -> Result<TransportResponse, TransportError> {
        self.requests.lock().push(RecordedRequest {
            body,
            options: options.clone(),
        });
        self.results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(TransportResponse::new(200, "ok")))
    }
}

/// Config pointing at `url` with the given mode and no limits.
pub fn test_config(url: &str, mode: UploadMode) -> Config {
    let mut config = Config::default();
    config.upload.url = url.to_string();
    config.upload.mode = mode;
    config
}

pub fn text_file(name: &str, content: &str) -> PendingFile {
    PendingFile::with_guessed_type(content.as_bytes().to_vec(), name)
}

/// Write `content` to a temporary `config.toml`.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}
