//! Drag-and-drop upload sessions.
//!
//! An [`UploadSession`](session::UploadSession) collects files from one or
//! more bound surfaces, builds an ordered multipart payload, hands it to a
//! [`Transport`](transport::Transport) and settles the outcome exactly once
//! per cycle, however many surfaces observed it.

pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod logging;
pub mod mvi;
pub mod payload;
pub mod session;
pub mod transport;
