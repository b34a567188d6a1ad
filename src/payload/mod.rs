//! Ordered multi-valued form payload and its multipart rendering.
//!
//! ```text
//! append/remove/filter ──→ FormPayload ──render()──→ MultipartBody ──Transport──→ wire
//! ```
//!
//! A key holds a single value until it is appended a second time, at which
//! point it becomes a list and stays one. Rendering walks keys in insertion
//! order and emits one part per value.

mod form;
mod multipart;
mod value;

pub use form::FormPayload;
pub use multipart::{MultipartBody, MultipartSink, Part};
pub use value::{Entry, FieldValue, DEFAULT_FILE_TYPE};
