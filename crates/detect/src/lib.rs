//! Gatehouse detection sidecar library.
//!
//! Wraps a lightweight ONNX face detector behind two HTTP endpoints and
//! posts best-effort access-log entries back to the CRUD service. No
//! identity matching happens here: the sidecar only detects that a face
//! is present.

pub mod client;
pub mod config;
pub mod detector;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
