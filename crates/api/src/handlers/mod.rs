//! HTTP handlers, one module per resource.

pub mod access_logs;
pub mod doors;
pub mod users;
