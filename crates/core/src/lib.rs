//! Shared domain types for the gatehouse access-control services.

pub mod access;
pub mod error;
pub mod types;
