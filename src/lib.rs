//! Movie recommendations served from a precomputed similarity matrix.
//!
//! The catalog and matrix snapshots are loaded once and shared read-only;
//! lookups are pure functions over them. Per-client UI state (selection,
//! favorites, random picks) lives in sessions keyed by the `x-session-id`
//! header.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
