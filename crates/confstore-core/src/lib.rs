//! Core of the confstore service.
//!
//! Namespaced, path-addressable configuration documents with per-value
//! secret encryption. The store, the authorization decision and the cipher
//! are adapters (see `confstore-types`); this crate ties them together in
//! the `ConfigHandler` and exposes it over HTTP.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod api;
pub mod app;
pub mod authz;
pub mod document;
pub mod handler;
pub mod middleware;
pub mod ns_lock;
pub mod prelude;
pub mod routes;
pub mod secret;

pub use app::{App, AppBuilder, AppBuilderOpts, AppState};
pub use handler::ConfigHandler;

// vim: ts=4
