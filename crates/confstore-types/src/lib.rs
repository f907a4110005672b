//! Shared types, adapter traits, and core utilities for confstore.
//!
//! This crate contains the foundational types that are shared between the
//! core crate, the server binary and all adapter implementations, so adapter
//! crates do not depend on the HTTP layer.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![forbid(unsafe_code)]

pub mod authorizer;
pub mod error;
pub mod extract;
pub mod prelude;
pub mod secret_cipher;
pub mod store_adapter;
pub mod types;
pub mod utils;

// vim: ts=4
