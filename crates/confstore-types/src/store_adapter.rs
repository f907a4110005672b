//! Adapter that persists namespace documents as opaque blobs.
//!
//! One record per namespace: key = namespace, value = the serialized JSON
//! document. Adapters never interpret the bytes.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::prelude::*;

#[async_trait]
pub trait StoreAdapter: Debug + Send + Sync {
	/// Reads the record stored under `key`.
	///
	/// Returns `Error::NotFound` if there is no such record, any other error
	/// means the store could not be read.
	async fn read(&self, key: &str) -> CsResult<Box<[u8]>>;

	/// Creates or replaces the record stored under `key`
	async fn write(&self, key: &str, data: &[u8]) -> CsResult<()>;
}

// vim: ts=4
