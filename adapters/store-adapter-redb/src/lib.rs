//! redb-based store adapter.
//!
//! All namespaces share one database file with a single `config` table,
//! keyed by namespace. redb calls are blocking so each operation runs on the
//! blocking thread pool.

#![forbid(unsafe_code)]

mod error;

use async_trait::async_trait;
use redb::ReadableDatabase;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

pub use error::Error;
use error::from_redb_error;

use confstore_types::prelude::CsResult;
use confstore_types::store_adapter::StoreAdapter;

/// Namespace documents: namespace -> serialized document
const TABLE_CONFIG: redb::TableDefinition<&str, &[u8]> = redb::TableDefinition::new("config");

#[derive(Debug)]
pub struct StoreAdapterRedb {
	db: Arc<redb::Database>,
}

impl StoreAdapterRedb {
	/// Opens (or creates) the database file and makes sure the table exists
	pub async fn new(db_path: impl AsRef<Path>) -> CsResult<Self> {
		let db_path = db_path.as_ref().to_path_buf();
		if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
			tokio::fs::create_dir_all(parent).await.map_err(Error::from)?;
		}

		let db = tokio::task::spawn_blocking(move || -> Result<redb::Database, Error> {
			let db = redb::Database::create(&db_path).map_err(from_redb_error)?;
			let tx = db.begin_write().map_err(from_redb_error)?;
			tx.open_table(TABLE_CONFIG).map_err(from_redb_error)?;
			tx.commit().map_err(from_redb_error)?;
			info!("Opened config database {:?}", db_path);
			Ok(db)
		})
		.await
		.map_err(Error::from)??;

		Ok(Self { db: Arc::new(db) })
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterRedb {
	async fn read(&self, key: &str) -> CsResult<Box<[u8]>> {
		let db = Arc::clone(&self.db);
		let key = key.to_string();

		let data = tokio::task::spawn_blocking(move || -> Result<Option<Box<[u8]>>, Error> {
			let tx = db.begin_read().map_err(from_redb_error)?;
			let table = tx.open_table(TABLE_CONFIG).map_err(from_redb_error)?;
			let value = table.get(key.as_str()).map_err(from_redb_error)?;
			Ok(value.map(|v| Box::from(v.value())))
		})
		.await
		.map_err(Error::from)??;

		data.ok_or(confstore_types::error::Error::NotFound)
	}

	async fn write(&self, key: &str, data: &[u8]) -> CsResult<()> {
		let db = Arc::clone(&self.db);
		let key = key.to_string();
		let data = data.to_vec();

		tokio::task::spawn_blocking(move || -> Result<(), Error> {
			let tx = db.begin_write().map_err(from_redb_error)?;
			{
				let mut table = tx.open_table(TABLE_CONFIG).map_err(from_redb_error)?;
				table.insert(key.as_str(), data.as_slice()).map_err(from_redb_error)?;
			}
			tx.commit().map_err(from_redb_error)?;
			debug!(namespace = %key, len = data.len(), "Stored config document");
			Ok(())
		})
		.await
		.map_err(Error::from)??;

		Ok(())
	}
}


// vim: ts=4
