//! Filesystem store adapter: one `<namespace>.json` file per namespace.
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target, so readers see either the old or the new document.

#![forbid(unsafe_code)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::{
	fs::{create_dir_all, read, remove_file, rename, File},
	io::AsyncWriteExt,
};
use tracing::{debug, warn};

use confstore_types::{prelude::*, store_adapter::StoreAdapter, utils};

fn doc_file_path(base_dir: &Path, namespace: &str) -> CsResult<PathBuf> {
	utils::validate_namespace(namespace)?;
	Ok(base_dir.join(format!("{}.json", namespace)))
}

fn tmp_file_path(base_dir: &Path) -> CsResult<PathBuf> {
	Ok(base_dir.join(format!("tmp-{}", utils::random_id()?)))
}

#[derive(Debug)]
pub struct StoreAdapterFs {
	base_dir: Box<Path>,
}

impl StoreAdapterFs {
	pub async fn new(base_dir: impl Into<PathBuf>) -> CsResult<Self> {
		let base_dir: PathBuf = base_dir.into();
		create_dir_all(&base_dir).await?;
		Ok(Self { base_dir: base_dir.into_boxed_path() })
	}
}

#[async_trait]
impl StoreAdapter for StoreAdapterFs {
	async fn read(&self, key: &str) -> CsResult<Box<[u8]>> {
		let path = doc_file_path(&self.base_dir, key)?;
		match read(&path).await {
			Ok(buf) => Ok(buf.into_boxed_slice()),
			Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(Error::NotFound),
			Err(err) => Err(err.into()),
		}
	}

	async fn write(&self, key: &str, data: &[u8]) -> CsResult<()> {
		let path = doc_file_path(&self.base_dir, key)?;
		let tmp_path = tmp_file_path(&self.base_dir)?;

		let res = async {
			let mut file = File::create(&tmp_path).await?;
			file.write_all(data).await?;
			file.sync_all().await?;
			rename(&tmp_path, &path).await?;
			Ok::<(), Error>(())
		}
		.await;

		if let Err(err) = res {
			warn!("Writing {:?} failed, removing tmpfile {:?}: {}", &path, &tmp_path, err);
			let _ = remove_file(&tmp_path).await;
			return Err(err);
		}

		debug!("Stored {:?} ({} bytes)", &path, data.len());
		Ok(())
	}
}


// vim: ts=4
