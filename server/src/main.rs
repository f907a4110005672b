#![forbid(unsafe_code)]

use std::{env, path, sync::Arc};

use confstore_core::{secret, AppBuilder};
use confstore_store_adapter_fs::StoreAdapterFs;
use confstore_store_adapter_redb::StoreAdapterRedb;
use confstore_types::prelude::*;
use confstore_types::store_adapter::StoreAdapter;

pub struct Config {
	pub listen: String,
	pub data_dir: path::PathBuf,
	pub store: String,
	pub secret_key: Option<String>,
	pub jwt_secret: Option<String>,
	pub default_namespace: Option<String>,
	pub admin_namespace: Option<String>,
}

impl Config {
	fn from_env() -> Self {
		Config {
			listen: env::var("LISTEN").unwrap_or("127.0.0.1:8080".to_string()),
			data_dir: path::PathBuf::from(env::var("DATA_DIR").unwrap_or("./data".to_string())),
			store: env::var("STORE").unwrap_or("redb".to_string()),
			secret_key: env::var("CONFIG_SECRET_KEY").ok(),
			jwt_secret: env::var("JWT_SECRET").ok(),
			default_namespace: env::var("DEFAULT_NAMESPACE").ok(),
			admin_namespace: env::var("ADMIN_NAMESPACE").ok(),
		}
	}
}

async fn open_store(config: &Config) -> CsResult<Arc<dyn StoreAdapter>> {
	match config.store.as_str() {
		"redb" => Ok(Arc::new(StoreAdapterRedb::new(config.data_dir.join("config.redb")).await?)),
		"fs" => Ok(Arc::new(StoreAdapterFs::new(config.data_dir.join("docs")).await?)),
		other => {
			error!("FATAL: Unknown STORE: {} (expected redb or fs)", other);
			Err(Error::ConfigError(format!("unknown store: {}", other)))
		}
	}
}

#[tokio::main]
async fn main() -> CsResult<()> {
	if env::args().nth(1).as_deref() == Some("genkey") {
		println!("{}", secret::generate_key_base64());
		return Ok(());
	}

	let config = Config::from_env();
	let mut builder = AppBuilder::new();

	let Some(secret_key) = config.secret_key.as_deref() else {
		error!("FATAL: CONFIG_SECRET_KEY is not set");
		return Err(Error::ConfigError("CONFIG_SECRET_KEY is not set".to_string()));
	};
	let cipher = secret::AesGcmCipher::from_base64(secret_key).map_err(|e| {
		error!("FATAL: Cannot use CONFIG_SECRET_KEY: {}", e);
		e
	})?;

	builder
		.listen(config.listen.as_str())
		.store_adapter(open_store(&config).await?)
		.cipher(Arc::new(cipher));
	if let Some(jwt_secret) = config.jwt_secret.as_deref() {
		builder.jwt_secret(jwt_secret);
	}
	if let Some(namespace) = config.default_namespace.as_deref() {
		builder.default_namespace(namespace);
	}
	if let Some(namespace) = config.admin_namespace.as_deref() {
		builder.admin_namespace(namespace);
	}

	builder.run().await
}

// vim: ts=4
