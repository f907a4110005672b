//! Config handler: Get / Set / Delete on namespace documents
//!
//! Every operation resolves the namespace (falling back to the default one),
//! authorizes the caller against it, and only then touches the store.
//! Set and Delete rewrite the whole document, holding the namespace lock from
//! the read until the write. Error paths never issue a write.

use serde_json::Value;
use std::sync::Arc;

use crate::document::{self, Document};
use crate::ns_lock::NamespaceLocks;
use crate::prelude::*;
use crate::secret;
use confstore_types::authorizer::{AuthCtx, Authorizer};
use confstore_types::secret_cipher::SecretCipher;
use confstore_types::store_adapter::StoreAdapter;
use confstore_types::types::{
	resolve_namespace, ConfigValue, DeleteRequest, DeleteResponse, GetRequest, GetResponse,
	SetRequest, SetResponse, DEFAULT_NAMESPACE, OP_DELETE, OP_GET, OP_SET,
};

#[derive(Debug)]
pub struct ConfigHandler {
	store: Arc<dyn StoreAdapter>,
	authorizer: Arc<dyn Authorizer>,
	cipher: Arc<dyn SecretCipher>,
	locks: NamespaceLocks,
	default_namespace: Box<str>,
}

fn caller(auth: Option<&AuthCtx>) -> &str {
	auth.map_or("anonymous", |a| a.id.as_ref())
}

fn into_text(op: &'static str, data: Vec<u8>) -> ApiResult<String> {
	String::from_utf8(data).map_err(|_| ApiError::internal(op, "value is not valid UTF-8"))
}

impl ConfigHandler {
	pub fn new(
		store: Arc<dyn StoreAdapter>,
		authorizer: Arc<dyn Authorizer>,
		cipher: Arc<dyn SecretCipher>,
	) -> Self {
		Self {
			store,
			authorizer,
			cipher,
			locks: NamespaceLocks::new(),
			default_namespace: DEFAULT_NAMESPACE.into(),
		}
	}

	pub fn with_default_namespace(mut self, namespace: impl Into<Box<str>>) -> Self {
		self.default_namespace = namespace.into();
		self
	}

	pub fn default_namespace(&self) -> &str {
		&self.default_namespace
	}

	async fn authorize(
		&self,
		op: &'static str,
		auth: Option<&AuthCtx>,
		namespace: &str,
	) -> ApiResult<()> {
		match self.authorizer.authorize(auth, namespace).await {
			Ok(()) => Ok(()),
			Err(Error::PermissionDenied) => {
				warn!(op = op, caller = %caller(auth), namespace = %namespace, "Access denied");
				Err(ApiError::forbidden(
					op,
					format!("{} may not access namespace {}", caller(auth), namespace),
				))
			}
			Err(Error::Unauthorized) => {
				warn!(op = op, namespace = %namespace, "Unauthenticated access");
				Err(ApiError::unauthorized(
					op,
					format!("credentials required to access namespace {}", namespace),
				))
			}
			Err(err) => {
				error!(op = op, namespace = %namespace, error = %err, "Authorization failed");
				Err(ApiError::internal(op, err.to_string()))
			}
		}
	}

	/// Reads the raw document of `namespace`; `None` if there is none yet
	async fn read_raw(&self, op: &'static str, namespace: &str) -> ApiResult<Option<Box<[u8]>>> {
		match self.store.read(namespace).await {
			Ok(data) => Ok(Some(data)),
			Err(Error::NotFound) => Ok(None),
			Err(err) => {
				warn!(op = op, namespace = %namespace, error = %err, "Store read failed");
				Err(ApiError::bad_request(op, format!("read error: {}: {}", err, namespace)))
			}
		}
	}

	fn parse(op: &'static str, namespace: &str, data: &[u8]) -> ApiResult<Document> {
		Document::parse(data).map_err(|err| {
			warn!(op = op, namespace = %namespace, error = %err, "Malformed document in store");
			ApiError::bad_request(op, format!("malformed document: {}: {}", err, namespace))
		})
	}

	async fn write_document(
		&self,
		op: &'static str,
		namespace: &str,
		doc: &Document,
	) -> ApiResult<()> {
		let data = doc.to_bytes().map_err(|err| ApiError::internal(op, err.to_string()))?;
		self.store.write(namespace, &data).await.map_err(|err| {
			error!(op = op, namespace = %namespace, error = %err, "Store write failed");
			ApiError::internal(op, format!("write error: {}: {}", err, namespace))
		})
	}

	/// Returns the whole document (empty path) or the value at `path`.
	///
	/// With the secret flag the value at `path` is decoded and decrypted.
	/// Whole-document reads are returned verbatim, secret flag or not.
	pub async fn get(&self, auth: Option<&AuthCtx>, req: &GetRequest) -> ApiResult<GetResponse> {
		let namespace = resolve_namespace(&req.namespace, &self.default_namespace);
		self.authorize(OP_GET, auth, namespace).await?;

		let Some(raw) = self.read_raw(OP_GET, namespace).await? else {
			return Err(ApiError::not_found(OP_GET, format!("no config for namespace {}", namespace)));
		};

		if req.path.is_empty() {
			debug!(namespace = %namespace, "Read whole document");
			let data = into_text(OP_GET, raw.into_vec())?;
			return Ok(GetResponse { value: ConfigValue::new(data) });
		}

		let doc = Self::parse(OP_GET, namespace, &raw)?;
		let value = doc
			.get(&req.path)
			.map_err(|err| ApiError::bad_request(OP_GET, err.to_string()))?
			.ok_or_else(|| {
				ApiError::not_found(
					OP_GET,
					format!("no value at path {} in namespace {}", req.path, namespace),
				)
			})?;

		let data = if req.secret {
			let Value::String(stored) = value else {
				return Err(ApiError::internal(OP_GET, "badly encoded secret"));
			};
			secret::open(self.cipher.as_ref(), stored.as_bytes())
				.map_err(|err| ApiError::internal(OP_GET, err.to_string()))?
		} else {
			document::value_to_data(value).map_err(|err| ApiError::internal(OP_GET, err.to_string()))?
		};

		debug!(namespace = %namespace, path = %req.path, secret = req.secret, "Read value");
		Ok(GetResponse { value: ConfigValue::new(into_text(OP_GET, data)?) })
	}

	/// Stores a value at `path`, creating the namespace document on first write.
	///
	/// With the secret flag the value is stored as base64(encrypt(value)).
	pub async fn set(&self, auth: Option<&AuthCtx>, req: &SetRequest) -> ApiResult<SetResponse> {
		let Some(value) = &req.value else {
			return Err(ApiError::bad_request(OP_SET, "invalid change"));
		};
		let namespace = resolve_namespace(&req.namespace, &self.default_namespace);
		self.authorize(OP_SET, auth, namespace).await?;

		let new_value = if req.secret {
			let sealed = secret::seal(self.cipher.as_ref(), value.data.as_bytes())
				.map_err(|err| ApiError::internal(OP_SET, err.to_string()))?;
			Value::String(sealed)
		} else {
			document::value_from_data(&req.path, &value.data)
				.map_err(|err| ApiError::bad_request(OP_SET, err.to_string()))?
		};

		let _guard = self.locks.lock(namespace).await;
		let mut doc = match self.read_raw(OP_SET, namespace).await? {
			Some(raw) => Self::parse(OP_SET, namespace, &raw)?,
			None => {
				info!(namespace = %namespace, "Creating namespace document");
				Document::new()
			}
		};

		doc.set(&req.path, new_value).map_err(|err| ApiError::bad_request(OP_SET, err.to_string()))?;
		self.write_document(OP_SET, namespace, &doc).await?;

		info!(
			caller = %caller(auth),
			namespace = %namespace,
			path = %req.path,
			secret = req.secret,
			"Config value set"
		);
		Ok(SetResponse {})
	}

	/// Removes `path` from the namespace document. A missing path is not an error.
	pub async fn delete(
		&self,
		auth: Option<&AuthCtx>,
		req: &DeleteRequest,
	) -> ApiResult<DeleteResponse> {
		let namespace = resolve_namespace(&req.namespace, &self.default_namespace);
		self.authorize(OP_DELETE, auth, namespace).await?;

		let _guard = self.locks.lock(namespace).await;
		let Some(raw) = self.read_raw(OP_DELETE, namespace).await? else {
			return Err(ApiError::not_found(
				OP_DELETE,
				format!("nothing to delete in namespace {}", namespace),
			));
		};

		let mut doc = Self::parse(OP_DELETE, namespace, &raw)?;
		let removed = doc
			.delete(&req.path)
			.map_err(|err| ApiError::bad_request(OP_DELETE, err.to_string()))?;

		if removed.is_none() {
			debug!(namespace = %namespace, path = %req.path, "Nothing at path, document unchanged");
			return Ok(DeleteResponse {});
		}

		self.write_document(OP_DELETE, namespace, &doc).await?;
		info!(caller = %caller(auth), namespace = %namespace, path = %req.path, "Config value deleted");
		Ok(DeleteResponse {})
	}
}


// vim: ts=4
