//! HTTP handlers of the config RPC endpoints

use axum::{extract::State, Json};

use crate::prelude::*;
use confstore_types::extract::OptionalAuth;
use confstore_types::types::{
	DeleteRequest, DeleteResponse, GetRequest, GetResponse, SetRequest, SetResponse,
};

/// POST /config/Config/Get
pub async fn post_get(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<GetRequest>,
) -> ApiResult<Json<GetResponse>> {
	let res = app.config.get(auth.as_ref(), &req).await?;
	Ok(Json(res))
}

/// POST /config/Config/Set
pub async fn post_set(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<SetRequest>,
) -> ApiResult<Json<SetResponse>> {
	let res = app.config.set(auth.as_ref(), &req).await?;
	Ok(Json(res))
}

/// POST /config/Config/Delete
pub async fn post_delete(
	State(app): State<App>,
	OptionalAuth(auth): OptionalAuth,
	Json(req): Json<DeleteRequest>,
) -> ApiResult<Json<DeleteResponse>> {
	let res = app.config.delete(auth.as_ref(), &req).await?;
	Ok(Json(res))
}

// vim: ts=4
