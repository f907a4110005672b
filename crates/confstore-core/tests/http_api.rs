//! End-to-end tests of the HTTP surface: auth middleware, routing, error bodies.

use async_trait::async_trait;
use axum::{
	body::Body,
	http::{Request, StatusCode},
	Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use confstore_core::middleware::generate_access_token;
use confstore_core::secret::{AesGcmCipher, KEY_LENGTH};
use confstore_core::{routes, AppBuilder};
use confstore_types::prelude::*;
use confstore_types::store_adapter::StoreAdapter;

const JWT_SECRET: &str = "test-jwt-secret";

#[derive(Debug, Default)]
struct MemoryStore {
	records: Mutex<HashMap<String, Vec<u8>>>,
}

#[async_trait]
impl StoreAdapter for MemoryStore {
	async fn read(&self, key: &str) -> CsResult<Box<[u8]>> {
		let records = self.records.lock().unwrap();
		records.get(key).map(|v| v.clone().into_boxed_slice()).ok_or(Error::NotFound)
	}

	async fn write(&self, key: &str, data: &[u8]) -> CsResult<()> {
		self.records.lock().unwrap().insert(key.to_string(), data.to_vec());
		Ok(())
	}
}

fn router() -> Router {
	let mut builder = AppBuilder::new();
	builder
		.jwt_secret(JWT_SECRET)
		.store_adapter(Arc::new(MemoryStore::default()))
		.cipher(Arc::new(AesGcmCipher::new(&[9u8; KEY_LENGTH]).unwrap()));
	routes::init(builder.build().unwrap())
}

fn token(issuer: &str, scope: Option<&str>) -> String {
	generate_access_token(JWT_SECRET, "acc-1", issuer, scope, 3600).unwrap()
}

async fn call(router: &Router, op: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
	let mut req = Request::builder()
		.method("POST")
		.uri(format!("/config/Config/{}", op))
		.header("content-type", "application/json");
	if let Some(token) = token {
		req = req.header("authorization", format!("Bearer {}", token));
	}
	let req = req.body(Body::from(body.to_string())).unwrap();

	let res = router.clone().oneshot(req).await.unwrap();
	let status = res.status();
	let bytes = res.into_body().collect().await.unwrap().to_bytes();
	let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
	(status, body)
}

#[tokio::test]
async fn test_set_and_get_own_namespace() {
	let router = router();
	let tok = token("teamA", None);

	let (status, body) = call(
		&router,
		"Set",
		Some(&tok),
		json!({ "namespace": "teamA", "path": "db.password", "value": { "data": "s3cr3t" }, "secret": true }),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({}));

	let (status, _) = call(
		&router,
		"Set",
		Some(&tok),
		json!({ "namespace": "teamA", "path": "db.host", "value": { "data": "localhost" } }),
	)
	.await;
	assert_eq!(status, StatusCode::OK);

	let (status, body) = call(
		&router,
		"Get",
		Some(&tok),
		json!({ "namespace": "teamA", "path": "db.password", "secret": true }),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body, json!({ "value": { "data": "s3cr3t" } }));

	let (_, body) = call(&router, "Get", Some(&tok), json!({ "namespace": "teamA" })).await;
	let doc: Value = serde_json::from_str(body["value"]["data"].as_str().unwrap()).unwrap();
	assert_eq!(doc["db"]["host"], json!("localhost"));
	assert!(doc["db"]["password"].is_string());
	assert_ne!(doc["db"]["password"], json!("s3cr3t"));
}

#[tokio::test]
async fn test_anonymous_request_is_unauthorized() {
	let router = router();
	let (status, body) =
		call(&router, "Get", None, json!({ "namespace": "teamA", "path": "x" })).await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
	assert_eq!(body["id"], json!("config.Config.Get"));
	assert_eq!(body["code"], json!(401));
	assert_eq!(body["status"], json!("Unauthorized"));
}

#[tokio::test]
async fn test_invalid_token_is_unauthorized() {
	let router = router();
	let forged = generate_access_token("other-secret", "acc-1", "teamA", None, 3600).unwrap();
	let (status, _) = call(
		&router,
		"Set",
		Some(&forged),
		json!({ "namespace": "teamA", "path": "x", "value": { "data": "1" } }),
	)
	.await;
	assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_foreign_namespace_is_forbidden() {
	let router = router();
	let (status, body) = call(
		&router,
		"Delete",
		Some(&token("teamA", None)),
		json!({ "namespace": "teamB", "path": "x" }),
	)
	.await;
	assert_eq!(status, StatusCode::FORBIDDEN);
	assert_eq!(body["id"], json!("config.Config.Delete"));
}

#[tokio::test]
async fn test_admin_reaches_other_namespaces() {
	let router = router();
	let admin = token("micro", Some("admin"));

	let (status, _) = call(
		&router,
		"Set",
		Some(&admin),
		json!({ "namespace": "teamB", "path": "limits.max", "value": { "data": "10" } }),
	)
	.await;
	assert_eq!(status, StatusCode::OK);

	let (status, body) = call(
		&router,
		"Get",
		Some(&token("teamB", None)),
		json!({ "namespace": "teamB", "path": "limits" }),
	)
	.await;
	assert_eq!(status, StatusCode::OK);
	assert_eq!(body["value"]["data"], json!(r#"{"max":"10"}"#));
}

#[tokio::test]
async fn test_default_namespace_and_not_found() {
	let router = router();
	let tok = token("micro", None);

	let (status, body) = call(&router, "Get", Some(&tok), json!({ "path": "x" })).await;
	assert_eq!(status, StatusCode::NOT_FOUND);
	assert_eq!(body["code"], json!(404));

	let (status, _) = call(&router, "Delete", Some(&tok), json!({ "path": "x" })).await;
	assert_eq!(status, StatusCode::NOT_FOUND);

	let (status, _) =
		call(&router, "Set", Some(&tok), json!({ "path": "x", "value": { "data": "y" } })).await;
	assert_eq!(status, StatusCode::OK);

	let (_, body) = call(&router, "Get", Some(&tok), json!({ "path": "x" })).await;
	assert_eq!(body["value"]["data"], json!("y"));
}

#[tokio::test]
async fn test_set_without_value_is_bad_request() {
	let router = router();
	let (status, body) =
		call(&router, "Set", Some(&token("teamA", None)), json!({ "namespace": "teamA", "path": "x" }))
			.await;
	assert_eq!(status, StatusCode::BAD_REQUEST);
	assert_eq!(body["detail"], json!("invalid change"));
}

#[tokio::test]
async fn test_health() {
	let router = router();
	let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
	let res = router.oneshot(req).await.unwrap();
	assert_eq!(res.status(), StatusCode::OK);
}

// vim: ts=4
