//! Bearer token authentication
//!
//! Tokens are HS256 JWTs carrying `AccessToken` claims. A request with a valid
//! token gets `Auth` in its extensions; anything else stays anonymous and is
//! left to the authorizer to reject.

use axum::{
	extract::{Request, State},
	http::header,
	middleware::Next,
	response::Response,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::prelude::*;
use confstore_types::authorizer::{AccessToken, AuthCtx};
use confstore_types::extract::Auth;

/// Mints an access token for an account of namespace `issuer`
pub fn generate_access_token(
	jwt_secret: &str,
	sub: &str,
	issuer: &str,
	scope: Option<&str>,
	ttl_secs: u64,
) -> CsResult<String> {
	let exp = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map_err(|_| Error::Internal("system clock before epoch".to_string()))?
		.as_secs() + ttl_secs;

	encode(
		&Header::new(Algorithm::HS256),
		&AccessToken::<&str> { sub, iss: issuer, scope, exp },
		&EncodingKey::from_secret(jwt_secret.as_bytes()),
	)
	.map_err(|e| Error::Crypto(format!("token encoding failed: {}", e)))
}

pub fn validate_token(jwt_secret: &str, token: &str) -> CsResult<AuthCtx> {
	let token_data = decode::<AccessToken<Box<str>>>(
		token,
		&DecodingKey::from_secret(jwt_secret.as_bytes()),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|_| Error::Unauthorized)?;

	Ok(AuthCtx::from(token_data.claims))
}

pub async fn optional_auth(State(app): State<App>, mut req: Request, next: Next) -> Response {
	let token = req
		.headers()
		.get(header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
		.map(str::trim);

	if let Some(token) = token {
		match validate_token(&app.opts.jwt_secret, token) {
			Ok(auth) => {
				req.extensions_mut().insert(Auth(auth));
			}
			Err(err) => {
				debug!(error = %err, "Ignoring invalid bearer token");
			}
		}
	}

	next.run(req).await
}


// vim: ts=4
