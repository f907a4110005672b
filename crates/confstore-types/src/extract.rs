//! Custom Axum extractors for the caller context.
//!
//! The auth middleware inserts `Auth` into the request extensions when the
//! request carries a valid bearer token.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::authorizer::AuthCtx;
use crate::error::Error;

// Auth //
//******//
/// Caller context inserted by the auth middleware
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

// OptionalAuth //
//***************//
/// Optional auth extractor that doesn't fail if auth is missing
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthCtx>);

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth = parts.extensions.get::<Auth>().cloned().map(|a| a.0);
		Ok(OptionalAuth(auth))
	}
}

// vim: ts=4
