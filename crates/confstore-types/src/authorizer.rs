//! Authorizer that decides whether a caller may access a namespace.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

/// Scope granting access to every namespace when held by an admin-namespace account
pub const SCOPE_ADMIN: &str = "admin";

/// Access token claims
#[skip_serializing_none]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessToken<S> {
	/// Account id
	pub sub: S,
	/// Issuer - the namespace the account belongs to
	pub iss: S,
	/// Comma separated scopes
	pub scope: Option<S>,
	pub exp: u64,
}

/// Context struct for an authenticated caller
#[derive(Clone, Debug)]
pub struct AuthCtx {
	pub id: Box<str>,
	pub issuer: Box<str>,
	pub scopes: Box<[Box<str>]>,
}

impl AuthCtx {
	pub fn has_scope(&self, scope: &str) -> bool {
		self.scopes.iter().any(|s| s.as_ref() == scope)
	}
}

impl From<AccessToken<Box<str>>> for AuthCtx {
	fn from(token: AccessToken<Box<str>>) -> Self {
		let scopes = token
			.scope
			.as_deref()
			.unwrap_or_default()
			.split(',')
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(Box::from)
			.collect();
		AuthCtx { id: token.sub, issuer: token.iss, scopes }
	}
}

#[async_trait]
pub trait Authorizer: Debug + Send + Sync {
	/// Decides whether the caller may access `namespace`.
	///
	/// - `Ok(())` - allowed
	/// - `Err(Error::PermissionDenied)` - the caller is known but denied
	/// - `Err(Error::Unauthorized)` - the caller has no (valid) credentials
	/// - any other error - the decision could not be made
	async fn authorize(&self, auth: Option<&AuthCtx>, namespace: &str) -> CsResult<()>;
}


// vim: ts=4
