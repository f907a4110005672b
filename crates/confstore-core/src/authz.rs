//! Namespace ownership based authorizer
//!
//! An account belongs to the namespace that issued it. It may access its own
//! namespace; accounts of the admin namespace holding the `admin` scope may
//! access every namespace.

use async_trait::async_trait;

use crate::prelude::*;
use confstore_types::authorizer::{AuthCtx, Authorizer, SCOPE_ADMIN};

#[derive(Debug)]
pub struct NamespaceAuthorizer {
	admin_namespace: Box<str>,
}

impl NamespaceAuthorizer {
	pub fn new(admin_namespace: impl Into<Box<str>>) -> Self {
		Self { admin_namespace: admin_namespace.into() }
	}
}

#[async_trait]
impl Authorizer for NamespaceAuthorizer {
	async fn authorize(&self, auth: Option<&AuthCtx>, namespace: &str) -> CsResult<()> {
		let Some(auth) = auth else {
			return Err(Error::Unauthorized);
		};

		if auth.issuer.as_ref() == namespace {
			return Ok(());
		}

		if auth.issuer == self.admin_namespace && auth.has_scope(SCOPE_ADMIN) {
			debug!(account = %auth.id, namespace = %namespace, "Admin access to namespace");
			return Ok(());
		}

		Err(Error::PermissionDenied)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn account(issuer: &str, scopes: &[&str]) -> AuthCtx {
		AuthCtx {
			id: "acc-1".into(),
			issuer: issuer.into(),
			scopes: scopes.iter().map(|s| Box::from(*s)).collect(),
		}
	}

	#[tokio::test]
	async fn test_anonymous_is_unauthorized() {
		let authz = NamespaceAuthorizer::new("micro");
		assert!(matches!(authz.authorize(None, "teamA").await, Err(Error::Unauthorized)));
	}

	#[tokio::test]
	async fn test_own_namespace_allowed() {
		let authz = NamespaceAuthorizer::new("micro");
		assert!(authz.authorize(Some(&account("teamA", &[])), "teamA").await.is_ok());
	}

	#[tokio::test]
	async fn test_foreign_namespace_forbidden() {
		let authz = NamespaceAuthorizer::new("micro");
		let res = authz.authorize(Some(&account("teamA", &["admin"])), "teamB").await;
		assert!(matches!(res, Err(Error::PermissionDenied)));
	}

	#[tokio::test]
	async fn test_admin_namespace_needs_admin_scope() {
		let authz = NamespaceAuthorizer::new("micro");
		assert!(authz.authorize(Some(&account("micro", &["admin"])), "teamB").await.is_ok());
		let res = authz.authorize(Some(&account("micro", &["service"])), "teamB").await;
		assert!(matches!(res, Err(Error::PermissionDenied)));
	}
}

// vim: ts=4
