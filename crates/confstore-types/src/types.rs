//! Request and response types of the config service.

use serde::{Deserialize, Serialize};

/// Namespace used when the caller does not name one
pub const DEFAULT_NAMESPACE: &str = "micro";

/// Separator of path segments inside a namespace document
pub const PATH_SEPARATOR: char = '.';

/// Qualified operation ids, used in caller-visible errors
pub const OP_GET: &str = "config.Config.Get";
pub const OP_SET: &str = "config.Config.Set";
pub const OP_DELETE: &str = "config.Config.Delete";

/// Returns `namespace`, or `default` if it is empty
pub fn resolve_namespace<'a>(namespace: &'a str, default: &'a str) -> &'a str {
	if namespace.is_empty() { default } else { namespace }
}

/// A value addressed by a (namespace, path) pair
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConfigValue {
	pub data: String,
}

impl ConfigValue {
	pub fn new(data: impl Into<String>) -> Self {
		Self { data: data.into() }
	}
}

// Get //
//*****//
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct GetRequest {
	#[serde(default)]
	pub namespace: Box<str>,
	#[serde(default)]
	pub path: Box<str>,
	#[serde(default)]
	pub secret: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GetResponse {
	pub value: ConfigValue,
}

// Set //
//*****//
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct SetRequest {
	#[serde(default)]
	pub namespace: Box<str>,
	#[serde(default)]
	pub path: Box<str>,
	pub value: Option<ConfigValue>,
	#[serde(default)]
	pub secret: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SetResponse {}

// Delete //
//********//
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DeleteRequest {
	#[serde(default)]
	pub namespace: Box<str>,
	#[serde(default)]
	pub path: Box<str>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeleteResponse {}


// vim: ts=4
