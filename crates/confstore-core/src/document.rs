//! Namespace documents addressed with dot-delimited paths
//!
//! A document is a JSON object. Paths are split on `.`:
//! - the empty path addresses the whole document
//! - on an object a segment is a key, on an array it is an integer index
//! - `set` creates missing intermediate objects, but never overwrites a
//!   scalar that is in the way
//! - `get` distinguishes a missing path (`None`) from a JSON `null`

use serde_json::{Map, Value};

use crate::prelude::*;
use confstore_types::types::PATH_SEPARATOR;

/// Error returned when a path cannot be applied to a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
	/// The path contains an empty segment (e.g. `a..b`)
	EmptySegment(Box<str>),
	/// The operation needs a path, but got the empty one
	EmptyPath,
	/// An intermediate value is neither an object nor an array
	NotAContainer(Box<str>),
	/// An array segment is not a valid index
	BadIndex(Box<str>),
	/// The whole document can only be replaced by an object
	NotAnObject,
}

impl std::fmt::Display for PathError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			PathError::EmptySegment(path) => write!(f, "empty segment in path '{}'", path),
			PathError::EmptyPath => write!(f, "path required"),
			PathError::NotAContainer(seg) => {
				write!(f, "field '{}' is not an object or array", seg)
			}
			PathError::BadIndex(seg) => write!(f, "invalid array index '{}'", seg),
			PathError::NotAnObject => write!(f, "document root must be an object"),
		}
	}
}

impl std::error::Error for PathError {}

impl From<PathError> for Error {
	fn from(err: PathError) -> Self {
		Error::ValidationError(err.to_string())
	}
}

/// Splits a path into its segments. The empty path has no segments.
pub fn segments(path: &str) -> Result<Vec<&str>, PathError> {
	if path.is_empty() {
		return Ok(Vec::new());
	}
	let segs: Vec<&str> = path.split(PATH_SEPARATOR).collect();
	if segs.iter().any(|s| s.is_empty()) {
		return Err(PathError::EmptySegment(path.into()));
	}
	Ok(segs)
}

/// Interprets caller supplied data for `path`.
///
/// Values are stored verbatim as JSON strings. Only the empty path, which
/// replaces the whole document, parses the data as a JSON object.
pub fn value_from_data(path: &str, data: &str) -> Result<Value, PathError> {
	if !path.is_empty() {
		return Ok(Value::String(data.to_string()));
	}
	match serde_json::from_str::<Value>(data) {
		Ok(value) if value.is_object() => Ok(value),
		_ => Err(PathError::NotAnObject),
	}
}

/// Serialized form of a sub-value: strings raw, everything else as compact JSON
pub fn value_to_data(value: &Value) -> CsResult<Vec<u8>> {
	match value {
		Value::String(s) => Ok(s.as_bytes().to_vec()),
		other => Ok(serde_json::to_vec(other)?),
	}
}

fn lookup<'a>(root: &'a Value, segs: &[&str]) -> Option<&'a Value> {
	let mut cur = root;
	for seg in segs {
		cur = match cur {
			Value::Object(map) => map.get(*seg)?,
			Value::Array(arr) => arr.get(seg.parse::<usize>().ok()?)?,
			_ => return None,
		};
	}
	Some(cur)
}

fn lookup_mut<'a>(root: &'a mut Value, segs: &[&str]) -> Option<&'a mut Value> {
	let mut cur = root;
	for seg in segs {
		cur = match cur {
			Value::Object(map) => map.get_mut(*seg)?,
			Value::Array(arr) => arr.get_mut(seg.parse::<usize>().ok()?)?,
			_ => return None,
		};
	}
	Some(cur)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Document {
	root: Value,
}

impl Document {
	/// A fresh, empty document (`{}`)
	pub fn new() -> Self {
		Self { root: Value::Object(Map::new()) }
	}

	/// Parses a stored document. Anything but a JSON object is malformed.
	pub fn parse(data: &[u8]) -> CsResult<Self> {
		let root: Value = serde_json::from_slice(data)?;
		if !root.is_object() {
			return Err(Error::Parse);
		}
		Ok(Self { root })
	}

	pub fn as_value(&self) -> &Value {
		&self.root
	}

	pub fn to_bytes(&self) -> CsResult<Vec<u8>> {
		Ok(serde_json::to_vec(&self.root)?)
	}

	/// Resolves `path`. `Ok(None)` if nothing is stored there.
	pub fn get(&self, path: &str) -> Result<Option<&Value>, PathError> {
		let segs = segments(path)?;
		Ok(lookup(&self.root, &segs))
	}

	/// Stores `value` at `path`, creating missing intermediate objects.
	///
	/// The empty path replaces the whole document.
	pub fn set(&mut self, path: &str, value: Value) -> Result<(), PathError> {
		let segs = segments(path)?;
		let Some((last, parents)) = segs.split_last() else {
			if !value.is_object() {
				return Err(PathError::NotAnObject);
			}
			self.root = value;
			return Ok(());
		};

		let mut cur = &mut self.root;
		for &seg in parents {
			cur = match cur {
				Value::Object(map) => {
					map.entry(seg.to_string()).or_insert_with(|| Value::Object(Map::new()))
				}
				Value::Array(arr) => {
					let idx = seg.parse::<usize>().map_err(|_| PathError::BadIndex(seg.into()))?;
					arr.get_mut(idx).ok_or_else(|| PathError::BadIndex(seg.into()))?
				}
				_ => return Err(PathError::NotAContainer(seg.into())),
			};
		}

		match cur {
			Value::Object(map) => {
				map.insert((*last).to_string(), value);
			}
			Value::Array(arr) => {
				let idx = last.parse::<usize>().map_err(|_| PathError::BadIndex((*last).into()))?;
				if let Some(slot) = arr.get_mut(idx) {
					*slot = value;
				} else if idx == arr.len() {
					arr.push(value);
				} else {
					return Err(PathError::BadIndex((*last).into()));
				}
			}
			_ => return Err(PathError::NotAContainer((*last).into())),
		}
		Ok(())
	}

	/// Removes the entry at `path` and returns it. A missing path is not an error.
	pub fn delete(&mut self, path: &str) -> Result<Option<Value>, PathError> {
		let segs = segments(path)?;
		let Some((last, parents)) = segs.split_last() else {
			return Err(PathError::EmptyPath);
		};
		let Some(parent) = lookup_mut(&mut self.root, parents) else {
			return Ok(None);
		};
		Ok(match parent {
			Value::Object(map) => map.remove(*last),
			Value::Array(arr) => match last.parse::<usize>() {
				Ok(idx) if idx < arr.len() => Some(arr.remove(idx)),
				_ => None,
			},
			_ => None,
		})
	}
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn doc(value: Value) -> Document {
		Document::parse(&serde_json::to_vec(&value).unwrap()).unwrap()
	}

	#[test]
	fn test_parse_rejects_non_object() {
		assert!(Document::parse(b"[1,2]").is_err());
		assert!(Document::parse(b"not json").is_err());
		assert!(Document::parse(b"{}").is_ok());
	}

	#[test]
	fn test_segments() {
		assert_eq!(segments("").unwrap(), Vec::<&str>::new());
		assert_eq!(segments("db.host").unwrap(), vec!["db", "host"]);
		assert!(matches!(segments("a..b"), Err(PathError::EmptySegment(_))));
		assert!(matches!(segments(".a"), Err(PathError::EmptySegment(_))));
	}

	#[test]
	fn test_get_nested_and_array() {
		let d = doc(json!({ "db": { "hosts": ["a", "b"], "port": 5432 } }));
		assert_eq!(d.get("db.port").unwrap(), Some(&json!(5432)));
		assert_eq!(d.get("db.hosts.1").unwrap(), Some(&json!("b")));
		assert_eq!(d.get("db.hosts.2").unwrap(), None);
		assert_eq!(d.get("db.hosts.x").unwrap(), None);
		assert_eq!(d.get("db.port.deeper").unwrap(), None);
		assert_eq!(d.get("").unwrap(), Some(d.as_value()));
	}

	#[test]
	fn test_get_null_is_not_missing() {
		let d = doc(json!({ "a": null }));
		assert_eq!(d.get("a").unwrap(), Some(&Value::Null));
		assert_eq!(d.get("b").unwrap(), None);
	}

	#[test]
	fn test_set_creates_intermediate_objects() {
		let mut d = Document::new();
		d.set("db.password", json!("s3cr3t")).unwrap();
		d.set("db.host", json!("localhost")).unwrap();
		assert_eq!(d.as_value(), &json!({ "db": { "password": "s3cr3t", "host": "localhost" } }));
	}

	#[test]
	fn test_set_does_not_overwrite_scalar() {
		let mut d = doc(json!({ "db": "flat" }));
		assert_eq!(d.set("db.host", json!("x")), Err(PathError::NotAContainer("db".into())));
		assert_eq!(d.as_value(), &json!({ "db": "flat" }));
	}

	#[test]
	fn test_set_array_elements() {
		let mut d = doc(json!({ "list": [1, 2] }));
		d.set("list.0", json!(10)).unwrap();
		d.set("list.2", json!(3)).unwrap();
		assert_eq!(d.as_value(), &json!({ "list": [10, 2, 3] }));
		assert_eq!(d.set("list.9", json!(0)), Err(PathError::BadIndex("9".into())));
		assert_eq!(d.set("list.x", json!(0)), Err(PathError::BadIndex("x".into())));
	}

	#[test]
	fn test_set_whole_document() {
		let mut d = doc(json!({ "a": 1 }));
		assert_eq!(d.set("", json!([1])), Err(PathError::NotAnObject));
		d.set("", json!({ "b": 2 })).unwrap();
		assert_eq!(d.as_value(), &json!({ "b": 2 }));
	}

	#[test]
	fn test_delete() {
		let mut d = doc(json!({ "db": { "host": "h", "port": 1 }, "list": [1, 2, 3] }));
		assert_eq!(d.delete("db.host").unwrap(), Some(json!("h")));
		assert_eq!(d.delete("db.host").unwrap(), None);
		assert_eq!(d.delete("missing.deep.path").unwrap(), None);
		assert_eq!(d.delete("list.1").unwrap(), Some(json!(2)));
		assert_eq!(d.delete("").unwrap_err(), PathError::EmptyPath);
		assert_eq!(d.as_value(), &json!({ "db": { "port": 1 }, "list": [1, 3] }));
	}

	#[test]
	fn test_value_data_conversions() {
		assert_eq!(value_from_data("host", "localhost").unwrap(), json!("localhost"));
		assert_eq!(value_from_data("port", " 5432").unwrap(), json!(" 5432"));
		assert_eq!(value_from_data("obj", r#"{"a":1}"#).unwrap(), json!(r#"{"a":1}"#));
		assert_eq!(value_from_data("", r#"{ "a": 1 }"#).unwrap(), json!({ "a": 1 }));
		assert_eq!(value_from_data("", "[1]").unwrap_err(), PathError::NotAnObject);
		assert_eq!(value_from_data("", "plain").unwrap_err(), PathError::NotAnObject);
		assert_eq!(value_to_data(&json!("localhost")).unwrap(), b"localhost");
		assert_eq!(value_to_data(&json!({ "a": 1 })).unwrap(), br#"{"a":1}"#);
		assert_eq!(value_to_data(&Value::Null).unwrap(), b"null");
	}
}

// vim: ts=4
