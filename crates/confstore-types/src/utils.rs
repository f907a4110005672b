//! Utility functions

use rand::RngExt;

use crate::prelude::*;

pub const ID_LENGTH: usize = 24;
pub const SAFE: [char; 62] = [
	'0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
	'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', 'A', 'B',
	'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
	'V', 'W', 'X', 'Y', 'Z',
];

pub fn random_id() -> CsResult<String> {
	let mut rng = rand::rng();
	let mut result = String::with_capacity(ID_LENGTH);

	for _ in 0..ID_LENGTH {
		result.push(SAFE[rng.random_range(0..SAFE.len())]);
	}
	Ok(result)
}

/// Checks that a namespace is usable as a plain record key or file name.
///
/// Allowed: ASCII letters, digits, `_`, `-` and `.`, not starting with `.`.
pub fn validate_namespace(namespace: &str) -> CsResult<()> {
	if namespace.is_empty() {
		return Err(Error::ValidationError("namespace cannot be empty".to_string()));
	}
	if namespace.starts_with('.') {
		return Err(Error::ValidationError(format!("invalid namespace: {}", namespace)));
	}
	if !namespace.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')) {
		return Err(Error::ValidationError(format!("invalid namespace: {}", namespace)));
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_random_id() {
		let id = random_id().unwrap();
		assert_eq!(id.len(), ID_LENGTH);
		assert!(id.chars().all(|c| SAFE.contains(&c)));
		assert_ne!(id, random_id().unwrap());
	}

	#[test]
	fn test_validate_namespace() {
		assert!(validate_namespace("micro").is_ok());
		assert!(validate_namespace("team-a.prod_1").is_ok());
		assert!(validate_namespace("").is_err());
		assert!(validate_namespace(".hidden").is_err());
		assert!(validate_namespace("../etc").is_err());
		assert!(validate_namespace("a/b").is_err());
	}
}

// vim: ts=4
