//! Symmetric cipher used for secret values.
//!
//! The key is held by the implementation and never leaves the server.

use std::fmt::Debug;

use crate::prelude::*;

pub trait SecretCipher: Debug + Send + Sync {
	fn encrypt(&self, plaintext: &[u8]) -> CsResult<Vec<u8>>;

	fn decrypt(&self, ciphertext: &[u8]) -> CsResult<Vec<u8>>;
}

// vim: ts=4
