//! Secret values
//!
//! A secret is stored inside the document as `base64(encrypt(value))`, a plain
//! JSON string. The document does not record which fields are secrets: a
//! caller reading a secret path without the secret flag gets the stored
//! base64 form back.

use aes_gcm::{
	aead::{Aead, AeadCore, KeyInit, OsRng},
	Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine};

use crate::prelude::*;
use confstore_types::secret_cipher::SecretCipher;

pub const KEY_LENGTH: usize = 32;
const NONCE_LENGTH: usize = 12;

/// Failure to recover a stored secret
#[derive(Debug)]
pub enum SecretError {
	/// The stored form is not valid base64 (or not a string at all)
	BadEncoding,
	/// The cipher rejected the payload (wrong key or tampered data)
	Decrypt(Error),
}

impl std::fmt::Display for SecretError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			SecretError::BadEncoding => write!(f, "badly encoded secret"),
			SecretError::Decrypt(err) => write!(f, "failed to decrypt secret: {}", err),
		}
	}
}

impl std::error::Error for SecretError {}

/// Encrypts `plaintext` into its storable form
pub fn seal(cipher: &dyn SecretCipher, plaintext: &[u8]) -> CsResult<String> {
	let ciphertext = cipher.encrypt(plaintext)?;
	Ok(STANDARD.encode(ciphertext))
}

/// Recovers the plaintext from the storable form produced by `seal`
pub fn open(cipher: &dyn SecretCipher, stored: &[u8]) -> Result<Vec<u8>, SecretError> {
	let ciphertext = STANDARD.decode(stored).map_err(|_| SecretError::BadEncoding)?;
	cipher.decrypt(&ciphertext).map_err(SecretError::Decrypt)
}

/// Generates a random key, encoded the way `AesGcmCipher::from_base64` expects it
pub fn generate_key_base64() -> String {
	let key = Aes256Gcm::generate_key(OsRng);
	STANDARD.encode(key)
}

// AesGcmCipher //
//**************//
/// AES-256-GCM cipher. Ciphertext layout: `nonce (12 bytes) || ciphertext+tag`.
pub struct AesGcmCipher {
	cipher: Aes256Gcm,
}

impl AesGcmCipher {
	pub fn new(key: &[u8]) -> CsResult<Self> {
		if key.len() != KEY_LENGTH {
			return Err(Error::ConfigError(format!(
				"secret key must be {} bytes, got {}",
				KEY_LENGTH,
				key.len()
			)));
		}
		let cipher = Aes256Gcm::new_from_slice(key)
			.map_err(|_| Error::ConfigError("invalid secret key".to_string()))?;
		Ok(Self { cipher })
	}

	/// Creates a cipher from a base64 (standard alphabet) encoded key
	pub fn from_base64(key: &str) -> CsResult<Self> {
		let key = STANDARD
			.decode(key.trim())
			.map_err(|e| Error::ConfigError(format!("error decoding key: {}", e)))?;
		Self::new(&key)
	}
}

impl std::fmt::Debug for AesGcmCipher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AesGcmCipher").finish_non_exhaustive()
	}
}

impl SecretCipher for AesGcmCipher {
	fn encrypt(&self, plaintext: &[u8]) -> CsResult<Vec<u8>> {
		let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
		let ciphertext = self
			.cipher
			.encrypt(&nonce, plaintext)
			.map_err(|_| Error::Crypto("encryption failed".to_string()))?;

		let mut out = Vec::with_capacity(NONCE_LENGTH + ciphertext.len());
		out.extend_from_slice(&nonce);
		out.extend_from_slice(&ciphertext);
		Ok(out)
	}

	fn decrypt(&self, ciphertext: &[u8]) -> CsResult<Vec<u8>> {
		let Some((nonce, payload)) = ciphertext.split_at_checked(NONCE_LENGTH) else {
			return Err(Error::Crypto("ciphertext too short".to_string()));
		};
		self.cipher
			.decrypt(Nonce::from_slice(nonce), payload)
			.map_err(|_| Error::Crypto("decryption failed".to_string()))
	}
}


// vim: ts=4
