//! Authenticated encryption with AES-128-GCM.
//!
//! The wire frame is `nonce (12 bytes) ‖ tag (16 bytes) ‖ ciphertext`,
//! base64-encoded for transport. Putting the tag before the ciphertext keeps
//! the header at fixed offsets, so decryption splits the frame without any
//! length bookkeeping.
//!
//! A fresh random nonce is drawn from the OS RNG on every call. Nonce reuse
//! under the same key breaks GCM's authentication guarantee, so nonces are
//! never cached or derived.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Nonce};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use thiserror::Error;

use crate::crypto::keys::KeyMaterial;
use crate::{NONCE_SIZE, TAG_SIZE};

/// Errors that can occur during authenticated encryption.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed: ciphertext or tag has been tampered with")]
    AuthenticationFailed,

    #[error("Frame too short: {0} bytes (minimum is nonce + tag = 28)")]
    FrameTooShort(usize),

    #[error("Base64 decode error: {0}")]
    Base64Error(#[from] base64::DecodeError),
}

/// Plaintext input resolved once at the API boundary.
///
/// Internals only ever see bytes; `Text` exists so callers with string data
/// don't have to decide on an encoding themselves (it is always UTF-8).
#[derive(Debug, Clone)]
pub enum PlaintextSource {
    Bytes(Vec<u8>),
    Text(String),
}

impl PlaintextSource {
    fn as_bytes(&self) -> &[u8] {
        match self {
            PlaintextSource::Bytes(bytes) => bytes,
            PlaintextSource::Text(text) => text.as_bytes(),
        }
    }
}

impl From<Vec<u8>> for PlaintextSource {
    fn from(bytes: Vec<u8>) -> Self {
        PlaintextSource::Bytes(bytes)
    }
}

impl From<String> for PlaintextSource {
    fn from(text: String) -> Self {
        PlaintextSource::Text(text)
    }
}

/// Encrypts a plaintext under the given key.
///
/// Returns the base64 text of the `nonce ‖ tag ‖ ciphertext` frame.
pub fn encrypt(plaintext: PlaintextSource, key: &KeyMaterial) -> Result<String, CipherError> {
    let cipher = Aes128Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_SIZE];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // The aead API appends the tag to the ciphertext; the frame wants it
    // up front, so split it off and reorder.
    let ct_and_tag = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;
    let tag_start = ct_and_tag.len() - TAG_SIZE;

    let mut frame = Vec::with_capacity(NONCE_SIZE + ct_and_tag.len());
    frame.extend_from_slice(&nonce_bytes);
    frame.extend_from_slice(&ct_and_tag[tag_start..]);
    frame.extend_from_slice(&ct_and_tag[..tag_start]);

    Ok(BASE64.encode(frame))
}

/// Decrypts a base64 `nonce ‖ tag ‖ ciphertext` frame.
///
/// Fails closed: any tag mismatch yields [`CipherError::AuthenticationFailed`]
/// and no plaintext, partial or otherwise.
pub fn decrypt(frame_text: &str, key: &KeyMaterial) -> Result<Vec<u8>, CipherError> {
    let frame = BASE64.decode(frame_text.trim())?;
    if frame.len() < NONCE_SIZE + TAG_SIZE {
        return Err(CipherError::FrameTooShort(frame.len()));
    }

    let nonce = Nonce::from_slice(&frame[..NONCE_SIZE]);
    let tag = &frame[NONCE_SIZE..NONCE_SIZE + TAG_SIZE];
    let ciphertext = &frame[NONCE_SIZE + TAG_SIZE..];

    // Rebuild the ciphertext ‖ tag layout the aead API expects.
    let mut ct_and_tag = Vec::with_capacity(ciphertext.len() + TAG_SIZE);
    ct_and_tag.extend_from_slice(ciphertext);
    ct_and_tag.extend_from_slice(tag);

    let cipher = Aes128Gcm::new_from_slice(key.as_bytes())
        .map_err(|e| CipherError::EncryptionFailed(e.to_string()))?;

    cipher
        .decrypt(nonce, ct_and_tag.as_slice())
        .map_err(|_| CipherError::AuthenticationFailed)
}
