//! Cryptographic operations: authenticated encryption and key management.
//!
//! - [`symmetric`]: AES-128-GCM with `nonce ‖ tag ‖ ciphertext` framing and
//!   base64 transport encoding
//! - [`keys`]: key-file persistence with self-healing regeneration

pub mod keys;
pub mod symmetric;

pub use keys::{KeyError, KeyMaterial, KeyStore};
pub use symmetric::{decrypt, encrypt, CipherError, PlaintextSource};
