//! # Helixhide - DNA-domain image encryption with chaotic scrambling
//!
//! Helixhide is an image confidentiality pipeline that re-encodes raw pixel
//! bytes into a four-letter DNA alphabet, scrambles the symbol sequence with
//! a logistic-map permutation, encrypts the result with AES-128-GCM, and can
//! hide the encrypted artifact inside a cover image using LSB steganography.
//! An append-only hash-chain ledger records a fingerprint of every encrypted
//! image for tamper-evidence.
//!
//! ## Pipeline
//!
//! Encrypt path:
//! 1. Pixel bytes → DNA sequence (2 bits per nucleotide, 4 per byte)
//! 2. DNA sequence → chaotic scramble (logistic map, fixed seed)
//! 3. Scrambled sequence → AES-128-GCM, framed `nonce ‖ tag ‖ ciphertext`, base64
//! 4. Optionally: artifact → LSB-embedded into a cover image
//! 5. SHA-256 of the artifact → appended to the ledger
//!
//! Decrypt path is the exact inverse, stage by stage. The order matters:
//! scrambling happens in the DNA domain, so decryption must unscramble
//! *after* AES and *before* DNA decoding.
//!
//! ## Security model
//!
//! - Confidentiality and integrity come from AES-GCM alone. The DNA encoding
//!   and the chaotic permutation are diffusion layers, not ciphers: the
//!   permutation seed is a fixed, documented constant so both sides derive
//!   the same permutation without exchanging one.
//! - The original pixel shape is persisted alongside the ciphertext. Losing
//!   it makes decryption irrecoverable even with the correct key.
//! - The ledger detects tampering with recorded artifacts; it does not
//!   prevent it.
//!
//! ## Example
//!
//! ```no_run
//! use helixhide::crypto::KeyStore;
//! use helixhide::ledger::Ledger;
//! use helixhide::pixel::{PixelBuffer, Shape};
//! use helixhide::pipeline::Pipeline;
//!
//! let keystore = KeyStore::new("aes_key.bin");
//! let ledger = Ledger::open("ledger.json").unwrap();
//! let mut pipeline = Pipeline::new(keystore, ledger);
//!
//! let image = PixelBuffer::new(vec![10, 20, 30, 40], Shape::new(2, 2, 1)).unwrap();
//! let artifact = pipeline.encrypt(&image).unwrap();
//! let restored = pipeline.decrypt(&artifact).unwrap();
//! assert_eq!(image, restored);
//! ```
//!
//! ## Modules
//!
//! - [`pixel`]: Raw pixel buffers with explicit shape
//! - [`dna`]: Byte ↔ DNA-alphabet codec
//! - [`chaos`]: Logistic-map permutation derivation and (un)scrambling
//! - [`crypto`]: AES-128-GCM framing and key-file management
//! - [`stego`]: LSB embedding/extraction with a length-prefixed layout
//! - [`ledger`]: Append-only hash-chain of image fingerprints
//! - [`pipeline`]: End-to-end orchestration of the stages above

/// Logistic-map seed used for scrambling. Fixed and non-secret: both the
/// encrypt and decrypt paths derive the identical permutation from it.
pub const CHAOS_SEED: f64 = 0.5;

/// Logistic-map growth rate. Values in (3.57, 4.0) put the map in its
/// chaotic regime.
pub const CHAOS_RATE: f64 = 3.99;

/// Symmetric key length in bytes (AES-128).
pub const KEY_SIZE: usize = 16;

/// AES-GCM nonce length in bytes.
pub const NONCE_SIZE: usize = 12;

/// AES-GCM authentication tag length in bytes.
pub const TAG_SIZE: usize = 16;

pub mod chaos;
pub mod crypto;
pub mod dna;
pub mod ledger;
pub mod pipeline;
pub mod pixel;
pub mod stego;

// Re-export commonly used types at the crate root
pub use chaos::{derive_permutation, scramble, unscramble, ChaosError, PermutationKey};
pub use crypto::{CipherError, KeyError, KeyMaterial, KeyStore, PlaintextSource};
pub use dna::{DnaError, DnaSequence, Nucleotide, OnSizeMismatch};
pub use ledger::{Block, Ledger, LedgerError};
pub use pipeline::{EncryptedImage, Pipeline, PipelineError};
pub use pixel::{PixelBuffer, PixelError, Shape};
pub use stego::StegoError;
