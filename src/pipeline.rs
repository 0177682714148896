//! End-to-end orchestration of the confidentiality pipeline.
//!
//! Encrypt: pixel bytes → DNA encode → chaotic scramble → AES-128-GCM frame.
//! Decrypt runs the exact inverse stages in reverse. The scramble happens in
//! the DNA domain with a permutation derived for the sequence's exact
//! length, so the two directions agree by construction.
//!
//! The pipeline owns explicit [`KeyStore`] and [`Ledger`] handles; nothing
//! here reaches for ambient paths, which keeps tests on temp directories.
//! Every successful encryption appends the artifact's SHA-256 fingerprint
//! to the ledger.
//!
//! A stage failure aborts the whole operation. In particular a failed
//! decrypt yields no pixel buffer at all - never a partially transformed
//! one.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chaos::{self, ChaosError};
use crate::crypto::keys::{KeyError, KeyStore};
use crate::crypto::symmetric::{self, CipherError};
use crate::dna::{self, DnaError, DnaSequence, OnSizeMismatch};
use crate::ledger::{fingerprint, Ledger, LedgerError};
use crate::pixel::{PixelBuffer, Shape};
use crate::stego::{self, StegoError};
use crate::{CHAOS_RATE, CHAOS_SEED};

/// Errors from any pipeline stage, tagged by origin.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("DNA codec stage failed: {0}")]
    Dna(#[from] DnaError),

    #[error("Chaotic scramble stage failed: {0}")]
    Chaos(#[from] ChaosError),

    #[error("Cipher stage failed: {0}")]
    Cipher(#[from] CipherError),

    #[error("Key store failed: {0}")]
    Key(#[from] KeyError),

    #[error("Steganography stage failed: {0}")]
    Stego(#[from] StegoError),

    #[error("Ledger failed: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Malformed encrypted artifact: {0}")]
    MalformedArtifact(#[from] serde_json::Error),
}

/// The persistable result of encrypting an image.
///
/// `frame` is the base64 `nonce ‖ tag ‖ ciphertext` blob; `shape` is the
/// side-channel needed to invert the DNA decode. Losing the shape makes the
/// image irrecoverable even with the right key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncryptedImage {
    pub frame: String,
    pub shape: Shape,
}

impl EncryptedImage {
    /// SHA-256 hex fingerprint of the frame, as recorded in the ledger.
    pub fn fingerprint(&self) -> String {
        fingerprint(self.frame.as_bytes())
    }
}

/// The assembled pipeline.
pub struct Pipeline {
    keystore: KeyStore,
    ledger: Ledger,
    policy: OnSizeMismatch,
}

impl Pipeline {
    /// Builds a pipeline with the default size-mismatch policy
    /// ([`OnSizeMismatch::Fail`]).
    pub fn new(keystore: KeyStore, ledger: Ledger) -> Self {
        Self {
            keystore,
            ledger,
            policy: OnSizeMismatch::default(),
        }
    }

    pub fn with_policy(mut self, policy: OnSizeMismatch) -> Self {
        self.policy = policy;
        self
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Encrypts an image and records its fingerprint in the ledger.
    pub fn encrypt(&mut self, image: &PixelBuffer) -> Result<EncryptedImage, PipelineError> {
        let sequence = dna::encode(image.samples());

        let key = chaos::derive_permutation(CHAOS_SEED, sequence.len(), CHAOS_RATE)?;
        let scrambled = chaos::scramble(sequence.symbols(), &key)?;
        let ascii = DnaSequence::from(scrambled).to_ascii();

        let aes_key = self.keystore.load_or_create()?;
        let frame = symmetric::encrypt(ascii.into(), &aes_key)?;

        let artifact = EncryptedImage {
            frame,
            shape: image.shape(),
        };
        self.ledger.append(&artifact.fingerprint())?;

        Ok(artifact)
    }

    /// Decrypts an artifact back into the original pixel buffer.
    pub fn decrypt(&self, artifact: &EncryptedImage) -> Result<PixelBuffer, PipelineError> {
        let aes_key = self.keystore.load_or_create()?;
        let ascii = symmetric::decrypt(&artifact.frame, &aes_key)?;

        let scrambled = DnaSequence::from_ascii(&ascii)?;
        let key = chaos::derive_permutation(CHAOS_SEED, scrambled.len(), CHAOS_RATE)?;
        let symbols = chaos::unscramble(scrambled.symbols(), &key)?;

        let buffer = dna::decode(&DnaSequence::from(symbols), artifact.shape, self.policy)?;
        Ok(buffer)
    }

    /// Hides an artifact inside a cover image.
    ///
    /// The artifact is serialized to JSON (frame and shape together, so the
    /// shape side-channel travels inside the cover) and LSB-embedded.
    pub fn conceal(
        &self,
        artifact: &EncryptedImage,
        cover: &PixelBuffer,
    ) -> Result<PixelBuffer, PipelineError> {
        let payload = serde_json::to_vec(artifact)?;
        let stego = stego::embed(cover, &payload)?;
        Ok(stego)
    }

    /// Recovers a concealed artifact from a stego image.
    pub fn reveal(&self, stego_image: &PixelBuffer) -> Result<EncryptedImage, PipelineError> {
        let payload = stego::extract(stego_image)?;
        let artifact: EncryptedImage = serde_json::from_slice(&payload)?;
        Ok(artifact)
    }

    /// True iff the artifact's fingerprint is recorded in the ledger.
    pub fn verify(&self, artifact: &EncryptedImage) -> bool {
        self.ledger.verify_membership(&artifact.fingerprint())
    }
}
