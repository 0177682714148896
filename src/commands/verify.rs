//! Verify command - check an artifact against the ledger.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use helixhide::crypto::KeyStore;
use helixhide::ledger::Ledger;
use helixhide::pipeline::{EncryptedImage, Pipeline};

use super::imageio::load_pixels;
use super::CommandExecutor;

/// Check whether an artifact's fingerprint is recorded in the ledger.
#[derive(Args, Debug)]
pub struct VerifyCommand {
    /// Artifact JSON, or a stego image with --stego
    #[arg(short, long)]
    pub input: PathBuf,

    /// Ledger file
    #[arg(short, long, default_value = "ledger.json")]
    pub ledger: PathBuf,

    /// AES key file (only needed to construct the pipeline, never read here)
    #[arg(short, long, default_value = "aes_key.bin")]
    pub key: PathBuf,

    /// Treat the input as a stego image and extract the artifact first
    #[arg(long)]
    pub stego: bool,
}

impl CommandExecutor for VerifyCommand {
    fn execute(&self) -> Result<()> {
        let keystore = KeyStore::new(&self.key);
        let ledger = Ledger::open(&self.ledger).context("Failed to open ledger")?;
        let pipeline = Pipeline::new(keystore, ledger);

        let artifact: EncryptedImage = if self.stego {
            let stego_image = load_pixels(&self.input)?;
            pipeline
                .reveal(&stego_image)
                .context("Failed to extract artifact from stego image")?
        } else {
            let json = fs::read_to_string(&self.input)
                .with_context(|| format!("Failed to read {}", self.input.display()))?;
            serde_json::from_str(&json).context("Input is not a valid artifact")?
        };

        let fingerprint = artifact.fingerprint();
        println!("Fingerprint: {fingerprint}");

        if pipeline.verify(&artifact) {
            println!("VERIFIED: fingerprint is recorded in the ledger.");
            Ok(())
        } else {
            anyhow::bail!("NOT FOUND: fingerprint is not recorded in the ledger")
        }
    }
}
