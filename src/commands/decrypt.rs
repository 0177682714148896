//! Decrypt command.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use helixhide::crypto::KeyStore;
use helixhide::dna::OnSizeMismatch;
use helixhide::ledger::Ledger;
use helixhide::pipeline::{EncryptedImage, Pipeline};

use super::imageio::{load_pixels, save_pixels};
use super::CommandExecutor;

/// Decrypt an artifact (or stego image) back into a PNG.
#[derive(Args, Debug)]
pub struct DecryptCommand {
    /// Input: artifact JSON, or a stego image with --stego
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output PNG path
    #[arg(short, long)]
    pub output: PathBuf,

    /// AES key file
    #[arg(short, long, default_value = "aes_key.bin")]
    pub key: PathBuf,

    /// Ledger file
    #[arg(short, long, default_value = "ledger.json")]
    pub ledger: PathBuf,

    /// Treat the input as a stego image and extract the artifact first
    #[arg(long)]
    pub stego: bool,

    /// Size-mismatch policy: fail, pad, or truncate
    #[arg(long, default_value = "fail")]
    pub on_size_mismatch: String,
}

impl CommandExecutor for DecryptCommand {
    fn execute(&self) -> Result<()> {
        let policy = match self.on_size_mismatch.to_lowercase().as_str() {
            "fail" => OnSizeMismatch::Fail,
            "pad" => OnSizeMismatch::PadWithZero,
            "truncate" => OnSizeMismatch::Truncate,
            other => bail!("Unknown size-mismatch policy '{other}' (use fail, pad or truncate)"),
        };

        let keystore = KeyStore::new(&self.key);
        let ledger = Ledger::open(&self.ledger).context("Failed to open ledger")?;
        let pipeline = Pipeline::new(keystore, ledger).with_policy(policy);

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

        if !pipeline.verify(&artifact) {
            eprintln!("WARNING: artifact fingerprint not found in ledger; provenance unverified.");
        }

        let image = pipeline
            .decrypt(&artifact)
            .context("Decryption pipeline failed")?;
        save_pixels(&image, &self.output)?;

        println!("Decrypted to {}", self.output.display());
        Ok(())
    }
}
