//! Encrypt command.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use helixhide::crypto::KeyStore;
use helixhide::ledger::Ledger;
use helixhide::pipeline::Pipeline;

use super::imageio::{load_pixels, save_pixels};
use super::CommandExecutor;

/// Encrypt an image through the DNA/chaos/AES pipeline.
///
/// Output is a JSON artifact (frame + shape), or a stego PNG when --cover
/// is given, in which case the whole artifact is hidden inside the cover.
#[derive(Args, Debug)]
pub struct EncryptCommand {
    /// Input image to encrypt
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output path (artifact JSON, or stego PNG with --cover)
    #[arg(short, long)]
    pub output: PathBuf,

    /// AES key file (created on first use)
    #[arg(short, long, default_value = "aes_key.bin")]
    pub key: PathBuf,

    /// Ledger file recording artifact fingerprints
    #[arg(short, long, default_value = "ledger.json")]
    pub ledger: PathBuf,

    /// Cover image to hide the artifact in (LSB steganography)
    #[arg(long)]
    pub cover: Option<PathBuf>,
}

impl CommandExecutor for EncryptCommand {
    fn execute(&self) -> Result<()> {
        let image = load_pixels(&self.input)?;

        let keystore = KeyStore::new(&self.key);
        let ledger = Ledger::open(&self.ledger).context("Failed to open ledger")?;
        let mut pipeline = Pipeline::new(keystore, ledger);

        let artifact = pipeline
            .encrypt(&image)
            .context("Encryption pipeline failed")?;

        match &self.cover {
            Some(cover_path) => {
                let cover = load_pixels(cover_path)?;
                let stego = pipeline
                    .conceal(&artifact, &cover)
                    .context("Failed to conceal artifact in cover image")?;
                save_pixels(&stego, &self.output)?;
                println!("Encrypted and hidden in {}", self.output.display());
            }
            None => {
                let json = serde_json::to_string_pretty(&artifact)?;
                fs::write(&self.output, json)
                    .with_context(|| format!("Failed to write {}", self.output.display()))?;
                println!("Encrypted to {}", self.output.display());
            }
        }

        println!("Fingerprint: {}", artifact.fingerprint());
        println!("Recorded in ledger {}", self.ledger.display());
        Ok(())
    }
}
