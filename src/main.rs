//! Helixhide - DNA-domain image encryption with chaotic scrambling
//!
//! CLI for the image confidentiality pipeline: encrypt images through the
//! DNA/chaos/AES stages, optionally hide artifacts in cover images, and
//! verify fingerprints against the append-only ledger.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{CommandExecutor, DecryptCommand, EncryptCommand, LedgerCommand, VerifyCommand};

/// Helixhide - DNA-domain image encryption
///
/// Re-encodes pixel bytes into a DNA alphabet, scrambles them with a chaotic
/// permutation, encrypts with AES-128-GCM, and records every artifact in a
/// hash-chain ledger. Artifacts can be hidden inside cover images with LSB
/// steganography.
#[derive(Parser)]
#[command(name = "helixhide")]
#[command(version = "0.3.0")]
#[command(about = "DNA-domain image encryption with chaotic scrambling and a hash-chain ledger")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt an image (optionally hiding the result in a cover image)
    Encrypt(EncryptCommand),

    /// Decrypt an artifact or stego image back to a PNG
    Decrypt(DecryptCommand),

    /// Check an artifact's fingerprint against the ledger
    Verify(VerifyCommand),

    /// Show the ledger and verify its hash chain
    Ledger(LedgerCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt(cmd) => cmd.execute(),
        Commands::Decrypt(cmd) => cmd.execute(),
        Commands::Verify(cmd) => cmd.execute(),
        Commands::Ledger(cmd) => cmd.execute(),
    }
}
