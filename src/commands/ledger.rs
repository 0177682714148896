//! Ledger command - inspect and verify the hash chain.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use helixhide::ledger::Ledger;

use super::CommandExecutor;

/// Show the ledger and verify the integrity of its hash chain.
#[derive(Args, Debug)]
pub struct LedgerCommand {
    /// Ledger file
    #[arg(short, long, default_value = "ledger.json")]
    pub ledger: PathBuf,

    /// Only verify the chain, without printing blocks
    #[arg(short, long)]
    pub quiet: bool,
}

impl CommandExecutor for LedgerCommand {
    fn execute(&self) -> Result<()> {
        let ledger = Ledger::open(&self.ledger).context("Failed to open ledger")?;

        if !self.quiet {
            for block in ledger.blocks() {
                println!(
                    "#{:<4} {}  prev={}  hash={}",
                    block.index,
                    format_timestamp(block.timestamp),
                    short(&block.previous_hash),
                    short(&block.payload_hash),
                );
            }
            println!();
        }

        ledger.verify_chain().context("Chain verification failed")?;
        println!(
            "Chain OK: {} blocks, every link verified.",
            ledger.blocks().len()
        );
        Ok(())
    }
}

fn short(hash: &str) -> String {
    if hash.len() > 16 {
        format!("{}…", &hash[..16])
    } else {
        hash.to_string()
    }
}

fn format_timestamp(epoch: f64) -> String {
    format!("{epoch:.3}")
}
