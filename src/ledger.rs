//! Append-only hash-chain ledger of image fingerprints.
//!
//! Every encrypted artifact gets its SHA-256 hash appended as a block. Each
//! block commits to the hash of its predecessor, so rewriting history means
//! recomputing every later block - tamper-evidence, not tamper-prevention.
//!
//! Persistence is a pretty-printed JSON array, rewritten in full on every
//! append (write-then-return). Single writer only: concurrent processes
//! appending to the same file will race, and callers must not allow it.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// Previous-hash sentinel of the genesis block.
const GENESIS_PREVIOUS_HASH: &str = "0";

/// Payload sentinel of the genesis block.
const GENESIS_PAYLOAD: &str = "GENESIS_BLOCK";

/// Errors that can occur on the ledger.
///
/// Corruption is fatal: the whole point of the chain is integrity, so a
/// malformed file is never silently repaired.
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Ledger corrupt: {0}")]
    Corrupt(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// One ledger entry.
///
/// The payload hash is serialized as `image_hash`, matching the on-disk
/// ledger format this crate inherits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub previous_hash: String,
    #[serde(rename = "image_hash")]
    pub payload_hash: String,
}

/// Append-only hash chain with an injected storage path.
#[derive(Debug)]
pub struct Ledger {
    path: PathBuf,
    chain: Vec<Block>,
}

impl Ledger {
    /// Loads the persisted chain, or creates a fresh one with a genesis block.
    ///
    /// A file that exists but does not parse, or whose links do not verify,
    /// is fatal ([`LedgerError::Corrupt`]).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let chain: Vec<Block> = serde_json::from_str(&content)
                .map_err(|e| LedgerError::Corrupt(format!("unparseable chain: {e}")))?;
            let ledger = Self { path, chain };
            ledger.verify_chain()?;
            return Ok(ledger);
        }

        let genesis = Block {
            index: 0,
            timestamp: now_epoch(),
            previous_hash: GENESIS_PREVIOUS_HASH.to_string(),
            payload_hash: GENESIS_PAYLOAD.to_string(),
        };
        let ledger = Self {
            path,
            chain: vec![genesis],
        };
        ledger.persist()?;
        Ok(ledger)
    }

    /// Appends a new block committing to `payload_hash` and persists the
    /// full chain before returning.
    pub fn append(&mut self, payload_hash: &str) -> Result<&Block, LedgerError> {
        let last = self
            .chain
            .last()
            .ok_or_else(|| LedgerError::Corrupt("empty chain has no genesis".to_string()))?;

        let block = Block {
            index: self.chain.len() as u64,
            timestamp: now_epoch(),
            previous_hash: hash_block(last),
            payload_hash: payload_hash.to_string(),
        };
        self.chain.push(block);
        self.persist()?;

        // Just pushed, so last() is the new block.
        Ok(self.chain.last().expect("chain is non-empty after push"))
    }

    /// True iff some block records this payload hash. Linear scan.
    pub fn verify_membership(&self, payload_hash: &str) -> bool {
        self.chain
            .iter()
            .any(|block| block.payload_hash == payload_hash)
    }

    /// Recomputes every link in the chain.
    pub fn verify_chain(&self) -> Result<(), LedgerError> {
        let first = self
            .chain
            .first()
            .ok_or_else(|| LedgerError::Corrupt("chain is empty".to_string()))?;
        if first.index != 0 || first.previous_hash != GENESIS_PREVIOUS_HASH {
            return Err(LedgerError::Corrupt("invalid genesis block".to_string()));
        }

        for (i, pair) in self.chain.windows(2).enumerate() {
            if pair[1].index != (i + 1) as u64 {
                return Err(LedgerError::Corrupt(format!(
                    "block {} has index {}",
                    i + 1,
                    pair[1].index
                )));
            }
            let expected = hash_block(&pair[0]);
            if pair[1].previous_hash != expected {
                return Err(LedgerError::Corrupt(format!(
                    "broken link at block {}: expected previous hash {expected}, found {}",
                    i + 1,
                    pair[1].previous_hash
                )));
            }
        }
        Ok(())
    }

    pub fn blocks(&self) -> &[Block] {
        &self.chain
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.chain)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

/// SHA-256 of a block's canonical serialization, as lowercase hex.
///
/// Canonical form is a JSON object with keys in sorted order, so the hash
/// does not depend on struct field order.
pub fn hash_block(block: &Block) -> String {
    let mut fields = BTreeMap::new();
    fields.insert("image_hash", Value::from(block.payload_hash.clone()));
    fields.insert("index", Value::from(block.index));
    fields.insert("previous_hash", Value::from(block.previous_hash.clone()));
    fields.insert("timestamp", Value::from(block.timestamp));

    // BTreeMap serialization order is key order; to_string cannot fail here.
    let canonical = serde_json::to_string(&fields).unwrap_or_default();
    format!("{:x}", Sha256::digest(canonical.as_bytes()))
}

/// SHA-256 of arbitrary bytes as lowercase hex - the ledger's payload
/// fingerprint function.
pub fn fingerprint(data: &[u8]) -> String {
    format!("{:x}", Sha256::digest(data))
}

fn now_epoch() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}
