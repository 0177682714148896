//! Symmetric key persistence.
//!
//! The key is 16 raw bytes in a single binary file. A [`KeyStore`] is a
//! handle around an injected path - there is no ambient key location, so
//! tests point it at a temp directory.
//!
//! Lifecycle: generated on first use, loaded thereafter. A persisted key of
//! the wrong length is treated as corrupt and silently replaced (with a
//! warning on stderr); everything encrypted under the old key becomes
//! unrecoverable, which is still better than continuing with a key no cipher
//! will accept.

use rand::rngs::OsRng;
use rand::RngCore;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::KEY_SIZE;

/// Errors that can occur during key operations.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A 16-byte AES-128 key.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyMaterial([u8; KEY_SIZE]);

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Don't expose key bytes in debug output
        f.debug_tuple("KeyMaterial").field(&"[REDACTED]").finish()
    }
}

impl KeyMaterial {
    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Generates a fresh random key from the OS RNG.
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        OsRng.fill_bytes(&mut bytes);
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Key-file handle with an injected storage path.
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the persisted key, or creates one if absent.
    ///
    /// A persisted key of the wrong length is regenerated in place. After
    /// the first successful call the function is idempotent for a given
    /// path: it always returns the same key.
    pub fn load_or_create(&self) -> Result<KeyMaterial, KeyError> {
        if self.path.exists() {
            let bytes = fs::read(&self.path)?;
            if bytes.len() == KEY_SIZE {
                let mut key = [0u8; KEY_SIZE];
                key.copy_from_slice(&bytes);
                return Ok(KeyMaterial(key));
            }
            eprintln!(
                "WARNING: key file {} has wrong length ({} bytes, expected {}). Regenerating.",
                self.path.display(),
                bytes.len(),
                KEY_SIZE
            );
        }

        let key = KeyMaterial::generate();
        self.persist(&key)?;
        Ok(key)
    }

    fn persist(&self, key: &KeyMaterial) -> Result<(), KeyError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, key.as_bytes())?;

        // Restrict permissions on the key file (Unix only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_creates_key_when_absent() {
        let dir = tempdir().unwrap();
        let store = KeyStore::new(dir.path().join("aes_key.bin"));

        let key = store.load_or_create().unwrap();
        assert_eq!(key.as_bytes().len(), KEY_SIZE);
        assert!(store.path().exists());
    }

    #[test]
    fn test_idempotent_after_first_call() {
        let dir = tempdir().unwrap();
        let store = KeyStore::new(dir.path().join("aes_key.bin"));

        let first = store.load_or_create().unwrap();
        let second = store.load_or_create().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_regenerates_wrong_length_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aes_key.bin");
        fs::write(&path, [1u8; 7]).unwrap();

        let store = KeyStore::new(&path);
        let key = store.load_or_create().unwrap();

        assert_eq!(key.as_bytes().len(), KEY_SIZE);
        // The corrupt file was replaced on disk
        assert_eq!(fs::read(&path).unwrap().len(), KEY_SIZE);
    }

    #[test]
    fn test_loads_existing_key_unchanged() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("aes_key.bin");
        fs::write(&path, [42u8; KEY_SIZE]).unwrap();

        let store = KeyStore::new(&path);
        let key = store.load_or_create().unwrap();
        assert_eq!(key.as_bytes(), &[42u8; KEY_SIZE]);
    }

    #[test]
    fn test_debug_redacts_key() {
        let key = KeyMaterial::from_bytes([9u8; KEY_SIZE]);
        let debug = format!("{key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains('9'));
    }
}
