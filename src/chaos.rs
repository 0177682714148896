//! Chaotic permutation derivation and (un)scrambling.
//!
//! The permutation comes from iterating the logistic map
//! `x(t+1) = rate * x(t) * (1 - x(t))` and argsorting the trajectory: the
//! i-th key entry is the index of the i-th smallest trajectory value. With
//! `rate` in the chaotic regime the trajectory looks pseudo-random, so the
//! argsort is a pseudo-random reordering - but it is fully deterministic
//! given `(seed, length, rate)`, which is the point: encrypt and decrypt
//! derive the same permutation from the fixed [`crate::CHAOS_SEED`] without
//! exchanging it.
//!
//! This is a diffusion layer, not a cipher. The seed is not secret.

use thiserror::Error;

/// Errors that can occur when deriving or applying a permutation.
#[derive(Error, Debug)]
pub enum ChaosError {
    #[error("Permutation of length {key_len} applied to data of length {data_len}")]
    LengthMismatch { key_len: usize, data_len: usize },

    #[error("Permutation is not a bijection: index {0} is missing or duplicated")]
    NotABijection(usize),

    #[error("Logistic-map seed {0} outside the open interval (0, 1)")]
    InvalidSeed(f64),
}

/// A bijection on `[0, len)`, validated at construction.
///
/// `scramble` and `unscramble` are mutually inverse only because every index
/// appears exactly once; the constructor rejects anything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermutationKey(Vec<usize>);

impl PermutationKey {
    /// Wraps raw indices, verifying they form a bijection on `[0, len)`.
    pub fn new(indices: Vec<usize>) -> Result<Self, ChaosError> {
        let mut seen = vec![false; indices.len()];
        for &idx in &indices {
            if idx >= indices.len() || seen[idx] {
                return Err(ChaosError::NotABijection(idx));
            }
            seen[idx] = true;
        }
        Ok(Self(indices))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

/// Derives a deterministic permutation of `length` indices from a logistic-map
/// trajectory.
///
/// # Arguments
/// * `seed` - Initial map value, must lie strictly between 0 and 1
/// * `length` - Number of indices (and trajectory iterations)
/// * `rate` - Logistic growth rate; [`crate::CHAOS_RATE`] keeps the map chaotic
///
/// The same `(seed, length, rate)` always yields the same permutation; there
/// is no external randomness.
pub fn derive_permutation(
    seed: f64,
    length: usize,
    rate: f64,
) -> Result<PermutationKey, ChaosError> {
    if !(seed > 0.0 && seed < 1.0) {
        return Err(ChaosError::InvalidSeed(seed));
    }

    let mut x = seed;
    let mut trajectory = Vec::with_capacity(length);
    for _ in 0..length {
        x = rate * x * (1.0 - x);
        trajectory.push(x);
    }

    // Argsort: stable sort of indices by trajectory value. total_cmp gives a
    // total order on f64 so ties (rare but possible) resolve consistently.
    let mut indices: Vec<usize> = (0..length).collect();
    indices.sort_by(|&a, &b| trajectory[a].total_cmp(&trajectory[b]));

    PermutationKey::new(indices)
}

/// Gathers `data` through the key: `out[i] = data[key[i]]`.
pub fn scramble<T: Clone>(data: &[T], key: &PermutationKey) -> Result<Vec<T>, ChaosError> {
    if data.len() != key.len() {
        return Err(ChaosError::LengthMismatch {
            key_len: key.len(),
            data_len: data.len(),
        });
    }
    Ok(key.indices().iter().map(|&i| data[i].clone()).collect())
}

/// Inverse gather: `out[key[i]] = data[i]`.
pub fn unscramble<T: Clone + Default>(
    data: &[T],
    key: &PermutationKey,
) -> Result<Vec<T>, ChaosError> {
    if data.len() != key.len() {
        return Err(ChaosError::LengthMismatch {
            key_len: key.len(),
            data_len: data.len(),
        });
    }
    let mut out = vec![T::default(); data.len()];
    for (i, &target) in key.indices().iter().enumerate() {
        out[target] = data[i].clone();
    }
    Ok(out)
}
