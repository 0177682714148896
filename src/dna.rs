//! Byte ↔ DNA-alphabet codec.
//!
//! Each byte expands to four nucleotides, two bits per symbol, most
//! significant bit pair first:
//!
//! | Bits | Symbol |
//! |------|--------|
//! | 00   | A      |
//! | 01   | T      |
//! | 10   | C      |
//! | 11   | G      |
//!
//! Encoding is pure and infallible. Decoding packs the symbols back into
//! bytes and checks the result against a target [`Shape`]; what happens on a
//! length disagreement is controlled by [`OnSizeMismatch`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pixel::{PixelBuffer, Shape};

/// Errors that can occur during DNA encoding/decoding.
#[derive(Error, Debug)]
pub enum DnaError {
    #[error("Decoded size mismatch: shape expects {expected} bytes, sequence yields {got}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("Invalid DNA symbol {0:#04x} (expected A, T, C or G)")]
    InvalidSymbol(u8),
}

/// Policy applied when a decoded byte count disagrees with the target shape.
///
/// The default is [`Fail`](OnSizeMismatch::Fail): a mismatch almost always
/// means the sequence was corrupted or paired with the wrong shape, and
/// silently reshaping would hide that.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OnSizeMismatch {
    /// Return [`DnaError::SizeMismatch`].
    #[default]
    Fail,
    /// Append zero bytes until the buffer fills the shape (truncates if over).
    PadWithZero,
    /// Drop trailing bytes until the buffer fits the shape (fails if under).
    Truncate,
}

/// One symbol of the four-letter alphabet. Encodes exactly two bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Nucleotide {
    #[default]
    A = 0b00,
    T = 0b01,
    C = 0b10,
    G = 0b11,
}

impl Nucleotide {
    /// Maps the low two bits of `bits` to a symbol.
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => Nucleotide::A,
            0b01 => Nucleotide::T,
            0b10 => Nucleotide::C,
            _ => Nucleotide::G,
        }
    }

    fn to_bits(self) -> u8 {
        self as u8
    }

    /// ASCII letter for this symbol.
    pub fn to_ascii(self) -> u8 {
        match self {
            Nucleotide::A => b'A',
            Nucleotide::T => b'T',
            Nucleotide::C => b'C',
            Nucleotide::G => b'G',
        }
    }

    pub fn from_ascii(byte: u8) -> Result<Self, DnaError> {
        match byte {
            b'A' => Ok(Nucleotide::A),
            b'T' => Ok(Nucleotide::T),
            b'C' => Ok(Nucleotide::C),
            b'G' => Ok(Nucleotide::G),
            other => Err(DnaError::InvalidSymbol(other)),
        }
    }
}

/// An ordered sequence of nucleotides.
///
/// Invariant: a sequence produced by [`encode`] has exactly four symbols per
/// source byte. The ASCII conversion is lossless, so the sequence can cross
/// the cipher boundary as plain bytes and come back intact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnaSequence(Vec<Nucleotide>);

impl DnaSequence {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn symbols(&self) -> &[Nucleotide] {
        &self.0
    }

    /// Renders the sequence as ASCII `ATCG` bytes.
    pub fn to_ascii(&self) -> Vec<u8> {
        self.0.iter().map(|n| n.to_ascii()).collect()
    }

    /// Parses ASCII `ATCG` bytes back into a sequence.
    ///
    /// Any byte outside the alphabet is an error: a foreign symbol after
    /// decryption means the ciphertext round trip itself is broken.
    pub fn from_ascii(bytes: &[u8]) -> Result<Self, DnaError> {
        bytes
            .iter()
            .map(|&b| Nucleotide::from_ascii(b))
            .collect::<Result<Vec<_>, _>>()
            .map(DnaSequence)
    }
}

impl From<Vec<Nucleotide>> for DnaSequence {
    fn from(symbols: Vec<Nucleotide>) -> Self {
        DnaSequence(symbols)
    }
}

/// Encodes raw bytes into a DNA sequence, four symbols per byte.
pub fn encode(bytes: &[u8]) -> DnaSequence {
    let mut symbols = Vec::with_capacity(bytes.len() * 4);
    for &byte in bytes {
        // MSB pair first: bits 7-6, 5-4, 3-2, 1-0
        for shift in [6u8, 4, 2, 0] {
            symbols.push(Nucleotide::from_bits(byte >> shift));
        }
    }
    DnaSequence(symbols)
}

/// Decodes a DNA sequence back into a pixel buffer of the given shape.
///
/// Symbols are packed four-per-byte, most significant pair first, mirroring
/// [`encode`]. A trailing partial byte (sequence length not a multiple of 4)
/// is dropped before the policy is applied.
pub fn decode(
    sequence: &DnaSequence,
    shape: Shape,
    policy: OnSizeMismatch,
) -> Result<PixelBuffer, DnaError> {
    let symbols = sequence.symbols();
    let mut bytes = Vec::with_capacity(symbols.len() / 4);
    for group in symbols.chunks_exact(4) {
        let byte = (group[0].to_bits() << 6)
            | (group[1].to_bits() << 4)
            | (group[2].to_bits() << 2)
            | group[3].to_bits();
        bytes.push(byte);
    }

    let expected = shape.len();
    if bytes.len() != expected {
        match policy {
            OnSizeMismatch::Fail => {
                return Err(DnaError::SizeMismatch {
                    expected,
                    got: bytes.len(),
                });
            }
            OnSizeMismatch::PadWithZero => {
                bytes.resize(expected, 0);
            }
            OnSizeMismatch::Truncate => {
                if bytes.len() < expected {
                    return Err(DnaError::SizeMismatch {
                        expected,
                        got: bytes.len(),
                    });
                }
                bytes.truncate(expected);
            }
        }
    }

    // Length now matches the shape, so this cannot fail.
    Ok(PixelBuffer::new(bytes, shape).expect("decode output matches target shape"))
}
