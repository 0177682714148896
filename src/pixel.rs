//! Raw pixel buffers with an explicit shape.
//!
//! Every pipeline stage that touches image data consumes or produces a
//! [`PixelBuffer`]: a dense, row-major `Vec<u8>` paired with its
//! height × width × channels shape. The shape travels with the ciphertext
//! (see [`crate::pipeline::EncryptedImage`]) because DNA decoding cannot
//! reconstruct it from the byte stream alone.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when constructing a pixel buffer.
#[derive(Error, Debug)]
pub enum PixelError {
    #[error("Buffer length {got} does not match shape {shape:?} ({expected} samples)")]
    ShapeMismatch {
        shape: Shape,
        expected: usize,
        got: usize,
    },
}

/// Image dimensions: height, width, and samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shape {
    pub height: usize,
    pub width: usize,
    pub channels: usize,
}

impl Shape {
    pub fn new(height: usize, width: usize, channels: usize) -> Self {
        Self {
            height,
            width,
            channels,
        }
    }

    /// Total number of u8 samples a buffer of this shape holds.
    pub fn len(&self) -> usize {
        self.height * self.width * self.channels
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A dense, row-major image buffer of unsigned 8-bit samples.
///
/// Invariant: `data.len() == shape.len()`, enforced at construction.
/// Buffers are owned by one pipeline stage at a time; stages take them by
/// value or return fresh copies, never aliasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    shape: Shape,
}

impl PixelBuffer {
    /// Creates a buffer, validating that `data` matches `shape`.
    pub fn new(data: Vec<u8>, shape: Shape) -> Result<Self, PixelError> {
        if data.len() != shape.len() {
            return Err(PixelError::ShapeMismatch {
                shape,
                expected: shape.len(),
                got: data.len(),
            });
        }
        Ok(Self { data, shape })
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The flattened samples in row-major order.
    pub fn samples(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the buffer and returns the raw samples.
    pub fn into_samples(self) -> Vec<u8> {
        self.data
    }
}
