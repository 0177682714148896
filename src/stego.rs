//! LSB (Least Significant Bit) steganography over pixel buffers.
//!
//! One payload bit replaces the least significant bit of each flattened
//! sample, leaving the upper seven bits untouched - visually invisible in
//! lossless formats.
//!
//! Wire layout: a 32-bit big-endian header holding the payload *bit* count,
//! followed by the payload bits, most significant bit of each byte first.
//! Capacity is exactly one bit per sample: `height * width * channels`.

use thiserror::Error;

use crate::pixel::{PixelBuffer, Shape};

/// Bits reserved for the length header.
const HEADER_BITS: usize = 32;

/// Errors that can occur during embedding or extraction.
#[derive(Error, Debug)]
pub enum StegoError {
    #[error("Payload too large: need {needed} bits, cover has {capacity}")]
    PayloadTooLarge { needed: usize, capacity: usize },

    #[error("Truncated stego image: header claims {claimed} bits, only {available} available")]
    TruncatedStego { claimed: usize, available: usize },

    #[error("Invalid stego header: {0} bits is not a whole number of bytes")]
    InvalidHeader(usize),
}

/// Number of payload bits a cover of this shape can hold (header included).
pub fn capacity_bits(shape: Shape) -> usize {
    shape.len()
}

/// Embeds `payload` into a copy of `cover` via LSB substitution.
///
/// The cover itself is never modified; on any error it is returned to the
/// caller exactly as it was.
pub fn embed(cover: &PixelBuffer, payload: &[u8]) -> Result<PixelBuffer, StegoError> {
    let payload_bits = payload.len() * 8;
    let capacity = capacity_bits(cover.shape());
    if HEADER_BITS + payload_bits > capacity {
        return Err(StegoError::PayloadTooLarge {
            needed: HEADER_BITS + payload_bits,
            capacity,
        });
    }

    let mut samples = cover.samples().to_vec();
    let header = (payload_bits as u32).to_be_bytes();

    let bits = header
        .iter()
        .chain(payload.iter())
        .flat_map(|&byte| (0..8).map(move |shift| (byte >> (7 - shift)) & 1));

    for (sample, bit) in samples.iter_mut().zip(bits) {
        *sample = (*sample & 0xFE) | bit;
    }

    // Same shape, same length: reconstruction cannot fail.
    Ok(PixelBuffer::new(samples, cover.shape()).expect("embed preserves buffer length"))
}

/// Extracts a payload previously embedded with [`embed`].
pub fn extract(stego: &PixelBuffer) -> Result<Vec<u8>, StegoError> {
    let samples = stego.samples();
    if samples.len() < HEADER_BITS {
        return Err(StegoError::TruncatedStego {
            claimed: 0,
            available: samples.len(),
        });
    }

    let mut header = [0u8; 4];
    for (i, sample) in samples[..HEADER_BITS].iter().enumerate() {
        header[i / 8] |= (sample & 1) << (7 - (i % 8));
    }
    let payload_bits = u32::from_be_bytes(header) as usize;

    if HEADER_BITS + payload_bits > samples.len() {
        return Err(StegoError::TruncatedStego {
            claimed: payload_bits,
            available: samples.len().saturating_sub(HEADER_BITS),
        });
    }
    if payload_bits % 8 != 0 {
        return Err(StegoError::InvalidHeader(payload_bits));
    }

    let mut payload = vec![0u8; payload_bits / 8];
    for (i, sample) in samples[HEADER_BITS..HEADER_BITS + payload_bits]
        .iter()
        .enumerate()
    {
        payload[i / 8] |= (sample & 1) << (7 - (i % 8));
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_cover(height: usize, width: usize, channels: usize) -> PixelBuffer {
        let shape = Shape::new(height, width, channels);
        let data: Vec<u8> = (0..shape.len()).map(|i| ((i * 37) % 256) as u8).collect();
        PixelBuffer::new(data, shape).unwrap()
    }

    #[test]
    fn test_capacity() {
        assert_eq!(capacity_bits(Shape::new(100, 100, 3)), 30_000);
        assert_eq!(capacity_bits(Shape::new(2, 2, 1)), 4);
    }

    #[test]
    fn test_embed_extract_roundtrip() {
        let cover = test_cover(64, 64, 3);
        let payload = b"hidden in plain sight";

        let stego = embed(&cover, payload).unwrap();
        let extracted = extract(&stego).unwrap();

        assert_eq!(extracted, payload);
    }

    #[test]
    fn test_embed_touches_only_lsbs() {
        let cover = test_cover(32, 32, 3);
        let stego = embed(&cover, b"bits").unwrap();

        assert_eq!(stego.shape(), cover.shape());
        for (a, b) in cover.samples().iter().zip(stego.samples()) {
            assert_eq!(a & 0xFE, b & 0xFE);
        }
    }

    #[test]
    fn test_embed_does_not_mutate_cover() {
        let cover = test_cover(32, 32, 3);
        let original = cover.clone();
        let _ = embed(&cover, b"copy on write").unwrap();
        assert_eq!(cover, original);
    }

    #[test]
    fn test_payload_too_large() {
        let cover = test_cover(2, 2, 3); // 12 bits capacity
        let result = embed(&cover, &[0xFF]); // needs 32 + 8

        assert!(matches!(
            result,
            Err(StegoError::PayloadTooLarge {
                needed: 40,
                capacity: 12
            })
        ));
    }

    #[test]
    fn test_exact_capacity_fits() {
        // 40 samples: 32 header + 8 payload bits exactly
        let cover = test_cover(5, 8, 1);
        let stego = embed(&cover, &[0xA5]).unwrap();
        assert_eq!(extract(&stego).unwrap(), vec![0xA5]);
    }

    #[test]
    fn test_empty_payload() {
        let cover = test_cover(8, 8, 1);
        let stego = embed(&cover, &[]).unwrap();
        assert!(extract(&stego).unwrap().is_empty());
    }

    #[test]
    fn test_truncated_stego() {
        // Header claims more bits than the buffer holds: craft a buffer whose
        // first 32 LSBs spell a huge length.
        let shape = Shape::new(8, 8, 1);
        let mut data = vec![0u8; shape.len()];
        for sample in data.iter_mut().take(32) {
            *sample = 1; // header = u32::MAX-ish, way past capacity
        }
        let stego = PixelBuffer::new(data, shape).unwrap();

        assert!(matches!(
            extract(&stego),
            Err(StegoError::TruncatedStego { .. })
        ));
    }

    #[test]
    fn test_ragged_header_rejected() {
        // Header claims 3 bits - not a whole byte.
        let shape = Shape::new(8, 8, 1);
        let mut data = vec![0u8; shape.len()];
        data[30] = 1;
        data[31] = 1; // header = 0b11 = 3
        let stego = PixelBuffer::new(data, shape).unwrap();

        assert!(matches!(extract(&stego), Err(StegoError::InvalidHeader(3))));
    }

    #[test]
    fn test_binary_payload_roundtrip() {
        let cover = test_cover(128, 128, 3);
        let payload: Vec<u8> = (0..=255).collect();

        let stego = embed(&cover, &payload).unwrap();
        assert_eq!(extract(&stego).unwrap(), payload);
    }
}
