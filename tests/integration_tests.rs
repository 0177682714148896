//! Integration tests for Helixhide
//!
//! Covers the full pipeline end to end:
//! - DNA encode → chaotic scramble → AES-GCM → (stego) → ledger
//! - Exact inverse on the decrypt path
//! - Tamper detection at the cipher and ledger layers

use std::fs;

use helixhide::chaos::{derive_permutation, scramble, unscramble};
use helixhide::crypto::{symmetric, KeyMaterial, KeyStore};
use helixhide::dna::{self, DnaSequence, OnSizeMismatch};
use helixhide::ledger::{hash_block, Ledger};
use helixhide::pipeline::Pipeline;
use helixhide::pixel::{PixelBuffer, Shape};
use helixhide::{CHAOS_RATE, CHAOS_SEED};
use tempfile::tempdir;

fn pipeline_in(dir: &std::path::Path) -> Pipeline {
    let keystore = KeyStore::new(dir.join("aes_key.bin"));
    let ledger = Ledger::open(dir.join("ledger.json")).unwrap();
    Pipeline::new(keystore, ledger)
}

/// The reference scenario: a 2x2 single-channel image through every stage.
#[test]
fn test_reference_image_roundtrip() {
    let dir = tempdir().unwrap();
    let mut pipeline = pipeline_in(dir.path());

    let image = PixelBuffer::new(vec![10, 20, 30, 40], Shape::new(2, 2, 1)).unwrap();

    // Four bytes become sixteen DNA symbols
    let sequence = dna::encode(image.samples());
    assert_eq!(sequence.len(), 16);

    let artifact = pipeline.encrypt(&image).unwrap();
    let restored = pipeline.decrypt(&artifact).unwrap();

    assert_eq!(restored.samples(), &[10, 20, 30, 40]);
    assert_eq!(restored.shape(), image.shape());
}

/// The manual stage-by-stage path must agree with the pipeline.
#[test]
fn test_stages_compose_like_pipeline() {
    let image = PixelBuffer::new(vec![10, 20, 30, 40], Shape::new(2, 2, 1)).unwrap();
    let key = KeyMaterial::from_bytes(*b"0123456789abcdef");

    // Forward
    let sequence = dna::encode(image.samples());
    let perm = derive_permutation(CHAOS_SEED, sequence.len(), CHAOS_RATE).unwrap();
    let scrambled = scramble(sequence.symbols(), &perm).unwrap();
    let ascii = DnaSequence::from(scrambled).to_ascii();
    let frame = symmetric::encrypt(ascii.clone().into(), &key).unwrap();

    // Inverse
    let decrypted = symmetric::decrypt(&frame, &key).unwrap();
    assert_eq!(decrypted, ascii);
    let back = DnaSequence::from_ascii(&decrypted).unwrap();
    let unscrambled = unscramble(back.symbols(), &perm).unwrap();
    let restored = dna::decode(
        &DnaSequence::from(unscrambled),
        image.shape(),
        OnSizeMismatch::Fail,
    )
    .unwrap();

    assert_eq!(restored, image);
}

/// Larger image with three channels.
#[test]
fn test_rgb_image_roundtrip() {
    let dir = tempdir().unwrap();
    let mut pipeline = pipeline_in(dir.path());

    let shape = Shape::new(24, 16, 3);
    let data: Vec<u8> = (0..shape.len()).map(|i| ((i * 13) % 256) as u8).collect();
    let image = PixelBuffer::new(data, shape).unwrap();

    let artifact = pipeline.encrypt(&image).unwrap();
    let restored = pipeline.decrypt(&artifact).unwrap();
    assert_eq!(restored, image);
}

/// Full stego transport: the artifact (frame + shape) rides inside a cover.
#[test]
fn test_stego_transport_end_to_end() {
    let dir = tempdir().unwrap();
    let mut pipeline = pipeline_in(dir.path());

    let image = PixelBuffer::new(vec![1, 2, 3, 4, 5, 6], Shape::new(2, 3, 1)).unwrap();
    let artifact = pipeline.encrypt(&image).unwrap();

    let cover_shape = Shape::new(48, 48, 3);
    let cover_data: Vec<u8> = (0..cover_shape.len()).map(|i| (i % 249) as u8).collect();
    let cover = PixelBuffer::new(cover_data, cover_shape).unwrap();

    let stego = pipeline.conceal(&artifact, &cover).unwrap();
    // Stego image keeps the cover's shape and only differs in LSBs
    assert_eq!(stego.shape(), cover.shape());
    for (a, b) in cover.samples().iter().zip(stego.samples()) {
        assert_eq!(a & 0xFE, b & 0xFE);
    }

    let revealed = pipeline.reveal(&stego).unwrap();
    assert_eq!(revealed, artifact);
    assert_eq!(pipeline.decrypt(&revealed).unwrap(), image);
}

/// A key file of the wrong length is regenerated, and the pipeline works
/// with the replacement.
#[test]
fn test_key_self_healing_end_to_end() {
    let dir = tempdir().unwrap();
    let key_path = dir.path().join("aes_key.bin");
    fs::write(&key_path, [0u8; 5]).unwrap();

    let keystore = KeyStore::new(&key_path);
    let ledger = Ledger::open(dir.path().join("ledger.json")).unwrap();
    let mut pipeline = Pipeline::new(keystore, ledger);

    assert_eq!(fs::read(&key_path).unwrap().len(), 5);

    let image = PixelBuffer::new(vec![9, 8, 7, 6], Shape::new(2, 2, 1)).unwrap();
    let artifact = pipeline.encrypt(&image).unwrap();

    // Key was replaced with a proper 16-byte one
    assert_eq!(fs::read(&key_path).unwrap().len(), 16);
    assert_eq!(pipeline.decrypt(&artifact).unwrap(), image);
}

/// Every encryption leaves a fingerprint; the chain stays linked across
/// process restarts.
#[test]
fn test_ledger_accumulates_across_sessions() {
    let dir = tempdir().unwrap();
    let image = PixelBuffer::new(vec![5; 12], Shape::new(2, 2, 3)).unwrap();

    let first_artifact = {
        let mut pipeline = pipeline_in(dir.path());
        pipeline.encrypt(&image).unwrap()
    };

    let second_artifact = {
        let mut pipeline = pipeline_in(dir.path());
        pipeline.encrypt(&image).unwrap()
    };

    let ledger = Ledger::open(dir.path().join("ledger.json")).unwrap();
    assert_eq!(ledger.blocks().len(), 3); // genesis + 2
    ledger.verify_chain().unwrap();

    for i in 1..ledger.blocks().len() {
        assert_eq!(
            ledger.blocks()[i].previous_hash,
            hash_block(&ledger.blocks()[i - 1])
        );
    }

    assert!(ledger.verify_membership(&first_artifact.fingerprint()));
    assert!(ledger.verify_membership(&second_artifact.fingerprint()));
    // Fresh nonce per encryption: same image, different artifacts
    assert_ne!(first_artifact.frame, second_artifact.frame);
}

/// Decrypting with a different key store fails authentication, with no
/// partial output.
#[test]
fn test_wrong_key_store_fails_closed() {
    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();

    let image = PixelBuffer::new(vec![11, 22, 33, 44], Shape::new(2, 2, 1)).unwrap();
    let artifact = {
        let mut pipeline = pipeline_in(dir_a.path());
        pipeline.encrypt(&image).unwrap()
    };

    let other = pipeline_in(dir_b.path());
    assert!(other.decrypt(&artifact).is_err());
}
