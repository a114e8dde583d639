//! Payload protection for outgoing telemetry.
//!
//! A [`DeviceKey`] is derived once per boot from the device's hardware identity; a [`Cipher`]
//! then encrypts each payload with AES-128 in CBC mode under a fresh random IV, producing an
//! [`EncryptedMessage`] laid out as `IV (16 bytes) || ciphertext (N × 16 bytes)`.
//!
//! Padding is PKCS#7 and unconditional: a block-aligned plaintext receives a full block of
//! padding, so that the last decrypted byte is always a pad length in `1..=16`.
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

mod cipher;
mod key;

pub use cipher::{
    Cipher, CipherError, EncryptedMessage, Plaintext, BLOCK_LEN, IV_LEN, MAX_CIPHERTEXT_LEN,
    MAX_MESSAGE_LEN, MAX_PLAINTEXT_LEN,
};
pub use key::{DeviceKey, KEY_LEN};

/// Length of an [`EncryptedMessage`] for a plaintext of `plaintext_len` bytes.
///
/// One IV plus as many blocks as needed to hold the plaintext and at least one padding byte.
pub const fn encrypted_len(plaintext_len: usize) -> usize {
    IV_LEN + (plaintext_len / BLOCK_LEN + 1) * BLOCK_LEN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_pads_at_least_one_block() {
        assert_eq!(encrypted_len(0), 32);
        assert_eq!(encrypted_len(4), 32);
        assert_eq!(encrypted_len(15), 32);
        assert_eq!(encrypted_len(16), 48);
        assert_eq!(encrypted_len(MAX_PLAINTEXT_LEN), MAX_MESSAGE_LEN);
    }
}
