use aes::Aes128;
use cbc::cipher::{
    block_padding::{NoPadding, Pkcs7},
    BlockDecryptMut, BlockEncryptMut, KeyIvInit,
};
use rand_core::CryptoRngCore;

use crate::{encrypted_len, DeviceKey};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// AES block length in bytes.
pub const BLOCK_LEN: usize = 16;

/// Length of the initialization vector prepended to every message.
pub const IV_LEN: usize = 16;

/// Largest [`EncryptedMessage`] produced or accepted.
///
/// IV plus 14 blocks, so that a message always fits into a single 255-byte LoRa frame.
pub const MAX_MESSAGE_LEN: usize = 240;

/// Largest ciphertext (without IV) accepted by [`Cipher::decrypt()`].
pub const MAX_CIPHERTEXT_LEN: usize = MAX_MESSAGE_LEN - IV_LEN;

/// Largest plaintext accepted by [`Cipher::encrypt()`].
///
/// One byte less than the ciphertext capacity, as padding takes at least one byte.
pub const MAX_PLAINTEXT_LEN: usize = MAX_CIPHERTEXT_LEN - 1;

/// Decrypted payload.
pub type Plaintext = heapless::Vec<u8, MAX_CIPHERTEXT_LEN>;

/// Errors of [`Cipher`] operations.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CipherError {
    /// The last decrypted byte is not a plausible pad length.
    ///
    /// The message was tampered with, corrupted, or encrypted under another key.
    Padding,
    /// The message is not an IV followed by a positive number of whole blocks, or exceeds
    /// [`MAX_MESSAGE_LEN`].
    Malformed,
    /// The plaintext exceeds [`MAX_PLAINTEXT_LEN`].
    PlaintextTooLong,
}

impl core::fmt::Display for CipherError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Padding => f.write_str("invalid padding"),
            Self::Malformed => f.write_str("malformed encrypted message"),
            Self::PlaintextTooLong => f.write_str("plaintext too long"),
        }
    }
}

impl core::error::Error for CipherError {}

/// An encrypted payload: `IV || ciphertext`.
///
/// The ciphertext length is always a positive multiple of [`BLOCK_LEN`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncryptedMessage(heapless::Vec<u8, MAX_MESSAGE_LEN>);

impl EncryptedMessage {
    /// Wraps received bytes after checking their layout.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Malformed`] if `bytes` is not an IV followed by whole blocks.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CipherError> {
        check_layout(bytes)?;
        heapless::Vec::from_slice(bytes)
            .map(Self)
            .map_err(|()| CipherError::Malformed)
    }

    /// The initialization vector.
    pub fn iv(&self) -> &[u8; IV_LEN] {
        match self.0.split_first_chunk::<IV_LEN>() {
            Some((iv, _)) => iv,
            None => unreachable!("layout is checked at construction"),
        }
    }

    /// The ciphertext following the IV.
    pub fn ciphertext(&self) -> &[u8] {
        let (_, ciphertext) = self.0.split_at(IV_LEN);
        ciphertext
    }

    /// The wire representation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Total length including the IV.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl AsRef<[u8]> for EncryptedMessage {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

fn check_layout(bytes: &[u8]) -> Result<(), CipherError> {
    let ciphertext_len = bytes
        .len()
        .checked_sub(IV_LEN)
        .ok_or(CipherError::Malformed)?;

    if ciphertext_len == 0 || ciphertext_len % BLOCK_LEN != 0 || bytes.len() > MAX_MESSAGE_LEN {
        return Err(CipherError::Malformed);
    }
    Ok(())
}

/// AES-128-CBC under the device key.
pub struct Cipher {
    key: DeviceKey,
}

impl Cipher {
    /// Creates a cipher using `key` for every message.
    pub fn new(key: DeviceKey) -> Self {
        Self { key }
    }

    /// Encrypts `plaintext` under a fresh IV drawn from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::PlaintextTooLong`] if the plaintext exceeds [`MAX_PLAINTEXT_LEN`].
    pub fn encrypt(
        &self,
        rng: &mut impl CryptoRngCore,
        plaintext: &[u8],
    ) -> Result<EncryptedMessage, CipherError> {
        if plaintext.len() > MAX_PLAINTEXT_LEN {
            return Err(CipherError::PlaintextTooLong);
        }

        let mut message = heapless::Vec::<u8, MAX_MESSAGE_LEN>::new();
        message
            .resize(encrypted_len(plaintext.len()), 0)
            .map_err(|()| CipherError::PlaintextTooLong)?;

        let (iv, body) = message.split_at_mut(IV_LEN);
        rng.fill_bytes(iv);

        let (head, _) = body.split_at_mut(plaintext.len());
        head.copy_from_slice(plaintext);

        let mut iv_block = [0u8; IV_LEN];
        iv_block.copy_from_slice(iv);

        // Pkcs7 always appends 1..=16 bytes, a whole block when the plaintext is aligned.
        Aes128CbcEnc::new(&(*self.key.as_bytes()).into(), &iv_block.into())
            .encrypt_padded_mut::<Pkcs7>(body, plaintext.len())
            .map_err(|_| CipherError::PlaintextTooLong)?;

        Ok(EncryptedMessage(message))
    }

    /// Decrypts a message produced by [`Cipher::encrypt()`] under the same key.
    ///
    /// # Errors
    ///
    /// - [`CipherError::Malformed`] if `message` is not an IV followed by whole blocks.
    /// - [`CipherError::Padding`] if the last decrypted byte is 0, greater than 16, or greater
    ///   than the decrypted length.
    pub fn decrypt(&self, message: &[u8]) -> Result<Plaintext, CipherError> {
        check_layout(message)?;
        let (iv, ciphertext) = message
            .split_first_chunk::<IV_LEN>()
            .ok_or(CipherError::Malformed)?;

        let mut plaintext =
            Plaintext::from_slice(ciphertext).map_err(|()| CipherError::Malformed)?;

        Aes128CbcDec::new(&(*self.key.as_bytes()).into(), &(*iv).into())
            .decrypt_padded_mut::<NoPadding>(&mut plaintext)
            .map_err(|_| CipherError::Malformed)?;

        let pad_len = usize::from(*plaintext.last().ok_or(CipherError::Padding)?);
        if pad_len == 0 || pad_len > BLOCK_LEN || pad_len > plaintext.len() {
            aqor_log::warn!("rejecting message with pad length {}", pad_len);
            return Err(CipherError::Padding);
        }

        plaintext.truncate(plaintext.len() - pad_len);
        Ok(plaintext)
    }
}
