use aqor_identity::DeviceIdentitySource;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

/// Length of a [`DeviceKey`] in bytes (AES-128).
pub const KEY_LEN: usize = 16;

/// Symmetric key of this device.
///
/// The key is the first 16 bytes of the SHA-256 digest of the hardware identifier. It is never
/// stored: every boot derives the identical key again, which makes it a fixed per-device secret.
/// It is wiped from memory when dropped.
#[derive(Clone, PartialEq, Eq)]
pub struct DeviceKey([u8; KEY_LEN]);

impl DeviceKey {
    /// Derives the key from the device identity.
    ///
    /// # Errors
    ///
    /// Forwards the identity source's error. Callers on the boot path must treat this as fatal:
    /// the node has no way to protect its payload without the key.
    pub fn derive<S: DeviceIdentitySource>(source: &S) -> Result<Self, S::Error> {
        let identity = source.device_id()?;
        let key = Self::from_identity(identity.as_ref());
        aqor_log::debug!("device key derived from {} identity bytes", identity.as_ref().len());
        Ok(key)
    }

    /// Derives the key from raw identifier bytes.
    pub fn from_identity(identity: &[u8]) -> Self {
        let mut digest = Sha256::digest(identity);
        let (head, _) = digest.split_at(KEY_LEN);

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(head);
        digest.as_mut_slice().zeroize();

        Self(key)
    }

    /// Returns the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for DeviceKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

// Never print key material.
impl core::fmt::Debug for DeviceKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("DeviceKey(..)")
    }
}
