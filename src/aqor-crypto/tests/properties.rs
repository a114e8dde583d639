//! Property-based tests for the payload cipher
//!
//! 1. **Round-trip**: decrypt(encrypt(p)) == p for every plaintext that fits a message
//! 2. **Sizing**: the message is the IV plus at least one padding byte, rounded up to a block
//! 3. **IV freshness**: encrypting the same plaintext twice never yields the same message

use aqor_crypto::{encrypted_len, Cipher, DeviceKey, BLOCK_LEN, IV_LEN, MAX_PLAINTEXT_LEN};
use aqor_identity::Eui48;
use proptest::prelude::*;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

fn cipher_for(mac: [u8; 6]) -> Cipher {
    Cipher::new(DeviceKey::derive(&Eui48(mac)).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_encrypt_decrypt_roundtrip(
        plaintext in prop::collection::vec(any::<u8>(), 0..=MAX_PLAINTEXT_LEN),
        mac in any::<[u8; 6]>(),
        seed in any::<u64>(),
    ) {
        let cipher = cipher_for(mac);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        let message = cipher.encrypt(&mut rng, &plaintext).unwrap();
        let decrypted = cipher.decrypt(message.as_bytes()).unwrap();

        prop_assert_eq!(decrypted.as_slice(), plaintext.as_slice());
    }

    #[test]
    fn prop_message_size(
        plaintext in prop::collection::vec(any::<u8>(), 0..=MAX_PLAINTEXT_LEN),
        seed in any::<u64>(),
    ) {
        let cipher = cipher_for([0x34, 0x85, 0x18, 0, 0, 1]);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        let message = cipher.encrypt(&mut rng, &plaintext).unwrap();

        prop_assert_eq!(message.len(), IV_LEN + (plaintext.len() / BLOCK_LEN + 1) * BLOCK_LEN);
        prop_assert_eq!(message.len(), encrypted_len(plaintext.len()));
        prop_assert_eq!(message.ciphertext().len() % BLOCK_LEN, 0);
        prop_assert!(message.ciphertext().len() > plaintext.len());
    }

    #[test]
    fn prop_iv_is_fresh(
        plaintext in prop::collection::vec(any::<u8>(), 0..64),
        seed in any::<u64>(),
    ) {
        let cipher = cipher_for([0x34, 0x85, 0x18, 0, 0, 2]);
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        let first = cipher.encrypt(&mut rng, &plaintext).unwrap();
        let second = cipher.encrypt(&mut rng, &plaintext).unwrap();

        prop_assert_ne!(first.iv(), second.iv());
        prop_assert_ne!(first.as_bytes(), second.as_bytes());
    }
}
