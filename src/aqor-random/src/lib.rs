//! Provides a seeded cryptographically secure random number generator.
//!
//! The crate provides [`crypto_rng()`], which produces an owned handle implementing the
//! [`rand_core::RngCore`] and [`rand_core::CryptoRng`] traits. It is the entropy source for
//! initialization vectors of outgoing messages.
//!
//! Before accessing the RNG, it needs to be initialized through the [`construct_rng()`] function,
//! with the hardware RNG as seed source. This is done once per boot; nothing of it survives deep
//! sleep.
//!
//! ---
//!
//! The shared global generator is a [`rand_chacha::ChaCha20Rng`]. Neither the algorithm nor the
//! size of [`CryptoRng`] is guaranteed.
#![cfg_attr(not(test), no_std)]

use rand_core::{RngCore, SeedableRng};

/// A global RNG.
// The Mutex<RefCell> can probably be simplified
static RNG: embassy_sync::blocking_mutex::Mutex<
    embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex,
    core::cell::RefCell<Option<SelectedRng>>,
> = embassy_sync::blocking_mutex::Mutex::new(core::cell::RefCell::new(None));

/// Type of the global RNG.
///
/// If calls to [`crypto_rng()`] are rare, it may even make sense to move the HWRNG in here to get
/// a ZST global.
pub(crate) type SelectedRng = rand_chacha::ChaCha20Rng;

/// Locks the global RNG for a single operation.
///
/// ## Panics
///
/// … if initialization did not happen.
///
/// ## Deadlocks
///
/// … if the action attempts to lock RNG.
fn with_global<R>(action: impl FnOnce(&mut SelectedRng) -> R) -> R {
    RNG.lock(|i| {
        action(
            i.borrow_mut()
                .as_mut()
                .expect("Initialization should have populated RNG"),
        )
    })
}

/// The cryptographically secure random number generator.
///
/// Such an RNG can be requested by any component, and will always be seeded appropriately.
pub struct CryptoRng {
    // Make the type not Send to later allow using thread-locals
    _private: core::marker::PhantomData<*const ()>,
}

// Re-implementing the trait rather than Deref'ing into inner: This avoids leaking implementation
// details to users who might otherwise come to depend on platform specifics of the CryptoRng.
impl RngCore for CryptoRng {
    fn next_u32(&mut self) -> u32 {
        with_global(RngCore::next_u32)
    }
    fn next_u64(&mut self) -> u64 {
        with_global(RngCore::next_u64)
    }
    fn fill_bytes(&mut self, buf: &mut [u8]) {
        with_global(|i| i.fill_bytes(buf));
    }
    fn try_fill_bytes(&mut self, buf: &mut [u8]) -> Result<(), rand_core::Error> {
        with_global(|i| i.try_fill_bytes(buf))
    }
}

impl rand_core::CryptoRng for CryptoRng {}

/// Asserts that SelectedRng is CryptoRng, justifying the implementation above.
#[allow(dead_code, unused_variables)]
fn static_assert_is_cryptorng() -> impl rand_core::CryptoRng {
    let result: SelectedRng = unreachable!("This function is for type checking only");
    #[allow(unreachable_code)]
    result
}

/// Populates the global RNG from a seed value.
///
/// Called once at boot with the hardware RNG. Calling it again reseeds the generator.
///
/// ## Panics
///
/// … if the hardware RNG fails to provide entropy; the node cannot produce fresh IVs without it.
pub fn construct_rng(hwrng: impl RngCore) {
    RNG.lock(|r| {
        r.replace(Some(
            SelectedRng::from_rng(hwrng).expect("Hardware RNG failed to provide entropy"),
        ))
    });
}

/// Obtains a suitably initialized cryptographically secure random number generator.
///
/// The handle draws from the global generator, which must have been populated by
/// [`construct_rng()`] before any random number is requested.
#[inline]
pub fn crypto_rng() -> CryptoRng {
    CryptoRng {
        _private: core::marker::PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_distinct_blocks() {
        construct_rng(rand_chacha::ChaCha8Rng::seed_from_u64(7));

        let mut rng = crypto_rng();
        let mut first = [0u8; 16];
        let mut second = [0u8; 16];
        rng.fill_bytes(&mut first);
        rng.fill_bytes(&mut second);
        assert_ne!(first, second);
    }
}
