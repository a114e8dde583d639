//! Access to unique identifiers provided by the device.
//!
//! This crate provides [`DeviceIdentitySource`], a capability through which the identifier of the
//! concrete piece of hardware that the software is running on can be read in byte serialized
//! form.
//!
//! Concrete properties of a device identity are:
//!
//! * Identifiers are reasonably unique: They are either unique by construction (serial number, MAC
//!   address) or random identifiers (>= 64 bit).
//!
//! * Identifiers are immutable: they are factory-assigned and do not change across power cycles,
//!   reflashing or deep-sleep wake-ups. Secrets derived from them are therefore stable as well.
//!
//! Obtaining an identifier fails rather than produce a dummy identifier.
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

mod eui48;

pub use eui48::Eui48;

/// Capability to read the unique identifier available on a device.
///
/// See the crate level documentation on the characteristics of the identifier.
///
/// This is an instance rather than a free function so that consumers (such as key derivation) can
/// be exercised without real hardware.
pub trait DeviceIdentitySource {
    /// Some `[u8; N]` type, returned by [`.device_id()`][Self::device_id].
    ///
    /// This may not represent all the identifying information available on the device, but can
    /// represent a unique portion thereof. On ESP32 devices this is the Wi-Fi station MAC address.
    type Bytes: AsRef<[u8]>;

    /// Error type indicating that no identifier is available.
    ///
    /// It is encouraged to be [`core::convert::Infallible`] where possible.
    type Error: core::error::Error;

    /// Obtains the unique identifier of the device.
    ///
    /// # Errors
    ///
    /// This produces an error if no device ID is available on this device, or is not implemented.
    fn device_id(&self) -> Result<Self::Bytes, Self::Error>;
}

impl<T: DeviceIdentitySource> DeviceIdentitySource for &T {
    type Bytes = T::Bytes;
    type Error = T::Error;

    fn device_id(&self) -> Result<Self::Bytes, Self::Error> {
        (**self).device_id()
    }
}

/// An uninhabited type implementing [`DeviceIdentitySource`] that always errs.
///
/// This can be used both on devices that do not have a unique identifier, and when reading it has
/// not yet been implemented.
///
/// Typical types for `E` are [`NotImplemented`] or [`NotAvailable`].
#[derive(Debug)]
pub struct NoDeviceId<E: core::error::Error + Default>(
    core::convert::Infallible,
    core::marker::PhantomData<E>,
);

impl<E: core::error::Error + Default> NoDeviceId<E> {
    /// Reads the (missing) identifier, without an instance at hand.
    ///
    /// # Errors
    ///
    /// Always.
    pub fn get() -> Result<[u8; 0], E> {
        Err(E::default())
    }
}

impl<E: core::error::Error + Default> DeviceIdentitySource for NoDeviceId<E> {
    // We could also come up with a custom never type that AsRef's into [u8].
    type Bytes = [u8; 0];
    type Error = E;

    fn device_id(&self) -> Result<[u8; 0], E> {
        match self.0 {}
    }
}

/// Error indicating that a device identifier may be available on this device, but is not
/// implemented.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotImplemented;

impl core::fmt::Display for NotImplemented {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Device ID not implemented on this device")
    }
}

impl core::error::Error for NotImplemented {}

/// Error indicating that a device identifier is not available on this device.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NotAvailable;

impl core::fmt::Display for NotAvailable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Device ID not available on this device")
    }
}

impl core::error::Error for NotAvailable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_identity_errs() {
        assert_eq!(NoDeviceId::<NotAvailable>::get(), Err(NotAvailable));
        assert_eq!(
            NotImplemented.to_string(),
            "Device ID not implemented on this device"
        );
    }

    fn read_id<S: DeviceIdentitySource>(source: S) -> Option<Vec<u8>> {
        source.device_id().ok().map(|bytes| bytes.as_ref().to_vec())
    }

    #[test]
    fn references_forward() {
        let mac = Eui48([0x34, 0x85, 0x18, 0x01, 0x02, 0x03]);
        assert_eq!(read_id(&mac), Some(vec![0x34, 0x85, 0x18, 0x01, 0x02, 0x03]));
        assert_eq!(read_id(&&mac), read_id(mac));
    }
}
