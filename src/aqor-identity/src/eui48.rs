use crate::DeviceIdentitySource;

/// An EUI-48 identifier ("6-byte MAC address").
///
/// Factory-assigned addresses, such as the ESP32 Wi-Fi station address, are stable identities
/// and can be used as a [`DeviceIdentitySource`] directly.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Eui48(pub [u8; 6]);

impl Eui48 {
    /// Returns the address bytes, most significant first.
    pub const fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl From<[u8; 6]> for Eui48 {
    fn from(octets: [u8; 6]) -> Self {
        Self(octets)
    }
}

impl core::fmt::Display for Eui48 {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl DeviceIdentitySource for Eui48 {
    type Bytes = [u8; 6];
    type Error = core::convert::Infallible;

    fn device_id(&self) -> Result<[u8; 6], Self::Error> {
        Ok(self.0)
    }
}
