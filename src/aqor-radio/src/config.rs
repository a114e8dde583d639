//! LoRa link parameters.
//!
//! The link is fixed at build time; nothing in this crate changes it at runtime. A few values can
//! be overridden through environment variables when building:
//!
//! - `CONFIG_LORA_FREQUENCY_HZ` (default 868 MHz)
//! - `CONFIG_LORA_TX_POWER_DBM` (default 18 dBm)
//! - `CONFIG_LORA_SPREADING_FACTOR` (default 7)
//! - `CONFIG_LORA_SEND_TIMEOUT_MS` (default 5000)

use embassy_time::Duration;

/// Carrier frequency in Hz.
pub const FREQUENCY_HZ: u32 =
    aqor_utils::u32_from_env_or!("CONFIG_LORA_FREQUENCY_HZ", 868_000_000, "carrier frequency");

/// Transmit power in dBm.
pub const TX_POWER_DBM: i8 =
    aqor_utils::i8_from_env_or!("CONFIG_LORA_TX_POWER_DBM", 18, "transmit power");

/// Spreading factor.
pub const SPREADING_FACTOR: SpreadingFactor = match SpreadingFactor::from_factor(
    aqor_utils::u8_from_env_or!("CONFIG_LORA_SPREADING_FACTOR", 7, "spreading factor"),
) {
    Some(sf) => sf,
    None => panic!("CONFIG_LORA_SPREADING_FACTOR must be within 7..=12"),
};

/// Deadline of [`RadioTransport::send()`](crate::RadioTransport::send), from send start.
pub const SEND_TIMEOUT: Duration = Duration::from_millis(aqor_utils::u64_from_env_or!(
    "CONFIG_LORA_SEND_TIMEOUT_MS",
    5000,
    "send deadline in milliseconds"
));

/// Delay between two polls of the radio while a transmission is in flight.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Largest payload a single LoRa frame can carry.
pub const MAX_PAYLOAD_LEN: usize = 255;

/// LoRa channel bandwidth.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bandwidth {
    /// 125 kHz.
    _125kHz,
    /// 250 kHz.
    _250kHz,
    /// 500 kHz.
    _500kHz,
}

impl Bandwidth {
    /// Bandwidth code as used by the SX126x driver API.
    pub const fn code(self) -> u8 {
        match self {
            Self::_125kHz => 0,
            Self::_250kHz => 1,
            Self::_500kHz => 2,
        }
    }
}

/// LoRa spreading factor.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpreadingFactor {
    /// SF7.
    Sf7,
    /// SF8.
    Sf8,
    /// SF9.
    Sf9,
    /// SF10.
    Sf10,
    /// SF11.
    Sf11,
    /// SF12.
    Sf12,
}

impl SpreadingFactor {
    /// Returns the spreading factor for `factor`, if it is within `7..=12`.
    pub const fn from_factor(factor: u8) -> Option<Self> {
        match factor {
            7 => Some(Self::Sf7),
            8 => Some(Self::Sf8),
            9 => Some(Self::Sf9),
            10 => Some(Self::Sf10),
            11 => Some(Self::Sf11),
            12 => Some(Self::Sf12),
            _ => None,
        }
    }

    /// The factor, `7..=12`.
    pub const fn factor(self) -> u8 {
        match self {
            Self::Sf7 => 7,
            Self::Sf8 => 8,
            Self::Sf9 => 9,
            Self::Sf10 => 10,
            Self::Sf11 => 11,
            Self::Sf12 => 12,
        }
    }
}

/// LoRa forward error correction coding rate.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodingRate {
    /// 4/5.
    _4_5,
    /// 4/6.
    _4_6,
    /// 4/7.
    _4_7,
    /// 4/8.
    _4_8,
}

impl CodingRate {
    /// Coding rate code as used by the SX126x driver API.
    pub const fn code(self) -> u8 {
        match self {
            Self::_4_5 => 1,
            Self::_4_6 => 2,
            Self::_4_7 => 3,
            Self::_4_8 => 4,
        }
    }
}

/// Complete radio link configuration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// Carrier frequency in Hz.
    pub frequency_hz: u32,
    /// Transmit power in dBm.
    pub tx_power_dbm: i8,
    /// Channel bandwidth.
    pub bandwidth: Bandwidth,
    /// Spreading factor.
    pub spreading_factor: SpreadingFactor,
    /// Coding rate.
    pub coding_rate: CodingRate,
    /// Preamble length in symbols, for both directions.
    pub preamble_len: u16,
    /// Implicit header (fixed-length payload) mode.
    pub fixed_length_payload: bool,
    /// Whether the payload CRC is sent.
    pub crc_on: bool,
    /// Whether IQ signals are inverted.
    pub iq_inverted: bool,
    /// Receive symbol timeout; 0 disables it.
    pub symbol_timeout: u16,
    /// Receive timeout.
    pub rx_timeout: Duration,
    /// The radio's own transmit watchdog.
    pub radio_tx_timeout: Duration,
    /// Largest payload accepted by [`RadioTransport::send()`](crate::RadioTransport::send).
    pub max_payload_len: usize,
    /// Deadline of [`RadioTransport::send()`](crate::RadioTransport::send).
    pub send_timeout: Duration,
    /// Delay between two polls while a transmission is in flight.
    pub poll_interval: Duration,
}

impl RadioConfig {
    /// The node's link configuration.
    pub const DEFAULT: Self = Self {
        frequency_hz: FREQUENCY_HZ,
        tx_power_dbm: TX_POWER_DBM,
        bandwidth: Bandwidth::_125kHz,
        spreading_factor: SPREADING_FACTOR,
        coding_rate: CodingRate::_4_5,
        preamble_len: 8,
        fixed_length_payload: false,
        crc_on: true,
        iq_inverted: false,
        symbol_timeout: 0,
        rx_timeout: Duration::from_millis(1000),
        radio_tx_timeout: Duration::from_millis(3000),
        max_payload_len: MAX_PAYLOAD_LEN,
        send_timeout: SEND_TIMEOUT,
        poll_interval: POLL_INTERVAL,
    };
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_link() {
        let config = RadioConfig::default();
        assert_eq!(config.frequency_hz, 868_000_000);
        assert_eq!(config.tx_power_dbm, 18);
        assert_eq!(config.bandwidth.code(), 0);
        assert_eq!(config.spreading_factor.factor(), 7);
        assert_eq!(config.coding_rate.code(), 1);
        assert_eq!(config.preamble_len, 8);
        assert!(!config.fixed_length_payload);
        assert!(!config.iq_inverted);
        assert_eq!(config.send_timeout, Duration::from_millis(5000));
        assert_eq!(config.poll_interval, Duration::from_millis(10));
    }

    #[test]
    fn spreading_factor_range() {
        assert_eq!(SpreadingFactor::from_factor(6), None);
        assert_eq!(SpreadingFactor::from_factor(13), None);
        for factor in 7..=12 {
            assert_eq!(SpreadingFactor::from_factor(factor).map(SpreadingFactor::factor), Some(factor));
        }
    }
}
