use crate::{
    gpio::{Gpio, Level},
    pins::{self, PinAssignment},
};

/// Power-related wiring of a board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Board {
    /// Human-readable board name.
    pub name: &'static str,
    /// Switch of the external power rail (Vext).
    pub vext: Gpio,
    /// Level of [`vext`](Self::vext) at which the rail is powered.
    pub vext_active: Level,
    /// Switch of the peripheral power supply.
    pub peripheral_power: Gpio,
    /// State of every relevant pin during deep sleep.
    pub sleep_pins: &'static [PinAssignment],
}

impl Board {
    /// Heltec WiFi LoRa 32 V3 (ESP32-S3 + SX1262).
    pub const HELTEC_WIFI_LORA_32_V3: Self = Self {
        name: "heltec-wifi-lora-32-v3",
        vext: Gpio(43),
        vext_active: Level::Low,
        peripheral_power: Gpio(21),
        sleep_pins: pins::HELTEC_WIFI_LORA_32_V3,
    };
}
