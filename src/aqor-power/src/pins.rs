//! Pin roles and the state each pin is left in across deep sleep.

use crate::gpio::{Gpio, Pull};

/// What a pin is wired to on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs)]
pub enum PinFunction {
    /// Switches the power of external peripherals (the particulate matter sensor).
    PeripheralPower,
    BatteryAdcControl,
    RadioSck,
    RadioReset,
    RadioNss,
    RadioMiso,
    RadioDio1,
    RadioMosi,
    I2cSda,
    I2cScl,
    MicrophoneSck,
    MicrophoneWs,
    MicrophoneSd,
    UartTx,
    UartRx,
}

/// State a pin is put in before deep sleep.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SleepPinState {
    /// Driven low and latched through deep sleep.
    HeldLow,
    /// Released to a high-impedance input with the given pull configuration.
    Input(Pull),
}

/// One row of a board's sleep pin table.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinAssignment {
    /// What the pin is wired to.
    pub function: PinFunction,
    /// The pin.
    pub gpio: Gpio,
    /// State of the pin during deep sleep.
    pub sleep: SleepPinState,
}

impl PinAssignment {
    const fn new(function: PinFunction, gpio: u8, sleep: SleepPinState) -> Self {
        Self {
            function,
            gpio: Gpio(gpio),
            sleep,
        }
    }
}

const HELD_LOW: SleepPinState = SleepPinState::HeldLow;
const NO_PULL: SleepPinState = SleepPinState::Input(Pull::None);
const PULL_UP: SleepPinState = SleepPinState::Input(Pull::Up);

/// Sleep pin table of the Heltec WiFi LoRa 32 V3.
pub const HELTEC_WIFI_LORA_32_V3: &[PinAssignment] = &[
    PinAssignment::new(PinFunction::PeripheralPower, 21, HELD_LOW),
    PinAssignment::new(PinFunction::BatteryAdcControl, 37, NO_PULL),
    PinAssignment::new(PinFunction::RadioSck, 9, NO_PULL),
    PinAssignment::new(PinFunction::RadioReset, 14, PULL_UP),
    PinAssignment::new(PinFunction::RadioNss, 8, PULL_UP),
    PinAssignment::new(PinFunction::RadioMiso, 11, NO_PULL),
    PinAssignment::new(PinFunction::RadioDio1, 12, NO_PULL),
    PinAssignment::new(PinFunction::RadioMosi, 10, NO_PULL),
    PinAssignment::new(PinFunction::I2cSda, 41, NO_PULL),
    PinAssignment::new(PinFunction::I2cScl, 42, NO_PULL),
    PinAssignment::new(PinFunction::MicrophoneSck, 39, NO_PULL),
    PinAssignment::new(PinFunction::MicrophoneWs, 38, NO_PULL),
    PinAssignment::new(PinFunction::MicrophoneSd, 40, NO_PULL),
    PinAssignment::new(PinFunction::UartTx, 4, NO_PULL),
    PinAssignment::new(PinFunction::UartRx, 5, NO_PULL),
];

/// The pins to latch and the pins to release for one sleep entry.
///
/// Computed right before entering sleep and consumed by it.
#[derive(Debug, Copy, Clone)]
pub struct RetainedPinSet<'a> {
    table: &'a [PinAssignment],
    extra_held: Option<Gpio>,
}

impl<'a> RetainedPinSet<'a> {
    /// Follows `table`: held-low pins are latched, all others released.
    #[must_use]
    pub const fn from_table(table: &'a [PinAssignment]) -> Self {
        Self {
            table,
            extra_held: None,
        }
    }

    /// Latches `gpio` only.
    #[must_use]
    pub const fn single(gpio: Gpio) -> Self {
        Self {
            table: &[],
            extra_held: Some(gpio),
        }
    }

    /// Pins to drive low and latch.
    pub fn held(&self) -> impl Iterator<Item = Gpio> + 'a {
        let from_table = self
            .table
            .iter()
            .filter(|pin| pin.sleep == SleepPinState::HeldLow)
            .map(|pin| pin.gpio);
        self.extra_held.into_iter().chain(from_table)
    }

    /// Pins to release to an input, with their pull configuration.
    pub fn released(&self) -> impl Iterator<Item = (Gpio, Pull)> + 'a {
        self.table.iter().filter_map(|pin| match pin.sleep {
            SleepPinState::HeldLow => None,
            SleepPinState::Input(pull) => Some((pin.gpio, pull)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heltec_table_partition() {
        let set = RetainedPinSet::from_table(HELTEC_WIFI_LORA_32_V3);

        assert_eq!(set.held().collect::<Vec<_>>(), [Gpio(21)]);

        let released = set.released().collect::<Vec<_>>();
        assert_eq!(released.len(), 14);

        let pulled_up = released
            .iter()
            .filter(|(_, pull)| *pull == Pull::Up)
            .map(|(gpio, _)| *gpio)
            .collect::<Vec<_>>();
        assert_eq!(pulled_up, [Gpio(14), Gpio(8)]);
        assert!(released
            .iter()
            .all(|(_, pull)| matches!(pull, Pull::Up | Pull::None)));
    }

    #[test]
    fn heltec_table_has_no_duplicate_pins() {
        let mut pins = HELTEC_WIFI_LORA_32_V3
            .iter()
            .map(|pin| pin.gpio)
            .collect::<Vec<_>>();
        pins.sort_unstable();
        pins.dedup();
        assert_eq!(pins.len(), HELTEC_WIFI_LORA_32_V3.len());
    }

    #[test]
    fn single_pin() {
        let set = RetainedPinSet::single(Gpio(21));
        assert_eq!(set.held().collect::<Vec<_>>(), [Gpio(21)]);
        assert_eq!(set.released().count(), 0);
    }
}
