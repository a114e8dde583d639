use aqor_crypto::{Cipher, CipherError, DeviceKey};
use aqor_identity::DeviceIdentitySource;
use aqor_power::{PowerController, SleepPlatform, SleepSchedule};
use aqor_radio::{Radio, RadioConfig, RadioTransport, SendError};
use embassy_sync::blocking_mutex::raw::RawMutex;
use rand_core::RngCore;

/// Sleep interval between two wake cycles.
///
/// Can be overridden through the `CONFIG_SLEEP_SECONDS` environment variable when building.
pub const DEFAULT_SLEEP: SleepSchedule = SleepSchedule::from_secs(aqor_utils::u32_from_env_or!(
    "CONFIG_SLEEP_SECONDS",
    5,
    "duty-cycle sleep interval in seconds"
));

/// Errors preventing the node from booting.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// The hardware identity could not be read, so no key can be derived.
    IdentityUnavailable,
}

impl core::fmt::Display for BootError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IdentityUnavailable => f.write_str("device identity unavailable"),
        }
    }
}

impl core::error::Error for BootError {}

/// Errors of [`TelemetryNode::report()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// The payload could not be encrypted.
    Cipher(CipherError),
    /// The encrypted payload could not be sent.
    Send(SendError),
}

impl From<CipherError> for ReportError {
    fn from(err: CipherError) -> Self {
        Self::Cipher(err)
    }
}

impl From<SendError> for ReportError {
    fn from(err: SendError) -> Self {
        Self::Send(err)
    }
}

impl core::fmt::Display for ReportError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Cipher(_) => f.write_str("could not encrypt report"),
            Self::Send(_) => f.write_str("could not send report"),
        }
    }
}

impl core::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Cipher(err) => Some(err),
            Self::Send(err) => Some(err),
        }
    }
}

/// One wake cycle of a sensing node: boot, report, sleep.
pub struct TelemetryNode<M: RawMutex, R, P> {
    cipher: Cipher,
    radio: RadioTransport<M, R>,
    power: PowerController<P>,
}

impl<M: RawMutex, R: Radio, P: SleepPlatform> TelemetryNode<M, R, P> {
    /// Brings the node up after reset or deep-sleep wake-up.
    ///
    /// Derives the device key from `identity`, seeds the global RNG from `hwrng`, releases the
    /// pins latched by the previous sleep and configures the radio.
    ///
    /// # Errors
    ///
    /// Returns [`BootError::IdentityUnavailable`] if `identity` cannot be read. The node must not
    /// continue in that case.
    pub fn boot<S: DeviceIdentitySource>(
        identity: S,
        hwrng: impl RngCore,
        radio: R,
        radio_config: &RadioConfig,
        mut power: PowerController<P>,
    ) -> Result<Self, BootError> {
        let key = DeviceKey::derive(&identity).map_err(|_| {
            aqor_log::error!("cannot derive device key: no identity");
            BootError::IdentityUnavailable
        })?;

        aqor_random::construct_rng(hwrng);
        power.resume();
        let radio = RadioTransport::new(radio, radio_config);

        aqor_log::info!("node up");

        Ok(Self {
            cipher: Cipher::new(key),
            radio,
            power,
        })
    }

    /// Encrypts `payload` and sends it once.
    ///
    /// # Errors
    ///
    /// - [`ReportError::Cipher`] if the payload is too long to be encrypted into one frame.
    /// - [`ReportError::Send`] if the radio is busy or the transmission timed out. There is no
    ///   retry.
    pub async fn report(&self, payload: &[u8]) -> Result<(), ReportError> {
        let message = self.cipher.encrypt(&mut aqor_random::crypto_rng(), payload)?;
        self.radio.send(message.as_bytes()).await?;
        Ok(())
    }

    /// The radio transport.
    #[must_use]
    pub fn radio(&self) -> &RadioTransport<M, R> {
        &self.radio
    }

    /// Cuts peripheral power and latches the peripheral power pin low.
    pub fn prepare_for_retained_sleep(&mut self) {
        let pin = self.power.board().peripheral_power;
        self.power.prepare_for_retained_sleep(&self.radio, pin);
    }

    /// Enters deep sleep for `schedule` with the board's sleep pin table.
    pub fn sleep(mut self, schedule: SleepSchedule) -> ! {
        let pins = self.power.board().sleep_pins;
        self.power.enter_duty_cycle_sleep(&self.radio, schedule, pins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sleep() {
        assert_eq!(DEFAULT_SLEEP.as_secs(), 5);
    }

    #[test]
    fn report_error_sources() {
        use core::error::Error;

        let err = ReportError::from(SendError::Timeout);
        assert_eq!(err.to_string(), "could not send report");
        assert_eq!(
            err.source().map(ToString::to_string),
            Some("transmission timed out".to_string())
        );
    }
}
