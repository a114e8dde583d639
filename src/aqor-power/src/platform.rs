use crate::gpio::{Gpio, PinState, Pull};

/// Low-level access to pins and sleep facilities of the MCU.
///
/// On ESP32 devices these map onto the RTC IO and sleep controller; all operations are
/// infallible, as a failure at this level leaves nothing sensible to do.
pub trait SleepPlatform {
    /// Configures `gpio` as a push-pull output driving `state`.
    fn set_output(&mut self, gpio: Gpio, state: PinState);

    /// Configures `gpio` as an input with the given pull resistor.
    fn set_input(&mut self, gpio: Gpio, pull: Pull);

    /// Latches the current state of `gpio`.
    fn hold(&mut self, gpio: Gpio);

    /// Releases the latch on `gpio`.
    fn release_hold(&mut self, gpio: Gpio);

    /// Enables or disables keeping the latched pins across deep sleep.
    fn set_deep_sleep_hold(&mut self, enabled: bool);

    /// Ends all bus transfers (SPI, I2C) and releases their pins.
    fn release_buses(&mut self);

    /// Arms the wake-up timer.
    fn enable_timer_wakeup(&mut self, micros: u64);

    /// Enters deep sleep. Wake-up restarts the device.
    fn start_deep_sleep(&mut self) -> !;
}
