use aqor_radio::{Radio, RadioTransport};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_time::Duration;

use crate::{
    gpio::{Gpio, Level},
    pins::{PinAssignment, RetainedPinSet},
    Board, SleepPlatform, SleepSchedule,
};

/// Time given to the radio to settle into sleep before power is removed.
pub const RADIO_SETTLE_TIME: Duration = Duration::from_millis(100);

/// Sequences power-down and deep-sleep entry.
pub struct PowerController<P> {
    platform: P,
    board: Board,
}

impl<P: SleepPlatform> PowerController<P> {
    /// Creates a controller for `board`. No pin is touched.
    #[must_use]
    pub const fn new(platform: P, board: Board) -> Self {
        Self { platform, board }
    }

    /// The board this controller drives.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Powers the external power rail (Vext).
    pub fn enable_external_power(&mut self) {
        aqor_log::debug!("Vext on");
        self.platform.set_output(self.board.vext, self.board.vext_active.into());
    }

    /// Cuts the external power rail (Vext).
    pub fn disable_external_power(&mut self) {
        aqor_log::debug!("Vext off");
        self.platform.set_output(self.board.vext, (!self.board.vext_active).into());
    }

    /// Undoes the pin holds of the previous sleep entry and powers the external rail again.
    ///
    /// To be called once at boot, before peripheral drivers take their pins.
    pub fn resume(&mut self) {
        aqor_log::info!("resuming on {}", self.board.name);

        self.platform.set_deep_sleep_hold(false);
        self.platform.release_hold(self.board.peripheral_power);
        for gpio in RetainedPinSet::from_table(self.board.sleep_pins).held() {
            if gpio != self.board.peripheral_power {
                self.platform.release_hold(gpio);
            }
        }

        self.enable_external_power();
    }

    /// Powers peripherals down and latches `peripheral_power` low, ready for deep sleep.
    ///
    /// Exactly one pin is held; all bus transfers are ended.
    pub fn prepare_for_retained_sleep<M: RawMutex, R: Radio>(
        &mut self,
        radio: &RadioTransport<M, R>,
        peripheral_power: Gpio,
    ) {
        aqor_log::info!("preparing for retained sleep");

        self.disable_external_power();
        radio.sleep();
        self.platform.release_buses();

        self.apply_holds(RetainedPinSet::single(peripheral_power));
    }

    /// Shuts everything down and enters deep sleep for `schedule`.
    ///
    /// The radio is put to sleep first and given [`RADIO_SETTLE_TIME`]; then Vext is cut, `pins`
    /// are applied, and the wake-up timer is armed. Never returns: wake-up restarts the device.
    pub fn enter_duty_cycle_sleep<M: RawMutex, R: Radio>(
        &mut self,
        radio: &RadioTransport<M, R>,
        schedule: SleepSchedule,
        pins: &[PinAssignment],
    ) -> ! {
        radio.sleep();
        embassy_time::block_for(RADIO_SETTLE_TIME);

        self.disable_external_power();

        let pins = RetainedPinSet::from_table(pins);
        for (gpio, pull) in pins.released() {
            self.platform.set_input(gpio, pull);
        }
        self.apply_holds(pins);

        self.platform.enable_timer_wakeup(schedule.wake_timer_micros());
        aqor_log::info!("entering deep sleep for {} s", schedule.as_secs());

        self.platform.start_deep_sleep()
    }

    fn apply_holds(&mut self, pins: RetainedPinSet<'_>) {
        for gpio in pins.held() {
            self.platform.set_output(gpio, Level::Low.into());
            self.platform.hold(gpio);
            aqor_log::trace!("holding {} low", gpio.number());
        }
        self.platform.set_deep_sleep_hold(true);
    }
}
