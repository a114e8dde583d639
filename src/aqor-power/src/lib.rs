//! Power sequencing for duty-cycled nodes.
//!
//! A node wakes, does its work and goes back to deep sleep through
//! [`PowerController::enter_duty_cycle_sleep()`]. Before sleeping, the radio is put to sleep, the
//! external power rail is cut and every pin is put into the state listed in the board's sleep pin
//! table: pins powering peripherals are driven low and latched, all others are released to
//! high-impedance inputs so they do not leak current. On wake-up the device restarts, and
//! [`PowerController::resume()`] undoes the latches.
//!
//! Hardware is reached through [`SleepPlatform`].
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

mod board;
mod controller;
pub mod gpio;
pub mod pins;
mod platform;
mod schedule;

pub use board::Board;
pub use controller::{PowerController, RADIO_SETTLE_TIME};
pub use pins::RetainedPinSet;
pub use platform::SleepPlatform;
pub use schedule::SleepSchedule;
