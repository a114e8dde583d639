//! AQOR is the firmware core of a battery-powered environmental sensing node.
//!
//! Each wake cycle, the node encrypts one telemetry payload under a key derived from its hardware
//! identity, transmits it over LoRa, and goes back to deep sleep:
//!
//! ```text
//! payload -> Cipher::encrypt -> RadioTransport::send -> PowerController::enter_duty_cycle_sleep
//! ```
//!
//! [`TelemetryNode`] ties these steps together; the individual crates are re-exported for finer
//! control.
//!
//! # Cargo features
//!
//! - `defmt`: logs through `defmt`.
//! - `log`: logs through the `log` facade.
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

mod node;

#[doc(inline)]
pub use aqor_crypto as crypto;
#[doc(inline)]
pub use aqor_identity as identity;
#[doc(inline)]
pub use aqor_log as log;
#[doc(inline)]
pub use aqor_power as power;
#[doc(inline)]
pub use aqor_radio as radio;
#[doc(inline)]
pub use aqor_random as random;

pub use node::{BootError, ReportError, TelemetryNode, DEFAULT_SLEEP};

/// This module contains the third party crates whose types appear in the API of AQOR.
pub mod reexports {
    pub use embassy_sync;
    pub use rand_core;
}
