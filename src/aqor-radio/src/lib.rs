//! Single-flight LoRa transmission.
//!
//! [`RadioTransport`] wraps a [`Radio`] driver and allows at most one transmission in flight: a
//! [`send()`][RadioTransport::send] issued while another one is pending is rejected with
//! [`SendError::ChannelBusy`], and a transmission that is not confirmed within the configured
//! deadline ends with [`SendError::Timeout`]. There is no queuing and no retry.
//!
//! Completion is reported by the radio, usually from interrupt context, through the transport's
//! [`TxSignal`].
#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

pub mod config;
mod signal;
mod transport;

pub use config::RadioConfig;
pub use signal::TxSignal;
pub use transport::{RadioTransport, SendError, TransmissionState};

/// A half-duplex packet radio driver (e.g. an SX1262 behind SPI).
///
/// Methods are infallible at this layer: a driver that cannot talk to its chip reports that
/// through its own logging, and the transport observes it as a missing completion.
pub trait Radio {
    /// Applies the link parameters.
    ///
    /// Called once, when the [`RadioTransport`] is created.
    fn configure(&mut self, config: &RadioConfig);

    /// Hands `payload` to the transmitter and returns without waiting.
    ///
    /// The end of the transmission must be reported through the [`TxSignal`], either from the
    /// interrupt handler or from [`process_irq()`][Radio::process_irq].
    fn transmit(&mut self, payload: &[u8]);

    /// Services pending radio interrupts.
    ///
    /// Called repeatedly while a transmission is in flight. Drivers that dispatch their events
    /// here (rather than in an interrupt handler) report them through `signal`.
    fn process_irq(&mut self, signal: &TxSignal);

    /// Puts the radio into its lowest-power state.
    fn sleep(&mut self);
}
