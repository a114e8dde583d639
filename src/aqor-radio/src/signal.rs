use portable_atomic::{AtomicU8, Ordering};

const PENDING: u8 = 0;
const DONE: u8 = 1;
const TIMED_OUT: u8 = 2;

/// Outcome reported by the radio for the transmission in flight.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub(crate) enum TxEvent {
    Done,
    /// The radio's own transmit watchdog fired.
    TimedOut,
}

/// Completion flag shared between a transmission and the radio's interrupt handler.
///
/// This is the only state written from interrupt context; it is a single atomic byte.
#[derive(Debug)]
pub struct TxSignal {
    state: AtomicU8,
}

impl TxSignal {
    /// Creates a signal with no event pending.
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(PENDING),
        }
    }

    /// Reports that the radio finished transmitting.
    pub fn tx_done(&self) {
        self.state.store(DONE, Ordering::Release);
    }

    /// Reports that the radio gave up transmitting (its own TX timeout).
    pub fn tx_timeout(&self) {
        self.state.store(TIMED_OUT, Ordering::Release);
    }

    pub(crate) fn reset(&self) {
        self.state.store(PENDING, Ordering::Release);
    }

    pub(crate) fn take(&self) -> Option<TxEvent> {
        match self.state.swap(PENDING, Ordering::AcqRel) {
            DONE => Some(TxEvent::Done),
            TIMED_OUT => Some(TxEvent::TimedOut),
            _ => None,
        }
    }
}

impl Default for TxSignal {
    fn default() -> Self {
        Self::new()
    }
}
