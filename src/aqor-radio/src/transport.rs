use core::cell::RefCell;

use embassy_sync::blocking_mutex::{raw::RawMutex, Mutex};
use embassy_time::{Duration, Instant, Timer};
use portable_atomic::{AtomicBool, Ordering};

use crate::{
    signal::{TxEvent, TxSignal},
    Radio, RadioConfig,
};

/// State of the transmission state machine.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmissionState {
    /// No transmission in flight; [`RadioTransport::send()`] is accepted.
    Idle,
    /// A transmission is in flight; [`RadioTransport::send()`] is rejected.
    Transmitting,
}

/// Errors of [`RadioTransport::send()`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError {
    /// Another transmission is in flight. The radio was not touched.
    ChannelBusy,
    /// The transmission was not confirmed in time, or the radio reported its own TX timeout.
    Timeout,
    /// The payload does not fit into a single frame. The radio was not touched.
    PayloadTooLarge,
}

impl core::fmt::Display for SendError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ChannelBusy => f.write_str("radio channel busy"),
            Self::Timeout => f.write_str("transmission timed out"),
            Self::PayloadTooLarge => f.write_str("payload too large"),
        }
    }
}

impl core::error::Error for SendError {}

/// Single-flight transmitter over a [`Radio`].
///
/// `M` selects the mutex guarding the driver: `CriticalSectionRawMutex` when the transport is
/// shared with interrupt handlers, `NoopRawMutex` when it stays within one execution context.
pub struct RadioTransport<M: RawMutex, R> {
    radio: Mutex<M, RefCell<R>>,
    signal: TxSignal,
    transmitting: AtomicBool,
    max_payload_len: usize,
    send_timeout: Duration,
    poll_interval: Duration,
}

impl<M: RawMutex, R: Radio> RadioTransport<M, R> {
    /// Configures `radio` with `config` and wraps it, idle.
    #[must_use]
    pub fn new(mut radio: R, config: &RadioConfig) -> Self {
        radio.configure(config);
        aqor_log::info!(
            "radio configured: {} Hz, {} dBm, SF{}",
            config.frequency_hz,
            config.tx_power_dbm,
            config.spreading_factor.factor()
        );

        Self {
            radio: Mutex::new(RefCell::new(radio)),
            signal: TxSignal::new(),
            transmitting: AtomicBool::new(false),
            max_payload_len: config.max_payload_len,
            send_timeout: config.send_timeout,
            poll_interval: config.poll_interval,
        }
    }

    /// The completion signal to be raised by the radio's interrupt handler.
    #[must_use]
    pub fn signal(&self) -> &TxSignal {
        &self.signal
    }

    /// Current state of the state machine.
    #[must_use]
    pub fn state(&self) -> TransmissionState {
        if self.transmitting.load(Ordering::Acquire) {
            TransmissionState::Transmitting
        } else {
            TransmissionState::Idle
        }
    }

    /// Transmits `payload`, waiting for the radio to confirm it.
    ///
    /// The radio is polled every poll interval until it signals completion or the send deadline
    /// elapses, counted from the start of this call. The state is [`TransmissionState::Idle`]
    /// again when this returns, and also if the returned future is dropped before completion.
    ///
    /// # Errors
    ///
    /// - [`SendError::ChannelBusy`] if a transmission is already in flight.
    /// - [`SendError::Timeout`] if no completion was signaled before the deadline, or the radio
    ///   reported a timeout of its own.
    /// - [`SendError::PayloadTooLarge`] if `payload` exceeds the configured maximum. A busy
    ///   channel is reported first.
    pub async fn send(&self, payload: &[u8]) -> Result<(), SendError> {
        let Some(_in_flight) = InFlight::claim(&self.transmitting) else {
            aqor_log::warn!("radio busy, dropping send");
            return Err(SendError::ChannelBusy);
        };

        if payload.len() > self.max_payload_len {
            aqor_log::warn!("payload of {} bytes exceeds frame size", payload.len());
            return Err(SendError::PayloadTooLarge);
        }

        let start = Instant::now();
        self.signal.reset();
        self.with_radio(|radio| radio.transmit(payload));
        aqor_log::debug!("transmitting {} bytes", payload.len());

        loop {
            self.with_radio(|radio| radio.process_irq(&self.signal));

            match self.signal.take() {
                Some(TxEvent::Done) => {
                    aqor_log::info!("packet transmitted");
                    return Ok(());
                }
                Some(TxEvent::TimedOut) => {
                    aqor_log::warn!("radio reported TX timeout");
                    self.with_radio(Radio::sleep);
                    return Err(SendError::Timeout);
                }
                None => {}
            }

            if start.elapsed() >= self.send_timeout {
                aqor_log::warn!("TX not confirmed within {} ms", self.send_timeout.as_millis());
                return Err(SendError::Timeout);
            }

            Timer::after(self.poll_interval).await;
        }
    }

    /// Puts the radio into its lowest-power state.
    pub fn sleep(&self) {
        aqor_log::debug!("radio sleep");
        self.with_radio(Radio::sleep);
    }

    fn with_radio<T>(&self, f: impl FnOnce(&mut R) -> T) -> T {
        self.radio.lock(|radio| f(&mut *radio.borrow_mut()))
    }
}

/// Holds the transmitting flag for the lifetime of one send.
struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn claim(transmitting: &'a AtomicBool) -> Option<Self> {
        if transmitting.swap(true, Ordering::AcqRel) {
            None
        } else {
            Some(Self(transmitting))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use core::cell::Cell;
    use std::rc::Rc;

    use embassy_futures::{
        block_on,
        join::join,
        select::{select, Either},
    };
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;

    use super::*;

    #[derive(Default)]
    struct Counters {
        configured: Cell<usize>,
        transmitted: Cell<usize>,
        polled: Cell<usize>,
        slept: Cell<usize>,
    }

    enum Behavior {
        /// Signals completion on the n-th poll after a transmit.
        CompleteAfter(usize),
        /// Reports the radio's own TX timeout on the first poll.
        RadioTimeout,
        Silent,
    }

    struct MockRadio {
        behavior: Behavior,
        counters: Rc<Counters>,
        polls_since_transmit: usize,
    }

    impl MockRadio {
        fn new(behavior: Behavior) -> (Self, Rc<Counters>) {
            let counters = Rc::new(Counters::default());
            let radio = Self {
                behavior,
                counters: counters.clone(),
                polls_since_transmit: 0,
            };
            (radio, counters)
        }
    }

    impl Radio for MockRadio {
        fn configure(&mut self, _config: &RadioConfig) {
            self.counters.configured.set(self.counters.configured.get() + 1);
        }

        fn transmit(&mut self, _payload: &[u8]) {
            self.polls_since_transmit = 0;
            self.counters.transmitted.set(self.counters.transmitted.get() + 1);
        }

        fn process_irq(&mut self, signal: &TxSignal) {
            self.polls_since_transmit += 1;
            self.counters.polled.set(self.counters.polled.get() + 1);
            match self.behavior {
                Behavior::CompleteAfter(n) if self.polls_since_transmit >= n => signal.tx_done(),
                Behavior::RadioTimeout => signal.tx_timeout(),
                _ => {}
            }
        }

        fn sleep(&mut self) {
            self.counters.slept.set(self.counters.slept.get() + 1);
        }
    }

    fn config(send_timeout_ms: u64) -> RadioConfig {
        RadioConfig {
            send_timeout: Duration::from_millis(send_timeout_ms),
            ..RadioConfig::DEFAULT
        }
    }

    #[test]
    fn configures_radio_once() {
        let (radio, counters) = MockRadio::new(Behavior::Silent);
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(50));

        assert_eq!(counters.configured.get(), 1);
        assert_eq!(transport.state(), TransmissionState::Idle);
    }

    #[test]
    fn completes_on_signal() {
        let (radio, counters) = MockRadio::new(Behavior::CompleteAfter(3));
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(1000));

        assert_eq!(block_on(transport.send(b"AQOR")), Ok(()));
        assert_eq!(counters.transmitted.get(), 1);
        assert_eq!(counters.polled.get(), 3);
        assert_eq!(transport.state(), TransmissionState::Idle);
    }

    #[test]
    fn signal_raised_outside_process_irq() {
        let (radio, _counters) = MockRadio::new(Behavior::Silent);
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(1000));

        // Stands in for the DIO1 interrupt handler firing while the send is pending.
        let interrupt = async {
            Timer::after(Duration::from_millis(20)).await;
            transport.signal().tx_done();
        };

        let (result, ()) = block_on(join(transport.send(b"AQOR"), interrupt));
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn second_send_is_rejected_while_transmitting() {
        let (radio, counters) = MockRadio::new(Behavior::CompleteAfter(3));
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(1000));

        let (first, second) = block_on(join(transport.send(b"first"), async {
            assert_eq!(transport.state(), TransmissionState::Transmitting);
            transport.send(b"second").await
        }));

        assert_eq!(first, Ok(()));
        assert_eq!(second, Err(SendError::ChannelBusy));
        assert_eq!(counters.transmitted.get(), 1);
        assert_eq!(transport.state(), TransmissionState::Idle);
    }

    #[test]
    fn times_out_within_one_poll_interval_of_deadline() {
        let (radio, counters) = MockRadio::new(Behavior::Silent);
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(100));

        let start = std::time::Instant::now();
        assert_eq!(block_on(transport.send(b"AQOR")), Err(SendError::Timeout));
        let elapsed = start.elapsed();

        assert!(elapsed >= std::time::Duration::from_millis(100));
        // One poll interval plus scheduling slack of the host.
        assert!(elapsed < std::time::Duration::from_millis(100 + 10 + 90));
        assert_eq!(transport.state(), TransmissionState::Idle);

        // Accepted again right away.
        assert_eq!(block_on(transport.send(b"AQOR")), Err(SendError::Timeout));
        assert_eq!(counters.transmitted.get(), 2);
    }

    #[test]
    fn radio_timeout_puts_radio_to_sleep() {
        let (radio, counters) = MockRadio::new(Behavior::RadioTimeout);
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(1000));

        assert_eq!(block_on(transport.send(b"AQOR")), Err(SendError::Timeout));
        assert_eq!(counters.slept.get(), 1);
        assert_eq!(transport.state(), TransmissionState::Idle);
    }

    #[test]
    fn oversized_payload_leaves_radio_untouched() {
        let (radio, counters) = MockRadio::new(Behavior::CompleteAfter(1));
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(1000));

        let payload = [0u8; 256];
        assert_eq!(
            block_on(transport.send(&payload)),
            Err(SendError::PayloadTooLarge)
        );
        assert_eq!(counters.transmitted.get(), 0);
        assert_eq!(transport.state(), TransmissionState::Idle);
    }

    #[test]
    fn busy_takes_precedence_over_payload_size() {
        let (radio, counters) = MockRadio::new(Behavior::CompleteAfter(3));
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(1000));

        let oversized = [0u8; 300];
        let (first, second) = block_on(join(
            transport.send(b"first"),
            transport.send(&oversized),
        ));

        assert_eq!(first, Ok(()));
        assert_eq!(second, Err(SendError::ChannelBusy));
        assert_eq!(counters.transmitted.get(), 1);
        assert_eq!(transport.state(), TransmissionState::Idle);
    }

    #[test]
    fn dropping_send_returns_to_idle() {
        let (radio, _counters) = MockRadio::new(Behavior::Silent);
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(1000));

        let outcome = block_on(select(transport.send(b"AQOR"), async {
            assert_eq!(transport.state(), TransmissionState::Transmitting);
        }));

        assert!(matches!(outcome, Either::Second(())));
        assert_eq!(transport.state(), TransmissionState::Idle);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let (radio, counters) = MockRadio::new(Behavior::Silent);
        let transport = RadioTransport::<NoopRawMutex, _>::new(radio, &config(50));

        transport.signal().tx_done();
        assert_eq!(block_on(transport.send(b"AQOR")), Err(SendError::Timeout));
        assert_eq!(counters.transmitted.get(), 1);
    }
}
