/// How long to stay in deep sleep before the timer wakes the device.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SleepSchedule {
    seconds: u32,
}

impl SleepSchedule {
    /// Sleeps for `seconds` whole seconds.
    #[must_use]
    pub const fn from_secs(seconds: u32) -> Self {
        Self { seconds }
    }

    /// The sleep duration in seconds.
    #[must_use]
    pub const fn as_secs(self) -> u32 {
        self.seconds
    }

    /// The wake-up timer value, in microseconds.
    #[must_use]
    pub const fn wake_timer_micros(self) -> u64 {
        self.seconds as u64 * 1_000_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_to_micros() {
        assert_eq!(SleepSchedule::from_secs(5).wake_timer_micros(), 5_000_000);
        assert_eq!(SleepSchedule::from_secs(0).wake_timer_micros(), 0);
    }

    #[test]
    fn does_not_overflow() {
        // Past ~71 minutes the value no longer fits into 32 bits.
        assert_eq!(
            SleepSchedule::from_secs(3600 * 2).wake_timer_micros(),
            7_200_000_000
        );
        assert_eq!(
            SleepSchedule::from_secs(u32::MAX).wake_timer_micros(),
            u64::from(u32::MAX) * 1_000_000
        );
    }
}
