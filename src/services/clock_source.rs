use chrono::Local;

use crate::domain::clock_time::{serialize_clock_time, RawTime};

pub trait ClockSource {
    fn now(&self) -> RawTime;
}

/// Reads the local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> RawTime {
        serialize_clock_time(&Local::now())
    }
}

/// Always reports the same reading.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub RawTime);

impl ClockSource for FixedClock {
    fn now(&self) -> RawTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_repeats_its_reading() {
        let reading = RawTime::new(4, 20, 0).unwrap();
        let clock = FixedClock(reading);
        assert_eq!(clock.now(), reading);
        assert_eq!(clock.now(), reading);
    }

    #[test]
    fn system_clock_reads_a_valid_time() {
        let now = SystemClock.now();
        assert!(RawTime::new(now.hours(), now.minutes(), now.seconds()).is_ok());
    }
}
