//! Wall-clock pacing between consecutive sends.

use std::time::Duration;

use servolink_units::{Frequency, Time};

/// Estimated wire time of one command frame, with a 10 % margin over the
/// fastest observed transmission. Subtracted from every inter-send delay.
pub const ONE_SENDING_TIME: Time = Time::new(0.0002 * 1.1);

pub const FREQ_10HZ: Frequency = Frequency::new(10.0);
pub const FREQ_100HZ: Frequency = Frequency::new(100.0);
pub const FREQ_1KHZ: Frequency = Frequency::new(1_000.0);
pub const FREQ_1MHZ: Frequency = Frequency::new(1_000_000.0);

/// Blocks the profile between two sends.
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

impl<P: Pacer + ?Sized> Pacer for &mut P {
    fn pause(&mut self, delay: Duration) {
        (**self).pause(delay);
    }
}

/// Sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Records requested pauses without sleeping.
#[derive(Debug, Clone, Default)]
pub struct RecordingPacer {
    pauses: Vec<Duration>,
}

impl RecordingPacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> &[Duration] {
        &self.pauses
    }

    pub fn total(&self) -> Duration {
        self.pauses.iter().sum()
    }

    pub fn clear(&mut self) {
        self.pauses.clear();
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) {
        self.pauses.push(delay);
    }
}

/// Seconds to a `Duration`; negative or non-finite values become zero.
pub(crate) fn seconds(value: f64) -> Duration {
    if value.is_finite() && value > 0.0 {
        Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}
