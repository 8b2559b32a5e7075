//! Blocking delays used to pace the LCD bus.
//!
//! The HD44780 never acknowledges anything, so every timing guarantee the driver gives rests on
//! these delays lasting *at least* as long as asked. Both implementations here may overshoot, never
//! undershoot.

use std::fmt::Debug;
use std::hint::spin_loop;
use std::thread::sleep;
use std::time::{Duration, Instant};

pub trait Delay: Debug {
    /// Blocks the calling thread for at least `duration`.
    fn delay(&mut self, duration: Duration);
}

impl<T: Delay + ?Sized> Delay for &mut T {
    fn delay(&mut self, duration: Duration) {
        (**self).delay(duration)
    }
}

/// Delay backed by [std::thread::sleep].
///
/// Cheap on the CPU, but the scheduler usually rounds short sleeps up to tens of microseconds, which
/// makes every byte much slower than it needs to be.
#[derive(Copy, Clone, Debug, Default)]
pub struct SleepDelay;

impl Delay for SleepDelay {
    fn delay(&mut self, duration: Duration) {
        sleep(duration);
    }
}

/// Busy-waiting delay, for sub-microsecond accuracy on the Enable pulse.
///
/// Anything at or above `sleep_threshold` is handed to the scheduler instead of spun.
#[derive(Copy, Clone, Debug)]
pub struct SpinDelay {
    pub sleep_threshold: Duration,
}

impl SpinDelay {
    pub fn new() -> Self {
        Self {
            sleep_threshold: Duration::from_millis(1),
        }
    }

    pub fn with_sleep_threshold(mut self, sleep_threshold: Duration) -> Self {
        self.sleep_threshold = sleep_threshold;
        self
    }
}

impl Default for SpinDelay {
    fn default() -> Self {
        Self::new()
    }
}

impl Delay for SpinDelay {
    fn delay(&mut self, duration: Duration) {
        if duration >= self.sleep_threshold {
            sleep(duration);
            return;
        }

        let start = Instant::now();
        while start.elapsed() < duration {
            spin_loop();
        }
    }
}
