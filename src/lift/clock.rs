/***************************************/
/*        3rd party libraries          */
/***************************************/
use std::sync::Mutex;
use std::sync::PoisonError;
use std::thread;
use std::time::Duration;

/**
 * Source of simulated delays for the lift.
 *
 * Door and motion sequences block on `sleep`. Production wiring uses
 * `RealClock`, which sleeps the calling thread; tests use `VirtualClock`,
 * which only accounts for the time that would have passed.
 */
pub trait Clock: Send + Sync {
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RealClock;

impl Clock for RealClock {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Clock that returns immediately and records every requested delay.
#[derive(Debug, Default)]
pub struct VirtualClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl VirtualClock {
    pub fn new() -> VirtualClock {
        VirtualClock::default()
    }

    /// Total simulated time since creation.
    pub fn elapsed(&self) -> Duration {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .sum()
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Clock for VirtualClock {
    fn sleep(&self, duration: Duration) {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(duration);
    }
}
