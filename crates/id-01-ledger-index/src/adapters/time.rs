use crate::domain::entities::TxTimestamp;
use crate::ports::outbound::TimeSource;
use std::sync::atomic::{AtomicI64, Ordering};

/// Default time source using system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> TxTimestamp {
        TxTimestamp::from(chrono::Utc::now())
    }
}

/// Deterministic clock: starts at `start` seconds and advances by `step`
/// seconds on every call.
#[derive(Debug)]
pub struct SteppingTimeSource {
    next: AtomicI64,
    step: i64,
}

impl SteppingTimeSource {
    pub fn new(start: i64, step: i64) -> Self {
        Self {
            next: AtomicI64::new(start),
            step,
        }
    }
}

impl TimeSource for SteppingTimeSource {
    fn now(&self) -> TxTimestamp {
        TxTimestamp::new(self.next.fetch_add(self.step, Ordering::SeqCst), 0)
    }
}
