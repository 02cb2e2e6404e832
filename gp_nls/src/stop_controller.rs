use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use crate::options::Options;

/// Cancellation flag plus an optional wall-clock limit, polled between generations.
#[derive(Clone, Debug)]
pub struct StopController {
    timeout_in_seconds: f64,
    start_time: Instant,
    cancelled: Arc<AtomicBool>,
}

impl StopController {
    pub fn new(timeout_in_seconds: f64) -> Self {
        Self {
            timeout_in_seconds,
            start_time: Instant::now(),
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub(crate) fn from_options(options: &Options) -> Self {
        Self::new(options.timeout_in_seconds)
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        if self.cancelled.load(Ordering::Acquire) {
            return true;
        }
        if self.timeout_in_seconds > 0.0 && self.start_time.elapsed().as_secs_f64() >= self.timeout_in_seconds {
            self.cancelled.store(true, Ordering::Release);
            return true;
        }
        false
    }
}
