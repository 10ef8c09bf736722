//! Stage timing
//!
//! Measures how long the clone and the ginkgo run take.

use std::time::{Duration, Instant};
use tracing::info;

use super::duration::format_go_duration;

/// Timer for one step of the run
#[derive(Debug)]
pub struct StageTimer {
    start: Instant,
    stage: &'static str,
}

impl StageTimer {
    /// Create and start a new timer
    pub fn start(stage: &'static str) -> Self {
        Self {
            start: Instant::now(),
            stage,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Stop timer, log and return elapsed time
    pub fn stop(self) -> Duration {
        // whole milliseconds keep the log line readable
        let elapsed = Duration::from_millis(self.elapsed().as_millis() as u64);
        info!("{} finished in {}", self.stage, format_go_duration(elapsed));
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_stage_timer() {
        let timer = StageTimer::start("clone");
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed() >= Duration::from_millis(10));
        assert!(timer.stop() >= Duration::from_millis(10));
    }
}
