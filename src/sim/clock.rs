//! Frame timing for time-corrected Verlet
//!
//! The integrator needs both the current step and the previous one, so the
//! first two frames after a (re)start only record timing.

use serde::{Deserialize, Serialize};

use crate::consts::NANOS_TO_SECONDS;

/// One integrable step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Seconds since the previous frame
    pub dt: f32,
    /// `dt / dt_prev`
    pub dt_ratio: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameClock {
    last_timestamp: Option<i64>,
    last_delta: Option<f32>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget previous frames; the next two calls to [`Self::advance`] bootstrap
    pub fn reset(&mut self) {
        self.last_timestamp = None;
        self.last_delta = None;
    }

    pub fn last_timestamp(&self) -> Option<i64> {
        self.last_timestamp
    }

    pub fn last_delta(&self) -> Option<f32> {
        self.last_delta
    }

    /// Record a frame at `timestamp` (nanoseconds)
    ///
    /// Returns the step to integrate, or `None` on bootstrap frames.
    pub fn advance(&mut self, timestamp: i64) -> Option<Step> {
        let step = match self.last_timestamp {
            None => None,
            Some(last) => {
                let dt = timestamp.saturating_sub(last) as f32 * NANOS_TO_SECONDS;
                if dt > 0.0 {
                    let step = self.last_delta.map(|prev| Step {
                        dt,
                        dt_ratio: dt / prev,
                    });
                    self.last_delta = Some(dt);
                    step
                } else {
                    log::debug!("Timestamp did not advance ({last} -> {timestamp}), restarting clock");
                    self.last_delta = None;
                    None
                }
            }
        };
        self.last_timestamp = Some(timestamp);
        step
    }
}
