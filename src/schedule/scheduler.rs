//! Visibility-gated frame scheduling.
//!
//! [`FrameScheduler`] decides *when* the blob animation ticks; it owns the only frame handle and
//! the only resize timer, so stopping or tearing down can always cancel both synchronously.

use crate::anim::config::NOMINAL_FRAME_MS;
use crate::foundation::core::SurfaceSize;
use crate::schedule::host::{FrameHandle, FrameHost, TimerHandle, VISIBLE_RATIO};

/// Default quiet period before a resize is acted upon.
pub const RESIZE_DEBOUNCE_MS: f64 = 150.0;

// Frames arriving this much early still count as on time (vsync jitter).
const FRAME_SLACK_MS: f64 = 1.0;

/// Whether frames are being requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SchedulerState {
    /// No frame pending.
    Idle,
    /// A frame is always pending.
    Running,
}

/// Idle/Running state machine plus resize debounce.
#[derive(Debug)]
pub struct FrameScheduler {
    state: SchedulerState,
    reduced_motion: bool,
    torn_down: bool,
    visible: bool,
    min_interval_ms: f64,
    debounce_ms: f64,
    frame: Option<FrameHandle>,
    last_tick_ms: Option<f64>,
    resize_timer: Option<TimerHandle>,
    pending_size: Option<SurfaceSize>,
}

impl FrameScheduler {
    /// New idle scheduler. `min_interval_ms` throttles ticks below the display rate.
    pub fn new(reduced_motion: bool, min_interval_ms: f64, debounce_ms: f64) -> Self {
        Self {
            state: SchedulerState::Idle,
            reduced_motion,
            torn_down: false,
            visible: false,
            min_interval_ms: if min_interval_ms.is_finite() {
                min_interval_ms.max(0.0)
            } else {
                0.0
            },
            debounce_ms: if debounce_ms.is_finite() {
                debounce_ms.max(0.0)
            } else {
                RESIZE_DEBOUNCE_MS
            },
            frame: None,
            last_tick_ms: None,
            resize_timer: None,
            pending_size: None,
        }
    }

    /// Current state.
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Whether a frame callback is outstanding.
    pub fn has_pending_frame(&self) -> bool {
        self.frame.is_some()
    }

    /// Whether a resize is waiting for its quiet period.
    pub fn has_pending_resize(&self) -> bool {
        self.resize_timer.is_some()
    }

    /// Whether [`FrameScheduler::teardown`] has run.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Feed a visibility report.
    pub fn on_visibility(&mut self, host: &mut dyn FrameHost, ratio: f64) {
        self.visible = ratio >= VISIBLE_RATIO;
        if self.visible {
            self.start(host);
        } else {
            self.stop(host);
        }
    }

    /// Handle a frame callback. Returns the elapsed time to simulate, or `None` when this frame
    /// should not tick (stale handle, idle, or throttled).
    ///
    /// The next frame is requested before returning, so a running scheduler always has exactly
    /// one frame pending.
    pub fn on_frame(
        &mut self,
        host: &mut dyn FrameHost,
        handle: FrameHandle,
        timestamp_ms: f64,
    ) -> Option<f64> {
        if self.frame != Some(handle) || self.state != SchedulerState::Running {
            tracing::trace!(?handle, "ignoring stale frame callback");
            return None;
        }
        self.frame = Some(host.request_frame());

        let elapsed = match self.last_tick_ms {
            None => NOMINAL_FRAME_MS,
            Some(last) => {
                let dt = timestamp_ms - last;
                if dt + FRAME_SLACK_MS < self.min_interval_ms {
                    return None;
                }
                dt.max(0.0)
            }
        };
        self.last_tick_ms = Some(timestamp_ms);
        Some(elapsed)
    }

    /// Record a resize and (re)arm the debounce timer.
    pub fn on_resize(&mut self, host: &mut dyn FrameHost, size: SurfaceSize) {
        if self.torn_down {
            return;
        }
        if let Some(t) = self.resize_timer.take() {
            host.clear_timeout(t);
        }
        self.pending_size = Some(size);
        self.resize_timer = Some(host.set_timeout(self.debounce_ms));
    }

    /// Handle a timer callback. Returns the settled size when the debounce period elapsed.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Option<SurfaceSize> {
        if self.resize_timer != Some(handle) {
            return None;
        }
        self.resize_timer = None;
        self.pending_size.take()
    }

    /// Cancel everything and refuse to start again. Idempotent.
    pub fn teardown(&mut self, host: &mut dyn FrameHost) {
        self.stop(host);
        if let Some(t) = self.resize_timer.take() {
            host.clear_timeout(t);
        }
        self.pending_size = None;
        self.torn_down = true;
    }

    fn start(&mut self, host: &mut dyn FrameHost) {
        if self.state == SchedulerState::Running || self.reduced_motion || self.torn_down {
            return;
        }
        self.state = SchedulerState::Running;
        self.last_tick_ms = None;
        self.frame = Some(host.request_frame());
        tracing::debug!("animation started");
    }

    fn stop(&mut self, host: &mut dyn FrameHost) {
        if let Some(f) = self.frame.take() {
            host.cancel_frame(f);
        }
        if self.state == SchedulerState::Running {
            tracing::debug!("animation stopped");
        }
        self.state = SchedulerState::Idle;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
