use crate::foundation::core::SurfaceSize;

/// Smallest visible fraction of the surface that counts as on screen.
pub const VISIBLE_RATIO: f64 = 0.01;

/// Handle of a pending per-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameHandle(pub u64);

/// Handle of a pending one-shot timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerHandle(pub u64);

/// Scheduling services of a single-threaded host event loop.
///
/// Requests only register interest; the host later delivers the matching [`HostEvent`] back to
/// whoever owns the handle. Cancelling an unknown or already-fired handle is a no-op.
pub trait FrameHost {
    /// Ask for one callback before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a frame request.
    fn cancel_frame(&mut self, handle: FrameHandle);
    /// Ask for one callback after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle;
    /// Withdraw a timer.
    fn clear_timeout(&mut self, handle: TimerHandle);
}

/// Everything a host can deliver to an animation unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// The visibility observer reported the visible fraction of the surface.
    Visibility {
        /// Visible fraction in `[0, 1]`.
        ratio: f64,
    },
    /// The surface element changed size.
    Resize(SurfaceSize),
    /// A requested frame callback fired.
    Frame {
        /// Request being answered.
        handle: FrameHandle,
        /// Host timestamp in milliseconds.
        timestamp_ms: f64,
    },
    /// A timer fired.
    Timer {
        /// Timer being answered.
        handle: TimerHandle,
    },
}
