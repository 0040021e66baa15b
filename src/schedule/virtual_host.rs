//! Deterministic stand-in for a browser event loop.
//!
//! Time only moves when events are pulled. Frame requests fire on the next vsync boundary after
//! the request; timers fire at their due time; externally posted events (visibility, resize) fire
//! when scheduled. Ties resolve posted events first, then timers, then frames, each in request
//! order.

use crate::anim::config::NOMINAL_FRAME_MS;
use crate::schedule::host::{FrameHandle, FrameHost, HostEvent, TimerHandle};
use std::cmp::Ordering;

/// Counters for what the host was asked to do.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostStats {
    /// `request_frame` calls.
    pub frames_requested: u64,
    /// `cancel_frame` calls that withdrew a pending frame.
    pub frames_cancelled: u64,
    /// Frame events delivered.
    pub frames_delivered: u64,
    /// `set_timeout` calls.
    pub timers_set: u64,
    /// `clear_timeout` calls that withdrew a pending timer.
    pub timers_cleared: u64,
    /// Timer events delivered.
    pub timers_fired: u64,
}

#[derive(Clone, Copy, Debug)]
enum Pending {
    Posted(HostEvent),
    Timer(TimerHandle),
    Frame(FrameHandle),
}

impl Pending {
    fn rank(&self) -> u8 {
        match self {
            Self::Posted(_) => 0,
            Self::Timer(_) => 1,
            Self::Frame(_) => 2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due_ms: f64,
    seq: u64,
    what: Pending,
}

impl Entry {
    fn order(&self, other: &Self) -> Ordering {
        self.due_ms
            .total_cmp(&other.due_ms)
            .then(self.what.rank().cmp(&other.what.rank()))
            .then(self.seq.cmp(&other.seq))
    }
}

/// Virtual-clock [`FrameHost`].
#[derive(Debug)]
pub struct VirtualHost {
    now_ms: f64,
    vsync_ms: f64,
    next_id: u64,
    seq: u64,
    queue: Vec<Entry>,
    stats: HostStats,
}

impl Default for VirtualHost {
    fn default() -> Self {
        Self::new(NOMINAL_FRAME_MS)
    }
}

impl VirtualHost {
    /// Host with a display refreshing every `vsync_ms` (non-positive values fall back to 60 Hz).
    pub fn new(vsync_ms: f64) -> Self {
        Self {
            now_ms: 0.0,
            vsync_ms: if vsync_ms.is_finite() && vsync_ms > 0.0 {
                vsync_ms
            } else {
                NOMINAL_FRAME_MS
            },
            next_id: 1,
            seq: 0,
            queue: Vec::new(),
            stats: HostStats::default(),
        }
    }

    /// Current virtual time.
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Counters so far.
    pub fn stats(&self) -> HostStats {
        self.stats
    }

    /// Frame requests not yet delivered or cancelled.
    pub fn pending_frames(&self) -> usize {
        self.queue
            .iter()
            .filter(|e| matches!(e.what, Pending::Frame(_)))
            .count()
    }

    /// Timers not yet fired or cleared.
    pub fn pending_timers(&self) -> usize {
        self.queue
            .iter()
            .filter(|e| matches!(e.what, Pending::Timer(_)))
            .count()
    }

    /// Schedule an external event at absolute time `at_ms` (clamped to now).
    pub fn post_at(&mut self, at_ms: f64, event: HostEvent) {
        let due_ms = at_ms.max(self.now_ms);
        self.push(due_ms, Pending::Posted(event));
    }

    /// Schedule an external event at the current time.
    pub fn post(&mut self, event: HostEvent) {
        self.post_at(self.now_ms, event);
    }

    /// Pop the earliest event due at or before `deadline_ms`, advancing the clock to it.
    ///
    /// When nothing is due the clock advances to `deadline_ms` and `None` is returned.
    pub fn next_event_before(&mut self, deadline_ms: f64) -> Option<HostEvent> {
        let idx = self
            .queue
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.order(b))
            .map(|(i, _)| i);

        let Some(idx) = idx.filter(|&i| self.queue[i].due_ms <= deadline_ms) else {
            self.now_ms = self.now_ms.max(deadline_ms);
            return None;
        };

        let entry = self.queue.swap_remove(idx);
        self.now_ms = self.now_ms.max(entry.due_ms);
        Some(match entry.what {
            Pending::Posted(ev) => ev,
            Pending::Timer(handle) => {
                self.stats.timers_fired += 1;
                HostEvent::Timer { handle }
            }
            Pending::Frame(handle) => {
                self.stats.frames_delivered += 1;
                HostEvent::Frame {
                    handle,
                    timestamp_ms: entry.due_ms,
                }
            }
        })
    }

    fn push(&mut self, due_ms: f64, what: Pending) {
        self.seq += 1;
        self.queue.push(Entry {
            due_ms,
            seq: self.seq,
            what,
        });
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn next_vsync(&self) -> f64 {
        ((self.now_ms / self.vsync_ms).floor() + 1.0) * self.vsync_ms
    }

    fn remove(&mut self, pred: impl Fn(&Pending) -> bool) -> bool {
        match self.queue.iter().position(|e| pred(&e.what)) {
            Some(i) => {
                self.queue.swap_remove(i);
                true
            }
            None => false,
        }
    }
}

impl FrameHost for VirtualHost {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.alloc_id());
        let due = self.next_vsync();
        self.push(due, Pending::Frame(handle));
        self.stats.frames_requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.remove(|p| matches!(p, Pending::Frame(h) if *h == handle)) {
            self.stats.frames_cancelled += 1;
        }
    }

    fn set_timeout(&mut self, delay_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.alloc_id());
        let delay = if delay_ms.is_finite() {
            delay_ms.max(0.0)
        } else {
            0.0
        };
        self.push(self.now_ms + delay, Pending::Timer(handle));
        self.stats.timers_set += 1;
        handle
    }

    fn clear_timeout(&mut self, handle: TimerHandle) {
        if self.remove(|p| matches!(p, Pending::Timer(h) if *h == handle)) {
            self.stats.timers_cleared += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/virtual_host.rs"]
mod tests;
