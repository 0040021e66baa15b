//! One-shot reveal transitions for icons and fade-in sections.
//!
//! A [`RevealGate`] flips once when its element first becomes visible enough and then plays a
//! timed, eased transition. Leaving the viewport never rewinds it.

use crate::anim::ease::Ease;
use crate::schedule::subscription::OnceSubscription;

/// What the transition animates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RevealKind {
    /// Opacity only.
    Fade,
    /// Opacity plus an upward slide from `distance` logical px below.
    SlideUp {
        /// Starting vertical offset.
        distance: f64,
    },
    /// Opacity plus a scale from `from` to 1.
    Scale {
        /// Starting scale factor.
        from: f64,
    },
    /// Stroke drawing (dash offset), for line icons.
    Draw,
}

/// Reveal parameters with the defaults the site used.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Reveal {
    /// Animated property set.
    pub kind: RevealKind,
    /// Transition length.
    pub duration_ms: f64,
    /// Delay between the flip and the transition start.
    pub delay_ms: f64,
    /// Timing curve.
    pub ease: Ease,
    /// Visible fraction of the element required to flip.
    pub threshold: f64,
}

impl Default for Reveal {
    fn default() -> Self {
        Self {
            kind: RevealKind::SlideUp { distance: 24.0 },
            duration_ms: 600.0,
            delay_ms: 0.0,
            ease: Ease::EaseOut,
            threshold: 0.1,
        }
    }
}

/// Style values for one point in time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealFrame {
    /// `0` hidden, `1` fully shown.
    pub opacity: f64,
    /// Vertical offset in logical px (positive is below the resting position).
    pub offset_y: f64,
    /// Uniform scale.
    pub scale: f64,
    /// Fraction of the stroke drawn.
    pub stroke_progress: f64,
}

impl RevealFrame {
    /// Resting, fully shown state.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        offset_y: 0.0,
        scale: 1.0,
        stroke_progress: 1.0,
    };
}

impl Reveal {
    /// Style at eased progress `p` in `[0, 1]`.
    pub fn frame_at_progress(&self, p: f64) -> RevealFrame {
        let p = p.clamp(0.0, 1.0);
        let mut f = RevealFrame {
            opacity: p,
            ..RevealFrame::SHOWN
        };
        match self.kind {
            RevealKind::Fade => {}
            RevealKind::SlideUp { distance } => f.offset_y = distance * (1.0 - p),
            RevealKind::Scale { from } => f.scale = from + (1.0 - from) * p,
            RevealKind::Draw => {
                f.opacity = 1.0;
                f.stroke_progress = p;
            }
        }
        f
    }

    fn progress(&self, since_reveal_ms: f64) -> f64 {
        let t = since_reveal_ms - self.delay_ms.max(0.0);
        if t <= 0.0 {
            return 0.0;
        }
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        self.ease.apply(t / self.duration_ms)
    }

    fn total_ms(&self) -> f64 {
        self.delay_ms.max(0.0) + self.duration_ms.max(0.0)
    }
}

/// Visibility-triggered, non-restartable reveal.
#[derive(Debug)]
pub struct RevealGate {
    reveal: Reveal,
    reduced_motion: bool,
    revealed_at_ms: Option<f64>,
    subscription: OnceSubscription,
}

impl RevealGate {
    /// Create a gate owning the visibility `subscription`.
    ///
    /// With `reduced_motion` the element is shown immediately and the subscription is released
    /// right away.
    pub fn new(reveal: Reveal, subscription: OnceSubscription, reduced_motion: bool) -> Self {
        let mut gate = Self {
            reveal,
            reduced_motion,
            revealed_at_ms: None,
            subscription,
        };
        if reduced_motion {
            gate.revealed_at_ms = Some(f64::NEG_INFINITY);
            gate.subscription.release();
        }
        gate
    }

    /// Feed a visibility report. Returns `true` only on the report that flips the gate.
    pub fn observe(&mut self, ratio: f64, now_ms: f64) -> bool {
        if self.revealed_at_ms.is_some() || ratio.is_nan() || ratio < self.reveal.threshold {
            return false;
        }
        self.revealed_at_ms = Some(now_ms);
        self.subscription.release();
        tracing::trace!(now_ms, ratio, "reveal triggered");
        true
    }

    /// Whether the gate has flipped.
    pub fn is_revealed(&self) -> bool {
        self.revealed_at_ms.is_some()
    }

    /// Whether the visibility subscription is still held.
    pub fn is_observing(&self) -> bool {
        self.subscription.is_active()
    }

    /// Style at `now_ms`.
    pub fn frame_at(&self, now_ms: f64) -> RevealFrame {
        if self.reduced_motion {
            return RevealFrame::SHOWN;
        }
        match self.revealed_at_ms {
            None => self.reveal.frame_at_progress(0.0),
            Some(at) => self.reveal.frame_at_progress(self.reveal.progress(now_ms - at)),
        }
    }

    /// Whether the transition has finished (nothing left to animate).
    pub fn is_settled(&self, now_ms: f64) -> bool {
        match self.revealed_at_ms {
            None => false,
            Some(_) if self.reduced_motion => true,
            Some(at) => now_ms - at >= self.reveal.total_ms(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/reveal.rs"]
mod tests;
