use crate::env::capability::PerformanceTier;

/// Frame interval a 60 Hz display delivers; physics is tuned in units of this.
pub const NOMINAL_FRAME_MS: f64 = 1000.0 / 60.0;

/// Rendering quality selected by the tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    /// Fewer blobs, 30 fps, narrow blur.
    Low,
    /// Default.
    Medium,
    /// Widest blur.
    High,
}

impl Quality {
    /// Label exposed to hosts (`"low"`, `"medium"`, `"high"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Blur standard deviation in logical pixels before the threshold pass.
    pub fn blur_px(self) -> f64 {
        match self {
            Self::Low => 12.0,
            Self::Medium => 16.0,
            Self::High => 20.0,
        }
    }
}

/// Immutable animation parameters derived from a [`PerformanceTier`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationConfig {
    /// Number of blobs simulated.
    pub blob_count: usize,
    /// Minimum time between simulated ticks, in milliseconds.
    pub frame_interval_ms: f64,
    /// Rendering quality.
    pub quality: Quality,
}

impl AnimationConfig {
    /// Target frames per second.
    pub fn target_fps(&self) -> f64 {
        1000.0 / self.frame_interval_ms
    }
}

/// Map a tier to its animation parameters.
pub fn config_for_tier(tier: PerformanceTier) -> AnimationConfig {
    match tier {
        PerformanceTier::Low => AnimationConfig {
            blob_count: 2,
            frame_interval_ms: 1000.0 / 30.0,
            quality: Quality::Low,
        },
        PerformanceTier::Medium => AnimationConfig {
            blob_count: 3,
            frame_interval_ms: NOMINAL_FRAME_MS,
            quality: Quality::Medium,
        },
        PerformanceTier::High => AnimationConfig {
            blob_count: 4,
            frame_interval_ms: NOMINAL_FRAME_MS,
            quality: Quality::High,
        },
    }
}

#[cfg(test)]
#[path = "../../tests/unit/anim/config.rs"]
mod tests;
