//! Host capability detection.
//!
//! A host is classified exactly once per mount. Every query on [`EnvProbe`] may be unavailable
//! (`None`); missing answers fall back to the most permissive defaults rather than failing.

use crate::foundation::core::SurfaceSize;

/// Read-only environment queries answered by the host.
pub trait EnvProbe {
    /// Viewport size in logical units.
    fn viewport(&self) -> Option<(f64, f64)>;
    /// Ratio of device pixels to logical units.
    fn device_pixel_ratio(&self) -> Option<f64>;
    /// Logical CPU count.
    fn hardware_concurrency(&self) -> Option<u32>;
    /// Approximate device memory in GiB.
    fn device_memory_gb(&self) -> Option<f64>;
    /// Whether the user asked the platform to minimize motion.
    fn prefers_reduced_motion(&self) -> Option<bool>;
    /// Whether the primary input is touch.
    fn touch_capable(&self) -> Option<bool>;
}

/// Coarse device capability class used to scale animation cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PerformanceTier {
    /// Two cores or fewer.
    Low,
    /// Between the two thresholds.
    Medium,
    /// Six cores or more, or unknown.
    High,
}

impl PerformanceTier {
    /// Lowercase name, also used as the quality label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl std::fmt::Display for PerformanceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

const LOW_TIER_MAX_CORES: u32 = 2;
const HIGH_TIER_MIN_CORES: u32 = 6;

/// Classify a host by its core count. Unknown hosts are treated as high-end.
pub fn classify_tier(cores: Option<u32>) -> PerformanceTier {
    match cores {
        None => PerformanceTier::High,
        Some(n) if n <= LOW_TIER_MAX_CORES => PerformanceTier::Low,
        Some(n) if n >= HIGH_TIER_MIN_CORES => PerformanceTier::High,
        Some(_) => PerformanceTier::Medium,
    }
}

/// Snapshot of the host taken once at mount.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    /// Performance tier derived from the core count.
    pub tier: PerformanceTier,
    /// Reduced-motion preference. When set, nothing animates.
    pub reduced_motion: bool,
    /// Viewport at detection time, if known.
    pub viewport: Option<(f64, f64)>,
    /// Device pixel ratio, defaulting to `1.0`.
    pub device_pixel_ratio: f64,
    /// Touch-primary input.
    pub touch: bool,
    /// Raw core count, if reported.
    pub cores: Option<u32>,
    /// Raw device memory in GiB, if reported.
    pub memory_gb: Option<f64>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            tier: PerformanceTier::High,
            reduced_motion: false,
            viewport: None,
            device_pixel_ratio: 1.0,
            touch: false,
            cores: None,
            memory_gb: None,
        }
    }
}

impl Capabilities {
    /// Query `env` once and classify it.
    pub fn detect(env: &dyn EnvProbe) -> Self {
        let cores = env.hardware_concurrency().filter(|&n| n > 0);
        let device_pixel_ratio = env
            .device_pixel_ratio()
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(1.0);
        let viewport = env
            .viewport()
            .filter(|(w, h)| w.is_finite() && h.is_finite() && *w >= 0.0 && *h >= 0.0);

        let caps = Self {
            tier: classify_tier(cores),
            reduced_motion: env.prefers_reduced_motion().unwrap_or(false),
            viewport,
            device_pixel_ratio,
            touch: env.touch_capable().unwrap_or(false),
            cores,
            memory_gb: env.device_memory_gb().filter(|m| m.is_finite() && *m > 0.0),
        };
        tracing::debug!(
            tier = %caps.tier,
            reduced_motion = caps.reduced_motion,
            cores = ?caps.cores,
            dpr = caps.device_pixel_ratio,
            "classified host capabilities"
        );
        caps
    }

    /// Whether anything should animate at all.
    pub fn animates(&self) -> bool {
        !self.reduced_motion
    }

    /// Viewport as a [`SurfaceSize`], or [`SurfaceSize::ZERO`] when unknown.
    pub fn viewport_size(&self) -> SurfaceSize {
        match self.viewport {
            Some((width, height)) => SurfaceSize {
                width,
                height,
                device_pixel_ratio: self.device_pixel_ratio,
            },
            None => SurfaceSize::ZERO,
        }
    }
}

/// Fixed answers, for tests and for hosts that already know their environment.
///
/// Every field left `None` behaves like an unavailable query.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StaticEnv {
    /// Viewport in logical units.
    pub viewport: Option<(f64, f64)>,
    /// Device pixel ratio.
    pub device_pixel_ratio: Option<f64>,
    /// Core count.
    pub hardware_concurrency: Option<u32>,
    /// Device memory (GiB).
    pub device_memory_gb: Option<f64>,
    /// Reduced motion preference.
    pub prefers_reduced_motion: Option<bool>,
    /// Touch-primary input.
    pub touch_capable: Option<bool>,
}

impl StaticEnv {
    /// Environment reporting only a core count.
    pub fn with_cores(cores: u32) -> Self {
        Self {
            hardware_concurrency: Some(cores),
            ..Self::default()
        }
    }
}

impl EnvProbe for StaticEnv {
    fn viewport(&self) -> Option<(f64, f64)> {
        self.viewport
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        self.device_pixel_ratio
    }

    fn hardware_concurrency(&self) -> Option<u32> {
        self.hardware_concurrency
    }

    fn device_memory_gb(&self) -> Option<f64> {
        self.device_memory_gb
    }

    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.prefers_reduced_motion
    }

    fn touch_capable(&self) -> Option<bool> {
        self.touch_capable
    }
}

/// Environment variable consulted by [`SystemEnv`] for the reduced-motion preference.
pub const REDUCED_MOTION_ENV: &str = "BLOBSCAPE_REDUCED_MOTION";

/// Native host probe.
///
/// Cores come from [`std::thread::available_parallelism`]; reduced motion from
/// [`REDUCED_MOTION_ENV`] (`1`, `true`, `yes`, `reduce`). There is no viewport, memory or touch
/// information natively.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemEnv;

impl EnvProbe for SystemEnv {
    fn viewport(&self) -> Option<(f64, f64)> {
        None
    }

    fn device_pixel_ratio(&self) -> Option<f64> {
        None
    }

    fn hardware_concurrency(&self) -> Option<u32> {
        std::thread::available_parallelism()
            .ok()
            .and_then(|n| u32::try_from(n.get()).ok())
    }

    fn device_memory_gb(&self) -> Option<f64> {
        None
    }

    fn prefers_reduced_motion(&self) -> Option<bool> {
        let v = std::env::var(REDUCED_MOTION_ENV).ok()?;
        Some(parse_reduced_motion(&v))
    }

    fn touch_capable(&self) -> Option<bool> {
        None
    }
}

fn parse_reduced_motion(v: &str) -> bool {
    matches!(
        v.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "reduce"
    )
}

#[cfg(test)]
#[path = "../../tests/unit/env/capability.rs"]
mod tests;
