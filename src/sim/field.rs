use crate::anim::config::NOMINAL_FRAME_MS;
use crate::foundation::core::{Point, Rgba8Premul, SurfaceSize, Vec2};
use crate::foundation::math::SplitMix64;
use crate::sim::blob::Blob;

/// Base radius as a fraction of the surface's shorter side.
pub const BASE_RADIUS_FACTOR: f64 = 0.2;
/// Radii are drawn from `base * [1 - RADIUS_JITTER, 1 + RADIUS_JITTER)`.
pub const RADIUS_JITTER: f64 = 0.25;
/// Initial velocity components are drawn from `[-MAX_SPEED, MAX_SPEED)` px per nominal frame.
pub const MAX_SPEED: f64 = 1.0;
/// Drift components are drawn from `[-MAX_NUDGE, MAX_NUDGE)` px per nominal frame.
pub const MAX_NUDGE: f64 = 0.05;
/// Fraction of the normal velocity kept after a wall bounce.
pub const BOUNCE_DAMPING: f64 = 0.9;

const FALLBACK_COLOR: Rgba8Premul = Rgba8Premul {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

/// All blobs simulated on one surface.
///
/// The field is regenerated wholesale whenever the surface size changes; blobs carry no identity
/// across regenerations.
#[derive(Clone, Debug, PartialEq)]
pub struct BlobField {
    size: SurfaceSize,
    blobs: Vec<Blob>,
}

impl Default for BlobField {
    fn default() -> Self {
        Self::empty()
    }
}

impl BlobField {
    /// A field with no blobs on a zero-sized surface.
    pub fn empty() -> Self {
        Self {
            size: SurfaceSize::ZERO,
            blobs: Vec::new(),
        }
    }

    /// Build `count` blobs for `size`.
    ///
    /// Identical `(size, count, palette, seed)` always produce identical fields. An empty surface
    /// gets no blobs.
    #[tracing::instrument(level = "debug", skip(palette))]
    pub fn generate(size: SurfaceSize, count: usize, palette: &[Rgba8Premul], seed: u64) -> Self {
        if size.is_empty() || count == 0 {
            return Self {
                size,
                blobs: Vec::new(),
            };
        }

        let base = base_radius_for(size);
        let mut rng = SplitMix64::new(seed);
        let blobs = (0..count)
            .map(|i| {
                let radius =
                    base * rng.range_f64(1.0 - RADIUS_JITTER, 1.0 + RADIUS_JITTER);
                let x = place_on_axis(&mut rng, radius, size.width);
                let y = place_on_axis(&mut rng, radius, size.height);
                let velocity = Vec2::new(
                    rng.range_f64(-MAX_SPEED, MAX_SPEED),
                    rng.range_f64(-MAX_SPEED, MAX_SPEED),
                );
                let nudge = Vec2::new(
                    rng.range_f64(-MAX_NUDGE, MAX_NUDGE),
                    rng.range_f64(-MAX_NUDGE, MAX_NUDGE),
                );
                let color = if palette.is_empty() {
                    FALLBACK_COLOR
                } else {
                    palette[i % palette.len()]
                };
                Blob {
                    center: Point::new(x, y),
                    radius,
                    velocity,
                    nudge,
                    color,
                }
            })
            .collect();

        Self { size, blobs }
    }

    /// Replace every blob with a fresh set for `size`.
    pub fn regenerate(
        &mut self,
        size: SurfaceSize,
        count: usize,
        palette: &[Rgba8Premul],
        seed: u64,
    ) {
        *self = Self::generate(size, count, palette, seed);
    }

    /// Advance every blob by `elapsed_ms`.
    ///
    /// Displacement is `(velocity + nudge) * elapsed_ms / NOMINAL_FRAME_MS`, so motion speed does
    /// not depend on the real frame rate. A blob crossing a wall is clamped back onto it and its
    /// normal velocity (and drift) are mirrored, the velocity scaled by [`BOUNCE_DAMPING`].
    /// Negative or non-finite `elapsed_ms` counts as zero.
    pub fn step(&mut self, elapsed_ms: f64) {
        let elapsed_ms = if elapsed_ms.is_finite() {
            elapsed_ms.max(0.0)
        } else {
            0.0
        };
        let scale = elapsed_ms / NOMINAL_FRAME_MS;
        let (w, h) = (self.size.width, self.size.height);

        for b in &mut self.blobs {
            step_axis(
                &mut b.center.x,
                &mut b.velocity.x,
                &mut b.nudge.x,
                b.radius,
                w,
                scale,
            );
            step_axis(
                &mut b.center.y,
                &mut b.velocity.y,
                &mut b.nudge.y,
                b.radius,
                h,
                scale,
            );
        }
    }

    /// Current blobs.
    pub fn blobs(&self) -> &[Blob] {
        &self.blobs
    }

    /// Number of blobs.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the field has no blobs.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    /// Surface the field was generated for.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Base radius the current blobs were scaled from.
    pub fn base_radius(&self) -> f64 {
        base_radius_for(self.size)
    }
}

/// `min(width, height) * BASE_RADIUS_FACTOR`.
pub fn base_radius_for(size: SurfaceSize) -> f64 {
    size.min_side().max(0.0) * BASE_RADIUS_FACTOR
}

fn place_on_axis(rng: &mut SplitMix64, radius: f64, extent: f64) -> f64 {
    if extent < 2.0 * radius {
        return extent * 0.5;
    }
    rng.range_f64(radius, extent - radius)
}

fn step_axis(pos: &mut f64, vel: &mut f64, nudge: &mut f64, radius: f64, extent: f64, scale: f64) {
    *pos += (*vel + *nudge) * scale;

    if extent < 2.0 * radius {
        *pos = extent * 0.5;
        return;
    }

    if *pos - radius < 0.0 {
        *pos = radius;
        *vel = vel.abs() * BOUNCE_DAMPING;
        *nudge = nudge.abs();
    } else if *pos + radius > extent {
        *pos = extent - radius;
        *vel = -vel.abs() * BOUNCE_DAMPING;
        *nudge = -nudge.abs();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sim/field.rs"]
mod tests;
