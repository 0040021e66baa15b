use crate::foundation::core::{Point, Rgba8Premul, Vec2};

/// One simulated circle.
///
/// `radius` and `color` are fixed at creation. `center` and `velocity` change every tick; `nudge`
/// only flips sign when the blob hits a wall.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    /// Center in logical units.
    pub center: Point,
    /// Radius in logical units.
    pub radius: f64,
    /// Displacement per nominal frame.
    pub velocity: Vec2,
    /// Small drift added every nominal frame.
    pub nudge: Vec2,
    /// Fill color before the threshold pass.
    pub color: Rgba8Premul,
}

impl Blob {
    /// Whether the blob lies inside `[r, extent - r]` on both axes (with `eps` slack).
    ///
    /// An axis too short for the blob is satisfied by a center at its midpoint.
    pub fn is_within(&self, width: f64, height: f64, eps: f64) -> bool {
        fn axis_ok(c: f64, r: f64, extent: f64, eps: f64) -> bool {
            if extent < 2.0 * r {
                return (c - extent * 0.5).abs() <= eps;
            }
            c >= r - eps && c <= extent - r + eps
        }
        axis_ok(self.center.x, self.radius, width, eps)
            && axis_ok(self.center.y, self.radius, height, eps)
    }
}
