/// Timing curves for reveal transitions, named after their CSS counterparts.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    Linear,
    /// CSS `ease`.
    Ease,
    /// CSS `ease-in`.
    EaseIn,
    /// CSS `ease-out`.
    #[default]
    EaseOut,
    /// CSS `ease-in-out`.
    EaseInOut,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; `x1`, `x2` are clamped into `[0, 1]`.
    CubicBezier(f64, f64, f64, f64),
}

impl Ease {
    /// Map normalized progress `t` to eased progress. `t` is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.25, 0.1, 0.25, 1.0, t),
            Self::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, t),
            Self::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, t),
            Self::CubicBezier(x1, y1, x2, y2) => {
                cubic_bezier(x1.clamp(0.0, 1.0), y1, x2.clamp(0.0, 1.0), y2, t)
            }
        }
    }
}

fn bezier_coord(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

// Solve x(s) = t for s (Newton, bisection fallback), then return y(s).
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, t: f64) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let mut s = t;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - t;
        if err.abs() < 1e-7 {
            return bezier_coord(y1, y2, s);
        }
        let d = bezier_slope(x1, x2, s);
        if d.abs() < 1e-6 {
            break;
        }
        s -= err / d;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = t;
    for _ in 0..48 {
        let x = bezier_coord(x1, x2, s);
        if (x - t).abs() < 1e-7 {
            break;
        }
        if x < t {
            lo = s;
        } else {
            hi = s;
        }
        s = 0.5 * (lo + hi);
    }
    bezier_coord(y1, y2, s)
}

#[cfg(test)]
#[path = "../../tests/unit/anim/ease.rs"]
mod tests;
