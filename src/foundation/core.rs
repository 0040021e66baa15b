use crate::foundation::error::{BlobscapeError, BlobscapeResult};

pub use kurbo::{Point, Rect, Vec2};

/// Largest pixel dimension a raster surface accepts (the CPU rasterizer addresses pixels as `u16`).
pub const MAX_SURFACE_PX: u32 = u16::MAX as u32;

/// Size of a drawing surface: logical (CSS-like) dimensions plus the device pixel ratio.
///
/// Simulation happens in logical units; the raster backing store is `ceil(logical * dpr)` pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    /// Logical width.
    pub width: f64,
    /// Logical height.
    pub height: f64,
    /// Device pixel ratio, `> 0`.
    pub device_pixel_ratio: f64,
}

impl SurfaceSize {
    /// A zero-area surface (what a freshly mounted, not yet laid out element reports).
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
        device_pixel_ratio: 1.0,
    };

    /// Create a validated size.
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> BlobscapeResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(BlobscapeError::validation(
                "surface dimensions must be finite and >= 0",
            ));
        }
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(BlobscapeError::validation(
                "device pixel ratio must be finite and > 0",
            ));
        }
        Ok(Self {
            width,
            height,
            device_pixel_ratio,
        })
    }

    /// Same logical size with the device pixel ratio capped at `max_dpr`.
    pub fn with_dpr_cap(self, max_dpr: f64) -> Self {
        Self {
            device_pixel_ratio: self.device_pixel_ratio.min(max_dpr).max(f64::MIN_POSITIVE),
            ..self
        }
    }

    /// Return `true` when either logical dimension is zero.
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Smaller of the two logical dimensions.
    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    /// Backing store dimensions in device pixels.
    pub fn pixel_dims(self) -> (u32, u32) {
        fn px(logical: f64, dpr: f64) -> u32 {
            let v = (logical * dpr).ceil();
            if v <= 0.0 {
                0
            } else if v >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                v as u32
            }
        }
        (
            px(self.width, self.device_pixel_ratio),
            px(self.height, self.device_pixel_ratio),
        )
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        use crate::foundation::math::mul_div255_u8;

        Self {
            r: mul_div255_u8(u16::from(r), u16::from(a)),
            g: mul_div255_u8(u16::from(g), u16::from(a)),
            b: mul_div255_u8(u16::from(b), u16::from(a)),
            a,
        }
    }

    /// Scale every channel by `coverage` (`0..=255`).
    pub fn scaled(self, coverage: u8) -> Self {
        use crate::foundation::math::mul_div255_u8;

        let c = u16::from(coverage);
        Self {
            r: mul_div255_u8(u16::from(self.r), c),
            g: mul_div255_u8(u16::from(self.g), c),
            b: mul_div255_u8(u16::from(self.b), c),
            a: mul_div255_u8(u16::from(self.a), c),
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
