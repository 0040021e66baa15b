use crate::foundation::core::{Point, Rgba8Premul, SurfaceSize};
use crate::foundation::error::BlobscapeResult;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Number of pixels with non-zero alpha.
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] != 0).count()
    }

    /// Convert premultiplied data to straight alpha (what PNG encoders expect).
    pub fn to_straight(&self) -> Self {
        if !self.premultiplied {
            return self.clone();
        }
        let mut data = self.data.clone();
        for px in data.chunks_exact_mut(4) {
            let a = u32::from(px[3]);
            if a == 0 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        Self {
            data,
            premultiplied: false,
            ..*self
        }
    }
}

/// 2D drawing operations the render step needs from a host surface.
///
/// Coordinates are logical units; implementations scale by their device pixel ratio.
pub trait DrawContext {
    /// Clear to fully transparent and drop any pending shapes.
    fn clear(&mut self);

    /// Gaussian blur (standard deviation in logical px) applied to subsequently filled shapes
    /// when they are composited.
    fn set_blur(&mut self, sigma_px: f64);

    /// Fill a circle.
    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8Premul);

    /// Composite everything filled since [`DrawContext::clear`]: blur it, keep the part of the
    /// blurred coverage above `alpha_cutoff` and paint it with `fill`.
    fn composite_threshold(&mut self, fill: Rgba8Premul, alpha_cutoff: f32) -> BlobscapeResult<()>;
}

/// A resizable drawing target that may or may not currently offer a context.
pub trait DrawSurface {
    /// Current size.
    fn size(&self) -> SurfaceSize;

    /// Resize the backing store. Previous contents are discarded.
    fn resize(&mut self, size: SurfaceSize) -> BlobscapeResult<()>;

    /// The drawing context, or `None` when the host cannot provide one right now.
    fn context(&mut self) -> Option<&mut dyn DrawContext>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;
