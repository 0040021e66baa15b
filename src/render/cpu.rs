use crate::foundation::core::{MAX_SURFACE_PX, Point, Rgba8Premul, SurfaceSize};
use crate::foundation::error::{BlobscapeError, BlobscapeResult};
use crate::render::backend::{DrawContext, DrawSurface, FrameRGBA};
use crate::render::blur::{blur_plane_q16, gaussian_kernel_q16, kernel_radius_for_sigma};
use crate::render::goo::threshold_fill;
use kurbo::Shape;

/// Raster canvas backed by `vello_cpu`.
///
/// Shapes are rasterized at device resolution; blur and threshold run on the CPU over the
/// coverage plane.
pub struct CpuCanvas {
    size: SurfaceSize,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
    blur_sigma: f64,
    // (sigma bits, kernel); reused while the blur setting is unchanged.
    kernel_cache: Option<(u32, Vec<u32>)>,
    coverage: Vec<u8>,
    scratch: Vec<u8>,
}

impl std::fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field("size", &self.size)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("blur_sigma", &self.blur_sigma)
            .finish_non_exhaustive()
    }
}

impl CpuCanvas {
    /// Allocate a canvas for `size`. Both pixel dimensions must be in `1..=65535`.
    pub fn new(size: SurfaceSize) -> BlobscapeResult<Self> {
        let (w, h) = size.pixel_dims();
        if w == 0 || h == 0 {
            return Err(BlobscapeError::validation("canvas pixel size must be non-zero"));
        }
        if w > MAX_SURFACE_PX || h > MAX_SURFACE_PX {
            return Err(BlobscapeError::validation(format!(
                "canvas pixel size {w}x{h} exceeds {MAX_SURFACE_PX}"
            )));
        }
        let width = w as u16;
        let height = h as u16;
        Ok(Self {
            size,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
            blur_sigma: 0.0,
            kernel_cache: None,
            coverage: Vec::new(),
            scratch: Vec::new(),
        })
    }

    /// Surface size this canvas was allocated for.
    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Copy out the current pixels.
    pub fn frame(&self) -> FrameRGBA {
        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }

    fn kernel_for(&mut self, sigma_px: f32) -> BlobscapeResult<Vec<u32>> {
        let bits = sigma_px.to_bits();
        if let Some((cached, k)) = &self.kernel_cache
            && *cached == bits
        {
            return Ok(k.clone());
        }
        let k = gaussian_kernel_q16(kernel_radius_for_sigma(sigma_px), sigma_px)?;
        self.kernel_cache = Some((bits, k.clone()));
        Ok(k)
    }
}

impl DrawContext for CpuCanvas {
    fn clear(&mut self) {
        self.ctx.reset();
        self.pixmap.data_as_u8_slice_mut().fill(0);
    }

    fn set_blur(&mut self, sigma_px: f64) {
        self.blur_sigma = if sigma_px.is_finite() {
            sigma_px.max(0.0)
        } else {
            0.0
        };
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8Premul) {
        if radius.is_nan() || radius <= 0.0 {
            return;
        }
        let [r, g, b, a] = unpremultiply(color);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::scale(
            self.size.device_pixel_ratio,
        ));
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
        self.ctx.fill_path(&circle_to_cpu(center, radius));
    }

    fn composite_threshold(&mut self, fill: Rgba8Premul, alpha_cutoff: f32) -> BlobscapeResult<()> {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        self.coverage.clear();
        self.coverage.extend(
            self.pixmap
                .data_as_u8_slice()
                .chunks_exact(4)
                .map(|px| px[3]),
        );

        let sigma_px = (self.blur_sigma * self.size.device_pixel_ratio) as f32;
        let kernel = self.kernel_for(sigma_px)?;
        blur_plane_q16(
            &mut self.coverage,
            &mut self.scratch,
            u32::from(self.width),
            u32::from(self.height),
            &kernel,
        )?;
        threshold_fill(
            &self.coverage,
            self.pixmap.data_as_u8_slice_mut(),
            fill,
            alpha_cutoff,
        )?;

        self.ctx.reset();
        Ok(())
    }
}

/// In-memory [`DrawSurface`] backed by a [`CpuCanvas`].
///
/// A zero-area surface has no canvas, so [`DrawSurface::context`] returns `None` until it is
/// resized to something drawable.
#[derive(Debug)]
pub struct CpuSurface {
    size: SurfaceSize,
    canvas: Option<CpuCanvas>,
    available: bool,
}

impl CpuSurface {
    /// Create a surface, allocating a canvas unless `size` is empty.
    pub fn new(size: SurfaceSize) -> BlobscapeResult<Self> {
        let mut s = Self {
            size: SurfaceSize::ZERO,
            canvas: None,
            available: true,
        };
        s.resize(size)?;
        Ok(s)
    }

    /// Simulate the host losing (or regaining) its drawing context.
    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Current pixels, if a canvas exists.
    pub fn frame(&self) -> Option<FrameRGBA> {
        self.canvas.as_ref().map(CpuCanvas::frame)
    }
}

impl DrawSurface for CpuSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> BlobscapeResult<()> {
        let (w, h) = size.pixel_dims();
        self.canvas = if w == 0 || h == 0 {
            None
        } else {
            Some(CpuCanvas::new(size)?)
        };
        self.size = size;
        Ok(())
    }

    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        if !self.available {
            return None;
        }
        self.canvas.as_mut().map(|c| c as &mut dyn DrawContext)
    }
}

fn unpremultiply(c: Rgba8Premul) -> [u8; 4] {
    let a = u32::from(c.a);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |v: u8| ((u32::from(v) * 255 + a / 2) / a).min(255) as u8;
    [un(c.r), un(c.g), un(c.b), c.a]
}

fn circle_to_cpu(center: Point, radius: f64) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in kurbo::Circle::new(center, radius).path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
