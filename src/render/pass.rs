use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::BlobscapeResult;
use crate::render::backend::DrawContext;
use crate::sim::field::BlobField;

/// Parameters of the blur + threshold render step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    /// Blur standard deviation in logical px.
    pub blur_px: f64,
    /// Flat color of the fused silhouette.
    pub fill: Rgba8Premul,
    /// Blurred coverage needed to be part of the silhouette, in `(0, 1)`.
    pub alpha_cutoff: f32,
}

/// Draw `field` as one fused silhouette: clear, fill every blob through the blur, then threshold.
#[tracing::instrument(level = "trace", skip_all, fields(blobs = field.len()))]
pub fn render_field(
    field: &BlobField,
    ctx: &mut dyn DrawContext,
    opts: &RenderOpts,
) -> BlobscapeResult<()> {
    ctx.clear();
    if field.is_empty() {
        return Ok(());
    }
    ctx.set_blur(opts.blur_px);
    for blob in field.blobs() {
        ctx.fill_circle(blob.center, blob.radius, blob.color);
    }
    ctx.composite_threshold(opts.fill, opts.alpha_cutoff)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pass.rs"]
mod tests;
