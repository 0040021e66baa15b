//! Threshold composite that turns a blurred union of circles into one flat-colored silhouette.

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{BlobscapeError, BlobscapeResult};

/// Slope of the coverage ramp around the cutoff. Higher is crisper; the ramp spans
/// `1 / THRESHOLD_GAIN` of coverage.
pub const THRESHOLD_GAIN: f32 = 18.0;

/// Coverage-to-coverage lookup table for a cutoff in `(0, 1)`.
pub fn threshold_lut(cutoff: f32) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, out) in lut.iter_mut().enumerate() {
        let a = i as f32 / 255.0;
        let v = ((a - cutoff) * THRESHOLD_GAIN + 0.5).clamp(0.0, 1.0);
        *out = (v * 255.0).round() as u8;
    }
    lut
}

/// Overwrite `dst` (premultiplied RGBA8) with `fill` wherever thresholded `coverage` is set.
///
/// Pixels below the cutoff become fully transparent.
pub fn threshold_fill(
    coverage: &[u8],
    dst: &mut [u8],
    fill: Rgba8Premul,
    cutoff: f32,
) -> BlobscapeResult<()> {
    if dst.len() != coverage.len().saturating_mul(4) {
        return Err(BlobscapeError::render(
            "threshold_fill expects one coverage byte per rgba8 pixel",
        ));
    }
    let lut = threshold_lut(cutoff);
    for (px, &c) in dst.chunks_exact_mut(4).zip(coverage) {
        px.copy_from_slice(&fill.scaled(lut[usize::from(c)]).to_array());
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/goo.rs"]
mod tests;
