use crate::anim::config::Quality;
use crate::foundation::color::Color;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{BlobscapeError, BlobscapeResult};
use crate::render::blur::MAX_BLUR_RADIUS_PX;
use crate::schedule::scheduler::RESIZE_DEBOUNCE_MS;
use std::path::Path;

/// Props of a mounted [`BlobBackground`](crate::BlobBackground).
///
/// Every field is optional in JSON; missing fields take the defaults below.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlobBackgroundProps {
    /// Blob colors, assigned round-robin. Only their alpha matters to the fused silhouette.
    pub palette: Vec<Color>,
    /// Flat color of the fused silhouette.
    pub fill: Color,
    /// Multiplier on the tier's blur radius. The resulting device-px kernel must stay within
    /// 256 px at `max_device_pixel_ratio`.
    pub blur_scale: f64,
    /// Blurred coverage a pixel needs to be painted, in `(0, 1)`.
    pub alpha_cutoff: f32,
    /// Mixed with the surface size to place blobs.
    pub seed: u64,
    /// Device pixel ratios above this are clamped before allocating the surface.
    pub max_device_pixel_ratio: f64,
    /// Quiet period after the last resize before blobs are regenerated.
    pub resize_debounce_ms: f64,
}

impl Default for BlobBackgroundProps {
    fn default() -> Self {
        Self {
            palette: vec![
                Color::rgb(0x7c, 0x3a, 0xed),
                Color::rgb(0xdb, 0x27, 0x77),
                Color::rgb(0x25, 0x63, 0xeb),
                Color::rgb(0x0d, 0x94, 0x88),
            ],
            fill: Color::rgba(0x8b, 0x5c, 0xf6, 0xb3),
            blur_scale: 1.0,
            alpha_cutoff: 0.5,
            seed: 0,
            max_device_pixel_ratio: 2.0,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

impl BlobBackgroundProps {
    /// Parse props from JSON.
    pub fn from_reader(r: impl std::io::Read) -> BlobscapeResult<Self> {
        serde_json::from_reader(r).map_err(|e| BlobscapeError::serde(e.to_string()))
    }

    /// Read and parse a JSON props file.
    pub fn from_path(path: impl AsRef<Path>) -> BlobscapeResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            BlobscapeError::Other(anyhow::Error::new(e).context(format!("open {}", path.display())))
        })?;
        Self::from_reader(std::io::BufReader::new(f))
    }

    pub fn validate(&self) -> BlobscapeResult<()> {
        if self.palette.is_empty() {
            return Err(BlobscapeError::validation("palette must not be empty"));
        }
        if !(self.alpha_cutoff > 0.0 && self.alpha_cutoff < 1.0) {
            return Err(BlobscapeError::validation(format!(
                "alpha_cutoff must be in (0, 1), got {}",
                self.alpha_cutoff
            )));
        }
        if !(self.blur_scale.is_finite() && self.blur_scale > 0.0) {
            return Err(BlobscapeError::validation("blur_scale must be finite and > 0"));
        }
        if !(self.max_device_pixel_ratio.is_finite() && self.max_device_pixel_ratio > 0.0) {
            return Err(BlobscapeError::validation(
                "max_device_pixel_ratio must be finite and > 0",
            ));
        }
        // Kernel radius in device px for the widest tier blur at the highest allowed DPR.
        let widest_radius =
            Quality::High.blur_px() * self.blur_scale * self.max_device_pixel_ratio * 3.0;
        if widest_radius > f64::from(MAX_BLUR_RADIUS_PX) {
            return Err(BlobscapeError::validation(format!(
                "blur_scale {} with max_device_pixel_ratio {} needs a {widest_radius:.0}px blur \
                 kernel; at most {MAX_BLUR_RADIUS_PX}px is supported",
                self.blur_scale, self.max_device_pixel_ratio
            )));
        }
        if !(self.resize_debounce_ms.is_finite() && self.resize_debounce_ms >= 0.0) {
            return Err(BlobscapeError::validation(
                "resize_debounce_ms must be finite and >= 0",
            ));
        }
        Ok(())
    }

    pub(crate) fn premul_palette(&self) -> Vec<Rgba8Premul> {
        self.palette.iter().map(|c| c.to_premul()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/props.rs"]
mod tests;
