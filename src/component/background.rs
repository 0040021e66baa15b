//! The mounted lava-lamp background.
//!
//! [`BlobBackground`] wires the capability snapshot, tier config, blob field, scheduler and render
//! pass together. It is driven entirely by [`HostEvent`]s; nothing happens between events.

use crate::anim::config::{AnimationConfig, config_for_tier};
use crate::component::props::BlobBackgroundProps;
use crate::env::capability::{Capabilities, EnvProbe};
use crate::foundation::core::{Rgba8Premul, SurfaceSize};
use crate::foundation::error::BlobscapeResult;
use crate::foundation::math::seed_from;
use crate::render::backend::DrawSurface;
use crate::render::pass::{RenderOpts, render_field};
use crate::schedule::host::{FrameHost, HostEvent};
use crate::schedule::scheduler::{FrameScheduler, SchedulerState};
use crate::sim::field::BlobField;

/// Animated blob background bound to one drawing surface.
#[derive(Debug)]
pub struct BlobBackground<S: DrawSurface> {
    props: BlobBackgroundProps,
    caps: Capabilities,
    config: AnimationConfig,
    palette: Vec<Rgba8Premul>,
    opts: RenderOpts,
    scheduler: FrameScheduler,
    field: BlobField,
    surface: S,
    ticks: u64,
    skipped_ticks: u64,
}

impl<S: DrawSurface> BlobBackground<S> {
    /// Validate `props`, probe `env` once and generate the first blob field for the surface's
    /// current size.
    ///
    /// The background starts idle; it animates only after a visibility report.
    pub fn mount(
        props: BlobBackgroundProps,
        env: &dyn EnvProbe,
        surface: S,
    ) -> BlobscapeResult<Self> {
        props.validate()?;
        let caps = Capabilities::detect(env);
        let config = config_for_tier(caps.tier);
        let palette = props.premul_palette();
        let opts = RenderOpts {
            blur_px: config.quality.blur_px() * props.blur_scale,
            fill: props.fill.to_premul(),
            alpha_cutoff: props.alpha_cutoff,
        };
        let scheduler = FrameScheduler::new(
            caps.reduced_motion,
            config.frame_interval_ms,
            props.resize_debounce_ms,
        );
        tracing::debug!(
            tier = %caps.tier,
            blobs = config.blob_count,
            quality = config.quality.as_str(),
            reduced_motion = caps.reduced_motion,
            "mounting blob background"
        );

        let mut bg = Self {
            props,
            caps,
            config,
            palette,
            opts,
            scheduler,
            field: BlobField::empty(),
            surface,
            ticks: 0,
            skipped_ticks: 0,
        };
        let size = bg.surface.size();
        bg.apply_size(size)?;
        Ok(bg)
    }

    /// React to one host event.
    ///
    /// Errors only come from reallocating the surface after a resize or from a failing
    /// composite; a surface without a drawing context just skips the tick.
    pub fn handle_event(
        &mut self,
        host: &mut dyn FrameHost,
        event: HostEvent,
    ) -> BlobscapeResult<()> {
        match event {
            HostEvent::Visibility { ratio } => self.scheduler.on_visibility(host, ratio),
            HostEvent::Resize(size) => {
                let size = size.with_dpr_cap(self.props.max_device_pixel_ratio);
                self.scheduler.on_resize(host, size);
            }
            HostEvent::Timer { handle } => {
                if let Some(size) = self.scheduler.on_timer(handle) {
                    self.apply_size(size)?;
                }
            }
            HostEvent::Frame {
                handle,
                timestamp_ms,
            } => {
                if let Some(elapsed_ms) = self.scheduler.on_frame(host, handle, timestamp_ms) {
                    self.tick(elapsed_ms)?;
                }
            }
        }
        Ok(())
    }

    /// Stop animating and cancel every pending host callback. Safe to call more than once.
    pub fn unmount(&mut self, host: &mut dyn FrameHost) {
        if !self.scheduler.is_torn_down() {
            tracing::debug!(ticks = self.ticks, "unmounting blob background");
        }
        self.scheduler.teardown(host);
    }

    pub fn props(&self) -> &BlobBackgroundProps {
        &self.props
    }

    /// Capability snapshot taken at mount.
    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn field(&self) -> &BlobField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access, e.g. to simulate a lost drawing context.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// Ticks simulated so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Ticks whose render was skipped for lack of a drawing context.
    pub fn skipped_ticks(&self) -> u64 {
        self.skipped_ticks
    }

    /// Advance the field by `elapsed_ms` and paint it, outside of any host loop.
    ///
    /// Used for offline rendering; the scheduler is not consulted. Does nothing under reduced
    /// motion or after [`BlobBackground::unmount`].
    pub fn advance(&mut self, elapsed_ms: f64) -> BlobscapeResult<()> {
        if self.caps.reduced_motion || self.scheduler.is_torn_down() {
            tracing::trace!("not animating; advance ignored");
            return Ok(());
        }
        self.tick(elapsed_ms)
    }

    fn tick(&mut self, elapsed_ms: f64) -> BlobscapeResult<()> {
        self.field.step(elapsed_ms);
        self.ticks += 1;
        tracing::trace!(tick = self.ticks, elapsed_ms, "tick");
        self.paint()
    }

    fn paint(&mut self) -> BlobscapeResult<()> {
        match self.surface.context() {
            Some(ctx) => render_field(&self.field, ctx, &self.opts),
            None => {
                self.skipped_ticks += 1;
                tracing::trace!("no drawing context; skipping render");
                Ok(())
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn apply_size(&mut self, size: SurfaceSize) -> BlobscapeResult<()> {
        let size = size.with_dpr_cap(self.props.max_device_pixel_ratio);
        if size != self.surface.size() {
            self.surface.resize(size)?;
        }
        let count = if self.caps.reduced_motion {
            0
        } else {
            self.config.blob_count
        };
        let (w, h) = size.pixel_dims();
        let seed = seed_from(&[self.props.seed, u64::from(w), u64::from(h)]);
        self.field.regenerate(size, count, &self.palette, seed);
        tracing::debug!(blobs = self.field.len(), "regenerated blob field");
        if size.is_empty() {
            return Ok(());
        }
        // Resizing discarded the old pixels.
        match self.surface.context() {
            Some(ctx) => render_field(&self.field, ctx, &self.opts),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/component/background.rs"]
mod tests;
