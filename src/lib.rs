//! Blobscape is a host-agnostic "lava lamp" background animation.
//!
//! A handful of soft circles drift and bounce inside a surface; drawing them through a blur and
//! then thresholding the blurred coverage fuses them into one organic silhouette. The crate also
//! carries the one-shot reveal transitions used alongside it.
//!
//! - Implement [`EnvProbe`], [`FrameHost`] and [`DrawSurface`] for your host (or use
//!   [`SystemEnv`], [`VirtualHost`] and [`CpuSurface`])
//! - [`BlobBackground::mount`] with [`BlobBackgroundProps`]
//! - Feed it [`HostEvent`]s and [`BlobBackground::unmount`] when done
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod anim;
pub(crate) mod component;
pub(crate) mod env;
pub(crate) mod render;
pub(crate) mod schedule;
pub(crate) mod sim;

pub use crate::foundation::color::Color;
pub use crate::foundation::core::{MAX_SURFACE_PX, Point, Rect, Rgba8Premul, SurfaceSize, Vec2};
pub use crate::foundation::error::{BlobscapeError, BlobscapeResult};

pub use crate::anim::config::{AnimationConfig, NOMINAL_FRAME_MS, Quality, config_for_tier};
pub use crate::anim::ease::Ease;
pub use crate::anim::reveal::{Reveal, RevealFrame, RevealGate, RevealKind};
pub use crate::component::background::BlobBackground;
pub use crate::component::props::BlobBackgroundProps;
pub use crate::env::capability::{
    Capabilities, EnvProbe, PerformanceTier, REDUCED_MOTION_ENV, StaticEnv, SystemEnv,
    classify_tier,
};
pub use crate::render::backend::{DrawContext, DrawSurface, FrameRGBA};
pub use crate::render::cpu::{CpuCanvas, CpuSurface};
pub use crate::render::pass::{RenderOpts, render_field};
pub use crate::schedule::host::{FrameHandle, FrameHost, HostEvent, TimerHandle, VISIBLE_RATIO};
pub use crate::schedule::scheduler::{FrameScheduler, RESIZE_DEBOUNCE_MS, SchedulerState};
pub use crate::schedule::subscription::OnceSubscription;
pub use crate::schedule::virtual_host::{HostStats, VirtualHost};
pub use crate::sim::blob::Blob;
pub use crate::sim::field::{
    BASE_RADIUS_FACTOR, BOUNCE_DAMPING, BlobField, MAX_NUDGE, MAX_SPEED, RADIUS_JITTER,
    base_radius_for,
};
