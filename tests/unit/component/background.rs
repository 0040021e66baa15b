use super::*;
use crate::anim::config::NOMINAL_FRAME_MS;
use crate::env::capability::StaticEnv;
use crate::foundation::core::Point;
use crate::render::backend::DrawContext;
use crate::schedule::host::{FrameHandle, TimerHandle};

#[derive(Debug, Default)]
struct CountingCtx {
    clears: u32,
    circles: u32,
    composites: u32,
}

impl DrawContext for CountingCtx {
    fn clear(&mut self) {
        self.clears += 1;
    }
    fn set_blur(&mut self, _sigma_px: f64) {}
    fn fill_circle(&mut self, _center: Point, _radius: f64, _color: Rgba8Premul) {
        self.circles += 1;
    }
    fn composite_threshold(&mut self, _fill: Rgba8Premul, _cutoff: f32) -> BlobscapeResult<()> {
        self.composites += 1;
        Ok(())
    }
}

#[derive(Debug)]
struct FakeSurface {
    size: SurfaceSize,
    ctx: CountingCtx,
    available: bool,
    resizes: u32,
}

impl FakeSurface {
    fn new(w: f64, h: f64, dpr: f64) -> Self {
        Self {
            size: SurfaceSize::new(w, h, dpr).unwrap(),
            ctx: CountingCtx::default(),
            available: true,
            resizes: 0,
        }
    }
}

impl DrawSurface for FakeSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }
    fn resize(&mut self, size: SurfaceSize) -> BlobscapeResult<()> {
        self.size = size;
        self.resizes += 1;
        Ok(())
    }
    fn context(&mut self) -> Option<&mut dyn DrawContext> {
        if self.available {
            Some(&mut self.ctx)
        } else {
            None
        }
    }
}

#[derive(Default)]
struct Host {
    next: u64,
    frames: Vec<FrameHandle>,
    timers: Vec<TimerHandle>,
    cancelled: u32,
    cleared: u32,
}

impl FrameHost for Host {
    fn request_frame(&mut self) -> FrameHandle {
        self.next += 1;
        self.frames.push(FrameHandle(self.next));
        FrameHandle(self.next)
    }
    fn cancel_frame(&mut self, _handle: FrameHandle) {
        self.cancelled += 1;
    }
    fn set_timeout(&mut self, _delay_ms: f64) -> TimerHandle {
        self.next += 1;
        self.timers.push(TimerHandle(self.next));
        TimerHandle(self.next)
    }
    fn clear_timeout(&mut self, _handle: TimerHandle) {
        self.cleared += 1;
    }
}

fn mount(env: StaticEnv, surface: FakeSurface) -> BlobBackground<FakeSurface> {
    BlobBackground::mount(BlobBackgroundProps::default(), &env, surface).unwrap()
}

#[test]
fn mount_generates_and_paints_once() {
    let bg = mount(StaticEnv::with_cores(4), FakeSurface::new(400.0, 300.0, 1.0));
    assert_eq!(bg.field().len(), 3);
    assert_eq!(bg.scheduler_state(), SchedulerState::Idle);
    assert_eq!(bg.surface().ctx.composites, 1);
    assert_eq!(bg.surface().ctx.circles, 3);
}

#[test]
fn mount_rejects_invalid_props() {
    let props = BlobBackgroundProps {
        palette: Vec::new(),
        ..Default::default()
    };
    let err = BlobBackground::mount(props, &StaticEnv::default(), FakeSurface::new(1.0, 1.0, 1.0))
        .unwrap_err();
    assert!(matches!(err, crate::BlobscapeError::Validation(_)));
}

#[test]
fn mount_caps_device_pixel_ratio() {
    let bg = mount(StaticEnv::default(), FakeSurface::new(100.0, 100.0, 3.0));
    assert_eq!(bg.surface().size().device_pixel_ratio, 2.0);
    assert_eq!(bg.surface().resizes, 1);
}

#[test]
fn frames_tick_and_paint() {
    let mut host = Host::default();
    let mut bg = mount(StaticEnv::with_cores(8), FakeSurface::new(400.0, 300.0, 1.0));
    bg.handle_event(&mut host, HostEvent::Visibility { ratio: 1.0 })
        .unwrap();
    let before = bg.field().clone();

    let h = host.frames[0];
    bg.handle_event(
        &mut host,
        HostEvent::Frame {
            handle: h,
            timestamp_ms: 16.0,
        },
    )
    .unwrap();
    assert_eq!(bg.ticks(), 1);
    assert_ne!(bg.field(), &before);
    assert_eq!(bg.surface().ctx.composites, 2);
    assert_eq!(host.frames.len(), 2);
}

#[test]
fn missing_context_skips_render_but_keeps_ticking() {
    let mut host = Host::default();
    let mut bg = mount(StaticEnv::with_cores(8), FakeSurface::new(400.0, 300.0, 1.0));
    bg.surface_mut().available = false;
    bg.handle_event(&mut host, HostEvent::Visibility { ratio: 1.0 })
        .unwrap();
    let h = host.frames[0];
    bg.handle_event(
        &mut host,
        HostEvent::Frame {
            handle: h,
            timestamp_ms: 0.0,
        },
    )
    .unwrap();
    assert_eq!(bg.ticks(), 1);
    assert_eq!(bg.skipped_ticks(), 1);
    assert_eq!(bg.surface().ctx.composites, 1);
    assert_eq!(host.frames.len(), 2);
}

#[test]
fn debounced_resize_regenerates() {
    let mut host = Host::default();
    let mut bg = mount(StaticEnv::with_cores(4), FakeSurface::new(0.0, 0.0, 1.0));
    assert!(bg.field().is_empty());

    let size = SurfaceSize::new(800.0, 600.0, 1.0).unwrap();
    bg.handle_event(&mut host, HostEvent::Resize(size)).unwrap();
    assert!(bg.field().is_empty());

    let t = host.timers[0];
    bg.handle_event(&mut host, HostEvent::Timer { handle: t })
        .unwrap();
    assert_eq!(bg.surface().size(), size);
    assert_eq!(bg.field().len(), 3);
    assert!((bg.field().base_radius() - 120.0).abs() < 1e-9);
}

#[test]
fn same_size_regenerates_identically() {
    let a = mount(StaticEnv::with_cores(8), FakeSurface::new(640.0, 480.0, 1.0));
    let b = mount(StaticEnv::with_cores(8), FakeSurface::new(640.0, 480.0, 1.0));
    assert_eq!(a.field(), b.field());
}

#[test]
fn unmount_is_idempotent() {
    let mut host = Host::default();
    let mut bg = mount(StaticEnv::with_cores(8), FakeSurface::new(10.0, 10.0, 1.0));
    bg.handle_event(&mut host, HostEvent::Visibility { ratio: 1.0 })
        .unwrap();
    bg.unmount(&mut host);
    bg.unmount(&mut host);
    assert_eq!(host.cancelled, 1);
    assert_eq!(bg.scheduler_state(), SchedulerState::Idle);
}

#[test]
fn advance_never_ticks_under_reduced_motion_or_after_unmount() {
    let env = StaticEnv {
        hardware_concurrency: Some(8),
        prefers_reduced_motion: Some(true),
        ..StaticEnv::default()
    };
    let mut still = mount(env, FakeSurface::new(100.0, 100.0, 1.0));
    still.advance(NOMINAL_FRAME_MS).unwrap();
    assert_eq!(still.ticks(), 0);
    assert_eq!(still.surface().ctx.composites, 0);

    let mut host = Host::default();
    let mut bg = mount(StaticEnv::with_cores(8), FakeSurface::new(100.0, 100.0, 1.0));
    bg.advance(NOMINAL_FRAME_MS).unwrap();
    assert_eq!(bg.ticks(), 1);
    bg.unmount(&mut host);
    bg.advance(NOMINAL_FRAME_MS).unwrap();
    assert_eq!(bg.ticks(), 1);
}
