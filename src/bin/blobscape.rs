use std::path::{Path, PathBuf};

use anyhow::Context as _;
use blobscape::{
    AnimationConfig, BlobBackground, BlobBackgroundProps, Capabilities, CpuSurface, EnvProbe,
    FrameRGBA, HostEvent, NOMINAL_FRAME_MS, StaticEnv, SurfaceSize, SystemEnv, VirtualHost,
    config_for_tier,
};
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "blobscape", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the detected capabilities and the animation config they map to, as JSON.
    Probe(EnvArgs),
    /// Simulate a number of ticks and write the last frame as a PNG.
    Frame(FrameArgs),
    /// Drive the virtual event loop for a while and write every painted frame as a PNG.
    Run(RunArgs),
}

#[derive(Args, Debug)]
struct EnvArgs {
    /// Override the detected core count.
    #[arg(long)]
    cores: Option<u32>,

    /// Force the reduced-motion preference on.
    #[arg(long)]
    reduced_motion: bool,
}

#[derive(Args, Debug)]
struct SurfaceArgs {
    #[command(flatten)]
    env: EnvArgs,

    /// Props JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical surface width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Logical surface height.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Ticks of one nominal frame each to simulate before capturing.
    #[arg(long, default_value_t = 60)]
    ticks: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Virtual time to run for, in milliseconds.
    #[arg(long, default_value_t = 1000.0)]
    duration_ms: f64,

    /// Hide the surface at this time (stops the animation).
    #[arg(long)]
    hide_at_ms: Option<f64>,

    /// Output directory for `frame_NNNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(serde::Serialize)]
struct ProbeReport {
    capabilities: Capabilities,
    config: AnimationConfig,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Probe(args) => cmd_probe(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn make_env(args: &EnvArgs, viewport: Option<(f64, f64)>, dpr: Option<f64>) -> StaticEnv {
    let sys = SystemEnv;
    StaticEnv {
        viewport: viewport.or_else(|| sys.viewport()),
        device_pixel_ratio: dpr.or_else(|| sys.device_pixel_ratio()),
        hardware_concurrency: args.cores.or_else(|| sys.hardware_concurrency()),
        device_memory_gb: sys.device_memory_gb(),
        prefers_reduced_motion: if args.reduced_motion {
            Some(true)
        } else {
            sys.prefers_reduced_motion()
        },
        touch_capable: sys.touch_capable(),
    }
}

fn cmd_probe(args: EnvArgs) -> anyhow::Result<()> {
    let caps = Capabilities::detect(&make_env(&args, None, None));
    let report = ProbeReport {
        capabilities: caps,
        config: config_for_tier(caps.tier),
    };
    let json = serde_json::to_string_pretty(&report).context("serialize probe report")?;
    println!("{json}");
    Ok(())
}

fn mount(args: &SurfaceArgs) -> anyhow::Result<BlobBackground<CpuSurface>> {
    let props = match &args.config {
        Some(path) => BlobBackgroundProps::from_path(path)
            .with_context(|| format!("load props '{}'", path.display()))?,
        None => BlobBackgroundProps::default(),
    };
    let size = SurfaceSize::new(args.width, args.height, args.dpr).context("surface size")?;
    let env = make_env(&args.env, Some((args.width, args.height)), Some(args.dpr));
    let surface = CpuSurface::new(size.with_dpr_cap(props.max_device_pixel_ratio))
        .context("allocate surface")?;
    BlobBackground::mount(props, &env, surface).context("mount background")
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut bg = mount(&args.surface)?;
    for _ in 0..args.ticks {
        bg.advance(NOMINAL_FRAME_MS)?;
    }
    let frame = bg
        .surface()
        .frame()
        .context("surface has no pixels (zero-sized?)")?;
    write_png(&args.out, &frame)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let mut bg = mount(&args.surface)?;
    let mut host = VirtualHost::default();
    host.post(HostEvent::Visibility { ratio: 1.0 });
    if let Some(at) = args.hide_at_ms {
        host.post_at(at, HostEvent::Visibility { ratio: 0.0 });
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0u64;
    while let Some(event) = host.next_event_before(args.duration_ms) {
        let before = bg.ticks();
        bg.handle_event(&mut host, event)?;
        if bg.ticks() != before
            && let Some(frame) = bg.surface().frame()
        {
            let path = args.out_dir.join(format!("frame_{written:05}.png"));
            write_png(&path, &frame)?;
            written += 1;
        }
    }
    bg.unmount(&mut host);

    let stats = host.stats();
    eprintln!(
        "ran {:.0} ms: {} ticks, {} frames requested, {} cancelled, wrote {} png(s) to {}",
        host.now_ms(),
        bg.ticks(),
        stats.frames_requested,
        stats.frames_cancelled,
        written,
        args.out_dir.display()
    );
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let straight = frame.to_straight();
    image::save_buffer_with_format(
        path,
        &straight.data,
        straight.width,
        straight.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
