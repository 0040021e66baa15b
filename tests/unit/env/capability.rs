use super::*;

#[test]
fn tier_thresholds() {
    assert_eq!(classify_tier(Some(1)), PerformanceTier::Low);
    assert_eq!(classify_tier(Some(2)), PerformanceTier::Low);
    assert_eq!(classify_tier(Some(3)), PerformanceTier::Medium);
    assert_eq!(classify_tier(Some(4)), PerformanceTier::Medium);
    assert_eq!(classify_tier(Some(5)), PerformanceTier::Medium);
    assert_eq!(classify_tier(Some(6)), PerformanceTier::High);
    assert_eq!(classify_tier(Some(8)), PerformanceTier::High);
    assert_eq!(classify_tier(None), PerformanceTier::High);
}

#[test]
fn unavailable_queries_fall_back_to_defaults() {
    let caps = Capabilities::detect(&StaticEnv::default());
    assert_eq!(caps, Capabilities::default());
    assert!(caps.animates());
    assert_eq!(caps.viewport_size(), SurfaceSize::ZERO);
}

#[test]
fn zero_cores_counts_as_unknown() {
    let caps = Capabilities::detect(&StaticEnv::with_cores(0));
    assert_eq!(caps.cores, None);
    assert_eq!(caps.tier, PerformanceTier::High);
}

#[test]
fn reduced_motion_disables_animation() {
    let env = StaticEnv {
        prefers_reduced_motion: Some(true),
        ..StaticEnv::with_cores(8)
    };
    let caps = Capabilities::detect(&env);
    assert!(caps.reduced_motion);
    assert!(!caps.animates());
}

#[test]
fn bogus_dpr_and_viewport_are_ignored() {
    let env = StaticEnv {
        viewport: Some((f64::NAN, 10.0)),
        device_pixel_ratio: Some(-2.0),
        device_memory_gb: Some(0.0),
        ..StaticEnv::default()
    };
    let caps = Capabilities::detect(&env);
    assert_eq!(caps.viewport, None);
    assert_eq!(caps.device_pixel_ratio, 1.0);
    assert_eq!(caps.memory_gb, None);
}

#[test]
fn viewport_size_carries_dpr() {
    let env = StaticEnv {
        viewport: Some((1280.0, 720.0)),
        device_pixel_ratio: Some(2.0),
        touch_capable: Some(true),
        ..StaticEnv::with_cores(4)
    };
    let caps = Capabilities::detect(&env);
    assert_eq!(caps.tier, PerformanceTier::Medium);
    assert!(caps.touch);
    let size = caps.viewport_size();
    assert_eq!(size.pixel_dims(), (2560, 1440));
}

#[test]
fn reduced_motion_env_values() {
    assert!(parse_reduced_motion("1"));
    assert!(parse_reduced_motion(" TRUE "));
    assert!(parse_reduced_motion("reduce"));
    assert!(!parse_reduced_motion("0"));
    assert!(!parse_reduced_motion("no-preference"));
}

#[test]
fn system_env_reports_cores() {
    let cores = SystemEnv.hardware_concurrency();
    assert!(cores.is_some_and(|n| n >= 1));
}
