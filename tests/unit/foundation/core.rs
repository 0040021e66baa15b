use super::*;

#[test]
fn surface_size_rejects_bad_inputs() {
    assert!(SurfaceSize::new(-1.0, 10.0, 1.0).is_err());
    assert!(SurfaceSize::new(10.0, f64::NAN, 1.0).is_err());
    assert!(SurfaceSize::new(10.0, 10.0, 0.0).is_err());
    assert!(SurfaceSize::new(0.0, 0.0, 2.0).is_ok());
}

#[test]
fn pixel_dims_round_up_with_dpr() {
    let s = SurfaceSize::new(100.5, 40.0, 2.0).unwrap();
    assert_eq!(s.pixel_dims(), (201, 80));

    let s = SurfaceSize::new(10.2, 10.0, 1.0).unwrap();
    assert_eq!(s.pixel_dims(), (11, 10));

    assert_eq!(SurfaceSize::ZERO.pixel_dims(), (0, 0));
}

#[test]
fn dpr_cap_keeps_logical_size() {
    let s = SurfaceSize::new(800.0, 600.0, 3.0).unwrap().with_dpr_cap(2.0);
    assert_eq!(s.width, 800.0);
    assert_eq!(s.height, 600.0);
    assert_eq!(s.device_pixel_ratio, 2.0);
    assert_eq!(s.pixel_dims(), (1600, 1200));
}

#[test]
fn empty_and_min_side() {
    assert!(SurfaceSize::ZERO.is_empty());
    let s = SurfaceSize::new(800.0, 600.0, 1.0).unwrap();
    assert!(!s.is_empty());
    assert_eq!(s.min_side(), 600.0);
}

#[test]
fn premul_conversion_and_scaling() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.a, 128);
    assert_eq!(c.r, 128);
    assert_eq!(c.b, 0);

    let opaque = Rgba8Premul::from_straight_rgba(10, 20, 30, 255);
    assert_eq!(opaque.to_array(), [10, 20, 30, 255]);
    assert_eq!(opaque.scaled(255), opaque);
    assert_eq!(opaque.scaled(0), Rgba8Premul::TRANSPARENT);
}
