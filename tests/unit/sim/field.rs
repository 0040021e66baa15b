use super::*;

fn size(w: f64, h: f64) -> SurfaceSize {
    SurfaceSize::new(w, h, 1.0).unwrap()
}

fn single(center: Point, radius: f64, velocity: Vec2, nudge: Vec2, s: SurfaceSize) -> BlobField {
    BlobField {
        size: s,
        blobs: vec![Blob {
            center,
            radius,
            velocity,
            nudge,
            color: FALLBACK_COLOR,
        }],
    }
}

#[test]
fn regeneration_from_zero_to_800x600() {
    let mut field = BlobField::empty();
    assert!(field.is_empty());

    field.regenerate(size(800.0, 600.0), 4, &[], 1);
    assert_eq!(field.len(), 4);
    assert!((field.base_radius() - 120.0).abs() < 1e-9);
    for b in field.blobs() {
        assert!(b.radius >= 0.75 * 120.0 && b.radius <= 1.25 * 120.0, "{}", b.radius);
        assert!(b.is_within(800.0, 600.0, 1e-9));
    }
}

#[test]
fn empty_surface_gets_no_blobs() {
    let field = BlobField::generate(SurfaceSize::ZERO, 4, &[], 3);
    assert!(field.is_empty());
    let field = BlobField::generate(size(100.0, 0.0), 4, &[], 3);
    assert!(field.is_empty());
}

#[test]
fn generation_is_deterministic_per_seed() {
    let s = size(640.0, 480.0);
    let a = BlobField::generate(s, 3, &[], 9);
    let b = BlobField::generate(s, 3, &[], 9);
    assert_eq!(a, b);

    let c = BlobField::generate(s, 3, &[], 10);
    assert_eq!(c.len(), a.len());
    assert_ne!(c, a);
}

#[test]
fn palette_cycles_through_blobs() {
    let red = Rgba8Premul {
        r: 255,
        g: 0,
        b: 0,
        a: 255,
    };
    let blue = Rgba8Premul {
        r: 0,
        g: 0,
        b: 255,
        a: 255,
    };
    let field = BlobField::generate(size(300.0, 300.0), 3, &[red, blue], 0);
    let colors: Vec<_> = field.blobs().iter().map(|b| b.color).collect();
    assert_eq!(colors, vec![red, blue, red]);
}

#[test]
fn clamp_holds_after_many_ticks_for_every_tier_count() {
    for count in [2usize, 3, 4] {
        for seed in 0..8u64 {
            let (w, h) = (800.0, 600.0);
            let mut field = BlobField::generate(size(w, h), count, &[], seed);
            let radii: Vec<f64> = field.blobs().iter().map(|b| b.radius).collect();
            for i in 0..2000 {
                // Mix of regular, long and tiny frames.
                let dt = match i % 5 {
                    0 => 100.0,
                    1 => 1.0,
                    _ => NOMINAL_FRAME_MS,
                };
                field.step(dt);
                for b in field.blobs() {
                    assert!(b.is_within(w, h, 1e-9), "count={count} seed={seed} {b:?}");
                }
            }
            let after: Vec<f64> = field.blobs().iter().map(|b| b.radius).collect();
            assert_eq!(radii, after);
            assert_eq!(field.len(), count);
        }
    }
}

#[test]
fn displacement_scales_linearly_with_elapsed_time() {
    let s = size(1000.0, 1000.0);
    let start = Point::new(500.0, 500.0);
    let vel = Vec2::new(0.6, -0.4);
    let nudge = Vec2::new(0.02, 0.01);

    let mut a = single(start, 10.0, vel, nudge, s);
    let mut b = single(start, 10.0, vel, nudge, s);
    a.step(NOMINAL_FRAME_MS);
    b.step(2.0 * NOMINAL_FRAME_MS);

    let da = a.blobs()[0].center - start;
    let db = b.blobs()[0].center - start;
    assert!((db.x - 2.0 * da.x).abs() < 1e-12);
    assert!((db.y - 2.0 * da.y).abs() < 1e-12);
    assert!((da.x - 0.62).abs() < 1e-12);
    assert!((da.y + 0.39).abs() < 1e-12);
}

#[test]
fn zero_negative_and_nan_elapsed_do_not_move() {
    let s = size(100.0, 100.0);
    let start = Point::new(50.0, 50.0);
    let mut f = single(start, 5.0, Vec2::new(1.0, 1.0), Vec2::ZERO, s);
    f.step(0.0);
    f.step(-16.0);
    f.step(f64::NAN);
    f.step(f64::INFINITY);
    assert_eq!(f.blobs()[0].center, start);
}

#[test]
fn wall_bounce_reflects_damps_and_clamps() {
    let s = size(100.0, 100.0);
    let mut f = single(
        Point::new(89.0, 50.0),
        10.0,
        Vec2::new(5.0, 0.0),
        Vec2::new(0.01, 0.0),
        s,
    );
    f.step(NOMINAL_FRAME_MS);
    let b = f.blobs()[0];
    assert_eq!(b.center.x, 90.0);
    assert!((b.velocity.x + 5.0 * BOUNCE_DAMPING).abs() < 1e-12);
    assert!(b.nudge.x < 0.0);

    let mut f = single(
        Point::new(50.0, 11.0),
        10.0,
        Vec2::new(0.0, -3.0),
        Vec2::ZERO,
        s,
    );
    f.step(NOMINAL_FRAME_MS);
    let b = f.blobs()[0];
    assert_eq!(b.center.y, 10.0);
    assert!((b.velocity.y - 3.0 * BOUNCE_DAMPING).abs() < 1e-12);
}

#[test]
fn huge_step_cannot_tunnel_through_a_wall() {
    let s = size(200.0, 200.0);
    let mut f = single(
        Point::new(100.0, 100.0),
        20.0,
        Vec2::new(1.0, -1.0),
        Vec2::ZERO,
        s,
    );
    f.step(NOMINAL_FRAME_MS * 10_000.0);
    assert!(f.blobs()[0].is_within(200.0, 200.0, 1e-9));
}

#[test]
fn axis_shorter_than_diameter_pins_to_middle() {
    let s = size(30.0, 500.0);
    let mut f = single(
        Point::new(15.0, 250.0),
        20.0,
        Vec2::new(2.0, 0.0),
        Vec2::ZERO,
        s,
    );
    f.step(NOMINAL_FRAME_MS);
    assert_eq!(f.blobs()[0].center.x, 15.0);
    assert!(f.blobs()[0].is_within(30.0, 500.0, 1e-9));
}
