use super::*;
use crate::foundation::core::{Point, SurfaceSize};

#[derive(Debug, PartialEq)]
enum Call {
    Clear,
    Blur(f64),
    Circle(Point, f64),
    Composite(Rgba8Premul, f32),
}

#[derive(Default)]
struct Recorder {
    calls: Vec<Call>,
}

impl DrawContext for Recorder {
    fn clear(&mut self) {
        self.calls.push(Call::Clear);
    }

    fn set_blur(&mut self, sigma_px: f64) {
        self.calls.push(Call::Blur(sigma_px));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, _color: Rgba8Premul) {
        self.calls.push(Call::Circle(center, radius));
    }

    fn composite_threshold(
        &mut self,
        fill: Rgba8Premul,
        alpha_cutoff: f32,
    ) -> BlobscapeResult<()> {
        self.calls.push(Call::Composite(fill, alpha_cutoff));
        Ok(())
    }
}

fn opts() -> RenderOpts {
    RenderOpts {
        blur_px: 16.0,
        fill: Rgba8Premul {
            r: 1,
            g: 2,
            b: 3,
            a: 255,
        },
        alpha_cutoff: 0.5,
    }
}

#[test]
fn draws_every_blob_between_clear_and_composite() {
    let size = SurfaceSize::new(400.0, 300.0, 1.0).unwrap();
    let field = BlobField::generate(size, 3, &[], 5);
    let mut rec = Recorder::default();
    render_field(&field, &mut rec, &opts()).unwrap();

    assert_eq!(rec.calls.len(), 6);
    assert_eq!(rec.calls[0], Call::Clear);
    assert_eq!(rec.calls[1], Call::Blur(16.0));
    for (call, blob) in rec.calls[2..5].iter().zip(field.blobs()) {
        assert_eq!(*call, Call::Circle(blob.center, blob.radius));
    }
    assert_eq!(rec.calls[5], Call::Composite(opts().fill, 0.5));
}

#[test]
fn empty_field_only_clears() {
    let mut rec = Recorder::default();
    render_field(&BlobField::empty(), &mut rec, &opts()).unwrap();
    assert_eq!(rec.calls, vec![Call::Clear]);
}
