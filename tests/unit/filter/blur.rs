use super::*;

#[test]
fn default_radius_and_bounds() {
    let f = BlurFilter::default();
    assert_eq!(f.radius(), 5.0);
    assert_eq!(
        f.bounding_rect(Rect::new(0.0, 0.0, 4.0, 4.0)),
        Rect::new(-5.0, -5.0, 9.0, 9.0)
    );
    assert!(BlurFilter::new(-0.5, BlurHint::Performance).is_err());
}

#[test]
fn zero_radius_is_identity() {
    let mut src = Image::new(3, 2, PixelFormat::Argb32Premultiplied).unwrap();
    src.fill32(0x8040_2010);
    let out = BlurFilter::new(0.0, BlurHint::Performance)
        .unwrap()
        .apply(&src)
        .unwrap();
    assert_eq!(out.offset, Vec2::ZERO);
    assert_eq!(out.image, src);
}

#[test]
fn output_is_padded_by_the_radius() {
    let mut src = Image::new(4, 4, PixelFormat::Argb32Premultiplied).unwrap();
    src.fill32(0xffff_ffff);
    let out = BlurFilter::new(2.0, BlurHint::Quality)
        .unwrap()
        .apply(&src)
        .unwrap();
    assert_eq!(out.offset, Vec2::new(-2.0, -2.0));
    assert_eq!((out.image.width(), out.image.height()), (8, 8));
    let center = out.image.pixel32(4, 4) >> 24;
    let corner = out.image.pixel32(0, 0) >> 24;
    assert!(center > corner, "{center} vs {corner}");
}
