use super::*;
use crate::surface::RasterSurface;

fn white(size: u32) -> Image {
    let mut img = Image::new(size, size, PixelFormat::Argb32Premultiplied).unwrap();
    img.fill32(0xffff_ffff);
    img
}

fn hard_black(offset: Vec2) -> DropShadowFilter {
    DropShadowFilter::new(offset, 0.0, Rgba8Premul::opaque(0, 0, 0)).unwrap()
}

#[test]
fn defaults() {
    let f = DropShadowFilter::default();
    assert_eq!(f.offset(), Vec2::new(8.0, 8.0));
    assert_eq!(f.radius(), 1.0);
    assert_eq!(f.color(), Rgba8Premul::from_straight_rgba(63, 63, 63, 180));
    assert_eq!(f.hint(), BlurHint::Performance);
}

#[test]
fn bounding_rect_covers_source_and_blurred_shadow() {
    let r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert_eq!(
        DropShadowFilter::default().bounding_rect(r),
        Rect::new(0.0, 0.0, 19.0, 19.0)
    );
    assert_eq!(
        hard_black(Vec2::new(-3.0, 0.0)).bounding_rect(r),
        Rect::new(-3.0, 0.0, 10.0, 10.0)
    );
}

#[test]
fn unblurred_shadow_is_the_shifted_coverage() {
    let out = hard_black(Vec2::new(2.0, 2.0)).shadow(&white(10)).unwrap();
    assert_eq!(out.offset, Vec2::ZERO);
    assert_eq!((out.image.width(), out.image.height()), (12, 12));
    for y in 0..12 {
        for x in 0..12 {
            let want = if x >= 2 && y >= 2 { 0xff00_0000 } else { 0 };
            assert_eq!(out.image.pixel32(x, y), want, "({x}, {y})");
        }
    }
}

#[test]
fn apply_puts_source_over_shadow() {
    let out = hard_black(Vec2::new(2.0, 2.0)).apply(&white(10)).unwrap();
    assert_eq!(out.image.pixel32(5, 5), 0xffff_ffff);
    assert_eq!(out.image.pixel32(11, 11), 0xff00_0000);
    assert_eq!(out.image.pixel32(11, 0), 0);
    assert_eq!(out.image.pixel32(0, 11), 0);
}

#[test]
fn negative_offset_moves_the_buffer_origin() {
    let out = hard_black(Vec2::new(-3.0, 0.0)).shadow(&white(4)).unwrap();
    assert_eq!(out.offset, Vec2::new(-3.0, 0.0));
    assert_eq!(out.image.width(), 7);
    assert_eq!(out.image.pixel32(0, 0), 0xff00_0000);
    assert_eq!(out.image.pixel32(6, 0), 0);
}

#[test]
fn blurred_shadow_spreads_past_the_coverage() {
    let f = DropShadowFilter::new(Vec2::ZERO, 2.0, Rgba8Premul::opaque(0, 0, 0)).unwrap();
    let out = f.shadow(&white(10)).unwrap();
    assert_eq!(out.offset, Vec2::new(-2.0, -2.0));
    assert_eq!((out.image.width(), out.image.height()), (14, 14));
    let center = out.image.pixel32(7, 7) >> 24;
    let corner = out.image.pixel32(0, 0) >> 24;
    assert!(center > 200, "center alpha {center}");
    assert!(corner < center);
    assert_eq!(out.image.pixel32(7, 7) & 0x00ff_ffff, 0);
}

#[test]
fn draw_paints_shadow_then_source() {
    let mut surface = RasterSurface::new(16, 16).unwrap();
    hard_black(Vec2::new(2.0, 2.0))
        .draw(&mut surface, Point::new(1.0, 1.0), &white(10), None)
        .unwrap();
    let img = surface.image();
    assert_eq!(img.pixel32(0, 0), 0);
    assert_eq!(img.pixel32(5, 5), 0xffff_ffff);
    assert_eq!(img.pixel32(12, 12), 0xff00_0000);
    assert_eq!(img.pixel32(13, 13), 0);
}

#[test]
fn draw_respects_source_rect() {
    let mut surface = RasterSurface::new(8, 8).unwrap();
    hard_black(Vec2::new(1.0, 0.0))
        .draw(
            &mut surface,
            Point::ORIGIN,
            &white(10),
            Some(IntRect::new(0, 0, 2, 2)),
        )
        .unwrap();
    let img = surface.image();
    assert_eq!(img.pixel32(1, 1), 0xffff_ffff);
    assert_eq!(img.pixel32(2, 1), 0xff00_0000);
    assert_eq!(img.pixel32(3, 1), 0);
}

#[test]
fn invalid_parameters_are_rejected() {
    let mut f = DropShadowFilter::default();
    assert!(f.set_radius(-1.0).is_err());
    assert!(f.set_offset(Vec2::new(f64::INFINITY, 0.0)).is_err());
    assert_eq!(f, DropShadowFilter::default());
}
