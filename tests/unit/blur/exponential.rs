use super::*;

fn argb(width: u32, height: u32, f: impl Fn(u32, u32) -> u32) -> Image {
    let px: Vec<u32> = (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| f(x, y))
        .collect();
    Image::from_pixels(width, height, PixelFormat::Argb32Premultiplied, &px).unwrap()
}

#[test]
fn alpha_is_max_at_zero_radius_and_shrinks_with_radius() {
    assert_eq!(blur_alpha::<12>(0.0), 4096);
    let a1 = blur_alpha::<12>(1.0);
    let a4 = blur_alpha::<12>(4.0);
    let a16 = blur_alpha::<12>(16.0);
    assert!(a1 < 4096 && a1 > a4 && a4 > a16 && a16 > 0);
}

#[test]
fn constant_image_is_unchanged() {
    let img = argb(7, 5, |_, _| 0xff20_4080);
    for quality in [false, true] {
        let out = expblur::<12, 10>(img.clone(), 3.0, quality, false, Transposed::None).unwrap();
        assert_eq!(out, img);
    }
}

#[test]
fn impulse_spreads_to_neighbours() {
    let img = argb(9, 9, |x, y| if (x, y) == (4, 4) { 0xffff_ffff } else { 0 });
    let out = expblur::<12, 10>(img, 3.0, false, false, Transposed::None).unwrap();
    assert!(out.pixel32(4, 4) >> 24 < 0xff);
    assert!(out.pixel32(3, 4) >> 24 > 0);
    assert!(out.pixel32(4, 5) >> 24 > 0);
    assert!(out.pixel32(5, 3) >> 24 > 0);
}

#[test]
fn alpha_only_leaves_color_bytes() {
    let img = argb(6, 6, |x, y| {
        if (x, y) == (3, 3) {
            0xff12_3456
        } else {
            0x0012_3456
        }
    });
    let out = expblur::<12, 10>(img, 2.0, false, true, Transposed::None).unwrap();
    for y in 0..6 {
        for x in 0..6 {
            assert_eq!(out.pixel32(x, y) & 0x00ff_ffff, 0x0012_3456);
        }
    }
    assert!(out.pixel32(2, 3) >> 24 > 0);
}

#[test]
fn forward_transposed_result_is_the_turned_plain_result() {
    let img = argb(5, 3, |x, y| 0xff00_0000 | (x * 40) << 8 | y * 70);
    let plain = expblur::<12, 10>(img.clone(), 1.5, false, false, Transposed::None).unwrap();
    let forward = expblur::<12, 10>(img, 1.5, false, false, Transposed::Forward).unwrap();
    assert_eq!((forward.width(), forward.height()), (3, 5));
    assert_eq!(
        forward,
        plain.rotated(RotationDirection::Rotate270).unwrap()
    );
}

#[test]
fn gray_images_blur_in_place() {
    let img = Image::from_pixels(4, 1, PixelFormat::Gray8, &[0u8, 0, 255, 0]).unwrap();
    let out = expblur::<12, 10>(img, 1.0, false, false, Transposed::None).unwrap();
    let row = out.row(0);
    assert!(row[1] > 0 && row[3] > 0 && row[2] < 255);
}

#[test]
fn sixteen_bit_images_are_rejected() {
    let img = Image::new(2, 2, PixelFormat::Rgb16).unwrap();
    let result = expblur::<12, 10>(img, 1.0, false, false, Transposed::None);
    assert!(result.is_err());
}
