use super::element::{FromPixel, Pixel, Rgb24};
use super::format::PixelFormat;

#[test]
fn pack_factors_follow_element_width() {
    assert_eq!(<u8 as Pixel>::PACK, 4);
    assert_eq!(<u16 as Pixel>::PACK, 2);
    assert_eq!(<u32 as Pixel>::PACK, 1);
    assert_eq!(<Rgb24 as Pixel>::PACK, 0);
}

#[test]
fn elements_are_little_endian() {
    let mut buf = [0u8; 4];
    0x1234u16.write(&mut buf);
    assert_eq!(buf[..2], [0x34, 0x12]);
    assert_eq!(u16::read(&buf), 0x1234);

    0xAABB_CCDDu32.write(&mut buf);
    assert_eq!(buf, [0xDD, 0xCC, 0xBB, 0xAA]);
    assert_eq!(u32::read(&buf), 0xAABB_CCDD);

    Rgb24([1, 2, 3]).write(&mut buf);
    assert_eq!(Rgb24::read(&buf), Rgb24([1, 2, 3]));
    assert_eq!(Rgb24([1, 2, 3]).bits(), 0x0003_0201);
}

#[test]
fn rgb565_conversions_keep_extremes() {
    assert_eq!(<u16 as FromPixel<u32>>::from_pixel(0xffff_ffff), 0xffff);
    assert_eq!(<u16 as FromPixel<u32>>::from_pixel(0xff00_0000), 0x0000);
    assert_eq!(<u16 as FromPixel<u32>>::from_pixel(0xffff_0000), 0xf800);
    assert_eq!(<u32 as FromPixel<u16>>::from_pixel(0xffff), 0xffff_ffff);
    assert_eq!(<u32 as FromPixel<u16>>::from_pixel(0xf800), 0xffff_0000);
    assert_eq!(<u32 as FromPixel<u16>>::from_pixel(0x0000), 0xff00_0000);
}

#[test]
fn rgb24_conversions_roundtrip_color() {
    let p = <Rgb24 as FromPixel<u32>>::from_pixel(0x8011_2233);
    assert_eq!(p, Rgb24([0x11, 0x22, 0x33]));
    assert_eq!(<u32 as FromPixel<Rgb24>>::from_pixel(p), 0xff11_2233);
}

#[test]
fn identity_conversion_is_noop() {
    assert_eq!(<u8 as FromPixel<u8>>::from_pixel(7), 7);
    assert_eq!(
        <u32 as FromPixel<u32>>::from_pixel(0xdead_beef),
        0xdead_beef
    );
}

#[test]
fn format_widths() {
    let widths: Vec<usize> = PixelFormat::ALL
        .iter()
        .map(|f| f.bytes_per_pixel())
        .collect();
    assert_eq!(widths, vec![1, 2, 3, 4, 4, 4]);
    assert_eq!(PixelFormat::Rgb24.depth(), 24);
    assert!(PixelFormat::Argb32Premultiplied.has_alpha());
    assert!(!PixelFormat::Rgb32.has_alpha());
}
