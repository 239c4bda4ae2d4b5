use super::*;

#[test]
fn new_pads_rows_to_four_bytes() {
    let img = Image::new(5, 3, PixelFormat::Gray8).unwrap();
    assert_eq!(img.stride(), 8);
    assert_eq!(img.data().len(), 24);
    assert!(img.data().iter().all(|&b| b == 0));

    let img = Image::new(3, 2, PixelFormat::Rgb24).unwrap();
    assert_eq!(img.stride(), 12);
}

#[test]
fn from_raw_validates_geometry() {
    let format = PixelFormat::Argb32Premultiplied;
    assert!(Image::from_raw(4, 4, 8, format, vec![0; 64]).is_err());
    assert!(Image::from_raw(4, 4, 16, format, vec![0; 63]).is_err());
    assert!(Image::from_raw(4, 4, 16, format, vec![0; 64]).is_ok());
}

#[test]
fn from_pixels_rejects_mismatched_element_width() {
    let err = Image::from_pixels(2, 1, PixelFormat::Rgb16, &[1u32, 2]).unwrap_err();
    assert!(matches!(err, RasterError::Validation(_)));
    let err = Image::from_pixels(2, 2, PixelFormat::Gray8, &[1u8, 2, 3]).unwrap_err();
    assert!(matches!(err, RasterError::Validation(_)));
}

#[test]
fn typed_plane_reads_what_from_pixels_wrote() {
    let img = Image::from_pixels(2, 2, PixelFormat::Rgb16, &[10u16, 20, 30, 40]).unwrap();
    let plane = img.plane::<u16>().unwrap();
    assert_eq!(plane.get(1, 1), 40);
    assert!(img.plane::<u32>().is_err());
}

#[test]
fn pixel32_accessors_and_fill() {
    let mut img = Image::new(3, 2, PixelFormat::Argb32Premultiplied).unwrap();
    img.fill32(0xff00_ff00);
    img.set_pixel32(2, 1, 0x8040_2010);
    assert_eq!(img.pixel32(0, 0), 0xff00_ff00);
    assert_eq!(img.pixel32(2, 1), 0x8040_2010);
    assert_eq!(img.row(1)[8..12], [0x10, 0x20, 0x40, 0x80]);
}

#[test]
fn packed_bytes_strip_padding() {
    let img = Image::from_raw(2, 2, 4, PixelFormat::Gray8, vec![1, 2, 99, 99, 3, 4]).unwrap();
    assert_eq!(img.to_packed_bytes(), vec![1, 2, 3, 4]);
}

#[test]
fn cropped_clips_to_bounds() {
    let img = Image::from_pixels(3, 3, PixelFormat::Gray8, &[0u8, 1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
    let c = img.cropped(IntRect::new(1, 1, 5, 5)).unwrap();
    assert_eq!((c.width(), c.height()), (2, 2));
    assert_eq!(c.to_packed_bytes(), vec![4, 5, 7, 8]);
    let empty = img.cropped(IntRect::new(-4, 0, 2, 2)).unwrap();
    assert!(empty.is_empty());
}
