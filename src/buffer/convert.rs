use crate::buffer::image::Image;
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{RasterError, RasterResult};
use crate::foundation::math::gray;
use crate::pixel::element::{FromPixel, Pixel, Rgb24};
use crate::pixel::format::PixelFormat;

fn premultiply_argb32(v: u32) -> u32 {
    let a = (v >> 24) as u8;
    if a == 255 {
        return v;
    }
    Rgba8Premul::from_straight_rgba((v >> 16) as u8, (v >> 8) as u8, v as u8, a).to_argb32()
}

fn unpremultiply_argb32(v: u32) -> u32 {
    let a = v >> 24;
    if a == 255 {
        return v;
    }
    if a == 0 {
        return 0;
    }
    let un = |c: u32| ((c * 255 + a / 2) / a).min(255);
    (a << 24) | (un((v >> 16) & 0xff) << 16) | (un((v >> 8) & 0xff) << 8) | un(v & 0xff)
}

/// Decode pixel `x` of a row into premultiplied `0xAARRGGBB`.
fn read_premul(format: PixelFormat, row: &[u8], x: usize) -> u32 {
    let bytes = &row[x * format.bytes_per_pixel()..];
    match format {
        PixelFormat::Gray8 => {
            let g = u32::from(bytes[0]);
            0xff00_0000 | (g << 16) | (g << 8) | g
        }
        PixelFormat::Rgb16 => u32::from_pixel(u16::read(bytes)),
        PixelFormat::Rgb24 => u32::from_pixel(Rgb24::read(bytes)),
        PixelFormat::Rgb32 => 0xff00_0000 | u32::read(bytes),
        PixelFormat::Argb32 => premultiply_argb32(u32::read(bytes)),
        PixelFormat::Argb32Premultiplied => u32::read(bytes),
    }
}

/// Encode premultiplied `0xAARRGGBB` as pixel `x` of a row in `format`.
fn write_premul(format: PixelFormat, row: &mut [u8], x: usize, v: u32) {
    let bytes = &mut row[x * format.bytes_per_pixel()..];
    match format {
        PixelFormat::Argb32Premultiplied => v.write(bytes),
        PixelFormat::Argb32 => unpremultiply_argb32(v).write(bytes),
        PixelFormat::Rgb32 => (0xff00_0000 | unpremultiply_argb32(v)).write(bytes),
        PixelFormat::Rgb16 => u16::from_pixel(unpremultiply_argb32(v)).write(bytes),
        PixelFormat::Rgb24 => Rgb24::from_pixel(unpremultiply_argb32(v)).write(bytes),
        PixelFormat::Gray8 => {
            let s = unpremultiply_argb32(v);
            gray((s >> 16) as u8, (s >> 8) as u8, s as u8).write(bytes);
        }
    }
}

impl Image {
    /// Convert into another pixel format, going through premultiplied ARGB32.
    ///
    /// Formats without alpha come out opaque; converting to them drops alpha.
    pub fn convert_to(&self, format: PixelFormat) -> RasterResult<Image> {
        if format == self.format() {
            return Ok(self.clone());
        }
        let mut out = Image::new(self.width(), self.height(), format)?;
        for y in 0..self.height() {
            let src = self.row(y);
            let dst = out.row_mut(y);
            for x in 0..self.width() as usize {
                write_premul(format, dst, x, read_premul(self.format(), src, x));
            }
        }
        Ok(out)
    }

    /// Build a premultiplied ARGB32 image from tightly packed straight-alpha RGBA8.
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> RasterResult<Image> {
        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| RasterError::validation("rgba8 buffer size overflow"))?;
        if rgba.len() != expected_len {
            return Err(RasterError::validation(
                "from_rgba8 expects src matching width*height*4",
            ));
        }
        let mut out = Image::new(width, height, PixelFormat::Argb32Premultiplied)?;
        for (i, px) in rgba.chunks_exact(4).enumerate() {
            let x = (i % width as usize) as u32;
            let y = (i / width as usize) as u32;
            let c = Rgba8Premul::from_straight_rgba(px[0], px[1], px[2], px[3]);
            out.set_pixel32(x, y, c.to_argb32());
        }
        Ok(out)
    }

    /// Tightly packed straight-alpha RGBA8 copy of the image.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width() as usize * self.height() as usize * 4);
        for y in 0..self.height() {
            let row = self.row(y);
            for x in 0..self.width() as usize {
                let v = unpremultiply_argb32(read_premul(self.format(), row, x));
                out.extend_from_slice(&[(v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8]);
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/convert.rs"]
mod tests;
