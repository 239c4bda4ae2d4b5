use crate::buffer::image::Image;
use crate::foundation::error::{RasterError, RasterResult};
use crate::foundation::math::{avg_argb32, avg_rgb565};
use crate::pixel::element::Pixel;
use crate::pixel::format::PixelFormat;

fn half_scale_with<P: Pixel>(
    src: &Image,
    out: &mut Image,
    avg4: impl Fn(P, P, P, P) -> P,
) -> RasterResult<()> {
    let src = src.plane::<P>()?;
    let mut dst = out.plane_mut::<P>()?;
    for y in 0..dst.height() {
        for x in 0..dst.width() {
            let (sx, sy) = (2 * x, 2 * y);
            let v = avg4(
                src.get(sx, sy),
                src.get(sx + 1, sy),
                src.get(sx, sy + 1),
                src.get(sx + 1, sy + 1),
            );
            dst.set(x, y, v);
        }
    }
    Ok(())
}

/// Box-downsample by exactly 2 in both directions; odd trailing rows and columns are dropped.
///
/// 32-bit and RGB565 pixels use the branchless byte-group average
/// `avg(avg(top_left, top_right), avg(bottom_left, bottom_right))`; gray pixels use the
/// rounded mean of the four samples.
pub fn half_scaled(src: &Image) -> RasterResult<Image> {
    let format = src.format();
    let mut out = Image::new(src.width() / 2, src.height() / 2, format)?;
    match format {
        PixelFormat::Gray8 => half_scale_with::<u8>(src, &mut out, |a, b, c, d| {
            ((u16::from(a) + u16::from(b) + u16::from(c) + u16::from(d) + 2) >> 2) as u8
        })?,
        PixelFormat::Rgb16 => half_scale_with::<u16>(src, &mut out, |a, b, c, d| {
            avg_rgb565(avg_rgb565(a, b), avg_rgb565(c, d))
        })?,
        PixelFormat::Rgb32 | PixelFormat::Argb32 | PixelFormat::Argb32Premultiplied => {
            half_scale_with::<u32>(src, &mut out, |a, b, c, d| {
                avg_argb32(avg_argb32(a, b), avg_argb32(c, d))
            })?
        }
        PixelFormat::Rgb24 => {
            return Err(RasterError::validation(
                "half_scaled does not support Rgb24",
            ));
        }
    }
    Ok(out)
}

/// Sample position and weight of the right/bottom neighbour for output index `i`.
fn sample(i: u32, src_len: u32, dst_len: u32) -> (usize, usize, f32) {
    let f = ((i as f32 + 0.5) * src_len as f32 / dst_len as f32 - 0.5)
        .clamp(0.0, (src_len - 1) as f32);
    let i0 = f.floor() as usize;
    let i1 = (i0 + 1).min(src_len as usize - 1);
    (i0, i1, f - i0 as f32)
}

/// Bilinear resize to `width x height`, channel by channel.
///
/// Intended to restore a [`half_scaled`] blur result to its original size. Gray8 and the
/// 32-bit formats are supported; premultiplied input stays premultiplied.
pub fn scaled_up(src: &Image, width: u32, height: u32) -> RasterResult<Image> {
    let format = src.format();
    let channels = match format.bytes_per_pixel() {
        1 => 1,
        4 => 4,
        _ => {
            return Err(RasterError::validation(format!(
                "scaled_up does not support {format:?}"
            )));
        }
    };
    let mut out = Image::new(width, height, format)?;
    if src.is_empty() || out.is_empty() {
        return Ok(out);
    }
    let cols: Vec<_> = (0..width).map(|x| sample(x, src.width(), width)).collect();
    for y in 0..height {
        let (y0, y1, ty) = sample(y, src.height(), height);
        let top = src.row(y0 as u32);
        let bottom = src.row(y1 as u32);
        let dst = out.row_mut(y);
        for (x, &(x0, x1, tx)) in cols.iter().enumerate() {
            for c in 0..channels {
                let lerp = |a: u8, b: u8, t: f32| f32::from(a) + (f32::from(b) - f32::from(a)) * t;
                let t = lerp(top[x0 * channels + c], top[x1 * channels + c], tx);
                let b = lerp(bottom[x0 * channels + c], bottom[x1 * channels + c], tx);
                let v = t + (b - t) * ty;
                dst[x * channels + c] = v.round().clamp(0.0, 255.0) as u8;
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/blur/scale.rs"]
mod tests;
