use crate::buffer::image::Image;
use crate::foundation::error::{RasterError, RasterResult};
use crate::pixel::format::PixelFormat;
use crate::rotate::{RotationDirection, mem_rotate_fn};

use super::Transposed;

/// Alpha precision in bits of the canonical blur.
pub const DEFAULT_APREC: u32 = 12;
/// State precision in bits of the canonical blur.
pub const DEFAULT_ZPREC: u32 = 10;

/// Radii at or below this are treated as "no blur".
pub(crate) const PASSTHROUGH_RADIUS: f64 = 1e-5;

/// Intensity (out of 255) a saturated channel decays to after `radius` pixels.
const CUTOFF_INTENSITY: f64 = 2.0;

/// Per-step blend weight in `APREC` fixed point.
pub fn blur_alpha<const APREC: u32>(radius: f64) -> i32 {
    let one = 1i32 << APREC;
    if radius <= PASSTHROUGH_RADIUS {
        return one;
    }
    let decay = (CUTOFF_INTENSITY / 255.0).powf(1.0 / radius);
    ((f64::from(one) * (1.0 - decay)).round() as i32).clamp(0, one)
}

/// Which bytes of a pixel the row pass touches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Lanes {
    step: usize,
    offset: usize,
    count: usize,
}

impl Lanes {
    fn for_format(format: PixelFormat, alpha_only: bool) -> Lanes {
        let step = format.bytes_per_pixel();
        match (step, alpha_only) {
            (4, true) => Lanes {
                step,
                offset: 3,
                count: 1,
            },
            _ => Lanes {
                step,
                offset: 0,
                count: step,
            },
        }
    }
}

/// One forward and one backward IIR sweep over a row.
///
/// State is `8 + ZPREC + APREC` bits per lane, seeded from the first pixel so a constant
/// row passes through unchanged.
fn blur_row<const APREC: u32, const ZPREC: u32>(row: &mut [u8], lanes: Lanes, alpha: i32) {
    let n = row.len() / lanes.step;
    if n == 0 {
        return;
    }
    let mut z = [0i32; 4];
    for (c, zc) in z.iter_mut().enumerate().take(lanes.count) {
        *zc = i32::from(row[lanes.offset + c]) << (ZPREC + APREC);
    }

    let mut step = |i: usize, z: &mut [i32; 4]| {
        let base = i * lanes.step + lanes.offset;
        for (c, zc) in z.iter_mut().enumerate().take(lanes.count) {
            let px = &mut row[base + c];
            *zc += alpha * ((i32::from(*px) << ZPREC) - (*zc >> APREC));
            *px = (*zc >> (ZPREC + APREC)) as u8;
        }
    };

    for i in 0..n {
        step(i, &mut z);
    }
    for i in (0..n - 1).rev() {
        step(i, &mut z);
    }
}

fn blur_rows<const APREC: u32, const ZPREC: u32>(
    img: &mut Image,
    lanes: Lanes,
    alpha: i32,
    passes: usize,
) {
    for y in 0..img.height() {
        let row = img.row_mut(y);
        for _ in 0..passes {
            blur_row::<APREC, ZPREC>(row, lanes, alpha);
        }
    }
}

/// Two-dimensional exponential blur at `APREC`/`ZPREC` fixed-point precision.
///
/// Rows are blurred, the image is turned a quarter into a scratch buffer, the former
/// columns are blurred as rows, and the result is turned back unless `transposed` asks for
/// the transposed buffer. Accepts [`PixelFormat::Gray8`] and the 32-bit formats.
pub fn expblur<const APREC: u32, const ZPREC: u32>(
    mut img: Image,
    radius: f64,
    quality: bool,
    alpha_only: bool,
    transposed: Transposed,
) -> RasterResult<Image> {
    let format = img.format();
    if !matches!(format.bytes_per_pixel(), 1 | 4) {
        return Err(RasterError::validation(format!(
            "exponential blur needs an 8- or 32-bit image, got {format:?}"
        )));
    }
    let radius = if quality { radius * 0.5 } else { radius };
    let alpha = blur_alpha::<APREC>(radius);
    let passes = if quality { 2 } else { 1 };
    let lanes = Lanes::for_format(format, alpha_only);

    blur_rows::<APREC, ZPREC>(&mut img, lanes, alpha, passes);

    let turn = match transposed {
        Transposed::Backward => RotationDirection::Rotate90,
        Transposed::None | Transposed::Forward => RotationDirection::Rotate270,
    };
    let mut temp = Image::new(img.height(), img.width(), format)?;
    let temp_stride = temp.stride();
    mem_rotate_fn(format, turn)(
        img.data(),
        img.width() as usize,
        img.height() as usize,
        img.stride(),
        temp.data_mut(),
        temp_stride,
    )?;

    blur_rows::<APREC, ZPREC>(&mut temp, lanes, alpha, passes);

    if transposed != Transposed::None {
        return Ok(temp);
    }
    let img_stride = img.stride();
    mem_rotate_fn(format, RotationDirection::Rotate90)(
        temp.data(),
        temp.width() as usize,
        temp.height() as usize,
        temp.stride(),
        img.data_mut(),
        img_stride,
    )?;
    Ok(img)
}

#[cfg(test)]
#[path = "../../tests/unit/blur/exponential.rs"]
mod tests;
