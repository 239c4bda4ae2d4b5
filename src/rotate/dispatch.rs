use crate::buffer::image::Image;
use crate::buffer::plane::{Plane, PlaneMut};
use crate::foundation::error::RasterResult;
use crate::pixel::element::{Pixel, Rgb24};
use crate::pixel::format::PixelFormat;
use crate::rotate::{RotationDirection, rotate};

/// Raw-buffer rotation entry: `(src, width, height, src_stride, dst, dst_stride)`.
///
/// `width`/`height` describe the source; the destination must hold the rotated shape.
pub type MemRotateFn = fn(&[u8], usize, usize, usize, &mut [u8], usize) -> RasterResult<()>;

fn raw_rotate<P: Pixel>(
    direction: RotationDirection,
    src: &[u8],
    width: usize,
    height: usize,
    src_stride: usize,
    dst: &mut [u8],
    dst_stride: usize,
) -> RasterResult<()> {
    let src = Plane::<P>::new(src, width, height, src_stride)?;
    let (dw, dh) = if direction.swaps_axes() {
        (height, width)
    } else {
        (width, height)
    };
    let mut dst = PlaneMut::<P>::new(dst, dw, dh, dst_stride)?;
    rotate(direction, &src, &mut dst)
}

fn raw_rotate90<P: Pixel>(
    src: &[u8],
    w: usize,
    h: usize,
    sstride: usize,
    dst: &mut [u8],
    dstride: usize,
) -> RasterResult<()> {
    raw_rotate::<P>(
        RotationDirection::Rotate90,
        src,
        w,
        h,
        sstride,
        dst,
        dstride,
    )
}

fn raw_rotate180<P: Pixel>(
    src: &[u8],
    w: usize,
    h: usize,
    sstride: usize,
    dst: &mut [u8],
    dstride: usize,
) -> RasterResult<()> {
    raw_rotate::<P>(
        RotationDirection::Rotate180,
        src,
        w,
        h,
        sstride,
        dst,
        dstride,
    )
}

fn raw_rotate270<P: Pixel>(
    src: &[u8],
    w: usize,
    h: usize,
    sstride: usize,
    dst: &mut [u8],
    dstride: usize,
) -> RasterResult<()> {
    raw_rotate::<P>(
        RotationDirection::Rotate270,
        src,
        w,
        h,
        sstride,
        dst,
        dstride,
    )
}

fn table_for<P: Pixel>(direction: RotationDirection) -> MemRotateFn {
    match direction {
        RotationDirection::Rotate90 => raw_rotate90::<P>,
        RotationDirection::Rotate180 => raw_rotate180::<P>,
        RotationDirection::Rotate270 => raw_rotate270::<P>,
    }
}

/// Look up the same-format rotation routine for `format` and `direction`.
pub fn mem_rotate_fn(format: PixelFormat, direction: RotationDirection) -> MemRotateFn {
    match format {
        PixelFormat::Gray8 => table_for::<u8>(direction),
        PixelFormat::Rgb16 => table_for::<u16>(direction),
        PixelFormat::Rgb24 => table_for::<Rgb24>(direction),
        PixelFormat::Rgb32 | PixelFormat::Argb32 | PixelFormat::Argb32Premultiplied => {
            table_for::<u32>(direction)
        }
    }
}

impl Image {
    /// Rotated copy in the same format, with freshly aligned rows.
    pub fn rotated(&self, direction: RotationDirection) -> RasterResult<Image> {
        let (w, h) = if direction.swaps_axes() {
            (self.height(), self.width())
        } else {
            (self.width(), self.height())
        };
        let mut out = Image::new(w, h, self.format())?;
        let out_stride = out.stride();
        mem_rotate_fn(self.format(), direction)(
            self.data(),
            self.width() as usize,
            self.height() as usize,
            self.stride(),
            out.data_mut(),
            out_stride,
        )?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotate/dispatch.rs"]
mod tests;
