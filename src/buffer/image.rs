use std::fmt;

use crate::buffer::plane::{Plane, PlaneMut, check_geometry};
use crate::foundation::core::IntRect;
use crate::foundation::error::{RasterError, RasterResult};
use crate::pixel::element::Pixel;
use crate::pixel::format::PixelFormat;

/// Owned, strided pixel buffer.
///
/// Rows start `stride` bytes apart; `stride >= width * bytes_per_pixel`. Freshly allocated
/// images pad each row to a multiple of 4 bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("stride", &self.stride)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

/// Reserve a zeroed byte buffer, reporting failure instead of aborting.
pub(crate) fn alloc_zeroed(len: usize) -> RasterResult<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|e| RasterError::allocation(format!("cannot reserve {len} bytes: {e}")))?;
    data.resize(len, 0);
    Ok(data)
}

impl Image {
    /// Allocate a zero-filled image with 4-byte aligned rows.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> RasterResult<Self> {
        let row = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .and_then(|v| v.checked_add(3))
            .ok_or_else(|| RasterError::validation("image row size overflow"))?;
        Self::with_stride(width, height, row & !3, format)
    }

    /// Allocate a zero-filled image with an explicit row stride.
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> RasterResult<Self> {
        let len = stride
            .checked_mul(height as usize)
            .ok_or_else(|| RasterError::validation("image buffer size overflow"))?;
        let data = alloc_zeroed(len)?;
        Self::from_raw(width, height, stride, format, data)
    }

    /// Wrap caller-provided bytes.
    pub fn from_raw(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> RasterResult<Self> {
        check_geometry(
            data.len(),
            width as usize,
            height as usize,
            stride,
            format.bytes_per_pixel(),
        )?;
        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Build a tightly packed image from a slice of typed elements in row-major order.
    pub fn from_pixels<P: Pixel>(
        width: u32,
        height: u32,
        format: PixelFormat,
        pixels: &[P],
    ) -> RasterResult<Self> {
        if P::BYTES != format.bytes_per_pixel() {
            return Err(RasterError::validation(format!(
                "{format:?} pixels are {} bytes, element type has {}",
                format.bytes_per_pixel(),
                P::BYTES
            )));
        }
        let count = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| RasterError::validation("image size overflow"))?;
        if pixels.len() != count {
            return Err(RasterError::validation(format!(
                "expected {count} pixels, got {}",
                pixels.len()
            )));
        }
        let mut data = alloc_zeroed(count * P::BYTES)?;
        for (chunk, &px) in data.chunks_exact_mut(P::BYTES).zip(pixels) {
            px.write(chunk);
        }
        Self::from_raw(width, height, width as usize * P::BYTES, format, data)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Pixel format tag.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Return `true` when the image has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw bytes including row padding.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw bytes including row padding.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the image and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Payload bytes of row `y` (without padding).
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.stride;
        &self.data[start..start + self.row_bytes()]
    }

    /// Mutable payload bytes of row `y` (without padding).
    pub fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let start = y as usize * self.stride;
        let len = self.row_bytes();
        &mut self.data[start..start + len]
    }

    fn row_bytes(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Typed read-only view. Fails if `P` does not match the format's pixel width.
    pub fn plane<P: Pixel>(&self) -> RasterResult<Plane<'_, P>> {
        self.check_element::<P>()?;
        Plane::new(
            &self.data,
            self.width as usize,
            self.height as usize,
            self.stride,
        )
    }

    /// Typed mutable view. Fails if `P` does not match the format's pixel width.
    pub fn plane_mut<P: Pixel>(&mut self) -> RasterResult<PlaneMut<'_, P>> {
        self.check_element::<P>()?;
        PlaneMut::new(
            &mut self.data,
            self.width as usize,
            self.height as usize,
            self.stride,
        )
    }

    fn check_element<P: Pixel>(&self) -> RasterResult<()> {
        if P::BYTES != self.format.bytes_per_pixel() {
            return Err(RasterError::validation(format!(
                "{:?} pixels are {} bytes, element type has {}",
                self.format,
                self.format.bytes_per_pixel(),
                P::BYTES
            )));
        }
        Ok(())
    }

    /// Read a 32-bit pixel. Only meaningful for 32-bit formats.
    #[inline]
    pub fn pixel32(&self, x: u32, y: u32) -> u32 {
        debug_assert_eq!(self.format.bytes_per_pixel(), 4);
        u32::read(&self.data[y as usize * self.stride + x as usize * 4..])
    }

    /// Write a 32-bit pixel. Only meaningful for 32-bit formats.
    #[inline]
    pub fn set_pixel32(&mut self, x: u32, y: u32, value: u32) {
        debug_assert_eq!(self.format.bytes_per_pixel(), 4);
        value.write(&mut self.data[y as usize * self.stride + x as usize * 4..]);
    }

    /// Set every pixel of a 32-bit image to `value`.
    pub fn fill32(&mut self, value: u32) {
        debug_assert_eq!(self.format.bytes_per_pixel(), 4);
        for y in 0..self.height {
            for px in self.row_mut(y).chunks_exact_mut(4) {
                value.write(px);
            }
        }
    }

    /// Pixel rectangle covering the whole image, at the origin.
    pub fn rect(&self) -> IntRect {
        IntRect::new(0, 0, self.width, self.height)
    }

    /// Copy of the part of the image inside `rect`, clipped to the image bounds.
    pub fn cropped(&self, rect: IntRect) -> RasterResult<Image> {
        let r = rect.intersect(self.rect());
        let mut out = Image::new(r.width, r.height, self.format)?;
        let bpp = self.format.bytes_per_pixel();
        let start = r.x.max(0) as usize * bpp;
        let len = r.width as usize * bpp;
        for y in 0..r.height {
            let src = &self.row(r.y as u32 + y)[start..start + len];
            out.row_mut(y).copy_from_slice(src);
        }
        Ok(out)
    }

    /// Copy of the pixel payload with row padding stripped.
    pub fn to_packed_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.row_bytes() * self.height as usize);
        for y in 0..self.height {
            out.extend_from_slice(self.row(y));
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/image.rs"]
mod tests;
