use std::marker::PhantomData;

use crate::foundation::error::{RasterError, RasterResult};
use crate::pixel::element::Pixel;

/// Minimum byte length for a `width x height` buffer with `stride` bytes per row.
///
/// The final row does not need to be padded out to the full stride.
pub(crate) fn required_len(
    width: usize,
    height: usize,
    stride: usize,
    bpp: usize,
) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    stride
        .checked_mul(height - 1)?
        .checked_add(width.checked_mul(bpp)?)
}

pub(crate) fn check_geometry(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    bpp: usize,
) -> RasterResult<()> {
    let row_bytes = width
        .checked_mul(bpp)
        .ok_or_else(|| RasterError::validation("row size overflow"))?;
    if height > 0 && stride < row_bytes {
        return Err(RasterError::validation(format!(
            "stride {stride} is smaller than a row of {row_bytes} bytes"
        )));
    }
    let needed = required_len(width, height, stride, bpp)
        .ok_or_else(|| RasterError::validation("buffer size overflow"))?;
    if len < needed {
        return Err(RasterError::validation(format!(
            "{len} bytes cannot hold {width}x{height} at stride {stride} (needs {needed})"
        )));
    }
    Ok(())
}

/// Read-only view of a strided byte buffer as `width x height` elements of type `P`.
///
/// Element `(x, y)` lives at byte offset `y * stride + x * P::BYTES`.
#[derive(Clone, Copy, Debug)]
pub struct Plane<'a, P> {
    bytes: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
    _pixel: PhantomData<P>,
}

impl<'a, P: Pixel> Plane<'a, P> {
    /// Create a validated view.
    pub fn new(bytes: &'a [u8], width: usize, height: usize, stride: usize) -> RasterResult<Self> {
        check_geometry(bytes.len(), width, height, stride, P::BYTES)?;
        Ok(Self {
            bytes,
            width,
            height,
            stride,
            _pixel: PhantomData,
        })
    }

    /// Width in elements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Element at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> P {
        debug_assert!(x < self.width && y < self.height);
        P::read(&self.bytes[y * self.stride + x * P::BYTES..])
    }

    /// The `width * P::BYTES` payload bytes of row `y`.
    #[inline]
    pub fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.bytes[start..start + self.width * P::BYTES]
    }
}

/// Mutable counterpart of [`Plane`].
#[derive(Debug)]
pub struct PlaneMut<'a, P> {
    bytes: &'a mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    _pixel: PhantomData<P>,
}

impl<'a, P: Pixel> PlaneMut<'a, P> {
    /// Create a validated view.
    pub fn new(
        bytes: &'a mut [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> RasterResult<Self> {
        check_geometry(bytes.len(), width, height, stride, P::BYTES)?;
        Ok(Self {
            bytes,
            width,
            height,
            stride,
            _pixel: PhantomData,
        })
    }

    /// Width in elements.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Row stride in bytes.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Read-only view over the same bytes.
    pub fn as_plane(&self) -> Plane<'_, P> {
        Plane {
            bytes: self.bytes,
            width: self.width,
            height: self.height,
            stride: self.stride,
            _pixel: PhantomData,
        }
    }

    /// Element at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> P {
        debug_assert!(x < self.width && y < self.height);
        P::read(&self.bytes[y * self.stride + x * P::BYTES..])
    }

    /// Overwrite the element at column `x`, row `y`.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, value: P) {
        debug_assert!(x < self.width && y < self.height);
        value.write(&mut self.bytes[y * self.stride + x * P::BYTES..]);
    }

    /// Store a packed 32-bit word covering elements `x .. x + P::PACK` of row `y`.
    #[inline]
    pub(crate) fn store_word(&mut self, x: usize, y: usize, word: u32) {
        debug_assert!(x + P::PACK <= self.width && y < self.height);
        let start = y * self.stride + x * P::BYTES;
        self.bytes[start..start + 4].copy_from_slice(&word.to_le_bytes());
    }

    /// Byte distance of the first element past the previous 4-byte boundary.
    pub(crate) fn misalignment(&self) -> usize {
        self.bytes.as_ptr().addr() % 4
    }

    /// The `width * P::BYTES` payload bytes of row `y`.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.stride;
        &mut self.bytes[start..start + self.width * P::BYTES]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/buffer/plane.rs"]
mod tests;
