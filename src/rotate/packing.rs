use std::marker::PhantomData;

use crate::buffer::plane::{Plane, PlaneMut};
use crate::pixel::element::{FromPixel, Pixel};
use crate::rotate::cached::CachedRead;
use crate::rotate::{QuarterTurn, RotateStrategy};

/// Accumulates `D::PACK` consecutive elements into one little-endian 32-bit word.
///
/// Element `i` of the pack occupies bits `[i * 32 / PACK, (i + 1) * 32 / PACK)`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BitPacker<D> {
    word: u32,
    filled: usize,
    _pixel: PhantomData<D>,
}

impl<D: Pixel> BitPacker<D> {
    const SHIFT: usize = match 32usize.checked_div(D::PACK) {
        Some(shift) => shift,
        None => 0,
    };

    pub(crate) fn new() -> Self {
        debug_assert!(D::PACK > 0);
        Self {
            word: 0,
            filled: 0,
            _pixel: PhantomData,
        }
    }

    /// Add the next element; returns the finished word once the pack is full.
    #[inline]
    pub(crate) fn push(&mut self, px: D) -> Option<u32> {
        self.word |= px.bits() << (Self::SHIFT * self.filled);
        self.filled += 1;
        if self.filled == D::PACK {
            let word = self.word;
            self.word = 0;
            self.filled = 0;
            Some(word)
        } else {
            None
        }
    }
}

/// Number of leading elements to store one at a time before `misalignment` (bytes past a
/// 4-byte boundary) reaches the next boundary, capped at `len`.
///
/// Zero when already aligned or when the element width cannot land on a boundary.
pub(crate) fn aligned_prefix<D: Pixel>(misalignment: usize, len: usize) -> usize {
    let need = (4 - misalignment % 4) % 4;
    if !need.is_multiple_of(D::BYTES) {
        return 0;
    }
    (need / D::BYTES).min(len)
}

/// Column span `[start, end)` of destination row `row` that is stored as packed words.
///
/// Everything before `start` is the unaligned prefix; everything from `end` on is the
/// remainder that does not fill a whole pack.
pub(crate) fn packed_span<D: Pixel>(dst: &PlaneMut<'_, D>, row: usize) -> (usize, usize) {
    let len = dst.width();
    let misalignment = (dst.misalignment() + row * dst.stride()) % 4;
    let start = aligned_prefix::<D>(misalignment, len);
    let rest = (len - start) % D::PACK;
    (start, len - rest)
}

/// Store destination row `dy` columns `[from, to)` as packed words. `to - from` must be a
/// multiple of `D::PACK`.
#[inline]
pub(crate) fn pack_run<S: Pixel, D: FromPixel<S>>(
    turn: QuarterTurn,
    src: &Plane<'_, S>,
    dst: &mut PlaneMut<'_, D>,
    dy: usize,
    from: usize,
    to: usize,
) {
    debug_assert_eq!((to - from) % D::PACK, 0);
    let sx = turn.src_x(dy);
    let mut packer = BitPacker::<D>::new();
    let mut word_start = from;
    for dx in from..to {
        if let Some(word) = packer.push(D::from_pixel(src.get(sx, turn.src_y(dx)))) {
            dst.store_word(word_start, dy, word);
            word_start = dx + 1;
        }
    }
}

/// Store destination row `dy` columns `[from, to)` one element at a time.
#[inline]
pub(crate) fn copy_run<S: Pixel, D: FromPixel<S>>(
    turn: QuarterTurn,
    src: &Plane<'_, S>,
    dst: &mut PlaneMut<'_, D>,
    dy: usize,
    from: usize,
    to: usize,
) {
    let sx = turn.src_x(dy);
    for dx in from..to {
        dst.set(dx, dy, D::from_pixel(src.get(sx, turn.src_y(dx))));
    }
}

/// Destination-order walk that coalesces narrow elements into 32-bit stores.
///
/// Element widths that do not divide 32 bits fall back to [`CachedRead`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Packing;

impl RotateStrategy for Packing {
    const NAME: &'static str = "packing";

    fn rotate_quarter<S: Pixel, D: FromPixel<S>>(
        turn: QuarterTurn,
        src: &Plane<'_, S>,
        dst: &mut PlaneMut<'_, D>,
    ) {
        if D::PACK == 0 {
            return CachedRead::rotate_quarter(turn, src, dst);
        }
        for dy in 0..dst.height() {
            let (start, end) = packed_span(dst, dy);
            copy_run(turn, src, dst, dy, 0, start);
            pack_run(turn, src, dst, dy, start, end);
            copy_run(turn, src, dst, dy, end, dst.width());
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotate/packing.rs"]
mod tests;
