use std::ops::Range;

use crate::buffer::plane::{Plane, PlaneMut};
use crate::pixel::element::{FromPixel, Pixel};
use crate::rotate::packing::{copy_run, pack_run, packed_span};
use crate::rotate::{QuarterTurn, RotateStrategy};

/// Tile edge in elements.
pub const TILE: usize = 32;

/// Splits `[start, end)` into consecutive spans of at most `tile` elements.
#[derive(Clone, Debug)]
pub(crate) struct TileScheduler {
    next: usize,
    end: usize,
    tile: usize,
}

impl TileScheduler {
    pub(crate) fn new(span: Range<usize>, tile: usize) -> Self {
        debug_assert!(tile > 0);
        Self {
            next: span.start,
            end: span.end,
            tile,
        }
    }
}

impl Iterator for TileScheduler {
    type Item = Range<usize>;

    fn next(&mut self) -> Option<Range<usize>> {
        if self.next >= self.end {
            return None;
        }
        let start = self.next;
        self.next = (start + self.tile).min(self.end);
        Some(start..self.next)
    }
}

/// Cache-blocked walk with packed stores.
///
/// Destination rows are processed in bands of [`TILE`]. Inside a band each row stores its
/// unaligned prefix, then the packed bulk one tile-wide column block at a time across all
/// rows of the band, then its remainder. Element widths that cannot pack use
/// [`TiledUnpacked`].
#[derive(Clone, Copy, Debug, Default)]
pub struct Tiled;

impl RotateStrategy for Tiled {
    const NAME: &'static str = "tiled";

    fn rotate_quarter<S: Pixel, D: FromPixel<S>>(
        turn: QuarterTurn,
        src: &Plane<'_, S>,
        dst: &mut PlaneMut<'_, D>,
    ) {
        if D::PACK == 0 {
            return TiledUnpacked::rotate_quarter(turn, src, dst);
        }
        let width = dst.width();
        let col_blocks = width.div_ceil(TILE);
        for band in TileScheduler::new(0..dst.height(), TILE) {
            for dy in band.clone() {
                let (start, _) = packed_span(dst, dy);
                copy_run(turn, src, dst, dy, 0, start);
            }
            for block in 0..col_blocks {
                for dy in band.clone() {
                    let (start, end) = packed_span(dst, dy);
                    let from = start + block * TILE;
                    if from >= end {
                        continue;
                    }
                    pack_run(turn, src, dst, dy, from, (from + TILE).min(end));
                }
            }
            for dy in band {
                let (_, end) = packed_span(dst, dy);
                copy_run(turn, src, dst, dy, end, width);
            }
        }
    }
}

/// Cache-blocked walk with one store per element. Handles every element width.
#[derive(Clone, Copy, Debug, Default)]
pub struct TiledUnpacked;

impl RotateStrategy for TiledUnpacked {
    const NAME: &'static str = "tiled-unpacked";

    fn rotate_quarter<S: Pixel, D: FromPixel<S>>(
        turn: QuarterTurn,
        src: &Plane<'_, S>,
        dst: &mut PlaneMut<'_, D>,
    ) {
        for band in TileScheduler::new(0..dst.height(), TILE) {
            for cols in TileScheduler::new(0..dst.width(), TILE) {
                for dy in band.clone() {
                    copy_run(turn, src, dst, dy, cols.start, cols.end);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotate/tiled.rs"]
mod tests;
