use crate::buffer::plane::{Plane, PlaneMut};
use crate::pixel::element::{FromPixel, Pixel};
use crate::rotate::{QuarterTurn, RotateStrategy};

/// Source-order walk: sequential reads, strided writes.
///
/// Works for every element width and is the fallback for the packing strategies.
#[derive(Clone, Copy, Debug, Default)]
pub struct CachedRead;

impl RotateStrategy for CachedRead {
    const NAME: &'static str = "cached-read";

    fn rotate_quarter<S: Pixel, D: FromPixel<S>>(
        turn: QuarterTurn,
        src: &Plane<'_, S>,
        dst: &mut PlaneMut<'_, D>,
    ) {
        for sy in 0..src.height() {
            let dx = turn.src_y(sy);
            for sx in 0..src.width() {
                dst.set(dx, turn.src_x(sx), D::from_pixel(src.get(sx, sy)));
            }
        }
    }
}

/// Destination-order walk: sequential writes, strided reads.
#[derive(Clone, Copy, Debug, Default)]
pub struct CachedWrite;

impl RotateStrategy for CachedWrite {
    const NAME: &'static str = "cached-write";

    fn rotate_quarter<S: Pixel, D: FromPixel<S>>(
        turn: QuarterTurn,
        src: &Plane<'_, S>,
        dst: &mut PlaneMut<'_, D>,
    ) {
        for dy in 0..dst.height() {
            let sx = turn.src_x(dy);
            for dx in 0..dst.width() {
                dst.set(dx, dy, D::from_pixel(src.get(sx, turn.src_y(dx))));
            }
        }
    }
}
