//! Buffer rotation by quarter turns.
//!
//! A 90° or 270° rotation is a transpose plus a flip, so every destination row reads one
//! source column. The strategies below walk that access pattern in different orders; they
//! all produce byte-identical output and can be swapped freely. 180° is a plain reversal and
//! has a single implementation.

pub(crate) mod cached;
pub(crate) mod dispatch;
pub(crate) mod packing;
pub(crate) mod tiled;

use crate::buffer::plane::{Plane, PlaneMut};
use crate::foundation::error::{RasterError, RasterResult};
use crate::pixel::element::{FromPixel, Pixel};

pub use cached::{CachedRead, CachedWrite};
pub use dispatch::{MemRotateFn, mem_rotate_fn};
pub use packing::Packing;
pub use tiled::{TILE, Tiled, TiledUnpacked};

/// Rotation applied by [`rotate`] and the dispatch table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationDirection {
    /// `dst[x][y] = src[y][w - 1 - x]`; the result is `h` wide and `w` tall.
    Rotate90,
    /// `dst[y][x] = src[h - 1 - y][w - 1 - x]`.
    Rotate180,
    /// Inverse of [`RotationDirection::Rotate90`].
    Rotate270,
}

impl RotationDirection {
    /// Every direction, in declaration order.
    pub const ALL: [RotationDirection; 3] = [
        RotationDirection::Rotate90,
        RotationDirection::Rotate180,
        RotationDirection::Rotate270,
    ];

    /// Parse a degree count (`90`, `180`, `270`).
    pub fn from_degrees(degrees: u32) -> Option<Self> {
        match degrees {
            90 => Some(Self::Rotate90),
            180 => Some(Self::Rotate180),
            270 => Some(Self::Rotate270),
            _ => None,
        }
    }

    /// Direction that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            Self::Rotate90 => Self::Rotate270,
            Self::Rotate180 => Self::Rotate180,
            Self::Rotate270 => Self::Rotate90,
        }
    }

    /// Return `true` when width and height trade places.
    pub fn swaps_axes(self) -> bool {
        !matches!(self, Self::Rotate180)
    }
}

/// Coordinate mapping of a quarter turn, from destination coordinates into the source.
///
/// Both axis maps are involutions, so the same functions also send a source coordinate to
/// its destination.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QuarterTurn {
    ccw: bool,
    src_width: usize,
    src_height: usize,
}

impl QuarterTurn {
    /// The 90° mapping for a `src_width x src_height` source.
    pub fn rotate90(src_width: usize, src_height: usize) -> Self {
        Self {
            ccw: true,
            src_width,
            src_height,
        }
    }

    /// The 270° mapping for a `src_width x src_height` source.
    pub fn rotate270(src_width: usize, src_height: usize) -> Self {
        Self {
            ccw: false,
            src_width,
            src_height,
        }
    }

    /// Source column read by destination row `dst_row` (and vice versa).
    #[inline]
    pub fn src_x(self, dst_row: usize) -> usize {
        if self.ccw {
            self.src_width - 1 - dst_row
        } else {
            dst_row
        }
    }

    /// Source row read by destination column `dst_col` (and vice versa).
    #[inline]
    pub fn src_y(self, dst_col: usize) -> usize {
        if self.ccw {
            dst_col
        } else {
            self.src_height - 1 - dst_col
        }
    }

    /// Destination width (source height).
    pub fn dst_width(self) -> usize {
        self.src_height
    }

    /// Destination height (source width).
    pub fn dst_height(self) -> usize {
        self.src_width
    }
}

/// One way of walking a quarter-turn rotation.
///
/// Implementations may assume `dst` is `src.height()` wide and `src.width()` tall; [`rotate`]
/// and [`rotate_with`] check that before delegating.
pub trait RotateStrategy {
    /// Short name for logs and benchmark labels.
    const NAME: &'static str;

    /// Write the rotation of `src` described by `turn` into `dst`.
    fn rotate_quarter<S: Pixel, D: FromPixel<S>>(
        turn: QuarterTurn,
        src: &Plane<'_, S>,
        dst: &mut PlaneMut<'_, D>,
    );
}

/// Strategy used when callers do not pick one, chosen by cargo feature.
#[cfg(feature = "rotate-cached-read")]
pub type DefaultStrategy = CachedRead;
/// Strategy used when callers do not pick one, chosen by cargo feature.
#[cfg(all(feature = "rotate-cached-write", not(feature = "rotate-cached-read")))]
pub type DefaultStrategy = CachedWrite;
/// Strategy used when callers do not pick one, chosen by cargo feature.
#[cfg(all(
    feature = "rotate-packing",
    not(any(feature = "rotate-cached-read", feature = "rotate-cached-write"))
))]
pub type DefaultStrategy = Packing;
/// Strategy used when callers do not pick one, chosen by cargo feature.
#[cfg(not(any(
    feature = "rotate-cached-read",
    feature = "rotate-cached-write",
    feature = "rotate-packing"
)))]
pub type DefaultStrategy = Tiled;

fn check_dims<S: Pixel, D: Pixel>(
    direction: RotationDirection,
    src: &Plane<'_, S>,
    dst: &PlaneMut<'_, D>,
) -> RasterResult<()> {
    let (w, h) = if direction.swaps_axes() {
        (src.height(), src.width())
    } else {
        (src.width(), src.height())
    };
    if dst.width() != w || dst.height() != h {
        return Err(RasterError::validation(format!(
            "{direction:?} of {}x{} needs a {w}x{h} destination, got {}x{}",
            src.width(),
            src.height(),
            dst.width(),
            dst.height()
        )));
    }
    Ok(())
}

/// Rotate `src` into `dst` with the build's [`DefaultStrategy`].
pub fn rotate<S: Pixel, D: FromPixel<S>>(
    direction: RotationDirection,
    src: &Plane<'_, S>,
    dst: &mut PlaneMut<'_, D>,
) -> RasterResult<()> {
    rotate_with::<DefaultStrategy, S, D>(direction, src, dst)
}

/// Rotate `src` into `dst` with an explicit strategy.
pub fn rotate_with<R: RotateStrategy, S: Pixel, D: FromPixel<S>>(
    direction: RotationDirection,
    src: &Plane<'_, S>,
    dst: &mut PlaneMut<'_, D>,
) -> RasterResult<()> {
    check_dims(direction, src, dst)?;
    let (w, h) = (src.width(), src.height());
    match direction {
        RotationDirection::Rotate90 => R::rotate_quarter(QuarterTurn::rotate90(w, h), src, dst),
        RotationDirection::Rotate270 => R::rotate_quarter(QuarterTurn::rotate270(w, h), src, dst),
        RotationDirection::Rotate180 => rotate180(src, dst),
    }
    Ok(())
}

/// Half turn: each source row, back to front, reversed into the mirrored destination row.
pub(crate) fn rotate180<S: Pixel, D: FromPixel<S>>(src: &Plane<'_, S>, dst: &mut PlaneMut<'_, D>) {
    let (w, h) = (src.width(), src.height());
    for sy in (0..h).rev() {
        let dy = h - 1 - sy;
        for sx in 0..w {
            dst.set(w - 1 - sx, dy, D::from_pixel(src.get(sx, sy)));
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/rotate/mod.rs"]
mod tests;
