use crate::buffer::image::Image;
use crate::effects::composite::{grayscale, lerp, premultiply_by, screen};
use crate::foundation::core::{Rect, Rgba8Premul, Vec2};
use crate::foundation::error::{RasterError, RasterResult};

use super::{FilterDescriptor, Filtered, PixmapFilter, premultiplied};

/// Tints an image: gray it, screen a solid color over the gray, restore the source alpha,
/// then mix with the untouched source by `strength`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorizeFilter {
    color: Rgba8Premul,
    strength: f64,
}

impl Default for ColorizeFilter {
    fn default() -> Self {
        Self {
            color: Rgba8Premul::opaque(0, 0, 192),
            strength: 1.0,
        }
    }
}

impl ColorizeFilter {
    /// Filter with an opaque tint color and a strength in `[0, 1]` (clamped).
    pub fn new(r: u8, g: u8, b: u8, strength: f64) -> RasterResult<Self> {
        let mut f = Self::default();
        f.set_color(r, g, b);
        f.set_strength(strength)?;
        Ok(f)
    }

    /// Tint color (always opaque).
    pub fn color(&self) -> Rgba8Premul {
        self.color
    }

    /// Replace the tint color.
    pub fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.color = Rgba8Premul::opaque(r, g, b);
    }

    /// Mix factor: `0` leaves the source untouched, `1` is the full tint.
    pub fn strength(&self) -> f64 {
        self.strength
    }

    /// Replace the strength; clamped to `[0, 1]`.
    pub fn set_strength(&mut self, strength: f64) -> RasterResult<()> {
        if !strength.is_finite() {
            return Err(RasterError::validation("colorize strength must be finite"));
        }
        self.strength = strength.clamp(0.0, 1.0);
        Ok(())
    }

    fn colorize_pixel(&self, px: u32, t: u8) -> u32 {
        let gray = grayscale(px);
        let tinted = premultiply_by(screen(gray, self.color.to_argb32()), (px >> 24) as u8);
        lerp(px, tinted, t)
    }
}

impl PixmapFilter for ColorizeFilter {
    fn descriptor(&self) -> FilterDescriptor {
        FilterDescriptor::Colorize {
            color: [self.color.r, self.color.g, self.color.b],
            strength: self.strength,
        }
    }

    fn bounding_rect(&self, rect: Rect) -> Rect {
        rect
    }

    #[tracing::instrument(skip(self, src), fields(width = src.width(), height = src.height()))]
    fn apply(&self, src: &Image) -> RasterResult<Filtered> {
        let mut image = premultiplied(src.clone())?;
        let t = (self.strength * 255.0).round() as u8;
        for y in 0..image.height() {
            for x in 0..image.width() {
                let px = image.pixel32(x, y);
                image.set_pixel32(x, y, self.colorize_pixel(px, t));
            }
        }
        Ok(Filtered {
            image,
            offset: Vec2::ZERO,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/colorize.rs"]
mod tests;
