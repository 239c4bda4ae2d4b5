use crate::blur::{BlurHint, BlurParams, blur_image};
use crate::buffer::image::Image;
use crate::effects::composite::{BlitMode, blit};
use crate::foundation::core::{IntRect, Rect, Vec2};
use crate::foundation::error::{RasterError, RasterResult};
use crate::pixel::format::PixelFormat;

use super::{FilterDescriptor, Filtered, PixmapFilter, premultiplied};

/// Full-color exponential blur, padded so the spread is not cut off at the source edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlurFilter {
    radius: f64,
    hint: BlurHint,
}

impl Default for BlurFilter {
    fn default() -> Self {
        Self {
            radius: 5.0,
            hint: BlurHint::Performance,
        }
    }
}

impl BlurFilter {
    /// Blur with the given radius and hint.
    pub fn new(radius: f64, hint: BlurHint) -> RasterResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(RasterError::validation(
                "blur radius must be finite and >= 0",
            ));
        }
        Ok(Self { radius, hint })
    }

    /// Blur radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Blur hint.
    pub fn hint(&self) -> BlurHint {
        self.hint
    }
}

impl PixmapFilter for BlurFilter {
    fn descriptor(&self) -> FilterDescriptor {
        FilterDescriptor::Blur {
            radius: self.radius,
            hint: self.hint,
        }
    }

    fn bounding_rect(&self, rect: Rect) -> Rect {
        rect.inflate(self.radius, self.radius)
    }

    #[tracing::instrument(skip(self, src), fields(width = src.width(), height = src.height()))]
    fn apply(&self, src: &Image) -> RasterResult<Filtered> {
        let src = premultiplied(src.clone())?;
        let area = IntRect::covering(self.bounding_rect(src.rect().to_rect()));
        let mut padded = Image::new(area.width, area.height, PixelFormat::Argb32Premultiplied)?;
        let clip = padded.rect();
        blit(&mut padded, &src, -area.x, -area.y, clip, BlitMode::Source);
        let params = BlurParams::new(self.radius).with_hint(self.hint);
        let image = blur_image(&padded, &params)?.into_full_size(area.width, area.height)?;
        Ok(Filtered {
            image,
            offset: Vec2::new(f64::from(area.x), f64::from(area.y)),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/blur.rs"]
mod tests;
