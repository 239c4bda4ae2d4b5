use crate::blur::{BlurHint, BlurParams, blur_image};
use crate::buffer::image::Image;
use crate::effects::composite::{BlitMode, blit, source_in};
use crate::foundation::core::{IntRect, Point, Rect, Rgba8Premul, Vec2};
use crate::foundation::error::{RasterError, RasterResult};
use crate::pixel::format::PixelFormat;
use crate::surface::PaintSurface;

use super::{FilterDescriptor, Filtered, PixmapFilter, premultiplied, source_region, visible};

/// Blurred, tinted copy of the source's coverage drawn at an offset beneath the source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropShadowFilter {
    offset: Vec2,
    radius: f64,
    color: Rgba8Premul,
    hint: BlurHint,
}

impl Default for DropShadowFilter {
    fn default() -> Self {
        Self {
            offset: Vec2::new(8.0, 8.0),
            radius: 1.0,
            color: Rgba8Premul::from_straight_rgba(63, 63, 63, 180),
            hint: BlurHint::Performance,
        }
    }
}

impl DropShadowFilter {
    /// Shadow with the given offset, blur radius and premultiplied color.
    pub fn new(offset: Vec2, radius: f64, color: Rgba8Premul) -> RasterResult<Self> {
        let mut f = Self::default();
        f.set_offset(offset)?;
        f.set_radius(radius)?;
        f.color = color;
        Ok(f)
    }

    /// Shadow displacement from the source.
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Replace the offset.
    pub fn set_offset(&mut self, offset: Vec2) -> RasterResult<()> {
        if !offset.is_finite() {
            return Err(RasterError::validation("drop shadow offset must be finite"));
        }
        self.offset = offset;
        Ok(())
    }

    /// Blur radius of the shadow.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Replace the blur radius.
    pub fn set_radius(&mut self, radius: f64) -> RasterResult<()> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(RasterError::validation(
                "drop shadow radius must be finite and >= 0",
            ));
        }
        self.radius = radius;
        Ok(())
    }

    /// Premultiplied shadow color.
    pub fn color(&self) -> Rgba8Premul {
        self.color
    }

    /// Replace the shadow color.
    pub fn set_color(&mut self, color: Rgba8Premul) {
        self.color = color;
    }

    /// Blur hint forwarded to the shadow blur.
    pub fn hint(&self) -> BlurHint {
        self.hint
    }

    /// Replace the blur hint.
    pub fn set_hint(&mut self, hint: BlurHint) {
        self.hint = hint;
    }

    fn shifted(&self) -> (i32, i32) {
        (self.offset.x.round() as i32, self.offset.y.round() as i32)
    }

    /// The shadow alone, sized to the bounding rect of `src`.
    #[tracing::instrument(skip(self, src), fields(width = src.width(), height = src.height()))]
    pub fn shadow(&self, src: &Image) -> RasterResult<Filtered> {
        let src = premultiplied(src.clone())?;
        let area = IntRect::covering(self.bounding_rect(src.rect().to_rect()));
        let mut coverage = Image::new(area.width, area.height, PixelFormat::Argb32Premultiplied)?;
        let (dx, dy) = self.shifted();
        let clip = coverage.rect();
        blit(
            &mut coverage,
            &src,
            dx - area.x,
            dy - area.y,
            clip,
            BlitMode::Source,
        );

        let params = BlurParams::new(self.radius)
            .alpha_only()
            .with_hint(self.hint);
        let mut image = blur_image(&coverage, &params)?.into_full_size(area.width, area.height)?;
        for y in 0..image.height() {
            for x in 0..image.width() {
                let alpha = (image.pixel32(x, y) >> 24) as u8;
                image.set_pixel32(x, y, source_in(alpha, self.color));
            }
        }
        Ok(Filtered {
            image,
            offset: Vec2::new(f64::from(area.x), f64::from(area.y)),
        })
    }
}

impl PixmapFilter for DropShadowFilter {
    fn descriptor(&self) -> FilterDescriptor {
        FilterDescriptor::DropShadow {
            offset: [self.offset.x, self.offset.y],
            radius: self.radius,
            color: self.color.to_straight_rgba(),
            hint: self.hint,
        }
    }

    fn bounding_rect(&self, rect: Rect) -> Rect {
        rect.union((rect + self.offset).inflate(self.radius, self.radius))
    }

    /// Shadow with the source composited on top.
    fn apply(&self, src: &Image) -> RasterResult<Filtered> {
        let mut out = self.shadow(src)?;
        let src = premultiplied(src.clone())?;
        let clip = out.image.rect();
        blit(
            &mut out.image,
            &src,
            -out.offset.x as i32,
            -out.offset.y as i32,
            clip,
            BlitMode::SourceOver,
        );
        Ok(out)
    }

    /// Shadow first, then the source at `pos`.
    fn draw(
        &self,
        surface: &mut dyn PaintSurface,
        pos: Point,
        src: &Image,
        src_rect: Option<IntRect>,
    ) -> RasterResult<()> {
        let src = source_region(src, src_rect)?;
        if src.is_empty() {
            return Ok(());
        }
        if surface.try_native_filter(&self.descriptor(), pos, &src) {
            tracing::debug!("native drop shadow path taken");
            return Ok(());
        }
        if !visible(surface, pos, self.bounding_rect(src.rect().to_rect())) {
            return Ok(());
        }
        let shadow = self.shadow(&src)?;
        surface.draw_image(pos + shadow.offset, &shadow.image)?;
        surface.draw_image(pos, &src)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/filter/drop_shadow.rs"]
mod tests;
