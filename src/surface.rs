//! Paint targets the filters draw onto.

use crate::buffer::image::Image;
use crate::effects::composite::{BlitMode, blit};
use crate::filter::FilterDescriptor;
use crate::foundation::core::{Affine, IntRect, Point, Rect};
use crate::foundation::error::{RasterError, RasterResult};
use crate::pixel::format::PixelFormat;

/// Destination of filter drawing.
pub trait PaintSurface {
    /// Composite `image` with its top-left at `pos` (user space), source-over.
    fn draw_image(&mut self, pos: Point, image: &Image) -> RasterResult<()>;

    /// User-to-device transform.
    fn current_transform(&self) -> Affine;

    /// Device-space clip, or `None` when unclipped.
    fn clip_bounds(&self) -> Option<Rect>;

    /// Offer `filter` to a native implementation. Returns `true` if the surface drew it.
    fn try_native_filter(&mut self, _filter: &FilterDescriptor, _pos: Point, _src: &Image) -> bool {
        false
    }
}

/// Software surface backed by a premultiplied ARGB32 [`Image`].
///
/// Only integer translations are supported as transforms.
#[derive(Clone, Debug)]
pub struct RasterSurface {
    target: Image,
    transform: Affine,
    clip: Option<IntRect>,
}

impl RasterSurface {
    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> RasterResult<Self> {
        let target = Image::new(width, height, PixelFormat::Argb32Premultiplied)?;
        Ok(Self::from_image(target))
    }

    /// Surface drawing onto an existing premultiplied ARGB32 image.
    pub fn from_image(target: Image) -> Self {
        debug_assert_eq!(target.format(), PixelFormat::Argb32Premultiplied);
        Self {
            target,
            transform: Affine::IDENTITY,
            clip: None,
        }
    }

    /// Append a translation to the current transform.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.transform *= Affine::translate((dx, dy));
    }

    /// Replace the transform.
    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Restrict drawing to `clip` (device pixels), or lift the restriction.
    pub fn set_clip(&mut self, clip: Option<IntRect>) {
        self.clip = clip;
    }

    /// Current pixels.
    pub fn image(&self) -> &Image {
        &self.target
    }

    /// Consume the surface and return its pixels.
    pub fn into_image(self) -> Image {
        self.target
    }
}

impl PaintSurface for RasterSurface {
    fn draw_image(&mut self, pos: Point, image: &Image) -> RasterResult<()> {
        let [a, b, c, d, _, _] = self.transform.as_coeffs();
        if (a, b, c, d) != (1.0, 0.0, 0.0, 1.0) {
            return Err(RasterError::validation(
                "RasterSurface only supports translation transforms",
            ));
        }
        let device = self.transform * pos;
        let src = if image.format() == PixelFormat::Argb32Premultiplied {
            std::borrow::Cow::Borrowed(image)
        } else {
            std::borrow::Cow::Owned(image.convert_to(PixelFormat::Argb32Premultiplied)?)
        };
        let clip = self.clip.unwrap_or_else(|| self.target.rect());
        blit(
            &mut self.target,
            &src,
            device.x.round() as i32,
            device.y.round() as i32,
            clip,
            BlitMode::SourceOver,
        );
        Ok(())
    }

    fn current_transform(&self) -> Affine {
        self.transform
    }

    fn clip_bounds(&self) -> Option<Rect> {
        self.clip.map(IntRect::to_rect)
    }
}

#[cfg(test)]
#[path = "../tests/unit/surface/surface.rs"]
mod tests;
