//! Pixmap filters: convolution, colorize, drop shadow and blur.
//!
//! Every filter reports how far it grows the area it paints ([`PixmapFilter::bounding_rect`]),
//! can render its output into a fresh buffer ([`PixmapFilter::apply`]), and can paint onto a
//! [`PaintSurface`], handing the work to the surface when it has a native implementation.

pub(crate) mod blur;
pub(crate) mod colorize;
pub(crate) mod convolution;
pub(crate) mod descriptor;
pub(crate) mod drop_shadow;

use crate::buffer::image::Image;
use crate::foundation::core::{IntRect, Point, Rect, Vec2};
use crate::foundation::error::RasterResult;
use crate::pixel::format::PixelFormat;
use crate::surface::PaintSurface;

pub use blur::BlurFilter;
pub use colorize::ColorizeFilter;
pub use convolution::ConvolutionFilter;
pub use descriptor::{FilterDescriptor, FilterInstance, parse_filter, parse_filter_chain};
pub use drop_shadow::DropShadowFilter;

/// Output of [`PixmapFilter::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct Filtered {
    /// Premultiplied ARGB32 result, sized to the filter's bounding rect.
    pub image: Image,
    /// Position of `image`'s top-left corner relative to the source's top-left corner.
    pub offset: Vec2,
}

/// Common interface of the pixmap filters.
pub trait PixmapFilter {
    /// Configuration of this filter as a serializable value.
    fn descriptor(&self) -> FilterDescriptor;

    /// Area painted when a source covering `rect` is filtered.
    fn bounding_rect(&self, rect: Rect) -> Rect;

    /// Filter `src` into a new buffer covering the bounding rect of the source.
    fn apply(&self, src: &Image) -> RasterResult<Filtered>;

    /// Paint the filtered `src` (or its `src_rect` part) with its top-left at `pos`.
    fn draw(
        &self,
        surface: &mut dyn PaintSurface,
        pos: Point,
        src: &Image,
        src_rect: Option<IntRect>,
    ) -> RasterResult<()> {
        draw_filtered(self, surface, pos, src, src_rect)
    }
}

/// Software path shared by the filters' `draw`: native hand-off, clip culling, then
/// [`PixmapFilter::apply`] drawn at its offset.
pub(crate) fn draw_filtered<F: PixmapFilter + ?Sized>(
    filter: &F,
    surface: &mut dyn PaintSurface,
    pos: Point,
    src: &Image,
    src_rect: Option<IntRect>,
) -> RasterResult<()> {
    let src = source_region(src, src_rect)?;
    if src.is_empty() {
        return Ok(());
    }
    if surface.try_native_filter(&filter.descriptor(), pos, &src) {
        tracing::debug!("native filter path taken");
        return Ok(());
    }
    if !visible(surface, pos, filter.bounding_rect(src.rect().to_rect())) {
        tracing::trace!("filter output outside clip");
        return Ok(());
    }
    let out = filter.apply(&src)?;
    surface.draw_image(pos + out.offset, &out.image)
}

/// The `src_rect` part of `src` (all of it when `None`) as premultiplied ARGB32.
pub(crate) fn source_region(src: &Image, src_rect: Option<IntRect>) -> RasterResult<Image> {
    let part = match src_rect {
        Some(r) => src.cropped(r)?,
        None => src.clone(),
    };
    premultiplied(part)
}

pub(crate) fn premultiplied(img: Image) -> RasterResult<Image> {
    if img.format() == PixelFormat::Argb32Premultiplied {
        Ok(img)
    } else {
        img.convert_to(PixelFormat::Argb32Premultiplied)
    }
}

/// Whether `rect` placed at `pos` lands inside the surface's clip at all.
pub(crate) fn visible(surface: &dyn PaintSurface, pos: Point, rect: Rect) -> bool {
    let Some(clip) = surface.clip_bounds() else {
        return true;
    };
    let device = surface
        .current_transform()
        .transform_rect_bbox(rect + pos.to_vec2());
    let hit = device.intersect(clip);
    hit.width() > 0.0 && hit.height() > 0.0
}
