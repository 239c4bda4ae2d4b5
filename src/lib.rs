//! rasterfx transforms premultiplied pixel buffers on the CPU.
//!
//! - Rotate strided buffers by quarter turns with interchangeable cache strategies
//!   ([`rotate`], [`Image::rotated`])
//! - Blur with a fixed-point exponential (IIR) blur ([`blur::blur_image`])
//! - Filter pixmaps with convolution, colorize, drop shadow and blur ([`filter`]), drawing onto
//!   a [`surface::PaintSurface`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod buffer;
mod foundation;
mod pixel;

pub mod blur;
pub(crate) mod effects;
pub mod filter;
pub mod rotate;
pub mod surface;

pub use crate::buffer::image::Image;
pub use crate::buffer::plane::{Plane, PlaneMut};
pub use crate::effects::composite::{BlitMode, blit};
pub use crate::foundation::core::{Affine, IntRect, Point, Rect, Rgba8Premul, Vec2};
pub use crate::foundation::error::{RasterError, RasterResult};
pub use crate::pixel::element::{FromPixel, Pixel, Rgb24};
pub use crate::pixel::format::PixelFormat;

pub use crate::blur::{BlurHint, BlurParams, Blurred, Transposed, blur_image};
pub use crate::filter::{
    BlurFilter, ColorizeFilter, ConvolutionFilter, DropShadowFilter, FilterDescriptor,
    Filtered, PixmapFilter, parse_filter_chain,
};
pub use crate::rotate::{RotateStrategy, RotationDirection, mem_rotate_fn, rotate, rotate_with};
pub use crate::surface::{PaintSurface, RasterSurface};
