//! Exponential (IIR) blur with the 2x downsample shortcut for large radii.

pub(crate) mod exponential;
pub(crate) mod scale;

use crate::buffer::image::Image;
use crate::foundation::error::{RasterError, RasterResult};
use crate::pixel::format::PixelFormat;

pub use exponential::{DEFAULT_APREC, DEFAULT_ZPREC, blur_alpha, expblur};
pub use scale::{half_scaled, scaled_up};

use exponential::PASSTHROUGH_RADIUS;

/// Radius from which [`blur_image`] blurs a half-size copy instead.
pub const DOWNSAMPLE_RADIUS: f64 = 4.0;

/// Whether the blur hands back its internal transposed buffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transposed {
    /// Result has the input's orientation.
    #[default]
    None,
    /// Result is the input turned 270°.
    Forward,
    /// Result is the input turned 90°.
    Backward,
}

/// Caller preference forwarded to the blur's `quality` switch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlurHint {
    /// Single pass at the full radius.
    #[default]
    Performance,
    /// Two passes at half the radius.
    Quality,
    /// Same as performance.
    Animation,
}

impl BlurHint {
    /// Return `true` when this hint asks for the two-pass blur.
    pub fn is_quality(self) -> bool {
        matches!(self, BlurHint::Quality)
    }
}

/// Blur configuration.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BlurParams {
    /// Radius in pixels, `>= 0`.
    pub radius: f64,
    /// Two half-radius passes instead of one.
    #[serde(default)]
    pub quality: bool,
    /// Blur only the alpha byte of 32-bit pixels.
    #[serde(default)]
    pub alpha_only: bool,
    /// Orientation of the returned buffer.
    #[serde(default)]
    pub transposed: Transposed,
}

impl BlurParams {
    /// Full-color, single-pass blur with the given radius.
    pub fn new(radius: f64) -> Self {
        Self {
            radius,
            quality: false,
            alpha_only: false,
            transposed: Transposed::None,
        }
    }

    /// Same parameters with `quality` taken from a hint.
    pub fn with_hint(mut self, hint: BlurHint) -> Self {
        self.quality = hint.is_quality();
        self
    }

    /// Same parameters, alpha byte only.
    pub fn alpha_only(mut self) -> Self {
        self.alpha_only = true;
        self
    }

    /// Reject non-finite or negative radii.
    pub fn validate(&self) -> RasterResult<()> {
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(RasterError::validation(
                "blur radius must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Output of [`blur_image`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blurred {
    /// Blurred pixels, possibly at reduced size.
    pub image: Image,
    /// Factor to scale `image` by when drawing it: `1` or `2`.
    pub scale: u32,
}

impl Blurred {
    /// Restore the blurred image to `width x height` if it was downsampled.
    pub fn into_full_size(self, width: u32, height: u32) -> RasterResult<Image> {
        if self.scale == 1 {
            return Ok(self.image);
        }
        scaled_up(&self.image, width, height)
    }
}

/// Blur `image` with the canonical 12/10-bit exponential blur.
///
/// Formats other than gray, RGB32 and premultiplied ARGB32 are converted to premultiplied
/// ARGB32 first. Radii at or above [`DOWNSAMPLE_RADIUS`] on images of at least 2x2 are
/// blurred on a half-size copy with half the radius; the returned `scale` tells the caller to
/// draw the result twice as large.
#[tracing::instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn blur_image(image: &Image, params: &BlurParams) -> RasterResult<Blurred> {
    params.validate()?;
    let mut work = if image.format().is_blur_native() {
        image.clone()
    } else {
        image.convert_to(PixelFormat::Argb32Premultiplied)?
    };
    if params.radius <= PASSTHROUGH_RADIUS {
        tracing::trace!("radius below passthrough threshold");
        return Ok(Blurred {
            image: work,
            scale: 1,
        });
    }

    let mut radius = params.radius;
    let mut scale = 1;
    if radius >= DOWNSAMPLE_RADIUS && work.width() >= 2 && work.height() >= 2 {
        work = half_scaled(&work)?;
        scale = 2;
        radius *= 0.5;
        tracing::debug!(radius, "downsampled 2x for large radius");
    }

    let image = expblur::<DEFAULT_APREC, DEFAULT_ZPREC>(
        work,
        radius,
        params.quality,
        params.alpha_only,
        params.transposed,
    )?;
    Ok(Blurred { image, scale })
}

#[cfg(test)]
#[path = "../../tests/unit/blur/mod.rs"]
mod tests;
