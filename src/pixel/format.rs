/// Runtime pixel-format tag for [`crate::Image`] buffers.
///
/// All multi-byte elements are stored little-endian, so a 32-bit `0xAARRGGBB` word sits in
/// memory as `B, G, R, A`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PixelFormat {
    /// 8-bit gray or single-channel mask.
    Gray8,
    /// 16-bit RGB 5-6-5.
    Rgb16,
    /// 24-bit packed RGB, bytes `R, G, B`.
    Rgb24,
    /// 32-bit `0xFFRRGGBB`, alpha ignored.
    Rgb32,
    /// 32-bit `0xAARRGGBB`, straight alpha.
    Argb32,
    /// 32-bit `0xAARRGGBB`, premultiplied alpha. Canonical format for blur and filters.
    Argb32Premultiplied,
}

impl PixelFormat {
    /// Every supported format, in declaration order.
    pub const ALL: [PixelFormat; 6] = [
        PixelFormat::Gray8,
        PixelFormat::Rgb16,
        PixelFormat::Rgb24,
        PixelFormat::Rgb32,
        PixelFormat::Argb32,
        PixelFormat::Argb32Premultiplied,
    ];

    /// Bytes occupied by one pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::Rgb16 => 2,
            PixelFormat::Rgb24 => 3,
            PixelFormat::Rgb32 | PixelFormat::Argb32 | PixelFormat::Argb32Premultiplied => 4,
        }
    }

    /// Bits per pixel.
    pub fn depth(self) -> u32 {
        (self.bytes_per_pixel() * 8) as u32
    }

    /// Return `true` when the format carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, PixelFormat::Argb32 | PixelFormat::Argb32Premultiplied)
    }

    /// Return `true` for formats the blur can process without conversion.
    pub fn is_blur_native(self) -> bool {
        matches!(
            self,
            PixelFormat::Gray8 | PixelFormat::Rgb32 | PixelFormat::Argb32Premultiplied
        )
    }
}
