use std::fmt;

/// Fixed-width pixel element that the rotation kernels move around.
///
/// Elements are read and written as little-endian bytes. For widths that divide 32 bits the
/// element can also be coalesced with its neighbours into one 32-bit store: element `i` of a
/// pack lands in bits `[i * 32 / PACK, (i + 1) * 32 / PACK)`, which is exactly the byte order
/// of storing the elements one by one.
pub trait Pixel: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Byte width of one element.
    const BYTES: usize;

    /// Elements per packed 32-bit word, or `0` when the width does not divide 32 bits.
    const PACK: usize = if Self::BYTES < 4 && 4 % Self::BYTES == 0 {
        4 / Self::BYTES
    } else if Self::BYTES == 4 {
        1
    } else {
        0
    };

    /// Decode from the first [`Self::BYTES`] bytes of `bytes`.
    fn read(bytes: &[u8]) -> Self;

    /// Encode into the first [`Self::BYTES`] bytes of `bytes`.
    fn write(self, bytes: &mut [u8]);

    /// Zero-extended element value, as placed into a packed word.
    fn bits(self) -> u32;
}

impl Pixel for u8 {
    const BYTES: usize = 1;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[0] = self;
    }

    #[inline]
    fn bits(self) -> u32 {
        u32::from(self)
    }
}

impl Pixel for u16 {
    const BYTES: usize = 2;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        u16::from_le_bytes([bytes[0], bytes[1]])
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn bits(self) -> u32 {
        u32::from(self)
    }
}

impl Pixel for u32 {
    const BYTES: usize = 4;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_le_bytes());
    }

    #[inline]
    fn bits(self) -> u32 {
        self
    }
}

/// 24-bit packed RGB element (`R, G, B` in memory).
///
/// Three bytes never tile a 32-bit word, so this element has no packed fast path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb24(pub [u8; 3]);

impl Pixel for Rgb24 {
    const BYTES: usize = 3;

    #[inline]
    fn read(bytes: &[u8]) -> Self {
        Rgb24([bytes[0], bytes[1], bytes[2]])
    }

    #[inline]
    fn write(self, bytes: &mut [u8]) {
        bytes[..3].copy_from_slice(&self.0);
    }

    #[inline]
    fn bits(self) -> u32 {
        u32::from_le_bytes([self.0[0], self.0[1], self.0[2], 0])
    }
}

/// Conversion applied to every element while rotating from `S` into `Self`.
pub trait FromPixel<S>: Pixel {
    /// Convert one source element.
    fn from_pixel(src: S) -> Self;
}

impl<P: Pixel> FromPixel<P> for P {
    #[inline]
    fn from_pixel(src: P) -> P {
        src
    }
}

/// `0xAARRGGBB` to RGB565, dropping alpha and the low channel bits.
impl FromPixel<u32> for u16 {
    #[inline]
    fn from_pixel(src: u32) -> u16 {
        (((src >> 8) & 0xf800) | ((src >> 5) & 0x07e0) | ((src >> 3) & 0x001f)) as u16
    }
}

/// RGB565 to opaque `0xFFRRGGBB`, replicating the high bits into the low ones.
impl FromPixel<u16> for u32 {
    #[inline]
    fn from_pixel(src: u16) -> u32 {
        let src = u32::from(src);
        let r = ((src >> 8) & 0xf8) | ((src >> 13) & 0x07);
        let g = ((src >> 3) & 0xfc) | ((src >> 9) & 0x03);
        let b = ((src << 3) & 0xf8) | ((src >> 2) & 0x07);
        0xff00_0000 | (r << 16) | (g << 8) | b
    }
}

impl FromPixel<u32> for Rgb24 {
    #[inline]
    fn from_pixel(src: u32) -> Rgb24 {
        Rgb24([(src >> 16) as u8, (src >> 8) as u8, src as u8])
    }
}

impl FromPixel<Rgb24> for u32 {
    #[inline]
    fn from_pixel(src: Rgb24) -> u32 {
        let [r, g, b] = src.0;
        0xff00_0000 | (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }
}

/// Luminance of the color channels; alpha is dropped.
impl FromPixel<u32> for u8 {
    #[inline]
    fn from_pixel(src: u32) -> u8 {
        crate::foundation::math::gray((src >> 16) as u8, (src >> 8) as u8, src as u8)
    }
}
