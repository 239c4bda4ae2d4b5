pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Per-byte average of two packed 32-bit pixels without overflow.
///
/// `((a ^ b) & mask) >> 1` is half the differing bits with the low bit of each byte masked
/// off so nothing leaks into the neighbouring byte; `a & b` is the shared part. Rounds down.
pub(crate) fn avg_argb32(a: u32, b: u32) -> u32 {
    (((a ^ b) & 0xfefe_fefe) >> 1) + (a & b)
}

/// Per-field average of two RGB565 pixels, same trick with a 5-6-5 aware mask.
pub(crate) fn avg_rgb565(a: u16, b: u16) -> u16 {
    (((a ^ b) & 0xf7de) >> 1) + (a & b)
}

/// Weighted luminance `(11 r + 16 g + 5 b) / 32`.
pub(crate) fn gray(r: u8, g: u8, b: u8) -> u8 {
    ((u32::from(r) * 11 + u32::from(g) * 16 + u32::from(b) * 5) / 32) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
