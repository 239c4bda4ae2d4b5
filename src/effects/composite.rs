//! Per-pixel arithmetic on premultiplied `0xAARRGGBB` words.

use crate::buffer::image::Image;
use crate::foundation::core::{IntRect, Rgba8Premul};
use crate::foundation::math::{gray, mul_div255_u8};

#[inline]
fn channels(px: u32) -> [u8; 4] {
    px.to_be_bytes()
}

#[inline]
fn pack(c: [u8; 4]) -> u32 {
    u32::from_be_bytes(c)
}

/// Source-over: `src + dst * (1 - src.a)`.
pub fn over(dst: u32, src: u32) -> u32 {
    let sa = (src >> 24) as u8;
    if sa == 255 {
        return src;
    }
    if src == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);
    let s = channels(src);
    let d = channels(dst);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = s[i].saturating_add(mul_div255_u8(u16::from(d[i]), inv));
    }
    pack(out)
}

/// Source-in of a solid color over a coverage value: every channel of `color` scaled by
/// `alpha / 255`.
pub fn source_in(alpha: u8, color: Rgba8Premul) -> u32 {
    let a = u16::from(alpha);
    Rgba8Premul {
        r: mul_div255_u8(u16::from(color.r), a),
        g: mul_div255_u8(u16::from(color.g), a),
        b: mul_div255_u8(u16::from(color.b), a),
        a: mul_div255_u8(u16::from(color.a), a),
    }
    .to_argb32()
}

/// Screen blend: `a + b - a * b / 255` per channel, alpha included.
pub fn screen(a: u32, b: u32) -> u32 {
    let a = channels(a);
    let b = channels(b);
    let mut out = [0u8; 4];
    for i in 0..4 {
        let prod = u16::from(mul_div255_u8(u16::from(a[i]), u16::from(b[i])));
        out[i] = (u16::from(a[i]) + u16::from(b[i]) - prod).min(255) as u8;
    }
    pack(out)
}

/// Linear blend `a * (1 - t) + b * t` with `t` in `0..=255`.
pub fn lerp(a: u32, b: u32, t: u8) -> u32 {
    let tt = u16::from(t);
    let it = 255 - tt;
    let a = channels(a);
    let b = channels(b);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = mul_div255_u8(u16::from(a[i]), it)
            .saturating_add(mul_div255_u8(u16::from(b[i]), tt));
    }
    pack(out)
}

/// Gray of the premultiplied color channels, alpha kept.
pub fn grayscale(px: u32) -> u32 {
    let [a, r, g, b] = channels(px);
    let v = gray(r, g, b);
    pack([a, v, v, v])
}

/// Multiply every channel by `alpha / 255`.
pub fn premultiply_by(px: u32, alpha: u8) -> u32 {
    let a = u16::from(alpha);
    let c = channels(px);
    pack([
        mul_div255_u8(u16::from(c[0]), a),
        mul_div255_u8(u16::from(c[1]), a),
        mul_div255_u8(u16::from(c[2]), a),
        mul_div255_u8(u16::from(c[3]), a),
    ])
}

/// Blend mode for [`blit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlitMode {
    /// Replace destination pixels.
    Source,
    /// Composite with [`over`].
    SourceOver,
}

/// Draw 32-bit `src` into 32-bit `dst` with its top-left at `(x, y)`, touching only pixels
/// inside `clip` and the destination bounds.
pub fn blit(dst: &mut Image, src: &Image, x: i32, y: i32, clip: IntRect, mode: BlitMode) {
    debug_assert_eq!(dst.format().bytes_per_pixel(), 4);
    debug_assert_eq!(src.format().bytes_per_pixel(), 4);
    let placed = IntRect::new(x, y, src.width(), src.height());
    let area = placed.intersect(dst.rect()).intersect(clip);
    for dy in area.y..area.bottom() {
        for dx in area.x..area.right() {
            let s = src.pixel32((dx - x) as u32, (dy - y) as u32);
            let (px, py) = (dx as u32, dy as u32);
            let v = match mode {
                BlitMode::Source => s,
                BlitMode::SourceOver => over(dst.pixel32(px, py), s),
            };
            dst.set_pixel32(px, py, v);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
