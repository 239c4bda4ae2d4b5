use super::*;
use crate::pixel::element::Rgb24;
use crate::rotate::cached::CachedWrite;

#[test]
fn scheduler_covers_span_with_short_tail() {
    let spans: Vec<_> = TileScheduler::new(0..70, 32).collect();
    assert_eq!(spans, vec![0..32, 32..64, 64..70]);
    assert_eq!(TileScheduler::new(5..5, 32).count(), 0);
    let spans: Vec<_> = TileScheduler::new(3..35, 32).collect();
    assert_eq!(spans, vec![3..35]);
}

fn rotate_bytes<R: RotateStrategy, P: Pixel>(w: usize, h: usize, src_bytes: &[u8]) -> Vec<u8> {
    let src = Plane::<P>::new(src_bytes, w, h, w * P::BYTES).unwrap();
    let mut out = vec![0u8; w * h * P::BYTES];
    let mut dst = PlaneMut::<P>::new(&mut out, h, w, h * P::BYTES).unwrap();
    R::rotate_quarter(QuarterTurn::rotate270(w, h), &src, &mut dst);
    out
}

#[test]
fn tiled_spans_multiple_tiles_like_cached_write() {
    let (w, h) = (TILE * 2 + 3, TILE + 5);
    let bytes: Vec<u8> = (0..w * h * 2).map(|i| (i % 251) as u8).collect();
    let expected = rotate_bytes::<CachedWrite, u16>(w, h, &bytes);
    assert_eq!(rotate_bytes::<Tiled, u16>(w, h, &bytes), expected);
    assert_eq!(rotate_bytes::<TiledUnpacked, u16>(w, h, &bytes), expected);
}

#[test]
fn tiled_falls_back_for_24_bit_elements() {
    let (w, h) = (35, 3);
    let bytes: Vec<u8> = (0..w * h * 3).map(|i| (i * 13 % 256) as u8).collect();
    let expected = rotate_bytes::<CachedWrite, Rgb24>(w, h, &bytes);
    assert_eq!(rotate_bytes::<Tiled, Rgb24>(w, h, &bytes), expected);
}
