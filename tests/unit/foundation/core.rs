use super::*;

#[test]
fn premul_from_straight_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    let want = Rgba8Premul {
        r: 128,
        g: 64,
        b: 0,
        a: 128,
    };
    assert_eq!(c, want);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(10, 20, 30, 0),
        Rgba8Premul::transparent()
    );
}

#[test]
fn argb32_packing_roundtrips_channels() {
    let c = Rgba8Premul {
        r: 1,
        g: 2,
        b: 3,
        a: 4,
    };
    assert_eq!(c.to_argb32(), 0x0401_0203);
    assert_eq!(Rgba8Premul::from_argb32(0x0401_0203), c);
}

#[test]
fn covering_rounds_outward() {
    let r = IntRect::covering(Rect::new(-0.5, 1.2, 3.1, 4.0));
    assert_eq!(r, IntRect::new(-1, 1, 5, 3));
}

#[test]
fn intersect_handles_disjoint_and_overlap() {
    let a = IntRect::new(0, 0, 10, 10);
    let b = IntRect::new(5, -3, 10, 5);
    assert_eq!(a.intersect(b), IntRect::new(5, 0, 5, 2));
    assert!(a.intersect(IntRect::new(20, 20, 1, 1)).is_empty());
}

#[test]
fn straight_rgba_unpremultiplies() {
    let c = Rgba8Premul::from_straight_rgba(255, 0, 255, 128);
    assert_eq!(c.to_straight_rgba(), [255, 0, 255, 128]);
    let opaque = Rgba8Premul::opaque(1, 2, 3);
    assert_eq!(opaque.to_straight_rgba(), [1, 2, 3, 255]);
    assert_eq!(Rgba8Premul::transparent().to_straight_rgba(), [0, 0, 0, 0]);
}
