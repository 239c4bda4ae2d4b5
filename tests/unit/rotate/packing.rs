use super::*;
use crate::pixel::element::Rgb24;

#[test]
fn bit_packer_places_first_element_in_low_bits() {
    let mut packer = BitPacker::<u8>::new();
    assert_eq!(packer.push(0x11), None);
    assert_eq!(packer.push(0x22), None);
    assert_eq!(packer.push(0x33), None);
    assert_eq!(packer.push(0x44), Some(0x4433_2211));
    assert_eq!(packer.push(0x55), None);

    let mut packer = BitPacker::<u16>::new();
    assert_eq!(packer.push(0xbeef), None);
    assert_eq!(packer.push(0xdead), Some(0xdead_beef));

    let mut packer = BitPacker::<u32>::new();
    assert_eq!(packer.push(7), Some(7));
}

#[test]
fn packed_word_matches_element_stores() {
    let mut packer = BitPacker::<u16>::new();
    packer.push(0x1234);
    let word = packer.push(0xabcd).unwrap();
    assert_eq!(word.to_le_bytes(), [0x34, 0x12, 0xcd, 0xab]);
}

#[test]
fn aligned_prefix_counts_elements_to_boundary() {
    assert_eq!(aligned_prefix::<u8>(0, 10), 0);
    assert_eq!(aligned_prefix::<u8>(1, 10), 3);
    assert_eq!(aligned_prefix::<u8>(3, 10), 1);
    assert_eq!(aligned_prefix::<u8>(1, 2), 2);
    assert_eq!(aligned_prefix::<u16>(2, 10), 1);
    assert_eq!(aligned_prefix::<u16>(1, 10), 0);
    assert_eq!(aligned_prefix::<u32>(2, 10), 0);
    assert_eq!(aligned_prefix::<Rgb24>(1, 10), 1);
    assert_eq!(aligned_prefix::<Rgb24>(2, 10), 0);
}

#[test]
fn bit_packer_shift_follows_pack_width() {
    assert_eq!(BitPacker::<u8>::SHIFT, 8);
    assert_eq!(BitPacker::<u16>::SHIFT, 16);
    assert_eq!(BitPacker::<u32>::SHIFT, 32);
    assert_eq!(BitPacker::<Rgb24>::SHIFT, 0);
}

#[test]
fn packing_into_offset_destination_matches_cached_read() {
    let (w, h) = (7usize, 9usize);
    let src_bytes: Vec<u8> = (0..w * h).map(|i| (i * 7 + 3) as u8).collect();
    let src = Plane::<u8>::new(&src_bytes, w, h, w).unwrap();

    let mut expected = vec![0u8; w * h];
    {
        let mut dst = PlaneMut::<u8>::new(&mut expected, h, w, h).unwrap();
        CachedRead::rotate_quarter(QuarterTurn::rotate90(w, h), &src, &mut dst);
    }

    for offset in 0..4 {
        let mut raw = vec![0u8; w * h + 4];
        let mut dst = PlaneMut::<u8>::new(&mut raw[offset..], h, w, h).unwrap();
        Packing::rotate_quarter(QuarterTurn::rotate90(w, h), &src, &mut dst);
        assert_eq!(
            &raw[offset..offset + w * h],
            &expected[..],
            "offset {offset}"
        );
    }
}
