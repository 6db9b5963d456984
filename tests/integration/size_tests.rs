//! `Size` arithmetic beyond the inline unit tests: the assignment operators
//! and a realistic struct-layout-style accumulation.

use choir::size::Size;

#[test]
fn add_assign_accumulates_bits() {
    let mut total = Size::ZERO;
    total += Size::from_bits(8);
    total += Size::from_bytes(2);
    assert_eq!(total.bits(), 24);
}

#[test]
fn sub_assign_saturates_at_zero() {
    let mut remaining = Size::from_bits(4);
    remaining -= Size::from_bits(10);
    assert_eq!(remaining, Size::ZERO);
}

#[test]
fn mul_assign_scales_by_element_count() {
    let mut total = Size::from_bytes(4);
    total *= 3;
    assert_eq!(total.bytes(), 12);
}

#[test]
fn struct_layout_style_accumulation_with_alignment() {
    // Three fields: a bool (1 byte), an i32 (4 bytes, 4-byte aligned), and a
    // byte: simulate padding being inserted between the bool and the i32.
    let mut offset = Size::from_bytes(1); // after the bool
    offset = offset.align_to(32); // align for the i32 (bits)
    offset += Size::from_bytes(4);
    offset += Size::from_bytes(1);
    assert_eq!(offset.bytes(), 9);
}
