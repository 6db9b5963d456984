//! Bit/byte size value with overflow-checked arithmetic.
//!
//! Mirrors the kind of small, Copy value type the donor's `byte_span.rs`
//! stores spans in, but carries bit-granularity and alignment instead of a
//! half-open byte range.

const BITS_PER_BYTE: u64 = 8;

/// A non-negative count of bits.
///
/// Two `Size` values compare lexicographically by their bit count. Arithmetic
/// either saturates at zero (subtraction) or panics on overflow, matching the
/// "saturating-at-zero subtraction" and "overflow-checked" requirements; there
/// is no silent wraparound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Size {
    bits: u64,
}

impl Size {
    pub const ZERO: Size = Size { bits: 0 };

    pub const fn from_bits(bits: u64) -> Self {
        Size { bits }
    }

    pub const fn from_bytes(bytes: u64) -> Self {
        Size {
            bits: bytes * BITS_PER_BYTE,
        }
    }

    pub const fn bits(self) -> u64 {
        self.bits
    }

    /// Whole bytes, rounding down. Callers that need the partial tail should
    /// check `bits() % 8` themselves.
    pub const fn bytes(self) -> u64 {
        self.bits / BITS_PER_BYTE
    }

    /// Rounds this size up to a multiple of `alignment_bits`. A zero
    /// alignment is treated as "no alignment" and returns `self` unchanged.
    pub fn align_to(self, alignment_bits: u64) -> Size {
        if alignment_bits == 0 {
            return self;
        }
        let remainder = self.bits % alignment_bits;
        if remainder == 0 {
            self
        } else {
            Size {
                bits: self
                    .bits
                    .checked_add(alignment_bits - remainder)
                    .expect("Size::align_to overflow"),
            }
        }
    }

    /// Subtraction that floors at zero rather than panicking or wrapping.
    pub fn saturating_sub(self, rhs: Size) -> Size {
        Size {
            bits: self.bits.saturating_sub(rhs.bits),
        }
    }
}

impl std::ops::Add for Size {
    type Output = Size;
    fn add(self, rhs: Size) -> Size {
        Size {
            bits: self.bits.checked_add(rhs.bits).expect("Size::add overflow"),
        }
    }
}

impl std::ops::AddAssign for Size {
    fn add_assign(&mut self, rhs: Size) {
        *self = *self + rhs;
    }
}

impl std::ops::SubAssign for Size {
    /// Saturates at zero, consistent with [`Size::saturating_sub`].
    fn sub_assign(&mut self, rhs: Size) {
        *self = self.saturating_sub(rhs);
    }
}

impl std::ops::Mul<u64> for Size {
    type Output = Size;
    fn mul(self, rhs: u64) -> Size {
        Size {
            bits: self.bits.checked_mul(rhs).expect("Size::mul overflow"),
        }
    }
}

impl std::ops::MulAssign<u64> for Size {
    fn mul_assign(&mut self, rhs: u64) {
        *self = *self * rhs;
    }
}
