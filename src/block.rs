use std::fmt::Debug;
use std::hash::Hash;
use std::ops::{Add, BitAnd, BitAndAssign, BitOr, BitOrAssign, Not, Shl, Shr, Sub};

mod sealed {
    pub trait Sealed {}
}

/// Unsigned integer used as the packing unit of the counter array.
///
/// Implemented for every unsigned primitive and sealed, so signed or
/// non-integral storage can't be plugged in.
pub trait Block:
    sealed::Sealed
    + Copy
    + Eq
    + Ord
    + Hash
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + BitAnd<Output = Self>
    + BitAndAssign
    + BitOr<Output = Self>
    + BitOrAssign
    + Not<Output = Self>
    + Shl<usize, Output = Self>
    + Shr<usize, Output = Self>
{
    /// Width of the block in bits.
    const BITS: usize;
    const ZERO: Self;
    const ONE: Self;

    /// Returns a block with the lowest `bits` bits set, `bits` in `1..=BITS`.
    fn low_mask(bits: usize) -> Self;
}

macro_rules! impl_block {
    ($($t:ty),*) => {
        $(
            impl sealed::Sealed for $t {}

            impl Block for $t {
                const BITS: usize = <$t>::BITS as usize;
                const ZERO: Self = 0;
                const ONE: Self = 1;

                #[inline(always)]
                fn low_mask(bits: usize) -> Self {
                    <$t>::MAX >> (<Self as Block>::BITS - bits)
                }
            }
        )*
    };
}

impl_block!(u8, u16, u32, u64, u128, usize);
