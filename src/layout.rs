use crate::block::Block;
use std::marker::PhantomData;

/// Derived geometry of a filter configuration.
///
/// Everything here is an associated constant, so a configuration that breaks
/// one of the packing rules is rejected when the filter type is instantiated
/// rather than on first use.
pub(crate) struct Layout<B, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize> {
    _block: PhantomData<B>,
}

impl<B: Block, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize> Layout<B, NUM_BINS, K, BITS_PER_BIN> {
    pub(crate) const VALID: () = {
        assert!(NUM_BINS > 0, "a counting bloom filter needs at least one bin");
        assert!(K > 0, "a counting bloom filter needs at least one hash function");
        assert!(BITS_PER_BIN > 0, "bins must be at least one bit wide");
        assert!(BITS_PER_BIN <= B::BITS, "bins can't be wider than the storage block");
        // a bin never straddles two blocks
        assert!(B::BITS % BITS_PER_BIN == 0, "bin width must evenly divide the block width");
    };

    pub(crate) const BINS_PER_BLOCK: usize = B::BITS / BITS_PER_BIN;
    pub(crate) const BIT_CAPACITY: usize = NUM_BINS * BITS_PER_BIN;
    pub(crate) const ARRAY_SIZE: usize = (Self::BIT_CAPACITY + B::BITS - 1) / B::BITS;
    pub(crate) const EFFECTIVE_NUM_BINS: usize = Self::ARRAY_SIZE * Self::BINS_PER_BLOCK;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_fit() {
        type L = Layout<u64, 64, 2, 4>;
        let () = L::VALID;
        assert_eq!(16, L::BINS_PER_BLOCK);
        assert_eq!(256, L::BIT_CAPACITY);
        assert_eq!(4, L::ARRAY_SIZE);
        assert_eq!(64, L::EFFECTIVE_NUM_BINS);
    }

    #[test]
    fn rounds_up_to_whole_blocks() {
        type L = Layout<u32, 100, 3, 8>;
        let () = L::VALID;
        assert_eq!(4, L::BINS_PER_BLOCK);
        assert_eq!(25, L::ARRAY_SIZE);

        type M = Layout<u8, 10, 1, 2>;
        let () = M::VALID;
        assert_eq!(3, M::ARRAY_SIZE);
        assert_eq!(12, M::EFFECTIVE_NUM_BINS);
    }

    #[test]
    fn full_width_bins() {
        type L = Layout<u16, 5, 1, 16>;
        let () = L::VALID;
        assert_eq!(1, L::BINS_PER_BLOCK);
        assert_eq!(5, L::ARRAY_SIZE);
        assert_eq!(5, L::EFFECTIVE_NUM_BINS);
    }
}
