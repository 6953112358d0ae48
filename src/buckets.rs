use crate::block::Block;
use tracing::trace;

/// Packed array of fixed-width saturating counters.
///
/// Each block holds `B::BITS / bucket_size` buckets; bucket `i` lives in block
/// `i / buckets_per_block` at bit offset `(i % buckets_per_block) * bucket_size`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Buckets<B: Block> {
    data: Vec<B>,
    bucket_size: usize,
    buckets_per_block: usize,
    max: B,
}

impl<B: Block> Buckets<B> {
    /// Creates `block_count` zeroed blocks of buckets that are each
    /// `bucket_size` bits wide. `bucket_size` must evenly divide `B::BITS`.
    pub fn new(block_count: usize, bucket_size: usize) -> Self {
        debug_assert!(bucket_size > 0 && bucket_size <= B::BITS && B::BITS % bucket_size == 0);
        Self {
            data: vec![B::ZERO; block_count],
            bucket_size,
            buckets_per_block: B::BITS / bucket_size,
            max: B::low_mask(bucket_size),
        }
    }

    /// Number of addressable buckets, padding in the last block included.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.data.len() * self.buckets_per_block
    }

    pub fn reset(&mut self) {
        self.data.iter_mut().for_each(|x| *x = B::ZERO)
    }

    #[inline(always)]
    fn locate(&self, bucket: usize) -> (usize, usize) {
        (bucket / self.buckets_per_block, (bucket % self.buckets_per_block) * self.bucket_size)
    }

    pub fn get(&self, bucket: usize) -> B {
        let (block, offset) = self.locate(bucket);
        (self.data[block] >> offset) & self.max
    }

    #[inline(always)]
    pub fn is_nonzero(&self, bucket: usize) -> bool {
        self.get(bucket) != B::ZERO
    }

    fn set(&mut self, bucket: usize, value: B) {
        let (block, offset) = self.locate(bucket);
        let word = &mut self.data[block];
        *word = (*word & !(self.max << offset)) | ((value & self.max) << offset);
    }

    /// Adds one to the bucket unless it already holds the maximum value.
    /// Returns `false` when the increment was dropped.
    pub fn increment(&mut self, bucket: usize) -> bool {
        let value = self.get(bucket);
        if value == self.max {
            trace!(bucket, "bucket saturated, increment dropped");
            return false;
        }
        self.set(bucket, value + B::ONE);
        true
    }

    /// Subtracts one from the bucket unless it is already zero.
    /// Returns `false` when the decrement was dropped.
    pub fn decrement(&mut self, bucket: usize) -> bool {
        let value = self.get(bucket);
        if value == B::ZERO {
            trace!(bucket, "bucket already empty, decrement dropped");
            return false;
        }
        self.set(bucket, value - B::ONE);
        true
    }

    /// Number of buckets holding a nonzero value.
    pub fn count_nonzero(&self) -> usize {
        self.data
            .iter()
            .filter(|&&word| word != B::ZERO)
            .map(|&word| {
                (0..self.buckets_per_block)
                    .filter(|i| (word >> (i * self.bucket_size)) & self.max != B::ZERO)
                    .count()
            })
            .sum()
    }

    /// Bitwise OR of every block with the matching block of `other`.
    pub fn union_with(&mut self, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        self.data.iter_mut().zip(other.data.iter()).for_each(|(a, b)| *a |= *b)
    }

    /// Keeps, per bucket, the smaller of the two values. With one-bit buckets
    /// this is exactly a bitwise AND of the blocks.
    pub fn intersect_with(&mut self, other: &Self) {
        debug_assert_eq!(self.data.len(), other.data.len());
        if self.bucket_size == 1 {
            self.data.iter_mut().zip(other.data.iter()).for_each(|(a, b)| *a &= *b);
            return;
        }
        let (bucket_size, max) = (self.bucket_size, self.max);
        for (a, &b) in self.data.iter_mut().zip(other.data.iter()) {
            let mut word = B::ZERO;
            for i in 0..self.buckets_per_block {
                let offset = i * bucket_size;
                let lhs = (*a >> offset) & max;
                let rhs = (b >> offset) & max;
                word |= lhs.min(rhs) << offset;
            }
            *a = word;
        }
    }
}
