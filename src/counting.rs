use crate::block::Block;
use crate::buckets::Buckets;
use crate::error::{Error, Result};
use crate::hash::{DefaultHashFunction, HashFunction, HashKernels, SeedableHashFunction};
use crate::layout::Layout;
use crate::{BloomFilter, RemovableBloomFilter};
use std::borrow::Borrow;
use std::convert::TryFrom;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};
use tracing::debug;

/// Counting bloom filter over items of type `T`.
///
/// * `NUM_BINS`: number of counters the hash functions map into
/// * `K`: number of hash functions
/// * `BITS_PER_BIN`: width of each counter, must evenly divide the width of `B`
/// * `B`: unsigned integer the counters are packed into
/// * `H`: hash function type, `K` instances of it make up the hash family
///
/// The whole configuration is part of the type, so `union`, `intersection`,
/// `swap` and `==` only accept filters configured the same way. An invalid
/// configuration fails to compile once the filter type is instantiated.
///
/// Counters saturate at `2^BITS_PER_BIN - 1`. A saturated counter stops
/// counting further inserts, so removing items that share it can later give a
/// false negative. Removing an item that was never inserted decrements
/// counters owned by other items and has the same effect. Neither is reported.
pub struct Filter<
    T: ?Sized,
    const NUM_BINS: usize,
    const K: usize,
    const BITS_PER_BIN: usize = 4,
    B: Block = usize,
    H = DefaultHashFunction,
> {
    buckets: Buckets<B>,            // filter data
    hash_kernels: HashKernels<H, K>, // hash functions
    _item: PhantomData<fn(&T)>,
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H>
    Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    /// Create an empty filter that hashes with the given functions.
    pub fn with_hash_functions(hash_functions: [H; K]) -> Self {
        let () = Layout::<B, NUM_BINS, K, BITS_PER_BIN>::VALID;
        let array_size = Layout::<B, NUM_BINS, K, BITS_PER_BIN>::ARRAY_SIZE;
        debug!(
            num_bins = NUM_BINS,
            bits_per_bin = BITS_PER_BIN,
            hash_functions = K,
            block_bits = B::BITS,
            array_size,
            "creating counting bloom filter"
        );
        Self {
            buckets: Buckets::new(array_size, BITS_PER_BIN),
            hash_kernels: HashKernels::new(hash_functions),
            _item: PhantomData,
        }
    }

    /// Create an empty filter from a hash family only known at runtime.
    /// Fails unless exactly `K` functions are given.
    pub fn try_with_hash_functions(hash_functions: Vec<H>) -> Result<Self> {
        let actual = hash_functions.len();
        let hash_functions =
            <[H; K]>::try_from(hash_functions).map_err(|_| Error::HashFunctionCount { expected: K, actual })?;
        Ok(Self::with_hash_functions(hash_functions))
    }

    pub fn hash_functions(&self) -> &[H; K] {
        self.hash_kernels.functions()
    }

    /// Number of bins the hash functions map into.
    pub fn num_bins() -> usize {
        NUM_BINS
    }

    pub fn num_hash_functions() -> usize {
        K
    }

    pub fn bits_per_bin() -> usize {
        BITS_PER_BIN
    }

    /// Total bits used by the requested bins, `NUM_BINS * BITS_PER_BIN`.
    pub fn bit_capacity() -> usize {
        Layout::<B, NUM_BINS, K, BITS_PER_BIN>::BIT_CAPACITY
    }

    pub fn bins_per_block() -> usize {
        Layout::<B, NUM_BINS, K, BITS_PER_BIN>::BINS_PER_BLOCK
    }

    /// Number of blocks backing the filter.
    pub fn array_size() -> usize {
        Layout::<B, NUM_BINS, K, BITS_PER_BIN>::ARRAY_SIZE
    }

    /// Number of addressable bins. Can exceed [`num_bins`](Self::num_bins)
    /// when the last block is only partly used; the extra bins stay empty.
    pub fn effective_num_bins() -> usize {
        Layout::<B, NUM_BINS, K, BITS_PER_BIN>::EFFECTIVE_NUM_BINS
    }

    /// Number of nonzero bins. This is an occupancy figure, not the number
    /// of items inserted.
    pub fn count(&self) -> usize {
        self.buckets.count_nonzero()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Estimates the false positive rate as `(1 - e^(-k * n / m))^k`, with `n`
    /// approximated by [`count`](Self::count) and `m` the number of bins.
    pub fn false_positive_rate(&self) -> f64 {
        let n = self.count() as f64;
        let k = K as f64;
        let m = NUM_BINS as f64;
        (1.0 - (-k * n / m).exp()).powf(k)
    }

    /// Reset every bin to zero.
    pub fn clear(&mut self) {
        self.buckets.reset()
    }

    /// Exchange the contents of two filters.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other)
    }

    /// Keep every bin that is nonzero in either filter.
    ///
    /// Blocks are OR-ed, so counters don't add up: the result answers
    /// membership for both filters but its multiplicities are not meaningful,
    /// and removing items from it can produce false negatives.
    pub fn union_with(&mut self, other: &Self) {
        self.buckets.union_with(&other.buckets)
    }

    /// Keep only the bins that are nonzero in both filters, each holding the
    /// smaller of the two counters.
    pub fn intersect_with(&mut self, other: &Self) {
        self.buckets.intersect_with(&other.buckets)
    }
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: HashFunction<T>>
    Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    /// Add an item, incrementing its `K` counters. Saturated counters
    /// are left as they are.
    pub fn insert(&mut self, item: &T) {
        self.hash_kernels.insert(item, NUM_BINS, &mut self.buckets)
    }

    /// Remove an item, decrementing its `K` counters.
    ///
    /// Only call this for an item that is currently in the filter; removing
    /// anything else can introduce false negatives for other items.
    pub fn remove(&mut self, item: &T) {
        self.hash_kernels.remove(item, NUM_BINS, &mut self.buckets)
    }

    /// Remove every item yielded by `items`, in order.
    pub fn remove_iter<I>(&mut self, items: I)
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        items.into_iter().for_each(|item| self.remove(item.borrow()))
    }

    /// `false` means the item is definitely absent, `true` that it is present
    /// up to the false positive rate.
    pub fn probably_contains(&self, item: &T) -> bool {
        self.hash_kernels.contains(item, NUM_BINS, &self.buckets)
    }
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: SeedableHashFunction>
    Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    /// Create an empty filter whose hash functions are seeded `0..K`.
    pub fn new() -> Self {
        Self::with_hash_functions(seeded_family())
    }
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: Clone>
    Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    /// A new filter holding the bins set in either operand.
    pub fn union(lhs: &Self, rhs: &Self) -> Self {
        let mut ret = lhs.clone();
        ret.union_with(rhs);
        ret
    }

    /// A new filter holding the bins set in both operands.
    pub fn intersection(lhs: &Self, rhs: &Self) -> Self {
        let mut ret = lhs.clone();
        ret.intersect_with(rhs);
        ret
    }
}

fn seeded_family<H: SeedableHashFunction, const K: usize>() -> [H; K] {
    let mut seed = 0;
    [(); K].map(|_| {
        let h = H::with_seed(seed);
        seed += 1;
        h
    })
}

/// Exchange the contents of two filters.
pub fn swap<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H>(
    lhs: &mut Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>,
    rhs: &mut Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>,
) {
    lhs.swap(rhs)
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: Clone> Clone
    for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            hash_kernels: self.hash_kernels.clone(),
            _item: PhantomData,
        }
    }
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: fmt::Debug> fmt::Debug
    for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("buckets", &self.buckets)
            .field("hash_kernels", &self.hash_kernels)
            .finish()
    }
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: SeedableHashFunction>
    Default for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn default() -> Self {
        Self::new()
    }
}

// Compares bins only: the hash functions are assumed to match, which holds
// for the seeded default family.
impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H> PartialEq
    for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn eq(&self, other: &Self) -> bool {
        self.buckets == other.buckets
    }
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H> Eq
    for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
}

impl<'a, T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H>
    BitOrAssign<&'a Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>> for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn bitor_assign(&mut self, rhs: &'a Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>) {
        self.union_with(rhs)
    }
}

impl<'a, T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H>
    BitAndAssign<&'a Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>> for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn bitand_assign(&mut self, rhs: &'a Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>) {
        self.intersect_with(rhs)
    }
}

impl<'a, T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: Clone>
    BitOr<&'a Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>> for &'a Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    type Output = Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>;

    fn bitor(self, rhs: Self) -> Self::Output {
        Filter::union(self, rhs)
    }
}

impl<'a, T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: Clone>
    BitAnd<&'a Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>> for &'a Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    type Output = Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>;

    fn bitand(self, rhs: Self) -> Self::Output {
        Filter::intersection(self, rhs)
    }
}

impl<'a, T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: HashFunction<T>>
    Extend<&'a T> for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.insert(item))
    }
}

impl<T, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: HashFunction<T>> Extend<T>
    for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        iter.into_iter().for_each(|item| self.insert(&item))
    }
}

impl<
        'a,
        T: ?Sized,
        const NUM_BINS: usize,
        const K: usize,
        const BITS_PER_BIN: usize,
        B: Block,
        H: HashFunction<T> + SeedableHashFunction,
    > FromIterator<&'a T> for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn from_iter<I: IntoIterator<Item = &'a T>>(iter: I) -> Self {
        let mut filter = Self::new();
        filter.extend(iter);
        filter
    }
}

impl<
        T,
        const NUM_BINS: usize,
        const K: usize,
        const BITS_PER_BIN: usize,
        B: Block,
        H: HashFunction<T> + SeedableHashFunction,
    > FromIterator<T> for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut filter = Self::new();
        filter.extend(iter);
        filter
    }
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: HashFunction<T>>
    BloomFilter<T> for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn insert(&mut self, item: &T) {
        Filter::insert(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        self.probably_contains(item)
    }

    fn reset(&mut self) {
        self.clear()
    }
}

impl<T: ?Sized, const NUM_BINS: usize, const K: usize, const BITS_PER_BIN: usize, B: Block, H: HashFunction<T>>
    RemovableBloomFilter<T> for Filter<T, NUM_BINS, K, BITS_PER_BIN, B, H>
{
    fn remove(&mut self, item: &T) {
        Filter::remove(self, item)
    }
}
