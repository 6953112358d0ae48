use crate::block::Block;
use crate::buckets::Buckets;
use std::collections::hash_map::DefaultHasher;
use std::hash::{BuildHasher, Hash, Hasher};
use std::slice;

/// One member of the hash family a filter is configured with.
///
/// Implementations must be deterministic: the same item always hashes to the
/// same value, otherwise inserted items can't be found or removed again.
pub trait HashFunction<T: ?Sized> {
    fn hash(&self, item: &T) -> u64;
}

impl<T: ?Sized, F: Fn(&T) -> u64> HashFunction<T> for F {
    #[inline]
    fn hash(&self, item: &T) -> u64 {
        self(item)
    }
}

/// A trait for creating the i-th member of a hash family.
pub trait SeedableHashFunction {
    fn with_seed(seed: u64) -> Self;
}

/// Hashes `(seed, item)` with a [`BuildHasher`].
#[derive(Clone, Debug)]
pub struct DefaultHashFunction<BH = DefaultBuildHasher> {
    seed: u64,
    build_hasher: BH,
}

impl<BH: BuildHasher> DefaultHashFunction<BH> {
    pub fn new(seed: u64, build_hasher: BH) -> Self {
        Self { seed, build_hasher }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl<BH: BuildHasher + Default> SeedableHashFunction for DefaultHashFunction<BH> {
    fn with_seed(seed: u64) -> Self {
        Self::new(seed, BH::default())
    }
}

impl<T: Hash + ?Sized, BH: BuildHasher> HashFunction<T> for DefaultHashFunction<BH> {
    fn hash(&self, item: &T) -> u64 {
        let hasher = &mut self.build_hasher.build_hasher();
        self.seed.hash(hasher);
        item.hash(hasher);
        hasher.finish()
    }
}

/// Builds [`DefaultHasher`]s with fixed keys, so two filters built
/// independently map an item to the same buckets.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultBuildHasher;

impl BuildHasher for DefaultBuildHasher {
    type Hasher = DefaultHasher;

    fn build_hasher(&self) -> DefaultHasher {
        DefaultHasher::new()
    }
}

/// The K hash functions of a filter, applied in order. This is the only path
/// by which a filter touches individual buckets.
#[derive(Clone, Debug)]
pub(crate) struct HashKernels<H, const K: usize> {
    functions: [H; K],
}

impl<H, const K: usize> HashKernels<H, K> {
    pub(crate) fn new(functions: [H; K]) -> Self {
        Self { functions }
    }

    pub(crate) fn functions(&self) -> &[H; K] {
        &self.functions
    }

    /// Bucket indices of `item`, each in `[0, n)`.
    pub(crate) fn hash_iter<'a, T: ?Sized>(&'a self, item: &'a T, n: usize) -> HashIter<'a, T, H>
    where
        H: HashFunction<T>,
    {
        HashIter {
            functions: self.functions.iter(),
            item,
            n: n as u64,
        }
    }

    pub(crate) fn insert<T: ?Sized, B: Block>(&self, item: &T, n: usize, buckets: &mut Buckets<B>)
    where
        H: HashFunction<T>,
    {
        debug_assert!(n <= buckets.len());
        self.hash_iter(item, n).for_each(|i| {
            buckets.increment(i);
        })
    }

    pub(crate) fn remove<T: ?Sized, B: Block>(&self, item: &T, n: usize, buckets: &mut Buckets<B>)
    where
        H: HashFunction<T>,
    {
        debug_assert!(n <= buckets.len());
        self.hash_iter(item, n).for_each(|i| {
            buckets.decrement(i);
        })
    }

    // stops at the first empty bucket, the answer can't change after that
    pub(crate) fn contains<T: ?Sized, B: Block>(&self, item: &T, n: usize, buckets: &Buckets<B>) -> bool
    where
        H: HashFunction<T>,
    {
        debug_assert!(n <= buckets.len());
        self.hash_iter(item, n).all(|i| buckets.is_nonzero(i))
    }
}

pub(crate) struct HashIter<'a, T: ?Sized, H> {
    functions: slice::Iter<'a, H>,
    item: &'a T,
    n: u64,
}

impl<'a, T: ?Sized, H: HashFunction<T>> Iterator for HashIter<'a, T, H> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        self.functions.next().map(|f| (f.hash(self.item) % self.n) as usize)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.functions.size_hint()
    }
}
