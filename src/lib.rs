//! Counting Bloom Filter
//!
//! A fixed-size, bit-packed counting bloom filter. Each bin is a small
//! saturating counter, so items can be removed as well as inserted.
//!
//! The configuration (bin count, hash function count, counter width and
//! storage block) lives in the type:
//!
//! ```rust
//! use counting_bloom_filter::CountingBloomFilter;
//!
//! // 64 bins, 2 hash functions, 4-bit counters packed into `usize` blocks
//! let mut filter: CountingBloomFilter<u32, 64, 2> = [1u32, 2, 3].iter().collect();
//! assert!(filter.probably_contains(&2));
//! filter.remove(&2);
//! assert!(filter.false_positive_rate() <= 1.0);
//! ```
//!
//! A configuration that can't be packed, e.g. 3-bit counters in `u32`
//! blocks, is rejected at compile time.

mod block;
mod buckets;
mod counting;
mod error;
mod hash;
mod layout;

pub use block::Block;
pub use counting::{swap, Filter as CountingBloomFilter};
pub use error::{Error, Result};
pub use hash::{DefaultBuildHasher, DefaultHashFunction, HashFunction, SeedableHashFunction};

pub trait BloomFilter<T: ?Sized> {
    fn insert(&mut self, item: &T);
    fn contains(&self, item: &T) -> bool;
    fn reset(&mut self);
}

pub trait RemovableBloomFilter<T: ?Sized>: BloomFilter<T> {
    fn remove(&mut self, item: &T);
}
