extern crate counting_bloom_filter;
extern crate rand;
#[macro_use]
extern crate criterion;

use counting_bloom_filter::CountingBloomFilter;
use criterion::{Criterion, Fun};
use rand::distributions::Standard;
use rand::{thread_rng, Rng};

fn bench(c: &mut Criterion) {
    let present = Fun::new("present", |b, _| {
        let items: Vec<usize> = thread_rng().sample_iter(&Standard).take(7).collect();
        let filter: CountingBloomFilter<usize, 1024, 3> = items.iter().collect();
        b.iter(|| {
            items.iter().for_each(|i| {
                filter.probably_contains(i);
            })
        })
    });

    let absent = Fun::new("absent", |b, _| {
        let filter: CountingBloomFilter<usize, 1024, 3> = thread_rng().sample_iter::<usize, _>(&Standard).take(7).collect();
        let items: Vec<usize> = thread_rng().sample_iter(&Standard).take(7).collect();
        b.iter(|| {
            items.iter().for_each(|i| {
                filter.probably_contains(i);
            })
        })
    });

    let functions = vec![present, absent];
    c.bench_functions("contains", functions, ());
}

criterion_group!(benches, bench);
criterion_main!(benches);
