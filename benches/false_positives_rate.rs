extern crate counting_bloom_filter;
extern crate rand;
#[macro_use]
extern crate criterion;

use counting_bloom_filter::CountingBloomFilter;
use criterion::{Criterion, Fun};
use rand::distributions::Standard;
use rand::{thread_rng, Rng};

// This is an empty bench, only print observed and estimated false positives rate
fn bench(c: &mut Criterion) {
    let (false_positives, estimated) = (0..1000).fold((0, 0.0), |(fp, est), _| {
        let items: Vec<usize> = thread_rng().sample_iter(&Standard).take(100).collect();
        let filter: CountingBloomFilter<usize, 1000, 3> = items.iter().collect();
        let items: Vec<usize> = thread_rng().sample_iter(&Standard).take(100).collect();
        (
            fp + items.iter().filter(|i| filter.probably_contains(i)).count(),
            est + filter.false_positive_rate(),
        )
    });
    println!("CountingBloomFilter false positives: {:?}", false_positives as f32 / 100000.0);
    println!("CountingBloomFilter estimated false positive rate: {:?}", estimated / 1000.0);

    let counting = Fun::new("counting", |b, _| b.iter(|| {}));
    let functions = vec![counting];
    c.bench_functions("false_positives_rate", functions, ());
}

criterion_group!(benches, bench);
criterion_main!(benches);
