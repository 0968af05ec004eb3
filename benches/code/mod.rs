use criterion::{BenchmarkId, Criterion, criterion_group};
use itertools::kmerge_by;
use rand::prelude::*;
use sorted_merge::{
    BinaryHeap, BinarySearchList, Buckets, Builder, LinearList, SortedArray, Strategy,
    UpdatableQueue,
};

fn closest_divisible<I>(iter: I, target: usize) -> usize
where
    I: Iterator<Item = usize>,
{
    fn gcd(mut a: usize, mut b: usize) -> usize {
        while b != 0 {
            let t = b;
            b = a % b;
            a = t;
        }
        a
    }
    fn lcm(a: usize, b: usize) -> usize {
        a.checked_mul(b).unwrap() / gcd(a, b)
    }

    let lcm = iter.fold(1, lcm);
    ((target as f64) / (lcm as f64)).round() as usize * lcm
}

fn merge_with<St: Strategy>(vec: &[u64], n_iters: usize, strategy: St) -> Vec<u64> {
    let it_len = vec.len() / n_iters;
    let mut iters = (0..n_iters).map(|iter_n| vec.iter().skip(iter_n * it_len).take(it_len).copied());
    let primary = iters.next().unwrap();
    Builder::new()
        .primary(primary)
        .others(iters)
        .strategy(strategy)
        .build()
        .unwrap()
        .collect()
}

fn kmerge_with(vec: &[u64], n_iters: usize) -> Vec<u64> {
    let it_len = vec.len() / n_iters;
    kmerge_by(
        (0..n_iters).map(|iter_n| vec.iter().skip(iter_n * it_len).take(it_len).copied()),
        |a: &u64, b: &u64| a < b,
    )
    .collect()
}

fn bench_group(c: &mut Criterion, name: &str, vec: &[u64], iter_counts: &[usize]) {
    let mut group = c.benchmark_group(name);
    for n_iters in iter_counts.iter().copied() {
        group.bench_function(BenchmarkId::new("BinaryHeap", n_iters), |b| {
            b.iter(|| merge_with(vec, n_iters, BinaryHeap));
        });
        group.bench_function(BenchmarkId::new("SortedArray", n_iters), |b| {
            b.iter(|| merge_with(vec, n_iters, SortedArray));
        });
        group.bench_function(BenchmarkId::new("BinarySearchList", n_iters), |b| {
            b.iter(|| merge_with(vec, n_iters, BinarySearchList));
        });
        group.bench_function(BenchmarkId::new("LinearList", n_iters), |b| {
            b.iter(|| merge_with(vec, n_iters, LinearList));
        });
        group.bench_function(BenchmarkId::new("Buckets", n_iters), |b| {
            b.iter(|| merge_with(vec, n_iters, Buckets));
        });
        group.bench_function(BenchmarkId::new("UpdatableQueue", n_iters), |b| {
            b.iter(|| merge_with(vec, n_iters, UpdatableQueue));
        });
        group.bench_function(BenchmarkId::new("Itertools kmerge_by", n_iters), |b| {
            b.iter(|| kmerge_with(vec, n_iters));
        });
    }
    group.finish();
}

fn bench_strategies(c: &mut Criterion) {
    // linear frontiers get slow with many sources
    let iter_counts = [2, 8, 32, 128, 512];
    let n_els = closest_divisible(iter_counts.iter().copied(), 2_usize.pow(18));
    let mut rng = StdRng::seed_from_u64(0);
    let mut vec = rng.clone().random_iter().take(n_els).collect::<Vec<u64>>();

    bench_group(c, "Random items", &vec, &iter_counts);

    vec.clear();
    vec.extend(0..(n_els as u64));

    // 1% of elements is out of order
    for _ in 0..(n_els / 200) {
        vec.swap(rng.random_range(0..n_els), rng.random_range(0..n_els));
    }
    bench_group(c, "Partially ordered", &vec, &iter_counts);

    vec.clear();
    vec.extend(0..(n_els as u64));
    bench_group(c, "Fully ordered", &vec, &iter_counts);

    // many equal keys
    vec.iter_mut().for_each(|item| *item %= 16);
    vec.chunks_mut(n_els / iter_counts[iter_counts.len() - 1])
        .for_each(<[u64]>::sort_unstable);
    bench_group(c, "Few distinct keys", &vec, &iter_counts);
}

criterion_group!(benches, bench_strategies);
