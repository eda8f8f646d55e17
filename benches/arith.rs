use criterion::measurement::WallTime;
use criterion::{criterion_group, criterion_main, BenchmarkGroup, BenchmarkId, Criterion};
use rand::Rng;
use std::fmt::Write;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use wideuint::{u256, u512, Divisor, Wide};

fn rng() -> rand_pcg::Pcg64 {
    let t = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |t| t.as_nanos());
    rand_pcg::Pcg64::new(0xcafef00dd15ea5e5 ^ t, 0xa02bdbf7bb3c0a7ac28fa16a64abf96)
}

/// Random value with exactly `words` significant words.
fn random<const N: usize>(rng: &mut impl Rng, words: usize) -> Wide<N> {
    let mut r = [0; N];
    for w in &mut r[..words] {
        *w = rng.gen();
    }
    r[words - 1] |= 1;
    Wide(r)
}

struct Bench<'a, 'b, T> {
    group: &'a mut BenchmarkGroup<'b, WallTime>,
    items: Vec<T>,
}

impl<'a, 'b, T> Bench<'a, 'b, T> {
    fn with(
        group: &'a mut BenchmarkGroup<'b, WallTime>,
        len: usize,
        mut f: impl FnMut(&mut rand_pcg::Pcg64) -> T,
    ) -> Self {
        let mut rng = rng();
        let items = (0..len).map(|_| f(&mut rng)).collect::<Vec<_>>();

        Bench { group, items }
    }

    fn register(&mut self, name: &str, param: usize, mut f: impl FnMut(&T) -> u64) {
        self.group
            .bench_with_input(BenchmarkId::new(name, param), &self.items, |b, items| {
                b.iter(|| {
                    let mut sum = 0_u64;
                    for item in items.iter() {
                        sum = sum.wrapping_add(f(item));
                    }
                    sum
                })
            });
    }
}

fn configure(group: &mut BenchmarkGroup<WallTime>) {
    group
        .warm_up_time(Duration::from_millis(350))
        .measurement_time(Duration::from_secs(2));
}

pub fn bench_div_u256(c: &mut Criterion) {
    let mut group = c.benchmark_group("div_u256");
    configure(&mut group);

    // One, two and three word divisors take the by1, by2 and long paths.
    for words in [1, 2, 3] {
        let mut bench = Bench::with(&mut group, 100, |rng| {
            (random::<4>(rng, 4), random::<4>(rng, words))
        });

        bench.register("udivrem", words, |(n, d)| n.udivrem(d).quotient.0[0]);
    }

    let mut bench = Bench::with(&mut group, 100, |rng| random::<4>(rng, 4));
    let divisor = Divisor::from(0x1234_5678_9abc_def1_u64);
    bench.register("div_mod_word", 1, |n| n.div_mod_word(&divisor).1);

    group.finish();
}

pub fn bench_div_u512(c: &mut Criterion) {
    let mut group = c.benchmark_group("div_u512");
    configure(&mut group);

    for words in [1, 2, 4, 7] {
        let mut bench = Bench::with(&mut group, 100, |rng| {
            (random::<8>(rng, 8), random::<8>(rng, words))
        });

        bench.register("udivrem", words, |(n, d)| n.udivrem(d).quotient.0[0]);
    }

    group.finish();
}

pub fn bench_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul");
    configure(&mut group);

    let mut bench = Bench::with(&mut group, 100, |rng| {
        (random::<4>(rng, 4), random::<4>(rng, 4))
    });
    bench.register("wrapping_u256", 4, |(a, b)| (*a * *b).0[3]);
    bench.register("widening_u256", 4, |(a, b)| a.widening_mul(b).1 .0[3]);

    let mut bench = Bench::with(&mut group, 100, |rng| {
        (random::<4>(rng, 4), random::<4>(rng, 4), random::<4>(rng, 3))
    });
    bench.register("mulmod_u256", 4, |(a, b, m)| a.mulmod(b, m).0[0]);

    group.finish();
}

pub fn bench_format(c: &mut Criterion) {
    let mut group = c.benchmark_group("format");
    configure(&mut group);

    let mut out = String::with_capacity(1024);

    for words in [1, 4, 8] {
        let mut bench = Bench::with(&mut group, 100, |rng| random::<8>(rng, words));

        bench.register("dec_u512", words, |n| {
            out.clear();
            write!(&mut out, "{n}").unwrap();
            out.len() as u64
        });

        bench.register("hex_u512", words, |n| {
            out.clear();
            write!(&mut out, "{n:x}").unwrap();
            out.len() as u64
        });
    }

    group.finish();
}

pub fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    configure(&mut group);

    for words in [1, 2, 4] {
        let mut bench =
            Bench::with(&mut group, 100, |rng| random::<4>(rng, words).to_string());

        bench.register("dec_u256", words, |s| u256::from_str_dec(s).unwrap().0[0]);
    }

    let mut bench = Bench::with(&mut group, 100, |rng| format!("{:x}", random::<8>(rng, 8)));
    bench.register("hex_u512", 8, |s| u512::from_str_hex(s).unwrap().0[0]);

    group.finish();
}

criterion_group!(
    benches,
    bench_div_u256,
    bench_div_u512,
    bench_mul,
    bench_format,
    bench_parse
);
criterion_main!(benches);
