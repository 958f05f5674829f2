use criterion::{Criterion, black_box, criterion_group, criterion_main};
use fuzzy::{FcsParams, FuzzyCommitmentScheme};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn bench_commit(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let scheme = FuzzyCommitmentScheme::new(FcsParams::new(256, 2)).expect("scheme");
    let witness: [u8; 32] = rng.random();

    c.bench_function("fcs_commit_k256_t2", |bencher| {
        bencher.iter(|| {
            let commitment = scheme.commit(&mut rng, black_box(&witness), None).expect("commit");
            black_box(commitment);
        })
    });
}

fn bench_open(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let scheme = FuzzyCommitmentScheme::new(FcsParams::new(256, 2)).expect("scheme");
    let witness: [u8; 32] = rng.random();
    let commitment = scheme.commit(&mut rng, &witness, None).expect("commit");

    let mut noisy = witness;
    noisy[0] ^= 0x01;
    noisy[31] ^= 0x10;

    c.bench_function("fcs_open_k256_t2_2_errors", |bencher| {
        bencher.iter(|| {
            let opened = scheme.open(black_box(&commitment), black_box(&noisy)).expect("open");
            black_box(opened);
        })
    });
}

fn bench_open_wide(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let scheme = FuzzyCommitmentScheme::new(FcsParams::new(1152, 64)).expect("scheme");
    let witness: Vec<u8> = (0..144).map(|_| rng.random()).collect();
    let commitment = scheme.commit(&mut rng, &witness, None).expect("commit");

    c.bench_function("fcs_open_k1152_t64", |bencher| {
        bencher.iter(|| {
            let ok = scheme.verify(black_box(&commitment), black_box(&witness)).expect("verify");
            black_box(ok);
        })
    });
}

criterion_group!(benches, bench_commit, bench_open, bench_open_wide);
criterion_main!(benches);
