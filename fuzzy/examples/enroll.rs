use fuzzy::{Commitment, FcsParams, FuzzyCommitmentScheme};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    let mut rng = StdRng::seed_from_u64(42);
    let params = FcsParams::new(256, 8);
    let scheme = FuzzyCommitmentScheme::new(params).expect("scheme");

    // enrollment reading of some noisy source
    let enrolled: [u8; 32] = rng.random();
    let commitment = scheme.commit(&mut rng, &enrolled, None).expect("commit");

    let params_bytes = bincode::serialize(&params).expect("serialize params");
    let commitment_bytes = bincode::serialize(&commitment).expect("serialize commitment");

    let params2: FcsParams = bincode::deserialize(&params_bytes).expect("deserialize params");
    let commitment2: Commitment =
        bincode::deserialize(&commitment_bytes).expect("deserialize commitment");
    let scheme2 = FuzzyCommitmentScheme::new(params2).expect("scheme");

    // a later reading with a few bits off
    let mut reading = enrolled;
    for i in [3usize, 40, 77, 101, 150, 222] {
        reading[i / 8] ^= 0x80 >> (i % 8);
    }
    let key = scheme2.open(&commitment2, &reading).expect("open");
    assert!(key.is_some());

    let stranger: [u8; 32] = rng.random();
    assert!(!scheme2.verify(&commitment2, &stranger).expect("verify"));

    println!(
        "pseudonym {:02x?}, {} byte key recovered",
        &commitment2.pseudonym()[..8],
        key.map_or(0, |k| k.len())
    );
}
