use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tapline::WhiteNoise;

pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn symmetric(rng: &mut ChaCha8Rng) -> f64 {
    rng.random::<f64>() * 2.0 - 1.0
}

/// `n` taps with `sum(|b|) <= 1`
pub fn random_feedforward(rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    (0..n).map(|_| symmetric(rng) / n as f64).collect()
}

/// `n` taps with `a0 = 1` and `sum(|a[1..]|) <= 0.5`, a stable recursion
pub fn random_feedback(rng: &mut ChaCha8Rng, n: usize) -> Vec<f64> {
    let mut a: Vec<f64> = (0..n).map(|_| 0.5 * symmetric(rng) / n as f64).collect();
    a[0] = 1.0;
    a
}

/// White-noise input in `[-1, 1]`
pub fn noise_input(len: usize, seed: u32) -> Vec<f64> {
    WhiteNoise::new(seed).take(len).map(f64::from).collect()
}

/// Unit impulse followed by `len - 1` zeros
pub fn impulse(len: usize) -> Vec<f64> {
    let mut signal = vec![0.0; len];
    signal[0] = 1.0;
    signal
}
