use std::hint::black_box;
use std::time::Instant;
use tapline::filter::FirG;
use tapline::noise::WhiteNoise;
use tapline::simd::f64x2;

/// Ring buffer with a modulo per tap
#[derive(Clone)]
struct ModuloRing {
    taps: Vec<f64>,
    delay_line: Vec<f64>,
    pos: usize,
}

impl ModuloRing {
    fn new(taps: Vec<f64>) -> Self {
        Self {
            delay_line: vec![0.0; taps.len()],
            taps,
            pos: 0,
        }
    }

    fn process(&mut self, sample: f64) -> f64 {
        self.delay_line[self.pos] = sample;

        let mut output = 0.0f64;
        let n = self.taps.len();
        for i in 0..n {
            let delay_idx = (self.pos + n - i) % n;
            output += self.taps[i] * self.delay_line[delay_idx];
        }

        self.pos = (self.pos + 1) % n;
        output
    }
}

/// Ring buffer read as two contiguous reverse ranges
#[derive(Clone)]
struct SplitRing {
    taps: Vec<f64>,
    delay_line: Vec<f64>,
    pos: usize,
}

impl SplitRing {
    fn new(taps: Vec<f64>) -> Self {
        Self {
            delay_line: vec![0.0; taps.len()],
            taps,
            pos: 0,
        }
    }

    fn process(&mut self, sample: f64) -> f64 {
        self.delay_line[self.pos] = sample;

        let mut output = 0.0f64;
        let n = self.taps.len();
        let mut tap_i = 0usize;
        for delay_idx in (0..=self.pos).rev() {
            output += self.taps[tap_i] * self.delay_line[delay_idx];
            tap_i += 1;
        }
        for delay_idx in ((self.pos + 1)..n).rev() {
            output += self.taps[tap_i] * self.delay_line[delay_idx];
            tap_i += 1;
        }

        self.pos += 1;
        if self.pos == n {
            self.pos = 0;
        }
        output
    }
}

fn mk_taps(n: usize) -> Vec<f64> {
    let mut taps = Vec::with_capacity(n);
    let mut sum = 0.0f64;
    for i in 0..n {
        let x = ((i as f64 + 1.0) * 0.113).sin().abs() + 1e-6;
        taps.push(x);
        sum += x;
    }
    for tap in &mut taps {
        *tap /= sum;
    }
    taps
}

fn bench_layouts(n: usize, len: usize, iters: usize) -> anyhow::Result<()> {
    let taps = mk_taps(n);
    let input: Vec<f64> = WhiteNoise::default().take(len).map(f64::from).collect();

    let mut modulo = ModuloRing::new(taps.clone());
    let mut split = SplitRing::new(taps.clone());
    let mut mirrored = FirG::<f64x2>::from_coefficients(&taps)?;

    // Parity check
    let mut max_abs_err = 0.0f64;
    for &x in &input {
        let a = modulo.process(x);
        let b = split.process(x);
        mirrored.push(x);
        let c = mirrored.eval_scalar();
        let d = mirrored.eval_simd();
        max_abs_err = max_abs_err
            .max((a - b).abs())
            .max((a - c).abs())
            .max((a - d).abs());
    }
    assert!(max_abs_err < 1e-12, "layout mismatch: max_abs_err={max_abs_err}");

    let mut checksum = 0.0f64;

    let t0 = Instant::now();
    for _ in 0..iters {
        for &x in &input {
            checksum += modulo.process(x);
        }
    }
    let dt_modulo = t0.elapsed();

    let t1 = Instant::now();
    for _ in 0..iters {
        for &x in &input {
            checksum += split.process(x);
        }
    }
    let dt_split = t1.elapsed();

    let t2 = Instant::now();
    for _ in 0..iters {
        for &x in &input {
            mirrored.push(x);
            checksum += mirrored.eval_scalar();
        }
    }
    let dt_scalar = t2.elapsed();

    let t3 = Instant::now();
    for _ in 0..iters {
        for &x in &input {
            mirrored.push(x);
            checksum += mirrored.eval_simd();
        }
    }
    let dt_simd = t3.elapsed();

    black_box(checksum);
    println!(
        "{n:>4} taps: modulo = {:.3?}, split-loop = {:.3?}, mirrored scalar = {:.3?}, mirrored simd = {:.3?}, speedup = {:.2}x",
        dt_modulo,
        dt_split,
        dt_scalar,
        dt_simd,
        dt_modulo.as_secs_f64() / dt_simd.as_secs_f64()
    );
    Ok(())
}

fn main() -> anyhow::Result<()> {
    for n in [7, 31, 63, 127, 255] {
        bench_layouts(n, 2048, 200)?;
    }
    Ok(())
}
