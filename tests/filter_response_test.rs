mod test_signals;

use approx::assert_relative_eq;
use tapline::filter::{Fir, FirG, Iir, IirG};
use tapline::simd::{f32x4, f32x8, f64x2, f64x4};
use tapline::{FilterError, SampleFilter};

#[test]
fn test_three_tap_fir_impulse_response() {
    let expected = [0.5, 0.3, 0.2, 0.0, 0.0, 0.0, 0.0];

    let mut fixed = Fir::<3, f32x4>::new();
    fixed.coefs(&[0.5f32, 0.3, 0.2]);
    let mut runtime = FirG::<f64x2>::with_len(3).unwrap();
    runtime.coefs(&[0.5, 0.3, 0.2]);

    for (x, want) in test_signals::impulse(expected.len()).into_iter().zip(expected) {
        assert_relative_eq!(fixed.tick(x as f32), want as f32);
        assert_relative_eq!(runtime.tick(x), want);
    }
}

#[test]
fn test_pure_delay_fir() {
    const N: usize = 9;
    let input = test_signals::noise_input(64, 5);

    for k in 0..N {
        let mut coefs = [0.0; N];
        coefs[k] = 1.0;

        let mut fir = Fir::<N, f32x4>::new();
        fir.coefs(&coefs);
        let mut fir_g = FirG::<f64x4>::from_coefficients(&coefs).unwrap();

        for (n, &x) in input.iter().enumerate() {
            fir.push(x as f32);
            fir_g.push(x);
            let want = if n >= k { input[n - k] } else { 0.0 };

            assert_eq!(fir.out(), want as f32, "k={} n={}", k, n);
            assert_eq!(fir.eval_scalar(), want as f32, "k={} n={}", k, n);
            assert_eq!(fir_g.out(), want, "k={} n={}", k, n);
            assert_eq!(fir_g.eval_scalar(), want, "k={} n={}", k, n);
        }
    }
}

#[test]
fn test_identity_iir_passes_input() {
    let input = test_signals::noise_input(500, 11);

    let mut b = vec![0.0; 6];
    let mut a = vec![0.0; 6];
    b[0] = 1.0;
    a[0] = 1.0;

    let mut fixed = Iir::<6, f32x8>::new();
    fixed.coefs(&b, &a);
    let mut runtime = IirG::<f64x2>::from_coefficients(&b, &a).unwrap();

    for &x in &input {
        assert_eq!(fixed.tick(x as f32), x as f32);
        assert_eq!(fixed.tick_scalar(x as f32), x as f32);
        assert_eq!(runtime.tick(x), x);
        assert_eq!(runtime.tick_scalar(x), x);
    }
}

#[test]
fn test_iir_pure_feedback_delay() {
    // y[n] = x[n] + 0.5 y[n-3]
    let mut iir = IirG::<f64x2>::from_coefficients(&[1.0, 0.0, 0.0, 0.0], &[1.0, 0.0, 0.0, -0.5])
        .unwrap();
    let outputs: Vec<f64> = test_signals::impulse(10)
        .into_iter()
        .map(|x| iir.tick(x))
        .collect();
    assert_eq!(
        outputs,
        vec![1.0, 0.0, 0.0, 0.5, 0.0, 0.0, 0.25, 0.0, 0.0, 0.125]
    );
}

#[test]
fn test_minimum_length_rejection() {
    for n in [0, 1] {
        assert_eq!(
            FirG::<f32x4>::with_len(n).err(),
            Some(FilterError::InvalidLength {
                requested: n,
                minimum: 2
            })
        );
        assert!(IirG::<f64x2>::with_len(n).is_err());
        assert!(FirG::<f64x4>::from_coefficients(&vec![1.0; n]).is_err());
    }
    assert!(FirG::<f32x4>::with_len(2).is_ok());
    assert!(IirG::<f64x2>::with_len(2).is_ok());
}

#[test]
fn test_two_tap_filters_work() {
    let mut fir = Fir::<2, f64x4>::new();
    fir.coefs(&[1.0, -1.0]);
    let diffs: Vec<f64> = [1.0, 3.0, 6.0, 10.0].iter().map(|&x| fir.tick(x)).collect();
    assert_eq!(diffs, vec![1.0, 2.0, 3.0, 4.0]);

    // Running sum
    let mut iir = Iir::<2, f32x8>::new();
    iir.coefs(&[1.0f32, 0.0], &[1.0, -1.0]);
    let sums: Vec<f32> = [1.0, 2.0, 3.0, 4.0].iter().map(|&x| iir.tick(x)).collect();
    assert_eq!(sums, vec![1.0, 3.0, 6.0, 10.0]);
}

#[test]
fn test_coefficients_can_change_between_uses() {
    let mut fir = FirG::<f32x4>::with_len(3).unwrap();
    fir.coefs(&[1.0f32, 0.0, 0.0]);
    assert_eq!(fir.tick(2.0), 2.0);

    fir.coefs(&[0.0f32, 1.0, 0.0]);
    assert_eq!(fir.out(), 0.0);
    assert_eq!(fir.tick(5.0), 2.0);
    assert_eq!(fir.coefficients(), &[0.0, 1.0, 0.0]);
}

#[test]
fn test_process_buffer_matches_tick() {
    let mut rng = test_signals::seeded_rng(3);
    let b = test_signals::random_feedforward(&mut rng, 12);
    let a = test_signals::random_feedback(&mut rng, 12);
    let input = test_signals::noise_input(256, 17);

    let mut by_tick = Iir::<12, f64x2>::new();
    let mut by_buffer = Iir::<12, f64x2>::new();
    by_tick.coefs(&b, &a);
    by_buffer.coefs(&b, &a);

    let expected: Vec<f64> = input.iter().map(|&x| by_tick.tick(x)).collect();
    let mut buffer = input.clone();
    by_buffer.process_buffer(&mut buffer);
    assert_eq!(buffer, expected);
}
