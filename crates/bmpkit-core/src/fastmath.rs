//! Fast deterministic approximations of `sin` and `exp`
//!
//! Kernel generation (Lanczos weights, Gaussian weights) only needs a few
//! significant digits, and it needs them to be identical on every platform.
//! These approximations use plain arithmetic and bit manipulation, so their
//! results do not depend on the platform's libm.
//!
//! Exact pixel arithmetic never goes through this module.

use std::f64::consts::{LN_2, LOG2_E, PI, TAU};

const SIN_B: f64 = 4.0 / PI;
const SIN_C: f64 = -4.0 / (PI * PI);
/// Weight of the second parabolic refinement pass
const SIN_P: f64 = 0.225;

/// Largest argument for which `2^n` is still a normal `f64`
const EXP_MAX: f64 = 709.0;
/// Smallest argument for which `2^n` is still a normal `f64`
const EXP_MIN: f64 = -708.0;

/// Approximate `sin(x)`.
///
/// The argument is reduced into `[-pi, pi]`, fitted with a parabola and
/// refined once. Maximum absolute error is about `1e-3`; the zeros at
/// integer multiples of `pi` and the extrema at odd multiples of `pi/2`
/// are reproduced exactly up to floating-point rounding of the reduction.
#[inline]
pub fn fast_sin(x: f64) -> f64 {
    let mut x = x % TAU;
    if x > PI {
        x -= TAU;
    } else if x < -PI {
        x += TAU;
    }

    let y = SIN_B * x + SIN_C * x * x.abs();
    SIN_P * (y * y.abs() - y) + y
}

/// Approximate `e^x`.
///
/// Splits `x * log2(e)` into an integer power of two, built directly from
/// the exponent bits, and a fractional part evaluated with a degree-7
/// polynomial. Relative error is below `2e-6`.
///
/// Arguments below `-708` return `0.0`; arguments above `709` saturate to
/// `e^709`.
#[inline]
pub fn fast_exp(x: f64) -> f64 {
    if x < EXP_MIN {
        return 0.0;
    }
    let x = x.min(EXP_MAX);

    let t = x * LOG2_E;
    let n = t.floor();
    let z = (t - n) * LN_2;

    // Horner form of the Taylor series of e^z, z in [0, ln 2)
    let p = 1.0
        + z * (1.0
            + z / 2.0
                * (1.0
                    + z / 3.0
                        * (1.0 + z / 4.0 * (1.0 + z / 5.0 * (1.0 + z / 6.0 * (1.0 + z / 7.0))))));

    let exponent = (n as i64 + 1023) as u64;
    p * f64::from_bits(exponent << 52)
}

/// Normalized sinc: `sin(pi x) / (pi x)`, with `sinc(0) = 1`.
#[inline]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let px = PI * x;
    fast_sin(px) / px
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fast_sin_matches_std() {
        let mut x = -20.0;
        while x <= 20.0 {
            let err = (fast_sin(x) - x.sin()).abs();
            assert!(err < 2e-3, "sin({x}): error {err}");
            x += 0.01;
        }
    }

    #[test]
    fn test_fast_sin_exact_points() {
        assert!(fast_sin(0.0).abs() < 1e-12);
        assert!(fast_sin(PI).abs() < 1e-12);
        assert!(fast_sin(-PI).abs() < 1e-12);
        assert!(fast_sin(2.0 * PI).abs() < 1e-12);
        assert!((fast_sin(PI / 2.0) - 1.0).abs() < 1e-12);
        assert!((fast_sin(-PI / 2.0) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_fast_exp_matches_std() {
        let mut x: f64 = -50.0;
        while x <= 50.0 {
            let expected = x.exp();
            let rel = ((fast_exp(x) - expected) / expected).abs();
            assert!(rel < 2e-6, "exp({x}): relative error {rel}");
            x += 0.137;
        }
    }

    #[test]
    fn test_fast_exp_limits() {
        assert_eq!(fast_exp(0.0), 1.0);
        assert_eq!(fast_exp(-1000.0), 0.0);
        assert!(fast_exp(1000.0).is_finite());
    }

    #[test]
    fn test_sinc() {
        assert_eq!(sinc(0.0), 1.0);
        assert!(sinc(1.0).abs() < 1e-12);
        assert!(sinc(2.0).abs() < 1e-12);
        assert!((sinc(0.5) - 2.0 / PI).abs() < 2e-3);
    }
}
