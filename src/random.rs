// Random variates used by the collision sampler.
//
// All sampling functions take `&mut R where R: Rng + ?Sized`, so any rand
// generator can drive them; the caller owns the stream.

use nalgebra::{Complex, ComplexField};
use rand::Rng;
use rand_distr::{Cauchy, Distribution, Normal};

const SQRT_2PI: f64 = 2.5066282746310002;

/// Uniform draw in [0, 1).
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

/// Uniform draw in (0, 1], safe to pass to `ln`.
#[inline]
pub fn uniform_pos<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    1.0 - rng.gen::<f64>()
}

/// Gaussian draw; a non-positive width returns the mean.
pub fn gaussian<R: Rng + ?Sized>(rng: &mut R, mean: f64, sigma: f64) -> f64 {
    match Normal::new(mean, sigma) {
        Ok(normal) if sigma > 0.0 => normal.sample(rng),
        _ => mean,
    }
}

/// Draw from a Voigt profile: a Gaussian of standard deviation `sigma`
/// convolved with a Lorentzian of half width `gamma`.
pub fn voigt<R: Rng + ?Sized>(rng: &mut R, mean: f64, sigma: f64, gamma: f64) -> f64 {
    let lorentz = match Cauchy::new(0.0, gamma) {
        Ok(cauchy) if gamma > 0.0 => cauchy.sample(rng),
        _ => 0.0,
    };
    gaussian(rng, mean, sigma) + lorentz
}

/// Distance from the origin of a point uniformly distributed inside a sphere
/// of the given radius.
pub fn radius_in_sphere<R: Rng + ?Sized>(rng: &mut R, radius: f64) -> f64 {
    radius * uniform_pos(rng).cbrt()
}

/// Value of the normalised Voigt profile at offset `x`.
///
/// `sigma` is the Gaussian standard deviation and `gamma` the Lorentzian full
/// width at half maximum. The real part of the Faddeeva function is evaluated
/// with Humlicek's W4 rational approximations (relative accuracy about 1e-4).
pub fn voigt_profile(x: f64, sigma: f64, gamma: f64) -> f64 {
    if sigma < 0.0 || gamma < 0.0 || (sigma == 0.0 && gamma == 0.0) {
        return 0.0;
    }
    if sigma == 0.0 {
        let half = 0.5 * gamma;
        return half / (std::f64::consts::PI * (x * x + half * half));
    }
    if gamma == 0.0 {
        return (-0.5 * x * x / (sigma * sigma)).exp() / (sigma * SQRT_2PI);
    }
    let scale = sigma * std::f64::consts::SQRT_2;
    faddeeva(x / scale, 0.5 * gamma / scale).re / (sigma * SQRT_2PI)
}

/// Faddeeva function w(x + iy) for y >= 0.
/// Humlicek, JQSRT 27 (1982) 437.
fn faddeeva(x: f64, y: f64) -> Complex<f64> {
    let t = Complex::new(y, -x);
    let s = x.abs() + y;
    if s >= 15.0 {
        t * 0.5641896 / (t * t + 0.5)
    } else if s >= 5.5 {
        let u = t * t;
        t * (u * 0.5641896 + 1.410474) / (u * (u + 3.0) + 0.75)
    } else if y >= 0.195 * x.abs() - 0.176 {
        let num = t * (t * (t * (t * 0.5642236 + 3.778987) + 11.96482) + 20.20933) + 16.4955;
        let den = t * (t * (t * (t * (t + 6.699398) + 21.69274) + 39.27121) + 38.82363) + 16.4955;
        num / den
    } else {
        let u = t * t;
        // a0 - u (a1 - u (a2 - ...))
        let alternating = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex::new(0.0, 0.0), |acc, &c| c - u * acc)
        };
        let num = t * alternating(&[36183.31, 3321.9905, 1540.787, 219.0313, 35.76683, 1.320522, 0.56419]);
        let den = alternating(&[32066.6, 24322.84, 9022.228, 2186.181, 364.2191, 61.57037, 1.841439, 1.0]);
        u.exp() - num / den
    }
}
