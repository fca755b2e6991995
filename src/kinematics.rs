// Electron-molecule collision kinematics

use crate::constants::{SMALL, TWO_PI};
use crate::mixer::GreenSawadaParameters;
use crate::settings::SplittingFunction;
use nalgebra::Vector3;

/// Energy and polar angle of the electron after a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scatter {
    pub energy: f64,
    pub cos_theta: f64,
    pub sin_theta: f64,
}

/// Energy of the secondary electron in an ionising collision of an electron
/// with energy `energy`, for the uniform draw `u`.
///
/// `loss` is the ionisation threshold and `opal_beaty` the splitting width of
/// the level. Green-Sawada falls back to Opal-Beaty-Peterson when the gas has
/// no fit. The result is at least `SMALL`.
pub fn secondary_energy(
    splitting: SplittingFunction,
    energy: f64,
    loss: f64,
    opal_beaty: f64,
    green_sawada: Option<&GreenSawadaParameters>,
    u: f64,
) -> f64 {
    let opal_beaty_peterson = |w: f64| w * (u * (0.5 * (energy - loss) / w).atan()).tan();
    let esec = match (splitting, green_sawada) {
        (SplittingFunction::OpalBeaty, _) | (SplittingFunction::GreenSawada, None) => {
            opal_beaty_peterson(opal_beaty)
        }
        (SplittingFunction::GreenSawada, Some(p)) => {
            let w = p.gs * energy / (energy + p.gb);
            let esec0 = p.ts - p.ta / (energy + p.tb);
            esec0
                + w * ((u - 1.0) * (esec0 / w).atan()
                    + u * ((0.5 * (energy - loss) - esec0) / w).atan())
                .tan()
        }
        (SplittingFunction::Flat, _) => u * (energy - loss),
    };
    if esec > 0.0 {
        esec
    } else {
        SMALL
    }
}

/// Energy and direction change in a collision with energy loss `loss`
/// (lab frame) off a molecule with mass factor `r = 1 + m_e / M`, for the
/// centre-of-mass scattering cosine `cos_theta0`.
///
/// For a non-negative loss the energy after the collision satisfies
/// `SMALL <= E' <= E`.
pub fn scatter(energy: f64, loss: f64, r: f64, cos_theta0: f64) -> Scatter {
    let s2 = r * r / (r - 1.0);
    let cos_theta0 = cos_theta0.clamp(-1.0, 1.0);
    let sin_theta0 = (1.0 - cos_theta0 * cos_theta0).max(0.0).sqrt();
    let arg = (1.0 - r * loss / energy).max(SMALL);
    let d = 1.0 - cos_theta0 * arg.sqrt();

    let e1 = (energy * (1.0 - loss / (r * energy) - 2.0 * d / s2)).max(SMALL);
    let q = ((energy / e1) * arg).sqrt() / r;
    let sin_theta = (q.min(1.0) * sin_theta0).min(1.0);
    let mut cos_theta = (1.0 - sin_theta * sin_theta).max(0.0).sqrt();
    if cos_theta0 < 0.0 {
        let u = (r - 1.0) * (r - 1.0) / arg;
        if cos_theta0 * cos_theta0 > u {
            cos_theta = -cos_theta;
        }
    }
    Scatter { energy: e1, cos_theta, sin_theta }
}

/// Rotate a unit direction by the polar angle `(cos_theta, sin_theta)` and
/// the azimuth `phi`.
pub fn rotate_direction(direction: &Vector3<f64>, cos_theta: f64, sin_theta: f64, phi: f64) -> Vector3<f64> {
    let (dx, dy) = (direction.x, direction.y);
    let dz = direction.z.min(1.0);
    let (sin_phi, cos_phi) = phi.sin_cos();
    let arg_z = (dx * dx + dy * dy).sqrt();
    if arg_z == 0.0 {
        return Vector3::new(cos_phi * sin_theta, sin_phi * sin_theta, cos_theta);
    }
    let a = sin_theta / arg_z;
    Vector3::new(
        dx * cos_theta - a * (dy * cos_phi + dx * dz * sin_phi),
        dy * cos_theta + a * (dx * cos_phi - dy * dz * sin_phi),
        dz * cos_theta + arg_z * sin_theta * sin_phi,
    )
}

/// Azimuth for a uniform draw `u`.
pub fn azimuth(u: f64) -> f64 {
    TWO_PI * u
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const R_AR: f64 = 1.0 + 1.3731e-5;

    #[test]
    fn test_opal_beaty_closed_form() {
        let (e, loss, w) = (30.0, 15.76, 10.0);
        let esec = secondary_energy(SplittingFunction::OpalBeaty, e, loss, w, None, 0.5);
        let expected = w * (0.5 * (0.5 * (e - loss) / w).atan()).tan();
        assert_relative_eq!(esec, expected, max_relative = 1e-14);
        // Never more than half the available energy
        let max = secondary_energy(SplittingFunction::OpalBeaty, e, loss, w, None, 1.0);
        assert_relative_eq!(max, 0.5 * (e - loss), max_relative = 1e-12);
    }

    #[test]
    fn test_green_sawada_fallback_and_fit() {
        let (e, loss, w) = (100.0, 15.76, 10.0);
        let obp = secondary_energy(SplittingFunction::OpalBeaty, e, loss, w, None, 0.3);
        let fallback = secondary_energy(SplittingFunction::GreenSawada, e, loss, w, None, 0.3);
        assert_eq!(obp, fallback);
        let p = GreenSawadaParameters { gs: 6.92, gb: 7.85, ts: 6.87, ta: 1000.0, tb: 31.52 };
        let lo = secondary_energy(SplittingFunction::GreenSawada, e, loss, w, Some(&p), 0.1);
        let hi = secondary_energy(SplittingFunction::GreenSawada, e, loss, w, Some(&p), 0.9);
        assert!(lo > 0.0 && hi > lo);
        assert!(hi <= 0.5 * (e - loss) + 1e-9);
    }

    #[test]
    fn test_flat_and_floor() {
        assert_eq!(secondary_energy(SplittingFunction::Flat, 30.0, 10.0, 1.0, None, 0.25), 5.0);
        assert_eq!(secondary_energy(SplittingFunction::Flat, 30.0, 10.0, 1.0, None, 0.0), SMALL);
    }

    #[test]
    fn test_scatter_energy_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10000 {
            let e = 0.01 + 100.0 * rng.gen::<f64>();
            let loss = e * rng.gen::<f64>();
            let c = 1.0 - 2.0 * rng.gen::<f64>();
            for r in [R_AR, 1.0 + 2.7e-4, 1.5] {
                let s = scatter(e, loss, r, c);
                assert!(s.energy >= SMALL && s.energy <= e, "E' = {} for E = {}", s.energy, e);
                assert!((s.cos_theta * s.cos_theta + s.sin_theta * s.sin_theta - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_elastic_forward_scatter_keeps_energy() {
        let s = scatter(10.0, 0.0, R_AR, 1.0);
        assert_relative_eq!(s.energy, 10.0, max_relative = 1e-12);
        assert_relative_eq!(s.cos_theta, 1.0, max_relative = 1e-12);
        // Backscattering off a heavy atom loses about 2 (2 m/M) of the energy.
        let s = scatter(10.0, 0.0, R_AR, -1.0);
        assert!(s.energy < 10.0 && s.energy > 10.0 * (1.0 - 5.0 * 1.3731e-5));
        assert!(s.cos_theta < 0.0);
    }

    #[test]
    fn test_rotation_preserves_norm_and_angle() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let d = Vector3::new(rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5, rng.gen::<f64>() - 0.5).normalize();
            let c = 1.0 - 2.0 * rng.gen::<f64>();
            let s = (1.0 - c * c).sqrt();
            let v = rotate_direction(&d, c, s, azimuth(rng.gen()));
            assert!((v.norm() - 1.0).abs() < 1e-12);
            assert!((v.dot(&d) - c).abs() < 1e-12);
        }
    }

    #[test]
    fn test_rotation_along_z() {
        let v = rotate_direction(&Vector3::new(0.0, 0.0, 1.0), 0.0, 1.0, 0.0);
        assert_relative_eq!(v.x, 1.0);
        assert_relative_eq!(v.z, 0.0);
    }
}
