//! Circular Sampling
//!
//! Von Mises heading draws for the correlated random walk. `rand_distr`
//! has no circular distributions, so the sampler is implemented here
//! with the Best-Fisher (1979) rejection scheme, the same algorithm
//! numpy uses.

use rand::Rng;
use std::f64::consts::PI;

/// Below this concentration the distribution is indistinguishable from
/// uniform and the rejection loop becomes numerically fragile.
const KAPPA_UNIFORM_CUTOFF: f64 = 1e-8;

/// Draws a uniformly random angle in `(-pi, pi]`.
pub fn uniform_angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    PI - rng.gen::<f64>() * 2.0 * PI
}

/// Draws an angle from a von Mises distribution with mean direction
/// `mu` and concentration `kappa`, wrapped into `(-pi, pi]`.
///
/// Higher `kappa` clusters draws more tightly around `mu`; `kappa`
/// near zero degenerates to the uniform circle.
pub fn sample_von_mises<R: Rng + ?Sized>(rng: &mut R, mu: f64, kappa: f64) -> f64 {
    if kappa < KAPPA_UNIFORM_CUTOFF {
        return uniform_angle(rng);
    }

    let tau = 1.0 + (1.0 + 4.0 * kappa * kappa).sqrt();
    let rho = (tau - (2.0 * tau).sqrt()) / (2.0 * kappa);
    let r = (1.0 + rho * rho) / (2.0 * rho);

    loop {
        let u1: f64 = rng.gen();
        let z = (PI * u1).cos();
        let f = (1.0 + r * z) / (r + z);
        let c = kappa * (r - f);

        let u2: f64 = rng.gen();
        if c * (2.0 - c) - u2 > 0.0 || (c / u2).ln() + 1.0 - c >= 0.0 {
            let u3: f64 = rng.gen();
            let theta = if u3 > 0.5 { f.acos() } else { -f.acos() };
            return wrap_angle(mu + theta);
        }
    }
}

/// Wraps an angle into `(-pi, pi]`.
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}
