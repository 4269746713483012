use anyhow::{ensure, Result};
use log::warn;

/// A univariate polynomial with real coefficients, stored in ascending
/// degree order (`coefficients[i]` is the coefficient of `t^i`).
///
/// Used to find curve parameters: the Bernstein form of a cubic Bezier is
/// rewritten per axis in power basis, after which extrema and intersections
/// reduce to real roots in `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    pub coefficients: Vec<f64>,
}

/// Decimal digits of accuracy targeted by [`Polynomial::bisection`].
const PRECISION: u32 = 6;

/// Coefficients and roots within this tolerance of each other are treated as equal.
pub const TOLERANCE: f64 = 1e-6;

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Self {
        Polynomial { coefficients }
    }

    /// Effective degree, ignoring a possible empty coefficient list.
    pub fn degree(&self) -> usize {
        self.coefficients.len().saturating_sub(1)
    }

    /// Evaluates the polynomial at `t` using Horner's method.
    /// Non-finite `t` is a programming error in the caller and rejected.
    pub fn evaluate(&self, t: f64) -> Result<f64> {
        ensure!(t.is_finite(), "polynomial evaluated at non-finite t: {t}");
        Ok(self.horner(t))
    }

    fn horner(&self, t: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, &c| acc * t + c)
    }

    /// Symbolic derivative, one degree lower.
    pub fn derivative(&self) -> Polynomial {
        let coefficients = self
            .coefficients
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| c * i as f64)
            .collect();
        Polynomial { coefficients }
    }

    /// Strips negligible high-order coefficients, reducing the effective
    /// degree. Must run before any root dispatch: a cubic with a vanishing
    /// leading coefficient would otherwise be solved with the wrong formula.
    pub fn simplify(&self) -> Polynomial {
        let mut coefficients = self.coefficients.clone();
        while coefficients.len() > 1
            && coefficients.last().is_some_and(|c| c.abs() <= TOLERANCE)
        {
            coefficients.pop();
        }
        Polynomial { coefficients }
    }

    /// Classic sign-change bisection on `[min, max]`.
    ///
    /// Returns an endpoint directly if the polynomial is (near-)zero there,
    /// `None` when both endpoints have the same sign. The iteration count is
    /// derived from the interval width and the target decimal precision.
    pub fn bisection(&self, min: f64, max: f64) -> Option<f64> {
        let f_min = self.horner(min);
        let f_max = self.horner(max);

        if f_min.abs() <= TOLERANCE {
            return Some(min);
        }
        if f_max.abs() <= TOLERANCE {
            return Some(max);
        }
        if f_min.signum() == f_max.signum() {
            return None;
        }

        let iterations = (((max - min).ln() + std::f64::consts::LN_10 * PRECISION as f64)
            / std::f64::consts::LN_2)
            .ceil()
            .max(1.0) as usize;

        let (mut lo, mut hi) = (min, max);
        let mut mid = (lo + hi) / 2.0;
        for _ in 0..iterations {
            mid = (lo + hi) / 2.0;
            let f_mid = self.horner(mid);
            if f_mid.abs() <= TOLERANCE {
                break;
            }
            if f_mid.signum() == f_min.signum() {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        Some(mid)
    }

    /// All real roots within `[min, max]`.
    ///
    /// Degree 1 is handled by bisection directly. For higher degrees the
    /// roots of the derivative carve the interval into monotonic pieces,
    /// each of which holds at most one root reachable by bisection. This is
    /// what makes multiple roots of non-monotonic polynomials findable,
    /// which a single bisection over the whole interval is not.
    pub fn roots_in_interval(&self, min: f64, max: f64) -> Vec<f64> {
        let p = self.simplify();
        match p.degree() {
            0 => vec![],
            1 => p.bisection(min, max).into_iter().collect(),
            _ => {
                let mut bounds: Vec<f64> = p
                    .derivative()
                    .roots_in_interval(min, max)
                    .into_iter()
                    .filter(|t| *t > min && *t < max)
                    .collect();
                bounds.sort_by(|a, b| a.partial_cmp(b).expect("NaN root"));
                bounds.insert(0, min);
                bounds.push(max);

                let mut roots: Vec<f64> = vec![];
                for pair in bounds.windows(2) {
                    if let Some(r) = p.bisection(pair[0], pair[1]) {
                        if roots.iter().all(|known| (known - r).abs() > TOLERANCE) {
                            roots.push(r);
                        }
                    }
                }
                roots
            }
        }
    }

    /// All real roots, solved in closed form by degree after simplification.
    ///
    /// No interval filtering is applied here; callers working in the Bezier
    /// parameter domain use [`Polynomial::roots_in_interval`] or filter to
    /// `[0, 1]` themselves.
    pub fn roots(&self) -> Vec<f64> {
        let p = self.simplify();
        let c = &p.coefficients;
        match p.degree() {
            0 => vec![],
            1 => vec![-c[0] / c[1]],
            2 => quadratic_roots(c[2], c[1], c[0]),
            3 => cubic_roots(c[3], c[2], c[1], c[0]),
            4 => quartic_roots(c[4], c[3], c[2], c[1], c[0]),
            d => {
                warn!("no closed-form root solver for degree {d}, returning no roots");
                vec![]
            }
        }
    }
}

/// Real roots of `a*t^2 + b*t + c`, with a tolerance band around the
/// zero-discriminant (double root) case.
fn quadratic_roots(a: f64, b: f64, c: f64) -> Vec<f64> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant.abs() <= TOLERANCE {
        vec![-b / (2.0 * a)]
    } else if discriminant < 0.0 {
        vec![]
    } else {
        let sq = discriminant.sqrt();
        vec![(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)]
    }
}

/// Real roots of a cubic via the depressed form `t^3 + p*t + q`.
///
/// Branches on the discriminant: Cardano for a single real root,
/// trigonometric substitution for three, and the repeated-root formulas in
/// the (tolerance-snapped) boundary case.
fn cubic_roots(c3: f64, c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let a = c2 / c3;
    let b = c1 / c3;
    let c = c0 / c3;

    let p = b - a * a / 3.0;
    let q = 2.0 * a.powi(3) / 27.0 - a * b / 3.0 + c;
    let shift = -a / 3.0;

    let discriminant = q * q / 4.0 + p.powi(3) / 27.0;

    if discriminant.abs() <= TOLERANCE * TOLERANCE {
        if p.abs() <= TOLERANCE {
            // triple root
            vec![shift]
        } else {
            // one single and one double root
            vec![3.0 * q / p + shift, -3.0 * q / (2.0 * p) + shift]
        }
    } else if discriminant > 0.0 {
        // one real root (Cardano)
        let sq = discriminant.sqrt();
        let u = (-q / 2.0 + sq).cbrt();
        let v = (-q / 2.0 - sq).cbrt();
        vec![u + v + shift]
    } else {
        // three distinct real roots (trigonometric)
        let m = 2.0 * (-p / 3.0).sqrt();
        let phi = (3.0 * q / (p * m)).clamp(-1.0, 1.0).acos();
        (0..3)
            .map(|k| m * ((phi + 2.0 * std::f64::consts::PI * k as f64) / 3.0).cos() + shift)
            .collect()
    }
}

/// Real roots of a quartic via the resolvent cubic (Ferrari's method).
///
/// The depressed quartic `y^4 + p*y^2 + q*y + r` factors into two
/// quadratics once a positive root of the resolvent
/// `z^3 + 2p*z^2 + (p^2 - 4r)*z - q^2` is known.
fn quartic_roots(c4: f64, c3: f64, c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let a = c3 / c4;
    let b = c2 / c4;
    let c = c1 / c4;
    let d = c0 / c4;

    let p = b - 3.0 * a * a / 8.0;
    let q = c - a * b / 2.0 + a.powi(3) / 8.0;
    let r = d - a * c / 4.0 + a * a * b / 16.0 - 3.0 * a.powi(4) / 256.0;
    let shift = -a / 4.0;

    if q.abs() <= TOLERANCE {
        // biquadratic: solve z^2 + p*z + r for z = y^2
        return quadratic_roots(1.0, p, r)
            .into_iter()
            .filter_map(|z| {
                if z.abs() <= TOLERANCE {
                    Some(vec![shift])
                } else if z > 0.0 {
                    let s = z.sqrt();
                    Some(vec![-s + shift, s + shift])
                } else {
                    None
                }
            })
            .flatten()
            .collect();
    }

    let z = cubic_roots(1.0, 2.0 * p, p * p - 4.0 * r, -q * q)
        .into_iter()
        .filter(|z| *z > TOLERANCE)
        .fold(f64::NEG_INFINITY, f64::max);
    if !z.is_finite() {
        // no positive resolvent root means no real quartic roots
        return vec![];
    }

    let s = z.sqrt();
    let u = (p + z - q / s) / 2.0;
    let v = (p + z + q / s) / 2.0;

    let mut roots = quadratic_roots(1.0, s, u);
    roots.extend(quadratic_roots(1.0, -s, v));
    roots.iter_mut().for_each(|root| *root += shift);
    roots
}

#[cfg(test)]
mod tests {
    use super::{Polynomial, TOLERANCE};

    fn assert_roots(mut found: Vec<f64>, expected: &[f64], tol: f64) {
        found.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            found.len(),
            expected.len(),
            "expected roots {expected:?}, found {found:?}"
        );
        for (f, e) in found.iter().zip(expected) {
            assert!((f - e).abs() <= tol, "expected {e}, found {f}");
        }
    }

    #[test]
    fn evaluate_uses_horner() {
        let p = Polynomial::new(vec![1.0, -2.0, 3.0]);
        assert_eq!(p.evaluate(2.0).unwrap(), 1.0 - 4.0 + 12.0);
        assert!(p.evaluate(f64::NAN).is_err());
    }

    #[test]
    fn derivative_drops_a_degree() {
        let p = Polynomial::new(vec![5.0, 1.0, -2.0, 4.0]);
        assert_eq!(p.derivative().coefficients, vec![1.0, -4.0, 12.0]);
    }

    #[test]
    fn simplify_strips_vanishing_leading_terms() {
        let p = Polynomial::new(vec![1.0, 2.0, 1e-9, 1e-12]);
        assert_eq!(p.simplify().degree(), 1);
    }

    #[test]
    fn cubic_with_three_roots() {
        // (t-1)(t-2)(t-3) = t^3 - 6t^2 + 11t - 6
        let p = Polynomial::new(vec![-6.0, 11.0, -6.0, 1.0]);
        assert_roots(p.roots(), &[1.0, 2.0, 3.0], 1e-6);
    }

    #[test]
    fn complex_only_quadratic_has_no_real_roots() {
        let p = Polynomial::new(vec![1.0, 0.0, 1.0]); // t^2 + 1
        assert!(p.roots().is_empty());
    }

    #[test]
    fn quadratic_double_root() {
        // (t-2)^2
        let p = Polynomial::new(vec![4.0, -4.0, 1.0]);
        assert_roots(p.roots(), &[2.0], 1e-6);
    }

    #[test]
    fn cardano_single_real_root() {
        // t^3 + t + 1, one real root near -0.6823
        let p = Polynomial::new(vec![1.0, 1.0, 0.0, 1.0]);
        assert_roots(p.roots(), &[-0.6823278038280193], 1e-6);
    }

    #[test]
    fn quartic_biquadratic() {
        // (t^2-1)(t^2-4) = t^4 - 5t^2 + 4
        let p = Polynomial::new(vec![4.0, 0.0, -5.0, 0.0, 1.0]);
        assert_roots(p.roots(), &[-2.0, -1.0, 1.0, 2.0], 1e-6);
    }

    #[test]
    fn quartic_general() {
        // (t-1)(t-2)(t-3)(t-4) = t^4 - 10t^3 + 35t^2 - 50t + 24
        let p = Polynomial::new(vec![24.0, -50.0, 35.0, -10.0, 1.0]);
        assert_roots(p.roots(), &[1.0, 2.0, 3.0, 4.0], 1e-4);
    }

    #[test]
    fn quartic_asymmetric_roots() {
        // t(t-1)(t-2)(t-4) = t^4 - 7t^3 + 14t^2 - 8t, exercises the resolvent branch
        let p = Polynomial::new(vec![0.0, -8.0, 14.0, -7.0, 1.0]);
        assert_roots(p.roots(), &[0.0, 1.0, 2.0, 4.0], 1e-4);
    }

    #[test]
    fn interval_search_finds_multiple_roots_of_non_monotonic_polynomial() {
        // (t-0.2)(t-0.5)(t-0.8), all roots inside [0,1]
        let p = Polynomial::new(vec![-0.08, 0.66, -1.5, 1.0]);
        assert_roots(p.roots_in_interval(0.0, 1.0), &[0.2, 0.5, 0.8], 1e-5);
    }

    #[test]
    fn interval_search_ignores_outside_roots() {
        // roots at 2 and 3, none in [0,1]
        let p = Polynomial::new(vec![6.0, -5.0, 1.0]);
        assert!(p.roots_in_interval(0.0, 1.0).is_empty());
    }

    #[test]
    fn bisection_respects_sign_change_contract() {
        let p = Polynomial::new(vec![-0.5, 1.0]); // root at 0.5
        let root = p.bisection(0.0, 1.0).unwrap();
        assert!((root - 0.5).abs() <= TOLERANCE * 10.0);
        // no sign change over [0.6, 1.0]
        assert!(p.bisection(0.6, 1.0).is_none());
    }
}
