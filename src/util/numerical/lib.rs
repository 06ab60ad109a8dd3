/* ************************************************************************ **
** This file is part of bridgecv, and is licensed under EITHER the MIT      **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
**                                                                          **
** Be aware that not all of bridgecv is provided under this permissive      **
** license, and that the project as a whole is licensed under the GPL 3.0.  **
** ************************************************************************ */

//! Utilities for numeric differentiation.
//!
//! These exist to debug analytic derivatives; nothing in the production path calls them.

#[cfg(test)] #[macro_use] extern crate bridgecv_assert_close;

/// Approximation method for a numerical 1D derivative.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DerivativeKind {
    /// n-point stencil. `n` must be odd. Only implemented for `n = 3, 5, 7, 9`.
    Stencil(u32),
}

impl DerivativeKind {
    /// Alias for `DerivativeKind::Stencil(3)`.
    #[allow(bad_style)]
    pub const CentralDifference: Self = DerivativeKind::Stencil(3);

    /// `(offset, coefficient)` pairs and the denominator, in units of the step.
    ///
    /// http://www.holoborodko.com/pavel/numerical-methods/numerical-derivative/central-differences/
    fn stencil(self) -> (&'static [(f64, f64)], f64) {
        match self {
            DerivativeKind::Stencil(3) => (&[(-1.0, -1.0), (1.0, 1.0)], 2.0),
            DerivativeKind::Stencil(5) => (&[(-2.0, 1.0), (-1.0, -8.0), (1.0, 8.0), (2.0, -1.0)], 12.0),
            DerivativeKind::Stencil(7) => (&[
                (-3.0, -1.0), (-2.0, 9.0), (-1.0, -45.0),
                (1.0, 45.0), (2.0, -9.0), (3.0, 1.0),
            ], 60.0),
            DerivativeKind::Stencil(9) => (&[
                (-4.0, 3.0), (-3.0, -32.0), (-2.0, 168.0), (-1.0, -672.0),
                (1.0, 672.0), (2.0, -168.0), (3.0, 32.0), (4.0, -3.0),
            ], 840.0),
            DerivativeKind::Stencil(n) if n < 2 || n % 2 == 0 => {
                panic!("{}-point stencil does not exist", n)
            },
            DerivativeKind::Stencil(n) => panic!("{}-point stencil is not implemented", n),
        }
    }
}

impl Default for DerivativeKind {
    fn default() -> DerivativeKind { DerivativeKind::Stencil(5) }
}

enum Never {}

/// Compute a numerical derivative using finite differences.
pub fn slope(
    step: f64,
    kind: Option<DerivativeKind>,
    point: f64,
    mut value_fn: impl FnMut(f64) -> f64,
) -> f64 {
    try_slope::<Never, _>(step, kind, point, |x| Ok(value_fn(x)))
        .unwrap_or_else(|e| match e {})
}

/// `slope` for functions that can fail.
pub fn try_slope<E, F>(
    step: f64,
    kind: Option<DerivativeKind>,
    point: f64,
    mut value_fn: F,
) -> Result<f64, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let (terms, denom) = kind.unwrap_or_default().stencil();
    let mut numer = 0.0;
    for &(offset, coeff) in terms {
        numer += coeff * value_fn(point + offset * step)?;
    }
    Ok(numer / (denom * step))
}

/// Numerically compute a gradient.
///
/// This performs an independent slope check along each axis of the input, so the
/// number of function calls grows linearly with the input size.
pub fn gradient(
    step: f64,
    kind: Option<DerivativeKind>,
    point: &[f64],
    mut value_fn: impl FnMut(&[f64]) -> f64,
) -> Vec<f64> {
    try_gradient::<Never, _>(step, kind, point, |x| Ok(value_fn(x)))
        .unwrap_or_else(|e| match e {})
}

/// `gradient` for functions that can fail.
pub fn try_gradient<E, F>(
    step: f64,
    kind: Option<DerivativeKind>,
    point: &[f64],
    mut value_fn: F,
) -> Result<Vec<f64>, E>
where
    F: FnMut(&[f64]) -> Result<f64, E>,
{
    let kind = kind.unwrap_or_default();
    let mut work = point.to_vec();
    let mut out = Vec::with_capacity(point.len());
    for (i, &center) in point.iter().enumerate() {
        let d = try_slope(step, Some(kind), center, |x| {
            work[i] = x;
            value_fn(&work)
        })?;
        work[i] = center;
        out.push(d);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(a: f64, b: f64) -> f64 { rand::random::<f64>() * (b - a) + a }

    #[test]
    fn exact_for_low_order_polynomials() {
        for &n in &[3, 5, 7, 9] {
            for _ in 0..10 {
                // an n-point stencil is exact for polynomials up to order n-1
                let coeffs: Vec<f64> = (0..n).map(|_| uniform(-2.0, 2.0)).collect();
                let poly = |x: f64| coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c);
                let d_poly = |x: f64| {
                    coeffs.iter().enumerate().skip(1).rev()
                        .fold(0.0, |acc, (k, &c)| acc * x + k as f64 * c)
                };

                let x = uniform(-3.0, 3.0);
                let actual = slope(1e-1, Some(DerivativeKind::Stencil(n)), x, poly);
                assert_close!(abs=1e-8, rel=1e-8, d_poly(x), actual, "{}-point", n);
            }
        }
    }

    #[test]
    fn gradient_of_quadratic_form() {
        let point = [0.5, -1.25, 2.0];
        let grad = gradient(1e-2, None, &point, |x| x[0] * x[0] + 3.0 * x[0] * x[1] - x[2]);
        assert_close!(abs=1e-9, grad, vec![2.0 * 0.5 + 3.0 * -1.25, 3.0 * 0.5, -1.0]);
    }

    #[test]
    #[should_panic(expected = "does not exist")]
    fn even_stencil() {
        slope(1e-3, Some(DerivativeKind::Stencil(4)), 0.0, |x| x);
    }
}
