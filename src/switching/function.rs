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

use crate::Switch;
use crate::parse::{self, SwitchParseError};
use std::fmt;
use std::str::FromStr;

/// The functional form `f(x)` of a switching function, in terms of the reduced
/// distance `x = (r - d_0) / r_0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SwitchKind {
    /// `(1 - x^nn) / (1 - x^mm)`
    Rational { nn: i32, mm: i32 },
    /// `exp(-x)`
    Exponential,
    /// `exp(-x²/2)`
    Gaussian,
    /// `(1 + (2^(a/b) - 1) x^a)^(-b/a)`
    Smap { a: f64, b: f64 },
    /// `(x - 1)² (1 + 2x)`, with `r_0 = d_max - d_0`
    Cubic,
    /// `1 - tanh(x)`
    Tanh,
}

impl SwitchKind {
    /// Returns `(f(x), df/dx)` for `x > 0`.
    #[inline]
    fn evaluate(&self, x: f64) -> (f64, f64) {
        match *self {
            SwitchKind::Rational { nn, mm } => rational(x, nn, mm),
            SwitchKind::Exponential => {
                let value = f64::exp(-x);
                (value, -value)
            },
            SwitchKind::Gaussian => {
                let value = f64::exp(-0.5 * x * x);
                (value, -x * value)
            },
            SwitchKind::Smap { a, b } => {
                let c = f64::powf(2.0, a / b) - 1.0;
                let d = -b / a;
                let sx = c * x.powf(a);
                let value = (1.0 + sx).powf(d);
                let d_x = c * a * d * x.powf(a - 1.0) * (1.0 + sx).powf(d - 1.0);
                (value, d_x)
            },
            SwitchKind::Cubic => {
                let value = (x - 1.0) * (x - 1.0) * (1.0 + 2.0 * x);
                let d_x = 6.0 * x * (x - 1.0);
                (value, d_x)
            },
            SwitchKind::Tanh => {
                let t = x.tanh();
                (1.0 - t, -(1.0 - t * t))
            },
        }
    }

    fn name(&self) -> &'static str {
        match *self {
            SwitchKind::Rational { .. } => "rational",
            SwitchKind::Exponential => "exponential",
            SwitchKind::Gaussian => "gaussian",
            SwitchKind::Smap { .. } => "smap",
            SwitchKind::Cubic => "cubic",
            SwitchKind::Tanh => "tanh",
        }
    }
}

fn rational(x: f64, nn: i32, mm: i32) -> (f64, f64) {
    if 2 * nn == mm {
        // (1 - x^n) / (1 - x^2n) = 1 / (1 + x^n), which has no removable singularity
        let x_nm1 = x.powi(nn - 1);
        let inv_denom = 1.0 / (1.0 + x_nm1 * x);
        (inv_denom, -f64::from(nn) * x_nm1 * inv_denom * inv_denom)
    } else if (x - 1.0).abs() < 100.0 * std::f64::EPSILON {
        // limits at the removable singularity
        let (nn, mm) = (f64::from(nn), f64::from(mm));
        (nn / mm, 0.5 * nn * (nn - mm) / mm)
    } else {
        let x_nm1 = x.powi(nn - 1);
        let x_mm1 = x.powi(mm - 1);
        let numer = 1.0 - x_nm1 * x;
        let inv_denom = 1.0 / (1.0 - x_mm1 * x);
        let value = numer * inv_denom;
        let d_x = -f64::from(nn) * x_nm1 * inv_denom + value * inv_denom * f64::from(mm) * x_mm1;
        (value, d_x)
    }
}

/// A switching function `s(r)` of one of the standard forms.
///
/// `s(r) = 1` for `r <= d_0`, and `s(r) = 0` (with zero slope) for `r > d_max`.
/// When `d_max` is finite and stretching is enabled, the function is rescaled so that
/// it goes exactly from 1 at `r = 0` to 0 at `r = d_max`.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchingFunction {
    kind: SwitchKind,
    d_0: f64,
    r_0: f64,
    d_max: Option<f64>,
    stretch: f64,
    shift: f64,
}

impl SwitchingFunction {
    /// Build a switching function, checking the parameters.
    ///
    /// For `SwitchKind::Cubic`, `r_0` is ignored and replaced with `d_max - d_0`.
    pub fn new(
        kind: SwitchKind,
        d_0: f64,
        r_0: f64,
        d_max: Option<f64>,
        stretch: bool,
    ) -> Result<Self, SwitchParseError> {
        let r_0 = match kind {
            SwitchKind::Cubic => match d_max {
                Some(d_max) => d_max - d_0,
                None => return Err(SwitchParseError::MissingKey("D_MAX")),
            },
            _ => r_0,
        };

        let invalid = |msg: String| Err(SwitchParseError::BadParameters(msg));
        if !(r_0 > 0.0) {
            return invalid(format!("R_0 must be positive (got {})", r_0));
        }
        if !(d_0 >= 0.0) {
            return invalid(format!("D_0 must be non-negative (got {})", d_0));
        }
        if let Some(d_max) = d_max {
            if !(d_max > d_0) {
                return invalid(format!("D_MAX ({}) must be greater than D_0 ({})", d_max, d_0));
            }
        }
        match kind {
            SwitchKind::Rational { nn, mm } => {
                if nn <= 0 || mm <= 0 {
                    return invalid(format!("NN and MM must be positive (got {}, {})", nn, mm));
                }
            },
            SwitchKind::Smap { a, b } => {
                if !(a > 0.0 && b > 0.0) {
                    return invalid(format!("A and B must be positive (got {}, {})", a, b));
                }
            },
            _ => {},
        }

        let mut out = SwitchingFunction { kind, d_0, r_0, d_max, stretch: 1.0, shift: 0.0 };
        if let (true, Some(d_max)) = (stretch, d_max) {
            let (at_zero, _) = out.calculate(0.0);
            let (at_max, _) = out.calculate(d_max);
            out.stretch = 1.0 / (at_zero - at_max);
            out.shift = -at_max * out.stretch;
            trace!("stretching {} switching function by {} (shift {})", kind.name(), out.stretch, out.shift);
        }
        Ok(out)
    }

    /// `RATIONAL` with `d_0 = 0` and no `d_max`.
    pub fn rational(r_0: f64, nn: i32, mm: i32) -> Result<Self, SwitchParseError>
    { SwitchingFunction::new(SwitchKind::Rational { nn, mm }, 0.0, r_0, None, true) }

    pub fn kind(&self) -> SwitchKind { self.kind }
    pub fn d_0(&self) -> f64 { self.d_0 }
    pub fn r_0(&self) -> f64 { self.r_0 }
    pub fn d_max(&self) -> Option<f64> { self.d_max }

    /// Evaluate at a distance.  Returns `(s, dfunc)` with `dfunc = (ds/dr) / r`.
    pub fn calculate(&self, distance: f64) -> (f64, f64) {
        if let Some(d_max) = self.d_max {
            if distance > d_max {
                return (0.0, 0.0);
            }
        }

        let rdist = (distance - self.d_0) / self.r_0;
        let (value, dfunc) = match rdist <= 0.0 {
            true => (1.0, 0.0),
            false => {
                let (value, d_rdist) = self.kind.evaluate(rdist);
                (value, d_rdist / self.r_0 / distance)
            },
        };
        (value * self.stretch + self.shift, dfunc * self.stretch)
    }
}

impl Switch for SwitchingFunction {
    #[inline]
    fn calculate_sqr(&self, distance_sq: f64) -> (f64, f64)
    { self.calculate(distance_sq.sqrt()) }

    fn description(&self) -> String
    { self.to_string() }

    fn support(&self) -> Option<f64>
    { self.d_max }
}

impl fmt::Display for SwitchingFunction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} switching function with parameters d0={}", self.kind.name(), self.d_0)?;
        match self.kind {
            SwitchKind::Cubic => {},
            _ => write!(f, " r0={}", self.r_0)?,
        }
        match self.kind {
            SwitchKind::Rational { nn, mm } => write!(f, " nn={} mm={}", nn, mm)?,
            SwitchKind::Smap { a, b } => write!(f, " a={} b={}", a, b)?,
            _ => {},
        }
        if let Some(d_max) = self.d_max {
            write!(f, " dmax={}", d_max)?;
        }
        Ok(())
    }
}

impl FromStr for SwitchingFunction {
    type Err = SwitchParseError;

    fn from_str(s: &str) -> Result<Self, SwitchParseError>
    { parse::parse(s) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridgecv_numerical as numerical;

    fn uniform(a: f64, b: f64) -> f64 { rand::random::<f64>() * (b - a) + a }

    fn all_kinds() -> Vec<SwitchingFunction> {
        vec![
            SwitchingFunction::new(SwitchKind::Rational { nn: 6, mm: 12 }, 0.0, 0.5, None, true),
            SwitchingFunction::new(SwitchKind::Rational { nn: 8, mm: 12 }, 0.1, 0.5, None, true),
            SwitchingFunction::new(SwitchKind::Exponential, 0.2, 0.4, Some(3.0), true),
            SwitchingFunction::new(SwitchKind::Gaussian, 0.0, 0.7, None, true),
            SwitchingFunction::new(SwitchKind::Smap { a: 4.0, b: 6.0 }, 0.0, 0.8, None, true),
            SwitchingFunction::new(SwitchKind::Cubic, 0.3, 0.0, Some(1.5), true),
            SwitchingFunction::new(SwitchKind::Tanh, 0.0, 0.6, Some(4.0), false),
        ].into_iter().map(Result::unwrap).collect()
    }

    #[test]
    fn slope_matches_numerical_derivative() {
        for func in all_kinds() {
            let upper = func.d_max().unwrap_or(3.0);
            for _ in 0..20 {
                // stay away from d_0 and d_max, where the slope may be discontinuous
                let r = uniform(func.d_0() + 0.05, upper - 0.05);
                let (_, dfunc) = func.calculate(r);
                let numerical = numerical::slope(1e-4, None, r, |r| func.calculate(r).0);
                assert_close!(rel=1e-6, abs=1e-8, dfunc * r, numerical, "{}", func);
            }
        }
    }

    #[test]
    fn squared_distance_agrees_with_distance() {
        for func in all_kinds() {
            let r = 0.37;
            let (value, dfunc) = func.calculate(r);
            let (value_sq, dfunc_sq) = func.calculate_sqr(r * r);
            assert_close!(value_sq, value);
            assert_close!(dfunc_sq, dfunc);
        }
    }

    #[test]
    fn inside_d_0_is_one() {
        let func = SwitchingFunction::new(SwitchKind::Exponential, 0.5, 0.2, None, true).unwrap();
        assert_eq!(func.calculate(0.0), (1.0, 0.0));
        assert_eq!(func.calculate(0.5), (1.0, 0.0));
        assert!(func.calculate(0.6).0 < 1.0);
    }

    #[test]
    fn stretched_to_zero_at_d_max() {
        for &kind in &[SwitchKind::Rational { nn: 6, mm: 12 }, SwitchKind::Gaussian, SwitchKind::Tanh] {
            let func = SwitchingFunction::new(kind, 0.0, 0.4, Some(1.2), true).unwrap();
            assert_close!(abs=1e-12, func.calculate(0.0).0, 1.0);
            assert_close!(abs=1e-12, func.calculate(1.2).0, 0.0);
            assert_eq!(func.calculate(1.2 + 1e-9), (0.0, 0.0));
            assert_eq!(func.support(), Some(1.2));
        }
    }

    #[test]
    fn unstretched_is_cut_off_sharply() {
        let func = SwitchingFunction::new(SwitchKind::Gaussian, 0.0, 0.4, Some(1.2), false).unwrap();
        let (below, _) = func.calculate(1.2);
        assert!(below > 0.0);
        assert_eq!(func.calculate(1.3), (0.0, 0.0));
    }

    #[test]
    fn rational_near_removable_singularity() {
        // NN=8, MM=12 has a 0/0 at x = 1 that must be replaced by its limit
        let func = SwitchingFunction::new(SwitchKind::Rational { nn: 8, mm: 12 }, 0.0, 1.0, None, true).unwrap();
        let (at_one, d_at_one) = func.calculate(1.0);
        assert_close!(at_one, 8.0 / 12.0);
        assert_close!(d_at_one, 0.5 * 8.0 * (8.0 - 12.0) / 12.0);

        let (near_one, _) = func.calculate(1.0 + 1e-6);
        assert_close!(rel=1e-5, near_one, at_one);
    }

    #[test]
    fn cubic_needs_d_max() {
        assert_eq!(
            SwitchingFunction::new(SwitchKind::Cubic, 0.0, 1.0, None, true),
            Err(SwitchParseError::MissingKey("D_MAX")),
        );
        let func = SwitchingFunction::new(SwitchKind::Cubic, 0.5, 123.0, Some(1.5), true).unwrap();
        assert_eq!(func.r_0(), 1.0);
    }

    #[test]
    fn bad_parameters() {
        assert!(SwitchingFunction::rational(0.0, 6, 12).is_err());
        assert!(SwitchingFunction::rational(0.3, 0, 12).is_err());
        assert!(SwitchingFunction::new(SwitchKind::Gaussian, 1.0, 0.3, Some(0.5), true).is_err());
        assert!(SwitchingFunction::new(SwitchKind::Smap { a: 0.0, b: 2.0 }, 0.0, 0.3, None, true).is_err());
    }
}
