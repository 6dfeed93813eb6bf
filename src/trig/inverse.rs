//! Inverse trigonometric solvers
//!
//! Unlike `f64::asin` and friends, which return a single principal value,
//! these solvers return every angle in `[0, 2π)` that maps to the given value,
//! because the explorer shows students that several angles share a sine.
//!
//! The arccot convention here is `(0, π)`, not `(-π/2, π/2]`, so the result
//! is continuous through zero.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{ANGLE_TOLERANCE, TAU, UNDEFINED_EPSILON};
use crate::coordinates::Angle;
use crate::trig::{TrigFunction, TrigonometricValues};
use crate::{Result, TrigError};

const UNIT_INTERVAL: &str = "-1 <= value <= 1";
const OUTSIDE_UNIT_INTERVAL: &str = "|value| >= 1";
const ALL_REALS: &str = "value is a finite real number";

/// The six inverse trigonometric functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InverseFunction {
    Arcsin,
    Arccos,
    Arctan,
    Arccot,
    Arcsec,
    Arccsc,
}

impl InverseFunction {
    /// All inverse functions in display order
    pub const ALL: [InverseFunction; 6] = [
        InverseFunction::Arcsin,
        InverseFunction::Arccos,
        InverseFunction::Arctan,
        InverseFunction::Arccot,
        InverseFunction::Arcsec,
        InverseFunction::Arccsc,
    ];

    /// The forward function this inverts
    pub fn forward(self) -> TrigFunction {
        match self {
            InverseFunction::Arcsin => TrigFunction::Sin,
            InverseFunction::Arccos => TrigFunction::Cos,
            InverseFunction::Arctan => TrigFunction::Tan,
            InverseFunction::Arccot => TrigFunction::Cot,
            InverseFunction::Arcsec => TrigFunction::Sec,
            InverseFunction::Arccsc => TrigFunction::Csc,
        }
    }

    /// The inverse of a forward function
    pub fn of(function: TrigFunction) -> Self {
        match function {
            TrigFunction::Sin => InverseFunction::Arcsin,
            TrigFunction::Cos => InverseFunction::Arccos,
            TrigFunction::Tan => InverseFunction::Arctan,
            TrigFunction::Cot => InverseFunction::Arccot,
            TrigFunction::Sec => InverseFunction::Arcsec,
            TrigFunction::Csc => InverseFunction::Arccsc,
        }
    }

    /// Human-readable description of the valid input range
    pub fn domain(self) -> &'static str {
        match self {
            InverseFunction::Arcsin | InverseFunction::Arccos => UNIT_INTERVAL,
            InverseFunction::Arcsec | InverseFunction::Arccsc => OUTSIDE_UNIT_INTERVAL,
            InverseFunction::Arctan | InverseFunction::Arccot => ALL_REALS,
        }
    }

    fn accepts(self, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self {
            InverseFunction::Arcsin | InverseFunction::Arccos => (-1.0..=1.0).contains(&value),
            InverseFunction::Arcsec | InverseFunction::Arccsc => value.abs() >= 1.0,
            InverseFunction::Arctan | InverseFunction::Arccot => true,
        }
    }
}

impl fmt::Display for InverseFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "arc{}", self.forward())
    }
}

impl FromStr for InverseFunction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        let forward = lower
            .strip_prefix("arc")
            .or_else(|| lower.strip_prefix('a'))
            .unwrap_or(lower.as_str());
        forward
            .parse::<TrigFunction>()
            .map(InverseFunction::of)
            .map_err(|_| format!("Unknown inverse trigonometric function: {}", s))
    }
}

/// Every solution of `function(θ) = value` in one turn
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverseSolution {
    /// The inverse function that was evaluated
    pub function: InverseFunction,
    /// The input value
    pub value: f64,
    /// Principal value in radians, before normalization
    pub principal: f64,
    /// Distinct solutions in `[0, 2π)`, radian unit, in discovery order
    pub solutions: Vec<Angle>,
}

/// Solves `function(θ) = value` for all θ in `[0, 2π)`
///
/// # Errors
///
/// Returns `TrigError::Domain` when `value` lies outside the function's
/// domain or is not finite.
///
/// # Examples
///
/// ```rust
/// use trigview::trig::inverse::{solve, InverseFunction};
///
/// let solution = solve(InverseFunction::Arcsin, 0.5).unwrap();
/// let degrees: Vec<f64> = solution.solutions.iter().map(|a| a.to_degrees().round()).collect();
/// assert_eq!(degrees, vec![30.0, 150.0]);
///
/// assert!(solve(InverseFunction::Arccos, 2.0).is_err());
/// ```
pub fn solve(function: InverseFunction, value: f64) -> Result<InverseSolution> {
    if !function.accepts(value) {
        return Err(TrigError::Domain {
            function,
            value,
            domain: function.domain(),
        });
    }

    let (principal, candidates) = match function {
        InverseFunction::Arcsin => sine_solutions(value.asin()),
        InverseFunction::Arccsc => sine_solutions((1.0 / value).asin()),
        InverseFunction::Arccos => cosine_solutions(value.acos()),
        InverseFunction::Arcsec => cosine_solutions((1.0 / value).acos()),
        InverseFunction::Arctan => {
            let principal = value.atan();
            (principal, vec![principal])
        }
        InverseFunction::Arccot => {
            let principal = arccot_principal(value);
            (principal, vec![principal])
        }
    };

    let mut solutions: Vec<Angle> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let angle = Angle::from_radians(candidate)?.normalize();
        if !solutions.iter().any(|known| known.approx_eq(&angle)) {
            solutions.push(angle);
        }
    }

    log::trace!(
        "{}({}) -> principal {:.6}, {} solution(s)",
        function,
        value,
        principal,
        solutions.len()
    );

    Ok(InverseSolution {
        function,
        value,
        principal,
        solutions,
    })
}

/// All solutions of `sin θ = v` in one turn
pub fn arcsin(value: f64) -> Result<Vec<Angle>> {
    solve(InverseFunction::Arcsin, value).map(|s| s.solutions)
}

/// All solutions of `cos θ = v` in one turn
pub fn arccos(value: f64) -> Result<Vec<Angle>> {
    solve(InverseFunction::Arccos, value).map(|s| s.solutions)
}

/// The solution of `tan θ = v`, normalized into one turn
pub fn arctan(value: f64) -> Result<Vec<Angle>> {
    solve(InverseFunction::Arctan, value).map(|s| s.solutions)
}

/// The solution of `cot θ = v` in `(0, π)`
pub fn arccot(value: f64) -> Result<Vec<Angle>> {
    solve(InverseFunction::Arccot, value).map(|s| s.solutions)
}

/// All solutions of `sec θ = v` in one turn
pub fn arcsec(value: f64) -> Result<Vec<Angle>> {
    solve(InverseFunction::Arcsec, value).map(|s| s.solutions)
}

/// All solutions of `csc θ = v` in one turn
pub fn arccsc(value: f64) -> Result<Vec<Angle>> {
    solve(InverseFunction::Arccsc, value).map(|s| s.solutions)
}

/// Principal value in `[-π/2, π/2]` plus its mirror across π/2
fn sine_solutions(principal: f64) -> (f64, Vec<f64>) {
    let mut candidates = Vec::with_capacity(2);
    if principal >= 0.0 {
        candidates.push(principal);
        if principal > 0.0 && principal < PI / 2.0 {
            candidates.push(PI - principal);
        }
    } else {
        candidates.push(TAU + principal);
        candidates.push(PI - principal);
    }
    (principal, candidates)
}

/// Principal value in `[0, π]` plus its mirror across the x axis
fn cosine_solutions(principal: f64) -> (f64, Vec<f64>) {
    let mut candidates = vec![principal];
    if principal > 0.0 && principal < PI {
        candidates.push(TAU - principal);
    }
    (principal, candidates)
}

fn arccot_principal(value: f64) -> f64 {
    if value.abs() < UNDEFINED_EPSILON {
        return PI / 2.0;
    }
    let principal = (1.0 / value).atan();
    if principal < 0.0 {
        principal + PI
    } else {
        principal
    }
}

/// Checks that every solution maps back to the input value
///
/// Returns `false` if any solution's forward value is undefined or differs
/// from `solution.value` by `tolerance` or more.
pub fn verify(solution: &InverseSolution, tolerance: f64) -> bool {
    let forward = solution.function.forward();
    solution.solutions.iter().all(|angle| {
        TrigonometricValues::new(*angle)
            .value(forward)
            .map_or(false, |v| (v - solution.value).abs() < tolerance)
    })
}

/// Whether two solution sets describe the same angles
pub fn same_solutions(a: &[Angle], b: &[Angle]) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|x| b.iter().any(|y| (x.to_radians() - y.to_radians()).abs() < ANGLE_TOLERANCE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn degrees(angles: &[Angle]) -> Vec<f64> {
        angles
            .iter()
            .map(|a| (a.to_degrees() * 1e6).round() / 1e6)
            .collect()
    }

    #[test]
    fn test_arcsin_solution_sets() {
        assert_eq!(degrees(&arcsin(0.5).unwrap()), vec![30.0, 150.0]);
        assert_eq!(degrees(&arcsin(-0.5).unwrap()), vec![330.0, 210.0]);
        assert_eq!(degrees(&arcsin(1.0).unwrap()), vec![90.0]);
        assert_eq!(degrees(&arcsin(0.0).unwrap()), vec![0.0]);
        // Both branches land on 3π/2
        assert_eq!(degrees(&arcsin(-1.0).unwrap()), vec![270.0]);
    }

    #[test]
    fn test_arccos_solution_sets() {
        assert_eq!(degrees(&arccos(0.5).unwrap()), vec![60.0, 300.0]);
        assert_eq!(degrees(&arccos(1.0).unwrap()), vec![0.0]);
        assert_eq!(degrees(&arccos(-1.0).unwrap()), vec![180.0]);
        assert_eq!(degrees(&arccos(0.0).unwrap()), vec![90.0, 270.0]);
    }

    #[test]
    fn test_arctan_normalizes_negative_principal() {
        assert_eq!(degrees(&arctan(1.0).unwrap()), vec![45.0]);
        assert_eq!(degrees(&arctan(-1.0).unwrap()), vec![315.0]);
        let solution = solve(InverseFunction::Arctan, -1.0).unwrap();
        assert!(solution.principal < 0.0);
    }

    #[test]
    fn test_arccot_range() {
        assert_eq!(degrees(&arccot(1.0).unwrap()), vec![45.0]);
        assert_eq!(degrees(&arccot(-1.0).unwrap()), vec![135.0]);
        let at_zero = arccot(0.0).unwrap();
        assert_eq!(at_zero[0].to_radians(), PI / 2.0);
        assert_eq!(arccot(1e-12).unwrap()[0].to_radians(), PI / 2.0);
    }

    #[test]
    fn test_arcsec_and_arccsc() {
        assert_eq!(degrees(&arcsec(2.0).unwrap()), vec![60.0, 300.0]);
        assert_eq!(degrees(&arccsc(2.0).unwrap()), vec![30.0, 150.0]);
        assert_eq!(degrees(&arccsc(-2.0).unwrap()), vec![330.0, 210.0]);
    }

    #[test]
    fn test_domain_errors() {
        let cases = vec![
            (InverseFunction::Arcsin, 1.5),
            (InverseFunction::Arccos, -1.01),
            (InverseFunction::Arcsec, 0.5),
            (InverseFunction::Arccsc, -0.99),
            (InverseFunction::Arctan, f64::NAN),
            (InverseFunction::Arccot, f64::INFINITY),
        ];
        for (function, value) in cases {
            match solve(function, value) {
                Err(TrigError::Domain {
                    function: f,
                    domain,
                    ..
                }) => {
                    assert_eq!(f, function);
                    assert_eq!(domain, function.domain());
                }
                other => panic!(
                    "Expected domain error for {}({}), got {:?}",
                    function, value, other
                ),
            }
        }
    }

    #[test]
    fn test_domain_error_message_names_function() {
        let err = solve(InverseFunction::Arcsec, 0.5).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("arcsec"));
        assert!(message.contains("|value| >= 1"));
    }

    #[test]
    fn test_verify_round_trip() {
        for function in InverseFunction::ALL {
            for value in [-3.0, -1.0, -0.7, 0.0, 0.3, 1.0, 2.5] {
                if let Ok(solution) = solve(function, value) {
                    assert!(verify(&solution, 0.01), "{}({}) failed round trip", function, value);
                }
            }
        }
    }

    #[test]
    fn test_function_names() {
        assert_eq!(InverseFunction::Arccsc.to_string(), "arccsc");
        assert_eq!("asin".parse::<InverseFunction>().unwrap(), InverseFunction::Arcsin);
        assert_eq!("ArcCot".parse::<InverseFunction>().unwrap(), InverseFunction::Arccot);
        assert!("arcfoo".parse::<InverseFunction>().is_err());
    }

    #[test]
    fn test_same_solutions_ignores_order() {
        let a = arcsin(0.5).unwrap();
        let mut b = a.clone();
        b.reverse();
        assert!(same_solutions(&a, &b));
        assert!(!same_solutions(&a, &arccos(0.5).unwrap()));
    }
}
