//! The built-in formulas

use std::f64::consts::PI;

use crate::coordinates::{Angle, Point};
use crate::formulas::{Difficulty, Formula, PresentationTree};
use crate::trig::TrigonometricValues;

/// Ids of every built-in formula
pub const BUILTIN_IDS: [&str; 6] = [
    "pythagorean",
    "tangent_quotient",
    "double_angle_sin",
    "double_angle_cos",
    "euler",
    "taylor_sine",
];

/// Partial sums shown for the sine series
const SERIES_TERMS: usize = 8;

/// Terms used when summing the exponential series for Euler's formula
const EXP_SERIES_TERMS: usize = 30;

/// Every built-in formula, checking identities within `tolerance`
pub fn all(tolerance: f64) -> Vec<Box<dyn Formula>> {
    vec![
        Box::new(Pythagorean { tolerance }),
        Box::new(TangentQuotient { tolerance }),
        Box::new(DoubleAngleSin { tolerance }),
        Box::new(DoubleAngleCos { tolerance }),
        Box::new(Euler { tolerance }),
        Box::new(TaylorSine { tolerance }),
    ]
}

/// θ reduced into [-π, π), where the power series converge quickly
fn reduced_radians(angle: &Angle) -> f64 {
    let theta = angle.normalize().to_radians();
    if theta >= PI {
        theta - 2.0 * PI
    } else {
        theta
    }
}

/// Legs of the right triangle drawn inside the unit circle
fn triangle(tree: &mut PresentationTree, values: &TrigonometricValues) {
    let foot = Point {
        x: values.cos(),
        y: 0.0,
    };
    let tip = Point {
        x: values.cos(),
        y: values.sin(),
    };
    tree.segment("cos θ", Point::ORIGIN, foot);
    tree.segment("sin θ", foot, tip);
    tree.segment("1", Point::ORIGIN, tip);
}

/// sin²θ + cos²θ = 1
#[derive(Debug, Clone, Copy)]
pub struct Pythagorean {
    tolerance: f64,
}

impl Formula for Pythagorean {
    fn id(&self) -> &'static str {
        "pythagorean"
    }

    fn name(&self) -> &'static str {
        "Pythagorean identity"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::HighSchool
    }

    fn formula_text(&self) -> &'static str {
        "sin²θ + cos²θ = 1"
    }

    fn render(&self, angle: &Angle) -> PresentationTree {
        let values = TrigonometricValues::new(*angle);
        let (sin, cos) = (values.sin(), values.cos());
        let mut tree = PresentationTree::new(self, angle);
        triangle(&mut tree, &values);
        tree.value("sin²θ", sin * sin);
        tree.value("cos²θ", cos * cos);
        tree.check("sin²θ + cos²θ = 1", sin * sin + cos * cos, 1.0, self.tolerance);
        tree
    }
}

/// tan θ = sin θ / cos θ
#[derive(Debug, Clone, Copy)]
pub struct TangentQuotient {
    tolerance: f64,
}

impl Formula for TangentQuotient {
    fn id(&self) -> &'static str {
        "tangent_quotient"
    }

    fn name(&self) -> &'static str {
        "Tangent as a quotient"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::HighSchool
    }

    fn formula_text(&self) -> &'static str {
        "tan θ = sin θ / cos θ"
    }

    fn render(&self, angle: &Angle) -> PresentationTree {
        let values = TrigonometricValues::new(*angle);
        let mut tree = PresentationTree::new(self, angle);
        triangle(&mut tree, &values);
        tree.value("sin θ", values.sin());
        tree.value("cos θ", values.cos());
        match values.tan() {
            Some(tan) => {
                let direct = values.angle().to_radians().tan();
                tree.check("tan θ = sin θ / cos θ", direct, tan, self.tolerance);
            }
            None => tree.text("cos θ = 0, so tan θ is undefined"),
        }
        tree
    }
}

/// sin 2θ = 2 sin θ cos θ
#[derive(Debug, Clone, Copy)]
pub struct DoubleAngleSin {
    tolerance: f64,
}

impl Formula for DoubleAngleSin {
    fn id(&self) -> &'static str {
        "double_angle_sin"
    }

    fn name(&self) -> &'static str {
        "Double angle (sine)"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::College
    }

    fn formula_text(&self) -> &'static str {
        "sin 2θ = 2 sin θ cos θ"
    }

    fn render(&self, angle: &Angle) -> PresentationTree {
        let values = TrigonometricValues::new(*angle);
        let lhs = (2.0 * angle.to_radians()).sin();
        let rhs = 2.0 * values.sin() * values.cos();
        let mut tree = PresentationTree::new(self, angle);
        tree.value("2θ (rad)", 2.0 * angle.to_radians());
        tree.value("sin 2θ", lhs);
        tree.value("2 sin θ cos θ", rhs);
        tree.check("sin 2θ = 2 sin θ cos θ", lhs, rhs, self.tolerance);
        tree
    }
}

/// cos 2θ = cos²θ − sin²θ
#[derive(Debug, Clone, Copy)]
pub struct DoubleAngleCos {
    tolerance: f64,
}

impl Formula for DoubleAngleCos {
    fn id(&self) -> &'static str {
        "double_angle_cos"
    }

    fn name(&self) -> &'static str {
        "Double angle (cosine)"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::College
    }

    fn formula_text(&self) -> &'static str {
        "cos 2θ = cos²θ − sin²θ = 2cos²θ − 1 = 1 − 2sin²θ"
    }

    fn render(&self, angle: &Angle) -> PresentationTree {
        let values = TrigonometricValues::new(*angle);
        let (sin, cos) = (values.sin(), values.cos());
        let lhs = (2.0 * angle.to_radians()).cos();
        let mut tree = PresentationTree::new(self, angle);
        tree.value("cos 2θ", lhs);
        tree.check("cos 2θ = cos²θ − sin²θ", lhs, cos * cos - sin * sin, self.tolerance);
        tree.check("cos 2θ = 2cos²θ − 1", lhs, 2.0 * cos * cos - 1.0, self.tolerance);
        tree.check("cos 2θ = 1 − 2sin²θ", lhs, 1.0 - 2.0 * sin * sin, self.tolerance);
        tree
    }
}

/// e^(iθ) = cos θ + i sin θ
///
/// The left side is summed from the exponential power series so the check
/// compares two independent computations.
#[derive(Debug, Clone, Copy)]
pub struct Euler {
    tolerance: f64,
}

impl Euler {
    /// Real and imaginary parts of e^(iθ) from its power series
    fn exp_i(theta: f64) -> (f64, f64) {
        // (iθ)^n / n!, tracked as (re, im)
        let (mut term_re, mut term_im) = (1.0, 0.0);
        let (mut re, mut im) = (0.0, 0.0);
        for n in 0..EXP_SERIES_TERMS {
            re += term_re;
            im += term_im;
            // multiply by iθ / (n + 1)
            let k = theta / (n as f64 + 1.0);
            let next_re = -term_im * k;
            let next_im = term_re * k;
            term_re = next_re;
            term_im = next_im;
        }
        (re, im)
    }
}

impl Formula for Euler {
    fn id(&self) -> &'static str {
        "euler"
    }

    fn name(&self) -> &'static str {
        "Euler's formula"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Graduate
    }

    fn formula_text(&self) -> &'static str {
        "e^(iθ) = cos θ + i sin θ"
    }

    fn render(&self, angle: &Angle) -> PresentationTree {
        let values = TrigonometricValues::new(*angle);
        let (re, im) = Self::exp_i(reduced_radians(angle));
        let mut tree = PresentationTree::new(self, angle);
        tree.segment(
            "e^(iθ)",
            Point::ORIGIN,
            Point {
                x: values.cos(),
                y: values.sin(),
            },
        );
        tree.value("Re e^(iθ)", re);
        tree.value("Im e^(iθ)", im);
        tree.check("Re e^(iθ) = cos θ", re, values.cos(), self.tolerance);
        tree.check("Im e^(iθ) = sin θ", im, values.sin(), self.tolerance);
        tree
    }
}

/// sin θ = θ − θ³/3! + θ⁵/5! − …
#[derive(Debug, Clone, Copy)]
pub struct TaylorSine {
    tolerance: f64,
}

impl TaylorSine {
    /// Partial sums after each of the first `terms` non-zero terms
    pub fn partial_sums(theta: f64, terms: usize) -> Vec<f64> {
        let mut sums = Vec::with_capacity(terms);
        let mut term = theta;
        let mut sum = 0.0;
        for k in 0..terms {
            sum += term;
            sums.push(sum);
            let n = 2.0 * k as f64;
            term *= -theta * theta / ((n + 2.0) * (n + 3.0));
        }
        sums
    }
}

impl Formula for TaylorSine {
    fn id(&self) -> &'static str {
        "taylor_sine"
    }

    fn name(&self) -> &'static str {
        "Taylor series of sine"
    }

    fn difficulty(&self) -> Difficulty {
        Difficulty::Graduate
    }

    fn formula_text(&self) -> &'static str {
        "sin θ = Σ (−1)ⁿ θ^(2n+1) / (2n+1)!"
    }

    fn render(&self, angle: &Angle) -> PresentationTree {
        let theta = reduced_radians(angle);
        let sums = Self::partial_sums(theta, SERIES_TERMS);
        let mut tree = PresentationTree::new(self, angle);
        tree.value("θ (reduced, rad)", theta);
        for (k, sum) in sums.iter().enumerate() {
            tree.value(format!("S{}", k + 1), *sum);
        }
        let last = sums.last().copied().unwrap_or(0.0);
        tree.check("partial sum = sin θ", last, theta.sin(), self.tolerance);
        tree
    }
}
