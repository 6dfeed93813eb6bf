//! # Two-Dimensional Point Module
//!
//! This module provides the `Point` value used to place angles on the unit
//! circle and to interpret pointer positions relative to the circle center.
//!
//! ## Coordinate System Convention
//!
//! Points use the mathematical convention:
//! - **X-axis**: Points right, toward angle 0
//! - **Y-axis**: Points up, toward angle π/2
//!
//! Screen and SVG coordinates (y pointing down) are converted into this
//! convention by `interaction::geometry` before they reach a `Point`.
//!
//! ## Examples
//!
//! ```rust
//! use trigview::coordinates::{Angle, Point};
//!
//! let p = Point::from_angle(&Angle::PI_2);
//! assert!(p.x.abs() < 1e-15);
//! assert!((p.y - 1.0).abs() < 1e-15);
//! assert!(p.is_on_unit_circle());
//! ```

use std::ops::{Add, Mul, Sub};

use serde::Serialize;

use crate::constants::ANGLE_TOLERANCE;
use crate::coordinates::Angle;
use crate::{Result, TrigError};

/// Finite two-dimensional coordinate
///
/// # Unit Points vs Pointer Points
///
/// This type can represent both:
/// - **Unit-circle points**: `(cos θ, sin θ)` for some angle
/// - **Pointer points**: a pointer position scaled so the circle radius is 1
///
/// The interpretation depends on context.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// X-component (toward angle 0)
    pub x: f64,
    /// Y-component (toward angle π/2)
    pub y: f64,
}

impl Point {
    /// The origin
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Creates a new point
    ///
    /// # Errors
    ///
    /// Returns `TrigError::NonFinitePoint` if either coordinate is NaN or infinite.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trigview::coordinates::Point;
    ///
    /// let p = Point::new(3.0, 4.0).unwrap();
    /// assert_eq!(p.magnitude(), 5.0);
    /// assert!(Point::new(f64::NAN, 0.0).is_err());
    /// ```
    pub fn new(x: f64, y: f64) -> Result<Self> {
        if !x.is_finite() || !y.is_finite() {
            return Err(TrigError::NonFinitePoint { x, y });
        }
        Ok(Point { x, y })
    }

    /// The unit-circle point `(cos θ, sin θ)` for an angle
    ///
    /// This is the canonical bridge between angles and points.
    pub fn from_angle(angle: &Angle) -> Self {
        let theta = angle.to_radians();
        Point {
            x: theta.cos(),
            y: theta.sin(),
        }
    }

    /// Euclidean distance to another point
    ///
    /// The distance is symmetric and zero for identical points.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use trigview::coordinates::Point;
    ///
    /// let a = Point::new(1.0, 1.0).unwrap();
    /// let b = Point::new(4.0, 5.0).unwrap();
    /// assert_eq!(a.distance_to(&b), 5.0);
    /// assert_eq!(b.distance_to(&a), 5.0);
    /// ```
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Distance from the origin
    pub fn magnitude(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Direction of this point seen from the origin
    ///
    /// Returns the raw `atan2(y, x)` in `(-π, π]`. Callers that need
    /// `[0, 2π)` must normalize the resulting angle themselves.
    pub fn angle_from_origin(&self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Checks membership in the unit circle with the default tolerance (1e-4)
    pub fn is_on_unit_circle(&self) -> bool {
        self.is_on_unit_circle_within(ANGLE_TOLERANCE)
    }

    /// Checks whether the point lies within `tolerance` of distance 1 from the origin
    ///
    /// The origin is never on the unit circle; callers must treat it as a
    /// degenerate case.
    pub fn is_on_unit_circle_within(&self, tolerance: f64) -> bool {
        (self.magnitude() - 1.0).abs() < tolerance
    }

    /// Projects the point onto the unit circle
    ///
    /// Returns `None` for the origin, which has no direction.
    pub fn normalize(&self) -> Option<Point> {
        let mag = self.magnitude();
        if mag == 0.0 {
            None
        } else {
            Some(Point {
                x: self.x / mag,
                y: self.y / mag,
            })
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, scalar: f64) -> Point {
        Point {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}
