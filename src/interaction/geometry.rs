//! Mapping from client (screen) coordinates to the unit circle
//!
//! Pointer events report client coordinates. The circle is drawn in an SVG
//! whose user space (the "surface") is described by its view box; the element
//! occupies a bounding rectangle on screen. The chain is:
//!
//! ```text
//! client (px, y down) --affine--> surface (view box units, y down)
//!                     --center/radius, flip y--> unit (radius 1, y up)
//! ```

use nalgebra::{Matrix3, Point2};
use serde::{Deserialize, Serialize};

use crate::coordinates::{Angle, Point};
use crate::{Result, TrigError};

/// Bounding box of the drawing element in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElementRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// The SVG view box of the drawing element
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Where the unit circle is drawn and how the element maps onto the screen
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceGeometry {
    rect: ElementRect,
    view_box: ViewBox,
    center: Point2<f64>,
    radius: f64,
    client_to_surface: Matrix3<f64>,
}

impl SurfaceGeometry {
    /// Creates the geometry for a circle of `radius` centered at
    /// `(center_x, center_y)` in surface units
    ///
    /// # Errors
    ///
    /// Returns `TrigError::InvalidGeometry` if any size is not positive or any
    /// value is not finite.
    pub fn new(
        rect: ElementRect,
        view_box: ViewBox,
        center_x: f64,
        center_y: f64,
        radius: f64,
    ) -> Result<Self> {
        let values = [
            rect.left,
            rect.top,
            rect.width,
            rect.height,
            view_box.min_x,
            view_box.min_y,
            view_box.width,
            view_box.height,
            center_x,
            center_y,
            radius,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(TrigError::InvalidGeometry(
                "all coordinates must be finite".to_string(),
            ));
        }
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return Err(TrigError::InvalidGeometry(format!(
                "element size must be positive, got {}x{}",
                rect.width, rect.height
            )));
        }
        if view_box.width <= 0.0 || view_box.height <= 0.0 {
            return Err(TrigError::InvalidGeometry(format!(
                "view box size must be positive, got {}x{}",
                view_box.width, view_box.height
            )));
        }
        if radius <= 0.0 {
            return Err(TrigError::InvalidGeometry(format!(
                "radius must be positive, got {}",
                radius
            )));
        }

        let sx = view_box.width / rect.width;
        let sy = view_box.height / rect.height;
        #[rustfmt::skip]
        let client_to_surface = Matrix3::new(
            sx,  0.0, view_box.min_x - rect.left * sx,
            0.0, sy,  view_box.min_y - rect.top * sy,
            0.0, 0.0, 1.0,
        );

        Ok(Self {
            rect,
            view_box,
            center: Point2::new(center_x, center_y),
            radius,
            client_to_surface,
        })
    }

    /// A square element whose view box matches its pixel size, with the
    /// circle centered
    pub fn square(left: f64, top: f64, size: f64, radius: f64) -> Result<Self> {
        Self::new(
            ElementRect {
                left,
                top,
                width: size,
                height: size,
            },
            ViewBox {
                min_x: 0.0,
                min_y: 0.0,
                width: size,
                height: size,
            },
            size / 2.0,
            size / 2.0,
            radius,
        )
    }

    pub fn rect(&self) -> ElementRect {
        self.rect
    }

    pub fn view_box(&self) -> ViewBox {
        self.view_box
    }

    /// Circle radius in surface units
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Converts client coordinates into surface coordinates
    pub fn client_to_surface(&self, client_x: f64, client_y: f64) -> Point2<f64> {
        self.client_to_surface
            .transform_point(&Point2::new(client_x, client_y))
    }

    /// Distance of a client position from the circle center, in surface units
    pub fn distance_from_center(&self, client_x: f64, client_y: f64) -> f64 {
        nalgebra::distance(&self.client_to_surface(client_x, client_y), &self.center)
    }

    /// Converts client coordinates into unit-circle coordinates (y up)
    ///
    /// # Errors
    ///
    /// Returns `TrigError::NonFinitePoint` for non-finite client coordinates.
    pub fn client_to_unit(&self, client_x: f64, client_y: f64) -> Result<Point> {
        let surface = self.client_to_surface(client_x, client_y);
        Point::new(
            (surface.x - self.center.x) / self.radius,
            (self.center.y - surface.y) / self.radius,
        )
    }

    /// Converts a unit-circle point back into client coordinates
    pub fn unit_to_client(&self, point: &Point) -> Option<Point2<f64>> {
        let surface = Point2::new(
            self.center.x + point.x * self.radius,
            self.center.y - point.y * self.radius,
        );
        self.client_to_surface
            .try_inverse()
            .map(|inverse| inverse.transform_point(&surface))
    }
}

/// An emitted angle together with the point that represents it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AngleSample {
    /// Direction of the point, normalized into one turn (radians)
    pub angle: Angle,
    /// Point to draw, on the circle when locked, otherwise the raw unit point
    pub point: Point,
}

/// Direction of a unit point from the center, normalized into `[0, 2π)`
///
/// The center itself has no direction and maps to angle zero.
pub fn direction_angle(point: &Point) -> Result<Angle> {
    if point.x == 0.0 && point.y == 0.0 {
        return Ok(Angle::ZERO);
    }
    Ok(Angle::from_radians(point.angle_from_origin())?.normalize())
}
