//! Single clicks on the drawing surface
//!
//! A click inside the circle (plus a tolerance band) selects the angle of
//! the clicked direction. Clicks further out either snap onto the circle or
//! are ignored, depending on `ClickConfig::snap_outside_clicks`.

use crate::config::ClickConfig;
use crate::coordinates::{Angle, Point};
use crate::interaction::geometry::{direction_angle, AngleSample, SurfaceGeometry};
use crate::Result;

/// Computes the angle selected by a click, or `None` if the click is ignored
///
/// The tolerance is measured in surface units. A click exactly on the center
/// selects angle zero.
///
/// # Errors
///
/// Returns `TrigError::NonFinitePoint` for non-finite client coordinates.
pub fn click_to_angle(
    client_x: f64,
    client_y: f64,
    geometry: &SurfaceGeometry,
    config: &ClickConfig,
) -> Result<Option<AngleSample>> {
    let distance = geometry.distance_from_center(client_x, client_y);
    let within = distance <= geometry.radius() + config.snap_tolerance_px;
    if !within && !config.snap_outside_clicks {
        log::trace!(
            "Click at ({}, {}) is {:.1} units from center, outside the circle",
            client_x,
            client_y,
            distance
        );
        return Ok(None);
    }

    let unit = geometry.client_to_unit(client_x, client_y)?;
    let point = if unit.is_on_unit_circle() {
        unit
    } else {
        match unit.normalize() {
            Some(on_circle) => on_circle,
            None => {
                return Ok(Some(AngleSample {
                    angle: Angle::ZERO,
                    point: Point::from_angle(&Angle::ZERO),
                }))
            }
        }
    };
    let angle = direction_angle(&point)?;
    Ok(Some(AngleSample { angle, point }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn geometry() -> SurfaceGeometry {
        SurfaceGeometry::square(0.0, 0.0, 300.0, 100.0).unwrap()
    }

    #[test]
    fn test_click_inside_projects_onto_circle() {
        let sample = click_to_angle(150.0, 100.0, &geometry(), &ClickConfig::default())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(sample.angle.to_radians(), PI / 2.0, epsilon = 1e-12);
        assert!(sample.point.is_on_unit_circle());
    }

    #[test]
    fn test_click_at_center_is_zero() {
        let sample = click_to_angle(150.0, 150.0, &geometry(), &ClickConfig::default())
            .unwrap()
            .unwrap();
        assert_eq!(sample.angle, Angle::ZERO);
        assert_eq!(sample.point.x, 1.0);
    }

    #[test]
    fn test_click_outside_without_snapping() {
        let config = ClickConfig {
            snap_outside_clicks: false,
            ..ClickConfig::default()
        };
        // 105 units away: inside the 10 unit tolerance band
        assert!(click_to_angle(255.0, 150.0, &geometry(), &config).unwrap().is_some());
        // 120 units away: ignored
        assert!(click_to_angle(270.0, 150.0, &geometry(), &config).unwrap().is_none());
    }

    #[test]
    fn test_click_outside_with_snapping() {
        let sample = click_to_angle(0.0, 300.0, &geometry(), &ClickConfig::default())
            .unwrap()
            .unwrap();
        assert_abs_diff_eq!(sample.angle.to_radians(), 5.0 * PI / 4.0, epsilon = 1e-12);
        assert!(sample.point.is_on_unit_circle());
    }
}
