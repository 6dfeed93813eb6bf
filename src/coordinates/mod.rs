pub mod angle;
pub mod point;

pub use angle::{Angle, AngleUnit};
pub use point::Point;
