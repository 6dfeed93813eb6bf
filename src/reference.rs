//! Reference table of the standard angles
//!
//! The sixteen multiples of 30° and 45° in one turn, with their radian labels
//! and the exact values of sine, cosine and tangent as text.

use serde::Serialize;

use crate::coordinates::Angle;

/// One row of the reference table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceEntry {
    pub angle: Angle,
    /// Radian measure as a multiple of π, e.g. `5π/6`
    pub radians_label: &'static str,
    pub sin: &'static str,
    pub cos: &'static str,
    /// `"undefined"` where cos θ = 0
    pub tan: &'static str,
}

impl ReferenceEntry {
    const fn new(
        degrees: f64,
        radians_label: &'static str,
        sin: &'static str,
        cos: &'static str,
        tan: &'static str,
    ) -> Self {
        Self {
            angle: Angle::degrees_unchecked(degrees),
            radians_label,
            sin,
            cos,
            tan,
        }
    }

    pub fn degrees(&self) -> f64 {
        self.angle.to_degrees()
    }
}

#[rustfmt::skip]
const STANDARD: [ReferenceEntry; 16] = [
    ReferenceEntry::new(0.0,   "0",     "0",     "1",     "0"),
    ReferenceEntry::new(30.0,  "π/6",   "1/2",   "√3/2",  "√3/3"),
    ReferenceEntry::new(45.0,  "π/4",   "√2/2",  "√2/2",  "1"),
    ReferenceEntry::new(60.0,  "π/3",   "√3/2",  "1/2",   "√3"),
    ReferenceEntry::new(90.0,  "π/2",   "1",     "0",     "undefined"),
    ReferenceEntry::new(120.0, "2π/3",  "√3/2",  "-1/2",  "-√3"),
    ReferenceEntry::new(135.0, "3π/4",  "√2/2",  "-√2/2", "-1"),
    ReferenceEntry::new(150.0, "5π/6",  "1/2",   "-√3/2", "-√3/3"),
    ReferenceEntry::new(180.0, "π",     "0",     "-1",    "0"),
    ReferenceEntry::new(210.0, "7π/6",  "-1/2",  "-√3/2", "√3/3"),
    ReferenceEntry::new(225.0, "5π/4",  "-√2/2", "-√2/2", "1"),
    ReferenceEntry::new(240.0, "4π/3",  "-√3/2", "-1/2",  "√3"),
    ReferenceEntry::new(270.0, "3π/2",  "-1",    "0",     "undefined"),
    ReferenceEntry::new(300.0, "5π/3",  "-√3/2", "1/2",   "-√3"),
    ReferenceEntry::new(315.0, "7π/4",  "-√2/2", "√2/2",  "-1"),
    ReferenceEntry::new(330.0, "11π/6", "-1/2",  "√3/2",  "-√3/3"),
];

/// The standard-angle table
#[derive(Debug, Clone)]
pub struct ReferenceTable {
    entries: Vec<ReferenceEntry>,
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferenceTable {
    pub fn standard() -> Self {
        Self {
            entries: STANDARD.to_vec(),
        }
    }

    /// Rows in increasing angle order
    pub fn rows(&self) -> &[ReferenceEntry] {
        &self.entries
    }

    /// The row for `angle`, if it is (after normalization) one of the standard angles
    pub fn lookup(&self, angle: &Angle) -> Option<&ReferenceEntry> {
        let normalized = angle.normalize();
        self.entries
            .iter()
            .find(|entry| entry.angle.approx_eq(&normalized))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
