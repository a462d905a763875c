// ☄️ NearEarthObject Entity
//
// Designation is IDENTITY (join key with close approaches).
// Name and diameter are optional VALUES with one explicit "missing" form each:
// - name: None (never an empty string)
// - diameter: NaN (never a string, never None)

use serde::{Deserialize, Serialize};
use std::fmt;

/// A near-Earth object loaded from the NEO CSV file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearEarthObject {
    /// Primary designation (`pdes`), unique per NEO
    pub designation: String,

    /// IAU name, if the object has one
    pub name: Option<String>,

    /// Diameter in kilometers, NaN when unknown
    pub diameter: f64,

    /// Whether NASA flags the object as a Potentially Hazardous Asteroid
    pub hazardous: bool,
}

impl NearEarthObject {
    pub fn new(
        designation: String,
        name: Option<String>,
        diameter: f64,
        hazardous: bool,
    ) -> Self {
        NearEarthObject {
            designation,
            // Normalize here as well so callers can't smuggle in Some("")
            name: name.filter(|n| !n.is_empty()),
            diameter,
            hazardous,
        }
    }

    /// Placeholder for a close approach whose designation matches no loaded NEO
    pub fn unknown(designation: &str) -> Self {
        NearEarthObject {
            designation: designation.to_string(),
            name: None,
            diameter: f64::NAN,
            hazardous: false,
        }
    }

    /// "433 (Eros)" when named, otherwise just the designation
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    pub fn has_known_diameter(&self) -> bool {
        !self.diameter.is_nan()
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous { "is" } else { "is not" };
        if self.has_known_diameter() {
            write!(
                f,
                "NEO {} has a diameter of {:.3} km and {} potentially hazardous.",
                self.fullname(),
                self.diameter,
                hazard
            )
        } else {
            write!(
                f,
                "NEO {} has an unknown diameter and {} potentially hazardous.",
                self.fullname(),
                hazard
            )
        }
    }
}
