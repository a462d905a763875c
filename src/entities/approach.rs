// 🛰️ CloseApproach Entity
//
// Raw fields are fixed at load time. The only post-construction change is
// the NEO link, assigned once by the database after both files are loaded.

use chrono::NaiveDateTime;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use super::neo::NearEarthObject;

/// External format of the `cd` field, e.g. "1900-Dec-27 01:30"
pub const APPROACH_TIME_FORMAT: &str = "%Y-%b-%d %H:%M";

/// Canonical output format, e.g. "1900-12-27 01:30"
pub const OUTPUT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Parse a close approach timestamp in `YYYY-Mon-DD HH:MM` form
pub fn parse_approach_time(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), APPROACH_TIME_FORMAT)
}

#[derive(Debug, Clone)]
pub struct CloseApproach {
    /// Designation of the approaching NEO (may not exist in the NEO file)
    pub designation: String,

    /// Time of closest approach, UTC
    pub time: NaiveDateTime,

    /// Nominal approach distance (au)
    pub distance: f64,

    /// Velocity relative to Earth (km/s)
    pub velocity: f64,

    neo: Option<Arc<NearEarthObject>>,
}

impl CloseApproach {
    pub fn new(designation: String, time: NaiveDateTime, distance: f64, velocity: f64) -> Self {
        CloseApproach {
            designation,
            time,
            distance,
            velocity,
            neo: None,
        }
    }

    /// Canonical display string for `time`
    pub fn time_str(&self) -> String {
        self.time.format(OUTPUT_TIME_FORMAT).to_string()
    }

    /// Linked NEO, if the database has linked this approach
    pub fn neo(&self) -> Option<&NearEarthObject> {
        self.neo.as_deref()
    }

    /// Linked NEO, or an unknown placeholder for an unlinked approach
    pub fn neo_or_unknown(&self) -> Cow<'_, NearEarthObject> {
        match self.neo.as_deref() {
            Some(neo) => Cow::Borrowed(neo),
            None => Cow::Owned(NearEarthObject::unknown(&self.designation)),
        }
    }

    pub fn link(&mut self, neo: Arc<NearEarthObject>) {
        self.neo = Some(neo);
    }

    pub fn is_linked(&self) -> bool {
        self.neo.is_some()
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let neo = self.neo_or_unknown();
        write!(
            f,
            "On {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            neo.fullname(),
            self.distance,
            self.velocity
        )
    }
}
