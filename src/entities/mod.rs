// Entity Models
//
// - NearEarthObject: identity = designation, loaded from CSV
// - CloseApproach: references a NEO by designation, loaded from JSON

pub mod neo;
pub mod approach;

pub use neo::NearEarthObject;
pub use approach::{
    parse_approach_time, CloseApproach, APPROACH_TIME_FORMAT, OUTPUT_TIME_FORMAT,
};
