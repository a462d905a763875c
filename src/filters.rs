// 🔎 Query Filters - criteria applied to linked close approaches
//
// All bounds are inclusive. An unset bound matches everything.

use chrono::NaiveDate;

use crate::entities::CloseApproach;
use crate::error::{NeoError, Result};

/// Criteria for selecting close approaches
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApproachFilter {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
}

fn check_range<T: PartialOrd + std::fmt::Display>(
    name: &str,
    min: Option<T>,
    max: Option<T>,
) -> Result<()> {
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            return Err(NeoError::InvalidFilter {
                reason: format!("minimum {} {} is greater than maximum {}", name, min, max),
            });
        }
    }
    Ok(())
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    // NaN fails both comparisons, so unknown values never satisfy a bound
    min.map_or(true, |m| value >= m) && max.map_or(true, |m| value <= m)
}

impl ApproachFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject bounds that can never match
    pub fn validate(&self) -> Result<()> {
        check_range("date", self.start_date, self.end_date)?;
        check_range("distance", self.distance_min, self.distance_max)?;
        check_range("velocity", self.velocity_min, self.velocity_max)?;
        check_range("diameter", self.diameter_min, self.diameter_max)?;
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, approach: &CloseApproach) -> bool {
        let day = approach.time.date();

        if self.date.is_some_and(|d| d != day) {
            return false;
        }
        if self.start_date.is_some_and(|d| day < d) {
            return false;
        }
        if self.end_date.is_some_and(|d| day > d) {
            return false;
        }
        if !within(approach.distance, self.distance_min, self.distance_max) {
            return false;
        }
        if !within(approach.velocity, self.velocity_min, self.velocity_max) {
            return false;
        }

        // NEO criteria read the linked NEO, or the unknown placeholder
        if self.diameter_min.is_some() || self.diameter_max.is_some() || self.hazardous.is_some() {
            let neo = approach.neo_or_unknown();
            if !within(neo.diameter, self.diameter_min, self.diameter_max) {
                return false;
            }
            if self.hazardous.is_some_and(|h| h != neo.hazardous) {
                return false;
            }
        }

        true
    }
}

/// Yield at most `n` items; `0` means no limit
pub fn limit<I: Iterator>(iter: I, n: usize) -> std::iter::Take<I> {
    let n = if n == 0 { usize::MAX } else { n };
    iter.take(n)
}
