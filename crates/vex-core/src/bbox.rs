//! Bounding box parsing and validation.
//!
//! A query names each edge either by its long form (`north`, `south`,
//! `east`, `west`) or its short form (`n`, `s`, `e`, `w`). The long form
//! wins when both are present. Empty values count as absent.

use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::error::{ValidationError, ValidationResult};

/// Valid latitudes in degrees.
pub const LATITUDE_RANGE: RangeInclusive<f64> = -90.0..=90.0;

/// Valid longitudes in degrees.
pub const LONGITUDE_RANGE: RangeInclusive<f64> = -180.0..=180.0;

/// A validated rectangle on the Earth's surface, in degrees.
///
/// Guarantees `north > south`, `east > west`, latitudes within
/// [`LATITUDE_RANGE`] and longitudes within [`LONGITUDE_RANGE`].
/// Boxes crossing the antimeridian are rejected as inverted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl BoundingBox {
    /// Validate four edges, returning the first failing check.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> ValidationResult<Self> {
        if ![north, south, east, west].iter().all(|v| v.is_finite()) {
            return Err(ValidationError::MalformedInput);
        }

        if north <= south || east <= west {
            return Err(ValidationError::InvertedBox);
        }

        if !LATITUDE_RANGE.contains(&north) || !LATITUDE_RANGE.contains(&south) {
            return Err(ValidationError::LatitudeOutOfRange);
        }

        if !LONGITUDE_RANGE.contains(&east) || !LONGITUDE_RANGE.contains(&west) {
            return Err(ValidationError::LongitudeOutOfRange);
        }

        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Parse and validate a box from decoded query parameters.
    pub fn from_query(params: &HashMap<String, String>) -> ValidationResult<Self> {
        let north = coordinate(params, "north", "n");
        let south = coordinate(params, "south", "s");
        let east = coordinate(params, "east", "e");
        let west = coordinate(params, "west", "w");

        match (north, south, east, west) {
            (Some(north), Some(south), Some(east), Some(west)) => {
                Self::new(north, south, east, west)
            }
            _ => Err(ValidationError::MalformedInput),
        }
    }

    pub fn north(&self) -> f64 {
        self.north
    }

    pub fn south(&self) -> f64 {
        self.south
    }

    pub fn east(&self) -> f64 {
        self.east
    }

    pub fn west(&self) -> f64 {
        self.west
    }

    /// Midpoint as `(latitude, longitude)`.
    pub fn midpoint(&self) -> (f64, f64) {
        ((self.north + self.south) / 2.0, (self.east + self.west) / 2.0)
    }
}

/// Look up one edge, preferring the long key, and parse it as a finite number.
fn coordinate(params: &HashMap<String, String>, long: &str, short: &str) -> Option<f64> {
    let raw = param(params, long).or_else(|| param(params, short))?;
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_long_form() {
        let bbox = BoundingBox::from_query(&query(&[
            ("north", "10"),
            ("south", "0"),
            ("east", "20"),
            ("west", "0"),
        ]))
        .unwrap();
        assert_eq!(bbox.north(), 10.0);
        assert_eq!(bbox.south(), 0.0);
        assert_eq!(bbox.east(), 20.0);
        assert_eq!(bbox.west(), 0.0);
    }

    #[test]
    fn parses_short_form() {
        let bbox = BoundingBox::from_query(&query(&[
            ("n", "52.5"),
            ("s", "52.3"),
            ("e", "13.5"),
            ("w", "13.2"),
        ]))
        .unwrap();
        assert_eq!(bbox.north(), 52.5);
        assert_eq!(bbox.west(), 13.2);
    }

    #[test]
    fn long_form_takes_precedence() {
        let bbox = BoundingBox::from_query(&query(&[
            ("north", "10"),
            ("n", "80"),
            ("s", "0"),
            ("e", "20"),
            ("w", "0"),
        ]))
        .unwrap();
        assert_eq!(bbox.north(), 10.0);
    }

    #[test]
    fn empty_long_form_falls_back_to_short() {
        let bbox = BoundingBox::from_query(&query(&[
            ("north", ""),
            ("n", "10"),
            ("south", "0"),
            ("east", "20"),
            ("west", "0"),
        ]))
        .unwrap();
        assert_eq!(bbox.north(), 10.0);
    }

    #[test]
    fn missing_coordinate_is_malformed() {
        let err = BoundingBox::from_query(&query(&[
            ("north", "10"),
            ("south", "0"),
            ("east", "20"),
        ]))
        .unwrap_err();
        assert_eq!(err, ValidationError::MalformedInput);
    }

    #[test]
    fn empty_query_is_malformed() {
        let err = BoundingBox::from_query(&HashMap::new()).unwrap_err();
        assert_eq!(err, ValidationError::MalformedInput);
    }

    #[test]
    fn non_numeric_is_malformed() {
        let err = BoundingBox::from_query(&query(&[
            ("north", "ten"),
            ("south", "0"),
            ("east", "20"),
            ("west", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err, ValidationError::MalformedInput);
    }

    #[test]
    fn non_finite_is_malformed() {
        for bad in ["inf", "-inf", "NaN", "infinity"] {
            let err = BoundingBox::from_query(&query(&[
                ("north", bad),
                ("south", "0"),
                ("east", "20"),
                ("west", "0"),
            ]))
            .unwrap_err();
            assert_eq!(err, ValidationError::MalformedInput, "value {bad}");
        }
        assert_eq!(
            BoundingBox::new(f64::NAN, 0.0, 1.0, 0.0).unwrap_err(),
            ValidationError::MalformedInput
        );
    }

    #[test]
    fn whitespace_is_trimmed() {
        let bbox = BoundingBox::from_query(&query(&[
            ("north", " 10 "),
            ("south", "0"),
            ("east", "20"),
            ("west", "-5"),
        ]))
        .unwrap();
        assert_eq!(bbox.north(), 10.0);
        assert_eq!(bbox.west(), -5.0);
    }

    #[test]
    fn malformed_wins_over_inverted() {
        let err = BoundingBox::from_query(&query(&[
            ("north", "0"),
            ("south", "10"),
            ("east", "x"),
            ("west", "0"),
        ]))
        .unwrap_err();
        assert_eq!(err, ValidationError::MalformedInput);
    }

    #[test]
    fn inverted_latitudes() {
        assert_eq!(
            BoundingBox::new(0.0, 10.0, 20.0, 0.0).unwrap_err(),
            ValidationError::InvertedBox
        );
    }

    #[test]
    fn equal_edges_are_inverted() {
        assert_eq!(
            BoundingBox::new(10.0, 10.0, 20.0, 0.0).unwrap_err(),
            ValidationError::InvertedBox
        );
        assert_eq!(
            BoundingBox::new(10.0, 0.0, 20.0, 20.0).unwrap_err(),
            ValidationError::InvertedBox
        );
    }

    #[test]
    fn inversion_checked_before_range() {
        // Longitude is out of range too, but inversion is reported first.
        assert_eq!(
            BoundingBox::new(10.0, 20.0, 500.0, 0.0).unwrap_err(),
            ValidationError::InvertedBox
        );
    }

    #[test]
    fn antimeridian_box_is_inverted() {
        assert_eq!(
            BoundingBox::new(10.0, 0.0, -170.0, 170.0).unwrap_err(),
            ValidationError::InvertedBox
        );
    }

    #[test]
    fn latitude_out_of_range() {
        assert_eq!(
            BoundingBox::new(91.0, 0.0, 20.0, 0.0).unwrap_err(),
            ValidationError::LatitudeOutOfRange
        );
        assert_eq!(
            BoundingBox::new(10.0, -90.5, 20.0, 0.0).unwrap_err(),
            ValidationError::LatitudeOutOfRange
        );
    }

    #[test]
    fn latitude_checked_before_longitude() {
        assert_eq!(
            BoundingBox::new(95.0, 0.0, 200.0, 0.0).unwrap_err(),
            ValidationError::LatitudeOutOfRange
        );
    }

    #[test]
    fn longitude_out_of_range() {
        assert_eq!(
            BoundingBox::new(10.0, 0.0, 180.5, 0.0).unwrap_err(),
            ValidationError::LongitudeOutOfRange
        );
        assert_eq!(
            BoundingBox::new(10.0, 0.0, 20.0, -181.0).unwrap_err(),
            ValidationError::LongitudeOutOfRange
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let bbox = BoundingBox::new(90.0, -90.0, 180.0, -180.0).unwrap();
        assert_eq!(bbox.midpoint(), (0.0, 0.0));
    }

    #[test]
    fn midpoint_keeps_precision() {
        let bbox = BoundingBox::new(10.5, 0.25, -1.0, -2.0).unwrap();
        assert_eq!(bbox.midpoint(), (5.375, -1.5));
    }
}
