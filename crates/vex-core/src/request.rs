//! A validated extraction request.

use crate::bbox::BoundingBox;

/// Marker telling the extraction engine to write to stdout.
pub const STDOUT_MARKER: &str = "-";

/// A validated bounding box together with its download filename.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    bbox: BoundingBox,
    filename: String,
}

impl ExtractionRequest {
    pub fn new(bbox: BoundingBox) -> Self {
        let (lat, lon) = bbox.midpoint();
        let filename = format!(
            "osm_export_{}_{}.pbf",
            format_coordinate(lat),
            format_coordinate(lon)
        );
        Self { bbox, filename }
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// `osm_export_<latmid>_<lonmid>.pbf`
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Value for the `Content-Disposition` response header.
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }

    /// Box arguments in engine order: south, west, north, east, then the
    /// stdout marker. The database path goes in front of these.
    pub fn engine_args(&self) -> [String; 5] {
        [
            format_coordinate(self.bbox.south()),
            format_coordinate(self.bbox.west()),
            format_coordinate(self.bbox.north()),
            format_coordinate(self.bbox.east()),
            STDOUT_MARKER.to_string(),
        ]
    }
}

/// Shortest round-tripping decimal form; integral values have no fraction
/// and negative zero prints as `0`.
pub fn format_coordinate(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}
