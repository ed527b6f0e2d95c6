//! Raw NAACC survey record (§3 `NaaccCulvert`).

use serde::{Deserialize, Serialize};

/// A single culvert as surveyed under the NAACC schema. Constructed once
/// by the NAACC ingest pipeline (C4) from an input row; immutable after
/// that -- a `Point` owns one of these for its lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NaaccCulvert {
    /// NAACC's own culvert identifier; combined with `survey_id` to form
    /// a `Point`'s `uid`.
    #[serde(rename = "naaccId")]
    pub naacc_id: String,

    /// Identifies the road-stream crossing; culverts sharing this value
    /// are grouped into one crossing by C7.
    #[serde(rename = "surveyId")]
    pub survey_id: String,

    /// Latitude of the pour point, in `spatial_ref_code`'s coordinate system.
    pub lat: f64,
    /// Longitude of the pour point, in `spatial_ref_code`'s coordinate system.
    pub lng: f64,

    /// WKID of the coordinate system `lat`/`lng` are expressed in.
    #[serde(rename = "spatialRefCode")]
    pub spatial_ref_code: i32,

    /// Number of barrels at this crossing location.
    #[serde(rename = "numberOfCulverts")]
    pub number_of_culverts: u32,

    /// Culvert material, as surveyed (e.g. "Concrete", "Corrugated Metal").
    pub material: String,

    /// Inlet configuration, as surveyed (e.g. "Headwall", "Projecting").
    #[serde(rename = "inletType")]
    pub inlet_type: String,

    /// Inlet shape, as surveyed (e.g. "Round Culvert", "Box Culvert").
    #[serde(rename = "inletStructureType")]
    pub inlet_structure_type: String,

    /// Inlet width or diameter, feet.
    #[serde(rename = "inletWidth")]
    pub inlet_width: f64,
    /// Inlet height, feet (equal to width for round shapes).
    #[serde(rename = "inletHeight")]
    pub inlet_height: f64,
    /// Height of fill over the crossing, feet.
    #[serde(rename = "roadFillHeight")]
    pub road_fill_height: f64,
    /// Culvert barrel slope, percent (-1 denotes missing, §4.1 stage 6).
    #[serde(rename = "slopePercent")]
    pub slope_percent: f64,
    /// Culvert barrel length, feet.
    #[serde(rename = "crossingStructureLength")]
    pub crossing_structure_length: f64,

    /// Outlet shape, as surveyed.
    #[serde(rename = "outletStructureType")]
    pub outlet_structure_type: String,
    /// Outlet width or diameter, feet.
    #[serde(rename = "outletWidth")]
    pub outlet_width: f64,
    /// Outlet height, feet.
    #[serde(rename = "outletHeight")]
    pub outlet_height: f64,

    /// Crossing structure type, as surveyed (e.g. "Culvert", "Bridge");
    /// only "Culvert"/"Multiple Culvert" pass the C4 geometry tests.
    #[serde(rename = "crossingType")]
    pub crossing_type: String,

    /// Road name, if recorded.
    #[serde(rename = "roadName", skip_serializing_if = "Option::is_none")]
    pub road_name: Option<String>,
    /// Free-text surveyor comment, if recorded.
    #[serde(rename = "crossingComment", skip_serializing_if = "Option::is_none")]
    pub crossing_comment: Option<String>,
}

/// Default WKID for unspecified point coordinates (WGS84).
pub const DEFAULT_SPATIAL_REF_CODE: i32 = 4326;
