//! NAACC ingest pipeline (C4): schema validation, categorical cross-walk,
//! culvert-geometry tests, capacity-parameter derivation, and capacity
//! computation. Errors accumulate on the `Point`; no row is ever dropped
//! (§4.1 "Failure semantics").

use std::collections::HashMap;
use std::f64::consts::PI;
use std::path::Path;

use log::{debug, info, warn};

use crate::coefficients::{self, FEET_TO_METERS};
use crate::error::WorkflowResult;
use crate::model::capacity::Capacity;
use crate::model::naacc::NaaccCulvert;
use crate::model::point::Point;

use super::reader::read_naacc_csv;

/// Crossing types accepted by the geometry tests (§4.1 stage 5, check 1).
const OK_CROSSING_TYPES: [&str; 2] = ["culvert", "multiple culvert"];

fn get<'a>(row: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    row.get(key).map(|s| s.as_str()).filter(|s| !s.is_empty())
}

fn parse_f64(row: &HashMap<String, String>, key: &str) -> Option<f64> {
    get(row, key).and_then(|v| v.parse::<f64>().ok())
}

fn parse_u32(row: &HashMap<String, String>, key: &str) -> Option<u32> {
    get(row, key).and_then(|v| v.parse::<u32>().ok())
}

/// §4.1 stage 2: schema validation against the 15 required `NaaccCulvert`
/// fields. Always returns a culvert -- a blank or unparsable field is
/// recorded by name in the returned (field, message) list, never dropped,
/// so every row becomes exactly one `Point` (§4.1 "Failure semantics").
fn parse_naacc_culvert(row: &HashMap<String, String>, wkid: i32) -> (NaaccCulvert, Vec<(String, String)>) {
    let mut errors = Vec::new();

    macro_rules! require_str {
        ($field:literal) => {
            match get(row, $field) {
                Some(v) => v.to_string(),
                None => {
                    errors.push(($field.to_string(), "required field is missing".to_string()));
                    String::new()
                }
            }
        };
    }
    macro_rules! require_f64 {
        ($field:literal) => {
            match parse_f64(row, $field) {
                Some(v) => v,
                None => {
                    errors.push(($field.to_string(), format!("must be a number ({:?})", get(row, $field))));
                    0.0
                }
            }
        };
    }
    macro_rules! require_u32 {
        ($field:literal) => {
            match parse_u32(row, $field) {
                Some(v) => v,
                None => {
                    errors.push(($field.to_string(), format!("must be a whole number ({:?})", get(row, $field))));
                    1
                }
            }
        };
    }

    let naacc_id = require_str!("Naacc_Culvert_Id");
    let survey_id = require_str!("Survey_Id");
    let lat = require_f64!("GIS_Latitude");
    let lng = require_f64!("GIS_Longitude");
    let number_of_culverts = require_u32!("Number_Of_Culverts");
    let material = require_str!("Material");
    let inlet_type = require_str!("Inlet_Type");
    let inlet_structure_type = require_str!("Inlet_Structure_Type");
    let inlet_width = require_f64!("Inlet_Width");
    let inlet_height = require_f64!("Inlet_Height");
    let road_fill_height = require_f64!("Road_Fill_Height");
    let slope_percent = require_f64!("Slope_Percent");
    let crossing_structure_length = require_f64!("Crossing_Structure_Length");
    let outlet_structure_type = require_str!("Outlet_Structure_Type");
    let outlet_width = require_f64!("Outlet_Width");
    let outlet_height = require_f64!("Outlet_Height");
    let crossing_type = require_str!("Crossing_Type");
    let road_name = get(row, "Road").map(|s| s.to_string());
    let crossing_comment = get(row, "Crossing_Comment").map(|s| s.to_string());

    let culvert = NaaccCulvert {
        naacc_id,
        survey_id,
        lat,
        lng,
        spatial_ref_code: wkid,
        number_of_culverts,
        material,
        inlet_type,
        inlet_structure_type,
        inlet_width,
        inlet_height,
        road_fill_height,
        slope_percent,
        crossing_structure_length,
        outlet_structure_type,
        outlet_width,
        outlet_height,
        crossing_type,
        road_name,
        crossing_comment,
    };
    (culvert, errors)
}

/// §4.1 stages 3-4: copy NAACC fields into the short-name `Capacity`
/// fields, applying the categorical cross-walks for shape and inlet type.
fn xwalk_naacc_to_capacity(naacc: &NaaccCulvert) -> Capacity {
    let mut capacity = Capacity::default();
    capacity.culv_mat = Some(naacc.material.clone());
    capacity.in_type = Some(coefficients::crosswalk_inlet_type(&naacc.inlet_type));
    capacity.in_shape = Some(coefficients::crosswalk_inlet_shape(&naacc.inlet_structure_type));
    capacity.in_a = Some(naacc.inlet_width);
    capacity.in_b = Some(naacc.inlet_height);
    capacity.hw = Some(naacc.road_fill_height);
    capacity.slope = Some(naacc.slope_percent);
    capacity.length = Some(naacc.crossing_structure_length);
    capacity.out_shape = Some(coefficients::crosswalk_inlet_shape(&naacc.outlet_structure_type));
    capacity.out_a = Some(naacc.outlet_width);
    capacity.out_b = Some(naacc.outlet_height);
    capacity.xing_type = Some(naacc.crossing_type.clone());
    capacity
}

/// §4.1 stage 5: culvert-geometry tests. Mutates `point` in place,
/// recording validation errors and flipping `include` for genuine
/// exclusions -- the slope=-1/missing case is explicitly *not* an
/// exclusion, only a note.
fn culvert_geometry_tests(point: &mut Point) {
    let xing_type_lower = point.capacity.xing_type.clone().unwrap_or_default().to_lowercase();
    if !OK_CROSSING_TYPES.contains(&xing_type_lower.as_str()) {
        let shape = point.capacity.in_shape.clone().unwrap_or_default();
        point.add_validation_error("xing_type", format!("Not a culvert or multi-culvert ({shape})"));
    }

    let fields: [(&str, Option<f64>); 4] = [
        ("in_a", point.capacity.in_a),
        ("in_b", point.capacity.in_b),
        ("hw", point.capacity.hw),
        ("length", point.capacity.length),
    ];

    let all_present = fields.iter().all(|(_, v)| v.is_some());
    if !all_present {
        for (name, v) in fields.iter() {
            if v.is_none() {
                point.add_validation_error(name, "cannot be None.");
            }
        }
    } else {
        let any_negative = fields.iter().any(|(_, v)| v.unwrap() < 0.0);
        if any_negative {
            for (name, v) in fields.iter() {
                if v.unwrap() < 0.0 {
                    point.add_validation_error(name, format!("must be a greater than zero ({})", v.unwrap()));
                }
            }
        }
    }
}

fn feet_to_meters(v: f64) -> f64 {
    v * FEET_TO_METERS
}

/// §4.1 stage 6: derive capacity parameters. Always converts geometry
/// fields to metres (even for an already-excluded row, for output
/// consistency); only computes the rest when the row is still included.
fn derive_capacity_parameters(point: &mut Point) {
    let cap = &mut point.capacity;

    for field in [&mut cap.length, &mut cap.in_a, &mut cap.in_b, &mut cap.hw, &mut cap.out_a, &mut cap.out_b] {
        if let Some(v) = *field {
            *field = Some(if v >= 0.0 { feet_to_meters(v) } else { v });
        }
    }

    if !point.include {
        return;
    }

    let slope = cap.slope.unwrap_or(-1.0);
    if slope == -1.0 {
        cap.comments.push("slope missing (-1), defaulting to 0.".to_string());
        cap.slope_rr = Some(0.0);
    } else {
        cap.slope_rr = Some(slope / 100.0);
    }

    let in_a = cap.in_a.unwrap_or(0.0);
    let in_b = cap.in_b.unwrap_or(0.0);
    let in_shape = cap.in_shape.clone().unwrap_or_default();

    let (area, depth) = match in_shape.as_str() {
        "Round" => (((in_a / 2.0).powi(2)) * PI, in_a),
        "Elliptical" | "Pipe Arch" => ((in_a / 2.0) * (in_b / 2.0) * PI, in_b),
        "Box" => (in_a * in_b, in_b),
        "Arch" => (((in_a / 2.0) * (in_b / 2.0) * PI) / 2.0, in_b),
        _ => (((in_a / 2.0).powi(2)) * PI, in_a),
    };
    cap.culvert_area_sqm = Some(area);
    cap.culvert_depth_m = Some(depth);

    let hw = cap.hw.unwrap_or(0.0);
    cap.head_over_invert = Some(hw + depth);

    let in_type = cap.in_type.clone().unwrap_or_default();
    cap.coefficient_slope = coefficients::slope_coefficient(&in_type);

    let culv_mat = cap.culv_mat.clone().unwrap_or_default();
    let lookup = coefficients::lookup_coefficients(&in_shape, &culv_mat, &in_type);
    cap.coefficient_c = lookup.c;
    cap.coefficient_y = lookup.y;
    if let Some(note) = lookup.note {
        cap.comments.push(note.to_string());
    }

    cap.calculate();
}

/// Build one `Point` from a raw NAACC row. Every row produces exactly one
/// `Point`, even with a blank/missing identity field (recorded as a
/// validation error rather than dropped). `include` starts `true` and is
/// flipped the moment any validation error is recorded (I4).
fn build_point(row: &HashMap<String, String>, wkid: i32) -> Point {
    let (naacc, schema_errors) = parse_naacc_culvert(row, wkid);

    let mut point = Point::new(naacc.naacc_id.clone(), naacc.survey_id.clone(), naacc.clone());
    point.capacity = xwalk_naacc_to_capacity(&naacc);

    for (field, message) in schema_errors {
        point.add_validation_error(&field, message);
    }

    culvert_geometry_tests(&mut point);
    derive_capacity_parameters(&mut point);

    point
}

/// §4.1: full ingest of a NAACC CSV file into validated `Point`s. Every
/// row, without exception, becomes exactly one `Point` -- included or
/// not -- so `points.len() == rows.len()` always holds.
pub fn ingest_naacc_csv(path: impl AsRef<Path>, wkid: i32) -> WorkflowResult<Vec<Point>> {
    let path = path.as_ref();
    info!("reading NAACC table from {}", path.display());
    let rows = read_naacc_csv(path)?;
    debug!("{} raw rows read", rows.len());

    let points: Vec<Point> = rows.iter().map(|row| build_point(row, wkid)).collect();

    let excluded = points.iter().filter(|p| !p.include).count();
    if excluded > 0 {
        warn!("{excluded} of {} rows failed validation and will be skipped downstream", points.len());
    } else {
        info!("all {} rows passed validation", points.len());
    }

    Ok(points)
}

/// Partition points into the valid/invalid pair used for the
/// `_naacc_valid.csv` / `_naacc_invalid.csv` export (§4.1 outputs).
pub fn split_valid_invalid(points: &[Point]) -> (Vec<&Point>, Vec<&Point>) {
    points.iter().partition(|p| p.include)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn valid_row() -> HashMap<String, String> {
        row(&[
            ("Naacc_Culvert_Id", "1"),
            ("Survey_Id", "75158"),
            ("GIS_Latitude", "43.0"),
            ("GIS_Longitude", "-72.0"),
            ("Number_Of_Culverts", "1"),
            ("Material", "Concrete"),
            ("Inlet_Type", "Headwall"),
            ("Inlet_Structure_Type", "Round Culvert"),
            ("Inlet_Width", "3.0"),
            ("Inlet_Height", "3.0"),
            ("Road_Fill_Height", "5.0"),
            ("Slope_Percent", "1.0"),
            ("Crossing_Structure_Length", "40.0"),
            ("Outlet_Structure_Type", "Round Culvert"),
            ("Outlet_Width", "3.0"),
            ("Outlet_Height", "3.0"),
            ("Crossing_Type", "Culvert"),
        ])
    }

    #[test]
    fn valid_row_produces_included_point_with_capacity() {
        let point = build_point(&valid_row(), 4326);
        assert!(point.include);
        assert!(point.capacity.culvert_capacity.is_some());
        assert_eq!(point.capacity.in_shape.as_deref(), Some("Round"));
    }

    #[test]
    fn bad_crossing_type_is_excluded_but_retained() {
        let mut r = valid_row();
        r.insert("Crossing_Type".to_string(), "Bridge".to_string());
        let point = build_point(&r, 4326);
        assert!(!point.include);
        assert!(point.validation_errors.contains_key("xing_type"));
    }

    #[test]
    fn negative_geometry_is_excluded_and_recorded() {
        let mut r = valid_row();
        r.insert("Inlet_Width".to_string(), "-3.0".to_string());
        let point = build_point(&r, 4326);
        assert!(!point.include);
        assert!(point.validation_errors.contains_key("in_a"));
    }

    #[test]
    fn missing_slope_defaults_to_zero_without_exclusion() {
        let mut r = valid_row();
        r.insert("Slope_Percent".to_string(), "-1".to_string());
        let point = build_point(&r, 4326);
        assert!(point.include);
        assert_eq!(point.capacity.slope_rr, Some(0.0));
        assert!(point.capacity.comments.iter().any(|c| c.contains("slope missing")));
    }

    #[test]
    fn row_missing_identity_is_retained_with_error_not_dropped() {
        let mut r = valid_row();
        r.remove("Naacc_Culvert_Id");
        let point = build_point(&r, 4326);
        assert!(!point.include);
        assert!(point.validation_errors.contains_key("Naacc_Culvert_Id"));
        assert_eq!(point.naacc.naacc_id, "");
    }

    #[test]
    fn missing_number_of_culverts_is_recorded_not_silently_defaulted() {
        let mut r = valid_row();
        r.remove("Number_Of_Culverts");
        let point = build_point(&r, 4326);
        assert!(!point.include);
        assert!(point.validation_errors.contains_key("Number_Of_Culverts"));
    }

    #[test]
    fn split_valid_invalid_partitions_by_include() {
        let mut bad = valid_row();
        bad.insert("Naacc_Culvert_Id".to_string(), "2".to_string());
        bad.insert("Crossing_Type".to_string(), "Bridge".to_string());
        let points = vec![build_point(&valid_row(), 4326), build_point(&bad, 4326)];
        let (valid, invalid) = split_valid_invalid(&points);
        assert_eq!(valid.len(), 1);
        assert_eq!(invalid.len(), 1);
    }

    #[test]
    fn ingest_produces_one_point_per_row_even_with_blank_identity() {
        use std::io::Write;
        let dir = std::env::temp_dir();
        let path = dir.join("drainit_pipeline_test_blank_identity.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(
            f,
            "Naacc_Culvert_Id,Survey_Id,GIS_Latitude,GIS_Longitude,Number_Of_Culverts,Material,Inlet_Type,Inlet_Structure_Type,Inlet_Width,Inlet_Height,Road_Fill_Height,Slope_Percent,Crossing_Structure_Length,Outlet_Structure_Type,Outlet_Width,Outlet_Height,Crossing_Type"
        )
        .unwrap();
        writeln!(f, "1,75158,43.0,-72.0,1,Concrete,Headwall,Round Culvert,3.0,3.0,5.0,1.0,40.0,Round Culvert,3.0,3.0,Culvert").unwrap();
        writeln!(f, ",,43.0,-72.0,1,Concrete,Headwall,Round Culvert,3.0,3.0,5.0,1.0,40.0,Round Culvert,3.0,3.0,Culvert").unwrap();

        let points = ingest_naacc_csv(&path, 4326).unwrap();
        assert_eq!(points.len(), 2);
        assert!(points[0].include);
        assert!(!points[1].include);
        assert!(points[1].validation_errors.contains_key("Naacc_Culvert_Id"));
        assert!(points[1].validation_errors.contains_key("Survey_Id"));

        std::fs::remove_file(&path).ok();
    }
}
