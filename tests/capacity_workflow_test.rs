//! End-to-end integration tests against the stub geoprocessing backend
//! (§6.2), exercising the full C4 -> C6 -> C7 pipeline per the concrete
//! scenarios documented in §8 ("Testable properties").

use std::io::Write;

use drainit::geoprocessing::stub::StubBackend;
use drainit::geoprocessing::DelineationResult;
use drainit::model::config::WorkflowConfig;
use drainit::naacc::{ingest_naacc_csv, split_valid_invalid};
use drainit::workflow::Workflow;

const NAACC_HEADER: &str = "Naacc_Culvert_Id,Survey_Id,GIS_Latitude,GIS_Longitude,Number_Of_Culverts,Material,Inlet_Type,Inlet_Structure_Type,Inlet_Width,Inlet_Height,Road_Fill_Height,Slope_Percent,Crossing_Structure_Length,Outlet_Structure_Type,Outlet_Width,Outlet_Height,Crossing_Type";

/// 8-row reference table: 5 clean rows, 3 rows each violating one of the
/// culvert-geometry / crossing-type checks (§4.1 stage 5).
fn eight_row_reference_csv() -> String {
    let mut rows = vec![NAACC_HEADER.to_string()];
    // Five valid rows, distinct ids/survey ids.
    for i in 1..=5 {
        rows.push(format!(
            "{i},{survey},43.0,-72.0,1,Concrete,Headwall,Round Culvert,3.0,3.0,5.0,1.0,40.0,Round Culvert,3.0,3.0,Culvert",
            i = i,
            survey = 1000 + i,
        ));
    }
    // Row 6: disallowed crossing type.
    rows.push(
        "6,1006,43.0,-72.0,1,Concrete,Headwall,Round Culvert,3.0,3.0,5.0,1.0,40.0,Round Culvert,3.0,3.0,Bridge"
            .to_string(),
    );
    // Row 7: negative inlet width.
    rows.push(
        "7,1007,43.0,-72.0,1,Concrete,Headwall,Round Culvert,-3.0,3.0,5.0,1.0,40.0,Round Culvert,3.0,3.0,Culvert"
            .to_string(),
    );
    // Row 8: non-finite head-water (missing crossing length -> NaN column, unparsable).
    rows.push(
        "8,1008,43.0,-72.0,1,Concrete,Headwall,Round Culvert,3.0,3.0,5.0,1.0,not_a_number,Round Culvert,3.0,3.0,Culvert"
            .to_string(),
    );
    rows.join("\n") + "\n"
}

#[test]
fn scenario_four_naacc_validation_yields_eight_points_three_invalid() {
    let dir = std::env::temp_dir();
    let path = dir.join("drainit_it_scenario4.csv");
    std::fs::write(&path, eight_row_reference_csv()).unwrap();

    let points = ingest_naacc_csv(&path, 4326).unwrap();
    assert_eq!(points.len(), 8);

    let (valid, invalid) = split_valid_invalid(&points);
    assert_eq!(valid.len(), 5);
    assert_eq!(invalid.len(), 3);
    for p in &invalid {
        assert!(!p.validation_errors.is_empty());
    }

    std::fs::remove_file(&path).ok();
}

fn two_barrel_crossing_csv() -> String {
    let mut f = String::new();
    f.push_str(NAACC_HEADER);
    f.push('\n');
    f.push_str("1,75158,43.0,-72.0,1,Concrete,Headwall,Round Culvert,3.0,3.0,5.0,1.0,40.0,Round Culvert,3.0,3.0,Culvert\n");
    f.push_str("2,75158,43.001,-72.001,1,Concrete,Headwall,Round Culvert,2.5,2.5,5.0,1.0,35.0,Round Culvert,2.5,2.5,Culvert\n");
    f
}

#[test]
fn scenario_five_multi_culvert_crossing_shares_capacity_and_overflow() {
    let dir = std::env::temp_dir();
    let input_path = dir.join("drainit_it_scenario5_in.csv");
    let output_path = dir.join("drainit_it_scenario5_out.csv");
    std::fs::write(&input_path, two_barrel_crossing_csv()).unwrap();

    let mut config = WorkflowConfig::default();
    config.points_filepath = Some(input_path.to_string_lossy().into_owned());
    config.raster_flowdir_filepath = Some("fd.tif".into());
    config.output_points_filepath = Some(output_path.to_string_lossy().into_owned());

    let rainfall: Vec<(i32, f64, String)> = config
        .frequencies
        .iter()
        .map(|&freq| (freq, 50000.0 + (freq as f64 * 10.0), "inches/1000".to_string()))
        .collect();

    // Point "1" gets the larger shed -- it becomes the crossing's
    // reference point (§4.4 "select a reference point").
    let result_1 = DelineationResult {
        area_sqkm: 3.0,
        avg_slope_pct: 4.0,
        avg_cn: 68.0,
        max_fl_m: 500.0,
        avg_rainfall: rainfall.clone(),
        filepath_raster: None,
        filepath_vector: None,
    };
    let result_2 = DelineationResult {
        area_sqkm: 1.0,
        avg_slope_pct: 3.0,
        avg_cn: 66.0,
        max_fl_m: 300.0,
        avg_rainfall: rainfall,
        filepath_raster: None,
        filepath_vector: None,
    };

    let backend = StubBackend::new().with_point_result("1", result_1).with_point_result("2", result_2);

    let workflow = Workflow::new(config);
    let outcome = workflow.run(&backend).unwrap();

    assert_eq!(outcome.points.len(), 2);
    let p1 = outcome.points.iter().find(|p| p.uid == "1").unwrap();
    let p2 = outcome.points.iter().find(|p| p.uid == "2").unwrap();

    let c1 = p1.capacity.culvert_capacity.expect("barrel 1 capacity computed");
    let c2 = p2.capacity.culvert_capacity.expect("barrel 2 capacity computed");
    let expected_sum = c1 + c2;
    assert!((p1.capacity.crossing_capacity.unwrap() - expected_sum).abs() < 1e-9);
    assert!((p2.capacity.crossing_capacity.unwrap() - expected_sum).abs() < 1e-9);

    assert_eq!(p1.analytics.len(), p2.analytics.len());
    for (a1, a2) in p1.analytics.iter().zip(p2.analytics.iter()) {
        assert_eq!(a1.frequency, a2.frequency);
        let of1 = a1.overflow.and_then(|o| o.crossing_overflow_m3s);
        let of2 = a2.overflow.and_then(|o| o.crossing_overflow_m3s);
        assert_eq!(of1, of2, "crossing overflow must match at frequency {}", a1.frequency);
    }

    // I1/I3: analytics strictly ascending by frequency for each point.
    for point in &outcome.points {
        for pair in point.analytics.windows(2) {
            assert!(pair[0].frequency < pair[1].frequency);
        }
    }

    assert!(output_path.exists());
    std::fs::remove_file(&input_path).ok();
    std::fs::remove_file(&output_path).ok();
}

#[test]
fn missing_slope_sentinel_round_trips_through_full_ingest() {
    let dir = std::env::temp_dir();
    let path = dir.join("drainit_it_slope_sentinel.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "{NAACC_HEADER}").unwrap();
    writeln!(
        f,
        "1,9001,43.0,-72.0,1,Concrete,Headwall,Round Culvert,3.0,3.0,5.0,-1,40.0,Round Culvert,3.0,3.0,Culvert"
    )
    .unwrap();
    drop(f);

    let points = ingest_naacc_csv(&path, 4326).unwrap();
    assert_eq!(points.len(), 1);
    assert!(points[0].include);
    assert_eq!(points[0].capacity.slope_rr, Some(0.0));
    assert!(points[0].capacity.comments.iter().any(|c| c.contains("slope missing")));

    std::fs::remove_file(&path).ok();
}
