//! Static FHWA coefficient tables and unit conversions (C1).
//!
//! Coefficients `c`, `y` and the slope coefficient `k_s` come from FHWA
//! engineering publication HIF12026, Appendix A, keyed by culvert shape,
//! material, and inlet edge treatment. Encoded as a single match-based
//! lookup table rather than a nested decision tree, per the cross-walk
//! enumerated in the NAACC ingest spec.

/// Feet-to-metres conversion factor applied to all NAACC linear measurements.
pub const FEET_TO_METERS: f64 = 0.3048;

/// SI conversion factor in the FHWA inlet-control capacity equation.
pub const CAPACITY_SI_CONV_FACTOR: f64 = 1.811;

/// `k_s` (slope coefficient) when the inlet is mitered to the fill slope.
pub const K_S_MITERED: f64 = 0.7;
/// `k_s` (slope coefficient) for every other inlet edge treatment.
pub const K_S_DEFAULT: f64 = -0.5;

/// Default (c, y) pair used when no (shape, material, inlet-type) branch
/// matches -- no validation error is raised for this fallback.
pub const DEFAULT_C: f64 = 0.04;
pub const DEFAULT_Y: f64 = 0.7;

/// Crosswalk `Inlet_Structure_Type` (raw NAACC value) to the short `in_shape`
/// code used throughout the rest of the pipeline.
pub fn crosswalk_inlet_shape(raw: &str) -> String {
    match raw {
        "Round Culvert" => "Round".to_string(),
        "Pipe Arch/Elliptical Culvert" => "Elliptical".to_string(),
        "Box Culvert" => "Box".to_string(),
        "Box/Bridge with Abutments" => "Box".to_string(),
        "Bridge with Abutments and Side Slopes" => "Box".to_string(),
        "Open Bottom Arch Bridge/Culvert" => "Arch".to_string(),
        other => other.to_string(),
    }
}

/// Crosswalk `Inlet_Type` (raw NAACC value) to the short `in_type` code.
pub fn crosswalk_inlet_type(raw: &str) -> String {
    match raw {
        "Headwall and Wingwalls" => "Wingwall and Headwall".to_string(),
        "Wingwalls" => "Wingwall".to_string(),
        "None" => "Projecting".to_string(),
        other => other.to_string(),
    }
}

/// Result of a coefficient-table lookup: the (c, y) pair plus an optional
/// note recorded when the branch taken is a documented filler/default
/// rather than a value sourced directly from HIF12026.
pub struct CoefficientLookup {
    pub c: f64,
    pub y: f64,
    pub note: Option<&'static str>,
}

/// Look up (c, y) by (in_shape, culv_mat, in_type). Falls back to
/// `(DEFAULT_C, DEFAULT_Y)` with no note for any combination not named
/// in the FHWA decision table -- this is not an error.
pub fn lookup_coefficients(in_shape: &str, culv_mat: &str, in_type: &str) -> CoefficientLookup {
    let concrete_or_stone = matches!(culv_mat, "Concrete" | "Stone");
    let plastic_or_metal = matches!(culv_mat, "Plastic" | "Metal");

    let (c, y, note) = match in_shape {
        "Arch" if concrete_or_stone => match in_type {
            "Headwall" | "Projecting" => (0.041, 0.570, None),
            "Mitered to Slope" => (0.040, 0.48, None),
            "Wingwall" | "Wingwall and Headwall" => (0.040, 0.620, None),
            _ => (DEFAULT_C, DEFAULT_Y, None),
        },
        "Arch" if plastic_or_metal => match in_type {
            "Mitered to Slope" => (0.0540, 0.5, None),
            "Projecting" => (0.065, 0.12, None),
            "Headwall" | "Wingwall" | "Wingwall and Headwall" => (0.0431, 0.610, None),
            _ => (DEFAULT_C, DEFAULT_Y, None),
        },
        "Arch" if culv_mat == "Combination" => (0.045, 0.5, Some("default c & y")),

        "Box" if concrete_or_stone => (0.0378, 0.870, None),
        "Box" if plastic_or_metal => match in_type {
            "Headwall" => (0.0379, 0.690, None),
            "Wingwall" => (0.040, 0.620, Some("default c & y")),
            _ => (0.04, 0.65, Some("default c & y")),
        },
        "Box" if culv_mat == "Wood" => (0.038, 0.87, None),
        "Box" if culv_mat == "Combination" => (0.038, 0.7, Some("default c & y")),

        "Elliptical" | "Pipe Arch" if concrete_or_stone => (0.048, 0.80, None),
        "Elliptical" | "Pipe Arch" if plastic_or_metal => match in_type {
            "Projecting" => (0.060, 0.75, None),
            _ => (0.048, 0.80, None),
        },
        "Elliptical" | "Pipe Arch" if culv_mat == "Combination" => (0.05, 0.8, Some("default c & y")),

        "Round" if concrete_or_stone => match in_type {
            "Projecting" => (0.032, 0.69, None),
            _ => (0.029, 0.74, None),
        },
        "Round" if plastic_or_metal => match in_type {
            "Projecting" => (0.055, 0.54, None),
            "Mitered to Slope" => (0.046, 0.75, None),
            _ => (0.038, 0.69, None),
        },
        "Round" if culv_mat == "Combination" => (0.04, 0.65, Some("default c & y")),

        _ => (DEFAULT_C, DEFAULT_Y, None),
    };

    CoefficientLookup { c, y, note }
}

/// `k_s`, the slope coefficient, keyed only on inlet edge treatment.
pub fn slope_coefficient(in_type: &str) -> f64 {
    if in_type == "Mitered to Slope" {
        K_S_MITERED
    } else {
        K_S_DEFAULT
    }
}
