//! Typed data model (C3): `NaaccCulvert`, `Capacity`, `Rainfall`, `Shed`,
//! `Analytics`, `Point`, `WorkflowConfig`, `RainfallRasterConfig`.
//!
//! Field sets are grounded on the original `drainit` Python dataclasses;
//! serde shape (derive, `#[serde(rename = "...")]` for camelCase,
//! `skip_serializing_if = "Option::is_none"` on optional fields) follows
//! the teacher crate's `project`/`node`/`conduit` convention.

pub mod analytics;
pub mod capacity;
pub mod config;
pub mod naacc;
pub mod point;
pub mod rainfall;
pub mod shed;

pub use analytics::{Analytics, OverflowResult, PeakFlowResult};
pub use capacity::Capacity;
pub use config::{RainRatioMethod, WorkflowConfig};
pub use naacc::NaaccCulvert;
pub use point::Point;
pub use rainfall::{Rainfall, RainfallRaster, RainfallRasterConfig};
pub use shed::Shed;
