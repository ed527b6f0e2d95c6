//! Pure numerical core (C2): TR-55 time of concentration, runoff/peak-flow,
//! FHWA inlet-control capacity, and overflow/max-return-period. Every
//! function here is a dependency-free `f64` computation -- no I/O, no
//! blocking, matching the teacher crate's `hydraulics`/`gutter` style of
//! keeping the hydraulic math separate from data-model plumbing.

pub mod capacity;
pub mod overflow;
pub mod peak_flow;
pub mod time_of_concentration;

pub use capacity::culvert_capacity;
pub use overflow::{culvert_overflow, max_return_period};
pub use peak_flow::{peak_flow, PeakFlowOutcome, RainRatioMethod};
pub use time_of_concentration::time_of_concentration_hr;
