//! # drainit
//!
//! Culvert hydraulic capacity and peak storm-runoff analysis for
//! road-stream crossings, built on NAACC survey data, TR-55 hydrology,
//! and the FHWA inlet-control capacity equation.
//!
//! ## Overview
//!
//! - [`coefficients`] - FHWA shape/material/inlet-type coefficient tables and unit conversions
//! - [`calculators`] - pure numerical core: time of concentration, culvert capacity, peak flow, overflow
//! - [`cancellation`] - cooperative cancellation signal for long-running delineation runs
//! - [`model`] - the typed data model: `NaaccCulvert`, `Capacity`, `Shed`, `Analytics`, `Point`, `WorkflowConfig`
//! - [`naacc`] - the NAACC CSV ingest pipeline
//! - [`geoprocessing`] - the geoprocessing backend trait and in-memory stub
//! - [`delineation`] - per-point watershed delineation and zonal statistics
//! - [`crossing`] - analytics driver and multi-culvert crossing aggregation
//! - [`workflow`] - the workflow manager that composes the stages above
//! - [`io`] - enriched point output writing
//! - [`error`] - the workflow-level error model
//!
//! ## Example
//!
//! ```no_run
//! use drainit::model::config::WorkflowConfig;
//! use drainit::geoprocessing::stub::StubBackend;
//! use drainit::workflow::Workflow;
//!
//! let config = WorkflowConfig::load("workflow.json").unwrap();
//! let backend = StubBackend::new();
//! let outcome = Workflow::new(config).run(&backend).unwrap();
//! println!("analyzed {} points", outcome.points.len());
//! ```

pub mod calculators;
pub mod cancellation;
pub mod coefficients;
pub mod crossing;
pub mod delineation;
pub mod error;
pub mod geoprocessing;
pub mod io;
pub mod model;
pub mod naacc;
pub mod workflow;
