//! NAACC ETL pipeline (C4): reads raw survey CSVs, validates against the
//! NAACC schema, cross-walks categorical fields, runs the culvert-
//! geometry tests, derives capacity parameters, and computes capacity.
//! See [`pipeline::ingest_naacc_csv`] for the entry point.

pub mod pipeline;
pub mod reader;

pub use pipeline::{ingest_naacc_csv, split_valid_invalid};
pub use reader::read_naacc_csv;
