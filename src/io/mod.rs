//! Input/output materialization (C9, §6.1). Reads point geodata in the
//! narrow sense this crate needs (the NAACC CSV doubles as the point
//! source, per C4) and writes the enriched point and watershed-polygon
//! outputs.

pub mod points_writer;

pub use points_writer::write_enriched_points_csv;
