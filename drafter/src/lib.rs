//! Reference CLI around the `hemline` library: reads a pre-drafted JSON
//! parts instance, generates seam allowances, packs all parts onto a sheet
//! and writes the resulting layout as JSON and SVG.

pub mod config;
pub mod io;
