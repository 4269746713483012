//! `hemline` is a 2D path-geometry and sheet-layout engine for parametric
//! sewing patterns. Drafting layers produce named [`Point`]s and [`Path`]s
//! inside [`Part`]s; this crate computes exact curve boundaries, parallel
//! paths for seam allowances and a dense rectangular layout of all parts on
//! a virtual sheet.
//!
//! [`Point`]: crate::geometry::primitives::Point
//! [`Path`]: crate::path::Path
//! [`Part`]: crate::entities::Part

/// Pattern pieces and their point tables
pub mod entities;

/// Geometric primitives and base algorithms
pub mod geometry;

/// Importing part instances into and exporting sheet layouts out of this library
pub mod io;

/// Packing part boundaries onto a growing sheet
pub mod layout;

/// The path model and the offset engine
pub mod path;

/// Helper functions which do not belong to any specific module
pub mod util;
