use serde::{Deserialize, Serialize};

/// External representation of a draft: a named set of pattern pieces,
/// pre-drafted and ready for seam allowances and layout.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtDraft {
    /// Name of the draft (garment, size, ...)
    pub name: String,
    pub parts: Vec<ExtPart>,
}

/// External representation of a [`Part`](crate::entities::Part).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPart {
    /// Unique name of the part within the draft
    pub name: String,
    pub points: Vec<ExtPoint>,
    pub paths: Vec<ExtPath>,
}

/// External representation of a [`Point`](crate::geometry::primitives::Point).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPoint {
    /// Identifier the part's paths refer to. Unique within the part.
    pub id: String,
    pub x: f64,
    pub y: f64,
    /// Human-readable label ("shoulder notch", ...)
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub description: String,
}

/// External representation of a [`Path`](crate::path::Path).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPath {
    pub name: String,
    pub segments: Vec<ExtSegment>,
    /// Whether the path is drawn in output
    #[serde(default = "default_true")]
    pub render: bool,
    /// Generate a seam allowance for this path at the configured default
    /// distance
    #[serde(default)]
    pub seam: bool,
    /// Seam allowance distance override (in mm). Implies `seam`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub seam_allowance: Option<f64>,
    /// Free-form style attributes (key, value), passed through to rendering
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attributes: Vec<(String, String)>,
}

fn default_true() -> bool {
    true
}

/// One drawing operation, referencing points of the owning part by id.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ExtSegment {
    MoveTo {
        point: String,
    },
    LineTo {
        point: String,
    },
    CurveTo {
        cp1: String,
        cp2: String,
        end: String,
    },
    Close,
}

/// External representation of a packed [`Sheet`](crate::layout::Sheet).
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtSheet {
    pub width: f64,
    pub height: f64,
    pub placements: Vec<ExtPlacement>,
}

/// Where one part ended up on the sheet: an optional 90° clockwise rotation
/// around `anchor`, followed by a translation.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ExtPlacement {
    /// Name of the placed part
    pub part: String,
    /// The translation vector (x, y)
    pub translation: (f64, f64),
    pub rotated: bool,
    /// Rotation anchor (x, y); only meaningful when `rotated`
    pub anchor: (f64, f64),
}
