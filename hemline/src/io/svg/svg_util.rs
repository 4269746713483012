use serde::{Deserialize, Serialize};

/// Styling options for [`sheet_to_svg`](crate::io::svg::sheet_to_svg).
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    /// Multiplier on the base stroke width (0.1% of the sheet's smaller side)
    #[serde(default = "default_stroke_width_multiplier")]
    pub stroke_width_multiplier: f64,
    /// Fill color of the sheet background
    #[serde(default = "default_sheet_fill")]
    pub sheet_fill: String,
    /// Fill color of the parts
    #[serde(default = "default_part_fill")]
    pub part_fill: String,
    /// Draw the name of each part next to its anchor
    #[serde(default = "default_true")]
    pub labels: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        SvgDrawOptions {
            stroke_width_multiplier: default_stroke_width_multiplier(),
            sheet_fill: default_sheet_fill(),
            part_fill: default_part_fill(),
            labels: default_true(),
        }
    }
}

fn default_stroke_width_multiplier() -> f64 {
    2.0
}

fn default_sheet_fill() -> String {
    "#FFFFFF".into()
}

fn default_part_fill() -> String {
    "#F2E8D5".into()
}

fn default_true() -> bool {
    true
}
