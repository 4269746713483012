use serde::{Deserialize, Serialize};

///Configuration of the drafting and layout pipeline
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct DraftConfig {
    ///Seam allowance in base units (mm), applied as an outward path offset
    pub seam_allowance: f64,
    ///Empty margin kept around every part on the sheet
    pub part_margin: f64,
    ///Target height/width ratio of the sheet. Defaults to √2 (A-series paper)
    pub sheet_ratio: f64,
}

impl Default for DraftConfig {
    fn default() -> Self {
        DraftConfig {
            seam_allowance: 10.0,
            part_margin: 5.0,
            sheet_ratio: std::f64::consts::SQRT_2,
        }
    }
}
