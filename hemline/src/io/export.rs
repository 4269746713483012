use crate::entities::Part;
use crate::io::ext_repr::{ExtPlacement, ExtSheet};
use crate::layout::Sheet;

/// Converts a packed sheet into its external representation. Placements
/// refer to parts by name.
pub fn export_sheet(parts: &[Part], sheet: &Sheet) -> ExtSheet {
    ExtSheet {
        width: sheet.width,
        height: sheet.height,
        placements: sheet
            .placements
            .iter()
            .map(|p| ExtPlacement {
                part: parts[p.part].name.clone(),
                translation: (p.shift.0, p.shift.1),
                rotated: p.rotated,
                anchor: (p.anchor.0, p.anchor.1),
            })
            .collect(),
    }
}
