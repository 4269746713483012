//! Sheet-layout driver: turns a set of parts into packed placements.
//!
//! The driver owns the packer pre-condition: it sorts blocks by descending
//! max dimension before fitting, and converts the resulting placements into
//! per-part transforms for the rendering layer.

use anyhow::{Context, Result};
use itertools::Itertools;
use log::info;
use ordered_float::OrderedFloat;

use crate::entities::Part;
use crate::geometry::primitives::Vector;
use crate::geometry::Boundary;
use crate::layout::packer::{GrowingPacker, LayoutBlock};
use crate::util::DraftConfig;

/// Placement of one part on the sheet, as a transform descriptor for the
/// renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartPlacement {
    /// Index of the part in the input slice.
    pub part: usize,
    /// Untransformed boundary of the part.
    pub boundary: Boundary,
    /// Translation to apply (after the optional rotation).
    pub shift: Vector,
    /// Whether to rotate the part 90° clockwise around `anchor` first.
    pub rotated: bool,
    /// Rotation anchor: the part boundary's top-left corner.
    pub anchor: Vector,
}

/// A packed sheet: final dimensions plus one placement per packed part.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub width: f64,
    pub height: f64,
    pub placements: Vec<PartPlacement>,
}

/// Packs all parts with a rendered boundary onto a single growing sheet.
///
/// Parts without rendered paths are skipped. Fails if any part's boundary
/// cannot be computed (dangling point references).
pub fn pack_parts(parts: &[Part], config: &DraftConfig) -> Result<Sheet> {
    let margin = config.part_margin;

    let mut boundaries: Vec<(usize, Boundary)> = vec![];
    for (index, part) in parts.iter().enumerate() {
        let boundary = part
            .boundary()
            .with_context(|| format!("cannot lay out part '{}'", part.name))?;
        if let Some(boundary) = boundary {
            boundaries.push((index, boundary));
        }
    }

    // largest piece first: the packer bootstraps its sheet from block 0
    let mut blocks = boundaries
        .iter()
        .map(|(index, boundary)| {
            LayoutBlock::new(
                *index,
                boundary.width() + 2.0 * margin,
                boundary.height() + 2.0 * margin,
            )
        })
        .sorted_by_key(|block| std::cmp::Reverse(OrderedFloat(block.max_size())))
        .collect_vec();

    let mut packer = GrowingPacker::new(config.sheet_ratio);
    packer.fit(&mut blocks);
    let (width, height) = packer.sheet_size();

    let mut placements = vec![];
    for block in &blocks {
        let placement = block.fit.expect("fit assigns a placement to every block");
        let (_, boundary) = boundaries
            .iter()
            .find(|(index, _)| *index == block.id)
            .expect("block ids come from the boundary list");

        let anchor = boundary.top_left;
        let target = Vector(placement.x + margin, placement.y + margin);
        // a 90° clockwise rotation around the top-left corner moves the
        // boundary to [x - h, x] × [y, y + w]; shift from there
        let shift = match placement.rotated {
            false => target - anchor,
            true => target - (anchor - Vector(boundary.height(), 0.0)),
        };

        placements.push(PartPlacement {
            part: block.id,
            boundary: *boundary,
            shift,
            rotated: placement.rotated,
            anchor,
        });
    }
    placements.sort_by_key(|p| p.part);

    info!(
        "packed {} parts onto a {:.1} x {:.1} sheet",
        placements.len(),
        width,
        height
    );
    Ok(Sheet {
        width,
        height,
        placements,
    })
}

impl PartPlacement {
    /// Boundary of the part after rotation and shift, in sheet coordinates.
    pub fn placed_boundary(&self) -> Boundary {
        let b = match self.rotated {
            false => self.boundary,
            true => {
                // 90° clockwise around the anchor (the boundary's top-left)
                let Vector(ax, ay) = self.anchor;
                Boundary::from_diagonal_corners(
                    Vector(ax - self.boundary.height(), ay),
                    Vector(ax, ay + self.boundary.width()),
                )
            }
        };
        Boundary::from_diagonal_corners(b.top_left + self.shift, b.bottom_right + self.shift)
    }
}

#[cfg(test)]
mod tests {
    use super::pack_parts;
    use crate::entities::Part;
    use crate::path::Path;
    use crate::util::DraftConfig;

    fn rectangle_part(name: &str, w: f64, h: f64) -> Part {
        let mut part = Part::new(name);
        let a = part.add_point(0.0, 0.0, "").unwrap();
        let b = part.add_point(w, 0.0, "").unwrap();
        let c = part.add_point(w, h, "").unwrap();
        let d = part.add_point(0.0, h, "").unwrap();
        let mut path = Path::new("outline");
        path.move_to(a).line_to(b).line_to(c).line_to(d).close();
        part.add_path(path);
        part
    }

    #[test]
    fn placements_stay_inside_the_sheet() {
        let parts = vec![
            rectangle_part("back", 120.0, 80.0),
            rectangle_part("front", 100.0, 90.0),
            rectangle_part("sleeve", 60.0, 40.0),
        ];
        let config = DraftConfig::default();
        let sheet = pack_parts(&parts, &config).unwrap();

        assert_eq!(sheet.placements.len(), 3);
        for placement in &sheet.placements {
            let placed = placement.placed_boundary();
            assert!(placed.top_left.0 >= 0.0 && placed.top_left.1 >= 0.0);
            assert!(placed.bottom_right.0 <= sheet.width + 1e-9);
            assert!(placed.bottom_right.1 <= sheet.height + 1e-9);
        }
    }

    #[test]
    fn parts_keep_their_margins() {
        let parts = vec![
            rectangle_part("a", 100.0, 100.0),
            rectangle_part("b", 100.0, 100.0),
        ];
        let config = DraftConfig {
            part_margin: 7.0,
            ..DraftConfig::default()
        };
        let sheet = pack_parts(&parts, &config).unwrap();

        let placed: Vec<_> = sheet
            .placements
            .iter()
            .map(|p| p.placed_boundary())
            .collect();
        // boundaries of distinct parts never touch: the margin separates them
        let dx = (placed[0].top_left.0 - placed[1].top_left.0).abs();
        let dy = (placed[0].top_left.1 - placed[1].top_left.1).abs();
        assert!(dx >= 100.0 + 2.0 * 7.0 - 1e-9 || dy >= 100.0 + 2.0 * 7.0 - 1e-9);
    }

    #[test]
    fn empty_parts_are_skipped() {
        let parts = vec![Part::new("unplottable"), rectangle_part("real", 50.0, 50.0)];
        let sheet = pack_parts(&parts, &DraftConfig::default()).unwrap();
        assert_eq!(sheet.placements.len(), 1);
        assert_eq!(sheet.placements[0].part, 1);
    }
}
