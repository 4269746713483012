use anyhow::{Context, Result};
use slotmap::SlotMap;

use crate::geometry::primitives::Point;
use crate::geometry::Boundary;
use crate::path::Path;

slotmap::new_key_type! {
    /// Unique key of a [`Point`] within a part's point table.
    pub struct PointId;
}

/// Point table of a single part. Paths reference points by [`PointId`]
/// and never own them.
pub type PointTable = SlotMap<PointId, Point>;

/// A named pattern piece: a point table plus the paths drawn through it.
///
/// Drafting layers (external to this crate) fill a part with points and
/// paths; the geometry engine computes boundaries and seam allowances from
/// it and the layout engine places it on the sheet.
#[derive(Debug, Clone, Default)]
pub struct Part {
    pub name: String,
    pub points: PointTable,
    pub paths: Vec<Path>,
}

impl Part {
    pub fn new(name: impl Into<String>) -> Self {
        Part {
            name: name.into(),
            points: PointTable::default(),
            paths: vec![],
        }
    }

    /// Adds a point, rounding its coordinates. Fails on non-finite input.
    pub fn add_point(&mut self, x: f64, y: f64, description: &str) -> Result<PointId> {
        let point = Point::try_new(x, y, description)
            .with_context(|| format!("invalid point in part '{}'", self.name))?;
        Ok(self.points.insert(point))
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id)
    }

    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
    }

    /// Union of the boundaries of all rendered paths.
    /// `None` if the part has no rendered paths.
    pub fn boundary(&self) -> Result<Option<Boundary>> {
        let mut boundary: Option<Boundary> = None;
        for path in self.paths.iter().filter(|p| p.render) {
            let path_boundary = path
                .boundary(&self.points)
                .with_context(|| format!("boundary of path '{}' in part '{}'", path.name, self.name))?;
            boundary = Some(match boundary {
                Some(b) => Boundary::union(b, path_boundary),
                None => path_boundary,
            });
        }
        Ok(boundary)
    }
}

#[cfg(test)]
mod tests {
    use super::Part;
    use crate::path::Path;

    #[test]
    fn part_boundary_unions_rendered_paths() {
        let mut part = Part::new("front panel");
        let a = part.add_point(0.0, 0.0, "origin").unwrap();
        let b = part.add_point(50.0, 20.0, "").unwrap();
        let c = part.add_point(10.0, 90.0, "").unwrap();

        let mut first = Path::new("hem");
        first.move_to(a).line_to(b);
        part.add_path(first);

        let mut second = Path::new("side");
        second.move_to(a).line_to(c);
        part.add_path(second);

        let boundary = part.boundary().unwrap().unwrap();
        assert_eq!(boundary.width(), 50.0);
        assert_eq!(boundary.height(), 90.0);
    }

    #[test]
    fn hidden_paths_are_ignored_for_the_boundary() {
        let mut part = Part::new("p");
        let a = part.add_point(0.0, 0.0, "").unwrap();
        let b = part.add_point(10.0, 10.0, "").unwrap();
        let far = part.add_point(500.0, 500.0, "").unwrap();

        let mut visible = Path::new("outline");
        visible.move_to(a).line_to(b);
        part.add_path(visible);

        let mut helper = Path::new("construction");
        helper.move_to(a).line_to(far);
        helper.render = false;
        part.add_path(helper);

        let boundary = part.boundary().unwrap().unwrap();
        assert_eq!(boundary.max_size(), 10.0);
    }
}
