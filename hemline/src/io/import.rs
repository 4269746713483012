use std::collections::HashMap;

use anyhow::{Context, Result, bail};

use crate::entities::{Part, PointId};
use crate::io::ext_repr::{ExtDraft, ExtPart, ExtPath, ExtSegment};
use crate::path::Path;
use crate::util::DraftConfig;

/// Converts external representations of parts into internal ones.
///
/// Seam allowances requested by a path are generated at import time, so the
/// imported [`Part`] is geometrically complete and ready for layout.
#[derive(Clone, Debug, Copy)]
pub struct Importer {
    pub config: DraftConfig,
}

impl Importer {
    pub fn new(config: DraftConfig) -> Importer {
        Importer { config }
    }

    /// Imports all parts of a draft, in order.
    pub fn import_draft(&self, ext_draft: &ExtDraft) -> Result<Vec<Part>> {
        ext_draft
            .parts
            .iter()
            .map(|ext_part| {
                self.import_part(ext_part)
                    .with_context(|| format!("importing part '{}'", ext_part.name))
            })
            .collect()
    }

    /// Imports a single part: the point table first, then the paths drawn
    /// through it, then the seam allowances those paths request.
    pub fn import_part(&self, ext_part: &ExtPart) -> Result<Part> {
        let mut part = Part::new(ext_part.name.as_str());

        let mut ids: HashMap<&str, PointId> = HashMap::new();
        for ext_point in &ext_part.points {
            if ids.contains_key(ext_point.id.as_str()) {
                bail!("duplicate point id '{}'", ext_point.id);
            }
            let id = part.add_point(ext_point.x, ext_point.y, &ext_point.description)?;
            ids.insert(&ext_point.id, id);
        }

        for ext_path in &ext_part.paths {
            let path = import_path(ext_path, &ids)?;
            let allowance = ext_path
                .seam_allowance
                .or_else(|| ext_path.seam.then_some(self.config.seam_allowance));

            let seam_path = match allowance {
                None => None,
                Some(distance) => {
                    // outward on a clockwise outline (y grows downward)
                    let mut seam = path
                        .offset(-distance, path.is_closed(), &mut part.points)
                        .with_context(|| format!("seam allowance of path '{}'", path.name))?;
                    seam.name = format!("{} (seam allowance)", path.name);
                    seam.sample = false;
                    seam.attr("class", "seam-allowance")
                        .attr("fill", "none")
                        .attr("stroke-dasharray", "4 2");
                    Some(seam)
                }
            };

            part.add_path(path);
            if let Some(seam_path) = seam_path {
                part.add_path(seam_path);
            }
        }
        Ok(part)
    }
}

fn import_path(ext_path: &ExtPath, ids: &HashMap<&str, PointId>) -> Result<Path> {
    let resolve = |id: &str| -> Result<PointId> {
        match ids.get(id) {
            Some(point_id) => Ok(*point_id),
            None => bail!("path '{}' references unknown point '{}'", ext_path.name, id),
        }
    };

    let mut path = Path::new(ext_path.name.as_str());
    path.render = ext_path.render;
    path.attributes = ext_path.attributes.clone();

    for segment in &ext_path.segments {
        match segment {
            ExtSegment::MoveTo { point } => path.move_to(resolve(point)?),
            ExtSegment::LineTo { point } => path.line_to(resolve(point)?),
            ExtSegment::CurveTo { cp1, cp2, end } => {
                path.curve_to(resolve(cp1)?, resolve(cp2)?, resolve(end)?)
            }
            ExtSegment::Close => path.close(),
        };
    }
    Ok(path)
}
