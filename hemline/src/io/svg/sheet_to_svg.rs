use anyhow::{Result, anyhow};
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Group, Rectangle, Text, Title};

use crate::entities::{Part, PointTable};
use crate::io::svg::SvgDrawOptions;
use crate::layout::{PartPlacement, Sheet};
use crate::path::{Path, Segment};

/// Renders a packed sheet as an SVG document: a background rectangle plus
/// one transformed group per placed part.
pub fn sheet_to_svg(parts: &[Part], sheet: &Sheet, options: &SvgDrawOptions) -> Result<Document> {
    let stroke_width =
        f64::min(sheet.width, sheet.height) * 0.001 * options.stroke_width_multiplier;

    let sheet_group = Group::new().set("id", "sheet").add(
        Rectangle::new()
            .set("x", 0)
            .set("y", 0)
            .set("width", sheet.width)
            .set("height", sheet.height)
            .set("fill", options.sheet_fill.as_str())
            .set("stroke", "black")
            .set("stroke-width", 2.0 * stroke_width),
    );

    let mut parts_group = Group::new().set("id", "parts");
    for placement in &sheet.placements {
        let part = &parts[placement.part];
        parts_group = parts_group.add(part_to_group(part, placement, stroke_width, options)?);
    }

    // pad the viewbox so the sheet's edge stroke is not clipped
    let pad = 0.025 * f64::max(sheet.width, sheet.height);
    let vbox = (
        -pad,
        -pad,
        sheet.width + 2.0 * pad,
        sheet.height + 2.0 * pad,
    );

    Ok(Document::new()
        .set("viewBox", vbox)
        .add(sheet_group)
        .add(parts_group))
}

fn part_to_group(
    part: &Part,
    placement: &PartPlacement,
    stroke_width: f64,
    options: &SvgDrawOptions,
) -> Result<Group> {
    let mut group = Group::new()
        .set("id", format!("part_{}", placement.part))
        .set("transform", transform_to_svg(placement))
        .add(Title::new(part.name.clone()));

    for path in part.paths.iter().filter(|p| p.render) {
        let data = path_data(path, &part.points)?;
        let fill = match path.is_closed() {
            true => options.part_fill.as_str(),
            false => "none",
        };
        let mut element = svg::node::element::Path::new()
            .set("d", data)
            .set("fill", fill)
            .set("stroke", "black")
            .set("stroke-width", stroke_width)
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round");
        // style attributes are applied verbatim and may override the defaults
        for (key, value) in &path.attributes {
            element = element.set(key.as_str(), value.as_str());
        }
        group = group.add(element);
    }

    if options.labels {
        let anchor = placement.boundary.top_left;
        let font_size = 10.0 * stroke_width;
        group = group.add(
            Text::new(part.name.clone())
                .set("x", anchor.0 + font_size)
                .set("y", anchor.1 + 2.0 * font_size)
                .set("font-size", font_size)
                .set("font-family", "monospace"),
        );
    }
    Ok(group)
}

/// Converts a path into SVG path data, resolving its point references.
fn path_data(path: &Path, points: &PointTable) -> Result<Data> {
    let resolve = |id| {
        points
            .get(id)
            .map(|p| p.position())
            .ok_or_else(|| anyhow!("path '{}' references a missing point", path.name))
    };

    let mut data = Data::new();
    for segment in &path.segments {
        data = match *segment {
            Segment::MoveTo(p) => {
                let v = resolve(p)?;
                data.move_to((v.0, v.1))
            }
            Segment::LineTo(p) => {
                let v = resolve(p)?;
                data.line_to((v.0, v.1))
            }
            Segment::CurveTo { cp1, cp2, end } => {
                let (c1, c2, e) = (resolve(cp1)?, resolve(cp2)?, resolve(end)?);
                data.cubic_curve_to((c1.0, c1.1, c2.0, c2.1, e.0, e.1))
            }
            Segment::Close => data.close(),
        };
    }
    Ok(data)
}

fn transform_to_svg(placement: &PartPlacement) -> String {
    //https://developer.mozilla.org/en-US/docs/Web/SVG/Attribute/transform
    //operations are effectively applied from right to left
    let (tx, ty) = (placement.shift.0, placement.shift.1);
    match placement.rotated {
        false => format!("translate({tx} {ty})"),
        true => {
            let (ax, ay) = (placement.anchor.0, placement.anchor.1);
            format!("translate({tx} {ty}), rotate(90 {ax} {ay})")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::sheet_to_svg;
    use crate::entities::Part;
    use crate::io::svg::SvgDrawOptions;
    use crate::layout::pack_parts;
    use crate::path::Path;
    use crate::util::DraftConfig;

    fn curved_part(name: &str) -> Part {
        let mut part = Part::new(name);
        let a = part.add_point(0.0, 0.0, "").unwrap();
        let c1 = part.add_point(0.0, 60.0, "").unwrap();
        let c2 = part.add_point(80.0, 60.0, "").unwrap();
        let b = part.add_point(80.0, 0.0, "").unwrap();
        let mut path = Path::new("outline");
        path.move_to(a).curve_to(c1, c2, b).close();
        part.add_path(path);
        part
    }

    #[test]
    fn document_contains_a_group_per_part() {
        let parts = vec![curved_part("yoke"), curved_part("collar")];
        let sheet = pack_parts(&parts, &DraftConfig::default()).unwrap();
        let document = sheet_to_svg(&parts, &sheet, &SvgDrawOptions::default()).unwrap();

        let rendered = document.to_string();
        assert!(rendered.contains("viewBox"));
        assert!(rendered.contains("part_0"));
        assert!(rendered.contains("part_1"));
        assert!(rendered.contains("yoke"));
        // the cubic segment survives as a curve command
        assert!(rendered.contains('C'));
    }

    #[test]
    fn hidden_paths_are_not_rendered() {
        let mut part = curved_part("facing");
        let a = part.add_point(1.5, 2.5, "").unwrap();
        let b = part.add_point(3.5, 4.5, "").unwrap();
        let mut construction = Path::new("grain line helper");
        construction.move_to(a).line_to(b);
        construction.render = false;
        part.add_path(construction);

        let parts = vec![part];
        let sheet = pack_parts(&parts, &DraftConfig::default()).unwrap();
        let document = sheet_to_svg(&parts, &sheet, &SvgDrawOptions::default()).unwrap();
        assert!(!document.to_string().contains("1.5"));
    }
}
