//! Parallel-path computation, used for seam allowances.
//!
//! Lines offset exactly. Curves offset by adaptive subdivision, since the
//! true parallel of a cubic Bezier is not itself a Bezier. Consecutive
//! offset segments are then stitched: overlaps at concave corners are
//! trimmed back to the real intersection, gaps at convex corners are
//! mitered via the end tangents.

use anyhow::{ensure, Result};
use log::debug;

use crate::entities::{PointId, PointTable};
use crate::geometry::bezier::CubicBezier;
use crate::geometry::intersect::{
    curve_curve_intersections, line_line_intersection, segment_curve_intersections,
    segment_segment_intersection,
};
use crate::geometry::primitives::{Point, Vector};
use crate::path::{AtomicSegment, Path};

/// Joint endpoints closer than this are snapped together rather than stitched.
/// Matches the 1/1000 coordinate rounding resolution.
const JOIN_TOLERANCE: f64 = 1e-3;

/// Maximum tangent divergence per offset piece: cos(11.25°).
/// Tighter curvature forces deeper subdivision.
const FLATNESS_COS: f64 = 0.980_785_280_403_230_4;

/// Cap on recursive subdivision (up to 2^10 pieces per input curve).
const MAX_SUBDIVISION_DEPTH: u32 = 10;

/// Miter length limit as a multiple of the offset distance, after which a
/// corner is bridged with a straight line instead (mirrors the SVG default).
const MITER_LIMIT: f64 = 4.0;

impl Path {
    /// Produces a path parallel to `self` at signed `distance`.
    ///
    /// Generated points are inserted into `points` as anonymous points.
    /// When `close` is set and the input path is closed, the joint between
    /// the last and first offset segments is stitched as well and the
    /// result is closed.
    ///
    /// A `distance` of zero returns a plain copy. Large offsets relative to
    /// the local curvature radius are a known approximation limit: the
    /// result may self-intersect and is not corrected further.
    pub fn offset(&self, distance: f64, close: bool, points: &mut PointTable) -> Result<Path> {
        ensure!(
            distance.is_finite(),
            "non-finite offset distance for path '{}': {distance}",
            self.name
        );
        if distance == 0.0 {
            return Ok(self.clone());
        }

        let atoms: Vec<AtomicSegment> = self
            .atomic_segments(points)?
            .into_iter()
            .filter(|a| !a.is_negligible())
            .collect();

        let mut result = Path::new(self.name.clone());
        result.render = self.render;
        result.sample = self.sample;
        result.attributes = self.attributes.clone();

        if atoms.is_empty() {
            return Ok(result);
        }

        let mut work: Vec<AtomicSegment> = vec![];
        for atom in &atoms {
            match atom {
                AtomicSegment::Line { from, to } => {
                    // the normal is defined: negligible segments were dropped above
                    if let Some(n) = (*to - *from).normal() {
                        work.push(AtomicSegment::Line {
                            from: *from + n * distance,
                            to: *to + n * distance,
                        });
                    }
                }
                AtomicSegment::Curve(curve) => offset_curve(curve, distance, 0, &mut work),
            }
        }
        debug!(
            "offsetting path '{}' by {distance}: {} atoms -> {} offset segments",
            self.name,
            atoms.len(),
            work.len()
        );

        // corner correction between consecutive offset segments
        let mut i = 0;
        while i + 1 < work.len() {
            let inserted = stitch_at(&mut work, i, distance);
            i += 1 + inserted;
        }

        let do_close = close && self.is_closed();
        if do_close && work.len() > 1 {
            // same correction between the last and first segments
            let last = work.len() - 1;
            let (a, joins, b) = stitch(work[last], work[0], distance);
            work[last] = a;
            work[0] = b;
            work.extend(joins);
        }

        let first = anonymous(points, work[0].from())?;
        result.move_to(first);
        for atom in &work {
            match atom {
                AtomicSegment::Line { to, .. } => {
                    let id = anonymous(points, *to)?;
                    result.line_to(id);
                }
                AtomicSegment::Curve(c) => {
                    let cp1 = anonymous(points, c.cp1)?;
                    let cp2 = anonymous(points, c.cp2)?;
                    let end = anonymous(points, c.to)?;
                    result.curve_to(cp1, cp2, end);
                }
            }
        }
        if do_close {
            result.close();
        }
        Ok(result)
    }
}

fn anonymous(points: &mut PointTable, position: Vector) -> Result<PointId> {
    Ok(points.insert(Point::try_new(position.0, position.1, "")?))
}

/// Offsets a single curve by recursive subdivision.
///
/// Splits at t=0.5 until the tangent directions across a piece stay within
/// the flatness threshold, then offsets each piece as one cubic: endpoints
/// along the normals of the end tangents, control points along the normals
/// of their control legs.
fn offset_curve(curve: &CubicBezier, distance: f64, depth: u32, out: &mut Vec<AtomicSegment>) {
    if depth < MAX_SUBDIVISION_DEPTH && !flat_enough(curve) {
        let (left, right) = curve.split(0.5);
        offset_curve(&left, distance, depth + 1, out);
        offset_curve(&right, distance, depth + 1, out);
        return;
    }

    let chord_direction = (curve.to - curve.from).unit().unwrap_or(Vector(1.0, 0.0));
    let start_direction = curve.direction_at_start().unwrap_or(chord_direction);
    let end_direction = curve.direction_at_end().unwrap_or(chord_direction);
    let cp1_direction = (curve.cp1 - curve.from).unit().unwrap_or(start_direction);
    let cp2_direction = (curve.to - curve.cp2).unit().unwrap_or(end_direction);

    out.push(AtomicSegment::Curve(CubicBezier::new(
        curve.from + rotate90(start_direction) * distance,
        curve.cp1 + rotate90(cp1_direction) * distance,
        curve.cp2 + rotate90(cp2_direction) * distance,
        curve.to + rotate90(end_direction) * distance,
    )));
}

fn rotate90(v: Vector) -> Vector {
    Vector(-v.1, v.0)
}

/// A piece is flat enough to offset in one go when the travel directions at
/// its start, middle and end all agree within the flatness threshold.
fn flat_enough(curve: &CubicBezier) -> bool {
    let mid = curve.tangent_at(0.5).unit();
    match (curve.direction_at_start(), mid, curve.direction_at_end()) {
        (Some(s), Some(m), Some(e)) => {
            s.dot(m) >= FLATNESS_COS && m.dot(e) >= FLATNESS_COS && s.dot(e) >= FLATNESS_COS
        }
        // degenerate tangents: nothing to gain from splitting further
        _ => true,
    }
}

/// Stitches the joint between `work[i]` and `work[i + 1]` in place.
/// Returns how many join segments were inserted between them.
fn stitch_at(work: &mut Vec<AtomicSegment>, i: usize, distance: f64) -> usize {
    let (a, joins, b) = stitch(work[i], work[i + 1], distance);
    work[i] = a;
    work[i + 1] = b;
    let inserted = joins.len();
    work.splice(i + 1..i + 1, joins);
    inserted
}

/// Resolves one corner between consecutive offset segments `a` and `b`.
///
/// Returns the corrected segments plus any join segments to insert between
/// them. Overlaps (concave corners) trim both segments back to their real
/// intersection; gaps (convex corners) are mitered via the end tangents,
/// falling back to a straight bridge when the tangents are near-parallel or
/// the miter would be excessively long.
fn stitch(
    a: AtomicSegment,
    b: AtomicSegment,
    distance: f64,
) -> (AtomicSegment, Vec<AtomicSegment>, AtomicSegment) {
    use AtomicSegment::{Curve, Line};

    let gap = a.to().distance(b.from());
    if gap <= JOIN_TOLERANCE {
        let mut b = b;
        b.set_from(a.to());
        return (a, vec![], b);
    }

    match (a, b) {
        (Line { from: a1, to: a2 }, Line { from: b1, to: b2 }) => {
            // overlap: the two offset segments physically cross
            if let Some(p) = segment_segment_intersection(a1, a2, b1, b2) {
                return (Line { from: a1, to: p }, vec![], Line { from: p, to: b2 });
            }
            // gap: extend both lines to their miter point
            if let Some(p) = line_line_intersection(a1, a2, b1, b2) {
                if within_miter_limit(p, a2, b1, distance, gap) {
                    return (Line { from: a1, to: p }, vec![], Line { from: p, to: b2 });
                }
            }
            (a, vec![Line { from: a2, to: b1 }], b)
        }
        (Line { from: a1, to: a2 }, Curve(bc)) => {
            // the crossing closest to the joint sits earliest on `b`
            if let Some((t, p)) = segment_curve_intersections(a1, a2, &bc).into_iter().next() {
                let mut trimmed = bc.split(t).1;
                trimmed.from = p;
                return (Line { from: a1, to: p }, vec![], Curve(trimmed));
            }
            (a, miter_join(&a, &b, distance, gap), b)
        }
        (Curve(ac), Line { from: b1, to: b2 }) => {
            // the crossing closest to the joint sits latest on `a`
            if let Some((t, p)) = segment_curve_intersections(b1, b2, &ac).into_iter().last() {
                let mut trimmed = ac.split(t).0;
                trimmed.to = p;
                return (Curve(trimmed), vec![], Line { from: p, to: b2 });
            }
            (a, miter_join(&a, &b, distance, gap), b)
        }
        (Curve(ac), Curve(bc)) => {
            // pick the crossing closest to the joint: late on `a`, early on `b`
            let hit = curve_curve_intersections(&ac, &bc)
                .into_iter()
                .max_by(|(ta1, tb1), (ta2, tb2)| {
                    (ta1 - tb1)
                        .partial_cmp(&(ta2 - tb2))
                        .expect("NaN intersection parameter")
                });
            if let Some((ta, tb)) = hit {
                let trimmed_a = ac.split(ta).0;
                let mut trimmed_b = bc.split(tb).1;
                trimmed_b.from = trimmed_a.to;
                return (Curve(trimmed_a), vec![], Curve(trimmed_b));
            }
            (a, miter_join(&a, &b, distance, gap), b)
        }
    }
}

/// Builds the join segments for a gap that could not be trimmed:
/// two lines through the miter point when the end tangents intersect
/// sensibly, a single straight bridge otherwise.
fn miter_join(a: &AtomicSegment, b: &AtomicSegment, distance: f64, gap: f64) -> Vec<AtomicSegment> {
    let bridge = vec![AtomicSegment::Line {
        from: a.to(),
        to: b.from(),
    }];

    let (Some(da), Some(db)) = (a.end_direction(), b.start_direction()) else {
        return bridge;
    };
    let Some(p) = line_line_intersection(a.to(), a.to() + da, b.from() - db, b.from()) else {
        return bridge;
    };

    // the miter point must lie ahead of `a` and behind `b`
    let forward = (p - a.to()).dot(da) >= 0.0;
    let backward = (b.from() - p).dot(db) >= 0.0;
    if forward && backward && within_miter_limit(p, a.to(), b.from(), distance, gap) {
        vec![
            AtomicSegment::Line {
                from: a.to(),
                to: p,
            },
            AtomicSegment::Line {
                from: p,
                to: b.from(),
            },
        ]
    } else {
        bridge
    }
}

fn within_miter_limit(p: Vector, a_end: Vector, b_start: Vector, distance: f64, gap: f64) -> bool {
    let limit = distance.abs() * MITER_LIMIT + gap;
    p.distance(a_end) <= limit && p.distance(b_start) <= limit
}

#[cfg(test)]
mod tests {
    use crate::entities::Part;
    use crate::geometry::primitives::Vector;
    use crate::path::{AtomicSegment, Path};

    fn square(part: &mut Part) -> Path {
        let a = part.add_point(0.0, 0.0, "").unwrap();
        let b = part.add_point(100.0, 0.0, "").unwrap();
        let c = part.add_point(100.0, 100.0, "").unwrap();
        let d = part.add_point(0.0, 100.0, "").unwrap();
        let mut path = Path::new("outline");
        path.move_to(a).line_to(b).line_to(c).line_to(d).close();
        path
    }

    #[test]
    fn square_offsets_exactly() {
        let mut part = Part::new("square");
        let path = square(&mut part);

        // outward for this winding
        let offset = path.offset(-10.0, true, &mut part.points).unwrap();
        assert!(offset.is_closed());

        let boundary = offset.boundary(&part.points).unwrap();
        assert_eq!(boundary.top_left, Vector(-10.0, -10.0));
        assert_eq!(boundary.bottom_right, Vector(110.0, 110.0));
    }

    #[test]
    fn inward_offset_shrinks_the_square() {
        let mut part = Part::new("square");
        let path = square(&mut part);

        let offset = path.offset(10.0, true, &mut part.points).unwrap();
        let boundary = offset.boundary(&part.points).unwrap();
        assert_eq!(boundary.top_left, Vector(10.0, 10.0));
        assert_eq!(boundary.bottom_right, Vector(90.0, 90.0));
    }

    #[test]
    fn zero_distance_returns_a_copy() {
        let mut part = Part::new("square");
        let path = square(&mut part);
        let copy = path.offset(0.0, true, &mut part.points).unwrap();
        assert_eq!(copy.segments, path.segments);
    }

    #[test]
    fn non_finite_distance_is_rejected() {
        let mut part = Part::new("square");
        let path = square(&mut part);
        assert!(path.offset(f64::NAN, true, &mut part.points).is_err());
    }

    #[test]
    fn arc_offset_stays_parallel_within_half_a_unit() {
        // quarter circle of radius 100 around the origin, kappa form
        const KAPPA: f64 = 0.552_284_749_830_793_6;
        let mut part = Part::new("arc");
        let a = part.add_point(100.0, 0.0, "").unwrap();
        let c1 = part.add_point(100.0, 100.0 * KAPPA, "").unwrap();
        let c2 = part.add_point(100.0 * KAPPA, 100.0, "").unwrap();
        let b = part.add_point(0.0, 100.0, "").unwrap();
        let mut path = Path::new("arc");
        path.move_to(a).curve_to(c1, c2, b);

        // outward for this winding: the exact parallel is the radius-110 arc
        let offset = path.offset(-10.0, false, &mut part.points).unwrap();

        let center = Vector(0.0, 0.0);
        let mut worst: f64 = 0.0;
        for atom in offset.atomic_segments(&part.points).unwrap() {
            for i in 0..=100 {
                let t = f64::from(i) / 100.0;
                let p = match atom {
                    AtomicSegment::Line { from, to } => from.lerp(to, t),
                    AtomicSegment::Curve(c) => c.point_at(t),
                };
                worst = worst.max((p.distance(center) - 110.0).abs());
            }
        }
        assert!(worst < 0.5, "radial deviation {worst} exceeds tolerance");
    }

    #[test]
    fn open_line_offset_translates_endpoints() {
        let mut part = Part::new("seam");
        let a = part.add_point(0.0, 0.0, "").unwrap();
        let b = part.add_point(100.0, 0.0, "").unwrap();
        let mut path = Path::new("seam");
        path.move_to(a).line_to(b);

        let offset = path.offset(10.0, false, &mut part.points).unwrap();
        let boundary = offset.boundary(&part.points).unwrap();
        assert_eq!(boundary.top_left, Vector(0.0, 10.0));
        assert_eq!(boundary.bottom_right, Vector(100.0, 10.0));
    }
}
