use crate::geometry::bezier::CubicBezier;
use crate::geometry::polynomial::TOLERANCE;
use crate::geometry::primitives::Vector;
use crate::geometry::Polynomial;

/// Coordinates closer than this are treated as coincident.
const EQ_TOLERANCE: f64 = 1e-9;

/// Intersection of two infinite lines, each given by two points.
///
/// Returns `None` for parallel lines (including two vertical or two
/// horizontal ones). Vertical lines have no defined slope and are handled
/// by solving for the other line's value at the fixed x.
pub fn line_line_intersection(p1: Vector, p2: Vector, p3: Vector, p4: Vector) -> Option<Vector> {
    let vertical_a = (p2.0 - p1.0).abs() <= EQ_TOLERANCE;
    let vertical_b = (p4.0 - p3.0).abs() <= EQ_TOLERANCE;

    match (vertical_a, vertical_b) {
        (true, true) => None,
        (true, false) => {
            let (slope, intercept) = slope_intercept(p3, p4);
            let x = p1.0;
            Some(Vector(x, slope * x + intercept))
        }
        (false, true) => {
            let (slope, intercept) = slope_intercept(p1, p2);
            let x = p3.0;
            Some(Vector(x, slope * x + intercept))
        }
        (false, false) => {
            let (slope_a, intercept_a) = slope_intercept(p1, p2);
            let (slope_b, intercept_b) = slope_intercept(p3, p4);
            if (slope_a - slope_b).abs() <= EQ_TOLERANCE {
                None
            } else {
                let x = (intercept_b - intercept_a) / (slope_a - slope_b);
                Some(Vector(x, slope_a * x + intercept_a))
            }
        }
    }
}

fn slope_intercept(p1: Vector, p2: Vector) -> (f64, f64) {
    let slope = (p2.1 - p1.1) / (p2.0 - p1.0);
    (slope, p1.1 - slope * p1.0)
}

/// Intersection of two line *segments*.
///
/// Parametric form with both parameters restricted to `[0, 1]`; parallel
/// or non-crossing segments yield `None`.
pub fn segment_segment_intersection(
    a1: Vector,
    a2: Vector,
    b1: Vector,
    b2: Vector,
) -> Option<Vector> {
    let t_nom = (a1 - b1).cross(b1 - b2);
    let u_nom = (a1 - b1).cross(a1 - a2);
    let denom = (a1 - a2).cross(b1 - b2);

    if denom.abs() <= EQ_TOLERANCE {
        //parallel segments
        return None;
    }
    let t = t_nom / denom;
    let u = u_nom / denom;
    if (-TOLERANCE..=1.0 + TOLERANCE).contains(&t) && (-TOLERANCE..=1.0 + TOLERANCE).contains(&u) {
        Some(a1.lerp(a2, t))
    } else {
        None
    }
}

/// Intersections between the infinite line through `l1`/`l2` and a cubic
/// Bezier, as `(t, point)` pairs with `t` the curve parameter in `[0, 1]`.
///
/// The curve's power-basis polynomials are substituted into the implicit
/// line equation `A·x + B·y + C = 0`, leaving a cubic whose real roots are
/// the intersection parameters.
pub fn line_curve_intersections(l1: Vector, l2: Vector, curve: &CubicBezier) -> Vec<(f64, Vector)> {
    let a = l2.1 - l1.1;
    let b = l1.0 - l2.0;
    let c = -(a * l1.0 + b * l1.1);

    let px = curve.power_basis_x().coefficients;
    let py = curve.power_basis_y().coefficients;
    let mut coefficients: Vec<f64> = px
        .iter()
        .zip(py.iter())
        .map(|(x, y)| a * x + b * y)
        .collect();
    coefficients[0] += c;

    let mut hits: Vec<(f64, Vector)> = vec![];
    for root in Polynomial::new(coefficients).roots() {
        if !(-TOLERANCE..=1.0 + TOLERANCE).contains(&root) {
            continue;
        }
        let t = root.clamp(0.0, 1.0);
        if hits.iter().all(|(known, _)| (known - t).abs() > TOLERANCE) {
            hits.push((t, curve.point_at(t)));
        }
    }
    hits.sort_by(|(t1, _), (t2, _)| t1.partial_cmp(t2).expect("NaN intersection parameter"));
    hits
}

/// Like [`line_curve_intersections`], but restricted to hits that lie on
/// the *segment* from `l1` to `l2`.
pub fn segment_curve_intersections(
    l1: Vector,
    l2: Vector,
    curve: &CubicBezier,
) -> Vec<(f64, Vector)> {
    let dir = l2 - l1;
    let sq_len = l1.sq_distance(l2);
    line_curve_intersections(l1, l2, curve)
        .into_iter()
        .filter(|(_, p)| {
            if sq_len <= EQ_TOLERANCE {
                return false;
            }
            let s = (*p - l1).dot(dir) / sq_len;
            (-TOLERANCE..=1.0 + TOLERANCE).contains(&s)
        })
        .collect()
}

/// Intersections between two cubic Bezier curves as `(t_a, t_b)` parameter
/// pairs.
///
/// Solved by recursive bounding-box clipping: both curves are split in half
/// while their control-point boxes keep overlapping, until the boxes shrink
/// below tolerance. Robust near tangencies, where closed-form root-finding
/// on the combined polynomial is numerically fragile.
pub fn curve_curve_intersections(a: &CubicBezier, b: &CubicBezier) -> Vec<(f64, f64)> {
    const MAX_DEPTH: u32 = 28;
    const BOX_TOLERANCE: f64 = 1e-5;
    const PARAM_TOLERANCE: f64 = 1e-3;

    fn clip(
        a: &CubicBezier,
        (a_lo, a_hi): (f64, f64),
        b: &CubicBezier,
        (b_lo, b_hi): (f64, f64),
        depth: u32,
        hits: &mut Vec<(f64, f64)>,
    ) {
        if !a.control_boundary().overlaps(&b.control_boundary()) {
            return;
        }
        let small = a.control_boundary().max_size() <= BOX_TOLERANCE
            && b.control_boundary().max_size() <= BOX_TOLERANCE;
        if small || depth >= MAX_DEPTH {
            hits.push(((a_lo + a_hi) / 2.0, (b_lo + b_hi) / 2.0));
            return;
        }

        let a_mid = (a_lo + a_hi) / 2.0;
        let b_mid = (b_lo + b_hi) / 2.0;
        let (a1, a2) = a.split(0.5);
        let (b1, b2) = b.split(0.5);
        clip(&a1, (a_lo, a_mid), &b1, (b_lo, b_mid), depth + 1, hits);
        clip(&a1, (a_lo, a_mid), &b2, (b_mid, b_hi), depth + 1, hits);
        clip(&a2, (a_mid, a_hi), &b1, (b_lo, b_mid), depth + 1, hits);
        clip(&a2, (a_mid, a_hi), &b2, (b_mid, b_hi), depth + 1, hits);
    }

    let mut raw = vec![];
    clip(a, (0.0, 1.0), b, (0.0, 1.0), 0, &mut raw);

    // clipping returns clusters of near-identical parameter pairs, keep one per cluster
    let mut hits: Vec<(f64, f64)> = vec![];
    for (ta, tb) in raw {
        if hits
            .iter()
            .all(|(ka, kb)| (ka - ta).abs() > PARAM_TOLERANCE || (kb - tb).abs() > PARAM_TOLERANCE)
        {
            hits.push((ta, tb));
        }
    }
    hits
}
