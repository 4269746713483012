pub mod offset;

use anyhow::{bail, ensure, Result};

use crate::entities::{PointId, PointTable};
use crate::geometry::bezier::CubicBezier;
use crate::geometry::primitives::Vector;
use crate::geometry::Boundary;

/// One drawing operation of a [`Path`], referencing named points by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    MoveTo(PointId),
    LineTo(PointId),
    /// Cubic Bezier to `end` with control points `cp1`/`cp2`; the start is
    /// the end of the preceding segment.
    CurveTo {
        cp1: PointId,
        cp2: PointId,
        end: PointId,
    },
    Close,
}

/// A single decomposed drawing operation with explicit coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AtomicSegment {
    Line { from: Vector, to: Vector },
    Curve(CubicBezier),
}

impl AtomicSegment {
    pub fn from(&self) -> Vector {
        match self {
            AtomicSegment::Line { from, .. } => *from,
            AtomicSegment::Curve(c) => c.from,
        }
    }

    pub fn to(&self) -> Vector {
        match self {
            AtomicSegment::Line { to, .. } => *to,
            AtomicSegment::Curve(c) => c.to,
        }
    }

    pub fn set_from(&mut self, v: Vector) {
        match self {
            AtomicSegment::Line { from, .. } => *from = v,
            AtomicSegment::Curve(c) => c.from = v,
        }
    }

    pub fn set_to(&mut self, v: Vector) {
        match self {
            AtomicSegment::Line { to, .. } => *to = v,
            AtomicSegment::Curve(c) => c.to = v,
        }
    }

    /// Direction of travel when entering the segment.
    pub fn start_direction(&self) -> Option<Vector> {
        match self {
            AtomicSegment::Line { from, to } => (*to - *from).unit(),
            AtomicSegment::Curve(c) => c.direction_at_start(),
        }
    }

    /// Direction of travel when leaving the segment.
    pub fn end_direction(&self) -> Option<Vector> {
        match self {
            AtomicSegment::Line { from, to } => (*to - *from).unit(),
            AtomicSegment::Curve(c) => c.direction_at_end(),
        }
    }

    /// Whether the segment is too small to contribute geometry at
    /// coordinate resolution.
    pub fn is_negligible(&self) -> bool {
        const NEGLIGIBLE: f64 = 5e-4; // below the 1/1000 rounding resolution
        match self {
            AtomicSegment::Line { from, to } => from.distance(*to) <= NEGLIGIBLE,
            AtomicSegment::Curve(c) => {
                c.chord_length() <= NEGLIGIBLE
                    && c.from.distance(c.cp1) <= NEGLIGIBLE
                    && c.to.distance(c.cp2) <= NEGLIGIBLE
            }
        }
    }

    pub fn boundary(&self) -> Boundary {
        match self {
            AtomicSegment::Line { from, to } => Boundary::from_diagonal_corners(*from, *to),
            AtomicSegment::Curve(c) => c.boundary(),
        }
    }
}

/// An ordered sequence of drawing operations through a part's point table.
///
/// The path stores point references, not coordinates: moving a named point
/// moves every path drawn through it. Style attributes are carried verbatim
/// to the renderer and never interpreted here.
#[derive(Debug, Clone, Default)]
pub struct Path {
    pub name: String,
    pub segments: Vec<Segment>,
    /// Whether the path is drawn in output.
    pub render: bool,
    /// Whether the path participates in sampling/diffing.
    pub sample: bool,
    /// Free-form style attributes (key, value), passed through to rendering.
    pub attributes: Vec<(String, String)>,
}

impl Path {
    pub fn new(name: impl Into<String>) -> Self {
        Path {
            name: name.into(),
            segments: vec![],
            render: true,
            sample: true,
            attributes: vec![],
        }
    }

    pub fn move_to(&mut self, p: PointId) -> &mut Self {
        self.segments.push(Segment::MoveTo(p));
        self
    }

    pub fn line_to(&mut self, p: PointId) -> &mut Self {
        self.segments.push(Segment::LineTo(p));
        self
    }

    pub fn curve_to(&mut self, cp1: PointId, cp2: PointId, end: PointId) -> &mut Self {
        self.segments.push(Segment::CurveTo { cp1, cp2, end });
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.segments.push(Segment::Close);
        self
    }

    pub fn attr(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// A path is closed iff its last segment is `Close`.
    pub fn is_closed(&self) -> bool {
        matches!(self.segments.last(), Some(Segment::Close))
    }

    fn resolve(&self, id: PointId, points: &PointTable) -> Result<Vector> {
        match points.get(id) {
            Some(p) => Ok(p.position()),
            None => bail!(
                "path '{}' references a point absent from the part's point table",
                self.name
            ),
        }
    }

    /// Decomposes the path into atomic segments with explicit coordinates.
    ///
    /// `Close` becomes a line back to the position of the first `MoveTo`
    /// (omitted when start and end already coincide). Fails on a dangling
    /// point reference or a path not starting with `MoveTo`.
    pub fn atomic_segments(&self, points: &PointTable) -> Result<Vec<AtomicSegment>> {
        if self.segments.is_empty() {
            return Ok(vec![]);
        }
        ensure!(
            matches!(self.segments.first(), Some(Segment::MoveTo(_))),
            "path '{}' does not start with a move operation",
            self.name
        );

        let mut atoms = vec![];
        let mut current = Vector::default();
        let mut subpath_start = Vector::default();

        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => {
                    current = self.resolve(p, points)?;
                    subpath_start = current;
                }
                Segment::LineTo(p) => {
                    let to = self.resolve(p, points)?;
                    atoms.push(AtomicSegment::Line { from: current, to });
                    current = to;
                }
                Segment::CurveTo { cp1, cp2, end } => {
                    let curve = CubicBezier::new(
                        current,
                        self.resolve(cp1, points)?,
                        self.resolve(cp2, points)?,
                        self.resolve(end, points)?,
                    );
                    current = curve.to;
                    atoms.push(AtomicSegment::Curve(curve));
                }
                Segment::Close => {
                    if current != subpath_start {
                        atoms.push(AtomicSegment::Line {
                            from: current,
                            to: subpath_start,
                        });
                    }
                    current = subpath_start;
                }
            }
        }
        Ok(atoms)
    }

    /// Exact axis-aligned bounding box of the path: line segments via their
    /// endpoints, curves via their derivative roots.
    pub fn boundary(&self, points: &PointTable) -> Result<Boundary> {
        let atoms = self.atomic_segments(points)?;
        let mut boundary = match self.segments.first() {
            Some(Segment::MoveTo(p)) => Boundary::at(self.resolve(*p, points)?),
            _ => bail!("path '{}' has no geometry to bound", self.name),
        };
        for atom in &atoms {
            boundary = Boundary::union(boundary, atom.boundary());
        }
        Ok(boundary)
    }

    /// Appends `other`'s drawing operations, dropping `other`'s leading
    /// `MoveTo` so the geometry continues from the current endpoint. Both
    /// paths must be drawn through the same point table.
    pub fn join(&mut self, other: &Path) -> &mut Self {
        let skip_move = matches!(other.segments.first(), Some(Segment::MoveTo(_)));
        self.segments
            .extend(other.segments.iter().skip(skip_move as usize).copied());
        self
    }

    /// The same path traced in the opposite direction.
    pub fn reversed(&self) -> Path {
        #[derive(Clone, Copy)]
        enum Op {
            Line,
            Curve(PointId, PointId),
        }

        // walk forward collecting (start, op, end) triples, then emit them backwards
        let mut triples: Vec<(PointId, Op, PointId)> = vec![];
        let mut current: Option<PointId> = None;
        let mut first: Option<PointId> = None;
        let was_closed = self.is_closed();

        for segment in &self.segments {
            match *segment {
                Segment::MoveTo(p) => {
                    current = Some(p);
                    first.get_or_insert(p);
                }
                Segment::LineTo(p) => {
                    if let Some(c) = current {
                        triples.push((c, Op::Line, p));
                    }
                    current = Some(p);
                }
                Segment::CurveTo { cp1, cp2, end } => {
                    if let Some(c) = current {
                        triples.push((c, Op::Curve(cp2, cp1), end));
                    }
                    current = Some(end);
                }
                Segment::Close => {
                    if let (Some(c), Some(f)) = (current, first) {
                        if c != f {
                            triples.push((c, Op::Line, f));
                        }
                    }
                }
            }
        }

        let mut reversed = Path::new(self.name.clone());
        reversed.render = self.render;
        reversed.sample = self.sample;
        reversed.attributes = self.attributes.clone();

        if let Some(&(_, _, last_end)) = triples.last() {
            reversed.move_to(last_end);
            for &(start, op, _) in triples.iter().rev() {
                match op {
                    Op::Line => reversed.line_to(start),
                    Op::Curve(cp1, cp2) => reversed.curve_to(cp1, cp2, start),
                };
            }
            if was_closed {
                reversed.close();
            }
        } else if let Some(f) = first {
            reversed.move_to(f);
        }
        reversed
    }
}
