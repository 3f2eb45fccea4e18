use tracing::debug;

use crate::error::{OperationError, Result};
use crate::geometry::{Path, Paths, PolyTree};

use super::assemble::{assemble_tree, AssembleOptions};
use super::open::clip_open_paths;
use super::select::{ClipType, FillRule, Winding};
use super::sweep::{make_planar, Edge};
use super::winding::{boundary_edges, merge, winding_below, PlanarEdge};

/// Boolean operation over subject and clip path sets.
///
/// Closed subject paths and clip paths define the two regions; open subject
/// paths are cut against them. Inputs are copied in, so a `Clipper` can be
/// executed repeatedly with different operators.
///
/// ```
/// use polyclip2d::{ClipType, Clipper, FillRule, Path, Paths};
///
/// let a = Paths::from(Path::rectangle(0, 0, 10, 10));
/// let b = Paths::from(Path::rectangle(5, 5, 10, 10));
/// let result = Clipper::new()
///     .with_subject(&a)
///     .with_clip(&b)
///     .execute(ClipType::Intersection, FillRule::NonZero)
///     .unwrap();
/// assert_eq!(result.signed_area(), 25.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Clipper {
    subject: Paths,
    open_subject: Paths,
    clip: Paths,
    preserve_collinear: bool,
    reverse_solution: bool,
}

impl Clipper {
    /// Creates an empty clipper.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds subject paths. Open paths are routed to the open subject set.
    #[must_use]
    pub fn with_subject(mut self, paths: &Paths) -> Self {
        for path in paths {
            if path.closed {
                self.subject.push(path.clone());
            } else {
                self.open_subject.push(path.clone());
            }
        }
        self
    }

    /// Adds open subject paths regardless of their `closed` flag.
    #[must_use]
    pub fn with_open_subject(mut self, paths: &Paths) -> Self {
        for path in paths {
            self.open_subject.push(Path::new(path.points.clone(), false));
        }
        self
    }

    /// Adds clip paths. Clip paths must be closed.
    #[must_use]
    pub fn with_clip(mut self, paths: &Paths) -> Self {
        self.clip.extend(paths.clone());
        self
    }

    /// Keeps collinear vertices on output rings.
    #[must_use]
    pub fn with_preserve_collinear(mut self, preserve: bool) -> Self {
        self.preserve_collinear = preserve;
        self
    }

    /// Emits outer rings clockwise and holes counter-clockwise.
    #[must_use]
    pub fn with_reverse_solution(mut self, reverse: bool) -> Self {
        self.reverse_solution = reverse;
        self
    }

    /// Executes the operation and returns the flattened result.
    ///
    /// Closed rings come first in pre-order of the polygon tree, followed by
    /// the surviving pieces of open subject paths.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if a clip path is open, or
    /// `GeometryError::CoordinateOutOfRange` if a vertex lies outside the
    /// supported range.
    pub fn execute(&self, clip_type: ClipType, fill_rule: FillRule) -> Result<Paths> {
        let (tree, open) = self.run(clip_type, fill_rule)?;
        let mut paths = tree.to_paths();
        paths.extend(open);
        Ok(paths)
    }

    /// Executes the operation and returns the closed result as a polygon
    /// tree. Open subject paths do not appear in the tree.
    ///
    /// # Errors
    ///
    /// Same as [`Clipper::execute`].
    pub fn execute_tree(&self, clip_type: ClipType, fill_rule: FillRule) -> Result<PolyTree> {
        self.validate()?;
        if self.is_disjoint_intersection(clip_type) {
            return Ok(PolyTree::new());
        }
        let (planar, below) = self.arrangement();
        Ok(self.assemble(&planar, &below, clip_type, fill_rule))
    }

    fn run(&self, clip_type: ClipType, fill_rule: FillRule) -> Result<(PolyTree, Paths)> {
        self.validate()?;
        if self.is_disjoint_intersection(clip_type) {
            return Ok((PolyTree::new(), Paths::default()));
        }
        let (planar, below) = self.arrangement();
        let tree = self.assemble(&planar, &below, clip_type, fill_rule);
        let open = if self.open_subject.is_empty() {
            Paths::default()
        } else {
            clip_open_paths(
                self.open_subject.as_slice(),
                &planar,
                &below,
                clip_type,
                fill_rule,
            )
            .into()
        };
        Ok((tree, open))
    }

    /// An intersection whose subject and clip boxes do not touch is empty.
    fn is_disjoint_intersection(&self, clip_type: ClipType) -> bool {
        if clip_type != ClipType::Intersection {
            return false;
        }
        let subject = self.subject.bounds().union(self.open_subject.bounds());
        let disjoint = !subject.overlaps(&self.clip.bounds());
        if disjoint {
            debug!("subject and clip bounds are disjoint; skipping the sweep");
        }
        disjoint
    }

    fn validate(&self) -> Result<()> {
        if self.clip.iter().any(|p| !p.closed) {
            return Err(
                OperationError::InvalidInput("clip paths must be closed".to_owned()).into(),
            );
        }
        self.subject.validate()?;
        self.open_subject.validate()?;
        self.clip.validate()
    }

    /// Builds the planar arrangement of the closed inputs and the winding
    /// below each of its edges.
    fn arrangement(&self) -> (Vec<PlanarEdge>, Vec<Winding>) {
        let roles = [
            (&self.subject, Winding::new(1, 0)),
            (&self.clip, Winding::new(0, 1)),
        ];
        let edges: Vec<Edge<Winding>> = roles
            .iter()
            .flat_map(|(paths, tag)| {
                paths
                    .iter()
                    .flat_map(Path::edges)
                    .map(move |(a, b)| Edge::new(a, b, *tag))
            })
            .collect();
        let input_edges = edges.len();
        let planar = merge(&make_planar(edges));
        let below = winding_below(&planar);
        debug!(input_edges, planar_edges = planar.len(), "built arrangement");
        (planar, below)
    }

    fn assemble(
        &self,
        planar: &[PlanarEdge],
        below: &[Winding],
        clip_type: ClipType,
        fill_rule: FillRule,
    ) -> PolyTree {
        let boundary = boundary_edges(planar, below, clip_type, fill_rule, false);
        let tree = assemble_tree(
            &boundary,
            AssembleOptions {
                preserve_collinear: self.preserve_collinear,
                reverse_solution: self.reverse_solution,
            },
        );
        debug!(
            ?clip_type,
            ?fill_rule,
            boundary_edges = boundary.len(),
            rings = tree.len(),
            "assembled result"
        );
        tree
    }
}
