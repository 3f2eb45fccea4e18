use tracing::debug;

use crate::geometry::{Path, Point};
use crate::math::polygon_2d::Probe;

use super::select::{ClipType, FillRule, Winding};
use super::sweep::{make_planar, Edge, EdgeTag};
use super::winding::PlanarEdge;

/// Role of an edge while cutting open paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece {
    /// Part of the open subject path with this index.
    Open(usize),
    /// A planar edge of the closed regions; never split.
    Boundary,
}

impl EdgeTag for Piece {
    fn interacts_with(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::Open(_), Self::Boundary) | (Self::Boundary, Self::Open(_))
        )
    }

    fn is_fixed(&self) -> bool {
        matches!(self, Self::Boundary)
    }
}

/// Clips open subject paths against the closed arrangement.
///
/// Open paths are cut wherever they cross or touch a closed boundary. Each
/// piece is kept according to [`ClipType::keeps_open`], and consecutive
/// kept pieces of one path are joined back together.
pub(crate) fn clip_open_paths(
    open: &[Path],
    planar: &[PlanarEdge],
    below: &[Winding],
    clip_type: ClipType,
    fill_rule: FillRule,
) -> Vec<Path> {
    let mut edges: Vec<Edge<Piece>> = open
        .iter()
        .enumerate()
        .flat_map(|(i, path)| {
            path.edges()
                .map(move |(a, b)| Edge::new(a, b, Piece::Open(i)))
        })
        .collect();
    let open_edges = edges.len();
    edges.extend(
        planar
            .iter()
            .map(|e| Edge::new(e.left, e.right, Piece::Boundary)),
    );

    let pieces = make_planar(edges);
    let mut result: Vec<Path> = Vec::new();
    let mut run: Option<(usize, Vec<Point>)> = None;
    for piece in &pieces {
        let Piece::Open(owner) = piece.tag else {
            continue;
        };
        let (in_subject, in_clip) = region_at(piece.start, piece.end, planar, below, fill_rule);
        if !clip_type.keeps_open(in_subject, in_clip) {
            flush(&mut run, &mut result);
            continue;
        }
        let continues = matches!(
            &run,
            Some((path, points)) if *path == owner && points.last() == Some(&piece.start)
        );
        if continues {
            if let Some((_, points)) = run.as_mut() {
                points.push(piece.end);
            }
        } else {
            flush(&mut run, &mut result);
            run = Some((owner, vec![piece.start, piece.end]));
        }
    }
    flush(&mut run, &mut result);
    debug!(open_edges, kept = result.len(), "clipped open paths");
    result
}

fn flush(run: &mut Option<(usize, Vec<Point>)>, out: &mut Vec<Path>) {
    if let Some((_, points)) = run.take() {
        out.push(Path::new(points, false));
    }
}

/// Per-role filled state at the midpoint of `a-b`.
///
/// A midpoint lying on a closed boundary is inside a role's region if
/// either side of that boundary is filled.
fn region_at(
    a: Point,
    b: Point,
    planar: &[PlanarEdge],
    below: &[Winding],
    fill_rule: FillRule,
) -> (bool, bool) {
    let probe = Probe::midpoint(a, b);
    if let Some(k) = planar
        .iter()
        .position(|e| probe.is_on_segment(e.left, e.right))
    {
        let (sub_below, clip_below) = below[k].filled(fill_rule);
        let (sub_above, clip_above) = (below[k] + planar[k].wind).filled(fill_rule);
        return (sub_below || sub_above, clip_below || clip_above);
    }
    planar
        .iter()
        .fold(Winding::ZERO, |acc, e| acc + e.crossing(&probe))
        .filled(fill_rule)
}
