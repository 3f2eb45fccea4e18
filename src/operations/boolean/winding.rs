use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::geometry::Point;
use crate::math::polygon_2d::{cross, Probe};

use super::select::{ClipType, FillRule, Winding};
use super::sweep::{Edge, EdgeTag};

impl EdgeTag for Winding {}

/// An edge of the planar arrangement, stored with `left < right` in sweep
/// order.
///
/// `wind` is the change in winding when crossing the edge from below to
/// above. For a vertical edge, "above" is the `-x` side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PlanarEdge {
    pub left: Point,
    pub right: Point,
    pub wind: Winding,
}

impl PlanarEdge {
    /// Winding contribution of this edge to a probe position.
    pub fn crossing(&self, probe: &Probe) -> Winding {
        let c = probe.crossing(self.left, self.right);
        Winding::new(self.wind.subject * c, self.wind.clip * c)
    }
}

/// Collapses split edges into unique planar edges.
///
/// Coincident edges are merged and their contributions summed, so
/// overlapping boundaries are not double counted. Edges whose contributions
/// cancel are dropped. The result is sorted by `(left, right)`.
pub(crate) fn merge(edges: &[Edge<Winding>]) -> Vec<PlanarEdge> {
    let mut merged: BTreeMap<(Point, Point), Winding> = BTreeMap::new();
    for e in edges {
        let (key, wind) = match e.start.cmp(&e.end) {
            Ordering::Less => ((e.start, e.end), e.tag),
            Ordering::Greater => ((e.end, e.start), e.tag.negated()),
            Ordering::Equal => continue,
        };
        let entry = merged.entry(key).or_default();
        *entry = *entry + wind;
    }
    merged
        .into_iter()
        .filter(|(_, wind)| !wind.is_zero())
        .map(|((left, right), wind)| PlanarEdge { left, right, wind })
        .collect()
}

#[derive(Debug, Clone, Copy)]
enum Event {
    End(usize),
    Start(usize),
}

impl Event {
    fn rank(self) -> u8 {
        match self {
            Self::End(_) => 0,
            Self::Start(_) => 1,
        }
    }
}

/// Position of `n` relative to `a`, where `a` is active at `n.left`.
/// `Greater` means `n` starts above `a`, or leaves upward from a shared start.
fn side(a: &PlanarEdge, n: &PlanarEdge) -> Ordering {
    match cross(a.left, a.right, n.left).cmp(&0) {
        Ordering::Equal => cross(a.left, a.right, n.right).cmp(&0),
        other => other,
    }
}

/// An active edge in the sweep status, ordered bottom to top.
///
/// Comparison evaluates the later-starting edge against the line of the
/// earlier one. Active edges of a planar arrangement never cross, so this is
/// a total order over whatever is active at once.
#[derive(Debug, Clone, Copy)]
struct StatusKey {
    edge: PlanarEdge,
    index: usize,
}

impl Ord for StatusKey {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.index == other.index {
            return Ordering::Equal;
        }
        let order = if self.edge.left >= other.edge.left {
            side(&other.edge, &self.edge)
        } else {
            side(&self.edge, &other.edge).reverse()
        };
        order.then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for StatusKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for StatusKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for StatusKey {}

/// Computes the winding just below every edge of a planar arrangement.
///
/// A left-to-right sweep keeps the active edges ordered bottom to top in a
/// `BTreeSet`. An entering edge takes the winding above its lower neighbour
/// (zero if none) as its own "below"; its "above" is that plus its `wind`.
pub(crate) fn winding_below(edges: &[PlanarEdge]) -> Vec<Winding> {
    let mut events: Vec<(Point, Event)> = Vec::with_capacity(edges.len() * 2);
    for (i, e) in edges.iter().enumerate() {
        events.push((e.left, Event::Start(i)));
        events.push((e.right, Event::End(i)));
    }
    events.sort_by(|(p, a), (q, b)| {
        p.cmp(q)
            .then(a.rank().cmp(&b.rank()))
            .then_with(|| match (a, b) {
                (Event::Start(i), Event::Start(j)) => {
                    let (ei, ej) = (&edges[*i], &edges[*j]);
                    match cross(*p, ei.right, ej.right).cmp(&0) {
                        Ordering::Greater => Ordering::Less,
                        Ordering::Less => Ordering::Greater,
                        Ordering::Equal => i.cmp(j),
                    }
                }
                (Event::End(i), Event::End(j)) => i.cmp(j),
                _ => Ordering::Equal,
            })
    });

    let mut below = vec![Winding::ZERO; edges.len()];
    let mut status: BTreeSet<StatusKey> = BTreeSet::new();
    for (_, event) in events {
        let index = match event {
            Event::Start(i) | Event::End(i) => i,
        };
        let key = StatusKey {
            edge: edges[index],
            index,
        };
        match event {
            Event::Start(i) => {
                below[i] = match status.range(..key).next_back() {
                    Some(lower) => below[lower.index] + lower.edge.wind,
                    None => Winding::ZERO,
                };
                status.insert(key);
            }
            Event::End(_) => {
                status.remove(&key);
            }
        }
    }
    below
}

/// Selects the edges separating result interior from exterior, directed so
/// the interior lies on their left (or on their right when `reverse`).
pub(crate) fn boundary_edges(
    edges: &[PlanarEdge],
    below: &[Winding],
    clip_type: ClipType,
    fill_rule: FillRule,
    reverse: bool,
) -> Vec<(Point, Point)> {
    edges
        .iter()
        .zip(below)
        .filter_map(|(edge, &under)| {
            let inside_below = under.is_inside(fill_rule, clip_type);
            let inside_above = (under + edge.wind).is_inside(fill_rule, clip_type);
            if inside_below == inside_above {
                return None;
            }
            if inside_above != reverse {
                Some((edge.left, edge.right))
            } else {
                Some((edge.right, edge.left))
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::Path;
    use crate::operations::boolean::sweep::make_planar;

    fn ring_edges(path: &Path, tag: Winding) -> Vec<Edge<Winding>> {
        path.edges().map(|(a, b)| Edge::new(a, b, tag)).collect()
    }

    fn find(edges: &[PlanarEdge], l: (i64, i64), r: (i64, i64)) -> usize {
        edges
            .iter()
            .position(|e| e.left == Point::from(l) && e.right == Point::from(r))
            .unwrap()
    }

    #[test]
    fn merge_sums_coincident_edges() {
        let subject = Winding::new(1, 0);
        let clip = Winding::new(0, 1);
        let edges = vec![
            Edge::new(Point::new(0, 0), Point::new(5, 0), subject),
            Edge::new(Point::new(5, 0), Point::new(0, 0), clip),
            Edge::new(Point::new(0, 1), Point::new(5, 1), subject),
            Edge::new(Point::new(5, 1), Point::new(0, 1), subject),
        ];
        let merged = merge(&edges);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].wind, Winding::new(1, -1));
    }

    #[test]
    fn square_windings() {
        let square = Path::rectangle(0, 0, 10, 10);
        let edges = merge(&ring_edges(&square, Winding::new(1, 0)));
        assert_eq!(edges.len(), 4);
        let below = winding_below(&edges);

        let bottom = find(&edges, (0, 0), (10, 0));
        let top = find(&edges, (0, 10), (10, 10));
        let left = find(&edges, (0, 0), (0, 10));
        let right = find(&edges, (10, 0), (10, 10));
        assert_eq!(below[bottom], Winding::ZERO);
        assert_eq!(below[top], Winding::new(1, 0));
        // Vertical edges: "below" is the +x side.
        assert_eq!(below[left], Winding::new(1, 0));
        assert_eq!(below[right], Winding::ZERO);
    }

    #[test]
    fn nested_squares_accumulate() {
        let mut edges = ring_edges(&Path::rectangle(0, 0, 10, 10), Winding::new(1, 0));
        edges.extend(ring_edges(&Path::rectangle(2, 2, 4, 4), Winding::new(0, 1)));
        let planar = merge(&edges);
        let below = winding_below(&planar);
        let inner_top = find(&planar, (2, 6), (6, 6));
        assert_eq!(below[inner_top], Winding::new(1, 1));
        let outer_top = find(&planar, (0, 10), (10, 10));
        assert_eq!(below[outer_top], Winding::new(1, 0));
    }

    #[test]
    fn boundary_is_directed_counter_clockwise() {
        let square = Path::rectangle(0, 0, 10, 10);
        let planar = merge(&ring_edges(&square.reversed(), Winding::new(1, 0)));
        let below = winding_below(&planar);
        let out = boundary_edges(&planar, &below, ClipType::Union, FillRule::NonZero, false);
        assert_eq!(out.len(), 4);
        assert!(out.contains(&(Point::new(0, 0), Point::new(10, 0))));
        assert!(out.contains(&(Point::new(0, 10), Point::new(0, 0))));

        let reversed = boundary_edges(&planar, &below, ClipType::Union, FillRule::NonZero, true);
        assert!(reversed.contains(&(Point::new(10, 0), Point::new(0, 0))));
    }

    #[test]
    fn positive_rule_rejects_clockwise_ring() {
        let square = Path::rectangle(0, 0, 10, 10).reversed();
        let planar = merge(&ring_edges(&square, Winding::new(1, 0)));
        let below = winding_below(&planar);
        assert!(boundary_edges(&planar, &below, ClipType::Union, FillRule::Positive, false)
            .is_empty());
    }

    #[test]
    fn crossings_match_sweep() {
        let planar = merge(&ring_edges(&Path::rectangle(0, 0, 10, 10), Winding::new(0, 1)));
        let probe = Probe::at(Point::new(3, 4));
        let total = planar
            .iter()
            .fold(Winding::ZERO, |acc, e| acc + e.crossing(&probe));
        assert_eq!(total, Winding::new(0, 1));
    }

    #[test]
    fn stacked_strips_have_independent_windings() {
        // Long disjoint strips are all active together; each must see only
        // the strips below it, which contribute nothing.
        let mut edges = Vec::new();
        for i in 0..40 {
            let strip = Path::rectangle(i, i * 10, 1_000 - 2 * i, 5);
            edges.extend(ring_edges(&strip, Winding::new(1, 0)));
        }
        let planar = merge(&edges);
        let below = winding_below(&planar);
        for i in 0..40 {
            let (x0, x1, y) = (i, 1_000 - i, i * 10);
            assert_eq!(below[find(&planar, (x0, y), (x1, y))], Winding::ZERO);
            assert_eq!(
                below[find(&planar, (x0, y + 5), (x1, y + 5))],
                Winding::new(1, 0)
            );
        }
    }

    /// Winding below the midpoint of a non-vertical edge, summed directly
    /// over every edge crossed by a downward ray.
    fn winding_under(planar: &[PlanarEdge], i: usize) -> Winding {
        let edge = &planar[i];
        let mid = Probe::midpoint(edge.left, edge.right);
        let mx2 = edge.left.x + edge.right.x;
        planar
            .iter()
            .enumerate()
            .filter(|&(j, e)| {
                j != i
                    && 2 * e.left.x <= mx2
                    && mx2 < 2 * e.right.x
                    && mid.side_of(e.left, e.right) > 0
            })
            .fold(Winding::ZERO, |acc, (_, e)| acc + e.wind)
    }

    #[test]
    fn shared_start_points_order_by_direction() {
        // Two triangles share their left vertex and a vertical side, so
        // several edges enter the status at the same point.
        let mut edges = ring_edges(
            &Path::closed([(0, 0), (20, -10), (20, 10)]),
            Winding::new(1, 0),
        );
        edges.extend(ring_edges(
            &Path::closed([(0, 0), (20, 0), (20, 5)]),
            Winding::new(0, 1),
        ));
        let planar = merge(&make_planar(edges));
        let below = winding_below(&planar);
        for (i, edge) in planar.iter().enumerate() {
            if edge.left.x != edge.right.x {
                assert_eq!(below[i], winding_under(&planar, i), "edge {edge:?}");
            }
        }
        let inner = find(&planar, (0, 0), (20, 5));
        assert_eq!(below[inner], Winding::new(1, 1));
    }
}
