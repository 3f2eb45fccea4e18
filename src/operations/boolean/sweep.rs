use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap};

use tracing::{debug, warn};

use crate::geometry::Point;
use crate::math::intersect_2d::{is_interior_point, order_along, segment_crossing};

/// Upper bound on split passes. Each pass can only add vertices created by
/// rounding a crossing onto the grid, so real inputs settle in two or three.
const MAX_SPLIT_PASSES: usize = 16;

/// Payload carried by an edge through splitting.
pub(crate) trait EdgeTag: Copy {
    /// Returns true if edges with these tags must be tested against each
    /// other.
    fn interacts_with(&self, _other: &Self) -> bool {
        true
    }

    /// Returns true if the edge is never split.
    fn is_fixed(&self) -> bool {
        false
    }
}

/// A directed edge `start → end` with its payload.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge<T> {
    pub start: Point,
    pub end: Point,
    pub tag: T,
}

impl<T: EdgeTag> Edge<T> {
    pub fn new(start: Point, end: Point, tag: T) -> Self {
        Self { start, end, tag }
    }

    fn x_range(&self) -> (i64, i64) {
        (self.start.x.min(self.end.x), self.start.x.max(self.end.x))
    }

    fn y_range(&self) -> (i64, i64) {
        (self.start.y.min(self.end.y), self.start.y.max(self.end.y))
    }
}

/// Splits edges at every crossing, T-junction and collinear overlap until
/// no interacting pair touches except at shared endpoints.
///
/// Pieces of a split edge replace it in place, ordered from `start` to
/// `end`, and inherit its tag. Zero-length edges are dropped.
pub(crate) fn make_planar<T: EdgeTag>(edges: Vec<Edge<T>>) -> Vec<Edge<T>> {
    let mut edges: Vec<Edge<T>> = edges.into_iter().filter(|e| e.start != e.end).collect();
    for pass in 0..MAX_SPLIT_PASSES {
        let splits = collect_splits(&edges);
        let pending = splits.iter().filter(|s| !s.is_empty()).count();
        if pending == 0 {
            debug!(pass, edges = edges.len(), "arrangement is planar");
            return edges;
        }
        debug!(pass, pending, "splitting edges");
        edges = apply_splits(edges, &splits);
    }
    warn!(
        passes = MAX_SPLIT_PASSES,
        edges = edges.len(),
        "split pass limit reached; arrangement may not be fully planar"
    );
    edges
}

/// Pairs of edge indices whose bounding boxes overlap, found by a
/// left-to-right sweep. Each pair is reported once as `(lower, higher)`,
/// in ascending order.
///
/// The active edges live in a `YIndex`, so entering and leaving touch
/// `O(log n)` tree nodes and each entering edge only visits the active
/// edges its y-extent overlaps.
pub(crate) fn candidate_pairs<T: EdgeTag>(edges: &[Edge<T>]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by_key(|&i| (edges[i].x_range().0, i));

    let mut exits: BinaryHeap<Reverse<(i64, usize)>> = BinaryHeap::new();
    let mut active = YIndex::new(edges.iter().flat_map(|e| [e.start.y, e.end.y]));
    let mut pairs = Vec::new();
    let mut hits = Vec::new();

    for i in order {
        let edge = &edges[i];
        let (enter_x, exit_x) = edge.x_range();
        while let Some(&Reverse((x, j))) = exits.peek() {
            if x >= enter_x {
                break;
            }
            exits.pop();
            active.remove(j, edges[j].y_range());
        }

        let y_range = edge.y_range();
        hits.clear();
        active.overlapping(y_range, &mut hits);
        for &j in &hits {
            if edge.tag.interacts_with(&edges[j].tag) {
                pairs.push((i.min(j), i.max(j)));
            }
        }

        active.insert(i, y_range);
        exits.push(Reverse((exit_x, i)));
    }
    pairs.sort_unstable();
    pairs
}

/// Active edges indexed by their closed y-extent.
///
/// An edge overlaps a query range `[lo, hi]` either because it contains
/// `lo`, or because its own lower end lies in `(lo, hi]`. A segment tree
/// over the distinct y values answers the first case and a set ordered by
/// lower end answers the second, so every overlap is reported exactly once.
struct YIndex {
    ys: Vec<i64>,
    cover: Vec<BTreeSet<usize>>,
    by_low: BTreeSet<(usize, usize)>,
}

impl YIndex {
    fn new(ys: impl Iterator<Item = i64>) -> Self {
        let mut ys: Vec<i64> = ys.collect();
        ys.sort_unstable();
        ys.dedup();
        let nodes = 4 * ys.len().max(1);
        Self {
            ys,
            cover: vec![BTreeSet::new(); nodes],
            by_low: BTreeSet::new(),
        }
    }

    /// Position of `y` among the distinct y values.
    fn rank(&self, y: i64) -> usize {
        self.ys.partition_point(|&v| v < y)
    }

    fn ranks(&self, (lo, hi): (i64, i64)) -> (usize, usize) {
        (self.rank(lo), self.rank(hi))
    }

    fn last(&self) -> usize {
        self.ys.len().saturating_sub(1)
    }

    fn insert(&mut self, edge: usize, y_range: (i64, i64)) {
        let (lo, hi) = self.ranks(y_range);
        self.by_low.insert((lo, edge));
        self.update(0, 0, self.last(), (lo, hi), edge, true);
    }

    fn remove(&mut self, edge: usize, y_range: (i64, i64)) {
        let (lo, hi) = self.ranks(y_range);
        self.by_low.remove(&(lo, edge));
        self.update(0, 0, self.last(), (lo, hi), edge, false);
    }

    fn update(
        &mut self,
        node: usize,
        l: usize,
        r: usize,
        (lo, hi): (usize, usize),
        edge: usize,
        insert: bool,
    ) {
        if hi < l || r < lo {
            return;
        }
        if lo <= l && r <= hi {
            if insert {
                self.cover[node].insert(edge);
            } else {
                self.cover[node].remove(&edge);
            }
            return;
        }
        let mid = l + (r - l) / 2;
        self.update(2 * node + 1, l, mid, (lo, hi), edge, insert);
        self.update(2 * node + 2, mid + 1, r, (lo, hi), edge, insert);
    }

    /// Appends every active edge whose y-extent overlaps `y_range`.
    fn overlapping(&self, y_range: (i64, i64), out: &mut Vec<usize>) {
        let (lo, hi) = self.ranks(y_range);
        let (mut node, mut l, mut r) = (0, 0, self.last());
        loop {
            out.extend(self.cover[node].iter().copied());
            if l == r {
                break;
            }
            let mid = l + (r - l) / 2;
            if lo <= mid {
                (node, r) = (2 * node + 1, mid);
            } else {
                (node, l) = (2 * node + 2, mid + 1);
            }
        }
        if hi > lo {
            out.extend(
                self.by_low
                    .range((lo + 1, 0)..=(hi, usize::MAX))
                    .map(|&(_, edge)| edge),
            );
        }
    }
}

fn collect_splits<T: EdgeTag>(edges: &[Edge<T>]) -> Vec<Vec<Point>> {
    let mut splits: Vec<Vec<Point>> = vec![Vec::new(); edges.len()];
    for (i, j) in candidate_pairs(edges) {
        let (a, b) = (&edges[i], &edges[j]);
        if a.tag.is_fixed() && b.tag.is_fixed() {
            continue;
        }
        if let Some(p) = segment_crossing(a.start, a.end, b.start, b.end) {
            push_split(&mut splits[i], a, p);
            push_split(&mut splits[j], b, p);
            continue;
        }
        for p in [b.start, b.end] {
            if is_interior_point(p, a.start, a.end) {
                push_split(&mut splits[i], a, p);
            }
        }
        for p in [a.start, a.end] {
            if is_interior_point(p, b.start, b.end) {
                push_split(&mut splits[j], b, p);
            }
        }
    }
    splits
}

fn push_split<T: EdgeTag>(target: &mut Vec<Point>, edge: &Edge<T>, p: Point) {
    if !edge.tag.is_fixed() && p != edge.start && p != edge.end {
        target.push(p);
    }
}

fn apply_splits<T: EdgeTag>(edges: Vec<Edge<T>>, splits: &[Vec<Point>]) -> Vec<Edge<T>> {
    let mut out = Vec::with_capacity(edges.len() + splits.iter().map(Vec::len).sum::<usize>());
    for (edge, points) in edges.into_iter().zip(splits) {
        if points.is_empty() {
            out.push(edge);
            continue;
        }
        let mut from = edge.start;
        for p in order_along(edge.start, edge.end, points)
            .into_iter()
            .chain(std::iter::once(edge.end))
        {
            if p != from {
                out.push(Edge::new(from, p, edge.tag));
                from = p;
            }
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Plain;

    impl EdgeTag for Plain {}

    fn edge(a: (i64, i64), b: (i64, i64)) -> Edge<Plain> {
        Edge::new(a.into(), b.into(), Plain)
    }

    fn has_edge(edges: &[Edge<Plain>], a: (i64, i64), b: (i64, i64)) -> bool {
        let (a, b) = (Point::from(a), Point::from(b));
        edges.iter().any(|e| e.start == a && e.end == b)
    }

    #[test]
    fn sweep_prunes_distant_pairs() {
        let edges = vec![
            edge((0, 0), (10, 0)),
            edge((20, 0), (30, 0)),
            edge((5, -5), (5, 5)),
            edge((0, 100), (10, 100)),
        ];
        assert_eq!(candidate_pairs(&edges), vec![(0, 2)]);
    }

    #[test]
    fn touching_at_x_is_a_candidate() {
        let edges = vec![edge((0, 0), (10, 0)), edge((10, 0), (20, 5))];
        assert_eq!(candidate_pairs(&edges), vec![(0, 1)]);
    }

    #[test]
    fn crossing_splits_both_edges() {
        let edges = make_planar(vec![edge((0, 0), (10, 10)), edge((0, 10), (10, 0))]);
        assert_eq!(edges.len(), 4);
        assert!(has_edge(&edges, (0, 0), (5, 5)));
        assert!(has_edge(&edges, (5, 5), (10, 10)));
        assert!(has_edge(&edges, (0, 10), (5, 5)));
        assert!(has_edge(&edges, (5, 5), (10, 0)));
    }

    #[test]
    fn t_junction_splits_the_through_edge() {
        let edges = make_planar(vec![edge((0, 0), (10, 0)), edge((4, 0), (4, 6))]);
        assert_eq!(edges.len(), 3);
        assert!(has_edge(&edges, (0, 0), (4, 0)));
        assert!(has_edge(&edges, (4, 0), (10, 0)));
        assert!(has_edge(&edges, (4, 0), (4, 6)));
    }

    #[test]
    fn collinear_overlap_produces_shared_pieces() {
        let edges = make_planar(vec![edge((0, 0), (10, 0)), edge((12, 0), (4, 0))]);
        assert!(has_edge(&edges, (0, 0), (4, 0)));
        assert!(has_edge(&edges, (4, 0), (10, 0)));
        assert!(has_edge(&edges, (12, 0), (10, 0)));
        assert!(has_edge(&edges, (10, 0), (4, 0)));
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn pieces_keep_direction_and_order() {
        let edges = make_planar(vec![
            edge((10, 0), (0, 0)),
            edge((3, -1), (3, 1)),
            edge((7, -1), (7, 1)),
        ]);
        let through: Vec<_> = edges
            .iter()
            .filter(|e| e.start.y == 0 && e.end.y == 0)
            .map(|e| (e.start.x, e.end.x))
            .collect();
        assert_eq!(through, vec![(10, 7), (7, 3), (3, 0)]);
    }

    #[test]
    fn sweep_reports_every_overlapping_pair_once() {
        // A fan of edges from one point plus a long edge crossing all of them.
        let mut edges: Vec<Edge<Plain>> = (0..6).map(|k| edge((0, 0), (10, k * 4))).collect();
        edges.push(edge((5, -1), (5, 30)));
        let pairs = candidate_pairs(&edges);
        let mut expected = Vec::new();
        for i in 0..edges.len() {
            for j in i + 1..edges.len() {
                expected.push((i, j));
            }
        }
        assert_eq!(pairs, expected);
    }

    #[test]
    fn stacked_strips_are_not_paired() {
        // Long horizontal edges active at once but at distinct heights.
        let edges: Vec<Edge<Plain>> = (0..50)
            .map(|i| edge((0, i * 3), (1_000_000 + i, i * 3)))
            .collect();
        assert!(candidate_pairs(&edges).is_empty());
    }

    #[test]
    fn y_index_handles_nested_and_touching_ranges() {
        let mut index = YIndex::new([0, 2, 5, 7, 9, 12].into_iter());
        index.insert(0, (0, 12));
        index.insert(1, (2, 5));
        index.insert(2, (7, 9));
        let mut hits = Vec::new();
        index.overlapping((5, 7), &mut hits);
        hits.sort_unstable();
        assert_eq!(hits, vec![0, 1, 2]);

        index.remove(0, (0, 12));
        hits.clear();
        index.overlapping((9, 12), &mut hits);
        assert_eq!(hits, vec![2]);
        hits.clear();
        index.overlapping((12, 12), &mut hits);
        assert!(hits.is_empty());
    }

    #[test]
    fn zero_length_edges_are_dropped() {
        assert!(make_planar(vec![edge((1, 1), (1, 1))]).is_empty());
    }

    #[derive(Debug, Clone, Copy)]
    struct Fixed(bool);

    impl EdgeTag for Fixed {
        fn is_fixed(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn fixed_edges_are_not_split() {
        let edges = make_planar(vec![
            Edge::new(Point::new(0, 0), Point::new(10, 10), Fixed(true)),
            Edge::new(Point::new(0, 10), Point::new(10, 0), Fixed(false)),
        ]);
        assert_eq!(edges.len(), 3);
        assert_eq!(edges.iter().filter(|e| e.tag.0).count(), 1);
    }
}
