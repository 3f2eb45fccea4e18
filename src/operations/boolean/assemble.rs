use std::collections::{BTreeMap, HashMap};
use std::f64::consts::TAU;

use crate::geometry::{Path, Point, PolyNodeId, PolyTree};
use crate::math::polygon_2d::{
    cross, dedup_consecutive, dot, rotate_to_canonical_start, signed_area, winding_number, Probe,
};

/// Options controlling ring cleanup and orientation.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct AssembleOptions {
    pub preserve_collinear: bool,
    pub reverse_solution: bool,
}

/// Stitches directed boundary edges into simple rings and nests them.
///
/// Edges must have the filled side on their left.
pub(crate) fn assemble_tree(edges: &[(Point, Point)], options: AssembleOptions) -> PolyTree {
    let rings: Vec<Vec<Point>> = trace_walks(edges)
        .into_iter()
        .flat_map(split_at_repeats)
        .map(|ring| clean_ring(ring, options.preserve_collinear))
        .filter(|ring| ring.len() >= 3 && signed_area(ring) != 0.0)
        .map(|ring| rotate_to_canonical_start(&ring))
        .collect();
    build_tree(rings, options.reverse_solution)
}

/// Chains edges into closed walks, turning as far left as possible at
/// every vertex with more than one unused outgoing edge.
fn trace_walks(edges: &[(Point, Point)]) -> Vec<Vec<Point>> {
    let mut outgoing: BTreeMap<Point, Vec<usize>> = BTreeMap::new();
    for (i, (from, _)) in edges.iter().enumerate() {
        outgoing.entry(*from).or_default().push(i);
    }
    let mut used = vec![false; edges.len()];
    let mut walks = Vec::new();

    for first in 0..edges.len() {
        if used[first] {
            continue;
        }
        used[first] = true;
        let origin = edges[first].0;
        let mut walk = vec![origin];
        let (mut prev, mut at) = edges[first];
        while at != origin {
            walk.push(at);
            let next = outgoing.get(&at).and_then(|candidates| {
                candidates
                    .iter()
                    .copied()
                    .filter(|&k| !used[k])
                    .min_by(|&a, &b| {
                        turn_angle(prev, at, edges[a].1)
                            .total_cmp(&turn_angle(prev, at, edges[b].1))
                            .then(a.cmp(&b))
                    })
            });
            let Some(k) = next else {
                // Open chain; only reachable if the arrangement was not
                // fully planarised.
                break;
            };
            used[k] = true;
            prev = at;
            at = edges[k].1;
        }
        if at == origin {
            walks.push(walk);
        }
    }
    walks
}

/// Clockwise angle from the reversed incoming direction `at → prev` to the
/// outgoing direction `at → to`, in `(0, 2π]`. Smaller is a sharper left
/// turn; a U-turn scores `2π`.
#[allow(clippy::cast_precision_loss)]
fn turn_angle(prev: Point, at: Point, to: Point) -> f64 {
    let ccw = (cross(at, prev, to) as f64).atan2(dot(at, prev, to) as f64);
    let cw = -ccw;
    if cw <= 0.0 {
        cw + TAU
    } else {
        cw
    }
}

/// Splits a closed walk into simple rings wherever it revisits a vertex.
fn split_at_repeats(walk: Vec<Point>) -> Vec<Vec<Point>> {
    let mut rings = Vec::new();
    let mut stack: Vec<Point> = Vec::with_capacity(walk.len());
    let mut position: HashMap<Point, usize> = HashMap::new();
    for p in walk {
        if let Some(&k) = position.get(&p) {
            let ring: Vec<Point> = stack.drain(k..).collect();
            for q in &ring {
                position.remove(q);
            }
            rings.push(ring);
        }
        position.insert(p, stack.len());
        stack.push(p);
    }
    if !stack.is_empty() {
        rings.push(stack);
    }
    rings
}

/// Removes duplicate vertices and spikes, plus collinear vertices unless
/// `preserve_collinear`.
fn clean_ring(points: Vec<Point>, preserve_collinear: bool) -> Vec<Point> {
    let mut ring = dedup_consecutive(&points, true);
    let mut i = 0;
    let mut unchanged = 0;
    while ring.len() >= 3 && unchanged < ring.len() {
        let n = ring.len();
        let prev = ring[(i + n - 1) % n];
        let cur = ring[i];
        let next = ring[(i + 1) % n];
        let removable = prev == cur
            || (cross(prev, cur, next) == 0
                && (!preserve_collinear || dot(cur, prev, next) > 0 || prev == next));
        if removable {
            ring.remove(i);
            unchanged = 0;
            if ring.is_empty() {
                break;
            }
            i = (i + ring.len() - 1) % ring.len();
        } else {
            i = (i + 1) % n;
            unchanged += 1;
        }
    }
    ring
}

/// Returns true if `inner` lies inside `outer`, judged at the first vertex
/// (or edge midpoint) of `inner` that is not on `outer`'s boundary.
fn contains(outer: &[Point], inner: &[Point]) -> bool {
    let n = inner.len();
    inner
        .iter()
        .map(|&p| Probe::at(p))
        .chain((0..n).map(|i| Probe::midpoint(inner[i], inner[(i + 1) % n])))
        .find_map(|probe| winding_number(probe, outer))
        .is_some_and(|w| w != 0)
}

fn build_tree(rings: Vec<Vec<Point>>, reverse_solution: bool) -> PolyTree {
    let mut order: Vec<(usize, f64)> = rings
        .iter()
        .enumerate()
        .map(|(i, r)| (i, signed_area(r)))
        .collect();
    order.sort_by(|(i, a), (j, b)| {
        b.abs()
            .total_cmp(&a.abs())
            .then_with(|| rings[*i].cmp(&rings[*j]))
    });

    // Parent of each position in `order`, as a position in `order`.
    let mut parent: Vec<Option<usize>> = vec![None; order.len()];
    for pos in 0..order.len() {
        let (ring, area) = order[pos];
        parent[pos] = (0..pos).rev().find(|&cand| {
            let (other, other_area) = order[cand];
            (other_area > 0.0) != (area > 0.0) && contains(&rings[other], &rings[ring])
        });
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); order.len()];
    let mut roots = Vec::new();
    for (pos, p) in parent.iter().enumerate() {
        match p {
            Some(p) => children[*p].push(pos),
            None => roots.push(pos),
        }
    }
    let first_vertex = |pos: &usize| rings[order[*pos].0].first().copied();
    roots.sort_by_key(first_vertex);
    for list in &mut children {
        list.sort_by_key(first_vertex);
    }

    let mut tree = PolyTree::new();
    let mut stack: Vec<(usize, Option<PolyNodeId>)> =
        roots.iter().rev().map(|&pos| (pos, None)).collect();
    while let Some((pos, parent_id)) = stack.pop() {
        let ring = &rings[order[pos].0];
        let path = if reverse_solution {
            Path::new(reverse_from_start(ring), true)
        } else {
            Path::new(ring.clone(), true)
        };
        let id = tree.add(path, parent_id);
        stack.extend(children[pos].iter().rev().map(|&c| (c, Some(id))));
    }
    tree
}

/// Reverses a ring's orientation while keeping its first vertex.
fn reverse_from_start(ring: &[Point]) -> Vec<Point> {
    ring.first()
        .into_iter()
        .chain(ring.iter().skip(1).rev())
        .copied()
        .collect()
}
