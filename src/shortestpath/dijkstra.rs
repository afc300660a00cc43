// Copyright (c) 2017, 2018, 2021, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
//
// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see  <http://www.gnu.org/licenses/>
//

//! Dijkstra's shortest path algorithm, generalized to negative arcs.
//!
//! The computation runs in two phases. The first phase is the
//! classical algorithm: vertices move from *infinity* over
//! *temporary* to *definitive* driven by a min-heap of tentative
//! distances. The second phase repairs the damage negative arcs may
//! have done to already definitive vertices: every arc that leaves
//! the tree but was not chosen into it is kept in a second heap
//! ordered by weight, and while such an arc still improves the
//! distance of its head, it is swapped into the tree, the distance
//! change is propagated through the whole subtree below the head and
//! the arcs leaving that subtree become candidates again.
//!
//! Before a swap the tree path from the arc's tail is walked back
//! towards the root; if the arc's head lies on that path, the swap
//! would close a cycle of negative total weight. The cycle is then
//! returned as a digraph of its own -- a normal result, not an error.
//!
//! # Example
//!
//! ```
//! use graflow::shortestpath::{dijkstra, DijkstraResult};
//! use graflow::Digraph;
//!
//! let mut g = Digraph::new();
//! for v in ["a", "b", "c"].iter() {
//!     g.add_vertex(*v);
//! }
//! g.add_arc("a", "b", 1).unwrap();
//! g.add_arc("b", "c", -2).unwrap();
//! g.add_arc("a", "c", 2).unwrap();
//!
//! match dijkstra(&g, &"a").unwrap() {
//!     DijkstraResult::Tree(sp) => {
//!         assert_eq!(sp.dist[&"c"], -1);
//!         assert_eq!(sp.pred[&"c"], "b");
//!     }
//!     DijkstraResult::NegativeCycle(_) => unreachable!(),
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use num_traits::{Bounded, NumAssign};

use crate::collections::BinHeap;
use crate::digraph::{Arc, Digraph};
use crate::error::{Error, Result};

/// A shortest path arborescence.
pub struct ShortestPathTree<V, E> {
    /// The arborescence rooted at the start vertex.
    pub tree: Digraph<V, E>,
    /// Distance from the start to every vertex; unreachable vertices
    /// carry the maximum value of `E`.
    pub dist: BTreeMap<V, E>,
    /// The tree predecessor of every reached vertex but the root.
    pub pred: BTreeMap<V, V>,
}

/// Outcome of the generalized Dijkstra algorithm.
pub enum DijkstraResult<V, E> {
    /// The shortest path tree from the start vertex.
    Tree(ShortestPathTree<V, E>),
    /// A digraph consisting of the vertices and arcs of a negative
    /// cycle found during the negative-arc phase.
    NegativeCycle(Digraph<V, E>),
}

/// Compute shortest paths from `src`, tolerating negative arcs.
///
/// Fails if `src` is not a vertex of the digraph. A negative cycle is
/// reported through [`DijkstraResult::NegativeCycle`], not as an
/// error.
pub fn dijkstra<V, E>(g: &Digraph<V, E>, src: &V) -> Result<DijkstraResult<V, E>>
where
    V: Clone + Ord,
    E: NumAssign + Ord + Copy + Bounded,
{
    if !g.has_vertex(src) {
        return Err(Error::Invariant("The start vertex is not on the digraph.".into()));
    }

    let inf = E::max_value();
    let mut dist: BTreeMap<V, E> = g.vertices().map(|v| (v.name().clone(), inf)).collect();
    let mut pred: BTreeMap<V, (V, E)> = BTreeMap::new();

    // phase 1: classical Dijkstra
    let mut definitive = BTreeSet::new();
    let mut heap = BinHeap::new();
    dist.insert(src.clone(), E::zero());
    heap.push(src.clone(), E::zero());

    while let Some((u, d)) = heap.pop_min() {
        if definitive.contains(&u) || d > dist[&u] {
            continue;
        }
        definitive.insert(u.clone());
        for arc in g.out_arcs(&u) {
            let v = &arc.terminus;
            if definitive.contains(v) {
                continue;
            }
            let nd = dist[&u] + arc.weight;
            if nd < dist[v] {
                dist.insert(v.clone(), nd);
                pred.insert(v.clone(), (u.clone(), arc.weight));
                heap.push(v.clone(), nd);
            }
        }
    }

    // phase 2: negative-arc relaxation over the remaining arcs
    let mut arcs = BinHeap::new();
    for v in g.vertices() {
        if dist[v.name()] != inf {
            for arc in v.out_arcs() {
                arcs.push(arc.clone(), arc.weight);
            }
        }
    }

    while let Some((arc, w)) = arcs.pop_min() {
        let u = &arc.source;
        let v = &arc.terminus;
        if dist[u] == inf {
            continue;
        }
        let nd = dist[u] + w;
        if nd >= dist[v] {
            continue;
        }

        // the swap closes a cycle iff v is an ancestor of u
        if on_tree_path(&pred, u, v) {
            return Ok(DijkstraResult::NegativeCycle(extract_cycle(&pred, &arc)));
        }

        // eject the current tree arc of v, it may become useful again
        if let Some((pu, pw)) = pred.get(v) {
            arcs.push(
                Arc {
                    weight: *pw,
                    source: pu.clone(),
                    terminus: v.clone(),
                },
                *pw,
            );
        }
        pred.insert(v.clone(), (u.clone(), w));

        if dist[v] == inf {
            // v enters the tree for the first time
            dist.insert(v.clone(), nd);
            for arc in g.out_arcs(v) {
                arcs.push(arc.clone(), arc.weight);
            }
        } else {
            // propagate the improvement through the subtree below v
            let delta = dist[v] - nd;
            for x in collect_subtree(&pred, v) {
                let dx = dist[&x];
                dist.insert(x.clone(), dx - delta);
                for arc in g.out_arcs(&x) {
                    arcs.push(arc.clone(), arc.weight);
                }
            }
        }
    }

    let mut tree = Digraph::new();
    for (v, d) in &dist {
        if *d != inf {
            tree.add_vertex(v.clone());
        }
    }
    for (v, (p, w)) in &pred {
        tree.add_arc(p.clone(), v.clone(), *w)?;
    }

    Ok(DijkstraResult::Tree(ShortestPathTree {
        tree,
        dist,
        pred: pred.into_iter().map(|(v, (p, _))| (v, p)).collect(),
    }))
}

/// Return `true` if `target` lies on the tree path from `from` to the
/// root (`from` itself included).
fn on_tree_path<V, E>(pred: &BTreeMap<V, (V, E)>, from: &V, target: &V) -> bool
where
    V: Clone + Ord,
{
    let mut x = from;
    loop {
        if x == target {
            return true;
        }
        match pred.get(x) {
            Some((p, _)) => x = p,
            None => return false,
        }
    }
}

/// Build the digraph of the cycle closed by `closing`: the tree path
/// from the closing arc's head to its tail plus the closing arc.
fn extract_cycle<V, E>(pred: &BTreeMap<V, (V, E)>, closing: &Arc<V, E>) -> Digraph<V, E>
where
    V: Clone + Ord,
    E: Copy,
{
    let mut names = vec![closing.source.clone()];
    let mut x = closing.source.clone();
    while x != closing.terminus {
        let (p, _) = &pred[&x];
        x = p.clone();
        names.push(x.clone());
    }

    let mut cycle = Digraph::new();
    for n in &names {
        cycle.add_vertex(n.clone());
    }
    for pair in names.windows(2) {
        let (child, parent) = (&pair[0], &pair[1]);
        let (_, w) = &pred[child];
        cycle.add_arc(parent.clone(), child.clone(), *w).unwrap();
    }
    cycle
        .add_arc(closing.source.clone(), closing.terminus.clone(), closing.weight)
        .unwrap();
    cycle
}

/// All vertices of the subtree rooted at `root`, `root` first.
fn collect_subtree<V, E>(pred: &BTreeMap<V, (V, E)>, root: &V) -> Vec<V>
where
    V: Clone + Ord,
{
    let mut result = vec![root.clone()];
    let mut i = 0;
    while i < result.len() {
        for (x, (p, _)) in pred {
            if p == &result[i] && !result.contains(x) {
                result.push(x.clone());
            }
        }
        i += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::{dijkstra, DijkstraResult};
    use crate::digraph::Digraph;

    fn digraph(vertices: &[&'static str], arcs: &[(&'static str, &'static str, i64)]) -> Digraph<&'static str, i64> {
        let mut g = Digraph::new();
        for v in vertices {
            g.add_vertex(*v);
        }
        for &(u, v, w) in arcs {
            g.add_arc(u, v, w).unwrap();
        }
        g
    }

    fn tree(result: DijkstraResult<&'static str, i64>) -> super::ShortestPathTree<&'static str, i64> {
        match result {
            DijkstraResult::Tree(t) => t,
            DijkstraResult::NegativeCycle(_) => panic!("unexpected negative cycle"),
        }
    }

    #[test]
    fn test_positive_weights() {
        let g = digraph(
            &["a", "b", "c", "d"],
            &[("a", "b", 1), ("a", "c", 4), ("b", "c", 2), ("c", "d", 1), ("b", "d", 5)],
        );
        let sp = tree(dijkstra(&g, &"a").unwrap());
        assert_eq!(sp.dist[&"b"], 1);
        assert_eq!(sp.dist[&"c"], 3);
        assert_eq!(sp.dist[&"d"], 4);
        assert_eq!(sp.pred[&"d"], "c");
        assert_eq!(sp.tree.num_arcs(), 3);
    }

    #[test]
    fn test_negative_arc_without_cycle() {
        let g = digraph(&["a", "b", "c"], &[("a", "b", 1), ("b", "c", -2), ("a", "c", 2)]);
        let sp = tree(dijkstra(&g, &"a").unwrap());
        assert_eq!(sp.dist[&"a"], 0);
        assert_eq!(sp.dist[&"b"], 1);
        assert_eq!(sp.dist[&"c"], -1);
        assert_eq!(sp.pred[&"c"], "b");
    }

    #[test]
    fn test_negative_arc_into_definitive_vertex() {
        // c is finalized with distance 2 before the arc d -> c with
        // weight -4 is seen; the repair must also lower c's subtree
        let g = digraph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b", 1), ("a", "c", 2), ("c", "e", 1), ("a", "d", 5), ("d", "c", -4)],
        );
        let sp = tree(dijkstra(&g, &"a").unwrap());
        assert_eq!(sp.dist[&"c"], 1);
        assert_eq!(sp.dist[&"e"], 2);
        assert_eq!(sp.pred[&"c"], "d");
    }

    #[test]
    fn test_negative_cycle() {
        let g = digraph(&["a", "b", "c"], &[("a", "b", 1), ("b", "c", -3), ("c", "a", 1)]);
        match dijkstra(&g, &"a").unwrap() {
            DijkstraResult::Tree(_) => panic!("expected a negative cycle"),
            DijkstraResult::NegativeCycle(cycle) => {
                assert_eq!(cycle.num_vertices(), 3);
                assert_eq!(cycle.num_arcs(), 3);
                let mut weight = 0;
                for arc in cycle.arcs() {
                    weight += arc.weight;
                }
                assert!(weight < 0);
                for v in cycle.vertices() {
                    assert_eq!(v.in_degree(), 1);
                    assert_eq!(v.out_degree(), 1);
                }
            }
        }
    }

    #[test]
    fn test_unreachable() {
        let g = digraph(&["a", "b", "c"], &[("a", "b", 1)]);
        let sp = tree(dijkstra(&g, &"a").unwrap());
        assert_eq!(sp.dist[&"c"], i64::max_value());
        assert!(!sp.tree.has_vertex(&"c"));
    }

    #[test]
    fn test_missing_start() {
        let g = digraph(&["a"], &[]);
        assert!(dijkstra(&g, &"x").is_err());
    }
}
