// Copyright (c) 2016-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Implementation of Kruskal's algorithm

use std::collections::BTreeMap;

use num_traits::NumAssign;

use crate::collections::BinHeap;
use crate::graph::Graph;
use crate::mst::Mst;

/// Run Kruskal's algorithm to solve the *Minimum Spanning Tree*
/// problem on a graph.
///
/// All edges are loaded into a min-heap keyed by weight. Every vertex
/// carries a subtree label (0 for unassigned); an extracted edge
/// either starts a new subtree, attaches a vertex to an existing one,
/// merges two subtrees by rewriting one label, or is discarded
/// because it would close a cycle. The algorithm stops as soon as the
/// tree has `|V| - 1` edges; if the heap runs empty first the graph
/// is disconnected and the partial forest is returned with
/// `spanning = false`.
///
/// # Example
///
/// ```
/// use graflow::mst::kruskal;
/// use graflow::Graph;
///
/// let mut g = Graph::new();
/// for v in ["a", "b", "c", "d"].iter() {
///     g.add_vertex(*v);
/// }
/// g.add_edge("a", "b", 1).unwrap();
/// g.add_edge("b", "c", 2).unwrap();
/// g.add_edge("c", "d", 3).unwrap();
/// g.add_edge("d", "a", 4).unwrap();
///
/// let mst = kruskal(&g);
/// assert!(mst.spanning);
/// assert_eq!(mst.weight, 6);
/// assert_eq!(mst.tree.num_edges(), 3);
/// assert!(mst.tree.edges().all(|e| e.weight < 4));
/// ```
pub fn kruskal<V, E>(g: &Graph<V, E>) -> Mst<V, E>
where
    V: Clone + Ord,
    E: NumAssign + Ord + Copy,
{
    let mut heap = BinHeap::with_capacity(g.num_edges());
    for edge in g.edges() {
        heap.push(edge.clone(), edge.weight);
    }

    let mut labels: BTreeMap<V, usize> = g.vertices().map(|v| (v.name().clone(), 0)).collect();
    let mut next_label = 1;

    let mut tree = Graph::new();
    let mut weight = E::zero();
    let wanted = g.num_vertices().saturating_sub(1);
    let mut count = 0;

    while count < wanted {
        let (edge, w) = match heap.pop_min() {
            Some(min) => min,
            None => break,
        };
        if edge.is_loop() {
            continue;
        }

        let lu = labels[&edge.source];
        let lv = labels[&edge.terminus];
        if lu == 0 && lv == 0 {
            labels.insert(edge.source.clone(), next_label);
            labels.insert(edge.terminus.clone(), next_label);
            next_label += 1;
            tree.add_vertex(edge.source.clone());
            tree.add_vertex(edge.terminus.clone());
        } else if lu == 0 {
            labels.insert(edge.source.clone(), lv);
            tree.add_vertex(edge.source.clone());
        } else if lv == 0 {
            labels.insert(edge.terminus.clone(), lu);
            tree.add_vertex(edge.terminus.clone());
        } else if lu != lv {
            // merge the two subtrees
            for label in labels.values_mut() {
                if *label == lv {
                    *label = lu;
                }
            }
        } else {
            // same subtree, the edge would close a cycle
            continue;
        }

        tree.add_edge(edge.source.clone(), edge.terminus.clone(), w).unwrap();
        weight += w;
        count += 1;
    }

    Mst {
        tree,
        weight,
        spanning: count == wanted,
    }
}
