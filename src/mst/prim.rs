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

//! Implementation of Prim's algorithm

use num_traits::NumAssign;

use crate::graph::Graph;
use crate::mst::Mst;

/// Run Prim's algorithm to solve the *Minimum Spanning Tree* problem
/// on a graph.
///
/// Starting from the first vertex, each round scans every edge
/// leaving the current tree and adds the cheapest one whose opposite
/// endpoint is not yet in the tree. The algorithm stops when the tree
/// spans all vertices or no crossing edge exists (`spanning =
/// false`).
///
/// On a graph with pairwise distinct edge weights the returned tree
/// has the same total weight as the one found by
/// [`kruskal`][crate::mst::kruskal].
pub fn prim<V, E>(g: &Graph<V, E>) -> Mst<V, E>
where
    V: Clone + Ord,
    E: NumAssign + Ord + Copy,
{
    let mut tree = Graph::new();
    let mut weight = E::zero();

    let root = match g.first_vertex() {
        Some(root) => root.clone(),
        None => {
            return Mst {
                tree,
                weight,
                spanning: true,
            }
        }
    };
    tree.add_vertex(root);

    while tree.num_vertices() < g.num_vertices() {
        let mut best: Option<(V, V, E)> = None;
        for v in tree.vertices() {
            let name = v.name();
            for edge in g.vertex(name).into_iter().flat_map(|x| x.edges()) {
                let opposite = edge.opposite(name);
                if tree.has_vertex(opposite) {
                    continue;
                }
                match &best {
                    Some((_, _, w)) if *w <= edge.weight => {}
                    _ => best = Some((name.clone(), opposite.clone(), edge.weight)),
                }
            }
        }

        match best {
            Some((u, v, w)) => {
                tree.add_vertex(v.clone());
                tree.add_edge(u, v, w).unwrap();
                weight += w;
            }
            None => {
                return Mst {
                    tree,
                    weight,
                    spanning: false,
                }
            }
        }
    }

    Mst {
        tree,
        weight,
        spanning: true,
    }
}

#[cfg(test)]
mod tests {
    use super::prim;
    use crate::mst::kruskal;
    use crate::graph::Graph;

    fn wheel() -> Graph<&'static str, i64> {
        let mut g = Graph::new();
        for v in ["a", "b", "c", "d", "e"].iter() {
            g.add_vertex(*v);
        }
        g.add_edge("a", "b", 4).unwrap();
        g.add_edge("a", "c", 8).unwrap();
        g.add_edge("b", "c", 11).unwrap();
        g.add_edge("b", "d", 2).unwrap();
        g.add_edge("c", "d", 7).unwrap();
        g.add_edge("c", "e", 1).unwrap();
        g.add_edge("d", "e", 6).unwrap();
        g
    }

    #[test]
    fn test_same_weight_as_kruskal() {
        let g = wheel();
        let p = prim(&g);
        let k = kruskal(&g);
        assert!(p.spanning && k.spanning);
        assert_eq!(p.weight, k.weight);
        assert_eq!(p.tree.num_edges(), 4);
    }

    #[test]
    fn test_disconnected() {
        let mut g = wheel();
        g.add_vertex("x");
        let mst = prim(&g);
        assert!(!mst.spanning);
        assert_eq!(mst.tree.num_vertices(), 5);
    }
}
