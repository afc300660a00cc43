// Copyright (c) 2019-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Euler circuits with Fleury's algorithm.
//!
//! The circuit is returned as a digraph whose arcs are numbered
//! `1, 2, ...` in traversal order, so walking the arcs by increasing
//! weight reproduces the circuit.
//!
//! # Example
//!
//! ```
//! use graflow::euler::fleury;
//! use graflow::Graph;
//!
//! let mut g = Graph::new();
//! for v in ["a", "b", "c", "d"].iter() {
//!     g.add_vertex(*v);
//! }
//! g.add_edge("a", "b", 1).unwrap();
//! g.add_edge("b", "c", 1).unwrap();
//! g.add_edge("c", "d", 1).unwrap();
//! g.add_edge("d", "a", 1).unwrap();
//!
//! let (circuit, connected) = fleury(&g).unwrap();
//! assert!(connected);
//! assert_eq!(circuit.num_arcs(), 4);
//!
//! let mut arcs: Vec<_> = circuit.arcs().collect();
//! arcs.sort_by_key(|a| a.weight);
//! for pair in arcs.windows(2) {
//!     assert_eq!(pair[0].terminus, pair[1].source);
//! }
//! assert_eq!(arcs[0].source, arcs[3].terminus);
//! ```

use std::collections::BTreeSet;

use num_traits::NumAssign;

use crate::digraph::Digraph;
use crate::error::{Error, Result};
use crate::graph::Graph;

/// Construct an Euler circuit of the graph with Fleury's algorithm.
///
/// The walk starts at the first vertex and keeps two structures: a
/// stack of vertices of the current free walk and a queue collecting
/// vertices whose remaining edges are exhausted. From the current
/// vertex an edge whose opposite endpoint still has degree greater
/// than 1 is preferred, so bridges are kept for last; traversed edges
/// are removed from a working copy. The circuit is the queue followed
/// by the remaining stack top to bottom, with sequential arc numbers
/// laid between consecutive vertices.
///
/// The second value is `true` iff the circuit visited every vertex
/// and consumed every edge.
///
/// Fails if the graph is empty or some vertex has odd degree.
pub fn fleury<V, E>(g: &Graph<V, E>) -> Result<(Digraph<V, E>, bool)>
where
    V: Clone + Ord,
    E: NumAssign + Copy,
{
    if g.is_empty() {
        return Err(Error::Invariant("The graph is empty.".into()));
    }
    if g.vertices().any(|v| v.degree() % 2 != 0) {
        return Err(Error::Invariant(
            "The graph has a vertex of odd degree, no Euler circuit exists.".into(),
        ));
    }

    let mut work = g.clone();
    let start = work.first_vertex().unwrap().clone();

    let mut stack = vec![start.clone()];
    let mut circuit = vec![];
    let mut visited = BTreeSet::new();
    visited.insert(start);

    while let Some(u) = stack.last().cloned() {
        let vert = work.vertex(&u).unwrap();
        let choice = vert
            .edges()
            .find(|e| work.degree(e.opposite(&u)) > 1)
            .or_else(|| vert.edges().next())
            .map(|e| e.opposite(&u).clone());

        match choice {
            Some(v) => {
                work.remove_edge(&u, &v)?;
                visited.insert(v.clone());
                stack.push(v);
            }
            None => {
                stack.pop();
                circuit.push(u);
            }
        }
    }

    let connected = visited.len() == g.num_vertices() && work.num_edges() == 0;

    let mut result = Digraph::new();
    for v in &circuit {
        result.add_vertex(v.clone());
    }
    let mut seq = E::one();
    for pair in circuit.windows(2) {
        result.add_arc(pair[0].clone(), pair[1].clone(), seq)?;
        seq += E::one();
    }

    Ok((result, connected))
}

#[cfg(test)]
mod tests {
    use super::fleury;
    use crate::graph::Graph;

    fn graph(vertices: &[&'static str], edges: &[(&'static str, &'static str)]) -> Graph<&'static str, i64> {
        let mut g = Graph::new();
        for v in vertices {
            g.add_vertex(*v);
        }
        for &(u, v) in edges {
            g.add_edge(u, v, 1).unwrap();
        }
        g
    }

    fn walked_pairs(circuit: &crate::Digraph<&'static str, i64>) -> Vec<(&'static str, &'static str)> {
        let mut arcs: Vec<_> = circuit.arcs().collect();
        arcs.sort_by_key(|a| a.weight);
        for pair in arcs.windows(2) {
            assert_eq!(pair[0].terminus, pair[1].source);
        }
        arcs.iter()
            .map(|a| {
                if a.source <= a.terminus {
                    (a.source, a.terminus)
                } else {
                    (a.terminus, a.source)
                }
            })
            .collect()
    }

    #[test]
    fn test_two_triangles() {
        // figure-eight: both triangles share c, which is a cut vertex
        let g = graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "d"), ("d", "e"), ("e", "c")],
        );
        let (circuit, connected) = fleury(&g).unwrap();
        assert!(connected);
        assert_eq!(circuit.num_arcs(), 6);

        // every vertex is passed as often as it is left
        for v in circuit.vertices() {
            assert_eq!(v.in_degree(), v.out_degree());
        }

        let mut pairs = walked_pairs(&circuit);
        pairs.sort();
        assert_eq!(
            pairs,
            vec![("a", "b"), ("a", "c"), ("b", "c"), ("c", "d"), ("c", "e"), ("d", "e")]
        );
    }

    #[test]
    fn test_loop_edge() {
        let g = graph(&["a", "b"], &[("a", "b"), ("b", "a"), ("b", "b")]);
        let (circuit, connected) = fleury(&g).unwrap();
        assert!(connected);
        assert_eq!(circuit.num_arcs(), 3);
        let pairs = walked_pairs(&circuit);
        assert!(pairs.contains(&("b", "b")));
    }

    #[test]
    fn test_odd_degree() {
        let g = graph(&["a", "b"], &[("a", "b")]);
        assert!(fleury(&g).is_err());
    }

    #[test]
    fn test_empty() {
        let g = Graph::<&'static str, i64>::new();
        assert!(fleury(&g).is_err());
    }

    #[test]
    fn test_disconnected() {
        let g = graph(
            &["a", "b", "c", "x", "y", "z"],
            &[("a", "b"), ("b", "c"), ("c", "a"), ("x", "y"), ("y", "z"), ("z", "x")],
        );
        let (circuit, connected) = fleury(&g).unwrap();
        assert!(!connected);
        assert_eq!(circuit.num_arcs(), 3);
    }
}
