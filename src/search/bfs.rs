// Copyright (c) 2017, 2018, 2020, 2021 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Breadth-first-search.
//!
//! # Example
//!
//! ```
//! use graflow::search::bfs;
//! use graflow::Graph;
//!
//! let mut g = Graph::new();
//! for v in ["a", "b", "c"].iter() {
//!     g.add_vertex(*v);
//! }
//! g.add_edge("a", "b", 1).unwrap();
//! g.add_edge("a", "c", 1).unwrap();
//! g.add_edge("b", "c", 1).unwrap();
//!
//! let (tree, connected) = bfs(&g);
//! assert!(connected);
//! assert_eq!(tree.num_edges(), 2);
//! assert_eq!(tree.vertex(&"a").unwrap().level(), 0);
//! assert_eq!(tree.vertex(&"b").unwrap().level(), 1);
//! assert_eq!(tree.vertex(&"c").unwrap().level(), 1);
//! ```

use std::collections::VecDeque;

use crate::graph::Graph;

/// Compute the breadth-first expansion tree from the first vertex.
///
/// Returns the tree and whether it spans all vertices of the graph.
pub fn bfs<V, E>(g: &Graph<V, E>) -> (Graph<V, E>, bool)
where
    V: Clone + Ord,
    E: Copy,
{
    let mut tree = Graph::new();
    let root = match g.first_vertex() {
        Some(root) => root.clone(),
        None => return (tree, true),
    };

    tree.add_vertex(root.clone());
    tree.set_level(&root, 0);

    let mut queue = VecDeque::new();
    queue.push_back(root);

    while let Some(u) = queue.pop_front() {
        let level = tree.vertex(&u).unwrap().level();
        for edge in g.vertex(&u).into_iter().flat_map(|v| v.edges()) {
            let w = edge.opposite(&u);
            if !tree.has_vertex(w) {
                tree.add_vertex(w.clone());
                tree.set_level(w, level + 1);
                // errors are impossible, both endpoints were just added
                tree.add_edge(u.clone(), w.clone(), edge.weight).unwrap();
                queue.push_back(w.clone());
            }
        }
    }

    let connected = tree.num_vertices() == g.num_vertices();
    (tree, connected)
}
