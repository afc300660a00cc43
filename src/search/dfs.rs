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

//! Depth-first-search, iterative and recursive.

use crate::graph::Graph;

/// Compute a depth-first expansion tree from the first vertex using
/// an explicit stack.
///
/// Returns the tree and whether it spans all vertices of the graph.
pub fn dfs_iterative<V, E>(g: &Graph<V, E>) -> (Graph<V, E>, bool)
where
    V: Clone + Ord,
    E: Copy,
{
    let mut tree = Graph::new();
    let root = match g.first_vertex() {
        Some(root) => root.clone(),
        None => return (tree, true),
    };

    let mut stack = vec![(root, None::<(V, E)>)];
    while let Some((u, parent)) = stack.pop() {
        if tree.has_vertex(&u) {
            continue;
        }
        tree.add_vertex(u.clone());
        let level = match parent {
            Some((p, w)) => {
                let level = tree.vertex(&p).unwrap().level() + 1;
                tree.add_edge(p, u.clone(), w).unwrap();
                level
            }
            None => 0,
        };
        tree.set_level(&u, level);

        for edge in g.vertex(&u).into_iter().flat_map(|v| v.edges()) {
            let w = edge.opposite(&u);
            if !tree.has_vertex(w) {
                stack.push((w.clone(), Some((u.clone(), edge.weight))));
            }
        }
    }

    let connected = tree.num_vertices() == g.num_vertices();
    (tree, connected)
}

/// Compute a depth-first expansion tree from the first vertex by
/// recursion.
///
/// Returns the tree and whether it spans all vertices of the graph.
pub fn dfs_recursive<V, E>(g: &Graph<V, E>) -> (Graph<V, E>, bool)
where
    V: Clone + Ord,
    E: Copy,
{
    let mut tree = Graph::new();
    if let Some(root) = g.first_vertex() {
        let root = root.clone();
        tree.add_vertex(root.clone());
        tree.set_level(&root, 0);
        visit(g, &root, 0, &mut tree);
    }

    let connected = tree.num_vertices() == g.num_vertices();
    (tree, connected)
}

fn visit<V, E>(g: &Graph<V, E>, u: &V, level: usize, tree: &mut Graph<V, E>)
where
    V: Clone + Ord,
    E: Copy,
{
    for edge in g.vertex(u).into_iter().flat_map(|v| v.edges()) {
        let w = edge.opposite(u);
        if !tree.has_vertex(w) {
            tree.add_vertex(w.clone());
            tree.set_level(w, level + 1);
            tree.add_edge(u.clone(), w.clone(), edge.weight).unwrap();
            visit(g, w, level + 1, tree);
        }
    }
}
