// Copyright (c) 2016, 2017, 2018, 2020, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! All-Pairs-Shortest-Path algorithm of Floyd and Warshall.

use std::collections::BTreeMap;

use num_traits::{Bounded, NumAssign};

use crate::digraph::Digraph;
use crate::error::{Error, Result};

/// Entry of the route table: predecessor index and distance.
#[derive(Clone, Copy)]
struct Route<E> {
    previous: usize,
    dist: E,
}

/// The dense all-pairs route table.
///
/// Unreachable pairs carry the maximum value of `E` as distance.
pub struct RouteTable<V, E> {
    nodes: Vec<V>,
    index: BTreeMap<V, usize>,
    routes: Vec<Vec<Route<E>>>,
}

/// Solve the All-Pairs-Shortest-Path problem with the algorithm of
/// Floyd and Warshall.
///
/// Negative arc weights are allowed; a negative cycle makes some
/// diagonal entry improvable and fails with
/// [`Error::NegativeCycle`].
///
/// # Example
///
/// ```
/// use graflow::shortestpath::floyd_warshall;
/// use graflow::Digraph;
///
/// let mut g = Digraph::new();
/// for v in ["a", "b", "c"].iter() {
///     g.add_vertex(*v);
/// }
/// g.add_arc("a", "b", 3).unwrap();
/// g.add_arc("b", "c", -1).unwrap();
/// g.add_arc("a", "c", 5).unwrap();
///
/// let routes = floyd_warshall(&g).unwrap();
/// assert_eq!(routes.dist(&"a", &"c"), Some(2));
/// let (path, dist) = routes.retrieve_path(&"a", &"c").unwrap();
/// assert_eq!(path, vec!["a", "b", "c"]);
/// assert_eq!(dist, 2);
/// ```
pub fn floyd_warshall<V, E>(g: &Digraph<V, E>) -> Result<RouteTable<V, E>>
where
    V: Clone + Ord,
    E: NumAssign + Ord + Copy + Bounded,
{
    let inf = E::max_value();
    let nodes: Vec<V> = g.vertices().map(|v| v.name().clone()).collect();
    let index: BTreeMap<V, usize> = nodes.iter().cloned().enumerate().map(|(i, v)| (v, i)).collect();
    let n = nodes.len();

    let mut routes: Vec<Vec<Route<E>>> = (0..n)
        .map(|i| (0..n).map(|_| Route { previous: i, dist: inf }).collect())
        .collect();
    for (i, row) in routes.iter_mut().enumerate() {
        row[i].dist = E::zero();
    }

    for arc in g.arcs() {
        let i = index[&arc.source];
        let j = index[&arc.terminus];
        if i == j {
            if arc.weight < E::zero() {
                return Err(Error::NegativeCycle);
            }
            continue;
        }
        if arc.weight < routes[i][j].dist {
            routes[i][j] = Route {
                previous: i,
                dist: arc.weight,
            };
        }
    }

    for k in 0..n {
        for i in 0..n {
            if i == k || routes[i][k].dist == inf {
                continue;
            }
            let dist_ik = routes[i][k].dist;
            for j in 0..n {
                if j == k || routes[k][j].dist == inf {
                    continue;
                }
                let nd = dist_ik + routes[k][j].dist;
                if nd < routes[i][j].dist {
                    if i == j {
                        return Err(Error::NegativeCycle);
                    }
                    routes[i][j] = Route {
                        previous: routes[k][j].previous,
                        dist: nd,
                    };
                }
            }
        }
    }

    Ok(RouteTable { nodes, index, routes })
}

impl<V, E> RouteTable<V, E>
where
    V: Clone + Ord,
    E: NumAssign + Ord + Copy + Bounded,
{
    /// The shortest distance from `a` to `b`, `None` if unreachable
    /// or unknown.
    pub fn dist(&self, a: &V, b: &V) -> Option<E> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        let d = self.routes[i][j].dist;
        if d == E::max_value() {
            None
        } else {
            Some(d)
        }
    }

    /// The shortest path from `a` to `b` as a vertex sequence
    /// together with its length.
    ///
    /// Returns `None` if `b` is not reachable from `a`.
    pub fn retrieve_path(&self, a: &V, b: &V) -> Option<(Vec<V>, E)> {
        let i = *self.index.get(a)?;
        let j = *self.index.get(b)?;
        if self.routes[i][j].dist == E::max_value() {
            return None;
        }

        let mut path = vec![];
        let mut cur = j;
        while cur != i {
            path.push(self.nodes[cur].clone());
            cur = self.routes[i][cur].previous;
        }
        path.push(self.nodes[i].clone());
        path.reverse();
        Some((path, self.routes[i][j].dist))
    }

    /// The shortest path arborescence of every vertex.
    ///
    /// For each root the returned digraph contains all reachable
    /// vertices and the arc `previous -> u` for every reachable
    /// target `u`, weighted as in the original digraph.
    pub fn arborescences(&self, g: &Digraph<V, E>) -> Vec<(V, Digraph<V, E>)> {
        let mut trees = vec![];
        for (i, root) in self.nodes.iter().enumerate() {
            let mut tree = Digraph::new();
            tree.add_vertex(root.clone());
            for (j, target) in self.nodes.iter().enumerate() {
                if j == i || self.routes[i][j].dist == E::max_value() {
                    continue;
                }
                tree.add_vertex(target.clone());
            }
            for (j, target) in self.nodes.iter().enumerate() {
                if j == i || self.routes[i][j].dist == E::max_value() {
                    continue;
                }
                let prev = &self.nodes[self.routes[i][j].previous];
                let weight = g.arc_weight(prev, target).unwrap();
                tree.add_arc(prev.clone(), target.clone(), weight).unwrap();
            }
            trees.push((root.clone(), tree));
        }
        trees
    }
}

#[cfg(test)]
mod tests {
    use super::floyd_warshall;
    use crate::digraph::Digraph;
    use crate::error::Error;

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

    #[test]
    fn test_distances() {
        let g = digraph(
            &["a", "b", "c", "d"],
            &[
                ("a", "b", 5),
                ("a", "d", 10),
                ("b", "c", 3),
                ("c", "d", 1),
                ("d", "a", 2),
            ],
        );
        let routes = floyd_warshall(&g).unwrap();
        assert_eq!(routes.dist(&"a", &"c"), Some(8));
        assert_eq!(routes.dist(&"a", &"d"), Some(9));
        assert_eq!(routes.dist(&"d", &"c"), Some(10));
        assert_eq!(routes.dist(&"a", &"a"), Some(0));
    }

    #[test]
    fn test_path_length_matches_dist() {
        let g = digraph(
            &["a", "b", "c", "d"],
            &[("a", "b", 2), ("b", "c", 2), ("a", "c", 5), ("c", "d", 1)],
        );
        let routes = floyd_warshall(&g).unwrap();
        let (path, dist) = routes.retrieve_path(&"a", &"d").unwrap();
        assert_eq!(path, vec!["a", "b", "c", "d"]);

        let mut sum = 0;
        for pair in path.windows(2) {
            sum += g.arc_weight(&pair[0], &pair[1]).unwrap();
        }
        assert_eq!(sum, dist);
    }

    #[test]
    fn test_unreachable() {
        let g = digraph(&["a", "b", "c"], &[("a", "b", 1)]);
        let routes = floyd_warshall(&g).unwrap();
        assert_eq!(routes.retrieve_path(&"a", &"c"), None);
        assert_eq!(routes.dist(&"c", &"a"), None);
    }

    #[test]
    fn test_negative_cycle() {
        let g = digraph(&["a", "b", "c"], &[("a", "b", 1), ("b", "c", -3), ("c", "a", 1)]);
        match floyd_warshall(&g) {
            Err(Error::NegativeCycle) => {}
            _ => panic!("expected a negative cycle error"),
        }
    }

    #[test]
    fn test_arborescences() {
        let g = digraph(&["a", "b", "c"], &[("a", "b", 1), ("b", "c", 2), ("a", "c", 4)]);
        let routes = floyd_warshall(&g).unwrap();
        let trees = routes.arborescences(&g);
        assert_eq!(trees.len(), 3);

        let (root, tree) = &trees[0];
        assert_eq!(*root, "a");
        assert_eq!(tree.num_vertices(), 3);
        assert_eq!(tree.num_arcs(), 2);
        assert_eq!(tree.arc_weight(&"b", &"c"), Some(2));

        // c has no outgoing arcs, its tree is trivial
        let (_, tree) = &trees[2];
        assert_eq!(tree.num_vertices(), 1);
        assert_eq!(tree.num_arcs(), 0);
    }
}
