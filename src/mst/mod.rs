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

//! Minimum spanning trees.

pub mod kruskal;
pub mod prim;

pub use self::kruskal::kruskal;
pub use self::prim::prim;

use crate::graph::Graph;

/// Result of a minimum-spanning-tree computation.
pub struct Mst<V, E> {
    /// The tree, or the partial tree if the graph is disconnected.
    pub tree: Graph<V, E>,
    /// Total weight of the tree edges.
    pub weight: E,
    /// `true` iff the tree spans all vertices of the input graph.
    pub spanning: bool,
}
