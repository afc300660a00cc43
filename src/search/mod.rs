// Copyright (c) 2017-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Expansion trees by breadth- and depth-first search.
//!
//! Each search starts at the first vertex of the graph and returns
//! the expansion tree together with a flag telling whether the tree
//! spans the whole graph. The tree records the search level of every
//! reached vertex, the root has level 0 and each child the level of
//! its parent plus one.

pub mod bfs;
pub mod dfs;

pub use self::bfs::bfs;
pub use self::dfs::{dfs_iterative, dfs_recursive};
