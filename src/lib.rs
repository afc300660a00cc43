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

//! A library for graph, digraph and flow network algorithms.
//!
//! Three data structures are provided: an undirected weighted
//! [`Graph`], a directed weighted [`Digraph`] and a capacitated
//! [`Network`] with per-arc restrictions, flows and costs. The
//! algorithm modules cover Euler circuits, spanning tree searches,
//! minimum spanning trees, shortest paths with negative arcs,
//! maximum flows with arc and vertex restrictions and minimum-cost
//! flows.

// # Data structures

pub mod error;
pub use self::error::{Error, Result};

pub mod collections;

pub mod graph;
pub use self::graph::Graph;

pub mod digraph;
pub use self::digraph::Digraph;

pub mod network;
pub use self::network::Network;

// # Algorithms

pub mod euler;
pub mod maxflow;
pub mod mcf;
pub mod mst;
pub mod search;
pub mod shortestpath;

// # File formats

pub mod nodelink;
pub mod report;
