// Copyright (c) 2020-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Writing results as line-oriented text documents.
//!
//! The first line names the document kind (`graph`, `digraph`,
//! `network` or `exception`), followed by a `vertex` and an `edges`
//! section with one space-separated record per line, an optional
//! `extra` section of informational lines and the terminator `end`.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::io::{self, Write};

use num_traits::{Bounded, NumAssign};

use crate::digraph::Digraph;
use crate::graph::Graph;
use crate::network::Network;

/// Write an undirected graph.
pub fn write_graph<W, E>(out: &mut W, g: &Graph<String, E>, extra: &[String]) -> io::Result<()>
where
    W: Write,
    E: Copy + Display,
{
    writeln!(out, "graph")?;
    writeln!(out, "vertex")?;
    for v in g.vertices() {
        writeln!(out, "{}", v.name())?;
    }
    writeln!(out, "edges")?;
    for e in g.edges() {
        writeln!(out, "{} {} {}", e.source, e.terminus, e.weight)?;
    }
    write_footer(out, extra)
}

/// Write a digraph. The identifier of each vertex doubles as its
/// display name.
pub fn write_digraph<W, E>(out: &mut W, g: &Digraph<String, E>, extra: &[String]) -> io::Result<()>
where
    W: Write,
    E: Copy + Display,
{
    writeln!(out, "digraph")?;
    writeln!(out, "vertex")?;
    for v in g.vertices() {
        writeln!(out, "{} {}", v.name(), v.name())?;
    }
    writeln!(out, "edges")?;
    for a in g.arcs() {
        writeln!(out, "{} {} {}", a.source, a.terminus, a.weight)?;
    }
    write_footer(out, extra)
}

/// Write a network.
///
/// Each vertex line has the form `name type r [min max] p
/// [production]`: the type is derived from the degrees (`source`
/// without in-arcs, `sink` without out-arcs, `pass` otherwise), the
/// optional values after the `r` and `p` markers echo the vertex
/// ranges and productions of the instance. A vertex with a range
/// never prints a production.
pub fn write_network<W, E>(
    out: &mut W,
    net: &Network<E>,
    ranges: &BTreeMap<String, (E, E)>,
    supplies: &BTreeMap<String, E>,
    extra: &[String],
) -> io::Result<()>
where
    W: Write,
    E: NumAssign + Ord + Copy + Bounded + Display,
{
    writeln!(out, "network")?;
    writeln!(out, "vertex")?;
    for v in net.vertices() {
        let kind = if v.in_degree() == 0 {
            "source"
        } else if v.out_degree() == 0 {
            "sink"
        } else {
            "pass"
        };
        write!(out, "{} {} r", v.name(), kind)?;
        if let Some((lo, hi)) = ranges.get(v.name()) {
            write!(out, " {} {}", lo, hi)?;
        }
        write!(out, " p")?;
        if !ranges.contains_key(v.name()) {
            if let Some(supply) = supplies.get(v.name()) {
                write!(out, " {}", supply)?;
            }
        }
        writeln!(out)?;
    }
    writeln!(out, "edges")?;
    for a in net.arcs() {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            a.source, a.terminus, a.capacity, a.restriction, a.flow, a.cost
        )?;
    }
    write_footer(out, extra)
}

/// Write an exception document carrying the error message.
pub fn write_exception<W>(out: &mut W, message: &str) -> io::Result<()>
where
    W: Write,
{
    writeln!(out, "exception")?;
    writeln!(out, "{}", message)
}

fn write_footer<W>(out: &mut W, extra: &[String]) -> io::Result<()>
where
    W: Write,
{
    if !extra.is_empty() {
        writeln!(out, "extra")?;
        for line in extra {
            writeln!(out, "{}", line)?;
        }
    }
    writeln!(out, "end")
}
