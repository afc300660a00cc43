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

//! Reading node-link JSON documents.
//!
//! The documents are single objects with a `nodes` and a `links`
//! array as produced by common graph libraries; all other top-level
//! keys are ignored. Graph and digraph links carry a `weight`
//! (default 1). Network links carry `weight` (the capacity),
//! `restriction`, `flow` and `cost` (default 0); network nodes may
//! declare a `type` of `source` or `sink`, a throughput range as
//! `min_flow`/`max_flow` or a production/demand as `flow`.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;

use num_traits::{Bounded, FromPrimitive, NumAssign};
use serde_derive::Deserialize;

use crate::digraph::Digraph;
use crate::error::{Error, Result};
use crate::graph::Graph;
use crate::network::Network;

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    links: Vec<Link>,
}

#[derive(Deserialize)]
struct Node {
    id: String,
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    min_flow: Option<i64>,
    #[serde(default)]
    max_flow: Option<i64>,
    #[serde(default)]
    flow: Option<i64>,
}

#[derive(Deserialize)]
struct Link {
    source: String,
    target: String,
    #[serde(default)]
    weight: Option<i64>,
    #[serde(default)]
    restriction: Option<i64>,
    #[serde(default)]
    flow: Option<i64>,
    #[serde(default)]
    cost: Option<i64>,
}

/// A network together with the side structures of its description:
/// declared sources and sinks, per-vertex throughput ranges and
/// per-vertex productions or demands.
pub struct NetworkInstance<E> {
    pub network: Network<E>,
    pub sources: Vec<String>,
    pub sinks: Vec<String>,
    pub ranges: BTreeMap<String, (E, E)>,
    pub supplies: BTreeMap<String, E>,
}

fn load(path: &str) -> Result<Document> {
    let file = File::open(path)?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| Error::Invariant(format!("Invalid node-link document: {}", err)))
}

fn convert<E>(value: i64) -> Result<E>
where
    E: FromPrimitive,
{
    E::from_i64(value).ok_or_else(|| Error::Invariant(format!("The value {} is out of range.", value)))
}

/// Read an undirected graph.
pub fn read_graph<E>(path: &str) -> Result<Graph<String, E>>
where
    E: Copy + FromPrimitive,
{
    let doc = load(path)?;
    let mut g = Graph::new();
    for node in &doc.nodes {
        g.add_vertex(node.id.clone());
    }
    for link in &doc.links {
        let weight = convert(link.weight.unwrap_or(1))?;
        g.add_edge(link.source.clone(), link.target.clone(), weight)?;
    }
    Ok(g)
}

/// Read a digraph.
pub fn read_digraph<E>(path: &str) -> Result<Digraph<String, E>>
where
    E: Copy + FromPrimitive,
{
    let doc = load(path)?;
    let mut g = Digraph::new();
    for node in &doc.nodes {
        g.add_vertex(node.id.clone());
    }
    for link in &doc.links {
        let weight = convert(link.weight.unwrap_or(1))?;
        g.add_arc(link.source.clone(), link.target.clone(), weight)?;
    }
    Ok(g)
}

/// Read a network and its side structures.
pub fn read_network<E>(path: &str) -> Result<NetworkInstance<E>>
where
    E: NumAssign + Ord + Copy + Bounded + FromPrimitive,
{
    let doc = load(path)?;
    let mut network = Network::new();
    let mut sources = vec![];
    let mut sinks = vec![];
    let mut ranges = BTreeMap::new();
    let mut supplies = BTreeMap::new();

    for node in &doc.nodes {
        network.add_vertex(&node.id)?;
        match node.kind.as_deref() {
            Some("source") => sources.push(node.id.clone()),
            Some("sink") => sinks.push(node.id.clone()),
            _ => {}
        }
        if let (Some(lo), Some(hi)) = (node.min_flow, node.max_flow) {
            ranges.insert(node.id.clone(), (convert(lo)?, convert(hi)?));
        } else if let Some(flow) = node.flow {
            supplies.insert(node.id.clone(), convert(flow)?);
        }
    }

    for link in &doc.links {
        network.add_arc(
            &link.source,
            &link.target,
            convert(link.weight.unwrap_or(1))?,
            convert(link.restriction.unwrap_or(0))?,
            convert(link.flow.unwrap_or(0))?,
            convert(link.cost.unwrap_or(0))?,
        )?;
    }

    Ok(NetworkInstance {
        network,
        sources,
        sinks,
        ranges,
        supplies,
    })
}

#[cfg(test)]
mod tests {
    use super::{read_graph, read_network};
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> String {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path.to_string_lossy().to_string()
    }

    #[test]
    fn test_read_graph() {
        let path = write_temp(
            "nodelink_graph.json",
            r#"{"directed": false, "multigraph": false, "graph": {},
                "nodes": [{"id": "a"}, {"id": "b"}, {"id": "c"}],
                "links": [{"source": "a", "target": "b", "weight": 3},
                          {"source": "b", "target": "c"}]}"#,
        );
        let g = read_graph::<i64>(&path).unwrap();
        assert_eq!(g.num_vertices(), 3);
        assert_eq!(g.num_edges(), 2);
        // missing weights default to 1
        let weights: Vec<i64> = g.edges().map(|e| e.weight).collect();
        assert!(weights.contains(&3) && weights.contains(&1));
    }

    #[test]
    fn test_read_network() {
        let path = write_temp(
            "nodelink_network.json",
            r#"{"nodes": [{"id": "s", "type": "source", "flow": 7},
                          {"id": "v", "type": "pass", "min_flow": 0, "max_flow": 4},
                          {"id": "t", "type": "sink"}],
                "links": [{"source": "s", "target": "v", "weight": 10, "restriction": 0, "flow": 0, "cost": 2},
                          {"source": "v", "target": "t", "weight": 10}]}"#,
        );
        let inst = read_network::<i64>(&path).unwrap();
        assert_eq!(inst.sources, vec!["s".to_string()]);
        assert_eq!(inst.sinks, vec!["t".to_string()]);
        assert_eq!(inst.ranges.get("v"), Some(&(0, 4)));
        assert_eq!(inst.supplies.get("s"), Some(&7));
        assert_eq!(inst.network.num_arcs(), 2);
        assert_eq!(inst.network.arc("s", "v").unwrap().cost, 2);
        assert_eq!(inst.network.arc("v", "t").unwrap().capacity, 10);
    }

    #[test]
    fn test_reserved_name_rejected() {
        let path = write_temp(
            "nodelink_reserved.json",
            r#"{"nodes": [{"id": "a'"}], "links": []}"#,
        );
        assert!(read_network::<i64>(&path).is_err());
    }

    #[test]
    fn test_malformed() {
        let path = write_temp("nodelink_bad.json", "{not json");
        assert!(read_graph::<i64>(&path).is_err());
    }
}
