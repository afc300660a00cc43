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

//! A directed capacitated flow network.
//!
//! Vertices are named by strings because the flow algorithms
//! synthesize auxiliary vertices with reserved names (the
//! super-source `a'`, the super-sink `z'`, their `a''`/`z''`
//! counterparts of the initial-flow construction and one dummy `X'`
//! per throughput-restricted vertex `X`). Each ordered vertex pair
//! carries at most one arc and loops are forbidden; the arcs
//! themselves live in a single canonical map, the vertices only keep
//! predecessor/successor name sets.
//!
//! Every arc has a capacity, a minimum restriction, the current flow
//! and a cost per unit, with `restriction <= capacity` and
//! `0 <= flow <= capacity` enforced on insertion.

use std::collections::{BTreeMap, BTreeSet};

use num_traits::{Bounded, NumAssign, Signed};

use crate::digraph::Digraph;
use crate::error::{Error, Result};

/// Name of the synthetic super-source.
pub const SUPER_SOURCE: &str = "a'";
/// Name of the synthetic super-sink.
pub const SUPER_SINK: &str = "z'";
/// Source of the initial-feasible-flow construction.
pub(crate) const AUX_SOURCE: &str = "a''";
/// Sink of the initial-feasible-flow construction.
pub(crate) const AUX_SINK: &str = "z''";

const RESERVED: [&str; 4] = [SUPER_SOURCE, SUPER_SINK, AUX_SOURCE, AUX_SINK];

/// Residual capacities of a marginal network, keyed by the marginal
/// arc's endpoints and its orientation (`true` for a forward arc with
/// unused capacity, `false` for a backward arc with reducible flow).
pub type ResidualCapacities<E> = BTreeMap<(String, String, bool), E>;

/// An arc of a network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Arc<E> {
    pub capacity: E,
    pub restriction: E,
    pub flow: E,
    pub cost: E,
    pub source: String,
    pub terminus: String,
}

/// A vertex of a network.
///
/// The vertex stores only the names of its neighbors; the arcs are
/// looked up in the network's arc map.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Vertex {
    name: String,
    preds: BTreeSet<String>,
    succs: BTreeSet<String>,
}

impl Vertex {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn in_degree(&self) -> usize {
        self.preds.len()
    }

    pub fn out_degree(&self) -> usize {
        self.succs.len()
    }

    /// Names of the vertices with an arc into this one.
    pub fn preds(&self) -> impl Iterator<Item = &String> {
        self.preds.iter()
    }

    /// Names of the vertices this one has an arc to.
    pub fn succs(&self) -> impl Iterator<Item = &String> {
        self.succs.iter()
    }
}

/// Record of the synthetic structure added by
/// [`Network::apply_transformations`], consumed by
/// [`Network::revert_transformations`].
pub struct Transformations {
    /// Vertices that were split into `X` and a dummy `X'`.
    split: Vec<String>,
}

/// A directed capacitated flow network.
#[derive(Clone, PartialEq, Eq)]
pub struct Network<E> {
    vertices: BTreeMap<String, Vertex>,
    arcs: BTreeMap<(String, String), Arc<E>>,
    pub(crate) current_flow: E,
    pub(crate) current_cost: E,
}

impl<E> Network<E>
where
    E: NumAssign + Ord + Copy + Bounded,
{
    pub fn new() -> Self {
        Network {
            vertices: BTreeMap::new(),
            arcs: BTreeMap::new(),
            current_flow: E::zero(),
            current_cost: E::zero(),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_arcs(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Total flow routed by the last algorithm run on this network.
    pub fn current_flow(&self) -> E {
        self.current_flow
    }

    /// Total cost maintained by the minimum-cost-flow algorithms.
    pub fn current_cost(&self) -> E {
        self.current_cost
    }

    pub fn has_vertex(&self, name: &str) -> bool {
        self.vertices.contains_key(name)
    }

    pub fn vertex(&self, name: &str) -> Option<&Vertex> {
        self.vertices.get(name)
    }

    /// All vertices in name order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.vertices.values()
    }

    /// All arcs in `(source, terminus)` order.
    pub fn arcs(&self) -> impl Iterator<Item = &Arc<E>> {
        self.arcs.values()
    }

    pub fn arc(&self, source: &str, terminus: &str) -> Option<&Arc<E>> {
        self.arcs.get(&(source.to_owned(), terminus.to_owned()))
    }

    pub(crate) fn arc_mut(&mut self, source: &str, terminus: &str) -> Option<&mut Arc<E>> {
        self.arcs.get_mut(&(source.to_owned(), terminus.to_owned()))
    }

    /// The arcs leaving `name`.
    pub fn out_arcs(&self, name: &str) -> Vec<&Arc<E>> {
        match self.vertices.get(name) {
            Some(v) => v
                .succs
                .iter()
                .map(|t| &self.arcs[&(name.to_owned(), t.clone())])
                .collect(),
            None => vec![],
        }
    }

    /// The arcs entering `name`.
    pub fn in_arcs(&self, name: &str) -> Vec<&Arc<E>> {
        match self.vertices.get(name) {
            Some(v) => v
                .preds
                .iter()
                .map(|s| &self.arcs[&(s.clone(), name.to_owned())])
                .collect(),
            None => vec![],
        }
    }

    /// Sum of the flows on the arcs leaving `name`.
    pub fn out_flow(&self, name: &str) -> E {
        let mut sum = E::zero();
        for arc in self.out_arcs(name) {
            sum += arc.flow;
        }
        sum
    }

    /// Sum of the flows on the arcs entering `name`.
    pub fn in_flow(&self, name: &str) -> E {
        let mut sum = E::zero();
        for arc in self.in_arcs(name) {
            sum += arc.flow;
        }
        sum
    }

    /// Total cost of the current flow.
    pub fn total_cost(&self) -> E {
        let mut sum = E::zero();
        for arc in self.arcs.values() {
            sum += arc.flow * arc.cost;
        }
        sum
    }

    /// Add a vertex. Adding an existing vertex is a no-op.
    ///
    /// The reserved names `a'`, `z'`, `a''` and `z''` are synthesized
    /// by the flow algorithms and rejected here.
    pub fn add_vertex(&mut self, name: &str) -> Result<()> {
        if RESERVED.contains(&name) {
            return Err(Error::Invariant(format!("The vertex name {} is reserved.", name)));
        }
        self.insert_vertex(name);
        Ok(())
    }

    /// Add a synthetic vertex, which must not exist yet.
    pub(crate) fn add_synthetic_vertex(&mut self, name: &str) -> Result<()> {
        if self.vertices.contains_key(name) {
            return Err(Error::Invariant(format!("Vertex {} is already on the network.", name)));
        }
        self.insert_vertex(name);
        Ok(())
    }

    fn insert_vertex(&mut self, name: &str) {
        self.vertices.entry(name.to_owned()).or_insert_with(|| Vertex {
            name: name.to_owned(),
            preds: BTreeSet::new(),
            succs: BTreeSet::new(),
        });
    }

    /// Add an arc between two existing, distinct vertices.
    ///
    /// At most one arc per ordered vertex pair may exist. Capacity,
    /// restriction and flow must be non-negative, with
    /// `restriction <= capacity` and `flow <= capacity`.
    pub fn add_arc(
        &mut self,
        source: &str,
        terminus: &str,
        capacity: E,
        restriction: E,
        flow: E,
        cost: E,
    ) -> Result<()> {
        if !self.vertices.contains_key(source) {
            return Err(Error::Invariant(format!("Vertex {} is not on the network.", source)));
        }
        if !self.vertices.contains_key(terminus) {
            return Err(Error::Invariant(format!("Vertex {} is not on the network.", terminus)));
        }
        if source == terminus {
            return Err(Error::Invariant(format!("A loop on vertex {} is not allowed.", source)));
        }
        if self.arc(source, terminus).is_some() {
            return Err(Error::Invariant(format!(
                "There already is an edge between vertices {} and {}.",
                source, terminus
            )));
        }
        if capacity < E::zero() {
            return Err(Error::Invariant("The capacity of the edge can't be negative.".into()));
        }
        if restriction < E::zero() {
            return Err(Error::Invariant("The minimum restriction can't be negative.".into()));
        }
        if flow < E::zero() {
            return Err(Error::Invariant("The flow of the edge can't be negative.".into()));
        }
        if capacity < restriction {
            return Err(Error::Invariant(
                "The capacity of the edge can't be less than the restriction.".into(),
            ));
        }
        if capacity < flow {
            return Err(Error::Invariant(
                "The flow of the edge can't exceed its capacity.".into(),
            ));
        }

        self.insert_arc(Arc {
            capacity,
            restriction,
            flow,
            cost,
            source: source.to_owned(),
            terminus: terminus.to_owned(),
        });
        Ok(())
    }

    /// Insert a structurally valid arc without re-validation.
    fn insert_arc(&mut self, arc: Arc<E>) {
        let source = arc.source.clone();
        let terminus = arc.terminus.clone();
        self.vertices.get_mut(&source).unwrap().succs.insert(terminus.clone());
        self.vertices.get_mut(&terminus).unwrap().preds.insert(source.clone());
        self.arcs.insert((source, terminus), arc);
    }

    /// Remove and return the arc between `source` and `terminus`.
    pub(crate) fn remove_arc(&mut self, source: &str, terminus: &str) -> Option<Arc<E>> {
        let arc = self.arcs.remove(&(source.to_owned(), terminus.to_owned()))?;
        self.vertices.get_mut(source).unwrap().succs.remove(terminus);
        self.vertices.get_mut(terminus).unwrap().preds.remove(source);
        Some(arc)
    }

    /// Remove a vertex together with its incident arcs.
    pub(crate) fn remove_vertex(&mut self, name: &str) {
        let (preds, succs) = match self.vertices.get(name) {
            Some(v) => (
                v.preds.iter().cloned().collect::<Vec<_>>(),
                v.succs.iter().cloned().collect::<Vec<_>>(),
            ),
            None => return,
        };
        for p in preds {
            self.remove_arc(&p, name);
        }
        for s in succs {
            self.remove_arc(name, &s);
        }
        self.vertices.remove(name);
    }

    /// Reduce the network to a canonical single-source/single-sink
    /// problem without vertex bounds.
    ///
    /// Adds the super-source `a'` with an unbounded arc to every
    /// declared source (carrying the flow currently leaving it) and
    /// the super-sink `z'` symmetrically. Every vertex `X` with a
    /// throughput range `[lo, hi]` is split: a dummy `X'` takes over
    /// all outgoing arcs of `X` and the range becomes the arc
    /// `X -> X'` with capacity `hi`, restriction `lo` and the moved
    /// flow.
    ///
    /// The returned record undoes the reduction via
    /// [`revert_transformations`][Network::revert_transformations].
    pub fn apply_transformations(
        &mut self,
        sources: &[String],
        sinks: &[String],
        ranges: &BTreeMap<String, (E, E)>,
    ) -> Result<Transformations> {
        self.add_synthetic_vertex(SUPER_SOURCE)?;
        self.add_synthetic_vertex(SUPER_SINK)?;

        for s in sources {
            if !self.has_vertex(s) {
                return Err(Error::Invariant(format!("Vertex {} is not on the network.", s)));
            }
            let flow = self.out_flow(s);
            self.add_arc(SUPER_SOURCE, s, E::max_value(), E::zero(), flow, E::zero())?;
        }
        for t in sinks {
            if !self.has_vertex(t) {
                return Err(Error::Invariant(format!("Vertex {} is not on the network.", t)));
            }
            let flow = self.in_flow(t);
            self.add_arc(t, SUPER_SINK, E::max_value(), E::zero(), flow, E::zero())?;
        }

        let mut split = vec![];
        for (x, &(lo, hi)) in ranges {
            if !self.has_vertex(x) {
                return Err(Error::Invariant(format!("Vertex {} is not on the network.", x)));
            }
            if lo < E::zero() || hi < lo {
                return Err(Error::Invariant(format!("Invalid restrictions for vertex {}.", x)));
            }
            let dummy = format!("{}'", x);
            self.add_synthetic_vertex(&dummy)?;

            let succs: Vec<String> = self.vertices[x].succs.iter().cloned().collect();
            let mut moved = E::zero();
            for t in succs {
                let arc = self.remove_arc(x, &t).unwrap();
                moved += arc.flow;
                self.insert_arc(Arc {
                    source: dummy.clone(),
                    ..arc
                });
            }
            self.add_arc(x, &dummy, hi, lo, moved, E::zero())?;
            split.push(x.clone());
        }

        Ok(Transformations { split })
    }

    /// Undo [`apply_transformations`][Network::apply_transformations].
    ///
    /// Removes `a'` and `z'` with their arcs and merges every dummy
    /// `X'` back into `X`, preserving capacity, restriction, flow and
    /// cost of the moved arcs.
    pub fn revert_transformations(&mut self, transformations: &Transformations) {
        self.remove_vertex(SUPER_SOURCE);
        self.remove_vertex(SUPER_SINK);

        for x in &transformations.split {
            let dummy = format!("{}'", x);
            let succs: Vec<String> = match self.vertices.get(&dummy) {
                Some(v) => v.succs.iter().cloned().collect(),
                None => continue,
            };
            for t in succs {
                let arc = self.remove_arc(&dummy, &t).unwrap();
                self.insert_arc(Arc {
                    source: x.clone(),
                    ..arc
                });
            }
            self.remove_vertex(&dummy);
        }
    }

    /// Build the marginal (residual) network of the current flow.
    ///
    /// The result is a digraph whose arc weights are signed costs: a
    /// forward arc `u -> v` with weight `cost` where `flow <
    /// capacity` and a backward arc `v -> u` with weight `-cost`
    /// where `flow > restriction`. The residual capacities of the
    /// marginal arcs are returned in the side map.
    pub fn marginal(&self) -> (Digraph<String, E>, ResidualCapacities<E>)
    where
        E: Signed,
    {
        let mut dg = Digraph::new();
        for name in self.vertices.keys() {
            dg.add_vertex(name.clone());
        }

        let mut caps = BTreeMap::new();
        for arc in self.arcs.values() {
            if arc.flow < arc.capacity {
                dg.add_arc(arc.source.clone(), arc.terminus.clone(), arc.cost).unwrap();
                caps.insert(
                    (arc.source.clone(), arc.terminus.clone(), true),
                    arc.capacity - arc.flow,
                );
            }
            if arc.flow > arc.restriction {
                dg.add_arc(arc.terminus.clone(), arc.source.clone(), -arc.cost).unwrap();
                caps.insert(
                    (arc.terminus.clone(), arc.source.clone(), false),
                    arc.flow - arc.restriction,
                );
            }
        }
        (dg, caps)
    }
}

#[cfg(test)]
mod tests {
    use super::{Network, SUPER_SINK, SUPER_SOURCE};
    use std::collections::BTreeMap;

    fn diamond() -> Network<i64> {
        let mut net = Network::new();
        for v in ["s", "u", "v", "t"].iter() {
            net.add_vertex(v).unwrap();
        }
        net.add_arc("s", "u", 5, 0, 0, 1).unwrap();
        net.add_arc("s", "v", 5, 0, 0, 3).unwrap();
        net.add_arc("u", "t", 5, 0, 0, 1).unwrap();
        net.add_arc("v", "t", 5, 0, 0, 3).unwrap();
        net
    }

    #[test]
    fn test_validation() {
        let mut net = diamond();
        // loops, parallel arcs and reserved names are rejected
        assert!(net.add_arc("s", "s", 1, 0, 0, 0).is_err());
        assert!(net.add_arc("s", "u", 1, 0, 0, 0).is_err());
        assert!(net.add_vertex("a'").is_err());
        assert!(net.add_vertex("z''").is_err());
        // numeric preconditions
        assert!(net.add_arc("u", "v", -1, 0, 0, 0).is_err());
        assert!(net.add_arc("u", "v", 3, -1, 0, 0).is_err());
        assert!(net.add_arc("u", "v", 3, 4, 0, 0).is_err());
        assert!(net.add_arc("u", "v", 3, 0, 4, 0).is_err());
        assert!(net.add_arc("u", "v", 3, 0, 2, 0).is_ok());
    }

    #[test]
    fn test_transformations_round_trip() {
        let original = diamond();
        let mut net = original.clone();
        let sources = vec!["s".to_string()];
        let sinks = vec!["t".to_string()];

        let t = net.apply_transformations(&sources, &sinks, &BTreeMap::new()).unwrap();
        assert!(net.has_vertex(SUPER_SOURCE));
        assert!(net.has_vertex(SUPER_SINK));
        assert_eq!(net.arc(SUPER_SOURCE, "s").unwrap().capacity, i64::max_value());
        assert_eq!(net.arc("t", SUPER_SINK).unwrap().capacity, i64::max_value());

        net.revert_transformations(&t);
        assert!(net == original);
    }

    #[test]
    fn test_vertex_split() {
        let mut net = diamond();
        net.arc_mut("s", "u").unwrap().flow = 2;
        net.arc_mut("u", "t").unwrap().flow = 2;

        let sources = vec!["s".to_string()];
        let sinks = vec!["t".to_string()];
        let mut ranges = BTreeMap::new();
        ranges.insert("u".to_string(), (0, 4));

        let original = net.clone();
        let t = net.apply_transformations(&sources, &sinks, &ranges).unwrap();

        // outgoing arcs of u moved to the dummy, the range became an arc
        assert!(net.arc("u", "t").is_none());
        let moved = net.arc("u'", "t").unwrap();
        assert_eq!((moved.capacity, moved.flow), (5, 2));
        let bound = net.arc("u", "u'").unwrap();
        assert_eq!((bound.capacity, bound.restriction, bound.flow), (4, 0, 2));
        // the super arcs carry the flow already leaving/entering
        assert_eq!(net.arc(SUPER_SOURCE, "s").unwrap().flow, 2);
        assert_eq!(net.arc("t", SUPER_SINK).unwrap().flow, 2);

        net.revert_transformations(&t);
        assert!(net == original);
    }

    #[test]
    fn test_marginal() {
        let mut net = diamond();
        net.arc_mut("s", "u").unwrap().flow = 5;
        net.arc_mut("u", "t").unwrap().flow = 5;

        let (dg, caps) = net.marginal();
        // saturated arcs only appear backwards
        assert!(dg.out_arcs(&"s".to_string()).all(|a| a.terminus != "u"));
        assert_eq!(caps.get(&("u".to_string(), "s".to_string(), false)), Some(&5));
        assert_eq!(dg.arc_weight(&"u".to_string(), &"s".to_string()), Some(-1));
        // unused arcs only appear forwards
        assert_eq!(caps.get(&("s".to_string(), "v".to_string(), true)), Some(&5));
        assert_eq!(dg.arc_weight(&"s".to_string(), &"v".to_string()), Some(3));
        assert!(caps.get(&("v".to_string(), "s".to_string(), false)).is_none());
    }
}
