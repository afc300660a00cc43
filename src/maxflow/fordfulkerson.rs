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

//! The labeling max-flow algorithm of Ford and Fulkerson.
//!
//! The solver works on the canonical reduction produced by
//! [`Network::apply_transformations`]: a single super-source `a'`,
//! a single super-sink `z'` and no vertex bounds. Arc minimum
//! restrictions are absorbed first by constructing an initial
//! feasible flow over an auxiliary network with a second
//! source/sink pair `a''`/`z''`.
//!
//! During the search every vertex is in one of three states per
//! iteration: unset, touched (labeled but not examined) or examined.
//! A touched vertex labels its unset neighbors -- forward over
//! out-arcs with unused capacity, backward over in-arcs with flow
//! above the restriction -- until the sink is touched and the chain
//! is augmented, or no touched vertex remains.
//!
//! # Example
//!
//! ```
//! use graflow::maxflow::ford_fulkerson;
//! use graflow::Network;
//! use std::collections::BTreeMap;
//!
//! let mut net = Network::new();
//! for v in ["s", "v", "t"].iter() {
//!     net.add_vertex(v).unwrap();
//! }
//! net.add_arc("s", "v", 10, 0, 0, 0).unwrap();
//! net.add_arc("v", "t", 10, 0, 0, 0).unwrap();
//!
//! // vertex v lets at most 4 units through
//! let mut ranges = BTreeMap::new();
//! ranges.insert("v".to_string(), (0, 4));
//!
//! let flow = ford_fulkerson(&net, &["s".to_string()], &["t".to_string()], &ranges).unwrap();
//! assert_eq!(flow.current_flow(), 4);
//! assert!(!flow.has_vertex("v'"));
//! ```

use std::cmp::min;
use std::collections::{BTreeMap, BTreeSet};

use either::Either::{self, Left, Right};
use num_traits::{Bounded, NumAssign};

use crate::error::{Error, Result};
use crate::maxflow::validate_endpoints;
use crate::network::{Network, AUX_SINK, AUX_SOURCE, SUPER_SINK, SUPER_SOURCE};

/// Solve the max-flow problem on a network with arc restrictions and
/// vertex throughput ranges.
///
/// The network is reduced to a single-source/single-sink problem, an
/// initial feasible flow absorbing the arc restrictions is
/// constructed, the labeling loop augments until no chain remains and
/// the reduction is reverted. The returned network carries the
/// resulting flow on its arcs and in
/// [`current_flow`][Network::current_flow].
///
/// Fails with an invariant error if there is no source or no sink and
/// with an infeasibility error if the restrictions cannot be
/// satisfied.
pub fn ford_fulkerson<E>(
    net: &Network<E>,
    sources: &[String],
    sinks: &[String],
    ranges: &BTreeMap<String, (E, E)>,
) -> Result<Network<E>>
where
    E: NumAssign + Ord + Copy + Bounded,
{
    validate_endpoints(sources, sinks)?;

    let mut work = net.clone();
    let transformations = work.apply_transformations(sources, sinks, ranges)?;
    solve(&mut work, None)?;
    work.revert_transformations(&transformations);
    Ok(work)
}

/// Run the initial-flow construction and the labeling loop on an
/// already transformed network.
pub(crate) fn solve<E>(net: &mut Network<E>, target: Option<E>) -> Result<()>
where
    E: NumAssign + Ord + Copy + Bounded,
{
    find_initial_flow(net)?;
    net.current_flow = net.out_flow(SUPER_SOURCE);
    augment(net, SUPER_SOURCE, SUPER_SINK, target)
}

/// The labeling loop.
///
/// Augments along labeled chains from `src` to `snk` until no chain
/// exists or, with a `target`, until the network's current flow
/// reaches it. Each augmentation is clamped to the remaining target.
pub(crate) fn augment<E>(net: &mut Network<E>, src: &str, snk: &str, target: Option<E>) -> Result<()>
where
    E: NumAssign + Ord + Copy + Bounded,
{
    loop {
        if let Some(t) = target {
            if net.current_flow >= t {
                return Ok(());
            }
        }

        // mark and chain capacity of the labeled vertices; the source
        // has no mark
        let mut labels: BTreeMap<String, (Option<Either<String, String>>, E)> = BTreeMap::new();
        labels.insert(src.to_owned(), (None, E::max_value()));
        let mut examined: BTreeSet<String> = BTreeSet::new();
        let mut reached = false;

        while !reached {
            let u = match labels.keys().find(|name| !examined.contains(*name)) {
                Some(u) => u.clone(),
                None => break,
            };
            let ucap = labels[&u].1;

            let mut found: Vec<(String, Either<String, String>, E)> = vec![];
            for arc in net.out_arcs(&u) {
                if !labels.contains_key(&arc.terminus) && arc.flow < arc.capacity {
                    found.push((
                        arc.terminus.clone(),
                        Left(u.clone()),
                        min(ucap, arc.capacity - arc.flow),
                    ));
                }
            }
            for arc in net.in_arcs(&u) {
                if !labels.contains_key(&arc.source) && arc.flow > arc.restriction {
                    found.push((
                        arc.source.clone(),
                        Right(u.clone()),
                        min(ucap, arc.flow - arc.restriction),
                    ));
                }
            }

            for (name, mark, cap) in found {
                if name == snk {
                    reached = true;
                }
                labels.entry(name).or_insert((Some(mark), cap));
            }
            examined.insert(u);
        }

        if !reached {
            return Ok(());
        }

        let mut delta = labels[snk].1;
        if let Some(t) = target {
            delta = min(delta, t - net.current_flow);
        }

        // walk the chain back to the source, incrementing forward and
        // decrementing backward arcs
        let mut v = snk.to_owned();
        while let (Some(mark), _) = labels[&v].clone() {
            match mark {
                Left(p) => {
                    net.arc_mut(&p, &v).unwrap().flow += delta;
                    v = p;
                }
                Right(p) => {
                    net.arc_mut(&v, &p).unwrap().flow -= delta;
                    v = p;
                }
            }
        }
        net.current_flow += delta;
    }
}

/// Construct an initial flow satisfying all arc minimum restrictions.
///
/// Works on a transformed network. An auxiliary source `a''` and sink
/// `z''` are added together with circulation arcs between `a'` and
/// `z'`; every restricted arc temporarily loses its restriction and
/// the corresponding capacity, while `X -> z''` and `a'' -> X` arcs
/// carry the summed restrictions. A saturating max flow from `a''` to
/// `z''` exists iff the restrictions are satisfiable; its flow is
/// then distributed back onto the restricted arcs and the auxiliary
/// structure is removed.
pub(crate) fn find_initial_flow<E>(net: &mut Network<E>) -> Result<()>
where
    E: NumAssign + Ord + Copy + Bounded,
{
    let restricted: Vec<(String, String, E)> = net
        .arcs()
        .filter(|a| a.restriction > E::zero())
        .map(|a| (a.source.clone(), a.terminus.clone(), a.restriction))
        .collect();
    if restricted.is_empty() {
        return Ok(());
    }

    net.add_synthetic_vertex(AUX_SOURCE)?;
    net.add_synthetic_vertex(AUX_SINK)?;
    net.add_arc(SUPER_SOURCE, SUPER_SINK, E::max_value(), E::zero(), E::zero(), E::zero())?;
    net.add_arc(SUPER_SINK, SUPER_SOURCE, E::max_value(), E::zero(), E::zero(), E::zero())?;

    let mut out_restrictions: BTreeMap<String, E> = BTreeMap::new();
    let mut in_restrictions: BTreeMap<String, E> = BTreeMap::new();
    for (u, v, r) in &restricted {
        let arc = net.arc_mut(u, v).unwrap();
        arc.capacity -= *r;
        arc.restriction = E::zero();
        *out_restrictions.entry(u.clone()).or_insert_with(E::zero) += *r;
        *in_restrictions.entry(v.clone()).or_insert_with(E::zero) += *r;
    }
    for (u, sum) in &out_restrictions {
        net.add_arc(u, AUX_SINK, *sum, E::zero(), E::zero(), E::zero())?;
    }
    for (v, sum) in &in_restrictions {
        net.add_arc(AUX_SOURCE, v, *sum, E::zero(), E::zero(), E::zero())?;
    }

    net.current_flow = E::zero();
    augment(net, AUX_SOURCE, AUX_SINK, None)?;

    if net.out_arcs(AUX_SOURCE).iter().any(|a| a.flow < a.capacity) {
        return Err(Error::Infeasible(
            "The minimum restrictions of the network can't be satisfied.".into(),
        ));
    }

    // restore the restrictions and their share of the capacity
    for (u, v, r) in &restricted {
        let arc = net.arc_mut(u, v).unwrap();
        arc.capacity += *r;
        arc.restriction = *r;
    }

    // distribute the auxiliary flow back onto the restricted arcs
    let mut assigned: BTreeMap<(String, String), E> = BTreeMap::new();
    for u in out_restrictions.keys() {
        let mut remaining = net.arc(u, AUX_SINK).unwrap().flow;
        let succs: Vec<String> = net.vertex(u).unwrap().succs().cloned().collect();
        for t in succs {
            if remaining <= E::zero() {
                break;
            }
            let already = assigned.get(&(u.clone(), t.clone())).copied().unwrap_or_else(E::zero);
            let arc = net.arc_mut(u, &t).unwrap();
            if arc.restriction <= E::zero() {
                continue;
            }
            let add = min(arc.restriction - already, min(remaining, arc.capacity - arc.flow));
            if add > E::zero() {
                arc.flow += add;
                remaining -= add;
                *assigned.entry((u.clone(), t.clone())).or_insert_with(E::zero) += add;
            }
        }
    }
    for v in in_restrictions.keys() {
        let mut remaining = net.arc(AUX_SOURCE, v).unwrap().flow;
        let preds: Vec<String> = net.vertex(v).unwrap().preds().cloned().collect();
        for s in preds {
            if remaining <= E::zero() {
                break;
            }
            let already = assigned.get(&(s.clone(), v.clone())).copied().unwrap_or_else(E::zero);
            let arc = net.arc_mut(&s, v).unwrap();
            if arc.restriction <= E::zero() {
                continue;
            }
            let add = min(arc.restriction - already, min(remaining, arc.capacity - arc.flow));
            if add > E::zero() {
                arc.flow += add;
                remaining -= add;
                *assigned.entry((s.clone(), v.clone())).or_insert_with(E::zero) += add;
            }
        }
    }

    net.remove_vertex(AUX_SOURCE);
    net.remove_vertex(AUX_SINK);
    net.remove_arc(SUPER_SOURCE, SUPER_SINK);
    net.remove_arc(SUPER_SINK, SUPER_SOURCE);
    net.current_flow = E::zero();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ford_fulkerson;
    use crate::network::Network;
    use std::collections::BTreeMap;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn conservation(net: &Network<i64>, sources: &[String], sinks: &[String]) {
        for v in net.vertices() {
            let name = v.name().to_string();
            if sources.contains(&name) || sinks.contains(&name) {
                continue;
            }
            assert_eq!(net.in_flow(&name), net.out_flow(&name), "vertex {}", name);
        }
    }

    #[test]
    fn test_classic_maxflow() {
        let mut net = Network::new();
        for v in ["s", "a", "b", "t"].iter() {
            net.add_vertex(v).unwrap();
        }
        net.add_arc("s", "a", 4, 0, 0, 0).unwrap();
        net.add_arc("s", "b", 2, 0, 0, 0).unwrap();
        net.add_arc("a", "b", 3, 0, 0, 0).unwrap();
        net.add_arc("a", "t", 1, 0, 0, 0).unwrap();
        net.add_arc("b", "t", 6, 0, 0, 0).unwrap();

        let sources = names(&["s"]);
        let sinks = names(&["t"]);
        let flow = ford_fulkerson(&net, &sources, &sinks, &BTreeMap::new()).unwrap();
        assert_eq!(flow.current_flow(), 6);
        conservation(&flow, &sources, &sinks);
        for arc in flow.arcs() {
            assert!(arc.flow >= arc.restriction && arc.flow <= arc.capacity);
        }
    }

    #[test]
    fn test_backward_arc_needed() {
        // the loaded flow routes s-a-b-t; reaching the maximum
        // requires decrementing a-b through its backward label
        let mut net = Network::new();
        for v in ["s", "a", "b", "t"].iter() {
            net.add_vertex(v).unwrap();
        }
        net.add_arc("s", "a", 1, 0, 1, 0).unwrap();
        net.add_arc("a", "b", 1, 0, 1, 0).unwrap();
        net.add_arc("b", "t", 1, 0, 1, 0).unwrap();
        net.add_arc("a", "t", 1, 0, 0, 0).unwrap();
        net.add_arc("s", "b", 1, 0, 0, 0).unwrap();

        let sources = names(&["s"]);
        let sinks = names(&["t"]);
        let flow = ford_fulkerson(&net, &sources, &sinks, &BTreeMap::new()).unwrap();
        assert_eq!(flow.current_flow(), 2);
        assert_eq!(flow.arc("a", "b").unwrap().flow, 0);
        conservation(&flow, &sources, &sinks);
    }

    #[test]
    fn test_multiple_sources_and_sinks() {
        let mut net = Network::new();
        for v in ["p", "q", "m", "x", "y"].iter() {
            net.add_vertex(v).unwrap();
        }
        net.add_arc("p", "m", 3, 0, 0, 0).unwrap();
        net.add_arc("q", "m", 2, 0, 0, 0).unwrap();
        net.add_arc("m", "x", 4, 0, 0, 0).unwrap();
        net.add_arc("m", "y", 4, 0, 0, 0).unwrap();

        let sources = names(&["p", "q"]);
        let sinks = names(&["x", "y"]);
        let flow = ford_fulkerson(&net, &sources, &sinks, &BTreeMap::new()).unwrap();
        assert_eq!(flow.current_flow(), 5);
        conservation(&flow, &sources, &sinks);
    }

    #[test]
    fn test_vertex_range() {
        let mut net = Network::new();
        for v in ["s", "v", "t"].iter() {
            net.add_vertex(v).unwrap();
        }
        net.add_arc("s", "v", 10, 0, 0, 0).unwrap();
        net.add_arc("v", "t", 10, 0, 0, 0).unwrap();

        let mut ranges = BTreeMap::new();
        ranges.insert("v".to_string(), (0, 4));

        let flow = ford_fulkerson(&net, &names(&["s"]), &names(&["t"]), &ranges).unwrap();
        assert_eq!(flow.current_flow(), 4);
        // the dummy vertex of the reduction must not survive
        assert!(!flow.has_vertex("v'"));
        assert_eq!(flow.num_vertices(), 3);
        assert_eq!(flow.arc("s", "v").unwrap().flow, 4);
        assert_eq!(flow.arc("v", "t").unwrap().flow, 4);
    }

    #[test]
    fn test_arc_restriction() {
        // the lower bound on s-b forces flow off the cheap path
        let mut net = Network::new();
        for v in ["s", "a", "b", "t"].iter() {
            net.add_vertex(v).unwrap();
        }
        net.add_arc("s", "a", 4, 0, 0, 0).unwrap();
        net.add_arc("s", "b", 4, 2, 0, 0).unwrap();
        net.add_arc("a", "t", 4, 0, 0, 0).unwrap();
        net.add_arc("b", "t", 4, 0, 0, 0).unwrap();

        let sources = names(&["s"]);
        let sinks = names(&["t"]);
        let flow = ford_fulkerson(&net, &sources, &sinks, &BTreeMap::new()).unwrap();
        assert_eq!(flow.current_flow(), 8);
        assert!(flow.arc("s", "b").unwrap().flow >= 2);
        conservation(&flow, &sources, &sinks);
    }

    #[test]
    fn test_infeasible_restriction() {
        // the restriction demands more than the downstream capacity
        let mut net = Network::new();
        for v in ["s", "m", "t"].iter() {
            net.add_vertex(v).unwrap();
        }
        net.add_arc("s", "m", 5, 4, 0, 0).unwrap();
        net.add_arc("m", "t", 2, 0, 0, 0).unwrap();

        let result = ford_fulkerson(&net, &names(&["s"]), &names(&["t"]), &BTreeMap::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_no_sources() {
        let net = Network::<i64>::new();
        assert!(ford_fulkerson(&net, &[], &names(&["t"]), &BTreeMap::new()).is_err());
        assert!(ford_fulkerson(&net, &names(&["s"]), &[], &BTreeMap::new()).is_err());
    }
}
