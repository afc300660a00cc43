// Copyright (c) 2018-2022 Frank Fischer <frank-fischer@shadow-soft.de>
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

//! Minimum-cost flow by successive shortest paths.

use std::cmp::min;
use std::collections::BTreeMap;

use num_traits::{Bounded, NumAssign, Signed};

use crate::error::{Error, Result};
use crate::maxflow::validate_endpoints;
use crate::mcf::residual_step;
use crate::network::{Network, SUPER_SINK, SUPER_SOURCE};
use crate::shortestpath::{dijkstra, DijkstraResult};

/// Route `target` units at minimum total cost by augmenting along
/// shortest residual paths.
///
/// Starting from the zero flow, each round computes a shortest path
/// from `a'` to `z'` in the marginal network and pushes the smaller
/// of its bottleneck residual capacity and the remaining target along
/// it. The flow built this way is cost-optimal at every intermediate
/// throughput.
///
/// The second value of the result is `false` if the target cannot be
/// reached, because `z'` became unreachable or a negative cycle
/// turned up in the marginal network; the partially routed flow is
/// returned nevertheless.
///
/// Unlike [`minimum_cost_flow`][crate::mcf::minimum_cost_flow] this
/// algorithm supports no minimum restrictions, neither on arcs nor as
/// lower vertex bounds.
pub fn minimum_cost_flow_with_shortest_paths<E>(
    net: &Network<E>,
    sources: &[String],
    sinks: &[String],
    ranges: &BTreeMap<String, (E, E)>,
    target: E,
) -> Result<(Network<E>, bool)>
where
    E: NumAssign + Ord + Copy + Bounded + Signed,
{
    validate_endpoints(sources, sinks)?;
    if net.arcs().any(|a| a.restriction > E::zero())
        || ranges.values().any(|&(lo, _)| lo > E::zero())
    {
        return Err(Error::Invariant(
            "Minimum restrictions are not supported by the shortest path algorithm.".into(),
        ));
    }

    let mut work = net.clone();

    // start from the trivial zero flow
    let keys: Vec<(String, String)> = work.arcs().map(|a| (a.source.clone(), a.terminus.clone())).collect();
    for (u, v) in &keys {
        work.arc_mut(u, v).unwrap().flow = E::zero();
    }
    work.current_flow = E::zero();
    work.current_cost = E::zero();

    let transformations = work.apply_transformations(sources, sinks, ranges)?;
    let root = SUPER_SOURCE.to_string();
    let mut solution_found = true;

    while work.current_flow < target {
        let (marginal, caps) = work.marginal();
        let shortest = match dijkstra(&marginal, &root)? {
            DijkstraResult::Tree(tree) => tree,
            DijkstraResult::NegativeCycle(_) => {
                solution_found = false;
                break;
            }
        };
        let dist = match shortest.dist.get(SUPER_SINK) {
            Some(&d) if d != E::max_value() => d,
            _ => {
                solution_found = false;
                break;
            }
        };

        // walk the predecessors back from z' to a'
        let mut path = vec![];
        let mut v = SUPER_SINK.to_string();
        while v != SUPER_SOURCE {
            let p = shortest.pred[&v].clone();
            let w = shortest.tree.arc_weight(&p, &v).unwrap();
            path.push((p.clone(), v, w));
            v = p;
        }

        let mut delta = target - work.current_flow;
        let mut steps = vec![];
        for (p, v, w) in &path {
            let (forward, cap) = residual_step(&caps, p, v, *w)?;
            delta = min(delta, cap);
            steps.push((p.clone(), v.clone(), forward));
        }

        for (x, y, forward) in steps {
            if forward {
                work.arc_mut(&x, &y).unwrap().flow += delta;
            } else {
                work.arc_mut(&y, &x).unwrap().flow -= delta;
            }
        }
        work.current_flow += delta;
        work.current_cost += delta * dist;
    }

    work.revert_transformations(&transformations);
    Ok((work, solution_found))
}
