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

//! Minimum-cost flow by negative-cycle cancellation.
//!
//! # Example
//!
//! ```
//! use graflow::mcf::minimum_cost_flow;
//! use graflow::Network;
//! use std::collections::BTreeMap;
//!
//! // two source-sink paths of capacity 5 with costs 1 and 3
//! let mut net = Network::new();
//! for v in ["s", "u", "v", "t"].iter() {
//!     net.add_vertex(v).unwrap();
//! }
//! net.add_arc("s", "u", 5, 0, 0, 1).unwrap();
//! net.add_arc("u", "t", 5, 0, 0, 0).unwrap();
//! net.add_arc("s", "v", 5, 0, 0, 3).unwrap();
//! net.add_arc("v", "t", 5, 0, 0, 0).unwrap();
//!
//! let flow = minimum_cost_flow(
//!     &net,
//!     &["s".to_string()],
//!     &["t".to_string()],
//!     &BTreeMap::new(),
//!     7,
//! )
//! .unwrap();
//! assert_eq!(flow.current_flow(), 7);
//! assert_eq!(flow.current_cost(), 5 * 1 + 2 * 3);
//! ```

use std::cmp::min;
use std::collections::BTreeMap;

use num_traits::{Bounded, NumAssign, Signed};

use crate::error::{Error, Result};
use crate::maxflow::{self, validate_endpoints};
use crate::mcf::residual_step;
use crate::network::Network;
use crate::shortestpath::{dijkstra, DijkstraResult};

/// Route `target` units at minimum total cost.
///
/// A feasible routing of `target` units is produced by the
/// Ford-Fulkerson solver (honoring arc restrictions and vertex
/// ranges); the routing is then improved by repeatedly building the
/// marginal network, looking for a negative cycle with the
/// generalized Dijkstra algorithm from every vertex in turn and
/// pushing the bottleneck residual capacity around each cycle found.
/// When no vertex reports a cycle anymore the routing is
/// cost-optimal.
///
/// Fails with an infeasibility error if `target` units cannot be
/// routed.
pub fn minimum_cost_flow<E>(
    net: &Network<E>,
    sources: &[String],
    sinks: &[String],
    ranges: &BTreeMap<String, (E, E)>,
    target: E,
) -> Result<Network<E>>
where
    E: NumAssign + Ord + Copy + Bounded + Signed,
{
    validate_endpoints(sources, sinks)?;

    let mut work = net.clone();
    let transformations = work.apply_transformations(sources, sinks, ranges)?;
    maxflow::fordfulkerson::solve(&mut work, Some(target))?;
    if work.current_flow() != target {
        return Err(Error::Infeasible("The target flow is not reachable.".into()));
    }
    work.current_cost = work.total_cost();

    loop {
        let (marginal, caps) = work.marginal();
        let roots: Vec<String> = marginal.vertices().map(|v| v.name().clone()).collect();

        let mut found = None;
        for root in &roots {
            match dijkstra(&marginal, root)? {
                DijkstraResult::NegativeCycle(cycle) => {
                    found = Some(cycle);
                    break;
                }
                DijkstraResult::Tree(_) => {}
            }
        }
        let cycle = match found {
            Some(cycle) => cycle,
            None => break,
        };

        // bottleneck residual capacity and cost around the cycle
        let mut steps = vec![];
        let mut delta = E::max_value();
        let mut unit_cost = E::zero();
        for arc in cycle.arcs() {
            let (forward, cap) = residual_step(&caps, &arc.source, &arc.terminus, arc.weight)?;
            delta = min(delta, cap);
            unit_cost += arc.weight;
            steps.push((arc.source.clone(), arc.terminus.clone(), forward));
        }

        for (x, y, forward) in steps {
            if forward {
                work.arc_mut(&x, &y).unwrap().flow += delta;
            } else {
                work.arc_mut(&y, &x).unwrap().flow -= delta;
            }
        }
        work.current_cost += delta * unit_cost;
    }

    work.revert_transformations(&transformations);
    Ok(work)
}

#[cfg(test)]
mod tests {
    use super::minimum_cost_flow;
    use crate::network::Network;
    use crate::shortestpath::{dijkstra, DijkstraResult};
    use std::collections::BTreeMap;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn two_paths() -> Network<i64> {
        let mut net = Network::new();
        for v in ["s", "u", "v", "t"].iter() {
            net.add_vertex(v).unwrap();
        }
        net.add_arc("s", "u", 5, 0, 0, 1).unwrap();
        net.add_arc("u", "t", 5, 0, 0, 0).unwrap();
        net.add_arc("s", "v", 5, 0, 0, 3).unwrap();
        net.add_arc("v", "t", 5, 0, 0, 0).unwrap();
        net
    }

    #[test]
    fn test_two_paths() {
        let net = two_paths();
        let flow = minimum_cost_flow(&net, &names(&["s"]), &names(&["t"]), &BTreeMap::new(), 7).unwrap();
        assert_eq!(flow.current_flow(), 7);
        assert_eq!(flow.current_cost(), 11);
        assert_eq!(flow.arc("s", "u").unwrap().flow, 5);
        assert_eq!(flow.arc("s", "v").unwrap().flow, 2);
    }

    #[test]
    fn test_no_residual_negative_cycle() {
        let net = two_paths();
        let flow = minimum_cost_flow(&net, &names(&["s"]), &names(&["t"]), &BTreeMap::new(), 7).unwrap();

        let (marginal, _) = flow.marginal();
        for v in marginal.vertices() {
            match dijkstra(&marginal, v.name()).unwrap() {
                DijkstraResult::Tree(_) => {}
                DijkstraResult::NegativeCycle(_) => panic!("the final flow admits a negative cycle"),
            }
        }
    }

    #[test]
    fn test_infeasible_target() {
        let net = two_paths();
        let result = minimum_cost_flow(&net, &names(&["s"]), &names(&["t"]), &BTreeMap::new(), 11);
        assert!(result.is_err());
    }

    #[test]
    fn test_cost_matches_arc_flows() {
        let mut net = two_paths();
        net.add_arc("u", "v", 2, 0, 0, 1).unwrap();
        let flow = minimum_cost_flow(&net, &names(&["s"]), &names(&["t"]), &BTreeMap::new(), 6).unwrap();
        assert_eq!(flow.current_flow(), 6);
        assert_eq!(flow.current_cost(), flow.total_cost());
    }
}
