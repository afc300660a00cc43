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

//! Minimum-cost flows at a prescribed throughput.
//!
//! Two solvers are provided: cancellation of negative cycles on the
//! marginal network starting from any feasible routing, and
//! successive shortest path augmentation for networks without
//! minimum restrictions.

pub mod cyclecanceling;
pub mod shortestpaths;

pub use self::cyclecanceling::minimum_cost_flow;
pub use self::shortestpaths::minimum_cost_flow_with_shortest_paths;

use num_traits::{NumAssign, Signed};

use crate::error::{Error, Result};
use crate::network::ResidualCapacities;

/// Interpret one step along a marginal arc.
///
/// Returns whether the step increments the underlying arc (forward)
/// or decrements the reversed one (backward), and its residual
/// capacity. The sign of the marginal weight decides the direction; a
/// zero weight prefers the forward interpretation.
pub(crate) fn residual_step<E>(
    caps: &ResidualCapacities<E>,
    source: &str,
    terminus: &str,
    weight: E,
) -> Result<(bool, E)>
where
    E: NumAssign + Ord + Copy + Signed,
{
    let forward = caps
        .get(&(source.to_owned(), terminus.to_owned(), true))
        .map(|&c| (true, c));
    let backward = caps
        .get(&(source.to_owned(), terminus.to_owned(), false))
        .map(|&c| (false, c));

    let step = if weight > E::zero() {
        forward
    } else if weight < E::zero() {
        backward
    } else {
        forward.or(backward)
    };
    step.ok_or_else(|| {
        Error::Invariant(format!(
            "The marginal network has no residual arc between {} and {}.",
            source, terminus
        ))
    })
}
