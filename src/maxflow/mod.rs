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

//! Maximum flows with arc and vertex restrictions.

pub mod fordfulkerson;

pub use self::fordfulkerson::ford_fulkerson;

use crate::error::{Error, Result};

/// Check that the network has at least one source and one sink.
pub(crate) fn validate_endpoints(sources: &[String], sinks: &[String]) -> Result<()> {
    if sources.is_empty() {
        return Err(Error::Invariant("The network has no source.".into()));
    }
    if sinks.is_empty() {
        return Err(Error::Invariant("The network has no sink.".into()));
    }
    Ok(())
}
