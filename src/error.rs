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

//! Common error type of the library.

use std::error;
use std::fmt;
use std::io;

/// Error returned by the algorithms and the file adaptors.
#[derive(Debug)]
pub enum Error {
    /// A precondition on the input structure is violated (missing
    /// vertex, odd degree, parallel arc, negative capacity, ...).
    Invariant(String),
    /// The problem has no solution.
    Infeasible(String),
    /// A negative cycle has been detected where the algorithm
    /// requires none.
    NegativeCycle,
    /// An underlying I/O operation failed.
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::Io(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> std::result::Result<(), fmt::Error> {
        use self::Error::*;
        match self {
            Invariant(msg) => write!(fmt, "{}", msg),
            Infeasible(msg) => write!(fmt, "{}", msg),
            NegativeCycle => write!(fmt, "A negative cycle was found."),
            Io(err) => err.fmt(fmt),
        }
    }
}

impl error::Error for Error {
    fn cause(&self) -> Option<&dyn error::Error> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
