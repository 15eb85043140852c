//! Error, ErrorKind, ResultExt and Result types for the crate, as generated
//! by `error_chain!`.
//!
//! Note a goal that the solver cannot reach is *not* an error: it shows up
//! as a finished solver with no solution.

use crate::cells::Cartesian2DCoordinate;
use error_chain::*;

error_chain! {
    errors {
        /// A wall clear or search was requested on a coordinate that does not
        /// exist in the grid. A caller defect rather than a recoverable
        /// condition.
        OutOfBounds(coord: Cartesian2DCoordinate) {
            description("grid coordinate out of bounds")
            display("grid coordinate ({}, {}) does not exist in the grid", coord.x, coord.y)
        }
    }
}
