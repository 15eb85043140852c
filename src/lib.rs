//! **mazestep** is an incremental maze generation and route finding library.
//!
//! The maze builder (randomized depth-first search) and the maze solver
//! (A* with the Manhattan heuristic) both expose a non-blocking `step`
//! that does one unit of work per call, so a driver can pace them one
//! step per external tick and observe the algorithms in progress.

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod masks;
pub mod pathing;
pub mod session;
pub mod units;
mod utils;
