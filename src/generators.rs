use rand::{self, Rng, ThreadRng};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, GridDirection, DIRECTIONS};
use crate::errors::*;
use crate::grid::Maze;
use crate::utils::{self, FnvHashSet};

type CandidateSmallVec = SmallVec<[(GridDirection, Cartesian2DCoordinate); 4]>;

/// Incremental randomized depth-first-search maze carver.
///
/// Each `step` call does one unit of work: carve a passage into an
/// unvisited neighbour, or backtrack one stack entry when boxed in.
/// Once the stack empties the carved structure is a perfect maze - every
/// existing cell reachable from the start, with no cycles.
///
/// The grid is lent per call and must be the one the builder was created
/// for; the builder never holds the borrow between steps so a driver can
/// freely read the grid for rendering in between.
pub struct RecursiveBacktracker {
    current: Cartesian2DCoordinate,
    visited: FnvHashSet<Cartesian2DCoordinate>,
    stack: Vec<Cartesian2DCoordinate>,
    rng: ThreadRng,
}

impl RecursiveBacktracker {
    /// Fails with `OutOfBounds` if `start` does not exist in the grid.
    pub fn new(maze: &Maze, start: Cartesian2DCoordinate) -> Result<RecursiveBacktracker> {
        if !maze.exists(start) {
            return Err(ErrorKind::OutOfBounds(start).into());
        }

        let mut visited = utils::fnv_hashset(maze.size());
        visited.insert(start);

        Ok(RecursiveBacktracker {
            current: start,
            visited,
            stack: vec![start],
            rng: rand::thread_rng(),
        })
    }

    /// Perform one carving move. Returns true once generation is complete;
    /// further calls keep returning true without touching the grid.
    ///
    /// Fails with `OutOfBounds` only when stepped against a grid other than
    /// the one it was constructed for.
    pub fn step(&mut self, maze: &mut Maze) -> Result<bool> {
        if self.stack.is_empty() {
            return Ok(true);
        }

        let candidates = self.unvisited_neighbours(maze);
        if candidates.is_empty() {
            // Boxed in: retreat one entry along the visited history.
            if let Some(top) = self.stack.pop() {
                self.current = top;
            }
        } else {
            let (dir, next) = candidates[self.rng.gen::<usize>() % candidates.len()];
            maze.clear_wall(self.current, dir)?;
            self.current = next;
            self.visited.insert(next);
            self.stack.push(next);
        }

        Ok(false)
    }

    /// Directions from `current` whose wall is still up and whose neighbour
    /// exists and has not been visited.
    fn unvisited_neighbours(&self, maze: &Maze) -> CandidateSmallVec {
        let mut candidates = CandidateSmallVec::new();
        let walls = match maze.walls(self.current) {
            Some(walls) => walls,
            None => return candidates,
        };

        for &dir in DIRECTIONS.iter() {
            if !walls[dir.wall_index()] {
                continue;
            }
            if let Some(neighbour) = maze.neighbour_at_direction(self.current, dir) {
                if !self.visited.contains(&neighbour) {
                    candidates.push((dir, neighbour));
                }
            }
        }
        candidates
    }

    /// The carving cursor - top of the backtracking stack.
    pub fn current_position(&self) -> Cartesian2DCoordinate {
        self.current
    }

    pub fn visited(&self) -> &FnvHashSet<Cartesian2DCoordinate> {
        &self.visited
    }

    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Run the recursive backtracker to completion in one call, for callers
/// that have no use for the incremental stepping.
pub fn recursive_backtracker(maze: &mut Maze, start: Cartesian2DCoordinate) -> Result<()> {
    let mut builder = RecursiveBacktracker::new(maze, start)?;
    while !builder.step(maze)? {}
    Ok(())
}
