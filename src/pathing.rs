use itertools::Itertools;

use crate::cells::{manhattan_distance, Cartesian2DCoordinate, CoordinateSmallVec, DIRECTIONS};
use crate::errors::*;
use crate::grid::{GridDisplay, Maze};
use crate::utils::{self, FnvHashMap, FnvHashSet};

/// Per-cell search bookkeeping. `h` is fixed at solver construction,
/// `g` and `parent` mutate as better routes are found. The parent is a
/// coordinate key back into the solver's node map rather than an aliased
/// pointer, keeping path reconstruction O(path length) without ownership
/// cycles.
#[derive(Debug, Clone)]
struct AStarNode {
    g: u32,
    h: u32,
    parent: Option<Cartesian2DCoordinate>,
}

impl AStarNode {
    fn f(&self) -> u32 {
        self.g + self.h
    }
}

/// Incremental A* over a carved maze, one node expansion per `step` call.
///
/// The open list is an insertion-ordered Vec scanned on every step. The
/// scan keeps the incumbent unless a candidate has equal-or-lower `f` and
/// strictly lower `h` - a deliberately goal-greedy tie-break kept from the
/// reference behaviour.
///
/// An unreachable goal is not an error: the solver finishes with
/// `solution()` still None once the open list drains.
pub struct AStarSolver {
    start: Cartesian2DCoordinate,
    goal: Cartesian2DCoordinate,
    nodes: FnvHashMap<Cartesian2DCoordinate, AStarNode>,
    open: Vec<Cartesian2DCoordinate>,
    closed: FnvHashSet<Cartesian2DCoordinate>,
    current: Option<Cartesian2DCoordinate>,
    tentative: Option<Vec<Cartesian2DCoordinate>>,
    solution: Option<Vec<Cartesian2DCoordinate>>,
    done: bool,
}

impl AStarSolver {
    /// Builds one search node for every existing cell up front.
    /// Fails with `OutOfBounds` if `start` or `goal` is not in the grid.
    pub fn new(maze: &Maze,
               start: Cartesian2DCoordinate,
               goal: Cartesian2DCoordinate)
               -> Result<AStarSolver> {
        if !maze.exists(start) {
            return Err(ErrorKind::OutOfBounds(start).into());
        }
        if !maze.exists(goal) {
            return Err(ErrorKind::OutOfBounds(goal).into());
        }

        let mut nodes = utils::fnv_hashmap(maze.size());
        for coord in maze.iter() {
            nodes.insert(coord,
                         AStarNode {
                             g: 0,
                             h: manhattan_distance(coord, goal),
                             parent: None,
                         });
        }

        Ok(AStarSolver {
            start,
            goal,
            nodes,
            open: vec![start],
            closed: utils::fnv_hashset(maze.size()),
            current: None,
            tentative: None,
            solution: None,
            done: false,
        })
    }

    /// Expand one node. Returns true when the search is finished - either
    /// the goal was dequeued (solution published) or the open list drained
    /// (no route exists). Further calls keep returning true.
    pub fn step(&mut self, maze: &Maze) -> bool {
        if self.done {
            return true;
        }
        if self.open.is_empty() {
            self.done = true;
            return true;
        }

        let current = self.open
            .iter()
            .cloned()
            .fold1(|incumbent, challenger| {
                let (i, c) = (&self.nodes[&incumbent], &self.nodes[&challenger]);
                if c.f() <= i.f() && c.h < i.h {
                    challenger
                } else {
                    incumbent
                }
            })
            .expect("open list checked non-empty");

        self.open.retain(|&coord| coord != current);
        self.closed.insert(current);
        self.current = Some(current);

        if current == self.goal {
            self.solution = Some(self.backtrack_path(self.goal));
            self.done = true;
            return true;
        }

        let current_g = self.nodes[&current].g;
        for neighbour in reachable_neighbours(maze, current) {
            if self.closed.contains(&neighbour) {
                continue;
            }
            let in_open = self.open.contains(&neighbour);
            let move_cost = current_g + manhattan_distance(current, neighbour);

            if let Some(node) = self.nodes.get_mut(&neighbour) {
                if move_cost < node.g || !in_open {
                    node.g = move_cost;
                    node.h = manhattan_distance(neighbour, self.goal);
                    node.parent = Some(current);
                    if !in_open {
                        self.open.push(neighbour);
                    }
                }
            }
        }

        self.tentative = Some(self.backtrack_path(current));
        false
    }

    /// Follow parent links from `from` back to (but not including) the
    /// start, reversed into start-to-`from` order. Stops early on a cell
    /// with no parent yet, which can only happen for tentative paths.
    fn backtrack_path(&self, from: Cartesian2DCoordinate) -> Vec<Cartesian2DCoordinate> {
        let mut path = vec![];
        let mut coord = from;
        while coord != self.start {
            path.push(coord);
            match self.nodes[&coord].parent {
                Some(parent) => coord = parent,
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// The most recently expanded coordinate, for progress display.
    pub fn current_position(&self) -> Option<Cartesian2DCoordinate> {
        self.current
    }

    /// Best-guess route from just after the start to the search frontier.
    /// Recomputed on every step that does not finish the search.
    pub fn tentative_path(&self) -> Option<&[Cartesian2DCoordinate]> {
        self.tentative.as_ref().map(|path| path.as_slice())
    }

    /// The shortest route from just after the start to the goal, published
    /// exactly once when the goal is dequeued. None while in progress and
    /// None forever if the goal is unreachable.
    pub fn solution(&self) -> Option<&[Cartesian2DCoordinate]> {
        self.solution.as_ref().map(|path| path.as_slice())
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

/// Cells adjacent to `coord` with the connecting wall cleared.
fn reachable_neighbours(maze: &Maze, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
    DIRECTIONS.iter()
        .filter_map(|&dir| {
            if maze.is_passage(coord, dir) {
                maze.neighbour_at_direction(coord, dir)
            } else {
                None
            }
        })
        .collect()
}

/// Run an A* search to completion in one call, returning the path if the
/// goal is reachable.
pub fn shortest_path(maze: &Maze,
                     start: Cartesian2DCoordinate,
                     goal: Cartesian2DCoordinate)
                     -> Result<Option<Vec<Cartesian2DCoordinate>>> {
    let mut solver = AStarSolver::new(maze, start, goal)?;
    while !solver.step(maze) {}
    Ok(solver.solution().map(|path| path.to_vec()))
}

/// Marks the cells of a path in a text rendered maze.
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<Cartesian2DCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[Cartesian2DCoordinate]) -> Self {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}
