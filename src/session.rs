use crate::cells::Cartesian2DCoordinate;
use crate::errors::*;
use crate::generators::RecursiveBacktracker;
use crate::grid::Maze;
use crate::masks::RectMask;
use crate::pathing::AStarSolver;
use crate::units::{Height, Width};

/// The three stages of a maze session. Transitions happen inside
/// `Session::tick`, never inside the builder or solver themselves:
/// Building until the carver finishes, Solving until the search finishes,
/// then Waiting forever.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Building,
    Solving,
    Waiting,
}

/// Owns the grid and both algorithm engines and paces them one step per
/// `tick`. The grid is lent to the builder (mutably) and the solver
/// (immutably) per call; the two phases never overlap so the solver only
/// ever sees the finished maze.
pub struct Session {
    maze: Maze,
    builder: RecursiveBacktracker,
    solver: Option<AStarSolver>,
    phase: Phase,
    start: Cartesian2DCoordinate,
    goal: Cartesian2DCoordinate,
}

impl Session {
    /// Fails with `OutOfBounds` if `start` or `goal` falls outside the grid
    /// or inside the masked hole.
    pub fn new(width: Width,
               height: Height,
               mask: Option<&RectMask>,
               start: Cartesian2DCoordinate,
               goal: Cartesian2DCoordinate)
               -> Result<Session> {
        let maze = Maze::with_mask(width, height, mask);
        if !maze.exists(goal) {
            return Err(ErrorKind::OutOfBounds(goal).into());
        }
        let builder = RecursiveBacktracker::new(&maze, start)?;

        Ok(Session {
            maze,
            builder,
            solver: None,
            phase: Phase::Building,
            start,
            goal,
        })
    }

    /// Advance the active engine by exactly one step and return the phase
    /// in force afterwards. Ticking a Waiting session is a no-op.
    pub fn tick(&mut self) -> Result<Phase> {
        match self.phase {
            Phase::Building => {
                if self.builder.step(&mut self.maze)? {
                    self.solver = Some(AStarSolver::new(&self.maze, self.start, self.goal)?);
                    self.phase = Phase::Solving;
                }
            }
            Phase::Solving => {
                let solver = self.solver
                    .as_mut()
                    .expect("solver is constructed on entering the solving phase");
                if solver.step(&self.maze) {
                    self.phase = Phase::Waiting;
                }
            }
            Phase::Waiting => {}
        }
        Ok(self.phase)
    }

    /// Tick until the session reaches Waiting.
    pub fn run_to_completion(&mut self) -> Result<()> {
        while self.tick()? != Phase::Waiting {}
        Ok(())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn builder(&self) -> &RecursiveBacktracker {
        &self.builder
    }

    /// None until the building phase has finished.
    pub fn solver(&self) -> Option<&AStarSolver> {
        self.solver.as_ref()
    }

    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start
    }

    pub fn goal(&self) -> Cartesian2DCoordinate {
        self.goal
    }

    /// The solved route, once the session is Waiting and a route exists.
    pub fn solution(&self) -> Option<&[Cartesian2DCoordinate]> {
        self.solver.as_ref().and_then(|solver| solver.solution())
    }
}
