use docopt::Docopt;
use serde_derive::Deserialize;

use mazestep::{
    cells::Cartesian2DCoordinate,
    masks::RectMask,
    pathing::PathDisplay,
    session::{Phase, Session},
    units::{Height, Width},
};

const USAGE: &str = "Mazestep

Carves a random perfect maze step by step, then solves it with A* step by
step, and prints the result.

Usage:
    mazestep_driver -h | --help
    mazestep_driver [--grid-width=<w> --grid-height=<h>] [--hole-x=<x> --hole-y=<y> --hole-width=<hw> --hole-height=<hh>] [--start-x=<x> --start-y=<y>] [--goal-x=<x> --goal-y=<y>] [--show-steps]

Options:
    -h --help           Show this screen.
    --grid-width=<w>    The grid width in cells [default: 30].
    --grid-height=<h>   The grid height in cells [default: 40].
    --hole-x=<x>        Left column of a rectangle of excluded cells [default: 0].
    --hole-y=<y>        Top row of a rectangle of excluded cells [default: 0].
    --hole-width=<hw>   Width of the excluded rectangle [default: 0].
    --hole-height=<hh>  Height of the excluded rectangle [default: 0].
    --start-x=<x>       x coordinate of the route start. Defaults to the top right corner.
    --start-y=<y>       y coordinate of the route start.
    --goal-x=<x>        x coordinate of the route goal. Defaults to the bottom left corner.
    --goal-y=<y>        y coordinate of the route goal.
    --show-steps        Print how many steps the building and solving phases took.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_hole_x: u32,
    flag_hole_y: u32,
    flag_hole_width: u32,
    flag_hole_height: u32,
    flag_start_x: Option<u32>,
    flag_start_y: Option<u32>,
    flag_goal_x: Option<u32>,
    flag_goal_y: Option<u32>,
    flag_show_steps: bool,
}

mod errors {
    use error_chain::*;
    error_chain! {
        links {
            Maze(::mazestep::errors::Error, ::mazestep::errors::ErrorKind);
        }
        foreign_links {
            DocOptFailure(::docopt::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    let args: DriverArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (width, height) = (args.flag_grid_width, args.flag_grid_height);
    let mask = if args.flag_hole_width > 0 && args.flag_hole_height > 0 {
        Some(RectMask::new(args.flag_hole_x,
                           args.flag_hole_y,
                           args.flag_hole_width,
                           args.flag_hole_height))
    } else {
        None
    };

    let start = Cartesian2DCoordinate::new(args.flag_start_x
                                               .unwrap_or(width as u32 - 1),
                                           args.flag_start_y.unwrap_or(0));
    let goal = Cartesian2DCoordinate::new(args.flag_goal_x.unwrap_or(0),
                                          args.flag_goal_y
                                              .unwrap_or(height as u32 - 1));

    let mut session = Session::new(Width(width), Height(height), mask.as_ref(), start, goal)?;

    let mut build_steps = 0usize;
    let mut solve_steps = 0usize;
    while session.phase() != Phase::Waiting {
        match session.phase() {
            Phase::Building => build_steps += 1,
            Phase::Solving => solve_steps += 1,
            Phase::Waiting => {}
        }
        session.tick()?;
    }

    match session.solution() {
        Some(path) => {
            let display = PathDisplay::new(path);
            print!("{}", session.maze().render(Some(&display)));
        }
        None => {
            print!("{}", session.maze());
            println!("No route from ({}, {}) to ({}, {}).",
                     start.x,
                     start.y,
                     goal.x,
                     goal.y);
        }
    }

    if args.flag_show_steps {
        println!("building steps: {}", build_steps);
        println!("solving steps:  {}", solve_steps);
    }

    Ok(())
}
