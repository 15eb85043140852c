use smallvec::SmallVec;
use std::convert::From;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum GridDirection {
    North,
    East,
    South,
    West,
}

/// Wall flag order within a cell: North, East, South, West.
pub const DIRECTIONS: [GridDirection; 4] = [GridDirection::North,
                                            GridDirection::East,
                                            GridDirection::South,
                                            GridDirection::West];

impl GridDirection {
    pub fn opposite(self) -> GridDirection {
        match self {
            GridDirection::North => GridDirection::South,
            GridDirection::East => GridDirection::West,
            GridDirection::South => GridDirection::North,
            GridDirection::West => GridDirection::East,
        }
    }

    /// Index of this direction's wall flag in a cell's `[bool; 4]`.
    pub fn wall_index(self) -> usize {
        match self {
            GridDirection::North => 0,
            GridDirection::East => 1,
            GridDirection::South => 2,
            GridDirection::West => 3,
        }
    }
}

/// Creates a new `Cartesian2DCoordinate` offset 1 cell away in the given direction.
/// Returns None if the coordinate is not representable (off the zero edge).
pub fn offset_coordinate(coord: Cartesian2DCoordinate,
                         dir: GridDirection)
                         -> Option<Cartesian2DCoordinate> {
    let (x, y) = (coord.x, coord.y);
    match dir {
        GridDirection::North => {
            if y > 0 {
                Some(Cartesian2DCoordinate { x, y: y - 1 })
            } else {
                None
            }
        }
        GridDirection::East => Some(Cartesian2DCoordinate { x: x + 1, y }),
        GridDirection::South => Some(Cartesian2DCoordinate { x, y: y + 1 }),
        GridDirection::West => {
            if x > 0 {
                Some(Cartesian2DCoordinate { x: x - 1, y })
            } else {
                None
            }
        }
    }
}

/// Sum of the absolute coordinate differences. Used as both the per-move
/// cost and the A* heuristic on the 4-connected grid.
pub fn manhattan_distance(a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) -> u32 {
    let dx = if a.x > b.x { a.x - b.x } else { b.x - a.x };
    let dy = if a.y > b.y { a.y - b.y } else { b.y - a.y };
    dx + dy
}
