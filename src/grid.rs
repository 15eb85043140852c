use std::fmt;

use crate::cells::{offset_coordinate, Cartesian2DCoordinate, GridDirection};
use crate::errors::*;
use crate::masks::RectMask;
use crate::units::{Height, Width};
use crate::utils::{self, FnvHashMap};

/// Fixed-size 2d lattice of cells, each carrying four wall flags
/// (North, East, South, West). Cell membership is decided once at
/// construction time - optionally minus a masked rectangle - and never
/// changes afterwards; only the wall flags mutate.
#[derive(Debug, Clone)]
pub struct Maze {
    cells: FnvHashMap<Cartesian2DCoordinate, [bool; 4]>,
    width: Width,
    height: Height,
}

impl Maze {
    /// A full `width` x `height` grid with every wall in place.
    pub fn new(width: Width, height: Height) -> Maze {
        Maze::with_mask(width, height, None)
    }

    /// A grid with the cells inside `mask` excluded entirely. Excluded
    /// coordinates do not exist: they are not traversable and cannot have
    /// walls cleared.
    pub fn with_mask(width: Width, height: Height, mask: Option<&RectMask>) -> Maze {
        let mut cells = utils::fnv_hashmap(width.0 * height.0);
        for y in 0..height.0 {
            for x in 0..width.0 {
                let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
                if mask.map_or(false, |m| m.is_masked(coord)) {
                    continue;
                }
                cells.insert(coord, [true; 4]);
            }
        }
        Maze {
            cells,
            width,
            height,
        }
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn height(&self) -> Height {
        self.height
    }

    /// Count of existing cells (the full rectangle minus any masked hole).
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    pub fn exists(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cells.contains_key(&coord)
    }

    /// The wall flags of a cell, or None for a coordinate that does not exist.
    /// Flag order is North, East, South, West; `true` means the wall is up.
    pub fn walls(&self, coord: Cartesian2DCoordinate) -> Option<[bool; 4]> {
        self.cells.get(&coord).cloned()
    }

    /// Is the wall on `dir`'s side of the cell cleared?
    /// False for coordinates that do not exist.
    pub fn is_passage(&self, coord: Cartesian2DCoordinate, dir: GridDirection) -> bool {
        self.cells
            .get(&coord)
            .map_or(false, |walls| !walls[dir.wall_index()])
    }

    /// The adjacent coordinate in `dir`, but only if that cell exists in the grid.
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  dir: GridDirection)
                                  -> Option<Cartesian2DCoordinate> {
        offset_coordinate(coord, dir).filter(|c| self.exists(*c))
    }

    /// Clear the wall in direction `dir` of `coord` *and* the opposing wall
    /// of the neighbouring cell. The flags always change as a pair, so the
    /// wall state of two adjacent cells can never disagree.
    ///
    /// Fails with `OutOfBounds` if either end of the pair does not exist,
    /// in which case nothing is modified.
    pub fn clear_wall(&mut self, coord: Cartesian2DCoordinate, dir: GridDirection) -> Result<()> {
        let neighbour = offset_coordinate(coord, dir)
            .ok_or_else(|| Error::from(ErrorKind::OutOfBounds(coord)))?;
        if !self.cells.contains_key(&coord) {
            return Err(ErrorKind::OutOfBounds(coord).into());
        }
        if !self.cells.contains_key(&neighbour) {
            return Err(ErrorKind::OutOfBounds(neighbour).into());
        }

        // Both ends checked above, neither write can fail half way.
        if let Some(walls) = self.cells.get_mut(&coord) {
            walls[dir.wall_index()] = false;
        }
        if let Some(walls) = self.cells.get_mut(&neighbour) {
            walls[dir.opposite().wall_index()] = false;
        }
        Ok(())
    }

    /// Number of cleared wall pairs. A perfect maze over the grid has
    /// exactly `size() - 1` of them.
    pub fn passages_count(&self) -> usize {
        let cleared_flags: usize = self.cells
            .values()
            .map(|walls| walls.iter().filter(|&&wall| !wall).count())
            .sum();
        cleared_flags / 2
    }

    /// Row major iteration over the existing cell coordinates.
    pub fn iter(&self) -> CellIter {
        CellIter {
            maze: self,
            current_cell_number: 0,
        }
    }

    /// Text rendering of the maze walls with an optional per-cell overlay,
    /// e.g. marking the solved path.
    pub fn render(&self, display: Option<&dyn GridDisplay>) -> String {
        let (columns_count, rows_count) = (self.width.0, self.height.0);
        let mut output = String::new();

        for y in 0..rows_count {
            let mut top = String::new();
            let mut middle = String::new();

            for x in 0..columns_count {
                let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
                let above = offset_coordinate(coord, GridDirection::North);

                // The boundary drawn above this cell: this cell's north wall,
                // or for a hole the south wall of the cell above.
                let has_north_wall = match (self.walls(coord), above.and_then(|c| self.walls(c))) {
                    (Some(walls), _) => walls[GridDirection::North.wall_index()],
                    (None, Some(above_walls)) => above_walls[GridDirection::South.wall_index()],
                    (None, None) => false,
                };
                top.push('+');
                top.push_str(if has_north_wall { "---" } else { "   " });

                let left = offset_coordinate(coord, GridDirection::West);
                let has_west_wall = match (self.walls(coord), left.and_then(|c| self.walls(c))) {
                    (Some(walls), _) => walls[GridDirection::West.wall_index()],
                    (None, Some(left_walls)) => left_walls[GridDirection::East.wall_index()],
                    (None, None) => false,
                };
                middle.push(if has_west_wall { '|' } else { ' ' });

                let body = if self.exists(coord) {
                    display.map_or_else(|| String::from("   "), |d| d.render_cell_body(coord))
                } else {
                    String::from("   ")
                };
                middle.push_str(&body);
            }

            let row_end = Cartesian2DCoordinate::new(columns_count as u32 - 1, y as u32);
            top.push('+');
            middle.push(if self.is_passage(row_end, GridDirection::East) ||
                           !self.exists(row_end) {
                ' '
            } else {
                '|'
            });

            output.push_str(&top);
            output.push('\n');
            output.push_str(&middle);
            output.push('\n');
        }

        // Southern boundary of the last row.
        for x in 0..columns_count {
            let coord = Cartesian2DCoordinate::new(x as u32, rows_count as u32 - 1);
            let has_south_wall = self.walls(coord)
                .map_or(false, |walls| walls[GridDirection::South.wall_index()]);
            output.push('+');
            output.push_str(if has_south_wall { "---" } else { "   " });
        }
        output.push('+');
        output.push('\n');

        output
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.render(None))
    }
}

/// Injectable overlay deciding what to draw inside each cell of a text
/// rendered maze. The body must be 3 characters wide.
pub trait GridDisplay {
    fn render_cell_body(&self, coord: Cartesian2DCoordinate) -> String;
}

pub struct CellIter<'a> {
    maze: &'a Maze,
    current_cell_number: usize,
}

impl<'a> Iterator for CellIter<'a> {
    type Item = Cartesian2DCoordinate;

    fn next(&mut self) -> Option<Cartesian2DCoordinate> {
        let cells_count = self.maze.width.0 * self.maze.height.0;
        while self.current_cell_number < cells_count {
            let x = self.current_cell_number % self.maze.width.0;
            let y = self.current_cell_number / self.maze.width.0;
            self.current_cell_number += 1;

            let coord = Cartesian2DCoordinate::new(x as u32, y as u32);
            if self.maze.exists(coord) {
                return Some(coord);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::DIRECTIONS;

    fn gc(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x, y)
    }

    #[test]
    fn full_grid_membership() {
        let maze = Maze::new(Width(3), Height(4));
        assert_eq!(maze.size(), 12);
        assert!(maze.exists(gc(0, 0)));
        assert!(maze.exists(gc(2, 3)));
        assert!(!maze.exists(gc(3, 0)));
        assert!(!maze.exists(gc(0, 4)));
    }

    #[test]
    fn masked_cells_do_not_exist() {
        let mask = RectMask::new(1, 1, 2, 2);
        let maze = Maze::with_mask(Width(4), Height(4), Some(&mask));
        assert_eq!(maze.size(), 12);
        assert!(!maze.exists(gc(1, 1)));
        assert!(!maze.exists(gc(2, 2)));
        assert!(maze.exists(gc(0, 1)));
        assert!(maze.exists(gc(3, 3)));
    }

    #[test]
    fn new_grid_has_all_walls_up() {
        let maze = Maze::new(Width(2), Height(2));
        for coord in maze.iter() {
            assert_eq!(maze.walls(coord), Some([true; 4]));
            for &dir in DIRECTIONS.iter() {
                assert!(!maze.is_passage(coord, dir));
            }
        }
        assert_eq!(maze.passages_count(), 0);
    }

    #[test]
    fn clear_wall_updates_both_sides() {
        let mut maze = Maze::new(Width(2), Height(2));
        maze.clear_wall(gc(0, 0), GridDirection::East).unwrap();

        assert!(maze.is_passage(gc(0, 0), GridDirection::East));
        assert!(maze.is_passage(gc(1, 0), GridDirection::West));
        assert!(!maze.is_passage(gc(0, 0), GridDirection::South));
        assert_eq!(maze.passages_count(), 1);
    }

    #[test]
    fn clear_wall_to_nonexistent_neighbour_changes_nothing() {
        let mut maze = Maze::new(Width(2), Height(2));
        let result = maze.clear_wall(gc(1, 0), GridDirection::East);
        assert!(result.is_err());
        if let &ErrorKind::OutOfBounds(coord) = result.unwrap_err().kind() {
            assert_eq!(coord, gc(2, 0));
        } else {
            panic!("expected OutOfBounds");
        }
        assert_eq!(maze.walls(gc(1, 0)), Some([true; 4]));
    }

    #[test]
    fn clear_wall_off_the_zero_edge_is_out_of_bounds() {
        let mut maze = Maze::new(Width(2), Height(2));
        assert!(maze.clear_wall(gc(0, 0), GridDirection::North).is_err());
        assert!(maze.clear_wall(gc(0, 0), GridDirection::West).is_err());
    }

    #[test]
    fn clear_wall_on_nonexistent_cell_is_out_of_bounds() {
        let mask = RectMask::new(0, 0, 1, 1);
        let mut maze = Maze::with_mask(Width(2), Height(2), Some(&mask));
        assert!(maze.clear_wall(gc(0, 0), GridDirection::East).is_err());
        // Existing cell whose neighbour is the hole.
        assert!(maze.clear_wall(gc(1, 0), GridDirection::West).is_err());
    }

    #[test]
    fn neighbour_at_direction_skips_holes_and_edges() {
        let mask = RectMask::new(1, 0, 1, 1);
        let maze = Maze::with_mask(Width(3), Height(1), Some(&mask));
        assert_eq!(maze.neighbour_at_direction(gc(0, 0), GridDirection::East),
                   None);
        assert_eq!(maze.neighbour_at_direction(gc(0, 0), GridDirection::West),
                   None);
        assert_eq!(maze.neighbour_at_direction(gc(2, 0), GridDirection::West),
                   None);
        assert_eq!(maze.neighbour_at_direction(gc(2, 0), GridDirection::South),
                   None);
    }

    #[test]
    fn iter_is_row_major_and_skips_holes() {
        let mask = RectMask::new(1, 1, 1, 1);
        let maze = Maze::with_mask(Width(2), Height(2), Some(&mask));
        let coords: Vec<_> = maze.iter().collect();
        assert_eq!(coords, vec![gc(0, 0), gc(1, 0), gc(0, 1)]);
    }

    #[test]
    fn iter_covers_the_full_grid() {
        let maze = Maze::new(Width(3), Height(3));
        let coords: Vec<_> = maze.iter().collect();
        assert_eq!(coords.len(), 9);
        assert_eq!(coords[0], gc(0, 0));
        assert_eq!(coords[3], gc(0, 1));
        assert_eq!(coords[8], gc(2, 2));
    }

    #[test]
    fn render_uncarved_grid_draws_solid_walls() {
        let maze = Maze::new(Width(2), Height(1));
        let text = format!("{}", maze);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "+---+---+");
        assert_eq!(lines[1], "|   |   |");
        assert_eq!(lines[2], "+---+---+");
    }

    #[test]
    fn render_carved_passage_opens_the_shared_wall() {
        let mut maze = Maze::new(Width(2), Height(1));
        maze.clear_wall(gc(0, 0), GridDirection::East).unwrap();
        let text = format!("{}", maze);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "|       |");
    }
}
