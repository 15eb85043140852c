use crate::cells::Cartesian2DCoordinate;
use crate::units::{Height, Width};

/// A rectangular block of cells masked out of a grid, leaving a hole in the
/// lattice that passages have to route around.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct RectMask {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RectMask {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> RectMask {
        RectMask {
            x,
            y,
            width,
            height,
        }
    }

    /// Is the given coordinate masked out / turned off?
    ///
    /// A coordinate outside the mask rectangle is never masked; a zero-area
    /// rectangle masks nothing.
    pub fn is_masked(&self, coord: Cartesian2DCoordinate) -> bool {
        coord.x >= self.x && coord.x < self.x + self.width && coord.y >= self.y &&
        coord.y < self.y + self.height
    }

    /// Number of unmasked cells within a 2d space of the given `width` and `height`.
    pub fn count_unmasked_within(&self, width: Width, height: Height) -> usize {
        let mut count = 0;
        for x in 0..(width.0) {
            for y in 0..(height.0) {
                if !self.is_masked(Cartesian2DCoordinate::new(x as u32, y as u32)) {
                    count += 1;
                }
            }
        }
        count
    }
}
