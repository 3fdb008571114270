//! Hole layout for a triangular board.
//!
//! The triangle is embedded in a sheared square lattice: a board of side
//! length `N` spans `2N - 1` columns and `N` rows, and only cells where
//! column and row parity line up inside the triangle are holes. Holes are
//! numbered top to bottom, left to right, starting at 0. That numbering is
//! the only addressing scheme visible outside the `board` module.

/// Identifier of a single hole, in layout order.
pub type Position = usize;

/// A cell on the sheared lattice. Only used to derive adjacency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    pub const fn new(col: i32, row: i32) -> Self {
        Coord { col, row }
    }

    pub const fn offset(self, dc: i32, dr: i32) -> Self {
        Coord {
            col: self.col + dc,
            row: self.row + dr,
        }
    }
}

/// Largest supported side length. Keeps lattice coordinates within `i32`
/// and the neighbor table to a bounded allocation.
pub const MAX_SIZE: usize = 1024;

/// Returns the number of holes on a triangle with the given side length.
///
/// Only meaningful for sizes accepted by [`is_valid_size`].
pub const fn position_count(size: usize) -> usize {
    size * (size + 1) / 2
}

/// Returns true for side lengths a board can be built with.
pub const fn is_valid_size(size: usize) -> bool {
    size >= 1 && size <= MAX_SIZE
}

/// Bijection between positions and lattice coordinates for one board size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Layout {
    size: usize,
    width: usize,
    coords: Vec<Coord>,
    /// Row-major `width * size` grid: Some(position) for holes, None for
    /// cells outside the triangle.
    grid: Vec<Option<Position>>,
}

impl Layout {
    /// Builds the layout for a triangle of side length `size`.
    ///
    /// The caller validates `size` with [`is_valid_size`].
    pub fn new(size: usize) -> Self {
        let width = 2 * size - 1;
        let mut coords = Vec::with_capacity(position_count(size));
        let mut grid = vec![None; width * size];

        for row in 0..size {
            let first = size - 1 - row;
            for k in 0..=row {
                let col = first + 2 * k;
                grid[row * width + col] = Some(coords.len());
                coords.push(Coord::new(col as i32, row as i32));
            }
        }

        Layout {
            size,
            width,
            coords,
            grid,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn coord(&self, position: Position) -> Coord {
        self.coords[position]
    }

    /// Looks up the hole at a lattice cell, if the cell is inside the triangle.
    pub fn position_at(&self, coord: Coord) -> Option<Position> {
        if coord.col < 0 || coord.row < 0 {
            return None;
        }
        let (col, row) = (coord.col as usize, coord.row as usize);
        if col >= self.width || row >= self.size {
            return None;
        }
        self.grid[row * self.width + col]
    }

    /// Returns true if the lattice cell lies inside the triangular region.
    pub fn in_triangle(&self, coord: Coord) -> bool {
        let n = self.size as i32 - 1;
        coord.row >= 0
            && coord.row <= n
            && coord.col + coord.row >= n
            && coord.col - coord.row <= n
            && (coord.col + coord.row - n) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_triangular_numbers() {
        for n in 1..=12 {
            assert_eq!(Layout::new(n).len(), n * (n + 1) / 2);
            assert_eq!(position_count(n), n * (n + 1) / 2);
        }
    }

    #[test]
    fn size_bounds() {
        assert!(!is_valid_size(0));
        assert!(is_valid_size(1));
        assert!(is_valid_size(MAX_SIZE));
        assert!(!is_valid_size(MAX_SIZE + 1));
        assert!(!is_valid_size(usize::MAX));
    }

    #[test]
    fn numbering_is_row_major() {
        let layout = Layout::new(5);
        assert_eq!(layout.coord(0), Coord::new(4, 0));
        assert_eq!(layout.coord(1), Coord::new(3, 1));
        assert_eq!(layout.coord(2), Coord::new(5, 1));
        assert_eq!(layout.coord(3), Coord::new(2, 2));
        assert_eq!(layout.coord(10), Coord::new(0, 4));
        assert_eq!(layout.coord(14), Coord::new(8, 4));
    }

    #[test]
    fn every_hole_is_inside_the_triangle() {
        for n in 1..=10 {
            let layout = Layout::new(n);
            for p in 0..layout.len() {
                assert!(layout.in_triangle(layout.coord(p)), "n={} p={}", n, p);
            }
        }
    }

    #[test]
    fn grid_and_coords_are_a_bijection() {
        let layout = Layout::new(6);
        let mut holes = 0;
        for row in 0..6 {
            for col in 0..11 {
                let c = Coord::new(col, row);
                match layout.position_at(c) {
                    Some(p) => {
                        holes += 1;
                        assert_eq!(layout.coord(p), c);
                        assert!(layout.in_triangle(c));
                    }
                    None => assert!(!layout.in_triangle(c)),
                }
            }
        }
        assert_eq!(holes, layout.len());
    }

    #[test]
    fn outside_cells_have_no_position() {
        let layout = Layout::new(3);
        assert_eq!(layout.position_at(Coord::new(-1, 0)), None);
        assert_eq!(layout.position_at(Coord::new(2, -1)), None);
        assert_eq!(layout.position_at(Coord::new(5, 0)), None);
        assert_eq!(layout.position_at(Coord::new(0, 3)), None);
        assert_eq!(layout.position_at(Coord::new(1, 0)), None);
    }
}
