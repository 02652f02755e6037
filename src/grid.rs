use std::fmt;

use crate::{pos, Pos};

pub use error::GridError;
mod error;

/// Smallest width and height a grid may be created with.
pub const MIN_SIZE: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cell {
    alive: bool,
}

impl Cell {
    pub fn alive() -> Self {
        Self { alive: true }
    }

    pub fn dead() -> Self {
        Self { alive: false }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        Self { alive }
    }
}

/// A bounded rectangle of cells.
///
/// Every access is bounds checked against `0..width` and `0..height`; nothing
/// wraps around. The number of live cells is kept up to date on every change
/// so reading it is free.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
    live: usize,
}

impl Grid {
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        if width < MIN_SIZE || height < MIN_SIZE {
            return Err(GridError::InvalidSize { width, height });
        }

        let cells = vec![Cell::dead(); width as usize * height as usize];
        Ok(Self {
            cells,
            width,
            height,
            live: 0,
        })
    }

    pub fn contains(&self, Pos { x, y }: Pos) -> bool {
        (0..self.width).contains(&x) && (0..self.height).contains(&y)
    }

    /// resolves `pos` to its slot in `cells`, or the error describing why it has none.
    fn check_range(&self, pos: Pos) -> Result<usize, GridError> {
        if !self.contains(pos) {
            return Err(GridError::OutOfRange {
                width: self.width,
                height: self.height,
                pos,
            });
        }
        Ok(pos.y as usize * self.width as usize + pos.x as usize)
    }

    pub fn get(&self, pos: Pos) -> Result<Cell, GridError> {
        let index = self.check_range(pos)?;
        Ok(self.cells[index])
    }

    pub fn is_alive(&self, pos: Pos) -> Result<bool, GridError> {
        self.get(pos).map(|cell| cell.is_alive())
    }

    pub fn set_alive(&mut self, pos: Pos) -> Result<(), GridError> {
        let index = self.check_range(pos)?;
        let cell = &mut self.cells[index];
        if !cell.is_alive() {
            *cell = Cell::alive();
            self.live += 1;
        }
        Ok(())
    }

    pub fn set_dead(&mut self, pos: Pos) -> Result<(), GridError> {
        let index = self.check_range(pos)?;
        let cell = &mut self.cells[index];
        if cell.is_alive() {
            *cell = Cell::dead();
            self.live -= 1;
        }
        Ok(())
    }

    pub fn set(&mut self, pos: Pos, cell: Cell) -> Result<(), GridError> {
        if cell.is_alive() {
            self.set_alive(pos)
        } else {
            self.set_dead(pos)
        }
    }

    /// flips the cell at `pos` and returns whether it is now alive.
    pub fn toggle(&mut self, pos: Pos) -> Result<bool, GridError> {
        let alive = !self.is_alive(pos)?;
        self.set(pos, alive.into())?;
        Ok(alive)
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::dead());
        self.live = 0;
    }

    /// Replaces every cell at once. `cells` must hold one entry per position,
    /// in the same row-major order as [`Grid::positions`].
    pub(crate) fn commit(&mut self, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.live = cells.iter().filter(|cell| cell.is_alive()).count();
        self.cells = cells;
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn dimensions(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// every position of the grid, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Pos> {
        let (width, height) = self.dimensions();
        (0..height).flat_map(move |y| (0..width).map(move |x| pos!(x, y)))
    }

    pub fn actives(&self) -> impl Iterator<Item = Pos> + '_ {
        self.positions()
            .zip(self.cells.iter())
            .filter_map(|(pos, cell)| cell.is_alive().then_some(pos))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid ({}x{})", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(MIN_SIZE, MIN_SIZE).unwrap()
    }

    #[test]
    fn test_new_is_dead() {
        let grid = grid();
        assert_eq!(grid.dimensions(), (MIN_SIZE, MIN_SIZE));
        assert_eq!(grid.live_count(), 0);
        assert!(grid.positions().all(|pos| !grid.is_alive(pos).unwrap()));
        assert_eq!(grid.positions().count(), (MIN_SIZE * MIN_SIZE) as usize);
    }

    #[test]
    fn test_new_invalid_size() {
        assert_eq!(
            Grid::new(-1, -1),
            Err(GridError::InvalidSize {
                width: -1,
                height: -1
            })
        );
        assert_eq!(
            Grid::new(MIN_SIZE, MIN_SIZE - 1),
            Err(GridError::InvalidSize {
                width: MIN_SIZE,
                height: MIN_SIZE - 1
            })
        );
        assert!(Grid::new(MIN_SIZE + 5, MIN_SIZE).is_ok());
    }

    #[test]
    fn test_set_alive_is_idempotent() {
        let mut grid = grid();
        grid.set_alive(pos!(1, 1)).unwrap();
        grid.set_alive(pos!(1, 1)).unwrap();
        assert_eq!(grid.live_count(), 1);
        assert!(grid.is_alive(pos!(1, 1)).unwrap());
        assert_eq!(grid.get(pos!(1, 1)), Ok(Cell::alive()));
    }

    #[test]
    fn test_set_dead_is_idempotent() {
        let mut grid = grid();
        grid.set_dead(pos!(2, 3)).unwrap();
        assert_eq!(grid.live_count(), 0);

        grid.set_alive(pos!(2, 3)).unwrap();
        grid.set_dead(pos!(2, 3)).unwrap();
        grid.set_dead(pos!(2, 3)).unwrap();
        assert_eq!(grid.live_count(), 0);
        assert!(!grid.is_alive(pos!(2, 3)).unwrap());
    }

    #[test]
    fn test_out_of_range() {
        let mut grid = Grid::new(12, 10).unwrap();
        grid.set_alive(pos!(0, 0)).unwrap();

        for pos in [pos!(-1, 0), pos!(0, -1), pos!(12, 0), pos!(0, 10), pos!(12, 10)] {
            let expected = Err(GridError::OutOfRange {
                width: 12,
                height: 10,
                pos,
            });
            assert_eq!(grid.set_alive(pos), expected);
            assert_eq!(grid.set_dead(pos), expected);
            assert_eq!(grid.toggle(pos), expected.clone().map(|_| false));
            assert_eq!(grid.is_alive(pos), expected.clone().map(|_| false));
            assert_eq!(grid.live_count(), 1);
        }
        assert!(grid.is_alive(pos!(11, 9)).is_ok());
    }

    #[test]
    fn test_toggle() {
        let mut grid = grid();
        assert_eq!(grid.toggle(pos!(4, 4)), Ok(true));
        assert_eq!(grid.live_count(), 1);
        assert_eq!(grid.toggle(pos!(4, 4)), Ok(false));
        assert_eq!(grid.live_count(), 0);
    }

    #[test]
    fn test_reset() {
        let mut grid = grid();
        for i in 0..MIN_SIZE {
            grid.set_alive(pos!(i, i)).unwrap();
        }
        assert_eq!(grid.live_count(), MIN_SIZE as usize);

        grid.reset();
        assert_eq!(grid.live_count(), 0);
        assert!(grid.positions().all(|pos| !grid.is_alive(pos).unwrap()));
    }

    #[test]
    fn test_actives_row_major() {
        let mut grid = grid();
        grid.set_alive(pos!(3, 1)).unwrap();
        grid.set_alive(pos!(0, 2)).unwrap();
        grid.set_alive(pos!(5, 0)).unwrap();
        let actives: Vec<_> = grid.actives().collect();
        assert_eq!(actives, vec![pos!(5, 0), pos!(3, 1), pos!(0, 2)]);
    }

    #[test]
    fn test_commit_recounts() {
        let mut grid = grid();
        grid.set_alive(pos!(9, 9)).unwrap();
        let mut cells = vec![Cell::dead(); grid.positions().count()];
        cells[0] = Cell::alive();
        cells[1] = Cell::alive();
        grid.commit(cells);
        assert_eq!(grid.live_count(), 2);
        assert!(grid.is_alive(pos!(1, 0)).unwrap());
        assert!(!grid.is_alive(pos!(9, 9)).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(Grid::new(12, 10).unwrap().to_string(), "Grid (12x10)");
    }
}
