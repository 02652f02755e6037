use std::hash::{Hash, Hasher};

use metrohash::MetroHash64;
use tracing::{trace, warn};

use crate::{pos, Cell, Grid, GridError, Pos};

#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Seeding stopped at the first bad position. The game holds every
    /// position applied before it.
    #[error("could not seed the initial cells: {source}")]
    Seed {
        game: Box<Game>,
        #[source]
        source: GridError,
    },
}

impl CreateError {
    pub fn source_error(&self) -> &GridError {
        match self {
            CreateError::Grid(source) | CreateError::Seed { source, .. } => source,
        }
    }

    /// the partially seeded game, if the grid itself could be built.
    pub fn into_game(self) -> Option<Game> {
        match self {
            CreateError::Grid(_) => None,
            CreateError::Seed { game, .. } => Some(*game),
        }
    }
}

/// The classic B3/S23 transition: survive on 2 or 3 neighbors, be born on 3.
pub fn next_state(alive: bool, neighbors: usize) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // survives
        (false, 3) => true,            // born
        _ => false,                    // dies or stays dead
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    generation: u64,
}

impl Game {
    /// Builds a `width`x`height` game and brings `positions` to life in order.
    ///
    /// Seeding is not all-or-nothing: the first out of range position stops
    /// it, and the game seeded so far is handed back inside
    /// [`CreateError::Seed`].
    pub fn new(
        width: i32,
        height: i32,
        positions: impl IntoIterator<Item = Pos>,
    ) -> Result<Self, CreateError> {
        let mut game = Self {
            grid: Grid::new(width, height)?,
            generation: 0,
        };

        for pos in positions {
            if let Err(source) = game.grid.set_alive(pos) {
                warn!(%source, "stopped seeding {}", game.grid);
                return Err(CreateError::Seed {
                    game: Box::new(game),
                    source,
                });
            }
        }

        Ok(game)
    }

    /// the 3x3 block centered on `pos`, clipped to the grid.
    fn neighborhood(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        (-1..=1)
            .flat_map(|y| (-1..=1).map(move |x| pos!(x, y)))
            .map(move |offset| pos + offset)
            .filter(move |p| self.grid.contains(*p))
    }

    pub fn count_live_neighbors(&self, pos: Pos) -> Result<usize, GridError> {
        let centre = self.grid.is_alive(pos)?;
        let block = self
            .neighborhood(pos)
            .filter(|p| matches!(self.grid.is_alive(*p), Ok(true)))
            .count();
        Ok(block - usize::from(centre))
    }

    /// Moves the game forward one generation.
    ///
    /// Every next state is decided from the current grid before any cell is
    /// touched, then the whole grid is replaced in one go. On error nothing is
    /// committed and the generation counter does not move.
    pub fn advance(&mut self) -> Result<(), GridError> {
        let next = self
            .grid
            .positions()
            .map(|pos| -> Result<Cell, GridError> {
                let alive = self.grid.is_alive(pos)?;
                let neighbors = self.count_live_neighbors(pos)?;
                Ok(Cell::from(next_state(alive, neighbors)))
            })
            .collect::<Result<Vec<_>, GridError>>()?;

        self.grid.commit(next);
        self.generation += 1;
        trace!(
            generation = self.generation,
            live = self.grid.live_count(),
            "advanced"
        );
        Ok(())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// a hash of the current cells, equal for equal grids.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = MetroHash64::default();
        self.grid.hash(&mut hasher);
        hasher.finish()
    }
}
