//! Conway's Game of Life on a toroidal grid

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use sketchbook_core::Sketch;
use sketchbook_math::GridPos;

/// Generations advanced per second when run as a sketch
const GENERATIONS_PER_SECOND: f32 = 10.0;

/// The automaton state
pub struct GameOfLife {
    width: i32,
    height: i32,
    cells: Vec<bool>,
    /// Scratch buffer so a step reads one generation while writing the next
    scratch: Vec<bool>,
    generation: u64,
    /// Seed kept so reset reproduces the same initial soup
    seed: Option<u64>,
    accumulator: f32,
}

impl GameOfLife {
    /// Create an empty grid
    pub fn new(width: i32, height: i32) -> Self {
        let count = (width * height) as usize;
        Self {
            width,
            height,
            cells: vec![false; count],
            scratch: vec![false; count],
            generation: 0,
            seed: None,
            accumulator: 0.0,
        }
    }

    /// Create a grid filled with a random soup at roughly 30% density
    pub fn random_soup(width: i32, height: i32, seed: u64) -> Self {
        let mut life = Self::new(width, height);
        life.seed = Some(seed);
        life.fill_random(seed);
        life
    }

    fn fill_random(&mut self, seed: u64) {
        let mut rng = SmallRng::seed_from_u64(seed);
        for cell in &mut self.cells {
            *cell = rng.gen_bool(0.3);
        }
    }

    /// Grid width in cells
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Generations stepped so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn index(&self, pos: GridPos) -> usize {
        let wrapped = pos.wrapped(self.width, self.height);
        (wrapped.y * self.width + wrapped.x) as usize
    }

    /// Whether the cell at `pos` is alive (coordinates wrap)
    pub fn is_alive(&self, pos: GridPos) -> bool {
        self.cells[self.index(pos)]
    }

    /// Set the cell at `pos` (coordinates wrap)
    pub fn set_alive(&mut self, pos: GridPos, alive: bool) {
        let index = self.index(pos);
        self.cells[index] = alive;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    fn live_neighbours(&self, pos: GridPos) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_alive(pos.offset(dx, dy)) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Advance one generation (B3/S23)
    pub fn step(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = GridPos::new(x, y);
                let neighbours = self.live_neighbours(pos);
                let alive = self.is_alive(pos);
                let index = (y * self.width + x) as usize;
                self.scratch[index] = matches!((alive, neighbours), (true, 2 | 3) | (false, 3));
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }
}

impl Sketch for GameOfLife {
    fn name(&self) -> &str {
        "game-of-life"
    }

    fn update(&mut self, dt: f32) {
        self.accumulator += dt;
        let period = 1.0 / GENERATIONS_PER_SECOND;
        while self.accumulator >= period {
            self.accumulator -= period;
            self.step();
        }
    }

    fn reset(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
        self.accumulator = 0.0;
        if let Some(seed) = self.seed {
            self.fill_random(seed);
        }
    }
}
