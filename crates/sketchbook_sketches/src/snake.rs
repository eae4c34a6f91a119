//! Grid snake game
//!
//! Snake, food, obstacles, and levels. Levels are serializable templates so
//! new layouts can be loaded from RON files; a couple of built-in layouts
//! keep the game playable without any assets on disk.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sketchbook_core::{Direction, GridPos, InputEvent, Sketch};
use std::fs;
use std::io;
use std::path::Path;

/// Game ticks per second; the original ran its whole loop at 10 fps
const TICKS_PER_SECOND: f32 = 10.0;

/// Lives the player starts with
const STARTING_LIVES: u32 = 3;

/// A level is complete when the snake covers this share of the free cells
const COMPLETION_RATIO: f32 = 0.1;

// --- Templates ---

/// Serializable obstacle description
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObstacleTemplate {
    pub x: i32,
    pub y: i32,
    #[serde(default = "default_obstacle_extent")]
    pub width: i32,
    #[serde(default = "default_obstacle_extent")]
    pub height: i32,
}

fn default_obstacle_extent() -> i32 {
    1
}

/// A serializable snake level
///
/// Loaded from RON files or built programmatically; contains everything
/// needed to instantiate a running [`Level`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelTemplate {
    /// Level name (for display/debugging)
    pub name: String,
    /// Grid width in cells
    pub width: i32,
    /// Grid height in cells
    pub height: i32,
    /// Snake starting cell
    pub snake_start: GridPos,
    /// Snake starting direction
    pub snake_dir: Direction,
    /// Obstacle blocks
    #[serde(default)]
    pub obstacles: Vec<ObstacleTemplate>,
}

impl LevelTemplate {
    /// Load a level template from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LevelLoadError> {
        let contents = fs::read_to_string(path)?;
        let template = ron::from_str(&contents)?;
        Ok(template)
    }

    /// Save a level template to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), LevelSaveError> {
        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// The built-in level rotation
    pub fn builtin() -> Vec<LevelTemplate> {
        vec![
            LevelTemplate {
                name: "Open Field".to_string(),
                width: 24,
                height: 16,
                snake_start: GridPos::new(12, 8),
                snake_dir: Direction::Right,
                obstacles: Vec::new(),
            },
            LevelTemplate {
                name: "Pillars".to_string(),
                width: 24,
                height: 16,
                snake_start: GridPos::new(2, 8),
                snake_dir: Direction::Right,
                obstacles: vec![
                    ObstacleTemplate {
                        x: 8,
                        y: 4,
                        width: 2,
                        height: 8,
                    },
                    ObstacleTemplate {
                        x: 16,
                        y: 4,
                        width: 2,
                        height: 8,
                    },
                ],
            },
        ]
    }
}

/// Error loading a level template
#[derive(Debug)]
pub enum LevelLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
}

impl From<io::Error> for LevelLoadError {
    fn from(e: io::Error) -> Self {
        LevelLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for LevelLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelLoadError::Parse(e)
    }
}

impl std::fmt::Display for LevelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelLoadError::Io(e) => write!(f, "IO error: {}", e),
            LevelLoadError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for LevelLoadError {}

/// Error saving a level template
#[derive(Debug)]
pub enum LevelSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for LevelSaveError {
    fn from(e: io::Error) -> Self {
        LevelSaveError::Io(e)
    }
}

impl From<ron::Error> for LevelSaveError {
    fn from(e: ron::Error) -> Self {
        LevelSaveError::Serialize(e)
    }
}

impl std::fmt::Display for LevelSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelSaveError::Io(e) => write!(f, "IO error: {}", e),
            LevelSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for LevelSaveError {}

// --- Runtime pieces ---

/// A rectangular block of solid cells
#[derive(Clone, Copy, Debug)]
pub struct Obstacle {
    pub pos: GridPos,
    pub width: i32,
    pub height: i32,
}

impl Obstacle {
    /// Whether the obstacle covers the given cell
    pub fn contains(&self, cell: GridPos) -> bool {
        cell.x >= self.pos.x
            && cell.x < self.pos.x + self.width
            && cell.y >= self.pos.y
            && cell.y < self.pos.y + self.height
    }

    fn area(&self) -> i32 {
        self.width * self.height
    }
}

impl From<&ObstacleTemplate> for Obstacle {
    fn from(template: &ObstacleTemplate) -> Self {
        Self {
            pos: GridPos::new(template.x, template.y),
            width: template.width,
            height: template.height,
        }
    }
}

/// The snake itself
#[derive(Clone, Debug)]
pub struct Snake {
    start_pos: GridPos,
    start_dir: Direction,
    direction: Direction,
    /// Body cells, head first
    body: Vec<GridPos>,
    just_eaten: bool,
}

impl Snake {
    /// Create a one-segment snake
    pub fn new(start_pos: GridPos, start_dir: Direction) -> Self {
        Self {
            start_pos,
            start_dir,
            direction: start_dir,
            body: vec![start_pos],
            just_eaten: false,
        }
    }

    /// Head cell
    pub fn head(&self) -> GridPos {
        self.body[0]
    }

    /// Body length in cells
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Whether the body covers the given cell
    pub fn contains(&self, cell: GridPos) -> bool {
        self.body.contains(&cell)
    }

    /// Current travel direction
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Mark the head as having just eaten; the tail grows on the next move
    pub fn mark_eaten(&mut self) {
        self.just_eaten = true;
    }

    /// Change direction; reversing straight into the body is ignored
    pub fn set_direction(&mut self, new_direction: Direction) {
        if new_direction == self.direction.opposite() {
            return;
        }
        self.direction = new_direction;
    }

    /// Move one cell, wrapping at the grid edges
    ///
    /// Returns true when the head ran into the body; the snake is then
    /// already reset to its starting state.
    pub fn advance(&mut self, width: i32, height: i32) -> bool {
        if self.just_eaten {
            let tail = self.body[self.body.len() - 1];
            self.body.push(tail);
            self.just_eaten = false;
        }

        // Shift every segment up toward the head
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }

        let next = (self.head() + self.direction.delta()).wrapped(width, height);

        if self.body[1..].contains(&next) {
            self.die();
            return true;
        }

        self.body[0] = next;
        false
    }

    /// Shrink back to the starting state
    pub fn die(&mut self) {
        log::info!("snake died at length {}", self.body.len());
        self.body = vec![self.start_pos];
        self.direction = self.start_dir;
        self.just_eaten = false;
    }
}

/// A running level: snake, obstacles, and one piece of food
pub struct Level {
    pub width: i32,
    pub height: i32,
    pub snake: Snake,
    obstacles: Vec<Obstacle>,
    food: GridPos,
    /// Cells not covered by obstacles
    free_area: i32,
    /// Set when the snake dies during a tick; the game layer consumes it
    pub lost_life: bool,
}

impl Level {
    /// Instantiate a level from a template
    pub fn from_template(template: &LevelTemplate, rng: &mut SmallRng) -> Self {
        let obstacles: Vec<Obstacle> = template.obstacles.iter().map(Obstacle::from).collect();
        let obstacle_area: i32 = obstacles.iter().map(Obstacle::area).sum();

        let mut level = Self {
            width: template.width,
            height: template.height,
            snake: Snake::new(template.snake_start, template.snake_dir),
            obstacles,
            food: GridPos::new(0, 0),
            free_area: template.width * template.height - obstacle_area,
            lost_life: false,
        };
        level.place_food(rng);
        level
    }

    /// Current food cell
    pub fn food(&self) -> GridPos {
        self.food
    }

    /// Pick a new food cell not covered by an obstacle or the snake
    fn place_food(&mut self, rng: &mut SmallRng) {
        for _ in 0..(self.width * self.height * 10) {
            let candidate = GridPos::new(
                rng.gen_range(0..self.width),
                rng.gen_range(0..self.height),
            );
            if self.cell_is_free(candidate) {
                self.food = candidate;
                return;
            }
        }
        // The board is nearly full; fall back to scanning for any free cell
        for y in 0..self.height {
            for x in 0..self.width {
                let candidate = GridPos::new(x, y);
                if self.cell_is_free(candidate) {
                    self.food = candidate;
                    return;
                }
            }
        }
        log::warn!("no free cell left for food");
    }

    fn cell_is_free(&self, cell: GridPos) -> bool {
        !self.snake.contains(cell) && !self.obstacles.iter().any(|o| o.contains(cell))
    }

    /// Advance the level by one game tick
    pub fn tick(&mut self, rng: &mut SmallRng) {
        if self.snake.advance(self.width, self.height) {
            self.lost_life = true;
            return;
        }

        let head = self.snake.head();
        if self.obstacles.iter().any(|o| o.contains(head)) {
            self.snake.die();
            self.lost_life = true;
            return;
        }

        if head == self.food {
            self.snake.mark_eaten();
            self.place_food(rng);
        }
    }

    /// Whether the snake has grown long enough to clear the level
    pub fn complete(&self) -> bool {
        self.snake.len() as f32 >= COMPLETION_RATIO * self.free_area as f32
    }
}

// --- Game engine ---

/// The snake game: levels, lives, and tick pacing
pub struct SnakeGame {
    templates: Vec<LevelTemplate>,
    current_level: usize,
    level: Level,
    lives: u32,
    rng: SmallRng,
    accumulator: f32,
}

impl SnakeGame {
    /// Create a game over the given level rotation
    ///
    /// An empty template list falls back to the built-in levels.
    pub fn new(templates: Vec<LevelTemplate>, seed: u64) -> Self {
        let templates = if templates.is_empty() {
            LevelTemplate::builtin()
        } else {
            templates
        };
        let mut rng = SmallRng::seed_from_u64(seed);
        let level = Level::from_template(&templates[0], &mut rng);
        Self {
            templates,
            current_level: 0,
            level,
            lives: STARTING_LIVES,
            rng,
            accumulator: 0.0,
        }
    }

    /// Remaining lives
    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Index of the running level
    pub fn level_index(&self) -> usize {
        self.current_level
    }

    /// The running level
    pub fn level(&self) -> &Level {
        &self.level
    }

    fn load_level(&mut self, index: usize) {
        self.current_level = index % self.templates.len();
        self.level = Level::from_template(&self.templates[self.current_level], &mut self.rng);
        log::info!(
            "starting level {} '{}'",
            self.current_level,
            self.templates[self.current_level].name
        );
    }

    /// Advance one game tick regardless of wall time
    pub fn tick(&mut self) {
        self.level.tick(&mut self.rng);

        if self.level.lost_life {
            self.level.lost_life = false;
            self.lives -= 1;
            log::info!("lives remaining: {}", self.lives);
            if self.lives == 0 {
                log::info!("out of lives, game over");
                self.lives = STARTING_LIVES;
                self.load_level(0);
            }
            return;
        }

        if self.level.complete() {
            self.load_level(self.current_level + 1);
        }
    }
}

impl Sketch for SnakeGame {
    fn name(&self) -> &str {
        "snake"
    }

    fn update(&mut self, dt: f32) {
        self.accumulator += dt;
        let period = 1.0 / TICKS_PER_SECOND;
        while self.accumulator >= period {
            self.accumulator -= period;
            self.tick();
        }
    }

    fn handle_input(&mut self, event: &InputEvent) {
        if let InputEvent::Direction(dir) = event {
            self.level.snake.set_direction(*dir);
        }
    }

    fn reset(&mut self) {
        self.lives = STARTING_LIVES;
        self.accumulator = 0.0;
        self.load_level(0);
    }
}
