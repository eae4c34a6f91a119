//! Maze robot simulator
//!
//! A wall-grid maze, a robot with a pose, and the left-hand-rule solver
//! expressed as a step machine: one decision and one move per step, so the
//! animation layer can pace the run however it likes.

use bitflags::bitflags;
use sketchbook_core::{Direction, GridPos, Sketch, SketchStatus};

bitflags! {
    /// Which sides of a cell carry a wall
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Walls: u8 {
        const NORTH = 0b0001;
        const EAST = 0b0010;
        const SOUTH = 0b0100;
        const WEST = 0b1000;
    }
}

fn wall_for(direction: Direction) -> Walls {
    match direction {
        Direction::Up => Walls::NORTH,
        Direction::Right => Walls::EAST,
        Direction::Down => Walls::SOUTH,
        Direction::Left => Walls::WEST,
    }
}

/// Maze errors
#[derive(Debug, PartialEq, Eq)]
pub enum MazeError {
    /// Cell coordinates outside the grid
    OutOfBounds(GridPos),
    /// A move tried to pass through a wall
    WallCollision { pos: GridPos, direction: Direction },
}

impl std::fmt::Display for MazeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MazeError::OutOfBounds(pos) => {
                write!(f, "cell ({}, {}) is outside the maze", pos.x, pos.y)
            }
            MazeError::WallCollision { pos, direction } => write!(
                f,
                "move through wall at ({}, {}) heading {:?}",
                pos.x, pos.y, direction
            ),
        }
    }
}

impl std::error::Error for MazeError {}

/// A rectangular maze of wall-carrying cells
///
/// The outer boundary is always walled. Interior walls are kept symmetric:
/// setting the east wall of a cell also sets the west wall of its
/// neighbour.
pub struct Maze {
    width: i32,
    height: i32,
    cells: Vec<Walls>,
}

impl Maze {
    /// Create a maze with boundary walls and an open interior
    pub fn open(width: i32, height: i32) -> Self {
        let mut maze = Self {
            width,
            height,
            cells: vec![Walls::empty(); (width * height) as usize],
        };
        for x in 0..width {
            let top = maze.index(GridPos::new(x, 0));
            maze.cells[top] |= Walls::NORTH;
            let bottom = maze.index(GridPos::new(x, height - 1));
            maze.cells[bottom] |= Walls::SOUTH;
        }
        for y in 0..height {
            let left = maze.index(GridPos::new(0, y));
            maze.cells[left] |= Walls::WEST;
            let right = maze.index(GridPos::new(width - 1, y));
            maze.cells[right] |= Walls::EAST;
        }
        maze
    }

    /// Grid width in cells
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells
    pub fn height(&self) -> i32 {
        self.height
    }

    fn index(&self, pos: GridPos) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    fn check_bounds(&self, pos: GridPos) -> Result<(), MazeError> {
        if pos.in_bounds(self.width, self.height) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds(pos))
        }
    }

    /// Whether the cell has a wall on the given side
    ///
    /// Queries outside the grid count as walls, so the robot can never
    /// escape even if the boundary flags were tampered with.
    pub fn has_wall(&self, pos: GridPos, direction: Direction) -> bool {
        if !pos.in_bounds(self.width, self.height) {
            return true;
        }
        self.cells[self.index(pos)].contains(wall_for(direction))
    }

    /// Add or remove the wall on one side of a cell, keeping the shared
    /// side of the neighbouring cell in sync
    pub fn set_wall(
        &mut self,
        pos: GridPos,
        direction: Direction,
        present: bool,
    ) -> Result<(), MazeError> {
        self.check_bounds(pos)?;
        let index = self.index(pos);
        let flag = wall_for(direction);
        if present {
            self.cells[index] |= flag;
        } else {
            self.cells[index] -= flag;
        }

        let neighbour = pos + direction.delta();
        if neighbour.in_bounds(self.width, self.height) {
            let neighbour_index = self.index(neighbour);
            let opposite = wall_for(direction.opposite());
            if present {
                self.cells[neighbour_index] |= opposite;
            } else {
                self.cells[neighbour_index] -= opposite;
            }
        }
        Ok(())
    }
}

/// A robot with a cell position and a heading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Robot {
    pub pos: GridPos,
    pub heading: Direction,
}

impl Robot {
    /// Place a robot at a cell facing a direction
    pub fn new(pos: GridPos, heading: Direction) -> Self {
        Self { pos, heading }
    }

    /// Rotate 90 degrees counter-clockwise
    pub fn turn_left(&mut self) {
        self.heading = self.heading.turned_left();
    }

    /// Rotate 90 degrees clockwise
    pub fn turn_right(&mut self) {
        self.heading = self.heading.turned_right();
    }

    /// Wall on the robot's left
    pub fn has_wall_left(&self, maze: &Maze) -> bool {
        maze.has_wall(self.pos, self.heading.turned_left())
    }

    /// Wall straight ahead
    pub fn has_wall_front(&self, maze: &Maze) -> bool {
        maze.has_wall(self.pos, self.heading)
    }

    /// Wall on the robot's right
    pub fn has_wall_right(&self, maze: &Maze) -> bool {
        maze.has_wall(self.pos, self.heading.turned_right())
    }

    /// Wall behind the robot
    pub fn has_wall_back(&self, maze: &Maze) -> bool {
        maze.has_wall(self.pos, self.heading.opposite())
    }

    /// Move one cell in the current heading
    ///
    /// Driving into a wall is an error, never silently ignored.
    pub fn move_forward(&mut self, maze: &Maze) -> Result<(), MazeError> {
        if maze.has_wall(self.pos, self.heading) {
            return Err(MazeError::WallCollision {
                pos: self.pos,
                direction: self.heading,
            });
        }
        self.pos = self.pos + self.heading.delta();
        Ok(())
    }
}

/// What one solver step did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolverStep {
    /// Turned (possibly) and moved one cell
    Moved,
    /// Arrived back at the start cell; the circuit is complete
    ReturnedToStart,
    /// Walls on all four sides; nowhere to go
    BoxedIn,
}

/// Left-hand-rule wall follower
///
/// Keeps its left hand on the wall: prefer turning left, else go straight,
/// else turn right, else turn around. The run ends when the robot returns
/// to its starting cell or discovers it is sealed in.
pub struct LeftHandSolver {
    maze: Maze,
    robot: Robot,
    initial_robot: Robot,
    start: GridPos,
    moves: usize,
    done: bool,
}

impl LeftHandSolver {
    /// Create a solver for a robot in a maze
    pub fn new(maze: Maze, robot: Robot) -> Self {
        Self {
            start: robot.pos,
            maze,
            robot,
            initial_robot: robot,
            moves: 0,
            done: false,
        }
    }

    /// Put the robot back at its starting pose
    pub fn reset(&mut self) {
        self.robot = self.initial_robot;
        self.moves = 0;
        self.done = false;
    }

    /// The robot's current pose
    pub fn robot(&self) -> Robot {
        self.robot
    }

    /// The maze being solved
    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    /// Cells travelled so far
    pub fn moves(&self) -> usize {
        self.moves
    }

    /// Whether the run has ended
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Make one decision and move one cell
    pub fn step(&mut self) -> Result<SolverStep, MazeError> {
        if self.done {
            return Ok(if self.robot.pos == self.start {
                SolverStep::ReturnedToStart
            } else {
                SolverStep::BoxedIn
            });
        }

        if !self.robot.has_wall_left(&self.maze) {
            self.robot.turn_left();
        } else if !self.robot.has_wall_front(&self.maze) {
            // Keep going straight
        } else if !self.robot.has_wall_right(&self.maze) {
            self.robot.turn_right();
        } else if !self.robot.has_wall_back(&self.maze) {
            self.robot.turn_left();
            self.robot.turn_left();
        } else {
            log::warn!("robot is boxed in at ({}, {})", self.robot.pos.x, self.robot.pos.y);
            self.done = true;
            return Ok(SolverStep::BoxedIn);
        }

        self.robot.move_forward(&self.maze)?;
        self.moves += 1;

        if self.robot.pos == self.start {
            log::info!("robot returned to start after {} moves", self.moves);
            self.done = true;
            return Ok(SolverStep::ReturnedToStart);
        }
        Ok(SolverStep::Moved)
    }
}

/// Sketch pacing the solver at a fixed number of moves per second
pub struct MazeSketch {
    solver: LeftHandSolver,
    /// Seconds between solver steps
    step_interval: f32,
    accumulator: f32,
    failed: bool,
}

impl MazeSketch {
    /// Wrap a solver for paced animation
    pub fn new(solver: LeftHandSolver, steps_per_second: f32) -> Self {
        Self {
            solver,
            step_interval: 1.0 / steps_per_second,
            accumulator: 0.0,
            failed: false,
        }
    }

    /// A small ring-corridor maze with the robot in the top-left corner
    pub fn demo() -> Self {
        let mut maze = Maze::open(4, 4);
        // Wall off the 2x2 center block so the corridor is one cell wide
        for &(x, y, dir) in &[
            (1, 1, Direction::Up),
            (2, 1, Direction::Up),
            (1, 1, Direction::Left),
            (1, 2, Direction::Left),
            (1, 2, Direction::Down),
            (2, 2, Direction::Down),
            (2, 1, Direction::Right),
            (2, 2, Direction::Right),
        ] {
            maze.set_wall(GridPos::new(x, y), dir, true)
                .expect("demo walls are in bounds");
        }
        let robot = Robot::new(GridPos::new(0, 0), Direction::Right);
        Self::new(LeftHandSolver::new(maze, robot), 5.0)
    }

    /// The wrapped solver
    pub fn solver(&self) -> &LeftHandSolver {
        &self.solver
    }
}

impl Sketch for MazeSketch {
    fn name(&self) -> &str {
        "maze-robot"
    }

    fn update(&mut self, dt: f32) {
        if self.solver.is_done() || self.failed {
            return;
        }
        self.accumulator += dt;
        while self.accumulator >= self.step_interval && !self.solver.is_done() {
            self.accumulator -= self.step_interval;
            match self.solver.step() {
                Ok(SolverStep::Moved) => {}
                Ok(outcome) => log::info!("maze run finished: {:?}", outcome),
                Err(e) => {
                    log::error!("maze run failed: {}", e);
                    self.failed = true;
                    return;
                }
            }
        }
    }

    fn status(&self) -> SketchStatus {
        if self.solver.is_done() || self.failed {
            SketchStatus::Finished
        } else {
            SketchStatus::Running
        }
    }

    fn reset(&mut self) {
        self.solver.reset();
        self.accumulator = 0.0;
        self.failed = false;
    }
}
