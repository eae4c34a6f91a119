//! Towers of Hanoi
//!
//! The tower stack with its size-ordering invariant, breadth-first search
//! over game states, and a sketch that replays the found solution one move
//! per pacing interval.

use sketchbook_core::{Sketch, SketchStatus};
use std::collections::HashSet;

/// Waves of breadth-first expansion before the search gives up
const BFS_WATCHDOG: usize = 1000;

/// A single tower: a bounded stack of plates
///
/// Plates are sizes (1 = smallest); a plate may only rest on a larger one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tower {
    stack: Vec<u8>,
    capacity: usize,
}

impl Tower {
    /// Create an empty tower holding at most `capacity` plates
    pub fn new(capacity: usize) -> Self {
        Self {
            stack: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Create a tower filled with `capacity` plates, largest at the bottom
    pub fn full(capacity: usize) -> Self {
        let mut tower = Self::new(capacity);
        for plate in (1..=capacity as u8).rev() {
            tower.stack.push(plate);
        }
        tower
    }

    /// Size of the plate on top, or None when empty
    pub fn peek(&self) -> Option<u8> {
        self.stack.last().copied()
    }

    /// Plates from bottom to top
    pub fn plates(&self) -> &[u8] {
        &self.stack
    }

    /// Number of plates on the tower
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Whether the tower is empty
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Try to add a plate on top
    ///
    /// Fails when the tower is at capacity, the plate is not a valid size,
    /// or a smaller plate is already on top.
    pub fn push(&mut self, plate: u8) -> bool {
        if plate == 0 || self.stack.len() >= self.capacity {
            return false;
        }
        if let Some(top) = self.peek() {
            if plate >= top {
                return false;
            }
        }
        self.stack.push(plate);
        true
    }

    /// Remove and return the top plate
    pub fn pop(&mut self) -> Option<u8> {
        self.stack.pop()
    }

    /// Replace the stack contents, validating the ordering invariant
    ///
    /// On any violation (too many plates, or a plate resting on a smaller
    /// one) the previous contents are restored and false is returned.
    pub fn set_stack(&mut self, plates: &[u8]) -> bool {
        if plates.len() > self.capacity {
            return false;
        }
        let backup = std::mem::take(&mut self.stack);
        for (i, &plate) in plates.iter().enumerate() {
            if plate == 0 || (i > 0 && plate >= plates[i - 1]) {
                self.stack = backup;
                return false;
            }
            self.stack.push(plate);
        }
        true
    }

    /// Remove every plate
    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

/// A full game position: three towers
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HanoiState {
    pub towers: [Tower; 3],
}

impl HanoiState {
    /// The starting position: every plate on the left tower
    pub fn initial(plates: usize) -> Self {
        Self {
            towers: [Tower::full(plates), Tower::new(plates), Tower::new(plates)],
        }
    }

    /// The goal position: every plate moved to the middle tower
    pub fn goal(plates: usize) -> Self {
        Self {
            towers: [Tower::new(plates), Tower::full(plates), Tower::new(plates)],
        }
    }

    /// Whether this position is the goal
    pub fn is_goal(&self) -> bool {
        self.towers[0].is_empty()
            && self.towers[2].is_empty()
            && !self.towers[1].is_empty()
    }

    /// All positions reachable by one legal plate move
    pub fn neighbours(&self) -> Vec<HanoiState> {
        let mut result = Vec::new();
        for from in 0..3 {
            let Some(plate) = self.towers[from].peek() else {
                continue;
            };
            for to in 0..3 {
                if to == from {
                    continue;
                }
                let mut next = self.clone();
                if next.towers[to].push(plate) {
                    next.towers[from].pop();
                    result.push(next);
                }
            }
        }
        result
    }
}

/// Solver failure
#[derive(Debug, PartialEq, Eq)]
pub enum HanoiError {
    /// The search exceeded its expansion budget
    WatchdogTripped,
    /// The goal is unreachable from the start position
    NoSolution,
}

impl std::fmt::Display for HanoiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HanoiError::WatchdogTripped => write!(f, "search watchdog tripped"),
            HanoiError::NoSolution => write!(f, "no solution exists"),
        }
    }
}

impl std::error::Error for HanoiError {}

/// Breadth-first search from `start` to the all-on-middle goal
///
/// Returns the full state sequence including both endpoints. BFS explores
/// positions in move-count order, so the solution is optimal.
pub fn solve_bfs(start: &HanoiState) -> Result<Vec<HanoiState>, HanoiError> {
    struct Node {
        state: HanoiState,
        parent: Option<usize>,
    }

    if start.is_goal() {
        return Ok(vec![start.clone()]);
    }

    let mut arena = vec![Node {
        state: start.clone(),
        parent: None,
    }];
    let mut visited: HashSet<HanoiState> = HashSet::new();
    visited.insert(start.clone());
    let mut frontier = vec![0usize];

    for _wave in 0..BFS_WATCHDOG {
        if frontier.is_empty() {
            return Err(HanoiError::NoSolution);
        }

        let mut next_frontier = Vec::new();
        for &index in &frontier {
            let neighbours = arena[index].state.neighbours();
            for neighbour in neighbours {
                if !visited.insert(neighbour.clone()) {
                    continue;
                }
                let is_goal = neighbour.is_goal();
                arena.push(Node {
                    state: neighbour,
                    parent: Some(index),
                });
                let new_index = arena.len() - 1;
                if is_goal {
                    // Walk the parent chain back to the start
                    let mut path = Vec::new();
                    let mut cursor = Some(new_index);
                    while let Some(i) = cursor {
                        path.push(arena[i].state.clone());
                        cursor = arena[i].parent;
                    }
                    path.reverse();
                    return Ok(path);
                }
                next_frontier.push(new_index);
            }
        }
        frontier = next_frontier;
    }

    log::warn!("hanoi search watchdog tripped after {} waves", BFS_WATCHDOG);
    Err(HanoiError::WatchdogTripped)
}

/// Sketch replaying a solved game one move per interval
pub struct HanoiSketch {
    solution: Vec<HanoiState>,
    cursor: usize,
    /// Seconds between replayed moves
    move_interval: f32,
    accumulator: f32,
}

impl HanoiSketch {
    /// Solve the puzzle for `plates` plates and prepare the replay
    pub fn new(plates: usize, move_interval: f32) -> Result<Self, HanoiError> {
        let solution = solve_bfs(&HanoiState::initial(plates))?;
        log::info!(
            "solved {} plates in {} moves",
            plates,
            solution.len() - 1
        );
        Ok(Self {
            solution,
            cursor: 0,
            move_interval,
            accumulator: 0.0,
        })
    }

    /// The position currently shown
    pub fn current_state(&self) -> &HanoiState {
        &self.solution[self.cursor]
    }

    /// Number of moves in the full solution
    pub fn move_count(&self) -> usize {
        self.solution.len() - 1
    }

    /// Moves replayed so far
    pub fn moves_played(&self) -> usize {
        self.cursor
    }
}

impl Sketch for HanoiSketch {
    fn name(&self) -> &str {
        "towers-of-hanoi"
    }

    fn update(&mut self, dt: f32) {
        if self.cursor + 1 >= self.solution.len() {
            return;
        }
        self.accumulator += dt;
        while self.accumulator >= self.move_interval && self.cursor + 1 < self.solution.len() {
            self.accumulator -= self.move_interval;
            self.cursor += 1;
        }
    }

    fn status(&self) -> SketchStatus {
        if self.cursor + 1 >= self.solution.len() {
            SketchStatus::Finished
        } else {
            SketchStatus::Running
        }
    }

    fn reset(&mut self) {
        self.cursor = 0;
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_ordering_invariant() {
        let mut tower = Tower::new(3);
        assert!(tower.push(3));
        assert!(tower.push(1));
        // A larger plate cannot rest on a smaller one
        assert!(!tower.push(2));
        assert_eq!(tower.peek(), Some(1));
    }

    #[test]
    fn test_push_respects_capacity() {
        let mut tower = Tower::new(2);
        assert!(tower.push(3));
        assert!(tower.push(2));
        assert!(!tower.push(1));
    }

    #[test]
    fn test_push_rejects_zero() {
        let mut tower = Tower::new(3);
        assert!(!tower.push(0));
    }

    #[test]
    fn test_full_tower() {
        let tower = Tower::full(4);
        assert_eq!(tower.plates(), &[4, 3, 2, 1]);
        assert_eq!(tower.peek(), Some(1));
    }

    #[test]
    fn test_pop() {
        let mut tower = Tower::full(2);
        assert_eq!(tower.pop(), Some(1));
        assert_eq!(tower.pop(), Some(2));
        assert_eq!(tower.pop(), None);
    }

    #[test]
    fn test_set_stack_validates_and_restores() {
        let mut tower = Tower::full(3);
        // Larger plate on top of a smaller one is invalid
        assert!(!tower.set_stack(&[2, 3]));
        // Original contents survive the failed assignment
        assert_eq!(tower.plates(), &[3, 2, 1]);

        assert!(tower.set_stack(&[3, 1]));
        assert_eq!(tower.plates(), &[3, 1]);

        assert!(tower.set_stack(&[]));
        assert!(tower.is_empty());
    }

    #[test]
    fn test_set_stack_rejects_overflow() {
        let mut tower = Tower::new(2);
        assert!(!tower.set_stack(&[3, 2, 1]));
    }

    #[test]
    fn test_initial_state_neighbours() {
        let state = HanoiState::initial(3);
        // Only the top plate of the left tower can move, to either peg
        assert_eq!(state.neighbours().len(), 2);
    }

    #[test]
    fn test_bfs_finds_optimal_solution() {
        let solution = solve_bfs(&HanoiState::initial(3)).unwrap();
        // 2^3 - 1 moves, so 8 states including both endpoints
        assert_eq!(solution.len(), 8);
        assert_eq!(solution[0], HanoiState::initial(3));
        assert!(solution.last().unwrap().is_goal());
        assert_eq!(*solution.last().unwrap(), HanoiState::goal(3));
    }

    #[test]
    fn test_bfs_single_plate() {
        let solution = solve_bfs(&HanoiState::initial(1)).unwrap();
        assert_eq!(solution.len(), 2);
    }

    #[test]
    fn test_bfs_consecutive_states_differ_by_one_move() {
        let solution = solve_bfs(&HanoiState::initial(3)).unwrap();
        for pair in solution.windows(2) {
            assert!(pair[0].neighbours().contains(&pair[1]));
        }
    }

    #[test]
    fn test_watchdog_trips_on_deep_puzzle() {
        // Ten plates need 1023 moves, past the expansion budget
        let result = solve_bfs(&HanoiState::initial(10));
        assert_eq!(result, Err(HanoiError::WatchdogTripped));
    }

    #[test]
    fn test_sketch_replays_solution() {
        let mut sketch = HanoiSketch::new(3, 0.5).unwrap();
        assert_eq!(sketch.move_count(), 7);
        assert_eq!(sketch.moves_played(), 0);
        assert_eq!(sketch.status(), SketchStatus::Running);

        sketch.update(0.5);
        assert_eq!(sketch.moves_played(), 1);

        for _ in 0..20 {
            sketch.update(0.5);
        }
        assert_eq!(sketch.moves_played(), 7);
        assert_eq!(sketch.status(), SketchStatus::Finished);
        assert!(sketch.current_state().is_goal());

        sketch.reset();
        assert_eq!(sketch.moves_played(), 0);
        assert_eq!(sketch.status(), SketchStatus::Running);
    }
}
