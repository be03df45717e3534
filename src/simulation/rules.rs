use crate::simulation::cell::CellAction;
use crate::simulation::grid::Grid;

/// Changes produced by one generation of Conway's rules.
///
/// Built from a frozen view of the grid, then applied in a separate pass so
/// that no neighbour count ever observes a cell that already changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// Dead cells with exactly three live neighbours
    pub births: Vec<usize>,
    /// Live cells with fewer than two or more than three live neighbours
    pub deaths: Vec<usize>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.births.is_empty() && self.deaths.is_empty()
    }

    /// Write the changes into the grid. Births and deaths are disjoint, so
    /// the order of the two passes does not matter.
    pub fn apply(&self, grid: &mut Grid) {
        for &index in &self.births {
            grid.apply(index, CellAction::SetAlive);
        }
        for &index in &self.deaths {
            grid.apply(index, CellAction::SetDead);
        }
    }
}

/// Next state of a single cell under B3/S23
pub fn next_state(alive: bool, live_neighbors: usize) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Classify every cell of the current generation without mutating anything.
pub fn compute_next_generation(grid: &Grid) -> Transition {
    let mut transition = Transition::default();

    for index in 0..grid.cell_count() {
        let alive = grid.is_alive(index);
        let live_neighbors = grid.live_neighbors(index);

        match (alive, next_state(alive, live_neighbors)) {
            // Underpopulation or overpopulation
            (true, false) => transition.deaths.push(index),
            // Reproduction
            (false, true) => transition.births.push(index),
            _ => {}
        }
    }

    transition
}

/// Advance the grid by one generation and return what changed
pub fn step(grid: &mut Grid) -> Transition {
    let transition = compute_next_generation(grid);
    transition.apply(grid);
    transition
}
