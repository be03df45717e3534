mod cell;
mod clock;
mod grid;
mod interaction;
mod rules;
mod state;

pub use cell::{Cell, CellAction, Color, Rect, NEIGHBOR_COUNT};
pub use clock::SimulationClock;
pub use grid::Grid;
pub use interaction::{
    ButtonMask, Command, DragState, InputEvent, Interaction, PointerButton, PointerOutcome,
};
pub use rules::{compute_next_generation, step, Transition};
pub use state::{Flow, SimulationState, Stats};
