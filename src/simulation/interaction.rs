use crate::simulation::cell::CellAction;
use crate::simulation::grid::Grid;

/// Mouse buttons the canvas distinguishes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

/// Set of mouse buttons held during a motion event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonMask(u8);

impl ButtonMask {
    pub const NONE: ButtonMask = ButtonMask(0);
    pub const PRIMARY: ButtonMask = ButtonMask(1 << 0);
    pub const SECONDARY: ButtonMask = ButtonMask(1 << 1);
    pub const MIDDLE: ButtonMask = ButtonMask(1 << 2);

    pub fn of(button: PointerButton) -> Self {
        match button {
            PointerButton::Primary => Self::PRIMARY,
            PointerButton::Secondary => Self::SECONDARY,
            PointerButton::Middle => Self::MIDDLE,
        }
    }

    pub fn contains(self, other: ButtonMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn set(&mut self, button: PointerButton, held: bool) {
        let bit = Self::of(button).0;
        if held {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }
}

/// Keyboard commands understood by the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    TogglePlay,
    StepOnce,
    Reset,
    Randomize,
}

/// Discrete input delivered to the simulation, coordinates in canvas pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    MouseDown { x: f32, y: f32, button: PointerButton },
    MouseMove { x: f32, y: f32, buttons: ButtonMask },
    Key(Command),
    Quit,
}

/// Drag gesture state.
///
/// The paint value is captured when the drag starts, so every cell in one
/// stroke ends up in the same state even if the anchor changes mid-drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { anchor: usize, paint: bool },
}

/// What a pointer event did to the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Nothing changed
    Ignored,
    /// A cell was edited and autoplay should stop
    Edited,
    /// The primary button is pressed over a gap; autoplay should stop
    Paused,
}

/// Pointer-to-cell state machine for click-to-toggle and drag-to-paint.
#[derive(Clone, Debug, Default)]
pub struct Interaction {
    drag: DragState,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    /// Mouse button pressed at (x, y).
    ///
    /// A plain click is a drag with no motion: the cell under the pointer is
    /// toggled and becomes the anchor of a new stroke.
    pub fn mouse_down(&mut self, grid: &mut Grid, x: f32, y: f32, button: PointerButton) -> PointerOutcome {
        if button != PointerButton::Primary {
            return PointerOutcome::Ignored;
        }

        match grid.hit_test(x, y) {
            Some(anchor) => {
                grid.apply(anchor, CellAction::Toggle);
                let paint = grid.is_alive(anchor);
                let cell = grid.cell(anchor);
                log::debug!("Toggled cell ({}, {}) -> {}", cell.col, cell.row, paint);
                self.drag = DragState::Dragging { anchor, paint };
                PointerOutcome::Edited
            }
            None => {
                self.drag = DragState::Idle;
                PointerOutcome::Paused
            }
        }
    }

    /// Pointer moved to (x, y) with `buttons` held.
    pub fn mouse_move(&mut self, grid: &mut Grid, x: f32, y: f32, buttons: ButtonMask) -> PointerOutcome {
        if !buttons.contains(ButtonMask::PRIMARY) {
            self.drag = DragState::Idle;
            return PointerOutcome::Ignored;
        }

        let DragState::Dragging { paint, .. } = self.drag else {
            return PointerOutcome::Paused;
        };

        match grid.hit_test(x, y) {
            Some(index) => {
                if grid.is_alive(index) != paint {
                    let cell = grid.cell(index);
                    log::debug!("Painted cell ({}, {}) -> {}", cell.col, cell.row, paint);
                }
                grid.apply(index, CellAction::set(paint));
                PointerOutcome::Edited
            }
            None => PointerOutcome::Paused,
        }
    }
}
