use std::time::{Duration, Instant};

use rand::Rng;

use crate::config::{SimConfig, RANDOM_FILL_DENSITY};
use crate::simulation::clock::SimulationClock;
use crate::simulation::grid::Grid;
use crate::simulation::interaction::{Command, InputEvent, Interaction, PointerOutcome};
use crate::simulation::rules::{self, Transition};

/// Whether the event loop should keep running after an input event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Running totals shown in the window title
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub generation: u64,
    pub last_births: usize,
    pub last_deaths: usize,
}

/// Grid, clock and pointer state of one running simulation.
///
/// Input events and frame ticks are the only entry points; both run to
/// completion before the next one is handled.
#[derive(Clone, Debug)]
pub struct SimulationState {
    pub grid: Grid,
    pub clock: SimulationClock,
    pub interaction: Interaction,
    pub stats: Stats,
}

impl SimulationState {
    pub fn new(config: &SimConfig, now: Instant) -> Self {
        Self {
            grid: Grid::from_config(config),
            clock: SimulationClock::new(config.steps_per_second, now),
            interaction: Interaction::new(),
            stats: Stats::default(),
        }
    }

    /// Handle one input event
    pub fn handle_event<R: Rng + ?Sized>(&mut self, event: InputEvent, rng: &mut R) -> Flow {
        match event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::MouseDown { x, y, button } => {
                let outcome = self.interaction.mouse_down(&mut self.grid, x, y, button);
                self.pause_on_edit(outcome);
            }
            InputEvent::MouseMove { x, y, buttons } => {
                let outcome = self.interaction.mouse_move(&mut self.grid, x, y, buttons);
                self.pause_on_edit(outcome);
            }
            InputEvent::Key(command) => self.run_command(command, rng),
        }
        Flow::Continue
    }

    fn pause_on_edit(&mut self, outcome: PointerOutcome) {
        if outcome != PointerOutcome::Ignored && self.clock.is_playing() {
            log::info!("Paused for editing");
            self.clock.pause();
        }
    }

    fn run_command<R: Rng + ?Sized>(&mut self, command: Command, rng: &mut R) {
        match command {
            Command::TogglePlay => {
                let playing = self.clock.toggle_play();
                log::info!("Simulation {}", if playing { "playing" } else { "paused" });
            }
            Command::StepOnce => {
                log::debug!("Single step requested");
                self.clock.request_step();
            }
            Command::Reset => {
                self.grid.reset_all();
                self.stats = Stats::default();
                log::info!("Grid reset");
            }
            Command::Randomize => {
                self.clock.pause();
                self.grid.randomize(rng, RANDOM_FILL_DENSITY);
                self.stats = Stats::default();
                log::info!("Random soup with {} live cells", self.grid.population());
            }
        }
    }

    /// Advance the clock to `now` and run a generation if one is due
    pub fn update(&mut self, now: Instant) -> Option<Transition> {
        self.clock.tick(now);
        self.run_frame()
    }

    /// Advance the clock by `delta` and run a generation if one is due
    pub fn update_by(&mut self, delta: Duration) -> Option<Transition> {
        self.clock.advance(delta);
        self.run_frame()
    }

    fn run_frame(&mut self) -> Option<Transition> {
        if !self.clock.should_step() {
            return None;
        }
        self.clock.mark_stepped();

        let transition = rules::step(&mut self.grid);
        self.stats.generation += 1;
        self.stats.last_births = transition.births.len();
        self.stats.last_deaths = transition.deaths.len();
        log::debug!(
            "Generation {}: +{} -{}",
            self.stats.generation,
            self.stats.last_births,
            self.stats.last_deaths
        );
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::cell::CellAction;
    use crate::simulation::interaction::{ButtonMask, PointerButton};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const PERIOD: Duration = Duration::from_millis(50);

    fn state() -> (SimulationState, StdRng) {
        let config = SimConfig::with_grid(5, 5, 10.0);
        (SimulationState::new(&config, Instant::now()), StdRng::seed_from_u64(3))
    }

    fn blinker(state: &mut SimulationState) {
        for col in 1..4 {
            state.grid.set_cell(col, 2, CellAction::SetAlive);
        }
    }

    #[test]
    fn test_paused_by_default() {
        let (mut state, _) = state();
        blinker(&mut state);
        assert!(state.update_by(PERIOD).is_none());
        assert_eq!(state.stats.generation, 0);
        assert_eq!(state.grid.population(), 3);
    }

    #[test]
    fn test_play_steps_on_fixed_frames_only() {
        let (mut state, mut rng) = state();
        blinker(&mut state);
        state.handle_event(InputEvent::Key(Command::TogglePlay), &mut rng);

        assert!(state.update_by(Duration::from_millis(20)).is_none());
        assert!(state.update_by(Duration::from_millis(40)).is_some());
        assert!(state.grid.cell_at(2, 1).alive, "blinker turned vertical");
        assert!(state.update_by(Duration::from_millis(20)).is_none());
        assert_eq!(state.stats.generation, 1);
        assert_eq!(state.stats.last_births, 2);
        assert_eq!(state.stats.last_deaths, 2);
    }

    #[test]
    fn test_step_once_runs_single_generation() {
        let (mut state, mut rng) = state();
        blinker(&mut state);
        state.handle_event(InputEvent::Key(Command::StepOnce), &mut rng);

        assert!(state.update_by(PERIOD).is_some());
        assert!(state.update_by(PERIOD).is_none(), "request is consumed");
        assert_eq!(state.stats.generation, 1);
        assert!(!state.clock.is_playing());
    }

    #[test]
    fn test_click_pauses_autoplay() {
        let (mut state, mut rng) = state();
        state.handle_event(InputEvent::Key(Command::TogglePlay), &mut rng);
        assert!(state.clock.is_playing());

        let down = InputEvent::MouseDown { x: 15.0, y: 15.0, button: PointerButton::Primary };
        state.handle_event(down, &mut rng);
        assert!(!state.clock.is_playing());
        assert!(state.grid.cell_at(1, 1).alive);
    }

    #[test]
    fn test_hover_does_not_pause() {
        let (mut state, mut rng) = state();
        state.handle_event(InputEvent::Key(Command::TogglePlay), &mut rng);
        let hover = InputEvent::MouseMove { x: 15.0, y: 15.0, buttons: ButtonMask::NONE };
        state.handle_event(hover, &mut rng);
        assert!(state.clock.is_playing());
    }

    #[test]
    fn test_reset_keeps_play_state() {
        let (mut state, mut rng) = state();
        blinker(&mut state);
        state.handle_event(InputEvent::Key(Command::TogglePlay), &mut rng);
        state.update_by(PERIOD);

        state.handle_event(InputEvent::Key(Command::Reset), &mut rng);
        assert_eq!(state.grid.population(), 0);
        assert_eq!(state.stats, Stats::default());
        assert!(state.clock.is_playing());
    }

    #[test]
    fn test_randomize_pauses_and_fills() {
        let (mut state, mut rng) = state();
        state.handle_event(InputEvent::Key(Command::TogglePlay), &mut rng);
        state.handle_event(InputEvent::Key(Command::Randomize), &mut rng);
        assert!(!state.clock.is_playing());
        assert!(state.grid.population() <= state.grid.cell_count());
    }

    #[test]
    fn test_quit() {
        let (mut state, mut rng) = state();
        assert_eq!(state.handle_event(InputEvent::Quit, &mut rng), Flow::Quit);
        assert_eq!(
            state.handle_event(InputEvent::Key(Command::StepOnce), &mut rng),
            Flow::Continue
        );
    }

    #[test]
    fn test_drag_stroke_survives_step_mid_drag() {
        let (mut state, mut rng) = state();
        // Lone cell at (0, 0), the drag anchor, dies on the next generation
        let down = InputEvent::MouseDown { x: 5.0, y: 5.0, button: PointerButton::Primary };
        state.handle_event(down, &mut rng);
        state.handle_event(InputEvent::Key(Command::StepOnce), &mut rng);
        state.update_by(PERIOD);
        assert!(!state.grid.cell_at(0, 0).alive);

        let drag = InputEvent::MouseMove { x: 45.0, y: 45.0, buttons: ButtonMask::PRIMARY };
        state.handle_event(drag, &mut rng);
        assert!(state.grid.cell_at(4, 4).alive, "stroke still paints live cells");
    }
}
