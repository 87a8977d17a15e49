//! The tick driver: owns the raindrops, advances time, detects the end.
//!
//! The update loop is strictly sequential: one tick steps every drop in
//! creation order against the shared grid and visit log, then checks
//! whether every drop sits at the global minimum elevation (converged)
//! or the step budget ran out. Terminal states are absorbing.

use std::collections::HashSet;

use rand::Rng;

use crate::config::SimConfig;
use crate::drop::Raindrop;
use crate::error::Result;
use crate::grid::Grid;
use crate::types::Coord;
use crate::visit_log::VisitLog;

/// The driver's state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    /// Still ticking.
    Running,
    /// Every drop reached a point of minimum elevation.
    Converged,
    /// The step budget ran out with drops still above the minimum.
    BudgetExhausted,
}

/// One simulation run over an immutable grid.
///
/// This is the only place where drops are advanced; the grid, the
/// global minimum and the outlet set are computed once in
/// [`Simulation::new`] and never change afterwards.
#[derive(Debug)]
pub struct Simulation {
    grid: Grid,
    config: SimConfig,
    drops: Vec<Raindrop>,
    log: VisitLog,
    min_elevation: f64,
    outlets: HashSet<Coord>,
    tick: u32,
    state: RunState,
}

impl Simulation {
    /// Builds a run with randomly placed drops.
    ///
    /// Validates `config` against the grid first, then draws
    /// `num_of_drops` positions uniformly from
    /// `[0, length] x [0, length]` using the caller's RNG, so a seeded
    /// RNG makes the whole run reproducible.
    pub fn new(grid: Grid, config: SimConfig, rng: &mut impl Rng) -> Result<Self> {
        let drops = (0..config.num_of_drops)
            .map(|_| Raindrop::spawn(config.length, rng))
            .collect();
        Self::from_drops(grid, config, drops)
    }

    /// Builds a run with explicitly placed drops.
    ///
    /// Positions are clamped into `[0, length]`. Mostly useful for
    /// scenario tests that need a known starting coordinate.
    pub fn from_drops(grid: Grid, config: SimConfig, drops: Vec<Raindrop>) -> Result<Self> {
        config.validate(&grid)?;

        let drops = drops
            .into_iter()
            .map(|d| Raindrop::at(d.x, d.y, config.length))
            .collect();
        let min_elevation = grid.min_elevation(config.length);
        let outlets = grid.outlet_cells(config.length).into_iter().collect();

        Ok(Self {
            grid,
            config,
            drops,
            log: VisitLog::new(),
            min_elevation,
            outlets,
            tick: 0,
            state: RunState::Running,
        })
    }

    /// Advances the run by one tick and returns the resulting state.
    ///
    /// Steps every drop in creation order, increments the tick, then
    /// evaluates the stop conditions. Convergence wins over budget
    /// exhaustion when both hold on the same tick. Calling this in a
    /// terminal state is a no-op.
    pub fn step_tick(&mut self) -> RunState {
        if self.state != RunState::Running {
            return self.state;
        }

        for drop in &mut self.drops {
            drop.step(&self.grid, &mut self.log);
        }
        self.tick += 1;

        if self.unconverged() == 0 {
            self.state = RunState::Converged;
        } else if self.tick >= self.config.num_of_steps {
            self.state = RunState::BudgetExhausted;
        }
        self.state
    }

    /// Ticks until a terminal state is reached and returns it.
    pub fn run(&mut self) -> RunState {
        while self.state == RunState::Running {
            self.step_tick();
        }
        self.state
    }

    /// Number of drops not currently at the global minimum elevation.
    pub fn unconverged(&self) -> usize {
        self.drops
            .iter()
            .filter(|d| self.grid.elevation(d.x, d.y) != self.min_elevation)
            .count()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn drops(&self) -> &[Raindrop] {
        &self.drops
    }

    /// The shared visit log accumulated so far.
    pub fn visits(&self) -> &VisitLog {
        &self.log
    }

    /// The global minimum elevation within the run's window.
    pub fn min_elevation(&self) -> f64 {
        self.min_elevation
    }

    /// Every coordinate holding the global minimum elevation.
    pub fn outlets(&self) -> &HashSet<Coord> {
        &self.outlets
    }
}
