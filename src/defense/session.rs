//! A single run of the game: the state aggregate, its event log, and the
//! tick cadences that drive economy, combat and hunter spawns.
//!
//! Front-ends only talk to [`Session`]. They read state through [`Session::state`]
//! and change it through the operations below; nothing else mutates the
//! aggregate.

use super::catalog::{self, Category, Offer};
use super::combat;
use super::economy;
use super::events::{EventLog, GameEvent};
use super::purchase::{self, PurchaseError};
use super::state::GameState;

/// Length of one combat tick.
pub const COMBAT_TICK_MS: u64 = 100;
/// Combat ticks per economy tick (1 second).
pub const COMBAT_TICKS_PER_ECONOMY_TICK: u32 = 10;
/// Economy ticks between automatic spawn attempts.
pub const ECONOMY_TICKS_PER_SPAWN: u32 = 10;

pub struct Session {
    state: GameState,
    log: EventLog,
    /// Simulation time of the last combat tick.
    now_ms: u64,
    combat_ticks: u32,
    spawn_counter: u32,
}

impl Session {
    pub fn new() -> Self {
        let mut log = EventLog::new();
        log.push(0, GameEvent::Welcome);
        Self {
            state: GameState::new(),
            log,
            now_ms: 0,
            combat_ticks: 0,
            spawn_counter: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the state, for debugging dumps.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn catalog(&self, category: Category) -> Vec<Offer> {
        catalog::offers(&self.state, category)
    }

    /// Buy the `index`-th offer of `category`. Both outcomes are logged.
    pub fn purchase(&mut self, category: Category, index: usize) -> Result<Offer, PurchaseError> {
        let at = self.state.clock_ms;
        match purchase::purchase(&mut self.state, category, index) {
            Ok(offer) => {
                self.log.push(at, GameEvent::Purchased(offer.clone()));
                Ok(offer)
            }
            Err(err) => {
                self.log.push(at, GameEvent::PurchaseRejected(err.clone()));
                Err(err)
            }
        }
    }

    /// Spawn a hunter now. No-op if one is already active.
    pub fn spawn_hunter(&mut self) -> bool {
        if self.state.hunter.active && !self.state.game_over {
            self.log
                .push(self.state.clock_ms, GameEvent::HunterAlreadyActive);
            return false;
        }
        combat::spawn_hunter(&mut self.state, &mut self.log)
    }

    pub fn advance_economy_tick(&mut self) {
        economy::advance_economy_tick(&mut self.state);
    }

    pub fn advance_combat_tick(&mut self, now_ms: u64) {
        combat::advance_combat_tick(&mut self.state, &mut self.log, now_ms);
    }

    /// Run `delta_ticks` combat ticks of [`COMBAT_TICK_MS`] each, with the
    /// economy tick and the spawn counter riding on the same clock.
    pub fn tick(&mut self, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            if self.state.game_over {
                return;
            }
            self.now_ms += COMBAT_TICK_MS;
            self.advance_combat_tick(self.now_ms);

            self.combat_ticks += 1;
            if self.combat_ticks < COMBAT_TICKS_PER_ECONOMY_TICK {
                continue;
            }
            self.combat_ticks = 0;
            self.advance_economy_tick();

            self.spawn_counter += 1;
            if self.spawn_counter >= ECONOMY_TICKS_PER_SPAWN {
                self.spawn_counter = 0;
                combat::spawn_hunter(&mut self.state, &mut self.log);
            }
        }
    }

    /// Replace the run wholesale. The log is kept so the previous run's
    /// ending stays visible; the new run's entries continue its timeline.
    pub fn restart(&mut self) {
        log::info!("restarting run");
        self.log.begin_run(self.now_ms.max(self.state.clock_ms));
        self.state = GameState::new();
        self.now_ms = 0;
        self.combat_ticks = 0;
        self.spawn_counter = 0;
        self.log.push(0, GameEvent::NewGame);
    }

    /// Simulation time of the current run.
    pub fn elapsed_ms(&self) -> u64 {
        self.now_ms
    }

    /// Whole seconds until the next automatic spawn attempt.
    pub fn next_spawn_in_secs(&self) -> u32 {
        ECONOMY_TICKS_PER_SPAWN - self.spawn_counter
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
