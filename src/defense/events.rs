//! Player-facing notifications.
//!
//! Simulation code appends typed [`GameEvent`]s to an [`EventLog`]; the
//! renderer decides how much of it to show. Entries are stamped with the
//! simulation clock, offset by the length of earlier runs, so the log reads
//! like one timeline across restarts.
//!
//! The log is bounded: it keeps the newest 200 entries.

use std::collections::VecDeque;
use std::fmt;

use super::catalog::Offer;
use super::purchase::PurchaseError;

/// Oldest entries are dropped beyond this many.
const LOG_CAPACITY: usize = 200;

/// `mm:ss` of a millisecond clock.
pub fn format_clock(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    Welcome,
    NewGame,
    Purchased(Offer),
    PurchaseRejected(PurchaseError),
    HunterSpawned { level: u32, hp: u32 },
    HunterAlreadyActive,
    DoorHit { damage: u32, remaining: u32 },
    DreamerHit { name: String, damage: u32, remaining: u32 },
    DreamerFell { name: String },
    DreamerUpgraded { name: String, level: u32 },
    Victory { level: u32 },
    Defeat,
}

impl GameEvent {
    /// Important events are highlighted by the renderer.
    pub fn is_important(&self) -> bool {
        matches!(
            self,
            GameEvent::Welcome
                | GameEvent::NewGame
                | GameEvent::HunterSpawned { .. }
                | GameEvent::DreamerFell { .. }
                | GameEvent::Victory { .. }
                | GameEvent::Defeat
        )
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::Welcome => write!(
                f,
                "Welcome to Haunted Room Defense! Buy beds for coins, guns for the hunter."
            ),
            GameEvent::NewGame => write!(f, "A new night begins."),
            GameEvent::Purchased(offer) => write!(f, "Bought {} for {}", offer.name, offer.price),
            GameEvent::PurchaseRejected(err) => write!(f, "{}", err),
            GameEvent::HunterSpawned { level, hp } => {
                write!(f, "Dream Hunter Lv{} appeared! ({} HP)", level, hp)
            }
            GameEvent::HunterAlreadyActive => write!(f, "A hunter is already prowling."),
            GameEvent::DoorHit { damage, remaining } => {
                write!(f, "Hunter struck your door for {} ({} left)", damage, remaining)
            }
            GameEvent::DreamerHit {
                name,
                damage,
                remaining,
            } => write!(f, "Hunter struck {}'s door for {} ({} left)", name, damage, remaining),
            GameEvent::DreamerFell { name } => write!(f, "{}'s door was broken!", name),
            GameEvent::DreamerUpgraded { name, level } => {
                write!(f, "{} reinforced their door to Lv{}", name, level)
            }
            GameEvent::Victory { level } => {
                write!(f, "The Lv{} hunter fell to your guns. You survived the night!", level)
            }
            GameEvent::Defeat => write!(f, "Your door was broken. Game over."),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    pub at_ms: u64,
    pub event: GameEvent,
}

impl LogEntry {
    pub fn timestamp(&self) -> String {
        format_clock(self.at_ms)
    }
}

/// Bounded, append-only notification sink.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    entries: VecDeque<LogEntry>,
    /// Total length of the runs before the current one.
    run_offset_ms: u64,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `event` stamped with `at_ms` of the current run's clock.
    pub fn push(&mut self, at_ms: u64, event: GameEvent) {
        let at_ms = self.run_offset_ms + at_ms;
        self.entries.push_back(LogEntry { at_ms, event });
        if self.entries.len() > LOG_CAPACITY {
            self.entries.pop_front();
        }
    }

    /// Start stamping a new run that follows one lasting `previous_run_ms`.
    pub fn begin_run(&mut self, previous_run_ms: u64) {
        self.run_offset_ms += previous_run_ms;
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &LogEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The newest `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().skip(self.entries.len().saturating_sub(n))
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    #[cfg(test)]
    pub fn contains(&self, pred: impl Fn(&GameEvent) -> bool) -> bool {
        self.entries.iter().any(|e| pred(&e.event))
    }
}
