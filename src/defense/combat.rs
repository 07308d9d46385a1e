//! Combat resolution between the Dream Hunter, the player's guns, the door
//! and the dreamers.
//!
//! All cadences are elapsed-time checks against timestamps stored in the
//! state; `now_ms` is supplied by the caller, so tests drive time directly.

use super::catalog;
use super::events::{EventLog, GameEvent};
use super::state::{GameState, MAX_UPGRADE_LEVEL};

pub const DOOR_ATTACK_INTERVAL_MS: u64 = 3_000;
/// The hunter turns on a dreamer on every wall-clock second divisible by this.
pub const DREAMER_STRIKE_PERIOD_SECS: u64 = 5;
pub const DREAMER_REGEN: u32 = 2;
pub const DREAMER_UPGRADE_INTERVAL_MS: u64 = 30_000;
/// Position value at which the hunter reaches the door.
pub const APPROACH_STEPS: u32 = 10;

/// Spawn a hunter at the current `hunter.level`.
///
/// Returns false (and changes nothing) if one is already active or the run
/// is over.
pub fn spawn_hunter(state: &mut GameState, log: &mut EventLog) -> bool {
    if state.game_over || state.hunter.active {
        return false;
    }
    let now = state.clock_ms;
    let hunter = &mut state.hunter;
    hunter.active = true;
    hunter.max_hp = catalog::hunter_hp(hunter.level);
    hunter.hp = hunter.max_hp;
    hunter.attack = catalog::hunter_attack(hunter.level);
    hunter.last_attack_ms = now;
    hunter.position = 0;
    hunter.last_strike_second = None;

    log::info!("hunter spawned: level {} hp {}", hunter.level, hunter.hp);
    log.push(
        now,
        GameEvent::HunterSpawned {
            level: hunter.level,
            hp: hunter.hp,
        },
    );
    true
}

/// Advance combat to `now_ms`.
///
/// Order: gun fire, then the door attack, then the dreamer strike. A victory
/// or a broken door ends the invocation immediately.
pub fn advance_combat_tick(state: &mut GameState, log: &mut EventLog, now_ms: u64) {
    if state.game_over {
        return;
    }
    state.clock_ms = state.clock_ms.max(now_ms);
    if !state.hunter.active {
        return;
    }
    if fire_guns(state, log, now_ms) {
        return;
    }
    if attack_door(state, log, now_ms) {
        return;
    }
    strike_dreamer(state, log, now_ms);
}

/// Returns true if the hunter was defeated.
fn fire_guns(state: &mut GameState, log: &mut EventLog, now_ms: u64) -> bool {
    let hunter = &mut state.hunter;
    let mut defeated = false;
    for gun in state.guns.iter_mut().filter(|g| g.is_ready(now_ms)) {
        gun.last_shot_ms = now_ms;
        gun.shots_fired += 1;
        hunter.hp = hunter.hp.saturating_sub(gun.damage);
        if hunter.hp == 0 {
            defeated = true;
            break;
        }
    }
    if !defeated {
        return false;
    }

    let level = hunter.level;
    hunter.active = false;
    hunter.level += 1;
    state.game_won = true;
    state.game_over = true;
    log::info!("hunter level {} defeated, run won", level);
    log.push(now_ms, GameEvent::Victory { level });
    true
}

/// Returns true if the door broke.
fn attack_door(state: &mut GameState, log: &mut EventLog, now_ms: u64) -> bool {
    let hunter = &mut state.hunter;
    let elapsed = now_ms.saturating_sub(hunter.last_attack_ms);
    if elapsed < DOOR_ATTACK_INTERVAL_MS {
        hunter.position = (elapsed * APPROACH_STEPS as u64 / DOOR_ATTACK_INTERVAL_MS) as u32;
        return false;
    }
    hunter.last_attack_ms = now_ms;
    hunter.position = 0;

    let damage = hunter.attack;
    state.door_hp = state.door_hp.saturating_sub(damage);
    log.push(
        now_ms,
        GameEvent::DoorHit {
            damage,
            remaining: state.door_hp,
        },
    );
    if state.door_hp > 0 {
        return false;
    }

    state.game_over = true;
    log::info!("door broken, run lost");
    log.push(now_ms, GameEvent::Defeat);
    true
}

fn strike_dreamer(state: &mut GameState, log: &mut EventLog, now_ms: u64) {
    let second = now_ms / 1000;
    if second % DREAMER_STRIKE_PERIOD_SECS != 0
        || state.hunter.last_strike_second == Some(second)
    {
        return;
    }
    state.hunter.last_strike_second = Some(second);

    let alive: Vec<usize> = state
        .dreamers()
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_alive())
        .map(|(i, _)| i)
        .collect();
    if alive.is_empty() {
        return;
    }
    let target = alive[(second % alive.len() as u64) as usize];
    let damage = state.hunter.attack / 2;

    let Some(dreamer) = state.dreamers_mut().get_mut(target) else {
        return;
    };
    dreamer.door_hp = dreamer.door_hp.saturating_sub(damage);
    log.push(
        now_ms,
        GameEvent::DreamerHit {
            name: dreamer.name.clone(),
            damage,
            remaining: dreamer.door_hp,
        },
    );
    if !dreamer.is_alive() {
        log.push(
            now_ms,
            GameEvent::DreamerFell {
                name: dreamer.name.clone(),
            },
        );
    } else if dreamer.door_hp < dreamer.door_max_hp {
        dreamer.door_hp = (dreamer.door_hp + DREAMER_REGEN).min(dreamer.door_max_hp);
    }

    if dreamer.door_level < MAX_UPGRADE_LEVEL
        && now_ms.saturating_sub(dreamer.last_upgrade_ms) >= DREAMER_UPGRADE_INTERVAL_MS
    {
        dreamer.door_level += 1;
        dreamer.door_max_hp = catalog::door_max_hp(dreamer.door_level);
        dreamer.door_hp = dreamer.door_max_hp;
        dreamer.last_upgrade_ms = now_ms;
        log.push(
            now_ms,
            GameEvent::DreamerUpgraded {
                name: dreamer.name.clone(),
                level: dreamer.door_level,
            },
        );
    }
}
