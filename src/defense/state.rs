//! Haunted Room Defense game state definitions.

use serde::Serialize;

use super::catalog;

/// Upgrade lines (bed, playbox, door, dreamer doors) stop at this level.
pub const MAX_UPGRADE_LEVEL: u32 = 10;

/// Dreamers sharing the haunted room with the player.
const DREAMER_NAMES: &[&str] = &["Mira", "Tobi", "Lune", "Kai"];

/// An automatic weapon. Fires at the active hunter on its own cadence.
#[derive(Clone, Debug, Serialize)]
pub struct Gun {
    pub damage: u32,
    /// Shots per second.
    pub attack_speed: f64,
    pub last_shot_ms: u64,
    pub shots_fired: u32,
}

impl Gun {
    /// Milliseconds between two shots.
    pub fn cooldown_ms(&self) -> u64 {
        (1000.0 / self.attack_speed) as u64
    }

    pub fn is_ready(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.last_shot_ms) >= self.cooldown_ms()
    }
}

/// An NPC sleeper with a door of its own.
#[derive(Clone, Debug, Serialize)]
pub struct Dreamer {
    pub name: String,
    pub door_level: u32,
    pub door_hp: u32,
    pub door_max_hp: u32,
    pub last_upgrade_ms: u64,
}

impl Dreamer {
    pub fn new(name: &str) -> Self {
        let hp = catalog::door_max_hp(1);
        Self {
            name: name.to_string(),
            door_level: 1,
            door_hp: hp,
            door_max_hp: hp,
            last_upgrade_ms: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.door_hp > 0
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Room {
    pub name: String,
    pub characters: Vec<Dreamer>,
}

/// The Dream Hunter. At most one is ever active.
#[derive(Clone, Debug, Serialize)]
pub struct Hunter {
    pub active: bool,
    pub hp: u32,
    pub max_hp: u32,
    /// Raised on every defeat, never lowered.
    pub level: u32,
    pub attack: u32,
    pub last_attack_ms: u64,
    /// Approach progress toward the door, 0..=10.
    pub position: u32,
    /// Wall-clock second of the last dreamer strike.
    pub last_strike_second: Option<u64>,
}

impl Hunter {
    fn dormant() -> Self {
        Self {
            active: false,
            hp: 0,
            max_hp: 0,
            level: 1,
            attack: 0,
            last_attack_ms: 0,
            position: 0,
            last_strike_second: None,
        }
    }
}

/// Full state of one run. Replaced wholesale on restart.
#[derive(Clone, Debug, Serialize)]
pub struct GameState {
    pub coins: u64,
    pub diamonds: u64,
    pub coins_per_second: u64,
    pub diamonds_per_second: u64,

    pub door_level: u32,
    pub door_hp: u32,
    pub door_max_hp: u32,

    pub bed_level: u32,
    pub playbox_level: u32,

    pub guns: Vec<Gun>,
    /// Price of the next gun.
    pub gun_price: u64,
    /// Amount the gun price grows by on the next purchase.
    pub gun_price_step: u64,

    pub player_defense: u32,
    pub player_max_defense: u32,

    pub hunter: Hunter,
    pub rooms: Vec<Room>,

    pub game_over: bool,
    pub game_won: bool,

    /// Latest simulation time seen by the combat tick.
    pub clock_ms: u64,
}

impl GameState {
    pub fn new() -> Self {
        let door_hp = catalog::door_max_hp(1);
        let bed_level = 1;
        Self {
            coins: 0,
            diamonds: 0,
            coins_per_second: catalog::production_per_second(bed_level),
            diamonds_per_second: 0,
            door_level: 1,
            door_hp,
            door_max_hp: door_hp,
            bed_level,
            playbox_level: 0,
            guns: Vec::new(),
            gun_price: catalog::GUN_BASE_PRICE,
            gun_price_step: catalog::GUN_BASE_PRICE,
            player_defense: 0,
            player_max_defense: 0,
            hunter: Hunter::dormant(),
            rooms: vec![Room {
                name: "Haunted Room".into(),
                characters: DREAMER_NAMES.iter().map(|n| Dreamer::new(n)).collect(),
            }],
            game_over: false,
            game_won: false,
            clock_ms: 0,
        }
    }

    /// The dreamers the hunter can target.
    pub fn dreamers(&self) -> &[Dreamer] {
        self.rooms
            .first()
            .map(|r| r.characters.as_slice())
            .unwrap_or(&[])
    }

    pub fn dreamers_mut(&mut self) -> &mut [Dreamer] {
        match self.rooms.first_mut() {
            Some(room) => room.characters.as_mut_slice(),
            None => &mut [],
        }
    }

    /// Combined damage output of all guns per second.
    pub fn total_dps(&self) -> f64 {
        self.guns
            .iter()
            .map(|g| g.damage as f64 * g.attack_speed)
            .sum()
    }

    /// Refresh derived production rates from the current levels.
    pub fn refresh_rates(&mut self) {
        self.coins_per_second = catalog::production_per_second(self.bed_level);
        self.diamonds_per_second = catalog::production_per_second(self.playbox_level);
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
