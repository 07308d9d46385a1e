//! Pricing formulas and the shop catalog.
//!
//! Everything here is a pure function of the current levels and balances.
//! The catalog is rebuilt every time the shop is drawn or a purchase is
//! attempted; nothing is cached.

use serde::Serialize;

use super::state::{GameState, MAX_UPGRADE_LEVEL};

pub const GUN_BASE_PRICE: u64 = 8;
/// Added to the new gun price to form the next price step.
const GUN_STEP_BONUS: u64 = 8;
pub const GUN_BASE_DAMAGE: f64 = 30.0;
pub const GUN_DAMAGE_GROWTH: f64 = 1.2;
/// Shots per second of every gun sold in the shop.
pub const GUN_ATTACK_SPEED: f64 = 1.0;

const BED_BASE_COST: u64 = 25;
const PLAYBOX_BASE_COST: u64 = 200;
const DOOR_BASE_COST: u64 = 16;

pub const TRAP_PRICE: u64 = 5;
pub const TRAP_DEFENSE: u32 = 5;
pub const GUARD_PRICE: u64 = 10;
pub const GUARD_DEFENSE: u32 = 10;

// ── Formulas ────────────────────────────────────────────────────

/// Max HP of a door at `level` (player and dreamers alike).
pub fn door_max_hp(level: u32) -> u32 {
    2000 + 300 * level.saturating_sub(1)
}

pub fn hunter_hp(level: u32) -> u32 {
    (500.0 * 1.4_f64.powi(level.saturating_sub(1) as i32)) as u32
}

pub fn hunter_attack(level: u32) -> u32 {
    (50.0 * 1.25_f64.powi(level.saturating_sub(1) as i32)) as u32
}

/// Units per second produced by a bed or playbox at `level`.
pub fn production_per_second(level: u32) -> u64 {
    if level == 0 {
        0
    } else {
        1u64 << (level - 1)
    }
}

/// Coins to raise a bed from `level` to `level + 1`.
pub fn bed_cost(level: u32) -> u64 {
    BED_BASE_COST << level.saturating_sub(1)
}

/// Coins to raise a playbox from `level` to `level + 1`.
pub fn playbox_cost(level: u32) -> u64 {
    PLAYBOX_BASE_COST << level
}

/// Coins to raise the door from `level` to `level + 1`.
pub fn door_cost(level: u32) -> u64 {
    DOOR_BASE_COST << level.saturating_sub(1)
}

/// Damage of the next gun given how many are already owned.
pub fn gun_damage(owned: usize) -> u32 {
    (GUN_BASE_DAMAGE * GUN_DAMAGE_GROWTH.powi(owned as i32)) as u32
}

/// Advance the gun price recurrence by one purchase.
///
/// Returns the new `(price, step)`. Starting from `(8, 8)` this yields
/// prices 8, 16, 40, 88, 184, ... with the step doubling after the first
/// purchase.
pub fn next_gun_price(price: u64, step: u64) -> (u64, u64) {
    let next = price + step;
    (next, next + GUN_STEP_BONUS)
}

// ── Catalog ─────────────────────────────────────────────────────

/// Shop tabs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Category {
    CoinUpgrades,
    DiamondUpgrades,
    Weapons,
}

impl Category {
    pub fn all() -> &'static [Category] {
        &[
            Category::CoinUpgrades,
            Category::DiamondUpgrades,
            Category::Weapons,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Category::CoinUpgrades => "Coins",
            Category::DiamondUpgrades => "Diamonds",
            Category::Weapons => "Weapons",
        }
    }

    pub fn next(&self) -> Category {
        match self {
            Category::CoinUpgrades => Category::DiamondUpgrades,
            Category::DiamondUpgrades => Category::Weapons,
            Category::Weapons => Category::CoinUpgrades,
        }
    }

    pub fn prev(&self) -> Category {
        match self {
            Category::CoinUpgrades => Category::Weapons,
            Category::DiamondUpgrades => Category::CoinUpgrades,
            Category::Weapons => Category::DiamondUpgrades,
        }
    }
}

/// What an offer buys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ShopItem {
    Bed,
    Playbox,
    Door,
    Trap,
    Guard,
    Gun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Price {
    Coins(u64),
    Diamonds(u64),
}

impl Price {
    pub fn is_affordable(&self, state: &GameState) -> bool {
        match *self {
            Price::Coins(n) => state.coins >= n,
            Price::Diamonds(n) => state.diamonds >= n,
        }
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Price::Coins(n) => write!(f, "{} coins", n),
            Price::Diamonds(n) => write!(f, "{} diamonds", n),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Offer {
    pub item: ShopItem,
    pub name: String,
    pub price: Price,
    pub description: String,
    pub affordable: bool,
}

impl Offer {
    fn new(
        state: &GameState,
        item: ShopItem,
        name: String,
        price: Price,
        description: String,
    ) -> Self {
        Self {
            item,
            name,
            price,
            description,
            affordable: price.is_affordable(state),
        }
    }
}

/// Next purchasable offer of every line in `category`, maxed lines omitted.
pub fn offers(state: &GameState, category: Category) -> Vec<Offer> {
    let mut out = Vec::new();
    match category {
        Category::CoinUpgrades => {
            if state.bed_level < MAX_UPGRADE_LEVEL {
                let next = state.bed_level + 1;
                out.push(Offer::new(
                    state,
                    ShopItem::Bed,
                    format!("Bed Lv{}", next),
                    Price::Coins(bed_cost(state.bed_level)),
                    format!("+{} coins/s", production_per_second(next)),
                ));
            }
            if state.playbox_level < MAX_UPGRADE_LEVEL {
                let next = state.playbox_level + 1;
                out.push(Offer::new(
                    state,
                    ShopItem::Playbox,
                    format!("Playbox Lv{}", next),
                    Price::Coins(playbox_cost(state.playbox_level)),
                    format!("+{} diamonds/s", production_per_second(next)),
                ));
            }
            if state.door_level < MAX_UPGRADE_LEVEL {
                let next = state.door_level + 1;
                out.push(Offer::new(
                    state,
                    ShopItem::Door,
                    format!("Door Lv{}", next),
                    Price::Coins(door_cost(state.door_level)),
                    format!("{} max HP, full repair", door_max_hp(next)),
                ));
            }
        }
        Category::DiamondUpgrades => {
            out.push(Offer::new(
                state,
                ShopItem::Trap,
                "Trap".into(),
                Price::Diamonds(TRAP_PRICE),
                format!("+{} defense", TRAP_DEFENSE),
            ));
            out.push(Offer::new(
                state,
                ShopItem::Guard,
                "Guard".into(),
                Price::Diamonds(GUARD_PRICE),
                format!("+{} defense", GUARD_DEFENSE),
            ));
        }
        Category::Weapons => {
            let owned = state.guns.len();
            out.push(Offer::new(
                state,
                ShopItem::Gun,
                format!("Gun #{}", owned + 1),
                Price::Coins(state.gun_price),
                format!("{} dmg, {:.1} shots/s", gun_damage(owned), GUN_ATTACK_SPEED),
            ));
        }
    }
    out
}
