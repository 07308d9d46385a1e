//! Semantic action IDs for Haunted Room Defense click targets.

// ── Run control ─────────────────────────────────────────────────
pub const SPAWN_HUNTER: u16 = 1;
pub const RESTART: u16 = 2;

// ── Shop navigation ─────────────────────────────────────────────
pub const SELECT_UP: u16 = 5;
pub const SELECT_DOWN: u16 = 6;
pub const BUY_SELECTED: u16 = 7;
pub const NEXT_TAB: u16 = 8;

// ── Shop tabs (base + category index) ───────────────────────────
pub const TAB_BASE: u16 = 10;

// ── Offer purchase (base + offer index) ─────────────────────────
pub const BUY_OFFER_BASE: u16 = 100;
