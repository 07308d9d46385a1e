//! Balance simulator for Haunted Room Defense.
//! Run with: cargo test simulate_ -- --nocapture

use serde::Serialize;

use super::catalog::Category;
use super::events::GameEvent;
use super::session::{Session, COMBAT_TICKS_PER_ECONOMY_TICK};

/// Purchase policy the bot follows each second.
#[derive(Clone, Copy, Debug, Serialize)]
enum Strategy {
    /// Never buys anything.
    Idle,
    /// Buys every affordable gun, then beds with what is left.
    GunsFirst,
}

#[derive(Debug, Serialize)]
struct Summary {
    strategy: Strategy,
    seconds: u32,
    won: bool,
    lost: bool,
    guns: usize,
    bed_level: u32,
    door_hp: u32,
    hunter_hp: u32,
    coins_left: u64,
    purchases: u32,
}

fn buy_first_affordable(session: &mut Session, category: Category) -> bool {
    let Some(index) = session
        .catalog(category)
        .iter()
        .position(|offer| offer.affordable)
    else {
        return false;
    };
    session.purchase(category, index).is_ok()
}

fn simulate(strategy: Strategy, max_seconds: u32) -> Summary {
    let mut session = Session::new();
    let mut purchases = 0;
    let mut seconds = 0;

    while seconds < max_seconds && !session.state().game_over {
        session.tick(COMBAT_TICKS_PER_ECONOMY_TICK);
        seconds += 1;

        if let Strategy::GunsFirst = strategy {
            while buy_first_affordable(&mut session, Category::Weapons) {
                purchases += 1;
            }
            if session.state().guns.len() >= 2
                && buy_first_affordable(&mut session, Category::CoinUpgrades)
            {
                purchases += 1;
            }
        }
    }

    let state = session.state();
    let summary = Summary {
        strategy,
        seconds,
        won: state.game_won,
        lost: state.game_over && !state.game_won,
        guns: state.guns.len(),
        bed_level: state.bed_level,
        door_hp: state.door_hp,
        hunter_hp: state.hunter.hp,
        coins_left: state.coins,
        purchases,
    };

    eprintln!("\n┌─── {:?} ({}s) ─────────────────────", strategy, seconds);
    for entry in session.log().entries().filter(|e| e.event.is_important()) {
        eprintln!("│ {} {}", entry.timestamp(), entry.event);
    }
    let victory_logged = session
        .log()
        .contains(|e| matches!(e, GameEvent::Victory { .. }));
    eprintln!("│ victory logged: {}", victory_logged);
    eprintln!(
        "│ {}",
        serde_json::to_string(&summary).unwrap_or_else(|e| e.to_string())
    );
    eprintln!("└────────────────────────────────────");
    summary
}

#[test]
fn simulate_guns_first_wins_quickly() {
    let summary = simulate(Strategy::GunsFirst, 300);
    assert!(summary.won, "{:?}", summary);
    assert!(summary.seconds <= 120, "took {}s", summary.seconds);
    assert!(summary.guns >= 1);
    assert!(summary.door_hp > 0);
}

#[test]
fn simulate_idle_loses() {
    let summary = simulate(Strategy::Idle, 300);
    assert!(summary.lost, "{:?}", summary);
    assert_eq!(summary.purchases, 0);
    assert_eq!(summary.door_hp, 0);
    // 40 door hits of 50 damage every 3s after the 10s spawn.
    assert!(summary.seconds >= 120 && summary.seconds <= 140, "{}s", summary.seconds);
}
