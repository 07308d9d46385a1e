//! Purchase resolution: validate an offer, deduct its price, apply its effect.

use thiserror::Error;

use super::catalog::{self, Category, Offer, Price, ShopItem};
use super::state::{GameState, Gun};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("no offer at slot {index}")]
    InvalidSelection { index: usize },
    #[error("not enough funds (requires {price})")]
    InsufficientFunds { price: Price },
    #[error("the night is over; restart to shop again")]
    GameOver,
}

/// Buy the `index`-th offer of `category`.
///
/// The catalog is re-derived from the current state. On failure nothing is
/// deducted and nothing changes.
pub fn purchase(
    state: &mut GameState,
    category: Category,
    index: usize,
) -> Result<Offer, PurchaseError> {
    if state.game_over {
        return Err(PurchaseError::GameOver);
    }
    let offer = catalog::offers(state, category)
        .into_iter()
        .nth(index)
        .ok_or(PurchaseError::InvalidSelection { index })?;
    if !offer.affordable {
        return Err(PurchaseError::InsufficientFunds { price: offer.price });
    }

    match offer.price {
        Price::Coins(n) => state.coins -= n,
        Price::Diamonds(n) => state.diamonds -= n,
    }
    apply(state, offer.item);
    log::debug!("purchased {} for {}", offer.name, offer.price);
    Ok(offer)
}

fn apply(state: &mut GameState, item: ShopItem) {
    match item {
        ShopItem::Bed => {
            state.bed_level += 1;
            state.refresh_rates();
        }
        ShopItem::Playbox => {
            state.playbox_level += 1;
            state.refresh_rates();
        }
        ShopItem::Door => {
            state.door_level += 1;
            state.door_max_hp = catalog::door_max_hp(state.door_level);
            state.door_hp = state.door_max_hp;
        }
        ShopItem::Trap => {
            state.player_defense += catalog::TRAP_DEFENSE;
            state.player_max_defense += catalog::TRAP_DEFENSE;
        }
        ShopItem::Guard => {
            state.player_defense += catalog::GUARD_DEFENSE;
            state.player_max_defense += catalog::GUARD_DEFENSE;
        }
        ShopItem::Gun => {
            state.guns.push(Gun {
                damage: catalog::gun_damage(state.guns.len()),
                attack_speed: catalog::GUN_ATTACK_SPEED,
                last_shot_ms: state.clock_ms,
                shots_fired: 0,
            });
            let (price, step) = catalog::next_gun_price(state.gun_price, state.gun_price_step);
            state.gun_price = price;
            state.gun_price_step = step;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_gun_purchase() {
        let mut state = GameState::new();
        state.coins = 8;
        let offer = purchase(&mut state, Category::Weapons, 0).unwrap();
        assert_eq!(offer.item, ShopItem::Gun);
        assert_eq!(state.coins, 0);
        assert_eq!(state.guns.len(), 1);
        assert_eq!(state.guns[0].damage, 30);
        assert_eq!(state.gun_price, 16);
    }

    #[test]
    fn five_gun_purchases_follow_recurrence() {
        let mut state = GameState::new();
        state.coins = 10_000;
        let mut paid = Vec::new();
        for _ in 0..5 {
            let before = state.coins;
            purchase(&mut state, Category::Weapons, 0).unwrap();
            paid.push(before - state.coins);
        }
        assert_eq!(paid, vec![8, 16, 40, 88, 184]);
        let damage: Vec<u32> = state.guns.iter().map(|g| g.damage).collect();
        assert_eq!(damage, vec![30, 36, 43, 51, 62]);
    }

    #[test]
    fn insufficient_funds_leaves_state_unchanged() {
        let mut state = GameState::new();
        state.coins = 7;
        state.diamonds = 3;
        let err = purchase(&mut state, Category::Weapons, 0).unwrap_err();
        assert_eq!(err, PurchaseError::InsufficientFunds { price: Price::Coins(8) });
        assert_eq!(state.coins, 7);
        assert_eq!(state.diamonds, 3);
        assert!(state.guns.is_empty());
        assert_eq!(state.gun_price, 8);
    }

    #[test]
    fn invalid_selection() {
        let mut state = GameState::new();
        state.coins = 1_000;
        let err = purchase(&mut state, Category::CoinUpgrades, 3).unwrap_err();
        assert_eq!(err, PurchaseError::InvalidSelection { index: 3 });
        assert_eq!(state.coins, 1_000);
    }

    #[test]
    fn bed_upgrade_raises_income() {
        let mut state = GameState::new();
        state.coins = 25;
        purchase(&mut state, Category::CoinUpgrades, 0).unwrap();
        assert_eq!(state.bed_level, 2);
        assert_eq!(state.coins_per_second, 2);
        assert_eq!(state.coins, 0);
    }

    #[test]
    fn playbox_starts_diamond_income() {
        let mut state = GameState::new();
        state.coins = 200;
        purchase(&mut state, Category::CoinUpgrades, 1).unwrap();
        assert_eq!(state.playbox_level, 1);
        assert_eq!(state.diamonds_per_second, 1);
    }

    #[test]
    fn door_upgrade_heals_and_raises_max() {
        let mut state = GameState::new();
        state.coins = 16;
        state.door_hp = 400;
        purchase(&mut state, Category::CoinUpgrades, 2).unwrap();
        assert_eq!(state.door_level, 2);
        assert_eq!(state.door_max_hp, 2300);
        assert_eq!(state.door_hp, 2300);
    }

    #[test]
    fn trap_and_guard_raise_defense() {
        let mut state = GameState::new();
        state.diamonds = 15;
        purchase(&mut state, Category::DiamondUpgrades, 0).unwrap();
        purchase(&mut state, Category::DiamondUpgrades, 1).unwrap();
        assert_eq!(state.player_defense, 15);
        assert_eq!(state.player_max_defense, 15);
        assert_eq!(state.diamonds, 0);
    }

    #[test]
    fn defense_items_repeat_without_limit() {
        let mut state = GameState::new();
        state.diamonds = 50;
        for _ in 0..10 {
            purchase(&mut state, Category::DiamondUpgrades, 0).unwrap();
        }
        assert_eq!(state.player_defense, 50);
    }

    #[test]
    fn maxed_bed_shifts_indices() {
        let mut state = GameState::new();
        state.bed_level = 10;
        state.coins = 200;
        // Slot 0 is now the playbox.
        let offer = purchase(&mut state, Category::CoinUpgrades, 0).unwrap();
        assert_eq!(offer.item, ShopItem::Playbox);
        assert_eq!(state.bed_level, 10);
    }

    #[test]
    fn purchases_rejected_after_game_over() {
        let mut state = GameState::new();
        state.coins = 100;
        state.game_over = true;
        assert_eq!(
            purchase(&mut state, Category::Weapons, 0),
            Err(PurchaseError::GameOver)
        );
        assert_eq!(state.coins, 100);
    }

    #[test]
    fn gun_is_stamped_with_clock() {
        let mut state = GameState::new();
        state.coins = 8;
        state.clock_ms = 12_300;
        purchase(&mut state, Category::Weapons, 0).unwrap();
        assert_eq!(state.guns[0].last_shot_ms, 12_300);
    }
}
