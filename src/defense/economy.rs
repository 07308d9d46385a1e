//! Economy tick: production levels become income.

use super::state::GameState;

/// Apply one second of income. Inert once the run is over.
pub fn advance_economy_tick(state: &mut GameState) {
    if state.game_over {
        return;
    }
    state.refresh_rates();
    state.coins += state.coins_per_second;
    state.diamonds += state.diamonds_per_second;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_ticks_from_start() {
        let mut state = GameState::new();
        for _ in 0..5 {
            advance_economy_tick(&mut state);
        }
        assert_eq!(state.coins, 5);
        assert_eq!(state.diamonds, 0);
    }

    #[test]
    fn rates_are_rederived_from_levels() {
        let mut state = GameState::new();
        state.bed_level = 4;
        state.playbox_level = 2;
        // Stale rates are corrected by the tick.
        state.coins_per_second = 999;
        advance_economy_tick(&mut state);
        assert_eq!(state.coins_per_second, 8);
        assert_eq!(state.diamonds_per_second, 2);
        assert_eq!(state.coins, 8);
        assert_eq!(state.diamonds, 2);
    }

    #[test]
    fn bed_level_zero_produces_nothing() {
        let mut state = GameState::new();
        state.bed_level = 0;
        advance_economy_tick(&mut state);
        assert_eq!(state.coins_per_second, 0);
        assert_eq!(state.coins, 0);
    }

    #[test]
    fn no_income_after_game_over() {
        let mut state = GameState::new();
        state.game_over = true;
        advance_economy_tick(&mut state);
        assert_eq!(state.coins, 0);
    }
}
