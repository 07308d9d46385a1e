//! Haunted Room Defense: an idle defense game against the Dream Hunter.

pub mod actions;
pub mod catalog;
pub mod combat;
pub mod economy;
pub mod events;
pub mod purchase;
pub mod render;
pub mod session;
pub mod state;

#[cfg(test)]
mod simulator;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent, Nav};

use catalog::Category;
use session::Session;

/// The session plus the shop cursor the player is steering.
pub struct DefenseGame {
    pub session: Session,
    pub category: Category,
    pub selected: usize,
}

impl DefenseGame {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            category: Category::CoinUpgrades,
            selected: 0,
        }
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Nav(nav) => self.handle_nav(*nav),
            InputEvent::Key(c) => self.handle_key(*c),
            InputEvent::Click(id) => self.handle_click(*id),
        }
    }

    fn handle_nav(&mut self, nav: Nav) -> bool {
        match nav {
            Nav::Up => self.move_selection(-1),
            Nav::Down => self.move_selection(1),
            Nav::Left => self.switch_category(self.category.prev()),
            Nav::Right => self.switch_category(self.category.next()),
            Nav::Confirm => self.buy_selected(),
        }
        true
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'k' => self.move_selection(-1),
            'j' => self.move_selection(1),
            'i' | ' ' => self.buy_selected(),
            '\t' => self.switch_category(self.category.next()),
            '1' | '2' | '3' => {
                let idx = (key as u8 - b'1') as usize;
                if let Some(c) = Category::all().get(idx) {
                    self.switch_category(*c);
                }
            }
            'h' => {
                self.session.spawn_hunter();
            }
            'r' if self.session.state().game_over => self.restart(),
            _ => return false,
        }
        true
    }

    fn handle_click(&mut self, id: u16) -> bool {
        match id {
            actions::SPAWN_HUNTER => {
                self.session.spawn_hunter();
            }
            actions::RESTART if self.session.state().game_over => self.restart(),
            actions::SELECT_UP => self.move_selection(-1),
            actions::SELECT_DOWN => self.move_selection(1),
            actions::BUY_SELECTED => self.buy_selected(),
            actions::NEXT_TAB => self.switch_category(self.category.next()),
            id if (actions::TAB_BASE..actions::TAB_BASE + 3).contains(&id) => {
                let idx = (id - actions::TAB_BASE) as usize;
                if let Some(c) = Category::all().get(idx) {
                    self.switch_category(*c);
                }
            }
            id if id >= actions::BUY_OFFER_BASE => {
                self.selected = (id - actions::BUY_OFFER_BASE) as usize;
                self.buy_selected();
            }
            _ => return false,
        }
        true
    }

    pub fn tick(&mut self, delta_ticks: u32) {
        self.session.tick(delta_ticks);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(self, f, area, click_state);
    }

    fn offer_count(&self) -> usize {
        self.session.catalog(self.category).len()
    }

    fn move_selection(&mut self, delta: i32) {
        let count = self.offer_count();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as i32 + delta;
        self.selected = next.clamp(0, count as i32 - 1) as usize;
    }

    fn switch_category(&mut self, category: Category) {
        self.category = category;
        self.selected = 0;
    }

    fn buy_selected(&mut self) {
        // Failures are reported through the session's event log.
        let _ = self.session.purchase(self.category, self.selected);
        let count = self.offer_count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    fn restart(&mut self) {
        self.session.restart();
        self.switch_category(Category::CoinUpgrades);
    }
}

impl Default for DefenseGame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use events::GameEvent;

    #[test]
    fn buy_gun_via_keys() {
        let mut game = DefenseGame::new();
        game.tick(80);
        game.handle_input(&InputEvent::Key('3'));
        assert_eq!(game.category, Category::Weapons);
        game.handle_input(&InputEvent::Key('i'));
        assert_eq!(game.session.state().guns.len(), 1);
        assert_eq!(game.session.state().coins, 0);
    }

    #[test]
    fn selection_is_clamped_to_catalog() {
        let mut game = DefenseGame::new();
        for _ in 0..10 {
            game.handle_input(&InputEvent::Nav(Nav::Down));
        }
        assert_eq!(game.selected, 2);
        for _ in 0..10 {
            game.handle_input(&InputEvent::Key('k'));
        }
        assert_eq!(game.selected, 0);
    }

    #[test]
    fn switching_tabs_resets_selection() {
        let mut game = DefenseGame::new();
        game.handle_input(&InputEvent::Key('j'));
        game.handle_input(&InputEvent::Nav(Nav::Right));
        assert_eq!(game.category, Category::DiamondUpgrades);
        assert_eq!(game.selected, 0);
        game.handle_input(&InputEvent::Key('\t'));
        assert_eq!(game.category, Category::Weapons);
        game.handle_input(&InputEvent::Nav(Nav::Left));
        assert_eq!(game.category, Category::DiamondUpgrades);
    }

    #[test]
    fn click_offer_buys_it() {
        let mut game = DefenseGame::new();
        game.tick(160);
        game.handle_input(&InputEvent::Click(actions::BUY_OFFER_BASE + 2));
        assert_eq!(game.session.state().door_level, 2);
    }

    #[test]
    fn click_tab_switches_category() {
        let mut game = DefenseGame::new();
        game.handle_input(&InputEvent::Click(actions::TAB_BASE + 2));
        assert_eq!(game.category, Category::Weapons);
    }

    #[test]
    fn failed_buy_is_logged_not_fatal() {
        let mut game = DefenseGame::new();
        assert!(game.handle_input(&InputEvent::Nav(Nav::Confirm)));
        assert!(game
            .session
            .log()
            .contains(|e| matches!(e, GameEvent::PurchaseRejected(_))));
    }

    #[test]
    fn spawn_key_summons_hunter() {
        let mut game = DefenseGame::new();
        game.handle_input(&InputEvent::Key('h'));
        assert!(game.session.state().hunter.active);
    }

    #[test]
    fn restart_only_after_game_over() {
        let mut game = DefenseGame::new();
        game.tick(30);
        assert!(!game.handle_input(&InputEvent::Key('r')));
        assert_eq!(game.session.state().coins, 3);

        game.session.spawn_hunter();
        // Idle until the door breaks.
        game.tick(10 * 200);
        assert!(game.session.state().game_over);
        assert!(game.handle_input(&InputEvent::Key('r')));
        assert!(!game.session.state().game_over);
        assert_eq!(game.session.state().coins, 0);
    }

    #[test]
    fn unknown_key_not_consumed() {
        let mut game = DefenseGame::new();
        assert!(!game.handle_input(&InputEvent::Key('z')));
    }
}
