mod defense;
mod input;
mod logging;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use defense::session::COMBAT_TICK_MS;
use defense::DefenseGame;
use input::{pixel_to_cell, ClickState, InputEvent, Nav};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use time::FrameClock;

/// Query the grid container's bounding rect and convert a pixel position to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let cell = pixel_to_cell(
        mouse_x as f64 - rect.left(),
        mouse_y as f64 - rect.top(),
        rect.width(),
        rect.height(),
        cs.terminal_cols,
        cs.terminal_rows,
    );
    log::debug!(
        "click: pixel=({}, {}) cell={:?} targets={}",
        mouse_x,
        mouse_y,
        cell,
        cs.targets.len()
    );
    cell
}

fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}

fn dump_snapshot(game: &DefenseGame) {
    match serde_json::to_string_pretty(&game.session.snapshot()) {
        Ok(json) => log::info!("state snapshot:\n{}", json),
        Err(err) => log::error!("snapshot failed: {}", err),
    }
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    let game = Rc::new(RefCell::new(DefenseGame::new()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let clock = Rc::new(RefCell::new(FrameClock::new(COMBAT_TICK_MS)));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    // Mouse/touch click handler
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            if let Some(id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(id));
            }
        }
    });

    // Keyboard handler
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char('d') => {
                    dump_snapshot(&game.borrow());
                    return;
                }
                KeyCode::Char(c) => InputEvent::Key(c.to_ascii_lowercase()),
                KeyCode::Tab => InputEvent::Key('\t'),
                KeyCode::Up => InputEvent::Nav(Nav::Up),
                KeyCode::Down => InputEvent::Nav(Nav::Down),
                KeyCode::Left => InputEvent::Nav(Nav::Left),
                KeyCode::Right => InputEvent::Nav(Nav::Right),
                KeyCode::Enter => InputEvent::Nav(Nav::Confirm),
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut clock = clock.borrow_mut();
            let ticks = clock.advance(now_ms());
            let mut game = game.borrow_mut();
            if game.session.state().game_over {
                // The run is frozen; don't bank time for the next one.
                clock.discard_pending();
            } else if ticks > 0 {
                game.tick(ticks);
            }

            let size = f.area();
            click_state.borrow_mut().reset(size.width, size.height);
            game.render(f, size, &click_state);
        }
    });

    Ok(())
}
