//! Haunted Room Defense rendering. Reads the session, never mutates it.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{hp_bar, ClickableList, TabBar};

use super::actions::*;
use super::catalog::{Category, Price};
use super::combat::APPROACH_STEPS;
use super::events::format_clock;
use super::session::Session;
use super::state::GameState;
use super::DefenseGame;

const BAR_WIDTH: usize = 20;

/// Shop panel height that fits every offer (two lines each) under the tabs.
fn shop_height(offer_count: usize) -> u16 {
    3 + 2 + 2 * offer_count.max(1) as u16
}

pub fn render(
    game: &DefenseGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    render_title(game.session.state(), f, chunks[0]);
    if is_narrow_layout(area.width) {
        render_narrow(game, f, chunks[1], click_state);
    } else {
        render_wide(game, f, chunks[1], click_state);
    }
    render_help(game.session.state(), f, chunks[2], click_state);
}

fn render_wide(
    game: &DefenseGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Min(5),
            Constraint::Length(8),
        ])
        .split(columns[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(left[2]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(8)])
        .split(columns[1]);

    render_status(&game.session, f, left[0]);
    render_log(&game.session, f, left[1]);
    render_dreamers(game.session.state(), f, bottom[0]);
    render_room(game.session.state(), f, bottom[1]);
    render_items(game.session.state(), f, right[0]);
    render_shop(game, f, right[1], click_state);
}

fn render_narrow(
    game: &DefenseGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let offer_count = game.session.catalog(game.category).len();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(4),
            Constraint::Length(shop_height(offer_count)),
            Constraint::Min(3),
        ])
        .split(area);

    render_status(&game.session, f, chunks[0]);
    render_room_strip(game.session.state(), f, chunks[1]);
    render_shop(game, f, chunks[2], click_state);
    render_log(&game.session, f, chunks[3]);
}

fn render_title(state: &GameState, f: &mut Frame, area: Rect) {
    let (title, color) = if state.game_won {
        ("★ You survived the night! ★", Color::Yellow)
    } else if state.game_over {
        ("✖ Your door was broken ✖", Color::Red)
    } else {
        ("HAUNTED ROOM DEFENSE", Color::Cyan)
    };
    let widget = Paragraph::new(Line::from(Span::styled(
        title,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    )
    .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

fn render_status(session: &Session, f: &mut Frame, area: Rect) {
    let state = session.state();
    let label = Style::default().fg(Color::Cyan);

    let door_color = if state.door_hp * 4 < state.door_max_hp {
        Color::Red
    } else {
        Color::Green
    };
    let mut lines = vec![Line::from(vec![
        Span::styled("Door   ", label),
        Span::styled(
            hp_bar(state.door_hp, state.door_max_hp, BAR_WIDTH),
            Style::default().fg(door_color),
        ),
        Span::raw(format!(" {}/{}", state.door_hp, state.door_max_hp)),
    ])];

    let hunter = &state.hunter;
    if hunter.active {
        lines.push(Line::from(vec![
            Span::styled("Hunter ", Style::default().fg(Color::Red)),
            Span::styled(
                hp_bar(hunter.hp, hunter.max_hp, BAR_WIDTH),
                Style::default().fg(Color::Red),
            ),
            Span::raw(format!(" {}/{}", hunter.hp, hunter.max_hp)),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "       Lv{}  atk {}  approach {}/{}",
                hunter.level, hunter.attack, hunter.position, APPROACH_STEPS
            ),
            Style::default().fg(Color::Red),
        )));
    } else if !state.game_over {
        lines.push(Line::from(Span::styled(
            format!("Hunter arrives in {}s", session.next_spawn_in_secs()),
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(""));
    } else {
        lines.push(Line::from(""));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Coins    ", Style::default().fg(Color::Yellow)),
        Span::raw(format!("{} (+{}/s)", state.coins, state.coins_per_second)),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Diamonds ", Style::default().fg(Color::LightCyan)),
        Span::raw(format!("{} (+{}/s)", state.diamonds, state.diamonds_per_second)),
    ]));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" Status  {} ", format_clock(session.elapsed_ms()))),
    );
    f.render_widget(widget, area);
}

fn render_log(session: &Session, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = session
        .log()
        .recent(visible)
        .map(|entry| {
            let style = if entry.event.is_important() {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(entry.event.to_string(), style),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn render_dreamers(state: &GameState, f: &mut Frame, area: Rect) {
    let lines: Vec<Line> = state
        .dreamers()
        .iter()
        .map(|d| {
            let color = if d.is_alive() { Color::Magenta } else { Color::DarkGray };
            Line::from(vec![
                Span::styled(format!("{:<5}", d.name), Style::default().fg(color)),
                Span::styled(hp_bar(d.door_hp, d.door_max_hp, 10), Style::default().fg(color)),
                Span::raw(format!(" Lv{} {}", d.door_level, d.door_hp)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Dreamers "),
    );
    f.render_widget(widget, area);
}

/// Narrow-layout stand-in for the dreamer, room and item panels.
fn render_room_strip(state: &GameState, f: &mut Frame, area: Rect) {
    let mut dreamers = Vec::new();
    for d in state.dreamers() {
        let color = if d.is_alive() { Color::Magenta } else { Color::DarkGray };
        dreamers.push(Span::styled(d.name.clone(), Style::default().fg(color)));
        dreamers.push(Span::styled(
            format!("{} ", hp_bar(d.door_hp, d.door_max_hp, 4)),
            Style::default().fg(color),
        ));
    }
    let lines = vec![
        Line::from(dreamers),
        Line::from(format!(
            "Defense {}  Guns {} ({:.0} dmg/s)  Bed Lv{}",
            state.player_defense,
            state.guns.len(),
            state.total_dps(),
            state.bed_level
        )),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Dreamers "),
    );
    f.render_widget(widget, area);
}

fn render_room(state: &GameState, f: &mut Frame, area: Rect) {
    let room_name = state.rooms.first().map(|r| r.name.as_str()).unwrap_or("");
    let mut lines = vec![
        Line::from(Span::styled(
            room_name.to_string(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "Defense {}/{}",
            state.player_defense, state.player_max_defense
        )),
        Line::from(format!("Guns {} ({:.0} dmg/s)", state.guns.len(), state.total_dps())),
    ];
    if state.hunter.active {
        lines.push(Line::from(Span::styled(
            "⚠ HUNTER ACTIVE",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Room "),
    );
    f.render_widget(widget, area);
}

fn render_items(state: &GameState, f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(format!("Door     Lv{}  ({} HP)", state.door_level, state.door_max_hp)),
        Line::from(format!(
            "Bed      Lv{}  (+{} coins/s)",
            state.bed_level, state.coins_per_second
        )),
        Line::from(format!(
            "Playbox  Lv{}  (+{} diamonds/s)",
            state.playbox_level, state.diamonds_per_second
        )),
        Line::from(format!("Defense  {}", state.player_defense)),
        Line::from(format!(
            "Guns     {}",
            state
                .guns
                .iter()
                .map(|g| g.damage.to_string())
                .collect::<Vec<_>>()
                .join(" / ")
        )),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Your Items "),
    );
    f.render_widget(widget, area);
}

fn render_shop(
    game: &DefenseGame,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let mut cs = click_state.borrow_mut();

    let mut tabs = TabBar::new("│").block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Shop "),
    );
    for (i, category) in Category::all().iter().enumerate() {
        let style = if *category == game.category {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        tabs = tabs.tab(category.name(), style, TAB_BASE + i as u16);
    }
    tabs.render(f, chunks[0], &mut cs);

    let offers = game.session.catalog(game.category);
    let mut cl = ClickableList::new();
    if offers.is_empty() {
        cl.push(Line::from(Span::styled(
            "  Everything here is maxed out.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, offer) in offers.iter().enumerate() {
        let selected = i == game.selected;
        let cursor = if selected { "► " } else { "  " };
        let price_color = match (offer.affordable, offer.price) {
            (false, _) => Color::DarkGray,
            (true, Price::Coins(_)) => Color::Yellow,
            (true, Price::Diamonds(_)) => Color::LightCyan,
        };
        let name_style = if selected {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(cursor, Style::default().fg(Color::Yellow)),
                Span::styled(offer.name.clone(), name_style),
                Span::styled(format!("  {}", offer.price), Style::default().fg(price_color)),
            ]),
            BUY_OFFER_BASE + i as u16,
        );
        cl.push(Line::from(Span::styled(
            format!("    {}", offer.description),
            Style::default().fg(Color::Gray),
        )));
    }

    let list_area = chunks[1];
    cl.register_targets(list_area, &mut cs, 1, 1);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    f.render_widget(widget, list_area);
}

fn render_help(
    state: &GameState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let key = Style::default().fg(Color::Gray);
    let mut bar = TabBar::new(" ").block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    bar = if state.game_over {
        bar.tab("[R] Play again", key.fg(Color::Yellow), RESTART)
    } else {
        bar.tab("[K] Up", key, SELECT_UP)
            .tab("[J] Down", key, SELECT_DOWN)
            .tab("[I] Buy", key, BUY_SELECTED)
            .tab("[Tab] Shop", key, NEXT_TAB)
            .tab("[H] Hunter", key, SPAWN_HUNTER)
    };
    bar.render(f, area, &mut click_state.borrow_mut());
}
