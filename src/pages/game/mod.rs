mod surface;

use std::{collections::HashMap, time::Instant};

use color_eyre::eyre::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Clear, Paragraph},
    Frame,
};
use tracing::trace;

use super::{Page, PageId};
use crate::{
    action::{act, Action, ActionState, Command, GameAction},
    config::PageKeyBindings,
    constants::{self, game as consts},
    game::{slot::BestScoreSlot, Game, GameState, RenderState},
    pages::game::surface::{pixel_size, Surface},
};

pub struct GamePage {
    pub keymap: PageKeyBindings,
    game: Game,
    canvas: Rect,
    last_frame: Instant,
    frame: RenderState,
}

impl GamePage {
    pub fn new(slot: Box<dyn BestScoreSlot>) -> Self {
        // Inner size of the default frame, minus the status line.
        let canvas = Rect::new(0, 0, constants::WIDTH - 2, constants::HEIGHT - 3);
        let (width, height) = pixel_size(canvas);
        let game = Game::new(width, height, slot);
        let frame = game.render_state();
        GamePage { keymap: PageKeyBindings::default(), game, canvas, last_frame: Instant::now(), frame }
    }

    pub fn frame(&self) -> &RenderState {
        &self.frame
    }

    fn set_canvas(&mut self, canvas: Rect) {
        if (canvas.width, canvas.height) == (self.canvas.width, self.canvas.height) {
            self.canvas = canvas;
            return;
        }
        self.canvas = canvas;
        let (width, height) = pixel_size(canvas);
        self.game.on_resize(width, height);
        self.frame = self.game.render_state();
    }

    fn step(&mut self, elapsed_ms: f32) {
        self.frame = self.game.tick(elapsed_ms);
        trace!(elapsed_ms, state = %self.frame.state, "game ticked");
    }

    fn status_line(&self) -> Line<'static> {
        let label = Style::default().fg(Color::DarkGray);
        let value = Style::default().add_modifier(Modifier::BOLD);
        Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(self.frame.score.to_string(), value),
            Span::raw("   "),
            Span::styled("Best: ", label),
            Span::styled(self.frame.best_score.to_string(), value),
            Span::raw("   "),
            Span::styled("Speed: ", label),
            Span::styled(format!("{:.1}x", self.frame.speed_multiplier), value),
        ])
    }

    fn draw_message(f: &mut Frame<'_>, area: Rect, text: Text<'_>) {
        let height = text.height() as u16;
        let width = text.width() as u16 + 4;
        let [area] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        f.render_widget(Clear, area);
        f.render_widget(Paragraph::new(text).alignment(Alignment::Center).style(Style::default().bg(Color::Black)), area);
    }
}

impl Page for GamePage {
    fn id(&self) -> PageId {
        PageId::Game
    }

    fn register_keymap(&mut self, keymaps: &HashMap<PageId, PageKeyBindings>) -> Result<()> {
        if let Some(keymap) = keymaps.get(&self.id()) {
            self.keymap = keymap.clone();
        }
        Ok(())
    }

    fn init(&mut self) -> Result<()> {
        self.last_frame = Instant::now();
        Ok(())
    }

    fn handle_key_events(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(self.keymap.get(&key).cloned())
    }

    fn handle_mouse_events(&mut self, mouse: MouseEvent) -> Result<Option<Action>> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => Ok(Some(act!(Command::Game(GameAction::Flap)))),
            _ => Ok(None),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action.command {
            Command::Game(GameAction::Flap) if action.state == ActionState::Start => {
                self.game.on_jump_or_reset();
                self.frame = self.game.render_state();
            },
            Command::Render => {
                let now = Instant::now();
                let elapsed_ms = now.duration_since(self.last_frame).as_secs_f32() * 1000.0;
                self.last_frame = now;
                self.step(elapsed_ms);
            },
            _ => {},
        }
        Ok(None)
    }

    fn draw(&mut self, f: &mut Frame<'_>, area: Rect) -> Result<()> {
        let [status, canvas] = Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        self.set_canvas(canvas);

        f.render_widget(Paragraph::new(self.status_line()).alignment(Alignment::Center), status);
        f.render_widget(Surface::new(&self.frame), canvas);

        match self.frame.state {
            GameState::Over => {
                let text = Text::from(consts::GAME_OVER_TEXT.trim().lines().map(Line::from).collect::<Vec<_>>())
                    .fg(Color::White)
                    .bold();
                Self::draw_message(f, canvas, text);
            },
            GameState::NotStarted => {
                let [_, hint] = Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).areas(canvas);
                Self::draw_message(f, hint, Text::from(consts::START_TEXT).fg(Color::White));
            },
            GameState::Running => {},
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyModifiers};
    use pretty_assertions::assert_eq;
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::game::slot::MemorySlot;

    fn page() -> GamePage {
        let mut page = GamePage::new(Box::new(MemorySlot::new(Some(7))));
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty());
        page.keymap.insert(space, act!(Command::Game(GameAction::Flap)));
        page
    }

    fn render(page: &mut GamePage, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                page.draw(f, area).unwrap();
            })
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..height).map(|y| (0..width).map(|x| buffer[(x, y)].symbol().to_string()).collect::<String>()).collect()
    }

    fn flap() -> Action {
        act!(Command::Game(GameAction::Flap))
    }

    #[test]
    fn test_key_maps_to_flap() {
        let mut page = page();
        let space = KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty());
        assert_eq!(page.handle_key_events(space).unwrap(), Some(flap()));
        let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty());
        assert_eq!(page.handle_key_events(x).unwrap(), None);
    }

    #[test]
    fn test_left_click_flaps() {
        let mut page = page();
        let click = |kind| MouseEvent { kind, column: 3, row: 4, modifiers: KeyModifiers::empty() };
        assert_eq!(page.handle_mouse_events(click(MouseEventKind::Down(MouseButton::Left))).unwrap(), Some(flap()));
        assert_eq!(page.handle_mouse_events(click(MouseEventKind::Down(MouseButton::Right))).unwrap(), None);
        assert_eq!(page.handle_mouse_events(click(MouseEventKind::Moved)).unwrap(), None);
    }

    #[test]
    fn test_flap_starts_the_game() {
        let mut page = page();
        page.update(flap()).unwrap();
        assert_eq!(page.frame().state, GameState::Running);

        page.update(act!(Command::Game(GameAction::Flap), ActionState::End)).unwrap();
        page.step(16.0);
        assert_eq!(page.frame().state, GameState::Running);
    }

    #[test]
    fn test_draw_resizes_game_to_canvas() {
        let mut page = page();
        render(&mut page, 40, 11);
        assert_eq!(page.game.dimensions().width, 320.0);
        assert_eq!(page.game.dimensions().height, 160.0);
    }

    #[test]
    fn test_status_line_and_start_hint() {
        let mut page = page();
        let lines = render(&mut page, 60, 20);
        assert!(lines[0].contains("Score: 0"), "{:?}", lines[0]);
        assert!(lines[0].contains("Best: 7"));
        assert!(lines[0].contains("Speed: 1.0x"));
        assert!(lines.iter().any(|line| line.contains(consts::START_TEXT)));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut page = page();
        render(&mut page, 60, 20);
        page.update(flap()).unwrap();
        for _ in 0..2000 {
            page.step(16.0);
            if page.frame().game_over {
                break;
            }
        }
        assert_eq!(page.frame().state, GameState::Over);

        let lines = render(&mut page, 60, 20);
        assert!(lines.iter().any(|line| line.contains("GAME OVER")));
        assert!(!lines.iter().any(|line| line.contains(consts::START_TEXT)));
    }
}
