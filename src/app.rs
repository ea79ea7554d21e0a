use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Layout, Margin},
    prelude::Rect,
    style::{Color, Style},
    widgets::{Block, BorderType, Borders},
    Frame,
};
use tokio::sync::mpsc::{self, UnboundedSender};

use crate::{
    action::{act, Action, Command},
    components::help::Help,
    config::Config,
    constants::{HEIGHT, WIDTH},
    game::slot::FileSlot,
    pages::{game::GamePage, Page},
    tui,
};

/// Commands raised by the terminal itself rather than by a key or the mouse.
fn terminal_action(event: &tui::Event) -> Option<Action> {
    let command = match event {
        // A closed input stream can never deliver the quit key.
        tui::Event::Quit | tui::Event::Closed => Command::Quit,
        tui::Event::Render => Command::Render,
        tui::Event::Resize(x, y) => Command::Resize(*x, *y),
        tui::Event::Error => Command::Error("terminal event error".to_string()),
        _ => return None,
    };
    Some(act!(command))
}

pub struct App {
    config: Config,
    frame_rate: f64,
    should_quit: bool,
    should_suspend: bool,
    show_help: bool,
    fullscreen: bool,
    page: Box<dyn Page>,
}

impl App {
    pub fn new(frame_rate: f64) -> Result<Self> {
        let config = Config::new()?;
        let game_page = GamePage::new(Box::new(FileSlot::in_dir(&config.config.data_dir)));

        Ok(Self {
            frame_rate,
            should_quit: false,
            should_suspend: false,
            show_help: false,
            fullscreen: false,
            config,
            page: Box::new(game_page),
        })
    }

    fn new_tui(&self) -> Result<tui::Tui> {
        Ok(tui::Tui::new()?.frame_rate(self.frame_rate).mouse(true))
    }

    /// Global bindings win over the page's own bindings.
    fn global_action(&self, key: &KeyEvent) -> Option<Action> {
        self.config.keybindings.global.get(key).cloned()
    }

    pub async fn run(&mut self) -> Result<()> {
        let (action_tx, mut action_rx) = mpsc::unbounded_channel();

        let mut tui = self.new_tui()?;
        tui.enter()?;

        self.page.register_keymap(&self.config.keybindings.pages)?;
        self.page.init()?;

        loop {
            if let Some(e) = tui.next().await {
                match e {
                    tui::Event::Quit
                    | tui::Event::Closed
                    | tui::Event::Render
                    | tui::Event::Resize(..)
                    | tui::Event::Error => {
                        if let Some(action) = terminal_action(&e) {
                            action_tx.send(action)?;
                        }
                    },
                    tui::Event::Key(key) => {
                        if let Some(action) = self.global_action(&key) {
                            log::debug!("Got global action: {action:?}");
                            action_tx.send(action)?;
                        } else if let Some(action) = self.page.handle_events(Some(e))? {
                            action_tx.send(action)?;
                        }
                    },
                    _ => {
                        if let Some(action) = self.page.handle_events(Some(e))? {
                            action_tx.send(action)?;
                        }
                    },
                }
            }

            while let Ok(action) = action_rx.try_recv() {
                let Action { command, .. } = &action;
                if *command != Command::Render {
                    log::debug!("{command:?}");
                }
                match command {
                    Command::Quit => self.should_quit = true,
                    Command::Suspend => self.should_suspend = true,
                    Command::Resume => self.should_suspend = false,
                    Command::ToggleShowHelp => self.show_help = !self.show_help,
                    Command::ToggleFullscreen => {
                        self.fullscreen = !self.fullscreen;
                        tracing::info!(fullscreen = self.fullscreen, "toggled fullscreen");
                    },
                    Command::Error(message) => tracing::error!("{message}"),
                    Command::Resize(w, h) => {
                        tui.resize(Rect::new(0, 0, *w, *h))?;
                    },
                    _ => {},
                }
                if !self.show_help {
                    if let Some(action) = self.page.update(action.clone())? {
                        action_tx.send(action)?
                    }
                }
                match action.command {
                    Command::Render | Command::Resize(..) | Command::ToggleFullscreen | Command::ToggleShowHelp => {
                        self.render(&mut tui, &action_tx)?;
                    },
                    _ => {},
                }
            }
            if self.should_suspend {
                tui.suspend()?;
                action_tx.send(act!(Command::Resume))?;
                tui = self.new_tui()?;
                tui.enter()?;
            } else if self.should_quit {
                tui.stop()?;
                break;
            }
        }
        tui.exit()?;
        Ok(())
    }

    /// Area the page draws into: the whole terminal when fullscreen, a centered frame otherwise.
    fn playfield(&self, f: &mut Frame<'_>) -> Rect {
        let area = f.area();
        if self.fullscreen {
            return area;
        }

        let [_, area, _] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(HEIGHT), Constraint::Fill(1)]).areas(area);
        let [_, area, _] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(WIDTH), Constraint::Fill(1)]).areas(area);

        let border = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().bg(Color::Black));
        f.render_widget(border, area);

        area.inner(Margin { horizontal: 1, vertical: 1 })
    }

    fn render(&mut self, tui: &mut tui::Tui, action_tx: &UnboundedSender<Action>) -> Result<()> {
        tui.draw(|f| {
            let area = self.playfield(f);

            if let Err(e) = self.page.draw(f, area) {
                let _ = action_tx.send(act!(Command::Error(format!("Failed to draw: {:?}", e))));
            }

            if self.show_help {
                self.draw_help(f, area);
            }
        })?;

        Ok(())
    }

    fn draw_help(&self, f: &mut Frame<'_>, rect: Rect) {
        let page_id = self.page.id();
        let help = Help::new(vec![
            ("System".to_string(), self.config.keybindings.global.clone()),
            (page_id.to_string(), self.config.keybindings.pages.get(&page_id).cloned().unwrap_or_default()),
        ]);

        f.render_widget(help, rect);
    }
}
