//! Application shell: tabs over the list screens plus app-level overlays.
//!
//! The App owns the event loop. Input goes to the open overlay first, then
//! to the active screen, and only then to the global keys. Commands returned
//! by a screen's `update()` are spawned on tokio and report back through
//! [`AppMessage::CommandCompleted`].

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Tabs;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, error, info, warn};

use crate::Theme;
use crate::api::HotelApi;
use crate::config::{AppConfig, GlobalAction, KeyResolver};
use crate::core::{AppMessage, Command, Event, Screen, UpdateResult};
use crate::screen::{self, ListOptions, ScreenKind};
use crate::tui::Tui;
use crate::ui::components::{
    ErrorDialog, ErrorDialogEvent, HelpEvent, HelpView, KeybindingSection, ToastManager,
};
use crate::ui::{Component, EventResult, StatusBar};

const FRAME_RATE: f64 = 30.0;
const TICK_RATE: f64 = 4.0;

pub struct App {
    screens: Vec<Box<dyn Screen>>,
    initialized: Vec<bool>,
    active: usize,
    toasts: ToastManager,
    error: Option<ErrorDialog>,
    help: Option<HelpView>,
    status_bar: StatusBar,
    resolver: Arc<KeyResolver>,
    theme: Theme,
    /// Commands spawned but not yet completed.
    running: usize,
    should_quit: bool,
    should_suspend: bool,
    app_tx: UnboundedSender<AppMessage>,
    app_rx: UnboundedReceiver<AppMessage>,
}

impl App {
    pub fn new(
        config: &AppConfig,
        api: Arc<dyn HotelApi>,
        resolver: Arc<KeyResolver>,
        theme: Theme,
    ) -> Self {
        let (app_tx, app_rx) = mpsc::unbounded_channel();
        let options = ListOptions::from(&config.table);
        let screens = screen::build_screens(&api, &app_tx, &resolver, &options);
        Self {
            initialized: vec![false; screens.len()],
            screens,
            active: 0,
            toasts: ToastManager::new(),
            error: None,
            help: None,
            status_bar: StatusBar::new(resolver.clone()),
            resolver,
            theme,
            running: 0,
            should_quit: false,
            should_suspend: false,
            app_tx,
            app_rx,
        }
    }

    pub async fn run(&mut self, start: ScreenKind) -> color_eyre::Result<()> {
        let mut tui = Tui::new(FRAME_RATE, TICK_RATE)?;
        tui.enter()?;
        self.show(start.index());

        loop {
            let Some(event) = tui.next_event().await else {
                break;
            };
            self.handle_event(event, &mut tui)?;
            self.handle_messages();

            if self.should_suspend {
                tui.suspend()?;
                self.should_suspend = false;
                tui.resume()?;
            } else if self.should_quit {
                break;
            }
        }

        info!("Shutting down");
        tui.exit()?;
        Ok(())
    }

    pub const fn active(&self) -> usize {
        self.active
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Switch to screen `index`, initializing it on first visit.
    pub fn show(&mut self, index: usize) {
        if index >= self.screens.len() {
            return;
        }
        self.active = index;
        if !self.initialized[index] {
            self.initialized[index] = true;
            self.screens[index].init();
            self.run_update(index);
        }
    }

    fn handle_event(&mut self, event: Event, tui: &mut Tui) -> color_eyre::Result<()> {
        match event {
            Event::Init => {}
            Event::Quit => self.should_quit = true,
            Event::Error(e) => {
                warn!(error = %e, "Terminal event error");
                self.show_error(e);
            }
            Event::Tick => self.handle_tick(),
            Event::Render => self.render(tui)?,
            Event::Resize(width, height) => {
                tui.resize(width, height)?;
                self.render(tui)?;
            }
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(_) => self.handle_input(&event),
        }
        Ok(())
    }

    fn handle_tick(&mut self) {
        self.toasts.handle_tick();
        if let Some(screen) = self.screens.get_mut(self.active) {
            screen.handle_tick();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if let Some(dialog) = &mut self.error {
            if let Ok(EventResult::Event(ErrorDialogEvent::Dismissed)) = dialog.handle_key(key) {
                self.error = None;
            }
            return;
        }
        if let Some(help) = &mut self.help {
            if let Ok(EventResult::Event(HelpEvent::Close)) = help.handle_key(key) {
                self.help = None;
            }
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('z') {
            self.should_suspend = true;
            return;
        }

        if self.screens[self.active].handle_input(&Event::Key(key)) {
            self.run_update(self.active);
            return;
        }

        self.handle_global_key(key);
    }

    fn handle_input(&mut self, event: &Event) {
        if self.error.is_some() || self.help.is_some() {
            return;
        }
        if self.screens[self.active].handle_input(event) {
            self.run_update(self.active);
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) {
        let r = self.resolver.clone();
        let count = self.screens.len();
        if r.matches_global(&key, GlobalAction::Quit) {
            self.should_quit = true;
        } else if r.matches_global(&key, GlobalAction::Help) {
            self.open_help();
        } else if r.matches_global(&key, GlobalAction::NextScreen) {
            self.show((self.active + 1) % count);
        } else if r.matches_global(&key, GlobalAction::PrevScreen) {
            self.show((self.active + count - 1) % count);
        } else if let KeyCode::Char(c @ '1'..='9') = key.code {
            let index = c as usize - '1' as usize;
            self.show(index);
        }
    }

    fn open_help(&mut self) {
        let screen = &self.screens[self.active];
        let sections = vec![
            KeybindingSection::new(screen.title(), screen.keybindings()),
            KeybindingSection::new("Global", self.status_bar.global_keybindings()),
        ];
        self.help = Some(HelpView::new(sections, self.resolver.clone()));
    }

    fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        error!(%message, "Displaying error");
        self.error = Some(ErrorDialog::new(message, self.resolver.clone()));
    }

    fn run_update(&mut self, index: usize) {
        match self.screens[index].update() {
            UpdateResult::Idle => {}
            UpdateResult::Commands(commands) => {
                for command in commands {
                    self.spawn(command);
                }
            }
            UpdateResult::Error(e) => self.show_error(e),
        }
    }

    fn spawn(&mut self, command: Box<dyn Command>) {
        let name = command.name();
        let tx = self.app_tx.clone();
        self.running += 1;
        debug!(command = %name, "Spawning command");
        tokio::spawn(async move {
            let success = match command.execute().await {
                Ok(()) => true,
                Err(e) => {
                    error!(command = %name, error = %e, "Command failed");
                    let _ = tx.send(AppMessage::DisplayError(format!("{name} failed: {e}")));
                    false
                }
            };
            let _ = tx.send(AppMessage::CommandCompleted { name, success });
        });
    }

    /// Drain app messages queued by screens and finished commands.
    pub fn handle_messages(&mut self) {
        while let Ok(msg) = self.app_rx.try_recv() {
            match msg {
                AppMessage::CommandCompleted { name, success } => {
                    self.running = self.running.saturating_sub(1);
                    debug!(command = %name, success, "Command completed");
                    // Results sit in the owning screen's queue
                    for index in 0..self.screens.len() {
                        if self.initialized[index] {
                            self.run_update(index);
                        }
                    }
                }
                AppMessage::ShowToast(toast) => self.toasts.show(toast),
                AppMessage::DisplayError(message) => self.show_error(message),
            }
        }
    }

    fn render(&mut self, tui: &mut Tui) -> color_eyre::Result<()> {
        tui.draw(|frame| self.draw(frame))?;
        Ok(())
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let [tabs_area, body, bar] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(StatusBar::HEIGHT),
        ])
        .areas(area);

        let theme = self.theme;
        let titles: Vec<Line> = self
            .screens
            .iter()
            .enumerate()
            .map(|(i, screen)| Line::from(format!(" {} {} ", i + 1, screen.title())))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active)
            .style(Style::default().fg(theme.subtext0()))
            .highlight_style(
                Style::default()
                    .fg(theme.mauve())
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED),
            )
            .divider("│");
        frame.render_widget(tabs, tabs_area);

        let screen = &mut self.screens[self.active];
        screen.view(frame, body, &theme);

        let mut status = screen.status();
        status.push(("tasks", self.running.to_string()));
        self.status_bar
            .render_with_keybindings(frame, bar, &theme, &status, &screen.keybindings());

        if let Some(help) = &mut self.help {
            help.render(frame, area, &theme);
        }
        if let Some(dialog) = &mut self.error {
            dialog.render(frame, area, &theme);
        }
        self.toasts.render(frame, area, &theme);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::api::{Dataset, FixtureApi};
    use crate::ui::components::Toast;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        let api: Arc<dyn HotelApi> =
            Arc::new(FixtureApi::new(Dataset::sample().unwrap(), Duration::ZERO));
        App::new(
            &AppConfig::default(),
            api,
            Arc::new(KeyResolver::default()),
            Theme::default(),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_tab_switching() {
        let mut app = app();
        app.show(ScreenKind::Rooms.index());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active(), ScreenKind::Users.index());

        press(&mut app, KeyCode::Char('5'));
        assert_eq!(app.active(), ScreenKind::Ads.index());

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active(), ScreenKind::Rooms.index());

        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.active(), ScreenKind::Ads.index());

        // Out of range digits are ignored
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.active(), ScreenKind::Ads.index());
    }

    #[tokio::test]
    async fn test_help_overlay_captures_keys() {
        let mut app = app();
        app.show(0);

        press(&mut app, KeyCode::Char('?'));
        assert!(app.help.is_some());

        // Tab does not switch screens while help is open
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.active(), 0);

        press(&mut app, KeyCode::Esc);
        assert!(app.help.is_none());

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit());
    }

    #[tokio::test]
    async fn test_messages_reach_overlays() {
        let mut app = app();
        app.app_tx
            .send(AppMessage::ShowToast(Toast::success("Room deleted successfully")))
            .unwrap();
        app.app_tx
            .send(AppMessage::DisplayError("boom".to_string()))
            .unwrap();
        app.handle_messages();

        assert!(!app.toasts.is_empty());
        assert_eq!(app.error.as_ref().map(ErrorDialog::message), Some("boom"));
    }

    #[tokio::test]
    async fn test_draw_shows_tabs_and_status() {
        let mut app = app();
        app.show(0);
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let first_row: String = (0..100u16).map(|x| buffer[(x, 0u16)].symbol()).collect();
        assert!(first_row.contains("1 Rooms"));
        assert!(first_row.contains("5 Ads"));

        let all: String = buffer.content().iter().map(|cell| cell.symbol()).collect();
        assert!(all.contains("roomdesk"));
        assert!(all.contains("tasks"));
    }
}
