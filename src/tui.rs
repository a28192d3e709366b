//! Terminal session for the console.
//!
//! [`Tui`] puts the terminal into raw mode on the alternate screen with mouse
//! capture, and pumps input plus tick and render timers into one channel of
//! [`Event`]s on a background task.

use std::io::{Stdout, stdout};
use std::time::{Duration, Instant};

use crossterm::cursor;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent, EventStream, KeyCode,
    KeyEventKind, KeyModifiers, MouseEventKind,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use futures::{FutureExt, StreamExt};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::core::Event;

/// How long `stop` waits for the pump before aborting it, and then gives up.
const ABORT_AFTER: Duration = Duration::from_millis(500);
const GIVE_UP_AFTER: Duration = Duration::from_secs(2);

pub type Backend = CrosstermBackend<Stdout>;

pub struct Tui {
    terminal: Terminal<Backend>,
    pump: Option<JoinHandle<()>>,
    cancel: CancellationToken,
    event_tx: UnboundedSender<Event>,
    event_rx: UnboundedReceiver<Event>,
    frame_every: Duration,
    tick_every: Duration,
}

impl Tui {
    /// `frame_rate` and `tick_rate` are per second.
    pub fn new(frame_rate: f64, tick_rate: f64) -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        Ok(Self {
            terminal: Terminal::new(Backend::new(stdout()))?,
            pump: None,
            cancel: CancellationToken::new(),
            event_tx,
            event_rx,
            frame_every: Duration::from_secs_f64(1.0 / frame_rate),
            tick_every: Duration::from_secs_f64(1.0 / tick_rate),
        })
    }

    pub fn enter(&mut self) -> color_eyre::Result<()> {
        terminal::enable_raw_mode()?;
        crossterm::execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, cursor::Hide)?;
        self.start();
        Ok(())
    }

    /// Stop the pump and hand the terminal back to the shell.
    pub fn exit(&mut self) -> color_eyre::Result<()> {
        self.stop()?;
        if terminal::is_raw_mode_enabled()? {
            self.terminal.flush()?;
            crossterm::execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen, cursor::Show)?;
            terminal::disable_raw_mode()?;
        }
        Ok(())
    }

    /// Ctrl+Z: restore the terminal and stop the process.
    pub fn suspend(&mut self) -> color_eyre::Result<()> {
        self.exit()?;
        #[cfg(not(windows))]
        signal_hook::low_level::raise(signal_hook::consts::SIGTSTP)?;
        Ok(())
    }

    /// Re-enter after a suspend and repaint from scratch.
    pub fn resume(&mut self) -> color_eyre::Result<()> {
        self.enter()?;
        self.terminal.clear()?;
        Ok(())
    }

    pub async fn next_event(&mut self) -> Option<Event> {
        self.event_rx.recv().await
    }

    pub fn draw(&mut self, render: impl FnOnce(&mut Frame)) -> color_eyre::Result<()> {
        self.terminal.draw(render)?;
        Ok(())
    }

    pub fn resize(&mut self, width: u16, height: u16) -> color_eyre::Result<()> {
        self.terminal.resize(Rect::new(0, 0, width, height))?;
        Ok(())
    }

    fn start(&mut self) {
        self.cancel.cancel();
        self.cancel = CancellationToken::new();
        self.pump = Some(tokio::spawn(pump(
            self.event_tx.clone(),
            self.cancel.clone(),
            self.tick_every,
            self.frame_every,
        )));
    }

    fn stop(&mut self) -> color_eyre::Result<()> {
        self.cancel.cancel();
        let Some(task) = self.pump.take() else {
            return Ok(());
        };
        let started = Instant::now();
        while !task.is_finished() {
            let waited = started.elapsed();
            if waited >= GIVE_UP_AFTER {
                return Err(color_eyre::eyre::eyre!("event pump did not stop"));
            }
            if waited >= ABORT_AFTER {
                task.abort();
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            error!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Forward terminal input and timer ticks until cancelled or the app hangs up.
async fn pump(
    tx: UnboundedSender<Event>,
    cancel: CancellationToken,
    tick_every: Duration,
    frame_every: Duration,
) {
    #[cfg(unix)]
    forward_sigterm(tx.clone());

    let mut input = EventStream::new();
    let mut ticks = interval(tick_every);
    let mut frames = interval(frame_every);
    // A slow frame should not be followed by a burst of catch-up renders.
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    if tx.send(Event::Init).is_err() {
        return;
    }

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticks.tick() => Event::Tick,
            _ = frames.tick() => Event::Render,
            next = input.next().fuse() => match next {
                Some(Ok(raw)) => match translate(raw) {
                    Some(event) => event,
                    None => continue,
                },
                Some(Err(e)) => Event::Error(e.to_string()),
                None => break,
            },
        };
        if tx.send(event).is_err() {
            break;
        }
    }
    debug!("Event pump stopped");
}

#[cfg(unix)]
fn forward_sigterm(tx: UnboundedSender<Event>) {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::spawn(async move {
                if sigterm.recv().await.is_some() {
                    let _ = tx.send(Event::Quit);
                }
            });
        }
        Err(e) => warn!(error = %e, "Failed to install SIGTERM handler"),
    }
}

/// Map a crossterm event to what the console reacts to.
///
/// Key releases and bare mouse motion are dropped; the tables only care about
/// presses, clicks and scrolling. Ctrl+C always quits.
fn translate(raw: CrosstermEvent) -> Option<Event> {
    match raw {
        CrosstermEvent::Key(key) if key.kind != KeyEventKind::Press => None,
        CrosstermEvent::Key(key)
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') =>
        {
            Some(Event::Quit)
        }
        CrosstermEvent::Key(key) => Some(Event::Key(key)),
        CrosstermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => None,
            _ => Some(Event::Mouse(mouse)),
        },
        CrosstermEvent::Resize(width, height) => Some(Event::Resize(width, height)),
        CrosstermEvent::FocusGained | CrosstermEvent::FocusLost | CrosstermEvent::Paste(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyEventState, MouseButton, MouseEvent};

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind) -> CrosstermEvent {
        CrosstermEvent::Mouse(MouseEvent {
            kind,
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = translate(key(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
            KeyEventKind::Press,
        ));
        assert!(matches!(event, Some(Event::Quit)));
    }

    #[test]
    fn test_only_key_presses_pass() {
        let press = translate(key(KeyCode::Char(']'), KeyModifiers::NONE, KeyEventKind::Press));
        assert!(matches!(press, Some(Event::Key(k)) if k.code == KeyCode::Char(']')));

        for kind in [KeyEventKind::Release, KeyEventKind::Repeat] {
            assert!(translate(key(KeyCode::Char(']'), KeyModifiers::NONE, kind)).is_none());
        }
    }

    #[test]
    fn test_mouse_motion_is_dropped() {
        assert!(translate(mouse(MouseEventKind::Moved)).is_none());
        assert!(translate(mouse(MouseEventKind::Drag(MouseButton::Left))).is_none());
        assert!(matches!(
            translate(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(Event::Mouse(_))
        ));
        assert!(matches!(
            translate(mouse(MouseEventKind::ScrollDown)),
            Some(Event::Mouse(_))
        ));
    }

    #[test]
    fn test_resize_and_ignored_terminal_events() {
        assert!(matches!(
            translate(CrosstermEvent::Resize(120, 40)),
            Some(Event::Resize(120, 40))
        ));
        assert!(translate(CrosstermEvent::FocusGained).is_none());
        assert!(translate(CrosstermEvent::Paste("A-101".to_string())).is_none());
    }
}
