// Keyboard event handling - raw keys become app events over an mpsc channel
// Printable characters are forwarded as-is; the app decides what they mean
// per tab (the search tab treats them as query input)

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum AppEvent {
    // UI events
    Quit,
    Tick,
    Render,

    // Navigation
    Up,
    Down,
    Enter,
    Backspace,
    NextTab,
    PreviousTab,

    // Playback
    NextSong,
    PreviousSong,

    // Data
    Refresh,

    // Printable input, interpreted by the active tab
    Char(char),
}

pub struct EventHandler {
    event_sender: mpsc::UnboundedSender<AppEvent>,
    event_receiver: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();

        Self {
            event_sender,
            event_receiver,
        }
    }

    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.event_sender.clone()
    }

    pub async fn next_event(&mut self) -> Option<AppEvent> {
        self.event_receiver.recv().await
    }

    /// Poll the terminal and forward key presses as app events. Runs as its
    /// own task so the app loop can await events and store futures freely.
    pub async fn forward_terminal_events(sender: mpsc::UnboundedSender<AppEvent>) -> Result<()> {
        loop {
            if event::poll(Duration::from_millis(50))? {
                match event::read()? {
                    Event::Key(key) => {
                        if key.kind == KeyEventKind::Press {
                            if let Some(app_event) = Self::key_to_app_event(key) {
                                let _ = sender.send(app_event);
                            }
                        }
                    }
                    Event::Resize(_, _) => {
                        let _ = sender.send(AppEvent::Render);
                    }
                    _ => {}
                }
            }

            let _ = sender.send(AppEvent::Tick);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    fn key_to_app_event(key: KeyEvent) -> Option<AppEvent> {
        match key.code {
            KeyCode::Esc => Some(AppEvent::Quit),

            KeyCode::Up => Some(AppEvent::Up),
            KeyCode::Down => Some(AppEvent::Down),
            KeyCode::Enter => Some(AppEvent::Enter),
            KeyCode::Backspace => Some(AppEvent::Backspace),
            KeyCode::Tab => Some(AppEvent::NextTab),
            KeyCode::BackTab => Some(AppEvent::PreviousTab),

            KeyCode::Right => Some(AppEvent::NextSong),
            KeyCode::Left => Some(AppEvent::PreviousSong),

            KeyCode::F(5) => Some(AppEvent::Refresh),

            KeyCode::Char(c) => Some(AppEvent::Char(c)),

            _ => None,
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
