use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                return Ok(AppEvent::Key(key));
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// Normal-mode keybindings; input modes consume keys directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    MoveUp,
    MoveDown,
    NextPage,
    PrevPage,
    SortPriceAscending,
    SortPriceDescending,
    SortDateAscending,
    SortDateDescending,
    Search,
    MaxPrice,
    ResetFilters,
    Refresh,
    OpenPicture,
    Delete,
    None,
}

impl From<KeyEvent> for Action {
    fn from(key: KeyEvent) -> Self {
        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
            KeyCode::Char('j') | KeyCode::Down => Action::MoveDown,
            KeyCode::Char('k') | KeyCode::Up => Action::MoveUp,
            KeyCode::Char('n') | KeyCode::PageDown => Action::NextPage,
            KeyCode::Char('b') | KeyCode::PageUp => Action::PrevPage,
            KeyCode::Char('p') => Action::SortPriceAscending,
            KeyCode::Char('P') => Action::SortPriceDescending,
            KeyCode::Char('t') => Action::SortDateAscending,
            KeyCode::Char('T') => Action::SortDateDescending,
            KeyCode::Char('/') => Action::Search,
            KeyCode::Char('m') => Action::MaxPrice,
            KeyCode::Char('x') => Action::ResetFilters,
            KeyCode::Char('R') => Action::Refresh,
            KeyCode::Char('o') => Action::OpenPicture,
            KeyCode::Char('d') => Action::Delete,
            _ => Action::None,
        }
    }
}
