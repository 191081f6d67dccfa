use ratatui::widgets::ListState;

use crate::domain::SalesItem;
use crate::store::ItemStore;

pub const PAGE_SIZE: usize = 10;

/// What keystrokes currently mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a description fragment after `/`.
    Search,
    /// Typing a max price after `m`.
    MaxPrice,
}

pub struct TuiApp {
    pub items: Vec<SalesItem>,
    pub item_index: usize,
    pub item_list_state: ListState,
    pub is_loading: bool,
    pub error_message: String,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub input_mode: InputMode,
    pub input_buffer: String,
    // Pending delete confirmation (id, description)
    pub pending_delete: Option<(i64, String)>,
}

impl TuiApp {
    pub fn new() -> Self {
        let mut item_list_state = ListState::default();
        item_list_state.select(Some(0));

        Self {
            items: Vec::new(),
            item_index: 0,
            item_list_state,
            is_loading: false,
            error_message: String::new(),
            should_quit: false,
            status_message: None,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            pending_delete: None,
        }
    }

    /// Pull the latest snapshot from the store; runs every tick so
    /// gateway completions show up without explicit wiring.
    pub fn sync(&mut self, store: &ItemStore) {
        self.items = store.items();
        self.is_loading = store.is_loading();
        self.error_message = store.error_message();
        if self.item_index >= self.items.len() && !self.items.is_empty() {
            self.item_index = self.items.len() - 1;
        }
        self.item_list_state.select(if self.items.is_empty() {
            None
        } else {
            Some(self.item_index)
        });
    }

    pub fn selected_item(&self) -> Option<&SalesItem> {
        self.items.get(self.item_index)
    }

    pub fn move_up(&mut self) {
        if self.item_index > 0 {
            self.item_index -= 1;
            self.item_list_state.select(Some(self.item_index));
        }
    }

    pub fn move_down(&mut self) {
        if !self.items.is_empty() && self.item_index < self.items.len() - 1 {
            self.item_index += 1;
            self.item_list_state.select(Some(self.item_index));
        }
    }

    pub fn next_page(&mut self) {
        let max_index = self.items.len().saturating_sub(1);
        let new_index = (self.item_index + PAGE_SIZE).min(max_index);
        if new_index != self.item_index {
            self.item_index = new_index;
            self.item_list_state.select(Some(self.item_index));
        }
    }

    pub fn prev_page(&mut self) {
        let new_index = self.item_index.saturating_sub(PAGE_SIZE);
        if new_index != self.item_index {
            self.item_index = new_index;
            self.item_list_state.select(Some(self.item_index));
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn enter_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input_buffer.clear();
    }

    pub fn leave_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input_buffer.clear();
    }
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_items(count: usize) -> TuiApp {
        let mut app = TuiApp::new();
        app.items = (0..count)
            .map(|i| SalesItem {
                id: i as i64,
                description: format!("Item {i}"),
                price: 100,
                seller_email: "s@e.dk".into(),
                seller_phone: "1".into(),
                time: i as i64,
                picture_url: None,
            })
            .collect();
        app
    }

    #[test]
    fn test_move_down_stops_at_end() {
        let mut app = app_with_items(2);
        app.move_down();
        assert_eq!(app.item_index, 1);
        app.move_down();
        assert_eq!(app.item_index, 1);
    }

    #[test]
    fn test_move_up_stops_at_start() {
        let mut app = app_with_items(2);
        app.move_up();
        assert_eq!(app.item_index, 0);
    }

    #[test]
    fn test_paging_clamps() {
        let mut app = app_with_items(15);
        app.next_page();
        assert_eq!(app.item_index, 10);
        app.next_page();
        assert_eq!(app.item_index, 14);
        app.prev_page();
        assert_eq!(app.item_index, 4);
        app.prev_page();
        assert_eq!(app.item_index, 0);
    }

    #[test]
    fn test_input_mode_round_trip() {
        let mut app = TuiApp::new();
        app.enter_input(InputMode::Search);
        app.input_buffer.push_str("bike");
        app.leave_input();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.input_buffer.is_empty());
    }
}
