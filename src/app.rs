use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::layout::Rect;
use tokio::sync::watch;
use tracing::debug;

use crate::config::Settings;
use crate::controller::HighlightController;
use crate::models::{ButtonKind, CellNumber, FocusArea, GRID_SIDE, GridSnapshot};

/// Longest text the input field accepts.
pub const MAX_INPUT_LEN: usize = 12;

/// Screen areas of the last frame, used for mouse hit-testing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub grid: Rect,
    pub input: Rect,
    pub buttons: [Rect; 3],
}

pub struct App {
    pub controller: HighlightController,
    pub input: String,
    pub focus: FocusArea,
    pub cursor: CellNumber,
    pub selected_button: ButtonKind,
    pub layout: ScreenLayout,
    pub running: bool,
    view: watch::Receiver<GridSnapshot>,
    rng: StdRng,
}

impl App {
    pub fn new(settings: &Settings, seed: Option<u64>) -> Self {
        let controller = HighlightController::from_settings(settings);
        let view = controller.subscribe();
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            controller,
            input: String::new(),
            focus: FocusArea::Grid,
            cursor: CellNumber::FIRST,
            selected_button: ButtonKind::Highlight,
            layout: ScreenLayout::default(),
            running: true,
            view,
            rng,
        }
    }

    /// The latest snapshot published by the controller.
    pub fn view(&self) -> watch::Ref<'_, GridSnapshot> {
        self.view.borrow()
    }

    /// Whether the controller published since the last call.
    pub fn take_changed(&mut self) -> bool {
        let changed = self.view.has_changed().unwrap_or(false);
        if changed {
            let _ = self.view.borrow_and_update();
        }
        changed
    }

    pub fn tick(&mut self, now: Instant) {
        self.controller.tick(now);
    }

    pub fn toggle(&mut self, number: CellNumber) {
        self.cursor = number;
        self.controller.toggle(number);
    }

    pub fn toggle_cursor(&mut self) {
        self.controller.toggle(self.cursor);
    }

    /// Submits the input field; it is emptied only when accepted.
    pub fn submit_input(&mut self) {
        if let Ok(number) = self.controller.add_by_input(&self.input) {
            self.input.clear();
            self.cursor = number;
        }
    }

    pub fn light_random(&mut self) {
        if let Ok(number) = self.controller.random_highlight_with(&mut self.rng) {
            self.cursor = number;
        }
    }

    pub fn clear_all(&mut self) {
        self.controller.clear_all();
    }

    pub fn activate(&mut self, button: ButtonKind) {
        self.selected_button = button;
        debug!(button = button.label(), "activated button");
        match button {
            ButtonKind::Highlight => self.submit_input(),
            ButtonKind::Random => self.light_random(),
            ButtonKind::ClearAll => self.clear_all(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        if self.input.chars().count() < MAX_INPUT_LEN {
            self.input.push(c);
        }
        self.controller.dismiss_banner();
    }

    pub fn pop_char(&mut self) {
        self.input.pop();
        self.controller.dismiss_banner();
    }

    /// Moves the grid cursor, stopping at the edges.
    pub fn move_cursor(&mut self, d_row: i8, d_col: i8) {
        let (row, col) = self.cursor.position();
        let last = GRID_SIDE as i8 - 1;
        let row = (row as i8 + d_row).clamp(0, last) as u8;
        let col = (col as i8 + d_col).clamp(0, last) as u8;
        if let Some(cell) = CellNumber::from_position(row, col) {
            self.cursor = cell;
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(&Settings::default(), Some(42))
    }

    #[test]
    fn cursor_is_clamped_to_grid() {
        let mut app = app();
        app.move_cursor(-1, -1);
        assert_eq!(app.cursor.get(), 1);
        app.move_cursor(0, 1);
        app.move_cursor(1, 0);
        assert_eq!(app.cursor.get(), 12);
        for _ in 0..20 {
            app.move_cursor(1, 1);
        }
        assert_eq!(app.cursor.get(), 100);
    }

    #[test]
    fn submit_clears_input_only_on_success() {
        let mut app = app();
        app.input = "200".into();
        app.submit_input();
        assert_eq!(app.input, "200");
        assert!(app.controller.banner().is_some());

        app.input = "33".into();
        app.submit_input();
        assert!(app.input.is_empty());
        assert_eq!(app.cursor.get(), 33);
        assert_eq!(app.controller.count(), 1);
    }

    #[test]
    fn typing_dismisses_banner_and_caps_length() {
        let mut app = app();
        app.submit_input();
        assert!(app.controller.banner().is_some());
        app.push_char('4');
        assert_eq!(app.controller.banner(), None);
        for _ in 0..20 {
            app.push_char('1');
        }
        assert_eq!(app.input.len(), MAX_INPUT_LEN);
    }

    #[test]
    fn seeded_random_picks_are_reproducible() {
        let mut first = app();
        let mut second = app();
        for _ in 0..5 {
            first.light_random();
            second.light_random();
        }
        assert_eq!(first.controller.highlighted(), second.controller.highlighted());
        assert_eq!(first.controller.count(), 5);
    }

    #[test]
    fn view_follows_controller() {
        let mut app = app();
        assert!(!app.take_changed());
        app.activate(ButtonKind::Random);
        assert!(app.take_changed());
        assert!(!app.take_changed());
        assert_eq!(app.view().count(), 1);
        app.activate(ButtonKind::ClearAll);
        assert!(app.take_changed());
        assert_eq!(app.view().count(), 0);
    }
}
