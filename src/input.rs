use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::app::App;
use crate::models::{ButtonKind, FocusArea};
use crate::utils::{cell_at, contains};

/// Applies one key press. Returns `false` once the app should exit.
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return false;
    }

    match key.code {
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::BackTab => app.focus = app.focus.prev(),
        code => match app.focus {
            FocusArea::Grid => handle_grid_key(app, code),
            FocusArea::Input => handle_input_key(app, code),
            FocusArea::Buttons => handle_button_key(app, code),
        },
    }
    app.running
}

fn handle_grid_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1, 0),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1, 0),
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(0, -1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(0, 1),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_cursor(),
        KeyCode::Char('r') => app.light_random(),
        KeyCode::Char('c') => app.clear_all(),
        // Typing a digit on the grid jumps straight into the input field.
        KeyCode::Char(c) if c.is_ascii_digit() => {
            app.focus = FocusArea::Input;
            app.push_char(c);
        }
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}

fn handle_input_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Esc => app.focus = FocusArea::Grid,
        KeyCode::Char(c) => app.push_char(c),
        _ => {}
    }
}

fn handle_button_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left | KeyCode::Char('h') => app.selected_button = app.selected_button.prev(),
        KeyCode::Right | KeyCode::Char('l') => app.selected_button = app.selected_button.next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.activate(app.selected_button),
        KeyCode::Esc => app.focus = FocusArea::Grid,
        KeyCode::Char('q') => app.quit(),
        _ => {}
    }
}

/// Left clicks toggle grid cells, focus the input, or press a button.
pub fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let MouseEventKind::Down(MouseButton::Left) = mouse.kind else {
        return;
    };
    let (column, row) = (mouse.column, mouse.row);

    if let Some(number) = cell_at(app.layout.grid, column, row) {
        app.focus = FocusArea::Grid;
        app.toggle(number);
    } else if contains(app.layout.input, column, row) {
        app.focus = FocusArea::Input;
    } else if let Some(button) = ButtonKind::ALL
        .into_iter()
        .find(|b| contains(app.layout.buttons[b.index()], column, row))
    {
        app.focus = FocusArea::Buttons;
        app.activate(button);
    }
}
