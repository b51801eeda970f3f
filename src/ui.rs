use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    layout::{Constraint, Direction, Layout},
    text::{Span, Line},
};

use crate::app::{App, ScreenLayout};
use crate::models::{ButtonKind, FocusArea};
use crate::theme::Theme;
use crate::utils::{MAX_GRID_WIDTH, centered_columns, grid_cells, status_line};

/// Wide enough for the longest button label on each third.
const BUTTON_ROW_WIDTH: u16 = 84;

const FOOTER_HELP: &str =
    "Tab/Shift+Tab Focus | ←/→/↑/↓ or h/j/k/l Move | <Space> Toggle | r Random | c Clear | 0-9 Type | q Quit";

/// Draws the whole screen and returns where the interactive parts ended up.
pub fn render(f: &mut Frame, app: &App, theme: &Theme) -> ScreenLayout {
    let area = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Min(12),   // grid
            Constraint::Length(3), // input
            Constraint::Length(1), // error banner
            Constraint::Length(3), // buttons
            Constraint::Length(1), // status
            Constraint::Length(1), // footer
        ])
        .split(area);

    render_header(f, chunks[0], theme);
    let grid = render_grid(f, chunks[1], app, theme);
    let input = render_input(f, chunks[2], app, theme);
    render_banner(f, chunks[3], app, theme);
    let buttons = render_buttons(f, chunks[4], app, theme);

    let status = Paragraph::new(status_line(app.view().count()))
        .alignment(Alignment::Center)
        .style(theme.status);
    f.render_widget(status, chunks[5]);

    let footer = Paragraph::new(FOOTER_HELP).style(theme.footer);
    f.render_widget(footer, chunks[6]);

    ScreenLayout { grid, input, buttons }
}

fn render_header(f: &mut Frame, area: Rect, theme: &Theme) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled("Interactive Number Grid", theme.title)),
        Line::from(Span::styled(
            "Toggle numbers, or highlight specific or random ones",
            Style::default().fg(theme.text_secondary),
        )),
    ])
    .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// Returns the inner grid area, the one cells are hit-tested against.
fn render_grid(f: &mut Frame, area: Rect, app: &App, theme: &Theme) -> Rect {
    let area = centered_columns(area, MAX_GRID_WIDTH);
    let block = Block::default()
        .title("Numbers")
        .borders(Borders::ALL)
        .border_style(theme.border(app.focus == FocusArea::Grid));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let view = app.view();
    for (number, cell_area) in grid_cells(inner) {
        let mut style = if view.flashing == Some(number) {
            theme.cell_flash
        } else if view.highlighted.contains(number) {
            theme.cell_highlighted
        } else {
            theme.cell
        };
        if app.focus == FocusArea::Grid && app.cursor == number {
            style = style.add_modifier(theme.cell_cursor);
        }
        // Vertically center the label in tall cells.
        let pad = cell_area.height.saturating_sub(1) / 2;
        let mut lines = vec![Line::raw(""); pad as usize];
        lines.push(Line::raw(number.to_string()));
        let cell = Paragraph::new(lines).alignment(Alignment::Center).style(style);
        f.render_widget(cell, cell_area);
    }
    inner
}

fn render_input(f: &mut Frame, area: Rect, app: &App, theme: &Theme) -> Rect {
    let area = centered_columns(area, MAX_GRID_WIDTH);
    let focused = app.focus == FocusArea::Input;
    let block = Block::default()
        .title("Enter a number (1-100)")
        .borders(Borders::ALL)
        .border_style(theme.border(focused));

    let text = if app.input.is_empty() && !focused {
        Line::from(Span::styled("Enter number...", theme.input_placeholder))
    } else {
        let cursor = if focused { "▏" } else { "" };
        Line::from(vec![
            Span::styled(app.input.clone(), theme.input_text),
            Span::styled(cursor, theme.input_text),
        ])
    };
    f.render_widget(Paragraph::new(text).block(block), area);
    area
}

fn render_banner(f: &mut Frame, area: Rect, app: &App, theme: &Theme) {
    if let Some(message) = app.view().banner.as_deref() {
        let banner = Paragraph::new(message.to_string())
            .alignment(Alignment::Center)
            .style(theme.error);
        f.render_widget(banner, area);
    }
}

fn render_buttons(f: &mut Frame, area: Rect, app: &App, theme: &Theme) -> [Rect; 3] {
    let area = centered_columns(area, BUTTON_ROW_WIDTH);
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(area);

    let mut rects = [Rect::default(); 3];
    for button in ButtonKind::ALL {
        let rect = columns[button.index()];
        let selected = app.focus == FocusArea::Buttons && app.selected_button == button;
        let style = match button {
            ButtonKind::Highlight => theme.button_highlight,
            ButtonKind::Random => theme.button_random,
            ButtonKind::ClearAll => theme.button_clear,
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border(selected));
        let label = Paragraph::new(button.label())
            .alignment(Alignment::Center)
            .style(style)
            .block(block);
        f.render_widget(label, rect);
        rects[button.index()] = rect;
    }
    rects
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    use super::*;
    use crate::config::Settings;
    use crate::models::CellNumber;
    use crate::utils::{cell_at, grid_cells};

    fn draw_buffer(app: &App) -> (Buffer, ScreenLayout) {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let theme = Theme::default();
        let mut layout = ScreenLayout::default();
        terminal
            .draw(|f| layout = render(f, app, &theme))
            .unwrap();
        (terminal.backend().buffer().clone(), layout)
    }

    fn draw(app: &App) -> (String, ScreenLayout) {
        let (buffer, layout) = draw_buffer(app);
        let text = buffer
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        (text, layout)
    }

    /// Background of the top-left terminal cell of `number`'s grid cell.
    fn cell_bg(app: &App, number: CellNumber) -> Color {
        let (buffer, layout) = draw_buffer(app);
        let (_, rect) = grid_cells(layout.grid)
            .into_iter()
            .find(|(n, _)| *n == number)
            .unwrap();
        buffer.content[buffer.index_of(rect.x, rect.y)].bg
    }

    #[test]
    fn renders_grid_controls_and_count() {
        let mut app = App::new(&Settings::default(), Some(1));
        app.toggle(CellNumber::new(100).unwrap());
        let (text, _) = draw(&app);
        assert!(text.contains("Interactive Number Grid"));
        assert!(text.contains("100"));
        assert!(text.contains("Light up Random Number"));
        assert!(text.contains("1 number highlighted"));
    }

    #[test]
    fn banner_is_drawn_while_active() {
        let mut app = App::new(&Settings::default(), Some(1));
        app.input = "abc".into();
        app.submit_input();
        let (text, _) = draw(&app);
        assert!(text.contains("Please enter a valid number."));

        app.push_char('1');
        let (text, _) = draw(&app);
        assert!(!text.contains("Please enter a valid number."));
    }

    #[test]
    fn returned_layout_matches_drawn_grid() {
        let app = App::new(&Settings::default(), Some(1));
        let (_, layout) = draw(&app);
        let grid = layout.grid;
        assert_eq!(cell_at(grid, grid.x, grid.y).map(CellNumber::get), Some(1));
        assert_eq!(
            cell_at(grid, grid.x + grid.width - 1, grid.y + grid.height - 1).map(CellNumber::get),
            Some(100)
        );
        assert!(layout.buttons.iter().all(|b| b.width > 0));
    }

    #[test]
    fn random_pick_flashes_then_stays_highlighted() {
        let theme = Theme::default();
        let mut app = App::new(&Settings::default(), Some(7));
        app.light_random();
        let picked = app.controller.flashing().unwrap();

        assert_eq!(Some(cell_bg(&app, picked)), theme.cell_flash.bg);

        app.tick(Instant::now() + Duration::from_secs(1));
        assert_eq!(app.controller.flashing(), None);
        assert_eq!(Some(cell_bg(&app, picked)), theme.cell_highlighted.bg);
    }
}
