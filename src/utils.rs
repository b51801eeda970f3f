use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::models::{CellNumber, GRID_SIDE};

/// Widest the grid is drawn, borders included.
pub const MAX_GRID_WIDTH: u16 = GRID_SIDE as u16 * 6 + 2;

/// Splits `area` into the 100 cell rectangles, row-major.
pub fn grid_cells(area: Rect) -> Vec<(CellNumber, Rect)> {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, GRID_SIDE as u32); GRID_SIDE as usize])
        .split(area);

    let mut cells = Vec::with_capacity(CellNumber::MAX as usize);
    for (row, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, GRID_SIDE as u32); GRID_SIDE as usize])
            .split(*row_area);
        for (col, cell_area) in cols.iter().enumerate() {
            if let Some(number) = CellNumber::from_position(row as u8, col as u8) {
                cells.push((number, *cell_area));
            }
        }
    }
    cells
}

/// The grid cell under a terminal position, if any.
pub fn cell_at(area: Rect, column: u16, row: u16) -> Option<CellNumber> {
    if !contains(area, column, row) {
        return None;
    }
    grid_cells(area)
        .into_iter()
        .find(|(_, rect)| contains(*rect, column, row))
        .map(|(number, _)| number)
}

pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Horizontally centers a rect of at most `width` columns inside `area`.
pub fn centered_columns(area: Rect, width: u16) -> Rect {
    let width = width.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y,
        width,
        height: area.height,
    }
}

pub fn status_line(count: usize) -> String {
    format!(
        "{} number{} highlighted",
        count,
        if count == 1 { "" } else { "s" }
    )
}
