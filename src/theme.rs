use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub focus_border: Color,
    pub blurred_border: Color,
    pub text_secondary: Color,

    // Grid cells
    pub cell: Style,
    pub cell_highlighted: Style,
    pub cell_flash: Style,
    pub cell_cursor: Modifier,

    // Controls
    pub input_text: Style,
    pub input_placeholder: Style,
    pub button_highlight: Style,
    pub button_random: Style,
    pub button_clear: Style,
    pub error: Style,

    pub title: Style,
    pub status: Style,
    pub footer: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            focus_border: Color::Cyan,
            blurred_border: Color::DarkGray,
            text_secondary: Color::Gray,

            cell: Style::default().fg(Color::White).bg(Color::Rgb(31, 41, 55)),
            cell_highlighted: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            cell_flash: Style::default()
                .fg(Color::Black)
                .bg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
            cell_cursor: Modifier::REVERSED,

            input_text: Style::default().fg(Color::White),
            input_placeholder: Style::default().fg(Color::DarkGray),
            button_highlight: Style::default().fg(Color::White).bg(Color::Blue),
            button_random: Style::default().fg(Color::White).bg(Color::Green),
            button_clear: Style::default().fg(Color::White).bg(Color::Red),
            error: Style::default().fg(Color::LightRed),

            title: Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            status: Style::default().fg(Color::Gray),
            footer: Style::default().fg(Color::Gray).add_modifier(Modifier::DIM),
        }
    }
}

impl Theme {
    pub fn border(&self, focused: bool) -> Style {
        if focused {
            Style::default().fg(self.focus_border).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.blurred_border)
        }
    }
}
