use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const FOCUSED_BORDER_STYLE: Style = BASE_STYLE.fg(Color::LightYellow);

pub(crate) const SELECTED_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

pub(crate) const INACTIVE_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::LightCyan);

pub(crate) mod preview {
    use super::*;

    pub(crate) const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

    pub(crate) const HEADER_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

    /// Text on a highlighted day
    pub(crate) const MARKED_FG: Color = Color::Black;
}

pub(crate) mod prompt {
    use super::*;

    pub(crate) const CURSOR_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);

    pub(crate) const HINT_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);
}
