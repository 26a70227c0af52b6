use crate::app::NotificationKind;
use crate::models::ComfortStatus;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme;

impl Theme {
    // Base colors
    pub const FG: Color = Color::White;
    pub const DIM: Color = Color::DarkGray;
    pub const ACCENT: Color = Color::Cyan;
    pub const BUTTON: Color = Color::Rgb(0x00, 0x7b, 0xff);

    // Status colors
    pub const SUCCESS: Color = Color::Green;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;

    // Styles
    pub fn title() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn normal() -> Style {
        Style::default().fg(Self::FG)
    }

    pub fn dim() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn selected() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Self::FG)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error() -> Style {
        Style::default().fg(Self::ERROR)
    }

    pub fn button() -> Style {
        Style::default()
            .fg(Self::FG)
            .bg(Self::BUTTON)
            .add_modifier(Modifier::BOLD)
    }

    pub fn button_disabled() -> Style {
        Style::default().fg(Self::DIM).bg(Color::Black)
    }

    pub fn comfort_color(status: ComfortStatus) -> Color {
        let (r, g, b) = status.rgb();
        Color::Rgb(r, g, b)
    }

    pub fn comfort_value(status: ComfortStatus) -> Style {
        Style::default()
            .fg(Self::comfort_color(status))
            .add_modifier(Modifier::BOLD)
    }

    pub fn comfort_border(status: ComfortStatus) -> Style {
        Style::default().fg(Self::comfort_color(status))
    }

    pub fn comfort_badge(status: ComfortStatus) -> Style {
        Style::default()
            .fg(Self::FG)
            .bg(Self::comfort_color(status))
            .add_modifier(Modifier::BOLD)
    }

    pub fn notification(kind: NotificationKind) -> Style {
        let color = match kind {
            NotificationKind::Info => Self::FG,
            NotificationKind::Success => Self::SUCCESS,
            NotificationKind::Warning => Self::WARNING,
            NotificationKind::Error => Self::ERROR,
        };
        Style::default().fg(color)
    }

    pub fn nav_key() -> Style {
        Style::default()
            .fg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn nav_label() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border() -> Style {
        Style::default().fg(Self::DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comfort_colors_match_status_tokens() {
        assert_eq!(
            Theme::comfort_color(ComfortStatus::Dry),
            Color::Rgb(0xFF, 0x98, 0x00)
        );
        assert_eq!(
            Theme::comfort_color(ComfortStatus::Comfortable),
            Color::Rgb(0x4C, 0xAF, 0x50)
        );
        assert_eq!(
            Theme::comfort_color(ComfortStatus::Humid),
            Color::Rgb(0xF4, 0x43, 0x36)
        );
    }

    #[test]
    fn comfort_border_uses_status_color() {
        assert_eq!(
            Theme::comfort_border(ComfortStatus::NoData).fg,
            Some(Color::Rgb(0x99, 0x99, 0x99))
        );
        assert_eq!(
            Theme::comfort_border(ComfortStatus::Dry).fg,
            Some(Theme::comfort_color(ComfortStatus::Dry))
        );
    }
}
