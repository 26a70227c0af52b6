use crate::app::{App, InputField};
use crate::models::ReadingValue;
use crate::ui::components::{absolute_humidity_gauge, relative_humidity_gauge, InputWidget};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct CheckerScreen<'a> {
    pub app: &'a App,
}

impl<'a> CheckerScreen<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for CheckerScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Length(1), // Lookup button
                Constraint::Length(3), // Inputs
                Constraint::Length(6), // Result
                Constraint::Length(4), // Gauges
                Constraint::Length(1), // Last lookup
                Constraint::Min(1),    // Notification
                Constraint::Length(1), // Nav
            ])
            .split(area);

        let title = Line::from(vec![Span::styled(
            "Absolute Humidity Checker",
            Theme::title(),
        )]);
        Paragraph::new(title)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        self.render_lookup_button(chunks[1], buf);
        self.render_inputs(chunks[2], buf);
        self.render_result(chunks[3], buf);
        self.render_gauges(chunks[4], buf);
        self.render_last_lookup(chunks[5], buf);
        self.render_notification(chunks[6], buf);

        let nav = Line::from(vec![
            Span::styled("[Tab]", Theme::nav_key()),
            Span::styled("Field ", Theme::nav_label()),
            Span::styled("[l]", Theme::nav_key()),
            Span::styled("Locate ", Theme::nav_label()),
            Span::styled("[r]", Theme::nav_key()),
            Span::styled("Reset ", Theme::nav_label()),
            Span::styled("[Del]", Theme::nav_key()),
            Span::styled("Clear ", Theme::nav_label()),
            Span::styled("[Esc]", Theme::nav_key()),
            Span::styled("Dismiss ", Theme::nav_label()),
            Span::styled("[q]", Theme::nav_key()),
            Span::styled("Quit", Theme::nav_label()),
        ]);
        Paragraph::new(nav).render(chunks[7], buf);
    }
}

impl CheckerScreen<'_> {
    fn render_lookup_button(&self, area: Rect, buf: &mut Buffer) {
        let (label, style) = if self.app.loading {
            (" Loading... ", Theme::button_disabled())
        } else {
            (" [l] Load weather for current location ", Theme::button())
        };
        Paragraph::new(Span::styled(label, style))
            .alignment(Alignment::Center)
            .render(area, buf);
    }

    fn render_inputs(&self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let fields = [
            (InputField::Temperature, self.app.temperature_input.as_str()),
            (InputField::Humidity, self.app.humidity_input.as_str()),
        ];

        for ((field, value), column) in fields.into_iter().zip(columns.iter()) {
            InputWidget::new(field.label(), value)
                .focused(self.app.focus == field)
                .invalid(value.to_reading_value().is_none())
                .render(*column, buf);
        }
    }

    fn render_result(&self, area: Rect, buf: &mut Buffer) {
        let result = &self.app.result;
        let block = Block::default()
            .title("Current Absolute Humidity")
            .borders(Borders::ALL)
            .border_style(Theme::comfort_border(result.status));

        let inner = block.inner(area);
        block.render(area, buf);

        let lines = vec![
            Line::from(vec![
                Span::styled(result.display_value(), Theme::comfort_value(result.status)),
                Span::styled(" g/m³", Theme::dim()),
            ]),
            Line::from(vec![]),
            Line::from(Span::styled(
                format!(" {} ", result.status.label()),
                Theme::comfort_badge(result.status),
            )),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }

    fn render_gauges(&self, area: Rect, buf: &mut Buffer) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        absolute_humidity_gauge("Absolute (0-25 g/m³)", &self.app.result)
            .render(columns[0], buf);

        let rh = self.app.humidity_input.to_reading_value();
        relative_humidity_gauge("Relative", rh).render(columns[1], buf);
    }

    fn render_last_lookup(&self, area: Rect, buf: &mut Buffer) {
        let line = match &self.app.last_lookup {
            Some(conditions) => {
                let humidity = conditions
                    .relative_humidity
                    .map(|h| format!("{:.0}%", h))
                    .unwrap_or_else(|| "n/a".to_string());
                Line::from(vec![
                    Span::styled("Last lookup: ", Theme::dim()),
                    Span::styled(
                        format!(
                            "{:.1}°C, {} at {}",
                            conditions.temperature_c, humidity, conditions.coordinates
                        ),
                        Theme::normal(),
                    ),
                    Span::styled(
                        format!(" ({})", conditions.fetched_at.format("%Y-%m-%d %H:%M UTC")),
                        Theme::dim(),
                    ),
                ])
            }
            None => Line::from(Span::styled("Last lookup: never", Theme::dim())),
        };
        Paragraph::new(line).render(area, buf);
    }

    fn render_notification(&self, area: Rect, buf: &mut Buffer) {
        if let Some(notification) = &self.app.notification {
            let line = Line::from(Span::styled(
                notification.message.as_str(),
                Theme::notification(notification.kind),
            ));
            Paragraph::new(line).render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsConfig;
    use crate::models::{ComfortStatus, LookupOutcome};

    fn render(app: &App) -> String {
        let area = Rect::new(0, 0, 80, 20);
        let mut buf = Buffer::empty(area);
        CheckerScreen::new(app).render(area, &mut buf);
        (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buf[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn shows_value_and_status() {
        let app = App::new(DefaultsConfig::default());
        let screen = render(&app);
        assert!(screen.contains("9.7"));
        assert!(screen.contains("comfortable / adequate"));
        assert!(screen.contains("Load weather for current location"));
        assert!(screen.contains("Last lookup: never"));
    }

    #[test]
    fn result_border_follows_comfort_band() {
        let mut app = App::new(DefaultsConfig::default());
        let area = Rect::new(0, 0, 80, 20);

        let mut buf = Buffer::empty(area);
        CheckerScreen::new(&app).render(area, &mut buf);
        assert_eq!(buf[(0, 5)].fg, Theme::comfort_color(ComfortStatus::Comfortable));

        app.clear_input();
        let mut buf = Buffer::empty(area);
        CheckerScreen::new(&app).render(area, &mut buf);
        assert_eq!(buf[(0, 5)].fg, Theme::comfort_color(ComfortStatus::NoData));
    }

    #[test]
    fn shows_loading_state() {
        let mut app = App::new(DefaultsConfig::default());
        app.begin_lookup();
        let screen = render(&app);
        assert!(screen.contains("Loading..."));
        assert!(!screen.contains("Load weather for current location"));
    }

    #[test]
    fn shows_placeholder_for_invalid_input() {
        let mut app = App::new(DefaultsConfig::default());
        app.clear_input();
        let screen = render(&app);
        assert!(screen.contains("N/A"));
        assert!(!screen.contains("comfortable"));
    }

    #[test]
    fn shows_failure_notification() {
        let mut app = App::new(DefaultsConfig::default());
        app.begin_lookup();
        app.finish_lookup(LookupOutcome::Failure {
            reason: "connection refused".into(),
        });
        let screen = render(&app);
        assert!(screen.contains("Failed to fetch weather data: connection refused"));
    }
}
