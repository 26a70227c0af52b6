use crate::models::{ComfortStatus, HumidityResult};
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct GaugeWidget<'a> {
    title: &'a str,
    value: Option<f64>,
    unit: &'a str,
    min: f64,
    max: f64,
    color: Color,
    precision: usize,
}

impl<'a> GaugeWidget<'a> {
    pub fn new(title: &'a str, value: Option<f64>, unit: &'a str) -> Self {
        Self {
            title,
            value,
            unit,
            min: 0.0,
            max: 100.0,
            color: Theme::FG,
            precision: 1,
        }
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    fn ratio(&self, value: f64) -> f64 {
        if self.max <= self.min {
            return 0.0;
        }
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

impl Widget for GaugeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width < 10 {
            return;
        }

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Theme::border());

        let inner = block.inner(area);
        block.render(area, buf);

        match self.value {
            Some(value) => {
                let value_str = format!("{:.prec$} {}", value, self.unit, prec = self.precision);
                let value_line = Line::from(vec![Span::styled(
                    value_str,
                    Style::default().fg(self.color),
                )]);
                Paragraph::new(value_line).render(inner, buf);

                if inner.height >= 2 {
                    let bar_area = Rect {
                        x: inner.x,
                        y: inner.y + 1,
                        width: inner.width,
                        height: 1,
                    };

                    let filled = (bar_area.width as f64 * self.ratio(value)) as u16;

                    for x in bar_area.x..bar_area.x + bar_area.width {
                        let ch = if x < bar_area.x + filled {
                            '█'
                        } else {
                            '░'
                        };
                        buf[(x, bar_area.y)].set_char(ch).set_fg(self.color);
                    }
                }
            }
            None => {
                let na_line = Line::from(vec![Span::styled("N/A", Theme::dim())]);
                Paragraph::new(na_line).render(inner, buf);
            }
        }
    }
}

/// Absolute humidity gauge colored by comfort band.
pub fn absolute_humidity_gauge<'a>(
    title: &'a str,
    result: &HumidityResult,
) -> GaugeWidget<'a> {
    GaugeWidget::new(title, result.value, "g/m³")
        .range(0.0, 25.0)
        .color(Theme::comfort_color(result.status))
}

pub fn relative_humidity_gauge(title: &str, value: Option<f64>) -> GaugeWidget<'_> {
    let color = match value {
        Some(v) if v >= 80.0 => Theme::WARNING,
        Some(_) => Theme::SUCCESS,
        None => Theme::comfort_color(ComfortStatus::NoData),
    };
    GaugeWidget::new(title, value, "%")
        .range(0.0, 100.0)
        .precision(0)
        .color(color)
}
