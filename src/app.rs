use crate::config::DefaultsConfig;
use crate::logic::compute;
use crate::models::{CurrentConditions, HumidityResult, LookupOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Temperature,
    Humidity,
}

impl InputField {
    pub fn label(&self) -> &'static str {
        match self {
            InputField::Temperature => "Temperature (°C)",
            InputField::Humidity => "Relative Humidity (%)",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            InputField::Temperature => InputField::Humidity,
            InputField::Humidity => InputField::Temperature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Turn a lookup outcome into the notification shown to the user.
pub fn notification_for(outcome: &LookupOutcome) -> Notification {
    match outcome {
        LookupOutcome::Success { conditions } => match conditions.relative_humidity {
            Some(_) => Notification::new(
                NotificationKind::Success,
                "Loaded current weather for your location",
            ),
            None => Notification::new(
                NotificationKind::Success,
                "Loaded current temperature for your location (humidity not reported)",
            ),
        },
        LookupOutcome::Failure { reason } => Notification::new(
            NotificationKind::Error,
            format!("Failed to fetch weather data: {}", reason),
        ),
        LookupOutcome::Denied { reason } => {
            Notification::new(NotificationKind::Warning, reason.message())
        }
    }
}

pub struct App {
    pub temperature_input: String,
    pub humidity_input: String,
    pub focus: InputField,
    pub result: HumidityResult,

    pub loading: bool,
    pub last_lookup: Option<CurrentConditions>,
    pub notification: Option<Notification>,
    pub should_quit: bool,

    defaults: DefaultsConfig,
}

impl App {
    pub fn new(defaults: DefaultsConfig) -> Self {
        let mut app = Self {
            temperature_input: format_input(defaults.temperature),
            humidity_input: format_input(defaults.relative_humidity),
            focus: InputField::Temperature,
            result: HumidityResult::no_data(),
            loading: false,
            last_lookup: None,
            notification: None,
            should_quit: false,
            defaults,
        };
        app.recalculate();
        app
    }

    pub fn recalculate(&mut self) {
        self.result = compute(&self.temperature_input, &self.humidity_input);
    }

    fn focused_input_mut(&mut self) -> &mut String {
        match self.focus {
            InputField::Temperature => &mut self.temperature_input,
            InputField::Humidity => &mut self.humidity_input,
        }
    }

    /// Append a character to the focused field. Only characters that can
    /// appear in a decimal number are accepted.
    pub fn push_char(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return false;
        }
        self.focused_input_mut().push(c);
        self.recalculate();
        true
    }

    pub fn pop_char(&mut self) {
        self.focused_input_mut().pop();
        self.recalculate();
    }

    pub fn clear_input(&mut self) {
        self.focused_input_mut().clear();
        self.recalculate();
    }

    pub fn set_temperature(&mut self, temperature: f64) {
        self.temperature_input = format_input(temperature);
        self.recalculate();
    }

    pub fn set_humidity(&mut self, humidity: f64) {
        self.humidity_input = format_input(humidity);
        self.recalculate();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn reset(&mut self) {
        self.temperature_input = format_input(self.defaults.temperature);
        self.humidity_input = format_input(self.defaults.relative_humidity);
        self.focus = InputField::Temperature;
        self.recalculate();
        self.set_notification(NotificationKind::Info, "Inputs reset to defaults");
    }

    /// Mark a lookup as in flight. Returns false if one is already running.
    pub fn begin_lookup(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.loading = true;
        self.set_notification(NotificationKind::Info, "Fetching weather for your location...");
        true
    }

    /// Apply a finished lookup. Always leaves the loading state.
    pub fn finish_lookup(&mut self, outcome: LookupOutcome) {
        self.loading = false;
        self.notification = Some(notification_for(&outcome));

        if let LookupOutcome::Success { conditions } = outcome {
            self.set_temperature(conditions.temperature_c);
            if let Some(humidity) = conditions.relative_humidity {
                self.set_humidity(humidity);
            }
            self.last_lookup = Some(conditions);
        }
    }

    pub fn set_notification(&mut self, kind: NotificationKind, message: &str) {
        self.notification = Some(Notification::new(kind, message));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// Render a number the way it should appear in an input field.
fn format_input(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{:.0}", value)
    } else {
        value.to_string()
    }
}
