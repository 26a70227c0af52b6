mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;
mod ui;

use anyhow::Context;
use app::{notification_for, App};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use datasources::LocationStrategy;
use logic::{compute, WeatherLookupService};
use models::{ComfortStatus, HumidityResult, LookupOutcome, Reading};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;
use ui::screens::CheckerScreen;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file
    init_logging(cli.verbose, cli.command.is_none())?;

    let Some(config) = load_config_for(cli.command.as_ref(), cli.config.as_ref())? else {
        return match cli.command {
            Some(Commands::Calc {
                temperature,
                humidity,
                json,
            }) => run_calc(&temperature, &humidity, json),
            _ => Config::setup_interactive().map(|_| ()).map_err(Into::into),
        };
    };

    match cli.command {
        Some(Commands::Locate { json }) => run_locate(&config, json).await,
        Some(Commands::Check) => run_check(&config).await,
        Some(Commands::Calc { .. }) | Some(Commands::Init) => Ok(()),
        None => run_tui(config).await,
    }
}

/// Load the config for commands that read it. `calc` and `init` return None,
/// so a broken config file never blocks them.
fn load_config_for(
    command: Option<&Commands>,
    path: Option<&PathBuf>,
) -> anyhow::Result<Option<Config>> {
    match command {
        Some(Commands::Calc { .. }) | Some(Commands::Init) => Ok(None),
        _ => Config::load(path).map(Some).context("Configuration error"),
    }
}

fn init_logging(verbose: u8, to_file: bool) -> anyhow::Result<()> {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    if to_file {
        let path = Config::log_path()?;
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }

    Ok(())
}

#[derive(Serialize)]
struct ResultReport {
    value: Option<f64>,
    status: ComfortStatus,
    label: &'static str,
    color: &'static str,
}

impl From<&HumidityResult> for ResultReport {
    fn from(result: &HumidityResult) -> Self {
        Self {
            value: result.value,
            status: result.status,
            label: result.status.label(),
            color: result.color(),
        }
    }
}

fn describe_result(result: &HumidityResult) -> String {
    if result.is_valid() {
        format!(
            "Absolute humidity: {} g/m³ ({})",
            result.display_value(),
            result.status.label()
        )
    } else {
        "Absolute humidity: - (temperature or humidity is not a number)".to_string()
    }
}

fn run_calc(temperature: &str, humidity: &str, json: bool) -> anyhow::Result<()> {
    let result = compute(temperature, humidity);

    if json {
        println!("{}", serde_json::to_string_pretty(&ResultReport::from(&result))?);
    } else {
        println!("{}", describe_result(&result));
    }

    Ok(())
}

#[derive(Serialize)]
struct LocateReport {
    lookup: LookupOutcome,
    result: Option<ResultReport>,
}

async fn run_locate(config: &Config, json: bool) -> anyhow::Result<()> {
    let service = WeatherLookupService::new(config)?;
    let outcome = service.lookup().await;

    let result = match &outcome {
        LookupOutcome::Success { conditions } => {
            let humidity = conditions
                .relative_humidity
                .unwrap_or(config.defaults.relative_humidity);
            Some(Reading::new(conditions.temperature_c, humidity).compute())
        }
        _ => None,
    };

    if json {
        let report = LocateReport {
            lookup: outcome.clone(),
            result: result.as_ref().map(ResultReport::from),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", notification_for(&outcome).message);
        if let LookupOutcome::Success { conditions } = &outcome {
            println!("Location: {}", conditions.coordinates);
            println!("Temperature: {:.1}°C", conditions.temperature_c);
            match conditions.relative_humidity {
                Some(h) => println!("Relative humidity: {:.0}%", h),
                None => println!(
                    "Relative humidity: not reported, using default {}%",
                    config.defaults.relative_humidity
                ),
            }
        }
        if let Some(ref r) = result {
            println!("{}", describe_result(r));
        }
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_check(config: &Config) -> anyhow::Result<()> {
    println!("Configuration: OK");

    let service = WeatherLookupService::new(config)?;
    let source = match service.strategy() {
        LocationStrategy::Disabled => "disabled".to_string(),
        LocationStrategy::Fixed(c) => format!("fixed ({})", c),
        LocationStrategy::GeoIp(url) => format!("IP geolocation ({})", url),
        LocationStrategy::Unsupported => "none configured".to_string(),
    };
    println!("Location source: {}", source);

    let status = service.check_connections().await;
    match &status.location_error {
        None => println!("Location: OK"),
        Some(e) => println!("Location: FAILED ({})", e),
    }
    if status.location {
        match &status.weather_error {
            None if status.weather => println!("Open-Meteo: OK"),
            None => println!("Open-Meteo: FAILED (unexpected response)"),
            Some(e) => println!("Open-Meteo: FAILED ({})", e),
        }
    }

    if !status.all_connected() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_tui(config: Config) -> anyhow::Result<()> {
    let service = WeatherLookupService::new(&config)?;
    let mut app = App::new(config.defaults.clone());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, &service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    service: &WeatherLookupService,
) -> anyhow::Result<()> {
    let mut pending: Option<JoinHandle<LookupOutcome>> = None;

    loop {
        terminal.draw(|f| f.render_widget(CheckerScreen::new(app), f.area()))?;

        // Handle input with timeout so a finished lookup is picked up promptly
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key.code, key.modifiers) {
                    if app.begin_lookup() {
                        let service = service.clone();
                        pending = Some(tokio::spawn(async move { service.lookup().await }));
                    } else {
                        tracing::debug!("Lookup already in progress");
                    }
                }
            }
        }

        collect_lookup(app, &mut pending).await;

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Hand a finished lookup task's outcome to the app. A task that panicked or
/// was cancelled counts as a failed lookup, so loading always ends.
async fn collect_lookup(app: &mut App, pending: &mut Option<JoinHandle<LookupOutcome>>) {
    if !pending.as_ref().is_some_and(|h| h.is_finished()) {
        return;
    }
    if let Some(handle) = pending.take() {
        let outcome = handle.await.unwrap_or_else(|e| LookupOutcome::Failure {
            reason: format!("lookup task failed: {}", e),
        });
        app.finish_lookup(outcome);
    }
}

/// Apply a key press to the app. Returns true when a location lookup is requested.
fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> bool {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('l') | KeyCode::Char('L') => return true,
        KeyCode::Char('r') => app.reset(),
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => app.toggle_focus(),
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Delete => app.clear_input(),
        KeyCode::Esc => app.dismiss_notification(),
        KeyCode::Char(c) => {
            app.push_char(c);
        }
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use app::NotificationKind;
    use config::DefaultsConfig;
    use models::{Coordinates, CurrentConditions};

    #[test]
    fn keys_edit_and_request_lookup() {
        let mut app = App::new(DefaultsConfig::default());

        assert!(handle_key(&mut app, KeyCode::Char('l'), KeyModifiers::NONE));
        assert!(!handle_key(&mut app, KeyCode::Tab, KeyModifiers::NONE));
        handle_key(&mut app, KeyCode::Delete, KeyModifiers::NONE);
        assert_eq!(app.humidity_input, "");
        handle_key(&mut app, KeyCode::Char('3'), KeyModifiers::NONE);
        handle_key(&mut app, KeyCode::Char('6'), KeyModifiers::NONE);
        assert_eq!(app.result.value, Some(7.0));

        handle_key(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    async fn wait_until_finished(handle: &JoinHandle<LookupOutcome>) {
        while !handle.is_finished() {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn panicked_lookup_ends_loading_with_error() {
        let mut app = App::new(DefaultsConfig::default());
        assert!(app.begin_lookup());

        let handle: JoinHandle<LookupOutcome> = tokio::spawn(async { panic!("lookup blew up") });
        wait_until_finished(&handle).await;
        let mut pending = Some(handle);

        collect_lookup(&mut app, &mut pending).await;

        assert!(pending.is_none());
        assert!(!app.loading);
        let notification = app.notification.as_ref().unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert!(notification.message.contains("lookup task failed"));
        assert_eq!(app.result.value, Some(9.7));
    }

    #[tokio::test]
    async fn finished_lookup_applies_conditions() {
        let mut app = App::new(DefaultsConfig::default());
        assert!(app.begin_lookup());

        let handle = tokio::spawn(async {
            LookupOutcome::Success {
                conditions: CurrentConditions {
                    coordinates: Coordinates::new(52.52, 13.41),
                    temperature_c: 30.0,
                    relative_humidity: Some(80.0),
                    fetched_at: chrono::Utc::now(),
                },
            }
        });
        wait_until_finished(&handle).await;
        let mut pending = Some(handle);

        collect_lookup(&mut app, &mut pending).await;

        assert!(!app.loading);
        assert_eq!(app.result.value, Some(24.3));
        assert!(app.begin_lookup());
    }

    #[tokio::test]
    async fn running_lookup_is_left_pending() {
        let mut app = App::new(DefaultsConfig::default());
        assert!(app.begin_lookup());

        let (tx, rx) = tokio::sync::oneshot::channel::<()>();
        let mut pending = Some(tokio::spawn(async move {
            let _ = rx.await;
            LookupOutcome::Failure {
                reason: "cancelled".into(),
            }
        }));

        collect_lookup(&mut app, &mut pending).await;

        assert!(pending.is_some());
        assert!(app.loading);
        drop(tx);
    }

    #[test]
    fn calc_skips_a_broken_config() {
        let dir = std::env::temp_dir().join(format!("humidcheck-main-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.yaml");
        std::fs::write(&path, "location:\n  latitude: 10.0\n").unwrap();

        let calc = Commands::Calc {
            temperature: "22".into(),
            humidity: "50".into(),
            json: false,
        };
        assert!(load_config_for(Some(&calc), Some(&path)).unwrap().is_none());
        assert!(load_config_for(Some(&Commands::Init), Some(&path))
            .unwrap()
            .is_none());
        assert!(load_config_for(Some(&Commands::Check), Some(&path)).is_err());
        assert!(load_config_for(None, Some(&path)).is_err());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn report_carries_label_and_color() {
        let report = ResultReport::from(&compute("22", "50"));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["value"], 9.7);
        assert_eq!(json["status"], "comfortable");
        assert_eq!(json["label"], "comfortable / adequate");
        assert_eq!(json["color"], "#4CAF50");
    }

    #[test]
    fn describes_invalid_result() {
        assert!(describe_result(&HumidityResult::no_data()).contains("not a number"));
        assert_eq!(
            describe_result(&compute(20, 40)),
            "Absolute humidity: 6.9 g/m³ (dry / insufficient)"
        );
    }
}
