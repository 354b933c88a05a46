use std::{path::PathBuf, time::Instant};

use anyhow::Result;
use chrono::NaiveDateTime;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    app::{
        events::{AppEvent, start_clock_task, start_frame_task},
        settings::{MotionSetting, RuntimeSettings, save_runtime_settings},
    },
    cli::Cli,
    data::openweather::{FetchError, OpenWeatherClient},
    domain::weather::{Presentation, Units, WeatherReport},
    ui::particles::ParticleEngine,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// No city requested yet.
    Idle,
    Loading,
    Ready,
    Error,
    Quit,
}

#[derive(Debug, Default)]
pub struct SearchBox {
    pub open: bool,
    pub query: String,
}

#[derive(Debug)]
pub struct AppState {
    pub mode: AppMode,
    pub running: bool,
    pub loading_message: String,
    pub last_error: Option<String>,
    pub city: Option<String>,
    pub weather: Option<WeatherReport>,
    pub presentation: Presentation,
    pub local_time: Option<NaiveDateTime>,
    pub settings: RuntimeSettings,
    pub settings_path: Option<PathBuf>,
    pub search: SearchBox,
    pub particles: ParticleEngine,
    pub fetch_in_flight: bool,
    pub active_request: Option<u64>,
    next_request_id: u64,
    pub last_frame_at: Instant,
    pub frame_tick: u64,
}

impl AppState {
    pub fn new(settings: RuntimeSettings, settings_path: Option<PathBuf>) -> Self {
        Self {
            mode: AppMode::Idle,
            running: true,
            loading_message: "Initializing...".to_string(),
            last_error: None,
            city: None,
            weather: None,
            presentation: Presentation::default(),
            local_time: None,
            particles: ParticleEngine::new(settings.motion, settings.no_flash),
            settings,
            settings_path,
            search: SearchBox::default(),
            fetch_in_flight: false,
            active_request: None,
            next_request_id: 0,
            last_frame_at: Instant::now(),
            frame_tick: 0,
        }
    }

    pub async fn handle_event(
        &mut self,
        event: AppEvent,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            AppEvent::Bootstrap => {
                let fps = if self.settings.motion == MotionSetting::Reduced {
                    cli.fps.min(20)
                } else {
                    cli.fps
                };
                start_frame_task(tx.clone(), fps);
                start_clock_task(tx.clone());
                match cli.requested_city() {
                    Some(city) => self.start_fetch(tx, cli, city),
                    None => self.open_search(),
                }
            }
            AppEvent::TickFrame => {
                let now = Instant::now();
                let delta = now.duration_since(self.last_frame_at);
                self.last_frame_at = now;
                self.frame_tick = self.frame_tick.saturating_add(1);
                self.particles.update(self.presentation, delta);
            }
            AppEvent::TickClock => self.refresh_clock(),
            AppEvent::Input(event) => self.handle_input(event, tx, cli).await?,
            AppEvent::FetchSucceeded { request_id, report } => {
                if !self.is_active_request(request_id) {
                    return Ok(());
                }
                info!(city = %report.current.city, days = report.daily.len(), "weather ready");
                self.finish_request();
                self.weather = Some(report);
                self.refresh_clock();
                self.particles.reset();
                self.mode = AppMode::Ready;
                self.last_error = None;
            }
            AppEvent::FetchFailed {
                request_id,
                message,
            } => {
                if !self.is_active_request(request_id) {
                    return Ok(());
                }
                warn!(%message, "weather lookup failed");
                self.finish_request();
                self.weather = None;
                self.refresh_clock();
                self.particles.reset();
                self.last_error = Some(message);
                self.mode = AppMode::Error;
            }
            AppEvent::Quit => {
                self.mode = AppMode::Quit;
            }
        }

        Ok(())
    }

    async fn handle_input(
        &mut self,
        event: Event,
        tx: &mpsc::Sender<AppEvent>,
        cli: &Cli,
    ) -> Result<()> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.search.open {
                    self.handle_search_key(key, tx, cli);
                    return Ok(());
                }
                match key.code {
                    KeyCode::Esc | KeyCode::Char('q') => {
                        tx.send(AppEvent::Quit).await?;
                    }
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        tx.send(AppEvent::Quit).await?;
                    }
                    KeyCode::Char('/' | 's') => self.open_search(),
                    KeyCode::Char('r') => {
                        if let Some(city) = self.city.clone() {
                            self.start_fetch(tx, cli, city);
                        }
                    }
                    KeyCode::Char('f') => self.set_units(Units::Fahrenheit),
                    KeyCode::Char('c') => self.set_units(Units::Celsius),
                    _ => {}
                }
            }
            Event::Resize(_, _) => {
                self.particles.reset();
            }
            _ => {}
        }

        Ok(())
    }

    fn handle_search_key(&mut self, key: KeyEvent, tx: &mpsc::Sender<AppEvent>, cli: &Cli) {
        match key.code {
            KeyCode::Esc => {
                self.search.open = false;
            }
            KeyCode::Enter => {
                let city = self.search.query.trim().to_string();
                self.search.open = false;
                if city.is_empty() {
                    self.last_error = Some(FetchError::EmptyCity.to_string());
                    self.mode = AppMode::Error;
                } else {
                    self.start_fetch(tx, cli, city);
                }
            }
            KeyCode::Backspace => {
                self.search.query.pop();
            }
            KeyCode::Char(ch) if is_city_char(ch) => {
                self.search.query.push(ch);
            }
            _ => {}
        }
    }

    pub fn open_search(&mut self) {
        self.search.open = true;
        self.search.query.clear();
    }

    /// Starts a lookup; any lookup still in flight is superseded.
    pub fn start_fetch(&mut self, tx: &mpsc::Sender<AppEvent>, cli: &Cli, city: String) {
        self.next_request_id = self.next_request_id.wrapping_add(1);
        let request_id = self.next_request_id;
        self.active_request = Some(request_id);
        self.fetch_in_flight = true;
        self.loading_message = format!("Loading weather for {city}...");
        self.mode = AppMode::Loading;
        self.city = Some(city.clone());
        debug!(request_id, %city, "starting weather lookup");

        let client = weather_client(cli);
        let tx2 = tx.clone();
        tokio::spawn(async move {
            let event = match client {
                Ok(client) => match client.fetch(&city).await {
                    Ok(report) => AppEvent::FetchSucceeded { request_id, report },
                    Err(err) => AppEvent::FetchFailed {
                        request_id,
                        message: err.to_string(),
                    },
                },
                Err(err) => AppEvent::FetchFailed {
                    request_id,
                    message: err.to_string(),
                },
            };
            let _ = tx2.send(event).await;
        });
    }

    fn is_active_request(&self, request_id: u64) -> bool {
        let active = self.active_request == Some(request_id);
        if !active {
            debug!(request_id, "dropping superseded weather response");
        }
        active
    }

    fn finish_request(&mut self) {
        self.fetch_in_flight = false;
        self.active_request = None;
    }

    /// Recomputes the city clock and the sky presentation; the night flag can
    /// flip between two ticks.
    pub fn refresh_clock(&mut self) {
        match &self.weather {
            Some(report) => {
                self.local_time = Some(report.local_time());
                self.presentation = report.presentation();
            }
            None => {
                self.local_time = None;
                self.presentation = Presentation::default();
            }
        }
    }

    fn set_units(&mut self, units: Units) {
        if self.settings.units != units {
            self.settings.units = units;
            self.persist_settings();
        }
    }

    fn persist_settings(&self) {
        let Some(path) = &self.settings_path else {
            return;
        };
        if let Err(err) = save_runtime_settings(path, &self.settings) {
            warn!(path = %path.display(), error = %err, "saving settings failed");
        }
    }
}

/// Client for the configured endpoint; `--base-url` replaces the public API.
pub fn weather_client(cli: &Cli) -> Result<OpenWeatherClient, FetchError> {
    let api_key = cli.api_key.clone().unwrap_or_default();
    match &cli.base_url {
        Some(base_url) => OpenWeatherClient::with_base_url(base_url.clone(), api_key),
        None => OpenWeatherClient::new(api_key),
    }
}

pub(crate) fn is_city_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, ' ' | '-' | '\'' | '’' | ',' | '.')
}
