use std::fs::File;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use canvas_client::{Credential, Token, DEFAULT_PER_PAGE};
use canvas_duedates::{
    calendar::{CalendarOptions, DEFAULT_FILENAME},
    AssignmentWindow,
};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use xdg::BaseDirectories;

pub const APP_NAME: &str = "canvas-calendar";
const CONFIG_FILE: &str = "config.json";

/// Environment variables that override the config file
pub const URL_VAR: &str = "CANVAS_URL";
pub const TOKEN_VAR: &str = "CANVAS_API_TOKEN";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// eg. `https://canvas.example.edu`
    pub base_url: Option<String>,
    pub token: Option<Token>,

    /// Assignments due before this are left out
    pub window_start: DateTime<Utc>,
    pub per_page: u32,

    /// Where the calendar gets written
    pub output: Utf8PathBuf,
    pub event_duration_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            window_start: AssignmentWindow::default().start(),
            per_page: DEFAULT_PER_PAGE,
            output: Utf8PathBuf::from(DEFAULT_FILENAME),
            event_duration_minutes: 60,
        }
    }
}

impl Config {
    /// Load the config file if there is one, then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env(|k| std::env::var(k).ok());

        Ok(config)
    }

    /// Load just the config file, or the defaults if it doesn't exist yet
    pub fn load_file() -> Result<Self> {
        let Some(path) = BaseDirectories::with_prefix(APP_NAME)?.find_config_file(CONFIG_FILE)
        else {
            return Ok(Self::default());
        };

        let file = File::open(&path).context("error opening config file")?;
        let config = serde_json::from_reader(&file).context("error deserialising config file")?;

        Ok(config)
    }

    /// Save to the config file, returning where it went
    pub fn save(&self) -> Result<Utf8PathBuf> {
        let path = BaseDirectories::with_prefix(APP_NAME)?.place_config_file(CONFIG_FILE)?;

        let mut file = File::create(&path).context("error opening config file")?;
        serde_json::to_writer_pretty(&mut file, &self).context("error serialising config file")?;

        Utf8PathBuf::from_path_buf(path)
            .map_err(|p| anyhow::anyhow!("config path {} is not UTF-8", p.display()))
    }

    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var(URL_VAR).filter(|v| !v.is_empty()) {
            self.base_url = Some(url);
        }
        if let Some(token) = var(TOKEN_VAR).filter(|v| !v.is_empty()) {
            self.token = Some(token.into());
        }
    }

    /// The configured credentials. Missing parts are left empty, for the client to complain about.
    pub fn credential(&self) -> Credential {
        Credential::new(
            self.base_url.clone().unwrap_or_default(),
            self.token.clone().unwrap_or_default(),
        )
    }

    pub fn window(&self) -> AssignmentWindow {
        AssignmentWindow::starting(self.window_start)
    }

    pub fn calendar_options(&self) -> Result<CalendarOptions> {
        let event_duration = TimeDelta::try_minutes(self.event_duration_minutes.max(1))
            .with_context(|| {
                format!(
                    "event_duration_minutes is too large: {}",
                    self.event_duration_minutes
                )
            })?;

        Ok(CalendarOptions {
            event_duration,
            ..Default::default()
        })
    }
}
