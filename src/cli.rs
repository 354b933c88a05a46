#![allow(clippy::missing_errors_doc)]

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UnitsArg {
    Celsius,
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IconMode {
    Unicode,
    Ascii,
    Emoji,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser, Clone)]
#[command(
    name = "skycast",
    version,
    about = "Terminal weather lookup with animated sky backgrounds"
)]
pub struct Cli {
    /// City name to look up; without one the search box opens
    pub city: Option<String>,

    /// Display units
    #[arg(long, value_enum)]
    pub units: Option<UnitsArg>,

    /// Target FPS (15..60)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(15..=60))]
    pub fps: u8,

    /// Disable particle animation
    #[arg(long)]
    pub no_animation: bool,

    /// Lower motion mode
    #[arg(long)]
    pub reduced_motion: bool,

    /// Disable thunder flash
    #[arg(long)]
    pub no_flash: bool,

    /// Force ASCII icons
    #[arg(long, conflicts_with = "emoji_icons")]
    pub ascii_icons: bool,

    /// Force emoji icons
    #[arg(long)]
    pub emoji_icons: bool,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Weather API base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Print weather snapshot to stdout and exit (non-interactive)
    #[arg(long)]
    pub one_shot: bool,
}

impl Cli {
    #[must_use]
    pub fn requested_city(&self) -> Option<String> {
        self.city
            .as_deref()
            .map(str::trim)
            .filter(|city| !city.is_empty())
            .map(str::to_string)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self
            .api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            anyhow::bail!("missing API key: pass --api-key or set OPENWEATHER_API_KEY");
        }
        if self.one_shot && self.requested_city().is_none() {
            anyhow::bail!("--one-shot needs a city");
        }
        Ok(())
    }
}
