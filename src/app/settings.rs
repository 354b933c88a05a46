use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    cli::{Cli, IconMode, UnitsArg},
    domain::weather::Units,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionSetting {
    Full,
    Reduced,
    Off,
}

/// Display preferences that survive restarts. Neither the API key nor any
/// searched city is stored here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSettings {
    pub units: Units,
    pub motion: MotionSetting,
    pub no_flash: bool,
    pub icon_mode: IconMode,
}

impl Default for RuntimeSettings {
    fn default() -> Self {
        Self {
            units: Units::Celsius,
            motion: MotionSetting::Full,
            no_flash: false,
            icon_mode: IconMode::Unicode,
        }
    }
}

impl RuntimeSettings {
    /// Layers explicit CLI flags over `self`.
    #[must_use]
    pub fn with_cli_overrides(mut self, cli: &Cli) -> Self {
        if let Some(units) = cli.units {
            self.units = units_from_cli(units);
        }
        if cli.no_animation {
            self.motion = MotionSetting::Off;
        } else if cli.reduced_motion {
            self.motion = MotionSetting::Reduced;
        }
        if cli.no_flash {
            self.no_flash = true;
        }
        if cli.ascii_icons {
            self.icon_mode = IconMode::Ascii;
        } else if cli.emoji_icons {
            self.icon_mode = IconMode::Emoji;
        }
        self
    }
}

#[must_use]
pub fn units_from_cli(units: UnitsArg) -> Units {
    match units {
        UnitsArg::Celsius => Units::Celsius,
        UnitsArg::Fahrenheit => Units::Fahrenheit,
    }
}

pub fn load_runtime_settings(cli: &Cli, enable_disk: bool) -> (RuntimeSettings, Option<PathBuf>) {
    if !enable_disk {
        return (RuntimeSettings::default().with_cli_overrides(cli), None);
    }
    let path = settings_path();
    let settings = load_runtime_settings_from(cli, path.as_deref());
    (settings, path)
}

pub fn load_runtime_settings_from(cli: &Cli, path: Option<&Path>) -> RuntimeSettings {
    let saved = path.and_then(read_settings).unwrap_or_default();
    saved.with_cli_overrides(cli)
}

fn read_settings(path: &Path) -> Option<RuntimeSettings> {
    let content = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&content) {
        Ok(saved) => Some(saved),
        Err(err) => {
            warn!(path = %path.display(), %err, "ignoring unreadable settings file");
            None
        }
    }
}

pub fn save_runtime_settings(path: &Path, settings: &RuntimeSettings) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("creating settings directory failed")?;
    }
    let payload =
        serde_json::to_string_pretty(settings).context("serializing settings payload failed")?;
    fs::write(path, payload).context("writing settings file failed")
}

#[must_use]
pub fn config_dir() -> Option<PathBuf> {
    if let Some(base) = std::env::var_os("SKYCAST_CONFIG_DIR") {
        return Some(PathBuf::from(base));
    }

    let home = std::env::var_os("HOME")?;
    Some(PathBuf::from(home).join(".config").join("skycast"))
}

fn settings_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("settings.json"))
}
