//! Configuration and color themes.
//!
//! This module provides:
//! - TOML configuration loading from `~/.tessera/config.toml`
//! - Built-in color themes (default, nord, dracula, gruvbox-dark)
//!
//! # Configuration File
//!
//! ```toml
//! # Color theme: default, nord, dracula, gruvbox-dark
//! theme = "nord"
//!
//! [input]
//! escape_timeout_ms = 50
//! queue_capacity = 256
//!
//! [render]
//! fps = 30
//!
//! [log]
//! level = "info"
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::colors::{Color, ColorPair};
use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color theme name
    pub theme: String,
    /// Input decoding settings
    pub input: InputConfig,
    /// Frame pacing settings
    pub render: RenderConfig,
    /// Log settings
    pub log: LogConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
            input: InputConfig::default(),
            render: RenderConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// How long a pending escape prefix may wait for more bytes
    pub escape_timeout_ms: u64,
    /// Capacity of the decoded event queue
    pub queue_capacity: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: 50,
            queue_capacity: 256,
        }
    }
}

impl InputConfig {
    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.escape_timeout_ms)
    }
}

/// Render configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { fps: 30 }
    }
}

impl RenderConfig {
    /// Time between frames. A zero fps is treated as 1.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

/// Log configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, overridden by `RUST_LOG`
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load `~/.tessera/config.toml`, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => config,
            Err(e) => {
                warn!("falling back to default config: {}", e);
                Self::default()
            }
        }
    }

    /// Like [`Config::load`] but reports an unreadable or malformed file
    /// instead of logging it, for callers that set up logging afterwards.
    pub fn try_load() -> Result<Self> {
        Self::load_if_present(Self::config_path().as_deref())
    }

    fn load_if_present(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if path.exists() => Self::load_from(path),
            Some(path) => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            None => {
                debug!("no home directory, using default config");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigFile(e.to_string()))
    }

    /// Save configuration to `~/.tessera/config.toml`
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()
            .ok_or_else(|| Error::ConfigFile("could not determine config path".to_string()))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| Error::ConfigFile(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// `~/.tessera`
    pub fn config_dir() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".tessera"))
    }

    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    pub fn log_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("tessera.log"))
    }

    pub fn color_theme(&self) -> ColorTheme {
        ColorTheme::by_name(&self.theme)
    }
}

/// Colors handed to themable widgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorTheme {
    pub name: String,

    /// Panels and general surfaces
    pub primary: ColorPair,
    /// Plain text
    pub text: ColorPair,
    /// Window title bars
    pub titlebar: ColorPair,

    pub button_normal: ColorPair,
    pub button_hover: ColorPair,
    pub button_press: ColorPair,

    pub scroll_indicator: ColorPair,
    /// Highlights, progress bars and gradient endpoints
    pub accent: Color,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self::default_theme()
    }
}

impl ColorTheme {
    pub fn default_theme() -> Self {
        Self {
            name: "default".to_string(),
            primary: ColorPair::new(Color::new(205, 214, 244), Color::new(7, 8, 12)),
            text: ColorPair::new(Color::new(205, 214, 244), Color::new(7, 8, 12)),
            titlebar: ColorPair::new(Color::new(255, 255, 255), Color::new(40, 40, 90)),
            button_normal: ColorPair::new(Color::new(220, 220, 220), Color::new(50, 50, 60)),
            button_hover: ColorPair::new(Color::new(255, 255, 255), Color::new(70, 70, 110)),
            button_press: ColorPair::new(Color::new(20, 20, 20), Color::new(100, 150, 255)),
            scroll_indicator: ColorPair::new(Color::new(100, 150, 255), Color::new(30, 30, 40)),
            accent: Color::new(100, 150, 255),
        }
    }

    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),
            primary: ColorPair::new(Color::new(216, 222, 233), Color::new(46, 52, 64)),
            text: ColorPair::new(Color::new(229, 233, 240), Color::new(46, 52, 64)),
            titlebar: ColorPair::new(Color::new(46, 52, 64), Color::new(136, 192, 208)),
            button_normal: ColorPair::new(Color::new(216, 222, 233), Color::new(59, 66, 82)),
            button_hover: ColorPair::new(Color::new(236, 239, 244), Color::new(76, 86, 106)),
            button_press: ColorPair::new(Color::new(46, 52, 64), Color::new(163, 190, 140)),
            scroll_indicator: ColorPair::new(Color::new(136, 192, 208), Color::new(59, 66, 82)),
            accent: Color::new(136, 192, 208),
        }
    }

    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),
            primary: ColorPair::new(Color::new(248, 248, 242), Color::new(40, 42, 54)),
            text: ColorPair::new(Color::new(248, 248, 242), Color::new(40, 42, 54)),
            titlebar: ColorPair::new(Color::new(40, 42, 54), Color::new(189, 147, 249)),
            button_normal: ColorPair::new(Color::new(248, 248, 242), Color::new(68, 71, 90)),
            button_hover: ColorPair::new(Color::new(248, 248, 242), Color::new(98, 114, 164)),
            button_press: ColorPair::new(Color::new(40, 42, 54), Color::new(80, 250, 123)),
            scroll_indicator: ColorPair::new(Color::new(189, 147, 249), Color::new(68, 71, 90)),
            accent: Color::new(255, 121, 198),
        }
    }

    pub fn gruvbox_dark() -> Self {
        Self {
            name: "gruvbox-dark".to_string(),
            primary: ColorPair::new(Color::new(235, 219, 178), Color::new(40, 40, 40)),
            text: ColorPair::new(Color::new(235, 219, 178), Color::new(40, 40, 40)),
            titlebar: ColorPair::new(Color::new(40, 40, 40), Color::new(215, 153, 33)),
            button_normal: ColorPair::new(Color::new(235, 219, 178), Color::new(60, 56, 54)),
            button_hover: ColorPair::new(Color::new(251, 241, 199), Color::new(102, 92, 84)),
            button_press: ColorPair::new(Color::new(40, 40, 40), Color::new(152, 151, 26)),
            scroll_indicator: ColorPair::new(Color::new(215, 153, 33), Color::new(60, 56, 54)),
            accent: Color::new(254, 128, 25),
        }
    }

    /// Theme by name; unknown names give the default theme.
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "nord" => Self::nord(),
            "dracula" => Self::dracula(),
            "gruvbox-dark" | "gruvbox_dark" | "gruvbox" => Self::gruvbox_dark(),
            _ => Self::default_theme(),
        }
    }

    pub fn list() -> Vec<&'static str> {
        vec!["default", "nord", "dracula", "gruvbox-dark"]
    }
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
