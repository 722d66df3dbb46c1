//! Configuration management for listkeep
//!
//! Handles the ~/.listkeep/ directory and config.toml. Nothing here stores
//! entity data; collections still live only for the session.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Screen the dashboard opens on
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    #[default]
    Home,
    Books,
    Contacts,
    Recipes,
    Cart,
    SignIn,
    SignUp,
}

impl Screen {
    pub const ALL: [Screen; 7] = [
        Screen::Home,
        Screen::Books,
        Screen::Contacts,
        Screen::Recipes,
        Screen::Cart,
        Screen::SignIn,
        Screen::SignUp,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Home",
            Screen::Books => "Books",
            Screen::Contacts => "Contacts",
            Screen::Recipes => "Recipes",
            Screen::Cart => "Cart",
            Screen::SignIn => "Sign In",
            Screen::SignUp => "Sign Up",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|s| s == self).unwrap_or(0)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Screen::Home => write!(f, "home"),
            Screen::Books => write!(f, "books"),
            Screen::Contacts => write!(f, "contacts"),
            Screen::Recipes => write!(f, "recipes"),
            Screen::Cart => write!(f, "cart"),
            Screen::SignIn => write!(f, "signin"),
            Screen::SignUp => write!(f, "signup"),
        }
    }
}

impl std::str::FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "home" => Ok(Screen::Home),
            "books" => Ok(Screen::Books),
            "contacts" => Ok(Screen::Contacts),
            "recipes" => Ok(Screen::Recipes),
            "cart" => Ok(Screen::Cart),
            "signin" => Ok(Screen::SignIn),
            "signup" => Ok(Screen::SignUp),
            _ => Err(format!(
                "Invalid screen: {}. Use: home, books, contacts, recipes, cart, signin, signup",
                s
            )),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulated auth round trip
    pub auth_delay_ms: u64,
    pub currency_symbol: String,
    /// Dashboard event poll interval
    pub tick_rate_ms: u64,
    pub start_screen: Screen,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_delay_ms: 1000,
            currency_symbol: "$".to_string(),
            tick_rate_ms: 100,
            start_screen: Screen::Home,
            log_file: None,
        }
    }
}

/// Returns the path to the listkeep home directory (~/.listkeep)
pub fn listkeep_home() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".listkeep"))
}

/// Returns paths to all listkeep files
pub struct ListkeepPaths {
    pub root: PathBuf,
    pub config: PathBuf,
}

impl ListkeepPaths {
    pub fn new() -> Result<Self> {
        Ok(Self::at(listkeep_home()?))
    }

    /// Paths rooted somewhere other than the home directory
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            config: root.join("config.toml"),
            root,
        }
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root).context("Failed to create listkeep root")?;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.config.exists()
    }
}

/// Load configuration; a missing file means defaults
pub fn load_config(paths: &ListkeepPaths) -> Result<Config> {
    load_config_from(&paths.config)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Save configuration to disk
pub fn save_config(paths: &ListkeepPaths, config: &Config) -> Result<()> {
    paths.ensure_dirs()?;
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    fs::write(&paths.config, content).context("Failed to write config.toml")?;
    Ok(())
}
