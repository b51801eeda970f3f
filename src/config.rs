use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use config::{Config, Environment, File};
use serde::Deserialize;

pub const LOCAL_CONFIG_FILE: &str = "numgrid.toml";
const ENV_PREFIX: &str = "NUMGRID";

const DEFAULT_BANNER_TTL_MS: u64 = 3000;
const DEFAULT_FLASH_MS: u64 = 200;
const DEFAULT_TICK_RATE_MS: u64 = 200;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// How long a validation error stays on screen.
    pub banner_ttl_ms: u64,
    /// How long a randomly picked cell is emphasised.
    pub flash_ms: u64,
    /// Event poll timeout of the main loop.
    pub tick_rate_ms: u64,
    pub mouse: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            banner_ttl_ms: DEFAULT_BANNER_TTL_MS,
            flash_ms: DEFAULT_FLASH_MS,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            mouse: true,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from, in increasing priority: built-in defaults, the
    /// user config file, `numgrid.toml` in the working directory, `extra`
    /// (must exist when given), and `NUMGRID_*` environment variables.
    pub fn new(extra: Option<&Path>) -> Result<Self> {
        Self::load(
            get_user_config_path().as_deref(),
            Path::new(LOCAL_CONFIG_FILE),
            extra,
            environment(),
        )
    }

    fn load(
        user: Option<&Path>,
        local: &Path,
        extra: Option<&Path>,
        env: Environment,
    ) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("banner_ttl_ms", DEFAULT_BANNER_TTL_MS)?
            .set_default("flash_ms", DEFAULT_FLASH_MS)?
            .set_default("tick_rate_ms", DEFAULT_TICK_RATE_MS)?
            .set_default("mouse", true)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?;

        if let Some(user) = user {
            builder = builder.add_source(File::from(user).required(false));
        }
        builder = builder.add_source(File::from(local).required(false));
        if let Some(extra) = extra {
            builder = builder.add_source(File::from(extra).required(true));
        }
        builder = builder.add_source(env);

        let settings: Settings = builder
            .build()
            .context("failed to read configuration sources")?
            .try_deserialize()
            .context("invalid configuration")?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        ensure!(self.banner_ttl_ms > 0, "banner_ttl_ms must be greater than zero");
        ensure!(self.flash_ms > 0, "flash_ms must be greater than zero");
        ensure!(self.tick_rate_ms > 0, "tick_rate_ms must be greater than zero");
        Ok(())
    }

    pub fn banner_ttl(&self) -> Duration {
        Duration::from_millis(self.banner_ttl_ms)
    }

    pub fn flash_duration(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).try_parsing(true)
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("numgrid");
    path.push("numgrid.toml");
    Some(path)
}
