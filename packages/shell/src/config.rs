//! Shell configuration.
//!
//! Settings come from, lowest priority first: built-in defaults, a JSON
//! config file, the `EEKV_STORE` environment variable (image path only) and
//! command-line flags.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use eekv_store::SlotLayout;
use serde::Deserialize;

use crate::ShellError;

/// Environment variable overriding the image path.
pub const STORE_ENV: &str = "EEKV_STORE";

/// Input buffer size of the line editor. Holds 71 characters.
pub const DEFAULT_LINE_CAPACITY: usize = 72;

pub const DEFAULT_BAUD: u32 = 115_200;

/// Everything needed to start a session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// EEPROM image file.
    pub store: PathBuf,
    /// Serial device to serve instead of stdin/stdout.
    pub device: Option<PathBuf>,
    pub baud: u32,
    pub line_capacity: usize,
    pub color: bool,
    pub layout: SlotLayout,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            store: default_store_path(),
            device: None,
            baud: DEFAULT_BAUD,
            line_capacity: DEFAULT_LINE_CAPACITY,
            color: true,
            layout: SlotLayout::EEPROM,
        }
    }
}

/// Values given on the command line. `None` leaves the setting alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub store: Option<PathBuf>,
    pub device: Option<PathBuf>,
    pub baud: Option<u32>,
    pub line_capacity: Option<usize>,
    pub no_color: bool,
}

impl ShellConfig {
    /// Read a JSON config file. Missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ShellError> {
        let file = File::open(path).map_err(|source| ShellError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| ShellError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layer the environment and command-line overrides on top of `self`.
    pub fn merge(mut self, env_store: Option<PathBuf>, overrides: Overrides) -> Self {
        if let Some(store) = env_store {
            self.store = store;
        }
        if let Some(store) = overrides.store {
            self.store = store;
        }
        if overrides.device.is_some() {
            self.device = overrides.device;
        }
        if let Some(baud) = overrides.baud {
            self.baud = baud;
        }
        if let Some(capacity) = overrides.line_capacity {
            self.line_capacity = capacity;
        }
        if overrides.no_color {
            self.color = false;
        }
        self
    }

    /// Build the effective configuration from an optional config file, the
    /// process environment and command-line overrides.
    pub fn resolve(config_file: Option<&Path>, overrides: Overrides) -> Result<Self, ShellError> {
        let base = match config_file {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        let env_store = std::env::var_os(STORE_ENV).map(PathBuf::from);
        Ok(base.merge(env_store, overrides))
    }
}

/// `<data-local-dir>/eekv/eeprom.bin`, or `eeprom.bin` in the working
/// directory when the platform has no data directory.
pub fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|p| p.join("eekv").join("eeprom.bin"))
        .unwrap_or_else(|| PathBuf::from("eeprom.bin"))
}
