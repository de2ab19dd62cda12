//! Run settings: defaults, optional TOML file, CLI overrides.
//!
//! Precedence is flag > file > default. The default file (`hashscope.toml` in
//! the working directory) is optional; a file named with `--config` must exist.

use crate::cli::RunArgs;
use crate::domain::constants::*;
use crate::domain::errors::EnrichError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_key_file: PathBuf,
    pub hashes: PathBuf,
    pub template_dir: PathBuf,
    pub template: String,
    pub responses_dir: PathBuf,
    pub reports_dir: PathBuf,
    pub api_url: String,
    pub timeout_ms: u64,
    pub create_output_dirs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key_file: PathBuf::from(DEFAULT_API_KEY_FILE),
            hashes: PathBuf::from(DEFAULT_HASH_LIST),
            template_dir: PathBuf::from(DEFAULT_TEMPLATE_DIR),
            template: DEFAULT_TEMPLATE_NAME.to_string(),
            responses_dir: PathBuf::from(DEFAULT_RESPONSES_DIR),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            create_output_dirs: true,
        }
    }
}

impl Settings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn with_run_overrides(mut self, args: &RunArgs) -> Self {
        if let Some(p) = &args.api_key_file {
            self.api_key_file = p.clone();
        }
        if let Some(p) = &args.hashes {
            self.hashes = p.clone();
        }
        if let Some(p) = &args.template_dir {
            self.template_dir = p.clone();
        }
        if let Some(t) = &args.template {
            self.template = t.clone();
        }
        if let Some(p) = &args.responses_dir {
            self.responses_dir = p.clone();
        }
        if let Some(p) = &args.reports_dir {
            self.reports_dir = p.clone();
        }
        if let Some(u) = &args.api_url {
            self.api_url = u.clone();
        }
        if let Some(t) = args.timeout_ms {
            self.timeout_ms = t;
        }
        if args.no_create_dirs {
            self.create_output_dirs = false;
        }
        self
    }
}

pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, EnrichError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let p = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !p.exists() {
                return Ok(Settings::default());
            }
            p
        }
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|e| EnrichError::Config(format!("cannot read {}: {e}", path.display())))?;
    toml::from_str(&raw)
        .map_err(|e| EnrichError::Config(format!("invalid {}: {e}", path.display())))
}

/// Reads the API key file; surrounding whitespace is dropped.
pub fn read_api_key(path: &Path) -> Result<String, EnrichError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        EnrichError::Config(format!("cannot read api key {}: {e}", path.display()))
    })?;
    let key = raw.trim();
    if key.is_empty() {
        return Err(EnrichError::Config(format!(
            "api key file {} is empty",
            path.display()
        )));
    }
    Ok(key.to_string())
}
