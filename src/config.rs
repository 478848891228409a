use crate::error::{AquaOpsError, Result};
use dialoguer::Input;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub network: NetworkConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
    /// Display name for this deployment, e.g. the city or catchment.
    pub name: String,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EngineConfig {
    /// Default trailing window for history queries.
    #[serde(default = "default_history_window_hours")]
    pub history_window_hours: u32,
    /// Default cadence for the monitor loop.
    #[serde(default = "default_monitor_interval_secs")]
    pub monitor_interval_secs: u64,
}

fn default_history_window_hours() -> u32 {
    24
}

fn default_monitor_interval_secs() -> u64 {
    300
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            history_window_hours: default_history_window_hours(),
            monitor_interval_secs: default_monitor_interval_secs(),
        }
    }
}

impl Config {
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) => p,
            None => Self::find_config_path()?,
        };

        if !config_path.exists() {
            return Err(AquaOpsError::Config(format!(
                "Config file not found at {:?}. Run `aquaops init` to set up.",
                config_path
            )));
        }

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| AquaOpsError::Config(format!("Failed to read config: {}", e)))?;

        // Substitute environment variables
        let config_str = Self::substitute_env_vars(&config_str);

        let config: Config = serde_yaml::from_str(&config_str)
            .map_err(|e| AquaOpsError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Search for config.yaml in standard locations.
    /// Returns the path of the first found config, or the XDG default path if none found.
    fn find_config_path() -> Result<PathBuf> {
        // Try current directory first
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Ok(local_config);
        }

        // Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("aquaops").join("config.yaml");
            if xdg_config.exists() {
                return Ok(xdg_config);
            }
        }

        // Return XDG path as the default (will trigger "not found" in load)
        let default_path = dirs::config_dir()
            .ok_or_else(|| AquaOpsError::Config("Cannot determine config directory".into()))?
            .join("aquaops")
            .join("config.yaml");
        Ok(default_path)
    }

    /// Returns true if a config file can be found in any standard location.
    pub fn exists(config_override: Option<&PathBuf>) -> bool {
        match config_override {
            Some(p) => p.exists(),
            None => Self::find_config_path()
                .map(|p| p.exists())
                .unwrap_or(false),
        }
    }

    /// Default path for writing new config files (~/.config/aquaops/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AquaOpsError::Config("Cannot determine config directory".into()))?
            .join("aquaops");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the loaded Config and the path it was written to.
    pub fn setup_interactive() -> Result<(Self, PathBuf)> {
        println!();
        println!("No configuration found. Let's set up AquaOps!");
        println!();

        println!("Network");
        let network_name: String = Input::new()
            .with_prompt("  Network name")
            .default("Urban Water Network".into())
            .interact_text()
            .map_err(|e| AquaOpsError::Config(format!("Input error: {}", e)))?;

        let region: String = Input::new()
            .with_prompt("  Region (blank to skip)")
            .default(String::new())
            .allow_empty(true)
            .interact_text()
            .map_err(|e| AquaOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        println!("Engine");
        let history_window_hours: u32 = Input::new()
            .with_prompt("  Default history window (hours)")
            .default(24)
            .interact_text()
            .map_err(|e| AquaOpsError::Config(format!("Input error: {}", e)))?;

        let monitor_interval_secs: u64 = Input::new()
            .with_prompt("  Monitor interval (seconds)")
            .default(300)
            .interact_text()
            .map_err(|e| AquaOpsError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            network: NetworkConfig {
                name: network_name,
                region: if region.is_empty() { None } else { Some(region) },
            },
            engine: EngineConfig {
                history_window_hours,
                monitor_interval_secs,
            },
        };

        // Write to default config path
        let config_path = Self::default_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(&config)
            .map_err(|e| AquaOpsError::Config(format!("Failed to serialize config: {}", e)))?;

        // Write with a header comment
        let content = format!(
            "# AquaOps Configuration\n# Generated by `aquaops init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(&config_path, content)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        // Find all ${VAR_NAME} patterns and substitute
        let re = regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }

    pub fn data_dir(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        // CLI override takes priority
        if let Some(dir) = data_dir_override {
            std::fs::create_dir_all(dir)?;
            return Ok(dir.clone());
        }

        // Then check env var
        if let Ok(dir) = std::env::var("AQUAOPS_DATA_DIR") {
            let p = PathBuf::from(dir);
            std::fs::create_dir_all(&p)?;
            return Ok(p);
        }

        // Use XDG data directory
        let data_dir = dirs::data_dir()
            .ok_or_else(|| AquaOpsError::Config("Cannot determine data directory".into()))?
            .join("aquaops");

        std::fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn db_path(data_dir_override: Option<&PathBuf>) -> Result<PathBuf> {
        Ok(Self::data_dir(data_dir_override)?.join("aquaops.db"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig {
                name: "Urban Water Network".into(),
                region: None,
            },
            engine: EngineConfig::default(),
        }
    }
}
