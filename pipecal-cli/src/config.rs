//! Global configuration at ~/.config/pipecal/config.toml

use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;

static DEFAULT_API_BASE: &str = "http://localhost:8000/api";

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

#[derive(Deserialize, Clone)]
pub struct PipecalConfig {
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Job to show when `--job` is not given.
    pub default_job: Option<String>,
}

impl Default for PipecalConfig {
    fn default() -> Self {
        PipecalConfig {
            api_base: default_api_base(),
            default_job: None,
        }
    }
}

impl PipecalConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("pipecal");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, falling back to defaults if it is absent.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(PipecalConfig::default());
        }
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config at {}: {e}", path.display()))
    }

    /// The job to operate on: explicit flag wins over the config file.
    pub fn resolve_job(&self, flag: Option<String>) -> Result<String> {
        flag.or_else(|| self.default_job.clone()).ok_or_else(|| {
            anyhow::anyhow!(
                "No job specified.\n\n\
                Pass one with --job, or set a default in {}:\n  \
                default_job = \"<job-id>\"",
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|_| "~/.config/pipecal/config.toml".to_string())
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_full_config() {
        let config: PipecalConfig = toml::from_str(
            "api_base = \"https://ats.example.com/api\"\ndefault_job = \"job-42\"",
        )
        .unwrap();
        assert_eq!(config.api_base, "https://ats.example.com/api");
        assert_eq!(config.default_job.as_deref(), Some("job-42"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: PipecalConfig = toml::from_str("").unwrap();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert!(config.default_job.is_none());
    }

    #[test]
    fn flag_beats_configured_default_job() {
        let config = PipecalConfig {
            api_base: default_api_base(),
            default_job: Some("job-1".to_string()),
        };
        assert_eq!(
            config.resolve_job(Some("job-2".to_string())).unwrap(),
            "job-2"
        );
        assert_eq!(config.resolve_job(None).unwrap(), "job-1");
    }
}
