use crate::config::{DatasetSettings, Settings};
use crate::utils::error::{ProxyError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub catalog: CatalogSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub base_url: Option<String>,
    pub order_field: Option<String>,
    pub record_limit: Option<usize>,
    pub timeout_seconds: Option<u64>,
    pub assessment: Option<DatasetSection>,
    pub commercial: Option<DatasetSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetSection {
    pub resource: Option<String>,
    pub match_param: Option<String>,
}

impl DatasetSection {
    fn apply(&self, target: &mut DatasetSettings) {
        if let Some(resource) = &self.resource {
            target.resource = resource.clone();
        }
        if let Some(param) = &self.match_param {
            target.match_param = param.clone();
        }
    }
}

impl FileConfig {
    /// Reads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProxyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML text after placeholder substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProxyError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProxyError::ConfigError {
            message: format!("invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays whatever the file sets onto `settings`.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(host) = &self.server.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = self.server.port {
            settings.server.port = port;
        }

        let catalog = &mut settings.catalog;
        if let Some(url) = &self.catalog.base_url {
            catalog.base_url = url.clone();
        }
        if let Some(field) = &self.catalog.order_field {
            catalog.order_field = field.clone();
        }
        if let Some(limit) = self.catalog.record_limit {
            catalog.record_limit = limit;
        }
        if let Some(secs) = self.catalog.timeout_seconds {
            catalog.timeout = Some(Duration::from_secs(secs));
        }
        if let Some(section) = &self.catalog.assessment {
            section.apply(&mut catalog.assessment);
        }
        if let Some(section) = &self.catalog.commercial {
            section.apply(&mut catalog.commercial);
        }
    }
}
