pub mod file;

use crate::domain::model::Dataset;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_url, Validate,
};
use clap::{Parser, ValueEnum};
use file::FileConfig;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CATALOG_URL: &str = "https://datacatalog.cookcountyil.gov";
pub const DEFAULT_ORDER_FIELD: &str = "year";
pub const DEFAULT_RECORD_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Command line and environment options. Every field is optional so that a
/// config file can fill what the command line leaves out.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "assessment-proxy")]
#[command(about = "HTTP proxy for property assessment and commercial valuation records")]
pub struct CliArgs {
    #[arg(long, env = "PORT", help = "Port to listen on [default: 3001]")]
    pub port: Option<u16>,

    #[arg(long, env = "BIND_HOST", help = "Interface to bind [default: 0.0.0.0]")]
    pub host: Option<String>,

    #[arg(long, env = "CATALOG_URL", help = "Base URL of the open-data catalog")]
    pub catalog_url: Option<String>,

    #[arg(long, env = "REQUEST_TIMEOUT_SECS", help = "Outbound request timeout in seconds")]
    pub request_timeout_secs: Option<u64>,

    #[arg(long, env = "PROXY_CONFIG", help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Where one dataset lives in the catalog and which query parameter matches a pin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSettings {
    pub resource: String,
    pub match_param: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    pub base_url: String,
    pub order_field: String,
    pub record_limit: usize,
    pub timeout: Option<Duration>,
    pub assessment: DatasetSettings,
    pub commercial: DatasetSettings,
}

impl CatalogSettings {
    pub fn dataset(&self, dataset: Dataset) -> &DatasetSettings {
        match dataset {
            Dataset::Assessment => &self.assessment,
            Dataset::Commercial => &self.commercial,
        }
    }

    pub fn resource_url(&self, dataset: Dataset) -> String {
        format!(
            "{}/resource/{}.json",
            self.base_url.trim_end_matches('/'),
            self.dataset(dataset).resource
        )
    }

    /// Socrata ordering clause, newest first.
    pub fn order_clause(&self) -> String {
        format!("{} DESC", self.order_field)
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            order_field: DEFAULT_ORDER_FIELD.to_string(),
            record_limit: DEFAULT_RECORD_LIMIT,
            timeout: None,
            // the catalog names the match parameter differently per dataset
            assessment: DatasetSettings {
                resource: "uzyt-m557".to_string(),
                match_param: "pin".to_string(),
            },
            commercial: DatasetSettings {
                resource: "csik-bsws".to_string(),
                match_param: "pins".to_string(),
            },
        }
    }
}

/// Process-wide configuration, resolved once at startup and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
            },
            catalog: CatalogSettings::default(),
        }
    }
}

impl Settings {
    /// Loads the optional config file named by `args` and merges everything.
    pub fn load(args: &CliArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        let settings = Self::resolve(args, file);
        settings.validate()?;
        Ok(settings)
    }

    /// Command line and environment win over the file, the file wins over defaults.
    pub fn resolve(args: &CliArgs, file: FileConfig) -> Self {
        let mut settings = Settings::default();
        file.apply(&mut settings);

        if let Some(host) = &args.host {
            settings.server.host = host.clone();
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(url) = &args.catalog_url {
            settings.catalog.base_url = url.clone();
        }
        if let Some(secs) = args.request_timeout_secs {
            settings.catalog.timeout = Some(Duration::from_secs(secs));
        }

        settings
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_url("catalog.base_url", &self.catalog.base_url)?;
        validate_non_empty_string("catalog.order_field", &self.catalog.order_field)?;
        validate_positive_number("catalog.record_limit", self.catalog.record_limit, 1)?;

        for dataset in [Dataset::Assessment, Dataset::Commercial] {
            let target = self.catalog.dataset(dataset);
            validate_non_empty_string(&format!("catalog.{}.resource", dataset), &target.resource)?;
            validate_non_empty_string(
                &format!("catalog.{}.match_param", dataset),
                &target.match_param,
            )?;
        }

        Ok(())
    }
}
