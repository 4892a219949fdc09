pub mod adapters;
pub mod api;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::catalog::CatalogClient;
pub use api::{api_router, AppState};
pub use config::{CliArgs, Settings};
pub use core::fetcher::AggregatingFetcher;
pub use utils::error::{ProxyError, Result};
