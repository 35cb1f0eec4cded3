//! openoa-core — shared configuration and API shapes for OpenOA status tooling.

pub mod config;
pub mod types;

pub use config::{BaseUrl, ConfigError, ResolvedConfig, StatusConfig, UrlSource, parse_duration};
pub use types::*;
