//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::state::Page;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Empholite - mock any RESTful service
#[derive(Parser, Debug, Clone)]
#[command(name = "empholite")]
#[command(about = "Terminal client for the Empholite service-mocking backend")]
pub struct Args {
    /// Backend origin that serves the /ajax endpoints
    #[arg(long, env = "EMPHOLITE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Page to open
    #[arg(long, env = "EMPHOLITE_PAGE", value_enum, default_value_t = PageArg::Home)]
    pub page: PageArg,

    /// Login form field; repeat for several fields
    #[arg(
        long = "login-field",
        env = "EMPHOLITE_LOGIN_FIELDS",
        value_delimiter = ',',
        default_values_t = [String::from("username"), String::from("password")]
    )]
    pub login_fields: Vec<String>,

    /// Request timeout in seconds
    #[arg(long, env = "EMPHOLITE_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Write logs to this file
    #[arg(long, env = "EMPHOLITE_LOG")]
    pub log_file: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageArg {
    Home,
    Login,
}

impl From<PageArg> for Page {
    fn from(page: PageArg) -> Self {
        match page {
            PageArg::Home => Page::Home,
            PageArg::Login => Page::Login,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid base URL '{0}': expected http:// or https://")]
    InvalidBaseUrl(String),

    #[error("At least one login field is required")]
    NoLoginFields,

    #[error("Timeout must be at least one second")]
    ZeroTimeout,
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub base_url: String,
    pub page: Page,
    pub login_fields: Vec<String>,
    pub timeout: Duration,
    pub log_file: Option<PathBuf>,
}

impl TryFrom<Args> for Config {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let base_url = args.base_url.trim().to_string();
        let scheme_ok = base_url
            .strip_prefix("http://")
            .or_else(|| base_url.strip_prefix("https://"))
            .is_some_and(|rest| !rest.is_empty());
        if !scheme_ok {
            return Err(ConfigError::InvalidBaseUrl(args.base_url));
        }

        let login_fields: Vec<String> = args
            .login_fields
            .into_iter()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect();
        if login_fields.is_empty() {
            return Err(ConfigError::NoLoginFields);
        }

        if args.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            base_url,
            page: args.page.into(),
            login_fields,
            timeout: Duration::from_secs(args.timeout_secs),
            log_file: args.log_file,
        })
    }
}
