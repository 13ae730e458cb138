//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, export_modes, filters, output_formats, service, timeouts};
use crate::core::error::{Result, TeleCheckError};
use crate::core::types::{ExportMode, ResultFilter};

/// Name of the config file searched for in the working directory and its parents
pub const CONFIG_FILE_NAME: &str = ".telecheck.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root URL of the verification service
    pub base_url: Option<String>,

    /// Timeout in seconds for HTTP requests
    pub timeout: Option<u64>,

    /// Retry attempts for failed requests
    pub retry_attempts: Option<u8>,

    /// Delay between retries in milliseconds
    pub retry_delay: Option<u64>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    pub skip_ssl_verification: Option<bool>,

    /// Parallel single-link checks
    pub concurrency: Option<usize>,

    /// Drop repeated links before checking
    pub dedup: Option<bool>,

    /// Result filter (all, valid, invalid)
    pub filter: Option<String>,

    /// Export list format (numbered, gapped, plain, original)
    pub export_mode: Option<String>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Exit with 1 when any verdict is invalid
    pub fail_on_invalid: Option<bool>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Some(service::DEFAULT_BASE_URL.to_string()),
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            retry_attempts: Some(defaults::RETRY_ATTEMPTS),
            retry_delay: Some(timeouts::DEFAULT_RETRY_DELAY_MS),
            user_agent: None,
            proxy: None,
            skip_ssl_verification: Some(false),
            concurrency: None, // Will default to CPU core count
            dedup: Some(true),
            filter: Some(filters::DEFAULT.to_string()),
            export_mode: None,
            output_format: Some(output_formats::DEFAULT.to_string()),
            fail_on_invalid: Some(false),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for absent keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TeleCheckError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            TeleCheckError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config.with_defaults())
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(CONFIG_FILE_NAME) {
            return config;
        }

        // Parent directories, up to 3 levels
        for i in 1..=3 {
            let path = format!("{}{CONFIG_FILE_NAME}", "../".repeat(i));
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Fill keys a config file left out with the built-in defaults
    fn with_defaults(self) -> Self {
        let fallback = Self::default();
        Self {
            base_url: self.base_url.or(fallback.base_url),
            timeout: self.timeout.or(fallback.timeout),
            retry_attempts: self.retry_attempts.or(fallback.retry_attempts),
            retry_delay: self.retry_delay.or(fallback.retry_delay),
            user_agent: self.user_agent,
            proxy: self.proxy,
            skip_ssl_verification: self
                .skip_ssl_verification
                .or(fallback.skip_ssl_verification),
            concurrency: self.concurrency,
            dedup: self.dedup.or(fallback.dedup),
            filter: self.filter.or(fallback.filter),
            export_mode: self.export_mode,
            output_format: self.output_format.or(fallback.output_format),
            fail_on_invalid: self.fail_on_invalid.or(fallback.fail_on_invalid),
            verbose: self.verbose.or(fallback.verbose),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Service & network
        if let Some(ref base_url) = cli_config.base_url {
            self.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }
        if let Some(retry_attempts) = cli_config.retry_attempts {
            self.retry_attempts = Some(retry_attempts);
        }
        if let Some(retry_delay) = cli_config.retry_delay {
            self.retry_delay = Some(retry_delay);
        }
        if let Some(ref user_agent) = cli_config.user_agent {
            self.user_agent = Some(user_agent.clone());
        }
        if let Some(ref proxy) = cli_config.proxy {
            self.proxy = Some(proxy.clone());
        }
        if cli_config.skip_ssl_verification {
            self.skip_ssl_verification = Some(true);
        }
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }

        // Checking & results
        if cli_config.no_dedup {
            self.dedup = Some(false);
        }
        if let Some(ref filter) = cli_config.filter {
            self.filter = Some(filter.clone());
        }
        if let Some(ref export_mode) = cli_config.export_mode {
            self.export_mode = Some(export_mode.clone());
        }
        if cli_config.fail_on_invalid {
            self.fail_on_invalid = Some(true);
        }

        // Output
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .unwrap_or(service::DEFAULT_BASE_URL)
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Get retry delay as Duration
    pub fn retry_delay_duration(&self) -> Duration {
        Duration::from_millis(
            self.retry_delay
                .unwrap_or(timeouts::DEFAULT_RETRY_DELAY_MS),
        )
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency.unwrap_or_else(num_cpus::get).max(1)
    }

    pub fn dedup_enabled(&self) -> bool {
        self.dedup.unwrap_or(true)
    }

    /// The configured output format, matched case-insensitively.
    pub fn output_format(&self) -> &'static str {
        self.output_format
            .as_deref()
            .and_then(known_output_format)
            .unwrap_or(output_formats::DEFAULT)
    }

    /// The configured filter; `validate` has already rejected unknown names.
    pub fn result_filter(&self) -> Result<ResultFilter> {
        self.filter
            .as_deref()
            .map(str::parse)
            .transpose()
            .map(Option::unwrap_or_default)
    }

    pub fn export_mode(&self) -> Result<Option<ExportMode>> {
        self.export_mode.as_deref().map(str::parse).transpose()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if let Some(ref base_url) = self.base_url
            && !(base_url.starts_with("http://") || base_url.starts_with("https://"))
        {
            return Err(TeleCheckError::Config(format!(
                "Base URL '{base_url}' must start with http:// or https://."
            )));
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(TeleCheckError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(TeleCheckError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>24 hours). Consider using a smaller value."
                )));
            }
        }

        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(TeleCheckError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > defaults::MAX_CONCURRENCY {
                return Err(TeleCheckError::Config(format!(
                    "Concurrency of {concurrency} is too high for a shared service. Expected at most {}.",
                    defaults::MAX_CONCURRENCY
                )));
            }
        }

        if let Some(retry) = self.retry_attempts
            && retry > defaults::MAX_RETRY_ATTEMPTS
        {
            return Err(TeleCheckError::Config(format!(
                "Retry attempts of {retry} is very high and may cause long delays. Consider using a smaller value."
            )));
        }

        if let Some(ref format) = self.output_format
            && known_output_format(format).is_none()
        {
            return Err(TeleCheckError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        if let Some(ref filter) = self.filter
            && filter.parse::<ResultFilter>().is_err()
        {
            return Err(TeleCheckError::Config(format!(
                "Invalid filter '{filter}'. Expected one of: {}.",
                filters::ALL.join(", ")
            )));
        }

        if let Some(ref mode) = self.export_mode
            && mode.parse::<ExportMode>().is_err()
        {
            return Err(TeleCheckError::Config(format!(
                "Invalid export mode '{mode}'. Expected one of: {}.",
                export_modes::ALL.join(", ")
            )));
        }

        Ok(())
    }
}

fn known_output_format(name: &str) -> Option<&'static str> {
    let name = name.trim();
    output_formats::ALL
        .into_iter()
        .find(|known| known.eq_ignore_ascii_case(name))
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Service & network
    pub base_url: Option<String>,    // --base-url
    pub timeout: Option<u64>,        // --timeout
    pub retry_attempts: Option<u8>,  // --retry
    pub retry_delay: Option<u64>,    // --retry-delay
    pub user_agent: Option<String>,  // --user-agent
    pub proxy: Option<String>,       // --proxy
    pub skip_ssl_verification: bool, // --insecure
    pub concurrency: Option<usize>,  // --concurrency

    // Checking & results
    pub no_dedup: bool,              // --no-dedup
    pub filter: Option<String>,      // --filter
    pub export_mode: Option<String>, // --export
    pub fail_on_invalid: bool,       // --fail-on-invalid

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
