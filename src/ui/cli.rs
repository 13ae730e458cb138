// Command-line interface definitions and parsing for telecheck

use crate::config::CliConfig;
use crate::core::constants::{export_modes, filters, output_formats};
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Text files to read links from ('-' or none for stdin)
    pub files: Vec<String>,

    // Checking
    /// Check a single link instead of extracting from text (repeatable)
    #[arg(long, value_name = "URL", help_heading = "Checking")]
    pub link: Vec<String>,

    /// Keep repeated links instead of checking each once
    #[arg(long, help_heading = "Checking")]
    pub no_dedup: bool,

    /// Exit with status 1 when any link is invalid
    #[arg(long, help_heading = "Checking")]
    pub fail_on_invalid: bool,

    // Results & Export
    /// Which results to show and export (default: all)
    #[arg(long, value_name = "FILTER", value_parser = filters::ALL, ignore_case = true, help_heading = "Results & Export")]
    pub filter: Option<String>,

    /// Export the filtered results as a text list
    #[arg(long, value_name = "MODE", value_parser = export_modes::ALL, ignore_case = true, help_heading = "Results & Export")]
    pub export: Option<String>,

    /// Write the export to a file instead of stdout
    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        requires = "export",
        help_heading = "Results & Export"
    )]
    pub output: Option<String>,

    // Output & Verbosity
    /// Suppress the spinner and the text listing
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, ignore_case = true, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable the progress spinner
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Service & Network
    /// Verification service root URL
    #[arg(long, value_name = "URL", help_heading = "Service & Network")]
    pub base_url: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(
        short = 't',
        long,
        value_name = "SECONDS",
        help_heading = "Service & Network"
    )]
    pub timeout: Option<u64>,

    /// Retry attempts for failed requests (default: 0)
    #[arg(long, value_name = "COUNT", help_heading = "Service & Network")]
    pub retry: Option<u8>,

    /// Delay between retries in ms (default: 1000)
    #[arg(long, value_name = "MS", help_heading = "Service & Network")]
    pub retry_delay: Option<u64>,

    /// Concurrent single-link checks (default: CPU cores)
    #[arg(long, value_name = "COUNT", help_heading = "Service & Network")]
    pub concurrency: Option<usize>,

    /// Custom User-Agent header
    #[arg(long, value_name = "AGENT", help_heading = "Service & Network")]
    pub user_agent: Option<String>,

    /// HTTP/HTTPS proxy URL
    #[arg(long, value_name = "URL", help_heading = "Service & Network")]
    pub proxy: Option<String>,

    /// Skip SSL certificate verification
    #[arg(long, help_heading = "Service & Network")]
    pub insecure: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Show the service's aggregate link counters
    Stats {
        /// Refresh every SECONDS instead of printing once
        #[arg(long, value_name = "SECONDS")]
        watch: Option<u64>,

        /// Stop after COUNT refreshes (with --watch)
        #[arg(long, value_name = "COUNT", requires = "watch")]
        count: Option<u64>,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert derive-based CLI arguments directly to CliConfig structure.
///
/// Range checks happen later in `Config::validate`, after config files are
/// merged in.
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        // Service & network
        base_url: cli.base_url.clone(),
        timeout: cli.timeout,
        retry_attempts: cli.retry,
        retry_delay: cli.retry_delay,
        user_agent: cli.user_agent.clone(),
        proxy: cli.proxy.clone(),
        skip_ssl_verification: cli.insecure,
        concurrency: cli.concurrency,

        // Checking & results
        no_dedup: cli.no_dedup,
        filter: cli.filter.clone(),
        export_mode: cli.export.clone(),
        fail_on_invalid: cli.fail_on_invalid,

        // Output & format
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,

        // Configuration
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}
