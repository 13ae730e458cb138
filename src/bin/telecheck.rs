use clap::{CommandFactory, Parser};
use telecheck::config::{CliConfig, Config};
use telecheck::core::constants::{display, output_formats};
use telecheck::discovery::{extract_urls, read_input};
use telecheck::reporting::logging;
use telecheck::ui::completion::print_completions;
use telecheck::ui::output;
use telecheck::ui::{Cli, Commands, ProgressReporter, cli_to_config};
use telecheck::validation::{CheckReport, CheckSession, RemoteVerifier, VerifyLinks};
use telecheck::{ExportMode, ResultFilter, ResultSet};

use std::error::Error;
use std::fs;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_telecheck_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        _ => None,
    }
}

/// Main check logic extracted from main() for testing
pub async fn run_telecheck_logic(cli: &Cli) -> Result<i32, Box<dyn Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_config_info(&config, config.concurrency());

    let verifier = RemoteVerifier::from_config(&config)?;

    if let Some(Commands::Stats { watch, count }) = cli.command {
        return run_stats(&verifier, &output_settings, watch, count).await;
    }

    let filter = config.result_filter()?;
    let export_mode = config.export_mode()?;

    let mut session = CheckSession::new(verifier)
        .with_dedup(config.dedup_enabled())
        .with_concurrency(config.concurrency());
    let mut progress = create_progress_reporter(&output_settings);

    let report = if cli.link.is_empty() {
        let text = read_input(&cli.files)?;
        logging::log_input_info(cli.files.len(), text.len());
        progress.start_check(extract_urls(&text).len());
        session.check_text(&text).await
    } else {
        progress.start_check(cli.link.len());
        session.check_links(&cli.link).await
    };
    progress.finish_check(report.results.valid_count(), report.results.len());

    if report.links_found == 0 {
        logging::log_warning("No links found in input");
        if !output_settings.quiet {
            eprintln!("No links found in input.");
        }
        // json and minimal still print their (empty) document for scripts
        if output_settings.output_format != output_formats::TEXT {
            output::display_results(report, filter, &output_settings.output_format)?;
        }
        return Ok(0);
    }

    let listing_replaced = match export_mode {
        Some(mode) => deliver_export(report, mode, filter, cli.output.as_deref(), &output_settings)?,
        None => false,
    };

    if !listing_replaced && output_settings.should_show_results() {
        output::display_results(report, filter, &output_settings.output_format)?;
    }

    Ok(determine_exit_code(&report.results, &config))
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    /// Quiet only silences the human-readable listing
    pub fn should_show_results(&self) -> bool {
        !self.quiet || self.output_format != output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    let verbose = config.verbose.unwrap_or(false);
    let output_format = config.output_format().to_string();
    let show_progress = !quiet && !cli_config.no_progress;

    OutputSettings {
        quiet,
        verbose,
        output_format,
        show_progress,
    }
}

/// Spinner only for interactive text output
pub fn create_progress_reporter(output_settings: &OutputSettings) -> ProgressReporter {
    use std::io::IsTerminal;

    let enabled = output_settings.show_progress
        && output_settings.output_format == output_formats::TEXT
        && std::io::stderr().is_terminal();
    ProgressReporter::new(enabled)
}

/// Render the export block and send it where it belongs.
///
/// Returns true when the block was printed in place of the result listing.
pub fn deliver_export(
    report: &CheckReport,
    mode: ExportMode,
    filter: ResultFilter,
    output_path: Option<&str>,
    output_settings: &OutputSettings,
) -> Result<bool, Box<dyn Error>> {
    let block = report.export(mode, filter);

    if block.is_empty() {
        logging::log_warning(display::NOTHING_TO_EXPORT);
        eprintln!("{}", display::NOTHING_TO_EXPORT);
        return Ok(false);
    }

    match output_path {
        Some(path) => {
            write_export(&block, path)?;
            if !output_settings.quiet {
                eprintln!("Exported {} list to {path}", mode.as_str());
            }
            Ok(false)
        }
        None => {
            println!("{block}");
            Ok(true)
        }
    }
}

/// Write an export block to `path`, replacing any existing file
pub fn write_export(block: &str, path: &str) -> Result<(), Box<dyn Error>> {
    fs::write(path, block).inspect_err(|e| {
        logging::log_error(&format!("Could not write export to '{path}'"), Some(e));
    })?;
    Ok(())
}

/// Print the service counters once, or every `watch` seconds
pub async fn run_stats<V: VerifyLinks + Sync>(
    verifier: &V,
    output_settings: &OutputSettings,
    watch: Option<u64>,
    count: Option<u64>,
) -> Result<i32, Box<dyn Error>> {
    let mut progress = create_progress_reporter(output_settings);
    let mut shown: u64 = 0;

    loop {
        progress.start_stats();
        let stats = verifier.fetch_stats().await;
        progress.finish_and_clear();
        output::display_stats(&stats, &output_settings.output_format)?;
        shown += 1;

        let Some(seconds) = watch else {
            break;
        };
        if count.is_some_and(|limit| shown >= limit) {
            break;
        }
        tokio::time::sleep(Duration::from_secs(seconds.max(1))).await;
    }

    Ok(0)
}

/// Exit with 1 only when asked to fail on invalid links and some are
pub fn determine_exit_code(results: &ResultSet, config: &Config) -> i32 {
    if config.fail_on_invalid.unwrap_or(false) && results.invalid_count() > 0 {
        1
    } else {
        0
    }
}
