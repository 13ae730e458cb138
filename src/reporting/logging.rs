use crate::config::Config;
use crate::core::types::{CheckMode, LinkResult, LinkStatus};
use log::{debug, error, info, warn};
use std::io::Write;

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    let initialized = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .try_init();

    if initialized.is_ok() {
        debug!("Logger initialized with level: {level:?}");
    }
}

/// Log configuration information
pub fn log_config_info(config: &Config, concurrency: usize) {
    let timeout = config.timeout_duration().as_secs();
    let retry_attempts = config.retry_attempts.unwrap_or(0);
    let retry_delay = config.retry_delay_duration().as_millis();
    let skip_ssl_verification = config.skip_ssl_verification.unwrap_or(false);

    info!("Service: base_url={}", config.base_url());
    info!("Configuration: concurrency={concurrency}, timeout={timeout}s, dedup={}", config.dedup_enabled());
    info!("Retry: attempts={retry_attempts}, delay={retry_delay}ms");
    info!(
        "HTTP: proxy={}, skip_ssl={skip_ssl_verification}",
        config.proxy.as_deref().unwrap_or("none")
    );
}

/// Log what was read before extraction
pub fn log_input_info(source_count: usize, bytes: usize) {
    if source_count == 0 {
        info!("Read {bytes} bytes from stdin");
    } else {
        info!("Read {bytes} bytes from {source_count} source(s)");
    }
}

/// Log link discovery information
pub fn log_link_discovery(unique_links: usize, total_found: usize) {
    info!("Found {unique_links} unique links (from {total_found} total)");
}

/// Log the start of a remote check
pub fn log_check_start(link_count: usize, mode: CheckMode) {
    match mode {
        CheckMode::Bulk => info!("Submitting {link_count} links for bulk check"),
        CheckMode::Single => info!("Checking {link_count} link(s) individually"),
    }
}

/// Log check completion
pub fn log_check_complete(total: usize, valid: usize, invalid: usize, duration_ms: u128) {
    if invalid == 0 {
        info!("✅ Check complete: {valid}/{total} links valid ({duration_ms}ms)");
    } else {
        warn!(
            "❌ Check complete: {valid}/{total} links valid, {invalid} invalid ({duration_ms}ms)"
        );
    }
}

/// Log an individual verdict for debugging
pub fn log_link_result(result: &LinkResult) {
    let reason = result.reason.as_deref().unwrap_or("-");
    match result.status {
        LinkStatus::Valid => debug!("✓ {} -> valid ({reason})", result.link),
        LinkStatus::Invalid => debug!("✗ {} -> invalid ({reason})", result.link),
        ref other => debug!("? {} -> {other} ({reason})", result.link),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_logger_initialization_is_repeatable() {
        // Only the first call installs a logger; later calls must not panic
        init_logger(true, false);
        init_logger(false, true);
        init_logger(false, false);
    }

    #[test]
    fn test_log_config_info() {
        log_config_info(&Config::default(), 4);

        let config = Config {
            timeout: Some(5),
            retry_attempts: Some(3),
            proxy: Some("http://proxy.local:8080".to_string()),
            skip_ssl_verification: Some(true),
            ..Default::default()
        };
        log_config_info(&config, 1);
    }

    #[test]
    fn test_log_input_and_discovery() {
        log_input_info(0, 0);
        log_input_info(2, 1024);
        log_link_discovery(0, 0);
        log_link_discovery(5, 10);
    }

    #[test]
    fn test_log_check_lifecycle() {
        log_check_start(3, CheckMode::Bulk);
        log_check_start(1, CheckMode::Single);
        log_check_complete(3, 3, 0, 120);
        log_check_complete(3, 1, 2, 0);
    }

    #[test]
    fn test_log_link_result_every_status() {
        log_link_result(&LinkResult::new("https://t.me/a", LinkStatus::Valid, None));
        log_link_result(&LinkResult::new(
            "https://t.me/b",
            LinkStatus::Invalid,
            Some("Channel not found".to_string()),
        ));
        log_link_result(&LinkResult::unknown("https://t.me/c", "timeout"));
        log_link_result(&LinkResult::new(
            "https://mega.nz/x",
            LinkStatus::Other("mega".to_string()),
            None,
        ));
    }

    #[test]
    fn test_log_error_and_warning() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        log_error("Failed to read file", Some(&io_error));
        log_error("Something went wrong", None);
        log_warning("Warning with emojis: ⚠️ 🔥");
        log_warning("");
    }
}
