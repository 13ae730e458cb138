use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown while the verification service is working.
///
/// A disabled reporter does nothing, so callers never branch on it.
pub struct ProgressReporter {
    spinner: Option<ProgressBar>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            spinner: None,
            enabled,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_check(&mut self, link_count: usize) {
        let noun = if link_count == 1 { "link" } else { "links" };
        self.start(format!("Checking {link_count} {noun}"));
    }

    pub fn start_stats(&mut self) {
        self.start("Fetching service stats".to_string());
    }

    fn start(&mut self, message: String) {
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message);
        spinner.enable_steady_tick(Duration::from_millis(120));
        self.spinner = Some(spinner);
    }

    pub fn finish_check(&mut self, valid: usize, total: usize) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("✓ Check complete ({valid}/{total} valid)"));
        }
    }

    /// Remove the spinner line without leaving a message behind
    pub fn finish_and_clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}
