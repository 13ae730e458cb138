/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal strings and numbers shared between the
/// extractor, the service client, the exporters and the CLI.
/// Output format constants
pub mod output_formats {
    /// Text output format - colorful, emoji-enhanced output with summary chips
    pub const TEXT: &str = "text";
    /// JSON output format - structured output for automation
    pub const JSON: &str = "json";
    /// Minimal output format - `status link` lines without colors or emojis
    pub const MINIMAL: &str = "minimal";

    /// Default output format
    pub const DEFAULT: &str = TEXT;

    /// All valid output formats
    pub const ALL: [&str; 3] = [TEXT, JSON, MINIMAL];
}

/// Export mode names accepted on the command line and in config files
pub mod export_modes {
    pub const NUMBERED: &str = "numbered";
    pub const GAPPED: &str = "gapped";
    pub const PLAIN: &str = "plain";
    pub const ORIGINAL: &str = "original";

    pub const ALL: [&str; 4] = [NUMBERED, GAPPED, PLAIN, ORIGINAL];
}

/// Result filter names
pub mod filters {
    pub const ALL_LINKS: &str = "all";
    pub const VALID: &str = "valid";
    pub const INVALID: &str = "invalid";

    pub const DEFAULT: &str = ALL_LINKS;

    pub const ALL: [&str; 3] = [ALL_LINKS, VALID, INVALID];
}

/// Remote verification service defaults
pub mod service {
    /// Root of the hosted verification service
    pub const DEFAULT_BASE_URL: &str = "https://telecheck.vercel.app";
    /// Path of the aggregate counters endpoint
    pub const STATS_PATH: &str = "/stats";
    /// Query parameter carrying the link on single checks
    pub const LINK_QUERY_PARAM: &str = "link";
    /// Status tag the service uses for mega.nz folders
    pub const MEGA_STATUS: &str = "mega";
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
    /// Largest timeout accepted by config validation (24 hours)
    pub const MAX_TIMEOUT_SECONDS: u64 = 86_400;
    /// Default retry delay in milliseconds
    pub const DEFAULT_RETRY_DELAY_MS: u64 = 1000;
}

/// Default configuration values
pub mod defaults {
    /// Default number of retry attempts
    pub const RETRY_ATTEMPTS: u8 = 0;
    /// Highest retry count accepted by config validation
    pub const MAX_RETRY_ATTEMPTS: u8 = 20;
    /// Highest concurrency accepted by config validation
    pub const MAX_CONCURRENCY: usize = 100;
}

/// Placeholder values used when the service leaves fields out
pub mod reasons {
    /// Bulk verdict without `reason`/`message`
    pub const NO_REASON: &str = "No reason provided";
    /// Single verdict without `reason`/`message`
    pub const NO_DETAILS: &str = "No details provided";
    /// Response shape matched none of the known forms
    pub const INVALID_API_RESPONSE: &str = "Invalid API response";
    /// Prefix for transport failures (network error, non-2xx)
    pub const NETWORK_ERROR: &str = "Network or API Error";
    /// Verdict record without `link`/`url`
    pub const UNKNOWN_LINK: &str = "Unknown Link";
    /// Submitted link the bulk response left out
    pub const MISSING_VERDICT: &str = "No verdict returned";
}

/// Export rendering constants
pub mod export {
    /// Separator line under the numbered export title
    pub const NUMBERED_SEPARATOR: &str = "-----------------";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for valid verdicts
    pub const VALID_EMOJI: &str = "✅";
    /// Emoji for invalid verdicts
    pub const INVALID_EMOJI: &str = "❌";
    /// Emoji for unknown verdicts
    pub const UNKNOWN_EMOJI: &str = "❓";
    /// Emoji for service-defined tags such as `mega`
    pub const TAGGED_EMOJI: &str = "🔷";
    /// Emoji for the stats header
    pub const STATS_EMOJI: &str = "📊";
    /// Shown when a filter leaves nothing to list
    pub const EMPTY_FILTER_MESSAGE: &str = "No links found for this filter.";
    /// Shown when an export renders to the empty string
    pub const NOTHING_TO_EXPORT: &str = "Nothing to export";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_formats_constants() {
        assert_eq!(output_formats::TEXT, "text");
        assert_eq!(output_formats::JSON, "json");
        assert_eq!(output_formats::MINIMAL, "minimal");
        assert_eq!(output_formats::DEFAULT, "text");
        assert_eq!(output_formats::ALL.len(), 3);
    }

    #[test]
    fn test_numbered_separator_is_seventeen_dashes() {
        assert_eq!(export::NUMBERED_SEPARATOR.len(), 17);
        assert!(export::NUMBERED_SEPARATOR.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_filter_and_mode_names() {
        assert!(filters::ALL.contains(&filters::DEFAULT));
        assert_eq!(export_modes::ALL.len(), 4);
    }

    #[test]
    fn test_service_defaults() {
        assert!(service::DEFAULT_BASE_URL.starts_with("https://"));
        assert_eq!(service::STATS_PATH, "/stats");
    }
}
