use memchr::memmem;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::types::UrlMatch;

/// Link candidates: anything after `http(s)://` or a bare `t.me/` up to the
/// next whitespace or comma. Hosts and paths are not validated here.
const LINK_PATTERN: &str = r"(https?://[^\s,]+|t\.me/[^\s,]+)";

static LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(LINK_PATTERN).expect("Failed to compile link regex pattern"));

pub trait UrlFinder {
    /// Ordered link texts found in `text`.
    fn find_urls(&self, text: &str) -> Vec<String>;

    /// Ordered link matches with their byte offsets in `text`.
    fn find_matches(&self, text: &str) -> Vec<UrlMatch>;
}

#[derive(Default, Debug)]
pub struct Finder {}

impl UrlFinder for Finder {
    fn find_urls(&self, text: &str) -> Vec<String> {
        self.find_matches(text)
            .into_iter()
            .map(|url_match| url_match.text)
            .collect()
    }

    fn find_matches(&self, text: &str) -> Vec<UrlMatch> {
        if !Self::may_contain_link(text.as_bytes()) {
            return Vec::new();
        }

        LINK_REGEX
            .find_iter(text)
            .map(|m| UrlMatch::new(m.as_str(), m.start(), m.end()))
            .collect()
    }
}

impl Finder {
    /// SIMD pre-scan so link-free text never reaches the regex engine
    fn may_contain_link(content: &[u8]) -> bool {
        memmem::find(content, b"http").is_some() || memmem::find(content, b"t.me/").is_some()
    }
}

/// Convenience wrapper around [`Finder::find_urls`].
pub fn extract_urls(text: &str) -> Vec<String> {
    Finder::default().find_urls(text)
}

/// Convenience wrapper around [`Finder::find_matches`].
pub fn extract_matches(text: &str) -> Vec<UrlMatch> {
    Finder::default().find_matches(text)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn test_find_urls__comma_and_newline_separated() {
        let text = "https://t.me/a, https://t.me/b\nhttps://t.me/c";

        let actual = extract_urls(text);

        assert_eq!(
            actual,
            vec!["https://t.me/a", "https://t.me/b", "https://t.me/c"]
        );
    }

    #[test]
    fn test_find_urls__comma_without_space_is_excluded() {
        let actual = extract_urls("https://t.me/a,https://t.me/b");

        assert_eq!(actual, vec!["https://t.me/a", "https://t.me/b"]);
    }

    #[test]
    fn test_find_urls__bare_telegram_link() {
        let actual = extract_urls("join t.me/somechannel today");

        assert_eq!(actual, vec!["t.me/somechannel"]);
    }

    #[test]
    fn test_find_urls__chat_export_lines() {
        let text = "https://mega.nz/folder/ys5k1QqR#cYr3AFFI_RQnqgoE7HGSw\n\
                    unknown, [17-12-2025 10:28 PM]\n\
                    Maya, [17-12-2025 10:25 PM]\n\
                    https://cloud.mail.ru/public/KV6j/nsyji24gQ/";

        let actual = extract_urls(text);

        assert_eq!(
            actual,
            vec![
                "https://mega.nz/folder/ys5k1QqR#cYr3AFFI_RQnqgoE7HGSw",
                "https://cloud.mail.ru/public/KV6j/nsyji24gQ/"
            ]
        );
    }

    #[test]
    fn test_find_urls__malformed_links_are_still_captured() {
        let actual = extract_urls("see http://not..a..host and https://");

        assert_eq!(actual, vec!["http://not..a..host"]);
    }

    #[test]
    fn test_find_urls__trailing_punctuation_other_than_comma_is_kept() {
        let actual = extract_urls("(https://t.me/a). Done");

        assert_eq!(actual, vec!["https://t.me/a)."]);
    }

    #[test]
    fn test_find_urls__empty_and_link_free_input() {
        assert!(extract_urls("").is_empty());
        assert!(extract_urls("just some words, no links\n\n").is_empty());
        assert!(extract_urls("httpx is not a scheme").is_empty());
    }

    #[test]
    fn test_find_matches__offsets_point_into_source() {
        let text = "header\nhttps://t.me/a\ncaption https://t.me/b";

        let matches = extract_matches(text);

        assert_eq!(matches.len(), 2);
        for m in &matches {
            assert_eq!(&text[m.start..m.end], m.as_str());
        }
        assert_eq!(matches[0], UrlMatch::new("https://t.me/a", 7, 21));
        assert!(matches[0].end <= matches[1].start);
    }

    #[test]
    fn test_find_matches__multibyte_text_uses_byte_offsets() {
        let text = "Привет 👋 https://t.me/канал";

        let matches = extract_matches(text);

        assert_eq!(matches.len(), 1);
        assert_eq!(&text[matches[0].start..matches[0].end], "https://t.me/канал");
    }

    #[test]
    fn test_may_contain_link() {
        assert!(Finder::may_contain_link(b"xx http yy"));
        assert!(Finder::may_contain_link(b"t.me/abc"));
        assert!(!Finder::may_contain_link(b"nothing to see"));
    }
}
