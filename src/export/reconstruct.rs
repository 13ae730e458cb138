use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::core::types::{CheckMode, LinkResult, LinkStatus};
use crate::discovery::extract_matches;

/// A line break, optional whitespace, then another line break.
static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("Failed to compile paragraph break pattern"));

static EXCESS_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n{3,}").expect("Failed to compile newline run pattern"));

/// Rebuild `text` keeping only the links marked valid in `results`, along
/// with the text that belongs to them.
///
/// Text between two links is attached to the later one. When that text
/// spans several paragraphs only the last paragraph is kept, so captions of
/// discarded links do not leak into the output. Whitespace-only gaps are
/// kept as they are, except in front of the first kept link. Indentation of
/// the first kept line survives.
///
/// In single mode the whole input is the one link: it is returned verbatim
/// when valid and dropped otherwise.
pub fn reconstruct(text: &str, results: &[LinkResult], mode: CheckMode) -> String {
    if mode == CheckMode::Single {
        return match results.first() {
            Some(result) if result.is_valid() => text.to_string(),
            _ => String::new(),
        };
    }

    let verdicts = verdict_lookup(results);
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;

    for url_match in extract_matches(text) {
        let gap_start = last_end;
        let preceding = &text[gap_start..url_match.start];
        last_end = url_match.end;

        let keep = verdicts
            .get(url_match.as_str())
            .is_some_and(|status| status.is_valid());
        if !keep {
            continue;
        }

        let (mut context, discarded) = retained_context(preceding);
        if output.is_empty() {
            // Context that starts at a line start keeps its indentation;
            // the tail of a dropped link's line does not.
            context = if discarded || gap_start == 0 {
                skip_blank_lines(context)
            } else {
                context.trim_start()
            };
        } else if discarded && !output.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(context);
        output.push_str(url_match.as_str());
    }

    EXCESS_NEWLINES
        .replace_all(&output, "\n\n")
        .trim_end()
        .to_string()
}

/// `text` without its leading whitespace-only lines.
fn skip_blank_lines(text: &str) -> &str {
    match text.find(|c: char| !c.is_whitespace()) {
        Some(content) => match text[..content].rfind('\n') {
            Some(newline) => &text[newline + 1..],
            None => text,
        },
        None => "",
    }
}

/// First verdict seen for each link.
fn verdict_lookup(results: &[LinkResult]) -> FxHashMap<&str, &LinkStatus> {
    let mut verdicts = FxHashMap::default();
    for result in results {
        verdicts
            .entry(result.link.as_str())
            .or_insert(&result.status);
    }
    verdicts
}

/// The part of `preceding` kept in front of a valid link, and whether
/// anything was cut off.
fn retained_context(preceding: &str) -> (&str, bool) {
    if preceding.trim().is_empty() {
        return (preceding, false);
    }
    match PARAGRAPH_BREAK.find_iter(preceding).last() {
        Some(paragraph_break) => (&preceding[paragraph_break.end()..], true),
        None => (preceding, false),
    }
}
