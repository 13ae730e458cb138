//! Property-based tests for telecheck using proptest
//!
//! These tests generate random pastes to check extraction, deduplication
//! and export rendering across a wide range of inputs.

use assert_cmd::prelude::*;
use proptest::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

use telecheck::{
    CheckMode, ExportMode, ExportSource, LinkResult, LinkStatus, ResultFilter, dedup,
    extract_urls, reconstruct, render,
};

const NAME: &str = "telecheck";

/// Generate links the extractor should pick up whole
fn link_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        r"[a-zA-Z0-9_]{1,16}".prop_map(|name| format!("https://t.me/{name}")),
        r"[a-zA-Z0-9_]{1,16}".prop_map(|name| format!("http://t.me/{name}")),
        r"[a-zA-Z0-9_]{1,16}".prop_map(|name| format!("t.me/{name}")),
        (r"[a-zA-Z0-9]{4,10}", r"[a-zA-Z0-9_-]{4,12}")
            .prop_map(|(id, key)| format!("https://mega.nz/folder/{id}#{key}")),
    ]
}

/// Separators that end a link
fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just(" "), Just("\n"), Just(", "), Just("\n\n"), Just("\t")]
}

/// Words that can never be mistaken for a link
fn filler_strategy() -> impl Strategy<Value = String> {
    r"[A-Z!?.]{1,12}"
}

fn status_strategy() -> impl Strategy<Value = LinkStatus> {
    prop_oneof![
        Just(LinkStatus::Valid),
        Just(LinkStatus::Invalid),
        Just(LinkStatus::Unknown),
        Just(LinkStatus::Other("mega".to_string())),
    ]
}

/// A paste mixing links, filler words and line breaks
fn paste_strategy() -> impl Strategy<Value = (String, Vec<String>)> {
    prop::collection::vec(
        (
            prop::option::of(filler_strategy()),
            link_strategy(),
            separator_strategy(),
        ),
        0..12,
    )
    .prop_map(|pieces| {
        let mut text = String::new();
        let mut links = Vec::new();
        for (filler, link, separator) in pieces {
            if let Some(filler) = filler {
                text.push_str(&filler);
                text.push('\n');
            }
            text.push_str(&link);
            text.push_str(separator);
            links.push(link);
        }
        (text, links)
    })
}

fn results_for(links: &[String], statuses: &[LinkStatus]) -> Vec<LinkResult> {
    links
        .iter()
        .zip(statuses.iter().cycle())
        .map(|(link, status)| LinkResult::new(link.as_str(), status.clone(), None))
        .collect()
}

proptest! {
    #[test]
    fn test_extract_urls_finds_every_link_in_order((text, links) in paste_strategy()) {
        prop_assert_eq!(extract_urls(&text), links);
    }

    #[test]
    fn test_extract_urls_ignores_link_free_text(text in r"[A-Z .!?\n]{0,200}") {
        prop_assert!(extract_urls(&text).is_empty());
    }

    #[test]
    fn test_dedup_accounts_for_every_link(
        links in prop::collection::vec(prop_oneof![
            Just("https://t.me/a".to_string()),
            Just("https://t.me/b".to_string()),
            link_strategy(),
        ], 0..30)
    ) {
        let deduplicated = dedup(&links);

        prop_assert_eq!(deduplicated.unique.len() + deduplicated.duplicate_count, links.len());
        prop_assert_eq!(dedup(&deduplicated.unique).duplicate_count, 0);
        for link in &links {
            prop_assert!(deduplicated.unique.contains(link));
        }
        // First occurrences keep their relative order
        let firsts: Vec<&String> = links
            .iter()
            .enumerate()
            .filter(|(i, link)| !links[..*i].contains(*link))
            .map(|(_, link)| link)
            .collect();
        prop_assert_eq!(deduplicated.unique.iter().collect::<Vec<_>>(), firsts);
    }

    #[test]
    fn test_render_list_modes(
        (text, links) in paste_strategy(),
        statuses in prop::collection::vec(status_strategy(), 1..4),
    ) {
        let results = results_for(&links, &statuses);
        let source = ExportSource::bulk(&text);

        let plain = render(&results, ExportMode::Plain, ResultFilter::All, &source);
        let gapped = render(&results, ExportMode::Gapped, ResultFilter::All, &source);
        let numbered = render(&results, ExportMode::Numbered, ResultFilter::All, &source);

        if results.is_empty() {
            prop_assert_eq!(plain, "");
            prop_assert_eq!(gapped, "");
            prop_assert_eq!(numbered, "");
        } else {
            prop_assert_eq!(plain.lines().count(), results.len());
            prop_assert_eq!(gapped.split("\n\n").count(), results.len());

            let lines: Vec<&str> = numbered.lines().collect();
            prop_assert_eq!(lines.len(), results.len() + 2);
            prop_assert_eq!(lines[0], "All Links");
            for (i, result) in results.iter().enumerate() {
                let expected = format!("{}. {}", i + 1, result.link);
                prop_assert_eq!(lines[i + 2], expected.as_str());
            }
        }
    }

    #[test]
    fn test_render_is_repeatable(
        (text, links) in paste_strategy(),
        statuses in prop::collection::vec(status_strategy(), 1..4),
        filter in prop_oneof![
            Just(ResultFilter::All),
            Just(ResultFilter::Valid),
            Just(ResultFilter::Invalid),
        ],
        single in any::<bool>(),
    ) {
        let results: Vec<LinkResult> = results_for(&links, &statuses)
            .into_iter()
            .filter(|result| filter.matches(result))
            .collect();
        let source = if single {
            ExportSource::single(&text)
        } else {
            ExportSource::bulk(&text)
        };

        for mode in [
            ExportMode::Numbered,
            ExportMode::Gapped,
            ExportMode::Plain,
            ExportMode::Original,
        ] {
            let first = render(&results, mode, filter, &source);
            let second = render(&results, mode, filter, &source);
            prop_assert_eq!(first, second, "{:?} output changed between renders", mode);
        }
    }

    #[test]
    fn test_reconstruct_keeps_all_valid_paste_verbatim(
        links in prop::collection::vec(link_strategy(), 1..10),
        separators in prop::collection::vec(
            prop_oneof![Just(" "), Just("\n"), Just("\n\n")], 1..4
        ),
    ) {
        let text = links
            .iter()
            .zip(separators.iter().cycle())
            .map(|(link, separator)| format!("{link}{separator}"))
            .collect::<String>();
        let text = text.trim_end();
        let results = results_for(&links, &[LinkStatus::Valid]);

        prop_assert_eq!(reconstruct(text, &results, CheckMode::Bulk), text);
    }

    #[test]
    fn test_reconstruct_output_is_tidy(
        (text, links) in paste_strategy(),
        statuses in prop::collection::vec(status_strategy(), 1..4),
    ) {
        let results = results_for(&links, &statuses);

        let rebuilt = reconstruct(&text, &results, CheckMode::Bulk);

        prop_assert!(!rebuilt.contains("\n\n\n"));
        prop_assert_eq!(rebuilt.trim(), rebuilt.as_str());
        for link in extract_urls(&rebuilt) {
            prop_assert!(results.iter().any(|r| r.link == link && r.is_valid()));
        }
    }

    #[test]
    fn test_reconstruct_single_mode(link in link_strategy(), status in status_strategy()) {
        let results = vec![LinkResult::new(link.as_str(), status.clone(), None)];

        let rebuilt = reconstruct(&link, &results, CheckMode::Single);

        if status == LinkStatus::Valid {
            prop_assert_eq!(rebuilt, link);
        } else {
            prop_assert_eq!(rebuilt, "");
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn test_cli_handles_link_free_files(content in r"[A-Z .!?\n]{0,200}") {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();

        let output = Command::cargo_bin(NAME)
            .unwrap()
            .args(["--no-config", "--base-url", "http://127.0.0.1:1"])
            .arg(file.path())
            .output()
            .unwrap();

        prop_assert!(output.status.success());
        prop_assert!(output.stdout.is_empty());
    }
}
