use crate::core::constants::export::NUMBERED_SEPARATOR;
use crate::core::types::{CheckMode, ExportMode, LinkResult, ResultFilter};
use crate::export::reconstruct::reconstruct;

/// The input an `original` export is rebuilt from.
#[derive(Debug, Clone, Copy)]
pub struct ExportSource<'a> {
    pub text: &'a str,
    pub mode: CheckMode,
}

impl<'a> ExportSource<'a> {
    pub fn bulk(text: &'a str) -> Self {
        Self {
            text,
            mode: CheckMode::Bulk,
        }
    }

    pub fn single(text: &'a str) -> Self {
        Self {
            text,
            mode: CheckMode::Single,
        }
    }
}

/// Render already-filtered results as a text block.
///
/// `filter` only picks the numbered title. An empty `results` always
/// renders as the empty string.
pub fn render(
    results: &[LinkResult],
    mode: ExportMode,
    filter: ResultFilter,
    source: &ExportSource<'_>,
) -> String {
    if results.is_empty() {
        return String::new();
    }

    match mode {
        ExportMode::Numbered => render_numbered(results, filter),
        ExportMode::Gapped => join_links(results, "\n\n"),
        ExportMode::Plain => join_links(results, "\n"),
        ExportMode::Original => reconstruct(source.text, results, source.mode),
    }
}

fn render_numbered(results: &[LinkResult], filter: ResultFilter) -> String {
    let mut lines = Vec::with_capacity(results.len() + 2);
    lines.push(filter.title().to_string());
    lines.push(NUMBERED_SEPARATOR.to_string());
    lines.extend(
        results
            .iter()
            .enumerate()
            .map(|(i, result)| format!("{}. {}", i + 1, result.link)),
    );
    lines.join("\n")
}

fn join_links(results: &[LinkResult], separator: &str) -> String {
    results
        .iter()
        .map(|result| result.link.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}
