//! Splitting a raw document into dialect-tagged chunks.
//!
//! Chunking is purely structural. Nothing here resolves teams or dates; the
//! normalizer decides what each chunk means.

use std::sync::LazyLock;

use pennant_core::normalizer::{is_block_marker, is_date_line};
use pennant_core::{Dialect, RawChunk};
use regex::Regex;

static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b.*?</tr\s*>").expect("static regex"));

static ROW_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<tr\b").expect("static regex"));

/// Lines with this many separators read as delimited records.
const PIPE_THRESHOLD: usize = 3;

/// Guess the dialect of a whole document.
///
/// Any table row means markup. Otherwise a document where at least one line
/// carries three or more `|` separators is pipe-delimited. Everything else is
/// prose.
pub fn sniff(text: &str) -> Dialect {
    if ROW_OPEN.is_match(text) {
        return Dialect::Markup;
    }
    let piped = text
        .lines()
        .any(|line| line.matches('|').count() >= PIPE_THRESHOLD);
    if piped {
        Dialect::Pipe
    } else {
        Dialect::Prose
    }
}

/// Split `text` into chunks of the given dialect, in document order.
pub fn chunk(text: &str, dialect: Dialect) -> Vec<RawChunk> {
    match dialect {
        Dialect::Pipe => line_chunks(text, Dialect::Pipe),
        Dialect::Markup => markup_chunks(text),
        Dialect::Prose => prose_chunks(text),
    }
}

fn line_chunks(text: &str, dialect: Dialect) -> Vec<RawChunk> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| RawChunk::line(dialect, l))
        .collect()
}

/// One chunk per `<tr>` row. Text between rows (headings carrying the date,
/// captions) becomes one chunk per non-blank line so date context still
/// reaches the rows that follow.
fn markup_chunks(text: &str) -> Vec<RawChunk> {
    let mut chunks = Vec::new();
    let mut cursor = 0;
    for row in ROW.find_iter(text) {
        chunks.extend(line_chunks(&text[cursor..row.start()], Dialect::Markup));
        chunks.push(RawChunk::new(Dialect::Markup, row.as_str().lines()));
        cursor = row.end();
    }
    chunks.extend(line_chunks(&text[cursor..], Dialect::Markup));
    chunks
}

/// One chunk per line, except that a block marker (a "final" label) opens a
/// scoreboard block that runs until the next marker, date line or blank line.
fn prose_chunks(text: &str) -> Vec<RawChunk> {
    let mut chunks = Vec::new();
    let mut block: Option<Vec<&str>> = None;

    for raw in text.lines() {
        let line = raw.trim();

        if line.is_empty() || is_date_line(line) || is_block_marker(line) {
            if let Some(lines) = block.take() {
                chunks.push(RawChunk::new(Dialect::Prose, lines));
            }
        }
        if line.is_empty() {
            continue;
        }
        if is_block_marker(line) {
            block = Some(vec![line]);
            continue;
        }
        match block.as_mut() {
            Some(lines) => lines.push(line),
            None => chunks.push(RawChunk::line(Dialect::Prose, line)),
        }
    }
    if let Some(lines) = block {
        chunks.push(RawChunk::new(Dialect::Prose, lines));
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("<table><tr><td>LG</td></tr></table>", Dialect::Markup)]
    #[case("<TR class=\"x\"><td>LG</td></TR>", Dialect::Markup)]
    #[case("20250401|LG|KT|3|2|...", Dialect::Pipe)]
    #[case("LG|3|2|KT", Dialect::Pipe)]
    #[case("2025-04-01\nLG 3-2 KT", Dialect::Prose)]
    #[case("LG | KT", Dialect::Prose)]
    #[case("", Dialect::Prose)]
    fn sniffs_dialect(#[case] text: &str, #[case] expected: Dialect) {
        assert_eq!(sniff(text), expected);
    }

    #[test]
    fn pipe_lines_are_single_chunks() {
        let chunks = chunk("a|b|c|d\n\n  e|f|g|h  \n", Dialect::Pipe);
        assert_eq!(
            chunks,
            vec![
                RawChunk::line(Dialect::Pipe, "a|b|c|d"),
                RawChunk::line(Dialect::Pipe, "e|f|g|h"),
            ]
        );
    }

    #[test]
    fn markup_rows_and_headings_are_separate() {
        let text = "<h3>2025-04-01</h3>\n<table>\n<tr><td>LG</td>\n<td>3</td></tr>\n<tr><td>KT</td></tr>\n</table>";
        let chunks = chunk(text, Dialect::Markup);
        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[0].lines, vec!["<h3>2025-04-01</h3>"]);
        assert_eq!(chunks[1].lines, vec!["<table>"]);
        assert_eq!(chunks[2].lines, vec!["<tr><td>LG</td>", "<td>3</td></tr>"]);
        assert_eq!(chunks[3].lines, vec!["<tr><td>KT</td></tr>"]);
        assert_eq!(chunks[4].lines, vec!["</table>"]);
        assert!(chunks.iter().all(|c| c.dialect == Dialect::Markup));
    }

    #[test]
    fn prose_block_runs_until_next_marker() {
        let text = "2025-04-01\n종료\n두산\n3\n한화\n2\n종료\nLG\n1\nKT\n1\n2025-04-02\nKIA 0-5 삼성";
        let chunks = chunk(text, Dialect::Prose);
        let lines: Vec<Vec<String>> = chunks.into_iter().map(|c| c.lines).collect();
        assert_eq!(
            lines,
            vec![
                vec!["2025-04-01".to_string()],
                vec!["종료", "두산", "3", "한화", "2"].into_iter().map(String::from).collect(),
                vec!["종료", "LG", "1", "KT", "1"].into_iter().map(String::from).collect(),
                vec!["2025-04-02".to_string()],
                vec!["KIA 0-5 삼성".to_string()],
            ]
        );
    }

    #[test]
    fn blank_line_closes_a_block() {
        let chunks = chunk("final\nLG\n3\nKT\n2\n\nSSG 4-1 NC", Dialect::Prose);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].lines.len(), 5);
        assert_eq!(chunks[1].lines, vec!["SSG 4-1 NC"]);
    }
}
