//! Minimal line-oriented markup.
//!
//! Each line is classified on its own as a heading, list item, blank line
//! or paragraph. The only inline form is `**emphasis**`. Everything borrows
//! from the input text.

use std::str::Lines;

const EMPHASIS: &str = "**";

/// Inline run of text within a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'a> {
    Plain(&'a str),
    Emphasis(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    /// Level 1 to 3
    Heading { level: u8, spans: Vec<Span<'a>> },
    BulletItem(Vec<Span<'a>>),
    NumberedItem(Vec<Span<'a>>),
    Blank,
    Paragraph(Vec<Span<'a>>),
}

/// Lazy sequence of blocks, one per input line. Clone it to restart.
#[derive(Debug, Clone)]
pub struct Blocks<'a> {
    lines: Lines<'a>,
}

pub fn render_blocks(text: &str) -> Blocks<'_> {
    Blocks {
        lines: text.lines(),
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.lines.next().map(classify_line)
    }
}

impl std::iter::FusedIterator for Blocks<'_> {}

fn classify_line(line: &str) -> Block<'_> {
    for (prefix, level) in [("### ", 3), ("## ", 2), ("# ", 1)] {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Block::Heading {
                level,
                spans: inline_spans(rest),
            };
        }
    }

    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Block::BulletItem(inline_spans(rest));
    }

    if let Some(rest) = strip_ordinal(line) {
        return Block::NumberedItem(inline_spans(rest));
    }

    if line.trim().is_empty() {
        return Block::Blank;
    }

    Block::Paragraph(inline_spans(line))
}

/// `<digits>.<whitespace>` prefix, as in `12. item`
fn strip_ordinal(line: &str) -> Option<&str> {
    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_whitespace() => Some(chars.as_str()),
        _ => None,
    }
}

/// Split a line into plain and emphasized runs.
///
/// Markers pair left to right without overlap; a trailing unpaired marker
/// stays in the text. Empty runs are omitted.
pub fn inline_spans(text: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    let mut rest = text;

    while let Some(open) = rest.find(EMPHASIS) {
        let after_open = &rest[open + EMPHASIS.len()..];
        let Some(close) = after_open.find(EMPHASIS) else {
            break;
        };
        push_nonempty(&mut spans, Span::Plain(&rest[..open]));
        push_nonempty(&mut spans, Span::Emphasis(&after_open[..close]));
        rest = &after_open[close + EMPHASIS.len()..];
    }

    push_nonempty(&mut spans, Span::Plain(rest));
    spans
}

fn push_nonempty<'a>(spans: &mut Vec<Span<'a>>, span: Span<'a>) {
    let (Span::Plain(text) | Span::Emphasis(text)) = span;
    if !text.is_empty() {
        spans.push(span);
    }
}

impl Span<'_> {
    pub fn text(&self) -> &str {
        match self {
            Span::Plain(text) | Span::Emphasis(text) => text,
        }
    }
}

impl Block<'_> {
    /// Inline runs of the block; empty for blank lines
    pub fn spans(&self) -> &[Span<'_>] {
        match self {
            Block::Heading { spans, .. }
            | Block::BulletItem(spans)
            | Block::NumberedItem(spans)
            | Block::Paragraph(spans) => spans,
            Block::Blank => &[],
        }
    }

    /// Text of the block with emphasis markers removed
    pub fn plain_text(&self) -> String {
        self.spans().iter().map(Span::text).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_kinds() {
        let blocks: Vec<_> = render_blocks("# Title\n- item one\n\nPlain text").collect();
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    spans: vec![Span::Plain("Title")]
                },
                Block::BulletItem(vec![Span::Plain("item one")]),
                Block::Blank,
                Block::Paragraph(vec![Span::Plain("Plain text")]),
            ]
        );
    }

    #[test]
    fn test_emphasis_spans() {
        let blocks: Vec<_> = render_blocks("**bold** and normal").collect();
        assert_eq!(
            blocks,
            vec![Block::Paragraph(vec![
                Span::Emphasis("bold"),
                Span::Plain(" and normal")
            ])]
        );
    }

    #[test]
    fn test_heading_levels() {
        let levels: Vec<_> = render_blocks("### c\n## b\n# a\n#### d\n#nospace")
            .map(|b| match b {
                Block::Heading { level, .. } => level,
                _ => 0,
            })
            .collect();
        assert_eq!(levels, vec![3, 2, 1, 0, 0]);
    }

    #[test]
    fn test_list_items() {
        let blocks: Vec<_> = render_blocks("* star\n12. twelve\n3.\tthree\n4.no space\n-dash").collect();
        assert_eq!(blocks[0], Block::BulletItem(vec![Span::Plain("star")]));
        assert_eq!(blocks[1], Block::NumberedItem(vec![Span::Plain("twelve")]));
        assert_eq!(blocks[2], Block::NumberedItem(vec![Span::Plain("three")]));
        assert_eq!(blocks[3], Block::Paragraph(vec![Span::Plain("4.no space")]));
        assert_eq!(blocks[4], Block::Paragraph(vec![Span::Plain("-dash")]));
    }

    #[test]
    fn test_whitespace_line_is_blank() {
        let blocks: Vec<_> = render_blocks("a\n   \t\nb").collect();
        assert_eq!(blocks[1], Block::Blank);
    }

    #[test]
    fn test_unpaired_marker_is_literal() {
        assert_eq!(
            inline_spans("**a** b **c"),
            vec![Span::Emphasis("a"), Span::Plain(" b **c")]
        );
        assert_eq!(inline_spans("x ** y"), vec![Span::Plain("x ** y")]);
    }

    #[test]
    fn test_pairs_left_to_right() {
        assert_eq!(
            inline_spans("**a****b** tail"),
            vec![Span::Emphasis("a"), Span::Emphasis("b"), Span::Plain(" tail")]
        );
    }

    #[test]
    fn test_emphasis_inside_list_item() {
        let blocks: Vec<_> = render_blocks("- **Key:** value").collect();
        assert_eq!(
            blocks,
            vec![Block::BulletItem(vec![
                Span::Emphasis("Key:"),
                Span::Plain(" value")
            ])]
        );
        assert_eq!(blocks[0].plain_text(), "Key: value");
    }

    #[test]
    fn test_restartable() {
        let blocks = render_blocks("# a\nb");
        let first: Vec<_> = blocks.clone().collect();
        let second: Vec<_> = blocks.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_empty_text_has_no_blocks() {
        assert_eq!(render_blocks("").count(), 0);
    }
}
