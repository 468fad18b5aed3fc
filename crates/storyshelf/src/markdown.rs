//! Inline markdown subset used for story bodies.
//!
//! Paragraphs are separated by a blank line. Inside a paragraph `**text**`
//! is bold and `*text*` is italic; nothing else is interpreted.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(String),
    Italic(String),
}

pub type Paragraph = Vec<Inline>;

fn bold_re() -> &'static Regex {
    static BOLD_RE: OnceLock<Regex> = OnceLock::new();
    BOLD_RE.get_or_init(|| Regex::new(r"\*\*(.+?)\*\*").expect("invalid built-in bold regex"))
}

fn italic_re() -> &'static Regex {
    static ITALIC_RE: OnceLock<Regex> = OnceLock::new();
    ITALIC_RE.get_or_init(|| Regex::new(r"\*(.+?)\*").expect("invalid built-in italic regex"))
}

/// Split `content` into paragraphs of inline runs.
pub fn parse(content: &str) -> Vec<Paragraph> {
    content.split("\n\n").map(parse_paragraph).collect()
}

/// Parse one paragraph. Bold spans are found first; italics are only looked
/// for in the text between them.
pub fn parse_paragraph(text: &str) -> Paragraph {
    let mut out = Vec::new();
    let mut cursor = 0;

    for caps in bold_re().captures_iter(text) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_italics(&text[cursor..whole.start()], &mut out);
        out.push(Inline::Bold(inner.as_str().to_string()));
        cursor = whole.end();
    }
    push_italics(&text[cursor..], &mut out);

    if out.is_empty() {
        out.push(Inline::Text(text.to_string()));
    }
    out
}

fn push_italics(segment: &str, out: &mut Vec<Inline>) {
    let mut cursor = 0;
    for caps in italic_re().captures_iter(segment) {
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > cursor {
            out.push(Inline::Text(segment[cursor..whole.start()].to_string()));
        }
        out.push(Inline::Italic(inner.as_str().to_string()));
        cursor = whole.end();
    }
    if cursor < segment.len() {
        out.push(Inline::Text(segment[cursor..].to_string()));
    }
}

/// Render paragraphs as HTML, escaping all text.
pub fn to_html(content: &str) -> String {
    let mut html = String::with_capacity(content.len() + 16);
    for paragraph in parse(content) {
        html.push_str("<p>");
        for inline in paragraph {
            match inline {
                Inline::Text(t) => html.push_str(&escape(&t)),
                Inline::Bold(t) => {
                    html.push_str("<strong>");
                    html.push_str(&escape(&t));
                    html.push_str("</strong>");
                }
                Inline::Italic(t) => {
                    html.push_str("<em>");
                    html.push_str(&escape(&t));
                    html.push_str("</em>");
                }
            }
        }
        html.push_str("</p>");
    }
    html
}

/// Render paragraphs as plain text with the markers removed.
pub fn to_plain(content: &str) -> String {
    parse(content)
        .into_iter()
        .map(|p| {
            p.into_iter()
                .map(|inline| match inline {
                    Inline::Text(t) | Inline::Bold(t) | Inline::Italic(t) => t,
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
