//! Rich-text block rendering
//!
//! The content provider stores post bodies as a sequence of JSON blocks, each
//! holding a style and a run of marked-up spans. This module turns such a
//! sequence into the same HTML dialect the bundled posts are written in.
//! Anything that is not a text block, or whose style is unknown, renders to
//! nothing.

use serde::Deserialize;
use serde_json::Value;

use crate::helpers::html_escape;

/// A text block
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(rename = "_type")]
    pub kind: String,

    #[serde(default)]
    pub style: Option<String>,

    #[serde(rename = "listItem", default)]
    pub list_item: Option<String>,

    #[serde(default)]
    pub children: Vec<Span>,

    #[serde(rename = "markDefs", default)]
    pub mark_defs: Vec<MarkDef>,
}

/// An inline run of text carrying zero or more marks
#[derive(Debug, Clone, Deserialize)]
pub struct Span {
    #[serde(rename = "_type", default = "span_kind")]
    pub kind: String,

    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub marks: Vec<String>,
}

/// An annotation referenced from span marks by key
#[derive(Debug, Clone, Deserialize)]
pub struct MarkDef {
    #[serde(rename = "_key")]
    pub key: String,

    #[serde(rename = "_type")]
    pub kind: String,

    #[serde(default)]
    pub href: Option<String>,
}

fn span_kind() -> String {
    "span".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListKind {
    Bullet,
    Number,
}

impl ListKind {
    fn open_tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "<ul>",
            ListKind::Number => "<ol>",
        }
    }

    fn close_tag(self) -> &'static str {
        match self {
            ListKind::Bullet => "</ul>",
            ListKind::Number => "</ol>",
        }
    }
}

impl Block {
    /// Decode a text block, returning `None` for any other kind of node
    pub fn from_value(value: &Value) -> Option<Self> {
        let block: Block = serde_json::from_value(value.clone()).ok()?;
        (block.kind == "block").then_some(block)
    }

    /// Element name for this block's style
    fn tag(&self) -> Option<&'static str> {
        match self.style.as_deref().unwrap_or("normal") {
            "normal" | "paragraph" => Some("p"),
            "h1" => Some("h1"),
            "h2" => Some("h2"),
            "h3" => Some("h3"),
            "h4" => Some("h4"),
            "blockquote" | "quote" => Some("blockquote"),
            _ => None,
        }
    }

    fn list_kind(&self) -> Option<ListKind> {
        match self.list_item.as_deref()? {
            "number" => Some(ListKind::Number),
            _ => Some(ListKind::Bullet),
        }
    }

    fn inline_html(&self) -> String {
        self.children
            .iter()
            .filter(|span| span.kind == "span")
            .map(|span| self.render_span(span))
            .collect()
    }

    fn render_span(&self, span: &Span) -> String {
        let mut open = String::new();
        let mut close = Vec::new();

        for mark in &span.marks {
            let (start, end) = match mark.as_str() {
                "strong" => ("<strong>".to_string(), "</strong>"),
                "em" => ("<em>".to_string(), "</em>"),
                "code" => ("<code>".to_string(), "</code>"),
                "underline" => ("<u>".to_string(), "</u>"),
                "strike-through" => ("<s>".to_string(), "</s>"),
                key => match self.link_href(key) {
                    Some(href) => (format!(r#"<a href="{}">"#, html_escape(href)), "</a>"),
                    None => continue,
                },
            };
            open.push_str(&start);
            close.push(end);
        }

        let mut html = open;
        html.push_str(&html_escape(&span.text));
        for end in close.iter().rev() {
            html.push_str(end);
        }
        html
    }

    fn link_href(&self, key: &str) -> Option<&str> {
        self.mark_defs
            .iter()
            .find(|def| def.key == key && def.kind == "link")
            .and_then(|def| def.href.as_deref())
            .and_then(safe_href)
    }

    fn plain_text(&self) -> String {
        self.children
            .iter()
            .filter(|span| span.kind == "span")
            .map(|span| span.text.as_str())
            .collect()
    }
}

/// Render a block sequence to HTML
pub fn to_html(body: &[Value]) -> String {
    let mut html = String::new();
    let mut open_list: Option<ListKind> = None;

    for block in body.iter().filter_map(Block::from_value) {
        let list = block.list_kind();
        if list != open_list {
            if let Some(kind) = open_list {
                html.push_str(kind.close_tag());
            }
            if let Some(kind) = list {
                html.push_str(kind.open_tag());
            }
            open_list = list;
        }

        if list.is_some() {
            html.push_str("<li>");
            html.push_str(&block.inline_html());
            html.push_str("</li>");
        } else if let Some(tag) = block.tag() {
            html.push_str(&format!("<{}>{}</{}>", tag, block.inline_html(), tag));
        }
    }

    if let Some(kind) = open_list {
        html.push_str(kind.close_tag());
    }

    html
}

/// Extract the text of every block, separated by single spaces
pub fn to_plain_text(body: &[Value]) -> String {
    body.iter()
        .filter_map(Block::from_value)
        .map(|block| block.plain_text())
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// `href` when it is relative or uses a scheme safe to link to
fn safe_href(href: &str) -> Option<&str> {
    let href = href.trim();
    let scheme_end = href.find(|c| matches!(c, ':' | '/' | '?' | '#'));
    match scheme_end {
        Some(i) if href[i..].starts_with(':') => {
            let scheme = href[..i].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto").then_some(href)
        }
        _ => Some(href),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block(style: &str, children: Value) -> Value {
        json!({ "_type": "block", "style": style, "children": children, "markDefs": [] })
    }

    #[test]
    fn test_heading_with_plain_span() {
        let body = vec![block("h2", json!([{ "_type": "span", "text": "Hiring trends", "marks": [] }]))];
        assert_eq!(to_html(&body), "<h2>Hiring trends</h2>");
    }

    #[test]
    fn test_bold_span() {
        let body = vec![block(
            "normal",
            json!([
                { "_type": "span", "text": "Read ", "marks": [] },
                { "_type": "span", "text": "this", "marks": ["strong"] }
            ]),
        )];
        let html = to_html(&body);
        assert!(html.contains("<strong>this</strong>"));
        assert_eq!(html, "<p>Read <strong>this</strong></p>");
    }

    #[test]
    fn test_nested_marks_close_in_reverse() {
        let body = vec![block(
            "normal",
            json!([{ "_type": "span", "text": "both", "marks": ["strong", "em"] }]),
        )];
        assert_eq!(to_html(&body), "<p><strong><em>both</em></strong></p>");
    }

    #[test]
    fn test_blockquote_and_missing_style() {
        let body = vec![
            block("blockquote", json!([{ "_type": "span", "text": "quoted" }])),
            json!({ "_type": "block", "children": [{ "_type": "span", "text": "plain" }] }),
        ];
        assert_eq!(to_html(&body), "<blockquote>quoted</blockquote><p>plain</p>");
    }

    #[test]
    fn test_unknown_blocks_are_dropped() {
        let body = vec![
            json!({ "_type": "image", "asset": { "_ref": "image-abc-10x10-png" } }),
            block("h6", json!([{ "_type": "span", "text": "ignored" }])),
            block("h1", json!([{ "_type": "span", "text": "Kept" }])),
            json!("not even an object"),
        ];
        assert_eq!(to_html(&body), "<h1>Kept</h1>");
    }

    #[test]
    fn test_link_annotation() {
        let body = vec![json!({
            "_type": "block",
            "style": "normal",
            "markDefs": [{ "_key": "k1", "_type": "link", "href": "https://example.com?a=1&b=2" }],
            "children": [{ "_type": "span", "text": "site", "marks": ["k1", "unknown"] }]
        })];
        assert_eq!(
            to_html(&body),
            r#"<p><a href="https://example.com?a=1&amp;b=2">site</a></p>"#
        );
    }

    #[test]
    fn test_unsafe_link_schemes_are_dropped() {
        let link = |href: &str| {
            to_html(&[json!({
                "_type": "block",
                "markDefs": [{ "_key": "k1", "_type": "link", "href": href }],
                "children": [{ "_type": "span", "text": "go", "marks": ["k1"] }]
            })])
        };

        for href in ["javascript:alert(1)", "JavaScript:alert(1)", "  javascript:x", "java\tscript:x", "data:text/html,hi"] {
            assert_eq!(link(href), "<p>go</p>", "kept {:?}", href);
        }
        assert_eq!(
            link("mailto:jobs@example.com"),
            r#"<p><a href="mailto:jobs@example.com">go</a></p>"#
        );
        assert_eq!(link("HTTPS://example.com"), r#"<p><a href="HTTPS://example.com">go</a></p>"#);
        assert_eq!(link("/blog/other"), r#"<p><a href="/blog/other">go</a></p>"#);
        assert_eq!(link("other?x=a:b"), r#"<p><a href="other?x=a:b">go</a></p>"#);
    }

    #[test]
    fn test_text_is_escaped() {
        let body = vec![block("normal", json!([{ "_type": "span", "text": "<script>" }]))];
        assert_eq!(to_html(&body), "<p>&lt;script&gt;</p>");
    }

    #[test]
    fn test_list_items_are_grouped() {
        let item = |text: &str, kind: &str| {
            json!({
                "_type": "block",
                "style": "normal",
                "listItem": kind,
                "children": [{ "_type": "span", "text": text }]
            })
        };
        let body = vec![
            item("one", "bullet"),
            item("two", "bullet"),
            item("first", "number"),
            block("normal", json!([{ "_type": "span", "text": "after" }])),
        ];
        assert_eq!(
            to_html(&body),
            "<ul><li>one</li><li>two</li></ul><ol><li>first</li></ol><p>after</p>"
        );
    }

    #[test]
    fn test_plain_text() {
        let body = vec![
            block("h2", json!([{ "_type": "span", "text": "Title" }])),
            block(
                "normal",
                json!([
                    { "_type": "span", "text": "Hello " },
                    { "_type": "span", "text": "world", "marks": ["em"] }
                ]),
            ),
        ];
        assert_eq!(to_plain_text(&body), "Title Hello world");
    }
}
