//! Rich text rendering
//!
//! The CMS delivers body content as a flat list of typed runs. `as_text`
//! flattens a list for word counting and teasers, `as_html` turns it into
//! block-level markup, applying the inline annotations each run carries
//! (strong, emphasis, hyperlinks) to their character ranges.

use crate::content::RichTextSpan;
use serde::Deserialize;
use serde_json::Value;

/// Concatenate the plain text of all runs, separated by single spaces
pub fn as_text(spans: &[RichTextSpan]) -> String {
    spans
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render runs as HTML blocks
///
/// Consecutive `list-item` / `o-list-item` runs are grouped into a single
/// `<ul>` / `<ol>`. Unknown kinds fall back to paragraphs.
pub fn as_html(spans: &[RichTextSpan]) -> String {
    let mut html = String::new();
    let mut open_list: Option<&str> = None;

    for span in spans {
        let wants_list = match span.kind.as_str() {
            "list-item" => Some("ul"),
            "o-list-item" => Some("ol"),
            _ => None,
        };
        if open_list != wants_list {
            if let Some(tag) = open_list {
                html.push_str(&format!("</{tag}>\n"));
            }
            if let Some(tag) = wants_list {
                html.push_str(&format!("<{tag}>\n"));
            }
            open_list = wants_list;
        }

        match span.kind.as_str() {
            "list-item" | "o-list-item" => {
                html.push_str(&format!("<li>{}</li>\n", inline_html(span)));
            }
            "preformatted" => {
                html.push_str(&format!("<pre>{}</pre>\n", inline_html(span)));
            }
            "image" => {
                if let Some(url) = span.extra.get("url").and_then(|v| v.as_str()) {
                    let alt = span.extra.get("alt").and_then(|v| v.as_str()).unwrap_or("");
                    html.push_str(&format!(
                        "<img src=\"{}\" alt=\"{}\">\n",
                        escape_html(url),
                        escape_html(alt)
                    ));
                }
            }
            kind => {
                if let Some(level) = heading_level(kind) {
                    html.push_str(&format!(
                        "<h{level}>{}</h{level}>\n",
                        inline_html(span)
                    ));
                } else {
                    html.push_str(&format!("<p>{}</p>\n", inline_html(span)));
                }
            }
        }
    }

    if let Some(tag) = open_list {
        html.push_str(&format!("</{tag}>\n"));
    }

    html
}

fn heading_level(kind: &str) -> Option<u8> {
    let level: u8 = kind.strip_prefix("heading")?.parse().ok()?;
    (1..=6).contains(&level).then_some(level)
}

/// One inline annotation over a run's text, `[start, end)` in characters
#[derive(Debug, Clone, Deserialize)]
struct SpanAnnotation {
    start: usize,
    end: usize,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    data: serde_json::Map<String, Value>,
}

/// Escape one run's text and wrap its annotated ranges
fn inline_html(span: &RichTextSpan) -> String {
    let chars: Vec<char> = span.text.chars().collect();
    let mut annotations = annotations(span, chars.len());
    if annotations.is_empty() {
        return escape_html(&span.text);
    }

    // Outer ranges first, so contained ranges nest inside them
    annotations.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));
    wrap_range(&chars, 0, chars.len(), &annotations)
}

/// The run's annotation list, with ranges clamped to the text
fn annotations(span: &RichTextSpan, len: usize) -> Vec<SpanAnnotation> {
    let Some(Value::Array(items)) = span.extra.get("spans") else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| serde_json::from_value::<SpanAnnotation>(item.clone()).ok())
        .map(|mut a| {
            a.end = a.end.min(len);
            a
        })
        .filter(|a| a.start < a.end)
        .collect()
}

/// Emit `chars[from..to]` escaped, wrapping each annotation's range
///
/// `spans` is sorted outer-first. A range starting inside another becomes a
/// nested tag; whatever reaches past the enclosing range is clamped to it.
fn wrap_range(chars: &[char], from: usize, to: usize, spans: &[SpanAnnotation]) -> String {
    let mut html = String::new();
    let mut pos = from;
    let mut i = 0;

    while i < spans.len() {
        let start = spans[i].start.max(pos).min(to);
        let end = spans[i].end.min(to);
        if start >= end {
            i += 1;
            continue;
        }
        html.push_str(&escape_chars(&chars[pos..start]));

        let mut j = i + 1;
        while j < spans.len() && spans[j].start < end {
            j += 1;
        }
        let inner = wrap_range(chars, start, end, &spans[i + 1..j]);
        match tag_pair(&spans[i]) {
            Some((open, close)) => {
                html.push_str(&open);
                html.push_str(&inner);
                html.push_str(close);
            }
            None => html.push_str(&inner),
        }

        pos = end;
        i = j;
    }

    html.push_str(&escape_chars(&chars[pos..to]));
    html
}

/// Opening and closing markup for one annotation kind
///
/// Unknown kinds (labels, embeds) render their text unwrapped, as does a
/// hyperlink without a target.
fn tag_pair(span: &SpanAnnotation) -> Option<(String, &'static str)> {
    match span.kind.as_str() {
        "strong" => Some(("<strong>".to_string(), "</strong>")),
        "em" => Some(("<em>".to_string(), "</em>")),
        "hyperlink" => {
            let url = span.data.get("url").and_then(|v| v.as_str())?;
            Some((format!("<a href=\"{}\">", escape_html(url)), "</a>"))
        }
        _ => None,
    }
}

fn escape_chars(chars: &[char]) -> String {
    escape_html(&chars.iter().collect::<String>())
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn span(kind: &str, text: &str) -> RichTextSpan {
        RichTextSpan {
            kind: kind.to_string(),
            text: text.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn annotated(kind: &str, text: &str, spans: serde_json::Value) -> RichTextSpan {
        let mut run = span(kind, text);
        run.extra.insert("spans".to_string(), spans);
        run
    }

    #[test]
    fn test_as_text_joins_runs() {
        let spans = vec![span("paragraph", "First run."), span("paragraph", "Second run.")];
        assert_eq!(as_text(&spans), "First run. Second run.");
    }

    #[test]
    fn test_as_text_empty() {
        assert_eq!(as_text(&[]), "");
    }

    #[test]
    fn test_as_html_paragraph_escapes() {
        let html = as_html(&[span("paragraph", "a < b & c")]);
        assert_eq!(html, "<p>a &lt; b &amp; c</p>\n");
    }

    #[test]
    fn test_as_html_headings() {
        let html = as_html(&[span("heading2", "Section"), span("paragraph", "Body")]);
        assert_eq!(html, "<h2>Section</h2>\n<p>Body</p>\n");
    }

    #[test]
    fn test_as_html_groups_list_items() {
        let spans = vec![
            span("list-item", "one"),
            span("list-item", "two"),
            span("paragraph", "after"),
        ];
        let html = as_html(&spans);
        assert_eq!(
            html,
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>\n<p>after</p>\n"
        );
    }

    #[test]
    fn test_as_html_image() {
        let mut img = span("image", "");
        img.extra.insert("url".to_string(), json!("https://images.example/a.png"));
        img.extra.insert("alt".to_string(), json!("A \"quoted\" alt"));
        let html = as_html(&[img]);
        assert_eq!(
            html,
            "<img src=\"https://images.example/a.png\" alt=\"A &quot;quoted&quot; alt\">\n"
        );
    }

    #[test]
    fn test_as_html_unknown_kind_falls_back() {
        let html = as_html(&[span("embed", "watch this")]);
        assert_eq!(html, "<p>watch this</p>\n");
    }

    #[test]
    fn test_as_html_inline_annotations() {
        let run = annotated(
            "paragraph",
            "bold link",
            json!([
                { "start": 0, "end": 4, "type": "strong" },
                {
                    "start": 5,
                    "end": 9,
                    "type": "hyperlink",
                    "data": { "link_type": "Web", "url": "https://voyager.example/" }
                }
            ]),
        );
        assert_eq!(
            as_html(&[run]),
            "<p><strong>bold</strong> <a href=\"https://voyager.example/\">link</a></p>\n"
        );
    }

    #[test]
    fn test_as_html_nested_annotations() {
        let run = annotated(
            "paragraph",
            "all of it",
            json!([
                { "start": 0, "end": 9, "type": "strong" },
                { "start": 4, "end": 6, "type": "em" }
            ]),
        );
        assert_eq!(as_html(&[run]), "<p><strong>all <em>of</em> it</strong></p>\n");
    }

    #[test]
    fn test_as_html_adjacent_annotations() {
        let run = annotated(
            "list-item",
            "abcdef",
            json!([
                { "start": 0, "end": 3, "type": "strong" },
                { "start": 3, "end": 6, "type": "em" }
            ]),
        );
        assert_eq!(
            as_html(&[run]),
            "<ul>\n<li><strong>abc</strong><em>def</em></li>\n</ul>\n"
        );
    }

    #[test]
    fn test_as_html_annotation_offsets_count_chars() {
        // Multibyte text before the range, escaping inside the literal
        let run = annotated(
            "paragraph",
            "café & more",
            json!([ { "start": 7, "end": 11, "type": "em" } ]),
        );
        assert_eq!(as_html(&[run]), "<p>café &amp; <em>more</em></p>\n");
    }

    #[test]
    fn test_as_html_annotation_text_is_escaped() {
        let run = annotated(
            "paragraph",
            "a < b",
            json!([ { "start": 0, "end": 5, "type": "strong" } ]),
        );
        assert_eq!(as_html(&[run]), "<p><strong>a &lt; b</strong></p>\n");
    }

    #[test]
    fn test_as_html_unknown_annotation_passes_text_through() {
        let run = annotated(
            "paragraph",
            "plain label",
            json!([
                { "start": 0, "end": 5, "type": "label", "data": { "label": "highlight" } },
                { "start": 6, "end": 99, "type": "strong" }
            ]),
        );
        // The label kind has no markup; the overlong range is clamped
        assert_eq!(as_html(&[run]), "<p>plain <strong>label</strong></p>\n");
    }

    #[test]
    fn test_as_html_hyperlink_without_target_stays_plain() {
        let run = annotated(
            "paragraph",
            "dead link",
            json!([ { "start": 0, "end": 9, "type": "hyperlink" } ]),
        );
        assert_eq!(as_html(&[run]), "<p>dead link</p>\n");
    }
}
