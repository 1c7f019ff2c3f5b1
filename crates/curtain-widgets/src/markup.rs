#![forbid(unsafe_code)]

//! Minimal inline emphasis for callout text.
//!
//! The first `**` splits the text into a plain prefix and an emphasized
//! remainder. There is exactly one emphasis span: any later `**` delimiters
//! are dropped and their text stays in the emphasized segment.
//!
//! ```
//! use curtain_widgets::markup::{Content, Emphasis};
//!
//! let content = Content::parse("Click here**to continue");
//! assert_eq!(content.segments()[0].text, "Click here");
//! assert_eq!(content.segments()[1].emphasis, Emphasis::Bold);
//! ```

const DELIMITER: &str = "**";

/// How a segment is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    Bold,
}

/// A run of text with one emphasis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub emphasis: Emphasis,
}

/// Parsed callout content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Content {
    segments: Vec<Segment>,
}

impl Content {
    /// Parse callout text. Empty segments are omitted.
    pub fn parse(text: &str) -> Self {
        let mut segments = Vec::with_capacity(2);
        let (plain, bold) = match text.split_once(DELIMITER) {
            Some((plain, rest)) => (plain, Some(rest.replace(DELIMITER, ""))),
            None => (text, None),
        };
        if !plain.is_empty() {
            segments.push(Segment {
                text: plain.to_owned(),
                emphasis: Emphasis::Plain,
            });
        }
        if let Some(bold) = bold.filter(|b| !b.is_empty()) {
            segments.push(Segment {
                text: bold,
                emphasis: Emphasis::Bold,
            });
        }
        Self { segments }
    }

    /// Segments in display order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The emphasized segment, if any.
    pub fn bold(&self) -> Option<&str> {
        self.segments
            .iter()
            .find(|s| s.emphasis == Emphasis::Bold)
            .map(|s| s.text.as_str())
    }

    /// Render as HTML spans, escaping the text.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        for segment in &self.segments {
            match segment.emphasis {
                Emphasis::Plain => html.push_str("<span>"),
                Emphasis::Bold => html.push_str("<span class=\"bold\">"),
            }
            escape_into(&mut html, &segment.text);
            html.push_str("</span>");
        }
        html
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}
