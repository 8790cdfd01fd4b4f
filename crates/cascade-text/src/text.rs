#![forbid(unsafe_code)]

//! `Span` and `Line`.

use crate::{display_width, grapheme_width};
use cascade_style::Style;
use unicode_segmentation::UnicodeSegmentation;

/// A run of text with an optional style.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub content: String,
    pub style: Option<Style>,
}

impl Span {
    /// Unstyled span.
    pub fn raw(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            style: None,
        }
    }

    /// Styled span.
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self {
            content: content.into(),
            style: Some(style),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        display_width(&self.content)
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl From<&str> for Span {
    fn from(s: &str) -> Self {
        Self::raw(s)
    }
}

impl From<String> for Span {
    fn from(s: String) -> Self {
        Self::raw(s)
    }
}

/// A single line made of spans.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    /// An empty line.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_spans(spans: impl IntoIterator<Item = Span>) -> Self {
        Self {
            spans: spans.into_iter().collect(),
        }
    }

    /// A line with one unstyled span.
    pub fn raw(content: impl Into<String>) -> Self {
        Self::from_spans([Span::raw(content)])
    }

    /// A line with one styled span.
    pub fn styled(content: impl Into<String>, style: Style) -> Self {
        Self::from_spans([Span::styled(content, style)])
    }

    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    pub fn push_span(&mut self, span: Span) {
        self.spans.push(span);
    }

    #[must_use]
    pub fn with_span(mut self, span: impl Into<Span>) -> Self {
        self.push_span(span.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(Span::is_empty)
    }

    /// Width in cells.
    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    pub fn to_plain_text(&self) -> String {
        self.spans.iter().map(Span::as_str).collect()
    }

    /// Cut the line to at most `max_width` cells.
    ///
    /// When an ellipsis is given and the line was too wide, the ellipsis
    /// replaces the trailing cells (unstyled, inheriting the span style).
    pub fn truncate(&mut self, max_width: usize, ellipsis: Option<&str>) {
        if self.width() <= max_width {
            return;
        }
        let ellipsis = ellipsis.unwrap_or("");
        let ellipsis_width = display_width(ellipsis);
        let budget = if ellipsis_width <= max_width {
            max_width - ellipsis_width
        } else {
            max_width
        };

        let mut used = 0usize;
        let mut kept = Vec::with_capacity(self.spans.len());
        for span in self.spans.drain(..) {
            if used >= budget {
                break;
            }
            let mut content = String::new();
            for g in span.content.graphemes(true) {
                let w = grapheme_width(g);
                if used + w > budget {
                    used = budget;
                    break;
                }
                used += w;
                content.push_str(g);
            }
            kept.push(Span {
                content,
                style: span.style,
            });
        }
        if ellipsis_width <= max_width && !ellipsis.is_empty() {
            let style = kept.last().and_then(|s| s.style);
            kept.push(Span {
                content: ellipsis.to_string(),
                style,
            });
        }
        self.spans = kept;
    }

}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::raw(s)
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::raw(s)
    }
}

impl From<Span> for Line {
    fn from(span: Span) -> Self {
        Self::from_spans([span])
    }
}
