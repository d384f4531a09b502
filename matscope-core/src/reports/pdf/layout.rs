//! Single-column paginated text layout
//!
//! Coordinates are millimetres measured from the top-left corner of an A4
//! page. A cursor tracks the current baseline; every block asks for the
//! space it needs first and starts a new page when the rest of the page is
//! too short.

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - MARGIN * 2.0;
/// Width reserved for metric labels before the value column starts
pub const LABEL_WIDTH: f32 = 115.0;

pub const TITLE_SIZE: f32 = 24.0;
pub const HEADING_SIZE: f32 = 16.0;
pub const BODY_SIZE: f32 = 10.0;
pub const SMALL_SIZE: f32 = 9.0;

const LINE_HEIGHT: f32 = 5.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BLACK: Rgb = Rgb(0, 0, 0);
pub const MUTED: Rgb = Rgb(102, 102, 102);
pub const ROW_FILL: Rgb = Rgb(245, 245, 245);

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text run; `y` is the baseline
    Text {
        x: f32,
        y: f32,
        text: String,
        size: f32,
        bold: bool,
        color: Rgb,
    },
    /// Filled rectangle; `y` is the top edge
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

/// Approximate Helvetica advance width in em units
fn glyph_em(ch: char) -> f32 {
    match ch {
        'i' | 'j' | 'l' | '\'' | '|' => 0.222,
        ' ' | 'f' | 't' | 'I' | '.' | ',' | ':' | ';' | '!' | '/' => 0.278,
        'r' | '(' | ')' | '-' => 0.333,
        'm' | 'M' => 0.833,
        'w' => 0.722,
        'W' => 0.944,
        '%' => 0.889,
        c if c.is_ascii_uppercase() => 0.667,
        _ => 0.556,
    }
}

/// Estimated rendered width of `text` in millimetres
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em: f32 = text.chars().map(glyph_em).sum();
    let weight = if bold { 1.06 } else { 1.0 };
    em * size * PT_TO_MM * weight
}

/// Greedy word wrap. Words wider than a whole line are split by character.
/// Always returns at least one line.
pub fn wrap_text(text: &str, max_width: f32, size: f32, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if text_width(&candidate, size, bold) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for ch in word.chars() {
            current.push(ch);
            if text_width(&current, size, bold) > max_width && current.chars().count() > 1 {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Pages of draw operations plus the write cursor
#[derive(Debug, Clone)]
pub struct PdfLayout {
    pages: Vec<Page>,
    cursor: f32,
}

impl Default for PdfLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfLayout {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            cursor: MARGIN,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    /// Start a new page unless `needed` millimetres still fit
    pub fn ensure_space(&mut self, needed: f32) {
        if self.cursor + needed > PAGE_HEIGHT - MARGIN {
            self.pages.push(Page::default());
            self.cursor = MARGIN;
        }
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn text(&mut self, x: f32, text: impl Into<String>, size: f32, bold: bool, color: Rgb) {
        let y = self.cursor;
        self.push(DrawOp::Text {
            x,
            y,
            text: text.into(),
            size,
            bold,
            color,
        });
    }

    /// Document title with a muted subtitle underneath
    pub fn title(&mut self, title: &str, subtitle: &str) {
        self.ensure_space(50.0);
        self.text(MARGIN, title, TITLE_SIZE, true, BLACK);
        self.cursor += 10.0;
        self.text(MARGIN, subtitle, BODY_SIZE, false, MUTED);
        self.cursor += 20.0;
    }

    pub fn heading(&mut self, title: &str) {
        self.ensure_space(30.0);
        self.text(MARGIN, title, HEADING_SIZE, true, BLACK);
        self.cursor += 10.0;
    }

    /// Shaded row: label on the left, bold value in the right-hand column.
    /// Both columns wrap and the row grows to fit the longer one.
    pub fn metric_row(&mut self, label: &str, value: &str) {
        let label_lines = wrap_text(label, LABEL_WIDTH - 10.0, BODY_SIZE, false);
        let value_lines = wrap_text(
            value,
            CONTENT_WIDTH - LABEL_WIDTH - 15.0,
            BODY_SIZE,
            true,
        );
        let line_count = label_lines.len().max(value_lines.len());
        let extra = (line_count.saturating_sub(1)) as f32 * LINE_HEIGHT;

        self.ensure_space(20.0 + extra);
        let top = self.cursor - 6.0;
        self.push(DrawOp::FillRect {
            x: MARGIN,
            y: top,
            width: CONTENT_WIDTH,
            height: 10.0 + extra,
            color: ROW_FILL,
        });

        let baseline = self.cursor;
        for (i, line) in label_lines.into_iter().enumerate() {
            self.cursor = baseline + i as f32 * LINE_HEIGHT;
            self.text(MARGIN + 5.0, line, BODY_SIZE, false, BLACK);
        }
        for (i, line) in value_lines.into_iter().enumerate() {
            self.cursor = baseline + i as f32 * LINE_HEIGHT;
            self.text(MARGIN + LABEL_WIDTH + 10.0, line, BODY_SIZE, true, BLACK);
        }
        self.cursor = baseline + 15.0 + extra;
    }

    /// Bold caption followed by wrapped free text; breaks pages per line
    pub fn paragraph(&mut self, caption: &str, body: &str) {
        self.ensure_space(20.0);
        self.text(MARGIN + 5.0, caption, BODY_SIZE, true, BLACK);
        self.cursor += 7.0;
        for line in wrap_text(body, CONTENT_WIDTH - 10.0, SMALL_SIZE, false) {
            self.ensure_space(LINE_HEIGHT);
            self.text(MARGIN + 5.0, line, SMALL_SIZE, false, BLACK);
            self.cursor += LINE_HEIGHT;
        }
        self.cursor += 5.0;
    }

    /// Every text run in document order
    pub fn texts(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages
            .iter()
            .flat_map(|p| p.ops.iter())
            .filter(|op| matches!(op, DrawOp::Text { .. }))
    }

    /// Section headings in document order
    pub fn headings(&self) -> Vec<&str> {
        self.texts()
            .filter_map(|op| match op {
                DrawOp::Text { text, size, .. } if *size == HEADING_SIZE => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text_single_line() {
        let lines = wrap_text("Oak Hardwood Flooring", 100.0, BODY_SIZE, false);
        assert_eq!(lines, vec!["Oak Hardwood Flooring"]);
    }

    #[test]
    fn test_wrap_empty_text_keeps_one_line() {
        assert_eq!(wrap_text("", 40.0, BODY_SIZE, false), vec![String::new()]);
    }

    #[test]
    fn test_wrap_respects_width() {
        let text = "Coastal Villa Renovation, Downtown Office Tower, Urban Apartment Complex";
        let lines = wrap_text(text, 40.0, SMALL_SIZE, false);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, SMALL_SIZE, false) <= 40.0);
        }
        assert_eq!(lines.join(" "), text);
    }

    #[test]
    fn test_wrap_splits_long_word() {
        let word = "W".repeat(60);
        let lines = wrap_text(&word, 30.0, BODY_SIZE, true);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }

    #[test]
    fn test_rows_break_onto_new_page() {
        let mut layout = PdfLayout::new();
        for i in 0..20 {
            layout.metric_row(&format!("Row {}", i), "value");
        }
        assert!(layout.pages().len() > 1);
        assert!(layout.cursor() <= PAGE_HEIGHT - MARGIN);

        for page in layout.pages() {
            for op in &page.ops {
                if let DrawOp::FillRect { y, height, .. } = op {
                    assert!(*y + *height <= PAGE_HEIGHT - MARGIN);
                }
            }
        }
    }

    #[test]
    fn test_metric_row_grows_for_wrapped_value() {
        let mut layout = PdfLayout::new();
        let start = layout.cursor();
        layout.metric_row("Label", "a value long enough to wrap over several lines");
        assert!(layout.cursor() - start > 15.0);

        let rect_height = layout.pages()[0]
            .ops
            .iter()
            .find_map(|op| match op {
                DrawOp::FillRect { height, .. } => Some(*height),
                _ => None,
            })
            .unwrap();
        assert!(rect_height > 10.0);
    }

    #[test]
    fn test_heading_moves_to_next_page_when_short() {
        let mut layout = PdfLayout::new();
        for _ in 0..16 {
            layout.metric_row("Filler", "1");
        }
        assert_eq!(layout.pages().len(), 1);
        assert!(PAGE_HEIGHT - MARGIN - layout.cursor() < 30.0);

        layout.heading("Pricing Analysis");
        assert_eq!(layout.pages().len(), 2);
        assert_eq!(layout.headings(), vec!["Pricing Analysis"]);
    }
}
