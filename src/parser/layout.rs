//! Layout analysis for PDF pages.
//!
//! Decodes a page content stream into positioned text spans, groups spans
//! sharing a baseline into lines, and lines into blocks separated by vertical
//! gaps, font size changes or indentation. Positions are only used here, to
//! rebuild text containers; the classifier never sees them.

use lopdf::{Dictionary, Document as LopdfDocument, Object, ObjectId};

use crate::error::{Error, Result};

/// Average glyph width as a fraction of the font size, used to estimate span widths.
const GLYPH_WIDTH_RATIO: f32 = 0.5;

/// TJ adjustment (thousandths of an em) above which a word space is assumed.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// A text span with position and size.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Estimated width of the text
    pub width: f32,
    /// Font size in points
    pub font_size: f32,
}

impl TextSpan {
    /// Create a span, estimating its width from the character count.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32) -> Self {
        let text = text.into();
        let width = estimate_width(&text, font_size);
        Self {
            text,
            x,
            y,
            width,
            font_size,
        }
    }

    fn end(&self) -> f32 {
        self.x + self.width
    }
}

/// Spans sharing a baseline, sorted left to right.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line
    pub spans: Vec<TextSpan>,
    /// Y position (baseline)
    pub y: f32,
    /// Leftmost X position
    pub x: f32,
    /// Dominant font size, weighted by text length
    pub font_size: f32,
}

impl TextLine {
    /// Create a line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        let (y, x) = spans.first().map(|s| (s.y, s.x)).unwrap_or((0.0, 0.0));
        let total_chars: usize = spans.iter().map(|s| s.text.len()).sum();
        let font_size = if total_chars > 0 {
            spans
                .iter()
                .map(|s| s.font_size * s.text.len() as f32)
                .sum::<f32>()
                / total_chars as f32
        } else {
            spans.first().map(|s| s.font_size).unwrap_or(0.0)
        };

        Self {
            spans,
            y,
            x,
            font_size,
        }
    }

    /// Combined text of the spans, with a space wherever two spans are
    /// separated by a visible gap.
    pub fn text(&self) -> String {
        let mut result = String::new();
        let mut prev: Option<&TextSpan> = None;

        for span in &self.spans {
            if let Some(prev) = prev {
                let gap = span.x - prev.end();
                let threshold = span.font_size * GLYPH_WIDTH_RATIO * 0.2;
                let joined_by_space = prev.text.ends_with(char::is_whitespace)
                    || span.text.starts_with(char::is_whitespace);
                let spaceless = matches!(
                    (prev.text.chars().last(), span.text.chars().next()),
                    (Some(a), Some(b)) if is_spaceless_script_char(a) && is_spaceless_script_char(b)
                );
                if gap > threshold && !joined_by_space && !spaceless {
                    result.push(' ');
                }
            }
            result.push_str(&span.text);
            prev = Some(span);
        }

        result
    }
}

/// Consecutive lines forming one text container.
#[derive(Debug, Clone)]
pub struct TextBlock {
    /// The lines in this block, top to bottom
    pub lines: Vec<TextLine>,
}

impl TextBlock {
    /// Block text: one line of text per line, each terminated by `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(&line.text());
            text.push('\n');
        }
        text
    }

    /// Check if the block has no visible text.
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(|l| l.text().trim().is_empty())
    }
}

/// Text spans and XObject placements decoded from one page.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// Text spans in content stream order
    pub spans: Vec<TextSpan>,
    /// Names of XObjects painted with `Do`
    pub xobjects: Vec<String>,
}

/// Decodes page content streams of a loaded document.
pub struct LayoutAnalyzer<'a> {
    doc: &'a LopdfDocument,
    block_gap_ratio: f32,
}

impl<'a> LayoutAnalyzer<'a> {
    /// Create a new layout analyzer.
    pub fn new(doc: &'a LopdfDocument, block_gap_ratio: f32) -> Self {
        Self {
            doc,
            block_gap_ratio,
        }
    }

    /// Decode a page into text blocks (in reading order) and painted XObjects.
    pub fn analyze_page(&self, page_id: ObjectId) -> Result<(Vec<TextBlock>, Vec<String>)> {
        let content = self.extract_page_content(page_id)?;
        let lines = group_spans_into_lines(content.spans);
        let blocks = group_lines_into_blocks(lines, self.block_gap_ratio);
        Ok((blocks, content.xobjects))
    }

    /// Decode the content stream of a page into spans, using the page's font
    /// encodings where lopdf can resolve them.
    pub fn extract_page_content(&self, page_id: ObjectId) -> Result<PageContent> {
        let fonts = self
            .doc
            .get_page_fonts(page_id)
            .map_err(|e| Error::PdfParse(e.to_string()))?;
        let data = self
            .doc
            .get_page_content(page_id)
            .map_err(|e| Error::TextExtract(e.to_string()))?;
        let content = lopdf::content::Content::decode(&data)
            .map_err(|e| Error::TextExtract(e.to_string()))?;

        let mut state = TextState::default();
        let mut page = PageContent::default();
        let mut font: Option<&Dictionary> = None;

        for op in &content.operations {
            let operands = &op.operands;
            match op.operator.as_str() {
                "BT" => {
                    state.in_text = true;
                    state.matrix = TextMatrix::default();
                }
                "ET" => state.in_text = false,
                "Tf" => {
                    if let [Object::Name(name), size, ..] = operands.as_slice() {
                        font = fonts.get(name).copied();
                        state.font_size = get_number(size).unwrap_or(12.0);
                    }
                }
                "TL" => {
                    if let Some(leading) = operands.first().and_then(get_number) {
                        state.leading = leading;
                    }
                }
                "Td" | "TD" => {
                    if let [tx, ty, ..] = operands.as_slice() {
                        let tx = get_number(tx).unwrap_or(0.0);
                        let ty = get_number(ty).unwrap_or(0.0);
                        if op.operator == "TD" {
                            state.leading = -ty;
                        }
                        state.matrix.translate(tx, ty);
                    }
                }
                "Tm" => {
                    if operands.len() >= 6 {
                        let n: Vec<f32> = operands[..6]
                            .iter()
                            .map(|o| get_number(o).unwrap_or(0.0))
                            .collect();
                        state.matrix.set([n[0], n[1], n[2], n[3], n[4], n[5]]);
                    }
                }
                "T*" => state.matrix.translate(0.0, -state.leading),
                "Tj" => {
                    if let Some(Object::String(bytes, _)) = operands.first() {
                        let text = self.decode(font, bytes);
                        state.show(text, &mut page.spans);
                    }
                }
                "TJ" => {
                    if let Some(Object::Array(items)) = operands.first() {
                        let text = self.decode_array(font, items);
                        state.show(text, &mut page.spans);
                    }
                }
                "'" | "\"" => {
                    state.matrix.translate(0.0, -state.leading);
                    let index = if op.operator == "\"" { 2 } else { 0 };
                    if let Some(Object::String(bytes, _)) = operands.get(index) {
                        let text = self.decode(font, bytes);
                        state.show(text, &mut page.spans);
                    }
                }
                "Do" => {
                    if let Some(Object::Name(name)) = operands.first() {
                        page.xobjects.push(String::from_utf8_lossy(name).into_owned());
                    }
                }
                _ => {}
            }
        }

        Ok(page)
    }

    fn decode(&self, font: Option<&Dictionary>, bytes: &[u8]) -> String {
        font.and_then(|f| f.get_font_encoding(self.doc).ok())
            .and_then(|enc| LopdfDocument::decode_text(&enc, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }

    /// Decode a TJ array. Large negative adjustments become word spaces.
    fn decode_array(&self, font: Option<&Dictionary>, items: &[Object]) -> String {
        let mut combined = String::new();
        for item in items {
            match item {
                Object::String(bytes, _) => combined.push_str(&self.decode(font, bytes)),
                other => {
                    let Some(adjustment) = get_number(other) else {
                        continue;
                    };
                    let needs_space = -adjustment > TJ_SPACE_THRESHOLD
                        && combined
                            .chars()
                            .last()
                            .is_some_and(|c| !c.is_whitespace() && !is_spaceless_script_char(c));
                    if needs_space {
                        combined.push(' ');
                    }
                }
            }
        }
        combined
    }
}

/// Group spans into lines by baseline, top of the page first.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    // PDF y grows upwards
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    lines
}

/// Group lines into blocks. A new block starts after a gap larger than
/// `gap_ratio` times the average line spacing, on a font size change of more
/// than one point, or when the left margin moves by more than 20 points.
pub fn group_lines_into_blocks(lines: Vec<TextLine>, gap_ratio: f32) -> Vec<TextBlock> {
    let avg_spacing = average_line_spacing(&lines);
    let mut blocks = Vec::new();
    let mut current: Vec<TextLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            let spacing = (prev.y - line.y).abs();
            let breaks = spacing > avg_spacing * gap_ratio
                || (prev.font_size - line.font_size).abs() > 1.0
                || (prev.x - line.x).abs() > 20.0;
            if breaks {
                blocks.push(TextBlock {
                    lines: std::mem::take(&mut current),
                });
            }
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(TextBlock { lines: current });
    }

    blocks.retain(|b| !b.is_empty());
    blocks
}

fn average_line_spacing(lines: &[TextLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        12.0
    } else {
        spacings.iter().sum::<f32>() / spacings.len() as f32
    }
}

/// Text state tracked between BT and ET.
#[derive(Debug, Clone)]
struct TextState {
    matrix: TextMatrix,
    font_size: f32,
    leading: f32,
    in_text: bool,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            matrix: TextMatrix::default(),
            font_size: 12.0,
            leading: 12.0,
            in_text: false,
        }
    }
}

impl TextState {
    /// Record shown text at the current position and advance past it.
    fn show(&mut self, text: String, spans: &mut Vec<TextSpan>) {
        if !self.in_text {
            return;
        }
        let advance = estimate_width(&text, self.font_size);
        if !text.trim().is_empty() {
            let (x, y) = self.matrix.position();
            let size = self.font_size * self.matrix.vertical_scale();
            spans.push(TextSpan::new(text, x, y, size));
        }
        self.matrix.advance(advance);
    }
}

/// Text matrix and text line matrix.
#[derive(Debug, Clone)]
struct TextMatrix {
    m: [f32; 6],
    line_origin: (f32, f32),
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
            line_origin: (0.0, 0.0),
        }
    }
}

impl TextMatrix {
    fn set(&mut self, m: [f32; 6]) {
        self.m = m;
        self.line_origin = (m[4], m[5]);
    }

    /// Move to the start of the next line, offset from the current line start.
    fn translate(&mut self, tx: f32, ty: f32) {
        let [a, b, c, d, ..] = self.m;
        let (e, f) = self.line_origin;
        self.line_origin = (e + tx * a + ty * c, f + tx * b + ty * d);
        self.m[4] = self.line_origin.0;
        self.m[5] = self.line_origin.1;
    }

    /// Move along the current line.
    fn advance(&mut self, dx: f32) {
        self.m[4] += dx * self.m[0];
        self.m[5] += dx * self.m[1];
    }

    fn position(&self) -> (f32, f32) {
        (self.m[4], self.m[5])
    }

    fn vertical_scale(&self) -> f32 {
        (self.m[2] * self.m[2] + self.m[3] * self.m[3]).sqrt()
    }
}

fn estimate_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * GLYPH_WIDTH_RATIO
}

fn get_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

/// Characters from scripts written without spaces between words
/// (Han ideographs, kana, CJK punctuation). Hangul uses spaces.
fn is_spaceless_script_char(c: char) -> bool {
    matches!(c as u32,
        0x3000..=0x303F
        | 0x3040..=0x309F
        | 0x30A0..=0x30FF
        | 0x3400..=0x4DBF
        | 0x4E00..=0x9FFF
        | 0x20000..=0x2EBEF)
}

/// Decode string bytes when no font encoding is available:
/// UTF-16BE with BOM, then UTF-8, then Latin-1.
pub fn decode_text_simple(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&[0xFE, 0xFF]) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        return String::from_utf16_lossy(&units);
    }

    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(text: &str, x: f32, y: f32, size: f32) -> TextLine {
        TextLine::from_spans(vec![TextSpan::new(text, x, y, size)])
    }

    #[test]
    fn test_spans_on_one_baseline_form_a_line() {
        let spans = vec![
            TextSpan::new("World", 110.0, 700.5, 10.0),
            TextSpan::new("Hello", 72.0, 700.0, 10.0),
            TextSpan::new("Below", 72.0, 680.0, 10.0),
        ];
        let lines = group_spans_into_lines(spans);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text(), "Hello World");
        assert_eq!(lines[1].text(), "Below");
    }

    #[test]
    fn test_adjacent_spans_not_split() {
        // "Hel" ends at 72 + 3 * 5 = 87
        let line = TextLine::from_spans(vec![
            TextSpan::new("Hel", 72.0, 700.0, 10.0),
            TextSpan::new("lo", 87.0, 700.0, 10.0),
        ]);
        assert_eq!(line.text(), "Hello");
    }

    #[test]
    fn test_cjk_spans_not_spaced() {
        let line = TextLine::from_spans(vec![
            TextSpan::new("日本", 72.0, 700.0, 10.0),
            TextSpan::new("語", 200.0, 700.0, 10.0),
        ]);
        assert_eq!(line.text(), "日本語");
    }

    #[test]
    fn test_blocks_split_on_large_gap() {
        let lines = vec![
            line("Parsing Forms", 72.0, 700.0, 10.0),
            line("is a chore", 72.0, 686.0, 10.0),
            line("for most", 72.0, 672.0, 10.0),
            line("Second block", 72.0, 600.0, 10.0),
        ];
        let blocks = group_lines_into_blocks(lines, 1.5);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text(), "Parsing Forms\nis a chore\nfor most\n");
        assert_eq!(blocks[1].text(), "Second block\n");
    }

    #[test]
    fn test_blocks_split_on_font_size_and_indent() {
        let lines = vec![
            line("Big Title", 72.0, 700.0, 18.0),
            line("body text", 72.0, 690.0, 10.0),
            line("indented", 120.0, 680.0, 10.0),
        ];
        let blocks = group_lines_into_blocks(lines, 1.5);
        assert_eq!(blocks.len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(group_spans_into_lines(Vec::new()).is_empty());
        assert!(group_lines_into_blocks(Vec::new(), 1.5).is_empty());
    }

    #[test]
    fn test_text_matrix_lines() {
        let mut m = TextMatrix::default();
        m.set([1.0, 0.0, 0.0, 1.0, 72.0, 700.0]);
        m.advance(50.0);
        assert_eq!(m.position(), (122.0, 700.0));
        // next line starts from the line origin, not the advanced position
        m.translate(0.0, -14.0);
        assert_eq!(m.position(), (72.0, 686.0));
    }

    #[test]
    fn test_show_outside_text_object_ignored() {
        let mut state = TextState::default();
        let mut spans = Vec::new();
        state.show("stray".to_string(), &mut spans);
        assert!(spans.is_empty());

        state.in_text = true;
        state.show("kept".to_string(), &mut spans);
        state.show("   ".to_string(), &mut spans);
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn test_decode_text_simple() {
        assert_eq!(decode_text_simple(b"Hello"), "Hello");
        assert_eq!(decode_text_simple(&[0x48, 0x65, 0x6C, 0x6C, 0xE9]), "Hellé");
        assert_eq!(decode_text_simple(&[0xFE, 0xFF, 0x00, 0x48, 0x00, 0x69]), "Hi");
    }
}
