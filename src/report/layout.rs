//! Page layout for the report: every line is measured, wrapped to the text
//! block width and placed on a page, starting a new page when the next line
//! would cross the bottom break margin.
//!
//! Coordinates are millimetres from the top-left corner of the page; the PDF
//! renderer flips them.

use super::compose::{Report, ASSUMPTIONS_HEADING, REPORT_TITLE, TRANSCRIPT_HEADING};
use super::metrics::{
    char_width_units, mm_per_unit, text_width_mm, text_width_units, FontFace, MM_PER_PT,
};

/// Vertical gap before each section heading.
const SECTION_GAP_MM: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size_pt: f32,
}

pub const TITLE_STYLE: TextStyle = TextStyle { face: FontFace::HelveticaBold, size_pt: 16.0 };
pub const FIELD_STYLE: TextStyle = TextStyle { face: FontFace::Helvetica, size_pt: 12.0 };
pub const HEADING_STYLE: TextStyle = TextStyle { face: FontFace::HelveticaBold, size_pt: 14.0 };
pub const BODY_STYLE: TextStyle = TextStyle { face: FontFace::Helvetica, size_pt: 10.0 };

/// Page size, margins and line metrics, all in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    pub margin_top_mm: f32,
    /// Distance from the bottom edge at which a new page is started.
    pub break_margin_mm: f32,
    pub line_height_mm: f32,
    /// Inner padding on each side of a text line.
    pub cell_padding_mm: f32,
}

impl Default for PageGeometry {
    /// A4 portrait.
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_left_mm: 10.0,
            margin_right_mm: 10.0,
            margin_top_mm: 10.0,
            break_margin_mm: 15.0,
            line_height_mm: 10.0,
            cell_padding_mm: 1.0,
        }
    }
}

impl PageGeometry {
    /// Width between the side margins.
    pub fn block_width(&self) -> f32 {
        self.width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Width available to text once cell padding is removed.
    pub fn text_width(&self) -> f32 {
        self.block_width() - 2.0 * self.cell_padding_mm
    }

    fn break_trigger(&self) -> f32 {
        self.height_mm - self.break_margin_mm
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub style: TextStyle,
    pub x_mm: f32,
    /// Baseline position measured from the top edge.
    pub baseline_mm: f32,
    /// Top of the line box measured from the top edge.
    pub top_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PlacedText>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

struct Cursor {
    geometry: PageGeometry,
    pages: Vec<Page>,
    y: f32,
}

impl Cursor {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            y: geometry.margin_top_mm,
        }
    }

    fn current_page(&mut self) -> &mut Page {
        // `pages` is never empty
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn gap(&mut self, mm: f32) {
        self.y += mm;
    }

    fn ensure_room(&mut self, height: f32) {
        let page_has_content = !self.current_page().items.is_empty();
        if self.y + height > self.geometry.break_trigger() && page_has_content {
            self.pages.push(Page::default());
            self.y = self.geometry.margin_top_mm;
        }
    }

    /// Place one logical line, wrapping it over as many rows as needed.
    fn paragraph(&mut self, text: &str, style: TextStyle, align: Align) {
        let g = self.geometry;
        for row in wrap_to_width(text, style.face, style.size_pt, g.text_width()) {
            self.ensure_room(g.line_height_mm);

            let width = text_width_mm(style.face, style.size_pt, &row);
            let x_mm = match align {
                Align::Left => g.margin_left_mm + g.cell_padding_mm,
                Align::Center => g.margin_left_mm + (g.block_width() - width) / 2.0,
            };
            let baseline_mm = self.y + 0.5 * g.line_height_mm + 0.3 * style.size_pt * MM_PER_PT;
            let top_mm = self.y;

            self.current_page().items.push(PlacedText {
                text: row,
                style,
                x_mm,
                baseline_mm,
                top_mm,
            });
            self.y += g.line_height_mm;
        }
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}

/// Lay out the whole report: title, fields, transcript, assumptions.
pub fn layout_report(report: &Report, geometry: &PageGeometry) -> Vec<Page> {
    let mut cursor = Cursor::new(*geometry);

    cursor.paragraph(REPORT_TITLE, TITLE_STYLE, Align::Center);

    for (label, value) in report.fields.entries() {
        let line = sanitize_for_builtin_font(&format!("{label}: {value}"));
        cursor.paragraph(&line, FIELD_STYLE, Align::Left);
    }

    cursor.gap(SECTION_GAP_MM);
    cursor.paragraph(TRANSCRIPT_HEADING, HEADING_STYLE, Align::Left);
    for line in &report.transcript_lines {
        let line = sanitize_for_builtin_font(line.trim());
        if !line.is_empty() {
            cursor.paragraph(&line, BODY_STYLE, Align::Left);
        }
    }

    cursor.gap(SECTION_GAP_MM);
    cursor.paragraph(ASSUMPTIONS_HEADING, HEADING_STYLE, Align::Left);
    for line in report.diagnosis.lines() {
        let line = sanitize_for_builtin_font(line.trim());
        if !line.is_empty() {
            cursor.paragraph(&line, BODY_STYLE, Align::Left);
        }
    }

    cursor.finish()
}

/// Greedy word wrap against real glyph widths.
///
/// Words are kept whole when they fit; a word wider than `max_width_mm` on
/// its own is split between characters. Whitespace runs collapse to single
/// spaces and break points drop the space. Blank input gives no rows.
pub fn wrap_to_width(text: &str, face: FontFace, size_pt: f32, max_width_mm: f32) -> Vec<String> {
    // Integer glyph units keep the fit test exact; widths are additive.
    let max_units = (max_width_mm / mm_per_unit(size_pt)).floor().max(0.0) as u32;
    let space_units = text_width_units(face, " ");

    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_units = 0u32;

    for word in text.split_whitespace() {
        let word_units = text_width_units(face, word);
        let joined_units = if current.is_empty() {
            word_units
        } else {
            current_units + space_units + word_units
        };

        if joined_units <= max_units {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            current_units = joined_units;
            continue;
        }

        if !current.is_empty() {
            rows.push(std::mem::take(&mut current));
            current_units = 0;
        }

        if word_units <= max_units {
            current.push_str(word);
            current_units = word_units;
            continue;
        }

        for c in word.chars() {
            let char_units = u32::from(char_width_units(face, c));
            if current_units + char_units > max_units && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                current_units = 0;
            }
            current.push(c);
            current_units += char_units;
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }
    rows
}

/// Map text onto what the base-14 fonts can draw: typographic punctuation
/// becomes ASCII, control characters become spaces, and anything outside
/// Latin-1 becomes `?`.
pub fn sanitize_for_builtin_font(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' => out.push('\''),
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => out.push('"'),
            '\u{2010}'..='\u{2015}' | '\u{2212}' => out.push('-'),
            '\u{2022}' => out.push('*'),
            '\u{2026}' => out.push_str("..."),
            '\u{00A0}' => out.push(' '),
            c if c.is_control() => out.push(' '),
            c if (c as u32) <= 0xFF => out.push(c),
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_positional;
    use crate::models::{Message, SummaryFields};
    use crate::report::compose::ExtractedFields;

    const EPSILON_MM: f32 = 1e-3;

    fn report_with(transcript_lines: Vec<String>, diagnosis: &str) -> Report {
        let fields = ExtractedFields::merge(
            "Ana".into(),
            &SummaryFields::default(),
            &extract_positional(&[Message::user("fever")]),
        );
        Report {
            fields,
            transcript_lines,
            diagnosis: diagnosis.into(),
        }
    }

    fn all_items(pages: &[Page]) -> Vec<&PlacedText> {
        pages.iter().flat_map(|p| p.items.iter()).collect()
    }

    #[test]
    fn short_text_stays_on_one_row() {
        let rows = wrap_to_width("User: fever", FontFace::Helvetica, 10.0, 188.0);
        assert_eq!(rows, vec!["User: fever"]);
    }

    #[test]
    fn long_line_wraps_within_width_without_losing_words() {
        let text = "AI: ".to_string()
            + &"Please describe how the pain has changed over the last few days ".repeat(8);
        let width = PageGeometry::default().text_width();
        let rows = wrap_to_width(&text, FontFace::Helvetica, 10.0, width);

        assert!(rows.len() > 1);
        for row in &rows {
            assert!(text_width_mm(FontFace::Helvetica, 10.0, row) <= width + EPSILON_MM);
        }
        let rejoined: Vec<&str> = rows.iter().flat_map(|r| r.split_whitespace()).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }

    #[test]
    fn overlong_word_splits_by_character() {
        let token = "x".repeat(400);
        let rows = wrap_to_width(&token, FontFace::Helvetica, 10.0, 50.0);
        assert!(rows.len() > 1);
        for row in &rows {
            assert!(text_width_mm(FontFace::Helvetica, 10.0, row) <= 50.0 + EPSILON_MM);
        }
        assert_eq!(rows.concat(), token);
    }

    #[test]
    fn accented_capitals_wrap_at_their_drawn_width() {
        // Helvetica AFM: Ö = 778, Æ = 1000.
        let afm_mm = |row: &str| {
            let units: u32 = row
                .chars()
                .map(|c| match c {
                    'Ö' => 778,
                    'Æ' => 1000,
                    other => panic!("unexpected glyph {other:?}"),
                })
                .sum();
            units as f32 * 10.0 * MM_PER_PT / 1000.0
        };

        let width = PageGeometry::default().text_width();
        let token = "ÖÆ".repeat(200);
        let rows = wrap_to_width(&token, FontFace::Helvetica, 10.0, width);

        assert!(rows.len() > 1);
        for row in &rows {
            assert!(afm_mm(row) <= width + EPSILON_MM, "{} > {width}", afm_mm(row));
        }
        assert_eq!(rows.concat(), token);
    }

    #[test]
    fn accented_words_keep_bold_rows_inside_width() {
        let text = "Ærøskøbing Öland Évora Ñuñoa ".repeat(20);
        let rows = wrap_to_width(&text, FontFace::HelveticaBold, 14.0, 120.0);
        assert!(rows.len() > 1);
        for row in &rows {
            assert!(text_width_mm(FontFace::HelveticaBold, 14.0, row) <= 120.0 + EPSILON_MM);
        }
    }

    #[test]
    fn blank_text_produces_no_rows() {
        assert!(wrap_to_width("   ", FontFace::Helvetica, 10.0, 100.0).is_empty());
    }

    #[test]
    fn sanitize_maps_typographic_punctuation() {
        assert_eq!(sanitize_for_builtin_font("It’s “bad” — really…"), "It's \"bad\" - really...");
        assert_eq!(sanitize_for_builtin_font("café"), "café");
        assert_eq!(sanitize_for_builtin_font("发烧"), "??");
    }

    #[test]
    fn report_sections_in_order() {
        let report = report_with(vec!["AI: Hello!".into(), "User: fever".into()], "Likely flu.");
        let pages = layout_report(&report, &PageGeometry::default());
        let texts: Vec<&str> = all_items(&pages).iter().map(|i| i.text.as_str()).collect();

        assert_eq!(texts[0], REPORT_TITLE);
        assert_eq!(texts[1], "Patient Name: Ana");
        assert_eq!(texts[2], "Symptoms: fever");
        assert_eq!(texts[5], "Additional Info: Not specified");
        assert_eq!(texts[6], TRANSCRIPT_HEADING);
        assert_eq!(&texts[7..9], &["AI: Hello!", "User: fever"]);
        assert_eq!(texts[9], ASSUMPTIONS_HEADING);
        assert_eq!(texts[10], "Likely flu.");
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn title_is_centered() {
        let geometry = PageGeometry::default();
        let pages = layout_report(&report_with(vec![], ""), &geometry);
        let title = &pages[0].items[0];
        let width = text_width_mm(TITLE_STYLE.face, TITLE_STYLE.size_pt, &title.text);
        let left_gap = title.x_mm;
        let right_gap = geometry.width_mm - (title.x_mm + width);
        assert!((left_gap - right_gap).abs() < 0.01);
    }

    #[test]
    fn blank_transcript_lines_skipped() {
        let report = report_with(vec!["AI: Hi".into(), "   ".into(), String::new()], "");
        let pages = layout_report(&report, &PageGeometry::default());
        let texts: Vec<&str> = all_items(&pages).iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts.iter().filter(|t| t.trim().is_empty()).count(), 0);
        assert!(texts.contains(&"AI: Hi"));
    }

    #[test]
    fn overflow_starts_new_pages_inside_margins() {
        let lines: Vec<String> = (0..80).map(|i| format!("User: answer number {i}")).collect();
        let geometry = PageGeometry::default();
        let pages = layout_report(&report_with(lines, "Likely flu."), &geometry);

        assert!(pages.len() >= 3);
        for item in all_items(&pages) {
            assert!(item.top_mm >= geometry.margin_top_mm);
            assert!(item.top_mm + geometry.line_height_mm <= geometry.height_mm - geometry.break_margin_mm);
            let right = item.x_mm + text_width_mm(item.style.face, item.style.size_pt, &item.text);
            assert!(right <= geometry.width_mm - geometry.margin_right_mm + EPSILON_MM);
        }
        for page in &pages {
            assert!(!page.items.is_empty());
            assert_eq!(page.items[0].top_mm, geometry.margin_top_mm);
        }
    }

    #[test]
    fn long_field_value_is_wrapped() {
        let mut report = report_with(vec![], "");
        report.fields.symptoms = "very ".repeat(60);
        let geometry = PageGeometry::default();
        let pages = layout_report(&report, &geometry);
        let field_rows = pages[0]
            .items
            .iter()
            .filter(|i| i.style == FIELD_STYLE && i.text.contains("very"))
            .count();
        assert!(field_rows > 1);
    }

    #[test]
    fn multi_line_diagnosis_split_into_rows() {
        let report = report_with(vec![], "Possible influenza.\n\nReason: fever and aches.");
        let pages = layout_report(&report, &PageGeometry::default());
        let texts: Vec<&str> = all_items(&pages).iter().map(|i| i.text.as_str()).collect();
        let n = texts.len();
        assert_eq!(&texts[n - 2..], &["Possible influenza.", "Reason: fever and aches."]);
    }
}
