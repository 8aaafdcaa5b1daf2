//! Glyph advance widths for the PDF base-14 Helvetica faces.
//!
//! Units are 1/1000 of the font size (standard AFM metrics). Covers printable
//! ASCII and the Latin-1 supplement (U+00A0..=U+00FF) as drawn through
//! WinAnsiEncoding; anything else is measured at the digit width.

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const FALLBACK_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Helvetica,
    HelveticaBold,
}

const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

// U+00A0..=U+00FF
const HELVETICA_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

const HELVETICA_BOLD_LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

pub fn char_width_units(face: FontFace, c: char) -> u16 {
    let (ascii, latin1) = match face {
        FontFace::Helvetica => (&HELVETICA_WIDTHS, &HELVETICA_LATIN1_WIDTHS),
        FontFace::HelveticaBold => (&HELVETICA_BOLD_WIDTHS, &HELVETICA_BOLD_LATIN1_WIDTHS),
    };
    match c {
        ' '..='~' => ascii[c as usize - 0x20],
        '\u{A0}'..='\u{FF}' => latin1[c as usize - 0xA0],
        _ => FALLBACK_WIDTH,
    }
}

/// Unscaled width of `text` in 1/1000 font-size units.
pub fn text_width_units(face: FontFace, text: &str) -> u32 {
    text.chars().map(|c| u32::from(char_width_units(face, c))).sum()
}

/// Millimetres covered by one width unit at `size_pt`.
pub fn mm_per_unit(size_pt: f32) -> f32 {
    size_pt * MM_PER_PT / 1000.0
}

/// Rendered width of `text` in millimetres at `size_pt`.
pub fn text_width_mm(face: FontFace, size_pt: f32, text: &str) -> f32 {
    text_width_units(face, text) as f32 * mm_per_unit(size_pt)
}
