use strum_macros::{Display, EnumIter};

/// The four Helvetica faces the invoice is set in. All of them are PDF
/// base-14 fonts, so nothing is embedded in the output file and the
/// widths below are the standard Adobe metrics.
#[derive(Display, EnumIter, Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Font {
    #[strum(serialize = "Helvetica")]
    Regular,
    #[strum(serialize = "Helvetica-Bold")]
    Bold,
    #[strum(serialize = "Helvetica-Oblique")]
    Oblique,
    #[strum(serialize = "Helvetica-BoldOblique")]
    BoldOblique,
}

impl Font {
    /// Name of this face in the page's font resource dictionary.
    pub fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
            Font::Oblique => "F3",
            Font::BoldOblique => "F4",
        }
    }

    // The oblique faces share their upright metrics.
    fn widths(&self) -> &'static [u16; 95] {
        match self {
            Font::Regular | Font::Oblique => &REGULAR_WIDTHS,
            Font::Bold | Font::BoldOblique => &BOLD_WIDTHS,
        }
    }

    fn advance(&self, c: char) -> u16 {
        match u32::from(c) {
            cp @ 0x20..=0x7e => self.widths()[(cp - 0x20) as usize],
            // WinAnsi glyphs outside ASCII get a nominal width.
            _ => self.widths()[(b'a' - 0x20) as usize],
        }
    }

    /// Width of `text` in points when set at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 =
            text.chars().map(|c| u32::from(self.advance(c))).sum();
        units as f32 * size / 1000.0
    }
}

/// Encode for a text-showing operator under WinAnsiEncoding. Characters
/// with no WinAnsi code point become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='\u{7e}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        '\u{2c6}' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '\u{2dc}' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        '\u{a0}'..='\u{ff}' => c as u8,
        _ => b'?',
    }
}

// Advance widths for ASCII 0x20..=0x7e in thousandths of an em.
#[rustfmt::skip]
const REGULAR_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191,
    333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556,
    556, 556,
    // : ; < = > ? @
    278, 278, 584, 584, 584, 556, 1015,
    // A-Z
    667, 667, 722, 722, 667, 611, 778, 722,
    278, 500, 667, 556, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667,
    667, 611,
    // [ \ ] ^ _ `
    278, 278, 278, 469, 556, 333,
    // a-z
    556, 556, 500, 556, 556, 278, 556, 556,
    222, 222, 500, 222, 833, 556, 556, 556,
    556, 333, 500, 278, 556, 500, 722, 500,
    500, 500,
    // { | } ~
    334, 260, 334, 584,
];

#[rustfmt::skip]
const BOLD_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 333, 474, 556, 556, 889, 722, 238,
    333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9
    556, 556, 556, 556, 556, 556, 556, 556,
    556, 556,
    // : ; < = > ? @
    333, 333, 584, 584, 584, 611, 975,
    // A-Z
    722, 722, 722, 722, 667, 611, 778, 722,
    278, 556, 722, 611, 833, 722, 778, 667,
    778, 722, 667, 611, 722, 667, 944, 667,
    667, 611,
    // [ \ ] ^ _ `
    333, 278, 333, 584, 556, 333,
    // a-z
    556, 611, 556, 611, 556, 333, 611, 611,
    278, 278, 556, 278, 889, 611, 611, 611,
    611, 389, 556, 333, 611, 556, 778, 556,
    556, 500,
    // { | } ~
    389, 280, 389, 584,
];
