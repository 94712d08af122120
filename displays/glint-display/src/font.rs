//! Fixed-width glyph tables
//!
//! Glyphs are [`GLYPH_WIDTH`] column bytes, bit 0 at the top. A font holds a
//! contiguous base range starting at `' '` and an ordered table of special
//! characters that map other codes onto glyphs past the base range.

pub use crate::config::GLYPH_WIDTH;

/// One glyph: a vertical 8-pixel strip per column
pub type Glyph = [u8; GLYPH_WIDTH];

/// Glyph index that ends a sentinel-terminated special table
pub const SPECIAL_SENTINEL: u8 = 0xFF;

/// All-off glyph, used to erase a cell
pub const BLANK_GLYPH: Glyph = [0; GLYPH_WIDTH];

/// Character whose glyph index is not `code - ' '`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpecialChar {
    /// Input character code
    pub code: u8,
    /// Index into the font's glyphs
    pub glyph: u8,
}

impl SpecialChar {
    pub const fn new(code: u8, glyph: u8) -> Self {
        Self { code, glyph }
    }
}

/// Trim a sentinel-terminated special table to its entries
///
/// Tables exported for 8-bit targets end with an entry whose glyph index is
/// [`SPECIAL_SENTINEL`]. Everything from the sentinel on is dropped; a table
/// without one is returned whole.
pub const fn specials_until_sentinel(table: &[SpecialChar]) -> &[SpecialChar] {
    let mut end = 0;
    while end < table.len() && table[end].glyph != SPECIAL_SENTINEL {
        end += 1;
    }
    table.split_at(end).0
}

/// Read-only glyph table
#[derive(Debug, Clone, Copy)]
pub struct Font<'a> {
    glyphs: &'a [Glyph],
    base_len: u8,
    specials: &'a [SpecialChar],
}

impl<'a> Font<'a> {
    /// Create a font
    ///
    /// `base_len` glyphs starting at index 0 map `' '..' ' + base_len`
    /// directly. `specials` is searched in order for everything else.
    pub const fn new(glyphs: &'a [Glyph], base_len: u8, specials: &'a [SpecialChar]) -> Self {
        Self {
            glyphs,
            base_len,
            specials,
        }
    }

    /// Glyph bytes for an index
    pub fn glyph(&self, index: u8) -> Option<&'a Glyph> {
        self.glyphs.get(index as usize)
    }

    /// Length of the contiguous range starting at `' '`
    pub fn base_len(&self) -> u8 {
        self.base_len
    }

    /// Fallback table, in lookup order
    pub fn specials(&self) -> &'a [SpecialChar] {
        self.specials
    }

    /// Number of glyphs in the table
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// Built-in 6x8 font: printable ASCII plus a few Latin-1 characters
pub static FONT_6X8: Font<'static> = Font::new(
    &GLYPHS_6X8,
    ASCII_GLYPHS,
    specials_until_sentinel(SPECIALS_6X8),
);

/// Printable ASCII, `' '..='~'`
const ASCII_GLYPHS: u8 = 95;

/// Latin-1 codes drawn with the glyphs after the ASCII range
const SPECIALS_6X8: &[SpecialChar] = &[
    SpecialChar::new(0xDC, 95),  // Ü
    SpecialChar::new(0xD6, 96),  // Ö
    SpecialChar::new(0xC4, 97),  // Ä
    SpecialChar::new(0xFC, 98),  // ü
    SpecialChar::new(0xF6, 99),  // ö
    SpecialChar::new(0xE4, 100), // ä
    SpecialChar::new(0xDF, 101), // ß
    SpecialChar::new(0xB0, 102), // °
    SpecialChar::new(0xB5, 103), // µ
    SpecialChar::new(0x00, SPECIAL_SENTINEL),
];

static GLYPHS_6X8: [Glyph; 104] = [
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x00, 0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x00, 0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x00, 0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x00, 0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x00, 0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x00, 0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x00, 0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x00, 0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x00, 0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x00, 0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x00, 0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x00, 0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x00, 0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x00, 0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x00, 0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x00, 0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x00, 0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x00, 0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x00, 0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x00, 0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x00, 0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x00, 0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x00, 0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x00, 0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x00, 0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x00, 0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x00, 0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x00, 0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x00, 0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x00, 0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x00, 0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x00, 0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x00, 0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x00, 0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x00, 0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x00, 0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x00, 0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x00, 0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x00, 0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x00, 0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x00, 0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x00, 0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x00, 0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x00, 0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x00, 0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x00, 0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x00, 0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x00, 0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x00, 0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x00, 0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x00, 0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x00, 0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x00, 0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x00, 0x18, 0xA4, 0xA4, 0xA4, 0x7C], // g
    [0x00, 0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x00, 0x40, 0x80, 0x84, 0x7D, 0x00], // j
    [0x00, 0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x00, 0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x00, 0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x00, 0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x00, 0xFC, 0x24, 0x24, 0x24, 0x18], // p
    [0x00, 0x18, 0x24, 0x24, 0x18, 0xFC], // q
    [0x00, 0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x00, 0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x00, 0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x00, 0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x00, 0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x00, 0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x00, 0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x00, 0x1C, 0xA0, 0xA0, 0xA0, 0x7C], // y
    [0x00, 0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x00, 0x08, 0x04, 0x08, 0x10, 0x08], // ~
    [0x00, 0x3C, 0x41, 0x40, 0x41, 0x3C], // Ü
    [0x00, 0x38, 0x45, 0x44, 0x45, 0x38], // Ö
    [0x00, 0x78, 0x15, 0x14, 0x15, 0x78], // Ä
    [0x00, 0x3C, 0x41, 0x40, 0x21, 0x7C], // ü
    [0x00, 0x30, 0x4A, 0x48, 0x4A, 0x30], // ö
    [0x00, 0x20, 0x55, 0x54, 0x55, 0x78], // ä
    [0x00, 0x7E, 0x01, 0x49, 0x49, 0x36], // ß
    [0x00, 0x00, 0x06, 0x09, 0x09, 0x06], // °
    [0x00, 0xFC, 0x20, 0x20, 0x10, 0x3C], // µ
];
