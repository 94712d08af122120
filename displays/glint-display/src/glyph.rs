//! Character code to glyph index resolution

use crate::font::Font;

/// Resolve a character code to a glyph index
///
/// Codes inside the font's base range map to `code - ' '` without touching
/// the special table. Anything past it is looked up in the special table,
/// first match wins. Returns `None` for control codes, unknown codes and
/// table entries pointing outside the font.
pub fn resolve(font: &Font<'_>, code: u8) -> Option<u8> {
    let offset = code.checked_sub(b' ')?;

    let index = if offset < font.base_len() {
        offset
    } else {
        font.specials()
            .iter()
            .find(|entry| entry.code == code)?
            .glyph
    };

    font.glyph(index).map(|_| index)
}
