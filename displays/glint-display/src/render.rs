//! Glyph rendering
//!
//! Normal size copies a glyph's columns straight into one page. Double size
//! stretches each column over two pages: every source bit becomes two
//! vertical pixels ([`double_bits`]) and every column is sent twice, so a
//! 6x8 glyph lands as 12x16.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::address::encode_address;
use crate::config::{PanelConfig, GLYPH_WIDTH};
use crate::cursor::CursorPosition;
use crate::font::Glyph;
use crate::interface::DisplayInterface;

/// Glyph scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CharMode {
    /// 6x8, one page
    #[default]
    Normal,
    /// 12x16, two pages
    Double,
}

impl CharMode {
    /// Scale factor in both directions
    pub const fn scale(self) -> u8 {
        match self {
            CharMode::Normal => 1,
            CharMode::Double => 2,
        }
    }

    /// Width of one rendered glyph in pixel columns
    pub const fn advance(self) -> u8 {
        GLYPH_WIDTH as u8 * self.scale()
    }
}

/// Expand each bit of `byte` into two adjacent bits
///
/// Source bit `j` lands on bits `2j` and `2j + 1`. The low byte is the top
/// half of the stretched column, the high byte the bottom half.
pub const fn double_bits(byte: u8) -> u16 {
    let mut doubled = 0u16;
    let mut j = 0;
    while j < 8 {
        if byte & (1 << j) != 0 {
            doubled |= 0b11 << (2 * j);
        }
        j += 1;
    }
    doubled
}

/// What a render call did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Render {
    /// Data bytes sent, 0 when the glyph did not fit
    pub bytes_written: usize,
    /// Cursor after the glyph
    pub cursor: CursorPosition,
}

impl Render {
    /// Whether anything reached the panel
    pub fn is_rendered(&self) -> bool {
        self.bytes_written > 0
    }
}

/// Whether a glyph fits at `at` in the given mode
///
/// Double size also needs the page below to exist.
pub fn fits(panel: &PanelConfig, at: CursorPosition, mode: CharMode) -> bool {
    let right = at.x as u16 + mode.advance() as u16;
    let bottom = at.y as u16 + mode.scale() as u16;
    right <= panel.width() as u16 && bottom <= panel.pages() as u16
}

/// Render one glyph at `at`
///
/// Addresses the cursor cell and writes the glyph; double size writes the
/// top half, re-addresses the page below at the same column and writes the
/// bottom half. Returns the advanced cursor, or the unchanged one with zero
/// bytes written when the glyph would not fit.
pub fn render<I: DisplayInterface>(
    interface: &mut I,
    panel: &PanelConfig,
    glyph: &Glyph,
    at: CursorPosition,
    mode: CharMode,
) -> Result<Render, I::Error> {
    if !fits(panel, at, mode) {
        return Ok(Render {
            bytes_written: 0,
            cursor: at,
        });
    }

    let address = encode_address(at.y, at.x, panel.dialect);
    interface.send_command(address.as_bytes())?;

    let bytes_written = match mode {
        CharMode::Normal => {
            interface.send_data(glyph)?;
            GLYPH_WIDTH
        }
        CharMode::Double => {
            let doubled = glyph.map(double_bits);

            let top = stretch(&doubled, |column| column as u8);
            interface.send_data(&top)?;

            let address = encode_address(at.y + 1, at.x, panel.dialect);
            interface.send_command(address.as_bytes())?;

            let bottom = stretch(&doubled, |column| (column >> 8) as u8);
            interface.send_data(&bottom)?;

            top.len() + bottom.len()
        }
    };

    Ok(Render {
        bytes_written,
        cursor: CursorPosition {
            x: at.x + mode.advance(),
            y: at.y,
        },
    })
}

/// Pick one half of each doubled column and send it twice
fn stretch(doubled: &[u16; GLYPH_WIDTH], half: impl Fn(u16) -> u8) -> [u8; 2 * GLYPH_WIDTH] {
    let mut out = [0u8; 2 * GLYPH_WIDTH];
    for (pair, &column) in out.chunks_exact_mut(2).zip(doubled) {
        pair.fill(half(column));
    }
    out
}
