//! Cursor state machine
//!
//! The cursor is a pixel column and a page row plus the current glyph scale.
//! Control characters are planned here as pure transitions; the screen
//! carries out the resulting [`Step`] against the panel.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::PanelConfig;
use crate::error::RejectReason;
use crate::render::{fits, CharMode};

/// Tab stops are this many glyphs apart
pub const TAB_GLYPHS: u8 = 4;

/// Cursor position: pixel column and page row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CursorPosition {
    /// Pixel column
    pub x: u8,
    /// Page row
    pub y: u8,
}

impl CursorPosition {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

/// Control characters with a cursor transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    /// `\b`: erase the previous cell
    Backspace,
    /// `\t`: jump to the next tab stop
    Tab,
    /// `\n`: down one line, column kept
    LineFeed,
    /// `\r`: back to the left edge
    CarriageReturn,
}

impl Control {
    /// Recognise a control code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0x08 => Some(Control::Backspace),
            b'\t' => Some(Control::Tab),
            b'\n' => Some(Control::LineFeed),
            b'\r' => Some(Control::CarriageReturn),
            _ => None,
        }
    }
}

/// Transition planned for a control character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// Move to the position
    Goto(CursorPosition),
    /// Move to the position, which was pulled back inside the line
    Clamped(CursorPosition),
    /// Blank the cell at `at`, then move there
    Erase { at: CursorPosition },
    /// Stay put
    Rejected(RejectReason),
}

/// Cursor state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Cursor {
    position: CursorPosition,
    mode: CharMode,
    panel: PanelConfig,
}

impl Cursor {
    /// Cursor at the origin in normal size
    pub fn new(panel: &PanelConfig) -> Self {
        Self {
            position: CursorPosition::ORIGIN,
            mode: CharMode::Normal,
            panel: *panel,
        }
    }

    pub fn position(&self) -> CursorPosition {
        self.position
    }

    pub fn mode(&self) -> CharMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CharMode) {
        self.mode = mode;
    }

    /// Whether `(x, y)` is an addressable cell
    pub fn in_bounds(&self, x: u8, y: u8) -> bool {
        x < self.panel.width() && y < self.panel.pages()
    }

    /// Move to `(x, y)` if it is on the panel
    ///
    /// Out-of-bounds requests leave the position unchanged.
    pub fn goto(&mut self, x: u8, y: u8) -> Result<CursorPosition, RejectReason> {
        if !self.in_bounds(x, y) {
            return Err(RejectReason::OutOfBounds);
        }
        self.position = CursorPosition { x, y };
        Ok(self.position)
    }

    /// Move to a planned control-character target
    ///
    /// Unlike [`goto`](Self::goto) this accepts the line-full column, so a
    /// line feed or carriage return still works after a glyph filled the line.
    pub(crate) fn move_to(
        &mut self,
        position: CursorPosition,
    ) -> Result<CursorPosition, RejectReason> {
        if position.x > self.panel.width() || position.y >= self.panel.pages() {
            return Err(RejectReason::OutOfBounds);
        }
        self.position = position;
        Ok(self.position)
    }

    /// Take the position a render left behind
    ///
    /// This may be one past the last column when a glyph filled the line.
    pub(crate) fn advance_to(&mut self, position: CursorPosition) {
        self.position = position;
    }

    /// Rightmost column a glyph still fits at in the current mode
    pub fn last_column(&self) -> u8 {
        self.panel.width().saturating_sub(self.mode.advance())
    }

    /// Plan the transition for a control character
    pub fn plan(&self, control: Control) -> Step {
        let CursorPosition { x, y } = self.position;
        let advance = self.mode.advance();

        match control {
            Control::Backspace => {
                // The blank cell has to fit where the erase lands
                match x.checked_sub(advance).map(|x| CursorPosition { x, y }) {
                    Some(at) if fits(&self.panel, at, self.mode) => Step::Erase { at },
                    _ => Step::Rejected(RejectReason::AtBoundary),
                }
            }
            Control::Tab => {
                let target = x as u16 + TAB_GLYPHS as u16 * advance as u16;
                let last = self.last_column();
                if target <= last as u16 {
                    Step::Goto(CursorPosition { x: target as u8, y })
                } else {
                    Step::Clamped(CursorPosition { x: last, y })
                }
            }
            Control::LineFeed => {
                let target = y as u16 + self.mode.scale() as u16;
                if target < self.panel.pages() as u16 {
                    Step::Goto(CursorPosition { x, y: target as u8 })
                } else {
                    Step::Rejected(RejectReason::AtBoundary)
                }
            }
            Control::CarriageReturn => Step::Goto(CursorPosition { x: 0, y }),
        }
    }
}
