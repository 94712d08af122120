//! Operation outcomes and errors
//!
//! Requests the panel cannot honour (a goto off-screen, a glyph past the
//! right edge, a character the font lacks) are not errors: they come back as
//! [`Outcome::Rejected`] and leave the cursor where it was. Only transport
//! failures are errors, unless the screen is switched to strict mode.

use crate::interface::DisplayInterface;

/// Why a request was turned into a no-op
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RejectReason {
    /// Goto target outside the panel
    OutOfBounds,
    /// Glyph would run past the right edge or the bottom page
    Overflow,
    /// Control code without a transition, or no glyph for the code
    Unrenderable,
    /// Backspace at the left edge or linefeed at the last line
    AtBoundary,
}

/// Result of a cursor or rendering request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Carried out as requested
    Rendered,
    /// Carried out with the target pulled back inside the panel
    Clamped,
    /// Nothing sent, state unchanged
    Rejected(RejectReason),
}

impl Outcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }
}

/// Errors that can occur when driving the display
///
/// Generic over the interface type to preserve the bus error.
#[derive(Debug)]
pub enum Error<I: DisplayInterface> {
    /// Transport error
    Interface(I::Error),
    /// Request rejected while the screen is in strict mode
    Rejected(RejectReason),
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Interface(_) => write!(f, "Interface error"),
            Error::Rejected(reason) => write!(f, "Request rejected: {reason:?}"),
        }
    }
}

impl<I: DisplayInterface + core::fmt::Debug> core::error::Error for Error<I> {}

#[cfg(feature = "defmt")]
impl<I: DisplayInterface> defmt::Format for Error<I> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Error::Interface(_) => defmt::write!(f, "Interface error"),
            Error::Rejected(reason) => defmt::write!(f, "Rejected({})", reason),
        }
    }
}
