//! Text rendering for page-addressed monochrome OLED panels
//!
//! This crate turns a stream of characters into pixel-column writes for
//! SH1106 / SSD1306 / SSD1309 controllers:
//!
//! - [`Screen`] - the session: init, clear, goto, character output, toggles
//! - [`cursor`] - cursor state and control-character transitions
//! - [`glyph`] - character code to glyph index, with a fallback table
//! - [`render`] - normal and double-size glyph output
//! - [`address`] - page/column address commands in both controller dialects
//! - [`interface`] - the command/data transport and its I2C implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use glint_display::{I2cInterface, PanelConfig, Screen, CharMode};
//!
//! let panel = PanelConfig::SH1106_128X64;
//! let mut screen = Screen::new(I2cInterface::new(bus, panel.i2c_address), panel);
//!
//! screen.init(true)?;
//! screen.puts("Hello World")?;
//! screen.goto_char(0, 2)?;
//! screen.set_char_mode(CharMode::Double);
//! screen.puts("12:34")?;
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod address;
pub mod config;
pub mod cursor;
pub mod error;
pub mod font;
pub mod glyph;
pub mod interface;
pub mod render;
pub mod screen;

// Re-export key types
pub use address::{encode_address, AddressCommand, Dialect};
pub use config::{ConfigError, PanelConfig, GLYPH_WIDTH};
pub use cursor::{Control, Cursor, CursorPosition};
pub use error::{Error, Outcome, RejectReason};
pub use font::{Font, Glyph, SpecialChar, FONT_6X8};
pub use interface::{DisplayInterface, I2cInterface};
pub use render::CharMode;
pub use screen::Screen;
