//! Panel configuration
//!
//! Geometry, controller dialect and bus address are fixed per build. The
//! presets cover the common 0.96"/1.3" modules; [`PanelConfig::new`] checks
//! anything else against what the controllers can address.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use glint_hal::i2c::seven_bit_address;

use crate::address::Dialect;

/// Glyph width in pixel columns
pub const GLYPH_WIDTH: usize = 6;

/// Physical columns the controller reserves before the first visible one
pub const COLUMN_OFFSET: u8 = 2;

/// Pixel rows per page
pub const PAGE_HEIGHT: u8 = 8;

/// Widest panel the controllers can address (132 RAM columns minus margins)
pub const MAX_WIDTH: u8 = 128;

/// Tallest panel the controllers can multiplex
pub const MAX_HEIGHT: u8 = 64;

/// Default 7-bit I2C address (0x78 as an 8-bit write address)
pub const DEFAULT_I2C_ADDRESS: u8 = seven_bit_address(0x78);

/// Errors that can occur when building a panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Width must be 1..=128 and one glyph wide at least
    InvalidWidth(u8),
    /// Height must be a whole number of pages, 8..=64
    InvalidHeight(u8),
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::InvalidWidth(w) => {
                write!(f, "Invalid width {w} (must be {GLYPH_WIDTH}..={MAX_WIDTH})")
            }
            ConfigError::InvalidHeight(h) => write!(
                f,
                "Invalid height {h} (must be a multiple of {PAGE_HEIGHT} up to {MAX_HEIGHT})"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// Panel configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Visible width in pixels
    width: u8,
    /// Visible height in pixels
    height: u8,
    /// Address command dialect of the controller
    pub dialect: Dialect,
    /// 7-bit I2C address
    pub i2c_address: u8,
}

impl PanelConfig {
    /// 1.3" SH1106 module, 128x64
    pub const SH1106_128X64: Self = Self {
        width: 128,
        height: 64,
        dialect: Dialect::Sh1106,
        i2c_address: DEFAULT_I2C_ADDRESS,
    };

    /// 0.96" SSD1306 module, 128x64
    pub const SSD1306_128X64: Self = Self {
        width: 128,
        height: 64,
        dialect: Dialect::Ssd130x,
        i2c_address: DEFAULT_I2C_ADDRESS,
    };

    /// 0.91" SSD1306 module, 128x32
    pub const SSD1306_128X32: Self = Self {
        width: 128,
        height: 32,
        dialect: Dialect::Ssd130x,
        i2c_address: DEFAULT_I2C_ADDRESS,
    };

    /// Create a configuration with validated geometry
    ///
    /// Defaults to the SH1106 dialect at [`DEFAULT_I2C_ADDRESS`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidWidth`] if the width is narrower than one
    ///   glyph or wider than [`MAX_WIDTH`]
    /// - [`ConfigError::InvalidHeight`] if the height is not a multiple of
    ///   [`PAGE_HEIGHT`] in `8..=64`
    pub const fn new(width: u8, height: u8) -> Result<Self, ConfigError> {
        if (width as usize) < GLYPH_WIDTH || width > MAX_WIDTH {
            return Err(ConfigError::InvalidWidth(width));
        }
        if height == 0 || height > MAX_HEIGHT || height % PAGE_HEIGHT != 0 {
            return Err(ConfigError::InvalidHeight(height));
        }
        Ok(Self {
            width,
            height,
            dialect: Dialect::Sh1106,
            i2c_address: DEFAULT_I2C_ADDRESS,
        })
    }

    /// Select the controller dialect
    pub const fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Set the 7-bit I2C address
    pub const fn with_address(mut self, address: u8) -> Self {
        self.i2c_address = address;
        self
    }

    /// Visible width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Visible height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Number of pages (height / 8)
    pub const fn pages(&self) -> u8 {
        self.height / PAGE_HEIGHT
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::SH1106_128X64
    }
}
