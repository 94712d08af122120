//! Controller commands and page/column addressing
//!
//! Both controller families use page addressing: a page-set byte selects the
//! 8-pixel band, two nibble bytes select the column, and data bytes then
//! fill consecutive columns. They disagree on how the column is set, so the
//! address command comes in two dialects.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{PanelConfig, COLUMN_OFFSET};

/// Controller command opcodes
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_RANGE: u8 = 0x21;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const RESUME_TO_RAM: u8 = 0xA4;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
}

/// Last addressable column, closes the range opened by `SET_COLUMN_RANGE`
const COLUMN_RANGE_END: u8 = 0x7F;

/// `SET_MEMORY_MODE` argument: horizontal addressing
const MEMORY_MODE_HORIZONTAL: u8 = 0x00;

/// `SET_MEMORY_MODE` argument: page addressing
const MEMORY_MODE_PAGE: u8 = 0x02;

/// Address command dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Dialect {
    /// Page set, column range opcode, column nibbles, range end (5 bytes)
    #[default]
    Sh1106,
    /// Page set followed by the column nibbles (3 bytes)
    Ssd130x,
}

impl Dialect {
    /// Memory addressing mode the address command needs
    ///
    /// The SSD130x page and nibble commands only move the pointer in page
    /// addressing mode.
    pub const fn memory_mode(self) -> u8 {
        match self {
            Dialect::Sh1106 => MEMORY_MODE_HORIZONTAL,
            Dialect::Ssd130x => MEMORY_MODE_PAGE,
        }
    }
}

/// Encoded "set page, set column" command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressCommand {
    /// [`Dialect::Sh1106`] form
    Combined([u8; 5]),
    /// [`Dialect::Ssd130x`] form
    Split([u8; 3]),
}

impl AddressCommand {
    /// Command bytes to send
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            AddressCommand::Combined(bytes) => bytes,
            AddressCommand::Split(bytes) => bytes,
        }
    }
}

/// Encode the address of `(page, column)` for the given dialect
///
/// `column` is a visible pixel column; the controller margin is added here.
/// No bounds are checked, callers validate against the panel first.
pub fn encode_address(page: u8, column: u8, dialect: Dialect) -> AddressCommand {
    let physical = COLUMN_OFFSET.wrapping_add(column);
    let page_set = cmd::SET_PAGE_ADDR.wrapping_add(page);
    let column_low = cmd::SET_LOW_COLUMN + (physical & 0x0F);
    let column_high = cmd::SET_HIGH_COLUMN + ((physical & 0xF0) >> 4);

    match dialect {
        Dialect::Sh1106 => AddressCommand::Combined([
            page_set,
            cmd::SET_COLUMN_RANGE,
            column_low,
            column_high,
            COLUMN_RANGE_END,
        ]),
        Dialect::Ssd130x => AddressCommand::Split([page_set, column_low, column_high]),
    }
}

/// Length of the initialization blob, display on/off byte included
pub const INIT_SEQUENCE_LEN: usize = 28;

/// Initialization blob for the panel
///
/// Flipped to the usual module orientation, memory mode matching the
/// dialect, multiplex and COM pin layout taken from the panel height,
/// charge pump on. The final byte switches the
/// display on or leaves it asleep.
pub fn init_sequence(panel: &PanelConfig, display_on: bool) -> [u8; INIT_SEQUENCE_LEN] {
    let com_pins = if panel.height() > 32 { 0x12 } else { 0x02 };

    [
        cmd::DISPLAY_OFF,
        cmd::SET_MEMORY_MODE,
        panel.dialect.memory_mode(),
        cmd::SET_PAGE_ADDR,
        cmd::SET_COM_SCAN_DEC,
        cmd::SET_LOW_COLUMN,
        cmd::SET_HIGH_COLUMN,
        cmd::SET_START_LINE,
        cmd::SET_CONTRAST,
        0x3F,
        cmd::SET_SEG_REMAP,
        cmd::SET_NORMAL,
        cmd::SET_MUX_RATIO,
        panel.height() - 1,
        cmd::RESUME_TO_RAM,
        cmd::SET_DISPLAY_OFFSET,
        0x00,
        cmd::SET_CLOCK_DIV,
        0xF0,
        cmd::SET_PRECHARGE,
        0x22,
        cmd::SET_COM_PINS,
        com_pins,
        cmd::SET_VCOM_DETECT,
        0x20, // 0.77 x Vcc
        cmd::SET_CHARGE_PUMP,
        0x14,
        if display_on {
            cmd::DISPLAY_ON
        } else {
            cmd::DISPLAY_OFF
        },
    ]
}
