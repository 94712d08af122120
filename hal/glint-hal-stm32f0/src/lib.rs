//! STM32F0-specific HAL for Glint
//!
//! Bridges the embassy-stm32 I2C peripheral to the [`glint_hal::I2cBus`]
//! trait so the display engine can drive an OLED module directly.
//!
//! # Features
//!
//! - `stm32f042f6`, `stm32f042k6` - Chip selection
//! - `defmt` - Enable debug formatting support

#![no_std]

pub mod i2c;

pub use i2c::{I2cBusError, Stm32I2c};
