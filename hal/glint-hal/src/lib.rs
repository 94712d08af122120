//! Glint Hardware Abstraction Layer
//!
//! This crate defines the bus traits the display engine is written against.
//! Chip-specific HALs (STM32F0, ...) implement them so the same text layer
//! runs on any board that can talk to the panel.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  glint-display (screen session)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  glint-hal (this crate - traits)        │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │  glint-hal-   │
//!             │    stm32f0    │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - I2C master writes

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{I2cBus, I2cConfig};
