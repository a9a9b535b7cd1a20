//! HDC1080 Sensor Driver for Embedded Rust
//!
//! This crate provides a platform-agnostic driver for the TI HDC1080 temperature
//! and humidity sensor, built on top of the [`embedded-hal`] traits.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Single-transaction combined temperature + humidity reads
//! - Automatic retry when the sensor NAKs mid-conversion
//! - Optional logging support via `defmt`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`I2c`] for bus access (the platform HAL owns opening the bus)
//! - [`DelayNs`] for the sensor's conversion and drying delays
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` for logging support
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`I2c`]: embedded_hal::i2c::I2c
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(test), no_std)]

pub mod decode;
pub mod error;
pub mod hdc1080;

pub use error::HdcError;
pub use hdc1080::{DEFAULT_ADDRESS, Hdc1080, Reading};
