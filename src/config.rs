//! Controller configuration parameters
//!
//! All timing and link parameters are fixed at build time; the controller
//! takes a [`ControllerConfig`] value so host tests can inject tighter
//! windows without touching the firmware defaults.

use core::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Maximum number of bytes buffered for one command line.
pub const LINE_CAPACITY: usize = 64;

/// One-shot ADC resolutions the classic ESP32 supports.
pub const ADC_RESOLUTION_BITS: RangeInclusive<u8> = 9..=12;

/// Core controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    // --- Stable-edge monitor ---
    /// A level change is only accepted once this long after the previous one
    pub debounce_ms: u32,
    /// The monitored input must rest this long before the hardcheck fires
    pub hold_ms: u32,
    /// Pause between the CR flush and the `##hardcheck` line
    pub fire_pause_ms: u32,

    // --- Links ---
    /// RS-485 command channel, 8N1
    pub rs485_baud: u32,
    /// Shared expander bus clock
    pub i2c_baud: u32,

    // --- Analog ---
    /// ADC channel sampled by `$ad`
    pub adc_channel: u8,
    /// Sample width programmed into the ADC at boot
    pub adc_resolution_bits: u8,
}

impl ControllerConfig {
    /// Firmware defaults.
    pub const DEFAULT: Self = Self {
        debounce_ms: 100,
        hold_ms: 1000,
        fire_pause_ms: 50,

        rs485_baud: 19_200,
        i2c_baud: 100_000,

        adc_channel: crate::pins::CHA1_ADC_CHANNEL,
        adc_resolution_bits: 12,
    };

    /// Reject combinations the monitor or the links cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if self.hold_ms <= self.debounce_ms {
            return Err(Error::Config("hold window must exceed debounce window"));
        }
        if self.fire_pause_ms == 0 {
            return Err(Error::Config("fire pause must be non-zero"));
        }
        if self.rs485_baud == 0 || self.i2c_baud == 0 {
            return Err(Error::Config("baud rates must be non-zero"));
        }
        if !ADC_RESOLUTION_BITS.contains(&self.adc_resolution_bits) {
            return Err(Error::Config("ADC resolution must be 9..=12 bits"));
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
