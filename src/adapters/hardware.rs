//! Hardware adapter: bridges real peripherals to domain port traits.
//!
//! Owns the shared I2C bus with its four PCF8574 expanders plus the analog
//! front end, exposing them through [`ExpanderPort`] and [`AnalogPort`].
//! Generic over the bus so host tests can plug in a simulated one.

use embedded_hal::digital::PinState;
use embedded_hal::i2c::I2c;
use log::info;

use crate::app::channels::{Expander, INACTIVE_LEVEL, PINS_PER_BANK, PinAddress, PinMode};
use crate::app::ports::{AnalogPort, ExpanderPort};
use crate::error::{AnalogError, ExpanderError};

use super::pcf8574::Pcf8574;

/// Bus addresses of the four expanders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpanderAddresses {
    pub relay_a: u8,
    pub relay_b: u8,
    pub input_a: u8,
    pub input_b: u8,
}

impl Default for ExpanderAddresses {
    fn default() -> Self {
        use crate::pins;
        Self {
            relay_a: pins::RELAY_A_I2C_ADDR,
            relay_b: pins::RELAY_B_I2C_ADDR,
            input_a: pins::INPUT_A_I2C_ADDR,
            input_b: pins::INPUT_B_I2C_ADDR,
        }
    }
}

/// Concrete adapter that combines all hardware behind port traits.
pub struct HardwareAdapter<I2C, ADC> {
    bus: I2C,
    relay_a: Pcf8574,
    relay_b: Pcf8574,
    input_a: Pcf8574,
    input_b: Pcf8574,
    adc: ADC,
}

impl<I2C: I2c, ADC: AnalogPort> HardwareAdapter<I2C, ADC> {
    pub fn new(bus: I2C, addresses: ExpanderAddresses, adc: ADC) -> Self {
        Self {
            bus,
            relay_a: Pcf8574::new(addresses.relay_a),
            relay_b: Pcf8574::new(addresses.relay_b),
            input_a: Pcf8574::new(addresses.input_a),
            input_b: Pcf8574::new(addresses.input_b),
            adc,
        }
    }

    /// Put every relay pin into output mode at the de-energised level, then
    /// every input pin into input mode.
    pub fn init(&mut self) -> Result<(), ExpanderError> {
        for expander in [Expander::RelayA, Expander::RelayB] {
            for pin in 0..PINS_PER_BANK {
                let addr = PinAddress::new(expander, pin);
                self.set_mode(addr, PinMode::Output)?;
                self.write(addr, INACTIVE_LEVEL)?;
            }
        }
        for expander in [Expander::InputA, Expander::InputB] {
            for pin in 0..PINS_PER_BANK {
                self.set_mode(PinAddress::new(expander, pin), PinMode::Input)?;
            }
        }
        info!("hw: expanders configured (11 relays released, 16 inputs)");
        Ok(())
    }

    /// Split borrow: the chip for `expander` plus the shared bus.
    fn chip(&mut self, expander: Expander) -> (&mut Pcf8574, &mut I2C) {
        let chip = match expander {
            Expander::RelayA => &mut self.relay_a,
            Expander::RelayB => &mut self.relay_b,
            Expander::InputA => &mut self.input_a,
            Expander::InputB => &mut self.input_b,
        };
        (chip, &mut self.bus)
    }

    /// Give the bus back (tests inspect it).
    pub fn release(self) -> (I2C, ADC) {
        (self.bus, self.adc)
    }
}

// ── ExpanderPort implementation ───────────────────────────────

impl<I2C: I2c, ADC: AnalogPort> ExpanderPort for HardwareAdapter<I2C, ADC> {
    fn read(&mut self, pin: PinAddress) -> Result<PinState, ExpanderError> {
        let (chip, bus) = self.chip(pin.expander);
        chip.read_pin(bus, pin.pin)
    }

    fn write(&mut self, pin: PinAddress, level: PinState) -> Result<(), ExpanderError> {
        let (chip, bus) = self.chip(pin.expander);
        chip.write_pin(bus, pin.pin, level)
    }

    fn set_mode(&mut self, pin: PinAddress, mode: PinMode) -> Result<(), ExpanderError> {
        let (chip, bus) = self.chip(pin.expander);
        chip.set_mode(bus, pin.pin, mode)
    }
}

// ── AnalogPort implementation ─────────────────────────────────

impl<I2C: I2c, ADC: AnalogPort> AnalogPort for HardwareAdapter<I2C, ADC> {
    fn sample(&mut self, channel: u8) -> Result<u16, AnalogError> {
        self.adc.sample(channel)
    }
}
