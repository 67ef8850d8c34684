//! ADC1 analog adapter.
//!
//! Implements [`AnalogPort`] over the one-shot ADC unit configured by
//! [`hw_init::init_adc`].  Only the channel it was built for is wired;
//! any other id is reported as unknown.

use crate::app::ports::AnalogPort;
use crate::drivers::hw_init;
use crate::error::AnalogError;

pub struct Adc1Adapter {
    channel: u8,
}

impl Adc1Adapter {
    pub fn new(channel: u8) -> Self {
        Self { channel }
    }
}

impl AnalogPort for Adc1Adapter {
    fn sample(&mut self, channel: u8) -> Result<u16, AnalogError> {
        if channel != self.channel {
            return Err(AnalogError::UnknownChannel(channel));
        }
        hw_init::adc1_read(channel).map_err(AnalogError::ReadFailed)
    }
}
