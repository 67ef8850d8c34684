//! RS-485 link adapter.
//!
//! Implements [`SerialPort`] over the ESP-IDF UART driver wired to the
//! MAX485 transceiver.  Reads never block: the polling loop asks how many
//! bytes are buffered and takes them one at a time.

#[cfg(target_os = "espidf")]
use esp_idf_svc::hal::{delay::NON_BLOCK, uart::UartDriver};

#[cfg(target_os = "espidf")]
use crate::app::ports::SerialPort;
#[cfg(target_os = "espidf")]
use crate::error::SerialError;

#[cfg(target_os = "espidf")]
pub struct Rs485Link<'d> {
    uart: UartDriver<'d>,
}

#[cfg(target_os = "espidf")]
impl<'d> Rs485Link<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self { uart }
    }
}

#[cfg(target_os = "espidf")]
impl SerialPort for Rs485Link<'_> {
    fn available(&mut self) -> usize {
        self.uart.remaining_read().unwrap_or(0)
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.uart.read(&mut buf, NON_BLOCK) {
            Ok(1) => Some(buf[0]),
            _ => None,
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), SerialError> {
        let written = self
            .uart
            .write(data)
            .map_err(|_| SerialError::WriteFailed)?;
        if written != data.len() {
            return Err(SerialError::ShortWrite {
                written,
                expected: data.len(),
            });
        }
        Ok(())
    }
}
