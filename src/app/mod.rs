//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the controller's runtime behaviour: the RS-485
//! command grammar and its dispatch, and the debounced IN16 edge monitor.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod channels;
pub mod command;
pub mod controller;
pub mod events;
pub mod interpreter;
pub mod line_buffer;
pub mod monitor;
pub mod ports;
