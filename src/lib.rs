//! **zfm-fingerprint** is a protocol engine for optical fingerprint modules of the ZFM / R30x /
//! R50x / AS608 family, reached over a UART.
//!
//! It builds command frames, sends them, waits for the acknowledge with a fixed timeout, checks
//! it, and turns the confirmation code and trailing fields into typed results. Each sensor
//! command is one method on [`Sensor`]; sequencing them (e.g. an enrollment: `capture_image`,
//! `image_to_template(1)`, `capture_image`, `image_to_template(2)`, `create_model`,
//! `store_model`) is up to the caller.
//!
//! The bytes travel through a [`Transport`]. [`SerialTransport`] adapts an embedded-hal serial
//! port plus a count-down timer; anything else (a host serial port, a test double) can implement
//! the trait directly.
//!
//! ## Example
//!
//! To count the stored templates:
//! ```
//! use zfm_fingerprint::{Sensor, SensorConfig, Transport};
//! # struct TestPort(usize);
//! #
//! # const RES_DATA: &[u8] = &[
//! #     0xef, 0x01, 0xff, 0xff, 0xff, 0xff, 0x07, 0x00, 0x05, 0x00, 0x00, 0x0a, 0x00, 0x16,
//! # ];
//! #
//! # impl Transport for TestPort {
//! #     type Error = ();
//! #     fn write(&mut self, bytes: &[u8]) -> Result<usize, ()> {
//! #         Ok(bytes.len())
//! #     }
//! #     fn read(&mut self, buffer: &mut [u8], _timeout_ms: u32) -> Result<usize, ()> {
//! #         buffer[..RES_DATA.len()].copy_from_slice(RES_DATA);
//! #         Ok(RES_DATA.len())
//! #     }
//! #     fn flush_input(&mut self) -> Result<(), ()> {
//! #         Ok(())
//! #     }
//! # }
//! # let port = TestPort(0);
//!
//! // Obtain a transport from some serial port implementation
//! let mut sensor = Sensor::init(SensorConfig::default(), port).unwrap();
//! match sensor.template_count() {
//!     Ok(count) => println!("{} templates stored", count),
//!     Err(error) => panic!("Error: {:#?}", error),
//! }
//! ```
//!
//! Polling for a finger, where "no finger" is an expected answer rather than a fault:
//! ```no_run
//! # use zfm_fingerprint::{Error, Sensor, Transport};
//! # fn wait_for_finger<T: Transport>(sensor: &mut Sensor<T>) -> Result<(), Error> {
//! loop {
//!     match sensor.capture_image() {
//!         Ok(()) => break,
//!         Err(e) if e.is_negative_outcome() => continue,
//!         Err(e) => return Err(e),
//!     }
//! }
//! # Ok(())
//! # }
//! ```
#![warn(missing_debug_implementations, rust_2018_idioms)]
#![cfg_attr(not(test), no_std)]

mod commands;
mod config;
mod driver;
mod error;
pub mod packet;
mod responses;
mod transport;
mod utils;

pub use crate::commands::{instruction, Command};
pub use crate::config::{SensorConfig, DEFAULT_ADDRESS, DEFAULT_BAUD_RATE, DEFAULT_TIMEOUT_MS};
pub use crate::driver::{Sensor, DEFAULT_BUFFER, SEARCH_PAGE_COUNT};
pub use crate::error::{Error, Result};
pub use crate::responses::{confirmation, SearchResult, SystemParameters, Word};
pub use crate::transport::{SerialError, SerialTransport, Transport};
pub use crate::utils::{CommandWriter, FromPayload, ToPayload};
