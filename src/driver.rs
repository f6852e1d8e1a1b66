use log::{debug, info, trace, warn};

use crate::commands::Command;
use crate::config::SensorConfig;
use crate::error::{Error, Result};
use crate::packet::{self, FrameBuffer, FRAME_CAPACITY, HEADER_LEN, PID_ACK};
use crate::responses::{confirmation, SearchResult, SystemParameters, Word};
use crate::transport::Transport;
use crate::utils::FromPayload;

/// Character buffer used by the single-buffer convenience commands.
pub const DEFAULT_BUFFER: u8 = 1;

/// Number of library pages [`Sensor::search`] looks through, starting at page 0.
pub const SEARCH_PAGE_COUNT: u16 = 20;

/// A fingerprint sensor session.
///
/// Owns the transport exclusively. Every method is one request/response round trip: stale input
/// is flushed, the command frame is written, and exactly one blocking read waits for the
/// acknowledge. Nothing is retried.
#[derive(Debug)]
pub struct Sensor<T> {
    transport: T,
    address: u32,
    timeout_ms: u32,
    verify_checksum: bool,
    cmd_buffer: FrameBuffer,
    received: [u8; FRAME_CAPACITY],
}

impl<T: Transport> Sensor<T> {
    /// Validates `config` and wraps an already configured transport.
    pub fn init(config: SensorConfig, transport: T) -> Result<Self> {
        config.validate()?;
        info!(
            "fingerprint sensor on UART{} (tx {}, rx {}) at {} baud, address {:08x}",
            config.port, config.tx_pin, config.rx_pin, config.baud_rate, config.address
        );
        Ok(Self {
            transport,
            address: config.address,
            timeout_ms: config.timeout_ms,
            verify_checksum: config.verify_checksum,
            cmd_buffer: FrameBuffer::new(),
            received: [0u8; FRAME_CAPACITY],
        })
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    /// Ends the session and hands the transport back.
    pub fn release(self) -> T {
        self.transport
    }

    /// Captures a fingerprint image. Fails with [`Error::NoFingerDetected`] when the window is
    /// empty, which is the normal answer while polling for a finger.
    pub fn capture_image(&mut self) -> Result<()> {
        let code = self.send_command(&Command::GenImg)?[0];
        match code {
            confirmation::OK => Ok(()),
            confirmation::NO_FINGER => Err(Error::NoFingerDetected),
            other => Err(rejected(other)),
        }
    }

    /// Converts the captured image into a feature set in character buffer `buffer`.
    pub fn image_to_template(&mut self, buffer: u8) -> Result<()> {
        let ack = self.send_command(&Command::Img2Tz { buffer })?;
        expect_ok(ack)
    }

    /// Searches the first [`SEARCH_PAGE_COUNT`] library pages for the feature set in buffer 1.
    pub fn search(&mut self) -> Result<SearchResult> {
        self.search_range(DEFAULT_BUFFER, 0, SEARCH_PAGE_COUNT)
    }

    /// Searches `page_count` library pages from `start_index` for the feature set in `buffer`.
    pub fn search_range(&mut self, buffer: u8, start_index: u16, page_count: u16) -> Result<SearchResult> {
        let ack = self.send_command(&Command::Search { buffer, start_index, page_count })?;
        match ack[0] {
            confirmation::OK => SearchResult::from_payload(&ack[1..]),
            confirmation::NOT_FOUND => Err(Error::NoMatch),
            other => Err(rejected(other)),
        }
    }

    /// Compares character buffers 1 and 2 and returns the similarity score.
    pub fn match_templates(&mut self) -> Result<u16> {
        let ack = self.send_command(&Command::Match)?;
        match ack[0] {
            confirmation::OK => Word::from_payload(&ack[1..]).map(|Word(score)| score),
            confirmation::NOT_MATCHED => Err(Error::NoMatch),
            other => Err(rejected(other)),
        }
    }

    /// Merges character buffers 1 and 2 into a template.
    pub fn create_model(&mut self) -> Result<()> {
        let ack = self.send_command(&Command::RegModel)?;
        expect_ok(ack)
    }

    /// Stores the template in buffer 1 at library page `location`.
    pub fn store_model(&mut self, location: u16) -> Result<()> {
        let ack = self.send_command(&Command::Store { buffer: DEFAULT_BUFFER, index: location })?;
        expect_ok(ack)
    }

    /// Loads the template at library page `location` into character buffer `buffer`.
    pub fn load_template(&mut self, buffer: u8, location: u16) -> Result<()> {
        let ack = self.send_command(&Command::LoadChar { buffer, index: location })?;
        expect_ok(ack)
    }

    /// Deletes the template at library page `location`.
    pub fn delete_model(&mut self, location: u16) -> Result<()> {
        let ack = self.send_command(&Command::DeletChar { start_index: location, count: 1 })?;
        expect_ok(ack)
    }

    /// Deletes every stored template.
    pub fn empty_database(&mut self) -> Result<()> {
        let ack = self.send_command(&Command::Empty)?;
        expect_ok(ack)
    }

    /// Number of templates stored in the library.
    pub fn template_count(&mut self) -> Result<u16> {
        let ack = self.send_command(&Command::TemplateNum)?;
        match ack[0] {
            confirmation::OK => Word::from_payload(&ack[1..]).map(|Word(count)| count),
            other => Err(rejected(other)),
        }
    }

    /// Reads the system parameter block. Doubles as a self test: success means the module is
    /// powered, wired and answering at this address.
    pub fn read_system_parameters(&mut self) -> Result<SystemParameters> {
        let ack = self.send_command(&Command::ReadSysPara)?;
        match ack[0] {
            confirmation::OK => SystemParameters::from_payload(&ack[1..]),
            other => Err(rejected(other)),
        }
    }

    /// Password handshake. `Ok(false)` means the sensor answered but refused the password.
    pub fn verify_password(&mut self, password: u32) -> Result<bool> {
        let ack = self.send_command(&Command::VfyPwd { password })?;
        match ack[0] {
            confirmation::OK => Ok(true),
            confirmation::WRONG_PASSWORD => Ok(false),
            other => Err(rejected(other)),
        }
    }

    /// Sends a command to the sensor and then blocks waiting for the reply.
    /// Returns the acknowledge payload, which always starts with the confirmation code.
    pub fn send_command(&mut self, cmd: &Command) -> Result<&[u8]> {
        packet::encode(self.address, cmd, &mut self.cmd_buffer)?;
        debug!("-> {:?}", cmd);
        trace!("-> {:02x?}", &self.cmd_buffer[..]);

        self.transport.flush_input().map_err(transport_error)?;
        let written = self.transport.write(&self.cmd_buffer).map_err(transport_error)?;
        if written != self.cmd_buffer.len() {
            warn!("short write: {} of {} bytes", written, self.cmd_buffer.len());
            return Err(Error::SendFailed { expected: self.cmd_buffer.len(), written });
        }

        let received = self
            .transport
            .read(&mut self.received, self.timeout_ms)
            .map_err(transport_error)?;
        let raw = &self.received[..received.min(FRAME_CAPACITY)];
        trace!("<- {:02x?}", raw);
        if raw.len() < HEADER_LEN {
            warn!("{:?}: no reply within {} ms ({} bytes)", cmd, self.timeout_ms, raw.len());
            return Err(Error::SensorTimeout);
        }

        let reply = if self.verify_checksum {
            packet::decode_verified(raw)?
        } else {
            packet::decode(raw)?
        };
        if reply.package_id != PID_ACK {
            return Err(Error::UnexpectedPackageId(reply.package_id));
        }
        if reply.payload.is_empty() {
            return Err(Error::Truncated { expected: HEADER_LEN + 1, actual: raw.len() });
        }
        debug!("<- confirmation {:02x} for {:?}", reply.payload[0], cmd);
        Ok(reply.payload)
    }
}

fn expect_ok(ack: &[u8]) -> Result<()> {
    match ack[0] {
        confirmation::OK => Ok(()),
        other => Err(rejected(other)),
    }
}

fn rejected(code: u8) -> Error {
    warn!("sensor rejected command: confirmation code {:02x}", code);
    Error::SensorRejected(code)
}

fn transport_error<E: core::fmt::Debug>(e: E) -> Error {
    warn!("transport error: {:?}", e);
    Error::Transport
}
