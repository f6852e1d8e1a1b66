use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};
use crate::utils::FromPayload;

/// Confirmation codes the sensor puts in the first byte of every acknowledge payload.
///
/// Only the codes this crate gives a meaning to are listed; anything else is passed through
/// untouched in [`Error::SensorRejected`].
pub mod confirmation {
    pub const OK: u8 = 0x00;
    pub const PACKET_ERROR: u8 = 0x01;
    pub const NO_FINGER: u8 = 0x02;
    pub const NOT_MATCHED: u8 = 0x08;
    pub const NOT_FOUND: u8 = 0x09;
    pub const WRONG_PASSWORD: u8 = 0x13;
}

fn need(payload: &[u8], len: usize) -> Result<()> {
    if payload.len() < len {
        // Offsets are reported relative to the whole acknowledge payload.
        return Err(Error::Truncated { expected: len + 1, actual: payload.len() + 1 });
    }
    Ok(())
}

/// Outcome of a successful `Search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Library page of the matching template.
    pub page_id: u16,
    /// Similarity score reported by the sensor.
    pub score: u16,
}

impl FromPayload for SearchResult {
    fn from_payload(payload: &[u8]) -> Result<Self> {
        need(payload, 4)?;
        Ok(SearchResult {
            page_id: BigEndian::read_u16(&payload[0..2]),
            score: BigEndian::read_u16(&payload[2..4]),
        })
    }
}

/// A single big-endian word following the confirmation code, e.g. a template count or a
/// `Match` score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word(pub u16);

impl FromPayload for Word {
    fn from_payload(payload: &[u8]) -> Result<Self> {
        need(payload, 2)?;
        Ok(Word(BigEndian::read_u16(&payload[0..2])))
    }
}

/// System status and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemParameters {
    /// Status information. Use instance methods of SystemParameters to get to individual bits.
    pub status_register: u16,

    /// System identifier code, whatever that means - datasheets say this has a constant value of
    /// 0x0009
    pub system_identifier_code: u16,

    /// Finger library size.
    pub finger_library_size: u16,

    /// Security level [1-5]
    pub security_level: u16,

    /// Device address, in case you forgot, but then you'd need the device address to send it the
    /// `ReadSysPara` command... 🤔
    pub device_address: u32,

    /// Packet size. Actually a size code [0-3]:\
    /// 0 = 32 bytes\
    /// 1 = 64 bytes\
    /// 2 = 128 bytes (the default)\
    /// 3 = 256 bytes
    pub packet_size: u16,

    /// Baud setting. To get actual baud value, multiply by 9600.
    pub baud_setting: u16,
}

impl SystemParameters {
    /// True if the sensor is busy executing another command.
    ///
    /// *Busy* in the datasheet.
    pub fn busy(&self) -> bool {
        self.status_register & (1u16 << 0) != 0
    }

    /// True if the module found a matching finger - however you should
    /// always check the response to the actual matching request.
    ///
    /// *Pass* in the datasheet.
    pub fn has_finger_match(&self) -> bool {
        self.status_register & (1u16 << 1) != 0
    }

    /// True if the password given in the handshake is correct.
    ///
    /// *PWD* in the datasheet.
    pub fn password_ok(&self) -> bool {
        self.status_register & (1u16 << 2) != 0
    }

    /// True if the image buffer contains a valid image.
    ///
    /// *ImgBufStat* in the datasheet.
    pub fn has_valid_image(&self) -> bool {
        self.status_register & (1u16 << 3) != 0
    }

    /// Baud rate the module is configured for.
    pub fn baud_rate(&self) -> u32 {
        u32::from(self.baud_setting) * 9600
    }
}

impl FromPayload for SystemParameters {
    fn from_payload(payload: &[u8]) -> Result<Self> {
        // Datasheets mix bytes and 16-bit words when describing this block; these offsets are
        // in bytes.
        need(payload, 16)?;
        Ok(SystemParameters {
            status_register: BigEndian::read_u16(&payload[0..2]),
            system_identifier_code: BigEndian::read_u16(&payload[2..4]),
            finger_library_size: BigEndian::read_u16(&payload[4..6]),
            security_level: BigEndian::read_u16(&payload[6..8]),
            device_address: BigEndian::read_u32(&payload[8..12]),
            packet_size: BigEndian::read_u16(&payload[12..14]),
            baud_setting: BigEndian::read_u16(&payload[14..16]),
        })
    }
}
