//! Wire framing for the sensor protocol.
//!
//! Every packet on the wire looks like this, all multi-byte fields big-endian:
//!
//! ```text
//! headr  | 0xEF 0x01 [2]
//! addr   | device address [4]
//! ident  | package identifier [1]
//! length | payload length + 2 [2]
//! data   | payload [length - 2]
//! chksum | checksum [2]
//! ```
//!
//! The checksum is the 16-bit wrapping sum of the identifier, both length bytes and every payload
//! byte. Start code and address are not covered.

use arrayvec::ArrayVec;
use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};
use crate::utils::{CommandWriter, ToPayload};

pub const START_CODE: u16 = 0xEF01;

/// Package identifier of frames sent to the sensor.
pub const PID_COMMAND: u8 = 0x01;
/// Package identifier of the sensor's replies.
pub const PID_ACK: u8 = 0x07;

/// Start code, address, identifier and length.
pub const HEADER_LEN: usize = 9;
pub const CHECKSUM_LEN: usize = 2;

/// Capacity of the transmit and receive buffers.
pub const FRAME_CAPACITY: usize = 256;

pub type FrameBuffer = ArrayVec<[u8; FRAME_CAPACITY]>;

/// A decoded frame, borrowing its payload from the receive buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Packet<'a> {
    pub address: u32,
    pub package_id: u8,
    pub payload: &'a [u8],
}

/// Sums `bytes` into `seed`, wrapping at 16 bits.
fn sum_bytes(seed: u16, bytes: &[u8]) -> u16 {
    bytes.iter().fold(seed, |sum, byte| sum.wrapping_add(u16::from(*byte)))
}

/// Checksum over a package identifier, the length field derived from `payload` and the payload.
pub fn checksum(package_id: u8, payload: &[u8]) -> u16 {
    let length = (payload.len() + CHECKSUM_LEN) as u16;
    sum_bytes(u16::from(package_id), &length.to_be_bytes()[..]).wrapping_add(sum_bytes(0, payload))
}

/// Builds one command frame in a [`FrameBuffer`].
struct FrameWriter<'a> {
    buffer: &'a mut FrameBuffer,
}

impl CommandWriter for FrameWriter<'_> {
    fn write_cmd_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        self.buffer
            .try_extend_from_slice(bytes)
            .map_err(|_| Error::EncodingOverflow { capacity: FRAME_CAPACITY })
    }
}

/// Encodes `command` as a command frame addressed to `address`, replacing the contents of `out`.
pub fn encode(address: u32, command: &dyn ToPayload, out: &mut FrameBuffer) -> Result<()> {
    out.clear();
    let mut writer = FrameWriter { buffer: &mut *out };
    writer.write_cmd_bytes(&START_CODE.to_be_bytes()[..])?;
    writer.write_cmd_bytes(&address.to_be_bytes()[..])?;
    writer.write_cmd_bytes(&[PID_COMMAND])?;
    // Length is patched in once the payload is known.
    writer.write_cmd_bytes(&[0x00, 0x00])?;
    command.to_payload(&mut writer)?;

    let payload_len = out.len() - HEADER_LEN;
    let length = (payload_len + CHECKSUM_LEN) as u16;
    BigEndian::write_u16(&mut out[7..9], length);
    let chk = checksum(PID_COMMAND, &out[HEADER_LEN..]);
    FrameWriter { buffer: out }.write_cmd_bytes(&chk.to_be_bytes()[..])
}

/// Encodes a raw instruction byte and its parameters; see [`encode`].
pub fn encode_raw(address: u32, instruction: u8, params: &[u8], out: &mut FrameBuffer) -> Result<()> {
    struct Raw<'p>(u8, &'p [u8]);

    impl ToPayload for Raw<'_> {
        fn to_payload(&self, writer: &mut dyn CommandWriter) -> Result<()> {
            writer.write_cmd_bytes(&[self.0])?;
            writer.write_cmd_bytes(self.1)
        }
    }

    encode(address, &Raw(instruction, params), out)
}

/// Reads the length field and returns the payload length it announces.
fn payload_len(raw: &[u8]) -> Result<usize> {
    let length = BigEndian::read_u16(&raw[7..9]);
    if (length as usize) < CHECKSUM_LEN {
        return Err(Error::InvalidLength(length));
    }
    Ok(length as usize - CHECKSUM_LEN)
}

fn check_header(raw: &[u8]) -> Result<()> {
    if raw.len() < HEADER_LEN {
        return Err(Error::Truncated { expected: HEADER_LEN, actual: raw.len() });
    }
    let start = BigEndian::read_u16(&raw[0..2]);
    if start != START_CODE {
        return Err(Error::BadStartCode(start));
    }
    Ok(())
}

/// Decodes one frame from the start of `raw`.
///
/// The checksum is not looked at; call [`verify_checksum`] (or use [`decode_verified`]) for that.
pub fn decode(raw: &[u8]) -> Result<Packet<'_>> {
    check_header(raw)?;
    let len = payload_len(raw)?;
    let end = HEADER_LEN + len;
    if raw.len() < end {
        return Err(Error::Truncated { expected: end, actual: raw.len() });
    }

    Ok(Packet {
        address: BigEndian::read_u32(&raw[2..6]),
        package_id: raw[6],
        payload: &raw[HEADER_LEN..end],
    })
}

/// Recomputes the checksum of the frame at the start of `raw` and compares it with the trailer.
pub fn verify_checksum(raw: &[u8]) -> Result<()> {
    check_header(raw)?;
    let len = payload_len(raw)?;
    let end = HEADER_LEN + len + CHECKSUM_LEN;
    if raw.len() < end {
        return Err(Error::Truncated { expected: end, actual: raw.len() });
    }

    let expected = sum_bytes(0, &raw[6..HEADER_LEN + len]);
    let received = BigEndian::read_u16(&raw[HEADER_LEN + len..end]);
    if expected != received {
        return Err(Error::ChecksumMismatch { expected, received });
    }
    Ok(())
}

/// [`verify_checksum`] followed by [`decode`].
pub fn decode_verified(raw: &[u8]) -> Result<Packet<'_>> {
    verify_checksum(raw)?;
    decode(raw)
}

/// Total size of the frame starting at `partial`, once its header has arrived.
///
/// Returns `None` while fewer than [`HEADER_LEN`] bytes are available.
pub fn expected_frame_len(partial: &[u8]) -> Option<usize> {
    if partial.len() < HEADER_LEN {
        return None;
    }
    Some(HEADER_LEN + BigEndian::read_u16(&partial[7..9]) as usize)
}
