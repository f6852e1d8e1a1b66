/// Result type alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Everything that can go wrong talking to the sensor.
///
/// `NoFingerDetected` and `NoMatch` are not faults: they are the ordinary answers to "is there a
/// finger?" and "do you know this finger?". Use [`Error::is_negative_outcome`] to tell them apart
/// from real failures when polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Fewer bytes than the frame header or its length field call for.
    #[error("frame truncated: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// The frame does not begin with 0xEF01, i.e. we are out of sync with the sensor.
    #[error("bad start code 0x{0:04X}")]
    BadStartCode(u16),

    /// The length field is too small to even cover the checksum.
    #[error("invalid frame length field {0}")]
    InvalidLength(u16),

    /// The trailing checksum does not match the frame contents.
    #[error("checksum mismatch: computed 0x{expected:04X}, received 0x{received:04X}")]
    ChecksumMismatch { expected: u16, received: u16 },

    /// The sensor answered with something other than an acknowledge packet.
    #[error("unexpected package identifier 0x{0:02X}")]
    UnexpectedPackageId(u8),

    /// Nothing (or not enough to make a frame) arrived within the receive window.
    #[error("no response from sensor within the timeout")]
    SensorTimeout,

    /// `GenImg` found no finger on the sensor window.
    #[error("no finger detected")]
    NoFingerDetected,

    /// `Search` or `Match` did not find a matching template.
    #[error("no matching fingerprint")]
    NoMatch,

    /// The sensor reported a failure code this operation does not document.
    #[error("sensor rejected command with confirmation code 0x{0:02X}")]
    SensorRejected(u8),

    /// The command frame does not fit in the transmit buffer.
    #[error("command frame exceeds the {capacity}-byte transmit buffer")]
    EncodingOverflow { capacity: usize },

    /// Bad configuration passed to [`Sensor::init`](crate::Sensor::init).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The transport accepted fewer bytes than the frame holds.
    #[error("short write: {written} of {expected} bytes sent")]
    SendFailed { expected: usize, written: usize },

    /// The transport itself reported an error; details are logged at the point of failure.
    #[error("transport error")]
    Transport,
}

impl Error {
    /// True for the documented "negative" answers that are part of normal operation.
    pub fn is_negative_outcome(&self) -> bool {
        matches!(self, Error::NoFingerDetected | Error::NoMatch)
    }
}
