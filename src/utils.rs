use crate::error::Result;

/// Parses the trailing fields of an acknowledge payload (everything after the confirmation code).
pub trait FromPayload: Sized {
    fn from_payload(payload: &[u8]) -> Result<Self>;
}

/// Sink for the bytes of a command frame. Writers are fixed-capacity and refuse to overflow.
pub trait CommandWriter {
    fn write_cmd_bytes(&mut self, bytes: &[u8]) -> Result<()>;
}

/// Writes the instruction code and parameters of a command.
pub trait ToPayload {
    fn to_payload(&self, writer: &mut dyn CommandWriter) -> Result<()>;
}
