#![allow(dead_code)]

use std::collections::VecDeque;

use zfm_fingerprint::{packet, Transport};

/// In-memory transport: records every frame written and answers each read with the next
/// scripted reply. An exhausted script behaves like a silent sensor.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub written: Vec<Vec<u8>>,
    pub replies: VecDeque<Vec<u8>>,
    pub stale: Vec<u8>,
    pub flushes: usize,
    pub reads: Vec<u32>,
    /// Accept at most this many bytes per write.
    pub write_limit: Option<usize>,
    pub fail_reads: bool,
}

impl ScriptedTransport {
    pub fn replying(replies: &[&[u8]]) -> Self {
        ScriptedTransport {
            replies: replies.iter().map(|r| r.to_vec()).collect(),
            ..Default::default()
        }
    }
}

impl Transport for ScriptedTransport {
    type Error = &'static str;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        let n = self.write_limit.map_or(bytes.len(), |limit| limit.min(bytes.len()));
        self.written.push(bytes[..n].to_vec());
        Ok(n)
    }

    fn read(&mut self, buffer: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
        self.reads.push(timeout_ms);
        if self.fail_reads {
            return Err("line noise");
        }
        let mut reply = std::mem::take(&mut self.stale);
        reply.extend(self.replies.pop_front().unwrap_or_default());
        let n = reply.len().min(buffer.len());
        buffer[..n].copy_from_slice(&reply[..n]);
        Ok(n)
    }

    fn flush_input(&mut self) -> Result<(), Self::Error> {
        self.flushes += 1;
        self.stale.clear();
        Ok(())
    }
}

/// Builds an acknowledge frame from the default address carrying `payload`.
pub fn ack(payload: &[u8]) -> Vec<u8> {
    ack_from(0xFFFF_FFFF, payload)
}

pub fn ack_from(address: u32, payload: &[u8]) -> Vec<u8> {
    let mut frame = vec![0xEF, 0x01];
    frame.extend_from_slice(&address.to_be_bytes());
    frame.push(packet::PID_ACK);
    frame.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    frame.extend_from_slice(payload);
    let chk = packet::checksum(packet::PID_ACK, payload);
    frame.extend_from_slice(&chk.to_be_bytes());
    frame
}
