use core::fmt::Debug;

use embedded_hal::serial::{Read, Write};
use embedded_hal::timer::CountDown;
use log::trace;
use nb::block;

use crate::packet;

/// Byte channel to the sensor.
///
/// Implementations own whatever UART (or USB adapter, or test double) carries the bytes. `read`
/// blocks until one frame has arrived, `buffer` is full or `timeout_ms` has passed, and returns
/// how many bytes were stored; a timeout is not an error, it just yields fewer bytes (possibly 0).
pub trait Transport {
    type Error: Debug;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;

    fn read(&mut self, buffer: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;

    /// Discards anything already queued on the receive side.
    fn flush_input(&mut self) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        (**self).write(bytes)
    }

    fn read(&mut self, buffer: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
        (**self).read(buffer, timeout_ms)
    }

    fn flush_input(&mut self) -> Result<(), Self::Error> {
        (**self).flush_input()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialError<TE, RE> {
    Write(TE),
    Read(RE),
}

/// [`Transport`] over an embedded-hal serial port, with a count-down timer bounding each read.
///
/// The timer's `Time` is built from the timeout in milliseconds.
#[derive(Debug)]
pub struct SerialTransport<TX, RX, TIMER> {
    tx: TX,
    rx: RX,
    timer: TIMER,
}

impl<TX, RX, TIMER> SerialTransport<TX, RX, TIMER>
where
    TX: Write<u8>,
    RX: Read<u8>,
    TIMER: CountDown,
{
    pub fn new(tx: TX, rx: RX, timer: TIMER) -> Self {
        Self { tx, rx, timer }
    }

    /// Gives the serial halves and the timer back.
    pub fn release(self) -> (TX, RX, TIMER) {
        (self.tx, self.rx, self.timer)
    }
}

impl<TX, RX, TIMER> Transport for SerialTransport<TX, RX, TIMER>
where
    TX: Write<u8>,
    RX: Read<u8>,
    TX::Error: Debug,
    RX::Error: Debug,
    TIMER: CountDown,
    TIMER::Time: From<u32>,
{
    type Error = SerialError<TX::Error, RX::Error>;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error> {
        for byte in bytes {
            block!(self.tx.write(*byte)).map_err(SerialError::Write)?;
        }
        block!(self.tx.flush()).map_err(SerialError::Write)?;
        Ok(bytes.len())
    }

    fn read(&mut self, buffer: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
        self.timer.start(timeout_ms);
        let mut received = 0;
        while received < buffer.len() {
            match self.rx.read() {
                Ok(byte) => {
                    buffer[received] = byte;
                    received += 1;
                    // Stop at the end of the first frame rather than waiting out the timer.
                    if let Some(total) = packet::expected_frame_len(&buffer[..received]) {
                        if received >= total {
                            break;
                        }
                    }
                }
                Err(nb::Error::WouldBlock) => {
                    if self.timer.wait().is_ok() {
                        trace!("read timed out after {} ms with {} bytes", timeout_ms, received);
                        break;
                    }
                }
                Err(nb::Error::Other(e)) => return Err(SerialError::Read(e)),
            }
        }
        Ok(received)
    }

    fn flush_input(&mut self) -> Result<(), Self::Error> {
        let mut discarded = 0usize;
        loop {
            match self.rx.read() {
                Ok(_) => discarded += 1,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => return Err(SerialError::Read(e)),
            }
        }
        if discarded > 0 {
            trace!("discarded {} stale bytes", discarded);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use std::vec::Vec;

    #[derive(Default)]
    struct TestTx(Vec<u8>);

    impl Write<u8> for TestTx {
        type Error = ();
        fn write(&mut self, word: u8) -> nb::Result<(), Self::Error> {
            self.0.push(word);
            Ok(())
        }
        fn flush(&mut self) -> nb::Result<(), Self::Error> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct TestRx {
        queued: VecDeque<u8>,
        fail: bool,
    }

    impl Read<u8> for TestRx {
        type Error = ();
        fn read(&mut self) -> nb::Result<u8, Self::Error> {
            if self.fail {
                return Err(nb::Error::Other(()));
            }
            self.queued.pop_front().ok_or(nb::Error::WouldBlock)
        }
    }

    /// Expires after a fixed number of polls.
    struct PollTimer {
        started_with: Option<u32>,
        polls: u32,
        limit: u32,
    }

    impl CountDown for PollTimer {
        type Time = u32;
        fn start<T>(&mut self, count: T)
        where
            T: Into<Self::Time>,
        {
            self.started_with = Some(count.into());
            self.polls = 0;
        }
        fn wait(&mut self) -> nb::Result<(), void::Void> {
            self.polls += 1;
            if self.polls >= self.limit {
                Ok(())
            } else {
                Err(nb::Error::WouldBlock)
            }
        }
    }

    fn transport(rx: &[u8]) -> SerialTransport<TestTx, TestRx, PollTimer> {
        SerialTransport::new(
            TestTx::default(),
            TestRx { queued: rx.iter().copied().collect(), fail: false },
            PollTimer { started_with: None, polls: 0, limit: 3 },
        )
    }

    const ACK: [u8; 12] = [0xEF, 0x01, 0xFF, 0xFF, 0xFF, 0xFF, 0x07, 0x00, 0x03, 0x00, 0x00, 0x0A];

    #[test]
    fn write_sends_every_byte() {
        let mut t = transport(&[]);
        assert_eq!(t.write(&[1, 2, 3]), Ok(3));
        let (tx, _, _) = t.release();
        assert_eq!(tx.0, vec![1, 2, 3]);
    }

    #[test]
    fn read_stops_at_frame_end() {
        let mut queued = ACK.to_vec();
        queued.extend_from_slice(&[0xAA, 0xBB]);
        let mut t = transport(&queued);
        let mut buf = [0u8; 64];
        assert_eq!(t.read(&mut buf, 1000), Ok(ACK.len()));
        assert_eq!(&buf[..ACK.len()], &ACK[..]);
        let (_, rx, timer) = t.release();
        assert_eq!(rx.queued.len(), 2);
        assert_eq!(timer.started_with, Some(1000));
    }

    #[test]
    fn read_times_out_with_partial_data() {
        let mut t = transport(&ACK[..5]);
        let mut buf = [0u8; 64];
        assert_eq!(t.read(&mut buf, 1000), Ok(5));
    }

    #[test]
    fn read_times_out_empty() {
        let mut t = transport(&[]);
        let mut buf = [0u8; 64];
        assert_eq!(t.read(&mut buf, 1000), Ok(0));
    }

    #[test]
    fn read_error_is_reported() {
        let mut t = transport(&[]);
        t.rx.fail = true;
        let mut buf = [0u8; 64];
        assert_eq!(t.read(&mut buf, 1000), Err(SerialError::Read(())));
    }

    #[test]
    fn flush_input_drains_receiver() {
        let mut t = transport(&[1, 2, 3, 4]);
        assert_eq!(t.flush_input(), Ok(()));
        let mut buf = [0u8; 8];
        assert_eq!(t.read(&mut buf, 10), Ok(0));
    }
}
