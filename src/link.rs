//! Point-to-point frame link over a byte-oriented serial transport.

use std::io::{Error, ErrorKind, Read};

use log::{debug, trace};

use crate::checksum;
use crate::command::Command;
use crate::protocol::{HEADER1, HEADER2};
use crate::receiver::Receiver;
use crate::types::{RawFrame, MAX_PAYLOAD_SIZE};

/// A byte-oriented duplex channel to the player.
///
/// Implemented for every [`serialport::SerialPort`]; test doubles implement
/// it directly.
pub trait SerialLink {
    /// Returns the number of bytes that can be read without blocking.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the transport cannot be queried.
    fn bytes_available(&mut self) -> std::io::Result<u32>;

    /// Reads exactly one byte.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the read operation failed.
    fn read_byte(&mut self) -> std::io::Result<u8>;

    /// Writes all of the given bytes.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the write operation failed.
    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()>;

    /// Flushes buffered outbound bytes to the wire.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the flush operation failed.
    fn flush(&mut self) -> std::io::Result<()>;
}

impl<T> SerialLink for T
where
    T: serialport::SerialPort,
{
    fn bytes_available(&mut self) -> std::io::Result<u32> {
        Ok(self.bytes_to_read()?)
    }

    fn read_byte(&mut self) -> std::io::Result<u8> {
        let mut buffer = [0];
        self.read_exact(&mut buffer)?;
        Ok(buffer[0])
    }

    fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
        std::io::Write::write_all(self, bytes)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::Write::flush(self)
    }
}

/// Framed link over a serial transport.
///
/// Owns the receive state machine and a scratch buffer for outbound frames.
/// Sending is fire-and-forget; any confirmation arrives later as an
/// ordinary inbound feedback frame.
#[derive(Debug)]
pub struct Link<S> {
    serial: S,
    receiver: Receiver,
    buffer: RawFrame,
}

impl<S> Link<S> {
    /// Creates a new link over the given serial transport.
    #[must_use]
    pub const fn new(serial: S) -> Self {
        Self {
            serial,
            receiver: Receiver::new(),
            buffer: RawFrame::new(),
        }
    }

    /// Returns the inner serial transport.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.serial
    }

    #[must_use]
    fn buffer_overflow(byte: u8) -> Error {
        Error::other(format!("Frame buffer overflow: {byte:#04X}"))
    }
}

impl<S> Link<S>
where
    S: SerialLink,
{
    /// Drives one step of receive progress.
    ///
    /// Consumes at most one pending inbound byte; a no-op when none is
    /// available. Returns the frame payload when the byte completed a
    /// checksum-valid frame.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the transport failed. Protocol-level noise
    /// and checksum failures are absorbed, never returned.
    pub fn poll(&mut self) -> std::io::Result<Option<&[u8]>> {
        if self.serial.bytes_available()? == 0 {
            return Ok(None);
        }

        let byte = self.serial.read_byte()?;

        if self.receiver.receive(byte) {
            Ok(Some(self.receiver.payload()))
        } else {
            Ok(None)
        }
    }

    /// Serializes a command and sends it as one frame.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the write operation failed.
    pub fn send(&mut self, command: &Command) -> std::io::Result<()> {
        debug!("Sending {command}.");
        let payload = command.payload()?;
        self.send_raw(&payload)
    }

    /// Sends a raw payload as one frame: SOF bytes, length, payload, checksum.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the payload exceeds the frame payload
    /// capacity or the write operation failed.
    pub fn send_raw(&mut self, payload: &[u8]) -> std::io::Result<()> {
        if payload.len() > MAX_PAYLOAD_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                format!("Payload too large: {} bytes", payload.len()),
            ));
        }

        let length = payload.len() as u8;
        self.buffer.clear();
        self.buffer
            .push(HEADER1)
            .and_then(|()| self.buffer.push(HEADER2))
            .and_then(|()| self.buffer.push(length))
            .map_err(Self::buffer_overflow)?;
        self.buffer
            .extend_from_slice(payload)
            .map_err(|()| Self::buffer_overflow(length))?;
        self.buffer
            .push(checksum::compute(length, payload))
            .map_err(Self::buffer_overflow)?;

        trace!("Writing frame: {:02X?}", self.buffer.as_slice());
        self.serial.write_all(&self.buffer)?;
        self.serial.flush()
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io::{Error, ErrorKind};

    use super::{Link, SerialLink};
    use crate::checksum;
    use crate::command::{Command, Params};
    use crate::mode::Mode;

    /// In-memory serial endpoint.
    #[derive(Debug, Default)]
    struct MockSerial {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
    }

    impl SerialLink for MockSerial {
        fn bytes_available(&mut self) -> std::io::Result<u32> {
            Ok(self.rx.len() as u32)
        }

        fn read_byte(&mut self) -> std::io::Result<u8> {
            self.rx
                .pop_front()
                .ok_or_else(|| Error::new(ErrorKind::TimedOut, "no byte pending"))
        }

        fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
            self.tx.extend_from_slice(bytes);
            Ok(())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_send_raw_frames_payload() {
        let mut link = Link::new(MockSerial::default());
        link.send_raw(&[0x02, 0x00, 0x01]).unwrap();
        assert_eq!(
            link.into_inner().tx,
            [0xFF, 0x55, 0x03, 0x02, 0x00, 0x01, 0xFA]
        );
    }

    #[test]
    fn test_send_command() {
        let mut link = Link::new(MockSerial::default());
        let command = Command::new(Mode::Switching, 0x01, Mode::AdvancedRemote as u8, Params::None);
        link.send(&command).unwrap();

        let expected_checksum = checksum::compute(3, &[0x00, 0x01, 0x04]);
        assert_eq!(
            link.into_inner().tx,
            [0xFF, 0x55, 0x03, 0x00, 0x01, 0x04, expected_checksum]
        );
    }

    #[test]
    fn test_send_raw_rejects_oversized_payload() {
        let mut link = Link::new(MockSerial::default());
        let payload = [0x00; 129];
        assert!(link.send_raw(&payload).is_err());
        assert!(link.into_inner().tx.is_empty());
    }

    #[test]
    fn test_poll_without_pending_bytes_is_a_no_op() {
        let mut link = Link::new(MockSerial::default());
        assert!(link.poll().unwrap().is_none());
    }

    #[test]
    fn test_poll_consumes_one_byte_per_call() {
        let mut serial = MockSerial::default();
        serial
            .rx
            .extend([0xFF, 0x55, 0x03, 0x04, 0x00, 0x03, 0xF6]);

        let mut link = Link::new(serial);

        for _ in 0..6 {
            assert!(link.poll().unwrap().is_none());
        }

        assert_eq!(link.poll().unwrap(), Some([0x04, 0x00, 0x03].as_slice()));
        assert!(link.poll().unwrap().is_none());
    }
}
