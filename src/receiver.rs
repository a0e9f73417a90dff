//! Resumable receive-side state machine of the AAP framing protocol.

use log::{debug, trace, warn};

use crate::checksum;
use crate::protocol::{HEADER1, HEADER2};
use crate::types::{Payload, MAX_PAYLOAD_SIZE};

/// Position within the frame currently being reassembled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
enum ReceiveState {
    /// Scanning for the first start-of-frame byte.
    #[default]
    WaitingHeader1,
    /// Got `0xFF`, expecting `0x55`.
    WaitingHeader2,
    /// Expecting the declared payload length.
    WaitingLength,
    /// Accumulating payload bytes.
    WaitingPayload,
    /// Expecting the trailing checksum byte.
    WaitingChecksum,
}

/// Reassembles AAP frames from a byte stream, one byte at a time.
///
/// The receiver owns a single bounded buffer that is reused across frames.
/// It never blocks and has no timeout: a sender that stalls mid-frame
/// leaves the receiver parked in its current state until more bytes arrive.
#[derive(Debug, Default)]
pub struct Receiver {
    state: ReceiveState,
    data_size: u8,
    buffer: Payload,
}

impl Receiver {
    /// Creates a new receiver, scanning for the start of a frame.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ReceiveState::WaitingHeader1,
            data_size: 0,
            buffer: Payload::new(),
        }
    }

    /// Feeds one inbound byte into the state machine.
    ///
    /// Returns `true` when the byte completed a checksum-valid frame; the
    /// payload is then available via [`Receiver::payload`] until the next
    /// frame's length byte arrives. Framing noise, checksum failures and
    /// oversized declared lengths are absorbed with a diagnostic and
    /// return the state machine to header scanning.
    pub fn receive(&mut self, byte: u8) -> bool {
        trace!("Received {byte:#04X} in state {:?}.", self.state);

        match self.state {
            ReceiveState::WaitingHeader1 => {
                if byte == HEADER1 {
                    self.state = ReceiveState::WaitingHeader2;
                }
            }
            ReceiveState::WaitingHeader2 => {
                if byte == HEADER2 {
                    self.state = ReceiveState::WaitingLength;
                } else if byte != HEADER1 {
                    // A run of 0xFF keeps the latest byte as the
                    // start-of-frame candidate; anything else is noise and
                    // is dropped without being re-examined.
                    trace!("Resynchronizing after unexpected {byte:#04X}.");
                    self.state = ReceiveState::WaitingHeader1;
                }
            }
            ReceiveState::WaitingLength => {
                self.buffer.clear();

                if byte as usize > MAX_PAYLOAD_SIZE {
                    warn!("Declared length {byte} exceeds buffer capacity {MAX_PAYLOAD_SIZE}. Dropping frame.");
                    self.state = ReceiveState::WaitingHeader1;
                } else {
                    debug!("Receiving frame with payload length {byte}.");
                    self.data_size = byte;
                    self.state = if byte == 0 {
                        ReceiveState::WaitingChecksum
                    } else {
                        ReceiveState::WaitingPayload
                    };
                }
            }
            ReceiveState::WaitingPayload => {
                if self.buffer.push(byte).is_err() {
                    // Unreachable given the length guard; absorb anyway.
                    warn!("Receive buffer overflow at {byte:#04X}. Dropping frame.");
                    self.buffer.clear();
                    self.state = ReceiveState::WaitingHeader1;
                } else if self.buffer.len() == usize::from(self.data_size) {
                    self.state = ReceiveState::WaitingChecksum;
                }
            }
            ReceiveState::WaitingChecksum => {
                self.state = ReceiveState::WaitingHeader1;

                if checksum::validate(self.data_size, &self.buffer, byte) {
                    debug!("Received frame: {:02X?}", self.buffer.as_slice());
                    return true;
                }

                warn!(
                    "Checksum mismatch: expected {:#04X} but got {byte:#04X}. Dropping frame: {:02X?}",
                    checksum::compute(self.data_size, &self.buffer),
                    self.buffer.as_slice()
                );
                self.buffer.clear();
            }
        }

        false
    }

    /// Returns the payload of the most recently completed frame.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.buffer
    }
}
