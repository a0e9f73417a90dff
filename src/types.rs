//! Common types used in the AAP protocol implementation.

/// The maximum payload size of an AAP frame.
///
/// This is the receive buffer size of the reference remotes; the declared
/// length byte of any accepted frame must not exceed it.
pub const MAX_PAYLOAD_SIZE: usize = 128;

/// SOF1 + SOF2 + length byte + trailing checksum byte.
const FRAMING_OVERHEAD: usize = 4;

/// A stack-allocated buffer that can hold the payload of an AAP frame up to its maximum size.
pub type Payload = heapless::Vec<u8, MAX_PAYLOAD_SIZE>;

/// A stack-allocated buffer that can hold a complete AAP frame, framing bytes included.
pub type RawFrame = heapless::Vec<u8, { MAX_PAYLOAD_SIZE + FRAMING_OVERHEAD }>;
