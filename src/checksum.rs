//! Additive two's-complement checksum covering the length byte and the payload.

/// Calculates the checksum for a frame with the given declared length and payload.
///
/// The checksum is chosen so that `length + sum(payload) + checksum` is zero
/// modulo 256; arithmetic wraps at 8 bits by design.
#[must_use]
pub fn compute(length: u8, payload: &[u8]) -> u8 {
    let sum = payload
        .iter()
        .fold(length, |sum, &byte| sum.wrapping_add(byte));
    0u8.wrapping_sub(sum)
}

/// Determines whether `received` is the correct checksum for the given length and payload.
#[must_use]
pub fn validate(length: u8, payload: &[u8], received: u8) -> bool {
    compute(length, payload) == received
}
