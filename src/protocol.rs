//! Wire-level constants of the AAP framing protocol.

/// First start-of-frame byte.
pub const HEADER1: u8 = 0xFF;

/// Second start-of-frame byte.
pub const HEADER2: u8 = 0x55;

/// The reserved first command byte; every advanced-remote frame carries it.
pub const COMMAND_PREFIX: u8 = 0x00;

/// Command byte of the mode-switch request, sent with [`Mode::Switching`](crate::Mode::Switching).
pub const SWITCH_MODE: u8 = 0x01;

/// Response selector of a bad-response report for a previously sent command.
///
/// Not offset by `+1` like ordinary response selectors.
pub const RESPONSE_BAD: u8 = 0x00;

/// Response selector of a feedback (ack/nack) report for the preceding command.
///
/// Not offset by `+1` like ordinary response selectors.
pub const RESPONSE_FEEDBACK: u8 = 0x01;
