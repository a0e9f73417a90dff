use std::fmt::{Display, Formatter};

use num_derive::FromPrimitive;

/// Result of a previously issued command, reported by a feedback frame.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, FromPrimitive)]
#[repr(u8)]
pub enum Feedback {
    /// The command was accepted.
    Success = 0x00,
    /// The command failed.
    Failure = 0x02,
    /// A parameter was invalid or exceeded a limit of the request.
    InvalidParameter = 0x04,
    /// The host sent a response selector where a command was expected.
    SentResponse = 0x05,
}

impl Display for Feedback {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failure => write!(f, "failure"),
            Self::InvalidParameter => write!(f, "invalid parameter or limit exceeded"),
            Self::SentResponse => write!(f, "sent a response instead of a command"),
        }
    }
}
