use std::fmt::{Display, Formatter};

use num_derive::FromPrimitive;

/// Protocol profile selector carried as the first payload byte of every frame.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, FromPrimitive)]
#[repr(u8)]
pub enum Mode {
    /// Mode switching; used only to request a change to another profile.
    Switching = 0x00,
    /// Simple Remote: stateless button presses, no responses.
    SimpleRemote = 0x02,
    /// Advanced Remote: database and playback queries with response frames.
    AdvancedRemote = 0x04,
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Switching => write!(f, "mode switching"),
            Self::SimpleRemote => write!(f, "simple remote"),
            Self::AdvancedRemote => write!(f, "advanced remote"),
        }
    }
}
