use std::fmt::{Display, Formatter};

/// Playback state reported by the time-and-status response.
///
/// The player may report states this crate does not know about; those are
/// preserved as [`PlaybackStatus::Other`] rather than rejected.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PlaybackStatus {
    /// Playback is stopped.
    Stopped,
    /// A track is playing.
    Playing,
    /// Playback is paused.
    Paused,
    /// A status byte outside the known set.
    Other(u8),
}

impl From<u8> for PlaybackStatus {
    fn from(byte: u8) -> Self {
        match byte {
            0x00 => Self::Stopped,
            0x01 => Self::Playing,
            0x02 => Self::Paused,
            other => Self::Other(other),
        }
    }
}

impl From<PlaybackStatus> for u8 {
    fn from(status: PlaybackStatus) -> Self {
        match status {
            PlaybackStatus::Stopped => 0x00,
            PlaybackStatus::Playing => 0x01,
            PlaybackStatus::Paused => 0x02,
            PlaybackStatus::Other(other) => other,
        }
    }
}

impl Display for PlaybackStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Playing => write!(f, "playing"),
            Self::Paused => write!(f, "paused"),
            Self::Other(byte) => write!(f, "unknown status {byte:#04X}"),
        }
    }
}

/// Playback actions accepted by the playback-control command.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum PlaybackControl {
    /// Toggle between playing and paused.
    PlayPause = 0x01,
    /// Stop playback.
    Stop = 0x02,
    /// Skip to the next track.
    SkipForward = 0x03,
    /// Skip to the previous track.
    SkipBackward = 0x04,
    /// Start fast-forwarding.
    FastForward = 0x05,
    /// Start rewinding.
    Rewind = 0x06,
    /// Stop fast-forwarding or rewinding.
    StopSeek = 0x07,
}

impl From<PlaybackControl> for u8 {
    fn from(control: PlaybackControl) -> Self {
        control as Self
    }
}
