/// Shuffle mode carried by the get/set-shuffle commands.
///
/// Unknown bytes are preserved as [`ShuffleMode::Other`]; the protocol may
/// grow values this crate does not know about.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ShuffleMode {
    /// Shuffle off.
    Off,
    /// Shuffle by song.
    Songs,
    /// Shuffle by album.
    Albums,
    /// A mode byte outside the known set.
    Other(u8),
}

impl From<u8> for ShuffleMode {
    fn from(byte: u8) -> Self {
        match byte {
            0x00 => Self::Off,
            0x01 => Self::Songs,
            0x02 => Self::Albums,
            other => Self::Other(other),
        }
    }
}

impl From<ShuffleMode> for u8 {
    fn from(mode: ShuffleMode) -> Self {
        match mode {
            ShuffleMode::Off => 0x00,
            ShuffleMode::Songs => 0x01,
            ShuffleMode::Albums => 0x02,
            ShuffleMode::Other(other) => other,
        }
    }
}
