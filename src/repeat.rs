/// Repeat mode carried by the get/set-repeat commands.
///
/// Unknown bytes are preserved as [`RepeatMode::Other`]; the protocol may
/// grow values this crate does not know about.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RepeatMode {
    /// Repeat off.
    Off,
    /// Repeat the current song.
    OneSong,
    /// Repeat all songs in the current playlist.
    AllSongs,
    /// A mode byte outside the known set.
    Other(u8),
}

impl From<u8> for RepeatMode {
    fn from(byte: u8) -> Self {
        match byte {
            0x00 => Self::Off,
            0x01 => Self::OneSong,
            0x02 => Self::AllSongs,
            other => Self::Other(other),
        }
    }
}

impl From<RepeatMode> for u8 {
    fn from(mode: RepeatMode) -> Self {
        match mode {
            RepeatMode::Off => 0x00,
            RepeatMode::OneSong => 0x01,
            RepeatMode::AllSongs => 0x02,
            RepeatMode::Other(other) => other,
        }
    }
}
