//! Logical commands and their wire encoding.

use std::fmt::{Display, Formatter};
use std::io::{Error, ErrorKind};

use num_derive::FromPrimitive;

use crate::mode::Mode;
use crate::types::Payload;

/// Advanced Remote command codes.
///
/// Responses to a command carry the command's code plus one as their
/// response selector; the reserved bad-response and feedback selectors are
/// the only exceptions.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, FromPrimitive)]
#[repr(u8)]
pub enum AdvancedCommand {
    /// Get the player's name.
    GetPlayerName = 0x14,
    /// Switch to the main library playlist.
    SwitchToMainLibraryPlaylist = 0x16,
    /// Switch to a database item by type and index.
    SwitchToItem = 0x17,
    /// Get the number of items of a type.
    GetItemCount = 0x18,
    /// Get the names of a range of items.
    GetItemNames = 0x1A,
    /// Get track length, elapsed time and playback status.
    GetTimeAndStatus = 0x1C,
    /// Get the position in the current playlist.
    GetPlaylistPosition = 0x1E,
    /// Get the title of a track.
    GetTitle = 0x20,
    /// Get the artist of a track.
    GetArtist = 0x22,
    /// Get the album of a track.
    GetAlbum = 0x24,
    /// Start or stop elapsed-time polling.
    SetPollingMode = 0x26,
    /// Execute the switch prepared by switch-to-item and jump to an index.
    ExecuteSwitch = 0x28,
    /// Control playback (play/pause, skip, seek).
    PlaybackControl = 0x29,
    /// Get the shuffle mode.
    GetShuffleMode = 0x2C,
    /// Set the shuffle mode.
    SetShuffleMode = 0x2E,
    /// Get the repeat mode.
    GetRepeatMode = 0x2F,
    /// Set the repeat mode.
    SetRepeatMode = 0x31,
    /// Get the number of songs in the current playlist.
    GetPlaylistSongCount = 0x35,
    /// Jump to a song in the current playlist.
    JumpToSong = 0x37,
}

impl Display for AdvancedCommand {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GetPlayerName => write!(f, "get player name"),
            Self::SwitchToMainLibraryPlaylist => write!(f, "switch to main library playlist"),
            Self::SwitchToItem => write!(f, "switch to item"),
            Self::GetItemCount => write!(f, "get item count"),
            Self::GetItemNames => write!(f, "get item names"),
            Self::GetTimeAndStatus => write!(f, "get time and status"),
            Self::GetPlaylistPosition => write!(f, "get playlist position"),
            Self::GetTitle => write!(f, "get title"),
            Self::GetArtist => write!(f, "get artist"),
            Self::GetAlbum => write!(f, "get album"),
            Self::SetPollingMode => write!(f, "set polling mode"),
            Self::ExecuteSwitch => write!(f, "execute switch"),
            Self::PlaybackControl => write!(f, "playback control"),
            Self::GetShuffleMode => write!(f, "get shuffle mode"),
            Self::SetShuffleMode => write!(f, "set shuffle mode"),
            Self::GetRepeatMode => write!(f, "get repeat mode"),
            Self::SetRepeatMode => write!(f, "set repeat mode"),
            Self::GetPlaylistSongCount => write!(f, "get playlist song count"),
            Self::JumpToSong => write!(f, "jump to song"),
        }
    }
}

/// Parameters of a command.
///
/// These are the only shapes the protocol uses. Numbers always serialize
/// big-endian, most significant byte first.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Params {
    /// No parameters.
    None,
    /// A single byte.
    Byte(u8),
    /// A single 32-bit number.
    Number(u32),
    /// A byte followed by a 32-bit number.
    ByteNumber(u8, u32),
    /// A byte followed by two 32-bit numbers.
    ByteNumbers(u8, u32, u32),
}

/// A logical request: protocol mode, two command bytes and parameters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Command {
    mode: Mode,
    cmd1: u8,
    cmd2: u8,
    params: Params,
}

impl Command {
    /// Creates a new command.
    #[must_use]
    pub const fn new(mode: Mode, cmd1: u8, cmd2: u8, params: Params) -> Self {
        Self {
            mode,
            cmd1,
            cmd2,
            params,
        }
    }

    /// Serializes the command into a frame payload.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] if the payload would exceed the frame payload capacity.
    pub fn payload(&self) -> std::io::Result<Payload> {
        let mut payload = Payload::new();
        push(&mut payload, self.mode as u8)?;
        push(&mut payload, self.cmd1)?;
        push(&mut payload, self.cmd2)?;

        match self.params {
            Params::None => (),
            Params::Byte(byte) => {
                push(&mut payload, byte)?;
            }
            Params::Number(number) => {
                extend(&mut payload, &number.to_be_bytes())?;
            }
            Params::ByteNumber(byte, number) => {
                push(&mut payload, byte)?;
                extend(&mut payload, &number.to_be_bytes())?;
            }
            Params::ByteNumbers(byte, first, second) => {
                push(&mut payload, byte)?;
                extend(&mut payload, &first.to_be_bytes())?;
                extend(&mut payload, &second.to_be_bytes())?;
            }
        }

        Ok(payload)
    }
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "CMD({}, {:#04X}, {:#04X})",
            self.mode, self.cmd1, self.cmd2
        )
    }
}

pub(crate) fn push(payload: &mut Payload, byte: u8) -> std::io::Result<()> {
    payload
        .push(byte)
        .map_err(|byte| overflow(&[byte]))
}

pub(crate) fn extend(payload: &mut Payload, bytes: &[u8]) -> std::io::Result<()> {
    payload
        .extend_from_slice(bytes)
        .map_err(|()| overflow(bytes))
}

fn overflow(bytes: &[u8]) -> Error {
    Error::new(
        ErrorKind::OutOfMemory,
        format!("Payload buffer overflow: {bytes:02X?}"),
    )
}
