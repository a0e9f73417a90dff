//! Simple Remote profile: stateless button presses, no responses.

use log::debug;

use crate::command;
use crate::link::{Link, SerialLink};
use crate::mode::Mode;
use crate::types::Payload;

/// Buttons of the Simple Remote profile.
///
/// Each button maps to a bit position spread over up to five command
/// bytes; the encodings come straight off the wire protocol.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Button {
    /// Play/pause rocker.
    PlayPause,
    /// Volume up.
    VolumeUp,
    /// Volume down.
    VolumeDown,
    /// Skip to the next track; hold for fast-forward.
    SkipForward,
    /// Skip to the previous track; hold for rewind.
    SkipBackward,
    /// Jump to the next album.
    NextAlbum,
    /// Jump to the previous album.
    PreviousAlbum,
    /// Stop playback.
    Stop,
    /// Start playing without toggling.
    JustPlay,
    /// Pause without toggling.
    JustPause,
    /// Toggle mute.
    ToggleMute,
    /// Jump to the next playlist.
    NextPlaylist,
    /// Jump to the previous playlist.
    PreviousPlaylist,
    /// Toggle shuffle.
    ToggleShuffle,
    /// Toggle repeat.
    ToggleRepeat,
    /// Power the player off.
    PowerOff,
    /// Power the player on.
    PowerOn,
    /// Menu button.
    Menu,
    /// OK/select button.
    Select,
    /// Scroll wheel up.
    ScrollUp,
    /// Scroll wheel down.
    ScrollDown,
}

impl Button {
    /// Returns the command bytes of the button, following the mode byte.
    #[must_use]
    pub const fn command_bytes(self) -> &'static [u8] {
        match self {
            Self::PlayPause => &[0x00, 0x01],
            Self::VolumeUp => &[0x00, 0x02],
            Self::VolumeDown => &[0x00, 0x04],
            Self::SkipForward => &[0x00, 0x08],
            Self::SkipBackward => &[0x00, 0x10],
            Self::NextAlbum => &[0x00, 0x20],
            Self::PreviousAlbum => &[0x00, 0x40],
            Self::Stop => &[0x00, 0x80],
            Self::JustPlay => &[0x00, 0x00, 0x01],
            Self::JustPause => &[0x00, 0x00, 0x02],
            Self::ToggleMute => &[0x00, 0x00, 0x04],
            Self::NextPlaylist => &[0x00, 0x00, 0x20],
            Self::PreviousPlaylist => &[0x00, 0x00, 0x40],
            Self::ToggleShuffle => &[0x00, 0x00, 0x80],
            Self::ToggleRepeat => &[0x00, 0x00, 0x00, 0x01],
            Self::PowerOff => &[0x00, 0x00, 0x00, 0x04],
            Self::PowerOn => &[0x00, 0x00, 0x00, 0x08],
            Self::Menu => &[0x00, 0x00, 0x00, 0x40],
            Self::Select => &[0x00, 0x00, 0x00, 0x80],
            Self::ScrollUp => &[0x00, 0x00, 0x00, 0x00, 0x01],
            Self::ScrollDown => &[0x00, 0x00, 0x00, 0x00, 0x02],
        }
    }
}

/// All buttons released; sent when a press ends.
const RELEASED: &[u8] = &[0x00, 0x00];

/// Simple Remote over a framed serial link.
///
/// Buttons stay "held" on the player until [`SimpleRemote::release`] is
/// sent, mirroring a physical remote.
#[derive(Debug)]
pub struct SimpleRemote<S> {
    link: Link<S>,
}

impl<S> SimpleRemote<S> {
    /// Creates a new simple remote over the given serial transport.
    #[must_use]
    pub const fn new(serial: S) -> Self {
        Self {
            link: Link::new(serial),
        }
    }

    /// Returns the inner serial transport.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.link.into_inner()
    }
}

impl<S> SimpleRemote<S>
where
    S: SerialLink,
{
    /// Presses a button.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn press(&mut self, button: Button) -> std::io::Result<()> {
        debug!("Pressing {button:?}.");
        self.send_button(button.command_bytes())
    }

    /// Releases all buttons.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn release(&mut self) -> std::io::Result<()> {
        debug!("Releasing buttons.");
        self.send_button(RELEASED)
    }

    /// Drives one step of receive progress, discarding inbound frames.
    ///
    /// The player sends no responses in simple mode; anything received is
    /// logged and dropped to keep the receive state machine aligned.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the transport failed.
    pub fn poll(&mut self) -> std::io::Result<()> {
        if let Some(payload) = self.link.poll()? {
            debug!("Ignoring response in simple mode: {payload:02X?}");
        }

        Ok(())
    }

    fn send_button(&mut self, command_bytes: &[u8]) -> std::io::Result<()> {
        let mut payload = Payload::new();
        command::push(&mut payload, Mode::SimpleRemote as u8)?;
        command::extend(&mut payload, command_bytes)?;
        self.link.send_raw(&payload)
    }
}
