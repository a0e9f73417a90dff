//! Advanced Remote profile: database and playback queries with response frames.

use std::borrow::Cow;

use log::{debug, warn};
use num_traits::FromPrimitive;

use crate::command::{AdvancedCommand, Command, Params};
use crate::feedback::Feedback;
use crate::item::ItemType;
use crate::link::{Link, SerialLink};
use crate::mode::Mode;
use crate::playback::{PlaybackControl, PlaybackStatus};
use crate::polling::PollingMode;
use crate::protocol::{COMMAND_PREFIX, RESPONSE_BAD, RESPONSE_FEEDBACK, SWITCH_MODE};
use crate::repeat::RepeatMode;
use crate::shuffle::ShuffleMode;

type FeedbackHandler = Box<dyn FnMut(Feedback, u8)>;
type StringHandler = Box<dyn FnMut(&str)>;
type NumberHandler = Box<dyn FnMut(u32)>;
type ItemNameHandler = Box<dyn FnMut(u32, &str)>;
type TimeAndStatusHandler = Box<dyn FnMut(u32, u32, PlaybackStatus)>;
type ShuffleModeHandler = Box<dyn FnMut(ShuffleMode)>;
type RepeatModeHandler = Box<dyn FnMut(RepeatMode)>;

/// Registered response callbacks, at most one per response kind.
///
/// Registration replaces the previous handler; an unset handler means the
/// decoded response is silently discarded.
#[derive(Default)]
struct Handlers {
    feedback: Option<FeedbackHandler>,
    player_name: Option<StringHandler>,
    item_count: Option<NumberHandler>,
    item_name: Option<ItemNameHandler>,
    time_and_status: Option<TimeAndStatusHandler>,
    playlist_position: Option<NumberHandler>,
    title: Option<StringHandler>,
    artist: Option<StringHandler>,
    album: Option<StringHandler>,
    polling: Option<NumberHandler>,
    shuffle_mode: Option<ShuffleModeHandler>,
    repeat_mode: Option<RepeatModeHandler>,
    playlist_song_count: Option<NumberHandler>,
}

/// Advanced Remote over a framed serial link.
///
/// Requests are fire-and-forget; the player answers asynchronously with
/// response frames that [`AdvancedRemote::poll`] decodes and routes to the
/// registered handlers. Handlers run synchronously on the poll caller's
/// thread and should return promptly.
pub struct AdvancedRemote<S> {
    link: Link<S>,
    handlers: Handlers,
    enabled: bool,
}

impl<S> AdvancedRemote<S> {
    /// Creates a new advanced remote over the given serial transport.
    #[must_use]
    pub fn new(serial: S) -> Self {
        Self {
            link: Link::new(serial),
            handlers: Handlers::default(),
            enabled: false,
        }
    }

    /// Returns the inner serial transport.
    #[must_use]
    pub fn into_inner(self) -> S {
        self.link.into_inner()
    }

    /// Returns `true` if advanced mode has been requested via [`AdvancedRemote::enable`].
    ///
    /// Optimistic: the player confirms the switch only through a later
    /// feedback frame, and switching the player by other means goes
    /// unnoticed here.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Sets the handler for feedback reports: `(result, command code)`.
    pub fn set_feedback_handler(&mut self, handler: impl FnMut(Feedback, u8) + 'static) {
        self.handlers.feedback = Some(Box::new(handler));
    }

    /// Sets the handler for the player name response.
    pub fn set_player_name_handler(&mut self, handler: impl FnMut(&str) + 'static) {
        self.handlers.player_name = Some(Box::new(handler));
    }

    /// Sets the handler for item count responses.
    pub fn set_item_count_handler(&mut self, handler: impl FnMut(u32) + 'static) {
        self.handlers.item_count = Some(Box::new(handler));
    }

    /// Sets the handler for item name responses: `(offset, name)`.
    pub fn set_item_name_handler(&mut self, handler: impl FnMut(u32, &str) + 'static) {
        self.handlers.item_name = Some(Box::new(handler));
    }

    /// Sets the handler for time and status responses:
    /// `(track length in ms, elapsed time in ms, status)`.
    pub fn set_time_and_status_handler(
        &mut self,
        handler: impl FnMut(u32, u32, PlaybackStatus) + 'static,
    ) {
        self.handlers.time_and_status = Some(Box::new(handler));
    }

    /// Sets the handler for playlist position responses.
    pub fn set_playlist_position_handler(&mut self, handler: impl FnMut(u32) + 'static) {
        self.handlers.playlist_position = Some(Box::new(handler));
    }

    /// Sets the handler for track title responses.
    pub fn set_title_handler(&mut self, handler: impl FnMut(&str) + 'static) {
        self.handlers.title = Some(Box::new(handler));
    }

    /// Sets the handler for track artist responses.
    pub fn set_artist_handler(&mut self, handler: impl FnMut(&str) + 'static) {
        self.handlers.artist = Some(Box::new(handler));
    }

    /// Sets the handler for track album responses.
    pub fn set_album_handler(&mut self, handler: impl FnMut(&str) + 'static) {
        self.handlers.album = Some(Box::new(handler));
    }

    /// Sets the handler for elapsed-time polling updates.
    pub fn set_polling_handler(&mut self, handler: impl FnMut(u32) + 'static) {
        self.handlers.polling = Some(Box::new(handler));
    }

    /// Sets the handler for shuffle mode responses.
    pub fn set_shuffle_mode_handler(&mut self, handler: impl FnMut(ShuffleMode) + 'static) {
        self.handlers.shuffle_mode = Some(Box::new(handler));
    }

    /// Sets the handler for repeat mode responses.
    pub fn set_repeat_mode_handler(&mut self, handler: impl FnMut(RepeatMode) + 'static) {
        self.handlers.repeat_mode = Some(Box::new(handler));
    }

    /// Sets the handler for playlist song count responses.
    pub fn set_playlist_song_count_handler(&mut self, handler: impl FnMut(u32) + 'static) {
        self.handlers.playlist_song_count = Some(Box::new(handler));
    }
}

impl<S> AdvancedRemote<S>
where
    S: SerialLink,
{
    /// Drives one step of receive progress.
    ///
    /// Consumes at most one pending inbound byte; when that byte completes
    /// a checksum-valid frame, the frame is decoded and the matching
    /// handler, if any, is invoked before this method returns.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the transport failed.
    /// Protocol-level failures are absorbed with a diagnostic.
    pub fn poll(&mut self) -> std::io::Result<()> {
        if let Some(payload) = self.link.poll()? {
            dispatch(payload, &mut self.handlers);
        }

        Ok(())
    }

    /// Requests a switch to advanced mode.
    ///
    /// The player shows "OK to disconnect" and can only be controlled over
    /// the link while this mode is active; call
    /// [`AdvancedRemote::disable`] to hand control back to its own UI.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn enable(&mut self) -> std::io::Result<()> {
        self.link.send(&Command::new(
            Mode::Switching,
            SWITCH_MODE,
            Mode::AdvancedRemote as u8,
            Params::None,
        ))?;
        self.enabled = true;
        Ok(())
    }

    /// Requests a switch back to simple mode.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn disable(&mut self) -> std::io::Result<()> {
        self.link.send(&Command::new(
            Mode::Switching,
            SWITCH_MODE,
            Mode::SimpleRemote as u8,
            Params::None,
        ))?;
        self.enabled = false;
        Ok(())
    }

    /// Asks for the player's name.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_player_name(&mut self) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetPlayerName, Params::None)
    }

    /// Switches to the main library playlist (playlist 0).
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn switch_to_main_library_playlist(&mut self) -> std::io::Result<()> {
        self.request(AdvancedCommand::SwitchToMainLibraryPlaylist, Params::None)
    }

    /// Prepares a switch to the database item with the given type and index.
    ///
    /// Follow up with [`AdvancedRemote::execute_switch`] to start playing it.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn switch_to_item(&mut self, item_type: ItemType, index: u32) -> std::io::Result<()> {
        self.request(
            AdvancedCommand::SwitchToItem,
            Params::ByteNumber(item_type.into(), index),
        )
    }

    /// Asks for the number of items of the given type in the selected playlist.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_item_count(&mut self, item_type: ItemType) -> std::io::Result<()> {
        self.request(
            AdvancedCommand::GetItemCount,
            Params::Byte(item_type.into()),
        )
    }

    /// Asks for the names of `count` items of the given type starting at `offset`.
    ///
    /// The player answers with one item-name response per item.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_item_names(
        &mut self,
        item_type: ItemType,
        offset: u32,
        count: u32,
    ) -> std::io::Result<()> {
        self.request(
            AdvancedCommand::GetItemNames,
            Params::ByteNumbers(item_type.into(), offset, count),
        )
    }

    /// Asks for track length, elapsed time and playback status.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_time_and_status(&mut self) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetTimeAndStatus, Params::None)
    }

    /// Asks for the position within the current playlist.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_playlist_position(&mut self) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetPlaylistPosition, Params::None)
    }

    /// Asks for the title of the track at the given index.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_title(&mut self, index: u32) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetTitle, Params::Number(index))
    }

    /// Asks for the artist of the track at the given index.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_artist(&mut self, index: u32) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetArtist, Params::Number(index))
    }

    /// Asks for the album of the track at the given index.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_album(&mut self, index: u32) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetAlbum, Params::Number(index))
    }

    /// Starts or stops elapsed-time polling.
    ///
    /// While polling is on, the player pushes an elapsed-time update every
    /// 500 ms; updates are routed to the polling handler.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn set_polling_mode(&mut self, mode: PollingMode) -> std::io::Result<()> {
        self.request(AdvancedCommand::SetPollingMode, Params::Byte(mode.into()))
    }

    /// Executes the switch prepared by [`AdvancedRemote::switch_to_item`]
    /// and jumps to the given song index.
    ///
    /// `0xFFFF_FFFF` starts at the beginning of the playlist, even when
    /// shuffled.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn execute_switch(&mut self, index: u32) -> std::io::Result<()> {
        self.request(AdvancedCommand::ExecuteSwitch, Params::Number(index))
    }

    /// Controls playback (play/pause, stop, skip, seek).
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn control_playback(&mut self, control: PlaybackControl) -> std::io::Result<()> {
        self.request(
            AdvancedCommand::PlaybackControl,
            Params::Byte(control.into()),
        )
    }

    /// Asks for the current shuffle mode.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_shuffle_mode(&mut self) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetShuffleMode, Params::None)
    }

    /// Sets the shuffle mode.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn set_shuffle_mode(&mut self, mode: ShuffleMode) -> std::io::Result<()> {
        self.request(AdvancedCommand::SetShuffleMode, Params::Byte(mode.into()))
    }

    /// Asks for the current repeat mode.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_repeat_mode(&mut self) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetRepeatMode, Params::None)
    }

    /// Sets the repeat mode.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) -> std::io::Result<()> {
        self.request(AdvancedCommand::SetRepeatMode, Params::Byte(mode.into()))
    }

    /// Asks for the number of songs in the current playlist.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn get_playlist_song_count(&mut self) -> std::io::Result<()> {
        self.request(AdvancedCommand::GetPlaylistSongCount, Params::None)
    }

    /// Jumps to the song at the given index in the current playlist.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`](std::io::Error) if the write operation failed.
    pub fn jump_to_song(&mut self, index: u32) -> std::io::Result<()> {
        self.request(AdvancedCommand::JumpToSong, Params::Number(index))
    }

    fn request(&mut self, command: AdvancedCommand, params: Params) -> std::io::Result<()> {
        self.link.send(&Command::new(
            Mode::AdvancedRemote,
            COMMAND_PREFIX,
            command as u8,
            params,
        ))
    }
}

/// Decodes a validated frame payload and routes it to the matching handler.
fn dispatch(payload: &[u8], handlers: &mut Handlers) {
    let [mode, cmd1, selector, data @ ..] = payload else {
        debug!("Payload too short to dispatch: {payload:02X?}");
        return;
    };

    if *mode != Mode::AdvancedRemote as u8 {
        debug!("Ignoring response for mode {mode:#04X}.");
        return;
    }

    if *cmd1 != COMMAND_PREFIX {
        debug!("First command byte is {cmd1:#04X}, not {COMMAND_PREFIX:#04X}. Ignoring.");
        return;
    }

    match *selector {
        RESPONSE_BAD => {
            let [result, command, extra, ..] = data else {
                warn!("Truncated bad-response report: {data:02X?}");
                return;
            };
            warn!(
                "Bad response report: result={result:#04X}, command={command:#04X}, extra={extra:#04X}."
            );
        }
        RESPONSE_FEEDBACK => {
            let [result, command, extra, ..] = data else {
                warn!("Truncated feedback report: {data:02X?}");
                return;
            };
            debug!("Feedback: result={result:#04X}, command={command:#04X}, extra={extra:#04X}.");

            let Some(feedback) = Feedback::from_u8(*result) else {
                warn!("Feedback with unknown result {result:#04X} for command {command:#04X}.");
                return;
            };

            if let Some(handler) = &mut handlers.feedback {
                handler(feedback, *command);
            }
        }
        selector => {
            let Some(command) = AdvancedCommand::from_u8(selector.wrapping_sub(1)) else {
                debug!("Unsupported response selector {selector:#04X}. Ignoring.");
                return;
            };
            dispatch_response(command, data, handlers);
        }
    }
}

fn dispatch_response(command: AdvancedCommand, data: &[u8], handlers: &mut Handlers) {
    match command {
        AdvancedCommand::GetPlayerName => {
            if let Some(handler) = &mut handlers.player_name {
                handler(&read_string(data));
            }
        }
        AdvancedCommand::GetItemCount => {
            let Some(count) = read_u32(data, 0) else {
                warn!("Truncated item count response: {data:02X?}");
                return;
            };
            if let Some(handler) = &mut handlers.item_count {
                handler(count);
            }
        }
        AdvancedCommand::GetItemNames => {
            let Some(offset) = read_u32(data, 0) else {
                warn!("Truncated item name response: {data:02X?}");
                return;
            };
            if let Some(handler) = &mut handlers.item_name {
                handler(offset, &read_string(&data[4..]));
            }
        }
        AdvancedCommand::GetTimeAndStatus => {
            let (Some(length), Some(elapsed), Some(&status)) =
                (read_u32(data, 0), read_u32(data, 4), data.get(8))
            else {
                warn!("Truncated time and status response: {data:02X?}");
                return;
            };
            if let Some(handler) = &mut handlers.time_and_status {
                handler(length, elapsed, status.into());
            }
        }
        AdvancedCommand::GetPlaylistPosition => {
            let Some(position) = read_u32(data, 0) else {
                warn!("Truncated playlist position response: {data:02X?}");
                return;
            };
            if let Some(handler) = &mut handlers.playlist_position {
                handler(position);
            }
        }
        AdvancedCommand::GetTitle => {
            if let Some(handler) = &mut handlers.title {
                handler(&read_string(data));
            }
        }
        AdvancedCommand::GetArtist => {
            if let Some(handler) = &mut handlers.artist {
                handler(&read_string(data));
            }
        }
        AdvancedCommand::GetAlbum => {
            if let Some(handler) = &mut handlers.album {
                handler(&read_string(data));
            }
        }
        AdvancedCommand::SetPollingMode => {
            let Some(elapsed) = read_u32(data, 0) else {
                warn!("Truncated polling update: {data:02X?}");
                return;
            };
            if let Some(handler) = &mut handlers.polling {
                handler(elapsed);
            }
        }
        AdvancedCommand::GetShuffleMode => {
            let Some(&mode) = data.first() else {
                warn!("Empty shuffle mode response.");
                return;
            };
            if let Some(handler) = &mut handlers.shuffle_mode {
                handler(mode.into());
            }
        }
        AdvancedCommand::GetRepeatMode => {
            let Some(&mode) = data.first() else {
                warn!("Empty repeat mode response.");
                return;
            };
            if let Some(handler) = &mut handlers.repeat_mode {
                handler(mode.into());
            }
        }
        AdvancedCommand::GetPlaylistSongCount => {
            let Some(count) = read_u32(data, 0) else {
                warn!("Truncated playlist song count response: {data:02X?}");
                return;
            };
            if let Some(handler) = &mut handlers.playlist_song_count {
                handler(count);
            }
        }
        command => {
            debug!("No response decoder for \"{command}\". Ignoring.");
        }
    }
}

/// Reads a big-endian 32-bit value at the given offset into the response data.
fn read_u32(data: &[u8], offset: usize) -> Option<u32> {
    data.get(offset..offset + 4)
        .and_then(|bytes| bytes.try_into().ok())
        .map(u32::from_be_bytes)
}

/// Reads a null-terminated string; the terminator or the end of the payload ends it.
fn read_string(data: &[u8]) -> Cow<'_, str> {
    let end = data.iter().position(|&byte| byte == 0).unwrap_or(data.len());
    String::from_utf8_lossy(&data[..end])
}

#[allow(clippy::unwrap_used, clippy::field_reassign_with_default)]
#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    use super::{dispatch, AdvancedRemote, Handlers};
    use crate::checksum;
    use crate::feedback::Feedback;
    use crate::link::SerialLink;
    use crate::playback::PlaybackStatus;
    use crate::shuffle::ShuffleMode;

    #[derive(Debug, Default)]
    struct MockSerial {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
    }

    impl SerialLink for MockSerial {
        fn bytes_available(&mut self) -> std::io::Result<u32> {
            Ok(self.rx.len() as u32)
        }

        fn read_byte(&mut self) -> std::io::Result<u8> {
            self.rx
                .pop_front()
                .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::TimedOut, "no byte pending"))
        }

        fn write_all(&mut self, bytes: &[u8]) -> std::io::Result<()> {
            self.tx.extend_from_slice(bytes);
            Ok(())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn frame(payload: &[u8]) -> Vec<u8> {
        let mut bytes = vec![0xFF, 0x55, payload.len() as u8];
        bytes.extend_from_slice(payload);
        bytes.push(checksum::compute(payload.len() as u8, payload));
        bytes
    }

    #[test]
    fn test_feedback_callback() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.feedback = Some(Box::new(move |feedback, command| {
            *captured.borrow_mut() = Some((feedback, command));
        }));

        dispatch(&[0x04, 0x00, 0x01, 0x00, 0x14, 0x00], &mut handlers);
        assert_eq!(*received.borrow(), Some((Feedback::Success, 0x14)));
    }

    #[test]
    fn test_feedback_with_unknown_result_is_dropped() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.feedback = Some(Box::new(move |feedback, command| {
            *captured.borrow_mut() = Some((feedback, command));
        }));

        dispatch(&[0x04, 0x00, 0x01, 0x03, 0x14, 0x00], &mut handlers);
        assert_eq!(*received.borrow(), None);
    }

    #[test]
    fn test_item_count_callback() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.item_count = Some(Box::new(move |count| {
            *captured.borrow_mut() = Some(count);
        }));

        // Selector 0x19 = get item count (0x18) + 1; value 0x0000012C.
        dispatch(
            &[0x04, 0x00, 0x19, 0x00, 0x00, 0x01, 0x2C],
            &mut handlers,
        );
        assert_eq!(*received.borrow(), Some(300));
    }

    #[test]
    fn test_title_string_ends_at_terminator() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.title = Some(Box::new(move |title| {
            *captured.borrow_mut() = Some(title.to_owned());
        }));

        let mut payload = vec![0x04, 0x00, 0x21];
        payload.extend_from_slice(b"Breathe\0");
        payload.push(0xAA);
        dispatch(&payload, &mut handlers);
        assert_eq!(received.borrow().as_deref(), Some("Breathe"));
    }

    #[test]
    fn test_unterminated_string_ends_at_payload_end() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.player_name = Some(Box::new(move |name| {
            *captured.borrow_mut() = Some(name.to_owned());
        }));

        let mut payload = vec![0x04, 0x00, 0x15];
        payload.extend_from_slice(b"sansa");
        dispatch(&payload, &mut handlers);
        assert_eq!(received.borrow().as_deref(), Some("sansa"));
    }

    #[test]
    fn test_item_name_callback() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.item_name = Some(Box::new(move |offset, name| {
            *captured.borrow_mut() = Some((offset, name.to_owned()));
        }));

        let mut payload = vec![0x04, 0x00, 0x1B, 0x00, 0x00, 0x00, 0x07];
        payload.extend_from_slice(b"Meddle\0");
        dispatch(&payload, &mut handlers);
        assert_eq!(
            *received.borrow(),
            Some((7, String::from("Meddle")))
        );
    }

    #[test]
    fn test_time_and_status_callback() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.time_and_status = Some(Box::new(move |length, elapsed, status| {
            *captured.borrow_mut() = Some((length, elapsed, status));
        }));

        dispatch(
            &[
                0x04, 0x00, 0x1D, // selector for get time and status
                0x00, 0x02, 0xF4, 0x78, // track length 193656 ms
                0x00, 0x00, 0x4E, 0x20, // elapsed 20000 ms
                0x01, // playing
            ],
            &mut handlers,
        );
        assert_eq!(
            *received.borrow(),
            Some((193_656, 20_000, PlaybackStatus::Playing))
        );
    }

    #[test]
    fn test_unknown_shuffle_byte_is_preserved() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.shuffle_mode = Some(Box::new(move |mode| {
            *captured.borrow_mut() = Some(mode);
        }));

        dispatch(&[0x04, 0x00, 0x2D, 0x07], &mut handlers);
        assert_eq!(*received.borrow(), Some(ShuffleMode::Other(0x07)));
    }

    #[test]
    fn test_other_mode_is_ignored() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.item_count = Some(Box::new(move |count| {
            *captured.borrow_mut() = Some(count);
        }));

        dispatch(
            &[0x02, 0x00, 0x19, 0x00, 0x00, 0x01, 0x2C],
            &mut handlers,
        );
        assert_eq!(*received.borrow(), None);
    }

    #[test]
    fn test_nonzero_first_command_byte_is_ignored() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.item_count = Some(Box::new(move |count| {
            *captured.borrow_mut() = Some(count);
        }));

        dispatch(
            &[0x04, 0x01, 0x19, 0x00, 0x00, 0x01, 0x2C],
            &mut handlers,
        );
        assert_eq!(*received.borrow(), None);
    }

    #[test]
    fn test_unknown_selector_is_ignored() {
        let mut handlers = Handlers::default();
        dispatch(&[0x04, 0x00, 0x7F, 0x01, 0x02], &mut handlers);
    }

    #[test]
    fn test_missing_handler_is_a_no_op() {
        let mut handlers = Handlers::default();
        dispatch(&[0x04, 0x00, 0x19, 0x00, 0x00, 0x01, 0x2C], &mut handlers);
    }

    #[test]
    fn test_truncated_number_is_dropped() {
        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut handlers = Handlers::default();
        handlers.item_count = Some(Box::new(move |count| {
            *captured.borrow_mut() = Some(count);
        }));

        dispatch(&[0x04, 0x00, 0x19, 0x00, 0x01], &mut handlers);
        assert_eq!(*received.borrow(), None);
    }

    #[test]
    fn test_registration_replaces_previous_handler() {
        let received = Rc::new(RefCell::new(Vec::new()));

        let mut remote = AdvancedRemote::new(MockSerial::default());
        let captured = Rc::clone(&received);
        remote.set_item_count_handler(move |count| captured.borrow_mut().push(("first", count)));
        let captured = Rc::clone(&received);
        remote.set_item_count_handler(move |count| captured.borrow_mut().push(("second", count)));

        dispatch(
            &[0x04, 0x00, 0x19, 0x00, 0x00, 0x01, 0x2C],
            &mut remote.handlers,
        );
        assert_eq!(*received.borrow(), [("second", 300)]);
    }

    #[test]
    fn test_poll_decodes_frames_end_to_end() {
        let mut serial = MockSerial::default();
        serial.rx.push_back(0xFF); // stray header byte before the frame
        serial
            .rx
            .extend(frame(&[0x04, 0x00, 0x19, 0x00, 0x00, 0x01, 0x2C]));

        let received = Rc::new(RefCell::new(None));
        let captured = Rc::clone(&received);

        let mut remote = AdvancedRemote::new(serial);
        remote.set_item_count_handler(move |count| {
            *captured.borrow_mut() = Some(count);
        });

        for _ in 0..16 {
            remote.poll().unwrap();
        }

        assert_eq!(*received.borrow(), Some(300));
    }

    #[test]
    fn test_enable_sends_mode_switch_frame() {
        let mut remote = AdvancedRemote::new(MockSerial::default());
        remote.enable().unwrap();
        assert!(remote.is_enabled());
        assert_eq!(
            remote.into_inner().tx,
            [0xFF, 0x55, 0x03, 0x00, 0x01, 0x04, 0xF8]
        );
    }

    #[test]
    fn test_get_item_count_request_bytes() {
        let mut remote = AdvancedRemote::new(MockSerial::default());
        remote.get_item_count(crate::item::ItemType::Album).unwrap();
        assert_eq!(
            remote.into_inner().tx,
            [0xFF, 0x55, 0x04, 0x04, 0x00, 0x18, 0x03, 0xDD]
        );
    }
}
