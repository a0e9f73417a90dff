//! Apple Accessory Protocol (AAP) serial remote, host side.
//!
//! This library implements the serial remote-control protocol spoken by
//! iPod-era portable media players over their dock connector: a
//! `0xFF 0x55` framed link with an additive checksum, a Simple Remote
//! profile (button presses) and an Advanced Remote profile (database and
//! playback queries answered by response frames).
//!
//! The engine is polled: call [`SimpleRemote::poll`] or
//! [`AdvancedRemote::poll`] from your main loop and it will consume at most
//! one pending byte per call, reassembling frames incrementally and
//! invoking the callbacks you registered once a complete, checksum-valid
//! response arrives.

pub use advanced::AdvancedRemote;
pub use command::{AdvancedCommand, Command, Params};
pub use feedback::Feedback;
pub use item::ItemType;
pub use link::{Link, SerialLink};
pub use mode::Mode;
pub use playback::{PlaybackControl, PlaybackStatus};
pub use polling::PollingMode;
pub use receiver::Receiver;
pub use repeat::RepeatMode;
pub use serial_port::open;
pub use shuffle::ShuffleMode;
pub use simple::{Button, SimpleRemote};
pub use types::{Payload, MAX_PAYLOAD_SIZE};

mod advanced;
mod checksum;
mod command;
mod feedback;
mod item;
mod link;
mod mode;
mod playback;
mod polling;
mod protocol;
mod receiver;
mod repeat;
mod serial_port;
mod shuffle;
mod simple;
mod types;
