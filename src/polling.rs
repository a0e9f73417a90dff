/// Whether the player should push elapsed-time updates every 500 ms.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum PollingMode {
    /// Stop pushing updates.
    #[default]
    Stop = 0x00,
    /// Start pushing updates.
    Start = 0x01,
}

impl From<PollingMode> for u8 {
    fn from(mode: PollingMode) -> Self {
        mode as Self
    }
}
