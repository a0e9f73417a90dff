/// Database item categories addressed by switch-to-item, item-count and item-names requests.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum ItemType {
    /// A playlist.
    Playlist = 0x01,
    /// An artist.
    Artist = 0x02,
    /// An album.
    Album = 0x03,
    /// A genre.
    Genre = 0x04,
    /// A song.
    Song = 0x05,
    /// A composer.
    Composer = 0x06,
}

impl From<ItemType> for u8 {
    fn from(item_type: ItemType) -> Self {
        item_type as Self
    }
}
