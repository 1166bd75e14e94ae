//! Base types for the structure of an IXF container.

use binrw::BinRead;
use derive_more::derive::{From, Into};
use std::fmt;

/// Resource type tag of an index entry.
///
/// The named constants are the tags the game ships. The set is open: any
/// other value is carried through untouched and extracted as opaque binary.
/// These values are wire format and must not change.
#[derive(BinRead, Debug, Copy, Clone, PartialEq, Eq, Hash, From, Into)]
#[br(little)]
pub struct ResourceType(pub u32);

impl ResourceType {
    pub const SPRITE_IMAGE: ResourceType = ResourceType(0x0000_0000);
    pub const SPRITE_IMAGE_INFO: ResourceType = ResourceType(0x0000_0001);
    pub const SERIALIZED_CITY: ResourceType = ResourceType(0x0000_0FA1);
    pub const SPRITE_ATTRIBUTES: ResourceType = ResourceType(0x0000_6300);
    pub const SPRITE_ANIMATION_ATTRIBUTES: ResourceType = ResourceType(0x0000_6301);
    pub const STRING: ResourceType = ResourceType(0x2026_960B);
    pub const BUILDING_OCCUPANT_ATTRIBUTES: ResourceType = ResourceType(0x207E_DC0E);
    pub const PORT_OCCUPANT_ATTRIBUTES: ResourceType = ResourceType(0x2200_55E1);
    pub const BUFFER_RESOURCE: ResourceType = ResourceType(0x62B9_DA24);
    pub const SERIAL_TEXT: ResourceType = ResourceType(0x81F5_3D09);
    pub const OCCUPANT_ATTRIBUTE_OVERRIDES: ResourceType = ResourceType(0x856C_D19A);
    pub const HOT_KEY: ResourceType = ResourceType(0xA2E3_D533);
    pub const OCCUPANT_ATTRIBUTES: ResourceType = ResourceType(0xC179_C042);
    pub const NETWORK_OCCUPANT_ATTRIBUTES: ResourceType = ResourceType(0xE223_741F);
    pub const FLORA_OCCUPANT_ATTRIBUTES: ResourceType = ResourceType(0xFFD3_0C03);

    /// File extension used when a resource of this type is written out.
    pub fn extension(self) -> &'static str {
        match self {
            Self::BUFFER_RESOURCE => ".bmp",
            Self::BUILDING_OCCUPANT_ATTRIBUTES
            | Self::FLORA_OCCUPANT_ATTRIBUTES
            | Self::OCCUPANT_ATTRIBUTES
            | Self::OCCUPANT_ATTRIBUTE_OVERRIDES
            | Self::NETWORK_OCCUPANT_ATTRIBUTES
            | Self::PORT_OCCUPANT_ATTRIBUTES => ".tkb1",
            Self::HOT_KEY | Self::SERIAL_TEXT | Self::STRING => ".txt",
            Self::SPRITE_ATTRIBUTES => ".sat",
            Self::SPRITE_ANIMATION_ATTRIBUTES => ".saa",
            Self::SPRITE_IMAGE => ".sim",
            Self::SPRITE_IMAGE_INFO => ".sii",
            _ => ".bin",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.0)
    }
}

impl Default for ResourceType {
    fn default() -> Self {
        ResourceType(0)
    }
}

/// IXF index record
///
/// One fixed 20-byte directory record. Type, Group and Instance form the
/// TGI identity of the entry; Offset and Length address its payload within
/// the same container file.
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[br(little)]
pub struct IndexEntry {
    /// Resource group id
    pub group: u32,

    /// Resource instance id
    pub instance: u32,

    /// Resource type tag; affects only post-extraction handling
    pub res_type: ResourceType,

    /// Payload position from the start of the file
    pub offset: u32,

    /// Payload length in bytes
    pub length: u32,
}

impl IndexEntry {
    /// An all-zero record ends the directory.
    pub fn is_terminator(&self) -> bool {
        self.group == 0
            && self.instance == 0
            && self.res_type.0 == 0
            && self.offset == 0
            && self.length == 0
    }

    /// An all-ones record is a deleted slot and never carries data.
    pub fn is_deleted(&self) -> bool {
        self.group == u32::MAX
            && self.instance == u32::MAX
            && self.res_type.0 == u32::MAX
            && self.offset == u32::MAX
            && self.length == u32::MAX
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use pretty_assertions::assert_eq;

    use crate::types::{IndexEntry, ResourceType};

    #[test]
    fn read_record() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x01, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x00, 0x00,
            0x0B, 0x96, 0x26, 0x20,
            0x18, 0x00, 0x00, 0x00,
            0x08, 0x00, 0x00, 0x00,
        ]);

        let expected = IndexEntry {
            group: 1,
            instance: 2,
            res_type: ResourceType::STRING,
            offset: 24,
            length: 8,
        };

        assert_eq!(IndexEntry::read(&mut input).unwrap(), expected);
    }

    #[test]
    fn classify_sentinels() {
        let terminator = IndexEntry::default();
        assert!(terminator.is_terminator());
        assert!(!terminator.is_deleted());

        let deleted = IndexEntry {
            group: u32::MAX,
            instance: u32::MAX,
            res_type: ResourceType(u32::MAX),
            offset: u32::MAX,
            length: u32::MAX,
        };
        assert!(deleted.is_deleted());
        assert!(!deleted.is_terminator());

        let live = IndexEntry {
            res_type: ResourceType::SPRITE_IMAGE,
            offset: 24,
            ..Default::default()
        };
        assert!(!live.is_terminator());
        assert!(!live.is_deleted());
    }

    #[test]
    fn extension_mapping() {
        assert_eq!(ResourceType::BUFFER_RESOURCE.extension(), ".bmp");
        assert_eq!(ResourceType::OCCUPANT_ATTRIBUTES.extension(), ".tkb1");
        assert_eq!(ResourceType::PORT_OCCUPANT_ATTRIBUTES.extension(), ".tkb1");
        assert_eq!(ResourceType::HOT_KEY.extension(), ".txt");
        assert_eq!(ResourceType::STRING.extension(), ".txt");
        assert_eq!(ResourceType::SPRITE_ATTRIBUTES.extension(), ".sat");
        assert_eq!(ResourceType::SPRITE_ANIMATION_ATTRIBUTES.extension(), ".saa");
        assert_eq!(ResourceType::SPRITE_IMAGE.extension(), ".sim");
        assert_eq!(ResourceType::SPRITE_IMAGE_INFO.extension(), ".sii");
        assert_eq!(ResourceType::SERIALIZED_CITY.extension(), ".bin");
        assert_eq!(ResourceType(0xDEAD_BEEF).extension(), ".bin");
    }

    #[test]
    fn display_is_hex() {
        assert_eq!(ResourceType::STRING.to_string(), "0x2026960B");
        assert_eq!(ResourceType::SPRITE_IMAGE.to_string(), "0x00000000");
    }
}
