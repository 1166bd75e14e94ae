//! Post-extraction payload handling.
//!
//! Classifies a raw entry payload, decodes the compressed shapes, and names
//! the output file. The directory itself never depends on any of this; type
//! tags only matter once the payload is in hand.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::Result;
use crate::types::{IndexEntry, ResourceType};

/// Payload prefix marking a container-compressed entry.
pub const PACKED_ENTRY_SIGNATURE: [u8; 8] = [0x07, 0x01, 0x00, 0x00, 0x00, 0x00, 0x08, 0x00];

/// The per-entry compression header occupies this much of the payload: the
/// 8-byte signature plus 12 opaque bytes. The QFS stream follows it.
const PACKED_HEADER_LEN: usize = 20;

/// A sprite-image payload with either flag set in the word at offset 4
/// stores a QFS stream behind the packed header.
const SPRITE_ALPHA_FLAGS: u32 = 0x1000_0000 | 0x0008_0000;

/// Unwrap a raw payload into the bytes worth writing to disk.
///
/// Sprite images consult only their alpha flags; the packed-entry signature
/// applies to every other type. String resources drop their length wrapper.
pub fn unpack(res_type: ResourceType, payload: Vec<u8>) -> Result<Vec<u8>> {
    if res_type == ResourceType::SPRITE_IMAGE {
        if has_sprite_alpha_flags(&payload) {
            return Ok(sc3_qfs::decompress(&payload[PACKED_HEADER_LEN..])?);
        }
        return Ok(payload);
    }
    if is_packed(&payload) {
        return Ok(sc3_qfs::decompress(&payload[PACKED_HEADER_LEN..])?);
    }
    if res_type == ResourceType::STRING {
        return Ok(unwrap_text(&payload));
    }
    Ok(payload)
}

/// Output filename for an extracted entry: the TGI triple in hex plus the
/// type-derived extension.
pub fn output_name(entry: &IndexEntry) -> String {
    format!(
        "0x{:08X}_0x{:08X}_0x{:08X}{}",
        u32::from(entry.res_type),
        entry.group,
        entry.instance,
        entry.res_type.extension()
    )
}

fn has_sprite_alpha_flags(payload: &[u8]) -> bool {
    payload.len() > PACKED_HEADER_LEN
        && LittleEndian::read_u32(&payload[4..8]) & SPRITE_ALPHA_FLAGS != 0
}

fn is_packed(payload: &[u8]) -> bool {
    payload.len() > PACKED_HEADER_LEN && payload[..8] == PACKED_ENTRY_SIGNATURE
}

/// String resources wrap their text in a little-endian signed length.
/// Negative or zero lengths yield no text; a length past the end of the
/// payload is clipped to the bytes present.
fn unwrap_text(payload: &[u8]) -> Vec<u8> {
    if payload.len() < 4 {
        return Vec::new();
    }
    let declared = LittleEndian::read_i32(&payload[..4]);
    if declared <= 0 {
        return Vec::new();
    }
    let count = (declared as usize).min(payload.len() - 4);
    payload[4..4 + count].to_vec()
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::Error;
    use crate::resource::{output_name, unpack, PACKED_ENTRY_SIGNATURE};
    use crate::types::{IndexEntry, ResourceType};

    /// A QFS stream decoding to `hello`.
    const HELLO_QFS: [u8; 12] = [
        0x10, 0xFB, 0x00, 0x00, 0x05, 0xE0, b'h', b'e', b'l', b'l', 0xFD, b'o',
    ];

    fn packed_payload() -> Vec<u8> {
        let mut payload = PACKED_ENTRY_SIGNATURE.to_vec();
        payload.extend_from_slice(&[0u8; 12]);
        payload.extend_from_slice(&HELLO_QFS);
        payload
    }

    #[test]
    fn unpack_string_resource() {
        let payload = vec![0x04, 0x00, 0x00, 0x00, b'T', b'e', b's', b't', 0xAA, 0xBB];
        assert_eq!(unpack(ResourceType::STRING, payload).unwrap(), b"Test");
    }

    #[test]
    fn unpack_string_resource_degenerate_lengths() {
        let zero = vec![0x00, 0x00, 0x00, 0x00, b'x'];
        assert_eq!(unpack(ResourceType::STRING, zero).unwrap(), b"");

        let negative = vec![0xFF, 0xFF, 0xFF, 0xFF, b'x'];
        assert_eq!(unpack(ResourceType::STRING, negative).unwrap(), b"");

        let short = vec![0x02, 0x00];
        assert_eq!(unpack(ResourceType::STRING, short).unwrap(), b"");

        let clipped = vec![0x10, 0x00, 0x00, 0x00, b'a', b'b'];
        assert_eq!(unpack(ResourceType::STRING, clipped).unwrap(), b"ab");
    }

    #[test]
    fn unpack_packed_entry() {
        let unpacked = unpack(ResourceType::HOT_KEY, packed_payload()).unwrap();
        assert_eq!(unpacked, b"hello");
    }

    #[test]
    fn packed_signature_requires_a_stream_behind_it() {
        // Exactly the 20 header bytes: nothing to decode, passes verbatim.
        let mut payload = PACKED_ENTRY_SIGNATURE.to_vec();
        payload.extend_from_slice(&[0u8; 12]);
        assert_eq!(
            unpack(ResourceType::HOT_KEY, payload.clone()).unwrap(),
            payload
        );
    }

    #[test]
    fn unpack_sprite_with_alpha_flags() {
        let mut payload = vec![0u8; 4];
        payload.extend_from_slice(&0x1000_0000u32.to_le_bytes());
        payload.extend_from_slice(&[0u8; 12]);
        payload.extend_from_slice(&HELLO_QFS);
        assert_eq!(
            unpack(ResourceType::SPRITE_IMAGE, payload).unwrap(),
            b"hello"
        );

        let mut payload = vec![0u8; 4];
        payload.extend_from_slice(&0x0008_0000u32.to_le_bytes());
        payload.extend_from_slice(&[0u8; 12]);
        payload.extend_from_slice(&HELLO_QFS);
        assert_eq!(
            unpack(ResourceType::SPRITE_IMAGE, payload).unwrap(),
            b"hello"
        );
    }

    #[test]
    fn sprite_of_exactly_twenty_bytes_stays_verbatim() {
        let mut payload = vec![0u8; 4];
        payload.extend_from_slice(&0x1000_0000u32.to_le_bytes());
        payload.extend_from_slice(&[0u8; 12]);
        assert_eq!(payload.len(), 20);
        assert_eq!(
            unpack(ResourceType::SPRITE_IMAGE, payload.clone()).unwrap(),
            payload
        );
    }

    #[test]
    fn sprite_with_single_stream_byte_attempts_a_decode() {
        let mut payload = vec![0u8; 4];
        payload.extend_from_slice(&0x1000_0000u32.to_le_bytes());
        payload.extend_from_slice(&[0u8; 12]);
        payload.push(0x42);
        let err = unpack(ResourceType::SPRITE_IMAGE, payload).unwrap_err();
        assert!(matches!(
            err,
            Error::Codec(sc3_qfs::Error::UnsupportedFormat)
        ));
    }

    #[test]
    fn packed_sprite_payloads_decode_via_their_flag_word() {
        // The packed-entry signature's second field is itself one of the
        // sprite flag bits, so a packed sprite still decodes.
        let payload = packed_payload();
        assert_eq!(
            unpack(ResourceType::SPRITE_IMAGE, payload).unwrap(),
            b"hello"
        );
    }

    #[test]
    fn sprite_without_flags_stays_verbatim() {
        let mut payload = vec![0u8; 24];
        payload[0] = 0x07;
        payload[1] = 0x01;
        assert_eq!(
            unpack(ResourceType::SPRITE_IMAGE, payload.clone()).unwrap(),
            payload
        );
    }

    #[test]
    fn alpha_flags_only_apply_to_sprites() {
        let mut payload = vec![0u8; 4];
        payload.extend_from_slice(&0x1000_0000u32.to_le_bytes());
        payload.extend_from_slice(&[0u8; 13]);
        assert_eq!(
            unpack(ResourceType::HOT_KEY, payload.clone()).unwrap(),
            payload
        );
    }

    #[test]
    fn unknown_types_pass_through() {
        let payload = vec![1, 2, 3, 4, 5];
        assert_eq!(
            unpack(ResourceType(0x1234_5678), payload.clone()).unwrap(),
            payload
        );
    }

    #[test]
    fn output_names_carry_the_tgi_and_extension() {
        let entry = IndexEntry {
            group: 1,
            instance: 2,
            res_type: ResourceType::STRING,
            offset: 24,
            length: 8,
        };
        assert_eq!(
            output_name(&entry),
            "0x2026960B_0x00000001_0x00000002.txt"
        );

        let opaque = IndexEntry {
            group: 0xA0B0C0D0,
            instance: 7,
            res_type: ResourceType(0xDEADBEEF),
            offset: 0,
            length: 0,
        };
        assert_eq!(
            output_name(&opaque),
            "0xDEADBEEF_0xA0B0C0D0_0x00000007.bin"
        );
    }
}
