//! Network byte order conversions for the fixed-width integers found in DNS
//! messages.
//!
//! Callers are responsible for slicing exactly the number of bytes a field
//! occupies; see `parser` for the bounds-checked reading side.

use byteorder::{BigEndian, ByteOrder};

pub fn encode_u8(value: u8) -> [u8; 1] {
    [value]
}

pub fn decode_u8(bytes: [u8; 1]) -> u8 {
    bytes[0]
}

pub fn encode_u16(value: u16) -> [u8; 2] {
    let mut buf = [0u8; 2];
    BigEndian::write_u16(&mut buf, value);
    buf
}

pub fn decode_u16(bytes: [u8; 2]) -> u16 {
    BigEndian::read_u16(&bytes)
}

pub fn encode_u32(value: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    BigEndian::write_u32(&mut buf, value);
    buf
}

pub fn decode_u32(bytes: [u8; 4]) -> u32 {
    BigEndian::read_u32(&bytes)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn u16_round_trips_over_whole_domain() {
        for x in 0..=u16::MAX {
            assert_eq!(decode_u16(encode_u16(x)), x);
        }
    }

    #[test]
    fn network_order() {
        assert_eq!(encode_u16(0x1234), [0x12, 0x34]);
        assert_eq!(encode_u32(0xdead_beef), [0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(decode_u32([0, 0, 0x0e, 0x10]), 3600);
        assert_eq!(decode_u8(encode_u8(0xff)), 0xff);
    }

    #[test]
    fn u32_edges() {
        for x in [0, 1, 0x7fff_ffff, 0x8000_0000, u32::MAX] {
            assert_eq!(decode_u32(encode_u32(x)), x);
        }
    }
}
