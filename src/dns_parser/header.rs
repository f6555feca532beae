use super::bytes::{decode_u16, encode_u16};
use super::{Error, Opcode, ResponseCode};

mod flag {
    pub const QUERY: u16 = 0b1000_0000_0000_0000;
    pub const OPCODE_MASK: u16 = 0b0111_1000_0000_0000;
    pub const AUTHORITATIVE: u16 = 0b0000_0100_0000_0000;
    pub const TRUNCATED: u16 = 0b0000_0010_0000_0000;
    pub const RECURSION_DESIRED: u16 = 0b0000_0001_0000_0000;
    pub const RECURSION_AVAILABLE: u16 = 0b0000_0000_1000_0000;
    pub const RESPONSE_CODE_MASK: u16 = 0b0000_0000_0000_1111;
}

/// Represents parsed header of the packet
///
/// `query` is true for queries, i.e. when the QR bit is clear.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    pub id: u16,
    pub query: bool,
    pub opcode: Opcode,
    pub authoritative: bool,
    pub truncated: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub response_code: ResponseCode,
    pub questions: u16,
    pub answers: u16,
    pub nameservers: u16,
    pub additional: u16,
}

impl Header {
    /// Parses the 12-byte header. Reserved bits are ignored.
    pub fn parse(data: &[u8]) -> Result<Header, Error> {
        if data.len() < Header::size() {
            return Err(Error::HeaderTooShort);
        }
        let flags = field(data, 2);
        Ok(Header {
            id: field(data, 0),
            query: flags & flag::QUERY == 0,
            opcode: ((flags & flag::OPCODE_MASK) >> flag::OPCODE_MASK.trailing_zeros()).into(),
            authoritative: flags & flag::AUTHORITATIVE != 0,
            truncated: flags & flag::TRUNCATED != 0,
            recursion_desired: flags & flag::RECURSION_DESIRED != 0,
            recursion_available: flags & flag::RECURSION_AVAILABLE != 0,
            response_code: ResponseCode::from((flags & flag::RESPONSE_CODE_MASK) as u8),
            questions: field(data, 4),
            answers: field(data, 6),
            nameservers: field(data, 8),
            additional: field(data, 10),
        })
    }

    /// Write a header to a buffer slice
    ///
    /// # Panics
    ///
    /// When buffer size is not exactly 12 bytes
    pub fn write(&self, data: &mut [u8]) {
        if data.len() != Header::size() {
            panic!("Header size is exactly 12 bytes");
        }
        let mut flags = 0u16;
        flags |= (u16::from(self.opcode) << flag::OPCODE_MASK.trailing_zeros()) & flag::OPCODE_MASK;
        flags |= u16::from(u8::from(self.response_code)) & flag::RESPONSE_CODE_MASK;
        if !self.query {
            flags |= flag::QUERY;
        }
        if self.authoritative {
            flags |= flag::AUTHORITATIVE;
        }
        if self.truncated {
            flags |= flag::TRUNCATED;
        }
        if self.recursion_desired {
            flags |= flag::RECURSION_DESIRED;
        }
        if self.recursion_available {
            flags |= flag::RECURSION_AVAILABLE;
        }
        let fields = [
            self.id,
            flags,
            self.questions,
            self.answers,
            self.nameservers,
            self.additional,
        ];
        for (chunk, value) in data.chunks_exact_mut(2).zip(fields) {
            chunk.copy_from_slice(&encode_u16(value));
        }
    }

    /// Checks that this header answers the query with the given id
    pub fn check_reply(&self, id: u16) -> Result<(), Error> {
        if self.query {
            return Err(Error::NotAResponse);
        }
        if self.id != id {
            return Err(Error::IdMismatch {
                expected: id,
                actual: self.id,
            });
        }
        Ok(())
    }

    pub fn set_truncated(data: &mut [u8]) {
        data[2] |= (flag::TRUNCATED >> 8) as u8;
    }

    pub fn inc_questions(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 4)
    }

    pub fn inc_answers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 6)
    }

    pub fn inc_nameservers(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 8)
    }

    pub fn inc_additional(data: &mut [u8]) -> Option<u16> {
        Header::inc_count(data, 10)
    }

    fn inc_count(data: &mut [u8], offset: usize) -> Option<u16> {
        let count = field(data, offset).checked_add(1)?;
        data[offset..offset + 2].copy_from_slice(&encode_u16(count));
        Some(count)
    }

    pub fn size() -> usize {
        12
    }
}

/// Big-endian 16-bit field at `offset`; the caller checks the length
fn field(data: &[u8], offset: usize) -> u16 {
    decode_u16([data[offset], data[offset + 1]])
}
