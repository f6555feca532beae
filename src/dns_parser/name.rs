use std::fmt;
use std::hash;
use std::io;
use std::str::{from_utf8, FromStr};

use super::bytes::{decode_u16, decode_u8, encode_u8};
use super::Error;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_LEN: usize = 255;

const POINTER_MASK: u8 = 0b1100_0000;

/// A domain name as a sequence of labels
///
/// Names read from a packet have their compression pointers already
/// resolved, so a `Name` never refers back into the buffer it came from.
/// Comparison and hashing ignore ASCII case.
#[derive(Debug, Clone, Default)]
pub struct Name {
    labels: Vec<String>,
}

impl Name {
    /// The root name, `.`
    pub fn root() -> Name {
        Name { labels: Vec::new() }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Size of the uncompressed wire encoding, including the terminating
    /// zero-length label
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|l| l.len() + 1).sum::<usize>() + 1
    }

    /// Reads a name starting at `pos` in `data`
    ///
    /// `data` must be the whole message, as compression pointers are offsets
    /// from its first byte. Returns the name and the position right after it
    /// in the original byte stream, which for a compressed name is right
    /// after the first pointer.
    pub fn scan(data: &[u8], pos: usize) -> Result<(Name, usize), Error> {
        let mut labels = Vec::new();
        let mut pos = pos;
        let mut resume = None;
        let mut hops = 0;
        let mut wire_len = 1;
        loop {
            let byte = decode_u8([*data.get(pos).ok_or(Error::UnexpectedEOF)?]);
            if byte == 0 {
                let end = resume.unwrap_or(pos + 1);
                return Ok((Name { labels }, end));
            } else if byte & POINTER_MASK == POINTER_MASK {
                let pointer = data.get(pos..pos + 2).ok_or(Error::UnexpectedEOF)?;
                let off = (decode_u16([pointer[0], pointer[1]]) & 0b0011_1111_1111_1111) as usize;
                hops += 1;
                if hops > data.len() {
                    return Err(Error::PointerLoop);
                }
                if resume.is_none() {
                    resume = Some(pos + 2);
                }
                pos = off;
            } else if byte & POINTER_MASK == 0 {
                let len = byte as usize;
                let label = data
                    .get(pos + 1..pos + 1 + len)
                    .ok_or(Error::UnexpectedEOF)?;
                wire_len += len + 1;
                if wire_len > MAX_NAME_LEN {
                    return Err(Error::NameTooLong);
                }
                let label = from_utf8(label).map_err(|_| Error::LabelIsNotAscii)?;
                labels.push(label.to_owned());
                pos += len + 1;
            } else {
                return Err(Error::UnknownLabelFormat);
            }
        }
    }

    /// Writes the name without compression
    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        for label in &self.labels {
            writer.write_all(&encode_u8(label.len() as u8))?;
            writer.write_all(label.as_bytes())?;
        }
        writer.write_all(&encode_u8(0))
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses a dotted name; a single trailing dot is accepted
    fn from_str(name: &str) -> Result<Name, Error> {
        let name = name.strip_suffix('.').unwrap_or(name);
        if name.is_empty() {
            return Ok(Name::root());
        }

        let mut labels = Vec::new();
        for label in name.split('.') {
            if label.is_empty() {
                return Err(Error::EmptyLabel);
            }
            if label.len() > MAX_LABEL_LEN {
                return Err(Error::LabelTooLong(label.len()));
            }
            if !label.is_ascii() {
                return Err(Error::LabelIsNotAscii);
            }
            labels.push(label.to_owned());
        }

        let name = Name { labels };
        if name.wire_len() > MAX_NAME_LEN {
            return Err(Error::NameTooLong);
        }
        Ok(name)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        if self.is_root() {
            fmt.pad(".")
        } else {
            fmt.pad(&self.labels.join("."))
        }
    }
}

impl hash::Hash for Name {
    fn hash<H>(&self, state: &mut H)
    where
        H: hash::Hasher,
    {
        for label in &self.labels {
            label.to_ascii_lowercase().hash(state);
        }
    }
}

impl PartialEq for Name {
    fn eq(&self, other: &Name) -> bool {
        self.labels.len() == other.labels.len()
            && self
                .labels
                .iter()
                .zip(&other.labels)
                .all(|(a, b)| a.eq_ignore_ascii_case(b))
    }
}

impl Eq for Name {}
