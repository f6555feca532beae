//! Encoding and decoding of DNS messages (RFC 1035)

mod builder;
pub mod bytes;
mod enums;
mod error;
mod header;
mod name;
mod parser;
mod record;
mod rrdata;
mod structs;

pub use self::builder::{Builder, MoveTo, Questions, MAX_UDP_SIZE};
#[cfg(test)]
pub use self::builder::{Additional, Answers, Nameservers};
pub use self::enums::{class_mnemonic, Class, Opcode, ResponseCode, Type};
pub use self::error::Error;
pub use self::header::Header;
pub use self::name::{Name, MAX_LABEL_LEN, MAX_NAME_LEN};
pub use self::record::make_record;
pub use self::rrdata::{expand, RRData};
pub use self::structs::{Packet, Question, Record, ResourceRecord};
