use super::{Class, Header, Name, RRData, Type};

/// Parsed DNS packet
#[derive(Debug)]
pub struct Packet {
    pub header: Header,
    pub questions: Vec<Question>,
    pub answers: Vec<ResourceRecord>,
    pub nameservers: Vec<ResourceRecord>,
    pub additional: Vec<ResourceRecord>,
}

/// A parsed chunk of data in the Query section of the packet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub qname: Name,
    pub qtype: Type,
    pub qclass: Class,
}

/// A single DNS record
///
/// Only the types in [`Type`] are decoded; records of any other type are
/// dropped while parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRecord {
    pub name: Name,
    pub cls: Class,
    pub ttl: u32,
    pub data: RRData,
}

impl ResourceRecord {
    pub fn typ(&self) -> Type {
        self.data.typ()
    }
}

/// Any entry of the four packet sections, as built by [`make_record`]
///
/// [`make_record`]: super::make_record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Query(Question),
    Resource(ResourceRecord),
}
