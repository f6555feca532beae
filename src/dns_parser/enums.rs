use std::fmt;

/// The record types this client knows how to query and decode
///
/// Each type knows its mnemonic, its wire code and whether its RDATA carries
/// domain names that may be compressed.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Type {
    /// a host address
    A,
    /// an authoritative name server
    NS,
    /// the canonical name for an alias
    CNAME,
    /// marks the start of a zone of authority
    SOA,
    /// a domain name pointer
    PTR,
    /// mail exchange
    MX,
}

impl Type {
    /// Every supported type, in wire code order
    pub const ALL: [Type; 6] = [
        Type::A,
        Type::NS,
        Type::CNAME,
        Type::SOA,
        Type::PTR,
        Type::MX,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Type::A => "A",
            Type::NS => "NS",
            Type::CNAME => "CNAME",
            Type::SOA => "SOA",
            Type::PTR => "PTR",
            Type::MX => "MX",
        }
    }

    pub fn code(self) -> u16 {
        match self {
            Type::A => 1,
            Type::NS => 2,
            Type::CNAME => 5,
            Type::SOA => 6,
            Type::PTR => 12,
            Type::MX => 15,
        }
    }

    /// Whether RDATA of this type embeds domain names
    pub fn name_compressible(self) -> bool {
        !matches!(self, Type::A)
    }

    pub fn from_mnemonic(name: &str) -> Option<Type> {
        Type::ALL
            .iter()
            .copied()
            .find(|typ| typ.mnemonic().eq_ignore_ascii_case(name))
    }

    pub fn from_code(code: u16) -> Option<Type> {
        Type::ALL.iter().copied().find(|typ| typ.code() == code)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

const CLASSES: [(u8, &str); 4] = [(1, "IN"), (2, "CS"), (3, "CH"), (4, "HS")];

/// Returns the mnemonic of a record class code
pub fn class_mnemonic(code: u8) -> Option<&'static str> {
    CLASSES
        .iter()
        .find(|&&(c, _)| c == code)
        .map(|&(_, name)| name)
}

/// The class of a resource record
///
/// Only `IN` is ever queried, but anything a server sends back is kept.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Class {
    /// the Internet
    IN,
    /// the CSNET class (obsolete)
    CS,
    /// the CHAOS class
    CH,
    /// Hesiod
    HS,
    Unknown(u16),
}

impl Class {
    pub fn code(self) -> u16 {
        match self {
            Class::IN => 1,
            Class::CS => 2,
            Class::CH => 3,
            Class::HS => 4,
            Class::Unknown(code) => code,
        }
    }
}

impl From<u16> for Class {
    fn from(code: u16) -> Class {
        match code {
            1 => Class::IN,
            2 => Class::CS,
            3 => Class::CH,
            4 => Class::HS,
            code => Class::Unknown(code),
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let code = self.code();
        match u8::try_from(code).ok().and_then(class_mnemonic) {
            Some(name) => f.pad(name),
            None => f.pad(&format!("CLASS{}", code)),
        }
    }
}

/// The OPCODE value according to RFC 1035
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Opcode {
    StandardQuery,
    InverseQuery,
    ServerStatusRequest,
    Reserved(u16),
}

impl From<u16> for Opcode {
    fn from(code: u16) -> Opcode {
        match code {
            0 => Opcode::StandardQuery,
            1 => Opcode::InverseQuery,
            2 => Opcode::ServerStatusRequest,
            x => Opcode::Reserved(x),
        }
    }
}

impl From<Opcode> for u16 {
    fn from(op: Opcode) -> u16 {
        match op {
            Opcode::StandardQuery => 0,
            Opcode::InverseQuery => 1,
            Opcode::ServerStatusRequest => 2,
            Opcode::Reserved(x) => x,
        }
    }
}

/// The RCODE value according to RFC 1035
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ResponseCode {
    NoError,
    FormatError,
    ServerFailure,
    NameError,
    NotImplemented,
    Refused,
    Reserved(u8),
}

impl From<u8> for ResponseCode {
    fn from(code: u8) -> ResponseCode {
        match code {
            0 => ResponseCode::NoError,
            1 => ResponseCode::FormatError,
            2 => ResponseCode::ServerFailure,
            3 => ResponseCode::NameError,
            4 => ResponseCode::NotImplemented,
            5 => ResponseCode::Refused,
            x => ResponseCode::Reserved(x),
        }
    }
}

impl From<ResponseCode> for u8 {
    fn from(r: ResponseCode) -> u8 {
        match r {
            ResponseCode::NoError => 0,
            ResponseCode::FormatError => 1,
            ResponseCode::ServerFailure => 2,
            ResponseCode::NameError => 3,
            ResponseCode::NotImplemented => 4,
            ResponseCode::Refused => 5,
            ResponseCode::Reserved(x) => x,
        }
    }
}
