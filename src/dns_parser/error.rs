use thiserror::Error;

/// Error parsing or building a DNS packet
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("packet is smaller than header size")]
    HeaderTooShort,
    #[error("packet is has incomplete data")]
    UnexpectedEOF,
    #[error("wrong (too short or too long) size of RDATA")]
    WrongRdataLength,
    #[error("label in domain name has unknown label format")]
    UnknownLabelFormat,
    #[error("invalid characters encountered while reading label")]
    LabelIsNotAscii,
    #[error("parser is in the wrong state")]
    WrongState,
    #[error("record type {0} is not supported")]
    UnsupportedType(u16),
    #[error("packet is a query, not a response")]
    NotAResponse,
    #[error("transaction id {actual} does not match query id {expected}")]
    IdMismatch { expected: u16, actual: u16 },
    #[error("too many compression pointers in domain name")]
    PointerLoop,
    #[error("label of {0} bytes exceeds 63 bytes")]
    LabelTooLong(usize),
    #[error("domain name exceeds 255 bytes")]
    NameTooLong,
    #[error("domain name contains an empty label")]
    EmptyLabel,
}
