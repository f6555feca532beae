use super::{Class, Error, Name, Question, RRData, Record, ResourceRecord, Type};

/// Builds the record matching a wire type code
///
/// Without `rdata` the result is a question entry. Otherwise `rdata` must
/// already have its embedded names decompressed (see [`expand`]). A type code
/// outside the supported set yields [`Error::UnsupportedType`] so the caller
/// can drop just that record.
///
/// [`expand`]: super::expand
pub fn make_record(
    name: Name,
    typ: u16,
    cls: u16,
    ttl: u32,
    rdata: Option<&[u8]>,
) -> Result<Record, Error> {
    let typ = Type::from_code(typ).ok_or(Error::UnsupportedType(typ))?;
    let cls = Class::from(cls);
    match rdata {
        None => Ok(Record::Query(Question {
            qname: name,
            qtype: typ,
            qclass: cls,
        })),
        Some(rdata) => Ok(Record::Resource(ResourceRecord {
            name,
            cls,
            ttl,
            data: RRData::parse(typ, rdata)?,
        })),
    }
}
