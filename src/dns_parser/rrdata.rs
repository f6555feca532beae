use std::borrow::Cow;
use std::io;
use std::net::Ipv4Addr;

use byteorder::{BigEndian, WriteBytesExt};

use super::bytes::{decode_u16, decode_u32};
use super::{Error, Name, Type};

const SOA_COUNTERS_LEN: usize = 5 * 4;

/// The enumeration that represents known types of DNS resource records data
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RRData {
    A(Ipv4Addr),
    CNAME(Name),
    NS(Name),
    PTR(Name),
    MX {
        preference: u16,
        exchange: Name,
    },
    SOA {
        primary_ns: Name,
        mailbox: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
}

impl RRData {
    pub fn typ(&self) -> Type {
        match *self {
            RRData::A(..) => Type::A,
            RRData::CNAME(..) => Type::CNAME,
            RRData::NS(..) => Type::NS,
            RRData::PTR(..) => Type::PTR,
            RRData::MX { .. } => Type::MX,
            RRData::SOA { .. } => Type::SOA,
        }
    }

    pub fn write_to<T: io::Write>(&self, writer: &mut T) -> io::Result<()> {
        match *self {
            RRData::CNAME(ref name) | RRData::NS(ref name) | RRData::PTR(ref name) => {
                name.write_to(writer)
            }
            RRData::A(ip) => writer.write_u32::<BigEndian>(ip.into()),
            RRData::MX {
                preference,
                ref exchange,
            } => {
                writer.write_u16::<BigEndian>(preference)?;
                exchange.write_to(writer)
            }
            RRData::SOA {
                ref primary_ns,
                ref mailbox,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => {
                primary_ns.write_to(writer)?;
                mailbox.write_to(writer)?;
                for value in [serial, refresh, retry, expire, minimum] {
                    writer.write_u32::<BigEndian>(value)?;
                }
                Ok(())
            }
        }
    }

    /// Decodes RDATA whose embedded names are already uncompressed
    ///
    /// This is the payload as produced by [`expand`]; names inside `rdata`
    /// must not contain compression pointers.
    pub fn parse(typ: Type, rdata: &[u8]) -> Result<RRData, Error> {
        match typ {
            Type::A => {
                let octets: [u8; 4] = rdata.try_into().map_err(|_| Error::WrongRdataLength)?;
                Ok(RRData::A(Ipv4Addr::from(octets)))
            }
            Type::CNAME => Ok(RRData::CNAME(single_name(rdata)?)),
            Type::NS => Ok(RRData::NS(single_name(rdata)?)),
            Type::PTR => Ok(RRData::PTR(single_name(rdata)?)),
            Type::MX => {
                if rdata.len() < 3 {
                    return Err(Error::WrongRdataLength);
                }
                Ok(RRData::MX {
                    preference: decode_u16([rdata[0], rdata[1]]),
                    exchange: single_name(&rdata[2..])?,
                })
            }
            Type::SOA => {
                let (primary_ns, pos) = Name::scan(rdata, 0)?;
                let (mailbox, pos) = Name::scan(rdata, pos)?;
                let counters = &rdata[pos..];
                if counters.len() != SOA_COUNTERS_LEN {
                    return Err(Error::WrongRdataLength);
                }
                let mut values = counters
                    .chunks_exact(4)
                    .map(|c| decode_u32([c[0], c[1], c[2], c[3]]));
                let mut next = || values.next().ok_or(Error::WrongRdataLength);
                Ok(RRData::SOA {
                    primary_ns,
                    mailbox,
                    serial: next()?,
                    refresh: next()?,
                    retry: next()?,
                    expire: next()?,
                    minimum: next()?,
                })
            }
        }
    }
}

fn single_name(rdata: &[u8]) -> Result<Name, Error> {
    let (name, end) = Name::scan(rdata, 0)?;
    if end != rdata.len() {
        return Err(Error::WrongRdataLength);
    }
    Ok(name)
}

/// Resolves compressed names inside the RDATA at `start..start + len`
///
/// Names are decompressed against `message`, the whole packet, and written
/// back uncompressed. RDATA of types that carry no names is borrowed
/// unchanged. Any name running past the end of the RDATA is an error.
pub fn expand(typ: Type, message: &[u8], start: usize, len: usize) -> Result<Cow<[u8]>, Error> {
    let end = start + len;
    let rdata = message.get(start..end).ok_or(Error::UnexpectedEOF)?;
    if !typ.name_compressible() {
        return Ok(Cow::Borrowed(rdata));
    }

    let mut out = Vec::with_capacity(len);
    let mut pos = start;
    match typ {
        Type::CNAME | Type::NS | Type::PTR => {
            pos = copy_name(message, pos, end, &mut out)?;
        }
        Type::MX => {
            pos = copy_raw(message, pos, 2, end, &mut out)?;
            pos = copy_name(message, pos, end, &mut out)?;
        }
        Type::SOA => {
            pos = copy_name(message, pos, end, &mut out)?;
            pos = copy_name(message, pos, end, &mut out)?;
            pos = copy_raw(message, pos, SOA_COUNTERS_LEN, end, &mut out)?;
        }
        Type::A => return Err(Error::WrongState),
    }

    if pos != end {
        return Err(Error::WrongRdataLength);
    }
    Ok(Cow::Owned(out))
}

fn copy_name(message: &[u8], pos: usize, end: usize, out: &mut Vec<u8>) -> Result<usize, Error> {
    let (name, next) = Name::scan(message, pos)?;
    if next > end {
        return Err(Error::WrongRdataLength);
    }
    name.write_to(out).map_err(|_| Error::WrongState)?;
    Ok(next)
}

fn copy_raw(
    message: &[u8],
    pos: usize,
    count: usize,
    end: usize,
    out: &mut Vec<u8>,
) -> Result<usize, Error> {
    if pos + count > end {
        return Err(Error::WrongRdataLength);
    }
    out.extend_from_slice(&message[pos..pos + count]);
    Ok(pos + count)
}

#[cfg(test)]
mod test {
    use super::*;

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn a_record() {
        let data = RRData::parse(Type::A, &[93, 184, 216, 34]).unwrap();
        assert_eq!(data, RRData::A(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(
            RRData::parse(Type::A, &[1, 2, 3]),
            Err(Error::WrongRdataLength)
        );
    }

    #[test]
    fn mx_record() {
        let data = RRData::parse(Type::MX, b"\x00\x0a\x04mail\x00").unwrap();
        assert_eq!(
            data,
            RRData::MX {
                preference: 10,
                exchange: name("mail"),
            }
        );
    }

    #[test]
    fn soa_counters_keep_order_and_range() {
        let mut rdata = Vec::new();
        rdata.extend_from_slice(b"\x02ns\x07example\x00\x05admin\x07example\x00");
        for value in [0u32, 7200, 3600, 1_209_600, u32::MAX] {
            rdata.extend_from_slice(&value.to_be_bytes());
        }
        let data = RRData::parse(Type::SOA, &rdata).unwrap();
        assert_eq!(
            data,
            RRData::SOA {
                primary_ns: name("ns.example"),
                mailbox: name("admin.example"),
                serial: 0,
                refresh: 7200,
                retry: 3600,
                expire: 1_209_600,
                minimum: u32::MAX,
            }
        );
    }

    #[test]
    fn soa_with_short_counters() {
        let rdata = b"\x00\x00\x00\x00\x00\x01";
        assert_eq!(
            RRData::parse(Type::SOA, rdata),
            Err(Error::WrongRdataLength)
        );
    }

    #[test]
    fn trailing_bytes_after_name() {
        assert_eq!(
            RRData::parse(Type::CNAME, b"\x01a\x00\x00"),
            Err(Error::WrongRdataLength)
        );
    }

    #[test]
    fn expand_resolves_pointers_in_rdata() {
        // "example" at 0, then MX rdata at 9: preference 5, "mx" + pointer
        let message = b"\x07example\x00\x00\x05\x02mx\xc0\x00";
        let expanded = expand(Type::MX, message, 9, 7).unwrap();
        assert_eq!(&expanded[..], b"\x00\x05\x02mx\x07example\x00");
        assert_eq!(
            RRData::parse(Type::MX, &expanded).unwrap(),
            RRData::MX {
                preference: 5,
                exchange: name("mx.example"),
            }
        );
    }

    #[test]
    fn expand_leaves_address_untouched() {
        let message = b"\x00\x01\x7f\x00\x00\x01";
        let expanded = expand(Type::A, message, 2, 4).unwrap();
        assert!(matches!(expanded, Cow::Borrowed(_)));
        assert_eq!(&expanded[..], &[127, 0, 0, 1]);
    }

    #[test]
    fn expand_rejects_name_past_rdlength() {
        let message = b"\x04mail\x00";
        assert_eq!(
            expand(Type::CNAME, message, 0, 3),
            Err(Error::WrongRdataLength)
        );
        assert_eq!(
            expand(Type::CNAME, message, 0, 10),
            Err(Error::UnexpectedEOF)
        );
    }

    #[test]
    fn write_then_parse_soa() {
        let soa = RRData::SOA {
            primary_ns: name("a.example"),
            mailbox: name("b.example"),
            serial: 1,
            refresh: 2,
            retry: 3,
            expire: 4,
            minimum: 5,
        };
        let mut buf = Vec::new();
        soa.write_to(&mut buf).unwrap();
        assert_eq!(RRData::parse(Type::SOA, &buf).unwrap(), soa);
        assert_eq!(soa.typ(), Type::SOA);
    }
}
