use log::{trace, warn};

use super::bytes::{decode_u16, decode_u32};
use super::rrdata::expand;
use super::{make_record, Error, Header, Name, Packet, Record, ResourceRecord, Type};

/// Upper bound for preallocated section capacity; counts come off the wire
const MAX_PREALLOC: usize = 64;

impl Packet {
    /// Parse a full DNS packet and return the structure
    ///
    /// Records whose type is not supported are logged and left out of their
    /// section; everything else that does not parse is an error.
    pub fn parse(data: &[u8]) -> Result<Packet, Error> {
        let header = Header::parse(data)?;
        let mut offset = Header::size();

        let mut questions = Vec::with_capacity((header.questions as usize).min(MAX_PREALLOC));
        for _ in 0..header.questions {
            let (qname, next) = Name::scan(data, offset)?;
            offset = next;
            let qtype = read_u16(data, &mut offset)?;
            let qclass = read_u16(data, &mut offset)?;
            match make_record(qname, qtype, qclass, 0, None) {
                Ok(Record::Query(question)) => questions.push(question),
                Ok(Record::Resource(_)) => return Err(Error::WrongState),
                Err(Error::UnsupportedType(code)) => {
                    warn!("record type {} is not supported, ignoring question", code)
                }
                Err(e) => return Err(e),
            }
        }

        let answers = parse_section(data, &mut offset, header.answers)?;
        let nameservers = parse_section(data, &mut offset, header.nameservers)?;
        let additional = parse_section(data, &mut offset, header.additional)?;

        if offset != data.len() {
            trace!("{} trailing bytes after last record", data.len() - offset);
        }

        Ok(Packet {
            header,
            questions,
            answers,
            nameservers,
            additional,
        })
    }

    /// Parse a packet received in reply to the query with the given `id`
    ///
    /// Fails if the packet is not a response or carries a different
    /// transaction id.
    pub fn parse_response(data: &[u8], id: u16) -> Result<Packet, Error> {
        Header::parse(data)?.check_reply(id)?;
        Packet::parse(data)
    }
}

fn parse_section(data: &[u8], offset: &mut usize, count: u16) -> Result<Vec<ResourceRecord>, Error> {
    let mut records = Vec::with_capacity((count as usize).min(MAX_PREALLOC));
    for _ in 0..count {
        if let Some(record) = parse_record(data, offset)? {
            records.push(record);
        }
    }
    Ok(records)
}

fn parse_record(data: &[u8], offset: &mut usize) -> Result<Option<ResourceRecord>, Error> {
    let (name, next) = Name::scan(data, *offset)?;
    *offset = next;
    let typ = read_u16(data, offset)?;
    let cls = read_u16(data, offset)?;
    let ttl = read_u32(data, offset)?;
    let rdlen = read_u16(data, offset)? as usize;
    let start = *offset;
    if data.len() < start + rdlen {
        return Err(Error::UnexpectedEOF);
    }
    *offset += rdlen;

    let rdata = match Type::from_code(typ) {
        Some(known) => expand(known, data, start, rdlen)?,
        None => data[start..start + rdlen].into(),
    };

    match make_record(name, typ, cls, ttl, Some(&*rdata)) {
        Ok(Record::Resource(record)) => Ok(Some(record)),
        Ok(Record::Query(_)) => Err(Error::WrongState),
        Err(Error::UnsupportedType(code)) => {
            warn!("record type {} is not supported, this record will be ignored", code);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

fn read_u16(data: &[u8], offset: &mut usize) -> Result<u16, Error> {
    let bytes = data.get(*offset..*offset + 2).ok_or(Error::UnexpectedEOF)?;
    *offset += 2;
    Ok(decode_u16([bytes[0], bytes[1]]))
}

fn read_u32(data: &[u8], offset: &mut usize) -> Result<u32, Error> {
    let bytes = data.get(*offset..*offset + 4).ok_or(Error::UnexpectedEOF)?;
    *offset += 4;
    Ok(decode_u32([bytes[0], bytes[1], bytes[2], bytes[3]]))
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::net::Ipv4Addr;

    use log::{Level, LevelFilter, Log, Metadata};

    use super::*;
    use crate::dns_parser::{Builder, Class, Opcode, RRData, ResponseCode};

    thread_local! {
        static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
    }

    /// Keeps what the current thread logs, so parallel tests stay apart
    struct Capture;

    impl Log for Capture {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            RECORDS.with(|r| r.borrow_mut().push((record.level(), record.args().to_string())));
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture;

    /// Runs `f` and returns the warnings it logged on this thread
    fn warnings<R>(f: impl FnOnce() -> R) -> (R, Vec<String>) {
        // only the first call installs the logger; later calls fail harmlessly
        let _ = log::set_logger(&CAPTURE);
        log::set_max_level(LevelFilter::Trace);
        RECORDS.with(|r| r.borrow_mut().clear());
        let result = f();
        let logged = RECORDS.with(|r| r.borrow_mut().drain(..).collect::<Vec<_>>());
        let warnings = logged
            .into_iter()
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message)
            .collect();
        (result, warnings)
    }

    fn name(s: &str) -> Name {
        s.parse().unwrap()
    }

    #[test]
    fn parse_example_query() {
        let query = b"\x06%\x01\x00\x00\x01\x00\x00\x00\x00\x00\x00\
                      \x07example\x03com\x00\x00\x01\x00\x01";
        let packet = Packet::parse(query).unwrap();
        assert!(packet.header.query);
        assert_eq!(packet.header.opcode, Opcode::StandardQuery);
        assert_eq!(packet.questions.len(), 1);
        assert_eq!(packet.questions[0].qtype, Type::A);
        assert_eq!(packet.questions[0].qclass, Class::IN);
        assert_eq!(packet.questions[0].qname, name("example.com"));
        assert_eq!(packet.answers.len(), 0);
    }

    #[test]
    fn query_round_trip() {
        for typ in Type::ALL.iter().copied() {
            let query = Builder::new_query(77, true)
                .add_question(&name("Mail.Example.org"), typ, Class::IN)
                .build()
                .unwrap();
            let packet = Packet::parse(&query).unwrap();
            assert_eq!(packet.header.id, 77);
            assert!(packet.header.recursion_desired);
            assert_eq!(packet.questions.len(), 1);
            assert_eq!(packet.questions[0].qname.to_string(), "Mail.Example.org");
            assert_eq!(packet.questions[0].qtype, typ);
            assert_eq!(packet.questions[0].qclass, Class::IN);
        }
    }

    #[test]
    fn parse_a_response() {
        let response = b"\x06%\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
                         \x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x0c\x00\x01\x00\x01\x00\x00\x04\xf8\
                         \x00\x04\x5d\xb8\xd8\x22";
        let packet = Packet::parse_response(response, 1573).unwrap();
        assert_eq!(packet.header.response_code, ResponseCode::NoError);
        assert_eq!(packet.answers.len(), 1);
        let answer = &packet.answers[0];
        assert_eq!(answer.name, name("example.com"));
        assert_eq!(answer.cls, Class::IN);
        assert_eq!(answer.ttl, 1272);
        assert_eq!(answer.data, RRData::A(Ipv4Addr::new(93, 184, 216, 34)));
        assert_eq!(answer.data.to_string(), "93.184.216.34");
    }

    #[test]
    fn parse_compressed_cname_chain() {
        let response = b"\x00\x02\x81\x80\x00\x01\x00\x02\x00\x00\x00\x00\
                         \x03www\x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x0c\x00\x05\x00\x01\x00\x00\x00\x3c\x00\x07\
                         \x04edge\xc0\x10\
                         \xc0\x2d\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\
                         \x0a\x00\x00\x01";
        let packet = Packet::parse_response(response, 2).unwrap();
        assert_eq!(packet.answers.len(), 2);
        assert_eq!(
            packet.answers[0].data,
            RRData::CNAME(name("edge.example.com"))
        );
        assert_eq!(packet.answers[1].name, name("edge.example.com"));
        assert_eq!(packet.answers[1].typ(), Type::A);
    }

    #[test]
    fn unsupported_answer_is_dropped() {
        // an AAAA answer followed by an A answer
        let response = b"\x00\x03\x81\x80\x00\x01\x00\x02\x00\x00\x00\x00\
                         \x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x0c\x00\x1c\x00\x01\x00\x00\x00\x3c\x00\x10\
                         \x20\x01\x0d\xb8\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x01\
                         \xc0\x0c\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\
                         \x7f\x00\x00\x01";
        let (packet, warnings) = warnings(|| Packet::parse_response(response, 3).unwrap());
        assert_eq!(packet.header.answers, 2);
        assert_eq!(packet.answers.len(), 1);
        assert_eq!(packet.answers[0].data, RRData::A(Ipv4Addr::LOCALHOST));
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("28"), "{}", warnings[0]);
    }

    #[test]
    fn unsupported_question_is_dropped() {
        // AAAA question for example.com followed by an A question
        let query = b"\x00\x04\x01\x00\x00\x02\x00\x00\x00\x00\x00\x00\
                      \x07example\x03com\x00\x00\x1c\x00\x01\
                      \xc0\x0c\x00\x01\x00\x01";
        let (packet, warnings) = warnings(|| Packet::parse(query).unwrap());
        assert_eq!(packet.header.questions, 2);
        assert_eq!(packet.questions.len(), 1);
        assert_eq!(packet.questions[0].qtype, Type::A);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("28"), "{}", warnings[0]);
    }

    #[test]
    fn supported_records_log_no_warning() {
        let response = b"\x06%\x81\x80\x00\x01\x00\x01\x00\x00\x00\x00\
                         \x07example\x03com\x00\x00\x01\x00\x01\
                         \xc0\x0c\x00\x01\x00\x01\x00\x00\x04\xf8\
                         \x00\x04\x5d\xb8\xd8\x22";
        let (_, warnings) = warnings(|| Packet::parse_response(response, 1573).unwrap());
        assert!(warnings.is_empty(), "{:?}", warnings);
    }

    #[test]
    fn sections_from_builder() {
        let zone = name("example.org");
        let packet = Builder::new_response(9, true, true)
            .add_question(&zone, Type::NS, Class::IN)
            .add_answer(&zone, Class::IN, 3600, &RRData::NS(name("ns1.example.org")))
            .add_nameserver(
                &zone,
                Class::IN,
                900,
                &RRData::SOA {
                    primary_ns: name("ns1.example.org"),
                    mailbox: name("hostmaster.example.org"),
                    serial: 2024010101,
                    refresh: 7200,
                    retry: 3600,
                    expire: 1209600,
                    minimum: 300,
                },
            )
            .add_additional(
                &name("ns1.example.org"),
                Class::IN,
                3600,
                &RRData::A(Ipv4Addr::new(192, 0, 2, 53)),
            )
            .build()
            .unwrap();
        let packet = Packet::parse_response(&packet, 9).unwrap();
        assert!(packet.header.authoritative);
        assert_eq!(packet.questions.len(), 1);
        assert_eq!(packet.answers.len(), 1);
        assert_eq!(packet.nameservers.len(), 1);
        assert_eq!(packet.additional.len(), 1);
        assert_eq!(packet.nameservers[0].typ(), Type::SOA);
        assert_eq!(packet.additional[0].ttl, 3600);
    }

    #[test]
    fn id_mismatch() {
        let response = b"\x00\x05\x81\x80\x00\x00\x00\x00\x00\x00\x00\x00";
        assert_eq!(
            Packet::parse_response(response, 6).unwrap_err(),
            Error::IdMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn query_is_not_a_response() {
        let query = b"\x00\x05\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00";
        assert_eq!(
            Packet::parse_response(query, 5).unwrap_err(),
            Error::NotAResponse
        );
    }

    #[test]
    fn counts_larger_than_packet() {
        // claims one answer but carries none
        let response = b"\x00\x01\x81\x80\x00\x00\x00\x01\x00\x00\x00\x00";
        assert_eq!(
            Packet::parse_response(response, 1).unwrap_err(),
            Error::UnexpectedEOF
        );
    }

    #[test]
    fn rdlength_past_end() {
        let response = b"\x00\x01\x81\x80\x00\x00\x00\x01\x00\x00\x00\x00\
                         \x00\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\x01\x02";
        assert_eq!(
            Packet::parse_response(response, 1).unwrap_err(),
            Error::UnexpectedEOF
        );
    }

    #[test]
    fn self_referencing_owner_name() {
        let response = b"\x00\x01\x81\x80\x00\x00\x00\x01\x00\x00\x00\x00\
                         \xc0\x0c\x00\x01\x00\x01\x00\x00\x00\x3c\x00\x04\x01\x02\x03\x04";
        assert_eq!(
            Packet::parse_response(response, 1).unwrap_err(),
            Error::PointerLoop
        );
    }
}
