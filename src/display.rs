//! Human readable rendering of decoded records, one record per line

use std::fmt;

use crate::dns_parser::{Question, RRData, ResourceRecord};

const SECS_PER_MIN: u32 = 60;
const SECS_PER_HOUR: u32 = 60 * SECS_PER_MIN;
const SECS_PER_DAY: u32 = 24 * SECS_PER_HOUR;

/// Formats a TTL as `D Days, H Hours, M Mins, S Secs`
pub fn readable_ttl(ttl: u32) -> String {
    format!(
        "{} Days, {} Hours, {} Mins, {} Secs",
        ttl / SECS_PER_DAY,
        ttl % SECS_PER_DAY / SECS_PER_HOUR,
        ttl % SECS_PER_HOUR / SECS_PER_MIN,
        ttl % SECS_PER_MIN
    )
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:<30}\t{:>6}\t{:<2}", self.qname, self.qtype, self.qclass)
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:<30}\t{:>6}\t{:<2}\t{:<20}\t{}",
            self.name,
            self.typ(),
            self.cls,
            readable_ttl(self.ttl),
            self.data
        )
    }
}

impl fmt::Display for RRData {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RRData::A(ip) => write!(f, "{}", ip),
            RRData::CNAME(name) | RRData::NS(name) | RRData::PTR(name) => write!(f, "{}", name),
            RRData::MX {
                preference,
                exchange,
            } => write!(f, "{}\t{}", preference, exchange),
            RRData::SOA {
                primary_ns,
                mailbox,
                serial,
                refresh,
                retry,
                expire,
                minimum,
            } => write!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                primary_ns, mailbox, serial, refresh, retry, expire, minimum
            ),
        }
    }
}
