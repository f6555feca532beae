//! A single-shot DNS lookup client
//!
//! A [`Query`] is encoded once, sent over UDP up to three times and, when the
//! server signals truncation, over TCP up to twice. The reply is decoded into
//! a [`dns_parser::Packet`].
//!
//! ```no_run
//! use dnsq::{resolve, Config, Query};
//!
//! let config = Config::default();
//! let query = Query::parse("9.9.9.9", "example.com", "mx", config.port).unwrap();
//! let packet = resolve(&query, &config).unwrap();
//! for answer in &packet.answers {
//!     println!("{}", answer);
//! }
//! ```

pub mod dns_parser;

mod config;
mod display;
mod fsm;
mod transport;

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};

use thiserror::Error;

use dns_parser::{Builder, Class, Name, Packet, Type};

pub use config::Config;
pub use display::readable_ttl;
pub use fsm::{Channel, ResolveError, Resolver};
pub use transport::{SocketTransport, Transport};

pub const DNS_PORT: u16 = 53;

/// Errors in what the user asked for, found before anything is sent
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("unsupported record type {0:?}")]
    UnsupportedType(String),
    #[error("invalid hostname {name:?}: {source}")]
    InvalidName {
        name: String,
        source: dns_parser::Error,
    },
    #[error("unknown DNS server {server:?}: {source}")]
    UnknownServer { server: String, source: io::Error },
}

/// One question for one server
#[derive(Debug, Clone)]
pub struct Query {
    server: SocketAddr,
    name: Name,
    typ: Type,
    id: u16,
}

impl Query {
    /// Creates a query with a random transaction id
    pub fn new(server: SocketAddr, name: Name, typ: Type) -> Query {
        Query {
            server,
            name,
            typ,
            id: rand::random(),
        }
    }

    /// Builds a query from user input
    ///
    /// `server` may be an address literal or a host name, which is looked up
    /// through the system resolver; IPv4 addresses are preferred.
    pub fn parse(server: &str, hostname: &str, typ: &str, port: u16) -> Result<Query, QueryError> {
        let typ = Type::from_mnemonic(typ).ok_or_else(|| QueryError::UnsupportedType(typ.to_owned()))?;
        let name = hostname
            .parse::<Name>()
            .map_err(|source| QueryError::InvalidName {
                name: hostname.to_owned(),
                source,
            })?;
        let unknown = |source| QueryError::UnknownServer {
            server: server.to_owned(),
            source,
        };
        let addrs: Vec<SocketAddr> = (server, port).to_socket_addrs().map_err(unknown)?.collect();
        let addr = addrs
            .iter()
            .find(|addr| addr.is_ipv4())
            .or_else(|| addrs.first())
            .copied()
            .ok_or_else(|| unknown(io::Error::new(io::ErrorKind::NotFound, "no addresses found")))?;
        Ok(Query::new(addr, name, typ))
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn typ(&self) -> Type {
        self.typ
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    /// The wire form: a header and a single `IN` question
    pub fn encode(&self, recursion_desired: bool) -> Vec<u8> {
        Builder::new_query(self.id, recursion_desired)
            .add_question(&self.name, self.typ, Class::IN)
            .build()
            .unwrap_or_else(|x| x)
    }
}

/// Resolves `query` against its server over real sockets
pub fn resolve(query: &Query, config: &Config) -> Result<Packet, ResolveError> {
    let transport = SocketTransport::new(query.server(), config.timeout);
    Resolver::new(transport, config.clone()).resolve(query)
}
