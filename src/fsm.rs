use log::{debug, trace, warn};
use std::fmt;
use std::io;
use thiserror::Error;

use crate::config::Config;
use crate::dns_parser::{self, Header, Packet, ResponseCode};
use crate::transport::Transport;
use crate::Query;

/// Why a resolution ended without an answer
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no response after {attempts} {channel} attempt(s)")]
    TimedOut { channel: Channel, attempts: u8 },
    #[error("socket error: {0}")]
    Socket(#[source] io::Error),
    #[error("i/o error: {0}")]
    Io(#[source] io::Error),
    #[error("malformed DNS response: {0}")]
    Protocol(#[from] dns_parser::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Udp,
    Tcp,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Channel::Udp => f.write_str("UDP"),
            Channel::Tcp => f.write_str("TCP"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    SendingUdp(u8),
    SendingTcp(u8),
}

/// Drives one query through UDP attempts and, if the reply was truncated,
/// TCP attempts
///
/// Attempts are strictly sequential. Timeouts are retried with the same
/// transaction id; socket failures and malformed replies end the resolution
/// immediately.
pub struct Resolver<T: Transport> {
    transport: T,
    config: Config,
}

impl<T: Transport> Resolver<T> {
    pub fn new(transport: T, config: Config) -> Resolver<T> {
        Resolver { transport, config }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn resolve(&mut self, query: &Query) -> Result<Packet, ResolveError> {
        let message = query.encode(self.config.recursion_desired);
        let id = query.id();
        let mut state = State::Idle;

        loop {
            trace!("resolver state {:?}", state);
            state = match state {
                State::Idle => State::SendingUdp(1),
                State::SendingUdp(attempt) => match self.exchange(Channel::Udp, &message)? {
                    Some(reply) => {
                        // a truncated datagram may end in the middle of a
                        // record, so only the header is trusted
                        let header = Header::parse(&reply)?;
                        header.check_reply(id)?;
                        if !header.truncated {
                            return decode(&reply, id);
                        }
                        warn!("truncated UDP response, attempting TCP connection");
                        State::SendingTcp(1)
                    }
                    None if attempt < self.config.udp_attempts => {
                        warn!("socket timed out on UDP attempt {}, retrying", attempt);
                        State::SendingUdp(attempt + 1)
                    }
                    None => {
                        return Err(ResolveError::TimedOut {
                            channel: Channel::Udp,
                            attempts: attempt,
                        })
                    }
                },
                State::SendingTcp(attempt) => match self.exchange(Channel::Tcp, &message)? {
                    Some(reply) => return decode(&reply, id),
                    None if attempt < self.config.tcp_attempts => {
                        warn!("socket timed out on TCP attempt {}, retrying", attempt);
                        State::SendingTcp(attempt + 1)
                    }
                    None => {
                        return Err(ResolveError::TimedOut {
                            channel: Channel::Tcp,
                            attempts: attempt,
                        })
                    }
                },
            };
        }
    }

    /// Sends `message` once; `Ok(None)` means the wait timed out
    fn exchange(&mut self, channel: Channel, message: &[u8]) -> Result<Option<Vec<u8>>, ResolveError> {
        let reply = match channel {
            Channel::Udp => self.transport.exchange_udp(message),
            Channel::Tcp => self.transport.exchange_tcp(message),
        };
        match reply {
            Ok(reply) => {
                debug!("received {} byte reply over {}", reply.len(), channel);
                Ok(Some(reply))
            }
            Err(ref err) if is_timeout(err) => Ok(None),
            Err(err) => Err(classify(err)),
        }
    }
}

/// Decodes a complete reply
fn decode(reply: &[u8], id: u16) -> Result<Packet, ResolveError> {
    let packet = Packet::parse_response(reply, id)?;
    if packet.header.truncated {
        warn!("TCP response has the truncation flag set");
    }
    if packet.header.response_code != ResponseCode::NoError {
        warn!("server responded with {:?}", packet.header.response_code);
    }
    Ok(packet)
}

fn is_timeout(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
    )
}

fn classify(err: io::Error) -> ResolveError {
    match err.kind() {
        io::ErrorKind::UnexpectedEof | io::ErrorKind::InvalidData => ResolveError::Io(err),
        _ => ResolveError::Socket(err),
    }
}
