use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use log::{trace, warn};
use socket2::{Domain, Protocol, SockAddr, Socket, Type};
use std::io::{self, Read, Write};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpStream, UdpSocket};
use std::time::Duration;

/// Largest datagram we are prepared to receive
const MAX_DATAGRAM_SIZE: usize = 65535;

/// Moves one encoded query to the server and brings back the raw reply
///
/// Each call is one attempt. Implementations report an expired wait as an
/// error of kind `TimedOut` or `WouldBlock`.
pub trait Transport {
    fn exchange_udp(&mut self, query: &[u8]) -> io::Result<Vec<u8>>;

    /// Sends the query with a two byte length prefix and reads a reply
    /// framed the same way
    fn exchange_tcp(&mut self, query: &[u8]) -> io::Result<Vec<u8>>;
}

/// Talks to a real server through fresh sockets, one per attempt
#[derive(Debug, Clone)]
pub struct SocketTransport {
    server: SocketAddr,
    timeout: Duration,
}

impl SocketTransport {
    pub fn new(server: SocketAddr, timeout: Duration) -> SocketTransport {
        SocketTransport { server, timeout }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    fn any_addr(&self) -> SockAddr {
        let ip: IpAddr = match self.server {
            SocketAddr::V4(_) => Ipv4Addr::UNSPECIFIED.into(),
            SocketAddr::V6(_) => Ipv6Addr::UNSPECIFIED.into(),
        };
        SocketAddr::new(ip, 0).into()
    }

    fn udp_socket(&self) -> io::Result<UdpSocket> {
        let socket = Socket::new(
            Domain::for_address(self.server),
            Type::DGRAM,
            Some(Protocol::UDP),
        )?;
        socket.bind(&self.any_addr())?;
        socket.set_read_timeout(Some(self.timeout))?;
        // only accept datagrams coming from the server
        socket.connect(&self.server.into())?;
        Ok(socket.into())
    }

    fn tcp_stream(&self) -> io::Result<TcpStream> {
        let socket = Socket::new(
            Domain::for_address(self.server),
            Type::STREAM,
            Some(Protocol::TCP),
        )?;
        socket.connect_timeout(&self.server.into(), self.timeout)?;
        socket.set_read_timeout(Some(self.timeout))?;
        socket.set_write_timeout(Some(self.timeout))?;
        Ok(socket.into())
    }
}

impl Transport for SocketTransport {
    fn exchange_udp(&mut self, query: &[u8]) -> io::Result<Vec<u8>> {
        let socket = self.udp_socket()?;
        trace!("sending {} byte query to {} over UDP", query.len(), self.server);
        let sent = socket.send(query)?;
        if sent != query.len() {
            warn!("failed to send entire packet");
        }

        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        let len = socket.recv(&mut buf)?;
        buf.truncate(len);
        Ok(buf)
    }

    fn exchange_tcp(&mut self, query: &[u8]) -> io::Result<Vec<u8>> {
        let len = u16::try_from(query.len())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "query too large for TCP"))?;
        let mut stream = self.tcp_stream()?;
        trace!("sending {} byte query to {} over TCP", query.len(), self.server);

        let mut framed = Vec::with_capacity(query.len() + 2);
        framed.write_u16::<BigEndian>(len)?;
        framed.extend_from_slice(query);
        stream.write_all(&framed)?;

        let len = stream.read_u16::<BigEndian>()? as usize;
        let mut buf = vec![0u8; len];
        stream.read_exact(&mut buf)?;
        Ok(buf)
    }
}
