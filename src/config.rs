use std::time::Duration;

use super::DNS_PORT;

/// Tunables for a single resolution
///
/// At least one attempt is made over each transport that is used, whatever
/// the attempt counts say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Port the server listens on, for both UDP and TCP
    pub port: u16,
    /// How long each attempt waits for a reply
    pub timeout: Duration,
    pub udp_attempts: u8,
    /// Attempts made once a truncated UDP reply came back
    pub tcp_attempts: u8,
    pub recursion_desired: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            port: DNS_PORT,
            timeout: Duration::from_secs(5),
            udp_attempts: 3,
            tcp_attempts: 2,
            recursion_desired: true,
        }
    }
}
