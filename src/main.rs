use std::process;
use std::time::Duration;

use clap::error::ErrorKind;
use clap::Parser;
use dnsq::dns_parser::{Packet, Type};
use dnsq::{resolve, Config, Query, QueryError, ResolveError, DNS_PORT};
use log::debug;

const ERROR_INVALID_ARGS: i32 = 1;
const ERROR_INVALID_HOSTNAME: i32 = 2;
const ERROR_SOCKET_TIMEOUT: i32 = 3;
const GENERIC_IO_ERROR: i32 = 4;
const GENERIC_SOCKET_ERROR: i32 = 5;
const GENERIC_DNS_ERROR: i32 = 6;

#[derive(Parser, Debug)]
#[command(name = "dnsq", version)]
#[command(about = "Ask a DNS server for one type of record")]
struct Cli {
    /// Address of the DNS server
    server: String,

    /// Domain name to look up
    hostname: String,

    /// Record type: A, CNAME, MX, NS, PTR or SOA
    record_type: String,

    /// Server port
    #[arg(short, long, default_value_t = DNS_PORT)]
    port: u16,

    /// Seconds to wait for each attempt
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            usage(ERROR_INVALID_ARGS)
        }
    };

    let config = Config {
        port: cli.port,
        timeout: Duration::from_secs(cli.timeout),
        ..Config::default()
    };

    let query = match Query::parse(&cli.server, &cli.hostname, &cli.record_type, config.port) {
        Ok(query) => query,
        Err(err @ QueryError::UnsupportedType(_)) => {
            eprintln!("{}", err);
            usage(ERROR_INVALID_ARGS)
        }
        Err(err) => {
            eprintln!("{}", err);
            usage(ERROR_INVALID_HOSTNAME)
        }
    };
    debug!("querying {} for {} {}", query.server(), query.name(), query.typ());

    match resolve(&query, &config) {
        Ok(packet) => print_packet(&packet),
        Err(err) => {
            eprintln!("{}", err);
            process::exit(exit_code(&err));
        }
    }
}

fn exit_code(err: &ResolveError) -> i32 {
    match err {
        ResolveError::TimedOut { .. } => ERROR_SOCKET_TIMEOUT,
        ResolveError::Io(_) => GENERIC_IO_ERROR,
        ResolveError::Socket(_) => GENERIC_SOCKET_ERROR,
        ResolveError::Protocol(_) => GENERIC_DNS_ERROR,
    }
}

fn print_packet(packet: &Packet) {
    println!("Queries: ");
    for question in &packet.questions {
        println!("{}", question);
    }
    println!("\nAnswers: ");
    for record in &packet.answers {
        println!("{}", record);
    }
    println!("\nAuthority: ");
    for record in &packet.nameservers {
        println!("{}", record);
    }
    println!("\nAdditional: ");
    for record in &packet.additional {
        println!("{}", record);
    }
}

fn usage(code: i32) -> ! {
    let types: Vec<&str> = Type::ALL.iter().map(|typ| typ.mnemonic()).collect();
    eprintln!("Usage: dnsq <DNS IP> <HOSTNAME> <RECORD TYPE>");
    eprintln!("Supported Record Types: {}", types.join(", "));
    process::exit(code)
}
