#[macro_use]
extern crate log;

use std::fs::File;
use std::io::{self, Read};
use std::process;
use std::str;

use clap::{Arg, ArgAction, ArgMatches, Command};
use env_logger::{Builder, Target};

use lodestar::{CliError, Config, Event, SatellitePolicy, Session, TalkerFilter};

const DEFAULT_CHUNK: usize = 256;

fn command() -> Command {
    Command::new("lodestar")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decodes an NMEA 0183 stream and prints the merged navigation snapshot")
        .arg(
            Arg::new("file")
                .value_name("FILE")
                .help("NMEA capture to read. Reads stdin when omitted"),
        )
        .arg(
            Arg::new("chunk")
                .long("chunk")
                .value_name("BYTES")
                .help("Read size, fragments need not align with sentences"),
        )
        .arg(
            Arg::new("max-pending")
                .long("max-pending")
                .value_name("BYTES")
                .help("Unterminated input kept before it is discarded"),
        )
        .arg(
            Arg::new("upsert")
                .long("upsert")
                .action(ArgAction::SetTrue)
                .help("Refresh known satellites instead of keeping the first observation"),
        )
        .arg(
            Arg::new("any-talker")
                .long("any-talker")
                .action(ArgAction::SetTrue)
                .help("Accept every talker id, not only GP"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Only print the final snapshot"),
        )
}

fn size_arg(matches: &ArgMatches, name: &'static str, default: usize) -> Result<usize, CliError> {
    match matches.get_one::<String>(name) {
        None => Ok(default),
        Some(value) => match value.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(CliError::InvalidArgument(name, value.clone())),
        },
    }
}

fn config(matches: &ArgMatches) -> Result<Config, CliError> {
    let mut config = Config::default();
    let max_pending = size_arg(matches, "max-pending", config.max_pending)?;
    config = config.with_max_pending(max_pending);
    if matches.get_flag("upsert") {
        config = config.with_satellite_policy(SatellitePolicy::Upsert);
    }
    if matches.get_flag("any-talker") {
        config = config.with_talkers(TalkerFilter::Any);
    }
    Ok(config)
}

/// Decodes chunks of a byte stream, holding back a multibyte character that
/// a chunk boundary cut in two until the next chunk completes it.
#[derive(Debug, Default)]
struct Utf8Carry {
    pending: Vec<u8>,
}

impl Utf8Carry {
    fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        let mut out = String::new();
        loop {
            match str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return out;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    // valid_up_to marks a clean character boundary
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        // truncated character at the end, wait for more bytes
                        None => {
                            self.pending.drain(..valid);
                            return out;
                        }
                        Some(bad) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + bad);
                        }
                    }
                }
            }
        }
    }
}

fn run(matches: &ArgMatches) -> Result<(), CliError> {
    let chunk = size_arg(matches, "chunk", DEFAULT_CHUNK)?;
    let mut input: Box<dyn Read> = match matches.get_one::<String>("file") {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };

    let mut session = Session::new(config(matches)?);
    if !matches.get_flag("quiet") {
        session.subscribe(|event: &Event| match *event {
            Event::Sentence(record) => println!("{:?}", record),
            Event::Invalid(kind, err) => warn!("{}: {}", kind, err),
            Event::Snapshot(_) => (),
        });
    }

    let mut buf = vec![0u8; chunk];
    let mut carry = Utf8Carry::default();
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(ref e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        session.feed(&carry.decode(&buf[..n]));
    }

    let stats = session.stats();
    info!(
        "{} parsed, {} invalid, {} unknown",
        stats.parsed, stats.invalid, stats.unknown
    );
    print!("{}", session.snapshot());
    Ok(())
}

fn main() {
    let mut builder = Builder::from_default_env();
    builder
        .target(Target::Stderr)
        .format_timestamp_secs()
        .format_module_path(false)
        .init();

    let matches = command().get_matches();
    if let Err(e) = run(&matches) {
        error!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_pending_flag_reaches_config() {
        let config = config_from(&["lodestar", "--max-pending", "64", "--upsert"]);
        assert_eq!(config.max_pending, 64);
        assert_eq!(config.satellite_policy, SatellitePolicy::Upsert);

        let defaults = config_from(&["lodestar"]);
        assert_eq!(defaults.max_pending, Config::default().max_pending);
    }

    #[test]
    fn zero_max_pending_is_rejected() {
        let matches = command().get_matches_from(vec!["lodestar", "--max-pending", "0"]);
        match config(&matches) {
            Err(CliError::InvalidArgument(name, value)) => {
                assert_eq!((name, value.as_str()), ("max-pending", "0"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    fn config_from(args: &[&str]) -> Config {
        config(&command().get_matches_from(args.to_vec())).expect("valid arguments")
    }

    #[test]
    fn split_character_survives_chunk_boundary() {
        let text = "$GPTXT,01,01,02,caf\u{e9}\n";
        let bytes = text.as_bytes();
        let cut = bytes.len() - 2;
        let mut carry = Utf8Carry::default();
        let mut out = carry.decode(&bytes[..cut]);
        assert_eq!(out, "$GPTXT,01,01,02,caf");
        out.push_str(&carry.decode(&bytes[cut..]));
        assert_eq!(out, text);
    }

    #[test]
    fn invalid_bytes_become_replacement() {
        let mut carry = Utf8Carry::default();
        assert_eq!(carry.decode(b"$A\xffB\n"), "$A\u{fffd}B\n");
        assert!(carry.pending.is_empty());
    }
}
