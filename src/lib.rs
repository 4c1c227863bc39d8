//! Forgiving decoder for the *NMEA 0183* sentences a GPS receiver emits.
//!
//! Text arrives in arbitrary fragments, is framed into sentences, parsed
//! into typed records and merged into a single [`NavigationSnapshot`].
//! Malformed sentences are reported and dropped; they never disturb the
//! snapshot.
//!
//! ```
//! use lodestar::{Event, Session};
//!
//! let mut session = Session::default();
//! session.subscribe(|event: &Event| {
//!     if let Event::Snapshot(snapshot) = *event {
//!         println!("{} {}", snapshot.latitude, snapshot.ns);
//!     }
//! });
//! session.feed("$GPGLL,4916.45,N,12311.12,W,225444,A*31\r\n");
//! assert!((session.snapshot().latitude - 49.274_166).abs() < 1e-6);
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

#[macro_use]
mod macros;
pub mod config;
pub mod convert;
pub mod err;
pub mod lexer;
pub mod parser;
pub mod sentence;
pub mod session;
pub mod snapshot;

pub use config::{Config, SatellitePolicy};
pub use err::{CliError, ParseError};
pub use lexer::{LineFramer, RawSentence};
pub use parser::{SentenceParser, TalkerFilter};
pub use sentence::{SentenceKind, SentenceRecord};
pub use session::{Event, Observer, Outcome, Session, Stats};
pub use snapshot::{Aggregator, NavigationSnapshot};
