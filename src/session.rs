//! Routing of candidate lines to the parsers and fan-out of the results.
//!
//! A [`Session`] owns the framer and the aggregator of one stream. Every
//! call to [`Session::feed`] frames, parses and applies all lines the
//! fragment completes before it returns, in the order they completed.
//!
//! For every line that parses, observers see two events in this order:
//! [`Event::Sentence`] with the decoded record, then [`Event::Snapshot`]
//! with the merged state. A rejected line produces a single
//! [`Event::Invalid`]. Unknown tags are only logged and counted in
//! [`Stats::unknown`]; observers never hear of them. Neither touches the
//! snapshot.

use crate::config::Config;
use crate::err::ParseError;
use crate::lexer::{LineFramer, RawSentence};
use crate::parser::SentenceParser;
use crate::sentence::{SentenceKind, SentenceRecord};
use crate::snapshot::{Aggregator, NavigationSnapshot};

/// What became of a routed line.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Parsed(SentenceKind, SentenceRecord),
    Invalid(SentenceKind, ParseError),
    UnknownType(String),
}

/// Notification handed to observers.
#[derive(Debug)]
pub enum Event<'a> {
    Sentence(&'a SentenceRecord),
    Snapshot(&'a NavigationSnapshot),
    Invalid(SentenceKind, &'a ParseError),
}

/// Receives the events of a session.
pub trait Observer {
    fn notify(&mut self, event: &Event);
}

impl<F> Observer for F
where
    F: FnMut(&Event),
{
    fn notify(&mut self, event: &Event) {
        self(event)
    }
}

/// Number of lines routed per outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub parsed: u64,
    pub invalid: u64,
    pub unknown: u64,
}

/// One parsing session over one stream.
pub struct Session {
    config: Config,
    framer: LineFramer,
    aggregator: Aggregator,
    observers: Vec<Box<dyn Observer>>,
    stats: Stats,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Session {
            framer: LineFramer::new(config.max_pending),
            aggregator: Aggregator::new(config.satellite_policy),
            observers: Vec::new(),
            stats: Stats::default(),
            config,
        }
    }

    /// Registers an observer. Observers are notified in registration order.
    pub fn subscribe<O: Observer + 'static>(&mut self, observer: O) {
        self.observers.push(Box::new(observer));
    }

    /// Appends `fragment` and routes every line it completes.
    pub fn feed(&mut self, fragment: &str) -> Vec<Outcome> {
        self.framer.append(fragment);
        self.framer
            .drain()
            .iter()
            .map(|line| self.route(line))
            .collect()
    }

    /// Parses a single candidate line and, if it parses, merges it into the
    /// snapshot.
    pub fn route(&mut self, line: &str) -> Outcome {
        let raw = RawSentence::split(line);
        let tag = raw.tag();

        let kind = match self.config.talkers.kind_of(tag) {
            Some(kind) => kind,
            None => {
                debug!("NMEA type {} unknown, ignoring", tag);
                self.stats.unknown += 1;
                return Outcome::UnknownType(tag.to_owned());
            }
        };

        match SentenceParser::new(kind, &raw).parse() {
            Ok(record) => {
                self.stats.parsed += 1;
                self.emit(&Event::Sentence(&record));
                let snapshot = self.aggregator.apply(&record);
                for observer in self.observers.iter_mut() {
                    observer.notify(&Event::Snapshot(snapshot));
                }
                Outcome::Parsed(kind, record)
            }
            Err(err) => {
                debug!("dropping {}: {}", line, err);
                self.stats.invalid += 1;
                self.emit(&Event::Invalid(kind, &err));
                Outcome::Invalid(kind, err)
            }
        }
    }

    #[inline]
    pub fn snapshot(&self) -> &NavigationSnapshot {
        self.aggregator.snapshot()
    }

    #[inline]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn emit(&mut self, event: &Event) {
        for observer in self.observers.iter_mut() {
            observer.notify(event);
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    const GLL: &str = "$GPGLL,4916.45,N,12311.12,W,225444,A*31";

    fn recording(session: &mut Session) -> Rc<RefCell<Vec<String>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        session.subscribe(move |event: &Event| {
            let entry = match *event {
                Event::Sentence(record) => format!("sentence {}", record.kind()),
                Event::Snapshot(_) => "snapshot".to_owned(),
                Event::Invalid(kind, _) => format!("invalid {}", kind),
            };
            sink.borrow_mut().push(entry);
        });
        log
    }

    #[test]
    fn parsed_line_notifies_twice_in_order() {
        let mut session = Session::default();
        let log = recording(&mut session);
        assert_matches!(session.route(GLL), Outcome::Parsed(SentenceKind::Gll, _));
        assert_eq!(*log.borrow(), vec!["sentence GLL", "snapshot"]);
    }

    #[test]
    fn invalid_line_notifies_once_and_keeps_snapshot() {
        let mut session = Session::default();
        session.route(GLL);
        let before = session.snapshot().clone();
        let log = recording(&mut session);

        assert_matches!(
            session.route("$GPGGA,123519,4807.038,N"),
            Outcome::Invalid(SentenceKind::Gga, ParseError::TooFewFields(_, 4, 15))
        );
        assert_eq!(*log.borrow(), vec!["invalid GGA"]);
        assert_eq!(*session.snapshot(), before);
    }

    #[test]
    fn unknown_type_is_counted_not_notified() {
        let mut session = Session::default();
        let log = recording(&mut session);
        assert_eq!(
            session.route("$GPZDA,201530.00,04,07,2002,00,00*60"),
            Outcome::UnknownType("$GPZDA".to_owned())
        );
        assert!(log.borrow().is_empty());
        assert_eq!(*session.snapshot(), NavigationSnapshot::default());
        assert_eq!(session.stats().unknown, 1);
    }

    #[test]
    fn other_talkers_need_configuration() {
        let line = "$GNGLL,4916.45,N,12311.12,W,225444,A*31";
        let mut strict = Session::default();
        assert_matches!(strict.route(line), Outcome::UnknownType(_));

        let mut lenient =
            Session::new(Config::default().with_talkers(crate::parser::TalkerFilter::Any));
        assert_matches!(lenient.route(line), Outcome::Parsed(SentenceKind::Gll, _));
    }

    #[test]
    fn every_observer_is_notified() {
        let mut session = Session::default();
        let first = recording(&mut session);
        let second = recording(&mut session);
        session.route(GLL);
        assert_eq!(first.borrow().len(), 2);
        assert_eq!(*first.borrow(), *second.borrow());
    }

    #[test]
    fn feed_routes_completed_lines_only() {
        let mut session = Session::default();
        let outcomes = session.feed("$GPTXT,01,01,02,A*00\r\n$GPTXT,01,01,02,B*00\r\n$GPTX");
        assert_eq!(outcomes.len(), 2);
        assert_eq!(session.snapshot().device_info, vec!["A", "B"]);
        assert_eq!(session.stats().parsed, 2);

        let outcomes = session.feed("T,01,01,02,C*00\r\n");
        assert_eq!(outcomes.len(), 1);
        assert_eq!(session.snapshot().device_info, vec!["A", "B", "C"]);
    }
}
