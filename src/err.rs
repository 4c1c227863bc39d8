use std::io;

use crate::sentence::SentenceKind;

quick_error! {
    /// Why a candidate sentence was rejected.
    ///
    /// A rejected sentence never reaches the aggregator, so a snapshot is
    /// never left half-updated by bad input.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ParseError {
        TooFewFields(kind: SentenceKind, found: usize, expected: usize) {
            description("Too few fields")
            display("{} sentence has {} fields, expected at least {}", kind, found, expected)
        }
        InvalidEnum(kind: SentenceKind, field: &'static str, value: String) {
            description("Invalid enumerated field")
            display("{} sentence has invalid {} \"{}\"", kind, field, value)
        }
        UnexpectedArity(kind: SentenceKind, found: usize) {
            description("Unexpected field count")
            display("{} sentence has {} fields, expected one of 8, 12, 16, 19 or 20", kind, found)
        }
    }
}

impl ParseError {
    /// The kind of sentence that failed to parse.
    pub fn kind(&self) -> SentenceKind {
        match *self {
            ParseError::TooFewFields(kind, ..)
            | ParseError::InvalidEnum(kind, ..)
            | ParseError::UnexpectedArity(kind, ..) => kind,
        }
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum CliError {
        Io(err: io::Error) {
            from()
            display("Could not read NMEA input: {}", err)
            cause(err)
        }
        InvalidArgument(name: &'static str, value: String) {
            display("Invalid value \"{}\" for --{}", value, name)
        }
    }
}
