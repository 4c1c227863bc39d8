//! Framing of an unbounded character stream into candidate sentences, and
//! splitting of a candidate sentence into its fields.

use std::str::FromStr;

const START_MARKER: char = '$';
const FIELD_SEPARATOR: char = ',';
const CHECKSUM_MARKER: char = '*';

/// Default upper bound of the unterminated tail kept between appends.
pub const DEFAULT_MAX_PENDING: usize = 4096;

/// Buffers text fragments and hands out the lines they complete.
///
/// Fragments need not be aligned to sentence boundaries. A line is handed
/// out once it is terminated by `\n` and contains a `$`; complete lines
/// without a `$` are noise and dropped.
#[derive(Debug)]
pub struct LineFramer {
    pending: String,
    max_pending: usize,
}

impl LineFramer {
    pub fn new(max_pending: usize) -> Self {
        LineFramer {
            pending: String::new(),
            max_pending,
        }
    }

    /// Buffer `fragment` for the next call to [`drain`](#method.drain).
    pub fn append(&mut self, fragment: &str) {
        self.pending.push_str(fragment);
    }

    /// Removes and returns every complete candidate line, oldest first.
    ///
    /// The trailing partial line stays buffered. Each returned line starts at
    /// its first `$` and has its line ending stripped.
    pub fn drain(&mut self) -> Vec<String> {
        let end = match self.pending.rfind('\n') {
            Some(pos) => pos + 1,
            None => {
                self.enforce_limit();
                return Vec::new();
            }
        };

        let lines = self.pending[..end]
            .lines()
            .filter_map(|line| {
                let start = line.find(START_MARKER)?;
                Some(line[start..].trim_end().to_owned())
            })
            .collect();

        self.pending.drain(..end);
        self.enforce_limit();
        lines
    }

    /// Bytes buffered that do not yet form a complete line.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    fn enforce_limit(&mut self) {
        if self.pending.len() > self.max_pending {
            warn!(
                "discarding {} bytes of unterminated input (limit {})",
                self.pending.len(),
                self.max_pending
            );
            self.pending.clear();
        }
    }
}

impl Default for LineFramer {
    fn default() -> Self {
        LineFramer::new(DEFAULT_MAX_PENDING)
    }
}

/// A candidate line split on `,`. Field 0 is the tag, e.g. `$GPRMC`.
///
/// A trailing `*hh` checksum is cut off the last field; it is not verified.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSentence<'a> {
    fields: Vec<&'a str>,
}

/// Removes a trailing `*hh` checksum. A `*` anywhere else is field text.
fn strip_checksum(line: &str) -> &str {
    let bytes = line.as_bytes();
    match bytes.len().checked_sub(3) {
        Some(pos)
            if bytes[pos] == CHECKSUM_MARKER as u8
                && bytes[pos + 1..].iter().all(u8::is_ascii_hexdigit) =>
        {
            &line[..pos]
        }
        _ => line,
    }
}

impl<'a> RawSentence<'a> {
    pub fn split(line: &'a str) -> Self {
        let body = strip_checksum(line);
        RawSentence {
            fields: body.split(FIELD_SEPARATOR).collect(),
        }
    }

    #[inline]
    pub fn tag(&self) -> &'a str {
        self.fields[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// The field at `idx`, or `""` past the end of the sentence.
    #[inline]
    pub fn field(&self, idx: usize) -> &'a str {
        self.fields.get(idx).cloned().unwrap_or("")
    }

    /// Parses the field at `idx`. `None` when it is empty, missing or not a
    /// valid `T`; the caller substitutes the sentinel.
    pub fn number<T: FromStr>(&self, idx: usize) -> Option<T> {
        let field = self.field(idx);
        if field.is_empty() {
            return None;
        }
        let parsed = field.parse::<T>().ok();
        if parsed.is_none() {
            trace!(
                "{}: field {} \"{}\" is not numeric, using sentinel",
                self.tag(),
                idx,
                field
            );
        }
        parsed
    }
}
