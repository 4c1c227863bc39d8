//! This module provides the parsers for the sentences of the *NMEA 0183*
//! protocol this crate understands: RMC, GSA, GSV, GLL, GGA, VTG and TXT.
//!
//! Every parser checks the field count first and then reads each field by
//! its fixed position. Optional numeric fields fall back to their sentinel;
//! only fields without which the record means nothing fail the sentence.

use arrayvec::ArrayVec;

use crate::convert::{self, FLOAT_SENTINEL};
use crate::err::ParseError;
use crate::lexer::RawSentence;
use crate::sentence::*;

/// Talker ids accepted in front of the sentence formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TalkerFilter {
    /// Only `$GP...` sentences.
    Gps,
    /// Any two-letter talker, e.g. `$GN...` or `$GL...`.
    Any,
}

impl Default for TalkerFilter {
    fn default() -> Self {
        TalkerFilter::Gps
    }
}

impl TalkerFilter {
    /// Resolves a tag such as `$GPRMC` to the kind of sentence it starts.
    pub fn kind_of(self, tag: &str) -> Option<SentenceKind> {
        let tag = tag.strip_prefix('$')?;
        if tag.len() != 5 || !tag.is_ascii() {
            return None;
        }
        let (talker, formatter) = tag.split_at(2);
        let talker_ok = match self {
            TalkerFilter::Gps => talker == "GP",
            TalkerFilter::Any => talker.bytes().all(|b| b.is_ascii_uppercase()),
        };
        if !talker_ok {
            return None;
        }
        SentenceKind::from_formatter(formatter)
    }
}

/// Parses one [`RawSentence`](../lexer/struct.RawSentence.html) of a known
/// kind into a [`SentenceRecord`](../sentence/enum.SentenceRecord.html).
#[derive(Debug)]
pub struct SentenceParser<'r, 'a> {
    kind: SentenceKind,
    raw: &'r RawSentence<'a>,
}

impl<'r, 'a> SentenceParser<'r, 'a> {
    pub fn new(kind: SentenceKind, raw: &'r RawSentence<'a>) -> Self {
        SentenceParser { kind, raw }
    }

    pub fn parse(&self) -> Result<SentenceRecord, ParseError> {
        if self.raw.len() < self.kind.min_fields() {
            return Err(ParseError::TooFewFields(
                self.kind,
                self.raw.len(),
                self.kind.min_fields(),
            ));
        }

        Ok(match self.kind {
            SentenceKind::Rmc => SentenceRecord::Rmc(self.parse_rmc()),
            SentenceKind::Gsa => SentenceRecord::Gsa(self.parse_gsa()?),
            SentenceKind::Gsv => SentenceRecord::Gsv(self.parse_gsv()?),
            SentenceKind::Gll => SentenceRecord::Gll(self.parse_gll()),
            SentenceKind::Gga => SentenceRecord::Gga(self.parse_gga()?),
            SentenceKind::Vtg => SentenceRecord::Vtg(self.parse_vtg()),
            SentenceKind::Txt => SentenceRecord::Txt(self.parse_txt()),
        })
    }

    fn parse_rmc(&self) -> RmcRecord {
        let raw = self.raw;
        let speed_knots = raw.number::<f64>(7);

        RmcRecord {
            timestamp: convert::timestamp(raw.field(9), raw.field(1)),
            status: FixStatus::from_field(raw.field(2)),
            lat: coord(convert::latitude, raw.field(3)),
            ns: CardDir::from_field(raw.field(4)),
            long: coord(convert::longitude, raw.field(5)),
            ew: CardDir::from_field(raw.field(6)),
            speed_knots: speed_knots.unwrap_or(FLOAT_SENTINEL),
            speed_ms: speed_knots.map_or(FLOAT_SENTINEL, convert::knots_to_ms),
            speed_kph: speed_knots.map_or(FLOAT_SENTINEL, convert::knots_to_kph),
            course: accept!(raw, 8, f64),
            magnetic_variation: accept!(raw, 10, f64),
            variation_dir: CardDir::from_field(raw.field(11)),
        }
    }

    fn parse_gsa(&self) -> Result<GsaRecord, ParseError> {
        let raw = self.raw;
        let mode = expect!(raw, self.kind, 1, "mode", FixMode::try_from_field);
        let fix_type = expect!(raw, self.kind, 2, "fix type", FixDimension::try_from_field);

        let mut svids = ArrayVec::<[i32; GSA_SLOTS]>::new();
        for idx in 3..3 + GSA_SLOTS {
            if let Some(id) = raw.number::<i32>(idx) {
                // cannot overflow, there are exactly GSA_SLOTS slots
                let _ = svids.try_push(id);
            }
        }

        Ok(GsaRecord {
            mode,
            fix_type,
            svids,
            pdop: accept!(raw, 15, f64),
            hdop: accept!(raw, 16, f64),
            vdop: accept!(raw, 17, f64),
        })
    }

    fn parse_gsv(&self) -> Result<GsvRecord, ParseError> {
        let raw = self.raw;
        let count = match raw.len() {
            19 | 20 => 4,
            16 => 3,
            12 => 2,
            8 => 1,
            n => return Err(ParseError::UnexpectedArity(self.kind, n)),
        };

        let mut satellites = ArrayVec::<[SatelliteObservation; GSV_BATCH]>::new();
        for n in 0..count {
            let base = 4 + 4 * n;
            let sat = SatelliteObservation {
                id: accept!(raw, base, i32),
                elevation: accept!(raw, base + 1, i32),
                azimuth: accept!(raw, base + 2, i32),
                snr: accept!(raw, base + 3, i32),
            };
            // count never exceeds GSV_BATCH
            let _ = satellites.try_push(sat);
        }

        Ok(GsvRecord {
            message_count: accept!(raw, 1, i32),
            message_number: accept!(raw, 2, i32),
            satellites_in_view: accept!(raw, 3, i32),
            satellites,
        })
    }

    fn parse_gll(&self) -> GllRecord {
        let raw = self.raw;
        let time = raw.field(5);

        GllRecord {
            lat: coord(convert::latitude, raw.field(1)),
            ns: CardDir::from_field(raw.field(2)),
            long: coord(convert::longitude, raw.field(3)),
            ew: CardDir::from_field(raw.field(4)),
            timestamp: if time.is_empty() {
                None
            } else {
                Some(convert::timestamp("", time))
            },
            status: FixStatus::from_field(raw.field(6)),
        }
    }

    fn parse_gga(&self) -> Result<GgaRecord, ParseError> {
        let raw = self.raw;
        let quality = expect!(raw, self.kind, 6, "fix quality", GpsQualityInd::try_from_field);

        Ok(GgaRecord {
            timestamp: convert::timestamp("", raw.field(1)),
            lat: coord(convert::latitude, raw.field(2)),
            ns: CardDir::from_field(raw.field(3)),
            long: coord(convert::longitude, raw.field(4)),
            ew: CardDir::from_field(raw.field(5)),
            quality,
            sat_count: accept!(raw, 7, i32),
            hdop: accept!(raw, 8, f64),
            altitude: accept!(raw, 9, f64),
            altitude_unit: raw.field(10).to_owned(),
            geoid_sep: accept!(raw, 11, f64),
            geoid_sep_unit: raw.field(12).to_owned(),
            dgps_age: accept!(raw, 13, f64),
            station_id: raw.field(14).to_owned(),
        })
    }

    fn parse_vtg(&self) -> VtgRecord {
        let raw = self.raw;
        let speed_knots = raw.number::<f64>(5);
        let speed_kph = raw
            .number::<f64>(7)
            .or_else(|| speed_knots.map(convert::knots_to_kph));

        VtgRecord {
            track: accept!(raw, 1, f64),
            track_ref: raw.field(2).to_owned(),
            magnetic_track: accept!(raw, 3, f64),
            speed_knots: speed_knots.unwrap_or(FLOAT_SENTINEL),
            speed_kph: speed_kph.unwrap_or(FLOAT_SENTINEL),
        }
    }

    fn parse_txt(&self) -> TxtRecord {
        let raw = self.raw;

        TxtRecord {
            total: accept!(raw, 1, i32),
            number: accept!(raw, 2, i32),
            severity: accept!(raw, 3, i32),
            text: raw.field(4).to_owned(),
        }
    }
}

#[inline]
fn coord(conv: fn(&str) -> Option<f64>, field: &str) -> f64 {
    conv(field).unwrap_or(FLOAT_SENTINEL)
}
