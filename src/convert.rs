//! Unit and coordinate conversions shared by the sentence parsers.

use chrono::{NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::sentence::Timestamp;

/// Value of an absent or unparseable floating point field.
pub const FLOAT_SENTINEL: f64 = -1.0;
/// Value of an absent or unparseable integer field.
pub const INT_SENTINEL: i32 = -1;

const LAT_SPLIT: usize = 2;
const ABS_MAX_LAT: f64 = 90.0;
const LONG_SPLIT: usize = 3;
const ABS_MAX_LONG: f64 = 180.0;

const KPH_PER_KNOT: f64 = 1.852;
const MS_PER_KNOT: f64 = 1852.0 / 3600.0;

const TIME_FORMAT: &str = "%H%M%S%.f";
const DATE_TIME_FORMAT: &str = "%d%m%y%H%M%S%.f";

/// Converts a `DDMM.mmmm` field to decimal degrees.
#[inline]
pub fn latitude(field: &str) -> Option<f64> {
    parse_coord(field, LAT_SPLIT, ABS_MAX_LAT)
}

/// Converts a `DDDMM.mmmm` field to decimal degrees.
#[inline]
pub fn longitude(field: &str) -> Option<f64> {
    parse_coord(field, LONG_SPLIT, ABS_MAX_LONG)
}

/// Parse `coord` as an unsigned coordinate magnitude.
/// `deg_split` is the number of digits that make up the degrees.
/// `abs_max` is maximum value in degree, e.g. 180 for longitude.
fn parse_coord(coord: &str, deg_split: usize, abs_max: f64) -> Option<f64> {
    let deg = coord.get(..deg_split)?;
    let min = coord.get(deg_split..)?;
    if !deg.bytes().all(|b| b.is_ascii_digit()) || !is_minutes(min) {
        return None;
    }

    let min = min.parse::<f64>().ok()?;
    if min >= 60.0 {
        debug!("coordinate {} has {} minutes", coord, min);
        return None;
    }
    let dec_deg = f64::from(deg.parse::<u16>().ok()?) + min / 60.0;
    if !dec_deg.is_finite() || dec_deg > abs_max {
        debug!("coordinate {} out of range 0..={}", coord, abs_max);
        return None;
    }
    Some(dec_deg)
}

/// Plain `MM` or `MM.mmmm`: digits with at most one decimal point. Signs,
/// exponents and words such as `inf` are not minutes.
fn is_minutes(min: &str) -> bool {
    let mut parts = min.splitn(2, '.');
    let whole = parts.next().unwrap_or("");
    let frac = parts.next().unwrap_or("");
    !(whole.is_empty() && frac.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}

#[inline]
pub fn knots_to_kph(knots: f64) -> f64 {
    knots * KPH_PER_KNOT
}

#[inline]
pub fn knots_to_ms(knots: f64) -> f64 {
    knots * MS_PER_KNOT
}

/// Builds a timestamp from an `hhmmss.sss` field and an optional `ddmmyy`
/// field.
///
/// If the fields do not parse, the current wall clock is returned as
/// [`Timestamp::WallClock`]. That fallback is lossy and not an error.
pub fn timestamp(date: &str, time: &str) -> Timestamp {
    if date.is_empty() {
        if let Ok(t) = NaiveTime::parse_from_str(time, TIME_FORMAT) {
            return Timestamp::TimeOfDay(t);
        }
    } else {
        let concatenated = format!("{}{}", date, time);
        if let Ok(dt) = NaiveDateTime::parse_from_str(&concatenated, DATE_TIME_FORMAT) {
            return Timestamp::Absolute(Utc.from_utc_datetime(&dt));
        }
    }

    debug!(
        "unreadable date \"{}\" / time \"{}\", falling back to wall clock",
        date, time
    );
    Timestamp::WallClock(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn latitude_uses_two_degree_digits() {
        assert!(close(latitude("4916.45").unwrap(), 49.0 + 16.45 / 60.0));
        assert!(close(latitude("0000.00").unwrap(), 0.0));
    }

    #[test]
    fn longitude_uses_three_degree_digits() {
        assert!(close(longitude("12311.12").unwrap(), 123.0 + 11.12 / 60.0));
        assert!(close(longitude("00833.9150").unwrap(), 8.0 + 33.915 / 60.0));
    }

    #[test]
    fn malformed_coordinates() {
        assert_eq!(latitude(""), None);
        assert_eq!(latitude("4"), None);
        assert_eq!(latitude("49"), None);
        assert_eq!(latitude("-916.45"), None);
        assert_eq!(latitude("9916.45"), None);
        assert_eq!(longitude("18500.00"), None);
        assert_eq!(longitude("é1200.00"), None);
    }

    #[test]
    fn minutes_must_be_plain_decimals() {
        assert_eq!(latitude("49-5.00"), None);
        assert_eq!(latitude("49+5.00"), None);
        assert_eq!(longitude("1231e1"), None);
        assert_eq!(latitude("49inf"), None);
        assert_eq!(latitude("49NaN"), None);
        assert_eq!(latitude("4916.4.5"), None);
        assert_eq!(latitude("49."), None);
        assert_eq!(latitude("4960.00"), None);
        assert!(close(latitude("4959.99").unwrap_or(0.0), 49.0 + 59.99 / 60.0));
        assert!(close(latitude("4916").unwrap_or(0.0), 49.0 + 16.0 / 60.0));
    }

    #[test]
    fn speed_factors() {
        assert!(close(knots_to_kph(10.0), 18.52));
        assert!(close(knots_to_ms(1.0), 0.514_444_444));
    }

    #[test]
    fn time_only_is_time_of_day() {
        match timestamp("", "225444") {
            Timestamp::TimeOfDay(t) => {
                assert_eq!((t.hour(), t.minute(), t.second()), (22, 54, 44));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn date_and_time_are_absolute() {
        match timestamp("230394", "123519.50") {
            Timestamp::Absolute(t) => {
                assert_eq!((t.year(), t.month(), t.day()), (1994, 3, 23));
                assert_eq!((t.hour(), t.minute(), t.second()), (12, 35, 19));
                assert_eq!(t.nanosecond(), 500_000_000);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn garbage_falls_back_to_wall_clock() {
        let before = Utc::now();
        match timestamp("999999", "xx") {
            Timestamp::WallClock(t) => assert!(t >= before),
            other => panic!("unexpected {:?}", other),
        }
        assert_matches!(timestamp("", ""), Timestamp::WallClock(_));
    }
}
