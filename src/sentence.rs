//! Typed records for the supported sentence kinds of the *NMEA 0183*
//! protocol.

use arrayvec::ArrayVec;
use chrono::{DateTime, NaiveTime, Utc};
use std::fmt;

/// Satellites carried by a single GSV sentence.
pub const GSV_BATCH: usize = 4;
/// Satellite-id slots of a GSA sentence.
pub const GSA_SLOTS: usize = 12;

/// The sentence kinds this crate decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SentenceKind {
    Rmc,
    Gsa,
    Gsv,
    Gll,
    Gga,
    Vtg,
    Txt,
}

impl SentenceKind {
    /// Takes the three-letter formatter of a sentence (e.g. `"RMC"`) and
    /// returns the corresponding `SentenceKind`.
    pub fn from_formatter(formatter: &str) -> Option<Self> {
        match formatter {
            "RMC" => Some(SentenceKind::Rmc),
            "GSA" => Some(SentenceKind::Gsa),
            "GSV" => Some(SentenceKind::Gsv),
            "GLL" => Some(SentenceKind::Gll),
            "GGA" => Some(SentenceKind::Gga),
            "VTG" => Some(SentenceKind::Vtg),
            "TXT" => Some(SentenceKind::Txt),
            _ => None,
        }
    }

    /// Smallest field count (tag included) a sentence of this kind needs.
    pub fn min_fields(self) -> usize {
        match self {
            SentenceKind::Rmc => 12,
            SentenceKind::Gsa => 17,
            SentenceKind::Gsv => 8,
            SentenceKind::Gll => 5,
            SentenceKind::Gga => 15,
            SentenceKind::Vtg => 9,
            SentenceKind::Txt => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentenceKind::Rmc => "RMC",
            SentenceKind::Gsa => "GSA",
            SentenceKind::Gsv => "GSV",
            SentenceKind::Gll => "GLL",
            SentenceKind::Gga => "GGA",
            SentenceKind::Vtg => "VTG",
            SentenceKind::Txt => "TXT",
        }
    }
}

impl fmt::Display for SentenceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The cardinal directions, as carried next to a coordinate magnitude.
///
/// Coordinates are kept as unsigned magnitudes; combining them with the
/// direction is left to the consumer (see [`CardDir::get_sign`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardDir {
    North,
    South,
    East,
    West,
    Unknown,
}

impl CardDir {
    pub fn from_field(field: &str) -> Self {
        match field {
            "N" => CardDir::North,
            "S" => CardDir::South,
            "E" => CardDir::East,
            "W" => CardDir::West,
            _ => CardDir::Unknown,
        }
    }

    /// The letter as it appears on the wire, empty when unknown.
    pub fn letter(self) -> &'static str {
        match self {
            CardDir::North => "N",
            CardDir::South => "S",
            CardDir::East => "E",
            CardDir::West => "W",
            CardDir::Unknown => "",
        }
    }

    /// `1` for north/east, `-1` for south/west and `0` when unknown.
    #[inline]
    pub fn get_sign(self) -> isize {
        match self {
            CardDir::North | CardDir::East => 1,
            CardDir::South | CardDir::West => -1,
            CardDir::Unknown => 0,
        }
    }
}

impl Default for CardDir {
    fn default() -> Self {
        CardDir::Unknown
    }
}

impl fmt::Display for CardDir {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// Data validity letter of RMC and GLL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixStatus {
    Active,
    Void,
    Unknown,
}

impl FixStatus {
    pub fn from_field(field: &str) -> Self {
        match field {
            "A" => FixStatus::Active,
            "V" => FixStatus::Void,
            _ => FixStatus::Unknown,
        }
    }
}

impl Default for FixStatus {
    fn default() -> Self {
        FixStatus::Unknown
    }
}

/// How the receiver selects between 2D and 3D fixes (GSA field 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixMode {
    Manual,
    Automatic,
    /// Never produced by the parser, only held by a fresh snapshot.
    Unknown,
}

impl FixMode {
    pub(crate) fn try_from_field(field: &str) -> Option<Self> {
        match field {
            "M" => Some(FixMode::Manual),
            "A" => Some(FixMode::Automatic),
            _ => None,
        }
    }
}

impl Default for FixMode {
    fn default() -> Self {
        FixMode::Unknown
    }
}

/// Fix dimensionality (GSA field 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixDimension {
    Unavailable,
    Fix2D,
    Fix3D,
}

impl FixDimension {
    pub(crate) fn try_from_field(field: &str) -> Option<Self> {
        match field {
            "1" => Some(FixDimension::Unavailable),
            "2" => Some(FixDimension::Fix2D),
            "3" => Some(FixDimension::Fix3D),
            _ => None,
        }
    }
}

impl Default for FixDimension {
    fn default() -> Self {
        FixDimension::Unavailable
    }
}

/// Indicator of the quality of gps data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsQualityInd {
    FixNotAvailable,
    GpsFix,
    DifferentialGpsFix,
    PpsFix,
    RealTimeKinematic,
    FloatRtk,
    Estimated,
    ManualInputMode,
    SimulationMode,
}

impl GpsQualityInd {
    /// Takes an integer in the range `0..=8` and returns the corresponding
    /// `GpsQualityInd`.
    #[inline]
    pub(crate) fn try_from_field(field: &str) -> Option<Self> {
        match field.parse::<u8>().ok()? {
            0 => Some(GpsQualityInd::FixNotAvailable),
            1 => Some(GpsQualityInd::GpsFix),
            2 => Some(GpsQualityInd::DifferentialGpsFix),
            3 => Some(GpsQualityInd::PpsFix),
            4 => Some(GpsQualityInd::RealTimeKinematic),
            5 => Some(GpsQualityInd::FloatRtk),
            6 => Some(GpsQualityInd::Estimated),
            7 => Some(GpsQualityInd::ManualInputMode),
            8 => Some(GpsQualityInd::SimulationMode),
            _ => None,
        }
    }
}

impl Default for GpsQualityInd {
    fn default() -> Self {
        GpsQualityInd::FixNotAvailable
    }
}

/// When a sentence was taken.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Timestamp {
    /// Time of day on an unspecified date, UTC.
    TimeOfDay(NaiveTime),
    /// Date and time were both present and valid.
    Absolute(DateTime<Utc>),
    /// The time fields could not be read and the wall clock at decode time
    /// was substituted. This is lossy: the value says nothing about when
    /// the receiver produced the sentence.
    WallClock(DateTime<Utc>),
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Timestamp::TimeOfDay(t) => write!(f, "{} UTC", t),
            Timestamp::Absolute(t) => write!(f, "{}", t),
            Timestamp::WallClock(t) => write!(f, "{} (local clock)", t),
        }
    }
}

/// Recommended minimum position, velocity and time.
#[derive(Debug, Clone, PartialEq)]
pub struct RmcRecord {
    pub timestamp: Timestamp,
    pub status: FixStatus,
    /// Latitude magnitude in decimal degrees, `-1.0` when absent.
    pub lat: f64,
    pub ns: CardDir,
    /// Longitude magnitude in decimal degrees, `-1.0` when absent.
    pub long: f64,
    pub ew: CardDir,
    pub speed_knots: f64,
    pub speed_ms: f64,
    pub speed_kph: f64,
    /// Course over ground in degrees.
    pub course: f64,
    pub magnetic_variation: f64,
    pub variation_dir: CardDir,
}

/// DOP and active satellites.
#[derive(Debug, Clone, PartialEq)]
pub struct GsaRecord {
    pub mode: FixMode,
    pub fix_type: FixDimension,
    /// Ids of the satellites used for the fix, empty slots skipped.
    pub svids: ArrayVec<[i32; GSA_SLOTS]>,
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
}

/// One satellite of a GSV batch. Missing values are `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SatelliteObservation {
    pub id: i32,
    /// Elevation in degrees.
    pub elevation: i32,
    /// Azimuth in degrees.
    pub azimuth: i32,
    pub snr: i32,
}

/// Satellites in view.
#[derive(Debug, Clone, PartialEq)]
pub struct GsvRecord {
    pub message_count: i32,
    pub message_number: i32,
    pub satellites_in_view: i32,
    pub satellites: ArrayVec<[SatelliteObservation; GSV_BATCH]>,
}

/// Geographic position.
#[derive(Debug, Clone, PartialEq)]
pub struct GllRecord {
    pub lat: f64,
    pub ns: CardDir,
    pub long: f64,
    pub ew: CardDir,
    pub timestamp: Option<Timestamp>,
    pub status: FixStatus,
}

/// Fix data.
#[derive(Debug, Clone, PartialEq)]
pub struct GgaRecord {
    pub timestamp: Timestamp,
    pub lat: f64,
    pub ns: CardDir,
    pub long: f64,
    pub ew: CardDir,
    pub quality: GpsQualityInd,
    /// Number of satellites used for the fix.
    pub sat_count: i32,
    pub hdop: f64,
    /// Antenna altitude above/below mean-sea-level (geoid).
    pub altitude: f64,
    pub altitude_unit: String,
    /// Geoidal separation, the difference between the WGS-84 earth ellipsoid
    /// and mean-sea-level (geoid).
    pub geoid_sep: f64,
    pub geoid_sep_unit: String,
    /// Age of differential GPS data in seconds.
    pub dgps_age: f64,
    /// Differential reference station id, empty when DGPS is not used.
    pub station_id: String,
}

/// Track made good and ground speed.
#[derive(Debug, Clone, PartialEq)]
pub struct VtgRecord {
    pub track: f64,
    /// Reference letter following the track field.
    pub track_ref: String,
    pub magnetic_track: f64,
    pub speed_knots: f64,
    pub speed_kph: f64,
}

/// Free text emitted by the receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct TxtRecord {
    pub total: i32,
    pub number: i32,
    pub severity: i32,
    pub text: String,
}

/// A decoded sentence.
#[derive(Debug, Clone, PartialEq)]
pub enum SentenceRecord {
    Rmc(RmcRecord),
    Gsa(GsaRecord),
    Gsv(GsvRecord),
    Gll(GllRecord),
    Gga(GgaRecord),
    Vtg(VtgRecord),
    Txt(TxtRecord),
}

impl SentenceRecord {
    pub fn kind(&self) -> SentenceKind {
        match *self {
            SentenceRecord::Rmc(_) => SentenceKind::Rmc,
            SentenceRecord::Gsa(_) => SentenceKind::Gsa,
            SentenceRecord::Gsv(_) => SentenceKind::Gsv,
            SentenceRecord::Gll(_) => SentenceKind::Gll,
            SentenceRecord::Gga(_) => SentenceKind::Gga,
            SentenceRecord::Vtg(_) => SentenceKind::Vtg,
            SentenceRecord::Txt(_) => SentenceKind::Txt,
        }
    }
}
