//! The merged navigation state and the aggregator that keeps it current.

use std::fmt;

use crate::config::SatellitePolicy;
use crate::convert::{FLOAT_SENTINEL, INT_SENTINEL};
use crate::sentence::*;

/// Position, velocity and time as last reported by RMC.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub ns: CardDir,
    pub long: f64,
    pub ew: CardDir,
    /// Course over ground in degrees.
    pub course: f64,
    /// Speed over ground in m/s.
    pub speed: f64,
    pub timestamp: Option<Timestamp>,
    pub status: FixStatus,
}

impl Default for Location {
    fn default() -> Self {
        Location {
            lat: FLOAT_SENTINEL,
            ns: CardDir::Unknown,
            long: FLOAT_SENTINEL,
            ew: CardDir::Unknown,
            course: FLOAT_SENTINEL,
            speed: FLOAT_SENTINEL,
            timestamp: None,
            status: FixStatus::Unknown,
        }
    }
}

/// Union of everything the supported sentences report.
///
/// Fields no sentence has populated yet hold their sentinel: `-1`/`-1.0`
/// for numbers, the unknown variant for enumerations, empty for strings and
/// `None` for the RMC timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationSnapshot {
    /// Every TXT payload received, oldest first.
    pub device_info: Vec<String>,
    pub location: Location,
    /// Latitude magnitude from GLL/GGA; combine with `ns` for the sign.
    pub latitude: f64,
    pub longitude: f64,
    pub ns: CardDir,
    pub ew: CardDir,
    pub fix_mode: FixMode,
    pub fix_dimension: FixDimension,
    pub pdop: f64,
    pub hdop: f64,
    pub vdop: f64,
    pub sat_count: i32,
    /// At most one entry per satellite id.
    pub satellites: Vec<SatelliteObservation>,
    pub fix_quality: GpsQualityInd,
    pub altitude: f64,
    pub altitude_unit: String,
    pub geoid_sep: f64,
    pub geoid_sep_unit: String,
    pub dgps_age: f64,
    pub station_id: String,
    pub track: f64,
    pub true_north: bool,
    pub magnetic_track: f64,
    pub speed_knots: f64,
    pub speed_kph: f64,
}

impl Default for NavigationSnapshot {
    fn default() -> Self {
        NavigationSnapshot {
            device_info: Vec::new(),
            location: Location::default(),
            latitude: FLOAT_SENTINEL,
            longitude: FLOAT_SENTINEL,
            ns: CardDir::Unknown,
            ew: CardDir::Unknown,
            fix_mode: FixMode::Unknown,
            fix_dimension: FixDimension::Unavailable,
            pdop: FLOAT_SENTINEL,
            hdop: FLOAT_SENTINEL,
            vdop: FLOAT_SENTINEL,
            sat_count: INT_SENTINEL,
            satellites: Vec::new(),
            fix_quality: GpsQualityInd::FixNotAvailable,
            altitude: FLOAT_SENTINEL,
            altitude_unit: String::new(),
            geoid_sep: FLOAT_SENTINEL,
            geoid_sep_unit: String::new(),
            dgps_age: FLOAT_SENTINEL,
            station_id: String::new(),
            track: FLOAT_SENTINEL,
            true_north: false,
            magnetic_track: FLOAT_SENTINEL,
            speed_knots: FLOAT_SENTINEL,
            speed_kph: FLOAT_SENTINEL,
        }
    }
}

impl NavigationSnapshot {
    pub fn satellite(&self, id: i32) -> Option<&SatelliteObservation> {
        self.satellites.iter().find(|s| s.id == id)
    }
}

impl fmt::Display for NavigationSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "Position: {:.6} {}, {:.6} {}",
            self.latitude, self.ns, self.longitude, self.ew
        )?;
        match self.location.timestamp {
            Some(ref t) => writeln!(f, "Time: {}", t)?,
            None => writeln!(f, "Time: -")?,
        }
        writeln!(f, "Speed: {:.2} km/h ({:.2} kn)", self.speed_kph, self.speed_knots)?;
        writeln!(f, "Altitude: {}{}", self.altitude, self.altitude_unit.to_lowercase())?;

        let dim = match self.fix_dimension {
            FixDimension::Unavailable => "No fix",
            FixDimension::Fix2D => "2D fix",
            FixDimension::Fix3D => "3D fix",
        };
        let mode = match self.fix_mode {
            FixMode::Manual => "Manual",
            FixMode::Automatic => "Auto",
            FixMode::Unknown => "?",
        };
        writeln!(f, "Status: {} ({}), {:?}", dim, mode, self.fix_quality)?;
        writeln!(
            f,
            "HDOP: {} VDOP: {} PDOP: {} Geo-sep: {}{}",
            self.hdop,
            self.vdop,
            self.pdop,
            self.geoid_sep,
            self.geoid_sep_unit.to_lowercase()
        )?;

        writeln!(f, "Satellites ({}):", self.satellites.len())?;
        for sat in &self.satellites {
            writeln!(
                f,
                "  {:>3} elev {:>3} azim {:>3} snr {:>3}",
                sat.id, sat.elevation, sat.azimuth, sat.snr
            )?;
        }
        for line in &self.device_info {
            writeln!(f, "Device: {}", line)?;
        }
        Ok(())
    }
}

/// Owns the snapshot of a session and merges records into it.
#[derive(Debug, Default)]
pub struct Aggregator {
    snapshot: NavigationSnapshot,
    policy: SatellitePolicy,
}

impl Aggregator {
    pub fn new(policy: SatellitePolicy) -> Self {
        Aggregator {
            snapshot: NavigationSnapshot::default(),
            policy,
        }
    }

    #[inline]
    pub fn snapshot(&self) -> &NavigationSnapshot {
        &self.snapshot
    }

    /// Overwrites the fields `record` reports and returns the result.
    pub fn apply(&mut self, record: &SentenceRecord) -> &NavigationSnapshot {
        let snap = &mut self.snapshot;
        match *record {
            SentenceRecord::Rmc(ref rmc) => {
                snap.location = Location {
                    lat: rmc.lat,
                    ns: rmc.ns,
                    long: rmc.long,
                    ew: rmc.ew,
                    course: rmc.course,
                    speed: rmc.speed_ms,
                    timestamp: Some(rmc.timestamp),
                    status: rmc.status,
                };
            }
            SentenceRecord::Gsa(ref gsa) => {
                snap.pdop = gsa.pdop;
                snap.hdop = gsa.hdop;
                snap.vdop = gsa.vdop;
                snap.fix_dimension = gsa.fix_type;
                snap.fix_mode = gsa.mode;
            }
            SentenceRecord::Gsv(ref gsv) => self.merge_satellites(&gsv.satellites),
            SentenceRecord::Gll(ref gll) => {
                snap.latitude = gll.lat;
                snap.ns = gll.ns;
                snap.longitude = gll.long;
                snap.ew = gll.ew;
            }
            SentenceRecord::Gga(ref gga) => {
                snap.fix_quality = gga.quality;
                snap.sat_count = gga.sat_count;
                snap.altitude = gga.altitude;
                snap.altitude_unit.clone_from(&gga.altitude_unit);
                snap.geoid_sep = gga.geoid_sep;
                snap.geoid_sep_unit.clone_from(&gga.geoid_sep_unit);
                snap.dgps_age = gga.dgps_age;
                snap.station_id.clone_from(&gga.station_id);
                snap.hdop = gga.hdop;
                snap.latitude = gga.lat;
                snap.ns = gga.ns;
                snap.longitude = gga.long;
                snap.ew = gga.ew;
            }
            SentenceRecord::Vtg(ref vtg) => {
                snap.track = vtg.track;
                snap.true_north = vtg.track_ref == "N";
                snap.magnetic_track = vtg.magnetic_track;
                snap.speed_knots = vtg.speed_knots;
                snap.speed_kph = vtg.speed_kph;
            }
            SentenceRecord::Txt(ref txt) => snap.device_info.push(txt.text.clone()),
        }
        &self.snapshot
    }

    /// Adds a GSV batch to the satellite set according to the policy.
    fn merge_satellites(&mut self, batch: &[SatelliteObservation]) {
        let sats = &mut self.snapshot.satellites;
        for sat in batch {
            match sats.iter().position(|s| s.id == sat.id) {
                None => sats.push(*sat),
                Some(idx) => match self.policy {
                    SatellitePolicy::FirstWins => {
                        trace!("satellite {} already known, dropping observation", sat.id);
                    }
                    SatellitePolicy::Upsert => sats[idx] = *sat,
                },
            }
        }
    }
}
