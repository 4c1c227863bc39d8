use crate::lexer::DEFAULT_MAX_PENDING;
use crate::parser::TalkerFilter;

/// What happens when a GSV batch reports a satellite id the snapshot already
/// holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SatellitePolicy {
    /// Keep the first observation, drop later ones.
    FirstWins,
    /// Replace the stored observation in place.
    Upsert,
}

impl Default for SatellitePolicy {
    fn default() -> Self {
        SatellitePolicy::FirstWins
    }
}

/// Settings of a parsing [`Session`](../session/struct.Session.html).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Handling of repeated satellite ids.
    pub satellite_policy: SatellitePolicy,
    /// Talker ids routed to the parsers.
    pub talkers: TalkerFilter,
    /// Bytes of unterminated input kept before it is thrown away.
    pub max_pending: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            satellite_policy: SatellitePolicy::default(),
            talkers: TalkerFilter::default(),
            max_pending: DEFAULT_MAX_PENDING,
        }
    }
}

impl Config {
    pub fn with_satellite_policy(mut self, policy: SatellitePolicy) -> Self {
        self.satellite_policy = policy;
        self
    }

    pub fn with_talkers(mut self, talkers: TalkerFilter) -> Self {
        self.talkers = talkers;
        self
    }

    pub fn with_max_pending(mut self, max_pending: usize) -> Self {
        self.max_pending = max_pending;
        self
    }
}
