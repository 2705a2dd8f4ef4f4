//! Transportation modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown mode name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transportation mode: {0:?}")]
pub struct ParseModeError(String);

/// A transportation option that can be recommended for a trip.
///
/// The variant order is the canonical order in which modes are probed and
/// reported.
///
/// # Examples
///
/// ```
/// use transit_server::domain::Mode;
///
/// let mode: Mode = "rideshare".parse().unwrap();
/// assert_eq!(mode, Mode::RideShare);
/// assert_eq!(mode.as_str(), "RideShare");
/// assert_eq!(mode.keyword(), "rideshare");
/// assert_eq!(mode.index(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Mode {
    Bus,
    Metro,
    RideShare,
    Taxi,
}

impl Mode {
    /// Every mode, in canonical order.
    pub const ALL: [Mode; 4] = [Mode::Bus, Mode::Metro, Mode::RideShare, Mode::Taxi];

    /// Canonical display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Bus => "Bus",
            Mode::Metro => "Metro",
            Mode::RideShare => "RideShare",
            Mode::Taxi => "Taxi",
        }
    }

    /// Lower-case keyword used in trip mode preferences.
    pub fn keyword(&self) -> &'static str {
        match self {
            Mode::Bus => "bus",
            Mode::Metro => "metro",
            Mode::RideShare => "rideshare",
            Mode::Taxi => "taxi",
        }
    }

    /// Index of the mode in the scoring model's feature encoding.
    pub fn index(&self) -> u8 {
        match self {
            Mode::Bus => 0,
            Mode::Metro => 1,
            Mode::RideShare => 2,
            Mode::Taxi => 3,
        }
    }

    /// OpenRouteService routing profile used to approximate this mode.
    ///
    /// Public transit is not routed separately; every mode follows the
    /// road network.
    pub fn routing_profile(&self) -> &'static str {
        match self {
            Mode::Bus | Mode::Metro | Mode::RideShare | Mode::Taxi => "driving-car",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Parse a mode name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Mode::ALL
            .into_iter()
            .find(|m| m.keyword() == key)
            .ok_or_else(|| ParseModeError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("Bus".parse::<Mode>().unwrap(), Mode::Bus);
        assert_eq!("METRO".parse::<Mode>().unwrap(), Mode::Metro);
        assert_eq!(" RideShare ".parse::<Mode>().unwrap(), Mode::RideShare);
        assert_eq!("taxi".parse::<Mode>().unwrap(), Mode::Taxi);
    }

    #[test]
    fn reject_unknown_modes() {
        assert!("".parse::<Mode>().is_err());
        assert!("walking".parse::<Mode>().is_err());
        assert!("ride share".parse::<Mode>().is_err());

        let err = "Ferry".parse::<Mode>().unwrap_err();
        assert_eq!(err.to_string(), "unknown transportation mode: \"Ferry\"");
    }

    #[test]
    fn indices_follow_canonical_order() {
        for (i, mode) in Mode::ALL.iter().enumerate() {
            assert_eq!(usize::from(mode.index()), i);
        }
    }

    #[test]
    fn display_uses_canonical_name() {
        assert_eq!(Mode::RideShare.to_string(), "RideShare");
        assert_eq!(
            serde_json::to_string(&Mode::RideShare).unwrap(),
            "\"RideShare\""
        );
    }
}
