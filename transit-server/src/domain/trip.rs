//! Trip requests and the mode preferences parsed from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Mode;

/// A trip the user wants recommendations for.
///
/// All fields are free text as entered by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRequest {
    pub origin: String,
    pub destination: String,

    /// Departure time as "HH:MM", or empty.
    #[serde(default)]
    pub preferred_time: String,

    /// Comma-separated mode keywords, e.g. "bus, metro".
    #[serde(default)]
    pub mode_preferences: String,
}

impl TripRequest {
    /// Create a trip with no preferred time or mode preferences.
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            ..Self::default()
        }
    }

    /// Set the preferred departure time.
    pub fn with_preferred_time(mut self, time: impl Into<String>) -> Self {
        self.preferred_time = time.into();
        self
    }

    /// Set the comma-separated mode preferences.
    pub fn with_mode_preferences(mut self, prefs: impl Into<String>) -> Self {
        self.mode_preferences = prefs.into();
        self
    }

    /// Parse the mode preferences of this trip.
    pub fn preferences(&self) -> ModePreferences {
        ModePreferences::parse(&self.mode_preferences)
    }
}

/// Lower-cased mode keywords a user asked for.
///
/// Keywords are not validated: "walking" is kept, and simply never matches a
/// [`Mode`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModePreferences(BTreeSet<String>);

impl ModePreferences {
    /// Split on commas, trim, lower-case and drop empty tokens.
    ///
    /// ```
    /// use transit_server::domain::{Mode, ModePreferences};
    ///
    /// let prefs = ModePreferences::parse(" Bus, ,METRO ");
    /// assert!(prefs.prefers(Mode::Bus));
    /// assert!(prefs.prefers(Mode::Metro));
    /// assert!(!prefs.prefers(Mode::Taxi));
    /// ```
    pub fn parse(raw: &str) -> Self {
        Self(
            raw.split(',')
                .map(|part| part.trim().to_lowercase())
                .filter(|key| !key.is_empty())
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the exact lower-case keyword was given.
    pub fn contains(&self, keyword: &str) -> bool {
        self.0.contains(keyword)
    }

    /// Whether the user asked for `mode`.
    pub fn prefers(&self, mode: Mode) -> bool {
        self.contains(mode.keyword())
    }

    /// Modes to probe for a trip.
    ///
    /// With no preferences every mode is a candidate. Otherwise only the
    /// preferred modes are, which may leave none at all when every keyword
    /// is unknown.
    pub fn candidate_modes(&self) -> Vec<Mode> {
        if self.is_empty() {
            return Mode::ALL.to_vec();
        }
        Mode::ALL
            .into_iter()
            .filter(|m| self.prefers(*m))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_preferences() {
        assert!(ModePreferences::parse("").is_empty());
        assert!(ModePreferences::parse(" , ,, ").is_empty());
    }

    #[test]
    fn keywords_are_trimmed_and_lowercased() {
        let prefs = ModePreferences::parse("Bus ,  RideShare");
        assert_eq!(prefs.len(), 2);
        assert!(prefs.contains("bus"));
        assert!(prefs.contains("rideshare"));
        assert!(!prefs.contains("Bus"));
    }

    #[test]
    fn unknown_keywords_are_kept() {
        let prefs = ModePreferences::parse("walking,bus");
        assert!(prefs.contains("walking"));
        assert_eq!(prefs.candidate_modes(), vec![Mode::Bus]);
    }

    #[test]
    fn no_preferences_means_every_mode() {
        let prefs = ModePreferences::parse("");
        assert_eq!(prefs.candidate_modes(), Mode::ALL.to_vec());
    }

    #[test]
    fn candidates_keep_canonical_order() {
        let prefs = ModePreferences::parse("taxi,bus,metro");
        assert_eq!(
            prefs.candidate_modes(),
            vec![Mode::Bus, Mode::Metro, Mode::Taxi]
        );
    }

    #[test]
    fn only_unknown_keywords_yield_no_candidates() {
        let prefs = ModePreferences::parse("walking, cycling");
        assert!(!prefs.is_empty());
        assert!(prefs.candidate_modes().is_empty());
    }

    #[test]
    fn trip_builder() {
        let trip = TripRequest::new("Islamabad", "Lahore")
            .with_preferred_time("09:00")
            .with_mode_preferences("bus,metro");

        assert_eq!(trip.origin, "Islamabad");
        assert_eq!(trip.preferred_time, "09:00");
        assert!(trip.preferences().prefers(Mode::Metro));
    }

    #[test]
    fn trip_deserializes_with_missing_optional_fields() {
        let trip: TripRequest =
            serde_json::from_str(r#"{"origin":"Karachi","destination":"Hyderabad"}"#).unwrap();
        assert_eq!(trip, TripRequest::new("Karachi", "Hyderabad"));
    }
}
