//! Core domain types for mode recommendation.
//!
//! These types carry no I/O. Parsing from free text is validated where the
//! value has a closed set of meanings ([`Mode`]) and left permissive where it
//! does not ([`ModePreferences`]).

mod mode;
mod recommendation;
mod trip;

pub use mode::{Mode, ParseModeError};
pub use recommendation::{Candidate, Recommendation, Recommendations};
pub use trip::{ModePreferences, TripRequest};
