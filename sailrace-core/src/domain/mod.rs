//! Domain types for series scoring

pub mod boat;
pub mod ids;
pub mod race;
pub mod result;
pub mod series;
pub mod standing;
pub mod time;

pub use boat::{BoatType, Individual};
pub use ids::{BoatTypeId, IndividualId, RaceId, ResultId, SeriesId};
pub use race::Race;
pub use result::RaceResult;
pub use series::Series;
pub use standing::{RaceScore, SeriesPosition, MIXED_BOAT_MARKER, UNQUALIFIED_BASE};
pub use time::{RaceTime, TimeParseError};
