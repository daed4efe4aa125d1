use serde::{Deserialize, Serialize};

use super::ids::SeriesId;

/// A scoring series: a set of races whose best `counted_races` results count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub id: SeriesId,
    #[serde(default)]
    pub name: String,
    /// Number of best results that count toward the series total
    /// (the store column is still called `ntocount`).
    #[serde(alias = "ntocount")]
    pub counted_races: u32,
    /// Display ordering weight.
    #[serde(default)]
    pub weight: i32,
}
