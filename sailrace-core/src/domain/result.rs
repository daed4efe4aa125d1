use serde::{Deserialize, Serialize};

use super::ids::{IndividualId, RaceId, ResultId};
use super::time::RaceTime;

/// One competitor's outcome in one race.
///
/// `adjusted_time`, `position` and `fleet` are engine output; everything else
/// is entered by the race officer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResult {
    pub id: ResultId,
    pub race_id: RaceId,
    pub individual_id: IndividualId,
    #[serde(default)]
    pub laps: Option<u32>,
    pub raw_time: RaceTime,
    #[serde(default)]
    pub adjusted_time: Option<RaceTime>,
    #[serde(default)]
    pub position: Option<u32>,
    #[serde(default)]
    pub fleet: Option<String>,
    #[serde(default)]
    pub crew: Option<String>,
}

impl RaceResult {
    pub fn new(
        id: ResultId,
        race_id: RaceId,
        individual_id: IndividualId,
        laps: u32,
        raw_time: RaceTime,
    ) -> Self {
        Self {
            id,
            race_id,
            individual_id,
            laps: Some(laps),
            raw_time,
            adjusted_time: None,
            position: None,
            fleet: None,
            crew: None,
        }
    }

    pub fn did_not_finish(&self) -> bool {
        self.raw_time.is_unscored()
    }
}
