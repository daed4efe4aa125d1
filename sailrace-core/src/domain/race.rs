use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::{RaceId, SeriesId};

/// One race of a series.
///
/// `whole_legs`/`part_legs` describe the configured course: a lap is
/// `whole_legs` legs and a shortened finish adds `part_legs` more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Race {
    pub id: RaceId,
    pub series_id: SeriesId,
    pub date: NaiveDate,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub whole_legs: Option<u32>,
    #[serde(default)]
    pub part_legs: Option<u32>,
    /// Officer of the day.
    #[serde(default)]
    pub ood: Option<String>,
    /// Assistant officer of the day.
    #[serde(default)]
    pub aood: Option<String>,
    #[serde(default)]
    pub wind_direction: Option<String>,
    #[serde(default)]
    pub wind_strength: Option<String>,
    #[serde(default)]
    pub comments: Option<String>,
    /// Unfinished races are corrected and ranked but left out of standings.
    #[serde(default = "finished_by_default")]
    pub finished: bool,
}

fn finished_by_default() -> bool {
    true
}

impl Race {
    /// Minimal race with only the fields scoring needs.
    pub fn new(id: RaceId, series_id: SeriesId, date: NaiveDate, whole_legs: u32) -> Self {
        Self {
            id,
            series_id,
            date,
            name: None,
            whole_legs: Some(whole_legs),
            part_legs: Some(0),
            ood: None,
            aood: None,
            wind_direction: None,
            wind_strength: None,
            comments: None,
            finished: true,
        }
    }
}
