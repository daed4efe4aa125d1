//! SeriesPosition — one sailor's aggregated standing in a series.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::RaceId;

/// Display suffix for an entry that merged results sailed in different boats.
pub const MIXED_BOAT_MARKER: &str = "++";

/// Primary-key offset that puts every non-qualified entry behind every
/// qualified one.
pub const UNQUALIFIED_BASE: u32 = 5000;

/// One race's contribution to a series standing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceScore {
    pub race_id: RaceId,
    pub race_date: NaiveDate,
    pub position: u32,
    pub discarded: bool,
}

/// Aggregated standing for one (name, fleet) pair.
///
/// Built fresh by every scoring run and never persisted. `races` is kept in
/// race-date order once scoring is done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPosition {
    /// 1-based place in the final standings (0 until ranked).
    pub rank: u32,
    pub name: String,
    pub fleet: String,
    pub boat_type: String,
    pub boat_number: Option<String>,
    /// Set when the merged rows disagree on boat number or boat type.
    pub has_conflict: bool,
    pub races: Vec<RaceScore>,
    pub total_score: u32,
    pub counted_score: u32,
    pub tie_break: String,
    pub average_position: f64,
    pub qualified: bool,
}

impl SeriesPosition {
    pub fn races_sailed(&self) -> usize {
        self.races.len()
    }

    pub fn discard_count(&self) -> usize {
        self.races.iter().filter(|r| r.discarded).count()
    }

    /// Primary ranking key: the counted score when qualified, otherwise
    /// `5000 + ⌊average × 100⌋`.
    ///
    /// Qualified entries only sort ahead of unqualified ones while their
    /// counted score stays below 5000.
    pub fn primary_score(&self) -> u32 {
        if self.qualified {
            self.counted_score
        } else {
            UNQUALIFIED_BASE + (self.average_position * 100.0) as u32
        }
    }

    /// Boat description for display, with the mixed-boat marker appended once.
    pub fn boat_label(&self) -> String {
        let mut label = match &self.boat_number {
            Some(number) if !number.is_empty() => format!("{} {}", self.boat_type, number),
            _ => self.boat_type.clone(),
        };
        if self.has_conflict {
            label.push_str(MIXED_BOAT_MARKER);
        }
        label
    }

    pub fn position_in(&self, race_id: RaceId) -> Option<&RaceScore> {
        self.races.iter().find(|r| r.race_id == race_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(qualified: bool, counted: u32, average: f64) -> SeriesPosition {
        SeriesPosition {
            rank: 0,
            name: "Ann".into(),
            fleet: "Fast".into(),
            boat_type: "Laser".into(),
            boat_number: Some("123".into()),
            has_conflict: false,
            races: Vec::new(),
            total_score: counted,
            counted_score: counted,
            tie_break: "99".into(),
            average_position: average,
            qualified,
        }
    }

    #[test]
    fn qualified_primary_is_counted_score() {
        assert_eq!(standing(true, 7, 3.5).primary_score(), 7);
    }

    #[test]
    fn unqualified_primary_is_offset_average() {
        assert_eq!(standing(false, 4, 4.0).primary_score(), 5400);
        assert_eq!(standing(false, 5, 2.5).primary_score(), 5250);
    }

    #[test]
    fn qualified_ahead_of_unqualified_only_below_base() {
        let unqualified = standing(false, 30, 1.0).primary_score();
        assert!(standing(true, UNQUALIFIED_BASE - 1, 15.0).primary_score() < unqualified);
        assert!(standing(true, UNQUALIFIED_BASE + 200, 15.0).primary_score() > unqualified);
    }

    #[test]
    fn boat_label_marks_mixed_boats_once() {
        let mut s = standing(true, 1, 1.0);
        assert_eq!(s.boat_label(), "Laser 123");
        s.has_conflict = true;
        assert_eq!(s.boat_label(), "Laser 123++");
        assert_eq!(s.boat_label(), "Laser 123++");
        s.boat_number = None;
        assert_eq!(s.boat_label(), "Laser++");
    }
}
