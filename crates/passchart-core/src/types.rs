use serde::{Deserialize, Serialize};
use std::fmt;

/// Pass outcome classes drawn on a chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    Complete,
    Touchdown,
    Interception,
    Incomplete,
}

impl OutcomeKind {
    /// Extraction and output order.
    pub const ALL: [OutcomeKind; 4] = [
        OutcomeKind::Complete,
        OutcomeKind::Touchdown,
        OutcomeKind::Interception,
        OutcomeKind::Incomplete,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeKind::Complete => "COMPLETE",
            OutcomeKind::Touchdown => "TOUCHDOWN",
            OutcomeKind::Interception => "INTERCEPTION",
            OutcomeKind::Incomplete => "INCOMPLETE",
        }
    }
}

impl fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sub-pixel location in image space; `row` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub row: f64,
    pub col: f64,
}

impl PixelPoint {
    pub const fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn distance_sq(&self, other: &PixelPoint) -> f64 {
        let dr = self.row - other.row;
        let dc = self.col - other.col;
        dr * dr + dc * dc
    }

    #[inline]
    pub fn distance(&self, other: &PixelPoint) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

/// Integer pixel flagged by a segmenter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerPixel {
    pub row: u32,
    pub col: u32,
}

impl MarkerPixel {
    pub const fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    #[inline]
    pub fn to_point(self) -> PixelPoint {
        PixelPoint::new(self.row as f64, self.col as f64)
    }
}

/// Field-relative location in yards.
///
/// `x` is lateral, measured from the middle of the field; `y` is downfield
/// from the line of scrimmage (negative behind it).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldCoords {
    pub x: f64,
    pub y: f64,
}

/// One pass, located or not.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassEvent {
    pub outcome: OutcomeKind,
    pub coords: Option<FieldCoords>,
}

impl PassEvent {
    pub fn located(outcome: OutcomeKind, coords: FieldCoords) -> Self {
        Self {
            outcome,
            coords: Some(coords),
        }
    }

    pub fn unlocated(outcome: OutcomeKind) -> Self {
        Self {
            outcome,
            coords: None,
        }
    }
}

/// Per-outcome pass counts for one player in one game.
///
/// `completions` excludes touchdowns, so the four fields sum to attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassCount {
    pub completions: u32,
    pub touchdowns: u32,
    pub interceptions: u32,
    pub incompletions: u32,
}

impl PassCount {
    pub fn get(&self, kind: OutcomeKind) -> u32 {
        match kind {
            OutcomeKind::Complete => self.completions,
            OutcomeKind::Touchdown => self.touchdowns,
            OutcomeKind::Interception => self.interceptions,
            OutcomeKind::Incomplete => self.incompletions,
        }
    }

    pub fn attempts(&self) -> u32 {
        self.completions + self.touchdowns + self.interceptions + self.incompletions
    }

    /// Every event of every outcome without coordinates.
    pub fn unlocated_events(&self) -> Vec<PassEvent> {
        OutcomeKind::ALL
            .iter()
            .flat_map(|&kind| (0..self.get(kind)).map(move |_| PassEvent::unlocated(kind)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_upper_case() {
        let json = serde_json::to_string(&OutcomeKind::Interception).unwrap();
        assert_eq!(json, "\"INTERCEPTION\"");
        let back: OutcomeKind = serde_json::from_str("\"TOUCHDOWN\"").unwrap();
        assert_eq!(back, OutcomeKind::Touchdown);
        assert_eq!(OutcomeKind::Incomplete.to_string(), "INCOMPLETE");
    }

    #[test]
    fn attempts_sum_all_outcomes() {
        let counts = PassCount {
            completions: 2,
            touchdowns: 1,
            interceptions: 0,
            incompletions: 1,
        };
        assert_eq!(counts.attempts(), 4);
        assert_eq!(counts.get(OutcomeKind::Touchdown), 1);
    }

    #[test]
    fn unlocated_events_follow_outcome_order() {
        let counts = PassCount {
            completions: 1,
            touchdowns: 0,
            interceptions: 2,
            incompletions: 1,
        };
        let events = counts.unlocated_events();
        let kinds: Vec<_> = events.iter().map(|e| e.outcome).collect();
        assert_eq!(
            kinds,
            vec![
                OutcomeKind::Complete,
                OutcomeKind::Interception,
                OutcomeKind::Interception,
                OutcomeKind::Incomplete
            ]
        );
        assert!(events.iter().all(|e| e.coords.is_none()));
    }
}
