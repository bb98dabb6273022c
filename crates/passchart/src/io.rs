//! Metadata input and JSON report output.

use std::{
    fs,
    path::{Path, PathBuf},
};

use passchart_core::{OutcomeKind, PassCount, PassEvent};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{MetadataError, PassChartIoError};

/// Per-chart metadata document, as published next to each chart image.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    pub completions: u32,
    pub touchdowns: u32,
    pub interceptions: u32,
    pub attempts: u32,
    pub first_name: String,
    pub last_name: String,
    pub team: String,
    #[serde(deserialize_with = "string_or_number")]
    pub game_id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub week: Option<String>,
}

impl GameMetadata {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PassChartIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Per-outcome counts. `completions` in the metadata include touchdowns.
    pub fn pass_count(&self) -> Result<PassCount, MetadataError> {
        let completions = self.completions as i64 - self.touchdowns as i64;
        if completions < 0 {
            return Err(MetadataError::InconsistentCounts {
                what: "completions excluding touchdowns",
                value: completions,
            });
        }
        let incompletions =
            self.attempts as i64 - completions - self.interceptions as i64 - self.touchdowns as i64;
        if incompletions < 0 {
            return Err(MetadataError::InconsistentCounts {
                what: "incompletions",
                value: incompletions,
            });
        }
        Ok(PassCount {
            completions: completions as u32,
            touchdowns: self.touchdowns,
            interceptions: self.interceptions,
            incompletions: incompletions as u32,
        })
    }

    /// Join key for this chart; `week` overrides the document's own week.
    pub fn identity(&self, week: Option<String>) -> ChartIdentity {
        ChartIdentity {
            game_id: self.game_id.clone(),
            team: self.team.clone(),
            week: week.or_else(|| self.week.clone()),
            name: format!("{} {}", self.first_name, self.last_name),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<StringOrNumber> for String {
    fn from(v: StringOrNumber) -> Self {
        match v {
            StringOrNumber::Str(s) => s,
            StringOrNumber::Int(i) => i.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(d).map(String::from)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(d)?.map(String::from))
}

/// Stable join key attached to every output record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartIdentity {
    pub game_id: String,
    pub team: String,
    pub week: Option<String>,
    pub name: String,
}

/// One output row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PassRecord {
    pub game_id: String,
    pub team: String,
    pub week: Option<String>,
    pub name: String,
    pub outcome: OutcomeKind,
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl PassRecord {
    pub fn new(identity: &ChartIdentity, event: &PassEvent) -> Self {
        Self {
            game_id: identity.game_id.clone(),
            team: identity.team.clone(),
            week: identity.week.clone(),
            name: identity.name.clone(),
            outcome: event.outcome,
            x: event.coords.map(|c| c.x),
            y: event.coords.map(|c| c.y),
        }
    }
}

/// Attach `identity` to every event.
pub fn records_for(identity: &ChartIdentity, events: &[PassEvent]) -> Vec<PassRecord> {
    events.iter().map(|e| PassRecord::new(identity, e)).collect()
}

/// One chart to process.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartJob {
    pub image: PathBuf,
    pub meta: PathBuf,
    #[serde(default)]
    pub week: Option<String>,
}

/// List of charts for `passchart batch`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchManifest {
    pub jobs: Vec<ChartJob>,
}

impl BatchManifest {
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, PassChartIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// A job that produced no records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JobFailure {
    pub meta: PathBuf,
    pub error: String,
}

/// Output document of both CLI commands.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub records: Vec<PassRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<JobFailure>,
}

impl ExtractionReport {
    pub fn to_json(&self) -> Result<String, PassChartIoError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), PassChartIoError> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Records of one outcome, in report order.
    pub fn of_kind(&self, kind: OutcomeKind) -> impl Iterator<Item = &PassRecord> + '_ {
        self.records.iter().filter(move |r| r.outcome == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use passchart_core::FieldCoords;

    const META: &str = r#"{
        "completions": 20, "touchdowns": 2, "interceptions": 1, "attempts": 31,
        "firstName": "Tom", "lastName": "Brady", "team": "NE",
        "gameId": 2017091000, "position": "QB"
    }"#;

    #[test]
    fn derives_counts_from_metadata() {
        let meta: GameMetadata = serde_json::from_str(META).unwrap();
        let counts = meta.pass_count().unwrap();
        assert_eq!(
            counts,
            PassCount {
                completions: 18,
                touchdowns: 2,
                interceptions: 1,
                incompletions: 10,
            }
        );
        assert_eq!(counts.attempts(), 31);
    }

    #[test]
    fn inconsistent_counts_are_reported() {
        let mut meta: GameMetadata = serde_json::from_str(META).unwrap();
        meta.attempts = 20;
        assert_eq!(
            meta.pass_count(),
            Err(MetadataError::InconsistentCounts {
                what: "incompletions",
                value: -1,
            })
        );

        meta.touchdowns = 25;
        assert!(matches!(
            meta.pass_count(),
            Err(MetadataError::InconsistentCounts { value: -5, .. })
        ));
    }

    #[test]
    fn identity_uses_numeric_game_id_and_week_override() {
        let meta: GameMetadata = serde_json::from_str(META).unwrap();
        assert_eq!(meta.game_id, "2017091000");
        assert_eq!(meta.week, None);

        let id = meta.identity(Some("1".into()));
        assert_eq!(id.name, "Tom Brady");
        assert_eq!(id.week.as_deref(), Some("1"));
    }

    #[test]
    fn record_serializes_nulls_and_outcome() {
        let id = ChartIdentity {
            game_id: "g".into(),
            team: "T".into(),
            week: Some("post".into()),
            name: "A B".into(),
        };
        let events = [
            PassEvent::located(OutcomeKind::Complete, FieldCoords { x: 1.5, y: -2.0 }),
            PassEvent::unlocated(OutcomeKind::Incomplete),
        ];
        let records = records_for(&id, &events);
        let json = serde_json::to_value(&records).unwrap();
        assert_eq!(json[0]["outcome"], "COMPLETE");
        assert_eq!(json[0]["x"], 1.5);
        assert_eq!(json[1]["outcome"], "INCOMPLETE");
        assert!(json[1]["x"].is_null());
        assert!(json[1]["y"].is_null());
        assert_eq!(json[1]["week"], "post");
    }

    #[test]
    fn manifest_week_is_optional() {
        let json = r#"{ "jobs": [ { "image": "a.jpeg", "meta": "a.json" } ] }"#;
        let m: BatchManifest = serde_json::from_str(json).unwrap();
        assert_eq!(m.jobs[0].week, None);
        assert_eq!(m.jobs[0].image, PathBuf::from("a.jpeg"));
    }
}
