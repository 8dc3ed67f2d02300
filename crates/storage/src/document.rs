use chrono::{DateTime, Utc};
use gym_notes_domain as domain;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use strum::AsRefStr;

/// Persisted documents and their storage keys.
#[derive(AsRefStr, Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Document {
    #[strum(serialize = "gym_sheets_v1")]
    Sheets,
    #[strum(serialize = "gym_exercise_history_v1")]
    History,
    #[strum(serialize = "settings")]
    Settings,
    #[strum(serialize = "log")]
    Log,
}

pub fn parse<T: DeserializeOwned>(
    document: Document,
    json: &str,
) -> Result<T, domain::StorageError> {
    serde_json::from_str(json).map_err(|err| corrupt(document, &err))
}

pub fn corrupt(document: Document, err: &dyn std::error::Error) -> domain::StorageError {
    domain::StorageError::Corrupt {
        document: document.as_ref().to_string(),
        message: err.to_string(),
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct Sheets(IndexMap<String, Vec<String>>);

impl From<&domain::Sheets> for Sheets {
    fn from(value: &domain::Sheets) -> Self {
        Self(
            value
                .iter()
                .map(|(sheet, exercises)| (sheet.clone(), exercises.clone()))
                .collect(),
        )
    }
}

impl From<Sheets> for domain::Sheets {
    fn from(value: Sheets) -> Self {
        value.0.into_iter().collect()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    #[serde(alias = "timestamp")]
    pub date: DateTime<Utc>,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
}

impl From<&domain::HistoryRecord> for HistoryRecord {
    fn from(value: &domain::HistoryRecord) -> Self {
        Self {
            date: value.date,
            weight: value.weight,
            reps: value.reps,
        }
    }
}

impl From<HistoryRecord> for domain::HistoryRecord {
    fn from(value: HistoryRecord) -> Self {
        Self {
            date: value.date,
            weight: value.weight,
            reps: value.reps,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Default, PartialEq)]
#[serde(transparent)]
pub struct History(IndexMap<String, Vec<HistoryRecord>>);

impl From<&domain::History> for History {
    fn from(value: &domain::History) -> Self {
        Self(
            value
                .iter()
                .map(|(key, records)| {
                    (
                        key.to_string(),
                        records.iter().map(HistoryRecord::from).collect(),
                    )
                })
                .collect(),
        )
    }
}

impl From<History> for domain::History {
    fn from(value: History) -> Self {
        value
            .0
            .into_iter()
            .map(|(key, records)| {
                (
                    domain::ExerciseKey::from(key),
                    records.into_iter().map(domain::HistoryRecord::from).collect(),
                )
            })
            .collect()
    }
}
