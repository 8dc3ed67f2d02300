use crate::{ExerciseKey, HistoryRecord, derive_key};

/// An exercise of a sheet together with its most recent record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseSummary {
    pub name: String,
    pub key: ExerciseKey,
    pub last: Option<HistoryRecord>,
}

impl ExerciseSummary {
    #[must_use]
    pub fn new(sheet: &str, name: &str, history: &[HistoryRecord]) -> Self {
        Self {
            name: name.to_string(),
            key: derive_key(sheet, name),
            last: history.last().cloned(),
        }
    }

    #[must_use]
    pub fn summary(&self) -> String {
        self.last
            .as_ref()
            .map_or_else(|| "—".to_string(), ToString::to_string)
    }
}

/// Chart data of an exercise as parallel sequences of date labels and weights.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TimeSeries {
    pub labels: Vec<String>,
    pub values: Vec<Option<f64>>,
}

impl TimeSeries {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl From<&[HistoryRecord]> for TimeSeries {
    fn from(history: &[HistoryRecord]) -> Self {
        Self {
            labels: history
                .iter()
                .map(|r| r.date.date_naive().format("%Y-%m-%d").to_string())
                .collect(),
            values: history.iter().map(|r| r.weight).collect(),
        }
    }
}
