use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::{CreateError, DeleteError, ExerciseKey, ReadError, StorageError, ValidationError};

pub trait HistoryService {
    fn get_history(&self, key: &ExerciseKey) -> Result<Vec<HistoryRecord>, ReadError>;
    fn append_record(
        &self,
        key: &ExerciseKey,
        weight: f64,
        reps: u32,
    ) -> Result<HistoryRecord, CreateError>;
    fn clear_history(&self, key: &ExerciseKey) -> Result<(), DeleteError>;
    fn delete_history(&self, key: &ExerciseKey) -> Result<(), DeleteError>;

    fn validate_weight(&self, weight: &str) -> Result<f64, ValidationError> {
        match weight.replace(',', ".").trim().parse::<f64>() {
            Ok(parsed_weight) if parsed_weight.is_finite() => Ok(parsed_weight),
            _ => Err(ValidationError::Weight),
        }
    }

    fn validate_reps(&self, reps: &str) -> Result<u32, ValidationError> {
        reps.trim().parse::<u32>().map_err(|_| ValidationError::Reps)
    }
}

/// Whole-document persistence of the history of all exercises.
pub trait HistoryRepository {
    /// Returns an empty history if it has never been written.
    fn read_history(&self) -> Result<History, ReadError>;
    fn write_history(&self, history: &History) -> Result<(), StorageError>;
}

/// A recorded set.
///
/// Stored records may lack values or carry repetitions outside the range
/// accepted for new records.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryRecord {
    pub date: DateTime<Utc>,
    pub weight: Option<f64>,
    pub reps: Option<i64>,
}

impl HistoryRecord {
    pub fn new(date: DateTime<Utc>, weight: f64, reps: u32) -> Result<Self, ValidationError> {
        if !weight.is_finite() {
            return Err(ValidationError::Weight);
        }
        Ok(Self {
            date,
            weight: Some(weight),
            reps: Some(i64::from(reps)),
        })
    }
}

impl fmt::Display for HistoryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.weight {
            Some(weight) => write!(f, "{weight} kg")?,
            None => write!(f, "- kg")?,
        }
        match self.reps {
            Some(reps) => write!(f, " x {reps}"),
            None => write!(f, " x -"),
        }
    }
}

/// Records of all exercises, each sequence in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct History(IndexMap<ExerciseKey, Vec<HistoryRecord>>);

impl History {
    #[must_use]
    pub fn records(&self, key: &ExerciseKey) -> &[HistoryRecord] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExerciseKey, &Vec<HistoryRecord>)> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn append(&mut self, key: ExerciseKey, record: HistoryRecord) {
        self.0.entry(key).or_default().push(record);
    }

    /// Returns the removed records.
    pub fn remove(&mut self, key: &ExerciseKey) -> Option<Vec<HistoryRecord>> {
        self.0.shift_remove(key)
    }
}

impl FromIterator<(ExerciseKey, Vec<HistoryRecord>)> for History {
    fn from_iter<T: IntoIterator<Item = (ExerciseKey, Vec<HistoryRecord>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
