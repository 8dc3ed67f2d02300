use indexmap::IndexMap;

use crate::{CreateError, DeleteError, Name, ReadError, StorageError};

pub trait SheetService {
    fn list_sheets(&self) -> Result<Vec<String>, ReadError>;
    fn list_exercises(&self, sheet: &str) -> Result<Vec<String>, ReadError>;
    fn add_exercise(&self, sheet: &Name, exercise: &Name) -> Result<(), CreateError>;
    /// Remove every occurrence of the exercise from the sheet together with its history.
    fn remove_exercise(&self, sheet: &str, exercise: &str) -> Result<usize, DeleteError>;
}

/// Whole-document persistence of all sheets.
pub trait SheetRepository {
    /// Returns `None` if the sheets have never been written.
    fn read_sheets(&self) -> Result<Option<Sheets>, ReadError>;
    fn write_sheets(&self, sheets: &Sheets) -> Result<(), StorageError>;
}

/// Sheet names mapped to their exercise names, both in insertion order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Sheets(IndexMap<String, Vec<String>>);

impl Sheets {
    #[must_use]
    pub fn demo() -> Self {
        DEMO.iter()
            .map(|(sheet, exercises)| {
                (
                    (*sheet).to_string(),
                    exercises.iter().map(|e| (*e).to_string()).collect(),
                )
            })
            .collect()
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    #[must_use]
    pub fn exercises(&self, sheet: &str) -> &[String] {
        self.0.get(sheet).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
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

    pub fn add_exercise(&mut self, sheet: &str, exercise: &str) {
        self.0
            .entry(sheet.to_string())
            .or_default()
            .push(exercise.to_string());
    }

    /// Returns the number of removed entries.
    pub fn remove_exercise(&mut self, sheet: &str, exercise: &str) -> usize {
        let Some(exercises) = self.0.get_mut(sheet) else {
            return 0;
        };
        let len = exercises.len();
        exercises.retain(|e| e != exercise);
        len - exercises.len()
    }
}

impl FromIterator<(String, Vec<String>)> for Sheets {
    fn from_iter<T: IntoIterator<Item = (String, Vec<String>)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

const DEMO: [(&str, &[&str]); 5] = [
    (
        "Lunedì - Petto",
        &["Panca piana", "Panca inclinata", "Croci"],
    ),
    (
        "Martedì - Braccia",
        &["Curl bilanciere", "Curl manubri", "French press"],
    ),
    (
        "Mercoledì - Dorso",
        &["Trazioni", "Rematore", "Lat machine"],
    ),
    ("Giovedì - Spalle", &["Lento avanti", "Alzate laterali"]),
    ("Venerdì - Gambe", &["Squat", "Leg press", "Affondi"]),
];
