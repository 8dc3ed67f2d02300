use chrono::Utc;
use log::{debug, error, info};

use crate::{
    CreateError, DeleteError, ExerciseKey, HistoryRecord, HistoryRepository, HistoryService, Name,
    ReadError, SheetRepository, SheetService, Sheets, derive_key,
};

pub struct Service<R> {
    repository: R,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}

macro_rules! log_on_error {
    ($func: expr, $action: literal, $entity: literal) => {{
        let result = $func;
        if let Err(ref err) = result {
            error!("failed to {} {}: {err}", $action, $entity);
        }
        result
    }};
}

impl<R: SheetRepository> Service<R> {
    /// Read all sheets, seeding the demo sheets if none have ever been written.
    fn sheets(&self) -> Result<Sheets, ReadError> {
        if let Some(sheets) = self.repository.read_sheets()? {
            return Ok(sheets);
        }
        let sheets = Sheets::demo();
        info!("seeding {} demo sheets", sheets.len());
        self.repository.write_sheets(&sheets)?;
        Ok(sheets)
    }

    fn add(&self, sheet: &Name, exercise: &Name) -> Result<(), CreateError> {
        let mut sheets = self.sheets()?;
        sheets.add_exercise(sheet.as_str(), exercise.as_str());
        self.repository.write_sheets(&sheets)?;
        debug!("added exercise \"{exercise}\" to sheet \"{sheet}\"");
        Ok(())
    }
}

impl<R: HistoryRepository> Service<R> {
    fn append(&self, key: &ExerciseKey, record: HistoryRecord) -> Result<HistoryRecord, CreateError> {
        let mut history = self.repository.read_history()?;
        history.append(key.clone(), record.clone());
        self.repository.write_history(&history)?;
        debug!("appended record to {key}");
        Ok(record)
    }

    fn delete(&self, key: &ExerciseKey) -> Result<(), DeleteError> {
        let mut history = self.repository.read_history()?;
        if let Some(records) = history.remove(key) {
            self.repository.write_history(&history)?;
            debug!("deleted {} records of {key}", records.len());
        }
        Ok(())
    }
}

impl<R: SheetRepository + HistoryRepository> Service<R> {
    fn remove(&self, sheet: &str, exercise: &str) -> Result<usize, DeleteError> {
        let mut sheets = self.sheets()?;
        let removed = sheets.remove_exercise(sheet, exercise);
        if removed > 0 {
            self.repository.write_sheets(&sheets)?;
            debug!("removed {removed} occurrences of \"{exercise}\" from sheet \"{sheet}\"");
        }
        self.delete(&derive_key(sheet, exercise))?;
        Ok(removed)
    }
}

impl<R: SheetRepository + HistoryRepository> SheetService for Service<R> {
    fn list_sheets(&self) -> Result<Vec<String>, ReadError> {
        log_on_error!(
            self.sheets().map(|sheets| sheets.names().cloned().collect()),
            "get",
            "sheets"
        )
    }

    fn list_exercises(&self, sheet: &str) -> Result<Vec<String>, ReadError> {
        log_on_error!(
            self.sheets().map(|sheets| sheets.exercises(sheet).to_vec()),
            "get",
            "exercises"
        )
    }

    fn add_exercise(&self, sheet: &Name, exercise: &Name) -> Result<(), CreateError> {
        log_on_error!(self.add(sheet, exercise), "add", "exercise")
    }

    fn remove_exercise(&self, sheet: &str, exercise: &str) -> Result<usize, DeleteError> {
        log_on_error!(self.remove(sheet, exercise), "remove", "exercise")
    }
}

impl<R: HistoryRepository> HistoryService for Service<R> {
    fn get_history(&self, key: &ExerciseKey) -> Result<Vec<HistoryRecord>, ReadError> {
        log_on_error!(
            self.repository
                .read_history()
                .map(|history| history.records(key).to_vec()),
            "get",
            "history"
        )
    }

    fn append_record(
        &self,
        key: &ExerciseKey,
        weight: f64,
        reps: u32,
    ) -> Result<HistoryRecord, CreateError> {
        let record = HistoryRecord::new(Utc::now(), weight, reps)
            .inspect_err(|err| debug!("rejected record for {key}: {err}"))?;
        log_on_error!(self.append(key, record), "append", "history record")
    }

    fn clear_history(&self, key: &ExerciseKey) -> Result<(), DeleteError> {
        log_on_error!(self.delete(key), "clear", "history")
    }

    fn delete_history(&self, key: &ExerciseKey) -> Result<(), DeleteError> {
        log_on_error!(self.delete(key), "delete", "history")
    }
}
