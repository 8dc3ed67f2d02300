use gym_notes_domain::{
    CreateError, DeleteError, ExerciseKey, ExerciseSummary, HistoryService, Name, ReadError,
    SheetService, TimeSeries, ValidationError,
};
use log::debug;

/// Drawing side of the user interface.
pub trait Renderer {
    fn render_sheets(&mut self, sheets: &[String], selected: Option<&str>);
    fn render_exercises(&mut self, exercises: &[ExerciseSummary], selected: Option<&ExerciseKey>);
    /// Labels and values are parallel sequences.
    fn render_chart(&mut self, labels: &[String], values: &[Option<f64>]);
    fn report_error(&mut self, message: &str);
}

#[derive(thiserror::Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Create(#[from] CreateError),
    #[error(transparent)]
    Delete(#[from] DeleteError),
}

/// Keeps the selected sheet and exercise and re-renders the affected parts of
/// the user interface after every action.
pub struct ViewController<S, R> {
    service: S,
    renderer: R,
    selected_sheet: Option<String>,
    selected_exercise: Option<ExerciseKey>,
}

impl<S, R> ViewController<S, R>
where
    S: SheetService + HistoryService,
    R: Renderer,
{
    pub fn new(service: S, renderer: R) -> Self {
        Self {
            service,
            renderer,
            selected_sheet: None,
            selected_exercise: None,
        }
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn selected_sheet(&self) -> Option<&str> {
        self.selected_sheet.as_deref()
    }

    #[must_use]
    pub fn selected_exercise(&self) -> Option<&ExerciseKey> {
        self.selected_exercise.as_ref()
    }

    /// Render the sheets and select the first one.
    pub fn initialize(&mut self) -> Result<(), ViewError> {
        let result = self.render_sheets(None);
        self.report(result)
    }

    pub fn select_sheet(&mut self, name: &str) -> Result<(), ViewError> {
        let result = self.change_sheet(name);
        self.report(result)
    }

    pub fn select_exercise(&mut self, key: ExerciseKey) -> Result<(), ViewError> {
        self.selected_exercise = Some(key);
        let result = self.render();
        self.report(result)
    }

    /// Parse and save a record for the selected exercise.
    pub fn record_entry(&mut self, weight: &str, reps: &str) -> Result<(), ViewError> {
        let result = self.record(weight, reps);
        self.report(result)
    }

    /// Add an exercise to a sheet, falling back to the selected sheet if none is given.
    pub fn create_exercise(&mut self, name: &str, sheet: &str) -> Result<(), ViewError> {
        let result = self.create(name, sheet);
        self.report(result)
    }

    /// Remove an exercise including its history.
    pub fn delete_exercise(&mut self, sheet: &str, exercise: &str) -> Result<(), ViewError> {
        let result = self.delete(sheet, exercise);
        self.report(result)
    }

    pub fn clear_selected_history(&mut self) -> Result<(), ViewError> {
        let result = self.clear();
        self.report(result)
    }

    fn report(&mut self, result: Result<(), ViewError>) -> Result<(), ViewError> {
        if let Err(ref err) = result {
            self.renderer.report_error(&err.to_string());
        }
        result
    }

    fn render_sheets(&mut self, selected: Option<&str>) -> Result<(), ViewError> {
        let sheets = self.service.list_sheets()?;
        let sheet = selected
            .map(str::to_string)
            .or_else(|| self.selected_sheet.clone())
            .filter(|s| sheets.contains(s))
            .or_else(|| sheets.first().cloned());
        self.renderer.render_sheets(&sheets, sheet.as_deref());
        match sheet {
            Some(sheet) => self.change_sheet(&sheet),
            None => {
                self.selected_sheet = None;
                self.selected_exercise = None;
                self.render()
            }
        }
    }

    fn change_sheet(&mut self, name: &str) -> Result<(), ViewError> {
        debug!("selecting sheet \"{name}\"");
        self.selected_sheet = Some(name.to_string());
        self.selected_exercise = self
            .service
            .list_exercises(name)?
            .first()
            .map(|exercise| gym_notes_domain::derive_key(name, exercise));
        self.render()
    }

    fn record(&mut self, weight: &str, reps: &str) -> Result<(), ViewError> {
        let Some(key) = self.selected_exercise.clone() else {
            return Err(ValidationError::Other("Select an exercise".to_string()).into());
        };
        let weight = self.service.validate_weight(weight)?;
        let reps = self.service.validate_reps(reps)?;
        self.service.append_record(&key, weight, reps)?;
        self.render()
    }

    fn create(&mut self, name: &str, sheet: &str) -> Result<(), ViewError> {
        let sheet = match (sheet.trim(), self.selected_sheet.as_deref()) {
            ("", Some(selected)) => selected.to_string(),
            (sheet, _) => sheet.to_string(),
        };
        let name = Name::new(name).map_err(ValidationError::from)?;
        let sheet = Name::new(&sheet).map_err(ValidationError::from)?;
        self.service.add_exercise(&sheet, &name)?;
        self.render_sheets(Some(sheet.as_str()))
    }

    fn delete(&mut self, sheet: &str, exercise: &str) -> Result<(), ViewError> {
        self.service.remove_exercise(sheet, exercise)?;
        match self.selected_sheet.clone() {
            Some(selected) => self.change_sheet(&selected),
            None => self.render(),
        }
    }

    fn clear(&mut self) -> Result<(), ViewError> {
        let Some(key) = self.selected_exercise.clone() else {
            return Ok(());
        };
        self.service.clear_history(&key)?;
        self.render()
    }

    fn render(&mut self) -> Result<(), ViewError> {
        self.render_exercises()?;
        self.render_chart()
    }

    fn render_exercises(&mut self) -> Result<(), ViewError> {
        let mut summaries = vec![];
        if let Some(sheet) = &self.selected_sheet {
            for exercise in self.service.list_exercises(sheet)? {
                let key = gym_notes_domain::derive_key(sheet, &exercise);
                let history = self.service.get_history(&key)?;
                summaries.push(ExerciseSummary::new(sheet, &exercise, &history));
            }
        }
        self.renderer
            .render_exercises(&summaries, self.selected_exercise.as_ref());
        Ok(())
    }

    fn render_chart(&mut self) -> Result<(), ViewError> {
        let series = match &self.selected_exercise {
            Some(key) => TimeSeries::from(self.service.get_history(key)?.as_slice()),
            None => TimeSeries::default(),
        };
        self.renderer.render_chart(&series.labels, &series.values);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use gym_notes_domain::{
        History, HistoryRepository, Service, SheetRepository, Sheets, StorageError, derive_key,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Default)]
    struct Repository {
        sheets: RefCell<Option<Sheets>>,
        history: RefCell<History>,
        fail_writes: Cell<bool>,
    }

    impl SheetRepository for Repository {
        fn read_sheets(&self) -> Result<Option<Sheets>, ReadError> {
            Ok(self.sheets.borrow().clone())
        }

        fn write_sheets(&self, sheets: &Sheets) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Other("quota exceeded".into()));
            }
            *self.sheets.borrow_mut() = Some(sheets.clone());
            Ok(())
        }
    }

    impl HistoryRepository for Repository {
        fn read_history(&self) -> Result<History, ReadError> {
            Ok(self.history.borrow().clone())
        }

        fn write_history(&self, history: &History) -> Result<(), StorageError> {
            if self.fail_writes.get() {
                return Err(StorageError::Other("quota exceeded".into()));
            }
            *self.history.borrow_mut() = history.clone();
            Ok(())
        }
    }

    #[derive(Default)]
    struct Screen {
        sheets: Vec<String>,
        selected_sheet: Option<String>,
        exercises: Vec<(String, String)>,
        selected_exercise: Option<ExerciseKey>,
        labels: Vec<String>,
        values: Vec<Option<f64>>,
        errors: Vec<String>,
    }

    impl Renderer for Screen {
        fn render_sheets(&mut self, sheets: &[String], selected: Option<&str>) {
            self.sheets = sheets.to_vec();
            self.selected_sheet = selected.map(str::to_string);
        }

        fn render_exercises(
            &mut self,
            exercises: &[ExerciseSummary],
            selected: Option<&ExerciseKey>,
        ) {
            self.exercises = exercises
                .iter()
                .map(|e| (e.name.clone(), e.summary()))
                .collect();
            self.selected_exercise = selected.cloned();
        }

        fn render_chart(&mut self, labels: &[String], values: &[Option<f64>]) {
            self.labels = labels.to_vec();
            self.values = values.to_vec();
        }

        fn report_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }
    }

    type Controller = ViewController<Service<Repository>, Screen>;

    fn controller() -> Controller {
        let repository = Repository::default();
        *repository.sheets.borrow_mut() = Some(Sheets::from_iter([
            (
                "Legs".to_string(),
                vec!["Squat".to_string(), "Lunges".to_string()],
            ),
            ("Arms".to_string(), vec!["Curl".to_string()]),
        ]));
        let mut controller = ViewController::new(Service::new(repository), Screen::default());
        controller.initialize().unwrap();
        controller
    }

    fn exercises(controller: &Controller) -> Vec<(&str, &str)> {
        controller
            .renderer()
            .exercises
            .iter()
            .map(|(name, summary)| (name.as_str(), summary.as_str()))
            .collect()
    }

    #[test]
    fn test_initialize() {
        let controller = controller();
        let screen = controller.renderer();

        assert_eq!(screen.sheets, vec!["Legs", "Arms"]);
        assert_eq!(screen.selected_sheet.as_deref(), Some("Legs"));
        assert_eq!(
            screen.selected_exercise,
            Some(derive_key("Legs", "Squat"))
        );
        assert_eq!(exercises(&controller), vec![("Squat", "—"), ("Lunges", "—")]);
        assert!(screen.labels.is_empty());
        assert!(screen.errors.is_empty());
    }

    #[test]
    fn test_initialize_seeds_demo_sheets() {
        let mut controller = ViewController::new(Service::new(Repository::default()), Screen::default());

        controller.initialize().unwrap();

        assert_eq!(controller.renderer().sheets.len(), 5);
        assert_eq!(controller.selected_sheet(), Some("Lunedì - Petto"));
        assert_eq!(
            controller.selected_exercise(),
            Some(&derive_key("Lunedì - Petto", "Panca piana"))
        );
    }

    #[test]
    fn test_select_sheet() {
        let mut controller = controller();

        controller.select_sheet("Arms").unwrap();

        assert_eq!(controller.selected_sheet(), Some("Arms"));
        assert_eq!(
            controller.selected_exercise(),
            Some(&derive_key("Arms", "Curl"))
        );
        assert_eq!(exercises(&controller), vec![("Curl", "—")]);
    }

    #[test]
    fn test_select_unknown_sheet() {
        let mut controller = controller();

        controller.select_sheet("Sunday").unwrap();

        assert_eq!(controller.selected_exercise(), None);
        assert!(exercises(&controller).is_empty());
        assert!(controller.renderer().labels.is_empty());
    }

    #[test]
    fn test_record_entry() {
        let mut controller = controller();

        controller.record_entry("100", "5").unwrap();
        controller.record_entry("102,5", " 3 ").unwrap();

        assert_eq!(
            exercises(&controller),
            vec![("Squat", "102.5 kg x 3"), ("Lunges", "—")]
        );
        assert_eq!(controller.renderer().labels.len(), 2);
        assert_eq!(controller.renderer().values, vec![Some(100.0), Some(102.5)]);
        assert_eq!(
            controller.selected_exercise(),
            Some(&derive_key("Legs", "Squat"))
        );
    }

    #[test]
    fn test_record_invalid_entry() {
        let mut controller = controller();

        assert!(matches!(
            controller.record_entry("abc", "5"),
            Err(ViewError::Validation(ValidationError::Weight))
        ));
        assert!(matches!(
            controller.record_entry("80", "5.5"),
            Err(ViewError::Validation(ValidationError::Reps))
        ));

        assert_eq!(
            controller.renderer().errors,
            vec![
                "Weight must be a decimal number",
                "Repetitions must be a whole number"
            ]
        );
        assert_eq!(exercises(&controller), vec![("Squat", "—"), ("Lunges", "—")]);
    }

    #[test]
    fn test_record_entry_without_selected_exercise() {
        let mut controller = controller();
        controller.select_sheet("Sunday").unwrap();

        assert!(matches!(
            controller.record_entry("80", "5"),
            Err(ViewError::Validation(ValidationError::Other(_)))
        ));
    }

    #[test]
    fn test_select_exercise() {
        let mut controller = controller();
        controller.record_entry("100", "5").unwrap();

        controller
            .select_exercise(derive_key("Legs", "Lunges"))
            .unwrap();

        assert!(controller.renderer().values.is_empty());
        assert_eq!(
            controller.renderer().selected_exercise,
            Some(derive_key("Legs", "Lunges"))
        );

        controller
            .select_exercise(derive_key("Legs", "Squat"))
            .unwrap();

        assert_eq!(controller.renderer().values, vec![Some(100.0)]);
        assert_eq!(
            controller.renderer().selected_exercise,
            Some(derive_key("Legs", "Squat"))
        );
    }

    #[test]
    fn test_create_exercise() {
        let mut controller = controller();

        controller.create_exercise("  Deadlift ", "Back").unwrap();

        let screen = controller.renderer();
        assert_eq!(screen.sheets, vec!["Legs", "Arms", "Back"]);
        assert_eq!(screen.selected_sheet.as_deref(), Some("Back"));
        assert_eq!(exercises(&controller), vec![("Deadlift", "—")]);
        assert_eq!(
            controller.selected_exercise(),
            Some(&derive_key("Back", "Deadlift"))
        );
    }

    #[test]
    fn test_create_exercise_in_selected_sheet() {
        let mut controller = controller();

        controller.create_exercise("Calf raise", " ").unwrap();

        assert_eq!(controller.selected_sheet(), Some("Legs"));
        assert_eq!(
            exercises(&controller),
            vec![("Squat", "—"), ("Lunges", "—"), ("Calf raise", "—")]
        );
    }

    #[test]
    fn test_create_exercise_without_name() {
        let mut controller = controller();

        assert!(matches!(
            controller.create_exercise(" ", "Legs"),
            Err(ViewError::Validation(ValidationError::Name(_)))
        ));
        assert_eq!(controller.renderer().sheets, vec!["Legs", "Arms"]);
    }

    #[test]
    fn test_delete_exercise() {
        let mut controller = controller();
        controller.record_entry("100", "5").unwrap();

        controller.delete_exercise("Legs", "Squat").unwrap();

        assert_eq!(exercises(&controller), vec![("Lunges", "—")]);
        assert_eq!(
            controller.selected_exercise(),
            Some(&derive_key("Legs", "Lunges"))
        );
        assert!(controller.renderer().values.is_empty());

        controller.create_exercise("Squat", "Legs").unwrap();

        assert_eq!(
            exercises(&controller),
            vec![("Lunges", "—"), ("Squat", "—")]
        );
    }

    #[test]
    fn test_clear_selected_history() {
        let mut controller = controller();
        controller.record_entry("100", "5").unwrap();

        controller.clear_selected_history().unwrap();

        assert_eq!(exercises(&controller), vec![("Squat", "—"), ("Lunges", "—")]);
        assert!(controller.renderer().labels.is_empty());
        assert_eq!(
            controller.selected_exercise(),
            Some(&derive_key("Legs", "Squat"))
        );
    }

    #[test]
    fn test_clear_without_selected_exercise() {
        let mut controller = controller();
        controller.select_sheet("Sunday").unwrap();

        controller.clear_selected_history().unwrap();

        assert!(controller.renderer().errors.is_empty());
    }

    #[test]
    fn test_storage_errors_are_reported() {
        let mut controller = controller();
        controller.service.repository().fail_writes.set(true);

        assert!(matches!(
            controller.record_entry("100", "5"),
            Err(ViewError::Create(CreateError::Storage(_)))
        ));
        assert!(matches!(
            controller.delete_exercise("Legs", "Squat"),
            Err(ViewError::Delete(DeleteError::Storage(_)))
        ));
        assert_eq!(
            controller.renderer().errors,
            vec!["quota exceeded", "quota exceeded"]
        );
        assert_eq!(exercises(&controller), vec![("Squat", "—"), ("Lunges", "—")]);
    }
}
