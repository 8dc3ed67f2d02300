use std::{cell::RefCell, collections::HashMap};

use gym_notes_domain as domain;
use gym_notes_web_app::{Settings, SettingsRepository};
use log::debug;
use serde::{Serialize, de::DeserializeOwned};

use crate::document::{self, Document};

/// In-process storage holding every document as serialized JSON.
///
/// An optional capacity limits the total size of all documents, mimicking the
/// quota of the browser's local storage.
#[derive(Default)]
pub struct Memory {
    documents: RefCell<HashMap<Document, String>>,
    capacity: Option<usize>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            documents: RefCell::default(),
            capacity: Some(capacity),
        }
    }

    #[must_use]
    pub fn document(&self, document: Document) -> Option<String> {
        self.documents.borrow().get(&document).cloned()
    }

    pub fn set_document(&self, document: Document, json: &str) {
        self.documents
            .borrow_mut()
            .insert(document, json.to_string());
    }

    fn get<T: DeserializeOwned>(&self, document: Document) -> Result<Option<T>, domain::StorageError> {
        self.documents
            .borrow()
            .get(&document)
            .map(|json| document::parse(document, json))
            .transpose()
    }

    fn set<T: Serialize>(&self, document: Document, value: &T) -> Result<(), domain::StorageError> {
        let json =
            serde_json::to_string(value).map_err(|err| document::corrupt(document, &err))?;
        let mut documents = self.documents.borrow_mut();
        if let Some(capacity) = self.capacity {
            let size = documents
                .iter()
                .filter(|(d, _)| **d != document)
                .map(|(_, json)| json.len())
                .sum::<usize>()
                + json.len();
            if size > capacity {
                debug!("rejected write of {}: {size} > {capacity}", document.as_ref());
                return Err(domain::StorageError::QuotaExceeded);
            }
        }
        documents.insert(document, json);
        Ok(())
    }
}

impl domain::SheetRepository for Memory {
    fn read_sheets(&self) -> Result<Option<domain::Sheets>, domain::ReadError> {
        Ok(self
            .get::<document::Sheets>(Document::Sheets)?
            .map(domain::Sheets::from))
    }

    fn write_sheets(&self, sheets: &domain::Sheets) -> Result<(), domain::StorageError> {
        self.set(Document::Sheets, &document::Sheets::from(sheets))
    }
}

impl domain::HistoryRepository for Memory {
    fn read_history(&self) -> Result<domain::History, domain::ReadError> {
        Ok(self
            .get::<document::History>(Document::History)?
            .map(domain::History::from)
            .unwrap_or_default())
    }

    fn write_history(&self, history: &domain::History) -> Result<(), domain::StorageError> {
        self.set(Document::History, &document::History::from(history))
    }
}

impl SettingsRepository for Memory {
    fn read_settings(&self) -> Result<Settings, String> {
        self.get(Document::Settings)
            .map(Option::unwrap_or_default)
            .map_err(|err| err.to_string())
    }

    fn write_settings(&self, settings: Settings) -> Result<(), String> {
        self.set(Document::Settings, &settings)
            .map_err(|err| err.to_string())
    }
}
