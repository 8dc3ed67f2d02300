use std::collections::VecDeque;

use gloo_storage::{Storage as GlooStorage, errors::StorageError as GlooError};
use gym_notes_domain as domain;
use gym_notes_web_app::{Settings, SettingsRepository, log};
use serde::{Serialize, de::DeserializeOwned};

use crate::document::{self, Document};

const QUOTA_EXCEEDED: &str = "QuotaExceededError";

/// Repositories backed by the browser's local storage.
pub struct LocalStorage;

impl LocalStorage {
    fn get<T: DeserializeOwned>(document: Document) -> Result<Option<T>, domain::StorageError> {
        match gloo_storage::LocalStorage::get(document.as_ref()) {
            Ok(value) => Ok(Some(value)),
            Err(GlooError::KeyNotFound(_)) => Ok(None),
            Err(err) => Err(storage_error(document, err)),
        }
    }

    fn set<T: Serialize>(document: Document, value: &T) -> Result<(), domain::StorageError> {
        gloo_storage::LocalStorage::set(document.as_ref(), value)
            .map_err(|err| storage_error(document, err))
    }

    pub fn clear() {
        gloo_storage::LocalStorage::clear();
    }
}

fn storage_error(document: Document, err: GlooError) -> domain::StorageError {
    match err {
        GlooError::SerdeError(err) => document::corrupt(document, &err),
        GlooError::JsError(err) if err.name == QUOTA_EXCEEDED => {
            domain::StorageError::QuotaExceeded
        }
        err => domain::StorageError::Other(Box::new(err)),
    }
}

impl domain::SheetRepository for LocalStorage {
    fn read_sheets(&self) -> Result<Option<domain::Sheets>, domain::ReadError> {
        Ok(Self::get::<document::Sheets>(Document::Sheets)?.map(domain::Sheets::from))
    }

    fn write_sheets(&self, sheets: &domain::Sheets) -> Result<(), domain::StorageError> {
        Self::set(Document::Sheets, &document::Sheets::from(sheets))
    }
}

impl domain::HistoryRepository for LocalStorage {
    fn read_history(&self) -> Result<domain::History, domain::ReadError> {
        Ok(Self::get::<document::History>(Document::History)?
            .map(domain::History::from)
            .unwrap_or_default())
    }

    fn write_history(&self, history: &domain::History) -> Result<(), domain::StorageError> {
        Self::set(Document::History, &document::History::from(history))
    }
}

impl SettingsRepository for LocalStorage {
    fn read_settings(&self) -> Result<Settings, String> {
        Self::get(Document::Settings)
            .map(Option::unwrap_or_default)
            .map_err(|err| err.to_string())
    }

    fn write_settings(&self, settings: Settings) -> Result<(), String> {
        Self::set(Document::Settings, &settings).map_err(|err| err.to_string())
    }
}

pub struct Log;

impl log::Repository for Log {
    fn read_entries(&self) -> Result<VecDeque<log::Entry>, log::Error> {
        LocalStorage::get(Document::Log)
            .map(Option::unwrap_or_default)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }

    fn write_entry(&self, entry: log::Entry) -> Result<(), log::Error> {
        let mut entries = self.read_entries()?;
        log::push_entry(&mut entries, entry);
        LocalStorage::set(Document::Log, &entries)
            .map_err(|err| log::Error::Unknown(err.to_string()))
    }
}
