#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod document;
#[allow(clippy::module_name_repetitions)]
pub mod local_storage;
pub mod memory;

pub use document::Document;
