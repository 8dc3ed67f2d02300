#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod chart;
pub mod log;
mod service;
mod settings;
mod view;

pub use service::Service;
pub use settings::*;
pub use view::*;
