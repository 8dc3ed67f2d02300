#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

mod error;
mod history;
mod key;
mod name;
mod service;
mod sheet;
mod view;

pub use error::*;
pub use history::*;
pub use key::*;
pub use name::*;
pub use service::*;
pub use sheet::*;
pub use view::*;
