pub mod bumpversion;
pub mod config;
pub mod error;
pub mod history;
pub mod runner;
pub mod tasks;
pub mod ui;
pub mod version;

pub use error::{Result, TaskError};
