//! Infrastructure configuration modules.

pub mod analytics;
pub mod database;
pub mod logging;
pub mod settings;
