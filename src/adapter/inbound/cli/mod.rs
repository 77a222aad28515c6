//! CLI module graph.

pub mod command;
pub mod config;
pub mod dashboard;
pub mod diagnostic;
pub mod init;
pub mod insights;
pub mod listings;
pub mod manage;
pub mod output;
pub mod paths;
pub mod query;
pub mod run;
pub mod tables;
pub mod view;
