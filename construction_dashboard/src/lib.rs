#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod normalizer;
pub mod providers;
pub mod report;
#[cfg(feature = "cli")]
pub mod ui;
