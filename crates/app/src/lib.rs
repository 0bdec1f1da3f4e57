#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod dashboard;
pub mod log;
pub mod settings;

pub use dashboard::{Dashboard, DashboardError, RecordWorkoutError, record_workout};
pub use settings::{Profile, Settings, SettingsRepository, SettingsService};
