#![forbid(unsafe_code)]

pub mod app_services;
pub mod dashboard;
pub mod error;
pub mod settings_service;
pub mod tracker_service;

pub use tracker_core::Clock;

pub use app_services::AppServices;
pub use dashboard::Dashboard;
pub use error::{AppServicesError, SettingsServiceError, TrackerServiceError};
pub use settings_service::SettingsService;
pub use tracker_service::{DailyLimit, TrackerConfig, TrackerService};
