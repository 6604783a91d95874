//! Settings file service.

mod service;

pub use service::SettingsService;
