// Travel Calendar Library
// Scheduling and layout engine for the trip planning calendar

pub mod error;
pub mod models;
pub mod services;
pub mod utils;
