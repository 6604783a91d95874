// Module exports for models

pub mod destination;
pub mod settings;
pub mod trip;
