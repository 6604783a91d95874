// Service module exports
// Pure engine components (grid, layout, drag, search) and the SQLite
// collaborators they are wired to

pub mod database;
pub mod destination;
pub mod drag;
pub mod grid;
pub mod layout;
pub mod ports;
pub mod search;
pub mod settings;
pub mod trip;
