pub mod models;
pub mod plugin;
