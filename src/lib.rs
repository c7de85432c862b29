pub mod client;
pub mod config;
pub mod prefs;
pub mod render;
pub mod report;
